use aws_lambda_rack_adapter::handler::function_handler;
use aws_lambda_rack_adapter::{AdapterConfig, ApplicationHost, EchoApplication};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Use Lambda runtime's built-in tracing subscriber for CloudWatch Logs
    lambda_runtime::tracing::init_default_subscriber();

    // Both live for the whole execution context and are shared by every invocation
    let config = AdapterConfig::from_env();
    let host = ApplicationHost::new(EchoApplication::load);
    let (config, host) = (&config, &host);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        function_handler(host, config, event).await
    }))
    .await
}
