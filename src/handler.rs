use lambda_runtime::tracing::{debug, error, info};
use lambda_runtime::{Diagnostic, LambdaEvent};
use serde_json::Value;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::config::AdapterConfig;
use crate::host::{Application, ApplicationHost};
use crate::models::error::Result;
use crate::models::{
    AdapterError, CanonicalRequest, CanonicalResponse, GatewayStyle, Headers, InboundEvent,
    OutboundEnvelope,
};
use crate::request::build_request;
use crate::response::{base64_flag, build_envelope};

/// Status returned whenever the adapter or the application fails.
pub const ERROR_STATUS: u16 = 500;

const ERROR_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Runs one event through the application: builds the request, calls the
/// application once, and builds the reply.
///
/// # Errors
///
/// Returns the first failure among request construction, the application
/// call (including a panic inside it), and response construction.
pub fn translate(
    event: &InboundEvent,
    style: GatewayStyle,
    app: &dyn Application,
    config: &AdapterConfig,
) -> Result<OutboundEnvelope> {
    let request = build_request(event, config)?;
    let response = call_application(app, request)?;
    build_envelope(response, style, config)
}

fn call_application(app: &dyn Application, request: CanonicalRequest) -> Result<CanonicalResponse> {
    panic::catch_unwind(AssertUnwindSafe(|| app.call(request)))
        .unwrap_or_else(|payload| Err(anyhow::anyhow!(panic_message(payload.as_ref()))))
        .map_err(AdapterError::Application)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());
    format!("application panicked: {detail}")
}

/// Builds the `500` reply for a failure.
///
/// The body is the plain-text error chain so the failure stays visible to
/// the caller even though the invocation itself succeeds.
#[must_use]
pub fn error_envelope(err: &AdapterError, style: GatewayStyle) -> OutboundEnvelope {
    OutboundEnvelope {
        status_code: ERROR_STATUS,
        headers: Headers::from([("Content-Type", ERROR_CONTENT_TYPE)]),
        body: err.to_string(),
        is_base64_encoded: base64_flag(style),
    }
}

async fn dispatch<A: Application>(
    host: &ApplicationHost<A>,
    config: &AdapterConfig,
    payload: Value,
    style: GatewayStyle,
) -> Result<OutboundEnvelope> {
    let event: InboundEvent = serde_json::from_value(payload)?;
    let app = host.application().await?;

    info!(
        method = event.http_method.as_deref().unwrap_or_default(),
        path = event.path.as_deref().unwrap_or_default(),
        style = ?style,
        "Dispatching request"
    );

    translate(&event, style, app, config)
}

/// Turns a raw gateway payload into a gateway reply.
///
/// Never fails: every error is converted into a `500` envelope.
pub async fn handle_event<A: Application>(
    host: &ApplicationHost<A>,
    config: &AdapterConfig,
    payload: Value,
) -> OutboundEnvelope {
    let style = GatewayStyle::detect(&payload);

    match dispatch(host, config, payload, style).await {
        Ok(envelope) => {
            info!(status = envelope.status_code, "Request completed");
            envelope
        }
        Err(err) => {
            error!(kind = err.kind(), error = %err, "Request failed");
            error_envelope(&err, style)
        }
    }
}

/// Lambda event handler for API Gateway and Application Load Balancer events.
/// Logs the full event when `RUST_LOG=debug/trace`, only the request id otherwise.
///
/// # Errors
///
/// Never returns an error; failures are reported to the client as `500`
/// responses so the gateway always receives a well-formed reply.
pub async fn function_handler<A: Application>(
    host: &ApplicationHost<A>,
    config: &AdapterConfig,
    event: LambdaEvent<Value>,
) -> std::result::Result<OutboundEnvelope, Diagnostic> {
    let (payload, context) = event.into_parts();

    debug!(payload = ?payload, "Received gateway event");
    info!(request_id = %context.request_id, "Handling gateway event");

    Ok(handle_event(host, config, payload).await)
}
