// Handler tests
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use aws_lambda_rack_adapter::config::AdapterConfig;
use aws_lambda_rack_adapter::handler::handle_event;
use aws_lambda_rack_adapter::host::{Application, ApplicationHost};
use aws_lambda_rack_adapter::models::{CanonicalRequest, CanonicalResponse, Headers};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use mockall::mock;
use serde_json::{Value, json};

mock! {
    pub App {}

    impl Application for App {
        fn call(&self, request: CanonicalRequest) -> anyhow::Result<CanonicalResponse>;
    }
}

fn json_response(body: &str) -> CanonicalResponse {
    CanonicalResponse::new(
        200,
        Headers::from([("Content-Type", "application/json")]),
        vec![body.as_bytes().to_vec()],
    )
}

/// Runs `payload` through a host wrapping `app` and returns the serialized envelope.
async fn invoke(app: MockApp, payload: Value) -> Value {
    let host = ApplicationHost::with_application(app);
    let envelope = handle_event(&host, &AdapterConfig::default(), payload).await;
    serde_json::to_value(envelope).unwrap()
}

#[tokio::test]
async fn test_get_items_scenario() {
    let mut app = MockApp::new();
    app.expect_call()
        .times(1)
        .returning(|_| Ok(json_response(r#"{"ok":true}"#)));

    let envelope = invoke(
        app,
        json!({
            "httpMethod": "GET",
            "path": "/items",
            "headers": {},
            "queryStringParameters": null,
            "body": null,
            "isBase64Encoded": false,
            "requestContext": {"path": "/items"}
        }),
    )
    .await;

    assert_eq!(
        envelope,
        json!({
            "statusCode": 200,
            "headers": {"Content-Type": "application/json"},
            "body": "{\"ok\":true}"
        })
    );
}

#[tokio::test]
async fn test_plain_body_delivered_verbatim() {
    let bodies = ["", "hello", "{\"a\": [1, 2]}", "line1\nline2\r\n", "\u{1f980} crab"];

    for body in bodies {
        let expected = body.as_bytes().to_vec();
        let mut app = MockApp::new();
        app.expect_call()
            .withf(move |request| request.body() == expected.as_slice())
            .times(1)
            .returning(|_| Ok(json_response("{}")));

        let envelope = invoke(app, json!({"body": body, "isBase64Encoded": false})).await;
        assert_eq!(envelope["statusCode"], 200, "for body {body:?}");
    }
}

#[tokio::test]
async fn test_base64_body_delivered_decoded() {
    let raw: Vec<u8> = (0..=255).collect();
    let encoded = STANDARD.encode(&raw);

    let mut app = MockApp::new();
    app.expect_call()
        .withf(move |request| request.body() == raw.as_slice())
        .times(1)
        .returning(|_| Ok(json_response("{}")));

    let envelope = invoke(app, json!({"body": encoded, "isBase64Encoded": true})).await;
    assert_eq!(envelope["statusCode"], 200);
}

#[test]
fn test_base64_decode_then_encode_is_identity() {
    let samples = ["", "AA==", "AAE=", "AAEC", "aGVsbG8gd29ybGQ=", "/+8A"];
    for sample in samples {
        let decoded = STANDARD.decode(sample).unwrap();
        assert_eq!(STANDARD.encode(decoded), sample);
    }
}

#[tokio::test]
async fn test_invalid_base64_never_reaches_application() {
    let mut app = MockApp::new();
    app.expect_call().times(0);

    let envelope = invoke(app, json!({"body": "%%%", "isBase64Encoded": true})).await;

    assert_eq!(envelope["statusCode"], 500);
    assert!(
        envelope["body"]
            .as_str()
            .unwrap()
            .starts_with("invalid base64 request body")
    );
}

#[tokio::test]
async fn test_query_string_reconstruction() {
    let mut app = MockApp::new();
    app.expect_call()
        .withf(|request| request.query_string.is_empty())
        .times(1)
        .returning(|_| Ok(json_response("{}")));
    invoke(app, json!({"httpMethod": "GET"})).await;

    let mut app = MockApp::new();
    app.expect_call()
        .withf(|request| {
            let pairs: Vec<&str> = request.query_string.split('&').collect();
            pairs.len() == 2 && pairs.contains(&"a=1") && pairs.contains(&"b=2")
        })
        .times(1)
        .returning(|_| Ok(json_response("{}")));
    invoke(
        app,
        json!({"httpMethod": "GET", "queryStringParameters": {"a": "1", "b": "2"}}),
    )
    .await;
}

#[tokio::test]
async fn test_header_forwarding() {
    let mut app = MockApp::new();
    app.expect_call()
        .withf(|request| request.http_headers.is_empty())
        .times(1)
        .returning(|_| Ok(json_response("{}")));
    invoke(app, json!({"httpMethod": "GET", "headers": null})).await;

    let mut app = MockApp::new();
    app.expect_call()
        .withf(|request| {
            request.http_headers == vec![("HTTP_X_FOO".to_string(), "bar".to_string())]
        })
        .times(1)
        .returning(|_| Ok(json_response("{}")));
    invoke(app, json!({"httpMethod": "GET", "headers": {"X-Foo": "bar"}})).await;
}

#[tokio::test]
async fn test_request_fields_from_gateway_event() {
    let mut app = MockApp::new();
    app.expect_call()
        .withf(|request| {
            request.method == "POST"
                && request.script_name == "/prod"
                && request.path_info == "/orders"
                && request.server_name == "localhost"
                && request.server_port == 443
                && request.url_scheme == "https"
                && request.content_type == "application/x-www-form-urlencoded"
        })
        .times(1)
        .returning(|_| Ok(json_response("{}")));

    let envelope = invoke(
        app,
        json!({
            "httpMethod": "POST",
            "path": "/orders",
            "headers": {"content-type": "application/x-www-form-urlencoded"},
            "body": "qty=2",
            "requestContext": {"path": "/prod/orders"}
        }),
    )
    .await;
    assert_eq!(envelope["statusCode"], 200);
}

#[tokio::test]
async fn test_load_balancer_event_sets_base64_flag() {
    let mut app = MockApp::new();
    app.expect_call()
        .times(1)
        .returning(|_| Ok(json_response("{}")));

    let envelope = invoke(
        app,
        json!({
            "httpMethod": "GET",
            "path": "/health",
            "headers": {"x-forwarded-port": "80", "x-forwarded-proto": "http"},
            "requestContext": {
                "elb": {"targetGroupArn": "arn:aws:elasticloadbalancing:eu-west-1:123456789012:targetgroup/app/abc"}
            }
        }),
    )
    .await;

    assert_eq!(envelope["isBase64Encoded"], json!(false));
}

#[tokio::test]
async fn test_api_gateway_event_omits_base64_flag() {
    let mut app = MockApp::new();
    app.expect_call()
        .times(1)
        .returning(|_| Ok(json_response("{}")));

    let envelope = invoke(
        app,
        json!({"httpMethod": "GET", "requestContext": {"path": "/prod/", "stage": "prod"}}),
    )
    .await;

    assert!(envelope.get("isBase64Encoded").is_none());
}

#[tokio::test]
async fn test_binary_response_is_base64_encoded() {
    let png: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    let chunks = vec![png[..3].to_vec(), png[3..].to_vec()];

    let mut app = MockApp::new();
    app.expect_call().times(1).returning(move |_| {
        Ok(CanonicalResponse::new(
            200,
            Headers::from([("Content-Type", "image/png")]),
            chunks.clone(),
        ))
    });

    let envelope = invoke(app, json!({"httpMethod": "GET", "path": "/logo.png"})).await;

    assert_eq!(envelope["body"], json!(STANDARD.encode(&png)));
    assert_eq!(envelope["headers"]["Content-Type"], "image/png");
}

#[tokio::test]
async fn test_text_response_chunks_are_concatenated() {
    let mut app = MockApp::new();
    app.expect_call().times(1).returning(|_| {
        Ok(CanonicalResponse::new(
            201,
            Headers::from([("Content-Type", "text/html; charset=UTF-8")]),
            vec![b"<h1>".to_vec(), b"Created".to_vec(), b"</h1>".to_vec()],
        ))
    });

    let envelope = invoke(app, json!({"httpMethod": "POST"})).await;

    assert_eq!(envelope["statusCode"], 201);
    assert_eq!(envelope["body"], "<h1>Created</h1>");
}

#[tokio::test]
async fn test_application_error_becomes_500() {
    let mut app = MockApp::new();
    app.expect_call()
        .times(1)
        .returning(|_| Err(anyhow::anyhow!("relation \"users\" does not exist")));

    let envelope = invoke(app, json!({"httpMethod": "GET", "path": "/users"})).await;

    assert_eq!(envelope["statusCode"], 500);
    let body = envelope["body"].as_str().unwrap();
    assert!(!body.is_empty());
    assert!(body.contains("relation \"users\" does not exist"));
}

#[tokio::test]
async fn test_non_utf8_text_response_becomes_500() {
    let mut app = MockApp::new();
    app.expect_call().times(1).returning(|_| {
        Ok(CanonicalResponse::new(
            200,
            Headers::from([("Content-Type", "text/css")]),
            vec![vec![0xc3, 0x28]],
        ))
    });

    let envelope = invoke(
        app,
        json!({"httpMethod": "GET", "requestContext": {"elb": {}}}),
    )
    .await;

    assert_eq!(envelope["statusCode"], 500);
    assert_eq!(envelope["isBase64Encoded"], json!(false));
}

#[tokio::test]
async fn test_load_failure_becomes_500() {
    let host: ApplicationHost<MockApp> =
        ApplicationHost::new(|| Err(anyhow::anyhow!("config.ru not found")));

    let envelope = handle_event(&host, &AdapterConfig::default(), json!({"httpMethod": "GET"})).await;

    assert_eq!(envelope.status_code, 500);
    assert_eq!(envelope.body, "application failed to load: config.ru not found");
}

#[tokio::test]
async fn test_whitelist_comes_from_config() {
    let mut app = MockApp::new();
    app.expect_call().times(1).returning(|_| {
        Ok(CanonicalResponse::new(
            200,
            Headers::from([("Content-Type", "text/plain")]),
            vec![b"plain".to_vec()],
        ))
    });

    let config = AdapterConfig {
        text_content_types: vec!["text/plain".to_string()],
        ..AdapterConfig::default()
    };
    let host = ApplicationHost::with_application(app);
    let envelope = handle_event(&host, &config, json!({"httpMethod": "GET"})).await;

    assert_eq!(envelope.body, "plain");
}
