//! Gateway event → application request.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lambda_runtime::tracing::{debug, warn};
use std::io::{self, Cursor};

use crate::config::AdapterConfig;
use crate::models::error::Result;
use crate::models::request::INTERFACE_VERSION;
use crate::models::{CanonicalRequest, InboundEvent};
use crate::utils::forwarded_header_name;

const FORWARDED_PORT_HEADER: &str = "x-forwarded-port";
const FORWARDED_PROTO_HEADER: &str = "x-forwarded-proto";
const CONTENT_TYPE_HEADER: &str = "content-type";

/// Builds the application request for a gateway event.
///
/// Missing event fields are replaced with defaults, so the only failure is a
/// body flagged as base64 that does not decode.
///
/// # Errors
///
/// Returns [`AdapterError::InvalidBase64`](crate::models::AdapterError::InvalidBase64)
/// if `isBase64Encoded` is set and the body is not valid base64.
pub fn build_request(event: &InboundEvent, config: &AdapterConfig) -> Result<CanonicalRequest> {
    let body = decode_body(event)?;
    let path_info = event.path.clone().unwrap_or_default();

    let request = CanonicalRequest {
        method: event.http_method.clone().unwrap_or_default(),
        script_name: script_name(event, &path_info),
        query_string: build_query_string(event.query_string_parameters.as_deref()),
        server_name: config.server_name.clone(),
        server_port: server_port(event, config),
        content_type: event
            .header(CONTENT_TYPE_HEADER)
            .unwrap_or_default()
            .to_string(),
        url_scheme: event
            .header(FORWARDED_PROTO_HEADER)
            .map_or_else(|| config.default_scheme.clone(), ToString::to_string),
        interface_version: INTERFACE_VERSION,
        remote_addr: event
            .request_context
            .as_ref()
            .and_then(|context| context.identity.as_ref())
            .and_then(|identity| identity.source_ip.clone()),
        input: Cursor::new(body),
        errors: Box::new(io::stderr()),
        http_headers: event
            .headers
            .iter()
            .flat_map(|headers| headers.iter())
            .map(|(name, value)| (forwarded_header_name(name), value.to_string()))
            .collect(),
        path_info,
    };

    debug!(request = ?request, "Built application request");
    Ok(request)
}

/// Decodes the event body into raw bytes. An absent body is empty.
fn decode_body(event: &InboundEvent) -> Result<Vec<u8>> {
    match event.body.as_deref() {
        None => Ok(Vec::new()),
        Some(body) if event.is_base64_encoded => Ok(STANDARD.decode(body)?),
        Some(body) => Ok(body.as_bytes().to_vec()),
    }
}

/// Encodes query parameters as `key=value&...`, keeping the event's order.
#[must_use]
pub fn build_query_string(params: Option<&[(String, String)]>) -> String {
    params
        .unwrap_or_default()
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Derives the mount prefix by removing the route path from the end of
/// `requestContext.path`.
///
/// `/prod/items` with path `/items` → `/prod`. When the context path does
/// not end with the route path it is used unchanged.
fn script_name(event: &InboundEvent, path: &str) -> String {
    let Some(context_path) = event
        .request_context
        .as_ref()
        .and_then(|context| context.path.as_deref())
    else {
        return String::new();
    };

    context_path
        .strip_suffix(path)
        .unwrap_or(context_path)
        .to_string()
}

fn server_port(event: &InboundEvent, config: &AdapterConfig) -> u16 {
    let Some(raw) = event.header(FORWARDED_PORT_HEADER) else {
        return config.default_port;
    };

    raw.trim().parse().unwrap_or_else(|_| {
        warn!(value = %raw, "Ignoring unparsable X-Forwarded-Port header");
        config.default_port
    })
}
