//! Application response → gateway reply.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lambda_runtime::tracing::{debug, warn};

use crate::config::AdapterConfig;
use crate::models::error::Result;
use crate::models::{CanonicalResponse, GatewayStyle, Headers, OutboundEnvelope};
use crate::utils::looks_textual;

const CONTENT_TYPE_HEADER: &str = "Content-Type";

/// How a response body is carried in the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    /// UTF-8 text, passed through unchanged.
    Text,
    /// Raw bytes, base64 encoded.
    Base64,
}

impl BodyEncoding {
    /// Chooses the encoding from the response's `Content-Type` alone.
    ///
    /// The body is never inspected: a binary payload labelled with a
    /// whitelisted type fails UTF-8 conversion instead of being sniffed.
    #[must_use]
    pub fn for_headers(headers: &Headers, config: &AdapterConfig) -> Self {
        let content_type = headers.get(CONTENT_TYPE_HEADER).unwrap_or_default();
        if config.is_text_content_type(content_type) {
            return Self::Text;
        }

        if looks_textual(content_type) {
            warn!(
                content_type = %content_type,
                "Textual content type is not whitelisted, body will be base64 encoded"
            );
        }
        Self::Base64
    }
}

/// Builds the gateway reply for an application response.
///
/// # Errors
///
/// Returns [`AdapterError::InvalidUtf8`](crate::models::AdapterError::InvalidUtf8)
/// when the content type selects text encoding but the body is not UTF-8.
pub fn build_envelope(
    response: CanonicalResponse,
    style: GatewayStyle,
    config: &AdapterConfig,
) -> Result<OutboundEnvelope> {
    let encoding = BodyEncoding::for_headers(&response.headers, config);
    let bytes = response.body_bytes();

    debug!(
        status = response.status,
        encoding = ?encoding,
        body_len = bytes.len(),
        "Building gateway envelope"
    );

    let body = match encoding {
        BodyEncoding::Text => String::from_utf8(bytes)?,
        BodyEncoding::Base64 => STANDARD.encode(bytes),
    };

    Ok(OutboundEnvelope {
        status_code: response.status,
        headers: response.headers,
        body,
        is_base64_encoded: base64_flag(style),
    })
}

/// Load balancers require `isBase64Encoded` on every reply; API Gateway
/// tolerates its absence.
#[must_use]
pub const fn base64_flag(style: GatewayStyle) -> Option<bool> {
    match style {
        GatewayStyle::LoadBalancer => Some(false),
        GatewayStyle::ApiGateway => None,
    }
}
