use serde::Serialize;

use super::headers::Headers;

/// Response returned by the wrapped application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalResponse {
    pub status: u16,
    pub headers: Headers,
    /// Body chunks in the order the application produced them.
    pub body: Vec<Vec<u8>>,
}

impl CanonicalResponse {
    #[must_use]
    pub const fn new(status: u16, headers: Headers, body: Vec<Vec<u8>>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Concatenates the body chunks into a single buffer.
    #[must_use]
    pub fn body_bytes(&self) -> Vec<u8> {
        self.body.concat()
    }
}

/// Reply structure expected by API Gateway and Application Load Balancer
/// Lambda integrations.
///
/// <https://docs.aws.amazon.com/apigateway/latest/developerguide/set-up-lambda-proxy-integrations.html>
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OutboundEnvelope {
    pub status_code: u16,
    pub headers: Headers,
    pub body: String,
    /// Only emitted for load balancer events, which reject replies without it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_base64_encoded: Option<bool>,
}
