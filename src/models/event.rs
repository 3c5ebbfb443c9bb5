//! Inbound gateway event models.
//!
//! These types cover the subset of the API Gateway REST proxy event and the
//! Application Load Balancer target event that the adapter reads. Every
//! field is optional so that sparse test events and the differences between
//! the two integrations never fail deserialization.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::headers::{Headers, deserialize_ordered_pairs};

/// HTTP request event delivered by API Gateway or an Application Load Balancer.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InboundEvent {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default, deserialize_with = "deserialize_ordered_pairs")]
    pub query_string_parameters: Option<Vec<(String, String)>>,
    #[serde(default)]
    pub headers: Option<Headers>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_base64_encoded: bool,
    #[serde(default)]
    pub request_context: Option<RequestContext>,
}

fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

/// Routing context attached to the event by the gateway.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// Full request path as seen by the gateway, including any stage or
    /// base-path mapping prefix.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub identity: Option<Identity>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(default)]
    pub source_ip: Option<String>,
}

/// Front-door integration that produced the event.
///
/// The reply format differs slightly between the two, so the style is
/// resolved once from the raw payload and passed along explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatewayStyle {
    /// Path-based API Gateway proxy integration.
    #[default]
    ApiGateway,
    /// Application Load Balancer target integration (`requestContext.elb`).
    LoadBalancer,
}

impl GatewayStyle {
    /// Detects the integration style from a raw event payload.
    ///
    /// Only the presence of the `elb` key matters; its value is ignored.
    #[must_use]
    pub fn detect(payload: &Value) -> Self {
        let is_elb = payload
            .get("requestContext")
            .and_then(Value::as_object)
            .is_some_and(|context| context.contains_key("elb"));

        if is_elb {
            Self::LoadBalancer
        } else {
            Self::ApiGateway
        }
    }
}

impl InboundEvent {
    /// Looks up an inbound header by name, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.as_ref().and_then(|headers| headers.get(name))
    }
}
