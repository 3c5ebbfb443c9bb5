//! Adapter configuration.
//!
//! Read once from the environment at cold start and shared by every
//! invocation in the execution context.

use lambda_runtime::tracing::warn;

/// Content types whose bodies are passed through as UTF-8 text.
pub const DEFAULT_TEXT_CONTENT_TYPES: [&str; 4] = [
    "application/json",
    "text/html; charset=UTF-8",
    "text/html; charset=utf-8",
    "text/css",
];

/// Misspelling carried by older deployments of this adapter. A whitelist
/// entry with this value never matches a real JSON response.
const LEGACY_JSON_MISSPELLING: &str = "apllication/json";

pub const DEFAULT_SERVER_NAME: &str = "localhost";
pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_SCHEME: &str = "https";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Exact `Content-Type` values sent back as text; everything else is base64.
    pub text_content_types: Vec<String>,
    pub server_name: String,
    /// Port used when the event has no `X-Forwarded-Port` header.
    pub default_port: u16,
    /// Scheme used when the event has no `X-Forwarded-Proto` header.
    pub default_scheme: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            text_content_types: DEFAULT_TEXT_CONTENT_TYPES
                .iter()
                .map(ToString::to_string)
                .collect(),
            server_name: DEFAULT_SERVER_NAME.to_string(),
            default_port: DEFAULT_PORT,
            default_scheme: DEFAULT_SCHEME.to_string(),
        }
    }
}

impl AdapterConfig {
    /// Loads the configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ADAPTER_TEXT_CONTENT_TYPES`: comma-separated textual content types
    /// - `ADAPTER_SERVER_NAME`: reported server name (default: `localhost`)
    /// - `ADAPTER_DEFAULT_PORT`: fallback port (default: 443)
    /// - `ADAPTER_DEFAULT_SCHEME`: fallback scheme (default: `https`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Unset, empty, or unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let text_content_types = lookup("ADAPTER_TEXT_CONTENT_TYPES").map_or(
            defaults.text_content_types,
            |raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(ToString::to_string)
                    .collect()
            },
        );

        let default_port = match lookup("ADAPTER_DEFAULT_PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, "Ignoring unparsable ADAPTER_DEFAULT_PORT");
                defaults.default_port
            }),
            None => defaults.default_port,
        };

        let config = Self {
            text_content_types,
            server_name: lookup("ADAPTER_SERVER_NAME").unwrap_or(defaults.server_name),
            default_port,
            default_scheme: lookup("ADAPTER_DEFAULT_SCHEME").unwrap_or(defaults.default_scheme),
        };
        config.flag_suspicious_content_types();
        config
    }

    /// Whether a response with this exact `Content-Type` is sent as text.
    #[must_use]
    pub fn is_text_content_type(&self, content_type: &str) -> bool {
        self.text_content_types.iter().any(|t| t == content_type)
    }

    fn flag_suspicious_content_types(&self) {
        if self.is_text_content_type(LEGACY_JSON_MISSPELLING) {
            warn!(
                content_type = LEGACY_JSON_MISSPELLING,
                "Text content type whitelist contains a misspelled JSON type; \
                 application/json responses will be base64 encoded"
            );
        }
    }
}
