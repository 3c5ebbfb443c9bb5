//! Error types for the adapter.
//!
//! Every variant ends up in the same place: the handler turns it into a
//! `500` envelope whose body is the rendered error chain. The variants exist
//! so logs and tests can tell the failure stages apart.

use thiserror::Error;

/// Adapter result type.
pub type Result<T> = std::result::Result<T, AdapterError>;

#[derive(Debug, Error)]
pub enum AdapterError {
    /// The payload did not have the shape of a gateway event.
    #[error("invalid gateway event: {0}")]
    InvalidEvent(#[from] serde_json::Error),

    /// The event was flagged as base64 but the body did not decode.
    #[error("invalid base64 request body: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// A response declared a textual content type but its body was not UTF-8.
    #[error("response body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// The application could not be loaded.
    #[error("application failed to load: {0:#}")]
    Load(anyhow::Error),

    /// The application returned an error while handling the request.
    #[error("application error: {0:#}")]
    Application(anyhow::Error),
}

impl AdapterError {
    /// Short, stable name of the failure stage, used as a log field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidEvent(_) => "InvalidEvent",
            Self::InvalidBase64(_) => "InvalidBase64",
            Self::InvalidUtf8(_) => "InvalidUtf8",
            Self::Load(_) => "LoadError",
            Self::Application(_) => "ApplicationError",
        }
    }
}
