pub mod error;
pub mod event;
pub mod headers;
pub mod request;
pub mod response;

pub use error::AdapterError;
pub use event::{GatewayStyle, InboundEvent, RequestContext};
pub use headers::Headers;
pub use request::CanonicalRequest;
pub use response::{CanonicalResponse, OutboundEnvelope};
