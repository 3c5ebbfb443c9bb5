//! Runs a synchronous request/response web application behind AWS Lambda.
//!
//! API Gateway and Application Load Balancer deliver each HTTP request as a
//! JSON event. The adapter rebuilds a [`CanonicalRequest`] from the event,
//! hands it to the hosted [`Application`] once, and converts the returned
//! [`CanonicalResponse`] into the reply envelope the gateway expects.

pub mod config;
pub mod handler;
pub mod host;
pub mod models;
pub mod request;
pub mod response;
pub mod utils;

pub use config::AdapterConfig;
pub use handler::{function_handler, handle_event, translate};
pub use host::{Application, ApplicationHost, EchoApplication};
pub use models::{CanonicalRequest, CanonicalResponse, OutboundEnvelope};
