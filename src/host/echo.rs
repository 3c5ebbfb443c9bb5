use serde::Serialize;
use std::io::Write;

use super::Application;
use crate::models::{CanonicalRequest, CanonicalResponse, Headers};

/// Application that answers every request with a JSON description of it.
///
/// The binary hosts this by default. Deployed behind a gateway it shows
/// exactly what the adapter reconstructed from the event, which makes it a
/// handy smoke test for new routes and integrations.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoApplication;

#[derive(Serialize)]
struct Echo<'a> {
    method: &'a str,
    script_name: &'a str,
    path_info: &'a str,
    query_string: &'a str,
    server_name: &'a str,
    server_port: u16,
    url_scheme: &'a str,
    content_type: &'a str,
    remote_addr: Option<&'a str>,
    headers: Vec<(&'a str, &'a str)>,
    body: String,
}

impl EchoApplication {
    /// Loader used by the binary.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches the host's loader contract.
    pub const fn load() -> anyhow::Result<Self> {
        Ok(Self)
    }
}

impl Application for EchoApplication {
    fn call(&self, mut request: CanonicalRequest) -> anyhow::Result<CanonicalResponse> {
        let body = String::from_utf8_lossy(request.body()).into_owned();
        let echo = Echo {
            method: &request.method,
            script_name: &request.script_name,
            path_info: &request.path_info,
            query_string: &request.query_string,
            server_name: &request.server_name,
            server_port: request.server_port,
            url_scheme: &request.url_scheme,
            content_type: &request.content_type,
            remote_addr: request.remote_addr.as_deref(),
            headers: request
                .http_headers
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect(),
            body,
        };
        let document = serde_json::to_vec(&echo)?;

        if request.method.is_empty() {
            writeln!(request.errors, "echo: request without a method")?;
        }

        Ok(CanonicalResponse::new(
            200,
            Headers::from([("Content-Type", "application/json")]),
            vec![document],
        ))
    }
}
