use std::fmt;
use std::io::{self, Cursor, Write};

/// Version of the request interface handed to applications.
pub const INTERFACE_VERSION: [u16; 2] = [1, 3];

/// Request handed to the wrapped application.
///
/// Field names follow the CGI-style environment that synchronous web
/// application interfaces are built around. Every field is always populated;
/// the adapter substitutes defaults for anything the event omitted.
pub struct CanonicalRequest {
    /// HTTP method, e.g. `GET`.
    pub method: String,
    /// Mount prefix of the application (stage or base-path mapping).
    pub script_name: String,
    /// Route path below the mount prefix.
    pub path_info: String,
    /// URL-encoded query string without the leading `?`.
    pub query_string: String,
    pub server_name: String,
    pub server_port: u16,
    /// Inbound `Content-Type`, empty when the request had none.
    pub content_type: String,
    /// `http` or `https`.
    pub url_scheme: String,
    pub interface_version: [u16; 2],
    /// Client address reported by the gateway, if any.
    pub remote_addr: Option<String>,
    /// Decoded request body, positioned at the start.
    pub input: Cursor<Vec<u8>>,
    /// Sink for application diagnostics.
    pub errors: Box<dyn Write + Send>,
    /// Inbound headers under their `HTTP_*` names, in arrival order.
    pub http_headers: Vec<(String, String)>,
}

impl CanonicalRequest {
    /// Looks up a forwarded header by its original (inbound) name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        let key = crate::utils::forwarded_header_name(name);
        self.http_headers
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Full request path, mount prefix included.
    #[must_use]
    pub fn full_path(&self) -> String {
        format!("{}{}", self.script_name, self.path_info)
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        self.input.get_ref()
    }
}

impl Default for CanonicalRequest {
    fn default() -> Self {
        Self {
            method: String::new(),
            script_name: String::new(),
            path_info: String::new(),
            query_string: String::new(),
            server_name: String::new(),
            server_port: 0,
            content_type: String::new(),
            url_scheme: String::new(),
            interface_version: INTERFACE_VERSION,
            remote_addr: None,
            input: Cursor::new(Vec::new()),
            errors: Box::new(io::stderr()),
            http_headers: Vec::new(),
        }
    }
}

impl fmt::Debug for CanonicalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanonicalRequest")
            .field("method", &self.method)
            .field("script_name", &self.script_name)
            .field("path_info", &self.path_info)
            .field("query_string", &self.query_string)
            .field("server_name", &self.server_name)
            .field("server_port", &self.server_port)
            .field("content_type", &self.content_type)
            .field("url_scheme", &self.url_scheme)
            .field("interface_version", &self.interface_version)
            .field("remote_addr", &self.remote_addr)
            .field("body_len", &self.input.get_ref().len())
            .field("http_headers", &self.http_headers)
            .finish_non_exhaustive()
    }
}
