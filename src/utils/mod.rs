//! Utility functions shared across the application.

/// Prefix carried by every forwarded request header.
pub const HEADER_PREFIX: &str = "HTTP_";

/// Maps an inbound header name to its forwarded request key.
///
/// Format: `X-Forwarded-For` → `HTTP_X_FORWARDED_FOR`
///
/// ASCII letters are uppercased, digits kept, and every other byte
/// (including any non-ASCII character) becomes a single `_`.
#[must_use]
pub fn forwarded_header_name(name: &str) -> String {
    let mut key = String::with_capacity(HEADER_PREFIX.len() + name.len());
    key.push_str(HEADER_PREFIX);
    key.extend(name.chars().map(|c| {
        if c.is_ascii_alphanumeric() {
            c.to_ascii_uppercase()
        } else {
            '_'
        }
    }));
    key
}

/// Heuristic for content types that carry text.
///
/// Only used to warn about responses that are about to be base64 encoded
/// even though they probably hold text; it never changes the encoding.
#[must_use]
pub fn looks_textual(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence.starts_with("text/")
        || essence.contains("json")
        || essence.contains("xml")
        || essence.contains("javascript")
}
