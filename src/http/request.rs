//! Request definitions
//!
//! A parsed request: request line, the headers of interest and the body.

use bytes::Bytes;

use super::Method;

/// A parsed HTTP request
#[derive(Debug, Clone)]
pub struct Request {
    /// Method token from the request line
    pub method: Method,

    /// Raw request target, e.g. `/messages/3` or `index.html`
    pub uri: String,

    /// Protocol version token, e.g. `HTTP/1.1`
    pub version: String,

    /// `Content-Length` header (0 when absent or unparsable)
    pub content_length: usize,

    /// `Content-Type` header value, lower-cased
    pub content_type: Option<String>,

    /// Request body (may be shorter than `content_length` if the peer hung up)
    pub body: Bytes,
}

impl Request {
    /// Create a request with no headers of interest
    pub fn new(method: Method, uri: impl Into<String>, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        Self {
            method,
            uri: uri.into(),
            version: "HTTP/1.1".to_string(),
            content_length: body.len(),
            content_type: None,
            body,
        }
    }

    /// First path segment of the URI, with a single leading `/` stripped
    ///
    /// `/messages/3` → `messages`, `index.html` → `index.html`, `/` → ``
    pub fn path(&self) -> &str {
        let trimmed = self.uri.strip_prefix('/').unwrap_or(&self.uri);
        trimmed.split('/').next().unwrap_or_default()
    }

    /// Whether the URI tries to climb out of the served directory
    pub fn is_traversal(&self) -> bool {
        self.uri.contains("../")
    }
}
