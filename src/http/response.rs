//! Response definitions
//!
//! Represents responses to clients.

use bytes::Bytes;

use crate::error::BoardError;

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum StatusCode {
    Ok = 200,
    Created = 201,
    BadRequest = 400,
    Forbidden = 403,
    NotFound = 404,
    PayloadTooLarge = 413,
    InternalServerError = 500,
    NotImplemented = 501,
    InsufficientStorage = 507,
}

impl StatusCode {
    /// Numeric status code
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Default reason phrase
    pub fn reason(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::PayloadTooLarge => "Payload Too Large",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
            StatusCode::InsufficientStorage => "Insufficient Storage",
        }
    }
}

/// Value of the `Content-Type` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Html,
    Json,
    /// Scratch resource bytes
    Text,
    Plain,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Html => "text/html",
            ContentType::Json => "text/json",
            ContentType::Text => "text",
            ContentType::Plain => "text/plain",
        }
    }
}

/// A response to send to the client
#[derive(Debug, Clone)]
pub struct Response {
    /// Status code
    pub status: StatusCode,

    /// Reason phrase on the status line
    pub reason: &'static str,

    /// Body content type
    pub content_type: ContentType,

    /// Body bytes (empty for most errors)
    pub body: Bytes,
}

impl Response {
    /// Create a response with an empty body and the default reason phrase
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            reason: status.reason(),
            content_type: ContentType::Plain,
            body: Bytes::new(),
        }
    }

    /// Create a 200 response carrying a body
    pub fn ok(content_type: ContentType, body: impl Into<Bytes>) -> Self {
        Self::new(StatusCode::Ok).with_body(content_type, body)
    }

    /// Create the response reported for an error
    pub fn from_error(error: &BoardError) -> Self {
        Self::new(error.status()).with_reason(error.reason())
    }

    /// Override the reason phrase
    pub fn with_reason(mut self, reason: &'static str) -> Self {
        self.reason = reason;
        self
    }

    /// Attach a body
    pub fn with_body(mut self, content_type: ContentType, body: impl Into<Bytes>) -> Self {
        self.content_type = content_type;
        self.body = body.into();
        self
    }

    /// Status line including the trailing CRLF
    pub fn status_line(&self) -> String {
        format!("HTTP/1.1 {} {}\r\n", self.status.code(), self.reason)
    }
}
