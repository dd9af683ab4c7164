//! Error types for Flatboard
//!
//! Provides a unified error type for all operations. Every variant that can
//! surface while handling a request maps to exactly one HTTP status.

use thiserror::Error;

use crate::http::StatusCode;
use crate::store::MessageId;

/// Result type alias using BoardError
pub type Result<T> = std::result::Result<T, BoardError>;

/// Unified error type for Flatboard operations
#[derive(Debug, Error)]
pub enum BoardError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Wire Errors
    // -------------------------------------------------------------------------
    #[error("Malformed request line: {0:?}")]
    MalformedRequestLine(String),

    #[error("Empty request URI")]
    EmptyUri,

    #[error("Payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("Invalid message body: {0}")]
    InvalidBody(String),

    #[error("Missing or unparsable message id")]
    BadMessageId,

    #[error("Message {0} not found")]
    MessageNotFound(MessageId),

    #[error("Message store is full")]
    StoreFull,

    #[error("Corrupt store file: {0}")]
    CorruptStore(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BoardError {
    /// HTTP status reported to the client for this error
    pub fn status(&self) -> StatusCode {
        match self {
            BoardError::MalformedRequestLine(_)
            | BoardError::EmptyUri
            | BoardError::Protocol(_)
            | BoardError::InvalidBody(_)
            | BoardError::BadMessageId => StatusCode::BadRequest,
            BoardError::PayloadTooLarge { .. } => StatusCode::PayloadTooLarge,
            BoardError::MessageNotFound(_) => StatusCode::NotFound,
            BoardError::StoreFull => StatusCode::InsufficientStorage,
            BoardError::Io(_) | BoardError::CorruptStore(_) | BoardError::Config(_) => {
                StatusCode::InternalServerError
            }
        }
    }

    /// Reason phrase for the status line
    pub fn reason(&self) -> &'static str {
        match self {
            BoardError::InvalidBody(_) => "Bad Body",
            BoardError::BadMessageId => "Bad Message ID",
            BoardError::MessageNotFound(_) => "Could Not Find Message With Given ID",
            other => other.status().reason(),
        }
    }
}
