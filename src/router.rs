//! Router
//!
//! Maps a parsed request onto the closed set of actions the server performs.
//!
//! ## Dispatch Table
//! ```text
//! any     URI contains "../"                      → Forbidden
//! GET     "/" | index | index.html                → Index
//! GET     messages                                → ListMessages
//! GET     protected path                          → Forbidden
//! GET     otherwise                               → NotFound
//! POST    scratch name                            → ScratchAppend
//! POST    messages                                → CreateMessage
//! PUT     messages                                → ReplaceMessage
//! DELETE  messages                                → DeleteMessage
//! POST/PUT/DELETE otherwise                       → Forbidden
//! OPTION/HEAD/TRACE/CONNECT                       → NotImplemented
//! unrecognized token                              → InvalidMethod
//! ```

use crate::config::Config;
use crate::error::{BoardError, Result};
use crate::http::{Method, Request};
use crate::store::{extract_id, parse_id, MessageId};

/// Path segment of the message collection
pub const MESSAGES_PATH: &str = "messages";

/// What the server does with a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Index,
    ListMessages,
    CreateMessage,
    ReplaceMessage,
    DeleteMessage,
    ScratchAppend,
    Forbidden,
    NotFound,
    NotImplemented,
    InvalidMethod,
}

/// Request classifier
#[derive(Debug, Clone)]
pub struct Router {
    protected_paths: Vec<String>,
    scratch_name: String,
}

impl Router {
    pub fn new(protected_paths: Vec<String>, scratch_name: impl Into<String>) -> Self {
        Self {
            protected_paths,
            scratch_name: scratch_name.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.protected_paths.clone(), config.scratch_name.clone())
    }

    /// Classify a request
    pub fn route(&self, request: &Request) -> Route {
        if request.is_traversal() {
            return Route::Forbidden;
        }

        let path = request.path();
        match &request.method {
            Method::Get => {
                if request.uri == "/" || path == "index" || path == "index.html" {
                    Route::Index
                } else if path == MESSAGES_PATH {
                    Route::ListMessages
                } else if self.is_protected(&request.uri) {
                    Route::Forbidden
                } else {
                    Route::NotFound
                }
            }
            Method::Post => {
                if path == self.scratch_name {
                    Route::ScratchAppend
                } else if path == MESSAGES_PATH {
                    Route::CreateMessage
                } else {
                    Route::Forbidden
                }
            }
            Method::Put if path == MESSAGES_PATH => Route::ReplaceMessage,
            Method::Delete if path == MESSAGES_PATH => Route::DeleteMessage,
            Method::Put | Method::Delete => Route::Forbidden,
            Method::Options | Method::Head | Method::Trace | Method::Connect => {
                Route::NotImplemented
            }
            Method::Unknown(_) => Route::InvalidMethod,
        }
    }

    fn is_protected(&self, uri: &str) -> bool {
        let target = uri.strip_prefix('/').unwrap_or(uri);
        self.protected_paths.iter().any(|p| p == target)
    }
}

/// Resolve the message id a PUT or DELETE addresses
///
/// The URI suffix after `messages/` wins; otherwise the id field of the body.
pub fn message_id(request: &Request) -> Result<MessageId> {
    const MARKER: &str = "messages/";

    if let Some(pos) = request.uri.rfind(MARKER) {
        return parse_id(request.uri[pos + MARKER.len()..].as_bytes());
    }

    let token = extract_id(&request.body).ok_or(BoardError::BadMessageId)?;
    parse_id(token)
}
