//! HTTP Module
//!
//! The HTTP/1.1 subset spoken by the server: request parsing and response
//! assembly, without an HTTP library.
//!
//! ## Request Format
//! ```text
//! METHOD SP URI SP VERSION CRLF
//! (header-name ":" header-value CRLF)*      ← at most `max_headers` lines
//! CRLF
//! body                                      ← exactly Content-Length bytes
//! ```
//!
//! Only `content-length` and `content-type` are retained from the header block.
//!
//! ## Response Format
//! ```text
//! HTTP/1.1 SP CODE SP REASON CRLF
//! Date: <IMF-fixdate> CRLF
//! Server: <server name> CRLF
//! Content-Type: <type> CRLF
//! Content-Length: <len> CRLF
//! CRLF
//! body
//! ```
//!
//! Every response closes the connection: no keep-alive, no chunking.

mod method;
mod request;
mod response;
mod codec;

pub use method::Method;
pub use request::Request;
pub use response::{ContentType, Response, StatusCode};
pub use codec::{encode_response, read_request, write_response, ParseLimits};
