//! Blocking client
//!
//! Speaks the same HTTP/1.1 subset as the server: one request per
//! connection, response read until the server closes.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::error::{BoardError, Result};
use crate::store::MessageId;

/// A parsed response received by the client
#[derive(Debug, Clone)]
pub struct ClientResponse {
    pub status: u16,
    pub reason: String,
    /// Header lines as `(lower-cased name, value)`
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ClientResponse {
    /// First header value with the given (case-insensitive) name
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Client for a Flatboard server
#[derive(Debug, Clone)]
pub struct Client {
    addr: String,
    timeout: Option<Duration>,
}

impl Client {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            timeout: Some(Duration::from_secs(10)),
        }
    }

    /// Override the socket timeout (None blocks forever)
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send a raw request and read the full response
    pub fn request(&self, method: &str, uri: &str, body: &[u8]) -> Result<ClientResponse> {
        let mut stream = TcpStream::connect(&self.addr)?;
        stream.set_read_timeout(self.timeout)?;
        stream.set_write_timeout(self.timeout)?;

        let mut message = format!(
            "{} {} HTTP/1.1\r\nHost: {}\r\nContent-Type: application/json\r\n",
            method, uri, self.addr
        )
        .into_bytes();
        if !body.is_empty() {
            message.extend_from_slice(format!("Content-Length: {}\r\n", body.len()).as_bytes());
        }
        message.extend_from_slice(b"\r\n");
        message.extend_from_slice(body);

        stream.write_all(&message)?;
        stream.flush()?;

        let mut raw = Vec::new();
        stream.read_to_end(&mut raw)?;
        parse_response(&raw)
    }

    pub fn index(&self) -> Result<ClientResponse> {
        self.request("GET", "/", b"")
    }

    pub fn list(&self) -> Result<ClientResponse> {
        self.request("GET", "/messages", b"")
    }

    /// Create a message whose text is `text` as a JSON string
    pub fn create(&self, text: &str) -> Result<ClientResponse> {
        self.request("POST", "/messages", &text_body(None, text)?)
    }

    /// Replace the text of message `id`
    pub fn replace(&self, id: MessageId, text: &str) -> Result<ClientResponse> {
        self.request("PUT", "/messages", &text_body(Some(id), text)?)
    }

    pub fn delete(&self, id: MessageId) -> Result<ClientResponse> {
        self.request("DELETE", &format!("/messages/{}", id), b"")
    }

    /// Append to the scratch resource named `name`
    pub fn scratch(&self, name: &str, body: &[u8]) -> Result<ClientResponse> {
        self.request("POST", &format!("/{}", name), body)
    }
}

/// Body in the layout the store expects: `{"id": <id>,"text": <json string>}`
fn text_body(id: Option<MessageId>, text: &str) -> Result<Vec<u8>> {
    let text = serde_json::to_string(text)
        .map_err(|e| BoardError::Protocol(format!("cannot encode text: {}", e)))?;
    Ok(match id {
        Some(id) => format!("{{\"id\": {},\"text\": {}}}", id, text),
        None => format!("{{\"text\": {}}}", text),
    }
    .into_bytes())
}

/// Split a raw response into status, headers and body
pub fn parse_response(raw: &[u8]) -> Result<ClientResponse> {
    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .ok_or_else(|| BoardError::Protocol("response has no header terminator".to_string()))?;
    let head = String::from_utf8_lossy(&raw[..split]);
    let body = raw[split + 4..].to_vec();

    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap_or_default();
    let mut parts = status_line.splitn(3, ' ');
    let _version = parts.next();
    let status = parts
        .next()
        .and_then(|s| s.parse::<u16>().ok())
        .ok_or_else(|| BoardError::Protocol(format!("bad status line: {:?}", status_line)))?;
    let reason = parts.next().unwrap_or_default().to_string();

    let headers = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_ascii_lowercase(), value.trim().to_string()))
        .collect();

    Ok(ClientResponse {
        status,
        reason,
        headers,
        body,
    })
}
