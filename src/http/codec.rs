//! HTTP codec
//!
//! Reading requests off a byte stream and writing responses back.

use std::io::{BufRead, Read, Write};
use std::time::SystemTime;

use bytes::Bytes;

use crate::config::Config;
use crate::error::{BoardError, Result};
use super::{Method, Request, Response};

/// Bounds applied while parsing a request
#[derive(Debug, Clone, Copy)]
pub struct ParseLimits {
    /// Header lines read before giving up on the blank separator line
    pub max_headers: usize,

    /// Largest accepted `Content-Length`
    pub max_body_size: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_headers: 30,
            max_body_size: 16 * 1024 * 1024,
        }
    }
}

impl From<&Config> for ParseLimits {
    fn from(config: &Config) -> Self {
        Self {
            max_headers: config.max_headers,
            max_body_size: config.max_body_size,
        }
    }
}

// =============================================================================
// Request Decoding
// =============================================================================

/// Read a complete request from a stream
///
/// Blocks until the request line, headers and body have arrived. A body cut
/// short by the peer closing the connection is returned as received.
pub fn read_request<R: BufRead>(reader: &mut R, limits: ParseLimits) -> Result<Request> {
    let mut line = Vec::new();
    if reader.read_until(b'\n', &mut line)? == 0 {
        return Err(BoardError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "connection closed before request line",
        )));
    }

    let (method, uri, version) = parse_request_line(&line)?;

    let (content_length, content_type) = read_headers(reader, limits.max_headers)?;
    if content_length > limits.max_body_size {
        return Err(BoardError::PayloadTooLarge {
            size: content_length,
            max: limits.max_body_size,
        });
    }

    let mut body = Vec::with_capacity(content_length);
    reader.by_ref().take(content_length as u64).read_to_end(&mut body)?;
    if body.len() < content_length {
        tracing::debug!(
            "Short body: expected {} bytes, got {}",
            content_length,
            body.len()
        );
    }

    Ok(Request {
        method,
        uri,
        version,
        content_length,
        content_type,
        body: Bytes::from(body),
    })
}

/// Split the request line into exactly three space-separated tokens
fn parse_request_line(line: &[u8]) -> Result<(Method, String, String)> {
    let line = trim_line_ending(line);
    let tokens: Vec<&[u8]> = line.split(|&b| b == b' ').collect();

    let [method, uri, version] = tokens.as_slice() else {
        return Err(BoardError::MalformedRequestLine(
            String::from_utf8_lossy(line).into_owned(),
        ));
    };

    if uri.is_empty() {
        return Err(BoardError::EmptyUri);
    }

    Ok((
        Method::from_token(method),
        String::from_utf8_lossy(uri).into_owned(),
        String::from_utf8_lossy(version).into_owned(),
    ))
}

/// Read header lines until the blank line or `max_headers` headers
///
/// After `max_headers` headers one more line is consumed in place of the
/// blank separator. Returns `(content_length, content_type)`.
fn read_headers<R: BufRead>(reader: &mut R, max_headers: usize) -> Result<(usize, Option<String>)> {
    let mut content_length = None;
    let mut content_type = None;
    let mut line = Vec::new();
    let mut seen = 0;

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        let header = trim_line_ending(&line);
        if header.is_empty() || seen == max_headers {
            break;
        }
        seen += 1;

        let header = header.to_ascii_lowercase();
        let Some(colon) = header.iter().position(|&b| b == b':') else {
            continue;
        };
        let name = String::from_utf8_lossy(&header[..colon]);
        let value = String::from_utf8_lossy(&header[colon + 1..]);

        match name.trim() {
            "content-length" => content_length = Some(value.trim().to_string()),
            "content-type" => content_type = Some(value.trim().to_string()),
            _ => {}
        }
    }

    let content_length = content_length
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);

    Ok((content_length, content_type))
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

// =============================================================================
// Response Encoding
// =============================================================================

/// Encode a response to bytes
///
/// Format: status line + Date, Server, Content-Type, Content-Length + CRLF + body
pub fn encode_response(response: &Response, server_name: &str, now: SystemTime) -> Vec<u8> {
    let head = format!(
        "{}Date: {}\r\nServer: {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n\r\n",
        response.status_line(),
        httpdate::fmt_http_date(now),
        server_name,
        response.content_type.as_str(),
        response.body.len(),
    );

    let mut message = Vec::with_capacity(head.len() + response.body.len());
    message.extend_from_slice(head.as_bytes());
    message.extend_from_slice(&response.body);
    message
}

/// Write a response to a stream, stamped with the current time
pub fn write_response<W: Write>(writer: &mut W, response: &Response, server_name: &str) -> Result<()> {
    let bytes = encode_response(response, server_name, SystemTime::now());
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
