//! Record encoding
//!
//! Validation of client bodies and the encode/decode pair for the flat
//! record format `,{"id": <id>,"text": <text>}`.

use crate::error::{BoardError, Result};
use super::{Message, MessageId, MAX_MESSAGES};

/// Token that opens the id field of a record (and of an id-carrying body)
pub const ID_TOKEN: &[u8] = b"{\"id\": ";

/// Token that introduces the text payload
pub const TEXT_TOKEN: &[u8] = b"\"text\": ";

const RECORD_PREFIX: &[u8] = b",{\"id\": ";
const TEXT_SEPARATOR: &[u8] = b",\"text\": ";

// =============================================================================
// Body Validation
// =============================================================================

/// Check that a body can be stored without corrupting the record format
///
/// The body (ignoring surrounding whitespace) must:
/// 1. Parse as a JSON object
/// 2. Contain no `{` or `}` other than its first and last byte
/// 3. Contain the literal `"text": `
pub fn validate_body(body: &[u8]) -> Result<()> {
    let body = trim_ascii_whitespace(body);

    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(_)) => {}
        Ok(_) => return Err(BoardError::InvalidBody("expected a JSON object".to_string())),
        Err(e) => return Err(BoardError::InvalidBody(format!("not valid JSON: {}", e))),
    }

    // An object is at least `{}`, so the interior slice is in bounds
    let interior = &body[1..body.len() - 1];
    if interior.iter().any(|&b| b == b'{' || b == b'}') {
        return Err(BoardError::InvalidBody("nested braces are not allowed".to_string()));
    }

    if find(body, TEXT_TOKEN).is_none() {
        return Err(BoardError::InvalidBody("missing \"text\" field".to_string()));
    }

    Ok(())
}

/// Text payload of a validated body: everything after the first `"text": `
/// up to (not including) the closing `}`
pub fn extract_text(body: &[u8]) -> Result<String> {
    let body = trim_ascii_whitespace(body);
    let start = find(body, TEXT_TOKEN)
        .map(|pos| pos + TEXT_TOKEN.len())
        .ok_or_else(|| BoardError::InvalidBody("missing \"text\" field".to_string()))?;
    let end = body
        .len()
        .checked_sub(1)
        .filter(|&end| end >= start && body[end] == b'}')
        .ok_or_else(|| BoardError::InvalidBody("body is not a closed object".to_string()))?;

    String::from_utf8(body[start..end].to_vec())
        .map_err(|_| BoardError::InvalidBody("text is not valid UTF-8".to_string()))
}

// =============================================================================
// Id Extraction
// =============================================================================

/// Raw id token carried by a body: after `{"id": `, cut at the first `}`
/// and then at the first `,`
pub fn extract_id(body: &[u8]) -> Option<&[u8]> {
    let start = find(body, ID_TOKEN)? + ID_TOKEN.len();
    let rest = &body[start..];
    let rest = rest.split(|&b| b == b'}').next().unwrap_or(rest);
    rest.split(|&b| b == b',').next()
}

/// Parse an id token, tolerating surrounding whitespace
pub fn parse_id(token: &[u8]) -> Result<MessageId> {
    std::str::from_utf8(token)
        .ok()
        .and_then(|s| s.trim().parse::<MessageId>().ok())
        .ok_or(BoardError::BadMessageId)
}

// =============================================================================
// Record Encoding/Decoding
// =============================================================================

/// Encode a message to its record bytes
///
/// Format: `,{"id": <id>,"text": <text>}`
pub fn encode_record(message: &Message) -> Vec<u8> {
    let id = message.id.to_string();
    let mut record = Vec::with_capacity(
        RECORD_PREFIX.len() + id.len() + TEXT_SEPARATOR.len() + message.text.len() + 1,
    );
    record.extend_from_slice(RECORD_PREFIX);
    record.extend_from_slice(id.as_bytes());
    record.extend_from_slice(TEXT_SEPARATOR);
    record.extend_from_slice(message.text.as_bytes());
    record.push(b'}');
    record
}

/// Decode the full content of a record file, in file order
///
/// Fails on any byte outside a well-formed record, an id outside the id
/// space, or an id that appears twice.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<Message>> {
    let mut messages: Vec<Message> = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let rest = &bytes[pos..];
        let corrupt = |what: &str| BoardError::CorruptStore(format!("{} at offset {}", what, pos));

        let after_prefix = rest
            .strip_prefix(RECORD_PREFIX)
            .ok_or_else(|| corrupt("expected record start"))?;

        let id_len = after_prefix
            .iter()
            .position(|&b| b == b',')
            .ok_or_else(|| corrupt("unterminated id"))?;
        let id = parse_id(&after_prefix[..id_len]).map_err(|_| corrupt("invalid id"))?;
        if id as usize >= MAX_MESSAGES {
            return Err(corrupt("id out of range"));
        }
        if messages.iter().any(|m| m.id == id) {
            return Err(corrupt("duplicate id"));
        }

        let after_id = &after_prefix[id_len..];
        let text_start = after_id
            .strip_prefix(TEXT_SEPARATOR)
            .ok_or_else(|| corrupt("expected text field"))?;
        let text_len = text_start
            .iter()
            .position(|&b| b == b'}')
            .ok_or_else(|| corrupt("unterminated record"))?;
        let text = String::from_utf8(text_start[..text_len].to_vec())
            .map_err(|_| corrupt("text is not valid UTF-8"))?;

        messages.push(Message { id, text });
        pos += RECORD_PREFIX.len() + id_len + TEXT_SEPARATOR.len() + text_len + 1;
    }

    Ok(messages)
}

// =============================================================================
// Helpers
// =============================================================================

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn trim_ascii_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(start, |i| i + 1);
    &bytes[start..end]
}
