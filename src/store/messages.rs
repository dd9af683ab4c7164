//! Message Store
//!
//! The in-memory message index and its flat-file mirror.

use std::path::Path;

use parking_lot::Mutex;

use crate::error::{BoardError, Result};
use super::record::{decode_records, encode_record, extract_text, validate_body};
use super::{Message, MessageId, RecordFile, MAX_MESSAGES};

/// Rendered listing of all active messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Number of active messages
    pub count: usize,

    /// `[` + records without the leading comma + `]`
    pub body: Vec<u8>,
}

impl Listing {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Message store backed by a flat record file
///
/// ## Concurrency Model
///
/// `messages` holds the active messages in file order (order of last
/// mutation). Every operation takes the one lock for its whole duration, so
/// id allocation, append, delete and replace are atomic with respect to each
/// other and listings always see a committed state. The file is written
/// before the in-memory state changes; a failed write leaves both untouched.
pub struct MessageStore {
    file: RecordFile,
    messages: Mutex<Vec<Message>>,
}

impl MessageStore {
    /// Open the store, rebuilding the index from the record file
    pub fn open(path: &Path) -> Result<Self> {
        let file = RecordFile::open(path)?;
        let messages = decode_records(&file.read_all()?)?;

        tracing::info!(
            "Message store opened at {} with {} messages",
            path.display(),
            messages.len()
        );

        Ok(Self {
            file,
            messages: Mutex::new(messages),
        })
    }

    /// Create a message from a client body
    ///
    /// Returns the stored record bytes.
    pub fn create(&self, body: &[u8]) -> Result<Vec<u8>> {
        validate_body(body)?;
        let text = extract_text(body)?;

        let mut messages = self.messages.lock();
        let id = allocate_id(&messages)?;
        let message = Message { id, text };
        let record = encode_record(&message);

        self.file.append(&record)?;
        messages.push(message);

        tracing::debug!("Created message {}", id);
        Ok(record)
    }

    /// Replace the text of an active message, keeping its id
    ///
    /// The replaced record moves to the end of the file. Returns the stored
    /// record bytes.
    pub fn replace(&self, id: MessageId, body: &[u8]) -> Result<Vec<u8>> {
        validate_body(body)?;
        let text = extract_text(body)?;

        let mut messages = self.messages.lock();
        let pos = messages
            .iter()
            .position(|m| m.id == id)
            .ok_or(BoardError::MessageNotFound(id))?;

        let mut next = messages.clone();
        next.remove(pos);
        let message = Message { id, text };
        let record = encode_record(&message);
        next.push(message);

        self.file.rewrite(&encode_all(&next))?;
        *messages = next;

        tracing::debug!("Replaced message {}", id);
        Ok(record)
    }

    /// Delete a message by id
    ///
    /// Returns whether a message was removed; an unknown id is a no-op.
    pub fn delete(&self, id: MessageId) -> Result<bool> {
        let mut messages = self.messages.lock();
        let Some(pos) = messages.iter().position(|m| m.id == id) else {
            tracing::debug!("Delete of inactive id {} ignored", id);
            return Ok(false);
        };

        let mut next = messages.clone();
        next.remove(pos);

        self.file.rewrite(&encode_all(&next))?;
        *messages = next;

        tracing::debug!("Deleted message {}", id);
        Ok(true)
    }

    /// Render every active message as an array, in file order
    pub fn list(&self) -> Listing {
        let messages = self.messages.lock();
        let records = encode_all(&messages);

        let mut body = Vec::with_capacity(records.len() + 2);
        body.push(b'[');
        body.extend_from_slice(records.get(1..).unwrap_or_default());
        body.push(b']');

        Listing {
            count: messages.len(),
            body,
        }
    }

    /// Ids of all active messages, in file order
    pub fn active_ids(&self) -> Vec<MessageId> {
        self.messages.lock().iter().map(|m| m.id).collect()
    }

    /// Whether `id` is currently active
    pub fn contains(&self, id: MessageId) -> bool {
        self.messages.lock().iter().any(|m| m.id == id)
    }

    /// Number of active messages
    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Path of the backing record file
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Smallest id in `[0, MAX_MESSAGES)` not held by an active message
fn allocate_id(messages: &[Message]) -> Result<MessageId> {
    let mut used = [false; MAX_MESSAGES];
    for message in messages {
        used[message.id as usize] = true;
    }
    used.iter()
        .position(|&taken| !taken)
        .map(|id| id as MessageId)
        .ok_or(BoardError::StoreFull)
}

fn encode_all(messages: &[Message]) -> Vec<u8> {
    messages.iter().flat_map(encode_record).collect()
}
