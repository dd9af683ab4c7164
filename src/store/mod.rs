//! Store Module
//!
//! Flat-file persistence for messages, plus the scratch resource.
//!
//! ## Responsibilities
//! - Validate client bodies before they reach the record format
//! - Allocate the smallest free id in `[0, MAX_MESSAGES)`
//! - Keep the record file in step with the in-memory index
//! - Serialize every mutation behind a single lock
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ ,{"id": 0,"text": "first"}              │  ← record (oldest mutation)
//! ├─────────────────────────────────────────┤
//! │ ,{"id": 3,"text": "second"}             │
//! ├─────────────────────────────────────────┤
//! │ ,{"id": 1,"text": "replaced"}           │  ← record (newest mutation)
//! └─────────────────────────────────────────┘
//! ```
//!
//! The file is empty or starts with `,`; `[` + content[1..] + `]` is the
//! listing returned to clients.

mod record;
mod file;
mod messages;
mod scratch;

pub use record::{
    decode_records, encode_record, extract_id, extract_text, parse_id, validate_body,
    ID_TOKEN, TEXT_TOKEN,
};
pub use file::RecordFile;
pub use messages::{Listing, MessageStore};
pub use scratch::ScratchResource;

/// Identifier of a message, unique among active messages
pub type MessageId = u32;

/// Size of the id space; at most this many messages are active at once
pub const MAX_MESSAGES: usize = 256;

/// A stored message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Identifier in `[0, MAX_MESSAGES)`
    pub id: MessageId,

    /// Raw text payload as submitted, e.g. `"Example text1"` (quotes included)
    pub text: String,
}
