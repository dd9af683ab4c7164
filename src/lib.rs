//! # Flatboard
//!
//! A minimal HTTP/1.1 message board server with:
//! - Hand-rolled request parsing and response assembly
//! - A flat record file as the only persistence
//! - Serialized store mutations behind a single lock
//! - Worker-pool connection handling, one request per connection
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │             (Acceptor + Worker Threads)                      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ bytes
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Wire Parser                               │
//! │        (request line, headers of interest, body)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Request
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Router                                  │
//! │              (closed Route enum)                             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┼─────────────────┐
//!          ▼            ▼                 ▼
//!   ┌─────────────┐ ┌──────────┐   ┌─────────────┐
//!   │  Message    │ │ Scratch  │   │   Static    │
//!   │   Store     │ │ Resource │   │   Index     │
//!   └─────────────┘ └──────────┘   └─────────────┘
//!                       │ Response
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Response Builder                             │
//! │     (status line, Date/Server/Content-Type/Length)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod http;
pub mod store;
pub mod router;
pub mod service;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BoardError, Result};
pub use config::Config;
pub use service::Service;
pub use client::Client;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Flatboard
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
