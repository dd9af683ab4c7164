//! Network Module
//!
//! TCP server and client handling.
//!
//! ## Architecture
//! - Single acceptor thread
//! - Worker thread pool for connections
//! - One request per connection, routed through Service

mod server;
mod connection;

pub use server::{Server, ShutdownHandle};
pub use connection::Connection;
