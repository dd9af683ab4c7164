//! Connection Handler
//!
//! Handles individual client connections: read one request, write one
//! response, close.

use std::io::{BufReader, BufWriter, ErrorKind};
use std::net::{Shutdown, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{BoardError, Result};
use crate::http::{read_request, write_response, ParseLimits, Response};
use crate::service::Service;

/// Handles a single client connection
pub struct Connection {
    /// TCP stream reader (buffered for line-oriented parsing)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered so the response leaves in one write)
    writer: BufWriter<TcpStream>,

    /// Reference to the request handler
    service: Arc<Service>,

    /// Parser bounds
    limits: ParseLimits,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    pub fn new(stream: TcpStream, service: Arc<Service>, limits: ParseLimits) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            service,
            limits,
            peer_addr,
        })
    }

    /// Configure connection timeouts (0 leaves the socket blocking forever)
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        if read_ms > 0 {
            self.reader
                .get_ref()
                .set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            self.writer
                .get_ref()
                .set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }
        Ok(())
    }

    /// Handle the connection (blocking until the response is written)
    pub fn handle(mut self) -> Result<()> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        let response = match read_request(&mut self.reader, self.limits) {
            Ok(request) => {
                tracing::trace!("Received request from {}: {:?}", self.peer_addr, request);
                self.service.handle(&request)
            }
            Err(BoardError::Io(ref e)) if is_disconnect(e.kind()) => {
                tracing::debug!("Client {} went away before sending a request: {}", self.peer_addr, e);
                return Ok(());
            }
            Err(BoardError::Io(e)) => {
                tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                return Err(BoardError::Io(e));
            }
            Err(e) => {
                tracing::debug!("Bad request from {}: {}", self.peer_addr, e);
                Response::from_error(&e)
            }
        };

        self.send_response(&response)
    }

    /// Send the response and close the connection
    ///
    /// A peer that hung up before the response could be delivered is not an
    /// error.
    fn send_response(&mut self, response: &Response) -> Result<()> {
        let result = write_response(&mut self.writer, response, self.service.server_name());
        let _ = self.writer.get_ref().shutdown(Shutdown::Write);

        match result {
            Err(BoardError::Io(ref e)) if is_disconnect(e.kind()) => {
                tracing::debug!(
                    "Client {} disconnected before response could be sent: {}",
                    self.peer_addr, e
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Error writing to {}: {}", self.peer_addr, e);
                Err(e)
            }
            Ok(()) => {
                tracing::debug!(
                    "Responded {} {} to {}",
                    response.status.code(),
                    response.reason,
                    self.peer_addr
                );
                Ok(())
            }
        }
    }
}

fn is_disconnect(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::UnexpectedEof
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::BrokenPipe
            | ErrorKind::WouldBlock
            | ErrorKind::TimedOut
    )
}
