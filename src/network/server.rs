//! TCP Server
//!
//! Accepts connections and dispatches them to worker threads.

use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam::channel::{self, Receiver};

use crate::config::Config;
use crate::error::Result;
use crate::http::ParseLimits;
use crate::service::Service;
use super::Connection;

/// TCP server for Flatboard
pub struct Server {
    config: Config,
    service: Arc<Service>,
    listener: TcpListener,
    shutdown: Arc<AtomicBool>,
}

/// Stops a running server from another thread
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
    addr: SocketAddr,
}

impl ShutdownHandle {
    /// Signal the server to stop accepting and wait for in-flight workers
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
        // Wake the blocking accept so the flag is observed
        let _ = TcpStream::connect(self.addr);
    }
}

impl Server {
    /// Bind the listen address from `config`
    pub fn bind(config: Config, service: Arc<Service>) -> Result<Self> {
        let listener = TcpListener::bind(&config.listen_addr)?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            config,
            service,
            listener,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn shutdown_handle(&self) -> Result<ShutdownHandle> {
        Ok(ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
            addr: self.local_addr()?,
        })
    }

    /// Run the accept loop (blocking until shutdown)
    pub fn run(&self) -> Result<()> {
        let workers = self.config.workers.max(1);
        let (sender, receiver) = channel::bounded::<TcpStream>(workers * 16);

        let mut handles = Vec::with_capacity(workers);
        for id in 0..workers {
            let receiver = receiver.clone();
            let service = Arc::clone(&self.service);
            let config = self.config.clone();
            let handle = thread::Builder::new()
                .name(format!("flatboard-worker-{}", id))
                .spawn(move || worker_loop(receiver, service, config))?;
            handles.push(handle);
        }
        drop(receiver);

        for stream in self.listener.incoming() {
            if self.shutdown.load(Ordering::SeqCst) {
                break;
            }
            match stream {
                Ok(stream) => {
                    if sender.send(stream).is_err() {
                        tracing::error!("All workers exited; stopping accept loop");
                        break;
                    }
                }
                Err(e) => tracing::warn!("Failed to accept connection: {}", e),
            }
        }

        drop(sender);
        for handle in handles {
            if handle.join().is_err() {
                tracing::error!("Worker thread panicked");
            }
        }

        tracing::info!("Server stopped");
        Ok(())
    }
}

fn worker_loop(receiver: Receiver<TcpStream>, service: Arc<Service>, config: Config) {
    let limits = ParseLimits::from(&config);

    for stream in receiver.iter() {
        let connection = Connection::new(stream, Arc::clone(&service), limits).and_then(|mut c| {
            c.set_timeouts(config.read_timeout_ms, config.write_timeout_ms)?;
            Ok(c)
        });

        match connection {
            Ok(connection) => {
                if let Err(e) = connection.handle() {
                    tracing::warn!("Connection error: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to set up connection: {}", e),
        }
    }
}
