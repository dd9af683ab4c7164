//! Configuration for Flatboard
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{BoardError, Result};

/// Main configuration for a Flatboard instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for persisted state
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── messages.txt     (flat record file)
    ///     └── {scratch_name}   (scratch resource bytes)
    pub data_dir: PathBuf,

    /// Name of the scratch resource; also the path it is POSTed to
    pub scratch_name: String,

    // -------------------------------------------------------------------------
    // Routing Configuration
    // -------------------------------------------------------------------------
    /// Static index page served for `/`, `index` and `index.html`
    pub index_path: PathBuf,

    /// URIs that are always answered with 403
    pub protected_paths: Vec<String>,

    /// Value of the `Server` response header
    pub server_name: String,

    // -------------------------------------------------------------------------
    // Wire Configuration
    // -------------------------------------------------------------------------
    /// Max header lines read before the body
    pub max_headers: usize,

    /// Max accepted `Content-Length` (in bytes)
    pub max_body_size: usize,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address
    pub listen_addr: String,

    /// Number of worker threads handling connections
    pub workers: usize,

    /// Connection read timeout (milliseconds, 0 = block forever)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds, 0 = block forever)
    pub write_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./flatboard_data"),
            scratch_name: "test.txt".to_string(),
            index_path: PathBuf::from("static/index.html"),
            protected_paths: vec!["server.rs".to_string(), "src/bin/server.rs".to_string()],
            server_name: "flatboard".to_string(),
            max_headers: 30,
            max_body_size: 16 * 1024 * 1024, // 16 MB
            listen_addr: "127.0.0.1:8080".to_string(),
            workers: 8,
            read_timeout_ms: 0,
            write_timeout_ms: 0,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(BoardError::Config("workers must be at least 1".to_string()));
        }
        if self.scratch_name.is_empty() || self.scratch_name.contains('/') {
            return Err(BoardError::Config(format!(
                "scratch name must be a plain file name, got {:?}",
                self.scratch_name
            )));
        }
        if self.server_name.contains(|c| c == '\r' || c == '\n') {
            return Err(BoardError::Config(
                "server name must not contain line breaks".to_string(),
            ));
        }
        Ok(())
    }

    /// Path of the scratch resource file
    pub fn scratch_path(&self) -> PathBuf {
        self.data_dir.join(&self.scratch_name)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all persisted files)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the scratch resource name
    pub fn scratch_name(mut self, name: impl Into<String>) -> Self {
        self.config.scratch_name = name.into();
        self
    }

    /// Set the static index page path
    pub fn index_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.index_path = path.into();
        self
    }

    /// Replace the list of protected URIs
    pub fn protected_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.protected_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Set the `Server` header value
    pub fn server_name(mut self, name: impl Into<String>) -> Self {
        self.config.server_name = name.into();
        self
    }

    /// Set the maximum number of header lines
    pub fn max_headers(mut self, count: usize) -> Self {
        self.config.max_headers = count;
        self
    }

    /// Set the maximum body size (in bytes)
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.config.max_body_size = size;
        self
    }

    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the number of worker threads
    pub fn workers(mut self, count: usize) -> Self {
        self.config.workers = count;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
