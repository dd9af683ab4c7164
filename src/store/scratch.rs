//! Scratch Resource
//!
//! A named byte blob that accumulates POSTed bodies.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::Result;

/// Append-and-echo resource with no structure
pub struct ScratchResource {
    path: PathBuf,
    /// Keeps append + read-back atomic across connections
    lock: Mutex<()>,
}

impl ScratchResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Append `body` and return the full resource content
    pub fn append(&self, body: &[u8]) -> Result<Vec<u8>> {
        let _guard = self.lock.lock();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(body)?;
        file.flush()?;
        drop(file);

        Ok(fs::read(&self.path)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
