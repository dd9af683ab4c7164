//! Record File
//!
//! Byte-level access to the flat record file.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// The on-disk flat record file
#[derive(Debug)]
pub struct RecordFile {
    path: PathBuf,
}

impl RecordFile {
    /// Bind to a record file path, creating the parent directory
    ///
    /// The file itself is created lazily on the first append.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Read the whole file; a missing file reads as empty
    pub fn read_all(&self) -> Result<Vec<u8>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Append record bytes at the end of the file
    ///
    /// A failed write truncates the file back to its previous length so no
    /// partial record is left behind.
    pub fn append(&self, record: &[u8]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let len = file.metadata()?.len();

        if let Err(e) = file.write_all(record).and_then(|_| file.flush()) {
            if let Err(truncate_err) = file.set_len(len) {
                tracing::error!(
                    "Failed to roll back partial append to {}: {}",
                    self.path.display(),
                    truncate_err
                );
            }
            return Err(e.into());
        }
        Ok(())
    }

    /// Replace the whole file content
    ///
    /// Writes a sibling temp file and renames it over the original so a
    /// crash mid-write leaves either the old or the new content.
    pub fn rewrite(&self, contents: &[u8]) -> Result<()> {
        let tmp_path = self.path.with_extension("tmp");
        {
            let mut tmp = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&tmp_path)?;
            tmp.write_all(contents)?;
            tmp.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Path of the record file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
