//! File-backed store
//!
//! Each call opens, uses and drops its own file handle.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{AdapterError, Result};

use super::{decode_utf8, RawStore};

/// Store that reads and writes files on the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore {
    /// fsync after every write
    sync_on_write: bool,
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that calls `sync_all` before returning from a write
    pub fn with_sync(sync_on_write: bool) -> Self {
        Self { sync_on_write }
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(bytes)?;
        if self.sync_on_write {
            file.sync_all()?;
        }
        debug!(path = %path.display(), bytes = bytes.len(), "wrote file");
        Ok(())
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let bytes = fs::read(path).map_err(|e| not_found_or_io(path, e))?;
        debug!(path = %path.display(), bytes = bytes.len(), "read file");
        Ok(bytes)
    }
}

/// Map a missing path onto `NotFound`, keep everything else as I/O
fn not_found_or_io(path: &Path, err: io::Error) -> AdapterError {
    if err.kind() == io::ErrorKind::NotFound {
        AdapterError::NotFound(path.to_path_buf())
    } else {
        AdapterError::Io(err)
    }
}

impl RawStore for FileStore {
    fn write_text(&self, path: &Path, text: &str) -> Result<()> {
        self.write(path, text.as_bytes())
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        let bytes = self.read(path)?;
        decode_utf8(path, bytes)
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        self.write(path, bytes)
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        self.read(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
