//! In-memory store
//!
//! Same contract as `FileStore`, keyed by path, for tests and embedders that
//! keep tables off disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::error::{AdapterError, Result};

use super::{decode_utf8, RawStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }

    /// Drop an entry, returning its previous contents
    pub fn remove(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.write().remove(path)
    }

    fn get(&self, path: &Path) -> Result<Vec<u8>> {
        self.files
            .read()
            .get(path)
            .cloned()
            .ok_or_else(|| AdapterError::NotFound(path.to_path_buf()))
    }
}

impl RawStore for MemoryStore {
    fn write_text(&self, path: &Path, text: &str) -> Result<()> {
        self.write_bytes(path, text.as_bytes())
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        let bytes = self.get(path)?;
        decode_utf8(path, bytes)
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        self.files.write().insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        self.get(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().contains_key(path)
    }
}
