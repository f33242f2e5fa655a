//! Raw Store Module
//!
//! Thin persistence layer underneath the codecs.
//!
//! ## Responsibilities
//! - Write and read whole files as UTF-8 text or raw bytes
//! - Report reads of missing paths as `NotFound`
//! - Scope every file handle to a single call
//!
//! No partial-write atomicity: a crash mid-write may leave a truncated file.

mod file;
mod memory;

use std::path::Path;

use crate::error::Result;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Whole-file text and byte persistence
pub trait RawStore {
    /// Replace the contents at `path` with UTF-8 text
    fn write_text(&self, path: &Path, text: &str) -> Result<()>;

    /// Read UTF-8 text; fails with `NotFound` if `path` is absent
    fn read_text(&self, path: &Path) -> Result<String>;

    /// Replace the contents at `path` with raw bytes
    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()>;

    /// Read raw bytes; fails with `NotFound` if `path` is absent
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>>;

    fn exists(&self, path: &Path) -> bool;
}

impl<S: RawStore + ?Sized> RawStore for &S {
    fn write_text(&self, path: &Path, text: &str) -> Result<()> {
        (**self).write_text(path, text)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        (**self).read_text(path)
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        (**self).write_bytes(path, bytes)
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        (**self).read_bytes(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}

/// Leading byte order mark some editors (and .NET writers) emit
pub(crate) const UTF8_BOM: &str = "\u{feff}";

/// Decode stored bytes as UTF-8 text, dropping a leading BOM
pub(crate) fn decode_utf8(path: &Path, bytes: Vec<u8>) -> Result<String> {
    let mut text = String::from_utf8(bytes).map_err(|e| {
        crate::AdapterError::Format(format!(
            "{} is not valid UTF-8: {}",
            path.display(),
            e.utf8_error()
        ))
    })?;
    if text.starts_with(UTF8_BOM) {
        text.drain(..UTF8_BOM.len());
    }
    Ok(text)
}
