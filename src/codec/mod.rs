//! Codec Module
//!
//! Two interchangeable save/load adapters behind one trait.
//!
//! ## Text Format
//! ```text
//! ┌──────────────────────────────┐
//! │ cell;cell;cell\n             │  one line per row
//! │ cell;cell;cell\n             │  `;` inside a cell becomes ' '
//! └──────────────────────────────┘
//! ```
//!
//! ## Binary Format
//! ```text
//! ┌──────────┬──────────┬──────────────────────────────────────┐
//! │ Rows (4) │ Cols (4) │ Cells, row-major                     │
//! └──────────┴──────────┴──────────────────────────────────────┘
//!                        ┌─────────────────┬──────────────────┐
//!               Cell:    │ Len (7-bit, 1-5)│ UTF-8 bytes      │
//!                        └─────────────────┴──────────────────┘
//! ```
//! Counts are little-endian `i32`. There is no magic number or version, so
//! the layout cannot evolve without breaking existing files.

mod binary;
mod text;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::config::Config;
use crate::error::{AdapterError, Result};
use crate::store::FileStore;
use crate::table::Table;

pub use binary::{decode_binary, encode_binary, BinaryAdapter, BINARY_HEADER_SIZE};
pub use text::{decode_text, encode_text, TextAdapter, TextOptions};

// =============================================================================
// Adapter Interface
// =============================================================================

/// Uniform save/load contract implemented by every format
pub trait TableAdapter {
    /// Which file format this adapter reads and writes
    fn format(&self) -> Format;

    /// Persist `table` at `path`, replacing any existing contents
    fn save(&self, table: &Table, path: &Path) -> Result<()>;

    /// Reconstruct a table from the file at `path`
    fn load(&self, path: &Path) -> Result<Table>;
}

impl<A: TableAdapter + ?Sized> TableAdapter for Box<A> {
    fn format(&self) -> Format {
        (**self).format()
    }

    fn save(&self, table: &Table, path: &Path) -> Result<()> {
        (**self).save(table, path)
    }

    fn load(&self, path: &Path) -> Result<Table> {
        (**self).load(path)
    }
}

// =============================================================================
// Format
// =============================================================================

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Separator-delimited UTF-8 lines
    Text,

    /// Length-prefixed binary record stream
    Binary,
}

impl Format {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "txt" | "csv" => Ok(Format::Text),
            "dat" | "bin" => Ok(Format::Binary),
            _ => Err(AdapterError::UnknownFormat(format!(
                "cannot infer format from {}",
                path.display()
            ))),
        }
    }

    pub fn default_extension(self) -> &'static str {
        match self {
            Format::Text => "txt",
            Format::Binary => "dat",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Text => f.write_str("text"),
            Format::Binary => f.write_str("binary"),
        }
    }
}

impl FromStr for Format {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Format::Text),
            "binary" | "bin" | "dat" => Ok(Format::Binary),
            other => Err(AdapterError::UnknownFormat(other.to_string())),
        }
    }
}

// =============================================================================
// File-backed Adapter
// =============================================================================

/// File-backed adapter for either format
///
/// Lets call sites pick a format at runtime and keep a single concrete type.
#[derive(Debug, Clone)]
pub enum Adapter {
    Text(TextAdapter<FileStore>),
    Binary(BinaryAdapter<FileStore>),
}

impl Adapter {
    /// Build the adapter for `format` from shared configuration
    pub fn new(format: Format, config: &Config) -> Result<Self> {
        let store = FileStore::with_sync(config.sync_on_write);
        match format {
            Format::Text => {
                let options = TextOptions::new(config.separator, config.line_ending)?;
                Ok(Adapter::Text(TextAdapter::with_options(store, options)))
            }
            Format::Binary => Ok(Adapter::Binary(BinaryAdapter::new(store))),
        }
    }

    /// Adapter chosen by the extension of `path`
    pub fn for_path(path: &Path, config: &Config) -> Result<Self> {
        Self::new(Format::from_path(path)?, config)
    }
}

impl TableAdapter for Adapter {
    fn format(&self) -> Format {
        match self {
            Adapter::Text(a) => a.format(),
            Adapter::Binary(a) => a.format(),
        }
    }

    fn save(&self, table: &Table, path: &Path) -> Result<()> {
        match self {
            Adapter::Text(a) => a.save(table, path),
            Adapter::Binary(a) => a.save(table, path),
        }
    }

    fn load(&self, path: &Path) -> Result<Table> {
        match self {
            Adapter::Text(a) => a.load(path),
            Adapter::Binary(a) => a.load(path),
        }
    }
}
