//! Error types for tableadapter
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using AdapterError
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Unified error type for tableadapter operations
#[derive(Debug, Error)]
pub enum AdapterError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Format Errors
    // -------------------------------------------------------------------------
    #[error("Format error: {0}")]
    Format(String),

    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    // -------------------------------------------------------------------------
    // Table Errors
    // -------------------------------------------------------------------------
    #[error("Ragged table: row {row} has {found} cells, expected {expected}")]
    RaggedTable {
        row: usize,
        expected: usize,
        found: usize,
    },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AdapterError {
    /// True for reads of a missing path
    pub fn is_not_found(&self) -> bool {
        matches!(self, AdapterError::NotFound(_))
    }

    /// True for malformed or truncated input
    pub fn is_format(&self) -> bool {
        matches!(self, AdapterError::Format(_))
    }
}
