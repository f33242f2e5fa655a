//! Configuration for tableadapter
//!
//! Centralized configuration with sensible defaults.

use std::path::{Path, PathBuf};

use crate::codec::Format;
use crate::error::{AdapterError, Result};

/// Default cell separator for the text format
pub const DEFAULT_SEPARATOR: char = ';';

/// Main configuration shared by the adapters and the CLI
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Text Format
    // -------------------------------------------------------------------------
    /// Cell separator; occurrences inside a cell are replaced with a space on save
    pub separator: char,

    /// Terminator written after every row
    pub line_ending: LineEnding,

    // -------------------------------------------------------------------------
    // File Locations
    // -------------------------------------------------------------------------
    /// Default file for the text format
    pub text_path: PathBuf,

    /// Default file for the binary format
    pub binary_path: PathBuf,

    // -------------------------------------------------------------------------
    // Durability
    // -------------------------------------------------------------------------
    /// fsync files after writing them
    pub sync_on_write: bool,
}

/// Row terminator used by the text format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,

    /// `\r\n`
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            line_ending: LineEnding::Lf,
            text_path: PathBuf::from("data.txt"),
            binary_path: PathBuf::from("data.dat"),
            sync_on_write: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Default file location for a format
    pub fn path_for(&self, format: Format) -> &Path {
        match format {
            Format::Text => &self.text_path,
            Format::Binary => &self.binary_path,
        }
    }
}

/// Reject separators that collide with line splitting or the replacement character
pub(crate) fn validate_separator(separator: char) -> Result<()> {
    match separator {
        '\r' | '\n' => Err(AdapterError::Config(format!(
            "separator {:?} conflicts with line breaks",
            separator
        ))),
        ' ' => Err(AdapterError::Config(
            "separator cannot be a space".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the text cell separator
    pub fn separator(mut self, separator: char) -> Self {
        self.config.separator = separator;
        self
    }

    /// Set the text row terminator
    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.config.line_ending = line_ending;
        self
    }

    /// Set the default text file
    pub fn text_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.text_path = path.into();
        self
    }

    /// Set the default binary file
    pub fn binary_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.binary_path = path.into();
        self
    }

    /// fsync after each write
    pub fn sync_on_write(mut self, sync: bool) -> Self {
        self.config.sync_on_write = sync;
        self
    }

    pub fn build(self) -> Result<Config> {
        validate_separator(self.config.separator)?;
        Ok(self.config)
    }
}
