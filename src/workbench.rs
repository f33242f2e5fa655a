//! Workbench Module
//!
//! Caller-side owner of the current table.
//!
//! ## Responsibilities
//! - Hold the table a presentation layer would display
//! - Run a save or load through any `TableAdapter`
//! - Replace the table only when a load succeeds

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::codec::{Format, TableAdapter};
use crate::error::Result;
use crate::table::Table;

/// Column names of the sample grid
pub const SAMPLE_HEADERS: [&str; 3] = ["ID", "Product", "Price"];

/// Direction of a workbench run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Save,
    Load,
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub mode: Mode,
    pub format: Format,
    pub path: PathBuf,
    /// Rows written (save) or read (load)
    pub rows: usize,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            Mode::Save => write!(f, "Saved to {}", self.path.display()),
            Mode::Load => write!(f, "Loaded from {}", self.path.display()),
        }
    }
}

/// Owns the working table and drives adapters against it
#[derive(Debug, Clone, Default)]
pub struct Workbench {
    table: Table,
    headers: Vec<String>,
}

impl Workbench {
    /// Workbench over an existing table, without column names
    pub fn new(table: Table) -> Self {
        Self {
            table,
            headers: Vec::new(),
        }
    }

    /// Workbench seeded with the two-product sample grid
    pub fn with_sample() -> Self {
        Self {
            table: sample_table(),
            headers: SAMPLE_HEADERS.iter().map(|h| h.to_string()).collect(),
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Column names for display; neither file format stores them
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Replace the working table directly (e.g. after grid edits)
    pub fn set_table(&mut self, table: Table) {
        self.table = table;
    }

    /// Save or load through `adapter`
    ///
    /// On a failed load the previous table is kept.
    pub fn run(&mut self, adapter: &dyn TableAdapter, path: &Path, mode: Mode) -> Result<Outcome> {
        let format = adapter.format();

        let rows = match mode {
            Mode::Save => {
                adapter
                    .save(&self.table, path)
                    .inspect_err(|e| warn!(%format, path = %path.display(), error = %e, "save failed"))?;
                self.table.row_count()
            }
            Mode::Load => {
                let table = adapter
                    .load(path)
                    .inspect_err(|e| warn!(%format, path = %path.display(), error = %e, "load failed"))?;
                let rows = table.row_count();
                self.table = table;
                rows
            }
        };

        let outcome = Outcome {
            mode,
            format,
            path: path.to_path_buf(),
            rows,
        };
        info!(%format, rows, "{}", outcome);
        Ok(outcome)
    }

    pub fn save(&mut self, adapter: &dyn TableAdapter, path: &Path) -> Result<Outcome> {
        self.run(adapter, path, Mode::Save)
    }

    pub fn load(&mut self, adapter: &dyn TableAdapter, path: &Path) -> Result<Outcome> {
        self.run(adapter, path, Mode::Load)
    }
}

/// `[["1","Phone","800"],["2","Laptop","1200"]]`
pub fn sample_table() -> Table {
    Table::padded(vec![
        vec!["1".to_string(), "Phone".to_string(), "800".to_string()],
        vec!["2".to_string(), "Laptop".to_string(), "1200".to_string()],
    ])
}
