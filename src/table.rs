//! Table value type
//!
//! The in-memory unit exchanged between callers and the codecs: ordered rows
//! of ordered string cells, every row with the same cell count.

use crate::error::{AdapterError, Result};

/// Rectangular grid of string cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table, rejecting rows whose width differs from the first row
    pub fn new(rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some(first) = rows.first() {
            let expected = first.len();
            for (row, cells) in rows.iter().enumerate() {
                if cells.len() != expected {
                    return Err(AdapterError::RaggedTable {
                        row,
                        expected,
                        found: cells.len(),
                    });
                }
            }
        }
        Ok(Self { rows })
    }

    /// Table with no rows
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from a grid snapshot
    ///
    /// Missing cells become empty strings and short rows are padded to the
    /// widest row.
    pub fn from_snapshot<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = Option<String>>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Option::unwrap_or_default).collect())
            .collect();
        Self::padded(rows)
    }

    /// Pad every row to the widest one with empty cells
    pub(crate) fn padded(mut rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cells per row (0 when the table has no rows)
    pub fn column_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vec<String>> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Vec<String>;
    type IntoIter = std::slice::Iter<'a, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
