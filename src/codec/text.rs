//! Text codec
//!
//! One line per row, cells joined with a separator. There is no quoting: a
//! separator inside a cell is replaced with a space when saving, so such
//! cells do not survive a round trip.

use std::path::Path;

use tracing::debug;

use crate::config::{validate_separator, LineEnding, DEFAULT_SEPARATOR};
use crate::error::Result;
use crate::store::RawStore;
use crate::table::Table;

use super::{Format, TableAdapter};

/// Substituted for separators found inside cells
const REPLACEMENT: char = ' ';

/// Separator and row terminator for the text format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOptions {
    separator: char,
    line_ending: LineEnding,
}

impl TextOptions {
    pub fn new(separator: char, line_ending: LineEnding) -> Result<Self> {
        validate_separator(separator)?;
        Ok(Self {
            separator,
            line_ending,
        })
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            line_ending: LineEnding::Lf,
        }
    }
}

/// Encode a table as separator-delimited lines
///
/// Every row, including the last, is followed by the line ending. A table
/// with no rows encodes to an empty string.
pub fn encode_text(table: &Table, options: &TextOptions) -> String {
    let sep = options.separator;
    let eol = options.line_ending.as_str();
    let mut out = String::new();

    for row in table {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                out.push(sep);
            }
            out.extend(cell.chars().map(|c| if c == sep { REPLACEMENT } else { c }));
        }
        out.push_str(eol);
    }

    out
}

/// Decode separator-delimited lines into a table
///
/// Splits on both CR and LF and skips empty lines. Lines with fewer cells
/// than the widest line are padded with empty cells.
pub fn decode_text(text: &str, separator: char) -> Table {
    let rows: Vec<Vec<String>> = text
        .split(['\r', '\n'])
        .filter(|line| !line.is_empty())
        .map(|line| line.split(separator).map(str::to_string).collect())
        .collect();

    Table::padded(rows)
}

/// Saves and loads tables in the text format through a raw store
#[derive(Debug, Clone, Default)]
pub struct TextAdapter<S> {
    store: S,
    options: TextOptions,
}

impl<S: RawStore> TextAdapter<S> {
    /// Adapter using `;` and `\n`
    pub fn new(store: S) -> Self {
        Self::with_options(store, TextOptions::default())
    }

    pub fn with_options(store: S, options: TextOptions) -> Self {
        Self { store, options }
    }

    pub fn options(&self) -> &TextOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: RawStore> TableAdapter for TextAdapter<S> {
    fn format(&self) -> Format {
        Format::Text
    }

    fn save(&self, table: &Table, path: &Path) -> Result<()> {
        let text = encode_text(table, &self.options);
        debug!(
            path = %path.display(),
            rows = table.row_count(),
            bytes = text.len(),
            "encoded text table"
        );
        self.store.write_text(path, &text)
    }

    fn load(&self, path: &Path) -> Result<Table> {
        let text = self.store.read_text(path)?;
        let table = decode_text(&text, self.options.separator);
        debug!(
            path = %path.display(),
            rows = table.row_count(),
            cols = table.column_count(),
            "decoded text table"
        );
        Ok(table)
    }
}
