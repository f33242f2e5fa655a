//! Binary codec
//!
//! Header of two little-endian `i32` counts (rows, columns) followed by
//! `rows × cols` strings in row-major order. Each string is its UTF-8 byte
//! length as a 7-bit variable-length integer, then the bytes. Cells can hold
//! any character; nothing is escaped.

use std::path::Path;

use bytes::{Buf, BufMut, BytesMut};
use tracing::debug;

use crate::error::{AdapterError, Result};
use crate::store::RawStore;
use crate::table::Table;

use super::{Format, TableAdapter};

/// Header size: 4 bytes row count + 4 bytes column count
pub const BINARY_HEADER_SIZE: usize = 8;

/// A 7-bit length prefix never needs more than 5 bytes for an `i32`
const MAX_PREFIX_BYTES: usize = 5;

// =============================================================================
// Encoding
// =============================================================================

/// Encode a table as a binary record stream
///
/// Fails only if a count or cell length does not fit the format's `i32` fields.
/// Rows without cells carry no data and are written as an empty table.
pub fn encode_binary(table: &Table) -> Result<Vec<u8>> {
    let cols = count_to_i32(table.column_count(), "column count")?;
    let rows = if cols == 0 {
        0
    } else {
        count_to_i32(table.row_count(), "row count")?
    };

    let body: usize = table
        .iter()
        .flatten()
        .map(|cell| MAX_PREFIX_BYTES + cell.len())
        .sum();
    let mut buf = BytesMut::with_capacity(BINARY_HEADER_SIZE + body);

    buf.put_i32_le(rows);
    buf.put_i32_le(cols);

    for cell in table.iter().flatten() {
        let len = count_to_i32(cell.len(), "cell length")?;
        write_7bit_len(&mut buf, len as u32);
        buf.put_slice(cell.as_bytes());
    }

    Ok(buf.to_vec())
}

fn count_to_i32(value: usize, what: &str) -> Result<i32> {
    i32::try_from(value).map_err(|_| {
        AdapterError::Format(format!("{} {} exceeds i32::MAX", what, value))
    })
}

/// Write a length as a little-endian base-128 varint
fn write_7bit_len(buf: &mut BytesMut, mut value: u32) {
    while value >= 0x80 {
        buf.put_u8((value as u8) | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a binary record stream into a table
///
/// Rejects negative counts, rows without columns, truncated input, invalid
/// UTF-8 and trailing bytes after the last declared cell.
pub fn decode_binary(bytes: &[u8]) -> Result<Table> {
    let mut buf = bytes;

    if buf.remaining() < BINARY_HEADER_SIZE {
        return Err(AdapterError::Format(format!(
            "Incomplete header: expected {} bytes, got {}",
            BINARY_HEADER_SIZE,
            buf.remaining()
        )));
    }

    let rows = buf.get_i32_le();
    let cols = buf.get_i32_le();

    if rows < 0 || cols < 0 {
        return Err(AdapterError::Format(format!(
            "Negative dimensions in header: {} rows x {} columns",
            rows, cols
        )));
    }

    // Zero-width rows are never written, and would bypass the size check below
    if rows > 0 && cols == 0 {
        return Err(AdapterError::Format(format!(
            "Header declares {} rows with zero columns",
            rows
        )));
    }

    let (rows, cols) = (rows as usize, cols as usize);

    // Every cell takes at least its one-byte length prefix
    let cells = rows.checked_mul(cols).unwrap_or(usize::MAX);
    if cells > buf.remaining() {
        return Err(AdapterError::Format(format!(
            "Header declares {} cells but only {} bytes follow",
            cells,
            buf.remaining()
        )));
    }

    let mut table = Vec::with_capacity(rows.min(buf.remaining() + 1));
    for row in 0..rows {
        let mut cells = Vec::with_capacity(cols);
        for col in 0..cols {
            cells.push(read_cell(&mut buf, row, col)?);
        }
        table.push(cells);
    }

    if buf.has_remaining() {
        return Err(AdapterError::Format(format!(
            "{} unexpected bytes after the last cell",
            buf.remaining()
        )));
    }

    Table::new(table)
}

fn read_cell(buf: &mut &[u8], row: usize, col: usize) -> Result<String> {
    let len = read_7bit_len(buf).map_err(|e| at_cell(e, row, col))?;

    if buf.remaining() < len {
        return Err(AdapterError::Format(format!(
            "Truncated cell at row {}, column {}: expected {} bytes, got {}",
            row,
            col,
            len,
            buf.remaining()
        )));
    }

    let value = std::str::from_utf8(&buf[..len])
        .map_err(|e| {
            AdapterError::Format(format!(
                "Invalid UTF-8 in cell at row {}, column {}: {}",
                row, col, e
            ))
        })?
        .to_string();
    buf.advance(len);

    Ok(value)
}

fn at_cell(err: AdapterError, row: usize, col: usize) -> AdapterError {
    match err {
        AdapterError::Format(msg) => {
            AdapterError::Format(format!("{} at row {}, column {}", msg, row, col))
        }
        other => other,
    }
}

/// Read a little-endian base-128 varint bounded to a non-negative `i32`
fn read_7bit_len(buf: &mut &[u8]) -> Result<usize> {
    let mut value: u32 = 0;

    for i in 0..MAX_PREFIX_BYTES {
        if !buf.has_remaining() {
            return Err(AdapterError::Format(
                "Truncated length prefix".to_string(),
            ));
        }

        let byte = buf.get_u8();

        // Fifth byte holds only the top bits of a 31-bit length
        if i == MAX_PREFIX_BYTES - 1 && byte > 0x07 {
            return Err(AdapterError::Format(format!(
                "Length prefix overflows i32 (final byte 0x{:02x})",
                byte
            )));
        }

        value |= u32::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(value as usize);
        }
    }

    unreachable!("fifth prefix byte always terminates or errors")
}

// =============================================================================
// Adapter
// =============================================================================

/// Saves and loads tables in the binary format through a raw store
#[derive(Debug, Clone, Default)]
pub struct BinaryAdapter<S> {
    store: S,
}

impl<S: RawStore> BinaryAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: RawStore> TableAdapter for BinaryAdapter<S> {
    fn format(&self) -> Format {
        Format::Binary
    }

    fn save(&self, table: &Table, path: &Path) -> Result<()> {
        let bytes = encode_binary(table)?;
        debug!(
            path = %path.display(),
            rows = table.row_count(),
            cols = table.column_count(),
            bytes = bytes.len(),
            "encoded binary table"
        );
        self.store.write_bytes(path, &bytes)
    }

    fn load(&self, path: &Path) -> Result<Table> {
        let bytes = self.store.read_bytes(path)?;
        let table = decode_binary(&bytes)?;
        debug!(
            path = %path.display(),
            rows = table.row_count(),
            cols = table.column_count(),
            "decoded binary table"
        );
        Ok(table)
    }
}
