//! Tests for the binary codec
//!
//! These tests verify:
//! - Exact byte layout of the sample table
//! - Lossless round trip for arbitrary content
//! - Format errors for truncated, negative, trailing and non-UTF-8 input

use tableadapter::codec::{decode_binary, encode_binary, BINARY_HEADER_SIZE};
use tableadapter::Table;

// =============================================================================
// Helper Functions
// =============================================================================

fn table(data: &[&[&str]]) -> Table {
    Table::new(
        data.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
    .unwrap()
}

fn sample() -> Table {
    table(&[&["1", "Phone", "800"], &["2", "Laptop", "1200"]])
}

fn header(rows: i32, cols: i32) -> Vec<u8> {
    let mut bytes = rows.to_le_bytes().to_vec();
    bytes.extend_from_slice(&cols.to_le_bytes());
    bytes
}

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_encode_sample_layout() {
    let bytes = encode_binary(&sample()).unwrap();

    let mut expected = header(2, 3);
    for cell in ["1", "Phone", "800", "2", "Laptop", "1200"] {
        expected.push(cell.len() as u8);
        expected.extend_from_slice(cell.as_bytes());
    }

    assert_eq!(bytes, expected);
}

#[test]
fn test_encode_empty_table() {
    let bytes = encode_binary(&Table::empty()).unwrap();
    assert_eq!(bytes, header(0, 0));
    assert_eq!(bytes.len(), BINARY_HEADER_SIZE);
}

#[test]
fn test_encode_long_cell_uses_multibyte_prefix() {
    let long = "x".repeat(200);
    let bytes = encode_binary(&table(&[&[long.as_str()]])).unwrap();

    assert_eq!(&bytes[BINARY_HEADER_SIZE..BINARY_HEADER_SIZE + 2], &[0xc8, 0x01]);
    assert_eq!(bytes.len(), BINARY_HEADER_SIZE + 2 + 200);
}

#[test]
fn test_encode_prefix_counts_utf8_bytes() {
    let bytes = encode_binary(&table(&[&["é"]])).unwrap();
    assert_eq!(bytes[BINARY_HEADER_SIZE], 2);
}

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_round_trip_any_content() {
    let long = "long cell ".repeat(50);
    let tables = [
        sample(),
        Table::empty(),
        table(&[&["", "", ""]]),
        table(&[&["semi;colon", "new\nline", "cr\rlf"], &["\0nul", "日本語", "🎉"]]),
        table(&[&[long.as_str(), "short"]]),
    ];

    for original in tables {
        let bytes = encode_binary(&original).unwrap();
        assert_eq!(decode_binary(&bytes).unwrap(), original);
    }
}

#[test]
fn test_encode_zero_width_rows_as_empty_table() {
    let original = Table::new(vec![Vec::new(), Vec::new()]).unwrap();

    let bytes = encode_binary(&original).unwrap();

    assert_eq!(bytes, header(0, 0));
    assert_eq!(decode_binary(&bytes).unwrap(), Table::empty());
}

#[test]
fn test_decode_rows_without_columns_in_header() {
    let decoded = decode_binary(&header(0, 3)).unwrap();
    assert!(decoded.is_empty());
}

// =============================================================================
// Corruption Tests
// =============================================================================

#[test]
fn test_decode_empty_input() {
    assert!(decode_binary(&[]).unwrap_err().is_format());
}

#[test]
fn test_decode_truncated_header() {
    assert!(decode_binary(&[2, 0, 0, 0, 3]).unwrap_err().is_format());
}

#[test]
fn test_decode_negative_counts() {
    assert!(decode_binary(&header(-1, 3)).unwrap_err().is_format());
    assert!(decode_binary(&header(1, -3)).unwrap_err().is_format());
}

#[test]
fn test_decode_header_declares_more_cells_than_present() {
    let mut bytes = header(5, 5);
    bytes.extend_from_slice(&[1, b'a']);

    assert!(decode_binary(&bytes).unwrap_err().is_format());
}

#[test]
fn test_decode_rows_with_zero_columns() {
    assert!(decode_binary(&header(1, 0)).unwrap_err().is_format());
    assert!(decode_binary(&header(20_000_000, 0)).unwrap_err().is_format());
    assert!(decode_binary(&header(i32::MAX, 0)).unwrap_err().is_format());
}

#[test]
fn test_decode_huge_header_is_rejected_without_allocating() {
    let bytes = header(i32::MAX, i32::MAX);
    assert!(decode_binary(&bytes).unwrap_err().is_format());
}

#[test]
fn test_decode_every_truncation_of_sample_fails() {
    let bytes = encode_binary(&sample()).unwrap();

    for len in 0..bytes.len() {
        let err = decode_binary(&bytes[..len]).unwrap_err();
        assert!(err.is_format(), "prefix of {} bytes: {:?}", len, err);
    }
}

#[test]
fn test_decode_truncated_cell_body() {
    let mut bytes = header(1, 1);
    bytes.extend_from_slice(&[10, b'a', b'b']);

    let err = decode_binary(&bytes).unwrap_err();

    assert!(err.is_format());
    assert!(err.to_string().contains("row 0, column 0"));
}

#[test]
fn test_decode_trailing_bytes() {
    let mut bytes = encode_binary(&sample()).unwrap();
    bytes.push(0);

    assert!(decode_binary(&bytes).unwrap_err().is_format());
}

#[test]
fn test_decode_invalid_utf8() {
    let mut bytes = header(1, 1);
    bytes.extend_from_slice(&[2, 0xc3, 0x28]);

    assert!(decode_binary(&bytes).unwrap_err().is_format());
}
