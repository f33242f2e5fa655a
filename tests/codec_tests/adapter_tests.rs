//! Tests for the save/load adapters
//!
//! These tests verify:
//! - Both adapters round-trip through real files
//! - Call sites stay the same when the format is swapped
//! - NotFound and Format errors surface through `load`
//! - Format inference from names and extensions

use std::fs;
use std::path::{Path, PathBuf};

use tableadapter::codec::TextOptions;
use tableadapter::{
    Adapter, BinaryAdapter, Config, FileStore, Format, LineEnding, MemoryStore, RawStore,
    Table, TableAdapter, TextAdapter,
};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

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

/// Same call site for any adapter
fn save_then_load(adapter: &dyn TableAdapter, original: &Table, path: &Path) -> Table {
    adapter.save(original, path).unwrap();
    adapter.load(path).unwrap()
}

fn all_adapters(config: &Config) -> Vec<Box<dyn TableAdapter>> {
    vec![
        Box::new(Adapter::new(Format::Text, config).unwrap()),
        Box::new(Adapter::new(Format::Binary, config).unwrap()),
    ]
}

// =============================================================================
// File Round Trip Tests
// =============================================================================

#[test]
fn test_text_adapter_file_contents() {
    let temp = setup_temp_dir();
    let path = temp.path().join("data.txt");
    let adapter = TextAdapter::new(FileStore::new());

    adapter.save(&sample(), &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "1;Phone;800\n2;Laptop;1200\n");
    assert_eq!(adapter.load(&path).unwrap(), sample());
}

#[test]
fn test_binary_adapter_round_trip_any_characters() {
    let temp = setup_temp_dir();
    let path = temp.path().join("data.dat");
    let adapter = BinaryAdapter::new(FileStore::new());
    let original = table(&[&["a;b", "", "line\nbreak"], &["ü", "🎉", " "]]);

    assert_eq!(save_then_load(&adapter, &original, &path), original);
}

#[test]
fn test_swappable_adapters_share_call_site() {
    let temp = setup_temp_dir();
    let config = Config::default();

    for adapter in all_adapters(&config) {
        let path = temp
            .path()
            .join(format!("grid.{}", adapter.format().default_extension()));

        assert_eq!(save_then_load(adapter.as_ref(), &sample(), &path), sample());
        assert_eq!(save_then_load(adapter.as_ref(), &Table::empty(), &path), Table::empty());
    }
}

#[test]
fn test_save_overwrites_previous_file() {
    let temp = setup_temp_dir();
    let config = Config::default();

    for adapter in all_adapters(&config) {
        let path = temp.path().join(format!("overwrite.{}", adapter.format()));
        adapter.save(&sample(), &path).unwrap();
        adapter.save(&table(&[&["only"]]), &path).unwrap();

        assert_eq!(adapter.load(&path).unwrap(), table(&[&["only"]]));
    }
}

#[test]
fn test_configured_text_adapter() {
    let temp = setup_temp_dir();
    let path = temp.path().join("data.csv");
    let config = Config::builder()
        .separator(',')
        .line_ending(LineEnding::CrLf)
        .build()
        .unwrap();
    let adapter = Adapter::for_path(&path, &config).unwrap();

    adapter.save(&table(&[&["a,b", "c;d"]]), &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "a b,c;d\r\n");
    assert_eq!(adapter.load(&path).unwrap(), table(&[&["a b", "c;d"]]));
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_load_missing_file_is_not_found() {
    let temp = setup_temp_dir();
    let config = Config::default();

    for adapter in all_adapters(&config) {
        let path = temp.path().join("does-not-exist");
        let err = adapter.load(&path).unwrap_err();
        assert!(err.is_not_found(), "{} adapter: {:?}", adapter.format(), err);
    }
}

#[test]
fn test_load_truncated_binary_file_is_format_error() {
    let temp = setup_temp_dir();
    let path = temp.path().join("data.dat");
    let adapter = BinaryAdapter::new(FileStore::new());
    adapter.save(&sample(), &path).unwrap();

    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();

    assert!(adapter.load(&path).unwrap_err().is_format());
}

#[test]
fn test_text_file_from_binary_is_format_error() {
    let temp = setup_temp_dir();
    let path = temp.path().join("data.dat");
    fs::write(&path, "1;Phone;800\n").unwrap();

    let adapter = BinaryAdapter::new(FileStore::new());

    assert!(adapter.load(&path).unwrap_err().is_format());
}

// =============================================================================
// In-memory Store Tests
// =============================================================================

#[test]
fn test_adapters_over_shared_memory_store() {
    let store = MemoryStore::new();
    let text = TextAdapter::with_options(&store, TextOptions::default());
    let binary = BinaryAdapter::new(&store);

    text.save(&sample(), Path::new("grid.txt")).unwrap();
    binary.save(&sample(), Path::new("grid.dat")).unwrap();

    assert_eq!(store.len(), 2);
    assert!(text.store().exists(Path::new("grid.txt")));
    assert!(binary.store().exists(Path::new("grid.dat")));
    assert_eq!(text.options(), &TextOptions::default());
    assert_eq!(text.options().separator(), ';');
    assert_eq!(text.options().line_ending(), LineEnding::Lf);
    assert_eq!(store.read_text(Path::new("grid.txt")).unwrap(), "1;Phone;800\n2;Laptop;1200\n");
    assert_eq!(text.load(Path::new("grid.txt")).unwrap(), sample());
    assert_eq!(binary.load(Path::new("grid.dat")).unwrap(), sample());
    assert!(binary.load(Path::new("grid.txt")).unwrap_err().is_format());
}

// =============================================================================
// Format Tests
// =============================================================================

#[test]
fn test_format_from_path() {
    assert_eq!(Format::from_path(&PathBuf::from("data.txt")).unwrap(), Format::Text);
    assert_eq!(Format::from_path(&PathBuf::from("DATA.CSV")).unwrap(), Format::Text);
    assert_eq!(Format::from_path(&PathBuf::from("data.dat")).unwrap(), Format::Binary);
    assert_eq!(Format::from_path(&PathBuf::from("x/y.bin")).unwrap(), Format::Binary);
    assert!(Format::from_path(&PathBuf::from("data.json")).is_err());
    assert!(Format::from_path(&PathBuf::from("noext")).is_err());
}

#[test]
fn test_format_from_str_and_display() {
    assert_eq!("text".parse::<Format>().unwrap(), Format::Text);
    assert_eq!("BIN".parse::<Format>().unwrap(), Format::Binary);
    assert!("xml".parse::<Format>().is_err());
    assert_eq!(Format::Binary.to_string(), "binary");
    assert_eq!(Format::Text.default_extension(), "txt");
}
