//! # tableadapter
//!
//! Save and load tabular string data through interchangeable adapters:
//! - Text: separator-delimited UTF-8 lines (lossy for cells holding the separator)
//! - Binary: row/column header plus length-prefixed cells (lossless)
//! - One `TableAdapter` trait so call sites never change when the format does
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                Caller (UI, CLI, Workbench)                   │
//! │             owns a Table, picks Save or Load                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ TableAdapter
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ TextAdapter │          │BinaryAdapter│
//!   │  (; lines)  │          │ (i32 + str) │
//!   └──────┬──────┘          └──────┬──────┘
//!          └────────────┬────────────┘
//!                       ▼
//!               ┌─────────────┐
//!               │  RawStore   │
//!               │ (FileStore) │
//!               └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod table;
pub mod store;
pub mod codec;
pub mod workbench;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{AdapterError, Result};
pub use config::{Config, LineEnding};
pub use table::Table;
pub use store::{FileStore, MemoryStore, RawStore};
pub use codec::{Adapter, BinaryAdapter, Format, TableAdapter, TextAdapter};
pub use workbench::{Mode, Outcome, Workbench};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of tableadapter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
