//! Roster ingestion utilities.
//!
//! Turns an uploaded CSV export into a [`RawTable`](roster_model::RawTable).
//!
//! # Features
//!
//! - **Tokenizing**: Quote-aware line splitting into a header row and data rows
//! - **Encoding fallback**: UTF-8 first, Windows-1252 when decoding produced U+FFFD
//! - **Upload validation**: `.csv` extension, size limit, and empty-table checks
//!
//! # Example
//!
//! ```ignore
//! use roster_ingest::{PathSource, load_table};
//!
//! let table = load_table(&PathSource::new("students.csv"))?;
//! println!("{} columns, {} rows", table.headers.len(), table.row_count());
//! ```

mod csv;
mod encoding;
mod error;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === Tokenizing ===
pub use csv::{parse_csv_line, render_csv, tokenize};

// === Encoding ===
pub use encoding::resolve_text;

// === File Sources ===
pub use source::{
    FileSource, MAX_UPLOAD_BYTES, MemorySource, PathSource, has_csv_extension, load_table,
};
