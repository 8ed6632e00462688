//! Uploaded file sources and table loading.

use std::fs;
use std::io;
use std::path::PathBuf;

use roster_model::RawTable;

use crate::csv::tokenize;
use crate::encoding::resolve_text;
use crate::error::{IngestError, Result};

/// Maximum upload size (50 MB).
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// A named, byte-addressable upload.
pub trait FileSource {
    /// File name as chosen by the user (used for the extension check).
    fn name(&self) -> &str;

    /// Size of the content in bytes.
    fn size(&self) -> io::Result<u64>;

    /// Reads the whole content.
    fn read_bytes(&self) -> io::Result<Vec<u8>>;
}

/// A file on disk.
#[derive(Debug, Clone)]
pub struct PathSource {
    path: PathBuf,
    name: String,
}

impl PathSource {
    /// Creates a source for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }
}

impl FileSource for PathSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> io::Result<u64> {
        fs::metadata(&self.path).map(|m| m.len())
    }

    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }
}

/// An upload already held in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    bytes: Vec<u8>,
}

impl MemorySource {
    /// Creates a source from a file name and its content.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

impl FileSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> io::Result<u64> {
        Ok(self.bytes.len() as u64)
    }

    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

/// Returns true if `name` ends in `.csv` (ASCII case-insensitive).
pub fn has_csv_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("csv"))
}

/// Loads an upload into a raw table.
///
/// The extension is checked before anything is read. The content is decoded
/// with [`resolve_text`] and tokenized with [`tokenize`]; a table without a
/// header row or without data rows is rejected.
pub fn load_table<S: FileSource + ?Sized>(source: &S) -> Result<RawTable> {
    let name = source.name();
    if !has_csv_extension(name) {
        return Err(IngestError::NotCsv {
            name: name.to_string(),
        });
    }

    let size = source.size().map_err(|e| IngestError::FileRead {
        name: name.to_string(),
        source: e,
    })?;
    if size > MAX_UPLOAD_BYTES {
        return Err(IngestError::FileTooLarge {
            name: name.to_string(),
            size,
            max_size: MAX_UPLOAD_BYTES,
        });
    }

    let bytes = source.read_bytes().map_err(|e| IngestError::FileRead {
        name: name.to_string(),
        source: e,
    })?;
    let table = tokenize(&resolve_text(&bytes));

    if table.is_empty() {
        return Err(IngestError::EmptyTable {
            name: name.to_string(),
        });
    }

    tracing::info!(
        file = %name,
        columns = table.headers.len(),
        rows = table.row_count(),
        "Loaded upload"
    );
    Ok(table)
}
