//! Integration tests for loading uploads into raw tables.

use std::io::Write;

use roster_ingest::{IngestError, MemorySource, PathSource, load_table};
use tempfile::NamedTempFile;

fn create_temp_file(suffix: &str, content: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content).unwrap();
    file
}

#[test]
fn test_load_csv_from_disk() {
    let file = create_temp_file(".csv", b"Student,Lesson Day\nAda,Monday\nGrace,\n");
    let table = load_table(&PathSource::new(file.path())).unwrap();

    assert_eq!(table.headers, vec!["Student", "Lesson Day"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.cell(1, 1), "");
}

#[test]
fn test_load_rejects_wrong_extension() {
    let file = create_temp_file(".xlsx", b"Student\nAda\n");
    let result = load_table(&PathSource::new(file.path()));

    assert!(matches!(result, Err(IngestError::NotCsv { .. })));
}

#[test]
fn test_load_rejects_missing_file_after_extension_check() {
    let result = load_table(&PathSource::new("/definitely/not/here/roster.csv"));
    assert!(matches!(result, Err(IngestError::FileRead { .. })));
}

#[test]
fn test_load_rejects_empty_table() {
    let result = load_table(&MemorySource::new("roster.csv", "\n\n"));
    assert!(matches!(result, Err(IngestError::EmptyTable { .. })));

    let result = load_table(&MemorySource::new("roster.csv", "Student,Email\n"));
    assert!(matches!(result, Err(IngestError::EmptyTable { .. })));
}

#[test]
fn test_load_windows_1252_export() {
    let source = MemorySource::new("roster.csv", b"Student,Teacher\nZo\xEB,Ren\xE9e\n".to_vec());
    let table = load_table(&source).unwrap();

    assert_eq!(table.rows[0], vec!["Zoë", "Renée"]);
    assert!(!table.rows[0].iter().any(|c| c.contains('\u{FFFD}')));
}

#[test]
fn test_load_strips_utf8_bom() {
    let source = MemorySource::new("roster.csv", b"\xEF\xBB\xBFStudent\nAda\n".to_vec());
    let table = load_table(&source).unwrap();

    assert_eq!(table.headers, vec!["Student"]);
}
