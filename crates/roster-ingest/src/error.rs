//! Error types for roster ingestion.

use thiserror::Error;

/// Errors that can occur while turning an upload into a raw table.
///
/// All of these are input-shape errors: the wizard stays on the upload step
/// and shows [`IngestError::user_message`].
#[derive(Debug, Error)]
pub enum IngestError {
    /// The file name does not end in `.csv`.
    #[error("not a CSV file: {name}")]
    NotCsv { name: String },

    /// The file exceeds the upload size limit.
    #[error("file {name} is too large: {size} bytes (max: {max_size} bytes)")]
    FileTooLarge {
        name: String,
        size: u64,
        max_size: u64,
    },

    /// The file could not be read.
    #[error("failed to read file {name}: {source}")]
    FileRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The file parsed to no header row or no data rows.
    #[error("CSV file has no data rows: {name}")]
    EmptyTable { name: String },
}

impl IngestError {
    /// Returns a user-friendly error message suitable for display in the UI.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::NotCsv { .. } => "Please upload a CSV file (.csv).",
            Self::FileTooLarge { .. } => "That file is too large to import.",
            Self::FileRead { .. } => "The file could not be read. Please try again.",
            Self::EmptyTable { .. } => "The file appears to be empty or has no data rows.",
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::NotCsv {
            name: "roster.xlsx".to_string(),
        };
        assert_eq!(err.to_string(), "not a CSV file: roster.xlsx");
        assert!(err.user_message().contains(".csv"));
    }

    #[test]
    fn test_empty_table_message() {
        let err = IngestError::EmptyTable {
            name: "students.csv".to_string(),
        };
        assert!(err.user_message().contains("empty"));
    }
}
