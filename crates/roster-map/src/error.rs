//! Error types for mapping edits.

use thiserror::Error;

/// Errors from mapping edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Target field not in the session's catalog.
    #[error("target field not found: {0}")]
    TargetNotFound(String),

    /// Column not present in the uploaded file.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// Target field already mapped from another column.
    #[error("target field '{target}' already mapped from column '{column}'")]
    TargetAlreadyUsed { target: String, column: String },
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;
