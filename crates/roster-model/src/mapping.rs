//! Column mapping types.

use serde::{Deserialize, Serialize};

/// Confidence recorded for a mapping a human has set or confirmed.
pub const HUMAN_CONFIDENCE: f32 = 1.0;

/// An assignment of one CSV column to (at most) one target field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Header of the source column. Unique per session.
    pub csv_header: String,
    /// Assigned target field, or `None` when the column is skipped.
    #[serde(default)]
    pub target_field: Option<String>,
    /// Confidence score (0.0 to 1.0). 1.0 once a human has edited the mapping.
    #[serde(default)]
    pub confidence: f32,
}

impl ColumnMapping {
    /// Creates a mapping with a model-estimated confidence.
    pub fn suggested(
        csv_header: impl Into<String>,
        target_field: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self {
            csv_header: csv_header.into(),
            target_field: Some(target_field.into()),
            confidence,
        }
    }

    /// Creates a mapping with no target.
    pub fn unmapped(csv_header: impl Into<String>) -> Self {
        Self {
            csv_header: csv_header.into(),
            target_field: None,
            confidence: 0.0,
        }
    }

    /// Returns true if a target field is assigned.
    pub fn is_mapped(&self) -> bool {
        self.target_field.is_some()
    }

    /// Returns the assigned target, if any.
    pub fn target(&self) -> Option<&str> {
        self.target_field.as_deref()
    }

    /// Returns true if this mapping targets `name`.
    pub fn targets(&self, name: &str) -> bool {
        self.target() == Some(name)
    }
}
