//! Target field catalog entries.

use serde::{Deserialize, Serialize};

/// What a target field means to the summary counts.
///
/// Supplied alongside the catalog so that derived counts never depend on
/// field naming conventions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSemantic {
    /// Identifies the primary entity (e.g. the student's name).
    Identity,
    /// An attribute of a related person (e.g. a guardian's email).
    RelatedPerson,
    /// The day a recurring lesson is scheduled on.
    ScheduleDay,
    /// Anything else.
    #[default]
    Other,
}

/// A destination field a CSV column may be mapped onto.
///
/// Immutable for the lifetime of an import session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetField {
    /// Unique catalog key.
    pub name: String,
    /// Whether a column must be mapped to this field before the draft can be confirmed.
    pub required: bool,
    /// Semantic tag used by the summary projection.
    #[serde(default)]
    pub semantic: FieldSemantic,
}

impl TargetField {
    /// Creates an optional field with no particular semantic.
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            semantic: FieldSemantic::Other,
        }
    }

    /// Creates a required field with no particular semantic.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            required: true,
            ..Self::optional(name)
        }
    }

    /// Returns this field with the given semantic tag.
    #[must_use]
    pub fn with_semantic(mut self, semantic: FieldSemantic) -> Self {
        self.semantic = semantic;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_defaults_to_other() {
        let field: TargetField =
            serde_json::from_str(r#"{"name":"notes","required":false}"#).unwrap();
        assert_eq!(field.semantic, FieldSemantic::Other);
    }

    #[test]
    fn test_semantic_snake_case() {
        let field: TargetField = serde_json::from_str(
            r#"{"name":"guardian_email","required":false,"semantic":"related_person"}"#,
        )
        .unwrap();
        assert_eq!(field.semantic, FieldSemantic::RelatedPerson);
    }
}
