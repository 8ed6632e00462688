//! Import draft: the reconciled bundle handed to the commit step.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::TargetField;
use crate::mapping::ColumnMapping;
use crate::table::RawTable;

/// The decision made on the first wizard screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartChoice {
    /// Import an existing roster from another tool.
    Import,
    /// Start with an empty studio.
    Fresh,
    /// Skip for now and decide later.
    Later,
}

impl StartChoice {
    /// Returns true if this choice leaves the wizard without importing.
    pub fn declines_import(&self) -> bool {
        !matches!(self, Self::Import)
    }
}

/// Source software hint: an id from the configured option set, or `auto`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceSoftware(String);

impl SourceSoftware {
    /// Id of the "detect automatically" option.
    pub const AUTO: &'static str = "auto";

    /// Creates a hint from an option id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The "detect automatically" hint.
    pub fn auto() -> Self {
        Self(Self::AUTO.to_string())
    }

    /// Returns the option id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the auto-detect hint.
    pub fn is_auto(&self) -> bool {
        self.0 == Self::AUTO
    }

    /// Returns the hint to send to the mapping service, omitted for auto.
    pub fn as_hint(&self) -> Option<&str> {
        if self.is_auto() { None } else { Some(&self.0) }
    }
}

impl Default for SourceSoftware {
    fn default() -> Self {
        Self::auto()
    }
}

impl fmt::Display for SourceSoftware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Aggregate counts derived from the rows and the current mapping.
///
/// Always recomputed; never stored apart from an [`ImportDraft`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Primary entities represented (one per row).
    pub entities_count: usize,
    /// Rows that reference a related person.
    pub sub_entities_count: usize,
    /// Rows that reference a schedule day.
    pub schedule_entries_count: usize,
}

/// Human-reconciled import bundle.
///
/// Created when the mapping phase is confirmed and replaced if the user
/// restarts the wizard. A draft may also be handed back in to resume a
/// wizard mid-way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDraft {
    #[serde(default)]
    pub source_software: SourceSoftware,
    /// The start-screen choice, if one was made.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choice: Option<StartChoice>,
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
    #[serde(default)]
    pub mappings: Vec<ColumnMapping>,
    #[serde(default)]
    pub target_fields: Vec<TargetField>,
    /// Free-text caveats from the mapping service.
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub detected_source: Option<String>,
    /// Whether the export carries lesson data worth importing.
    #[serde(default)]
    pub import_lessons: bool,
    #[serde(default)]
    pub summary: Option<Summary>,
}

impl ImportDraft {
    /// Returns the draft's rows and headers as a raw table.
    pub fn table(&self) -> RawTable {
        RawTable::new(self.headers.clone(), self.rows.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_hint_omits_auto() {
        assert_eq!(SourceSoftware::auto().as_hint(), None);
        assert_eq!(
            SourceSoftware::new("teachworks").as_hint(),
            Some("teachworks")
        );
    }

    #[test]
    fn test_draft_serializes_camel_case() {
        let draft = ImportDraft {
            source_software: SourceSoftware::new("opus1"),
            import_lessons: true,
            summary: Some(Summary {
                entities_count: 3,
                sub_entities_count: 2,
                schedule_entries_count: 1,
            }),
            ..ImportDraft::default()
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["sourceSoftware"], "opus1");
        assert_eq!(value["importLessons"], true);
        assert_eq!(value["summary"]["subEntitiesCount"], 2);
        assert!(value.get("choice").is_none());
    }

    #[test]
    fn test_draft_deserializes_partial() {
        let draft: ImportDraft = serde_json::from_str(r#"{"choice":"import"}"#).unwrap();
        assert_eq!(draft.choice, Some(StartChoice::Import));
        assert!(draft.source_software.is_auto());
        assert!(draft.mappings.is_empty());
        assert!(draft.summary.is_none());
    }
}
