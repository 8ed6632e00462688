//! Request and response types for the mapping service.

use roster_model::{ColumnMapping, RawTable, SourceSoftware, TargetField};
use serde::{Deserialize, Serialize};

/// Number of leading rows sent as samples unless configured otherwise.
pub const DEFAULT_SAMPLE_ROWS: usize = 5;

/// Body of a mapping suggestion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRequest {
    pub headers: Vec<String>,
    pub sample_rows: Vec<Vec<String>>,
    /// Source software id; omitted when auto-detecting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_hint: Option<String>,
}

impl MappingRequest {
    /// Builds a request from the first `sample_rows` rows of a table.
    pub fn from_table(table: &RawTable, sample_rows: usize, source: &SourceSoftware) -> Self {
        Self {
            headers: table.headers.clone(),
            sample_rows: table.sample_rows(sample_rows).to_vec(),
            source_hint: source.as_hint().map(str::to_string),
        }
    }
}

/// Body of a mapping suggestion response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingResponse {
    #[serde(default)]
    pub mappings: Vec<ColumnMapping>,
    #[serde(default)]
    pub target_fields: Vec<TargetField>,
    /// Free-text caveats, e.g. ambiguous columns.
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Whether the export contains lesson scheduling data.
    #[serde(default)]
    pub has_lesson_data: bool,
    #[serde(default)]
    pub detected_source: Option<String>,
}
