//! Mapping state for one import session.

use std::collections::{BTreeMap, HashSet};

use roster_model::{ColumnMapping, HUMAN_CONFIDENCE, TargetField};

use crate::confidence::{ConfidenceLevel, ConfidenceThreshold};
use crate::error::{MappingError, Result};

/// Column-to-target assignments plus the target field catalog.
///
/// Suggestions are taken as-is when seeded, even if two columns claim the
/// same target. Uniqueness is enforced on every later edit through
/// [`MappingReconciler::available_targets`] and
/// [`MappingReconciler::set_target`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingReconciler {
    mappings: Vec<ColumnMapping>,
    target_fields: Vec<TargetField>,
}

/// A target field claimed by more than one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateTarget {
    /// The target field name.
    pub target: String,
    /// Columns mapped to it, in mapping order.
    pub columns: Vec<String>,
}

impl DuplicateTarget {
    /// Human-readable warning for the review screen.
    pub fn warning(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| format!("\"{c}\""))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Columns {columns} were all matched to \"{}\". Keep one and change the others.",
            self.target
        )
    }
}

/// Counts for the mapping review screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MappingProgress {
    /// Number of CSV columns.
    pub total_columns: usize,
    /// Columns with a target field.
    pub mapped: usize,
    /// Mapped columns whose confidence is below the review threshold.
    pub needs_review: usize,
    /// Required target fields in the catalog.
    pub required_total: usize,
    /// Required target fields claimed by some column.
    pub required_mapped: usize,
}

impl MappingReconciler {
    /// Creates a reconciler from existing mappings, without any filtering.
    pub fn new(mappings: Vec<ColumnMapping>, target_fields: Vec<TargetField>) -> Self {
        Self {
            mappings,
            target_fields,
        }
    }

    /// Creates one mapping per header from a service suggestion.
    ///
    /// Each header takes the first suggestion naming it; headers without a
    /// suggestion start unmapped. Suggestions for headers that are not in
    /// the file are dropped, and confidences are clamped to `[0, 1]`.
    pub fn seed(
        headers: &[String],
        suggested: Vec<ColumnMapping>,
        target_fields: Vec<TargetField>,
    ) -> Self {
        let mut by_header: BTreeMap<String, ColumnMapping> = BTreeMap::new();
        for mut mapping in suggested {
            if !headers.contains(&mapping.csv_header) {
                tracing::warn!(
                    column = %mapping.csv_header,
                    "Dropping suggestion for a column that is not in the file"
                );
                continue;
            }
            if !(0.0..=1.0).contains(&mapping.confidence) {
                tracing::warn!(
                    column = %mapping.csv_header,
                    confidence = mapping.confidence,
                    "Clamping suggested confidence outside [0, 1]"
                );
                mapping.confidence = if mapping.confidence.is_nan() {
                    0.0
                } else {
                    mapping.confidence.clamp(0.0, 1.0)
                };
            }
            by_header
                .entry(mapping.csv_header.clone())
                .or_insert(mapping);
        }

        let mut seen = HashSet::new();
        let mut mappings = Vec::with_capacity(headers.len());
        for header in headers {
            if !seen.insert(header.as_str()) {
                tracing::warn!(column = %header, "Ignoring repeated column header");
                continue;
            }
            let mapping = by_header
                .remove(header)
                .unwrap_or_else(|| ColumnMapping::unmapped(header.clone()));
            if let Some(target) = mapping.target()
                && !target_fields.iter().any(|f| f.name == target)
            {
                tracing::warn!(
                    column = %header,
                    target = %target,
                    "Suggested target is not in the field catalog"
                );
            }
            mappings.push(mapping);
        }

        tracing::debug!(
            columns = mappings.len(),
            targets = target_fields.len(),
            "Seeded mapping state"
        );
        Self::new(mappings, target_fields)
    }

    /// Returns the mappings in column order.
    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.mappings
    }

    /// Returns the target field catalog.
    pub fn target_fields(&self) -> &[TargetField] {
        &self.target_fields
    }

    /// Get the mapping for a column.
    pub fn mapping_for(&self, csv_header: &str) -> Option<&ColumnMapping> {
        self.mappings.iter().find(|m| m.csv_header == csv_header)
    }

    /// Get a target field by name.
    pub fn target_field(&self, name: &str) -> Option<&TargetField> {
        self.target_fields.iter().find(|f| f.name == name)
    }

    /// Returns the other column currently mapped to `target`, if any.
    fn claimed_elsewhere(&self, csv_header: &str, target: &str) -> Option<&str> {
        self.mappings
            .iter()
            .find(|m| m.csv_header != csv_header && m.targets(target))
            .map(|m| m.csv_header.as_str())
    }

    /// Target fields a column may be mapped to.
    ///
    /// Excludes every target claimed by another column. The column's own
    /// current target stays available so it can be kept or re-confirmed.
    pub fn available_targets(&self, csv_header: &str) -> Vec<&TargetField> {
        let claimed: HashSet<&str> = self
            .mappings
            .iter()
            .filter(|m| m.csv_header != csv_header)
            .filter_map(ColumnMapping::target)
            .collect();
        self.target_fields
            .iter()
            .filter(|f| !claimed.contains(f.name.as_str()))
            .collect()
    }

    /// Sets or clears (with `None`) the target for a column.
    ///
    /// Any edit marks the mapping as human-confirmed (confidence 1.0).
    pub fn set_target(&mut self, csv_header: &str, target: Option<&str>) -> Result<()> {
        if let Some(target) = target {
            if self.target_field(target).is_none() {
                return Err(MappingError::TargetNotFound(target.to_string()));
            }
            if let Some(column) = self.claimed_elsewhere(csv_header, target) {
                return Err(MappingError::TargetAlreadyUsed {
                    target: target.to_string(),
                    column: column.to_string(),
                });
            }
        }

        let mapping = self
            .mappings
            .iter_mut()
            .find(|m| m.csv_header == csv_header)
            .ok_or_else(|| MappingError::ColumnNotFound(csv_header.to_string()))?;
        mapping.target_field = target.map(str::to_string);
        mapping.confidence = HUMAN_CONFIDENCE;

        tracing::debug!(column = %csv_header, target = ?target, "Mapping edited");
        Ok(())
    }

    /// Required target fields no column is mapped to.
    pub fn missing_required(&self) -> Vec<&TargetField> {
        self.target_fields
            .iter()
            .filter(|f| f.required && !self.mappings.iter().any(|m| m.targets(&f.name)))
            .collect()
    }

    /// True iff every required target field is claimed by some column.
    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// Target fields claimed by more than one column, sorted by target name.
    pub fn duplicate_targets(&self) -> Vec<DuplicateTarget> {
        let mut by_target: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for mapping in &self.mappings {
            if let Some(target) = mapping.target() {
                by_target
                    .entry(target)
                    .or_default()
                    .push(mapping.csv_header.clone());
            }
        }
        by_target
            .into_iter()
            .filter(|(_, columns)| columns.len() > 1)
            .map(|(target, columns)| DuplicateTarget {
                target: target.to_string(),
                columns,
            })
            .collect()
    }

    /// Get summary counts for the review screen.
    pub fn progress(&self, threshold: ConfidenceThreshold) -> MappingProgress {
        let mapped: Vec<&ColumnMapping> = self.mappings.iter().filter(|m| m.is_mapped()).collect();
        let required_total = self.target_fields.iter().filter(|f| f.required).count();

        MappingProgress {
            total_columns: self.mappings.len(),
            mapped: mapped.len(),
            needs_review: mapped
                .iter()
                .filter(|m| threshold.categorize(m.confidence) == ConfidenceLevel::NeedsReview)
                .count(),
            required_total,
            required_mapped: required_total - self.missing_required().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_seed_fills_missing_headers() {
        let reconciler = MappingReconciler::seed(
            &headers(&["Student", "Notes"]),
            vec![ColumnMapping::suggested("Student", "student_name", 0.9)],
            vec![TargetField::required("student_name")],
        );

        assert_eq!(reconciler.mappings().len(), 2);
        assert_eq!(reconciler.mappings()[1], ColumnMapping::unmapped("Notes"));
    }

    #[test]
    fn test_seed_drops_unknown_columns_and_repeats() {
        let reconciler = MappingReconciler::seed(
            &headers(&["Student", "Student"]),
            vec![
                ColumnMapping::suggested("Ghost", "student_name", 0.9),
                ColumnMapping::suggested("Student", "student_name", 0.8),
                ColumnMapping::suggested("Student", "notes", 0.4),
            ],
            vec![TargetField::required("student_name")],
        );

        assert_eq!(reconciler.mappings().len(), 1);
        assert_eq!(reconciler.mappings()[0].confidence, 0.8);
    }

    #[test]
    fn test_set_target_unknown_column() {
        let mut reconciler = MappingReconciler::new(
            vec![ColumnMapping::unmapped("Student")],
            vec![TargetField::required("student_name")],
        );
        let err = reconciler
            .set_target("Teacher", Some("student_name"))
            .unwrap_err();
        assert_eq!(err, MappingError::ColumnNotFound("Teacher".to_string()));
    }
}
