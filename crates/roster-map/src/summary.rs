//! Import summary projection.

use roster_model::{ColumnMapping, FieldSemantic, RawTable, Summary, TargetField};

/// Derives the import summary from the current rows and mapping.
///
/// Returns `None` when no column is mapped or the table has no rows; "no
/// summary" is distinct from a summary of zeros. The related-person and
/// schedule-day counts each consult only the first mapping (in mapping
/// order) whose target carries that semantic.
pub fn project_summary(
    mappings: &[ColumnMapping],
    table: &RawTable,
    target_fields: &[TargetField],
) -> Option<Summary> {
    if table.rows.is_empty() || !mappings.iter().any(ColumnMapping::is_mapped) {
        return None;
    }

    Some(Summary {
        entities_count: table.row_count(),
        sub_entities_count: count_populated(
            mappings,
            table,
            target_fields,
            FieldSemantic::RelatedPerson,
        ),
        schedule_entries_count: count_populated(
            mappings,
            table,
            target_fields,
            FieldSemantic::ScheduleDay,
        ),
    })
}

/// Counts rows with a non-blank value in the first column mapped to a
/// target with `semantic`.
fn count_populated(
    mappings: &[ColumnMapping],
    table: &RawTable,
    target_fields: &[TargetField],
    semantic: FieldSemantic,
) -> usize {
    let Some(mapping) = mappings.iter().find(|m| {
        m.target().is_some_and(|target| {
            target_fields
                .iter()
                .any(|f| f.name == target && f.semantic == semantic)
        })
    }) else {
        return 0;
    };
    let Some(column) = table.column_index(&mapping.csv_header) else {
        return 0;
    };

    table
        .column_values(column)
        .filter(|value| !value.trim().is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_rows_no_summary() {
        let table = RawTable::new(vec!["Student".to_string()], Vec::new());
        let mappings = vec![ColumnMapping::suggested("Student", "student_name", 0.9)];
        assert_eq!(project_summary(&mappings, &table, &[]), None);
    }
}
