//! Raw tabular data as parsed from an uploaded CSV export.

use serde::{Deserialize, Serialize};

/// Header row plus data rows, before any meaning is attached to columns.
///
/// Rows are ragged-tolerant: a row may be shorter or longer than `headers`.
/// Consumers index by position and read missing cells as an empty string
/// (see [`RawTable::cell`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    /// Column names, in file order.
    pub headers: Vec<String>,
    /// Data rows, in file order.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Creates a table from headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Returns the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no headers or no data rows.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.rows.is_empty()
    }

    /// Returns the position of a header, if present.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Returns the cell at `(row, column)`, or `""` when either is out of range.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or("", String::as_str)
    }

    /// Iterates over the values of one column, yielding `""` for missing cells.
    pub fn column_values(&self, column: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |cells| cells.get(column).map_or("", String::as_str))
    }

    /// Returns up to the first `n` rows.
    pub fn sample_rows(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..self.rows.len().min(n)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RawTable {
        RawTable::new(
            vec!["Name".to_string(), "Email".to_string()],
            vec![
                vec!["Ada".to_string(), "ada@example.com".to_string()],
                vec!["Grace".to_string()],
            ],
        )
    }

    #[test]
    fn test_cell_reads_missing_as_empty() {
        let table = table();
        assert_eq!(table.cell(0, 1), "ada@example.com");
        assert_eq!(table.cell(1, 1), "");
        assert_eq!(table.cell(5, 0), "");
    }

    #[test]
    fn test_column_values_ragged() {
        let table = table();
        let emails: Vec<&str> = table.column_values(1).collect();
        assert_eq!(emails, vec!["ada@example.com", ""]);
    }

    #[test]
    fn test_sample_rows_clamps() {
        let table = table();
        assert_eq!(table.sample_rows(5).len(), 2);
        assert_eq!(table.sample_rows(1).len(), 1);
        assert!(table.sample_rows(0).is_empty());
    }

    #[test]
    fn test_is_empty() {
        assert!(RawTable::default().is_empty());
        assert!(RawTable::new(vec!["A".to_string()], Vec::new()).is_empty());
        assert!(!table().is_empty());
        assert_eq!(table().column_index("Email"), Some(1));
        assert_eq!(table().column_index("Phone"), None);
    }
}
