//! Line-based CSV tokenizing.
//!
//! This is deliberately not an RFC-4180 reader: a `"` always toggles the
//! quoted state and is never emitted, so `""` inside a quoted field does not
//! produce a literal quote.

use roster_model::RawTable;

/// Tokenizes CSV text into a header row and data rows.
///
/// Lines are split on `\n` or `\r\n`. Empty and whitespace-only lines are
/// discarded, and the first remaining line becomes the header row. Input
/// with no remaining lines yields an empty table, which is not an error here.
pub fn tokenize(content: &str) -> RawTable {
    let mut lines = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return RawTable::default();
    };

    let headers = parse_csv_line(header_line);
    let rows: Vec<Vec<String>> = lines.map(parse_csv_line).collect();

    tracing::debug!(
        columns = headers.len(),
        rows = rows.len(),
        "Tokenized CSV content"
    );

    RawTable::new(headers, rows)
}

/// Parses a CSV line into fields.
///
/// Single left-to-right scan: `"` toggles the quoted state, `,` ends a field
/// only outside quotes, and every other character is kept. Fields are
/// trimmed after assembly.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    fields.push(current.trim().to_string());
    fields
}

/// Renders a table back to CSV text, one line per row.
///
/// Fields containing a comma are wrapped in quotes. Embedded quotes are not
/// escaped, matching what [`tokenize`] can read back.
pub fn render_csv(table: &RawTable) -> String {
    let mut out = String::new();
    if table.headers.is_empty() {
        return out;
    }
    push_line(&mut out, &table.headers);
    for row in &table.rows {
        push_line(&mut out, row);
    }
    out
}

fn push_line(out: &mut String, fields: &[String]) {
    for (idx, field) in fields.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        if field.contains(',') {
            out.push('"');
            out.push_str(field);
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
}
