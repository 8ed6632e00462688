use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use roster_cli::import::{ImportReport, ReviewRow};
use roster_map::ConfidenceLevel;
use roster_model::RawTable;
use roster_wizard::SourceOption;

pub fn print_review(report: &ImportReport) {
    if let Some(source) = &report.detected_source {
        println!("Detected source: {source}");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Field"),
        header_cell("Confidence"),
        header_cell("Status"),
        header_cell("Example"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in &report.rows {
        table.add_row(review_cells(row));
    }
    println!("{table}");

    let progress = report.progress;
    println!(
        "Mapped {} of {} columns, {} to review. Required fields: {}/{}.",
        progress.mapped,
        progress.total_columns,
        progress.needs_review,
        progress.required_mapped,
        progress.required_total
    );
    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    for row in &report.rows {
        if row.target.is_some()
            && let Some(note) = row.level.note()
        {
            println!("{}: {note}", row.csv_header);
        }
    }

    if !report.is_complete() {
        eprintln!(
            "Required fields not mapped: {}. Use --map HEADER=FIELD to assign them.",
            report.missing_required.join(", ")
        );
        return;
    }
    if let Some(summary) = report.summary {
        println!(
            "Ready to import {} students, {} with a guardian, {} with a lesson day.",
            summary.entities_count, summary.sub_entities_count, summary.schedule_entries_count
        );
    }
    if let Some(path) = &report.draft_path {
        println!("Draft: {}", path.display());
    }
}

pub fn print_raw_table(table: &RawTable, rows: usize) {
    let mut output = Table::new();
    output.set_header(table.headers.iter().map(|h| header_cell(h)));
    apply_table_style(&mut output);
    for row in table.sample_rows(rows) {
        output.add_row(row.iter().map(Cell::new));
    }
    println!("{output}");
    println!(
        "{} columns, {} rows (showing {})",
        table.headers.len(),
        table.row_count(),
        rows.min(table.row_count())
    );
}

pub fn print_sources(options: &[SourceOption]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Id"), header_cell("Source")]);
    apply_table_style(&mut table);
    for option in options {
        table.add_row(vec![Cell::new(&option.id), Cell::new(&option.label)]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn review_cells(row: &ReviewRow) -> Vec<Cell> {
    let field = match &row.target {
        Some(target) if row.required => Cell::new(format!("{target} *")),
        Some(target) => Cell::new(target),
        None => dim_cell("(skipped)"),
    };
    let status = match (&row.target, row.level) {
        (None, _) => dim_cell("-"),
        (Some(_), ConfidenceLevel::Verified) => Cell::new(row.level.label()).fg(Color::Green),
        (Some(_), ConfidenceLevel::NeedsReview) => Cell::new(row.level.label())
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
    };
    vec![
        Cell::new(&row.csv_header),
        field,
        Cell::new(format!("{:.0}%", row.confidence * 100.0)),
        status,
        row.example
            .as_deref()
            .map_or_else(|| dim_cell("-"), Cell::new),
    ]
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
