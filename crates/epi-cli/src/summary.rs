//! Terminal tables for run summaries and dataset profiles.

use std::path::Path;
use std::time::Duration;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use epi_cli::pipeline::RunSummary;
use epi_ingest::{ColumnProfile, DatasetProfile};

pub fn print_run_summary(summary: &RunSummary) {
    println!("{}", run_table(summary));
}

fn run_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Item"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    for (label, value) in run_rows(summary) {
        table.add_row(vec![label_cell(&label), Cell::new(value)]);
    }
    table
}

fn run_rows(summary: &RunSummary) -> Vec<(String, String)> {
    let mut rows = vec![
        ("Load date".to_string(), summary.run_date.to_string()),
        ("Rows".to_string(), summary.rows.to_string()),
        ("Columns".to_string(), summary.columns.to_string()),
        (
            "Local file".to_string(),
            summary.local_path.display().to_string(),
        ),
        ("Remote object".to_string(), summary.upload.uri.clone()),
        ("Uploaded bytes".to_string(), summary.upload.bytes.to_string()),
    ];
    rows.extend(
        summary
            .timings
            .iter()
            .map(|(stage, duration)| (format!("Stage {stage}"), format_duration(*duration))),
    );
    rows.push(("Total".to_string(), format_duration(summary.total_duration())));
    rows
}

fn format_duration(duration: Duration) -> String {
    format!("{} ms", duration.as_millis())
}

pub fn print_profile(path: &Path, profile: &DatasetProfile) {
    println!("File: {}", path.display());
    println!("Rows: {}  Columns: {}", profile.rows, profile.columns.len());

    let mut columns = Table::new();
    columns.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Nulls"),
        header_cell("Mean"),
        header_cell("Std"),
        header_cell("Min"),
        header_cell("Max"),
    ]);
    apply_table_style(&mut columns);
    for index in 2..7 {
        align_column(&mut columns, index, CellAlignment::Right);
    }
    for column in &profile.columns {
        columns.add_row(column_row(column));
    }
    println!("{columns}");

    if profile.preview.len() > 1 {
        let mut preview = Table::new();
        preview.set_header(profile.preview[0].iter().map(|name| header_cell(name)));
        apply_table_style(&mut preview);
        for row in &profile.preview[1..] {
            preview.add_row(row.iter().map(|value| {
                if value.is_empty() {
                    dim_cell("null")
                } else {
                    Cell::new(value)
                }
            }));
        }
        println!();
        println!("Preview:");
        println!("{preview}");
    }
}

fn column_row(column: &ColumnProfile) -> Vec<Cell> {
    let null_cell = if column.null_count > 0 {
        Cell::new(column.null_count).fg(Color::Yellow)
    } else {
        dim_cell(0)
    };
    let mut row = vec![
        Cell::new(&column.name)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(&column.dtype),
        null_cell,
    ];
    match &column.numeric {
        Some(stats) => {
            row.push(Cell::new(format_stat(stats.mean)));
            row.push(match stats.std {
                Some(std) => Cell::new(format_stat(std)),
                None => dim_cell("-"),
            });
            row.push(Cell::new(format_stat(stats.min)));
            row.push(Cell::new(format_stat(stats.max)));
        }
        None => row.extend((0..4).map(|_| dim_cell("-"))),
    }
    row
}

fn format_stat(value: f64) -> String {
    format!("{value:.2}")
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn label_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
