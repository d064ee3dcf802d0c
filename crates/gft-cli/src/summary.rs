use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use gft_cli::types::ConversionResult;
use gft_model::DuplicateReport;

pub fn print_summary(result: &ConversionResult) {
    println!("Catalog: {} ({})", result.title, result.kind);
    println!("Version: {}", result.version);
    println!("Output: {}", result.output_dir.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Namespace"),
        header_cell("URL"),
        header_cell("File"),
        header_cell("Concepts"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for artifact in &result.written {
        let file_name = artifact
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(artifact.namespace.as_str().to_uppercase())
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new(artifact.url),
            Cell::new(file_name),
            Cell::new(result.concept_count),
        ]);
    }
    for failure in &result.failures {
        table.add_row(vec![
            Cell::new(failure.namespace.as_str().to_uppercase())
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            dim_cell("-"),
            Cell::new("not written").fg(Color::Red),
            dim_cell("-"),
        ]);
    }
    println!("{table}");

    if !result.duplicates.is_empty() {
        print_duplicate_table(&result.duplicates);
    }
    if !result.failures.is_empty() {
        eprintln!("Errors:");
        for failure in &result.failures {
            eprintln!("- {failure}");
        }
    }
}

fn print_duplicate_table(duplicates: &[DuplicateReport]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Duplicate code"),
        header_cell("Occurrences"),
        header_cell("Displays"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for report in duplicates {
        let displays = report
            .occurrences
            .iter()
            .map(|occurrence| {
                format!(
                    "{} ({} properties)",
                    occurrence.display, occurrence.property_count
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(&report.code).fg(Color::Yellow),
            Cell::new(report.occurrence_count)
                .fg(Color::Yellow)
                .add_attribute(Attribute::Bold),
            Cell::new(displays),
        ]);
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

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
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
