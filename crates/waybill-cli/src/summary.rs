use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::SplitResult;

pub fn print_summary(result: &SplitResult) {
    println!();
    println!("Input: {}", result.input.display());
    match &result.archive_path {
        Some(path) => println!("Archive: {} ({} bytes)", path.display(), result.archive_bytes),
        None => println!(
            "Archive: not written (dry run, {} bytes)",
            result.archive_bytes
        ),
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell(&result.group_column),
        header_cell("File"),
        header_cell("Source rows"),
        header_cell("Target rows"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for group in &result.groups {
        table.add_row(vec![
            dim_cell(group.position),
            Cell::new(&group.key).fg(Color::Cyan),
            Cell::new(&group.file),
            Cell::new(group.source_rows),
            Cell::new(group.target_rows),
        ]);
    }
    table.add_row(vec![
        dim_cell("-"),
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} files", result.groups.len())).add_attribute(Attribute::Bold),
        Cell::new(result.source_rows).add_attribute(Attribute::Bold),
        Cell::new(result.exported_rows).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    if result.skipped_rows > 0 {
        eprintln!(
            "Skipped {} row(s) with an empty '{}' value.",
            result.skipped_rows, result.group_column
        );
    }
}

pub fn print_json(result: &SplitResult) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
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
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
