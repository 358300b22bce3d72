use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{MapResult, SyncResult};

pub fn print_map_summary(result: &MapResult) {
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }
    let mut table = new_table();
    add_map_rows(&mut table, result);
    println!("{table}");
    println!("Completed in {:.2?}", result.elapsed);
}

pub fn print_sync_summary(result: &SyncResult) {
    if result.dry_run {
        println!("Dry run: no files written");
    } else {
        for path in &result.outputs {
            println!("Output: {}", path.display());
        }
    }
    let mut table = new_table();
    add_map_rows(&mut table, &result.map);
    table.add_row(vec![
        label_cell("Target members"),
        Cell::new(result.target_members),
    ]);
    table.add_row(vec![
        label_cell("Current members"),
        Cell::new(result.current_members),
    ]);
    table.add_row(vec![
        label_cell("To enrol"),
        count_cell(result.to_enrol, Color::Green),
    ]);
    table.add_row(vec![
        label_cell("To unenrol"),
        count_cell(result.to_unenrol, Color::Yellow),
    ]);
    table.add_row(vec![
        label_cell("Protected"),
        count_cell(result.protected, Color::Yellow),
    ]);
    table.add_row(vec![
        label_cell("Missing accounts"),
        count_cell(result.missing_accounts, Color::Red),
    ]);
    println!("{table}");
    println!("Completed in {:.2?}", result.elapsed);
}

fn add_map_rows(table: &mut Table, result: &MapResult) {
    table.add_row(vec![
        label_cell("Enrolment rows"),
        Cell::new(result.enrolment_rows),
    ]);
    table.add_row(vec![
        label_cell("Dropped enrolment rows"),
        count_cell(result.dropped_enrolment_rows, Color::Yellow),
    ]);
    table.add_row(vec![
        label_cell("Module rows"),
        Cell::new(result.module_rows),
    ]);
    table.add_row(vec![
        label_cell("Dropped module rows"),
        count_cell(result.dropped_module_rows, Color::Yellow),
    ]);
    table.add_row(vec![
        label_cell("Timetable entries"),
        Cell::new(result.timetable_entries),
    ]);
    table.add_row(vec![
        label_cell("Associations"),
        Cell::new(result.associations),
    ]);
    table.add_row(vec![
        label_cell("Courses resolved"),
        Cell::new(result.resolved_courses),
    ]);
    table.add_row(vec![
        label_cell("Courses unresolved"),
        count_cell(result.unresolved_courses, Color::Red),
    ]);
    table.add_row(vec![
        label_cell("Mapping rows"),
        Cell::new(result.mapping_rows),
    ]);
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Count")]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}
