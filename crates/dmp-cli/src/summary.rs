use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dmp_decode::{AttributeOutcome, DecodeStats};
use dmp_model::AttributeDefinition;
use dmp_taxonomy::{Taxonomy, is_reserved_sheet};

use crate::batch::BatchReport;

/// Overview of a loaded taxonomy.
pub fn taxonomy_table(taxonomy: &Taxonomy) -> Table {
    let summary = taxonomy.summary();
    let mut table = Table::new();
    table.set_header(vec![header_cell("Property"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    table.add_row(vec![
        Cell::new("Fingerprint"),
        summary
            .fingerprint
            .as_deref()
            .map_or_else(|| dim_cell("-"), Cell::new),
    ]);
    table.add_row(vec![Cell::new("Attribute rows"), Cell::new(summary.attribute_rows)]);
    table.add_row(vec![Cell::new("Attributes"), Cell::new(summary.attribute_count)]);
    table.add_row(vec![
        Cell::new("Duplicate ids"),
        if summary.duplicate_ids.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(summary.duplicate_ids.join(", ")).fg(Color::Yellow)
        },
    ]);
    table.add_row(vec![Cell::new("Dictionaries"), Cell::new(summary.dictionary_count)]);
    table.add_row(vec![
        Cell::new("Empty dictionaries"),
        count_cell(summary.empty_dictionaries, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Dictionary entries"),
        Cell::new(summary.dictionary_entries),
    ]);
    table
}

/// One row per code dictionary with its entry count.
pub fn dictionaries_table(taxonomy: &Taxonomy) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dictionary"),
        header_cell("Entries"),
        header_cell("Used by"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    for (name, dictionary) in taxonomy.dictionaries().iter() {
        let used_by = taxonomy
            .attributes()
            .iter()
            .filter(|attribute| attribute.type_name == name)
            .count();
        table.add_row(vec![
            Cell::new(name),
            count_cell(dictionary.len(), Color::Reset),
            count_cell(used_by, Color::Reset),
        ]);
    }
    table
}

/// Attribute table rows, optionally restricted to one kind.
pub fn attributes_table<'a, I>(attributes: I, taxonomy: &Taxonomy) -> Table
where
    I: IntoIterator<Item = &'a AttributeDefinition>,
{
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Short name"),
        header_cell("Type"),
        header_cell("Kind"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Center);

    for attribute in attributes {
        let kind = attribute.kind();
        let type_cell = if kind.is_direct()
            || taxonomy.dictionaries().contains_type(&attribute.type_name)
        {
            Cell::new(&attribute.type_name)
        } else if is_reserved_sheet(&attribute.type_name) || attribute.type_name.is_empty() {
            dim_cell(&attribute.type_name)
        } else {
            Cell::new(&attribute.type_name).fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(&attribute.id),
            Cell::new(&attribute.name),
            Cell::new(&attribute.short_name),
            type_cell,
            Cell::new(kind.label()),
        ]);
    }
    table
}

/// Outcome counts for a decoded batch.
pub fn batch_table(report: &BatchReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Outcome"), header_cell("Attributes")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let stats: &DecodeStats = &report.stats;
    for (outcome, count) in stats.iter() {
        let color = match outcome {
            AttributeOutcome::Decoded => Color::Green,
            AttributeOutcome::Excluded | AttributeOutcome::MissingValue => Color::Reset,
            AttributeOutcome::UnknownAttribute
            | AttributeOutcome::UnknownType
            | AttributeOutcome::UnknownCode => Color::Yellow,
        };
        table.add_row(vec![Cell::new(outcome.as_str()), count_cell(count, color)]);
    }
    table.add_row(vec![
        Cell::new("records")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(stats.records).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("skipped lines")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(report.skipped.len(), Color::Red).add_attribute(Attribute::Bold),
    ]);
    table
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
        .set_width(80);
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
