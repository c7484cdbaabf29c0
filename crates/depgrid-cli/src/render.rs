//! Terminal tables

use comfy_table::{
    Cell, CellAlignment, Color as TermColor, ContentArrangement, Table, presets::UTF8_FULL,
};
use itertools::Itertools;

use depgrid_core::{Color, SemanticType};
use depgrid_table::{ColumnHeader, ColumnSummary, ResolvedColumn, TableEngine, ViewRow};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.red,
        g: color.green,
        b: color.blue,
    }
}

/// The visible rows of the current view, categorical cells in their colors
pub fn view_table(engine: &mut TableEngine, limit: Option<usize>) -> Table {
    let columns: Vec<ResolvedColumn> = engine.visible_columns().cloned().collect();
    let rows: Vec<ViewRow> = engine
        .view()
        .data_rows()
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect();

    let mut table = new_table();
    table.set_header(
        columns
            .iter()
            .map(|column| Cell::new(format!("{}\n{}", column.label(), column.semantic_type))),
    );

    for row in &rows {
        let cells: Vec<Cell> = columns
            .iter()
            .map(|column| {
                let value = row.record.value(column.key());
                let cell = Cell::new(column.descriptor.format(value));
                match column.semantic_type {
                    SemanticType::Continuous => cell.set_alignment(CellAlignment::Right),
                    SemanticType::Categorical if !value.is_empty() => {
                        match engine.color_for(column.key(), value) {
                            Some(color) => cell.fg(term_color(color)),
                            None => cell,
                        }
                    }
                    _ => cell,
                }
            })
            .collect();
        table.add_row(cells);
    }

    table
}

/// One line per resolved column with its type and header summary
pub fn columns_table(engine: &mut TableEngine) -> Table {
    let headers = engine.header();

    let mut table = new_table();
    table.set_header(vec!["Column", "Label", "Type", "Inferred", "Summary"]);
    for header in &headers {
        let inferred = engine
            .column(&header.key)
            .map(|column| column.inferred)
            .unwrap_or(false);
        table.add_row(vec![
            Cell::new(&header.key),
            Cell::new(&header.label),
            Cell::new(header.semantic_type),
            Cell::new(if inferred { "yes" } else { "no" }),
            Cell::new(summary_text(header)),
        ]);
    }
    table
}

fn summary_text(header: &ColumnHeader) -> String {
    match &header.summary {
        ColumnSummary::Text { needle } => needle
            .as_ref()
            .map(|needle| format!("contains {:?}", needle))
            .unwrap_or_default(),
        ColumnSummary::StackedBar { segments, total } => {
            let parts = segments
                .iter()
                .map(|segment| {
                    let label = if segment.value.is_empty() {
                        "(empty)"
                    } else {
                        segment.value.as_str()
                    };
                    format!("{} {}", label, segment.count)
                })
                .join(", ");
            format!("{} of {}", parts, total)
        }
        ColumnSummary::Histogram(histogram) => match (histogram.min, histogram.max) {
            (Some(min), Some(max)) => {
                format!("{}..{}, {} missing", min, max, histogram.missing)
            }
            _ => format!("no numbers, {} missing", histogram.missing),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depgrid_core::{Row, Value};
    use depgrid_table::EngineSettings;

    fn plain(mut table: Table) -> String {
        table.set_content_arrangement(ContentArrangement::Disabled);
        table.to_string()
    }

    fn engine() -> TableEngine {
        let mut engine =
            TableEngine::new(EngineSettings::default().with_id_column("id")).unwrap();
        engine.set_data(vec![
            Row::new().with("id", "ACH-1").with("lineage", "lung").with("auc", 0.25),
            Row::new().with("id", "ACH-2").with("lineage", "lung").with("auc", Value::Null),
            Row::new().with("id", "ACH-3").with("lineage", "skin").with("auc", 0.75),
        ]);
        engine
    }

    #[test]
    fn test_view_table_respects_limit_and_hidden() {
        let mut engine = engine();
        engine.hide_column("lineage");
        let text = plain(view_table(&mut engine, Some(2)));

        assert!(text.contains("ACH-1"));
        assert!(text.contains("ACH-2"));
        assert!(!text.contains("ACH-3"));
        assert!(!text.contains("lung"));
        assert!(text.contains("continuous"));
    }

    #[test]
    fn test_columns_table_summaries() {
        let mut engine = engine();
        let text = plain(columns_table(&mut engine));

        assert!(text.contains("categorical"));
        assert!(text.contains("lung 2, skin 1 of 3"));
        assert!(text.contains("0.25..0.75, 1 missing"));
    }
}
