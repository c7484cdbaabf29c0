//! View derivation: decorate, filter, sort
//!
//! `derive_view` is a pure function of its inputs. The engine calls it after
//! every mutation and keeps the result.

use std::collections::HashSet;

use serde::Serialize;

use depgrid_core::{Row, RowId, Value};
use depgrid_interchange::ExtractRow;

use crate::columns::{ResolvedColumn, SELECTION_COLUMN};
use crate::filter::FilterSet;
use crate::selection::SelectionTracker;
use crate::settings::EngineSettings;
use crate::sorting::{SortSpec, sort_rows};

/// A row as handed to a renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRow {
    pub id: RowId,
    /// Position in the source dataset, `None` for the placeholder
    pub index: Option<usize>,
    /// Copy of the source record, plus the selection flag when enabled
    pub record: Row,
    pub selected: bool,
}

impl ViewRow {
    pub fn is_placeholder(&self) -> bool {
        self.id.is_placeholder()
    }
}

impl ExtractRow for ViewRow {
    fn record(&self) -> &Row {
        &self.record
    }

    fn is_placeholder(&self) -> bool {
        self.id.is_placeholder()
    }
}

/// The derived, render-ready row collection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct View {
    pub rows: Vec<ViewRow>,
    /// Whether `rows` holds only the placeholder because nothing matched
    pub placeholder: bool,
    /// Number of rows in the source dataset
    pub total_rows: usize,
}

impl View {
    /// Rows that came from the dataset (never the placeholder)
    pub fn data_rows(&self) -> impl Iterator<Item = &ViewRow> {
        self.rows.iter().filter(|row| !row.is_placeholder())
    }

    /// Ids of visible rows, in view order
    pub fn visible_ids(&self) -> Vec<RowId> {
        self.data_rows().map(|row| row.id.clone()).collect()
    }

    /// Number of rows left after filtering
    pub fn visible_count(&self) -> usize {
        if self.placeholder { 0 } else { self.rows.len() }
    }
}

/// Resolve the id of every row
///
/// The id is the stringified value of `id_column`. Rows with no usable value,
/// or whose value was already taken by an earlier row, fall back to their
/// position.
pub fn resolve_ids(rows: &[Row], id_column: Option<&str>) -> Vec<RowId> {
    let Some(id_column) = id_column else {
        return (0..rows.len()).map(RowId::Position).collect();
    };

    let mut seen: HashSet<String> = HashSet::with_capacity(rows.len());
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let value = row.value(id_column);
            if value.is_empty() {
                tracing::debug!("Row {} has no {}; using its position", index, id_column);
                return RowId::Position(index);
            }
            let key = value.to_text().into_owned();
            if !seen.insert(key.clone()) {
                tracing::debug!("Row {} repeats id {}; using its position", index, key);
                return RowId::Position(index);
            }
            RowId::Key(key)
        })
        .collect()
}

/// Decorate, filter and sort `rows` into a view
pub fn derive_view(
    rows: &[Row],
    columns: &[ResolvedColumn],
    filters: &FilterSet,
    sort: &SortSpec,
    selection: &SelectionTracker,
    settings: &EngineSettings,
) -> View {
    let ids = resolve_ids(rows, settings.id_column.as_deref());

    let decorated: Vec<ViewRow> = rows
        .iter()
        .zip(ids)
        .enumerate()
        .map(|(index, (row, id))| {
            let selected = settings.selection_enabled && selection.is_selected(&id);
            let mut record = row.clone();
            if settings.selection_enabled {
                record.insert(SELECTION_COLUMN, selected);
            }
            ViewRow {
                id,
                index: Some(index),
                record,
                selected,
            }
        })
        .collect();

    let known: HashSet<&str> = columns.iter().map(|c| c.key()).collect();
    let mut visible = filters.apply(decorated, |row| &row.record, &|key| known.contains(key));
    sort_rows(&mut visible, sort, |row| &row.record, |row| &row.id);

    tracing::debug!(
        total = rows.len(),
        visible = visible.len(),
        sort = %sort.describe(),
        "Derived view"
    );

    if visible.is_empty() {
        return View {
            rows: vec![placeholder_row(columns)],
            placeholder: true,
            total_rows: rows.len(),
        };
    }

    View {
        rows: visible,
        placeholder: false,
        total_rows: rows.len(),
    }
}

/// The row shown when nothing matches: every column null
fn placeholder_row(columns: &[ResolvedColumn]) -> ViewRow {
    ViewRow {
        id: RowId::Placeholder,
        index: None,
        record: columns
            .iter()
            .map(|column| (column.key().to_string(), Value::Null))
            .collect(),
        selected: false,
    }
}
