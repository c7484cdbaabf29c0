//! The table engine
//!
//! `TableEngine` owns everything one table needs: the dataset, column
//! descriptors, filters, sort, selection and color assignments. Every
//! mutating call re-derives the view before returning and then notifies
//! observers.

use std::collections::{BTreeSet, HashSet};

use depgrid_core::{Color, ColumnDescriptor, Result, Row, RowId, SemanticType, Value};
use depgrid_interchange::{ExtractOptions, to_extract};

use crate::colors::ColorCache;
use crate::columns::{ResolvedColumn, resolve_columns};
use crate::filter::{ColumnFilter, FilterSet};
use crate::pipeline::{View, derive_view, resolve_ids};
use crate::selection::SelectionTracker;
use crate::settings::EngineSettings;
use crate::sorting::{CustomOrder, SortDirection, SortSpec};
use crate::summary::{ColumnHeader, derive_header};

/// Called with the visible row ids whenever their order or membership changes
pub type VisibleRowsObserver = Box<dyn FnMut(&[RowId])>;

/// Called with every selected id after each selection change
pub type SelectionObserver = Box<dyn FnMut(&BTreeSet<RowId>)>;

pub struct TableEngine {
    settings: EngineSettings,
    declared: Vec<ColumnDescriptor>,
    columns: Vec<ResolvedColumn>,
    hidden: HashSet<String>,
    rows: Vec<Row>,
    /// Ids resolved for the current dataset
    present: HashSet<RowId>,
    filters: FilterSet,
    sort: SortSpec,
    /// Spec to restore on thaw while the order is frozen
    frozen_from: Option<SortSpec>,
    selection: SelectionTracker,
    colors: ColorCache,
    view: View,
    last_visible: Vec<RowId>,
    visible_observers: Vec<VisibleRowsObserver>,
    selection_observers: Vec<SelectionObserver>,
}

impl TableEngine {
    /// Create an engine with validated settings
    pub fn new(settings: EngineSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::with_settings(settings))
    }

    fn with_settings(settings: EngineSettings) -> Self {
        let colors = ColorCache::from_settings(&settings);
        Self {
            settings,
            declared: Vec::new(),
            columns: Vec::new(),
            hidden: HashSet::new(),
            rows: Vec::new(),
            present: HashSet::new(),
            filters: FilterSet::new(),
            sort: SortSpec::Unsorted,
            frozen_from: None,
            selection: SelectionTracker::new(),
            colors,
            view: View::default(),
            last_visible: Vec::new(),
            visible_observers: Vec::new(),
            selection_observers: Vec::new(),
        }
    }

    // Observers

    pub fn on_visible_rows_changed(&mut self, observer: impl FnMut(&[RowId]) + 'static) {
        self.visible_observers.push(Box::new(observer));
    }

    pub fn on_selection_changed(&mut self, observer: impl FnMut(&BTreeSet<RowId>) + 'static) {
        self.selection_observers.push(Box::new(observer));
    }

    // Data and columns

    /// Replace the dataset
    ///
    /// Filters, sort and selection carry over. Those that refer to columns or
    /// ids missing from the new data have no effect until they reappear.
    pub fn set_data(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.present = resolve_ids(&self.rows, self.settings.id_column.as_deref())
            .into_iter()
            .collect();
        tracing::debug!(rows = self.rows.len(), "Dataset replaced");
        self.resolve();
        self.refresh();
    }

    /// Replace the column descriptors
    pub fn set_columns(&mut self, columns: Vec<ColumnDescriptor>) {
        self.declared = columns;
        self.resolve();
        self.prune_filters();
        self.refresh();
    }

    pub fn hide_column(&mut self, key: &str) {
        if self.hidden.insert(key.to_string()) {
            self.prune_filters();
            self.refresh();
        }
    }

    pub fn show_column(&mut self, key: &str) {
        if self.hidden.remove(key) {
            self.refresh();
        }
    }

    pub fn is_hidden(&self, key: &str) -> bool {
        self.hidden.contains(key)
    }

    /// All resolved columns, hidden ones included
    pub fn columns(&self) -> &[ResolvedColumn] {
        &self.columns
    }

    /// Resolved columns that are not hidden
    pub fn visible_columns(&self) -> impl Iterator<Item = &ResolvedColumn> {
        self.columns.iter().filter(|c| !self.hidden.contains(c.key()))
    }

    pub fn column(&self, key: &str) -> Option<&ResolvedColumn> {
        self.columns.iter().find(|c| c.key() == key)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    // Filtering

    /// Set or clear the filter on a column
    pub fn set_filter(&mut self, column: &str, filter: Option<ColumnFilter>) {
        if let (Some(filter), Some(resolved)) = (&filter, self.column(column)) {
            if resolved.semantic_type != filter.semantic_type() {
                tracing::debug!(
                    "{} filter on {} column {}",
                    filter.semantic_type().label(),
                    resolved.semantic_type.label(),
                    column
                );
            }
        }
        self.filters.set(column, filter);
        self.refresh();
    }

    pub fn clear_filters(&mut self) {
        if !self.filters.is_empty() {
            self.filters.clear();
            self.refresh();
        }
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    // Sorting

    /// Replace the sort, ending any frozen order
    pub fn set_sort(&mut self, spec: SortSpec) {
        if self.frozen_from.take().is_some() {
            tracing::debug!("Explicit sort discards frozen order");
        }
        self.sort = spec;
        self.refresh();
    }

    pub fn sort_by(&mut self, key: &str, direction: SortDirection) {
        self.set_sort(SortSpec::column(key, direction));
    }

    pub fn clear_sort(&mut self) {
        self.set_sort(SortSpec::Unsorted);
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    /// Pin the current visible order
    ///
    /// Rows keep their positions until `thaw_order` or an explicit sort.
    /// Rows that were not visible when frozen go after the pinned ones.
    pub fn freeze_order(&mut self) {
        let order = CustomOrder::from_ids(&self.last_visible);
        let previous = std::mem::replace(&mut self.sort, SortSpec::Custom(order));
        if self.frozen_from.is_none() {
            self.frozen_from = Some(previous);
        }
        self.refresh();
    }

    /// Restore the sort that was active before `freeze_order`
    pub fn thaw_order(&mut self) {
        if let Some(previous) = self.frozen_from.take() {
            self.sort = previous;
            self.refresh();
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen_from.is_some()
    }

    // Selection

    /// Click a row checkbox, with shift held or not
    ///
    /// Ids that are not in the dataset are ignored.
    pub fn toggle_selection(&mut self, id: &RowId, shift_held: bool) {
        if !self.present.contains(id) {
            tracing::debug!("Ignoring toggle of unknown row {}", id);
            return;
        }
        if self.selection.toggle(id, shift_held, &self.last_visible) {
            self.selection_changed();
        }
    }

    pub fn select_all_visible(&mut self) {
        self.selection.select_all(&self.last_visible);
        self.selection_changed();
    }

    pub fn deselect_all_visible(&mut self) {
        self.selection.deselect_all(&self.last_visible);
        self.selection_changed();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.selection_changed();
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.present.contains(id) && self.selection.is_selected(id)
    }

    /// State of the "select all" checkbox
    pub fn all_visible_selected(&self) -> bool {
        self.selection.all_selected(&self.last_visible)
    }

    /// Selected ids that belong to the current dataset
    pub fn selected_ids(&self) -> BTreeSet<RowId> {
        self.selection
            .selected_ids()
            .into_iter()
            .filter(|id| self.present.contains(id))
            .collect()
    }

    fn selection_changed(&mut self) {
        self.refresh();
        let snapshot = self.selected_ids();
        tracing::trace!(selected = snapshot.len(), "Selection changed");
        for observer in &mut self.selection_observers {
            observer(&snapshot);
        }
    }

    // View

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Visible row ids in view order
    pub fn visible_ids(&self) -> &[RowId] {
        &self.last_visible
    }

    /// Header summaries of the visible columns over the filtered rows
    pub fn header(&mut self) -> Vec<ColumnHeader> {
        let columns: Vec<ResolvedColumn> = self.visible_columns().cloned().collect();
        let records: Vec<&Row> = self.view.data_rows().map(|row| &row.record).collect();
        derive_header(
            records.iter().copied(),
            &columns,
            &self.filters,
            &mut self.colors,
            self.settings.histogram_bins,
        )
    }

    /// Display color of a categorical value, `None` for unknown columns
    pub fn color_for(&mut self, column: &str, value: &Value) -> Option<Color> {
        let descriptor = &self.columns.iter().find(|c| c.key() == column)?.descriptor;
        Some(self.colors.color_for(descriptor, value))
    }

    // Export

    /// Extract of the current view: filtered, sorted, hidden columns dropped
    /// unless `include_hidden`
    pub fn export_extract(&self, include_hidden: bool, options: &ExtractOptions) -> Result<String> {
        to_extract(
            &self.view.rows,
            &self.column_descriptors(),
            &self.hidden,
            include_hidden,
            self.settings.id_column.as_deref(),
            options,
        )
    }

    /// Extract of every row in source order, ignoring filters and sort
    pub fn export_full_extract(
        &self,
        include_hidden: bool,
        options: &ExtractOptions,
    ) -> Result<String> {
        to_extract(
            &self.rows,
            &self.column_descriptors(),
            &self.hidden,
            include_hidden,
            self.settings.id_column.as_deref(),
            options,
        )
    }

    fn column_descriptors(&self) -> Vec<ColumnDescriptor> {
        self.columns.iter().map(|c| c.descriptor.clone()).collect()
    }

    // Internals

    /// Re-resolve columns and assign categorical colors in source order
    fn resolve(&mut self) {
        self.columns = resolve_columns(&self.declared, &self.rows, &self.settings);
        for column in &self.columns {
            if column.semantic_type == SemanticType::Categorical {
                let key = column.key();
                self.colors
                    .prime(&column.descriptor, self.rows.iter().map(|row| row.value(key)));
            }
        }
    }

    /// Drop filters on columns that are gone or hidden
    fn prune_filters(&mut self) {
        let known: HashSet<&str> = self.columns.iter().map(|c| c.key()).collect();
        let hidden = &self.hidden;
        let removed = self
            .filters
            .retain_columns(|key| known.contains(key) && !hidden.contains(key));
        if !removed.is_empty() {
            tracing::debug!("Pruned filters on {:?}", removed);
        }
    }

    fn refresh(&mut self) {
        self.view = derive_view(
            &self.rows,
            &self.columns,
            &self.filters,
            &self.sort,
            &self.selection,
            &self.settings,
        );

        let visible = self.view.visible_ids();
        if visible != self.last_visible {
            self.last_visible = visible;
            for observer in &mut self.visible_observers {
                observer(self.last_visible.as_slice());
            }
        }
    }
}

impl Default for TableEngine {
    fn default() -> Self {
        Self::with_settings(EngineSettings::default())
    }
}
