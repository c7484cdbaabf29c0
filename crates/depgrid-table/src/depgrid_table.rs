//! depgrid table engine
//!
//! The state machine behind an interactive data table: column inference,
//! categorical colors, per-column filters, sorting, row selection and the
//! derived view that a renderer draws.
//!
//! # Architecture
//!
//! ```text
//! rows + column descriptors
//!        ↓
//!   resolve_columns (classify undeclared columns)
//!        ↓
//!   derive_view: decorate → filter → sort → (placeholder if empty)
//!        ↓
//!   View / ColumnHeader → renderer, to_extract → CSV / TSV
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let mut engine = TableEngine::new(EngineSettings::default().with_id_column("depmap_id"))?;
//! engine.set_data(rows);
//! engine.set_filter("lineage", Some(ColumnFilter::categorical(["lung"])));
//! engine.sort_by("auc", SortDirection::Ascending);
//! let csv = engine.export_extract(false, &ExtractOptions::default())?;
//! ```

mod classifier;
mod colors;
mod columns;
mod engine;
mod filter;
mod pipeline;
mod selection;
mod settings;
pub mod sorting;
mod summary;

pub use classifier::{DEFAULT_CATEGORICAL_THRESHOLD, classify, classify_with};
pub use colors::ColorCache;
pub use columns::{ResolvedColumn, SELECTION_COLUMN, resolve_columns};
pub use engine::{SelectionObserver, TableEngine, VisibleRowsObserver};
pub use filter::{ColumnFilter, FilterSet};
pub use pipeline::{View, ViewRow, derive_view, resolve_ids};
pub use selection::SelectionTracker;
pub use settings::{DEFAULT_HISTOGRAM_BINS, EngineSettings, MAX_HISTOGRAM_BINS, default_palette};
pub use sorting::{CustomOrder, SortDirection, SortSpec, compare_cells, sort_rows};
pub use summary::{CategorySegment, ColumnHeader, ColumnSummary, Histogram, derive_header};

pub use depgrid_interchange::{Delimiter, ExtractOptions};
