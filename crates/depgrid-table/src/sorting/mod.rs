//! Row ordering
//!
//! A table is either unsorted, sorted by one column, or held in an explicit
//! id to position order captured from an earlier view.

mod column_sort;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use depgrid_core::RowId;

pub use column_sort::{compare_cells, sort_rows};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Explicit row order keyed by id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomOrder {
    positions: HashMap<RowId, usize>,
}

impl CustomOrder {
    /// Order rows as they appear in `ids`
    pub fn from_ids<'a>(ids: impl IntoIterator<Item = &'a RowId>) -> Self {
        let mut positions = HashMap::new();
        for id in ids {
            let next = positions.len();
            positions.entry(id.clone()).or_insert(next);
        }
        Self { positions }
    }

    pub fn position(&self, id: &RowId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// How the view is ordered
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SortSpec {
    /// Source order
    #[default]
    Unsorted,
    /// By one column's values
    Column {
        key: String,
        direction: SortDirection,
    },
    /// By a captured id order; unknown ids go last
    Custom(CustomOrder),
}

impl SortSpec {
    pub fn column(key: impl Into<String>, direction: SortDirection) -> Self {
        Self::Column {
            key: key.into(),
            direction,
        }
    }

    pub fn ascending(key: impl Into<String>) -> Self {
        Self::column(key, SortDirection::Ascending)
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self::column(key, SortDirection::Descending)
    }

    /// Column and direction of a column sort
    pub fn sort_column(&self) -> Option<(&str, SortDirection)> {
        match self {
            Self::Column { key, direction } => Some((key.as_str(), *direction)),
            _ => None,
        }
    }

    /// Short description for logs
    pub fn describe(&self) -> String {
        match self {
            Self::Unsorted => "unsorted".to_string(),
            Self::Column { key, direction } => format!("{} {}", key, direction.label()),
            Self::Custom(order) => format!("custom ({} ids)", order.len()),
        }
    }
}
