//! Per-column row filters

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use depgrid_core::{Row, SemanticType, Value};

/// A predicate over one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColumnFilter {
    /// Case-insensitive substring match on the cell text
    Character { needle: String },
    /// Cell text must be one of the allowed values
    Categorical { allowed: BTreeSet<String> },
    /// Inclusive numeric range
    Continuous {
        min: f64,
        max: f64,
        #[serde(default)]
        exclude_nulls: bool,
    },
}

impl ColumnFilter {
    pub fn character(needle: impl Into<String>) -> Self {
        Self::Character {
            needle: needle.into(),
        }
    }

    pub fn categorical<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Categorical {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn range(min: f64, max: f64) -> Self {
        Self::Continuous {
            min,
            max,
            exclude_nulls: false,
        }
    }

    /// Same range, dropping null cells
    pub fn excluding_nulls(self) -> Self {
        match self {
            Self::Continuous { min, max, .. } => Self::Continuous {
                min,
                max,
                exclude_nulls: true,
            },
            other => other,
        }
    }

    /// Semantic type this filter is meant for
    pub fn semantic_type(&self) -> SemanticType {
        match self {
            Self::Character { .. } => SemanticType::Character,
            Self::Categorical { .. } => SemanticType::Categorical,
            Self::Continuous { .. } => SemanticType::Continuous,
        }
    }

    /// A filter that keeps every row
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Character { needle } if needle.is_empty())
    }

    /// Test one cell
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Character { needle } => value
                .to_text()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Self::Categorical { allowed } => allowed.contains(&*value.to_text()),
            Self::Continuous {
                min,
                max,
                exclude_nulls,
            } => {
                if min > max {
                    return false;
                }
                if value.is_empty() {
                    return !exclude_nulls;
                }
                match value.as_f64() {
                    Some(v) => *min <= v && v <= *max,
                    None => false,
                }
            }
        }
    }
}

/// Active filters, at most one per column, applied in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    filters: IndexMap<String, ColumnFilter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or remove the filter on a column
    ///
    /// An empty character needle removes the filter. Replacing a filter keeps
    /// the column's original position in the application order.
    pub fn set(&mut self, column: impl Into<String>, filter: Option<ColumnFilter>) {
        let column = column.into();
        match filter {
            Some(filter) if !filter.is_noop() => {
                self.filters.insert(column, filter);
            }
            _ => {
                self.filters.shift_remove(&column);
            }
        }
    }

    pub fn get(&self, column: &str) -> Option<&ColumnFilter> {
        self.filters.get(column)
    }

    pub fn is_active(&self, column: &str) -> bool {
        self.filters.contains_key(column)
    }

    /// Columns with a filter, in application order
    pub fn active_columns(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnFilter)> {
        self.filters.iter().map(|(k, f)| (k.as_str(), f))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    /// Drop filters whose column is not accepted by `keep`, returning the
    /// removed column keys
    pub fn retain_columns(&mut self, mut keep: impl FnMut(&str) -> bool) -> Vec<String> {
        let mut removed = Vec::new();
        self.filters.retain(|key, _| {
            let kept = keep(key);
            if !kept {
                removed.push(key.clone());
            }
            kept
        });
        removed
    }

    /// Whether a row passes every filter on a known column
    ///
    /// Filters on columns outside `known_columns` are inert.
    pub fn keep(&self, row: &Row, known_columns: &dyn Fn(&str) -> bool) -> bool {
        self.filters
            .iter()
            .filter(|(key, _)| known_columns(key.as_str()))
            .all(|(key, filter)| filter.matches(row.value(key)))
    }

    /// Keep the items whose row passes, preserving order
    pub fn apply<T>(
        &self,
        items: Vec<T>,
        row_of: impl Fn(&T) -> &Row,
        known_columns: &dyn Fn(&str) -> bool,
    ) -> Vec<T> {
        if self.filters.is_empty() {
            return items;
        }
        items
            .into_iter()
            .filter(|item| self.keep(row_of(item), known_columns))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows() -> Vec<Row> {
        vec![
            Row::new().with("name", "HeLa").with("lineage", "cervix").with("auc", 0.2),
            Row::new().with("name", "A549").with("lineage", "lung").with("auc", 0.8),
            Row::new().with("name", "MCF7").with("lineage", "breast").with("auc", Value::Null),
            Row::new().with("name", "hela-s3").with("lineage", "cervix").with("auc", "0.5"),
        ]
    }

    fn names(rows: &[Row]) -> Vec<String> {
        rows.iter().map(|r| r.value("name").to_string()).collect()
    }

    fn all_known(_: &str) -> bool {
        true
    }

    #[test]
    fn test_character_is_case_insensitive() {
        let mut filters = FilterSet::new();
        filters.set("name", Some(ColumnFilter::character("HELA")));
        let kept = filters.apply(rows(), |r| r, &all_known);
        assert_eq!(names(&kept), vec!["HeLa", "hela-s3"]);
    }

    #[test]
    fn test_empty_needle_removes_filter() {
        let mut filters = FilterSet::new();
        filters.set("name", Some(ColumnFilter::character("x")));
        filters.set("name", Some(ColumnFilter::character("")));
        assert!(filters.is_empty());
    }

    #[test]
    fn test_categorical_membership() {
        let mut filters = FilterSet::new();
        filters.set("lineage", Some(ColumnFilter::categorical(["lung", "breast"])));
        let kept = filters.apply(rows(), |r| r, &all_known);
        assert_eq!(names(&kept), vec!["A549", "MCF7"]);
    }

    #[test]
    fn test_continuous_range_and_nulls() {
        let mut filters = FilterSet::new();
        filters.set("auc", Some(ColumnFilter::range(0.2, 0.5)));
        let kept = filters.apply(rows(), |r| r, &all_known);
        assert_eq!(names(&kept), vec!["HeLa", "MCF7", "hela-s3"]);

        filters.set("auc", Some(ColumnFilter::range(0.2, 0.5).excluding_nulls()));
        let kept = filters.apply(rows(), |r| r, &all_known);
        assert_eq!(names(&kept), vec!["HeLa", "hela-s3"]);
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let mut filters = FilterSet::new();
        filters.set("auc", Some(ColumnFilter::range(1.0, 0.0)));
        assert!(filters.apply(rows(), |r| r, &all_known).is_empty());
    }

    #[test]
    fn test_non_numeric_cells_fail_range() {
        let filter = ColumnFilter::range(0.0, 10.0);
        assert!(!filter.matches(&Value::from("n/a")));
        assert!(filter.matches(&Value::from("3")));
        assert!(filter.matches(&Value::Null));
    }

    #[test]
    fn test_unknown_column_is_inert() {
        let mut filters = FilterSet::new();
        filters.set("missing", Some(ColumnFilter::character("zzz")));
        let kept = filters.apply(rows(), |r| r, &|key: &str| key != "missing");
        assert_eq!(kept.len(), 4);
    }

    #[test]
    fn test_filters_compose_with_and() {
        let mut filters = FilterSet::new();
        filters.set("lineage", Some(ColumnFilter::categorical(["cervix"])));
        filters.set("auc", Some(ColumnFilter::range(0.4, 1.0)));
        let kept = filters.apply(rows(), |r| r, &all_known);
        assert_eq!(names(&kept), vec!["hela-s3"]);
    }

    #[test]
    fn test_retain_columns_reports_removed() {
        let mut filters = FilterSet::new();
        filters.set("name", Some(ColumnFilter::character("a")));
        filters.set("auc", Some(ColumnFilter::range(0.0, 1.0)));
        let removed = filters.retain_columns(|key| key == "auc");
        assert_eq!(removed, vec!["name".to_string()]);
        assert_eq!(filters.active_columns().collect::<Vec<_>>(), vec!["auc"]);
    }

    #[test]
    fn test_filter_serializes_with_kind_tag() {
        let json = serde_json::to_string(&ColumnFilter::range(0.0, 1.0)).unwrap();
        assert_eq!(json, r#"{"kind":"continuous","min":0.0,"max":1.0,"exclude_nulls":false}"#);
    }
}
