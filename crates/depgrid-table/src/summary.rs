//! Header summaries shown above each column
//!
//! Summaries are computed over the filtered rows so they describe what the
//! user currently sees.

use indexmap::IndexMap;
use serde::Serialize;

use depgrid_core::{Color, Row, SemanticType, Value};

use crate::colors::ColorCache;
use crate::columns::ResolvedColumn;
use crate::filter::{ColumnFilter, FilterSet};

/// One category of a stacked bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySegment {
    pub value: String,
    pub count: usize,
    pub color: Color,
}

/// Value distribution of a continuous column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Smallest value, `None` when the column has no numbers
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Equal-width bin counts from `min` to `max`
    pub counts: Vec<usize>,
    /// Cells that are empty or not numeric
    pub missing: usize,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width buckets
    ///
    /// When every value is the same they all land in the first bucket.
    pub fn build(values: impl IntoIterator<Item = Option<f64>>, bins: usize) -> Self {
        let bins = bins.max(1);
        let mut missing = 0;
        let numbers: Vec<f64> = values
            .into_iter()
            .filter_map(|v| match v {
                Some(v) if v.is_finite() => Some(v),
                _ => {
                    missing += 1;
                    None
                }
            })
            .collect();

        let mut counts = vec![0; bins];
        let (Some(min), Some(max)) = (
            numbers.iter().copied().reduce(f64::min),
            numbers.iter().copied().reduce(f64::max),
        ) else {
            return Self {
                min: None,
                max: None,
                counts,
                missing,
            };
        };

        let width = (max - min) / bins as f64;
        for value in numbers {
            let index = if width > 0.0 {
                (((value - min) / width).floor() as usize).min(bins - 1)
            } else {
                0
            };
            counts[index] += 1;
        }

        Self {
            min: Some(min),
            max: Some(max),
            counts,
            missing,
        }
    }

    /// Number of values that went into the bins
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Mini-visualization data for a column header
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSummary {
    /// Character columns show their text filter input
    Text { needle: Option<String> },
    /// Categorical columns show category counts in first-seen order
    StackedBar {
        segments: Vec<CategorySegment>,
        total: usize,
    },
    Histogram(Histogram),
}

/// Everything a renderer needs to draw one column header
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnHeader {
    pub key: String,
    pub label: String,
    pub semantic_type: SemanticType,
    pub filter_active: bool,
    pub summary: ColumnSummary,
    pub help_text: Option<String>,
    pub width: Option<u32>,
}

/// Derive the frozen header row from the filtered rows
pub fn derive_header<'a>(
    rows: impl IntoIterator<Item = &'a Row> + Clone,
    columns: &[ResolvedColumn],
    filters: &FilterSet,
    colors: &mut ColorCache,
    histogram_bins: usize,
) -> Vec<ColumnHeader> {
    columns
        .iter()
        .map(|column| {
            let key = column.key();
            let summary = match column.semantic_type {
                SemanticType::Character => ColumnSummary::Text {
                    needle: match filters.get(key) {
                        Some(ColumnFilter::Character { needle }) => Some(needle.clone()),
                        _ => None,
                    },
                },
                SemanticType::Categorical => stacked_bar(rows.clone(), column, colors),
                SemanticType::Continuous => ColumnSummary::Histogram(Histogram::build(
                    rows.clone().into_iter().map(|row| row.value(key).as_f64()),
                    histogram_bins,
                )),
            };

            ColumnHeader {
                key: key.to_string(),
                label: column.label().to_string(),
                semantic_type: column.semantic_type,
                filter_active: filters.is_active(key),
                summary,
                help_text: column.descriptor.help_text.clone(),
                width: column.descriptor.width,
            }
        })
        .collect()
}

fn stacked_bar<'a>(
    rows: impl IntoIterator<Item = &'a Row>,
    column: &ResolvedColumn,
    colors: &mut ColorCache,
) -> ColumnSummary {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    let mut total = 0;
    for row in rows {
        *counts
            .entry(row.value(column.key()).to_text().into_owned())
            .or_default() += 1;
        total += 1;
    }

    let segments = counts
        .into_iter()
        .map(|(value, count)| CategorySegment {
            color: colors.color_for(&column.descriptor, &Value::from(value.as_str())),
            value,
            count,
        })
        .collect();

    ColumnSummary::StackedBar { segments, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::resolve_columns;
    use crate::settings::{EngineSettings, default_palette};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_histogram_bins() {
        let values = [0.0, 1.0, 2.5, 5.0, 9.9, 10.0].map(Some);
        let histogram = Histogram::build(values, 2);
        assert_eq!(histogram.min, Some(0.0));
        assert_eq!(histogram.max, Some(10.0));
        assert_eq!(histogram.counts, vec![3, 3]);
        assert_eq!(histogram.missing, 0);
    }

    #[test]
    fn test_histogram_constant_and_missing() {
        let histogram = Histogram::build([Some(4.0), None, Some(4.0), Some(f64::NAN)], 3);
        assert_eq!(histogram.counts, vec![2, 0, 0]);
        assert_eq!(histogram.missing, 2);
        assert_eq!(histogram.total(), 2);
    }

    #[test]
    fn test_histogram_without_numbers() {
        let histogram = Histogram::build([None, None], 4);
        assert_eq!(histogram.min, None);
        assert_eq!(histogram.counts, vec![0, 0, 0, 0]);
        assert_eq!(histogram.missing, 2);
    }

    #[test]
    fn test_header_summaries_by_type() {
        let rows = vec![
            Row::new().with("name", "HeLa").with("lineage", "cervix").with("auc", 0.2),
            Row::new().with("name", "A549").with("lineage", "lung").with("auc", 0.8),
            Row::new().with("name", "SiHa").with("lineage", "cervix").with("auc", Value::Null),
        ];
        let declared = vec![
            depgrid_core::ColumnDescriptor::new("lineage")
                .with_type(SemanticType::Categorical)
                .with_help_text("Tissue of origin"),
        ];
        let columns = resolve_columns(&declared, &rows, &EngineSettings::default());
        let mut filters = FilterSet::new();
        filters.set("name", Some(ColumnFilter::character("a")));
        let mut colors = ColorCache::default();
        let palette = default_palette();

        let header = derive_header(&rows, &columns, &filters, &mut colors, 2);

        assert_eq!(header.len(), 3);
        assert_eq!(header[0].key, "lineage");
        assert_eq!(header[0].help_text.as_deref(), Some("Tissue of origin"));
        assert_eq!(
            header[0].summary,
            ColumnSummary::StackedBar {
                segments: vec![
                    CategorySegment {
                        value: "cervix".to_string(),
                        count: 2,
                        color: palette[0],
                    },
                    CategorySegment {
                        value: "lung".to_string(),
                        count: 1,
                        color: palette[1],
                    },
                ],
                total: 3,
            }
        );
        assert_eq!(header[1].key, "name");
        assert!(header[1].filter_active);
        assert_eq!(
            header[1].summary,
            ColumnSummary::Text {
                needle: Some("a".to_string())
            }
        );
        assert!(!header[2].filter_active);
        match &header[2].summary {
            ColumnSummary::Histogram(histogram) => {
                assert_eq!(histogram.counts, vec![1, 1]);
                assert_eq!(histogram.missing, 1);
            }
            other => panic!("expected histogram, got {:?}", other),
        }
    }
}
