//! Column resolution
//!
//! Declared descriptors come first, in declaration order. Keys found in the
//! first row that nobody declared are appended in that row's key order.

use indexmap::IndexMap;

use depgrid_core::{ColumnDescriptor, Row, SemanticType};

use crate::classifier::classify_with;
use crate::settings::EngineSettings;

/// Reserved key of the decorated selection flag
pub const SELECTION_COLUMN: &str = "__selected__";

/// A column with its semantic type settled
#[derive(Debug, Clone)]
pub struct ResolvedColumn {
    pub descriptor: ColumnDescriptor,
    pub semantic_type: SemanticType,
    /// Whether the type was inferred rather than declared
    pub inferred: bool,
}

impl ResolvedColumn {
    pub fn key(&self) -> &str {
        &self.descriptor.key
    }

    pub fn label(&self) -> &str {
        self.descriptor.label()
    }
}

/// Merge declared descriptors with columns discovered in the data
pub fn resolve_columns(
    declared: &[ColumnDescriptor],
    rows: &[Row],
    settings: &EngineSettings,
) -> Vec<ResolvedColumn> {
    let mut descriptors: IndexMap<String, ColumnDescriptor> = IndexMap::new();

    for descriptor in declared {
        if descriptor.key == SELECTION_COLUMN {
            tracing::debug!("Ignoring declaration of reserved column {}", SELECTION_COLUMN);
            continue;
        }
        if descriptors.contains_key(&descriptor.key) {
            tracing::debug!("Ignoring duplicate declaration of column {}", descriptor.key);
            continue;
        }
        descriptors.insert(descriptor.key.clone(), descriptor.clone());
    }

    if let Some(first) = rows.first() {
        for key in first.keys() {
            if key != SELECTION_COLUMN && !descriptors.contains_key(key) {
                descriptors.insert(key.to_string(), ColumnDescriptor::new(key));
            }
        }
    }

    let sample = settings.classification_sample.unwrap_or(rows.len());

    descriptors
        .into_values()
        .map(|descriptor| match descriptor.semantic_type {
            Some(semantic_type) => ResolvedColumn {
                descriptor,
                semantic_type,
                inferred: false,
            },
            None => {
                let values = rows.iter().take(sample).map(|row| row.value(&descriptor.key));
                let semantic_type = classify_with(values, settings.categorical_threshold);
                tracing::debug!(
                    "Inferred column {} as {}",
                    descriptor.key,
                    semantic_type.label()
                );
                ResolvedColumn {
                    descriptor,
                    semantic_type,
                    inferred: true,
                }
            }
        })
        .collect()
}
