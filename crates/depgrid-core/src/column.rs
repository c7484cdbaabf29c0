//! Column descriptors

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{Color, Value};

/// Semantic type of a column, driving its filter and header summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    /// Free text, filtered by substring
    Character,
    /// Few distinct values, filtered by set membership
    Categorical,
    /// Numeric, filtered by range
    Continuous,
}

impl SemanticType {
    /// Get display label
    pub fn label(&self) -> &'static str {
        match self {
            SemanticType::Character => "character",
            SemanticType::Categorical => "categorical",
            SemanticType::Continuous => "continuous",
        }
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Renders a cell for display and export
pub type CellFormatter = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Caller-supplied metadata about a column
///
/// Only `key` is required. A missing `semantic_type` is inferred from the data.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub key: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub semantic_type: Option<SemanticType>,
    /// Fixed width in pixels
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(skip)]
    pub formatter: Option<CellFormatter>,
    /// Explicit value to color mapping for categorical columns
    #[serde(default)]
    pub color_map: Option<IndexMap<String, Color>>,
    #[serde(default)]
    pub help_text: Option<String>,
}

impl ColumnDescriptor {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_type(mut self, semantic_type: SemanticType) -> Self {
        self.semantic_type = Some(semantic_type);
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_formatter(
        mut self,
        formatter: impl Fn(&Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Pin a categorical value to a color
    pub fn with_color(mut self, value: impl Into<String>, color: Color) -> Self {
        self.color_map
            .get_or_insert_with(IndexMap::new)
            .insert(value.into(), color);
        self
    }

    pub fn with_help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// Header label: the display name, or the key
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.key)
    }

    /// Cell text, through the custom formatter when one is set
    pub fn format(&self, value: &Value) -> String {
        match &self.formatter {
            Some(formatter) => formatter(value),
            None => value.to_text().into_owned(),
        }
    }
}

impl std::fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("display_name", &self.display_name)
            .field("semantic_type", &self.semantic_type)
            .field("width", &self.width)
            .field("formatter", &self.formatter.as_ref().map(|_| ".."))
            .field("color_map", &self.color_map)
            .field("help_text", &self.help_text)
            .finish()
    }
}
