//! Categorical color assignment
//!
//! Each categorical column gets its own value to color table. A value keeps
//! the color it was first given for as long as the cache lives, so colors do
//! not move when the view is filtered or re-sorted.

use std::collections::HashMap;

use indexmap::IndexMap;

use depgrid_core::{Color, ColumnDescriptor, Value};

use crate::settings::EngineSettings;

/// Per-column memoized palette assignments
#[derive(Debug, Clone)]
pub struct ColorCache {
    palette: Vec<Color>,
    unknown_color: Color,
    missing_color: Color,
    assigned: HashMap<String, IndexMap<String, Color>>,
}

impl ColorCache {
    pub fn new(palette: Vec<Color>, unknown_color: Color, missing_color: Color) -> Self {
        Self {
            palette,
            unknown_color,
            missing_color,
            assigned: HashMap::new(),
        }
    }

    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self::new(
            settings.palette.clone(),
            settings.unknown_color,
            settings.missing_color,
        )
    }

    /// Color of `value` in `column`, assigning the next palette color on
    /// first sight
    pub fn color_for(&mut self, column: &ColumnDescriptor, value: &Value) -> Color {
        let text = value.to_text();

        if text.eq_ignore_ascii_case("unknown") {
            return self.unknown_color;
        }
        if text.is_empty() || text == "null" {
            return self.missing_color;
        }
        if let Some(color) = column
            .color_map
            .as_ref()
            .and_then(|map| map.get(&*text))
        {
            return *color;
        }
        if self.palette.is_empty() {
            return self.missing_color;
        }

        let map = self.assigned.entry(column.key.clone()).or_default();
        if let Some(color) = map.get(&*text) {
            return *color;
        }
        let color = self.palette[map.len() % self.palette.len()];
        map.insert(text.into_owned(), color);
        color
    }

    /// Assign colors to values in order, without looking at the results
    pub fn prime<'a>(&mut self, column: &ColumnDescriptor, values: impl IntoIterator<Item = &'a Value>) {
        for value in values {
            self.color_for(column, value);
        }
    }

    /// Palette assignments made so far for a column, in first-seen order
    pub fn assigned(&self, column_key: &str) -> Option<&IndexMap<String, Color>> {
        self.assigned.get(column_key)
    }

    /// Forget every assignment
    pub fn clear(&mut self) {
        self.assigned.clear();
    }
}

impl Default for ColorCache {
    fn default() -> Self {
        Self::from_settings(&EngineSettings::default())
    }
}
