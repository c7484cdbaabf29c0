//! Engine configuration

use depgrid_core::{Color, DepgridError, Result};
use serde::{Deserialize, Serialize};

use crate::classifier::DEFAULT_CATEGORICAL_THRESHOLD;

/// Default number of histogram bins in continuous column headers
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// Upper bound on `histogram_bins`
pub const MAX_HISTOGRAM_BINS: usize = 1000;

/// Per-table engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Distinct/non-empty ratio below which a text column is categorical
    pub categorical_threshold: f64,
    /// Cap on the number of rows sampled per column when classifying
    pub classification_sample: Option<usize>,
    /// Column whose value identifies a row
    pub id_column: Option<String>,
    /// Categorical palette, reused cyclically
    pub palette: Vec<Color>,
    /// Color of the literal "unknown" category
    pub unknown_color: Color,
    /// Color of empty and null categories
    pub missing_color: Color,
    pub histogram_bins: usize,
    /// Decorate rows with their selection flag
    pub selection_enabled: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            categorical_threshold: DEFAULT_CATEGORICAL_THRESHOLD,
            classification_sample: None,
            id_column: None,
            palette: default_palette(),
            unknown_color: Color::rgb(0xa0, 0xa0, 0xa0),
            missing_color: Color::rgb(0xdc, 0xdc, 0xdc),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            selection_enabled: true,
        }
    }
}

impl EngineSettings {
    pub fn with_id_column(mut self, column: impl Into<String>) -> Self {
        self.id_column = Some(column.into());
        self
    }

    pub fn with_selection(mut self, enabled: bool) -> Self {
        self.selection_enabled = enabled;
        self
    }

    /// Reject settings the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(self.categorical_threshold > 0.0 && self.categorical_threshold <= 1.0) {
            return Err(DepgridError::Configuration(format!(
                "categorical_threshold must be in (0, 1], got {}",
                self.categorical_threshold
            )));
        }
        if self.palette.is_empty() {
            return Err(DepgridError::Configuration(
                "palette must contain at least one color".to_string(),
            ));
        }
        if !(1..=MAX_HISTOGRAM_BINS).contains(&self.histogram_bins) {
            return Err(DepgridError::Configuration(format!(
                "histogram_bins must be between 1 and {}, got {}",
                MAX_HISTOGRAM_BINS, self.histogram_bins
            )));
        }
        if self.classification_sample == Some(0) {
            return Err(DepgridError::Configuration(
                "classification_sample must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Ten-color categorical palette
pub fn default_palette() -> Vec<Color> {
    vec![
        Color::rgb(0x1f, 0x77, 0xb4),
        Color::rgb(0xff, 0x7f, 0x0e),
        Color::rgb(0x2c, 0xa0, 0x2c),
        Color::rgb(0xd6, 0x27, 0x28),
        Color::rgb(0x94, 0x67, 0xbd),
        Color::rgb(0x8c, 0x56, 0x4b),
        Color::rgb(0xe3, 0x77, 0xc2),
        Color::rgb(0x7f, 0x7f, 0x7f),
        Color::rgb(0xbc, 0xbd, 0x22),
        Color::rgb(0x17, 0xbe, 0xcf),
    ]
}
