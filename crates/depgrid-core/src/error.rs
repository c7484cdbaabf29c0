//! Error types for depgrid

use thiserror::Error;

/// Core error type for depgrid operations
///
/// Engine operations themselves never fail; errors only surface at the
/// boundaries (settings validation, ingestion, extract writing).
#[derive(Error, Debug)]
pub enum DepgridError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid color '{value}': {reason}")]
    InvalidColor { value: String, reason: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for depgrid operations
pub type Result<T> = std::result::Result<T, DepgridError>;
