//! JSON row arrays
//!
//! The data layer delivers rows as a JSON array of flat objects. Object key
//! order is kept, so the first row decides the order of discovered columns.

use indexmap::IndexMap;

use depgrid_core::{DepgridError, Result, Row, Value};

/// Parse a JSON array of objects into rows
///
/// Nested arrays and objects are kept as their JSON text.
pub fn rows_from_json(text: &str) -> Result<Vec<Row>> {
    let records: Vec<IndexMap<String, serde_json::Value>> = serde_json::from_str(text)
        .map_err(|e| DepgridError::Parse(format!("Expected a JSON array of objects: {}", e)))?;

    Ok(records
        .into_iter()
        .map(|record| {
            record
                .into_iter()
                .map(|(key, value)| (key, Value::from(value)))
                .collect()
        })
        .collect())
}

/// Serialize rows as a pretty-printed JSON array
pub fn rows_to_json(rows: &[Row]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}
