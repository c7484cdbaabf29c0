//! CSV ingestion

use depgrid_core::{DepgridError, Result, Row, Value};

use crate::extract::Delimiter;

/// CSV reading options
#[derive(Debug, Clone)]
pub struct CsvReadOptions {
    pub delimiter: Delimiter,
    /// Read numeric and `true`/`false` fields as numbers and booleans
    pub infer_types: bool,
    /// Strip surrounding whitespace from every field
    pub trim: bool,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Comma,
            infer_types: true,
            trim: true,
        }
    }
}

/// Parse CSV text with a header line into rows
///
/// Empty fields become null. Short lines leave their trailing columns
/// missing; fields past the header are dropped.
pub fn read_csv(text: &str, options: &CsvReadOptions) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .trim(if options.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DepgridError::Parse(format!("CSV header: {}", e)))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| DepgridError::Parse(format!("CSV line {}: {}", line + 2, e)))?;
        if record.len() > headers.len() {
            tracing::debug!(
                "CSV line {} has {} fields, header has {}",
                line + 2,
                record.len(),
                headers.len()
            );
        }
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(key, field)| (key.as_str(), parse_field(field, options.infer_types)))
            .collect();
        rows.push(row);
    }

    tracing::debug!(rows = rows.len(), columns = headers.len(), "Read CSV");
    Ok(rows)
}

fn parse_field(field: &str, infer_types: bool) -> Value {
    if field.is_empty() {
        return Value::Null;
    }
    if !infer_types {
        return Value::from(field);
    }
    match field {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    match field.parse::<f64>() {
        Ok(number) if number.is_finite() => Value::Number(number),
        _ => Value::from(field),
    }
}
