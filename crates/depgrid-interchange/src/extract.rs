//! Delimited text extracts
//!
//! An extract writes the given rows in the given order. Hidden columns are
//! dropped unless asked for, but the id column always survives so every line
//! can be traced back to its row.

use std::collections::HashSet;

use depgrid_core::{ColumnDescriptor, DepgridError, Result, Row};

/// Field delimiter of an extract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
}

impl Delimiter {
    pub fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }

    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Delimiter::Comma => "csv",
            Delimiter::Tab => "tsv",
        }
    }
}

/// Extract formatting options
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub delimiter: Delimiter,
    /// Write a header line with the column names
    pub include_headers: bool,
    /// Use display names instead of keys in the header line
    pub use_display_names: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Comma,
            include_headers: true,
            use_display_names: false,
        }
    }
}

impl ExtractOptions {
    pub fn tsv() -> Self {
        Self {
            delimiter: Delimiter::Tab,
            ..Default::default()
        }
    }
}

/// Anything that can be written as one extract line
pub trait ExtractRow {
    fn record(&self) -> &Row;

    /// Synthetic rows are never written
    fn is_placeholder(&self) -> bool {
        false
    }
}

impl ExtractRow for Row {
    fn record(&self) -> &Row {
        self
    }
}

/// Write `rows` as delimited text
///
/// Cells go through each column's formatter when it has one. Rows are
/// written in iteration order.
pub fn to_extract<'a, R>(
    rows: impl IntoIterator<Item = &'a R>,
    columns: &[ColumnDescriptor],
    hidden: &HashSet<String>,
    include_hidden: bool,
    id_column: Option<&str>,
    options: &ExtractOptions,
) -> Result<String>
where
    R: ExtractRow + 'a,
{
    let exported: Vec<&ColumnDescriptor> = columns
        .iter()
        .filter(|column| {
            include_hidden
                || !hidden.contains(&column.key)
                || id_column == Some(column.key.as_str())
        })
        .collect();

    let mut writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter.as_byte())
        .from_writer(Vec::new());

    if options.include_headers {
        let header = exported.iter().copied().map(|column| {
            if options.use_display_names {
                column.label()
            } else {
                column.key.as_str()
            }
        });
        writer
            .write_record(header)
            .map_err(|e| DepgridError::Export(e.to_string()))?;
    }

    let mut written = 0usize;
    for row in rows.into_iter().filter(|row| !row.is_placeholder()) {
        let record = row.record();
        let fields = exported
            .iter()
            .map(|column| column.format(record.value(&column.key)));
        writer
            .write_record(fields)
            .map_err(|e| DepgridError::Export(e.to_string()))?;
        written += 1;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DepgridError::Export(e.to_string()))?;

    tracing::debug!(
        rows = written,
        columns = exported.len(),
        "Wrote extract"
    );

    String::from_utf8(bytes).map_err(|e| DepgridError::Export(e.to_string()))
}
