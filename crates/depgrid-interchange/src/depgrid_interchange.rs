//! depgrid interchange: rows in, extracts out
//!
//! Turns CSV and JSON text into `Row`s for the table engine, and writes row
//! collections back out as delimited extracts.
//!
//! ```text
//! CSV / JSON text → read_csv / rows_from_json → Vec<Row> → engine
//! engine view → to_extract → CSV / TSV text
//! ```

mod csv_import;
mod extract;
mod json_rows;

pub use csv_import::{CsvReadOptions, read_csv};
pub use extract::{Delimiter, ExtractOptions, ExtractRow, to_extract};
pub use json_rows::{rows_from_json, rows_to_json};
