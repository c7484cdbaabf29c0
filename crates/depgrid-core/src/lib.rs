//! depgrid Core - shared types for the tabular data engine
//!
//! This crate provides the fundamental types every other depgrid crate
//! depends on:
//!
//! - `Value` - a single cell value (string, number, boolean or null)
//! - `Row` / `RowId` - an insertion-ordered record and its resolved identity
//! - `ColumnDescriptor` / `SemanticType` - caller-supplied column metadata
//! - `Color` - display colors for categorical values
//! - `DepgridError` - the shared error type

mod color;
mod column;
mod error;
mod row;
mod types;

pub use color::*;
pub use column::*;
pub use error::*;
pub use row::*;
pub use types::*;
