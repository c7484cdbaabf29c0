//! Command-line filter and sort syntax
//!
//! ```text
//! name~hel          character: case-insensitive substring
//! lineage=lung|skin categorical: one of the listed values
//! auc:0.1..0.5      continuous: inclusive range, either bound may be omitted
//! auc:..0.5!        same, trailing `!` drops empty cells
//! auc / auc:desc    sort column and direction
//! ```

use anyhow::{Context, Result, bail};

use depgrid_table::{ColumnFilter, SortDirection};

/// Parse `--filter` into a column key and filter
pub fn parse_filter(spec: &str) -> Result<(String, ColumnFilter)> {
    let Some(at) = spec.find(['~', '=', ':']) else {
        bail!("Filter {:?} needs one of `~`, `=` or `:` after the column", spec);
    };
    let (column, rest) = spec.split_at(at);
    let column = column.trim();
    if column.is_empty() {
        bail!("Filter {:?} has no column", spec);
    }
    let operand = &rest[1..];

    let filter = match &rest[..1] {
        "~" => ColumnFilter::character(operand),
        "=" => ColumnFilter::categorical(operand.split('|').map(str::trim)),
        _ => parse_range(operand).with_context(|| format!("Invalid range filter {:?}", spec))?,
    };
    Ok((column.to_string(), filter))
}

fn parse_range(operand: &str) -> Result<ColumnFilter> {
    let (operand, exclude_nulls) = match operand.strip_suffix('!') {
        Some(operand) => (operand, true),
        None => (operand, false),
    };
    let Some((min, max)) = operand.split_once("..") else {
        bail!("Expected `min..max`");
    };

    let min = parse_bound(min, f64::NEG_INFINITY)?;
    let max = parse_bound(max, f64::INFINITY)?;
    let filter = ColumnFilter::range(min, max);
    Ok(if exclude_nulls {
        filter.excluding_nulls()
    } else {
        filter
    })
}

fn parse_bound(text: &str, unbounded: f64) -> Result<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(unbounded);
    }
    text.parse::<f64>()
        .with_context(|| format!("{:?} is not a number", text))
}

/// Parse `--sort` into a column key and direction
pub fn parse_sort(spec: &str) -> Result<(String, SortDirection)> {
    let (column, direction) = match spec.rsplit_once(':') {
        Some((column, "asc")) => (column, SortDirection::Ascending),
        Some((column, "desc")) => (column, SortDirection::Descending),
        Some((_, other)) => bail!("Unknown sort direction {:?}, use asc or desc", other),
        None => (spec, SortDirection::Ascending),
    };
    if column.is_empty() {
        bail!("Sort {:?} has no column", spec);
    }
    Ok((column.to_string(), direction))
}
