//! Stable sorting by column values or by a custom id order

use std::cmp::Ordering;

use depgrid_core::{Row, RowId, Value};

use super::{SortDirection, SortSpec};

/// Order two cells
///
/// Empty cells (null or "") go after every non-empty cell in both
/// directions. Everything else follows the value's natural order, reversed
/// for descending.
pub fn compare_cells(a: &Value, b: &Value, direction: SortDirection) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = compare_non_empty(a, b);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}

/// Position of a value's type when a column holds several: numbers, then
/// booleans, then strings
fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::Bool(_) => 1,
        Value::String(_) => 2,
        Value::Null => 3,
    }
}

/// Compare two non-empty values of any type
fn compare_non_empty(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Sort items in place by `spec`
///
/// The sort is stable: rows that compare equal keep their relative order.
pub fn sort_rows<T>(
    items: &mut [T],
    spec: &SortSpec,
    row_of: impl Fn(&T) -> &Row,
    id_of: impl Fn(&T) -> &RowId,
) {
    match spec {
        SortSpec::Unsorted => {}
        SortSpec::Column { key, direction } => {
            items.sort_by(|a, b| {
                compare_cells(row_of(a).value(key), row_of(b).value(key), *direction)
            });
        }
        SortSpec::Custom(order) => {
            items.sort_by_key(|item| {
                let position = order.position(id_of(item));
                (position.is_none(), position)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::CustomOrder;
    use pretty_assertions::assert_eq;

    fn row(name: &str, score: impl Into<Value>) -> (RowId, Row) {
        (
            RowId::from(name),
            Row::new().with("name", name).with("score", score),
        )
    }

    fn sorted(mut rows: Vec<(RowId, Row)>, spec: &SortSpec) -> Vec<String> {
        sort_rows(&mut rows, spec, |(_, r)| r, |(id, _)| id);
        rows.into_iter().map(|(id, _)| id.to_string()).collect()
    }

    #[test]
    fn test_numbers_sort_numerically() {
        let rows = vec![row("a", 10.0), row("b", 9.0), row("c", 100.0)];
        assert_eq!(sorted(rows.clone(), &SortSpec::ascending("score")), vec!["b", "a", "c"]);
        assert_eq!(sorted(rows, &SortSpec::descending("score")), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_empty_values_last_in_both_directions() {
        let rows = vec![
            row("a", Value::Null),
            row("b", 2.0),
            row("c", ""),
            row("d", 1.0),
        ];
        assert_eq!(sorted(rows.clone(), &SortSpec::ascending("score")), vec!["d", "b", "a", "c"]);
        assert_eq!(sorted(rows, &SortSpec::descending("score")), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let rows = vec![row("a", "x"), row("b", "y"), row("c", "x"), row("d", "x")];
        assert_eq!(sorted(rows, &SortSpec::ascending("score")), vec!["a", "c", "d", "b"]);
    }

    #[test]
    fn test_booleans_false_first() {
        let rows = vec![row("a", true), row("b", false), row("c", true)];
        assert_eq!(sorted(rows, &SortSpec::ascending("score")), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_mixed_types_group_by_type() {
        let rows = vec![row("a", 10.0), row("b", "9"), row("c", 2.0), row("d", true)];
        assert_eq!(
            sorted(rows.clone(), &SortSpec::ascending("score")),
            vec!["c", "a", "d", "b"]
        );
        assert_eq!(
            sorted(rows, &SortSpec::descending("score")),
            vec!["b", "d", "a", "c"]
        );
    }

    #[test]
    fn test_stray_text_keeps_numeric_order() {
        let rows = vec![
            row("a", 10.0),
            row("b", 9.0),
            row("c", 100.0),
            row("d", "NA"),
            row("e", Value::Null),
        ];
        assert_eq!(
            sorted(rows.clone(), &SortSpec::ascending("score")),
            vec!["b", "a", "c", "d", "e"]
        );
        assert_eq!(
            sorted(rows, &SortSpec::descending("score")),
            vec!["d", "c", "a", "b", "e"]
        );
    }

    #[test]
    fn test_custom_order_puts_unknown_ids_last() {
        let rows = vec![row("a", 1.0), row("b", 2.0), row("c", 3.0), row("d", 4.0)];
        let order = CustomOrder::from_ids(&[RowId::from("c"), RowId::from("a")]);
        assert_eq!(sorted(rows, &SortSpec::Custom(order)), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_unsorted_keeps_source_order() {
        let rows = vec![row("b", 2.0), row("a", 1.0)];
        assert_eq!(sorted(rows, &SortSpec::Unsorted), vec!["b", "a"]);
    }

    #[test]
    fn test_compare_cells_direct() {
        assert_eq!(
            compare_cells(&Value::from("apple"), &Value::from("banana"), SortDirection::Ascending),
            Ordering::Less
        );
        assert_eq!(
            compare_cells(&Value::Null, &Value::from(1.0), SortDirection::Descending),
            Ordering::Greater
        );
    }
}
