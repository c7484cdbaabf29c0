//! Column type inference
//!
//! A column is continuous when its first non-empty value is a number. Text
//! columns are categorical when their values repeat enough: the ratio of
//! distinct to non-empty values must fall below the threshold.

use std::collections::HashSet;

use depgrid_core::{SemanticType, Value};

/// Distinct/non-empty ratio below which a text column is categorical
pub const DEFAULT_CATEGORICAL_THRESHOLD: f64 = 0.95;

/// Classify a column with the default threshold
pub fn classify<'a>(values: impl IntoIterator<Item = &'a Value>) -> SemanticType {
    classify_with(values, DEFAULT_CATEGORICAL_THRESHOLD)
}

/// Classify a column with an explicit threshold
pub fn classify_with<'a>(
    values: impl IntoIterator<Item = &'a Value>,
    threshold: f64,
) -> SemanticType {
    let mut non_empty = 0usize;
    let mut distinct: HashSet<std::borrow::Cow<'a, str>> = HashSet::new();

    for value in values.into_iter().filter(|v| !v.is_empty()) {
        if non_empty == 0 && value.is_number() {
            return SemanticType::Continuous;
        }
        non_empty += 1;
        distinct.insert(value.to_text());
    }

    if non_empty == 0 {
        return SemanticType::Character;
    }

    let ratio = distinct.len() as f64 / non_empty as f64;
    if ratio < threshold {
        SemanticType::Categorical
    } else {
        SemanticType::Character
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(values: &[&str]) -> Vec<Value> {
        values.iter().map(|v| Value::from(*v)).collect()
    }

    #[test]
    fn test_nineteen_of_twenty_distinct_is_character() {
        let mut values: Vec<Value> = (0..19).map(|i| Value::from(format!("line-{i}"))).collect();
        values.push(Value::from("line-0"));
        assert_eq!(classify(&values), SemanticType::Character);
    }

    #[test]
    fn test_ten_of_twenty_distinct_is_categorical() {
        let values: Vec<Value> = (0..20)
            .map(|i| Value::from(format!("lineage-{}", i % 10)))
            .collect();
        assert_eq!(classify(&values), SemanticType::Categorical);
    }

    #[test]
    fn test_numeric_first_value_is_continuous() {
        let values = vec![Value::Null, Value::from(""), Value::from(1.5), Value::from("n/a")];
        assert_eq!(classify(&values), SemanticType::Continuous);
    }

    #[test]
    fn test_numeric_strings_stay_textual() {
        let values = strings(&["1", "1", "2", "2"]);
        assert_eq!(classify(&values), SemanticType::Categorical);
    }

    #[test]
    fn test_empty_column_is_character() {
        assert_eq!(classify(&Vec::new()), SemanticType::Character);
        assert_eq!(
            classify(&[Value::Null, Value::from("")]),
            SemanticType::Character
        );
    }

    #[test]
    fn test_all_unique_is_character() {
        let values = strings(&["a", "b", "c"]);
        assert_eq!(classify(&values), SemanticType::Character);
    }

    #[test]
    fn test_threshold_is_overridable() {
        let values = strings(&["a", "b", "c", "a"]);
        assert_eq!(classify(&values), SemanticType::Categorical);
        assert_eq!(classify_with(&values, 0.5), SemanticType::Character);
    }
}
