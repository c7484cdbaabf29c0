//! Rows and row identifiers

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Value;

static NULL: Value = Value::Null;

/// A flat record: column key to value, in insertion order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    values: IndexMap<String, Value>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a value by column key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Get a value by column key, treating a missing key as NULL
    pub fn value(&self, key: &str) -> &Value {
        self.values.get(key).unwrap_or(&NULL)
    }

    /// Insert or replace a value, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Column keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Stable identifier of a row within a table instance
///
/// Rows are keyed by the stringified value of the designated id column.
/// Rows without one fall back to their position in the dataset; the separate
/// variant keeps positional ids from ever colliding with real keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowId {
    /// Value of the id column
    Key(String),
    /// Position in the source dataset
    Position(usize),
    /// The synthetic row shown when every row is filtered out
    Placeholder,
}

impl RowId {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, RowId::Placeholder)
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowId::Key(key) => write!(f, "{}", key),
            RowId::Position(index) => write!(f, "{}", index),
            RowId::Placeholder => Ok(()),
        }
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        RowId::Key(value.to_string())
    }
}

impl From<String> for RowId {
    fn from(value: String) -> Self {
        RowId::Key(value)
    }
}
