//! Core table model and scalar value helpers.
//!
//! Tables are ordered sequences of JSON object rows. Input rows are never
//! mutated; every transformation produces fresh records.

use serde::{Deserialize, Serialize};

/// An in-memory table handed to the engine by the caller.
///
/// Rows are JSON objects mapping column names to scalar values. Row order is
/// preserved through every transformation so that deterministic inputs
/// produce deterministic outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableData {
    /// Table name, carried through to result metadata
    pub name: String,
    /// Records in caller-supplied order
    pub rows: Vec<serde_json::Value>,
}

impl TableData {
    /// Creates a table from a name and rows.
    pub fn new(name: impl Into<String>, rows: Vec<serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns column names derived from the first row.
    ///
    /// # Note
    /// Columns that appear exclusively in later rows are not reported. This
    /// is acceptable for tables with consistent schemas, which is what the
    /// engine expects from its callers.
    pub fn column_names(&self) -> Option<Vec<String>> {
        self.rows
            .first()
            .and_then(|row| row.as_object())
            .map(|obj| obj.keys().cloned().collect())
    }
}

/// Stringifies a scalar cell value for grouping and distribution keys.
///
/// Null and missing values map to the empty string, so an absent column
/// still yields a well-defined key. Arrays and objects serialize to their
/// JSON text so that unexpected nesting cannot collapse distinct values.
pub fn scalar_key(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Returns the grouping key for one column of one row.
pub fn field_key(row: &serde_json::Value, column: &str) -> String {
    scalar_key(row.as_object().and_then(|obj| obj.get(column)))
}

/// Extracts a finite numeric value from a JSON value.
///
/// Accepts JSON numbers and numeric strings. Only finite values are
/// accepted; strings such as "NaN" or "inf" are rejected so they cannot
/// poison downstream arithmetic.
pub fn extract_numeric(value: &serde_json::Value) -> Option<f64> {
    let numeric = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    };
    match numeric {
        Some(v) if v.is_finite() => Some(v),
        _ => None,
    }
}
