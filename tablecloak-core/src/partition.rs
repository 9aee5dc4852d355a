//! Equivalence-class partitioning over quasi-identifier columns.
//!
//! Every risk and anonymization pass starts from the same partition:
//! records grouped by the tuple of their quasi-identifier values.

use std::collections::HashMap;

use serde_json::Value;

use crate::models::field_key;

/// Separator joining quasi-identifier values into a class key.
///
/// The ASCII unit separator cannot appear in legitimate cell text, so keys
/// built from different value tuples never collide.
pub const KEY_SEPARATOR: char = '\u{1F}';

/// A group of records sharing identical quasi-identifier values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquivalenceClass {
    /// Joined quasi-identifier values identifying this class
    pub key: String,
    /// Indices into the source table, in row order
    pub row_indices: Vec<usize>,
}

impl EquivalenceClass {
    /// Returns the number of records in this class.
    pub fn size(&self) -> usize {
        self.row_indices.len()
    }
}

/// Partition of a table's rows into equivalence classes.
///
/// Classes are ordered by first appearance of their key, so iteration order
/// is stable for a given input. Every row belongs to exactly one class;
/// none are dropped or duplicated.
#[derive(Debug, Clone)]
pub struct EquivalenceClassIndex {
    classes: Vec<EquivalenceClass>,
    row_class: Vec<usize>,
}

impl EquivalenceClassIndex {
    /// Builds the partition for `rows` over the given quasi-identifier columns.
    ///
    /// Null and missing values contribute an empty string to the class key,
    /// so a quasi-identifier column absent from the data still produces a
    /// well-defined grouping. An empty quasi-identifier list yields a single
    /// class holding every row.
    pub fn build(rows: &[Value], quasi_identifiers: &[String]) -> Self {
        if let Some(first) = rows.first().and_then(|row| row.as_object()) {
            for column in quasi_identifiers {
                if !first.contains_key(column) {
                    tracing::warn!(
                        "Quasi-identifier column '{}' not present in first row; treating values as empty",
                        column
                    );
                }
            }
        }

        let mut class_lookup: HashMap<String, usize> = HashMap::new();
        let mut classes: Vec<EquivalenceClass> = Vec::new();
        let mut row_class: Vec<usize> = Vec::with_capacity(rows.len());

        for (row_index, row) in rows.iter().enumerate() {
            let key = class_key(row, quasi_identifiers);
            let class_index = match class_lookup.get(&key) {
                Some(&index) => index,
                None => {
                    let index = classes.len();
                    class_lookup.insert(key.clone(), index);
                    classes.push(EquivalenceClass {
                        key,
                        row_indices: Vec::new(),
                    });
                    index
                }
            };
            classes[class_index].row_indices.push(row_index);
            row_class.push(class_index);
        }

        tracing::debug!(
            "Partitioned {} rows into {} equivalence classes",
            rows.len(),
            classes.len()
        );

        Self { classes, row_class }
    }

    /// Returns the classes in first-seen key order.
    pub fn classes(&self) -> &[EquivalenceClass] {
        &self.classes
    }

    /// Returns the number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if the partition contains no classes.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Returns the number of partitioned rows.
    pub fn total_rows(&self) -> usize {
        self.row_class.len()
    }

    /// Returns the index of the class containing the given row.
    pub fn class_of_row(&self, row_index: usize) -> Option<usize> {
        self.row_class.get(row_index).copied()
    }

    /// Counts classes containing exactly one record.
    pub fn unique_classes(&self) -> usize {
        self.classes.iter().filter(|class| class.size() == 1).count()
    }

    /// Counts classes smaller than `k`.
    pub fn classes_smaller_than(&self, k: usize) -> usize {
        self.classes.iter().filter(|class| class.size() < k).count()
    }
}

/// Joins a row's quasi-identifier values into its class key.
fn class_key(row: &Value, quasi_identifiers: &[String]) -> String {
    let mut key = String::new();
    for (position, column) in quasi_identifiers.iter().enumerate() {
        if position > 0 {
            key.push(KEY_SEPARATOR);
        }
        key.push_str(&field_key(row, column));
    }
    key
}
