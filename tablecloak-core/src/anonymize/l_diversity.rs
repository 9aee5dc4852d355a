//! L-diversity enforcement over a sensitive attribute.
//!
//! A class whose records share too few distinct sensitive values lets an
//! attacker infer the attribute without re-identifying anyone, so such
//! classes are suppressed entirely.

use std::collections::HashSet;

use serde_json::Value;

use crate::Result;
use crate::models::{TableData, field_key};
use crate::partition::EquivalenceClassIndex;

use super::models::{AnonymizationResult, LDiversitySummary, TechniqueSummary};
use super::params::LDiversityParams;

/// Applies l-diversity to a table.
///
/// Every equivalence class must contain at least `l` distinct values of the
/// sensitive attribute; classes that do not are suppressed. A sensitive
/// attribute absent from the records counts as a single distinct value, so
/// any `l` above 1 suppresses the whole table.
pub fn apply_l_diversity(
    table: &TableData,
    params: &LDiversityParams,
) -> Result<AnonymizationResult> {
    params.validate()?;

    let index = EquivalenceClassIndex::build(&table.rows, &params.quasi_identifiers);
    let total_rows = table.len();

    let mut keep: Vec<bool> = Vec::with_capacity(index.len());
    let mut diversity_total = 0usize;
    let mut diverse_classes = 0usize;
    let mut violating_classes = 0usize;
    let mut suppressed_records = 0usize;

    for class in index.classes() {
        let mut distinct: HashSet<String> = HashSet::new();
        for &row_index in &class.row_indices {
            distinct.insert(field_key(&table.rows[row_index], &params.sensitive_attribute));
        }
        let distinct_count = distinct.len();
        diversity_total += distinct_count;

        if distinct_count >= params.l {
            diverse_classes += 1;
            keep.push(true);
        } else {
            violating_classes += 1;
            suppressed_records += class.size();
            keep.push(false);
        }
    }

    let rows: Vec<Value> = table
        .rows
        .iter()
        .enumerate()
        .filter(|(row_index, _)| {
            index
                .class_of_row(*row_index)
                .is_some_and(|class_index| keep[class_index])
        })
        .map(|(_, row)| row.clone())
        .collect();

    let avg_diversity = if index.is_empty() {
        0.0
    } else {
        diversity_total as f64 / index.len() as f64
    };
    let information_loss = if total_rows == 0 {
        0.0
    } else {
        suppressed_records as f64 / total_rows as f64
    };

    let summary = TechniqueSummary::LDiversity(LDiversitySummary {
        l: params.l,
        diverse_classes,
        violating_classes,
        avg_diversity,
    });

    Ok(AnonymizationResult::new(
        &table.name,
        total_rows,
        suppressed_records,
        information_loss,
        rows,
        summary,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn qi(columns: &[&str]) -> Vec<String> {
        columns.iter().map(|c| (*c).to_string()).collect()
    }

    fn summary(result: &AnonymizationResult) -> LDiversitySummary {
        match &result.summary {
            TechniqueSummary::LDiversity(s) => s.clone(),
            other => panic!("expected l-diversity summary, got {:?}", other),
        }
    }

    #[test]
    fn test_single_sensitive_value_suppresses_everything() {
        let table = TableData::new(
            "patients",
            vec![
                json!({"age": 30, "disease": "flu"}),
                json!({"age": 30, "disease": "flu"}),
                json!({"age": 40, "disease": "flu"}),
            ],
        );
        let params = LDiversityParams::new(qi(&["age"]), "disease", 2);

        let result = apply_l_diversity(&table, &params).unwrap();

        assert!(result.rows.is_empty());
        assert_eq!(result.records_suppressed, 3);
        assert_eq!(result.information_loss, 1.0);

        let s = summary(&result);
        assert_eq!(s.diverse_classes, 0);
        assert_eq!(s.violating_classes, 2);
        assert!((s.avg_diversity - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_diverse_classes_retained() {
        let table = TableData::new(
            "patients",
            vec![
                json!({"age": 30, "disease": "flu"}),
                json!({"age": 30, "disease": "cold"}),
                json!({"age": 40, "disease": "flu"}),
                json!({"age": 40, "disease": "flu"}),
            ],
        );
        let params = LDiversityParams::new(qi(&["age"]), "disease", 2);

        let result = apply_l_diversity(&table, &params).unwrap();

        // The age-30 class has two diseases; the age-40 class has one
        assert_eq!(result.rows.len(), 2);
        assert!(result.rows.iter().all(|row| row["age"] == json!(30)));
        assert_eq!(result.records_suppressed, 2);
        assert!((result.information_loss - 0.5).abs() < 1e-12);

        let s = summary(&result);
        assert_eq!(s.diverse_classes, 1);
        assert_eq!(s.violating_classes, 1);
        assert!((s.avg_diversity - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_suppressed_plus_retained_covers_table() {
        let table = TableData::new(
            "patients",
            vec![
                json!({"age": 30, "disease": "flu"}),
                json!({"age": 30, "disease": "cold"}),
                json!({"age": 40, "disease": "flu"}),
                json!({"age": 50, "disease": "cold"}),
                json!({"age": 50, "disease": "measles"}),
            ],
        );
        let params = LDiversityParams::new(qi(&["age"]), "disease", 2);

        let result = apply_l_diversity(&table, &params).unwrap();

        assert_eq!(result.rows.len() + result.records_suppressed, table.len());
    }

    #[test]
    fn test_missing_sensitive_attribute_counts_once() {
        let table = TableData::new(
            "patients",
            vec![
                json!({"age": 30}),
                json!({"age": 30}),
            ],
        );

        // One distinct (empty) value per class: l=1 keeps, l=2 suppresses
        let keep_all = LDiversityParams::new(qi(&["age"]), "disease", 1);
        let result = apply_l_diversity(&table, &keep_all).unwrap();
        assert_eq!(result.rows.len(), 2);

        let too_strict = LDiversityParams::new(qi(&["age"]), "disease", 2);
        let result = apply_l_diversity(&table, &too_strict).unwrap();
        assert!(result.rows.is_empty());
    }

    #[test]
    fn test_null_and_missing_sensitive_values_merge() {
        let table = TableData::new(
            "patients",
            vec![
                json!({"age": 30, "disease": null}),
                json!({"age": 30}),
            ],
        );
        let params = LDiversityParams::new(qi(&["age"]), "disease", 2);

        let result = apply_l_diversity(&table, &params).unwrap();

        // Null and missing collapse to one distinct value
        assert!(result.rows.is_empty());
        assert_eq!(summary(&result).violating_classes, 1);
    }

    #[test]
    fn test_empty_table_zeroed_result() {
        let table = TableData::new("empty", vec![]);
        let params = LDiversityParams::new(qi(&["age"]), "disease", 2);

        let result = apply_l_diversity(&table, &params).unwrap();

        assert!(result.rows.is_empty());
        assert_eq!(result.information_loss, 0.0);
        assert_eq!(summary(&result).avg_diversity, 0.0);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let table = TableData::new("patients", vec![json!({"age": 30})]);

        let params = LDiversityParams::new(vec![], "disease", 2);
        assert!(apply_l_diversity(&table, &params).is_err());

        let params = LDiversityParams::new(qi(&["age"]), "disease", 0);
        assert!(apply_l_diversity(&table, &params).is_err());
    }
}
