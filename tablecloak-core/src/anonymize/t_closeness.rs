//! T-closeness enforcement over a sensitive attribute.
//!
//! Each equivalence class must keep its sensitive-value distribution within
//! distance `t` of the table-wide distribution. Distance is measured as
//! total variation, which coincides with the earth mover's distance when the
//! sensitive attribute is an unordered categorical value.

use std::collections::HashMap;

use serde_json::Value;

use crate::Result;
use crate::models::{TableData, field_key};
use crate::partition::EquivalenceClassIndex;

use super::models::{AnonymizationResult, TClosenessSummary, TechniqueSummary};
use super::params::TClosenessParams;

/// Absorbs floating-point error when comparing a distance to the threshold.
const DISTANCE_TOLERANCE: f64 = 1e-9;

/// Applies t-closeness to a table.
///
/// Classes whose sensitive-value distribution drifts further than `t` from
/// the global distribution are suppressed. With `t = 0` only classes that
/// mirror the table-wide distribution exactly survive.
pub fn apply_t_closeness(
    table: &TableData,
    params: &TClosenessParams,
) -> Result<AnonymizationResult> {
    params.validate()?;

    let index = EquivalenceClassIndex::build(&table.rows, &params.quasi_identifiers);
    let total_rows = table.len();

    let all_indices: Vec<usize> = (0..total_rows).collect();
    let global = distribution(&table.rows, &all_indices, &params.sensitive_attribute);

    let mut keep: Vec<bool> = Vec::with_capacity(index.len());
    let mut satisfying_classes = 0usize;
    let mut violating_classes = 0usize;
    let mut suppressed_records = 0usize;
    let mut distance_total = 0.0f64;
    let mut max_distance = 0.0f64;

    for class in index.classes() {
        let local = distribution(&table.rows, &class.row_indices, &params.sensitive_attribute);
        let distance = total_variation_distance(&local, &global);
        distance_total += distance;
        max_distance = max_distance.max(distance);

        if distance <= params.t + DISTANCE_TOLERANCE {
            satisfying_classes += 1;
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

    let avg_distance = if index.is_empty() {
        0.0
    } else {
        distance_total / index.len() as f64
    };
    let information_loss = if total_rows == 0 {
        0.0
    } else {
        suppressed_records as f64 / total_rows as f64
    };

    let summary = TechniqueSummary::TCloseness(TClosenessSummary {
        threshold: params.t,
        satisfying_classes,
        violating_classes,
        avg_distance,
        max_distance,
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

/// Relative frequency of each sensitive value among the given rows.
fn distribution(rows: &[Value], row_indices: &[usize], column: &str) -> HashMap<String, f64> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for &row_index in row_indices {
        *counts.entry(field_key(&rows[row_index], column)).or_insert(0) += 1;
    }

    let total = row_indices.len();
    if total == 0 {
        return HashMap::new();
    }

    counts
        .into_iter()
        .map(|(value, count)| (value, count as f64 / total as f64))
        .collect()
}

/// Total variation distance between two discrete distributions.
fn total_variation_distance(p: &HashMap<String, f64>, q: &HashMap<String, f64>) -> f64 {
    let mut sum = 0.0f64;
    for (value, p_mass) in p {
        let q_mass = q.get(value).copied().unwrap_or(0.0);
        sum += (p_mass - q_mass).abs();
    }
    for (value, q_mass) in q {
        if !p.contains_key(value) {
            sum += q_mass;
        }
    }
    sum / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn qi(columns: &[&str]) -> Vec<String> {
        columns.iter().map(|c| (*c).to_string()).collect()
    }

    fn summary(result: &AnonymizationResult) -> TClosenessSummary {
        match &result.summary {
            TechniqueSummary::TCloseness(s) => s.clone(),
            other => panic!("expected t-closeness summary, got {:?}", other),
        }
    }

    fn dist(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
    }

    #[test]
    fn test_identical_distributions_have_zero_distance() {
        let p = dist(&[("flu", 0.5), ("cold", 0.5)]);
        assert_eq!(total_variation_distance(&p, &p), 0.0);
    }

    #[test]
    fn test_disjoint_distributions_have_distance_one() {
        let p = dist(&[("flu", 1.0)]);
        let q = dist(&[("cold", 1.0)]);
        assert!((total_variation_distance(&p, &q) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_overlap_distance() {
        let p = dist(&[("flu", 0.75), ("cold", 0.25)]);
        let q = dist(&[("flu", 0.25), ("cold", 0.75)]);
        assert!((total_variation_distance(&p, &q) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_classes_matching_global_distribution_survive_t_zero() {
        // Both classes split 1:1 between flu and cold, exactly like the table
        let table = TableData::new(
            "patients",
            vec![
                json!({"age": 30, "disease": "flu"}),
                json!({"age": 30, "disease": "cold"}),
                json!({"age": 40, "disease": "flu"}),
                json!({"age": 40, "disease": "cold"}),
            ],
        );
        let params = TClosenessParams::new(qi(&["age"]), "disease", 0.0);

        let result = apply_t_closeness(&table, &params).unwrap();

        assert_eq!(result.rows.len(), 4);
        assert_eq!(result.records_suppressed, 0);

        let s = summary(&result);
        assert_eq!(s.satisfying_classes, 2);
        assert_eq!(s.violating_classes, 0);
        assert!(s.max_distance < 1e-9);
    }

    #[test]
    fn test_skewed_class_suppressed() {
        // Global: flu 0.5, cold 0.5. The age-30 class is all flu (distance 0.5)
        let table = TableData::new(
            "patients",
            vec![
                json!({"age": 30, "disease": "flu"}),
                json!({"age": 30, "disease": "flu"}),
                json!({"age": 40, "disease": "cold"}),
                json!({"age": 40, "disease": "cold"}),
            ],
        );
        let params = TClosenessParams::new(qi(&["age"]), "disease", 0.3);

        let result = apply_t_closeness(&table, &params).unwrap();

        assert!(result.rows.is_empty());
        assert_eq!(result.records_suppressed, 4);

        let s = summary(&result);
        assert_eq!(s.violating_classes, 2);
        assert!((s.avg_distance - 0.5).abs() < 1e-12);
        assert!((s.max_distance - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_loose_threshold_keeps_skewed_classes() {
        let table = TableData::new(
            "patients",
            vec![
                json!({"age": 30, "disease": "flu"}),
                json!({"age": 30, "disease": "flu"}),
                json!({"age": 40, "disease": "cold"}),
                json!({"age": 40, "disease": "cold"}),
            ],
        );
        let params = TClosenessParams::new(qi(&["age"]), "disease", 0.5);

        let result = apply_t_closeness(&table, &params).unwrap();

        // Distance is exactly 0.5; the tolerance keeps it inside the threshold
        assert_eq!(result.rows.len(), 4);
        assert_eq!(summary(&result).satisfying_classes, 2);
    }

    #[test]
    fn test_empty_table_zeroed_result() {
        let table = TableData::new("empty", vec![]);
        let params = TClosenessParams::new(qi(&["age"]), "disease", 0.2);

        let result = apply_t_closeness(&table, &params).unwrap();

        assert!(result.rows.is_empty());
        assert_eq!(result.information_loss, 0.0);
        assert_eq!(summary(&result).avg_distance, 0.0);
        assert_eq!(summary(&result).max_distance, 0.0);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let table = TableData::new("patients", vec![json!({"age": 30})]);

        let params = TClosenessParams::new(qi(&["age"]), "disease", 1.5);
        assert!(apply_t_closeness(&table, &params).is_err());

        let params = TClosenessParams::new(vec![], "disease", 0.2);
        assert!(apply_t_closeness(&table, &params).is_err());
    }
}
