//! Synthetic data generation by bootstrap sampling with jitter.
//!
//! Synthetic rows are whole-row copies drawn uniformly with replacement from
//! the source table. Listed numeric columns are then jittered by a random
//! factor, which breaks exact linkage while keeping per-column distributions
//! close to the original.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Number, Value};

use crate::Result;
use crate::models::TableData;

use super::models::{AnonymizationResult, SyntheticSummary, TechniqueSummary};
use super::params::SyntheticParams;

/// Lower bound of the multiplicative jitter factor.
const JITTER_LOW: f64 = 0.9;

/// Upper bound of the multiplicative jitter factor.
const JITTER_HIGH: f64 = 1.1;

/// Fixed information loss reported for synthetic output.
const SYNTHETIC_INFORMATION_LOSS: f64 = 0.2;

/// Generates a synthetic table by resampling rows and jittering numerics.
///
/// The output holds `round(rows * sample_percent / 100)` rows. When `params`
/// lists no columns, every column named by the first source row is jittered.
/// A seed makes both the resampling and the jitter reproducible.
pub fn apply_synthetic(table: &TableData, params: &SyntheticParams) -> Result<AnonymizationResult> {
    params.validate()?;

    let source_rows = table.len();
    let target_rows = (source_rows as f64 * params.sample_percent / 100.0).round() as usize;

    let columns = if params.columns.is_empty() {
        table.column_names().unwrap_or_default()
    } else {
        params.columns.clone()
    };

    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut rows: Vec<Value> = Vec::with_capacity(target_rows);
    if source_rows > 0 {
        for _ in 0..target_rows {
            let source = &table.rows[rng.random_range(0..source_rows)];
            rows.push(jitter_row(source, &columns, &mut rng));
        }
    }

    let summary = TechniqueSummary::Synthetic(SyntheticSummary {
        source_rows,
        synthetic_rows: rows.len(),
        sample_percent: params.sample_percent,
    });

    Ok(AnonymizationResult::new(
        &table.name,
        source_rows,
        0,
        SYNTHETIC_INFORMATION_LOSS,
        rows,
        summary,
    ))
}

/// Copies a row and jitters its listed numeric columns.
fn jitter_row<R: Rng>(row: &Value, columns: &[String], rng: &mut R) -> Value {
    let mut out = row.clone();
    if let Some(obj) = out.as_object_mut() {
        for column in columns {
            let Some(value) = obj.get(column) else {
                continue;
            };
            let Some(number) = value.as_f64() else {
                continue;
            };
            let factor = rng.random_range(JITTER_LOW..=JITTER_HIGH);
            if let Some(jittered) = Number::from_f64(number * factor) {
                obj.insert(column.clone(), Value::Number(jittered));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|c| (*c).to_string()).collect()
    }

    fn summary(result: &AnonymizationResult) -> SyntheticSummary {
        match &result.summary {
            TechniqueSummary::Synthetic(s) => s.clone(),
            other => panic!("expected synthetic summary, got {:?}", other),
        }
    }

    fn source_table() -> TableData {
        TableData::new(
            "salaries",
            (0..10)
                .map(|i| json!({"salary": 40_000.0 + f64::from(i) * 1_000.0, "dept": "eng"}))
                .collect(),
        )
    }

    #[test]
    fn test_output_size_follows_sample_percent() {
        let table = source_table();

        let half = SyntheticParams::new(columns(&["salary"]), 50.0).with_seed(1);
        let result = apply_synthetic(&table, &half).unwrap();
        assert_eq!(result.rows.len(), 5);

        let full = SyntheticParams::new(columns(&["salary"]), 100.0).with_seed(1);
        let result = apply_synthetic(&table, &full).unwrap();
        assert_eq!(result.rows.len(), 10);

        let s = summary(&result);
        assert_eq!(s.source_rows, 10);
        assert_eq!(s.synthetic_rows, 10);
    }

    #[test]
    fn test_jitter_stays_within_ten_percent_of_a_source_value() {
        let table = source_table();
        let params = SyntheticParams::new(columns(&["salary"]), 100.0).with_seed(2);

        let result = apply_synthetic(&table, &params).unwrap();

        for row in &result.rows {
            let salary = row["salary"].as_f64().unwrap();
            let near_a_source = table.rows.iter().any(|source| {
                let original = source["salary"].as_f64().unwrap();
                salary >= original * JITTER_LOW && salary <= original * JITTER_HIGH
            });
            assert!(near_a_source, "salary {salary} outside every jitter band");
        }
    }

    #[test]
    fn test_non_numeric_columns_copied_verbatim() {
        let table = source_table();
        let params = SyntheticParams::new(columns(&["salary", "dept"]), 100.0).with_seed(3);

        let result = apply_synthetic(&table, &params).unwrap();

        for row in &result.rows {
            assert_eq!(row["dept"], json!("eng"));
        }
    }

    #[test]
    fn test_seeded_runs_are_deterministic() {
        let table = source_table();
        let params = SyntheticParams::new(columns(&["salary"]), 80.0).with_seed(99);

        let first = apply_synthetic(&table, &params).unwrap();
        let second = apply_synthetic(&table, &params).unwrap();

        assert_eq!(first.rows, second.rows);
    }

    #[test]
    fn test_empty_column_list_falls_back_to_first_row_columns() {
        let table = TableData::new(
            "salaries",
            vec![json!({"salary": 50_000.0, "age": 40})],
        );
        let params = SyntheticParams::new(vec![], 100.0).with_seed(4);

        let result = apply_synthetic(&table, &params).unwrap();

        assert_eq!(result.rows.len(), 1);
        let row = &result.rows[0];
        // Both numeric columns picked up via the fallback, so both jittered
        let salary = row["salary"].as_f64().unwrap();
        let age = row["age"].as_f64().unwrap();
        assert!((45_000.0..=55_000.0).contains(&salary));
        assert!((36.0..=44.0).contains(&age));
    }

    #[test]
    fn test_empty_source_produces_empty_output() {
        let table = TableData::new("empty", vec![]);
        let params = SyntheticParams::new(columns(&["salary"]), 100.0).with_seed(5);

        let result = apply_synthetic(&table, &params).unwrap();

        assert!(result.rows.is_empty());
        let s = summary(&result);
        assert_eq!(s.source_rows, 0);
        assert_eq!(s.synthetic_rows, 0);
    }

    #[test]
    fn test_information_loss_is_fixed() {
        let table = source_table();
        let params = SyntheticParams::new(columns(&["salary"]), 100.0).with_seed(6);

        let result = apply_synthetic(&table, &params).unwrap();

        assert!((result.information_loss - SYNTHETIC_INFORMATION_LOSS).abs() < 1e-12);
        assert_eq!(result.records_suppressed, 0);
    }

    #[test]
    fn test_invalid_sample_percent_rejected() {
        let table = source_table();

        for percent in [0.0, -5.0, 100.1, f64::NAN] {
            let params = SyntheticParams::new(columns(&["salary"]), percent);
            assert!(apply_synthetic(&table, &params).is_err());
        }
    }
}
