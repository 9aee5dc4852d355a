//! K-anonymity enforcement by suppression and generalization.
//!
//! Undersized equivalence classes are suppressed while the suppression
//! budget lasts; once it is exhausted the remaining undersized classes are
//! generalized in place and retained.

use serde_json::Value;

use crate::Result;
use crate::models::{TableData, extract_numeric};
use crate::partition::EquivalenceClassIndex;

use super::models::{AnonymizationResult, KAnonymitySummary, TechniqueSummary};
use super::params::KAnonymityParams;

/// Width of the buckets numeric values are generalized into.
const BUCKET_WIDTH: f64 = 10.0;
/// Scale of the safety score reported in the summary.
const SAFETY_SCORE_MAX: f64 = 100.0;

/// Fate assigned to an equivalence class during the budget pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassFate {
    Keep,
    Suppress,
    Generalize,
}

/// Applies k-anonymity to a table.
///
/// Classes of size `k` or more pass through verbatim. Smaller classes are
/// suppressed until another suppression would exceed
/// `floor(rows * suppression_limit)` records; every undersized class after
/// that point is generalized instead: numeric quasi-identifier values
/// become decade range labels such as "30-40" and non-numeric values become
/// the mask token.
pub fn apply_k_anonymity(
    table: &TableData,
    params: &KAnonymityParams,
) -> Result<AnonymizationResult> {
    params.validate()?;

    let index = EquivalenceClassIndex::build(&table.rows, &params.quasi_identifiers);
    let total_rows = table.len();
    let budget = (total_rows as f64 * params.suppression_limit).floor() as usize;

    let mut fates: Vec<ClassFate> = Vec::with_capacity(index.len());
    let mut suppressed_records = 0usize;
    let mut classes_suppressed = 0usize;
    let mut classes_generalized = 0usize;

    for class in index.classes() {
        let fate = if class.size() >= params.k {
            ClassFate::Keep
        } else if suppressed_records + class.size() <= budget {
            suppressed_records += class.size();
            classes_suppressed += 1;
            ClassFate::Suppress
        } else {
            classes_generalized += 1;
            ClassFate::Generalize
        };
        fates.push(fate);
    }

    tracing::debug!(
        "k-anonymity over {} classes: {} suppressed, {} generalized (budget {} records)",
        index.len(),
        classes_suppressed,
        classes_generalized,
        budget
    );

    let mut rows: Vec<Value> = Vec::with_capacity(total_rows.saturating_sub(suppressed_records));
    for (row_index, row) in table.rows.iter().enumerate() {
        let Some(class_index) = index.class_of_row(row_index) else {
            continue;
        };
        match fates[class_index] {
            ClassFate::Keep => rows.push(row.clone()),
            ClassFate::Suppress => {}
            ClassFate::Generalize => {
                rows.push(generalize_row(row, &params.quasi_identifiers, &params.mask_token));
            }
        }
    }

    let mut min_group_size = 0usize;
    let mut max_group_size = 0usize;
    let mut retained_records = 0usize;
    let mut retained_classes = 0usize;
    for (class, fate) in index.classes().iter().zip(&fates) {
        if *fate == ClassFate::Suppress {
            continue;
        }
        let size = class.size();
        retained_classes += 1;
        retained_records += size;
        if min_group_size == 0 || size < min_group_size {
            min_group_size = size;
        }
        max_group_size = max_group_size.max(size);
    }

    let avg_group_size = if retained_classes == 0 {
        0.0
    } else {
        retained_records as f64 / retained_classes as f64
    };
    let safety_score = ((min_group_size as f64 / params.k as f64) * SAFETY_SCORE_MAX)
        .round()
        .min(SAFETY_SCORE_MAX) as u8;
    let information_loss = if total_rows == 0 {
        0.0
    } else {
        suppressed_records as f64 / total_rows as f64
    };

    let summary = TechniqueSummary::KAnonymity(KAnonymitySummary {
        k: params.k,
        equivalence_class_count: index.len(),
        classes_suppressed,
        classes_generalized,
        avg_group_size,
        min_group_size,
        max_group_size,
        safety_score,
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

/// Rewrites a row's quasi-identifier values into coarser forms.
///
/// Columns absent from the row stay absent; output records never gain
/// columns.
fn generalize_row(row: &Value, quasi_identifiers: &[String], mask_token: &str) -> Value {
    let mut generalized = row.clone();
    if let Some(obj) = generalized.as_object_mut() {
        for column in quasi_identifiers {
            let replacement = match obj.get(column) {
                Some(value) => generalize_value(value, mask_token),
                None => continue,
            };
            obj.insert(column.clone(), replacement);
        }
    }
    generalized
}

/// Coarsens one quasi-identifier value.
///
/// Numeric values (including numeric strings) map to the decade bucket they
/// fall into; anything else maps to the mask token.
fn generalize_value(value: &Value, mask_token: &str) -> Value {
    match extract_numeric(value) {
        Some(v) => {
            let lower = (v / BUCKET_WIDTH).floor() * BUCKET_WIDTH;
            Value::String(format!("{}-{}", lower, lower + BUCKET_WIDTH))
        }
        None => Value::String(mask_token.to_string()),
    }
}
