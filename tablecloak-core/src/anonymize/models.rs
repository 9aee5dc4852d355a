//! Anonymization result models.
//!
//! Results carry the processed rows plus technique-specific counters. Like
//! the risk metrics, the counters expose counts and ratios only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of a k-anonymity pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KAnonymitySummary {
    /// Minimum class size that was enforced
    pub k: usize,
    /// Equivalence classes found in the input
    pub equivalence_class_count: usize,
    /// Classes removed by suppression
    pub classes_suppressed: usize,
    /// Classes rewritten by generalization
    pub classes_generalized: usize,
    /// Mean size of retained classes
    pub avg_group_size: f64,
    /// Smallest retained class, 0 when nothing was retained
    pub min_group_size: usize,
    /// Largest retained class, 0 when nothing was retained
    pub max_group_size: usize,
    /// Safety score from 0 (exposed) to 100 (smallest class reaches k)
    pub safety_score: u8,
}

/// Summary of an l-diversity pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LDiversitySummary {
    /// Minimum distinct sensitive values that was enforced
    pub l: usize,
    /// Classes meeting the diversity requirement
    pub diverse_classes: usize,
    /// Classes suppressed for lacking diversity
    pub violating_classes: usize,
    /// Mean distinct sensitive values across all classes
    pub avg_diversity: f64,
}

/// Summary of a t-closeness pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TClosenessSummary {
    /// Maximum distributional distance that was tolerated
    pub threshold: f64,
    /// Classes within the threshold
    pub satisfying_classes: usize,
    /// Classes suppressed for diverging too far
    pub violating_classes: usize,
    /// Mean distance across all classes
    pub avg_distance: f64,
    /// Largest distance observed
    pub max_distance: f64,
}

/// Summary of a Laplace noise pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseSummary {
    /// Privacy budget the noise was calibrated to
    pub epsilon: f64,
    /// Listed columns that had at least one value perturbed
    pub columns_perturbed: usize,
    /// Total values perturbed
    pub values_perturbed: usize,
    /// Mean absolute noise actually injected
    pub avg_noise_magnitude: f64,
}

/// Summary of a synthetic-data pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticSummary {
    /// Records in the source table
    pub source_rows: usize,
    /// Records generated
    pub synthetic_rows: usize,
    /// Requested size as a percentage of the source
    pub sample_percent: f64,
}

/// Technique-specific summary attached to an anonymization result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "technique", rename_all = "snake_case")]
pub enum TechniqueSummary {
    /// Counters from a k-anonymity pass
    KAnonymity(KAnonymitySummary),
    /// Counters from an l-diversity pass
    LDiversity(LDiversitySummary),
    /// Counters from a t-closeness pass
    TCloseness(TClosenessSummary),
    /// Counters from a Laplace noise pass
    DifferentialPrivacy(NoiseSummary),
    /// Counters from a synthetic-data pass
    Synthetic(SyntheticSummary),
}

/// Result of one anonymization pass over a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizationResult {
    /// Table the pass was applied to
    pub table_name: String,
    /// Number of records in the input table
    pub records_in: usize,
    /// Number of records removed by suppression
    pub records_suppressed: usize,
    /// Fraction of input records lost or distorted (0.0-1.0)
    pub information_loss: f64,
    /// Processed records, input order preserved
    pub rows: Vec<serde_json::Value>,
    /// Technique-specific counters
    pub summary: TechniqueSummary,
    /// When the pass completed
    pub processed_at: DateTime<Utc>,
}

impl AnonymizationResult {
    /// Creates a result, clamping information loss into the unit interval.
    pub fn new(
        table_name: impl Into<String>,
        records_in: usize,
        records_suppressed: usize,
        information_loss: f64,
        rows: Vec<serde_json::Value>,
        summary: TechniqueSummary,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            records_in,
            records_suppressed,
            information_loss: information_loss.clamp(0.0, 1.0),
            rows,
            summary,
            processed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_clamps_information_loss() {
        let summary = TechniqueSummary::Synthetic(SyntheticSummary {
            source_rows: 10,
            synthetic_rows: 5,
            sample_percent: 50.0,
        });
        let result = AnonymizationResult::new("patients", 10, 0, 1.7, vec![], summary);
        assert_eq!(result.information_loss, 1.0);
    }

    #[test]
    fn test_summary_serde_tagged_by_technique() {
        let summary = TechniqueSummary::KAnonymity(KAnonymitySummary {
            k: 3,
            equivalence_class_count: 2,
            classes_suppressed: 0,
            classes_generalized: 0,
            avg_group_size: 3.0,
            min_group_size: 3,
            max_group_size: 3,
            safety_score: 100,
        });

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["technique"], "k_anonymity");
        assert_eq!(json["safety_score"], 100);

        let restored: TechniqueSummary = serde_json::from_value(json).unwrap();
        assert!(matches!(restored, TechniqueSummary::KAnonymity(s) if s.k == 3));
    }

    #[test]
    fn test_result_serde_roundtrip() {
        let summary = TechniqueSummary::DifferentialPrivacy(NoiseSummary {
            epsilon: 1.0,
            columns_perturbed: 1,
            values_perturbed: 4,
            avg_noise_magnitude: 0.8,
        });
        let result = AnonymizationResult::new(
            "salaries",
            4,
            0,
            0.1,
            vec![json!({"salary": 1000.5})],
            summary,
        );

        let serialized = serde_json::to_string(&result).unwrap();
        let deserialized: AnonymizationResult = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized.records_in, 4);
        assert_eq!(deserialized.rows.len(), 1);
        assert!(matches!(
            deserialized.summary,
            TechniqueSummary::DifferentialPrivacy(s) if s.values_perturbed == 4
        ));
    }
}
