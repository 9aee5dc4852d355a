//! Risk assessment result models.
//!
//! Metrics contain quasi-identifier class keys, counts, and ratios only,
//! never sensitive attribute values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::population::PopulationEstimate;

/// Re-identification risk for a single equivalence class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRisk {
    /// Joined quasi-identifier values identifying the class
    pub key: String,
    /// Number of records in the class
    pub size: usize,
    /// Prosecutor-model re-identification probability (0.0-1.0)
    pub risk: f64,
}

/// Disclosure risk metrics for a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Table the assessment was computed for
    pub table_name: String,
    /// Number of records analyzed
    pub analyzed_rows: usize,
    /// Risk when the attacker knows the target is in the table (0.0-1.0)
    pub prosecutor_risk: f64,
    /// Risk when the attacker must find the target in a population (0.0-1.0)
    pub journalist_risk: f64,
    /// Risk when the attacker aims to re-identify in bulk (0.0-1.0)
    pub marketer_risk: f64,
    /// Per-class breakdown, in first-seen key order
    pub equivalence_classes: Vec<ClassRisk>,
    /// Count of records whose equivalence class has size 1
    pub unique_records: usize,
    /// Count of classes smaller than the configured k threshold
    pub small_groups: usize,
    /// Population estimates behind the journalist and marketer models
    pub population: PopulationEstimate,
    /// Remediation advice triggered by threshold rules
    pub recommendations: Vec<String>,
    /// When the assessment was computed
    pub assessed_at: DateTime<Utc>,
}

impl RiskMetrics {
    /// Creates zeroed metrics for an empty table.
    pub fn empty(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            analyzed_rows: 0,
            prosecutor_risk: 0.0,
            journalist_risk: 0.0,
            marketer_risk: 0.0,
            equivalence_classes: Vec::new(),
            unique_records: 0,
            small_groups: 0,
            population: PopulationEstimate::default(),
            recommendations: Vec::new(),
            assessed_at: Utc::now(),
        }
    }
}
