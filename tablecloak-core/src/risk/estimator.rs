//! Risk estimator facade and attacker-model scoring.
//!
//! All three attacker models score the same equivalence-class partition.
//! The prosecutor model assumes the target is known to be in the table;
//! the journalist and marketer models dilute class sizes into an assumed
//! population first.

use chrono::Utc;

use crate::Result;
use crate::error::TablecloakError;
use crate::models::TableData;
use crate::partition::{EquivalenceClass, EquivalenceClassIndex};

use super::config::RiskConfig;
use super::models::{ClassRisk, RiskMetrics};
use super::population::{PopulationEstimate, estimate_population, estimated_group_size};

/// Risk a sample-unique class scores under the journalist model.
const JOURNALIST_UNIQUE_RISK: f64 = 0.5;
/// Cap on the journalist singleton penalty.
const JOURNALIST_PENALTY_CAP: f64 = 0.3;
/// Risk a sample-unique class scores under the marketer model.
const MARKETER_UNIQUE_RISK: f64 = 0.6;
/// Cap on the marketer singleton penalty.
const MARKETER_PENALTY_CAP: f64 = 0.25;
/// Class sizes below this attract a marketer targeting boost.
const MARKETER_BOOST_THRESHOLD: usize = 5;
/// Boost added per record the class is short of the threshold.
const MARKETER_BOOST_STEP: f64 = 0.1;
/// Cap on the marketer targeting boost.
const MARKETER_BOOST_CAP: f64 = 0.4;
/// Weight of the singleton ratio in both penalties.
const SINGLETON_PENALTY_WEIGHT: f64 = 0.5;

/// Prosecutor risk above this is critical.
const PROSECUTOR_CRITICAL: f64 = 0.4;
/// Prosecutor risk above this is elevated.
const PROSECUTOR_ELEVATED: f64 = 0.2;
/// Journalist risk above this is elevated.
const JOURNALIST_ELEVATED: f64 = 0.3;
/// Marketer risk above this is elevated.
const MARKETER_ELEVATED: f64 = 0.25;
/// Unique-record ratio above this warrants diversification advice.
const UNIQUE_RATIO_ELEVATED: f64 = 0.1;

/// Disclosure risk estimator for tabular data.
///
/// The estimator partitions a table on the chosen quasi-identifiers, scores
/// the partition under three attacker models, and derives remediation
/// advice from threshold rules. It never mutates the table.
///
/// # Example
///
/// ```rust,ignore
/// use tablecloak_core::risk::{RiskConfig, RiskEstimator};
///
/// let estimator = RiskEstimator::new(RiskConfig::default());
/// let metrics = estimator.assess(&table, &quasi_identifiers)?;
/// println!("Prosecutor risk: {:.2}%", metrics.prosecutor_risk * 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct RiskEstimator {
    config: RiskConfig,
}

impl RiskEstimator {
    /// Creates a new risk estimator with the given configuration.
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Creates a new risk estimator with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RiskConfig::default())
    }

    /// Returns a reference to the estimator configuration.
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Assesses re-identification risk for a table.
    ///
    /// Builds one equivalence-class partition over `quasi_identifiers` and
    /// scores it under the prosecutor, journalist, and marketer models. An
    /// empty quasi-identifier list is valid and yields a single class
    /// holding the whole table.
    ///
    /// # Arguments
    /// * `table` - The table to assess
    /// * `quasi_identifiers` - Columns an attacker could link on
    ///
    /// # Returns
    /// Risk metrics for the table, zeroed when the table is empty.
    pub fn assess(&self, table: &TableData, quasi_identifiers: &[String]) -> Result<RiskMetrics> {
        self.config.validate()?;

        if table.len() > self.config.max_rows {
            return Err(TablecloakError::table_too_large(
                table.len(),
                self.config.max_rows,
            ));
        }

        if table.is_empty() {
            return Ok(RiskMetrics::empty(&table.name));
        }

        let index = EquivalenceClassIndex::build(&table.rows, quasi_identifiers);
        let analyzed_rows = index.total_rows();
        let unique_records = index.unique_classes();

        let population = estimate_population(analyzed_rows, unique_records, &self.config);

        let prosecutor_risk = prosecutor_risk(index.classes(), analyzed_rows);
        let journalist_risk = journalist_risk(index.classes(), analyzed_rows, &population);
        let marketer_risk = marketer_risk(index.classes(), analyzed_rows, &population);

        let small_groups = index.classes_smaller_than(self.config.k_threshold);

        let equivalence_classes: Vec<ClassRisk> = index
            .classes()
            .iter()
            .map(|class| ClassRisk {
                key: class.key.clone(),
                size: class.size(),
                risk: 1.0 / class.size() as f64,
            })
            .collect();

        let recommendations = build_recommendations(
            prosecutor_risk,
            journalist_risk,
            marketer_risk,
            unique_records,
            analyzed_rows,
            small_groups,
            self.config.k_threshold,
        );

        Ok(RiskMetrics {
            table_name: table.name.clone(),
            analyzed_rows,
            prosecutor_risk,
            journalist_risk,
            marketer_risk,
            equivalence_classes,
            unique_records,
            small_groups,
            population,
            recommendations,
            assessed_at: Utc::now(),
        })
    }
}

/// Size-weighted mean of per-class prosecutor risk.
///
/// Each class scores 1/size, so the weighted mean collapses to the class
/// count over the row count.
fn prosecutor_risk(classes: &[EquivalenceClass], total_rows: usize) -> f64 {
    if total_rows == 0 {
        return 0.0;
    }
    (classes.len() as f64 / total_rows as f64).min(1.0)
}

/// Size-weighted journalist risk with a singleton penalty.
///
/// Sample-unique classes score a fixed risk; larger classes score their
/// size over the estimated population group size.
fn journalist_risk(
    classes: &[EquivalenceClass],
    total_rows: usize,
    population: &PopulationEstimate,
) -> f64 {
    if total_rows == 0 {
        return 0.0;
    }

    let mut weighted = 0.0;
    for class in classes {
        let size = class.size();
        let class_risk = if size == 1 {
            JOURNALIST_UNIQUE_RISK
        } else {
            let group = estimated_group_size(size, total_rows, population.population_size);
            (size as f64 / group as f64).min(1.0)
        };
        weighted += class_risk * size as f64;
    }

    let penalty =
        (singleton_ratio(classes, total_rows) * SINGLETON_PENALTY_WEIGHT).min(JOURNALIST_PENALTY_CAP);
    (weighted / total_rows as f64 + penalty).min(1.0)
}

/// Size-weighted marketer risk with a small-class boost and singleton penalty.
fn marketer_risk(
    classes: &[EquivalenceClass],
    total_rows: usize,
    population: &PopulationEstimate,
) -> f64 {
    if total_rows == 0 {
        return 0.0;
    }

    let mut weighted = 0.0;
    for class in classes {
        let size = class.size();
        let class_risk = if size == 1 {
            MARKETER_UNIQUE_RISK
        } else {
            let group = estimated_group_size(size, total_rows, population.population_size);
            let base = (size as f64 / group as f64).min(1.0);
            if size < MARKETER_BOOST_THRESHOLD {
                let boost = ((MARKETER_BOOST_THRESHOLD - size) as f64 * MARKETER_BOOST_STEP)
                    .min(MARKETER_BOOST_CAP);
                (base * (1.0 + boost)).min(1.0)
            } else {
                base
            }
        };
        weighted += class_risk * size as f64;
    }

    let penalty =
        (singleton_ratio(classes, total_rows) * SINGLETON_PENALTY_WEIGHT).min(MARKETER_PENALTY_CAP);
    (weighted / total_rows as f64 + penalty).min(1.0)
}

/// Fraction of rows accounted for by singleton classes.
fn singleton_ratio(classes: &[EquivalenceClass], total_rows: usize) -> f64 {
    let singletons = classes.iter().filter(|class| class.size() < 2).count();
    singletons as f64 / total_rows as f64
}

/// Derives remediation advice from threshold rules.
fn build_recommendations(
    prosecutor_risk: f64,
    journalist_risk: f64,
    marketer_risk: f64,
    unique_records: usize,
    total_rows: usize,
    small_groups: usize,
    k_threshold: usize,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if prosecutor_risk > PROSECUTOR_CRITICAL {
        recommendations.push(
            "Prosecutor risk is critical: suppress or generalize quasi-identifiers before any release"
                .to_string(),
        );
    } else if prosecutor_risk > PROSECUTOR_ELEVATED {
        recommendations.push(
            "Prosecutor risk is elevated: consider coarser quasi-identifier values".to_string(),
        );
    }

    if journalist_risk > JOURNALIST_ELEVATED {
        recommendations.push(
            "Journalist risk is elevated: restrict the released sample or reduce quasi-identifier detail"
                .to_string(),
        );
    }

    if marketer_risk > MARKETER_ELEVATED {
        recommendations.push(
            "Marketer risk is elevated: apply l-diversity or t-closeness to sensitive attributes"
                .to_string(),
        );
    }

    let unique_ratio = unique_records as f64 / total_rows as f64;
    if unique_ratio > UNIQUE_RATIO_ELEVATED {
        recommendations.push(format!(
            "{} records ({:.1}% of the table) are unique on the chosen quasi-identifiers: diversify or drop those columns",
            unique_records,
            unique_ratio * 100.0
        ));
    }

    if small_groups > 0 {
        recommendations.push(format!(
            "{} equivalence classes fall below the minimum group size of {}",
            small_groups, k_threshold
        ));
    }

    recommendations
}
