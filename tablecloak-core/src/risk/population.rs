//! Population uniqueness estimation.
//!
//! The sample is treated as a simple random draw from a larger population
//! whose size follows a configured rule. The fraction of population uniques
//! gets a Beta posterior from the observed sample uniques; its mean scaled
//! by the population size yields the estimated population-unique count.

use serde::{Deserialize, Serialize};

use super::config::RiskConfig;

/// Population-level estimates derived from sample statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PopulationEstimate {
    /// Assumed size of the population the sample was drawn from
    pub population_size: u64,
    /// Fraction of the population the sample covers (0.0-1.0)
    pub sampling_fraction: f64,
    /// Posterior mean of the population uniqueness rate (0.0-1.0)
    pub uniqueness_rate: f64,
    /// Estimated count of population-unique individuals
    pub estimated_uniques: u64,
}

/// Returns the assumed population size for a sample of `sample_size` rows.
///
/// The population is the sample scaled by the configured multiplier, with
/// the configured floor applied so tiny samples still assume a realistic
/// population.
pub fn assumed_population_size(sample_size: usize, config: &RiskConfig) -> u64 {
    (sample_size as u64)
        .saturating_mul(config.population_multiplier)
        .max(config.min_population)
}

/// Estimates population uniqueness from sample uniques.
///
/// With `u` sample uniques out of `n` records, the population uniqueness
/// rate has a Beta(u + 1, n - u + 1) posterior under a uniform prior. Its
/// mean (u + 1) / (n + 2) scaled by the assumed population size gives the
/// estimated count of population uniques.
pub fn estimate_population(
    sample_size: usize,
    sample_uniques: usize,
    config: &RiskConfig,
) -> PopulationEstimate {
    if sample_size == 0 {
        return PopulationEstimate::default();
    }

    let population_size = assumed_population_size(sample_size, config);
    let alpha = sample_uniques as f64 + 1.0;
    let beta = sample_size.saturating_sub(sample_uniques) as f64 + 1.0;
    let uniqueness_rate = alpha / (alpha + beta);

    PopulationEstimate {
        population_size,
        sampling_fraction: (sample_size as f64 / population_size as f64).clamp(0.0, 1.0),
        uniqueness_rate,
        estimated_uniques: (uniqueness_rate * population_size as f64).round() as u64,
    }
}

/// Scales an equivalence-class size up to its expected population group size.
///
/// A class covering `class_size` of `sample_size` records is assumed to
/// cover the same fraction of the population. The result is floored at 1 so
/// risk ratios stay finite.
pub fn estimated_group_size(class_size: usize, sample_size: usize, population_size: u64) -> u64 {
    if sample_size == 0 {
        return 1;
    }
    let scaled = (class_size as f64 / sample_size as f64) * population_size as f64;
    (scaled.round() as u64).max(1)
}
