//! Risk assessment configuration.
//!
//! Controls the class-size floor, the assumed-population rule behind the
//! journalist and marketer models, and the row bound on analyzable tables.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default minimum acceptable equivalence-class size.
const DEFAULT_K_THRESHOLD: usize = 5;
/// Default multiplier applied to the sample size when assuming a population.
const DEFAULT_POPULATION_MULTIPLIER: u64 = 50;
/// Default floor on the assumed population size.
const DEFAULT_MIN_POPULATION: u64 = 100_000;
/// Default upper bound on analyzable table size.
const DEFAULT_MAX_ROWS: usize = 1_000_000;

/// Configuration for disclosure risk assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Equivalence classes smaller than this count as at-risk groups
    pub k_threshold: usize,
    /// Assumed population size is the sample size times this multiplier
    pub population_multiplier: u64,
    /// Lower bound on the assumed population size
    pub min_population: u64,
    /// Maximum number of rows accepted for assessment
    pub max_rows: usize,
}

/// Validation errors for risk configuration.
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("k_threshold must be at least 1, got {0}")]
    InvalidKThreshold(usize),
    #[error("population_multiplier must be at least 1, got {0}")]
    InvalidPopulationMultiplier(u64),
    #[error("min_population must be at least 1, got {0}")]
    InvalidMinPopulation(u64),
    #[error("max_rows must be at least 1, got {0}")]
    InvalidMaxRows(usize),
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            k_threshold: DEFAULT_K_THRESHOLD,
            population_multiplier: DEFAULT_POPULATION_MULTIPLIER,
            min_population: DEFAULT_MIN_POPULATION,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

impl RiskConfig {
    /// Creates a new risk config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the class-size floor.
    pub fn with_k_threshold(mut self, k_threshold: usize) -> Self {
        if k_threshold == 0 {
            tracing::warn!("k_threshold 0 raised to 1");
        }
        self.k_threshold = k_threshold.max(1);
        self
    }

    /// Builder method to set the population multiplier.
    pub fn with_population_multiplier(mut self, multiplier: u64) -> Self {
        if multiplier == 0 {
            tracing::warn!("population_multiplier 0 raised to 1");
        }
        self.population_multiplier = multiplier.max(1);
        self
    }

    /// Builder method to set the population floor.
    pub fn with_min_population(mut self, floor: u64) -> Self {
        if floor == 0 {
            tracing::warn!("min_population 0 raised to 1");
        }
        self.min_population = floor.max(1);
        self
    }

    /// Builder method to set the row bound.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        if max_rows == 0 {
            tracing::warn!("max_rows 0 raised to 1");
        }
        self.max_rows = max_rows.max(1);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns an error if any setting is zero.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.k_threshold == 0 {
            return Err(ConfigValidationError::InvalidKThreshold(self.k_threshold));
        }
        if self.population_multiplier == 0 {
            return Err(ConfigValidationError::InvalidPopulationMultiplier(
                self.population_multiplier,
            ));
        }
        if self.min_population == 0 {
            return Err(ConfigValidationError::InvalidMinPopulation(
                self.min_population,
            ));
        }
        if self.max_rows == 0 {
            return Err(ConfigValidationError::InvalidMaxRows(self.max_rows));
        }
        Ok(())
    }
}
