//! Disclosure risk assessment.
//!
//! This module scores re-identification risk for a table under three
//! attacker models:
//! - **Prosecutor**: the attacker knows the target is in the table
//! - **Journalist**: the attacker must first find the target in a population
//! - **Marketer**: the attacker re-identifies as many records as possible
//!
//! The journalist and marketer models rest on a Bayesian estimate of how
//! many records would remain unique in the population the sample was drawn
//! from.
//!
//! # Example
//! ```rust,ignore
//! use tablecloak_core::risk::{RiskConfig, RiskEstimator};
//!
//! let estimator = RiskEstimator::new(RiskConfig::default());
//! let metrics = estimator.assess(&table, &quasi_identifiers)?;
//! for advice in &metrics.recommendations {
//!     println!("{advice}");
//! }
//! ```

mod config;
mod estimator;
mod models;
mod population;

// Re-export public API
pub use config::{ConfigValidationError, RiskConfig};
pub use estimator::RiskEstimator;
pub use models::{ClassRisk, RiskMetrics};
pub use population::{
    PopulationEstimate, assumed_population_size, estimate_population, estimated_group_size,
};
