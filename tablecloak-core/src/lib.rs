//! Core disclosure-control engine for Tablecloak.
//!
//! This crate partitions tabular data into equivalence classes over
//! quasi-identifiers, scores re-identification risk under three attacker
//! models, and applies anonymization techniques ranging from suppression to
//! synthetic data generation.
//!
//! # Privacy Guarantees
//! - Risk metrics expose quasi-identifier class keys, counts, and ratios,
//!   never sensitive attribute values
//! - Input rows are never mutated; every technique returns fresh rows
//! - No file, network, or database I/O anywhere in the crate
//! - All randomness is seedable for reproducible pipelines
//!
//! # Architecture
//! Two facades cover the public surface:
//! - [`risk::RiskEstimator`] assesses a table and returns [`risk::RiskMetrics`]
//! - [`anonymize::Anonymizer`] dispatches an [`anonymize::AnonymizationRequest`]
//!   to the matching technique

pub mod anonymize;
pub mod error;
pub mod logging;
pub mod models;
pub mod partition;
pub mod risk;

// Re-export commonly used types
pub use anonymize::{
    AnonymizationRequest, AnonymizationResult, Anonymizer, AnonymizerConfig, TechniqueSummary,
};
pub use error::{Result, TablecloakError};
pub use models::TableData;
pub use partition::{EquivalenceClass, EquivalenceClassIndex};
pub use risk::{RiskConfig, RiskEstimator, RiskMetrics};
