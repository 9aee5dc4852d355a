//! Anonymization techniques for tabular data.
//!
//! Five techniques share the same equivalence-class partition:
//! - **K-anonymity**: suppress small classes within a budget, generalize the rest
//! - **L-diversity**: suppress classes with too few distinct sensitive values
//! - **T-closeness**: suppress classes whose sensitive distribution drifts from the table's
//! - **Differential privacy**: perturb numeric columns with Laplace noise
//! - **Synthetic data**: resample whole rows and jitter their numerics
//!
//! Each technique takes the table by reference and returns an
//! [`AnonymizationResult`] holding the released rows and a technique-specific
//! summary; input rows are never mutated.
//!
//! # Example
//! ```rust,ignore
//! use tablecloak_core::anonymize::{Anonymizer, AnonymizationRequest, KAnonymityParams};
//!
//! let anonymizer = Anonymizer::with_defaults();
//! let request = AnonymizationRequest::KAnonymity(KAnonymityParams::new(
//!     vec!["age".into(), "zip".into()],
//!     5,
//!     0.05,
//! ));
//! let result = anonymizer.apply(&table, &request)?;
//! ```

mod anonymizer;
mod k_anonymity;
mod l_diversity;
mod models;
mod noise;
mod params;
mod synthetic;
mod t_closeness;

// Re-export public API
pub use anonymizer::{AnonymizationRequest, Anonymizer, AnonymizerConfig};
pub use k_anonymity::apply_k_anonymity;
pub use l_diversity::apply_l_diversity;
pub use models::{
    AnonymizationResult, KAnonymitySummary, LDiversitySummary, NoiseSummary, SyntheticSummary,
    TClosenessSummary, TechniqueSummary,
};
pub use noise::apply_noise;
pub use params::{
    KAnonymityParams, LDiversityParams, NoiseParams, ParamValidationError, SyntheticParams,
    TClosenessParams,
};
pub use synthetic::apply_synthetic;
pub use t_closeness::apply_t_closeness;
