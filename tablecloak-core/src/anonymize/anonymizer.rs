//! Facade dispatching anonymization requests to the technique functions.

use serde::{Deserialize, Serialize};

use crate::error::TablecloakError;
use crate::models::TableData;
use crate::Result;

use super::k_anonymity::apply_k_anonymity;
use super::l_diversity::apply_l_diversity;
use super::models::AnonymizationResult;
use super::noise::apply_noise;
use super::params::{
    KAnonymityParams, LDiversityParams, NoiseParams, SyntheticParams, TClosenessParams,
};
use super::synthetic::apply_synthetic;
use super::t_closeness::apply_t_closeness;

/// Default upper bound on the number of rows accepted per table.
const DEFAULT_MAX_ROWS: usize = 1_000_000;

/// Configuration for the [`Anonymizer`] facade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizerConfig {
    /// Maximum number of rows a table may hold before it is rejected.
    pub max_rows: usize,
}

impl Default for AnonymizerConfig {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

impl AnonymizerConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum accepted table size in rows.
    #[must_use]
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        if max_rows == 0 {
            tracing::warn!("max_rows of 0 ignored; keeping {}", self.max_rows);
            return self;
        }
        self.max_rows = max_rows;
        self
    }
}

/// A single anonymization request, tagged by technique.
///
/// The serialized form carries a `technique` discriminator next to the
/// parameters, so requests round-trip cleanly through JSON job queues.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "technique", rename_all = "snake_case")]
pub enum AnonymizationRequest {
    /// Suppress or generalize classes smaller than `k`.
    KAnonymity(KAnonymityParams),
    /// Suppress classes with too few distinct sensitive values.
    LDiversity(LDiversityParams),
    /// Suppress classes whose sensitive distribution drifts from the table's.
    TCloseness(TClosenessParams),
    /// Perturb numeric columns with Laplace noise.
    DifferentialPrivacy(NoiseParams),
    /// Replace the table with resampled, jittered rows.
    Synthetic(SyntheticParams),
}

/// Applies anonymization techniques to tabular data.
///
/// # Example
///
/// ```rust,ignore
/// use tablecloak_core::anonymize::{Anonymizer, AnonymizationRequest, KAnonymityParams};
///
/// let anonymizer = Anonymizer::with_defaults();
/// let request = AnonymizationRequest::KAnonymity(KAnonymityParams::new(
///     vec!["age".into(), "zip".into()],
///     5,
///     0.05,
/// ));
/// let result = anonymizer.apply(&table, &request)?;
/// println!("{} rows released", result.rows.len());
/// ```
#[derive(Debug, Clone)]
pub struct Anonymizer {
    config: AnonymizerConfig,
}

impl Anonymizer {
    /// Creates an anonymizer with the given configuration.
    #[must_use]
    pub fn new(config: AnonymizerConfig) -> Self {
        Self { config }
    }

    /// Creates an anonymizer with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(AnonymizerConfig::default())
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &AnonymizerConfig {
        &self.config
    }

    /// Applies the requested technique to a table.
    ///
    /// # Errors
    ///
    /// Returns an error when the table exceeds the configured row bound or
    /// when the request's parameters fail validation.
    pub fn apply(
        &self,
        table: &TableData,
        request: &AnonymizationRequest,
    ) -> Result<AnonymizationResult> {
        if table.len() > self.config.max_rows {
            return Err(TablecloakError::table_too_large(
                table.len(),
                self.config.max_rows,
            ));
        }

        match request {
            AnonymizationRequest::KAnonymity(params) => apply_k_anonymity(table, params),
            AnonymizationRequest::LDiversity(params) => apply_l_diversity(table, params),
            AnonymizationRequest::TCloseness(params) => apply_t_closeness(table, params),
            AnonymizationRequest::DifferentialPrivacy(params) => apply_noise(table, params),
            AnonymizationRequest::Synthetic(params) => apply_synthetic(table, params),
        }
    }
}
