//! Parameters for the anonymization techniques.
//!
//! Every technique validates its parameters in full before touching any
//! row, so a rejected request leaves no partial output.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default replacement token for generalized non-numeric values.
const DEFAULT_MASK_TOKEN: &str = "*";

/// Validation errors for technique parameters.
#[derive(Debug, Error)]
pub enum ParamValidationError {
    #[error("k must be at least 1, got {0}")]
    InvalidK(usize),
    #[error("suppression_limit must be between 0.0 and 1.0, got {0}")]
    InvalidSuppressionLimit(f64),
    #[error("l must be at least 1, got {0}")]
    InvalidL(usize),
    #[error("t must be between 0.0 and 1.0, got {0}")]
    InvalidThreshold(f64),
    #[error("epsilon must be positive and finite, got {0}")]
    InvalidEpsilon(f64),
    #[error("sample_percent must be in (0, 100], got {0}")]
    InvalidSamplePercent(f64),
    #[error("at least one quasi-identifier column is required")]
    EmptyQuasiIdentifiers,
}

/// Parameters for k-anonymity enforcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KAnonymityParams {
    /// Columns an attacker could link on
    pub quasi_identifiers: Vec<String>,
    /// Minimum size every retained equivalence class must reach
    pub k: usize,
    /// Fraction of records that may be suppressed (0.0-1.0)
    pub suppression_limit: f64,
    /// Replacement token for generalized non-numeric values
    pub mask_token: String,
}

impl KAnonymityParams {
    /// Creates k-anonymity parameters with the default mask token.
    pub fn new(quasi_identifiers: Vec<String>, k: usize, suppression_limit: f64) -> Self {
        Self {
            quasi_identifiers,
            k,
            suppression_limit,
            mask_token: DEFAULT_MASK_TOKEN.to_string(),
        }
    }

    /// Builder method to set the mask token.
    pub fn with_mask_token(mut self, token: impl Into<String>) -> Self {
        self.mask_token = token.into();
        self
    }

    /// Validates the parameters.
    pub fn validate(&self) -> Result<(), ParamValidationError> {
        if self.quasi_identifiers.is_empty() {
            return Err(ParamValidationError::EmptyQuasiIdentifiers);
        }
        if self.k == 0 {
            return Err(ParamValidationError::InvalidK(self.k));
        }
        if !(0.0..=1.0).contains(&self.suppression_limit) {
            return Err(ParamValidationError::InvalidSuppressionLimit(
                self.suppression_limit,
            ));
        }
        Ok(())
    }
}

/// Parameters for l-diversity enforcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LDiversityParams {
    /// Columns an attacker could link on
    pub quasi_identifiers: Vec<String>,
    /// Column whose values must stay diverse within each class
    pub sensitive_attribute: String,
    /// Minimum count of distinct sensitive values per retained class
    pub l: usize,
}

impl LDiversityParams {
    /// Creates l-diversity parameters.
    pub fn new(
        quasi_identifiers: Vec<String>,
        sensitive_attribute: impl Into<String>,
        l: usize,
    ) -> Self {
        Self {
            quasi_identifiers,
            sensitive_attribute: sensitive_attribute.into(),
            l,
        }
    }

    /// Validates the parameters.
    pub fn validate(&self) -> Result<(), ParamValidationError> {
        if self.quasi_identifiers.is_empty() {
            return Err(ParamValidationError::EmptyQuasiIdentifiers);
        }
        if self.l == 0 {
            return Err(ParamValidationError::InvalidL(self.l));
        }
        Ok(())
    }
}

/// Parameters for t-closeness enforcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TClosenessParams {
    /// Columns an attacker could link on
    pub quasi_identifiers: Vec<String>,
    /// Column whose class distributions must track the global distribution
    pub sensitive_attribute: String,
    /// Maximum tolerated distributional distance (0.0-1.0)
    pub t: f64,
}

impl TClosenessParams {
    /// Creates t-closeness parameters.
    pub fn new(
        quasi_identifiers: Vec<String>,
        sensitive_attribute: impl Into<String>,
        t: f64,
    ) -> Self {
        Self {
            quasi_identifiers,
            sensitive_attribute: sensitive_attribute.into(),
            t,
        }
    }

    /// Validates the parameters.
    pub fn validate(&self) -> Result<(), ParamValidationError> {
        if self.quasi_identifiers.is_empty() {
            return Err(ParamValidationError::EmptyQuasiIdentifiers);
        }
        if !(0.0..=1.0).contains(&self.t) {
            return Err(ParamValidationError::InvalidThreshold(self.t));
        }
        Ok(())
    }
}

/// Parameters for Laplace noise injection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseParams {
    /// Numeric columns to perturb; an empty list is a valid no-op
    pub columns: Vec<String>,
    /// Privacy budget; smaller values inject more noise
    pub epsilon: f64,
    /// Seed for reproducible noise, OS entropy when absent
    pub seed: Option<u64>,
}

impl NoiseParams {
    /// Creates noise parameters drawing from OS entropy.
    pub fn new(columns: Vec<String>, epsilon: f64) -> Self {
        Self {
            columns,
            epsilon,
            seed: None,
        }
    }

    /// Builder method to fix the noise seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the parameters.
    pub fn validate(&self) -> Result<(), ParamValidationError> {
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(ParamValidationError::InvalidEpsilon(self.epsilon));
        }
        Ok(())
    }
}

/// Parameters for synthetic table generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticParams {
    /// Columns to jitter; an empty list falls back to the table's columns
    pub columns: Vec<String>,
    /// Synthetic row count as a percentage of the source rows (0, 100]
    pub sample_percent: f64,
    /// Seed for reproducible sampling, OS entropy when absent
    pub seed: Option<u64>,
}

impl SyntheticParams {
    /// Creates synthetic-sampling parameters drawing from OS entropy.
    pub fn new(columns: Vec<String>, sample_percent: f64) -> Self {
        Self {
            columns,
            sample_percent,
            seed: None,
        }
    }

    /// Builder method to fix the sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the parameters.
    pub fn validate(&self) -> Result<(), ParamValidationError> {
        if !(self.sample_percent > 0.0 && self.sample_percent <= 100.0) {
            return Err(ParamValidationError::InvalidSamplePercent(
                self.sample_percent,
            ));
        }
        Ok(())
    }
}
