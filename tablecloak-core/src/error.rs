//! Error types for the anonymization engine.
//!
//! Technique parameters and engine configuration validate through dedicated
//! error enums that convert into the crate-level error, so callers handle
//! one taxonomy while each module keeps its precise variants.

use thiserror::Error;

use crate::anonymize::ParamValidationError;
use crate::risk::ConfigValidationError;

/// Main error type for engine operations.
///
/// Every operation validates its inputs in full before touching any row, so
/// an error always means no partial output was produced.
#[derive(Debug, Error)]
pub enum TablecloakError {
    /// A technique parameter failed validation
    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] ParamValidationError),

    /// An engine configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigValidationError),

    /// Input table exceeds the configured row bound
    #[error("Table too large: {rows} rows exceeds limit of {limit}")]
    TableTooLarge {
        /// Number of rows in the rejected table
        rows: usize,
        /// Configured row bound
        limit: usize,
    },

    /// Configuration or initialization error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of what failed to configure
        message: String,
    },
}

impl TablecloakError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a table-size error.
    pub fn table_too_large(rows: usize, limit: usize) -> Self {
        Self::TableTooLarge { rows, limit }
    }
}

/// Convenience type alias for Results with TablecloakError
pub type Result<T> = std::result::Result<T, TablecloakError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = TablecloakError::configuration("Logging already initialized");
        assert!(error.to_string().contains("Logging already initialized"));

        let error = TablecloakError::table_too_large(2_000_000, 1_000_000);
        assert!(error.to_string().contains("2000000"));
        assert!(error.to_string().contains("1000000"));
    }

    #[test]
    fn test_param_error_conversion() {
        let error: TablecloakError = ParamValidationError::InvalidK(0).into();
        assert!(matches!(error, TablecloakError::InvalidParameter(_)));
        assert!(error.to_string().starts_with("Invalid parameter:"));
    }

    #[test]
    fn test_config_error_conversion() {
        let error: TablecloakError = ConfigValidationError::InvalidKThreshold(0).into();
        assert!(matches!(error, TablecloakError::InvalidConfiguration(_)));
        assert!(error.to_string().starts_with("Invalid configuration:"));
    }
}
