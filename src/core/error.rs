//! Error type shared by every computation in the crate.

use thiserror::Error;

use super::OptionsError;

/// Errors that can occur while generating, transforming or fitting data.
///
/// Every failure is reported to the caller; no operation returns NaN or
/// infinity in place of an error and none retries internally.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegressionError {
    #[error("dimension mismatch: column '{name}' has {got} values, expected {expected}")]
    DimensionMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("insufficient observations: need at least {needed}, got {got}")]
    InsufficientObservations { needed: usize, got: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("design matrix is rank deficient: rank {rank} with {columns} columns")]
    SingularDesign { rank: usize, columns: usize },

    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    #[error("predictor '{predictor}' is perfectly collinear with the others; VIF is undefined")]
    PerfectCollinearity { predictor: String },

    #[error("unknown term '{0}'")]
    UnknownTerm(String),

    #[error("term '{0}' appears more than once")]
    DuplicateTerm(String),

    #[error("residual variance is zero: the response is an exact linear function of the terms")]
    ZeroResidualVariance,

    #[error("invalid options: {0}")]
    InvalidOptions(#[from] OptionsError),

    #[error("decomposition failed: {0}")]
    Decomposition(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singular_design_message() {
        let err = RegressionError::SingularDesign {
            rank: 2,
            columns: 3,
        };
        assert_eq!(
            err.to_string(),
            "design matrix is rank deficient: rank 2 with 3 columns"
        );
    }

    #[test]
    fn test_unknown_term_message() {
        let err = RegressionError::UnknownTerm("X9".to_string());
        assert_eq!(err.to_string(), "unknown term 'X9'");
    }

    #[test]
    fn test_options_error_converts() {
        let err: RegressionError = OptionsError::InvalidConfidenceLevel(1.5).into();
        assert!(matches!(err, RegressionError::InvalidOptions(_)));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<RegressionError>();
    }
}
