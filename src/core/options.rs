//! Fitting options and configuration.

use thiserror::Error;

/// Linear-algebra back-end used to solve the least squares problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverType {
    /// Householder QR of the design matrix (default, numerically stable).
    #[default]
    Qr,
    /// Cholesky factorisation of the cross-product matrix X'X.
    Cholesky,
}

/// Configuration options shared by the fitter, the ANOVA decomposer and the
/// VIF calculator.
#[derive(Debug, Clone)]
pub struct RegressionOptions {
    /// Confidence level for coefficient confidence intervals (default: 0.95).
    pub confidence_level: f64,
    /// Solver back-end for the least squares problem.
    pub solver: SolverType,
    /// Relative tolerance for numerical rank determination.
    ///
    /// A pivot is treated as zero when it falls below `rank_tolerance` times
    /// the leading pivot.
    pub rank_tolerance: f64,
    /// `1 - R²` at or below this value is treated as perfect collinearity.
    pub collinearity_tolerance: f64,
    /// RSS at or below `zero_variance_tolerance * TSS` is treated as an exact fit.
    pub zero_variance_tolerance: f64,
    /// Eigenvalues below `-psd_tolerance * λ_max` make a covariance matrix
    /// non positive semi-definite.
    pub psd_tolerance: f64,
}

impl Default for RegressionOptions {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            solver: SolverType::Qr,
            rank_tolerance: 1e-7,
            collinearity_tolerance: 1e-10,
            zero_variance_tolerance: 1e-20,
            psd_tolerance: 1e-10,
        }
    }
}

/// Errors that can occur when validating regression options.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OptionsError {
    #[error("confidence_level must be in (0, 1), got {0}")]
    InvalidConfidenceLevel(f64),
    #[error("rank_tolerance must be in (0, 1), got {0}")]
    InvalidRankTolerance(f64),
    #[error("{name} must be non-negative and finite, got {value}")]
    InvalidTolerance { name: &'static str, value: f64 },
}

impl RegressionOptions {
    /// Create a new builder for regression options.
    pub fn builder() -> RegressionOptionsBuilder {
        RegressionOptionsBuilder::default()
    }

    /// Validate the options and return an error if invalid.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(OptionsError::InvalidConfidenceLevel(self.confidence_level));
        }
        if !(self.rank_tolerance > 0.0 && self.rank_tolerance < 1.0) {
            return Err(OptionsError::InvalidRankTolerance(self.rank_tolerance));
        }
        for (name, value) in [
            ("collinearity_tolerance", self.collinearity_tolerance),
            ("zero_variance_tolerance", self.zero_variance_tolerance),
            ("psd_tolerance", self.psd_tolerance),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(OptionsError::InvalidTolerance { name, value });
            }
        }
        Ok(())
    }
}

/// Builder for `RegressionOptions`.
#[derive(Debug, Clone, Default)]
pub struct RegressionOptionsBuilder {
    options: RegressionOptions,
}

impl RegressionOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the confidence level for confidence intervals.
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.options.confidence_level = level;
        self
    }

    /// Set the solver type.
    pub fn solver(mut self, solver: SolverType) -> Self {
        self.options.solver = solver;
        self
    }

    /// Set the relative rank tolerance.
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.options.rank_tolerance = tol;
        self
    }

    /// Set the tolerance on `1 - R²` used by the VIF calculator.
    pub fn collinearity_tolerance(mut self, tol: f64) -> Self {
        self.options.collinearity_tolerance = tol;
        self
    }

    /// Set the relative tolerance for detecting an exact fit.
    pub fn zero_variance_tolerance(mut self, tol: f64) -> Self {
        self.options.zero_variance_tolerance = tol;
        self
    }

    /// Set the tolerance for the positive semi-definite check in PCA.
    pub fn psd_tolerance(mut self, tol: f64) -> Self {
        self.options.psd_tolerance = tol;
        self
    }

    /// Build and validate the options.
    pub fn build(self) -> Result<RegressionOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }

    /// Build the options without validation.
    pub fn build_unchecked(self) -> RegressionOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = RegressionOptions::default();
        assert!((opts.confidence_level - 0.95).abs() < 1e-10);
        assert_eq!(opts.solver, SolverType::Qr);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let opts = RegressionOptions::builder()
            .confidence_level(0.9)
            .solver(SolverType::Cholesky)
            .build()
            .unwrap();

        assert!((opts.confidence_level - 0.9).abs() < 1e-10);
        assert_eq!(opts.solver, SolverType::Cholesky);
    }

    #[test]
    fn test_validation_invalid_confidence_level() {
        let result = RegressionOptions::builder().confidence_level(1.0).build();
        assert!(matches!(result, Err(OptionsError::InvalidConfidenceLevel(_))));
    }

    #[test]
    fn test_validation_invalid_rank_tolerance() {
        let result = RegressionOptions::builder().rank_tolerance(0.0).build();
        assert!(matches!(result, Err(OptionsError::InvalidRankTolerance(_))));
    }

    #[test]
    fn test_validation_negative_tolerance() {
        let result = RegressionOptions::builder().psd_tolerance(-1.0).build();
        assert_eq!(
            result.unwrap_err(),
            OptionsError::InvalidTolerance {
                name: "psd_tolerance",
                value: -1.0
            }
        );
    }

    #[test]
    fn test_build_unchecked_skips_validation() {
        let opts = RegressionOptions::builder()
            .confidence_level(2.0)
            .build_unchecked();
        assert!((opts.confidence_level - 2.0).abs() < 1e-10);
    }
}
