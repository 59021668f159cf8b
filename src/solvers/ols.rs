//! Ordinary Least Squares fitter.

use faer::{Col, Mat};
use tracing::debug;

use crate::core::{
    FitResult, ModelSpec, RegressionError, RegressionOptions, RegressionOptionsBuilder,
    SolverType, TermEstimate,
};
use crate::data::Dataset;
use crate::inference::CoefficientInference;
use crate::linalg::{solver_for, LinearSolver};
use crate::utils::total_sum_of_squares;

/// Ordinary Least Squares fitter for models with an intercept.
///
/// The design matrix is `[1 | x_1 ... x_k]` with the terms in the order given
/// by the [`ModelSpec`]. Rank deficiency is an error rather than a source of
/// aliased coefficients: a perfectly collinear design fails with
/// [`RegressionError::SingularDesign`].
///
/// # Example
///
/// ```rust,ignore
/// use collinear_anova::prelude::*;
///
/// let fitted = OlsFitter::builder()
///     .confidence_level(0.95)
///     .build()
///     .fit(&dataset, &ModelSpec::new(["X"]))?;
///
/// println!("slope = {}", fitted.term("X").unwrap().estimate);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OlsFitter {
    options: RegressionOptions,
}

/// Plain least squares solution without inference.
///
/// This is the primitive shared by the sequential ANOVA and VIF computations,
/// which only need residual sums of squares.
#[derive(Debug, Clone)]
pub struct LeastSquares {
    /// Coefficients in design-matrix column order.
    pub coefficients: Col<f64>,
    /// Fitted values.
    pub fitted_values: Col<f64>,
    /// Residuals (y - fitted_values).
    pub residuals: Col<f64>,
    /// Residual sum of squares.
    pub rss: f64,
    /// Total corrected sum of squares of the response.
    pub tss: f64,
    /// Number of observations.
    pub n_observations: usize,
    /// Number of design-matrix columns.
    pub n_parameters: usize,
}

impl LeastSquares {
    /// Residual degrees of freedom (n - p).
    pub fn residual_df(&self) -> usize {
        self.n_observations.saturating_sub(self.n_parameters)
    }

    /// Coefficient of determination `1 - RSS / TSS`.
    pub fn r_squared(&self) -> f64 {
        if self.tss > 0.0 {
            (1.0 - self.rss / self.tss).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

impl OlsFitter {
    /// Create a new fitter with the given options.
    pub fn new(options: RegressionOptions) -> Self {
        Self { options }
    }

    /// Create a builder for configuring the fitter.
    pub fn builder() -> OlsFitterBuilder {
        OlsFitterBuilder::default()
    }

    /// Get the options used by this fitter.
    pub fn options(&self) -> &RegressionOptions {
        &self.options
    }

    /// Fit `response ~ 1 + terms` and compute coefficient inference.
    #[tracing::instrument(skip_all, fields(model = %spec, n = dataset.n_observations()))]
    pub fn fit(&self, dataset: &Dataset, spec: &ModelSpec) -> Result<FitResult, RegressionError> {
        self.options.validate()?;

        let x = spec.design_matrix(dataset)?;
        let y = dataset.response_col();
        let n = x.nrows();
        let p = x.ncols();

        // Residual df must be positive for a variance estimate.
        if n <= p {
            return Err(RegressionError::InsufficientObservations {
                needed: p + 1,
                got: n,
            });
        }

        let solver = solver_for(&self.options);
        let ls = self.solve(solver.as_ref(), &x, &y)?;
        let df = ls.residual_df();

        if self.is_exact_fit(ls.rss, ls.tss) {
            return Err(RegressionError::ZeroResidualVariance);
        }

        let mse = ls.rss / df as f64;
        let xtx_inverse = solver.gram_inverse(&x)?;
        let std_errors = CoefficientInference::standard_errors(&xtx_inverse, mse)?;
        let t_stats = CoefficientInference::t_statistics(&ls.coefficients, &std_errors);
        let p_values = CoefficientInference::p_values(&t_stats, df as f64)?;
        let (ci_lower, ci_upper) = CoefficientInference::confidence_intervals(
            &ls.coefficients,
            &std_errors,
            df as f64,
            self.options.confidence_level,
        )?;

        let terms = spec
            .coefficient_names()
            .into_iter()
            .enumerate()
            .map(|(j, name)| TermEstimate {
                name,
                estimate: ls.coefficients[j],
                std_error: std_errors[j],
                t_statistic: t_stats[j],
                p_value: p_values[j],
                conf_lower: ci_lower[j],
                conf_upper: ci_upper[j],
            })
            .collect();

        let r_squared = ls.r_squared();
        let adj_r_squared = 1.0 - (1.0 - r_squared) * (n - 1) as f64 / df as f64;

        // Overall F-test against the intercept-only model
        let (f_statistic, f_pvalue) = if p > 1 {
            let df_model = (p - 1) as f64;
            let f = ((ls.tss - ls.rss) / df_model) / mse;
            let pv = CoefficientInference::f_p_value(f, df_model, df as f64)?;
            (Some(f), Some(pv))
        } else {
            (None, None)
        };

        debug!(rss = ls.rss, r_squared, df, "fitted");

        Ok(FitResult {
            terms,
            residual_std_error: mse.sqrt(),
            residual_df: df,
            rss: ls.rss,
            tss: ls.tss,
            n_observations: n,
            residuals: ls.residuals.iter().copied().collect(),
            fitted_values: ls.fitted_values.iter().copied().collect(),
            r_squared,
            adj_r_squared,
            f_statistic,
            f_pvalue,
            confidence_level: self.options.confidence_level,
        })
    }

    /// Solve the least squares problem for an explicit design matrix.
    ///
    /// Fails with `SingularDesign` when `x` does not have full column rank.
    pub fn least_squares(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<LeastSquares, RegressionError> {
        let solver = solver_for(&self.options);
        self.solve(solver.as_ref(), x, y)
    }

    /// Whether `rss` is indistinguishable from zero relative to `tss`.
    pub(crate) fn is_exact_fit(&self, rss: f64, tss: f64) -> bool {
        rss <= 0.0 || rss <= self.options.zero_variance_tolerance * tss
    }

    fn solve(
        &self,
        solver: &dyn LinearSolver,
        x: &Mat<f64>,
        y: &Col<f64>,
    ) -> Result<LeastSquares, RegressionError> {
        let n = x.nrows();

        if n != y.nrows() {
            return Err(RegressionError::DimensionMismatch {
                name: "response".to_string(),
                expected: n,
                got: y.nrows(),
            });
        }
        if n < 2 {
            return Err(RegressionError::InsufficientObservations { needed: 2, got: n });
        }

        solver.check_full_rank(x)?;
        let coefficients = solver.solve(x, y)?;

        let fitted_values = Col::from_fn(n, |i| {
            (0..x.ncols()).map(|j| x[(i, j)] * coefficients[j]).sum::<f64>()
        });
        let residuals = Col::from_fn(n, |i| y[i] - fitted_values[i]);
        let rss: f64 = residuals.iter().map(|r| r * r).sum();

        Ok(LeastSquares {
            coefficients,
            fitted_values,
            residuals,
            rss,
            tss: total_sum_of_squares(y),
            n_observations: n,
            n_parameters: x.ncols(),
        })
    }
}

/// Builder for `OlsFitter`.
#[derive(Debug, Clone, Default)]
pub struct OlsFitterBuilder {
    builder: RegressionOptionsBuilder,
}

impl OlsFitterBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the confidence level for confidence intervals.
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.builder = self.builder.confidence_level(level);
        self
    }

    /// Set the linear-algebra back-end.
    pub fn solver(mut self, solver: SolverType) -> Self {
        self.builder = self.builder.solver(solver);
        self
    }

    /// Set the relative rank tolerance.
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.builder = self.builder.rank_tolerance(tol);
        self
    }

    /// Set the relative tolerance for detecting an exact fit.
    pub fn zero_variance_tolerance(mut self, tol: f64) -> Self {
        self.builder = self.builder.zero_variance_tolerance(tol);
        self
    }

    /// Build the fitter. Options are validated when fitting.
    pub fn build(self) -> OlsFitter {
        OlsFitter::new(self.builder.build_unchecked())
    }
}
