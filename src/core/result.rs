//! Fitted model result structures.

use crate::data::Dataset;

use super::RegressionError;

/// Estimate and inference for a single model term.
#[derive(Debug, Clone, PartialEq)]
pub struct TermEstimate {
    /// Term name; the intercept is `(Intercept)`.
    pub name: String,
    /// Estimated coefficient.
    pub estimate: f64,
    /// Standard error of the estimate.
    pub std_error: f64,
    /// t-statistic `estimate / std_error`.
    pub t_statistic: f64,
    /// Two-sided p-value from Student's t with the residual degrees of freedom.
    pub p_value: f64,
    /// Lower bound of the confidence interval.
    pub conf_lower: f64,
    /// Upper bound of the confidence interval.
    pub conf_upper: f64,
}

impl TermEstimate {
    /// Whether the term is significant at level `alpha` (two-sided).
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Complete result from an OLS fit.
#[derive(Debug, Clone)]
pub struct FitResult {
    // ========== Coefficients ==========
    /// One entry per coefficient, intercept first, then terms in model order.
    pub terms: Vec<TermEstimate>,

    // ========== Residual Information ==========
    /// Residual standard error `sqrt(RSS / df)`.
    pub residual_std_error: f64,

    /// Residual degrees of freedom `N - (k + 1)`.
    pub residual_df: usize,

    /// Residual sum of squares.
    pub rss: f64,

    /// Total corrected sum of squares of the response.
    pub tss: f64,

    /// Number of observations.
    pub n_observations: usize,

    /// Residuals (y - fitted_values).
    pub residuals: Vec<f64>,

    /// Fitted values.
    pub fitted_values: Vec<f64>,

    // ========== Fit Statistics ==========
    /// Coefficient of determination (R²).
    pub r_squared: f64,

    /// Adjusted R².
    pub adj_r_squared: f64,

    /// F-statistic for the model against the intercept-only model.
    pub f_statistic: Option<f64>,

    /// P-value for the F-statistic.
    pub f_pvalue: Option<f64>,

    /// Confidence level used for intervals.
    pub confidence_level: f64,
}

impl FitResult {
    /// Estimate for the named term (use `(Intercept)` for the intercept).
    pub fn term(&self, name: &str) -> Option<&TermEstimate> {
        self.terms.iter().find(|t| t.name == name)
    }

    /// Intercept estimate.
    pub fn intercept(&self) -> &TermEstimate {
        &self.terms[0]
    }

    /// Coefficients of the predictor terms, excluding the intercept.
    pub fn slopes(&self) -> &[TermEstimate] {
        &self.terms[1..]
    }

    /// Coefficient values, intercept first.
    pub fn coefficients(&self) -> Vec<f64> {
        self.terms.iter().map(|t| t.estimate).collect()
    }

    /// Number of estimated parameters, including the intercept.
    pub fn n_parameters(&self) -> usize {
        self.terms.len()
    }

    /// Mean squared error `RSS / df`.
    pub fn mse(&self) -> f64 {
        self.residual_std_error * self.residual_std_error
    }

    /// Explained (model) sum of squares `TSS - RSS`.
    pub fn explained_sum_sq(&self) -> f64 {
        self.tss - self.rss
    }

    /// Predict the response for every observation of `dataset`.
    pub fn predict(&self, dataset: &Dataset) -> Result<Vec<f64>, RegressionError> {
        let columns = self
            .slopes()
            .iter()
            .map(|t| dataset.require(&t.name).map(|col| (t.estimate, col)))
            .collect::<Result<Vec<_>, _>>()?;

        let intercept = self.intercept().estimate;
        Ok((0..dataset.n_observations())
            .map(|i| {
                intercept
                    + columns
                        .iter()
                        .map(|(beta, col)| beta * col[i])
                        .sum::<f64>()
            })
            .collect())
    }
}
