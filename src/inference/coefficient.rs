//! Coefficient inference calculations.

use faer::{Col, Mat};
use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};

use crate::core::RegressionError;

/// Computes inference statistics for regression coefficients.
pub struct CoefficientInference;

impl CoefficientInference {
    /// Compute standard errors from the inverse cross-product matrix.
    ///
    /// SE(β_j) = sqrt(σ² * (X'X)^(-1)_{jj})
    pub fn standard_errors(
        xtx_inverse: &Mat<f64>,
        mse: f64,
    ) -> Result<Col<f64>, RegressionError> {
        let p = xtx_inverse.nrows();
        let mut se = Col::zeros(p);

        for j in 0..p {
            let var = mse * xtx_inverse[(j, j)];
            if !(var > 0.0 && var.is_finite()) {
                return Err(RegressionError::SingularDesign {
                    rank: j,
                    columns: p,
                });
            }
            se[j] = var.sqrt();
        }

        Ok(se)
    }

    /// Compute t-statistics for coefficients.
    ///
    /// t_j = β_j / SE(β_j)
    pub fn t_statistics(coefficients: &Col<f64>, std_errors: &Col<f64>) -> Col<f64> {
        Col::from_fn(coefficients.nrows(), |j| coefficients[j] / std_errors[j])
    }

    /// Compute two-sided p-values from t-statistics.
    ///
    /// p_j = 2 * P(T > |t_j|) where T ~ t(df)
    pub fn p_values(t_statistics: &Col<f64>, df: f64) -> Result<Col<f64>, RegressionError> {
        let t_dist = students_t(df)?;
        Ok(Col::from_fn(t_statistics.nrows(), |j| {
            (2.0 * t_dist.sf(t_statistics[j].abs())).min(1.0)
        }))
    }

    /// Compute confidence intervals for coefficients.
    ///
    /// CI_j = β_j ± t_{α/2, df} * SE(β_j)
    pub fn confidence_intervals(
        coefficients: &Col<f64>,
        std_errors: &Col<f64>,
        df: f64,
        confidence_level: f64,
    ) -> Result<(Col<f64>, Col<f64>), RegressionError> {
        let t_dist = students_t(df)?;
        let alpha = 1.0 - confidence_level;
        let t_crit = t_dist.inverse_cdf(1.0 - alpha / 2.0);

        let n = coefficients.nrows();
        let lower = Col::from_fn(n, |j| coefficients[j] - t_crit * std_errors[j]);
        let upper = Col::from_fn(n, |j| coefficients[j] + t_crit * std_errors[j]);

        Ok((lower, upper))
    }

    /// Upper-tail p-value of an F statistic with `(df1, df2)` degrees of freedom.
    pub fn f_p_value(f_statistic: f64, df1: f64, df2: f64) -> Result<f64, RegressionError> {
        let f_dist = FisherSnedecor::new(df1, df2).map_err(|e| {
            RegressionError::InvalidInput(format!("F({df1}, {df2}) distribution: {e}"))
        })?;
        Ok(f_dist.sf(f_statistic.max(0.0)))
    }
}

fn students_t(df: f64) -> Result<StudentsT, RegressionError> {
    if df <= 0.0 {
        return Err(RegressionError::InsufficientObservations {
            needed: 1,
            got: 0,
        });
    }
    StudentsT::new(0.0, 1.0, df)
        .map_err(|e| RegressionError::InvalidInput(format!("t({df}) distribution: {e}")))
}
