//! Order-dependent (Type I) sums of squares.

use faer::Mat;
use tracing::debug;

use super::{AnovaRow, AnovaTable, ResidualRow};
use crate::core::{ModelSpec, RegressionError, RegressionOptions};
use crate::data::Dataset;
use crate::inference::CoefficientInference;
use crate::solvers::OlsFitter;
use crate::utils::total_sum_of_squares;

/// Sequential ANOVA decomposer.
///
/// For terms `t_1 ... t_k` in model order, the sum of squares of `t_i` is
/// `RSS(t_1..t_{i-1}) - RSS(t_1..t_i)`, where `RSS()` of the empty prefix is
/// the total corrected sum of squares. Variance shared by correlated terms is
/// therefore credited entirely to whichever of them is listed first;
/// reordering the model moves that credit without changing the explained or
/// total sum of squares.
#[derive(Debug, Clone, Default)]
pub struct SequentialAnova {
    fitter: OlsFitter,
}

impl SequentialAnova {
    /// Create a decomposer with the given options.
    pub fn new(options: RegressionOptions) -> Self {
        Self {
            fitter: OlsFitter::new(options),
        }
    }

    /// Compute the sequential ANOVA table of `spec` on `dataset`.
    #[tracing::instrument(skip_all, fields(model = %spec, n = dataset.n_observations()))]
    pub fn decompose(&self, dataset: &Dataset, spec: &ModelSpec) -> Result<AnovaTable, RegressionError> {
        self.fitter.options().validate()?;

        let x = spec.design_matrix(dataset)?;
        let y = dataset.response_col();
        let n = x.nrows();
        let p = x.ncols();

        if n <= p {
            return Err(RegressionError::InsufficientObservations {
                needed: p + 1,
                got: n,
            });
        }

        let tss = total_sum_of_squares(&y);

        // Nested fits on growing prefixes of the design matrix.
        let mut previous_rss = tss;
        let mut sums = Vec::with_capacity(spec.n_terms());
        for i in 1..p {
            let x_prefix = Mat::from_fn(n, i + 1, |r, c| x[(r, c)]);
            let fit = self.fitter.least_squares(&x_prefix, &y)?;

            let ss = previous_rss - fit.rss;
            debug!(term = %spec.terms()[i - 1], sum_sq = ss, "sequential sum of squares");

            sums.push(ss);
            previous_rss = fit.rss;
        }

        let rss = previous_rss;
        if self.fitter.is_exact_fit(rss, tss) {
            return Err(RegressionError::ZeroResidualVariance);
        }

        let df_resid = n - p;
        let mse = rss / df_resid as f64;

        let rows = spec
            .terms()
            .iter()
            .zip(sums)
            .map(|(term, ss)| {
                let f = ss / mse;
                Ok(AnovaRow {
                    term: term.clone(),
                    sum_sq: ss,
                    df: 1,
                    mean_sq: ss,
                    f_statistic: f,
                    p_value: CoefficientInference::f_p_value(f, 1.0, df_resid as f64)?,
                })
            })
            .collect::<Result<Vec<_>, RegressionError>>()?;

        let residual = ResidualRow {
            sum_sq: rss,
            df: df_resid,
            mean_sq: mse,
        };

        Ok(AnovaTable::new(spec.clone(), rows, residual, tss))
    }
}

/// Sequential ANOVA with default options.
pub fn sequential_anova(dataset: &Dataset, spec: &ModelSpec) -> Result<AnovaTable, RegressionError> {
    SequentialAnova::default().decompose(dataset, spec)
}
