//! Variance Inflation Factor (VIF) for multicollinearity detection.

use faer::{Col, Mat};
use tracing::{debug, warn};

use crate::core::{RegressionError, RegressionOptions};
use crate::data::Dataset;
use crate::solvers::OlsFitter;

/// VIF above which a predictor is reported with a warning.
const HIGH_VIF: f64 = 10.0;

/// Variance inflation factors keyed by predictor name, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct VifVector {
    entries: Vec<(String, f64)>,
}

impl VifVector {
    /// VIF of the named predictor.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, v)| v)
    }

    /// `(name, VIF)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Number of predictors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the vector is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest VIF.
    pub fn max(&self) -> f64 {
        self.entries.iter().map(|&(_, v)| v).fold(1.0, f64::max)
    }

    /// Identify predictors with high multicollinearity.
    ///
    /// Returns names of predictors with VIF > threshold.
    /// Common threshold: 5 or 10.
    pub fn high(&self, threshold: f64) -> Vec<&str> {
        self.iter()
            .filter(|&(_, v)| v > threshold)
            .map(|(n, _)| n)
            .collect()
    }
}

/// Computes Variance Inflation Factors.
///
/// For predictor j:
///
/// VIF_j = 1 / (1 - R²_j)
///
/// where R²_j is the R² from regressing x_j on all other predictors (with an
/// intercept).
///
/// # Interpretation
/// - VIF = 1: No correlation with other predictors
/// - VIF > 5: Moderate multicollinearity (some sources say > 10)
/// - VIF > 10: High multicollinearity
#[derive(Debug, Clone, Default)]
pub struct VifCalculator {
    fitter: OlsFitter,
}

impl VifCalculator {
    /// Create a calculator with the given options.
    pub fn new(options: RegressionOptions) -> Self {
        Self {
            fitter: OlsFitter::new(options),
        }
    }

    /// Compute the VIF of each named predictor against the others.
    ///
    /// Fails with `PerfectCollinearity` when some predictor is an exact
    /// linear combination of the others (or constant), since its VIF is
    /// undefined.
    #[tracing::instrument(skip_all, fields(predictors = names.len()))]
    pub fn compute<S: AsRef<str>>(&self, dataset: &Dataset, names: &[S]) -> Result<VifVector, RegressionError> {
        let options = self.fitter.options();
        options.validate()?;

        if names.is_empty() {
            return Err(RegressionError::InvalidInput(
                "VIF needs at least one predictor".to_string(),
            ));
        }

        let columns = dataset.lookup(names)?;
        let n = dataset.n_observations();
        let p = columns.len();

        // A constant predictor is collinear with the intercept.
        if let Some(j) = columns.iter().position(|c| c.iter().all(|&v| v == c[0])) {
            return Err(RegressionError::PerfectCollinearity {
                predictor: names[j].as_ref().to_string(),
            });
        }

        let mut entries = Vec::with_capacity(p);
        for (j, name) in names.iter().map(|s| s.as_ref()).enumerate() {
            let perfect = || RegressionError::PerfectCollinearity {
                predictor: name.to_string(),
            };

            let target = columns[j];

            // Intercept plus every other predictor
            let others: Vec<&[f64]> = (0..p).filter(|&k| k != j).map(|k| columns[k]).collect();
            let x_other = Mat::from_fn(n, others.len() + 1, |i, c| {
                if c == 0 {
                    1.0
                } else {
                    others[c - 1][i]
                }
            });
            let y_j = Col::from_fn(n, |i| target[i]);

            let fit = match self.fitter.least_squares(&x_other, &y_j) {
                Ok(fit) => fit,
                Err(RegressionError::SingularDesign { .. }) => return Err(perfect()),
                Err(e) => return Err(e),
            };

            if fit.tss <= 0.0 {
                return Err(perfect());
            }
            let one_minus_r2 = fit.rss / fit.tss;
            if one_minus_r2 <= options.collinearity_tolerance {
                return Err(perfect());
            }

            // VIF is always >= 1
            let vif_j = (1.0 / one_minus_r2).max(1.0);
            if vif_j > HIGH_VIF {
                warn!(predictor = name, vif = vif_j, "high variance inflation");
            } else {
                debug!(predictor = name, vif = vif_j, "variance inflation");
            }
            entries.push((name.to_string(), vif_j));
        }

        Ok(VifVector { entries })
    }
}

/// Variance inflation factors with default options.
pub fn vif<S: AsRef<str>>(dataset: &Dataset, names: &[S]) -> Result<VifVector, RegressionError> {
    VifCalculator::default().compute(dataset, names)
}
