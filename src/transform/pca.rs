//! Principal-component orthogonalisation of predictor sets.

use faer::{Mat, Side};
use tracing::debug;

use crate::core::{RegressionError, RegressionOptions};
use crate::data::Dataset;
use crate::utils::{center_columns, covariance_of_centered};

/// Eigen-decomposition of a predictor covariance matrix and the projected scores.
#[derive(Debug, Clone)]
pub struct PrincipalComponents {
    /// Predictors the components were computed from, in input order.
    pub source_names: Vec<String>,
    /// Column means subtracted before projection.
    pub means: Vec<f64>,
    /// Component variances, in descending order.
    pub eigenvalues: Vec<f64>,
    /// Loadings: column `k` is the unit eigenvector of component `k`.
    pub loadings: Mat<f64>,
    /// Scores: column `k` is the centred data projected on component `k`.
    pub scores: Mat<f64>,
}

impl PrincipalComponents {
    /// Number of components.
    pub fn n_components(&self) -> usize {
        self.eigenvalues.len()
    }

    /// Component names `PC1, PC2, ...`.
    pub fn component_names(&self) -> Vec<String> {
        (1..=self.n_components()).map(|k| format!("PC{k}")).collect()
    }

    /// Share of total variance carried by each component.
    pub fn explained_variance_ratio(&self) -> Vec<f64> {
        let total: f64 = self.eigenvalues.iter().sum();
        if total <= 0.0 {
            return vec![0.0; self.eigenvalues.len()];
        }
        self.eigenvalues.iter().map(|v| v / total).collect()
    }

    /// Scores of component `k` (zero-based).
    pub fn component(&self, k: usize) -> Vec<f64> {
        (0..self.scores.nrows()).map(|i| self.scores[(i, k)]).collect()
    }
}

/// Produces mutually uncorrelated predictors by principal component analysis.
#[derive(Debug, Clone, Default)]
pub struct Orthogonalizer {
    options: RegressionOptions,
}

impl Orthogonalizer {
    /// Create an orthogonalizer with the given options.
    pub fn new(options: RegressionOptions) -> Self {
        Self { options }
    }

    /// Center the named predictors, eigen-decompose their covariance and
    /// project onto the eigenvectors ordered by descending eigenvalue.
    ///
    /// Fails with `DegenerateInput` for fewer than two predictors or a
    /// covariance matrix that is not positive semi-definite within
    /// `psd_tolerance`.
    #[tracing::instrument(skip_all, fields(predictors = names.len()))]
    pub fn decompose<S: AsRef<str>>(
        &self,
        dataset: &Dataset,
        names: &[S],
    ) -> Result<PrincipalComponents, RegressionError> {
        self.options.validate()?;

        if names.len() < 2 {
            return Err(RegressionError::DegenerateInput(format!(
                "principal components need at least 2 predictors, got {}",
                names.len()
            )));
        }

        let x = dataset.predictor_matrix(names)?;
        let (centered, means) = center_columns(&x);
        let (eigenvalues, loadings) = self.decompose_covariance(&covariance_of_centered(&centered))?;
        let p = eigenvalues.len();

        let scores = Mat::from_fn(centered.nrows(), p, |i, k| {
            (0..p).map(|j| centered[(i, j)] * loadings[(j, k)]).sum::<f64>()
        });

        debug!(?eigenvalues, "principal components");

        Ok(PrincipalComponents {
            source_names: names.iter().map(|s| s.as_ref().to_string()).collect(),
            means: means.iter().copied().collect(),
            eigenvalues,
            loadings,
            scores,
        })
    }

    /// Eigenvalues (descending, clamped at zero) and sign-fixed unit
    /// eigenvectors of a symmetric covariance matrix.
    ///
    /// Fails with `DegenerateInput` when the matrix has an eigenvalue below
    /// `-psd_tolerance * λmax`.
    pub fn decompose_covariance(&self, cov: &Mat<f64>) -> Result<(Vec<f64>, Mat<f64>), RegressionError> {
        let p = cov.nrows();
        if cov.ncols() != p {
            return Err(RegressionError::DimensionMismatch {
                name: "covariance columns".to_string(),
                expected: p,
                got: cov.ncols(),
            });
        }

        let eig = cov
            .as_ref()
            .self_adjoint_eigen(Side::Lower)
            .map_err(|e| RegressionError::Decomposition(format!("{e:?}")))?;
        let diag = eig.S();
        let vectors = eig.U();

        let raw: Vec<f64> = (0..diag.dim()).map(|k| diag[k]).collect();
        let lambda_max = raw.iter().copied().fold(0.0_f64, f64::max);
        let lambda_min = raw.iter().copied().fold(f64::INFINITY, f64::min);

        if !lambda_min.is_finite() || lambda_min < -self.options.psd_tolerance * lambda_max.max(f64::MIN_POSITIVE) {
            return Err(RegressionError::DegenerateInput(format!(
                "covariance matrix is not positive semi-definite (smallest eigenvalue {lambda_min:.3e})"
            )));
        }

        let mut order: Vec<usize> = (0..p).collect();
        order.sort_by(|&a, &b| raw[b].total_cmp(&raw[a]));

        let mut loadings = Mat::zeros(p, p);
        for (k, &src) in order.iter().enumerate() {
            // Fix the sign so the largest-magnitude loading is positive.
            let pivot = (0..p)
                .max_by(|&a, &b| vectors[(a, src)].abs().total_cmp(&vectors[(b, src)].abs()))
                .unwrap_or(0);
            let sign = if vectors[(pivot, src)] < 0.0 { -1.0 } else { 1.0 };
            for i in 0..p {
                loadings[(i, k)] = sign * vectors[(i, src)];
            }
        }

        let eigenvalues = order.iter().map(|&k| raw[k].max(0.0)).collect();
        Ok((eigenvalues, loadings))
    }

    /// Return `dataset` with the components appended as predictors `PC1, PC2, ...`.
    pub fn pca<S: AsRef<str>>(&self, dataset: &Dataset, names: &[S]) -> Result<Dataset, RegressionError> {
        let components = self.decompose(dataset, names)?;

        components
            .component_names()
            .into_iter()
            .enumerate()
            .try_fold(dataset.clone(), |ds, (k, name)| {
                ds.with_predictor(name, components.component(k))
            })
    }
}

/// Append principal components of the named predictors using default options.
pub fn pca<S: AsRef<str>>(dataset: &Dataset, names: &[S]) -> Result<Dataset, RegressionError> {
    Orthogonalizer::default().pca(dataset, names)
}
