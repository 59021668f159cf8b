//! Cholesky back-end on the cross-product matrix.

use faer::linalg::solvers::{DenseSolveCore, Llt, Solve};
use faer::{Col, Mat, Side};

use super::LinearSolver;
use crate::core::RegressionError;

/// Least squares through the normal equations `X'X beta = X'y`.
///
/// Rank is taken column by column on `X'X` scaled to unit diagonal: a column
/// is deficient when its Cholesky pivot against the columns kept so far is
/// at most `tolerance²`, the squared analogue of the QR rule.
#[derive(Debug, Clone, Copy)]
pub struct CholeskySolver {
    tolerance: f64,
}

impl CholeskySolver {
    /// Create a Cholesky solver with the given relative rank tolerance.
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// `X'X` with rows and columns divided by the square roots of its diagonal.
    fn correlation_gram(a: &Mat<f64>) -> Mat<f64> {
        let g = a.transpose() * a;
        let p = g.nrows();
        Mat::from_fn(p, p, |i, j| {
            let d = (g[(i, i)] * g[(j, j)]).sqrt();
            if d > 0.0 {
                g[(i, j)] / d
            } else {
                0.0
            }
        })
    }

    /// Factor `X'X`, failing with `SingularDesign` below full column rank.
    fn factor(&self, a: &Mat<f64>) -> Result<Llt<f64>, RegressionError> {
        let p = a.ncols();
        let rank = self.rank(a);
        if rank < p {
            return Err(RegressionError::SingularDesign { rank, columns: p });
        }

        (a.transpose() * a)
            .llt(Side::Lower)
            .map_err(|e| RegressionError::Decomposition(format!("Cholesky of X'X: {e}")))
    }
}

impl Default for CholeskySolver {
    fn default() -> Self {
        Self::new(1e-7)
    }
}

impl LinearSolver for CholeskySolver {
    fn rank(&self, a: &Mat<f64>) -> usize {
        let c = Self::correlation_gram(a);
        let threshold = self.tolerance * self.tolerance;

        // Greedily keep each column whose trailing pivot stays above the threshold.
        let mut kept: Vec<usize> = Vec::with_capacity(c.nrows());
        for j in 0..c.nrows() {
            if c[(j, j)] <= 0.0 {
                continue;
            }
            let mut trial = kept.clone();
            trial.push(j);
            let k = trial.len();

            let sub = Mat::from_fn(k, k, |r, s| c[(trial[r], trial[s])]);
            if let Ok(llt) = sub.llt(Side::Lower) {
                let pivot = llt.L()[(k - 1, k - 1)];
                if pivot * pivot > threshold {
                    kept = trial;
                }
            }
        }
        kept.len()
    }

    fn solve(&self, a: &Mat<f64>, b: &Col<f64>) -> Result<Col<f64>, RegressionError> {
        let llt = self.factor(a)?;
        let xtb = a.transpose() * b;
        Ok(llt.solve(&xtb))
    }

    fn gram_inverse(&self, a: &Mat<f64>) -> Result<Mat<f64>, RegressionError> {
        Ok(self.factor(a)?.inverse())
    }
}
