//! Linear-algebra capability used by the least squares fitter.
//!
//! The fitter only needs two things from a back-end: a rank check and a
//! least squares solve (plus the inverse cross-product for standard errors).
//! [`LinearSolver`] captures exactly that so the numeric library behind it
//! can be swapped without touching the statistics code.
//!
//! - [`QrSolver`]: Householder QR of the design matrix (faer)
//! - [`CholeskySolver`]: Cholesky factorisation of `X'X`

mod cholesky;
mod qr;

pub use cholesky::CholeskySolver;
pub use qr::QrSolver;

use faer::{Col, Mat};

use crate::core::{RegressionError, RegressionOptions, SolverType};

/// A linear-algebra back-end for full-rank least squares problems.
pub trait LinearSolver {
    /// Numerical rank of `a`.
    fn rank(&self, a: &Mat<f64>) -> usize;

    /// Least squares solution of `a * beta = b`.
    ///
    /// `a` must have full column rank.
    fn solve(&self, a: &Mat<f64>, b: &Col<f64>) -> Result<Col<f64>, RegressionError>;

    /// Inverse of the cross-product matrix `(a'a)⁻¹`.
    fn gram_inverse(&self, a: &Mat<f64>) -> Result<Mat<f64>, RegressionError>;

    /// Fail with `SingularDesign` unless `a` has full column rank.
    fn check_full_rank(&self, a: &Mat<f64>) -> Result<(), RegressionError> {
        let rank = self.rank(a);
        if rank < a.ncols() {
            return Err(RegressionError::SingularDesign {
                rank,
                columns: a.ncols(),
            });
        }
        Ok(())
    }
}

/// Build the back-end selected by `options`.
pub fn solver_for(options: &RegressionOptions) -> Box<dyn LinearSolver> {
    match options.solver {
        SolverType::Qr => Box::new(QrSolver::new(options.rank_tolerance)),
        SolverType::Cholesky => Box::new(CholeskySolver::new(options.rank_tolerance)),
    }
}

/// Solve `r * x = rhs` for the leading `p x p` upper-triangular block of `r`.
fn back_substitute(r: impl Fn(usize, usize) -> f64, rhs: &[f64], p: usize) -> Col<f64> {
    let mut x = Col::zeros(p);
    for i in (0..p).rev() {
        let mut sum = rhs[i];
        for j in (i + 1)..p {
            sum -= r(i, j) * x[j];
        }
        x[i] = sum / r(i, i);
    }
    x
}

/// `m * m'` for a square matrix.
fn outer_self(m: &Mat<f64>) -> Mat<f64> {
    let p = m.nrows();
    Mat::from_fn(p, p, |i, j| (0..m.ncols()).map(|k| m[(i, k)] * m[(j, k)]).sum())
}
