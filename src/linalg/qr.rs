//! QR back-end.

use faer::{Col, Mat};

use super::{back_substitute, outer_self, LinearSolver};
use crate::core::RegressionError;

/// Least squares through Householder QR of the design matrix.
///
/// Rank is read from the diagonal of a column-pivoted QR of the design with
/// every column scaled to unit norm: a pivot is zero when
/// `|R_ii| <= tolerance * |R_00|`. Scaling makes the test independent of the
/// units each predictor is measured in.
#[derive(Debug, Clone, Copy)]
pub struct QrSolver {
    tolerance: f64,
}

impl QrSolver {
    /// Create a QR solver with the given relative rank tolerance.
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Thin QR factors `(Q, R)` with `R` the leading `p x p` block.
    fn triangular_factor(&self, a: &Mat<f64>) -> Result<(Mat<f64>, Mat<f64>), RegressionError> {
        let p = a.ncols();
        if a.nrows() < p {
            return Err(RegressionError::SingularDesign {
                rank: a.nrows(),
                columns: p,
            });
        }

        let qr = a.qr();
        let q = qr.compute_Q();
        let r = qr.R();
        let r = Mat::from_fn(p, p, |i, j| if j >= i { r[(i, j)] } else { 0.0 });

        Ok((q, r))
    }
}

/// Copy of `a` with each non-zero column divided by its Euclidean norm.
fn unit_columns(a: &Mat<f64>) -> Mat<f64> {
    let norms: Vec<f64> = (0..a.ncols())
        .map(|j| (0..a.nrows()).map(|i| a[(i, j)] * a[(i, j)]).sum::<f64>().sqrt())
        .collect();
    Mat::from_fn(a.nrows(), a.ncols(), |i, j| {
        if norms[j] > 0.0 {
            a[(i, j)] / norms[j]
        } else {
            0.0
        }
    })
}

impl Default for QrSolver {
    fn default() -> Self {
        Self::new(1e-7)
    }
}

impl LinearSolver for QrSolver {
    fn rank(&self, a: &Mat<f64>) -> usize {
        let k = a.nrows().min(a.ncols());
        if k == 0 {
            return 0;
        }

        let qr = unit_columns(a).col_piv_qr();
        let r = qr.R();

        let lead = r[(0, 0)].abs();
        if lead == 0.0 {
            return 0;
        }

        // Pivoting keeps |R_ii| non-increasing, so the first small pivot ends the rank.
        let mut rank = 0;
        for i in 0..k {
            if r[(i, i)].abs() > self.tolerance * lead {
                rank += 1;
            } else {
                break;
            }
        }
        rank
    }

    fn solve(&self, a: &Mat<f64>, b: &Col<f64>) -> Result<Col<f64>, RegressionError> {
        let (q, r) = self.triangular_factor(a)?;
        let qtb = q.transpose() * b;
        let rhs: Vec<f64> = (0..a.ncols()).map(|i| qtb[i]).collect();
        Ok(back_substitute(|i, j| r[(i, j)], &rhs, a.ncols()))
    }

    fn gram_inverse(&self, a: &Mat<f64>) -> Result<Mat<f64>, RegressionError> {
        // (X'X)⁻¹ = R⁻¹ R⁻ᵀ
        let (_, r) = self.triangular_factor(a)?;
        let p = r.nrows();

        let mut r_inv = Mat::zeros(p, p);
        for col in 0..p {
            let unit: Vec<f64> = (0..p).map(|i| if i == col { 1.0 } else { 0.0 }).collect();
            let x = back_substitute(|i, j| r[(i, j)], &unit, p);
            for i in 0..p {
                r_inv[(i, col)] = x[i];
            }
        }

        Ok(outer_self(&r_inv))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_detects_duplicate_column() {
        let x = Mat::from_fn(10, 3, |i, j| match j {
            0 => 1.0,
            _ => i as f64 * 1.5,
        });
        assert_eq!(QrSolver::default().rank(&x), 2);
    }

    #[test]
    fn test_full_rank() {
        let x = Mat::from_fn(10, 3, |i, j| match j {
            0 => 1.0,
            1 => i as f64,
            _ => (i * i) as f64,
        });
        let solver = QrSolver::default();
        assert_eq!(solver.rank(&x), 3);
        assert!(solver.check_full_rank(&x).is_ok());
    }

    #[test]
    fn test_rank_ignores_column_scale() {
        let x = Mat::from_fn(30, 3, |i, j| match j {
            0 => 1.0,
            1 => 1e4 * i as f64,
            _ => 1e-4 * (1.7 * i as f64).sin(),
        });
        assert_eq!(QrSolver::default().rank(&x), 3);
    }

    #[test]
    fn test_rank_counts_zero_column() {
        let x = Mat::from_fn(6, 2, |i, j| if j == 0 { i as f64 } else { 0.0 });
        assert_eq!(QrSolver::default().rank(&x), 1);
    }

    #[test]
    fn test_gram_inverse_matches_closed_form() {
        // Simple regression on x = 0..4: (X'X)⁻¹[1,1] = 1 / Sxx = 1 / 10
        let x = Mat::from_fn(5, 2, |i, j| if j == 0 { 1.0 } else { i as f64 });
        let inv = QrSolver::default().gram_inverse(&x).unwrap();

        assert!((inv[(1, 1)] - 0.1).abs() < 1e-12);
        // (X'X)⁻¹[0,0] = 1/n + mean² / Sxx = 0.2 + 4 / 10
        assert!((inv[(0, 0)] - 0.6).abs() < 1e-12);
        assert!((inv[(0, 1)] - inv[(1, 0)]).abs() < 1e-12);
    }

    #[test]
    fn test_solve_exact_system() {
        let x = Mat::from_fn(4, 2, |i, j| if j == 0 { 1.0 } else { i as f64 });
        let y = Col::from_fn(4, |i| 3.0 - 0.5 * i as f64);
        let beta = QrSolver::default().solve(&x, &y).unwrap();
        assert!((beta[0] - 3.0).abs() < 1e-12);
        assert!((beta[1] + 0.5).abs() < 1e-12);
    }
}
