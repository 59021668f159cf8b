//! Matrix utility functions.

use faer::{Col, Mat};

/// Center a matrix by subtracting column means.
pub fn center_columns(x: &Mat<f64>) -> (Mat<f64>, Col<f64>) {
    let n_rows = x.nrows();
    let n_cols = x.ncols();

    let mut means = Col::zeros(n_cols);
    let mut centered = Mat::zeros(n_rows, n_cols);

    for j in 0..n_cols {
        let sum: f64 = (0..n_rows).map(|i| x[(i, j)]).sum();
        means[j] = sum / n_rows as f64;

        for i in 0..n_rows {
            centered[(i, j)] = x[(i, j)] - means[j];
        }
    }

    (centered, means)
}

/// Total corrected sum of squares `Σ (y_i - ȳ)²`.
pub fn total_sum_of_squares(y: &Col<f64>) -> f64 {
    let n = y.nrows();
    if n == 0 {
        return 0.0;
    }
    let mean: f64 = y.iter().sum::<f64>() / n as f64;
    y.iter().map(|&yi| (yi - mean).powi(2)).sum()
}

/// Sample covariance matrix (divisor `n - 1`) of already centered columns.
pub fn covariance_of_centered(centered: &Mat<f64>) -> Mat<f64> {
    let n = centered.nrows();
    let p = centered.ncols();
    let denom = (n as f64 - 1.0).max(1.0);

    Mat::from_fn(p, p, |a, b| {
        (0..n)
            .map(|i| centered[(i, a)] * centered[(i, b)])
            .sum::<f64>()
            / denom
    })
}
