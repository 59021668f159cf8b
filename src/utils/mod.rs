//! Shared numeric helpers.

mod matrix;

pub use matrix::{center_columns, covariance_of_centered, total_sum_of_squares};
