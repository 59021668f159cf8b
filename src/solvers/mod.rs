//! Least squares fitting.

mod ols;

pub use ols::{LeastSquares, OlsFitter, OlsFitterBuilder};
