//! Core types: options, errors, model specifications and fit results.

mod error;
mod options;
mod result;
mod spec;

pub use error::RegressionError;
pub use options::{OptionsError, RegressionOptions, RegressionOptionsBuilder, SolverType};
pub use result::{FitResult, TermEstimate};
pub use spec::ModelSpec;
