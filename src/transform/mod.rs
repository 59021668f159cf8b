//! Predictor transformations.

mod pca;

pub use pca::{pca, Orthogonalizer, PrincipalComponents};
