//! Datasets and synthetic data generation.

mod dataset;
mod generate;

pub use dataset::{Dataset, Observation, INTERCEPT};
pub use generate::{generate_correlated, DataGenerator, GeneratorConfig, GeneratorConfigBuilder};
