//! Synthetic datasets with induced correlation between predictors.

use tracing::debug;

use super::Dataset;
use crate::core::{ModelSpec, RegressionError};
use crate::random::RandomStream;

/// Configuration for [`DataGenerator`].
///
/// Predictor `X1` is drawn from `U(x_low, x_high)`; every further predictor
/// is `Xk = X1 + U(0, base_spread)`, so correlation is induced but never
/// exact. The response is `intercept + Σ β_k X_k + N(0, noise_sd)`, with one
/// caller-supplied coefficient per predictor.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Number of observations (at least 2).
    pub n_observations: usize,
    /// Lower bound of the `X1` range.
    pub x_low: f64,
    /// Upper bound of the `X1` range.
    pub x_high: f64,
    /// Width of the uniform noise separating each further predictor from `X1`.
    pub base_spread: f64,
    /// Standard deviation of the response noise.
    pub noise_sd: f64,
    /// True intercept.
    pub intercept: f64,
    /// True coefficients, one per predictor `X1, X2, ...`.
    pub coefficients: Vec<f64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            n_observations: 20,
            x_low: 0.0,
            x_high: 50.0,
            base_spread: 10.0,
            noise_sd: 1.0,
            intercept: 0.0,
            coefficients: vec![1.0],
        }
    }
}

impl GeneratorConfig {
    /// Create a new builder for generator options.
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), RegressionError> {
        if self.n_observations < 2 {
            return Err(RegressionError::InsufficientObservations {
                needed: 2,
                got: self.n_observations,
            });
        }
        if self.coefficients.is_empty() {
            return Err(RegressionError::InvalidInput(
                "at least one predictor coefficient is required".to_string(),
            ));
        }
        if !(self.x_low.is_finite() && self.x_high.is_finite() && self.x_low < self.x_high) {
            return Err(RegressionError::InvalidInput(format!(
                "predictor range [{}, {}) is empty or not finite",
                self.x_low, self.x_high
            )));
        }
        if self.coefficients.len() > 1 && !(self.base_spread > 0.0 && self.base_spread.is_finite()) {
            return Err(RegressionError::InvalidInput(format!(
                "base_spread must be positive and finite, got {}",
                self.base_spread
            )));
        }
        if !(self.noise_sd >= 0.0 && self.noise_sd.is_finite()) {
            return Err(RegressionError::InvalidInput(format!(
                "noise_sd must be non-negative and finite, got {}",
                self.noise_sd
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|b| !b.is_finite()) {
            return Err(RegressionError::InvalidInput(
                "true coefficients must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Names of the generated predictors, `X1, X2, ...`.
    pub fn predictor_names(&self) -> Vec<String> {
        (1..=self.coefficients.len()).map(|k| format!("X{k}")).collect()
    }
}

/// Builder for `GeneratorConfig`.
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// Set the number of observations.
    pub fn n_observations(mut self, n: usize) -> Self {
        self.config.n_observations = n;
        self
    }

    /// Set the range of `X1`.
    pub fn x_range(mut self, low: f64, high: f64) -> Self {
        self.config.x_low = low;
        self.config.x_high = high;
        self
    }

    /// Set the width of the uniform noise added to `X1` for further predictors.
    pub fn base_spread(mut self, spread: f64) -> Self {
        self.config.base_spread = spread;
        self
    }

    /// Set the response noise standard deviation.
    pub fn noise_sd(mut self, sd: f64) -> Self {
        self.config.noise_sd = sd;
        self
    }

    /// Set the true intercept.
    pub fn intercept(mut self, intercept: f64) -> Self {
        self.config.intercept = intercept;
        self
    }

    /// Set the true coefficients; their count fixes the number of predictors.
    pub fn coefficients(mut self, coefficients: impl Into<Vec<f64>>) -> Self {
        self.config.coefficients = coefficients.into();
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<GeneratorConfig, RegressionError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Builds synthetic datasets from a [`GeneratorConfig`].
#[derive(Debug, Clone, Default)]
pub struct DataGenerator {
    config: GeneratorConfig,
}

impl DataGenerator {
    /// Create a generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// The configuration used by this generator.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate correlated predictors and a response from `stream`.
    ///
    /// Draw order: all of `X1`, then the spread noise of each further
    /// predictor in turn, then the response noise.
    #[tracing::instrument(skip_all, fields(n = self.config.n_observations, seed = stream.seed()))]
    pub fn generate_correlated(&self, stream: &mut RandomStream) -> Result<Dataset, RegressionError> {
        let cfg = &self.config;
        cfg.validate()?;

        let n = cfg.n_observations;
        let x1 = stream.uniform(cfg.x_low, cfg.x_high, n)?;

        let mut columns = vec![x1];
        for _ in 1..cfg.coefficients.len() {
            let spread = stream.uniform(0.0, cfg.base_spread, n)?;
            let xk = columns[0].iter().zip(&spread).map(|(x, s)| x + s).collect();
            columns.push(xk);
        }

        let noise = stream.normal(0.0, cfg.noise_sd, n)?;
        let response = (0..n)
            .map(|i| {
                cfg.intercept
                    + cfg
                        .coefficients
                        .iter()
                        .zip(&columns)
                        .map(|(beta, col)| beta * col[i])
                        .sum::<f64>()
                    + noise[i]
            })
            .collect();

        debug!(predictors = columns.len(), "generated correlated dataset");

        Dataset::from_columns(response, cfg.predictor_names().into_iter().zip(columns))
    }

    /// Replace the response of `dataset` with `intercept + Σ β_k term_k + N(0, noise_sd)`.
    ///
    /// `terms` may name any predictors of the dataset, for example principal
    /// components added by the orthogonalizer.
    pub fn simulate_response(
        dataset: Dataset,
        terms: &ModelSpec,
        intercept: f64,
        coefficients: &[f64],
        noise_sd: f64,
        stream: &mut RandomStream,
    ) -> Result<Dataset, RegressionError> {
        if coefficients.len() != terms.n_terms() {
            return Err(RegressionError::InvalidInput(format!(
                "{} coefficients supplied for {} terms",
                coefficients.len(),
                terms.n_terms()
            )));
        }

        let n = dataset.n_observations();
        let columns = dataset.lookup(terms.terms())?;
        let noise = stream.normal(0.0, noise_sd, n)?;

        let response = (0..n)
            .map(|i| {
                intercept
                    + coefficients
                        .iter()
                        .zip(&columns)
                        .map(|(beta, col)| beta * col[i])
                        .sum::<f64>()
                    + noise[i]
            })
            .collect();

        dataset.with_response(response)
    }
}

/// Generate a correlated dataset from a fresh stream seeded with `seed`.
pub fn generate_correlated(config: &GeneratorConfig, seed: u64) -> Result<Dataset, RegressionError> {
    DataGenerator::new(config.clone()).generate_correlated(&mut RandomStream::new(seed))
}
