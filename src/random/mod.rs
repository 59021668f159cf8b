//! Seeded, reproducible random deviates.
//!
//! Every generator in the crate takes an explicit [`RandomStream`]; there is
//! no hidden global stream. Two streams built from the same seed yield the
//! same values for the same sequence of calls.

use rand::distr::Uniform;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::core::RegressionError;

/// A seeded pseudo-random stream producing uniform and normal deviates.
#[derive(Debug, Clone)]
pub struct RandomStream {
    seed: u64,
    rng: StdRng,
}

impl RandomStream {
    /// Create a stream from an integer seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The seed this stream was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Mutable access to the underlying generator, for use with other `rand` consumers.
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Draw `n` values uniformly from `[low, high)`.
    pub fn uniform(&mut self, low: f64, high: f64, n: usize) -> Result<Vec<f64>, RegressionError> {
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(RegressionError::InvalidInput(format!(
                "uniform range [{low}, {high}) is empty or not finite"
            )));
        }
        let dist = Uniform::new(low, high)
            .map_err(|e| RegressionError::InvalidInput(format!("uniform({low}, {high}): {e}")))?;
        Ok(dist.sample_iter(&mut self.rng).take(n).collect())
    }

    /// Draw `n` values from a normal distribution with the given mean and standard deviation.
    pub fn normal(&mut self, mean: f64, sd: f64, n: usize) -> Result<Vec<f64>, RegressionError> {
        if !(mean.is_finite() && sd.is_finite() && sd >= 0.0) {
            return Err(RegressionError::InvalidInput(format!(
                "normal(mean = {mean}, sd = {sd}) needs a finite mean and a finite, non-negative sd"
            )));
        }
        let dist = Normal::new(mean, sd)
            .map_err(|e| RegressionError::InvalidInput(format!("normal({mean}, {sd}): {e}")))?;
        Ok(dist.sample_iter(&mut self.rng).take(n).collect())
    }
}
