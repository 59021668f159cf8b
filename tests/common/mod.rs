//! Common test utilities and data generators.
#![allow(dead_code)]

use collinear_anova::prelude::*;

/// Small hand-checkable dataset: `y` against `x1 = 1..8` and a loosely
/// related `x2`.
pub fn small_dataset() -> Dataset {
    let x1 = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
    let x2 = vec![2.0, 1.0, 4.0, 3.0, 6.0, 5.0, 8.0, 9.0];
    let y = vec![3.1, 4.9, 7.2, 8.8, 11.3, 12.9, 15.2, 16.8];
    Dataset::from_columns(y, [("x1", x1), ("x2", x2)]).expect("valid dataset")
}

/// Correlated two-predictor dataset from the generator.
pub fn correlated_pair(n: usize, noise_sd: f64, seed: u64) -> Dataset {
    let config = GeneratorConfig::builder()
        .n_observations(n)
        .x_range(0.0, 50.0)
        .base_spread(10.0)
        .noise_sd(noise_sd)
        .coefficients([1.0, 1.0])
        .build()
        .expect("valid config");
    generate_correlated(&config, seed).expect("generation should succeed")
}

/// Correlated pair plus principal components, with the response replaced by
/// `3*PC1 + 3*PC2 + N(0, 5)`.
pub fn component_response(n: usize, seed: u64) -> Dataset {
    let mut stream = RandomStream::new(seed);
    let config = GeneratorConfig::builder()
        .n_observations(n)
        .coefficients([1.0, 1.0])
        .build()
        .expect("valid config");
    let raw = DataGenerator::new(config)
        .generate_correlated(&mut stream)
        .expect("generation should succeed");
    let with_pcs = pca(&raw, &["X1", "X2"]).expect("pca should succeed");
    DataGenerator::simulate_response(
        with_pcs,
        &ModelSpec::new(["PC1", "PC2"]),
        0.0,
        &[3.0, 3.0],
        5.0,
        &mut stream,
    )
    .expect("simulation should succeed")
}

/// Sample covariance with divisor `n - 1`.
pub fn covariance(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let ma = a.iter().sum::<f64>() / n;
    let mb = b.iter().sum::<f64>() / n;
    a.iter().zip(b).map(|(x, y)| (x - ma) * (y - mb)).sum::<f64>() / (n - 1.0)
}

/// Pearson correlation.
pub fn correlation(a: &[f64], b: &[f64]) -> f64 {
    covariance(a, b) / (covariance(a, a) * covariance(b, b)).sqrt()
}
