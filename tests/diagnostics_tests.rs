//! Variance inflation factor integration tests.

mod common;

use approx::assert_relative_eq;
use collinear_anova::prelude::*;

// ============================================================================
// VIF Tests
// ============================================================================

#[test]
fn test_vif_of_generated_pair_is_high() {
    // X2 = X1 + U(0, 10) with X1 ~ U(0, 50): correlation near 0.98
    let ds = common::correlated_pair(200, 1.0, 8);
    let factors = vif(&ds, &["X1", "X2"]).expect("vif should succeed");

    let r = common::correlation(ds.predictor("X1").unwrap(), ds.predictor("X2").unwrap());
    let expected = 1.0 / (1.0 - r * r);

    assert!(factors.get("X1").unwrap() > 10.0);
    // With two predictors both factors equal 1 / (1 - r²).
    assert_relative_eq!(factors.get("X1").unwrap(), expected, max_relative = 1e-8);
    assert_relative_eq!(factors.get("X2").unwrap(), expected, max_relative = 1e-8);
    assert_eq!(factors.high(10.0), vec!["X1", "X2"]);
}

#[test]
fn test_vif_of_components_is_one() {
    let ds = common::component_response(100, 42);
    let factors = vif(&ds, &["PC1", "PC2"]).unwrap();

    for (name, value) in factors.iter() {
        assert_relative_eq!(value, 1.0, epsilon = 1e-8);
        assert!(value >= 1.0, "VIF[{name}] = {value} below 1");
    }
    assert!(factors.high(5.0).is_empty());
}

#[test]
fn test_vif_preserves_input_order() {
    let ds = common::correlated_pair(30, 1.0, 2);
    let factors = vif(&ds, &["X2", "X1"]).unwrap();

    let names: Vec<&str> = factors.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["X2", "X1"]);
    assert_eq!(factors.len(), 2);
    assert!(factors.max() >= factors.get("X1").unwrap());
}

#[test]
fn test_exact_linear_combination_fails() {
    let base = common::correlated_pair(30, 1.0, 4);
    let sum: Vec<f64> = base
        .predictor("X1")
        .unwrap()
        .iter()
        .zip(base.predictor("X2").unwrap())
        .map(|(a, b)| a + b)
        .collect();
    let ds = base.with_predictor("S", sum).unwrap();

    let err = vif(&ds, &["X1", "X2", "S"]).unwrap_err();
    assert!(matches!(err, RegressionError::PerfectCollinearity { .. }));
}

#[test]
fn test_vif_with_cholesky_matches_qr() {
    let ds = common::correlated_pair(80, 1.0, 13);
    let names = ["X1", "X2"];

    let qr = VifCalculator::default().compute(&ds, &names).unwrap();
    let chol = VifCalculator::new(RegressionOptions {
        solver: SolverType::Cholesky,
        ..RegressionOptions::default()
    })
    .compute(&ds, &names)
    .unwrap();

    for name in names {
        assert_relative_eq!(qr.get(name).unwrap(), chol.get(name).unwrap(), max_relative = 1e-6);
    }
}
