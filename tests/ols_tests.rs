//! OLS fitting tests.

mod common;

use approx::assert_relative_eq;
use collinear_anova::prelude::*;

// ============================================================================
// Basic Fitting
// ============================================================================

#[test]
fn test_simple_regression_recovers_line() {
    // y = 2 + 3*x + small deterministic wobble
    let x: Vec<f64> = (0..20).map(|i| i as f64).collect();
    let y: Vec<f64> = x
        .iter()
        .enumerate()
        .map(|(i, xi)| 2.0 + 3.0 * xi + 0.1 * (i as f64 * 1.7).sin())
        .collect();
    let ds = Dataset::from_columns(y, [("x", x)]).unwrap();

    let result = fit(&ds, &ModelSpec::new(["x"])).expect("fit should succeed");

    assert_relative_eq!(result.intercept().estimate, 2.0, epsilon = 0.1);
    assert_relative_eq!(result.term("x").unwrap().estimate, 3.0, epsilon = 0.01);
    assert!(result.r_squared > 0.999);
    assert_eq!(result.residual_df, 18);
    assert_eq!(result.n_parameters(), 2);
}

#[test]
fn test_coefficient_order_matches_model() {
    let ds = common::small_dataset();
    let result = fit(&ds, &ModelSpec::new(["x2", "x1"])).unwrap();

    let names: Vec<&str> = result.terms.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec![INTERCEPT, "x2", "x1"]);
    assert_eq!(result.slopes().len(), 2);
}

#[test]
fn test_residuals_orthogonal_to_design() {
    let ds = common::small_dataset();
    let result = fit(&ds, &ModelSpec::new(["x1", "x2"])).unwrap();

    let sum: f64 = result.residuals.iter().sum();
    assert_relative_eq!(sum, 0.0, epsilon = 1e-10);

    for name in ["x1", "x2"] {
        let x = ds.predictor(name).unwrap();
        let dot: f64 = x.iter().zip(&result.residuals).map(|(a, r)| a * r).sum();
        assert_relative_eq!(dot, 0.0, epsilon = 1e-9);
    }

    for i in 0..ds.n_observations() {
        assert_relative_eq!(
            result.fitted_values[i] + result.residuals[i],
            ds.response()[i],
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_prediction_on_training_data() {
    let ds = common::small_dataset();
    let result = fit(&ds, &ModelSpec::new(["x1", "x2"])).unwrap();
    let predicted = result.predict(&ds).unwrap();

    for (p, f) in predicted.iter().zip(&result.fitted_values) {
        assert_relative_eq!(*p, *f, epsilon = 1e-10);
    }
}

// ============================================================================
// Inference
// ============================================================================

#[test]
fn test_confidence_interval_contains_estimate() {
    let ds = common::correlated_pair(40, 2.0, 7);
    let result = fit(&ds, &ModelSpec::new(["X1", "X2"])).unwrap();

    for term in &result.terms {
        assert!(term.conf_lower < term.estimate && term.estimate < term.conf_upper);
        assert!(term.std_error > 0.0);
        assert!((0.0..=1.0).contains(&term.p_value));
        assert_relative_eq!(term.t_statistic, term.estimate / term.std_error, epsilon = 1e-10);
    }
}

#[test]
fn test_wider_interval_at_higher_confidence() {
    let ds = common::small_dataset();
    let spec = ModelSpec::new(["x1"]);
    let narrow = OlsFitter::builder().confidence_level(0.90).build().fit(&ds, &spec).unwrap();
    let wide = OlsFitter::builder().confidence_level(0.99).build().fit(&ds, &spec).unwrap();

    let width = |r: &FitResult| {
        let t = r.term("x1").unwrap();
        t.conf_upper - t.conf_lower
    };
    assert!(width(&wide) > width(&narrow));
    assert_relative_eq!(
        narrow.term("x1").unwrap().estimate,
        wide.term("x1").unwrap().estimate,
        epsilon = 1e-12
    );
}

#[test]
fn test_overall_f_matches_r_squared() {
    let ds = common::small_dataset();
    let result = fit(&ds, &ModelSpec::new(["x1", "x2"])).unwrap();

    let k = 2.0;
    let df = result.residual_df as f64;
    let expected = (result.r_squared / k) / ((1.0 - result.r_squared) / df);
    assert_relative_eq!(result.f_statistic.unwrap(), expected, max_relative = 1e-9);
    assert!(result.f_pvalue.unwrap() < 1e-6);
}

#[test]
fn test_intercept_only_has_no_overall_f() {
    let ds = common::small_dataset();
    let result = fit(&ds, &ModelSpec::intercept_only()).unwrap();

    assert!(result.f_statistic.is_none());
    assert!(result.f_pvalue.is_none());
    assert_relative_eq!(result.r_squared, 0.0, epsilon = 1e-12);
    let mean = ds.response().iter().sum::<f64>() / 8.0;
    assert_relative_eq!(result.intercept().estimate, mean, epsilon = 1e-12);
}

// ============================================================================
// Solvers
// ============================================================================

#[test]
fn test_qr_and_cholesky_agree() {
    let ds = common::correlated_pair(60, 1.0, 11);
    let spec = ModelSpec::new(["X1", "X2"]);

    let qr = OlsFitter::builder().solver(SolverType::Qr).build().fit(&ds, &spec).unwrap();
    let chol = OlsFitter::builder()
        .solver(SolverType::Cholesky)
        .build()
        .fit(&ds, &spec)
        .unwrap();

    for (a, b) in qr.terms.iter().zip(&chol.terms) {
        assert_relative_eq!(a.estimate, b.estimate, max_relative = 1e-8);
        assert_relative_eq!(a.std_error, b.std_error, max_relative = 1e-8);
    }
    assert_relative_eq!(qr.rss, chol.rss, max_relative = 1e-8);
}

#[test]
fn test_mixed_scale_predictors_are_full_rank() {
    // Predictors in very different units but nearly uncorrelated.
    let big: Vec<f64> = (0..30).map(|i| 1e4 * i as f64).collect();
    let small: Vec<f64> = (0..30).map(|i| 1e-4 * (1.7 * i as f64).sin()).collect();
    let y: Vec<f64> = (0..30)
        .map(|i| 0.5 + 3e-4 * big[i] + 2e3 * small[i] + (0.9 * i as f64).cos())
        .collect();
    let ds = Dataset::from_columns(y, [("big", big), ("small", small)]).unwrap();
    let spec = ModelSpec::new(["big", "small"]);

    let qr = OlsFitter::builder().solver(SolverType::Qr).build().fit(&ds, &spec).unwrap();
    let chol = OlsFitter::builder()
        .solver(SolverType::Cholesky)
        .build()
        .fit(&ds, &spec)
        .unwrap();
    for (a, b) in qr.terms.iter().zip(&chol.terms) {
        assert_relative_eq!(a.estimate, b.estimate, max_relative = 1e-6);
    }
    assert_eq!(qr.residual_df, 27);

    let table = sequential_anova(&ds, &spec).unwrap();
    assert_relative_eq!(table.total_sum_sq(), table.corrected_total(), max_relative = 1e-9);

    let factors = vif(&ds, &["big", "small"]).unwrap();
    assert!(factors.max() < 1.1);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_duplicated_column_is_singular() {
    let x: Vec<f64> = (0..10).map(|i| (i as f64).sqrt()).collect();
    let y: Vec<f64> = (0..10).map(|i| (i as f64 * 0.9).cos()).collect();
    let ds = Dataset::from_columns(y, [("a", x.clone()), ("b", x)]).unwrap();

    for solver in [SolverType::Qr, SolverType::Cholesky] {
        let err = OlsFitter::builder()
            .solver(solver)
            .build()
            .fit(&ds, &ModelSpec::new(["a", "b"]))
            .unwrap_err();
        assert_eq!(err, RegressionError::SingularDesign { rank: 2, columns: 3 });
    }
}

#[test]
fn test_too_few_observations() {
    let ds = Dataset::from_columns(
        vec![1.0, 2.0, 4.0],
        [("a", vec![1.0, 2.0, 3.0]), ("b", vec![3.0, 1.0, 2.0])],
    )
    .unwrap();

    let err = fit(&ds, &ModelSpec::new(["a", "b"])).unwrap_err();
    assert_eq!(err, RegressionError::InsufficientObservations { needed: 4, got: 3 });
}

#[test]
fn test_exact_fit_has_no_residual_variance() {
    let x: Vec<f64> = (0..6).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|v| 1.0 + 2.0 * v).collect();
    let ds = Dataset::from_columns(y, [("x", x)]).unwrap();

    assert_eq!(
        fit(&ds, &ModelSpec::new(["x"])).unwrap_err(),
        RegressionError::ZeroResidualVariance
    );
}

#[test]
fn test_unknown_and_duplicate_terms() {
    let ds = common::small_dataset();
    assert_eq!(
        fit(&ds, &ModelSpec::new(["x9"])).unwrap_err(),
        RegressionError::UnknownTerm("x9".to_string())
    );
    assert_eq!(
        fit(&ds, &ModelSpec::new(["x1", "x2", "x1"])).unwrap_err(),
        RegressionError::DuplicateTerm("x1".to_string())
    );
}

#[test]
fn test_invalid_options_rejected() {
    let ds = common::small_dataset();
    let options = RegressionOptions {
        confidence_level: 1.5,
        ..RegressionOptions::default()
    };
    let err = OlsFitter::new(options).fit(&ds, &ModelSpec::new(["x1"])).unwrap_err();
    assert!(matches!(err, RegressionError::InvalidOptions(_)));
}
