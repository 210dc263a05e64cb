//! Estimation integration tests for mrr-sarima.

use mrr_calendar::Period;
use mrr_sarima::{FitOptions, FittedParameters, SarimaError, SarimaSpec};
use mrr_series::MonthlySeries;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn monthly(values: Vec<f64>) -> MonthlySeries {
    MonthlySeries::from_values(Period::new(1990, 1).unwrap(), values).unwrap()
}

fn generate_arma11(phi: f64, theta: f64, n: usize, seed: u64) -> Vec<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let mut data = vec![0.0; n];
    let mut eps = vec![0.0; n];
    for t in 0..n {
        eps[t] = normal.sample(&mut rng);
        let ar_part = if t > 0 { phi * data[t - 1] } else { 0.0 };
        let ma_part = if t > 0 { theta * eps[t - 1] } else { 0.0 };
        data[t] = ar_part + eps[t] + ma_part;
    }
    data
}

fn generate_seasonal_ar(big_phi: f64, s: usize, n: usize, seed: u64) -> Vec<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let mut data = vec![0.0; n];
    for t in 0..n {
        let lagged = if t >= s { big_phi * data[t - s] } else { 0.0 };
        data[t] = lagged + normal.sample(&mut rng);
    }
    data
}

#[test]
fn arma11_recovery() {
    let phi = 0.5;
    let theta = 0.3;
    let data = generate_arma11(phi, theta, 2000, 300);
    let fit = SarimaSpec::new((1, 0, 1), (0, 0, 0, 0))
        .fit(&monthly(data), &FitOptions::default())
        .unwrap();
    assert!(
        (fit.params().ar()[0] - phi).abs() < 0.15,
        "ARMA(1,1) phi: expected ~{}, got {}",
        phi,
        fit.params().ar()[0]
    );
    assert!(
        (fit.params().ma()[0] - theta).abs() < 0.15,
        "ARMA(1,1) theta: expected ~{}, got {}",
        theta,
        fit.params().ma()[0]
    );
    assert!(fit.converged());
}

#[test]
fn seasonal_ar_recovery() {
    let data = generate_seasonal_ar(0.6, 12, 600, 77);
    let fit = SarimaSpec::new((0, 0, 0), (1, 0, 0, 12))
        .fit(&monthly(data), &FitOptions::default())
        .unwrap();
    let big_phi = fit.params().seasonal_ar()[0];
    assert!((big_phi - 0.6).abs() < 0.15, "seasonal phi = {big_phi}");
    assert!(fit.params().ar().is_empty());
}

#[test]
fn random_walk_innovation_variance() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(5);
    let normal = Normal::new(0.0, 2.0).unwrap();
    let mut level = 1000.0;
    let data: Vec<f64> = (0..400)
        .map(|_| {
            level += normal.sample(&mut rng);
            level
        })
        .collect();
    let fit = SarimaSpec::new((0, 1, 0), (0, 0, 0, 0))
        .fit(&monthly(data), &FitOptions::default())
        .unwrap();
    let sigma2 = fit.params().sigma2();
    assert!((sigma2 - 4.0).abs() < 0.8, "sigma2 = {sigma2}");
    assert_eq!(fit.mean(), 0.0);
}

#[test]
fn fit_fixed_matches_log_likelihood() {
    let data = monthly(generate_arma11(0.4, 0.2, 300, 9));
    let spec = SarimaSpec::new((1, 0, 1), (0, 0, 0, 0));
    let params = FittedParameters::new(vec![0.4], vec![0.2], vec![], vec![], 1.0);
    let fixed = spec.fit_fixed(&data, params.clone()).unwrap();
    let ll = spec.log_likelihood(&data, &params).unwrap();
    assert_eq!(fixed.log_likelihood(), ll);
    assert_eq!(fixed.iterations(), 0);

    let fitted = spec.fit(&data, &FitOptions::default()).unwrap();
    assert!(fitted.log_likelihood() >= ll - 1e-6);
}

#[test]
fn fitting_is_deterministic() {
    let data = monthly(generate_arma11(0.6, -0.3, 500, 21));
    let spec = SarimaSpec::new((1, 0, 1), (0, 0, 0, 0));
    let a = spec.fit(&data, &FitOptions::default()).unwrap();
    let b = spec.fit(&data, &FitOptions::default()).unwrap();
    assert_eq!(a.params(), b.params());
    assert_eq!(a.log_likelihood(), b.log_likelihood());
}

#[test]
fn default_spec_needs_27_months() {
    let data = monthly((0..20).map(|t| t as f64).collect());
    let err = SarimaSpec::default()
        .fit(&data, &FitOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        SarimaError::InsufficientData { n: 20, min: 27 }
    ));
}

#[test]
fn wrong_parameter_shape_rejected() {
    let data = monthly(generate_arma11(0.4, 0.2, 50, 1));
    let spec = SarimaSpec::new((2, 0, 0), (0, 0, 0, 0));
    let params = FittedParameters::new(vec![0.4], vec![], vec![], vec![], 1.0);
    let err = spec.fit_fixed(&data, params).unwrap_err();
    assert!(matches!(err, SarimaError::InvalidSpec { .. }));
}

#[test]
fn seasonal_terms_without_period_rejected() {
    let data = monthly(generate_arma11(0.4, 0.2, 50, 1));
    let err = SarimaSpec::new((0, 0, 0), (1, 0, 0, 0))
        .fit(&data, &FitOptions::default())
        .unwrap_err();
    assert!(matches!(err, SarimaError::InvalidSpec { .. }));
}

#[test]
fn tiny_scale_series_fits_like_unit_scale() {
    let base = generate_arma11(0.6, 0.0, 200, 11);
    let spec = SarimaSpec::new((1, 0, 0), (0, 0, 0, 0));
    let unit = spec.fit(&monthly(base.clone()), &FitOptions::default()).unwrap();

    let scale = 1e-6;
    let small_data: Vec<f64> = base.iter().map(|x| x * scale).collect();
    let small = spec
        .fit(&monthly(small_data), &FitOptions::default())
        .expect("a 1e-6 scaled AR(1) is a valid series");

    assert!(small.converged());
    assert!(
        (small.params().ar()[0] - unit.params().ar()[0]).abs() < 0.02,
        "phi at unit scale {}, at 1e-6 {}",
        unit.params().ar()[0],
        small.params().ar()[0]
    );
    let ratio = small.params().sigma2() / (unit.params().sigma2() * scale * scale);
    assert!((ratio - 1.0).abs() < 0.05, "sigma2 ratio {ratio}");
}

fn explosive_params() -> FittedParameters {
    FittedParameters::new(vec![1e200], vec![], vec![], vec![], 1.0)
}

fn wavy_series() -> MonthlySeries {
    monthly((0..40).map(|t| (t as f64 * 0.7).sin() + 0.1 * t as f64).collect())
}

#[test]
fn explosive_parameters_give_degenerate_log_likelihood() {
    let spec = SarimaSpec::new((1, 0, 0), (0, 0, 0, 0));
    let err = spec
        .log_likelihood(&wavy_series(), &explosive_params())
        .unwrap_err();
    assert!(
        matches!(err, SarimaError::DegenerateLikelihood),
        "expected DegenerateLikelihood, got {err:?}"
    );
}

#[test]
fn explosive_parameters_rejected_by_fit_fixed() {
    let spec = SarimaSpec::new((1, 0, 0), (0, 0, 0, 0));
    let err = spec.fit_fixed(&wavy_series(), explosive_params()).unwrap_err();
    assert!(
        matches!(err, SarimaError::DegenerateLikelihood),
        "expected DegenerateLikelihood, got {err:?}"
    );
}
