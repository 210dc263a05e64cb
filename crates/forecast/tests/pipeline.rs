//! End-to-end tests for the forecast pipeline.

use mrr_calendar::Period;
use mrr_decompose::DecompositionSpec;
use mrr_forecast::{
    FittedModel, ForecastError, ForecastModel, ModelConfig, ModelDiagnostics, ModelRegistry,
    run_forecast,
};
use mrr_sarima::SarimaError;
use mrr_series::{ForecastRow, MonthlySeries};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn mrr_history(n: usize, seed: u64) -> MonthlySeries {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1_500.0).unwrap();
    let values = (0..n)
        .map(|t| {
            let t = t as f64;
            140_000.0
                + 3_000.0 * t
                + 6_000.0 * (2.0 * std::f64::consts::PI * t / 12.0).sin()
                + noise.sample(&mut rng)
        })
        .collect();
    MonthlySeries::from_values(Period::new(2021, 1).unwrap(), values).unwrap()
}

fn full_config() -> ModelConfig {
    ModelConfig {
        decomposition: Some(DecompositionSpec::default()),
        ..ModelConfig::default()
    }
}

#[test]
fn both_models_share_the_forecast_index() {
    let series = mrr_history(48, 42);
    let registry = ModelRegistry::from_config(&full_config());
    let report = run_forecast(&series, &registry, 12).unwrap();

    assert_eq!(report.table.len(), 12);
    assert_eq!(report.table.sources(), &["sarima", "decomposition"]);
    assert_eq!(report.diagnostics.len(), 2);
    assert_eq!(report.diagnostics[0].model, "sarima");
    assert!(report.diagnostics[0].converged);
    assert!(report.diagnostics[0].log_likelihood.is_some());
    assert!(report.diagnostics[1].aic.is_none());

    let mut expected = Period::new(2025, 1).unwrap();
    for (period, cells) in report.table.rows() {
        assert_eq!(period, expected);
        for cell in cells {
            let est = cell.expect("both models cover every forecast month");
            assert!(est.lower <= est.point && est.point <= est.upper);
        }
        expected = expected.next();
    }
}

#[test]
fn disabled_decomposition_leaves_sarima_only() {
    let series = mrr_history(48, 1);
    let config = ModelConfig {
        decomposition: None,
        ..full_config()
    };
    let report = run_forecast(&series, &ModelRegistry::from_config(&config), 6).unwrap();
    assert_eq!(report.table.column_names(), vec![
        "sarima_forecast",
        "sarima_lower",
        "sarima_upper"
    ]);
    assert_eq!(report.table.len(), 6);
}

#[test]
fn fit_errors_propagate() {
    let series = mrr_history(20, 3);
    let registry = ModelRegistry::from_config(&full_config());
    let err = run_forecast(&series, &registry, 12).unwrap_err();
    assert!(matches!(
        err,
        ForecastError::Sarima(SarimaError::InsufficientData { n: 20, min: 27 })
    ));
}

#[test]
fn empty_registry_is_an_error() {
    let err = run_forecast(&mrr_history(30, 0), &ModelRegistry::new(), 3).unwrap_err();
    assert!(matches!(err, ForecastError::NoModels));
}

/// Forecasts a flat line starting `lag` months after the last observation.
struct Shifted {
    lag: i64,
}

struct FittedShifted {
    anchor: Period,
    lag: i64,
}

impl ForecastModel for Shifted {
    fn name(&self) -> &str {
        "shifted"
    }

    fn fit(&self, series: &MonthlySeries) -> Result<Box<dyn FittedModel>, ForecastError> {
        Ok(Box::new(FittedShifted {
            anchor: series.last_period(),
            lag: self.lag,
        }))
    }
}

impl FittedModel for FittedShifted {
    fn forecast(&self, horizon: usize) -> Result<Vec<ForecastRow>, ForecastError> {
        (1..=horizon as i64)
            .map(|h| {
                ForecastRow::new(self.anchor.offset(self.lag + h), 1.0, 0.5, 1.5)
                    .map_err(ForecastError::from)
            })
            .collect()
    }

    fn diagnostics(&self) -> ModelDiagnostics {
        ModelDiagnostics {
            model: "shifted".to_string(),
            n_params: 0,
            noise_variance: 0.0,
            log_likelihood: None,
            aic: None,
            converged: true,
            iterations: 0,
        }
    }
}

#[test]
fn custom_model_with_offset_periods_is_outer_joined() {
    let series = mrr_history(48, 5);
    let mut registry = ModelRegistry::from_config(&ModelConfig {
        decomposition: None,
        ..full_config()
    });
    registry.register(Box::new(Shifted { lag: 3 })).unwrap();

    let report = run_forecast(&series, &registry, 4).unwrap();
    // sarima: 2025-01..04, shifted: 2025-04..07
    assert_eq!(report.table.len(), 7);
    let jan = Period::new(2025, 1).unwrap();
    let jul = Period::new(2025, 7).unwrap();
    assert!(report.table.get(jan, "shifted").is_none());
    assert!(report.table.get(jan, "sarima").is_some());
    assert!(report.table.get(jul, "sarima").is_none());
    assert_eq!(report.table.get(jul, "shifted").unwrap().point, 1.0);
}
