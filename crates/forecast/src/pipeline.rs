//! Fit every registered model, forecast, merge.

use mrr_series::MonthlySeries;
use tracing::{debug, info};

use crate::error::ForecastError;
use crate::merge::ForecastTable;
use crate::model::ModelDiagnostics;
use crate::registry::ModelRegistry;

/// The merged table plus one diagnostics entry per model.
#[derive(Debug, Clone)]
pub struct ForecastReport {
    pub table: ForecastTable,
    pub diagnostics: Vec<ModelDiagnostics>,
}

/// Runs each model in `registry` on `series` and merges their forecasts.
///
/// Models run in registration order. The first fit or forecast error is
/// returned as is; no model's failure is papered over with a default.
///
/// # Errors
///
/// Returns [`ForecastError::NoModels`] for an empty registry, or the
/// first error raised by a model.
#[tracing::instrument(skip_all, fields(n = series.len(), horizon = horizon))]
pub fn run_forecast(
    series: &MonthlySeries,
    registry: &ModelRegistry,
    horizon: usize,
) -> Result<ForecastReport, ForecastError> {
    if registry.is_empty() {
        return Err(ForecastError::NoModels);
    }

    let mut table = ForecastTable::new();
    let mut diagnostics = Vec::with_capacity(registry.len());
    for model in registry.iter() {
        info!(model = model.name(), "fitting");
        let fitted = model.fit(series)?;
        let rows = fitted.forecast(horizon)?;
        let diag = fitted.diagnostics();
        debug!(
            model = model.name(),
            rows = rows.len(),
            noise_variance = diag.noise_variance,
            converged = diag.converged,
            "forecast ready"
        );
        table.add_source(model.name(), &rows)?;
        diagnostics.push(diag);
    }

    Ok(ForecastReport { table, diagnostics })
}
