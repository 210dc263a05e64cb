//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result};

use mrr_decompose::DecompositionSpec;
use mrr_forecast::ModelConfig;
use mrr_io::ReaderConfig;
use mrr_sarima::{FitOptions, SarimaSpec};
use mrr_series::ConfidenceLevel;

use crate::config::*;

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoConfig) -> ReaderConfig {
    ReaderConfig::default()
        .with_period_column(&io.period_column)
        .with_value_column(&io.value_column)
        .with_sort(io.sort)
}

/// Builds a validated [`SarimaSpec`] from `[sarima]`.
pub fn build_sarima_spec(sarima: &SarimaToml) -> Result<SarimaSpec> {
    let [p, d, q] = sarima.order;
    let [sp, sd, sq, s] = sarima.seasonal_order;
    let spec = SarimaSpec::new((p, d, q), (sp, sd, sq, s));
    spec.validate().context("invalid [sarima] order")?;
    Ok(spec)
}

/// Builds validated [`FitOptions`] from `[sarima]`.
pub fn build_fit_options(sarima: &SarimaToml) -> Result<FitOptions> {
    let options = FitOptions::default()
        .with_max_iters(sarima.max_iters)
        .with_tolerance(sarima.tolerance)
        .with_enforce_stationarity(sarima.enforce_stationarity)
        .with_enforce_invertibility(sarima.enforce_invertibility)
        .with_accept_non_converged(sarima.accept_non_converged);
    options.validate().context("invalid [sarima] optimizer settings")?;
    Ok(options)
}

/// Builds a [`DecompositionSpec`], or `None` when the model is disabled.
pub fn build_decomposition_spec(decomp: &DecompositionToml) -> Result<Option<DecompositionSpec>> {
    if !decomp.enabled {
        return Ok(None);
    }
    let spec = DecompositionSpec::default()
        .with_n_changepoints(decomp.n_changepoints)
        .with_changepoint_range(decomp.changepoint_range)
        .with_changepoint_prior_scale(decomp.changepoint_prior_scale)
        .with_seasonality_prior_scale(decomp.seasonality_prior_scale)
        .with_fourier_order(decomp.fourier_order)
        .with_period(decomp.period);
    spec.validate().context("invalid [decomposition] settings")?;
    Ok(Some(spec))
}

/// Assembles the registry configuration from the full TOML configuration.
pub fn build_model_config(config: &MrrConfig) -> Result<ModelConfig> {
    let level = ConfidenceLevel::new(config.forecast.level).context("invalid [forecast] level")?;
    Ok(ModelConfig {
        sarima: build_sarima_spec(&config.sarima)?,
        fit_options: build_fit_options(&config.sarima)?,
        decomposition: build_decomposition_spec(&config.decomposition)?,
        level,
    })
}
