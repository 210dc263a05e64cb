//! The model abstraction the pipeline is written against.

use mrr_series::{ForecastRow, MonthlySeries};

use crate::error::ForecastError;

/// An unfitted forecasting model.
///
/// Implementations hold their own settings (orders, priors, confidence
/// level), so fitting only needs the series.
pub trait ForecastModel: Send + Sync {
    /// Name used as the column prefix in the merged table.
    fn name(&self) -> &str;

    /// Fits the model to `series`.
    fn fit(&self, series: &MonthlySeries) -> Result<Box<dyn FittedModel>, ForecastError>;
}

/// A fitted model ready to forecast.
pub trait FittedModel: Send + Sync {
    /// Forecasts `horizon` months past the last observation, one row per
    /// month, in order.
    fn forecast(&self, horizon: usize) -> Result<Vec<ForecastRow>, ForecastError>;

    /// Summary of the fit for reporting.
    fn diagnostics(&self) -> ModelDiagnostics;
}

/// Fit summary reported alongside the forecast table.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDiagnostics {
    /// Model name, matching [`ForecastModel::name()`].
    pub model: String,
    /// Number of estimated parameters.
    pub n_params: usize,
    /// Innovation (SARIMA) or residual (decomposition) variance.
    pub noise_variance: f64,
    /// Maximised log-likelihood, for likelihood-based models.
    pub log_likelihood: Option<f64>,
    /// Akaike Information Criterion, for likelihood-based models.
    pub aic: Option<f64>,
    /// `false` when a non-converged fit was accepted.
    pub converged: bool,
    /// Optimizer iterations, zero for closed-form fits.
    pub iterations: u64,
}
