//! Decomposition model settings (unfitted).

use mrr_series::MonthlySeries;

use crate::error::DecomposeError;
use crate::fit::DecompositionFit;

/// An unfitted trend + seasonality model.
///
/// `value(t) = trend(t) + seasonal(t) + residual`, where the trend is
/// piecewise linear with ridge-penalized slope changes and the seasonal
/// part is a Fourier series with the given period.
///
/// # Typestate Workflow
///
/// ```mermaid
/// graph LR
///     A["DecompositionSpec::default()"] -->|".fit(&series)?"| B["DecompositionFit"]
///     B -->|".forecast(horizon, level)"| C["Vec of ForecastRow"]
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecompositionSpec {
    n_changepoints: usize,
    changepoint_range: f64,
    changepoint_prior_scale: f64,
    seasonality_prior_scale: f64,
    fourier_order: usize,
    period: usize,
}

impl Default for DecompositionSpec {
    fn default() -> Self {
        Self {
            n_changepoints: 5,
            changepoint_range: 0.8,
            changepoint_prior_scale: 0.05,
            seasonality_prior_scale: 10.0,
            fourier_order: 3,
            period: 12,
        }
    }
}

impl DecompositionSpec {
    /// Requested number of trend changepoints.
    pub fn n_changepoints(&self) -> usize {
        self.n_changepoints
    }

    /// Leading fraction of the history where changepoints may sit.
    pub fn changepoint_range(&self) -> f64 {
        self.changepoint_range
    }

    /// Prior standard deviation of each slope change (scaled units).
    pub fn changepoint_prior_scale(&self) -> f64 {
        self.changepoint_prior_scale
    }

    /// Prior standard deviation of each Fourier coefficient (scaled units).
    pub fn seasonality_prior_scale(&self) -> f64 {
        self.seasonality_prior_scale
    }

    /// Requested Fourier order.
    pub fn fourier_order(&self) -> usize {
        self.fourier_order
    }

    /// Seasonal period in months.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Fourier order actually used: at most `period / 2` (6 for monthly data).
    ///
    /// Higher harmonics alias onto lower ones at monthly sampling.
    pub fn effective_fourier_order(&self) -> usize {
        self.fourier_order.min(self.period / 2)
    }

    pub fn with_n_changepoints(mut self, n: usize) -> Self {
        self.n_changepoints = n;
        self
    }

    pub fn with_changepoint_range(mut self, range: f64) -> Self {
        self.changepoint_range = range;
        self
    }

    pub fn with_changepoint_prior_scale(mut self, scale: f64) -> Self {
        self.changepoint_prior_scale = scale;
        self
    }

    pub fn with_seasonality_prior_scale(mut self, scale: f64) -> Self {
        self.seasonality_prior_scale = scale;
        self
    }

    pub fn with_fourier_order(mut self, order: usize) -> Self {
        self.fourier_order = order;
        self
    }

    pub fn with_period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Checks ranges of every setting.
    ///
    /// # Errors
    ///
    /// Returns [`DecomposeError::InvalidConfig`] if the changepoint range is
    /// outside `(0, 1]`, a prior scale is not positive, or the period is
    /// below 2.
    pub fn validate(&self) -> Result<(), DecomposeError> {
        if !(self.changepoint_range > 0.0 && self.changepoint_range <= 1.0) {
            return Err(DecomposeError::InvalidConfig {
                reason: format!(
                    "changepoint_range must be in (0, 1], got {}",
                    self.changepoint_range
                ),
            });
        }
        for (name, value) in [
            ("changepoint_prior_scale", self.changepoint_prior_scale),
            ("seasonality_prior_scale", self.seasonality_prior_scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DecomposeError::InvalidConfig {
                    reason: format!("{name} must be positive, got {value}"),
                });
            }
        }
        if self.period < 2 {
            return Err(DecomposeError::InvalidConfig {
                reason: format!("period must be at least 2, got {}", self.period),
            });
        }
        Ok(())
    }

    /// Fits trend and seasonality jointly by penalized least squares.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`DecomposeError::InvalidConfig`] | a setting is out of range |
    /// | [`DecomposeError::InsufficientData`] | fewer than 2 observations |
    /// | [`DecomposeError::Singular`] | normal equations not positive definite |
    pub fn fit(&self, series: &MonthlySeries) -> Result<DecompositionFit, DecomposeError> {
        crate::fit::fit_decomposition(self, series)
    }
}
