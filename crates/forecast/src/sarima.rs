//! SARIMA as a [`ForecastModel`].

use mrr_sarima::{FitOptions, SarimaFit, SarimaSpec};
use mrr_series::{ConfidenceLevel, ForecastRow, MonthlySeries};

use crate::error::ForecastError;
use crate::model::{FittedModel, ForecastModel, ModelDiagnostics};

pub const SARIMA_NAME: &str = "sarima";

/// Seasonal ARIMA fitted by exact maximum likelihood.
#[derive(Debug, Clone)]
pub struct SarimaModel {
    spec: SarimaSpec,
    options: FitOptions,
    level: ConfidenceLevel,
}

impl SarimaModel {
    pub fn new(spec: SarimaSpec, options: FitOptions, level: ConfidenceLevel) -> Self {
        Self {
            spec,
            options,
            level,
        }
    }
}

impl ForecastModel for SarimaModel {
    fn name(&self) -> &str {
        SARIMA_NAME
    }

    fn fit(&self, series: &MonthlySeries) -> Result<Box<dyn FittedModel>, ForecastError> {
        let fit = self.spec.fit(series, &self.options)?;
        Ok(Box::new(FittedSarima {
            fit,
            level: self.level,
        }))
    }
}

struct FittedSarima {
    fit: SarimaFit,
    level: ConfidenceLevel,
}

impl FittedModel for FittedSarima {
    fn forecast(&self, horizon: usize) -> Result<Vec<ForecastRow>, ForecastError> {
        Ok(self.fit.forecast(horizon, self.level)?.into_rows())
    }

    fn diagnostics(&self) -> ModelDiagnostics {
        ModelDiagnostics {
            model: SARIMA_NAME.to_string(),
            n_params: self.fit.spec().n_params(),
            noise_variance: self.fit.params().sigma2(),
            log_likelihood: Some(self.fit.log_likelihood()),
            aic: Some(self.fit.aic()),
            converged: self.fit.converged(),
            iterations: self.fit.iterations(),
        }
    }
}
