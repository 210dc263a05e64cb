//! Trend + seasonality decomposition as a [`ForecastModel`].

use mrr_decompose::{DecompositionFit, DecompositionSpec};
use mrr_series::{ConfidenceLevel, ForecastRow, MonthlySeries};

use crate::error::ForecastError;
use crate::model::{FittedModel, ForecastModel, ModelDiagnostics};

pub const DECOMPOSITION_NAME: &str = "decomposition";

/// Piecewise-linear trend plus Fourier seasonality.
#[derive(Debug, Clone)]
pub struct DecompositionModel {
    spec: DecompositionSpec,
    level: ConfidenceLevel,
}

impl DecompositionModel {
    pub fn new(spec: DecompositionSpec, level: ConfidenceLevel) -> Self {
        Self { spec, level }
    }
}

impl ForecastModel for DecompositionModel {
    fn name(&self) -> &str {
        DECOMPOSITION_NAME
    }

    fn fit(&self, series: &MonthlySeries) -> Result<Box<dyn FittedModel>, ForecastError> {
        let fit = self.spec.fit(series)?;
        Ok(Box::new(FittedDecomposition {
            fit,
            level: self.level,
        }))
    }
}

struct FittedDecomposition {
    fit: DecompositionFit,
    level: ConfidenceLevel,
}

impl FittedModel for FittedDecomposition {
    fn forecast(&self, horizon: usize) -> Result<Vec<ForecastRow>, ForecastError> {
        Ok(self.fit.forecast(horizon, self.level))
    }

    fn diagnostics(&self) -> ModelDiagnostics {
        ModelDiagnostics {
            model: DECOMPOSITION_NAME.to_string(),
            n_params: self.fit.n_params(),
            noise_variance: self.fit.residual_variance(),
            log_likelihood: None,
            aic: None,
            converged: true,
            iterations: 0,
        }
    }
}
