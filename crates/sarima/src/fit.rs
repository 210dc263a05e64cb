//! Fitted SARIMA model results.

use mrr_calendar::Period;
use mrr_series::ConfidenceLevel;

use crate::error::SarimaError;
use crate::forecast::SarimaForecast;
use crate::kalman::{FilterOutput, FilterState};
use crate::params::FittedParameters;
use crate::spec::SarimaSpec;

/// The differenced, centred series a model is fitted to, plus what is
/// needed to map results back to the original scale.
#[derive(Clone, Debug)]
pub(crate) struct WorkingSeries {
    pub(crate) values: Vec<f64>,
    pub(crate) mean: f64,
    pub(crate) seeds: Vec<f64>,
    pub(crate) last_period: Period,
    pub(crate) n_obs: usize,
}

/// A fitted SARIMA model produced by [`SarimaSpec::fit()`] or
/// [`SarimaSpec::fit_fixed()`].
///
/// Holds the parameters, the maximised log-likelihood, one-step residuals
/// on the working scale, and the filter state after the last observation.
/// Call [`SarimaFit::forecast()`] to project forward.
///
/// # Typestate Workflow
///
/// ```mermaid
/// graph LR
///     B["SarimaFit"] --> C[".params(): FittedParameters"]
///     B --> D[".log_likelihood() / .aic()"]
///     B --> E[".converged() / .iterations()"]
///     B -->|".forecast(horizon, level)?"| F["SarimaForecast"]
/// ```
#[derive(Clone, Debug)]
pub struct SarimaFit {
    spec: SarimaSpec,
    params: FittedParameters,
    log_likelihood: f64,
    converged: bool,
    iterations: u64,
    residuals: Vec<f64>,
    prediction_variances: Vec<f64>,
    final_state: FilterState,
    seeds: Vec<f64>,
    mean: f64,
    last_period: Period,
    n_obs: usize,
}

impl SarimaFit {
    pub(crate) fn new(
        spec: SarimaSpec,
        params: FittedParameters,
        output: FilterOutput,
        working: WorkingSeries,
        iterations: u64,
        converged: bool,
    ) -> Self {
        Self {
            spec,
            params,
            log_likelihood: output.log_likelihood,
            converged,
            iterations,
            residuals: output.residuals,
            prediction_variances: output.variances,
            final_state: output.final_state,
            seeds: working.seeds,
            mean: working.mean,
            last_period: working.last_period,
            n_obs: working.n_obs,
        }
    }

    /// Returns the [`SarimaSpec`] that produced this fit.
    pub fn spec(&self) -> SarimaSpec {
        self.spec
    }

    pub fn params(&self) -> &FittedParameters {
        &self.params
    }

    /// Returns the maximised log-likelihood of the working series.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Akaike Information Criterion, `2k - 2·log_likelihood` with
    /// `k = p + q + P + Q + 1`.
    pub fn aic(&self) -> f64 {
        let k = self.spec.n_params() as f64;
        2.0 * k - 2.0 * self.log_likelihood
    }

    /// `false` only for fits returned under
    /// [`FitOptions::with_accept_non_converged()`](crate::FitOptions::with_accept_non_converged).
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Optimizer iterations used (zero for fixed or white-noise fits).
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// One-step-ahead prediction errors on the working scale.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Residuals divided by the square root of their prediction variance.
    ///
    /// Close to independent standard normal draws for a well-specified
    /// model; the first few are tiny under a diffuse start.
    pub fn standardized_residuals(&self) -> Vec<f64> {
        self.residuals
            .iter()
            .zip(&self.prediction_variances)
            .map(|(e, f)| e / f.sqrt())
            .collect()
    }

    /// Sample mean removed before fitting; zero for integrated models.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Last observed month, the anchor for forecast periods.
    pub fn last_period(&self) -> Period {
        self.last_period
    }

    /// Number of observations in the fitted series.
    pub fn n_obs(&self) -> usize {
        self.n_obs
    }

    /// The last `d + s·D` observations, used to integrate forecasts.
    pub fn seeds(&self) -> &[f64] {
        &self.seeds
    }

    pub(crate) fn final_state(&self) -> &FilterState {
        &self.final_state
    }

    /// Forecasts `horizon` months past the last observation.
    ///
    /// A zero horizon yields an empty forecast.
    ///
    /// # Errors
    ///
    /// Propagates [`SarimaError::SeedLength`] from the integration step,
    /// which only happens if the fit was built inconsistently.
    pub fn forecast(&self, horizon: usize, level: ConfidenceLevel) -> Result<SarimaForecast, SarimaError> {
        crate::forecast::project(self, horizon, level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};

    fn dummy_fit(spec: SarimaSpec, log_likelihood: f64) -> SarimaFit {
        let output = FilterOutput {
            log_likelihood,
            residuals: vec![0.1, -0.2],
            variances: vec![1.0, 1.0],
            final_state: FilterState {
                mean: Array1::zeros(1),
                cov: Array2::eye(1),
            },
            degenerate: false,
        };
        let working = WorkingSeries {
            values: vec![0.1, -0.2],
            mean: 0.0,
            seeds: vec![],
            last_period: Period::new(2024, 12).unwrap(),
            n_obs: 2,
        };
        let params = FittedParameters::new(vec![0.5], vec![0.3], vec![], vec![], 1.0);
        SarimaFit::new(spec, params, output, working, 7, true)
    }

    #[test]
    fn fit_aic_computation() {
        let fit = dummy_fit(SarimaSpec::new((1, 0, 1), (0, 0, 0, 0)), -100.0);
        // k = 1 + 1 + 1 = 3, AIC = 6 + 200
        assert!((fit.aic() - 206.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fit_accessors() {
        let fit = dummy_fit(SarimaSpec::new((1, 0, 1), (0, 0, 0, 0)), -10.0);
        assert_eq!(fit.iterations(), 7);
        assert!(fit.converged());
        assert_eq!(fit.residuals(), &[0.1, -0.2]);
        assert_eq!(fit.params().ar(), &[0.5]);
        assert_eq!(fit.last_period(), Period::new(2024, 12).unwrap());
        assert_eq!(fit.n_obs(), 2);
        assert_eq!(fit.standardized_residuals(), vec![0.1, -0.2]);
    }

    #[test]
    fn fit_is_clone_send_sync() {
        fn assert_impl<T: Clone + Send + Sync>() {}
        assert_impl::<SarimaFit>();
    }
}
