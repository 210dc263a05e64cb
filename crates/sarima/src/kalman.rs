//! Kalman filter for exact SARIMA likelihood evaluation.
//!
//! Implements a univariate filter over the state space from
//! [`crate::state_space`]. The recursion is a pure [`step`] folded over the
//! working series; the total log-likelihood comes from the prediction
//! error decomposition.
//!
//! **Not part of the public API.**

use ndarray::{Array1, Array2, Axis};

use crate::params::FittedParameters;
use crate::state_space::{StateSpace, symmetrize};

/// Lower bound on the one-step prediction variance, relative to `sigma2`.
///
/// `F` can never fall below `sigma2` for a valid state, so the floor
/// scales with the innovation variance rather than the data units.
pub(crate) const VARIANCE_FLOOR: f64 = 1e-10;

/// Log-likelihood reported for degenerate parameter vectors.
pub(crate) const PENALIZED_LOG_LIKELIHOOD: f64 = -1e300;

const LN_2PI: f64 = 1.837_877_066_409_345_5;

/// Predicted state mean and covariance.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FilterState {
    pub(crate) mean: Array1<f64>,
    pub(crate) cov: Array2<f64>,
}

impl FilterState {
    /// Zero mean with the model's initial covariance.
    pub(crate) fn initial(ss: &StateSpace, sigma2: f64, scale: f64) -> Self {
        Self {
            mean: Array1::zeros(ss.r()),
            cov: ss.initial_covariance(sigma2, scale),
        }
    }

    fn is_finite(&self) -> bool {
        self.mean.iter().chain(self.cov.iter()).all(|v| v.is_finite())
    }
}

/// Result of one filter step.
#[derive(Clone, Debug)]
pub(crate) struct Step {
    /// Predicted state for the next observation.
    pub(crate) state: FilterState,
    /// One-step prediction error `v = y - Z'a`.
    pub(crate) error: f64,
    /// Prediction variance `F`, floored at `VARIANCE_FLOOR * sigma2`.
    pub(crate) variance: f64,
    /// Set when `F` was at or below the floor or anything went non-finite.
    pub(crate) degenerate: bool,
}

impl Step {
    /// Gaussian log-density contribution of this step.
    pub(crate) fn log_density(&self) -> f64 {
        -0.5 * (LN_2PI + self.variance.ln() + self.error * self.error / self.variance)
    }
}

/// Update `state` with observation `y`, then predict one step ahead.
pub(crate) fn step(ss: &StateSpace, sigma2: f64, state: &FilterState, y: f64) -> Step {
    let floor = VARIANCE_FLOOR * sigma2;
    let raw_f = state.cov[[0, 0]];
    let f = raw_f.max(floor);
    let v = y - state.mean[0];

    // P Z with Z = e_1 is the first column of P.
    let pz = state.cov.column(0).to_owned();
    let gain = &pz / f;

    let updated_mean = &state.mean + &(&gain * v);
    let pz_col = pz.view().insert_axis(Axis(1));
    let pz_row = pz.view().insert_axis(Axis(0));
    let updated_cov = &state.cov - &(pz_col.dot(&pz_row) / f);

    let t = ss.t();
    let mean = t.dot(&updated_mean);
    let cov = symmetrize(t.dot(&updated_cov).dot(&t.t()) + ss.rrt() * sigma2);

    let next = FilterState { mean, cov };
    let degenerate = !(raw_f > floor) || !v.is_finite() || !next.is_finite();
    Step {
        state: next,
        error: v,
        variance: f,
        degenerate,
    }
}

/// Everything one filter pass produces.
#[derive(Clone, Debug)]
pub(crate) struct FilterOutput {
    pub(crate) log_likelihood: f64,
    pub(crate) residuals: Vec<f64>,
    pub(crate) variances: Vec<f64>,
    pub(crate) final_state: FilterState,
    pub(crate) degenerate: bool,
}

impl FilterOutput {
    fn degenerate(state: FilterState) -> Self {
        Self {
            log_likelihood: PENALIZED_LOG_LIKELIHOOD,
            residuals: Vec::new(),
            variances: Vec::new(),
            final_state: state,
            degenerate: true,
        }
    }
}

/// Folds [`step`] over `data` from `init`.
///
/// Stops at the first degenerate step and reports
/// [`PENALIZED_LOG_LIKELIHOOD`] instead of failing.
pub(crate) fn filter(ss: &StateSpace, sigma2: f64, init: FilterState, data: &[f64]) -> FilterOutput {
    if !init.is_finite() {
        return FilterOutput::degenerate(init);
    }
    let mut state = init;
    let mut log_likelihood = 0.0;
    let mut residuals = Vec::with_capacity(data.len());
    let mut variances = Vec::with_capacity(data.len());

    for &y in data {
        let out = step(ss, sigma2, &state, y);
        if out.degenerate {
            return FilterOutput::degenerate(out.state);
        }
        log_likelihood += out.log_density();
        residuals.push(out.error);
        variances.push(out.variance);
        state = out.state;
    }

    if !log_likelihood.is_finite() {
        return FilterOutput::degenerate(state);
    }
    FilterOutput {
        log_likelihood,
        residuals,
        variances,
        final_state: state,
        degenerate: false,
    }
}

/// Builds the state space for `params` and filters the (centred) working
/// series, starting from the stationary or diffuse prior.
pub(crate) fn run(params: &FittedParameters, s: usize, working: &[f64]) -> FilterOutput {
    let ss = StateSpace::from_params(params, s);
    let sigma2 = params.sigma2();
    if !sigma2.is_finite() || sigma2 <= 0.0 {
        return FilterOutput::degenerate(FilterState {
            mean: Array1::zeros(ss.r()),
            cov: Array2::zeros((ss.r(), ss.r())),
        });
    }
    let scale = mrr_stats::mean_square(working);
    let init = FilterState::initial(&ss, sigma2, scale);
    filter(&ss, sigma2, init, working)
}
