//! Nelder-Mead optimizer for SARIMA maximum-likelihood estimation.
//!
//! Wraps the `argmin` crate to minimize the negative exact log-likelihood
//! over `[ar, ma, sar, sma, ln σ²]`.
//!
//! **Not part of the public API.**

use argmin::core::{CostFunction, Executor, State, TerminationReason, TerminationStatus};
use argmin::solver::neldermead::NelderMead;
use mrr_series::MonthlySeries;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::SarimaError;
use crate::fit::{SarimaFit, WorkingSeries};
use crate::kalman;
use crate::options::FitOptions;
use crate::params::{FittedParameters, ParamLayout};
use crate::spec::SarimaSpec;

/// Offset tried on each coefficient when screening start vectors.
const START_OFFSET: f64 = 0.3;

/// Simplex edge for raw coefficients.
const RAW_STEP: f64 = 0.1;

/// Simplex edge for PACF-transformed coefficients and for `ln σ²`.
const WIDE_STEP: f64 = 0.5;

/// Differences, centres and checks `series` for `spec`.
pub(crate) fn prepare(spec: &SarimaSpec, series: &MonthlySeries) -> Result<WorkingSeries, SarimaError> {
    spec.validate()?;
    let min = spec.min_observations();
    if series.len() < min {
        return Err(SarimaError::InsufficientData {
            n: series.len(),
            min,
        });
    }

    let diff = spec.differencing();
    let y = series.values();
    let mut values = diff.apply(y);
    let mean = if diff.is_identity() {
        mrr_stats::mean(&values)
    } else {
        0.0
    };
    for w in &mut values {
        *w -= mean;
    }
    if values.iter().all(|w| w.abs() < f64::EPSILON) {
        return Err(SarimaError::ConstantData);
    }

    Ok(WorkingSeries {
        values,
        mean,
        seeds: y[y.len() - diff.order()..].to_vec(),
        last_period: series.last_period(),
        n_obs: series.len(),
    })
}

/// Fits `spec` to `series` via exact MLE.
///
/// 1. Difference and centre
/// 2. White-noise fast path when there are no coefficients
/// 3. Score candidate starts in parallel, seed the simplex with the best
/// 4. Nelder-Mead on the negative log-likelihood
/// 5. Final filter pass at the optimum
pub(crate) fn fit_sarima(
    spec: &SarimaSpec,
    series: &MonthlySeries,
    options: &FitOptions,
) -> Result<SarimaFit, SarimaError> {
    options.validate()?;
    let working = prepare(spec, series)?;
    let layout = ParamLayout::new(
        spec,
        options.enforce_stationarity(),
        options.enforce_invertibility(),
    );
    let ms = mrr_stats::mean_square(&working.values);

    if layout.n_coeffs() == 0 {
        let params = FittedParameters::new(vec![], vec![], vec![], vec![], ms);
        return finish(spec, params, working, 0, true);
    }

    let (best, iterations, converged) = {
        let cost = SarimaCost {
            layout,
            s: spec.period(),
            data: &working.values,
        };
        let mut base = vec![0.0; layout.dim()];
        base[layout.n_coeffs()] = ms.ln();
        let start = screen_starts(&cost, base);
        let simplex = initial_simplex(&start, &layout);

        let solver = NelderMead::new(simplex)
            .with_sd_tolerance(options.tolerance())
            .map_err(|e| SarimaError::OptimizationFailed {
                reason: e.to_string(),
            })?;
        let result = Executor::new(cost, solver)
            .configure(|state| state.max_iters(options.max_iters()))
            .run()
            .map_err(|e| SarimaError::OptimizationFailed {
                reason: e.to_string(),
            })?;

        let state = result.state();
        let best = state
            .best_param
            .clone()
            .ok_or_else(|| SarimaError::OptimizationFailed {
                reason: "no parameter vector was evaluated".to_string(),
            })?;
        let converged = matches!(
            state.get_termination_status(),
            TerminationStatus::Terminated(TerminationReason::SolverConverged)
        );
        debug!(
            iterations = state.get_iter(),
            converged,
            cost = state.best_cost,
            "simplex search finished"
        );
        (best, state.get_iter(), converged)
    };

    let fit = finish(spec, layout.decode(&best), working, iterations, converged)?;
    if converged {
        return Ok(fit);
    }
    if options.accept_non_converged() {
        warn!(
            iterations,
            log_likelihood = fit.log_likelihood(),
            "optimizer hit its iteration budget, keeping best fit"
        );
        return Ok(fit);
    }
    Err(SarimaError::NonConvergence {
        iterations,
        log_likelihood: fit.log_likelihood(),
        best: Box::new(fit),
    })
}

/// Builds a fit from known parameters.
pub(crate) fn fit_fixed(
    spec: &SarimaSpec,
    series: &MonthlySeries,
    params: FittedParameters,
) -> Result<SarimaFit, SarimaError> {
    let working = prepare(spec, series)?;
    params.check_against(spec)?;
    finish(spec, params, working, 0, true)
}

pub(crate) fn log_likelihood(
    spec: &SarimaSpec,
    series: &MonthlySeries,
    params: &FittedParameters,
) -> Result<f64, SarimaError> {
    let working = prepare(spec, series)?;
    params.check_against(spec)?;
    let out = kalman::run(params, spec.period(), &working.values);
    if out.degenerate {
        return Err(SarimaError::DegenerateLikelihood);
    }
    Ok(out.log_likelihood)
}

/// Final filter pass; refuses degenerate optima.
fn finish(
    spec: &SarimaSpec,
    params: FittedParameters,
    working: WorkingSeries,
    iterations: u64,
    converged: bool,
) -> Result<SarimaFit, SarimaError> {
    let output = kalman::run(&params, spec.period(), &working.values);
    if output.degenerate {
        return Err(SarimaError::DegenerateLikelihood);
    }
    Ok(SarimaFit::new(*spec, params, output, working, iterations, converged))
}

/// Scores the zero start and each coefficient at `±START_OFFSET`, keeping
/// the cheapest. Ties go to the earlier candidate.
fn screen_starts(cost: &SarimaCost<'_>, base: Vec<f64>) -> Vec<f64> {
    let mut candidates = vec![base.clone()];
    for i in 0..cost.layout.n_coeffs() {
        for offset in [START_OFFSET, -START_OFFSET] {
            let mut candidate = base.clone();
            candidate[i] = offset;
            candidates.push(candidate);
        }
    }

    let scores: Vec<f64> = candidates.par_iter().map(|c| cost.evaluate(c)).collect();
    candidates
        .into_iter()
        .zip(scores)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate)
        .unwrap_or(base)
}

fn initial_simplex(start: &[f64], layout: &ParamLayout) -> Vec<Vec<f64>> {
    let coeff_step = if layout.is_constrained() {
        WIDE_STEP
    } else {
        RAW_STEP
    };
    let mut simplex = Vec::with_capacity(start.len() + 1);
    simplex.push(start.to_vec());
    for i in 0..start.len() {
        let mut vertex = start.to_vec();
        vertex[i] += if i < layout.n_coeffs() {
            coeff_step
        } else {
            WIDE_STEP
        };
        simplex.push(vertex);
    }
    simplex
}

/// Cost function for argmin: negative exact log-likelihood.
struct SarimaCost<'a> {
    layout: ParamLayout,
    s: usize,
    data: &'a [f64],
}

impl SarimaCost<'_> {
    fn evaluate(&self, theta: &[f64]) -> f64 {
        let params = self.layout.decode(theta);
        -kalman::run(&params, self.s, self.data).log_likelihood
    }
}

impl CostFunction for SarimaCost<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        Ok(self.evaluate(params))
    }
}
