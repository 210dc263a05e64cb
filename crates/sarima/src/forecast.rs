//! Multi-step forecasts from a fitted model.
//!
//! The filter's final predicted state is pushed forward with no further
//! updates. Point forecasts are integrated back through the differencing
//! polynomial; their variance is carried exactly through the same
//! integration, cross-step covariance included.

use mrr_calendar::month_sequence;
use mrr_series::{ConfidenceLevel, ForecastRow};
use ndarray::Array1;

use crate::error::SarimaError;
use crate::fit::SarimaFit;
use crate::state_space::{StateSpace, symmetrize};

/// Forecast rows plus the intermediate working-scale quantities.
#[derive(Clone, Debug)]
pub struct SarimaForecast {
    rows: Vec<ForecastRow>,
    variances: Vec<f64>,
    working_means: Vec<f64>,
    working_variances: Vec<f64>,
}

impl SarimaForecast {
    /// One row per month after the last observation, in order.
    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ForecastRow> {
        self.rows
    }

    /// Original-scale forecast variance per step (non-decreasing).
    pub fn variances(&self) -> &[f64] {
        &self.variances
    }

    /// Working-scale point forecasts, mean included.
    pub fn working_means(&self) -> &[f64] {
        &self.working_means
    }

    /// Working-scale forecast variances.
    pub fn working_variances(&self) -> &[f64] {
        &self.working_variances
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub(crate) fn project(
    fit: &SarimaFit,
    horizon: usize,
    level: ConfidenceLevel,
) -> Result<SarimaForecast, SarimaError> {
    let spec = fit.spec();
    let params = fit.params();
    let sigma2 = params.sigma2();
    let ss = StateSpace::from_params(params, spec.period());
    let t = ss.t();
    let start = fit.final_state();

    let mut working_means = Vec::with_capacity(horizon);
    let mut working_variances = Vec::with_capacity(horizon);
    let mut a = start.mean.clone();
    let mut p = start.cov.clone();
    for _ in 0..horizon {
        working_means.push(a[0] + fit.mean());
        working_variances.push(p[[0, 0]]);
        a = t.dot(&a);
        p = symmetrize(t.dot(&p).dot(&t.t()) + ss.rrt() * sigma2);
    }

    let diff = spec.differencing();
    let points = diff.integrate(fit.seeds(), &working_means)?;

    // g: integration weights, zt[k] = Z'T^k, psi[k] = Z'T^k R.
    let g = diff.psi_weights(horizon);
    let mut zt = Vec::with_capacity(horizon);
    let mut row = Array1::<f64>::zeros(ss.r());
    row[0] = 1.0;
    for _ in 0..horizon {
        let next = row.dot(t);
        zt.push(row);
        row = next;
    }
    let psi: Vec<f64> = zt.iter().map(|z| z.dot(ss.r_vec())).collect();
    let psi_star: Vec<f64> = (0..horizon)
        .map(|j| (0..=j).map(|u| g[j - u] * psi[u]).sum())
        .collect();

    let mut variances = Vec::with_capacity(horizon);
    let mut shock_sum = 0.0;
    let mut running = 0.0_f64;
    for h in 1..=horizon {
        let mut z = Array1::<f64>::zeros(ss.r());
        for k in 1..=h {
            z.scaled_add(g[h - k], &zt[k - 1]);
        }
        if h >= 2 {
            shock_sum += psi_star[h - 2] * psi_star[h - 2];
        }
        let var = z.dot(&start.cov.dot(&z)) + sigma2 * shock_sum;
        running = running.max(var);
        variances.push(running);
    }

    let periods = month_sequence(fit.last_period().next(), horizon);
    let rows = periods
        .into_iter()
        .zip(points.iter().zip(&variances))
        .map(|(period, (&point, &var))| ForecastRow::from_variance(period, point, var, level))
        .collect();

    Ok(SarimaForecast {
        rows,
        variances,
        working_means,
        working_variances,
    })
}
