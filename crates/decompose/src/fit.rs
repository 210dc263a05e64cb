//! Fitting and extrapolating the decomposition.

use mrr_calendar::Period;
use mrr_series::{ConfidenceLevel, ForecastRow, MonthlySeries};
use ndarray::{Array1, Array2};
use tracing::debug;

use crate::basis::Basis;
use crate::error::DecomposeError;
use crate::linalg::Cholesky;
use crate::spec::DecompositionSpec;

/// Fewest observations that define a time axis.
const MIN_OBSERVATIONS: usize = 2;

/// Ridge applied to every column so the normal equations stay definite.
const PENALTY_FLOOR: f64 = 1e-8;

/// A fitted trend + seasonality model produced by [`DecompositionSpec::fit()`].
///
/// Values are stored on the scaled axis internally; every accessor reports
/// the original units.
#[derive(Clone, Debug)]
pub struct DecompositionFit {
    spec: DecompositionSpec,
    basis: Basis,
    beta: Array1<f64>,
    factor: Cholesky,
    y_scale: f64,
    sigma2: f64,
    fitted: Vec<f64>,
    n_obs: usize,
}

#[tracing::instrument(skip_all, fields(n = series.len()))]
pub(crate) fn fit_decomposition(
    spec: &DecompositionSpec,
    series: &MonthlySeries,
) -> Result<DecompositionFit, DecomposeError> {
    spec.validate()?;
    let n = series.len();
    if n < MIN_OBSERVATIONS {
        return Err(DecomposeError::InsufficientData {
            n,
            min: MIN_OBSERVATIONS,
        });
    }

    let basis = Basis::new(spec, series.start(), n);
    let max_abs = series.values().iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let y_scale = if max_abs > 0.0 { max_abs } else { 1.0 };
    let y: Array1<f64> = series.values().iter().map(|v| v / y_scale).collect();

    let x = basis.matrix(n);
    let xtx = x.t().dot(&x);
    let xty = x.t().dot(&y);
    let dof = n.saturating_sub(basis.n_cols()).max(1) as f64;

    // A near-unpenalized pass sets the noise level; the priors on slope
    // changes and seasonal amplitudes are then scaled against it.
    let floor = basis.penalties(PENALTY_FLOOR, PENALTY_FLOOR, PENALTY_FLOOR);
    let (beta0, _) = solve_penalized(&xtx, &xty, &floor)?;
    let noise = residual_sum_of_squares(&x, &y, &beta0) / dof;

    let penalties = basis.penalties(
        noise / spec.changepoint_prior_scale().powi(2),
        noise / spec.seasonality_prior_scale().powi(2),
        PENALTY_FLOOR,
    );
    let (beta, factor) = solve_penalized(&xtx, &xty, &penalties)?;
    let sigma2 = residual_sum_of_squares(&x, &y, &beta) / dof;
    let fitted = x.dot(&beta).iter().map(|v| v * y_scale).collect();

    debug!(
        sigma2 = sigma2 * y_scale * y_scale,
        changepoints = basis.changepoints().len(),
        columns = basis.n_cols(),
        "decomposition fitted"
    );

    Ok(DecompositionFit {
        spec: *spec,
        basis,
        beta,
        factor,
        y_scale,
        sigma2,
        fitted,
        n_obs: n,
    })
}

fn solve_penalized(
    xtx: &Array2<f64>,
    xty: &Array1<f64>,
    penalties: &Array1<f64>,
) -> Result<(Array1<f64>, Cholesky), DecomposeError> {
    let a = xtx + &Array2::from_diag(penalties);
    let factor = Cholesky::new(&a)?;
    Ok((factor.solve(xty), factor))
}

fn residual_sum_of_squares(x: &Array2<f64>, y: &Array1<f64>, beta: &Array1<f64>) -> f64 {
    let resid = y - &x.dot(beta);
    resid.dot(&resid)
}

impl DecompositionFit {
    pub fn spec(&self) -> DecompositionSpec {
        self.spec
    }

    pub fn n_obs(&self) -> usize {
        self.n_obs
    }

    /// Number of regression columns.
    pub fn n_params(&self) -> usize {
        self.basis.n_cols()
    }

    /// Last observed month, the anchor for forecast periods.
    pub fn last_period(&self) -> Period {
        self.basis.origin().offset(self.n_obs as i64 - 1)
    }

    /// Months where the trend slope may change.
    pub fn changepoints(&self) -> Vec<Period> {
        self.basis
            .changepoints()
            .iter()
            .map(|&cp| self.basis.origin().offset(cp as i64))
            .collect()
    }

    /// In-sample fitted values.
    pub fn fitted_values(&self) -> &[f64] {
        &self.fitted
    }

    /// Residual variance `RSS / (n - k)`.
    pub fn residual_variance(&self) -> f64 {
        self.sigma2 * self.y_scale * self.y_scale
    }

    /// Trend slope per month after the last changepoint, which is the
    /// slope used for extrapolation.
    pub fn final_slope(&self) -> f64 {
        let scaled: f64 = self.beta.iter().take(self.basis.n_trend()).skip(1).sum();
        scaled * self.y_scale / self.basis.span()
    }

    /// Trend component at `period`.
    pub fn trend_at(&self, period: Period) -> f64 {
        let row = self.basis.row(self.basis.origin().months_until(period));
        let k = self.basis.n_trend();
        row.iter().zip(&self.beta).take(k).map(|(x, b)| x * b).sum::<f64>() * self.y_scale
    }

    /// Seasonal component at `period`.
    pub fn seasonal_at(&self, period: Period) -> f64 {
        let row = self.basis.row(self.basis.origin().months_until(period));
        let k = self.basis.n_trend();
        row.iter().zip(&self.beta).skip(k).map(|(x, b)| x * b).sum::<f64>() * self.y_scale
    }

    /// Forecasts `horizon` months past the last observation.
    ///
    /// Bounds are the regression prediction interval
    /// `σ̂² (1 + xᵀ (XᵀX + Λ)⁻¹ x)` at `level`.
    pub fn forecast(&self, horizon: usize, level: ConfidenceLevel) -> Vec<ForecastRow> {
        let last = self.n_obs as i64 - 1;
        let scale2 = self.y_scale * self.y_scale;
        (1..=horizon as i64)
            .map(|h| {
                let offset = last + h;
                let x = self.basis.row(offset);
                let point = x.dot(&self.beta) * self.y_scale;
                let variance = self.sigma2 * (1.0 + self.factor.inverse_quad_form(&x)) * scale2;
                ForecastRow::from_variance(self.basis.origin().offset(offset), point, variance, level)
            })
            .collect()
    }
}
