//! Companion-form state space for the expanded seasonal ARMA.
//!
//! The multiplicative polynomials are expanded first (see
//! [`crate::polynomial`]), so the state space only ever sees one AR and one
//! MA coefficient vector:
//!
//! ```text
//! x[t+1] = T * x[t] + R * e[t]     (state transition)
//! w[t]   = Z' * x[t]                (observation, Z = e_1, no noise)
//! ```
//!
//! where `T` is the transition matrix, `R` the noise-input vector and
//! `e[t] ~ N(0, sigma2)`.
//!
//! **Not part of the public API.**

use ndarray::{Array1, Array2, Axis};

use crate::params::FittedParameters;
use crate::polynomial::{expand_ar, expand_ma};

/// Doubling steps before the Lyapunov iteration gives up.
const LYAPUNOV_MAX_STEPS: usize = 50;

/// The doubling has converged once every entry of `T^(2^k)` is below this.
const LYAPUNOV_TOLERANCE: f64 = 1e-12;

/// Scale of the approximate diffuse prior.
pub(crate) const DIFFUSE_SCALE: f64 = 1e6;

/// State-space representation of an expanded ARMA(p', q') model.
///
/// Holds the transition matrix `T`, noise input vector `R`, and
/// precomputed `R·Rᵀ` for the Kalman filter.
#[derive(Clone, Debug)]
pub(crate) struct StateSpace {
    r: usize,
    t: Array2<f64>,
    r_vec: Array1<f64>,
    rrt: Array2<f64>,
}

impl StateSpace {
    /// Builds a state-space representation from expanded AR and MA coefficients.
    pub(crate) fn new(ar: &[f64], ma: &[f64]) -> Self {
        let p = ar.len();
        let q = ma.len();
        let r = p.max(q + 1).max(1);

        // First column holds the AR coefficients, super-diagonal shifts the state.
        let mut t = Array2::zeros((r, r));
        for (i, &a) in ar.iter().enumerate() {
            t[[i, 0]] = a;
        }
        for i in 0..r.saturating_sub(1) {
            t[[i, i + 1]] = 1.0;
        }

        let mut r_vec = Array1::zeros(r);
        r_vec[0] = 1.0;
        for (j, &b) in ma.iter().enumerate() {
            r_vec[j + 1] = b;
        }

        let r_col = r_vec.view().insert_axis(Axis(1));
        let r_row = r_vec.view().insert_axis(Axis(0));
        let rrt = r_col.dot(&r_row);

        Self { r, t, r_vec, rrt }
    }

    /// Expands the seasonal blocks of `params` (period `s`) and builds the
    /// state space of the resulting ARMA.
    pub(crate) fn from_params(params: &FittedParameters, s: usize) -> Self {
        let ar = expand_ar(params.ar(), params.seasonal_ar(), s);
        let ma = expand_ma(params.ma(), params.seasonal_ma(), s);
        Self::new(&ar, &ma)
    }

    /// State dimension `r = max(p, q+1)`, minimum 1.
    pub(crate) fn r(&self) -> usize {
        self.r
    }

    /// Transition matrix `T` (r×r) in companion form.
    pub(crate) fn t(&self) -> &Array2<f64> {
        &self.t
    }

    /// Noise input vector `R = [1, θ₁, …, θ_q, 0, …, 0]` (length r).
    pub(crate) fn r_vec(&self) -> &Array1<f64> {
        &self.r_vec
    }

    /// Precomputed `R·Rᵀ` (r×r), the rank-1 outer product.
    pub(crate) fn rrt(&self) -> &Array2<f64> {
        &self.rrt
    }

    /// Unconditional state covariance, solving `P = T P Tᵀ + σ² R Rᵀ`.
    ///
    /// Uses the doubling iteration `P ← P + A P Aᵀ`, `A ← A²`, which
    /// converges exactly when `T` is stable. Returns `None` for a
    /// non-stationary AR part (the iteration does not settle or overflows).
    pub(crate) fn stationary_covariance(&self, sigma2: f64) -> Option<Array2<f64>> {
        let mut p = self.rrt.mapv(|v| v * sigma2);
        let mut a = self.t.clone();
        for _ in 0..LYAPUNOV_MAX_STEPS {
            p = &p + &a.dot(&p).dot(&a.t());
            a = a.dot(&a);
            if !p.iter().all(|v| v.is_finite()) || !a.iter().all(|v| v.is_finite()) {
                return None;
            }
            if a.iter().all(|v| v.abs() < LYAPUNOV_TOLERANCE) {
                return Some(symmetrize(p));
            }
        }
        None
    }

    /// Covariance used to start the filter: the stationary solution when
    /// it exists, otherwise `DIFFUSE_SCALE · max(1, scale) · I`.
    pub(crate) fn initial_covariance(&self, sigma2: f64, scale: f64) -> Array2<f64> {
        self.stationary_covariance(sigma2).unwrap_or_else(|| {
            Array2::eye(self.r) * (DIFFUSE_SCALE * scale.max(1.0))
        })
    }
}

/// `(M + Mᵀ) / 2`.
pub(crate) fn symmetrize(m: Array2<f64>) -> Array2<f64> {
    let mt = m.t().to_owned();
    (m + mt) * 0.5
}
