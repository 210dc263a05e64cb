//! Differencing and its reversal.

use crate::error::SarimaError;
use crate::polynomial::polymul;

/// The differencing operator `(1 - B)^d (1 - B^s)^D`.
///
/// Applying it turns the raw series into the working series the ARMA part
/// is fitted to. [`Differencing::integrate()`] undoes it exactly, given the
/// `order()` values that precede the working segment as seeds: each new
/// level is the working value minus the lag-weighted sum of the previous
/// levels, so actual and already-integrated values feed forward.
///
/// # Example
///
/// ```
/// use mrr_sarima::Differencing;
///
/// let diff = Differencing::new(1, 0, 0);
/// let y = [1.0, 3.0, 6.0, 10.0];
/// let w = diff.apply(&y);
/// assert_eq!(w, vec![2.0, 3.0, 4.0]);
/// let back = diff.integrate(&y[..1], &w).unwrap();
/// assert_eq!(back, vec![3.0, 6.0, 10.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Differencing {
    poly: Vec<f64>,
}

impl Differencing {
    /// Builds `(1 - B)^d (1 - B^s)^D`.
    ///
    /// A seasonal period of zero disables seasonal differencing.
    pub fn new(d: usize, seasonal_d: usize, s: usize) -> Self {
        let mut poly = vec![1.0];
        for _ in 0..d {
            poly = polymul(&poly, &[1.0, -1.0]);
        }
        if s > 0 {
            let mut seasonal = vec![0.0; s + 1];
            seasonal[0] = 1.0;
            seasonal[s] = -1.0;
            for _ in 0..seasonal_d {
                poly = polymul(&poly, &seasonal);
            }
        }
        Self { poly }
    }

    /// Number of leading values consumed by differencing (`d + s·D`).
    pub fn order(&self) -> usize {
        self.poly.len() - 1
    }

    /// Lag-polynomial coefficients, leading `1.0` included.
    pub fn polynomial(&self) -> &[f64] {
        &self.poly
    }

    /// Returns `true` when the operator is the identity (`d = D = 0`).
    pub fn is_identity(&self) -> bool {
        self.order() == 0
    }

    /// Differences `y`, returning `y.len() - order()` working values
    /// (empty if `y` is not longer than the order).
    pub fn apply(&self, y: &[f64]) -> Vec<f64> {
        let l = self.order();
        if y.len() <= l {
            return Vec::new();
        }
        (l..y.len())
            .map(|t| {
                self.poly
                    .iter()
                    .enumerate()
                    .map(|(j, c)| c * y[t - j])
                    .sum()
            })
            .collect()
    }

    /// Integrates `working` back to levels, continuing from `seeds`.
    ///
    /// `seeds` are the `order()` level values immediately preceding the
    /// first working value. Returns one level per working value; with
    /// an empty `working` slice the result is empty.
    ///
    /// # Errors
    ///
    /// Returns [`SarimaError::SeedLength`] if `seeds.len() != order()`.
    pub fn integrate(&self, seeds: &[f64], working: &[f64]) -> Result<Vec<f64>, SarimaError> {
        let l = self.order();
        if seeds.len() != l {
            return Err(SarimaError::SeedLength {
                expected: l,
                got: seeds.len(),
            });
        }
        let mut levels = Vec::with_capacity(l + working.len());
        levels.extend_from_slice(seeds);
        for (k, &w) in working.iter().enumerate() {
            let t = l + k;
            let carried: f64 = (1..=l).map(|j| self.poly[j] * levels[t - j]).sum();
            levels.push(w - carried);
        }
        Ok(levels.split_off(l))
    }

    /// First `n` coefficients of the power series `1 / ((1-B)^d (1-B^s)^D)`.
    ///
    /// Entry `k` is the effect of a unit working-scale shock on the level
    /// `k` steps later, which is how forecast uncertainty is carried through
    /// the integration.
    pub fn psi_weights(&self, n: usize) -> Vec<f64> {
        let l = self.order();
        let mut g = Vec::with_capacity(n);
        for k in 0..n {
            if k == 0 {
                g.push(1.0);
                continue;
            }
            let value: f64 = -(1..=l.min(k)).map(|j| self.poly[j] * g[k - j]).sum::<f64>();
            g.push(value);
        }
        g
    }
}
