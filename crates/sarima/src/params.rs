//! Parameter containers and the mapping from optimizer space.
//!
//! The optimizer works on an unconstrained vector
//! `[ar(p), ma(q), sar(P), sma(Q), ln σ²]`. [`ParamLayout`] decodes it into
//! [`FittedParameters`], optionally routing coefficient blocks through the
//! PACF transform so they land in the stationary or invertible region.

use crate::error::SarimaError;
use crate::spec::SarimaSpec;

/// Estimated (or user-supplied) SARIMA coefficients and innovation variance.
///
/// Sign conventions follow the lag polynomials
/// `φ(B) = 1 - Σ φ_i B^i` and `θ(B) = 1 + Σ θ_j B^j` (likewise for the
/// seasonal blocks at lag `s`).
#[derive(Clone, Debug, PartialEq)]
pub struct FittedParameters {
    ar: Vec<f64>,
    ma: Vec<f64>,
    seasonal_ar: Vec<f64>,
    seasonal_ma: Vec<f64>,
    sigma2: f64,
}

impl FittedParameters {
    /// Bundles coefficient blocks and the innovation variance.
    ///
    /// Shapes are checked against a specification when the parameters are
    /// used, see [`SarimaSpec::fit_fixed()`](crate::SarimaSpec::fit_fixed).
    pub fn new(
        ar: Vec<f64>,
        ma: Vec<f64>,
        seasonal_ar: Vec<f64>,
        seasonal_ma: Vec<f64>,
        sigma2: f64,
    ) -> Self {
        Self {
            ar,
            ma,
            seasonal_ar,
            seasonal_ma,
            sigma2,
        }
    }

    /// Non-seasonal AR coefficients (`phi`).
    pub fn ar(&self) -> &[f64] {
        &self.ar
    }

    /// Non-seasonal MA coefficients (`theta`).
    pub fn ma(&self) -> &[f64] {
        &self.ma
    }

    /// Seasonal AR coefficients (`Phi`), acting at multiples of the period.
    pub fn seasonal_ar(&self) -> &[f64] {
        &self.seasonal_ar
    }

    /// Seasonal MA coefficients (`Theta`), acting at multiples of the period.
    pub fn seasonal_ma(&self) -> &[f64] {
        &self.seasonal_ma
    }

    /// Innovation variance (`sigma2`).
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Checks block lengths against `spec` and that `sigma2` is positive.
    pub(crate) fn check_against(&self, spec: &SarimaSpec) -> Result<(), SarimaError> {
        let blocks = [
            ("AR", self.ar.len(), spec.p()),
            ("MA", self.ma.len(), spec.q()),
            ("seasonal AR", self.seasonal_ar.len(), spec.seasonal_p()),
            ("seasonal MA", self.seasonal_ma.len(), spec.seasonal_q()),
        ];
        for (name, got, expected) in blocks {
            if got != expected {
                return Err(SarimaError::InvalidSpec {
                    reason: format!("expected {expected} {name} coefficients, got {got}"),
                });
            }
        }
        let coeffs_finite = self
            .ar
            .iter()
            .chain(&self.ma)
            .chain(&self.seasonal_ar)
            .chain(&self.seasonal_ma)
            .all(|c| c.is_finite());
        if !coeffs_finite || !self.sigma2.is_finite() || self.sigma2 <= 0.0 {
            return Err(SarimaError::InvalidSpec {
                reason: "coefficients must be finite and sigma2 positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Layout of the unconstrained optimizer vector for one specification.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ParamLayout {
    p: usize,
    q: usize,
    seasonal_p: usize,
    seasonal_q: usize,
    stationary: bool,
    invertible: bool,
}

impl ParamLayout {
    pub(crate) fn new(spec: &SarimaSpec, stationary: bool, invertible: bool) -> Self {
        Self {
            p: spec.p(),
            q: spec.q(),
            seasonal_p: spec.seasonal_p(),
            seasonal_q: spec.seasonal_q(),
            stationary,
            invertible,
        }
    }

    /// Number of ARMA coefficients (excludes `ln σ²`).
    pub(crate) fn n_coeffs(&self) -> usize {
        self.p + self.q + self.seasonal_p + self.seasonal_q
    }

    /// Full vector length, `n_coeffs() + 1`.
    pub(crate) fn dim(&self) -> usize {
        self.n_coeffs() + 1
    }

    /// Whether coefficients pass through the PACF transform.
    pub(crate) fn is_constrained(&self) -> bool {
        self.stationary || self.invertible
    }

    /// Decodes an optimizer vector of length [`dim()`](Self::dim).
    pub(crate) fn decode(&self, theta: &[f64]) -> FittedParameters {
        let (ar, rest) = theta.split_at(self.p);
        let (ma, rest) = rest.split_at(self.q);
        let (sar, rest) = rest.split_at(self.seasonal_p);
        let (sma, rest) = rest.split_at(self.seasonal_q);
        let ln_sigma2 = rest.first().copied().unwrap_or(0.0);

        let map_ar = |block: &[f64]| {
            if self.stationary {
                unconstrained_to_coeffs(block)
            } else {
                block.to_vec()
            }
        };
        // 1 + Σθ B^j is invertible exactly when 1 - Σ(-θ) B^j is stationary.
        let map_ma = |block: &[f64]| {
            if self.invertible {
                unconstrained_to_coeffs(block).into_iter().map(|c| -c).collect()
            } else {
                block.to_vec()
            }
        };

        FittedParameters::new(
            map_ar(ar),
            map_ma(ma),
            map_ar(sar),
            map_ma(sma),
            ln_sigma2.exp(),
        )
    }
}

/// Partial autocorrelations `tanh(alpha)` turned into a lag polynomial's
/// coefficients by the Durbin-Levinson recursion. Any real input yields a
/// stable polynomial.
pub(crate) fn unconstrained_to_coeffs(alpha: &[f64]) -> Vec<f64> {
    let mut coeffs: Vec<f64> = Vec::with_capacity(alpha.len());
    for (k, a) in alpha.iter().enumerate() {
        let pacf = a.tanh();
        let lower: Vec<f64> = (0..k)
            .map(|j| coeffs[j] - pacf * coeffs[k - 1 - j])
            .collect();
        coeffs = lower;
        coeffs.push(pacf);
    }
    coeffs
}
