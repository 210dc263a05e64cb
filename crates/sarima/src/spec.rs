//! SARIMA model specification (unfitted).

use mrr_series::MonthlySeries;

use crate::difference::Differencing;
use crate::error::SarimaError;
use crate::fit::SarimaFit;
use crate::options::FitOptions;
use crate::params::FittedParameters;

/// An unfitted SARIMA(p,d,q)×(P,D,Q,s) model specification.
///
/// This is the entry point of the typestate workflow. Create a spec with
/// [`SarimaSpec::new()`], then call [`SarimaSpec::fit()`] to obtain a
/// [`SarimaFit`].
///
/// # Typestate Workflow
///
/// ```mermaid
/// graph LR
///     A["SarimaSpec::new((p,d,q), (P,D,Q,s))"] -->|".fit(&series, &opts)?"| B["SarimaFit"]
///     A -->|".fit_fixed(&series, params)?"| B
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SarimaSpec {
    p: usize,
    d: usize,
    q: usize,
    seasonal_p: usize,
    seasonal_d: usize,
    seasonal_q: usize,
    s: usize,
}

impl Default for SarimaSpec {
    /// SARIMA(1,1,1)×(1,1,1,12).
    fn default() -> Self {
        Self::new((1, 1, 1), (1, 1, 1, 12))
    }
}

impl SarimaSpec {
    /// Creates a specification from the non-seasonal order `(p, d, q)` and
    /// the seasonal order `(P, D, Q, s)`.
    ///
    /// Consistency is checked by [`SarimaSpec::validate()`], which every
    /// fitting entry point calls.
    ///
    /// # Example
    ///
    /// ```
    /// use mrr_sarima::SarimaSpec;
    ///
    /// let spec = SarimaSpec::new((1, 1, 1), (1, 1, 1, 12));
    /// assert_eq!(spec.order(), (1, 1, 1));
    /// assert_eq!(spec.seasonal_order(), (1, 1, 1, 12));
    /// assert_eq!(spec.min_observations(), 27);
    /// ```
    pub fn new(order: (usize, usize, usize), seasonal: (usize, usize, usize, usize)) -> Self {
        let (p, d, q) = order;
        let (seasonal_p, seasonal_d, seasonal_q, s) = seasonal;
        Self {
            p,
            d,
            q,
            seasonal_p,
            seasonal_d,
            seasonal_q,
            s,
        }
    }

    /// Returns the AR order (`p`).
    pub fn p(&self) -> usize {
        self.p
    }

    /// Returns the differencing order (`d`).
    pub fn d(&self) -> usize {
        self.d
    }

    /// Returns the MA order (`q`).
    pub fn q(&self) -> usize {
        self.q
    }

    /// Returns the seasonal AR order (`P`).
    pub fn seasonal_p(&self) -> usize {
        self.seasonal_p
    }

    /// Returns the seasonal differencing order (`D`).
    pub fn seasonal_d(&self) -> usize {
        self.seasonal_d
    }

    /// Returns the seasonal MA order (`Q`).
    pub fn seasonal_q(&self) -> usize {
        self.seasonal_q
    }

    /// Returns the seasonal period (`s`).
    pub fn period(&self) -> usize {
        self.s
    }

    pub fn order(&self) -> (usize, usize, usize) {
        (self.p, self.d, self.q)
    }

    pub fn seasonal_order(&self) -> (usize, usize, usize, usize) {
        (self.seasonal_p, self.seasonal_d, self.seasonal_q, self.s)
    }

    /// Number of estimated parameters: all coefficients plus `sigma2`.
    pub fn n_params(&self) -> usize {
        self.p + self.q + self.seasonal_p + self.seasonal_q + 1
    }

    /// `true` when any differencing is applied.
    pub fn is_integrated(&self) -> bool {
        self.d > 0 || self.seasonal_d > 0
    }

    /// The differencing operator `(1-B)^d (1-B^s)^D` of this model.
    pub fn differencing(&self) -> Differencing {
        Differencing::new(self.d, self.seasonal_d, self.s)
    }

    /// Shortest series this specification can be fitted to.
    ///
    /// The differencing consumes `d + s·D` values; the remaining working
    /// series must cover the longest lag of the expanded ARMA and the
    /// parameter count, plus one.
    pub fn min_observations(&self) -> usize {
        let lost = self.d + self.s * self.seasonal_d;
        let ar_lag = self.p + self.s * self.seasonal_p;
        let ma_lag = self.q + self.s * self.seasonal_q;
        lost + ar_lag.max(ma_lag).max(self.n_params()) + 1
    }

    /// Checks that seasonal terms come with a usable period.
    ///
    /// # Errors
    ///
    /// Returns [`SarimaError::InvalidSpec`] if any of `P`, `D`, `Q` is
    /// positive while `s < 2`.
    pub fn validate(&self) -> Result<(), SarimaError> {
        let seasonal = self.seasonal_p + self.seasonal_d + self.seasonal_q > 0;
        if seasonal && self.s < 2 {
            return Err(SarimaError::InvalidSpec {
                reason: format!(
                    "seasonal terms need a period of at least 2, got s = {}",
                    self.s
                ),
            });
        }
        Ok(())
    }

    /// Fits this specification to a monthly series by exact maximum
    /// likelihood (Kalman filter + Nelder-Mead).
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SarimaError::InvalidSpec`] | seasonal terms with `s < 2` |
    /// | [`SarimaError::InvalidOptions`] | zero budget or bad tolerance |
    /// | [`SarimaError::InsufficientData`] | `series.len() < min_observations()` |
    /// | [`SarimaError::ConstantData`] | working series identically zero |
    /// | [`SarimaError::DegenerateLikelihood`] | likelihood degenerate at the optimum |
    /// | [`SarimaError::NonConvergence`] | budget exhausted (unless accepted) |
    /// | [`SarimaError::OptimizationFailed`] | the optimizer itself errored |
    pub fn fit(&self, series: &MonthlySeries, options: &FitOptions) -> Result<SarimaFit, SarimaError> {
        crate::optimizer::fit_sarima(self, series, options)
    }

    /// Builds a fit from known parameters without optimizing.
    ///
    /// Runs the filter once so the result can forecast exactly like an
    /// estimated fit.
    pub fn fit_fixed(
        &self,
        series: &MonthlySeries,
        params: FittedParameters,
    ) -> Result<SarimaFit, SarimaError> {
        crate::optimizer::fit_fixed(self, series, params)
    }

    /// Exact Gaussian log-likelihood of `series` under `params`.
    pub fn log_likelihood(
        &self,
        series: &MonthlySeries,
        params: &FittedParameters,
    ) -> Result<f64, SarimaError> {
        crate::optimizer::log_likelihood(self, series, params)
    }
}
