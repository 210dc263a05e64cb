//! Optimizer settings for [`SarimaSpec::fit()`](crate::SarimaSpec::fit).

use crate::error::SarimaError;

/// Settings controlling the maximum-likelihood search.
///
/// Built with [`FitOptions::default()`] and adjusted through the `with_*`
/// methods.
///
/// ```
/// use mrr_sarima::FitOptions;
///
/// let opts = FitOptions::default()
///     .with_max_iters(500)
///     .with_enforce_stationarity(true);
/// assert_eq!(opts.max_iters(), 500);
/// assert!(opts.enforce_stationarity());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitOptions {
    max_iters: u64,
    tolerance: f64,
    enforce_stationarity: bool,
    enforce_invertibility: bool,
    accept_non_converged: bool,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iters: 2000,
            tolerance: 1e-6,
            enforce_stationarity: false,
            enforce_invertibility: false,
            accept_non_converged: false,
        }
    }
}

impl FitOptions {
    /// Iteration budget for the simplex search.
    pub fn max_iters(&self) -> u64 {
        self.max_iters
    }

    /// Convergence threshold on the standard deviation of simplex costs.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Whether AR coefficients are constrained to the stationary region.
    pub fn enforce_stationarity(&self) -> bool {
        self.enforce_stationarity
    }

    /// Whether MA coefficients are constrained to the invertible region.
    pub fn enforce_invertibility(&self) -> bool {
        self.enforce_invertibility
    }

    /// Whether a fit that exhausted its budget is returned instead of
    /// [`SarimaError::NonConvergence`].
    pub fn accept_non_converged(&self) -> bool {
        self.accept_non_converged
    }

    pub fn with_max_iters(mut self, max_iters: u64) -> Self {
        self.max_iters = max_iters;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_enforce_stationarity(mut self, enforce: bool) -> Self {
        self.enforce_stationarity = enforce;
        self
    }

    pub fn with_enforce_invertibility(mut self, enforce: bool) -> Self {
        self.enforce_invertibility = enforce;
        self
    }

    pub fn with_accept_non_converged(mut self, accept: bool) -> Self {
        self.accept_non_converged = accept;
        self
    }

    /// Checks that the budget is positive and the tolerance finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`SarimaError::InvalidOptions`] describing the first bad field.
    pub fn validate(&self) -> Result<(), SarimaError> {
        if self.max_iters == 0 {
            return Err(SarimaError::InvalidOptions {
                reason: "max_iters must be at least 1".to_string(),
            });
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(SarimaError::InvalidOptions {
                reason: format!("tolerance must be positive, got {}", self.tolerance),
            });
        }
        Ok(())
    }
}
