//! Error types for the mrr-sarima crate.

use crate::fit::SarimaFit;

/// Error type for all fallible operations in the mrr-sarima crate.
///
/// Covers specification and data validation, likelihood degeneracy, and
/// optimizer failures during SARIMA fitting.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SarimaError {
    /// Returned when the model orders are inconsistent.
    #[error("invalid model specification: {reason}")]
    InvalidSpec {
        /// Description of the inconsistency.
        reason: String,
    },

    /// Returned when fit options are out of range.
    #[error("invalid fit options: {reason}")]
    InvalidOptions {
        /// Description of the rejected option.
        reason: String,
    },

    /// Returned when the series is too short for the configured orders.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of observations provided.
        n: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when the working (differenced) series is identically zero.
    #[error("working series is identically zero after differencing")]
    ConstantData,

    /// Returned when integration seeds do not match the differencing order.
    #[error("integration needs {expected} seed values, got {got}")]
    SeedLength {
        /// Number of seeds the differencing polynomial requires.
        expected: usize,
        /// Number of seeds supplied.
        got: usize,
    },

    /// Returned when the optimizer exhausts its iteration budget before
    /// reaching the convergence tolerance. Carries the best fit found.
    #[error(
        "optimiser did not converge within {iterations} iterations \
         (best log-likelihood {log_likelihood:.4})"
    )]
    NonConvergence {
        /// Iterations performed.
        iterations: u64,
        /// Log-likelihood of the best parameter vector found.
        log_likelihood: f64,
        /// The best-found fit, usable if the caller chooses to accept it.
        best: Box<SarimaFit>,
    },

    /// Returned when the filter breaks down (non-finite state or collapsed
    /// prediction variance) at the selected parameters.
    #[error("log-likelihood is degenerate at the selected parameters")]
    DegenerateLikelihood,

    /// Returned when the optimizer itself reports an error.
    #[error("optimisation failed: {reason}")]
    OptimizationFailed {
        /// Description of the underlying failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_insufficient_data() {
        let err = SarimaError::InsufficientData { n: 5, min: 27 };
        assert_eq!(
            err.to_string(),
            "insufficient data: got 5 observations, need at least 27"
        );
    }

    #[test]
    fn error_constant_data() {
        let err = SarimaError::ConstantData;
        assert_eq!(
            err.to_string(),
            "working series is identically zero after differencing"
        );
    }

    #[test]
    fn error_seed_length() {
        let err = SarimaError::SeedLength {
            expected: 13,
            got: 12,
        };
        assert_eq!(err.to_string(), "integration needs 13 seed values, got 12");
    }

    #[test]
    fn error_degenerate() {
        assert_eq!(
            SarimaError::DegenerateLikelihood.to_string(),
            "log-likelihood is degenerate at the selected parameters"
        );
    }

    #[test]
    fn error_invalid_spec() {
        let err = SarimaError::InvalidSpec {
            reason: "seasonal period must be at least 2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid model specification: seasonal period must be at least 2"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<SarimaError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SarimaError>();
    }
}
