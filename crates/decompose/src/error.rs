//! Error types for the mrr-decompose crate.

/// Error type for all fallible operations in the mrr-decompose crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DecomposeError {
    /// Returned when a configuration value is out of range.
    #[error("invalid decomposition config: {reason}")]
    InvalidConfig {
        /// Description of the rejected setting.
        reason: String,
    },

    /// Returned when the series is too short to place a time axis.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of observations provided.
        n: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when the penalized normal equations are not positive definite.
    #[error("normal equations are singular (pivot {pivot} at column {column})")]
    Singular {
        /// Column where the factorization broke down.
        column: usize,
        /// The offending pivot value.
        pivot: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_insufficient_data() {
        let err = DecomposeError::InsufficientData { n: 1, min: 2 };
        assert_eq!(
            err.to_string(),
            "insufficient data: got 1 observations, need at least 2"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<DecomposeError>();
    }
}
