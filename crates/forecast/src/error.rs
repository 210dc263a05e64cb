//! Error types for the mrr-forecast crate.

use mrr_decompose::DecomposeError;
use mrr_sarima::SarimaError;
use mrr_series::SeriesError;

/// Error type for the forecasting pipeline.
///
/// Model errors are wrapped unchanged so callers can still match on, for
/// example, [`SarimaError::NonConvergence`] and recover the best fit.
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    /// The input series or a forecast row failed validation.
    #[error(transparent)]
    Series(#[from] SeriesError),

    /// SARIMA fitting or forecasting failed.
    #[error(transparent)]
    Sarima(#[from] SarimaError),

    /// Decomposition fitting failed.
    #[error(transparent)]
    Decompose(#[from] DecomposeError),

    /// Two forecast sources share a name.
    #[error("duplicate forecast source '{name}'")]
    DuplicateSource {
        /// The repeated name.
        name: String,
    },

    /// The registry holds no models.
    #[error("no forecast models registered")]
    NoModels,
}
