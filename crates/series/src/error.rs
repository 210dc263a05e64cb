//! Error types for the mrr-series crate.

use mrr_calendar::Period;

/// Error type for series validation and forecast-row construction.
///
/// The ordering, spacing and finiteness variants together form the
/// "malformed series" family: any of them means no forecast is attempted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when the series has no observations.
    #[error("series is empty")]
    Empty,

    /// Returned when a period is not strictly after its predecessor
    /// (duplicated or out-of-order month).
    #[error("period {current} at index {index} does not follow {previous}")]
    NotIncreasing {
        /// Position of the offending observation.
        index: usize,
        /// Period of the preceding observation.
        previous: Period,
        /// Period of the offending observation.
        current: Period,
    },

    /// Returned when consecutive periods are more than one month apart.
    #[error("gap in series at index {index}: expected {expected}, found {found}")]
    Gap {
        /// Position of the offending observation.
        index: usize,
        /// The month that should have come next.
        expected: Period,
        /// The month actually present.
        found: Period,
    },

    /// Returned when an observation is NaN or infinite.
    #[error("non-finite value at index {index} ({period})")]
    NonFinite {
        /// Position of the offending observation.
        index: usize,
        /// Period of the offending observation.
        period: Period,
    },

    /// Returned when a confidence level is outside the open interval (0, 1).
    #[error("invalid confidence level: {level} (must be in (0, 1))")]
    InvalidConfidenceLevel {
        /// The rejected level.
        level: f64,
    },

    /// Returned when forecast bounds do not satisfy lower <= point <= upper.
    #[error("invalid bounds for {period}: lower={lower}, point={point}, upper={upper}")]
    InvalidBounds {
        /// Period of the rejected row.
        period: Period,
        /// Rejected lower bound.
        lower: f64,
        /// Rejected point estimate.
        point: f64,
        /// Rejected upper bound.
        upper: f64,
    },
}

impl SeriesError {
    /// Returns `true` for the ordering, spacing and finiteness failures of
    /// an input series.
    pub fn is_malformed_series(&self) -> bool {
        matches!(
            self,
            Self::Empty | Self::NotIncreasing { .. } | Self::Gap { .. } | Self::NonFinite { .. }
        )
    }
}
