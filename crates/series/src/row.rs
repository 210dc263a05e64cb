//! One forecasted period with its interval.

use mrr_calendar::Period;

use crate::error::SeriesError;
use crate::interval::ConfidenceLevel;

/// Point forecast and confidence bounds for a single future month.
///
/// Invariant: `lower <= point <= upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRow {
    period: Period,
    point: f64,
    lower: f64,
    upper: f64,
}

impl ForecastRow {
    /// Creates a row from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::InvalidBounds`] if the bounds are not ordered
    /// around the point or any value is non-finite.
    pub fn new(period: Period, point: f64, lower: f64, upper: f64) -> Result<Self, SeriesError> {
        let finite = point.is_finite() && lower.is_finite() && upper.is_finite();
        if !finite || lower > point || point > upper {
            return Err(SeriesError::InvalidBounds {
                period,
                lower,
                point,
                upper,
            });
        }
        Ok(Self {
            period,
            point,
            lower,
            upper,
        })
    }

    /// Creates a symmetric Gaussian interval `point ± z·√variance`.
    ///
    /// Negative variance (numerical noise) is treated as zero.
    pub fn from_variance(period: Period, point: f64, variance: f64, level: ConfidenceLevel) -> Self {
        let half = level.z_score() * variance.max(0.0).sqrt();
        Self {
            period,
            point,
            lower: point - half,
            upper: point + half,
        }
    }

    /// The forecasted month.
    pub fn period(&self) -> Period {
        self.period
    }

    /// Point estimate.
    pub fn point(&self) -> f64 {
        self.point
    }

    /// Lower bound.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Half the interval width.
    pub fn half_width(&self) -> f64 {
        (self.upper - self.lower) / 2.0
    }
}
