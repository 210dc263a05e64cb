//! Validated monthly series.

use mrr_calendar::{Period, month_sequence};

use crate::error::SeriesError;

/// An ordered, gap-free sequence of monthly observations.
///
/// Construction guarantees: at least one observation, every period exactly
/// one month after its predecessor, and every value finite. Because the
/// spacing is fixed, the series stores only its first period plus the
/// values; `values()[i]` belongs to `start().offset(i)`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySeries {
    start: Period,
    values: Vec<f64>,
}

impl MonthlySeries {
    /// Validates raw `(period, value)` observations in the given order.
    ///
    /// Observations are never re-sorted: a duplicated or out-of-order month
    /// is reported, not repaired.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SeriesError::Empty`] | no observations |
    /// | [`SeriesError::NotIncreasing`] | a period is not after its predecessor |
    /// | [`SeriesError::Gap`] | a month is skipped |
    /// | [`SeriesError::NonFinite`] | a value is NaN or infinite |
    pub fn new<I>(observations: I) -> Result<Self, SeriesError>
    where
        I: IntoIterator<Item = (Period, f64)>,
    {
        let observations: Vec<(Period, f64)> = observations.into_iter().collect();
        let (start, _) = *observations.first().ok_or(SeriesError::Empty)?;

        // Ordering is checked over the whole input before spacing, so a swapped
        // pair is reported as out of order rather than as a gap.
        for (index, pair) in observations.windows(2).enumerate() {
            let (previous, current) = (pair[0].0, pair[1].0);
            if current <= previous {
                return Err(SeriesError::NotIncreasing {
                    index: index + 1,
                    previous,
                    current,
                });
            }
        }
        for (index, pair) in observations.windows(2).enumerate() {
            let (previous, found) = (pair[0].0, pair[1].0);
            if previous.months_until(found) != 1 {
                return Err(SeriesError::Gap {
                    index: index + 1,
                    expected: previous.next(),
                    found,
                });
            }
        }
        if let Some(index) = observations.iter().position(|(_, v)| !v.is_finite()) {
            return Err(SeriesError::NonFinite {
                index,
                period: observations[index].0,
            });
        }

        let values = observations.into_iter().map(|(_, v)| v).collect();
        Ok(Self { start, values })
    }

    /// Builds a series of consecutive months beginning at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::Empty`] or [`SeriesError::NonFinite`].
    pub fn from_values(start: Period, values: Vec<f64>) -> Result<Self, SeriesError> {
        if values.is_empty() {
            return Err(SeriesError::Empty);
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(SeriesError::NonFinite {
                index,
                period: start.offset(index as i64),
            });
        }
        Ok(Self { start, values })
    }

    /// First observed period.
    pub fn start(&self) -> Period {
        self.start
    }

    /// Last observed period: the anchor that forecasts continue from.
    pub fn last_period(&self) -> Period {
        self.start.offset(self.values.len() as i64 - 1)
    }

    /// Observed values, zero-indexed from [`start()`](Self::start).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations (always at least one).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; provided for API symmetry with `len()`.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Period of the observation at `index`, if in range.
    pub fn period_at(&self, index: usize) -> Option<Period> {
        (index < self.values.len()).then(|| self.start.offset(index as i64))
    }

    /// Iterates `(period, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (Period, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (self.start.offset(i as i64), v))
    }

    /// The `horizon` periods immediately after the last observation.
    pub fn forecast_periods(&self, horizon: usize) -> Vec<Period> {
        month_sequence(self.last_period().next(), horizon)
    }
}
