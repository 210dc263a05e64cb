//! Confidence level for two-sided Gaussian intervals.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::SeriesError;

/// A two-sided confidence level in the open interval (0, 1).
///
/// Holds the matching standard-normal quantile so interval construction is
/// a multiply: `point ± z·√variance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceLevel {
    level: f64,
    z: f64,
}

impl ConfidenceLevel {
    /// Creates a confidence level, e.g. `0.95` for a 95% interval.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::InvalidConfidenceLevel`] unless `0 < level < 1`.
    pub fn new(level: f64) -> Result<Self, SeriesError> {
        if !(level > 0.0 && level < 1.0) {
            return Err(SeriesError::InvalidConfidenceLevel { level });
        }
        let normal =
            Normal::new(0.0, 1.0).map_err(|_| SeriesError::InvalidConfidenceLevel { level })?;
        let z = normal.inverse_cdf(0.5 + level / 2.0);
        Ok(Self { level, z })
    }

    /// The level as a probability.
    pub fn get(self) -> f64 {
        self.level
    }

    /// Standard-normal quantile `z` with `P(|Z| <= z) = level`.
    pub fn z_score(self) -> f64 {
        self.z
    }
}

impl Default for ConfidenceLevel {
    /// 95%.
    fn default() -> Self {
        Self {
            level: 0.95,
            z: 1.959_963_984_540_054,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_is_95() {
        let level = ConfidenceLevel::default();
        assert_eq!(level.get(), 0.95);
        let computed = ConfidenceLevel::new(0.95).unwrap();
        assert_abs_diff_eq!(computed.z_score(), level.z_score(), epsilon = 1e-6);
    }

    #[test]
    fn known_quantiles() {
        assert_abs_diff_eq!(
            ConfidenceLevel::new(0.8).unwrap().z_score(),
            1.281_551_6,
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(
            ConfidenceLevel::new(0.99).unwrap().z_score(),
            2.575_829_3,
            epsilon = 1e-5
        );
    }

    #[test]
    fn rejects_out_of_range() {
        for bad in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert!(matches!(
                ConfidenceLevel::new(bad),
                Err(SeriesError::InvalidConfidenceLevel { .. })
            ));
        }
    }

    #[test]
    fn z_grows_with_level() {
        let a = ConfidenceLevel::new(0.5).unwrap().z_score();
        let b = ConfidenceLevel::new(0.9).unwrap().z_score();
        assert!(a > 0.0 && b > a);
    }
}
