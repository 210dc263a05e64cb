//! Month sequence generation.

use crate::period::Period;

/// Generates `n_months` consecutive periods starting at `start`.
///
/// # Example
///
/// ```ignore
/// let start = Period::new(2024, 11).unwrap();
/// let months = month_sequence(start, 3);
/// // Nov 2024, Dec 2024, Jan 2025
/// ```
pub fn month_sequence(start: Period, n_months: usize) -> Vec<Period> {
    (0..n_months as i64).map(|i| start.offset(i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        let start = Period::new(2000, 1).unwrap();
        assert!(month_sequence(start, 0).is_empty());
    }

    #[test]
    fn single() {
        let start = Period::new(2000, 6).unwrap();
        assert_eq!(month_sequence(start, 1), vec![start]);
    }

    #[test]
    fn contiguous() {
        let start = Period::new(2000, 1).unwrap();
        let months = month_sequence(start, 30);
        for pair in months.windows(2) {
            assert_eq!(pair[0].months_until(pair[1]), 1);
        }
    }
}
