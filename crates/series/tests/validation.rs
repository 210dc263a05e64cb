//! Integration tests for series validation.

use mrr_calendar::{Period, month_sequence};
use mrr_series::{MonthlySeries, SeriesError};

fn history(n: usize) -> Vec<(Period, f64)> {
    let start = Period::new(2021, 1).unwrap();
    month_sequence(start, n)
        .into_iter()
        .enumerate()
        .map(|(i, p)| (p, 150_000.0 + 2_500.0 * i as f64))
        .collect()
}

#[test]
fn four_years_of_history_is_accepted() {
    let series = MonthlySeries::new(history(48)).unwrap();
    assert_eq!(series.len(), 48);
    assert_eq!(series.last_period(), Period::new(2024, 12).unwrap());
}

#[test]
fn swapped_months_are_malformed() {
    let mut obs = history(24);
    obs.swap(10, 11);
    let err = MonthlySeries::new(obs).unwrap_err();
    assert!(err.is_malformed_series());
    assert!(matches!(err, SeriesError::NotIncreasing { index: 11, .. }));
}

#[test]
fn duplicated_month_is_malformed() {
    let mut obs = history(24);
    let dup = obs[5];
    obs.insert(6, dup);
    let err = MonthlySeries::new(obs).unwrap_err();
    assert!(matches!(err, SeriesError::NotIncreasing { index: 6, .. }));
}

#[test]
fn missing_month_is_malformed() {
    let mut obs = history(24);
    obs.remove(7);
    let err = MonthlySeries::new(obs).unwrap_err();
    assert!(matches!(err, SeriesError::Gap { index: 7, .. }));
}
