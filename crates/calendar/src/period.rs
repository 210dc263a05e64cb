//! Calendar month with year context.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

/// A single calendar month (e.g. March 2024).
///
/// Periods are totally ordered by `(year, month)` and map one-to-one onto a
/// linear month index, which makes "one month later" and "how many months
/// apart" exact integer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month: u8,
}

impl Period {
    /// Creates a new `Period` from a year and a month number (1..=12).
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
    pub fn new(year: i32, month: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        Ok(Self { year, month })
    }

    /// Builds a period from its linear month index (`year * 12 + month - 1`).
    pub fn from_index(index: i64) -> Self {
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u8 + 1,
        }
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Linear month index: consecutive months differ by exactly one.
    pub fn index(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    /// Returns the following month, wrapping December into January.
    pub fn next(self) -> Self {
        self.offset(1)
    }

    /// Returns the period `n` months later (earlier when `n` is negative).
    pub fn offset(self, n: i64) -> Self {
        Self::from_index(self.index() + n)
    }

    /// Number of months from `self` to `other` (negative if `other` is earlier).
    pub fn months_until(self, other: Period) -> i64 {
        other.index() - self.index()
    }
}

impl From<NaiveDate> for Period {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month() as u8,
        }
    }
}

/// Formats as the first day of the month, `YYYY-MM-01`.
impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-01", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = CalendarError;

    /// Parses `YYYY-MM-DD` (any valid day, truncated to its month) or `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(date.into());
        }
        let unparseable = || CalendarError::Unparseable {
            input: s.to_string(),
        };
        let (year, month) = s.split_once('-').ok_or_else(unparseable)?;
        let year: i32 = year.parse().map_err(|_| unparseable())?;
        let month: u8 = month.parse().map_err(|_| unparseable())?;
        Self::new(year, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_valid() {
        let p = Period::new(2024, 3).unwrap();
        assert_eq!(p.year(), 2024);
        assert_eq!(p.month(), 3);
    }

    #[test]
    fn new_invalid_month() {
        assert_eq!(
            Period::new(2024, 0).unwrap_err(),
            CalendarError::InvalidMonth { month: 0 }
        );
        assert_eq!(
            Period::new(2024, 13).unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
    }

    #[test]
    fn next_within_year() {
        let p = Period::new(2024, 6).unwrap().next();
        assert_eq!((p.year(), p.month()), (2024, 7));
    }

    #[test]
    fn next_december_wraps() {
        let p = Period::new(2024, 12).unwrap().next();
        assert_eq!((p.year(), p.month()), (2025, 1));
    }

    #[test]
    fn offset_negative() {
        let p = Period::new(2024, 2).unwrap().offset(-3);
        assert_eq!((p.year(), p.month()), (2023, 11));
    }

    #[test]
    fn index_round_trip() {
        for idx in [-25_i64, -1, 0, 1, 11, 12, 24_290] {
            assert_eq!(Period::from_index(idx).index(), idx);
        }
    }

    #[test]
    fn months_until() {
        let a = Period::new(2021, 1).unwrap();
        let b = Period::new(2024, 12).unwrap();
        assert_eq!(a.months_until(b), 47);
        assert_eq!(b.months_until(a), -47);
    }

    #[test]
    fn ordering() {
        let a = Period::new(2023, 12).unwrap();
        let b = Period::new(2024, 1).unwrap();
        assert!(a < b);
        assert!(b > a);
    }

    #[test]
    fn display_first_of_month() {
        assert_eq!(Period::new(2025, 1).unwrap().to_string(), "2025-01-01");
    }

    #[test]
    fn parse_full_date() {
        let p: Period = "2021-01-01".parse().unwrap();
        assert_eq!(p, Period::new(2021, 1).unwrap());
        let p: Period = "2021-02-17".parse().unwrap();
        assert_eq!(p, Period::new(2021, 2).unwrap());
    }

    #[test]
    fn parse_year_month() {
        let p: Period = " 2022-11 ".parse().unwrap();
        assert_eq!(p, Period::new(2022, 11).unwrap());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            "not-a-month".parse::<Period>(),
            Err(CalendarError::Unparseable { .. })
        ));
        assert!(matches!(
            "2022".parse::<Period>(),
            Err(CalendarError::Unparseable { .. })
        ));
        assert_eq!(
            "2022-14".parse::<Period>().unwrap_err(),
            CalendarError::InvalidMonth { month: 14 }
        );
    }

    #[test]
    fn display_parse_round_trip() {
        let p = Period::new(1999, 9).unwrap();
        assert_eq!(p.to_string().parse::<Period>().unwrap(), p);
    }
}
