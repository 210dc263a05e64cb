//! Error types for the mrr-calendar crate.

/// Error type for all fallible operations in the mrr-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a string cannot be parsed as a calendar month.
    #[error("cannot parse {input:?} as a month (expected YYYY-MM or YYYY-MM-DD)")]
    Unparseable {
        /// The rejected input text.
        input: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_month() {
        let err = CalendarError::InvalidMonth { month: 13 };
        assert_eq!(err.to_string(), "invalid month: 13 (must be 1..=12)");
    }

    #[test]
    fn error_unparseable() {
        let err = CalendarError::Unparseable {
            input: "june".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot parse \"june\" as a month (expected YYYY-MM or YYYY-MM-DD)"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CalendarError>();
    }
}
