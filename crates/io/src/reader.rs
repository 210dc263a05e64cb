//! CSV reader configuration and loading of monthly series.

use std::path::Path;

use mrr_calendar::Period;
use mrr_series::MonthlySeries;
use tracing::{debug, info};

use crate::error::IoError;

/// Configuration for reading a monthly series from CSV.
///
/// The [`Default`] implementation expects a `month` column holding
/// `YYYY-MM-DD` or `YYYY-MM` dates and an `mrr` column of values, in
/// chronological order.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Header of the month column.
    period_column: String,
    /// Header of the value column.
    value_column: String,
    /// Sort rows by month before validation.
    sort: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            period_column: "month".into(),
            value_column: "mrr".into(),
            sort: false,
        }
    }
}

impl ReaderConfig {
    /// Set the month column header.
    pub fn with_period_column(mut self, name: impl Into<String>) -> Self {
        self.period_column = name.into();
        self
    }

    /// Set the value column header.
    pub fn with_value_column(mut self, name: impl Into<String>) -> Self {
        self.value_column = name.into();
        self
    }

    /// Sort rows by month before building the series.
    ///
    /// Off by default: out-of-order input is reported as malformed.
    pub fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    pub fn period_column(&self) -> &str {
        &self.period_column
    }

    pub fn value_column(&self) -> &str {
        &self.value_column
    }

    pub fn sort(&self) -> bool {
        self.sort
    }
}

/// Read a monthly series from the CSV file at `path`.
///
/// Columns other than the two configured ones are ignored. Days within a
/// date are dropped, so `2024-03-01` and `2024-03` both name March 2024.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`IoError::FileNotFound`] | `path` does not exist |
/// | [`IoError::Csv`] | the file is not readable CSV |
/// | [`IoError::MissingColumn`] | a configured header is absent |
/// | [`IoError::Parse`] | a month or value cell does not parse |
/// | [`IoError::Series`] | rows are empty, duplicated, out of order, gapped or non-finite |
pub fn read_series_csv(path: &Path, config: &ReaderConfig) -> Result<MonthlySeries, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    info!(path = %path.display(), "reading series csv");

    let mut reader = csv::Reader::from_path(path).map_err(|e| IoError::csv(path, e))?;
    let headers = reader.headers().map_err(|e| IoError::csv(path, e))?.clone();
    let column_index = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| IoError::MissingColumn {
                name: name.to_string(),
                path: path.to_path_buf(),
            })
    };
    let period_col = column_index(&config.period_column)?;
    let value_col = column_index(&config.value_column)?;

    let mut observations: Vec<(Period, f64)> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| IoError::csv(path, e))?;
        let line = record.position().map_or(0, |p| p.line());
        let cell = |col: usize, name: &str| {
            record.get(col).ok_or_else(|| IoError::Parse {
                line,
                column: name.to_string(),
                reason: "missing field".to_string(),
            })
        };

        let period: Period = cell(period_col, &config.period_column)?
            .parse()
            .map_err(|e: mrr_calendar::CalendarError| IoError::Parse {
                line,
                column: config.period_column.clone(),
                reason: e.to_string(),
            })?;
        let value: f64 = cell(value_col, &config.value_column)?
            .trim()
            .parse()
            .map_err(|e: std::num::ParseFloatError| IoError::Parse {
                line,
                column: config.value_column.clone(),
                reason: e.to_string(),
            })?;
        observations.push((period, value));
    }

    if config.sort {
        observations.sort_by_key(|(p, _)| *p);
    }
    debug!(rows = observations.len(), "parsed csv rows");

    let series = MonthlySeries::new(observations)?;
    info!(
        n = series.len(),
        start = %series.start(),
        end = %series.last_period(),
        "loaded series"
    );
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_columns() {
        let config = ReaderConfig::default();
        assert_eq!(config.period_column(), "month");
        assert_eq!(config.value_column(), "mrr");
        assert!(!config.sort());
    }

    #[test]
    fn builders_override_defaults() {
        let config = ReaderConfig::default()
            .with_period_column("date")
            .with_value_column("revenue")
            .with_sort(true);
        assert_eq!(config.period_column(), "date");
        assert_eq!(config.value_column(), "revenue");
        assert!(config.sort());
    }

    #[test]
    fn file_not_found() {
        let path = Path::new("/tmp/mrr_io_nonexistent_history.csv");
        let err = read_series_csv(path, &ReaderConfig::default()).unwrap_err();
        assert!(
            matches!(err, IoError::FileNotFound { .. }),
            "expected FileNotFound, got {err:?}",
        );
    }
}
