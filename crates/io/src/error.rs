//! Error types for mrr-io.

use std::path::PathBuf;

use mrr_series::SeriesError;

/// Error type for all fallible operations in the mrr-io crate.
///
/// Covers missing files, malformed CSV, unparseable cells and series that
/// fail validation once assembled.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the csv crate.
    #[error("csv error in {}: {reason}", path.display())]
    Csv {
        /// File being read or written.
        path: PathBuf,
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Returned when a required column is not in the header row.
    #[error("column '{name}' not found in {}", path.display())]
    MissingColumn {
        /// Name of the missing column.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a cell cannot be parsed.
    #[error("line {line}, column '{column}': {reason}")]
    Parse {
        /// 1-based line number in the file, header included.
        line: u64,
        /// Column name.
        column: String,
        /// What went wrong.
        reason: String,
    },

    /// The rows parsed but do not form a valid monthly series.
    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl IoError {
    pub(crate) fn csv(path: impl Into<PathBuf>, err: csv::Error) -> Self {
        IoError::Csv {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}
