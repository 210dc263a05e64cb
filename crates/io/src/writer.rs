//! CSV writers for forecast tables and generated records.

use std::path::Path;

use mrr_forecast::ForecastTable;
use serde::Serialize;
use tracing::info;

use crate::error::IoError;

/// Header of the leading month column in every table written here.
pub const MONTH_COLUMN: &str = "month";

/// Write a merged forecast table to `path`.
///
/// The first column is `month` (`YYYY-MM-01`), followed by
/// `<source>_forecast`, `<source>_lower` and `<source>_upper` per source in
/// join order. A source with no estimate for a month leaves its three
/// cells empty.
///
/// # Errors
///
/// Returns [`IoError::Csv`] if the file cannot be created or written.
pub fn write_table_csv(path: &Path, table: &ForecastTable) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| IoError::csv(path, e))?;

    let mut header = vec![MONTH_COLUMN.to_string()];
    header.extend(table.column_names());
    writer
        .write_record(&header)
        .map_err(|e| IoError::csv(path, e))?;

    for (period, cells) in table.rows() {
        let mut record = Vec::with_capacity(header.len());
        record.push(period.to_string());
        for cell in cells {
            match cell {
                Some(est) => {
                    record.push(est.point.to_string());
                    record.push(est.lower.to_string());
                    record.push(est.upper.to_string());
                }
                None => record.extend(std::iter::repeat_n(String::new(), 3)),
            }
        }
        writer
            .write_record(&record)
            .map_err(|e| IoError::csv(path, e))?;
    }
    writer.flush()?;

    info!(
        path = %path.display(),
        rows = table.len(),
        sources = table.sources().len(),
        "wrote forecast table"
    );
    Ok(())
}

/// Write `records` to `path`, one row each, headers taken from field names.
///
/// # Errors
///
/// Returns [`IoError::Csv`] if the file cannot be created or a record
/// fails to serialize.
pub fn write_records_csv<T: Serialize>(path: &Path, records: &[T]) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| IoError::csv(path, e))?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| IoError::csv(path, e))?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = records.len(), "wrote records");
    Ok(())
}
