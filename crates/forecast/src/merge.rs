//! Outer join of forecast sources on the month index.

use std::collections::BTreeMap;

use mrr_calendar::Period;
use mrr_series::ForecastRow;

use crate::error::ForecastError;

/// Point forecast and bounds contributed by one source for one month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub point: f64,
    pub lower: f64,
    pub upper: f64,
}

impl From<&ForecastRow> for Estimate {
    fn from(row: &ForecastRow) -> Self {
        Self {
            point: row.point(),
            lower: row.lower(),
            upper: row.upper(),
        }
    }
}

/// Forecasts from several named sources aligned on [`Period`].
///
/// The period set is the union of all sources' periods, kept in order.
/// A source that has no row for a period holds `None` there; nothing is
/// filled in or interpolated.
///
/// ```mermaid
/// graph LR
///     A["sarima rows"] --> C["ForecastTable::add_source()"]
///     B["decomposition rows"] --> C
///     C --> D["BTreeMap: Period -> [Option of Estimate; n_sources]"]
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastTable {
    sources: Vec<String>,
    rows: BTreeMap<Period, Vec<Option<Estimate>>>,
}

impl ForecastTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins `rows` as a new source named `name`.
    ///
    /// Existing periods gain a column; new periods are inserted with
    /// `None` for every earlier source.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::DuplicateSource`] if `name` is already present.
    pub fn add_source(&mut self, name: &str, rows: &[ForecastRow]) -> Result<(), ForecastError> {
        if self.sources.iter().any(|s| s == name) {
            return Err(ForecastError::DuplicateSource {
                name: name.to_string(),
            });
        }
        let width = self.sources.len();
        self.sources.push(name.to_string());
        for cells in self.rows.values_mut() {
            cells.push(None);
        }
        for row in rows {
            let cells = self
                .rows
                .entry(row.period())
                .or_insert_with(|| vec![None; width + 1]);
            cells[width] = Some(Estimate::from(row));
        }
        Ok(())
    }

    /// Source names in join order.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// `<name>_forecast`, `<name>_lower`, `<name>_upper` for each source.
    pub fn column_names(&self) -> Vec<String> {
        self.sources
            .iter()
            .flat_map(|s| {
                [
                    format!("{s}_forecast"),
                    format!("{s}_lower"),
                    format!("{s}_upper"),
                ]
            })
            .collect()
    }

    pub fn periods(&self) -> impl Iterator<Item = Period> + '_ {
        self.rows.keys().copied()
    }

    /// Rows in period order, one cell per source.
    pub fn rows(&self) -> impl Iterator<Item = (Period, &[Option<Estimate>])> + '_ {
        self.rows.iter().map(|(p, cells)| (*p, cells.as_slice()))
    }

    /// The estimate of `source` for `period`, if both exist.
    pub fn get(&self, period: Period, source: &str) -> Option<Estimate> {
        let col = self.sources.iter().position(|s| s == source)?;
        self.rows.get(&period).and_then(|cells| cells[col])
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds a table from `(name, rows)` pairs in order.
pub fn merge<'a, I>(sources: I) -> Result<ForecastTable, ForecastError>
where
    I: IntoIterator<Item = (&'a str, &'a [ForecastRow])>,
{
    let mut table = ForecastTable::new();
    for (name, rows) in sources {
        table.add_source(name, rows)?;
    }
    Ok(table)
}
