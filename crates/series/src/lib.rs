//! # mrr-series
//!
//! The shared vocabulary of the forecasting workspace: a validated,
//! gap-free monthly series going in, and forecast rows with confidence
//! bounds coming out.
//!
//! ```mermaid
//! graph LR
//!     A["Vec of (Period, f64)"] -->|"MonthlySeries::new()?"| B["MonthlySeries"]
//!     B --> C[".values(): zero-indexed array"]
//!     B --> D[".last_period(): forecast anchor"]
//!     E["ConfidenceLevel::new(0.95)?"] --> F["ForecastRow::from_variance()"]
//! ```

mod error;
mod interval;
mod row;
mod series;

pub use error::SeriesError;
pub use interval::ConfidenceLevel;
pub use row::ForecastRow;
pub use series::MonthlySeries;
