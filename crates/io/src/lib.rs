//! # mrr-io
//!
//! Read a monthly revenue history from CSV and write merged forecast
//! tables back out. Bridges the file boundary into the validated
//! [`MonthlySeries`](mrr_series::MonthlySeries) the models consume.
//!
//! ```mermaid
//! graph LR
//!     A["history.csv (month, mrr)"] -->|"read_series_csv()"| B["MonthlySeries"]
//!     C["ForecastTable"] -->|"write_table_csv()"| D["forecast.csv"]
//!     E["Serialize records"] -->|"write_records_csv()"| F["any.csv"]
//! ```

mod error;
mod reader;
mod writer;

pub use error::IoError;
pub use reader::{ReaderConfig, read_series_csv};
pub use writer::{write_records_csv, write_table_csv};
