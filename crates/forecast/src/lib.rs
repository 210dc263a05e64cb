//! # mrr-forecast
//!
//! Runs a set of forecasting models over one monthly series and joins
//! their outputs into a single table keyed by month.
//!
//! ```mermaid
//! graph LR
//!     A["ModelConfig"] -->|"ModelRegistry::from_config()"| B["ModelRegistry"]
//!     S["MonthlySeries"] --> R["run_forecast(&series, &registry, horizon)"]
//!     B --> R
//!     R --> T["ForecastReport { table, diagnostics }"]
//! ```
//!
//! Every model implements [`ForecastModel`]; adding one means implementing
//! the trait and registering it. The merged [`ForecastTable`] has three
//! columns per model (`<name>_forecast`, `<name>_lower`, `<name>_upper`).

mod decomposition;
mod error;
mod merge;
mod model;
mod pipeline;
mod registry;
mod sarima;

pub use decomposition::{DECOMPOSITION_NAME, DecompositionModel};
pub use error::ForecastError;
pub use merge::{Estimate, ForecastTable, merge};
pub use model::{FittedModel, ForecastModel, ModelDiagnostics};
pub use pipeline::{ForecastReport, run_forecast};
pub use registry::{ModelConfig, ModelRegistry};
pub use sarima::{SARIMA_NAME, SarimaModel};
