//! # mrr-decompose
//!
//! Additive decomposition forecaster: a piecewise-linear trend with a few
//! ridge-penalized changepoints plus a Fourier seasonal component, fitted
//! jointly by penalized least squares and extrapolated forward.
//!
//! ```mermaid
//! graph LR
//!     A["DecompositionSpec::default()"] -->|".fit(&series)?"| B["DecompositionFit"]
//!     B --> C[".trend_at() / .seasonal_at()"]
//!     B -->|".forecast(horizon, level)"| D["Vec of ForecastRow"]
//! ```
//!
//! Time is scaled so the history spans `[0, 1]` and values are divided by
//! their largest magnitude before fitting, so the prior scales are
//! independent of units. Forecast bounds come from the regression
//! prediction interval on the final penalized fit.

mod basis;
mod error;
mod fit;
mod linalg;
mod spec;

pub use error::DecomposeError;
pub use fit::DecompositionFit;
pub use spec::DecompositionSpec;
