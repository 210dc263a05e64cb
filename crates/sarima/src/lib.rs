//! # mrr-sarima
//!
//! Seasonal ARIMA (p,d,q)×(P,D,Q,s) fitting and forecasting via state-space
//! maximum likelihood (Kalman filter).
//!
//! ## Typestate Workflow
//!
//! ```mermaid
//! graph LR
//!     A["SarimaSpec::new((p,d,q), (P,D,Q,s))"] -->|".fit(&series, &opts)?"| B["SarimaFit"]
//!     B --> C[".params(): FittedParameters"]
//!     B --> D[".log_likelihood() / .aic()"]
//!     B -->|".forecast(horizon, level)"| E["SarimaForecast"]
//!     E --> F[".rows(): ForecastRow per future month"]
//! ```
//!
//! ## Pipeline
//!
//! 1. Difference the series with `(1-B)^d (1-B^s)^D` to get the working series.
//! 2. Expand `φ(B)Φ(B^s)` and `θ(B)Θ(B^s)` into one ARMA and cast it in
//!    companion state-space form.
//! 3. Maximise the exact Gaussian log-likelihood (prediction error
//!    decomposition) over the coefficients and `ln σ²` with Nelder-Mead.
//! 4. Run the filter once more at the optimum, project the state forward and
//!    integrate the working-scale forecasts back to the original scale.
//!
//! ## Mathematical Glossary
//!
//! | Symbol | Accessor | Meaning |
//! |--------|----------|---------|
//! | phi | [`FittedParameters::ar()`] | non-seasonal AR coefficients |
//! | theta | [`FittedParameters::ma()`] | non-seasonal MA coefficients |
//! | Phi | [`FittedParameters::seasonal_ar()`] | seasonal AR coefficients (lag s) |
//! | Theta | [`FittedParameters::seasonal_ma()`] | seasonal MA coefficients (lag s) |
//! | sigma2 | [`FittedParameters::sigma2()`] | innovation variance |

mod difference;
mod error;
mod fit;
mod forecast;
mod options;
mod spec;

pub(crate) mod kalman;
pub(crate) mod optimizer;
pub(crate) mod params;
pub(crate) mod polynomial;
pub(crate) mod state_space;

pub use difference::Differencing;
pub use error::SarimaError;
pub use fit::SarimaFit;
pub use forecast::SarimaForecast;
pub use options::FitOptions;
pub use params::FittedParameters;
pub use spec::SarimaSpec;
