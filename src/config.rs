use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level configuration, read from `mrr.toml`.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct MrrConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// SARIMA model and optimizer settings.
    #[serde(default)]
    pub sarima: SarimaToml,

    /// Trend/seasonality decomposition settings.
    #[serde(default)]
    pub decomposition: DecompositionToml,

    /// Horizon and interval settings.
    #[serde(default)]
    pub forecast: ForecastToml,
}

impl MrrConfig {
    /// Reads `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default = "default_period_column")]
    pub period_column: String,
    #[serde(default = "default_value_column")]
    pub value_column: String,
    #[serde(default)]
    pub sort: bool,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            period_column: default_period_column(),
            value_column: default_value_column(),
            sort: false,
        }
    }
}

fn default_period_column() -> String {
    "month".to_string()
}
fn default_value_column() -> String {
    "mrr".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SarimaToml {
    /// `[p, d, q]`.
    #[serde(default = "default_order")]
    pub order: [usize; 3],
    /// `[P, D, Q, s]`.
    #[serde(default = "default_seasonal_order")]
    pub seasonal_order: [usize; 4],
    #[serde(default = "default_max_iters")]
    pub max_iters: u64,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default)]
    pub enforce_stationarity: bool,
    #[serde(default)]
    pub enforce_invertibility: bool,
    #[serde(default)]
    pub accept_non_converged: bool,
}

impl Default for SarimaToml {
    fn default() -> Self {
        Self {
            order: default_order(),
            seasonal_order: default_seasonal_order(),
            max_iters: default_max_iters(),
            tolerance: default_tolerance(),
            enforce_stationarity: false,
            enforce_invertibility: false,
            accept_non_converged: false,
        }
    }
}

fn default_order() -> [usize; 3] {
    [1, 1, 1]
}
fn default_seasonal_order() -> [usize; 4] {
    [1, 1, 1, 12]
}
fn default_max_iters() -> u64 {
    2000
}
fn default_tolerance() -> f64 {
    1e-6
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecompositionToml {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_n_changepoints")]
    pub n_changepoints: usize,
    #[serde(default = "default_changepoint_range")]
    pub changepoint_range: f64,
    #[serde(default = "default_changepoint_prior_scale")]
    pub changepoint_prior_scale: f64,
    #[serde(default = "default_seasonality_prior_scale")]
    pub seasonality_prior_scale: f64,
    #[serde(default = "default_fourier_order")]
    pub fourier_order: usize,
    #[serde(default = "default_period")]
    pub period: usize,
}

impl Default for DecompositionToml {
    fn default() -> Self {
        Self {
            enabled: true,
            n_changepoints: default_n_changepoints(),
            changepoint_range: default_changepoint_range(),
            changepoint_prior_scale: default_changepoint_prior_scale(),
            seasonality_prior_scale: default_seasonality_prior_scale(),
            fourier_order: default_fourier_order(),
            period: default_period(),
        }
    }
}

fn default_n_changepoints() -> usize {
    5
}
fn default_changepoint_range() -> f64 {
    0.8
}
fn default_changepoint_prior_scale() -> f64 {
    0.05
}
fn default_seasonality_prior_scale() -> f64 {
    10.0
}
fn default_fourier_order() -> usize {
    3
}
fn default_period() -> usize {
    12
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastToml {
    #[serde(default = "default_horizon")]
    pub horizon: usize,
    /// Two-sided confidence level of the bounds.
    #[serde(default = "default_level")]
    pub level: f64,
}

impl Default for ForecastToml {
    fn default() -> Self {
        Self {
            horizon: default_horizon(),
            level: default_level(),
        }
    }
}

fn default_horizon() -> usize {
    12
}
fn default_level() -> f64 {
    0.95
}
