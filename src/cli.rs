use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Monthly recurring revenue forecaster.
#[derive(Parser)]
#[command(
    name = "mrr",
    version,
    about = "Forecast monthly recurring revenue with SARIMA and trend/seasonality models"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Fit every enabled model to a history CSV and write the merged forecast.
    Forecast(ForecastArgs),
    /// Write a synthetic monthly revenue history to CSV.
    Generate(GenerateArgs),
}

/// Arguments for the `forecast` subcommand.
#[derive(clap::Args)]
pub struct ForecastArgs {
    /// Path to TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override input CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override output CSV path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the number of months to forecast.
    #[arg(long)]
    pub horizon: Option<usize>,

    /// Skip the decomposition model regardless of config.
    #[arg(long)]
    pub sarima_only: bool,
}

/// Arguments for the `generate` subcommand.
#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Output CSV path.
    #[arg(short, long, default_value = "mrr_history.csv")]
    pub output: PathBuf,

    /// RNG seed.
    #[arg(short, long, default_value_t = 42)]
    pub seed: u64,

    /// Number of months to generate.
    #[arg(short = 'n', long, default_value_t = 48)]
    pub n_months: usize,

    /// First month (YYYY-MM or YYYY-MM-DD).
    #[arg(long, default_value = "2021-01")]
    pub start: String,
}
