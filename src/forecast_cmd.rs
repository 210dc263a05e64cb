//! Forecast command: read a history CSV, fit every enabled model, write the merged table.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use mrr_forecast::{ForecastReport, ModelRegistry, run_forecast};
use mrr_io::{read_series_csv, write_table_csv};

use crate::cli::ForecastArgs;
use crate::config::MrrConfig;
use crate::convert;

/// Rows of the merged table echoed to stdout.
const PREVIEW_ROWS: usize = 6;

/// Run the forecast pipeline.
pub fn run(args: ForecastArgs) -> Result<()> {
    let _cmd = info_span!("forecast").entered();

    let mut config = MrrConfig::load(args.config.as_deref())?;
    if let Some(input) = args.input {
        config.io.input = Some(input);
    }
    if let Some(output) = args.output {
        config.io.output = Some(output);
    }
    if let Some(horizon) = args.horizon {
        config.forecast.horizon = horizon;
    }
    if args.sarima_only {
        config.decomposition.enabled = false;
    }

    let input = config.io.input.clone().ok_or_else(|| {
        anyhow::anyhow!("no input path: set [io].input in config or use --input")
    })?;
    let output = config
        .io
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("mrr_forecast.csv"));
    if config.forecast.horizon == 0 {
        bail!("horizon must be at least 1 month");
    }

    let reader_cfg = convert::build_reader_config(&config.io);
    let model_cfg = convert::build_model_config(&config)?;

    let series = read_series_csv(&input, &reader_cfg)
        .with_context(|| format!("failed to read history: {}", input.display()))?;

    let registry = ModelRegistry::from_config(&model_cfg);
    info!(models = ?registry.names(), horizon = config.forecast.horizon, "fitting models");
    let report = run_forecast(&series, &registry, config.forecast.horizon)
        .context("forecast failed")?;

    write_table_csv(&output, &report.table)
        .with_context(|| format!("failed to write forecast: {}", output.display()))?;
    info!(path = %output.display(), "forecast written");

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &ForecastReport) {
    for d in &report.diagnostics {
        let mut line = format!(
            "{}: {} params, noise variance {:.4}",
            d.model, d.n_params, d.noise_variance
        );
        if let Some(ll) = d.log_likelihood {
            line.push_str(&format!(", log-likelihood {ll:.3}"));
        }
        if let Some(aic) = d.aic {
            line.push_str(&format!(", AIC {aic:.3}"));
        }
        if !d.converged {
            line.push_str(" (not converged)");
        }
        println!("{line}");
    }

    let sources = report.table.sources();
    println!("month      {}", sources.join("  "));
    for (period, cells) in report.table.rows().take(PREVIEW_ROWS) {
        let cols: Vec<String> = cells
            .iter()
            .map(|c| match c {
                Some(est) => format!("{:.2} [{:.2}, {:.2}]", est.point, est.lower, est.upper),
                None => "-".to_string(),
            })
            .collect();
        println!("{period}  {}", cols.join("  "));
    }
    if report.table.len() > PREVIEW_ROWS {
        println!("... {} more months", report.table.len() - PREVIEW_ROWS);
    }
}
