//! Generate command: synthetic monthly subscription-revenue history.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;
use tracing::{info, info_span};

use mrr_calendar::{Period, month_sequence};
use mrr_io::write_records_csv;
use mrr_stats::{linspace, pct_change};

use crate::cli::GenerateArgs;

/// One month of the synthetic history, in CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRecord {
    pub month: String,
    pub active_users: u64,
    pub arpu: f64,
    pub mrr: f64,
    pub total_revenue: f64,
    pub churn_rate: f64,
    pub mrr_growth_rate: f64,
    pub plan_light_share: f64,
    pub plan_standard_share: f64,
    pub plan_premium_share: f64,
}

/// Run the generator and write its CSV.
pub fn run(args: GenerateArgs) -> Result<()> {
    let _cmd = info_span!("generate").entered();

    let start: Period = args
        .start
        .parse()
        .with_context(|| format!("invalid --start: {:?}", args.start))?;
    let records = generate_history(start, args.n_months, args.seed)?;

    write_records_csv(&args.output, &records)
        .with_context(|| format!("failed to write history: {}", args.output.display()))?;
    info!(
        path = %args.output.display(),
        n_months = records.len(),
        seed = args.seed,
        "history written"
    );
    println!("wrote {} months to {}", records.len(), args.output.display());
    Ok(())
}

/// Draws `n_months` of history starting at `start`.
///
/// Users and ARPU grow linearly with Gaussian noise, so MRR (their product)
/// has a convex trend. Churn falls over the period, and the premium plan
/// share rises at the expense of the light plan.
pub fn generate_history(start: Period, n_months: usize, seed: u64) -> Result<Vec<HistoryRecord>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = n_months;
    let mut draw = |mean: f64, sd: f64| -> Result<Vec<f64>> {
        let dist = Normal::new(mean, sd).context("invalid noise distribution")?;
        Ok((0..n).map(|_| dist.sample(&mut rng)).collect())
    };

    let users_noise = draw(0.0, 400.0)?;
    let arpu_noise = draw(0.0, 1.0)?;
    let one_offs = draw(0.03, 0.01)?;
    let churn_noise = draw(0.0, 0.004)?;
    let light_noise = draw(0.0, 0.015)?;
    let premium_noise = draw(0.0, 0.015)?;

    let users: Vec<f64> = linspace(0.0, 8000.0, n)
        .iter()
        .zip(&users_noise)
        .map(|(trend, noise)| (5000.0 + trend + noise).max(1000.0))
        .collect();
    let arpu: Vec<f64> = linspace(0.0, 7.0, n)
        .iter()
        .zip(&arpu_noise)
        .map(|(trend, noise)| (28.0 + trend + noise).max(20.0))
        .collect();
    let mrr: Vec<f64> = users.iter().zip(&arpu).map(|(u, a)| u * a).collect();
    let growth = pct_change(&mrr);
    let churn: Vec<f64> = linspace(0.0, -0.025, n)
        .iter()
        .zip(&churn_noise)
        .map(|(trend, noise)| (0.065 + trend + noise).clamp(0.02, 0.12))
        .collect();
    let shift = linspace(0.0, 0.15, n);

    let records = month_sequence(start, n)
        .into_iter()
        .enumerate()
        .map(|(i, period)| {
            let light = round_to(
                (0.45 - shift[i] + light_noise[i]).clamp(0.10, 0.60),
                4,
            );
            let premium = round_to(
                (0.25 + shift[i] + premium_noise[i]).clamp(0.15, 0.55),
                4,
            );
            HistoryRecord {
                month: period.to_string(),
                active_users: users[i].round() as u64,
                arpu: round_to(arpu[i], 2),
                mrr: round_to(mrr[i], 2),
                total_revenue: round_to(mrr[i] * (1.0 + one_offs[i]), 2),
                churn_rate: round_to(churn[i], 4),
                mrr_growth_rate: round_to(growth[i], 4),
                plan_light_share: light,
                // Standard absorbs rounding so the three shares sum to one.
                plan_standard_share: round_to(1.0 - light - premium, 4),
                plan_premium_share: premium,
            }
        })
        .collect();
    Ok(records)
}

fn round_to(x: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (x * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use mrr_decompose::DecompositionSpec;
    use mrr_forecast::{ModelConfig, ModelRegistry, run_forecast};
    use mrr_io::{ReaderConfig, read_series_csv};

    fn start() -> Period {
        Period::new(2021, 1).unwrap()
    }

    #[test]
    fn same_seed_same_history() {
        let a = generate_history(start(), 48, 42).unwrap();
        let b = generate_history(start(), 48, 42).unwrap();
        assert_eq!(a, b);
        let c = generate_history(start(), 48, 43).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn months_are_consecutive() {
        let records = generate_history(start(), 48, 42).unwrap();
        assert_eq!(records.len(), 48);
        assert_eq!(records[0].month, "2021-01-01");
        assert_eq!(records[47].month, "2024-12-01");
    }

    #[test]
    fn fields_respect_floors_and_clips() {
        for r in generate_history(start(), 120, 7).unwrap() {
            assert!(r.active_users >= 1000);
            assert!(r.arpu >= 20.0);
            assert!((0.02..=0.12).contains(&r.churn_rate));
            assert!((0.10..=0.60).contains(&r.plan_light_share));
            assert!((0.15..=0.55).contains(&r.plan_premium_share));
            let total = r.plan_light_share + r.plan_standard_share + r.plan_premium_share;
            assert_abs_diff_eq!(total, 1.0, epsilon = 1e-3);
            assert!(r.total_revenue > r.mrr * 0.9);
        }
    }

    #[test]
    fn mrr_is_users_times_arpu() {
        for r in generate_history(start(), 48, 42).unwrap() {
            let implied = r.active_users as f64 * r.arpu;
            assert!((implied - r.mrr).abs() / r.mrr < 1e-3);
        }
    }

    #[test]
    fn growth_rate_starts_at_zero() {
        let records = generate_history(start(), 24, 42).unwrap();
        assert_eq!(records[0].mrr_growth_rate, 0.0);
        let expected = records[1].mrr / records[0].mrr - 1.0;
        assert_abs_diff_eq!(records[1].mrr_growth_rate, expected, epsilon = 1e-3);
    }

    #[test]
    fn mrr_trends_upward() {
        let records = generate_history(start(), 48, 42).unwrap();
        let first: f64 = records[..12].iter().map(|r| r.mrr).sum();
        let last: f64 = records[36..].iter().map(|r| r.mrr).sum();
        assert!(last > first * 1.5);
    }

    #[test]
    fn generated_history_forecasts_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let records = generate_history(start(), 48, 42).unwrap();
        write_records_csv(&path, &records).unwrap();

        let series = read_series_csv(&path, &ReaderConfig::default()).unwrap();
        assert_eq!(series.len(), 48);

        let config = ModelConfig {
            decomposition: Some(DecompositionSpec::default()),
            ..ModelConfig::default()
        };
        let registry = ModelRegistry::from_config(&config);
        let report = run_forecast(&series, &registry, 12).unwrap();

        assert_eq!(report.table.len(), 12);
        assert_eq!(report.table.sources(), &["sarima", "decomposition"]);
        assert!(report.diagnostics[0].converged);
        let first = report.table.periods().next().unwrap();
        assert_eq!(first, Period::new(2025, 1).unwrap());
        for (_, cells) in report.table.rows() {
            for est in cells.iter().flatten() {
                assert!(est.lower <= est.point && est.point <= est.upper);
            }
        }
    }
}
