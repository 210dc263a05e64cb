//! Statistical helper functions for the mrr forecasting workspace.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Mean of squares (second raw moment). Returns 0.0 if empty.
///
/// This is the variance estimate of a zero-mean process, used to seed the
/// innovation variance of models without a constant term.
pub fn mean_square(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().map(|x| x * x).sum::<f64>() / data.len() as f64
}

/// `n` evenly spaced values from `start` to `end` inclusive.
///
/// `n == 1` yields `[start]`; `n == 0` yields an empty vector.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Period-over-period relative change, `x[t] / x[t-1] - 1`.
///
/// The first element (no predecessor) and divisions by zero are reported
/// as 0.0.
pub fn pct_change(data: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(data.len());
    if data.is_empty() {
        return out;
    }
    out.push(0.0);
    for pair in data.windows(2) {
        let change = if pair[0] == 0.0 {
            0.0
        } else {
            pair[1] / pair[0] - 1.0
        };
        out.push(change);
    }
    out
}
