//! Regression basis: piecewise-linear trend and Fourier seasonality.
//!
//! Columns, in order: intercept, slope, one hinge `(t - s_j)+` per
//! changepoint, then `sin`/`cos` pairs for harmonics `1..=K`. Time `t` is
//! the month offset from the first observation scaled so the history spans
//! `[0, 1]`; seasonal angles use the calendar month, so the pattern stays
//! aligned with the calendar in the extrapolation.
//!
//! **Not part of the public API.**

use std::f64::consts::PI;

use mrr_calendar::Period;
use ndarray::{Array1, Array2};

use crate::spec::DecompositionSpec;

#[derive(Clone, Debug)]
pub(crate) struct Basis {
    origin: Period,
    span: f64,
    changepoints: Vec<usize>,
    fourier_order: usize,
    period: usize,
}

impl Basis {
    /// Basis for `n >= 2` observations starting at `origin`.
    pub(crate) fn new(spec: &DecompositionSpec, origin: Period, n: usize) -> Self {
        let span = (n.max(2) - 1) as f64;
        let hist = (n as f64 * spec.changepoint_range()).floor() as usize;
        let n_cp = spec.n_changepoints().min(hist.saturating_sub(1));
        let mut changepoints: Vec<usize> = if n_cp == 0 {
            Vec::new()
        } else {
            mrr_stats::linspace(0.0, (hist - 1) as f64, n_cp + 1)[1..]
                .iter()
                .map(|x| x.round() as usize)
                .collect()
        };
        changepoints.dedup();

        Self {
            origin,
            span,
            changepoints,
            fourier_order: spec.effective_fourier_order(),
            period: spec.period(),
        }
    }

    /// Month offsets of the changepoints from the first observation.
    pub(crate) fn changepoints(&self) -> &[usize] {
        &self.changepoints
    }

    pub(crate) fn origin(&self) -> Period {
        self.origin
    }

    /// Months covered by the scaled unit interval.
    pub(crate) fn span(&self) -> f64 {
        self.span
    }

    /// Number of trend columns (intercept, slope, hinges).
    pub(crate) fn n_trend(&self) -> usize {
        2 + self.changepoints.len()
    }

    pub(crate) fn n_cols(&self) -> usize {
        self.n_trend() + 2 * self.fourier_order
    }

    /// Design row for the month `offset` months after the origin.
    pub(crate) fn row(&self, offset: i64) -> Array1<f64> {
        let t = offset as f64 / self.span;
        let mut row = Vec::with_capacity(self.n_cols());
        row.push(1.0);
        row.push(t);
        for &cp in &self.changepoints {
            row.push((t - cp as f64 / self.span).max(0.0));
        }
        let phase = self.origin.offset(offset).index().rem_euclid(self.period as i64) as f64;
        for k in 1..=self.fourier_order {
            let angle = 2.0 * PI * k as f64 * phase / self.period as f64;
            row.push(angle.sin());
            row.push(angle.cos());
        }
        Array1::from(row)
    }

    /// Design matrix for offsets `0..n`.
    pub(crate) fn matrix(&self, n: usize) -> Array2<f64> {
        let mut x = Array2::zeros((n, self.n_cols()));
        for (i, mut out) in x.rows_mut().into_iter().enumerate() {
            out.assign(&self.row(i as i64));
        }
        x
    }

    /// Diagonal ridge penalties: `floor` on intercept and slope, `hinge`
    /// on slope changes, `seasonal` on Fourier coefficients (each at least
    /// `floor`).
    pub(crate) fn penalties(&self, hinge: f64, seasonal: f64, floor: f64) -> Array1<f64> {
        let mut pen = Array1::from_elem(self.n_cols(), floor);
        for j in 2..self.n_trend() {
            pen[j] = hinge.max(floor);
        }
        for j in self.n_trend()..self.n_cols() {
            pen[j] = seasonal.max(floor);
        }
        pen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn jan_2021() -> Period {
        Period::new(2021, 1).unwrap()
    }

    #[test]
    fn changepoints_in_leading_range() {
        let basis = Basis::new(&DecompositionSpec::default(), jan_2021(), 48);
        assert_eq!(basis.changepoints(), &[7, 15, 22, 30, 37]);
        assert_eq!(basis.n_trend(), 7);
        assert_eq!(basis.n_cols(), 13);
    }

    #[test]
    fn short_history_limits_changepoints() {
        let basis = Basis::new(&DecompositionSpec::default(), jan_2021(), 3);
        assert_eq!(basis.changepoints(), &[1]);
        let none = Basis::new(&DecompositionSpec::default(), jan_2021(), 2);
        assert!(none.changepoints().is_empty());
    }

    #[test]
    fn row_layout() {
        let spec = DecompositionSpec::default()
            .with_n_changepoints(1)
            .with_fourier_order(1);
        let basis = Basis::new(&spec, jan_2021(), 11);
        // hist = 8, single changepoint at offset 7
        assert_eq!(basis.changepoints(), &[7]);
        let row = basis.row(10);
        assert_abs_diff_eq!(row[0], 1.0);
        assert_abs_diff_eq!(row[1], 1.0);
        assert_abs_diff_eq!(row[2], 0.3, epsilon = 1e-12);
        // November: phase 10
        let angle = 2.0 * PI * 10.0 / 12.0;
        assert_abs_diff_eq!(row[3], angle.sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(row[4], angle.cos(), epsilon = 1e-12);
    }

    #[test]
    fn seasonal_columns_repeat_yearly() {
        let basis = Basis::new(&DecompositionSpec::default(), jan_2021(), 24);
        let a = basis.row(3);
        let b = basis.row(15);
        for j in basis.n_trend()..basis.n_cols() {
            assert_abs_diff_eq!(a[j], b[j], epsilon = 1e-12);
        }
    }

    #[test]
    fn penalties_layout() {
        let spec = DecompositionSpec::default()
            .with_n_changepoints(2)
            .with_fourier_order(1);
        let basis = Basis::new(&spec, jan_2021(), 20);
        let pen = basis.penalties(4.0, 0.5, 1e-8);
        assert_eq!(pen.to_vec(), vec![1e-8, 1e-8, 4.0, 4.0, 0.5, 0.5]);
    }

    #[test]
    fn matrix_rows_match_row() {
        let basis = Basis::new(&DecompositionSpec::default(), jan_2021(), 30);
        let x = basis.matrix(30);
        assert_eq!(x.shape(), &[30, basis.n_cols()]);
        assert_eq!(x.row(17).to_owned(), basis.row(17));
    }
}
