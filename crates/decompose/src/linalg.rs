//! Dense Cholesky factorization for the penalized normal equations.
//!
//! The systems here are small (a handful of trend columns plus twice the
//! Fourier order), so a straightforward column-oriented factorization on
//! `ndarray` storage is enough.
//!
//! **Not part of the public API.**

use ndarray::{Array1, Array2};

use crate::error::DecomposeError;

/// Lower-triangular factor `L` with `A = L Lᵀ`.
#[derive(Clone, Debug)]
pub(crate) struct Cholesky {
    l: Array2<f64>,
}

impl Cholesky {
    /// Factorizes a symmetric positive definite matrix.
    ///
    /// Only the lower triangle of `a` is read.
    pub(crate) fn new(a: &Array2<f64>) -> Result<Self, DecomposeError> {
        let n = a.nrows();
        let mut l = Array2::zeros((n, n));
        for j in 0..n {
            let mut diag = a[[j, j]];
            for k in 0..j {
                diag -= l[[j, k]] * l[[j, k]];
            }
            if !(diag > 0.0) || !diag.is_finite() {
                return Err(DecomposeError::Singular {
                    column: j,
                    pivot: diag,
                });
            }
            let ljj = diag.sqrt();
            l[[j, j]] = ljj;
            for i in (j + 1)..n {
                let mut v = a[[i, j]];
                for k in 0..j {
                    v -= l[[i, k]] * l[[j, k]];
                }
                l[[i, j]] = v / ljj;
            }
        }
        Ok(Self { l })
    }

    /// Solves `L y = b` by forward substitution.
    pub(crate) fn forward(&self, b: &Array1<f64>) -> Array1<f64> {
        let n = self.l.nrows();
        let mut y = Array1::zeros(n);
        for i in 0..n {
            let mut v = b[i];
            for k in 0..i {
                v -= self.l[[i, k]] * y[k];
            }
            y[i] = v / self.l[[i, i]];
        }
        y
    }

    /// Solves `A x = b`.
    pub(crate) fn solve(&self, b: &Array1<f64>) -> Array1<f64> {
        let y = self.forward(b);
        let n = self.l.nrows();
        let mut x = Array1::zeros(n);
        for i in (0..n).rev() {
            let mut v = y[i];
            for k in (i + 1)..n {
                v -= self.l[[k, i]] * x[k];
            }
            x[i] = v / self.l[[i, i]];
        }
        x
    }

    /// `xᵀ A⁻¹ x`, computed as `‖L⁻¹ x‖²`.
    pub(crate) fn inverse_quad_form(&self, x: &Array1<f64>) -> f64 {
        let v = self.forward(x);
        v.dot(&v)
    }
}
