//! Lag-polynomial arithmetic for the multiplicative seasonal form.
//!
//! Polynomials are coefficient vectors indexed by the power of the
//! backshift operator `B`: `[1.0, -0.5]` is `1 - 0.5B`.
//!
//! **Not part of the public API.**

/// Product of two lag polynomials.
pub(crate) fn polymul(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &ai) in a.iter().enumerate() {
        for (j, &bj) in b.iter().enumerate() {
            out[i + j] += ai * bj;
        }
    }
    out
}

/// `1 - Σ c_i B^(i·step)`.
pub(crate) fn ar_polynomial(coeffs: &[f64], step: usize) -> Vec<f64> {
    let mut poly = vec![0.0; coeffs.len() * step + 1];
    poly[0] = 1.0;
    for (i, &c) in coeffs.iter().enumerate() {
        poly[(i + 1) * step] = -c;
    }
    poly
}

/// `1 + Σ c_i B^(i·step)`.
pub(crate) fn ma_polynomial(coeffs: &[f64], step: usize) -> Vec<f64> {
    let mut poly = vec![0.0; coeffs.len() * step + 1];
    poly[0] = 1.0;
    for (i, &c) in coeffs.iter().enumerate() {
        poly[(i + 1) * step] = c;
    }
    poly
}

/// Combined AR coefficients of `φ(B)Φ(B^s)`, in the convention
/// `w[t] = Σ a_i w[t-i] + ...` (length `p + s·P`).
pub(crate) fn expand_ar(ar: &[f64], seasonal_ar: &[f64], s: usize) -> Vec<f64> {
    let poly = polymul(&ar_polynomial(ar, 1), &ar_polynomial(seasonal_ar, s));
    poly[1..].iter().map(|c| -c).collect()
}

/// Combined MA coefficients of `θ(B)Θ(B^s)`, in the convention
/// `w[t] = ... + e[t] + Σ b_j e[t-j]` (length `q + s·Q`).
pub(crate) fn expand_ma(ma: &[f64], seasonal_ma: &[f64], s: usize) -> Vec<f64> {
    let poly = polymul(&ma_polynomial(ma, 1), &ma_polynomial(seasonal_ma, s));
    poly[1..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn polymul_basic() {
        // (1 - B)(1 + B) = 1 - B^2
        let out = polymul(&[1.0, -1.0], &[1.0, 1.0]);
        assert_eq!(out, vec![1.0, 0.0, -1.0]);
    }

    #[test]
    fn polymul_empty() {
        assert!(polymul(&[], &[1.0]).is_empty());
    }

    #[test]
    fn ar_polynomial_seasonal_spacing() {
        let poly = ar_polynomial(&[0.4], 4);
        assert_eq!(poly, vec![1.0, 0.0, 0.0, 0.0, -0.4]);
    }

    #[test]
    fn expand_ar_non_seasonal_is_identity() {
        assert_eq!(expand_ar(&[0.5, -0.2], &[], 12), vec![0.5, -0.2]);
    }

    #[test]
    fn expand_ar_multiplicative() {
        // (1 - 0.5B)(1 - 0.3B^4) = 1 - 0.5B - 0.3B^4 + 0.15B^5
        let a = expand_ar(&[0.5], &[0.3], 4);
        assert_eq!(a.len(), 5);
        assert_abs_diff_eq!(a[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(a[1], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(a[3], 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(a[4], -0.15, epsilon = 1e-12);
    }

    #[test]
    fn expand_ma_multiplicative() {
        // (1 + 0.4B)(1 - 0.6B^12) = 1 + 0.4B - 0.6B^12 - 0.24B^13
        let b = expand_ma(&[0.4], &[-0.6], 12);
        assert_eq!(b.len(), 13);
        assert_abs_diff_eq!(b[0], 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(b[11], -0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(b[12], -0.24, epsilon = 1e-12);
        assert!(b[1..11].iter().all(|&c| c == 0.0));
    }

    #[test]
    fn expand_empty_orders() {
        assert!(expand_ar(&[], &[], 12).is_empty());
        assert!(expand_ma(&[], &[], 12).is_empty());
    }
}
