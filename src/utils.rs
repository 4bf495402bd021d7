//! utils — small numeric helpers shared across the crate.
//!
//! Purpose
//! -------
//! Keep log-space arithmetic and convergence metrics in one place so that
//! distributions, priors, and the trainer agree on conventions.
//!
//! Conventions
//! -----------
//! - "log2" quantities are in bits; "ln" quantities are natural logs.
//! - `log2(0)` is `-∞`, never an error.

use std::f64::consts::LN_2;

/// Base-2 logarithm with the convention `log2(p) = -∞` for `p <= 0`.
#[inline]
pub fn log2(p: f64) -> f64 {
    if p <= 0.0 { f64::NEG_INFINITY } else { p.log2() }
}

/// Convert a natural-log quantity into bits.
#[inline]
pub fn ln_to_log2(x: f64) -> f64 {
    x / LN_2
}

/// Entropy contribution `-p·log2(p)`, with `0·log2(0) = 0`.
#[inline]
pub fn entropy_term(p: f64) -> f64 {
    if p <= 0.0 { 0.0 } else { -p * p.log2() }
}

/// Numerically stable `ln Σ exp(xᵢ)`.
///
/// Returns `-∞` for an empty slice or when every entry is `-∞`.
pub fn log_sum_exp(xs: &[f64]) -> f64 {
    let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    if max == f64::INFINITY {
        return f64::INFINITY;
    }
    let sum: f64 = xs.iter().map(|&x| (x - max).exp()).sum();
    max + sum.ln()
}

/// Relative absolute difference `|x - y| / (|x| + |y|)`.
///
/// Scale-free convergence metric used between successive epoch objectives.
/// Defined as `0` when both values are zero.
pub fn relative_abs_diff(x: f64, y: f64) -> f64 {
    let denom = x.abs() + y.abs();
    if denom == 0.0 { 0.0 } else { (x - y).abs() / denom }
}
