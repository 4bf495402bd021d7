//! Multinomial likelihood of count vectors under repeated categorical draws.
//!
//! Purpose
//! -------
//! Given a categorical basis distribution over `k` outcomes, score an
//! observed count vector `(c₀, …, c_{k-1})` with total `N = Σ cᵢ`:
//!
//! ```text
//! log2 P(c) = log2 N!/(c₀!…c_{k-1}!) + Σ cᵢ log2 pᵢ
//! ```
//!
//! and compute Pearson's χ² against expected counts `N pᵢ`.
//!
//! Conventions
//! -----------
//! - A nonzero count in a zero-probability category gives `log2 P = -∞`;
//!   it is not an error.
//! - For χ², categories with zero expected count contribute nothing when
//!   unobserved and make the statistic `+∞` when observed.

use serde::{Deserialize, Serialize};
use statrs::function::factorial::ln_factorial;

use crate::{
    distributions::{
        errors::{DistError, DistResult},
        multivariate::MultivariateConstant,
    },
    persistence::Persist,
    utils::ln_to_log2,
};

/// Multinomial distribution over count vectors with a categorical basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Multinomial {
    basis: MultivariateConstant,
}

impl Multinomial {
    pub fn new(basis: MultivariateConstant) -> Self {
        Self { basis }
    }

    pub fn basis(&self) -> &MultivariateConstant {
        &self.basis
    }

    pub fn num_dimensions(&self) -> usize {
        self.basis.num_dimensions()
    }

    /// `log2 (Σ cᵢ)! / Π cᵢ!`, the multivariate binomial coefficient.
    ///
    /// # Errors
    /// [`DistError::CountOverflow`] if `Σ cᵢ` exceeds `u64::MAX`.
    pub fn log2_multinomial_coefficient(counts: &[u64]) -> DistResult<f64> {
        let total = total_count(counts)?;
        let denominator: f64 = counts.iter().map(|&c| ln_factorial(c)).sum();
        Ok(ln_to_log2(ln_factorial(total) - denominator))
    }

    /// Base-2 log-likelihood of an observed count vector.
    ///
    /// # Errors
    /// - [`DistError::CountLengthMismatch`] if `counts.len()` differs from the
    ///   basis dimensionality.
    /// - [`DistError::CountOverflow`] if the counts sum past `u64::MAX`.
    pub fn log2_probability(&self, counts: &[u64]) -> DistResult<f64> {
        self.check_length(counts)?;
        let mut sum = Self::log2_multinomial_coefficient(counts)?;
        for (&c, &p) in counts.iter().zip(self.basis.probabilities()) {
            if c == 0 {
                continue;
            }
            if p == 0.0 {
                return Ok(f64::NEG_INFINITY);
            }
            sum += c as f64 * p.log2();
        }
        Ok(sum)
    }

    /// Probability of an observed count vector.
    pub fn probability(&self, counts: &[u64]) -> DistResult<f64> {
        let lp = self.log2_probability(counts)?;
        Ok(if lp == f64::NEG_INFINITY { 0.0 } else { lp.exp2() })
    }

    /// Expected per-category counts for `total` draws.
    pub fn expected_counts(&self, total: u64) -> Vec<f64> {
        self.basis.probabilities().iter().map(|&p| p * total as f64).collect()
    }

    /// Pearson's χ² statistic `Σ (cᵢ - N pᵢ)² / (N pᵢ)`.
    ///
    /// # Errors
    /// [`DistError::CountLengthMismatch`] on a length mismatch, and
    /// [`DistError::CountOverflow`] if the counts sum past `u64::MAX`.
    pub fn chi_squared(&self, counts: &[u64]) -> DistResult<f64> {
        self.check_length(counts)?;
        let total = total_count(counts)?;
        let mut chi = 0.0;
        for (&c, expected) in counts.iter().zip(self.expected_counts(total)) {
            if expected == 0.0 {
                if c > 0 {
                    return Ok(f64::INFINITY);
                }
                continue;
            }
            let diff = c as f64 - expected;
            chi += diff * diff / expected;
        }
        Ok(chi)
    }

    fn check_length(&self, counts: &[u64]) -> DistResult<()> {
        if counts.len() != self.num_dimensions() {
            return Err(DistError::CountLengthMismatch {
                expected: self.num_dimensions(),
                found: counts.len(),
            });
        }
        Ok(())
    }
}

fn total_count(counts: &[u64]) -> DistResult<u64> {
    counts
        .iter()
        .try_fold(0_u64, |acc, &c| acc.checked_add(c))
        .ok_or(DistError::CountOverflow)
}

impl Persist for Multinomial {
    const TAG: u8 = 0x06;
}
