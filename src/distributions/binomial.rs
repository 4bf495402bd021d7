//! Binomial distribution — number of successes in `n` independent
//! Bernoulli trials sharing one success probability.
//!
//! Also hosts the log-factorial based combinatorics used elsewhere in the
//! crate ([`Binomial::log2_binomial_coefficient`]) and the normal
//! approximation z-score ([`Binomial::z`]).

use serde::{Deserialize, Serialize};
use statrs::function::{beta::checked_beta_reg, factorial::ln_factorial};

use crate::{
    distributions::{
        bernoulli::Bernoulli,
        errors::{DistError, DistResult},
        traits::{clamp_unit, sum_over_unimodal_support, DiscreteDistribution},
    },
    persistence::Persist,
    utils::{entropy_term, ln_to_log2},
};

/// Immutable binomial distribution over outcomes `0..=num_trials`.
///
/// Cumulative probabilities use the regularized incomplete beta function:
/// `P(X ≤ k) = I_{1-p}(n - k, k + 1)` and `P(X ≥ k) = I_p(k, n - k + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BinomialRepr")]
pub struct Binomial {
    trial: Bernoulli,
    num_trials: u64,
}

#[derive(Deserialize)]
struct BinomialRepr {
    trial: Bernoulli,
    num_trials: u64,
}

impl TryFrom<BinomialRepr> for Binomial {
    type Error = DistError;

    fn try_from(repr: BinomialRepr) -> DistResult<Self> {
        Ok(Binomial::from_trial(repr.trial, repr.num_trials))
    }
}

impl Binomial {
    /// Build from a success probability and a trial count.
    ///
    /// # Errors
    /// [`DistError::InvalidProbability`] unless `p ∈ [0, 1]`.
    pub fn new(success_probability: f64, num_trials: u64) -> DistResult<Self> {
        let trial = Bernoulli::new(success_probability)?;
        Ok(Self::from_trial(trial, num_trials))
    }

    /// Build from an existing per-trial distribution.
    ///
    /// Trial counts are capped at `i64::MAX` so every outcome is addressable.
    pub fn from_trial(trial: Bernoulli, num_trials: u64) -> Self {
        Self { trial, num_trials: num_trials.min(i64::MAX as u64) }
    }

    pub fn success_probability(&self) -> f64 {
        self.trial.success_probability()
    }

    pub fn num_trials(&self) -> u64 {
        self.num_trials
    }

    pub fn trial(&self) -> &Bernoulli {
        &self.trial
    }

    /// `log2 C(n, k)` computed from log-factorials.
    ///
    /// `log2_binomial_coefficient(n, 0) == log2_binomial_coefficient(n, n) == 0`.
    ///
    /// # Errors
    /// [`DistError::InvalidBinomialArguments`] if either argument is negative
    /// or `k > n`.
    pub fn log2_binomial_coefficient(n: i64, k: i64) -> DistResult<f64> {
        if n < 0 || k < 0 || k > n {
            return Err(DistError::InvalidBinomialArguments { n, k });
        }
        if k == 0 || k == n {
            return Ok(0.0);
        }
        let (n, k) = (n as u64, k as u64);
        Ok(ln_to_log2(ln_factorial(n) - ln_factorial(k) - ln_factorial(n - k)))
    }

    /// Normal-approximation z-score `(k - n p) / sqrt(n p (1 - p))`.
    ///
    /// # Errors
    /// [`DistError::InvalidZScoreArguments`] if `p` is non-finite or outside
    /// `(0, 1)`, `n < 1`, `k < 0`, or `k > n`.
    pub fn z(p: f64, k: i64, n: i64) -> DistResult<f64> {
        if !p.is_finite() || p <= 0.0 || p >= 1.0 || n < 1 || k < 0 || k > n {
            return Err(DistError::InvalidZScoreArguments { p, k, n });
        }
        let n = n as f64;
        let expected = n * p;
        Ok((k as f64 - expected) / (expected * (1.0 - p)).sqrt())
    }

    /// `I_x(a, b)`, falling back to summing `[lo, hi]` when the special
    /// function rejects its arguments.
    fn regularized_beta_or_sum(&self, a: f64, b: f64, x: f64, lo: i64, hi: i64) -> f64 {
        match checked_beta_reg(a, b, x) {
            Ok(v) => clamp_unit(v),
            Err(_) => clamp_unit((lo..=hi).map(|o| self.probability(o)).sum()),
        }
    }
}

impl DiscreteDistribution for Binomial {
    fn min_outcome(&self) -> i64 {
        0
    }

    fn max_outcome(&self) -> Option<i64> {
        Some(self.num_trials as i64)
    }

    fn mode_hint(&self) -> i64 {
        let n = self.num_trials as f64;
        ((n + 1.0) * self.success_probability()).floor().min(n) as i64
    }

    fn probability(&self, outcome: i64) -> f64 {
        let lp = self.log2_probability(outcome);
        if lp == f64::NEG_INFINITY { 0.0 } else { lp.exp2() }
    }

    fn log2_probability(&self, outcome: i64) -> f64 {
        let n = self.num_trials as i64;
        if outcome < 0 || outcome > n {
            return f64::NEG_INFINITY;
        }
        let p = self.success_probability();
        // 0^0 = 1 at the degenerate ends.
        if p == 0.0 {
            return if outcome == 0 { 0.0 } else { f64::NEG_INFINITY };
        }
        if p == 1.0 {
            return if outcome == n { 0.0 } else { f64::NEG_INFINITY };
        }
        let k = outcome as f64;
        let coefficient = match Self::log2_binomial_coefficient(n, outcome) {
            Ok(c) => c,
            Err(_) => return f64::NEG_INFINITY,
        };
        coefficient + k * p.log2() + (n as f64 - k) * (1.0 - p).log2()
    }

    fn cumulative_probability_less(&self, outcome: i64) -> f64 {
        let n = self.num_trials as i64;
        if outcome < 0 {
            return 0.0;
        }
        if outcome >= n {
            return 1.0;
        }
        let p = self.success_probability();
        let (k, nf) = (outcome as f64, n as f64);
        self.regularized_beta_or_sum(nf - k, k + 1.0, 1.0 - p, 0, outcome)
    }

    fn cumulative_probability_greater(&self, outcome: i64) -> f64 {
        let n = self.num_trials as i64;
        if outcome <= 0 {
            return 1.0;
        }
        if outcome > n {
            return 0.0;
        }
        let p = self.success_probability();
        let (k, nf) = (outcome as f64, n as f64);
        self.regularized_beta_or_sum(k, nf - k + 1.0, p, outcome, n)
    }

    fn cumulative_probability(&self, lo: i64, hi: i64) -> f64 {
        if hi < lo {
            return 0.0;
        }
        let below = self.cumulative_probability_less(lo.saturating_sub(1));
        clamp_unit(self.cumulative_probability_less(hi) - below)
    }

    fn entropy(&self) -> f64 {
        let mut h = 0.0;
        sum_over_unimodal_support(self, |_, p| h += entropy_term(p));
        h
    }

    fn mean(&self) -> f64 {
        self.num_trials as f64 * self.success_probability()
    }

    fn variance(&self) -> f64 {
        let p = self.success_probability();
        self.num_trials as f64 * p * (1.0 - p)
    }
}

impl Persist for Binomial {
    const TAG: u8 = 0x02;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // Edge coefficients are exactly zero and interior ones match exact
    // integer values.
    fn binomial_coefficient_edges_and_values() {
        for n in 0..40 {
            assert_eq!(Binomial::log2_binomial_coefficient(n, 0).unwrap(), 0.0);
            assert_eq!(Binomial::log2_binomial_coefficient(n, n).unwrap(), 0.0);
        }
        assert_relative_eq!(
            Binomial::log2_binomial_coefficient(10, 3).unwrap(),
            120.0_f64.log2(),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            Binomial::log2_binomial_coefficient(52, 5).unwrap(),
            2_598_960.0_f64.log2(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn binomial_coefficient_rejects_bad_arguments() {
        for (n, k) in [(3, 4), (-1, 0), (3, -1)] {
            assert_eq!(
                Binomial::log2_binomial_coefficient(n, k),
                Err(DistError::InvalidBinomialArguments { n, k })
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // z-score formula and its rejection branches.
    fn z_score_formula_and_guards() {
        // n p = 5, n p (1 - p) = 2.5
        assert_relative_eq!(Binomial::z(0.5, 7, 10).unwrap(), 2.0 / 2.5_f64.sqrt());
        assert_relative_eq!(Binomial::z(0.5, 5, 10).unwrap(), 0.0);

        let rejected = [(0.0, 1, 2), (1.0, 1, 2), (f64::NAN, 1, 2), (0.5, -1, 2), (0.5, 3, 2), (0.5, 0, 0)];
        for (p, k, n) in rejected {
            assert!(matches!(
                Binomial::z(p, k, n),
                Err(DistError::InvalidZScoreArguments { .. })
            ));
        }
    }

    #[test]
    // Purpose
    // -------
    // Probabilities sum to one and closed-form moments match summation.
    fn probabilities_normalize_and_moments_match() {
        let d = Binomial::new(0.3, 12).unwrap();
        let total: f64 = (0..=12).map(|k| d.probability(k)).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);

        let mean: f64 = (0..=12).map(|k| k as f64 * d.probability(k)).sum();
        assert_relative_eq!(d.mean(), mean, epsilon = 1e-10);
        let var: f64 = (0..=12).map(|k| (k as f64 - mean).powi(2) * d.probability(k)).sum();
        assert_relative_eq!(d.variance(), var, epsilon = 1e-10);

        assert_relative_eq!(d.probability(2), 66.0 * 0.09 * 0.7_f64.powi(10), epsilon = 1e-12);
    }

    #[test]
    fn degenerate_success_probabilities() {
        let zero = Binomial::new(0.0, 5).unwrap();
        assert_eq!(zero.probability(0), 1.0);
        assert_eq!(zero.probability(1), 0.0);
        assert_eq!(zero.entropy(), 0.0);

        let one = Binomial::new(1.0, 5).unwrap();
        assert_eq!(one.probability(5), 1.0);
        assert_eq!(one.log2_probability(4), f64::NEG_INFINITY);
    }

    #[test]
    // Purpose
    // -------
    // Incomplete-beta cumulatives agree with direct summation, including the
    // degenerate success probabilities and the support edges.
    fn cumulatives_match_summation() {
        for p in [0.0, 0.15, 0.5, 0.9, 1.0] {
            let d = Binomial::new(p, 17).unwrap();
            let mut running = 0.0;
            for k in -1..=18 {
                running += d.probability(k);
                assert_relative_eq!(d.cumulative_probability_less(k), running, epsilon = 1e-10);
                let upper: f64 = (k..=17).map(|o| d.probability(o)).sum();
                assert_relative_eq!(d.cumulative_probability_greater(k), upper, epsilon = 1e-10);
            }
            assert_relative_eq!(
                d.cumulative_probability(3, 9),
                (3..=9).map(|o| d.probability(o)).sum::<f64>(),
                epsilon = 1e-10
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // Many trials: cumulatives agree with long sums, and entropy is summed
    // outward from the mode without touching the underflowed tails.
    //
    // Given
    // -----
    // - n = 2000 for cumulatives, n = 10^8 for entropy, p = 0.5.
    //
    // Expect
    // ------
    // - Symmetric tails and running sums match the incomplete beta values.
    // - entropy ≈ ½ log2(2πe n p (1 - p)).
    fn many_trials() {
        let d = Binomial::new(0.5, 2000).unwrap();
        assert_relative_eq!(
            d.cumulative_probability_less(990),
            d.cumulative_probability_greater(1010),
            epsilon = 1e-10
        );
        let mut running = 0.0;
        for k in 0..=1060 {
            running += d.probability(k);
            if k >= 940 {
                assert_relative_eq!(d.cumulative_probability_less(k), running, epsilon = 1e-9);
            }
        }

        let n = 100_000_000_u64;
        let wide = Binomial::new(0.5, n).unwrap();
        let gaussian = 0.5
            * (2.0 * std::f64::consts::PI * std::f64::consts::E * n as f64 * 0.25).log2();
        assert_relative_eq!(wide.entropy(), gaussian, epsilon = 1e-3);
    }
}
