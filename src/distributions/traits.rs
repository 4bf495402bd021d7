//! The discrete distribution contract.
//!
//! - [`DiscreteDistribution`]: implementors supply an outcome range and a
//!   per-outcome probability; every derived quantity (log-probability,
//!   cumulative probabilities, entropy, mean, variance) is provided here once
//!   in terms of those primitives and may be overridden with closed forms.
//!
//! Convention: `cumulative_probability_less(x)` is `P(X ≤ x)` and
//! `cumulative_probability_greater(x)` is `P(X ≥ x)`, so
//! `cumulative_probability(lo, hi) = less(hi) - less(lo - 1)`.
//!
//! Derived quantities walk the support outward from [`DiscreteDistribution::mode_hint`],
//! always extending toward the larger neighbouring probability, and stop once
//! the accumulated mass reaches `1 - MASS_TOLERANCE`. Bounded supports are
//! otherwise walked to both ends. Unbounded supports also stop when both
//! frontiers have underflowed past the bulk, or after [`MAX_SUMMATION_TERMS`]
//! outcomes, which is logged as a warning.

use crate::utils::{entropy_term, log2};

/// Accumulated mass at which summation stops.
pub const MASS_TOLERANCE: f64 = 1e-14;

/// Cap on the number of outcomes visited over an unbounded support.
pub const MAX_SUMMATION_TERMS: u64 = 10_000_000;

/// A probability distribution over an integer outcome range.
///
/// Required:
/// - `min_outcome()`: smallest outcome with (possibly) nonzero probability.
/// - `max_outcome()`: largest such outcome, or `None` when unbounded above.
/// - `probability(o)`: `P(X = o)`, which must be 0 outside the range.
///
/// Everything else has a default implementation by direct summation.
pub trait DiscreteDistribution {
    fn min_outcome(&self) -> i64;
    fn max_outcome(&self) -> Option<i64>;
    fn probability(&self, outcome: i64) -> f64;

    /// An outcome at or near the mode, where summation starts.
    ///
    /// Families whose mass sits far from `min_outcome()` override this so
    /// the walk reaches the bulk first.
    fn mode_hint(&self) -> i64 {
        self.min_outcome()
    }

    /// `log2 P(X = o)`, or `-∞` when the probability is zero.
    fn log2_probability(&self, outcome: i64) -> f64 {
        log2(self.probability(outcome))
    }

    /// `P(X ≤ outcome)`.
    fn cumulative_probability_less(&self, outcome: i64) -> f64 {
        if outcome < self.min_outcome() {
            return 0.0;
        }
        self.cumulative_probability(self.min_outcome(), outcome)
    }

    /// `P(X ≥ outcome)`.
    fn cumulative_probability_greater(&self, outcome: i64) -> f64 {
        if outcome <= self.min_outcome() {
            return 1.0;
        }
        match self.max_outcome() {
            Some(max) => self.cumulative_probability(outcome, max),
            None => clamp_unit(1.0 - self.cumulative_probability_less(outcome.saturating_sub(1))),
        }
    }

    /// `P(lo ≤ X ≤ hi)`; zero when `hi < lo`.
    fn cumulative_probability(&self, lo: i64, hi: i64) -> f64 {
        if hi < lo {
            return 0.0;
        }
        let mut total = 0.0;
        sum_over_support(self, |o, p| {
            if (lo..=hi).contains(&o) {
                total += p;
            }
        });
        clamp_unit(total)
    }

    /// Shannon entropy in bits, `-Σ p log2 p` with `0·log2 0 = 0`.
    fn entropy(&self) -> f64 {
        let mut h = 0.0;
        sum_over_support(self, |_, p| h += entropy_term(p));
        h
    }

    /// `E[X]` by direct summation.
    fn mean(&self) -> f64 {
        let mut m = 0.0;
        sum_over_support(self, |o, p| m += p * o as f64);
        m
    }

    /// Population variance `E[(X - E[X])²]` by direct summation.
    fn variance(&self) -> f64 {
        let mean = self.mean();
        let mut v = 0.0;
        sum_over_support(self, |o, p| {
            let d = o as f64 - mean;
            v += p * d * d;
        });
        v
    }
}

/// Visit every `(outcome, probability)` pair that carries mass, each once.
///
/// Outcomes are visited in order of the walk, not in increasing order: the
/// walk starts at `mode_hint()` clamped into the support and repeatedly
/// takes whichever neighbour (above or below) has the larger probability.
pub fn sum_over_support<D, F>(dist: &D, visit: F)
where
    D: DiscreteDistribution + ?Sized,
    F: FnMut(i64, f64),
{
    walk_support(dist, dist.max_outcome().is_none(), visit);
}

/// [`sum_over_support`] for a unimodal family with a bounded support whose
/// tails may underflow: once both frontiers are zero past the bulk, the rest
/// of the support is skipped.
pub(crate) fn sum_over_unimodal_support<D, F>(dist: &D, visit: F)
where
    D: DiscreteDistribution + ?Sized,
    F: FnMut(i64, f64),
{
    walk_support(dist, true, visit);
}

fn walk_support<D, F>(dist: &D, stop_on_underflow: bool, mut visit: F)
where
    D: DiscreteDistribution + ?Sized,
    F: FnMut(i64, f64),
{
    let min = dist.min_outcome();
    let max = dist.max_outcome();
    let start = match max {
        Some(m) => dist.mode_hint().clamp(min, m),
        None => dist.mode_hint().max(min),
    };
    let above = |o: i64| match max {
        Some(m) if o >= m => None,
        _ => o.checked_add(1),
    };
    let below = |o: i64| if o > min { Some(o - 1) } else { None };
    let frontier = |next: Option<i64>| next.map(|o| (o, dist.probability(o)));

    let mut mass = dist.probability(start);
    visit(start, mass);
    let mut up = frontier(above(start));
    let mut down = frontier(below(start));
    let mut visited = 1_u64;

    while mass < 1.0 - MASS_TOLERANCE {
        let (outcome, p, upward) = match (up, down) {
            (Some((o, p)), Some((_, pd))) if p >= pd => (o, p, true),
            (_, Some((o, p))) => (o, p, false),
            (Some((o, p)), None) => (o, p, true),
            (None, None) => return,
        };
        // Both tails underflowed after the bulk was covered.
        if stop_on_underflow && p == 0.0 && mass > 0.5 {
            return;
        }
        if max.is_none() && visited >= MAX_SUMMATION_TERMS {
            log::warn!(
                "summation over an unbounded support stopped after {visited} outcomes with mass {mass}"
            );
            return;
        }
        visit(outcome, p);
        mass += p;
        visited += 1;
        if upward {
            up = frontier(above(outcome));
        } else {
            down = frontier(below(outcome));
        }
    }
}

#[inline]
pub(crate) fn clamp_unit(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Minimal implementor that relies on every default method.
    struct Table {
        min: i64,
        probs: Vec<f64>,
    }

    impl DiscreteDistribution for Table {
        fn min_outcome(&self) -> i64 {
            self.min
        }
        fn max_outcome(&self) -> Option<i64> {
            Some(self.min + self.probs.len() as i64 - 1)
        }
        fn probability(&self, outcome: i64) -> f64 {
            let idx = outcome - self.min;
            if idx < 0 {
                return 0.0;
            }
            self.probs.get(idx as usize).copied().unwrap_or(0.0)
        }
    }

    #[test]
    // Purpose
    // -------
    // Default derived quantities agree with hand computation, including a
    // zero-probability outcome in the middle of the support.
    //
    // Given
    // -----
    // - Outcomes -1, 0, 1 with probabilities 0.25, 0.0, 0.75.
    //
    // Expect
    // ------
    // - entropy = -(0.25 log2 0.25 + 0.75 log2 0.75)
    // - mean = 0.5, variance = 0.75
    // - log2_probability(0) = -∞
    fn defaults_match_hand_computation() {
        // Arrange
        let d = Table { min: -1, probs: vec![0.25, 0.0, 0.75] };

        // Act / Assert
        let h = -(0.25_f64 * 0.25_f64.log2() + 0.75 * 0.75_f64.log2());
        assert_relative_eq!(d.entropy(), h, epsilon = 1e-12);
        assert_relative_eq!(d.mean(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(d.variance(), 0.75, epsilon = 1e-12);
        assert_eq!(d.log2_probability(0), f64::NEG_INFINITY);
        assert_eq!(d.log2_probability(5), f64::NEG_INFINITY);
    }

    #[test]
    // Purpose
    // -------
    // Cumulative helpers are mutually consistent and handle ranges outside
    // the support.
    fn cumulative_helpers_are_consistent() {
        let d = Table { min: 2, probs: vec![0.1, 0.2, 0.3, 0.4] };

        for lo in 0..8 {
            for hi in lo..8 {
                let direct = d.cumulative_probability(lo, hi);
                let via_less =
                    d.cumulative_probability_less(hi) - d.cumulative_probability_less(lo - 1);
                let via_greater =
                    d.cumulative_probability_greater(lo) - d.cumulative_probability_greater(hi + 1);
                assert_relative_eq!(direct, via_less, epsilon = 1e-12);
                assert_relative_eq!(direct, via_greater, epsilon = 1e-12);
            }
        }
        assert_eq!(d.cumulative_probability(4, 3), 0.0);
        assert_eq!(d.cumulative_probability_less(1), 0.0);
        assert_relative_eq!(d.cumulative_probability_less(100), 1.0, epsilon = 1e-12);
        assert_relative_eq!(d.cumulative_probability_greater(-100), 1.0);
    }

    // Unbounded two-point mass far from `min_outcome`, reachable only through
    // the mode hint.
    struct FarPair {
        at: i64,
    }

    impl DiscreteDistribution for FarPair {
        fn min_outcome(&self) -> i64 {
            0
        }
        fn max_outcome(&self) -> Option<i64> {
            None
        }
        fn probability(&self, outcome: i64) -> f64 {
            if outcome == self.at || outcome == self.at + 1 { 0.5 } else { 0.0 }
        }
        fn mode_hint(&self) -> i64 {
            self.at
        }
    }

    #[test]
    // Purpose
    // -------
    // Summation over an unbounded support starts at the mode hint, so mass
    // far beyond the term cap from `min_outcome` is still found.
    //
    // Given
    // -----
    // - Mass 1/2 at 10^12 and at 10^12 + 1.
    //
    // Expect
    // ------
    // - entropy 1 bit, mean 10^12 + 0.5, variance 0.25, median at 10^12.
    fn unbounded_walk_starts_at_mode_hint() {
        let d = FarPair { at: 1_000_000_000_000 };

        assert_relative_eq!(d.entropy(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(d.mean(), 1e12 + 0.5, epsilon = 1e-3);
        assert_relative_eq!(d.variance(), 0.25, epsilon = 1e-9);
        assert_relative_eq!(d.cumulative_probability_less(d.at), 0.5, epsilon = 1e-12);
        assert_relative_eq!(d.cumulative_probability_greater(d.at + 1), 0.5, epsilon = 1e-12);
        assert_eq!(d.cumulative_probability_less(d.at - 1), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Zero-probability gaps inside a bounded support never end the walk
    // early, wherever the walk starts.
    fn bounded_walk_crosses_zero_gaps() {
        let d = Table { min: 0, probs: vec![0.6, 0.0, 0.0, 0.4] };
        let h = -(0.6_f64 * 0.6_f64.log2() + 0.4 * 0.4_f64.log2());

        assert_relative_eq!(d.entropy(), h, epsilon = 1e-12);
        assert_relative_eq!(d.mean(), 1.2, epsilon = 1e-12);
        assert_relative_eq!(d.cumulative_probability(1, 3), 0.4, epsilon = 1e-12);

        let mut seen = Vec::new();
        sum_over_support(&d, |o, _| seen.push(o));
        seen.sort_unstable();
        assert_eq!(seen, [0, 1, 2, 3]);
    }
}
