//! Discrete uniform distribution over an inclusive outcome range.

use serde::{Deserialize, Serialize};

use crate::{
    distributions::{
        errors::{DistError, DistResult},
        traits::DiscreteDistribution,
        validation::validate_outcome_range,
    },
    persistence::Persist,
};

/// Every outcome in `[min, max]` has probability `1 / (max - min + 1)`.
///
/// Moments, entropy, and cumulatives are closed forms, so ranges of any
/// width (up to all of `i64`) are answered in constant time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UniformRepr")]
pub struct Uniform {
    min: i64,
    max: i64,
}

#[derive(Deserialize)]
struct UniformRepr {
    min: i64,
    max: i64,
}

impl TryFrom<UniformRepr> for Uniform {
    type Error = DistError;

    fn try_from(repr: UniformRepr) -> DistResult<Self> {
        Uniform::new(repr.min, repr.max)
    }
}

impl Uniform {
    /// # Errors
    /// [`DistError::InvalidOutcomeRange`] when `max < min`.
    pub fn new(min: i64, max: i64) -> DistResult<Self> {
        validate_outcome_range(min, max)?;
        Ok(Self { min, max })
    }

    /// Number of outcomes in the range; `2^64` for the full `i64` range.
    pub fn num_outcomes(&self) -> u128 {
        u128::from(self.max.abs_diff(self.min)) + 1
    }

    fn width(&self) -> f64 {
        self.num_outcomes() as f64
    }

    /// Number of outcomes in `[lo, hi] ∩ [min, max]`, as `f64`.
    fn count_between(&self, lo: i64, hi: i64) -> f64 {
        let (lo, hi) = (lo.max(self.min), hi.min(self.max));
        if hi < lo {
            return 0.0;
        }
        (u128::from(hi.abs_diff(lo)) + 1) as f64
    }
}

impl DiscreteDistribution for Uniform {
    fn min_outcome(&self) -> i64 {
        self.min
    }

    fn max_outcome(&self) -> Option<i64> {
        Some(self.max)
    }

    fn probability(&self, outcome: i64) -> f64 {
        if outcome < self.min || outcome > self.max {
            return 0.0;
        }
        1.0 / self.width()
    }

    fn log2_probability(&self, outcome: i64) -> f64 {
        if outcome < self.min || outcome > self.max {
            return f64::NEG_INFINITY;
        }
        -self.width().log2()
    }

    fn cumulative_probability_less(&self, outcome: i64) -> f64 {
        self.count_between(self.min, outcome) / self.width()
    }

    fn cumulative_probability_greater(&self, outcome: i64) -> f64 {
        self.count_between(outcome, self.max) / self.width()
    }

    fn cumulative_probability(&self, lo: i64, hi: i64) -> f64 {
        self.count_between(lo, hi) / self.width()
    }

    fn entropy(&self) -> f64 {
        self.width().log2()
    }

    fn mean(&self) -> f64 {
        // Halve first so `min + max` cannot overflow.
        self.min as f64 / 2.0 + self.max as f64 / 2.0
    }

    fn variance(&self) -> f64 {
        let n = self.width();
        (n * n - 1.0) / 12.0
    }
}

impl Persist for Uniform {
    const TAG: u8 = 0x04;
}
