//! Bernoulli distribution: outcome `1` (success) with probability `p`,
//! outcome `0` (failure) with probability `1 - p`.

use serde::{Deserialize, Serialize};

use crate::{
    distributions::{
        errors::{DistError, DistResult},
        traits::DiscreteDistribution,
        validation::validate_probability,
    },
    persistence::Persist,
    utils::entropy_term,
};

/// Immutable two-outcome distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BernoulliRepr")]
pub struct Bernoulli {
    success_probability: f64,
}

#[derive(Deserialize)]
struct BernoulliRepr {
    success_probability: f64,
}

impl TryFrom<BernoulliRepr> for Bernoulli {
    type Error = DistError;

    fn try_from(repr: BernoulliRepr) -> DistResult<Self> {
        Bernoulli::new(repr.success_probability)
    }
}

impl Bernoulli {
    /// # Errors
    /// [`DistError::InvalidProbability`] unless `p` is finite and in `[0, 1]`.
    pub fn new(success_probability: f64) -> DistResult<Self> {
        validate_probability(success_probability)?;
        Ok(Self { success_probability })
    }

    pub fn success_probability(&self) -> f64 {
        self.success_probability
    }

    pub fn failure_probability(&self) -> f64 {
        1.0 - self.success_probability
    }
}

impl DiscreteDistribution for Bernoulli {
    fn min_outcome(&self) -> i64 {
        0
    }

    fn max_outcome(&self) -> Option<i64> {
        Some(1)
    }

    fn probability(&self, outcome: i64) -> f64 {
        match outcome {
            0 => self.failure_probability(),
            1 => self.success_probability,
            _ => 0.0,
        }
    }

    fn entropy(&self) -> f64 {
        entropy_term(self.success_probability) + entropy_term(self.failure_probability())
    }

    fn mean(&self) -> f64 {
        self.success_probability
    }

    fn variance(&self) -> f64 {
        self.success_probability * self.failure_probability()
    }
}

impl Persist for Bernoulli {
    const TAG: u8 = 0x01;
}
