//! Poisson distribution over the unbounded outcome range `0, 1, 2, ...`.

use serde::{Deserialize, Serialize};
use statrs::function::{factorial::ln_factorial, gamma::checked_gamma_ur};

use crate::{
    distributions::{
        errors::{DistError, DistResult},
        traits::{clamp_unit, DiscreteDistribution},
    },
    persistence::Persist,
    utils::ln_to_log2,
};

/// Immutable Poisson distribution with rate `λ ≥ 0`.
///
/// `mean() == variance() == λ`. The CDF uses the regularized upper
/// incomplete gamma function, `P(X ≤ k) = Q(k + 1, λ)`; entropy is summed
/// outward from `⌊λ⌋` until the remaining mass is negligible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PoissonRepr")]
pub struct Poisson {
    lambda: f64,
}

#[derive(Deserialize)]
struct PoissonRepr {
    lambda: f64,
}

impl TryFrom<PoissonRepr> for Poisson {
    type Error = DistError;

    fn try_from(repr: PoissonRepr) -> DistResult<Self> {
        Poisson::new(repr.lambda)
    }
}

impl Poisson {
    /// # Errors
    /// [`DistError::InvalidRate`] if `lambda` is negative or non-finite.
    pub fn new(lambda: f64) -> DistResult<Self> {
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(DistError::InvalidRate { value: lambda });
        }
        Ok(Self { lambda })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Natural-log probability of `outcome`.
    fn ln_probability(&self, outcome: i64) -> f64 {
        if outcome < 0 {
            return f64::NEG_INFINITY;
        }
        if self.lambda == 0.0 {
            return if outcome == 0 { 0.0 } else { f64::NEG_INFINITY };
        }
        let k = outcome as u64;
        outcome as f64 * self.lambda.ln() - self.lambda - ln_factorial(k)
    }
}

impl DiscreteDistribution for Poisson {
    fn min_outcome(&self) -> i64 {
        0
    }

    fn max_outcome(&self) -> Option<i64> {
        None
    }

    fn mode_hint(&self) -> i64 {
        self.lambda.floor() as i64
    }

    fn probability(&self, outcome: i64) -> f64 {
        self.ln_probability(outcome).exp()
    }

    fn log2_probability(&self, outcome: i64) -> f64 {
        ln_to_log2(self.ln_probability(outcome))
    }

    fn cumulative_probability_less(&self, outcome: i64) -> f64 {
        if outcome < 0 {
            return 0.0;
        }
        if self.lambda == 0.0 {
            return 1.0;
        }
        match checked_gamma_ur(outcome as f64 + 1.0, self.lambda) {
            Ok(q) => clamp_unit(q),
            // Fall back to direct summation if the special function rejects
            // the arguments.
            Err(_) => {
                let mut total = 0.0;
                for k in 0..=outcome {
                    total += self.probability(k);
                    if total >= 1.0 {
                        break;
                    }
                }
                clamp_unit(total)
            }
        }
    }

    fn cumulative_probability(&self, lo: i64, hi: i64) -> f64 {
        if hi < lo {
            return 0.0;
        }
        let below = self.cumulative_probability_less(lo.saturating_sub(1));
        clamp_unit(self.cumulative_probability_less(hi) - below)
    }

    fn mean(&self) -> f64 {
        self.lambda
    }

    fn variance(&self) -> f64 {
        self.lambda
    }
}

impl Persist for Poisson {
    const TAG: u8 = 0x03;
}
