//! Closed sum type over every concrete scalar-outcome distribution.
//!
//! [`Distribution`] dispatches the [`DiscreteDistribution`] contract by
//! `match` instead of trait objects, and is the type to persist when the
//! concrete family is not known statically on the reading side.

use serde::{Deserialize, Serialize};

use crate::{
    distributions::{
        bernoulli::Bernoulli, binomial::Binomial, multivariate::MultivariateConstant,
        poisson::Poisson, traits::DiscreteDistribution, uniform::Uniform,
    },
    persistence::Persist,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Distribution {
    Bernoulli(Bernoulli),
    Binomial(Binomial),
    Poisson(Poisson),
    Uniform(Uniform),
    Multivariate(MultivariateConstant),
}

impl Distribution {
    /// Short family name, for diagnostics.
    pub fn family(&self) -> &'static str {
        match self {
            Distribution::Bernoulli(_) => "bernoulli",
            Distribution::Binomial(_) => "binomial",
            Distribution::Poisson(_) => "poisson",
            Distribution::Uniform(_) => "uniform",
            Distribution::Multivariate(_) => "multivariate",
        }
    }
}

macro_rules! delegate {
    ($self:ident, $d:ident => $body:expr) => {
        match $self {
            Distribution::Bernoulli($d) => $body,
            Distribution::Binomial($d) => $body,
            Distribution::Poisson($d) => $body,
            Distribution::Uniform($d) => $body,
            Distribution::Multivariate($d) => $body,
        }
    };
}

impl DiscreteDistribution for Distribution {
    fn min_outcome(&self) -> i64 {
        delegate!(self, d => d.min_outcome())
    }

    fn max_outcome(&self) -> Option<i64> {
        delegate!(self, d => d.max_outcome())
    }

    fn mode_hint(&self) -> i64 {
        delegate!(self, d => d.mode_hint())
    }

    fn probability(&self, outcome: i64) -> f64 {
        delegate!(self, d => d.probability(outcome))
    }

    fn log2_probability(&self, outcome: i64) -> f64 {
        delegate!(self, d => d.log2_probability(outcome))
    }

    fn cumulative_probability_less(&self, outcome: i64) -> f64 {
        delegate!(self, d => d.cumulative_probability_less(outcome))
    }

    fn cumulative_probability_greater(&self, outcome: i64) -> f64 {
        delegate!(self, d => d.cumulative_probability_greater(outcome))
    }

    fn cumulative_probability(&self, lo: i64, hi: i64) -> f64 {
        delegate!(self, d => d.cumulative_probability(lo, hi))
    }

    fn entropy(&self) -> f64 {
        delegate!(self, d => d.entropy())
    }

    fn mean(&self) -> f64 {
        delegate!(self, d => d.mean())
    }

    fn variance(&self) -> f64 {
        delegate!(self, d => d.variance())
    }
}

impl From<Bernoulli> for Distribution {
    fn from(d: Bernoulli) -> Self {
        Distribution::Bernoulli(d)
    }
}

impl From<Binomial> for Distribution {
    fn from(d: Binomial) -> Self {
        Distribution::Binomial(d)
    }
}

impl From<Poisson> for Distribution {
    fn from(d: Poisson) -> Self {
        Distribution::Poisson(d)
    }
}

impl From<Uniform> for Distribution {
    fn from(d: Uniform) -> Self {
        Distribution::Uniform(d)
    }
}

impl From<MultivariateConstant> for Distribution {
    fn from(d: MultivariateConstant) -> Self {
        Distribution::Multivariate(d)
    }
}

impl Persist for Distribution {
    const TAG: u8 = 0x10;
}
