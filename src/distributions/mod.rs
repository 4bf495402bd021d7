//! distributions — discrete distributions with a uniform query contract.
//!
//! Purpose
//! -------
//! Provide immutable discrete probability distributions that all answer the
//! same questions: per-outcome probability and log-probability, cumulative
//! probabilities, entropy, mean, and variance.
//!
//! Key behaviors
//! -------------
//! - [`traits::DiscreteDistribution`] defines the contract; derived
//!   quantities are implemented once against `probability` and the outcome
//!   range, and concrete types override them with closed forms where one
//!   exists.
//! - Concrete families: [`Bernoulli`], [`Binomial`], [`Poisson`],
//!   [`Uniform`], and the categorical [`MultivariateConstant`].
//! - [`Multinomial`] scores count vectors against a categorical basis.
//! - [`Distribution`] is the closed enum over the scalar families, used for
//!   static dispatch and persistence.
//!
//! Invariants & assumptions
//! ------------------------
//! - `probability(o)` is 0 outside `[min_outcome, max_outcome]` and finite
//!   supports sum to one up to rounding.
//! - Invalid parameters are rejected at construction with a
//!   [`errors::DistError`]; a successfully built distribution never fails a
//!   query.
//! - Zero probability maps to `log2_probability = -∞`, never an error.
//!
//! Conventions
//! -----------
//! - Outcomes are `i64`; unbounded supports report `max_outcome() == None`.
//! - `cumulative_probability_less(x) = P(X ≤ x)` and
//!   `cumulative_probability_greater(x) = P(X ≥ x)`.
//! - Entropies are in bits.
//!
//! Downstream usage
//! ----------------
//! - Estimators in [`crate::estimators`] compile into these types.
//! - Callers that need persistence without knowing the family statically
//!   wrap values into [`Distribution`] and use [`crate::persistence::Persist`].
//!
//! Testing notes
//! -------------
//! - Each family tests normalization, closed forms against summation, edge
//!   parameters, and construction failures.
//! - `compiled` tests persistence round trips for every family.

pub mod bernoulli;
pub mod binomial;
pub mod compiled;
pub mod errors;
pub mod multinomial;
pub mod multivariate;
pub mod poisson;
pub mod traits;
pub mod uniform;
pub mod validation;

pub use self::bernoulli::Bernoulli;
pub use self::binomial::Binomial;
pub use self::compiled::Distribution;
pub use self::errors::{DistError, DistResult};
pub use self::multinomial::Multinomial;
pub use self::multivariate::MultivariateConstant;
pub use self::poisson::Poisson;
pub use self::traits::DiscreteDistribution;
pub use self::uniform::Uniform;
