//! estimators — mutable accumulators that compile into distributions.
//!
//! Purpose
//! -------
//! Collect weighted observations one at a time and freeze the current
//! maximum-likelihood estimate into an immutable distribution from
//! [`crate::distributions`].
//!
//! Key behaviors
//! -------------
//! - [`OnlineMoments`] keeps a weighted mean and centered sum of squares;
//!   removing the most recent addition restores the saved state bit for bit.
//! - [`BernoulliEstimator`], [`PoissonEstimator`] and
//!   [`MultivariateEstimator`] keep integer counts and expose `train` /
//!   `un_train` and `compile`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `train(x)` followed by `un_train(x)` restores the previous state
//!   exactly. Count totals past `u64::MAX` fail with `CountOverflow`.
//! - Removing more than was recorded fails with an `InvalidState` error and
//!   leaves the estimator untouched.
//! - `compile` on an empty estimator fails; compiled values share no state
//!   with the estimator.
//!
//! Conventions
//! -----------
//! - Estimators are not synchronized; wrap them yourself if several threads
//!   mutate one.
//! - Errors are [`DistError`](crate::distributions::DistError), shared with
//!   the distributions subtree.

pub mod bernoulli;
pub mod multivariate;
pub mod online_moments;
pub mod poisson;

pub use self::bernoulli::BernoulliEstimator;
pub use self::multivariate::MultivariateEstimator;
pub use self::online_moments::OnlineMoments;
pub use self::poisson::PoissonEstimator;
