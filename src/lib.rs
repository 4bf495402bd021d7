//! rust_statmodels — discrete distributions, incremental estimators, and
//! regularized multinomial logistic regression.
//!
//! Purpose
//! -------
//! Serve as the crate root. The crate covers two related statistical
//! workflows:
//! - counting observations and compiling them into immutable discrete
//!   distributions that answer probability, cumulative, entropy, and moment
//!   queries;
//! - fitting a multi-class logistic-regression classifier under a choice of
//!   regularization priors, then classifying new feature vectors.
//!
//! Key behaviors
//! -------------
//! - [`distributions`]: the `DiscreteDistribution` contract and the
//!   Bernoulli, binomial, Poisson, uniform, categorical and multinomial
//!   families.
//! - [`estimators`]: weighted, reversible accumulators with `compile`.
//! - [`regression`]: priors, annealing, feature vectors, trainer, and the
//!   compiled classifier.
//! - [`persistence`]: framed binary encoding for every compiled value.
//!
//! Invariants & assumptions
//! ------------------------
//! - Construction validates eagerly; a value that exists is valid.
//! - Compiled distributions and classifiers are immutable and `Send + Sync`,
//!   so they can be shared across threads freely. Estimators are mutated
//!   through `&mut self` and are not synchronized.
//! - No call performs I/O except the explicit `Persist` methods.
//!
//! Conventions
//! -----------
//! - Log-probabilities and likelihoods are base 2 unless a name says `ln`.
//! - Each subtree has its own error enum; all of them map into
//!   [`errors::ErrorKind`].
//! - Diagnostics go through the `log` facade; the crate never installs a
//!   logger.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to the code in each module.
//! - `tests/` holds end-to-end pipelines: estimator → distribution →
//!   persistence, and data → trainer → classifier → persistence.

pub mod distributions;
pub mod errors;
pub mod estimators;
pub mod persistence;
pub mod regression;
pub mod utils;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_statmodels::prelude::*;
//
// to import the main surface in a single line.

pub mod prelude {
    pub use crate::distributions::{
        Bernoulli, Binomial, DiscreteDistribution, DistError, DistResult, Distribution,
        Multinomial, MultivariateConstant, Poisson, Uniform,
    };
    pub use crate::errors::ErrorKind;
    pub use crate::estimators::{
        BernoulliEstimator, MultivariateEstimator, OnlineMoments, PoissonEstimator,
    };
    pub use crate::persistence::{Persist, PersistError, PersistResult};
    pub use crate::regression::prelude::*;
}
