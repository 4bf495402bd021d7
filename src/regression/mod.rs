//! regression — multinomial logistic regression with regularization priors.
//!
//! Purpose
//! -------
//! Fit and apply a discriminative multi-class classifier
//! `P(c = k | x) ∝ exp(w_k · x)`, with the last class pinned at `w = 0`,
//! regularized by a per-coefficient prior.
//!
//! Key behaviors
//! -------------
//! - `priors`: Gaussian, Laplace, Cauchy, elastic-net, mixture, and
//!   mean-shifted priors with exact gradients.
//! - `annealing`: per-epoch learning-rate schedules.
//! - `vectors`: the dense/sparse feature-vector contract.
//! - `data` / `options`: validated training inputs and configuration.
//! - `trainer`: block-coordinate gradient ascent with rolling-average
//!   convergence, hot starts, and a per-epoch callback.
//! - `classifier`: the immutable, persistable fitted model.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every configuration and data value is validated when constructed, so
//!   `trainer::estimate` fails only on cross-value mismatches (prior vs.
//!   dimensionality, hot start vs. data shape) or divergence.
//! - Classifiers are immutable; a hot start reads an old classifier and
//!   returns a new one.
//!
//! Conventions
//! -----------
//! - Likelihoods and priors reported to callers are in bits; gradients are
//!   taken in nats. Both share the same maximizer.
//! - Fallible operations return [`errors::RegressionResult`].
//!
//! Testing notes
//! -------------
//! - `priors` checks analytic gradients against `finitediff` central
//!   differences and the elastic-net / mean-shift identities.
//! - `trainer` covers separable and overlapping toy problems, hot starts,
//!   determinism, epoch bounds, and mixed dense/sparse inputs.

pub mod annealing;
pub mod classifier;
pub mod data;
pub mod errors;
pub mod options;
pub mod priors;
pub mod trainer;
pub mod vectors;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_statmodels::regression::prelude::*;
//
// to import the training and classification surface in a single line.

pub mod prelude {
    pub use super::annealing::AnnealingSchedule;
    pub use super::classifier::LogisticRegression;
    pub use super::data::TrainingData;
    pub use super::errors::{RegressionError, RegressionResult};
    pub use super::options::TrainingOptions;
    pub use super::priors::{PriorScales, RegressionPrior};
    pub use super::trainer::{estimate, EpochReport, FitOutcome};
    pub use super::vectors::{FeatureVec, FeatureVector, SparseVector};
}
