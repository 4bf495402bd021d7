//! Block-coordinate gradient ascent for multinomial logistic regression.
//!
//! Purpose
//! -------
//! Fit a [`LogisticRegression`] to a [`TrainingData`] set by maximizing the
//! penalized log-likelihood
//!
//! ```text
//! L(W) = Σᵢ ln P(cᵢ | xᵢ; W) + Σ_k Σ_d ln π(W[k, d], d)
//! ```
//!
//! where `π` is a [`RegressionPrior`].
//!
//! Key behaviors
//! -------------
//! - Each epoch walks the input dimensions in blocks of
//!   `prior_block_size`. For every block it recomputes the per-instance
//!   softmax under the current weights, accumulates
//!   `∂L/∂W[k, d] = Σᵢ (1[cᵢ = k] - P(k | xᵢ)) xᵢ[d] + ∂ ln π(W[k, d], d)`
//!   for every non-reference class `k` and every `d` in the block, and
//!   applies `W += η(epoch) / n · ∂L`.
//! - After each epoch the objective is evaluated in bits and the relative
//!   change `|L - L'| / (|L| + |L'|)` is pushed into a window of
//!   `rolling_average_size` epochs. The callback runs next; then the run
//!   stops if at least `min_epochs` have elapsed, the window is full, and
//!   its mean is below `min_improvement`. Otherwise it stops at
//!   `max_epochs`.
//! - A hot start seeds the weights from an earlier classifier instead of
//!   zero; the earlier classifier is left untouched.
//!
//! Invariants & assumptions
//! ------------------------
//! - Training is deterministic: identical inputs give bit-identical
//!   weights.
//! - The weight buffer is owned by the call; the returned classifier is
//!   built from it once training ends.
//!
//! Conventions
//! -----------
//! - Progress goes through the `log` facade: every epoch at `debug` (or
//!   `info` with `verbose`), the final summary at `info`, and hitting
//!   `max_epochs` without converging at `warn`.

use std::collections::VecDeque;

use ndarray::{Array2, ArrayView2};

use crate::{
    regression::{
        classifier::{ln_likelihood, softmax_into, LogisticRegression},
        data::TrainingData,
        errors::{RegressionError, RegressionResult},
        options::TrainingOptions,
        priors::RegressionPrior,
        vectors::FeatureVector,
    },
    utils::{ln_to_log2, relative_abs_diff},
};

/// Snapshot handed to the per-epoch callback.
#[derive(Debug, Clone)]
pub struct EpochReport<'a> {
    /// One-based count of completed epochs.
    pub epoch: usize,
    pub learning_rate: f64,
    pub log2_likelihood: f64,
    pub log2_prior: f64,
    /// Relative objective change over this epoch.
    pub improvement: f64,
    /// Mean improvement over the window, once the window is full.
    pub rolling_improvement: Option<f64>,
    /// In-progress weights, `(K - 1) × D`.
    pub weights: ArrayView2<'a, f64>,
}

impl EpochReport<'_> {
    pub fn objective(&self) -> f64 {
        self.log2_likelihood + self.log2_prior
    }

    /// Copy the in-progress weights into a standalone classifier.
    pub fn classifier(&self) -> RegressionResult<LogisticRegression> {
        LogisticRegression::new(self.weights.to_owned())
    }
}

/// Result of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOutcome {
    pub classifier: LogisticRegression,
    pub epochs: usize,
    /// `true` when the rolling-improvement test stopped the run.
    pub converged: bool,
    pub log2_likelihood: f64,
    pub log2_prior: f64,
}

impl FitOutcome {
    pub fn objective(&self) -> f64 {
        self.log2_likelihood + self.log2_prior
    }
}

/// Fit a multinomial logistic regression.
///
/// Parameters
/// ----------
/// - `data`: validated features and labels.
/// - `prior`: regularization prior; its per-dimension arrays must cover
///   `data.num_dimensions()`.
/// - `opts`: block size, annealing schedule, and stopping rules.
/// - `hot_start`: optional classifier to resume from; must have
///   `data.num_outcomes()` outcomes and `data.num_dimensions()` inputs.
/// - `callback`: optional hook called once per epoch.
///
/// Errors
/// ------
/// - Any [`TrainingOptions::validate`] failure.
/// - [`RegressionError::DimensionOutOfRange`] when the prior does not cover
///   every input dimension.
/// - [`RegressionError::HotStartMismatch`] for a wrongly shaped hot start.
/// - [`RegressionError::NonFiniteWeight`] if the weights diverge.
pub fn estimate<V: FeatureVector>(
    data: &TrainingData<V>, prior: &RegressionPrior, opts: &TrainingOptions,
    hot_start: Option<&LogisticRegression>,
    mut callback: Option<&mut dyn FnMut(&EpochReport<'_>)>,
) -> RegressionResult<FitOutcome> {
    opts.validate()?;
    let num_classes = data.num_outcomes() - 1;
    let num_dims = data.num_dimensions();
    prior.check_dimensions(num_dims)?;

    let mut weights = match hot_start {
        Some(clf) => {
            let found = (clf.num_outcomes(), clf.num_input_dimensions());
            let expected = (data.num_outcomes(), num_dims);
            if found != expected {
                return Err(RegressionError::HotStartMismatch { expected, found });
            }
            clf.weight_vectors().to_owned()
        }
        None => Array2::zeros((num_classes, num_dims)),
    };

    log::info!(
        "training logistic regression: {} instances, {} outcomes, {} dimensions, {} prior, hot start = {}",
        data.len(),
        data.num_outcomes(),
        num_dims,
        prior.name(),
        hot_start.is_some()
    );

    let block_size = opts.prior_block_size.min(num_dims);
    let window_size = opts.rolling_average_size;
    let epoch_level = if opts.verbose { log::Level::Info } else { log::Level::Debug };
    let inv_n = 1.0 / data.len() as f64;

    let mut probs = vec![0.0; num_classes + 1];
    let mut grad = Array2::<f64>::zeros((num_classes, block_size));
    let mut window: VecDeque<f64> = VecDeque::with_capacity(window_size);

    let mut log2_likelihood = ln_to_log2(ln_likelihood(weights.view(), data));
    let mut log2_prior = prior.log2_prior_weights(weights.view())?;
    let mut epochs = 0;
    let mut converged = false;

    while epochs < opts.max_epochs {
        let learning_rate = opts.annealing.learning_rate(epochs);
        let step = learning_rate * inv_n;

        for start in (0..num_dims).step_by(block_size) {
            let end = (start + block_size).min(num_dims);
            grad.fill(0.0);
            for (x, c) in data.iter() {
                softmax_into(weights.view(), x, &mut probs);
                x.for_each_in_range(start..end, |d, v| {
                    for k in 0..num_classes {
                        let observed = if c == k { 1.0 } else { 0.0 };
                        grad[[k, d - start]] += (observed - probs[k]) * v;
                    }
                });
            }
            for k in 0..num_classes {
                for d in start..end {
                    let g = grad[[k, d - start]] + prior.gradient(weights[[k, d]], d)?;
                    weights[[k, d]] += step * g;
                }
            }
        }
        epochs += 1;

        let previous = log2_likelihood + log2_prior;
        log2_likelihood = ln_to_log2(ln_likelihood(weights.view(), data));
        log2_prior = prior.log2_prior_weights(weights.view())?;
        let improvement = relative_abs_diff(log2_likelihood + log2_prior, previous);

        if window.len() == window_size {
            window.pop_front();
        }
        window.push_back(improvement);
        let rolling_improvement = (window.len() == window_size)
            .then(|| window.iter().sum::<f64>() / window_size as f64);

        log::log!(
            epoch_level,
            "epoch {epochs}: rate = {learning_rate:.4e}, log2 likelihood = {log2_likelihood:.6}, log2 prior = {log2_prior:.6}, improvement = {improvement:.3e}"
        );

        if let Some(cb) = callback.as_deref_mut() {
            cb(&EpochReport {
                epoch: epochs,
                learning_rate,
                log2_likelihood,
                log2_prior,
                improvement,
                rolling_improvement,
                weights: weights.view(),
            });
        }

        if epochs >= opts.min_epochs
            && rolling_improvement.is_some_and(|r| r < opts.min_improvement)
        {
            converged = true;
            break;
        }
    }

    if converged {
        log::info!(
            "converged after {epochs} epochs: log2 likelihood = {log2_likelihood:.6}, log2 prior = {log2_prior:.6}"
        );
    } else {
        log::warn!(
            "stopped at max_epochs = {} without converging: log2 likelihood = {log2_likelihood:.6}, log2 prior = {log2_prior:.6}",
            opts.max_epochs
        );
    }

    Ok(FitOutcome {
        classifier: LogisticRegression::new(weights)?,
        epochs,
        converged,
        log2_likelihood,
        log2_prior,
    })
}
