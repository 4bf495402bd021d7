//! Training options — validated knobs for [`estimate`](crate::regression::trainer::estimate).
//!
//! Purpose
//! -------
//! Bundle the trainer's configuration in one value so call sites pass a
//! single validated struct instead of a long argument list.
//!
//! Invariants
//! ----------
//! - `prior_block_size >= 1`.
//! - `min_improvement` finite and non-negative.
//! - `rolling_average_size >= 1`.
//! - `1 <= max_epochs` and `min_epochs <= max_epochs`.
//! - `annealing` was built through its own validating constructor.

use crate::regression::{
    annealing::AnnealingSchedule,
    errors::{RegressionError, RegressionResult},
};

/// TrainingOptions — configuration for one training run.
///
/// Fields
/// ------
/// - `prior_block_size`: number of coefficient dimensions updated together
///   in one inner step.
/// - `annealing`: learning rate per epoch.
/// - `min_improvement`: convergence threshold on the rolling mean of the
///   relative objective change.
/// - `rolling_average_size`: number of epochs in that rolling mean.
/// - `min_epochs` / `max_epochs`: hard bounds on the number of epochs.
/// - `verbose`: log every epoch at `info` instead of `debug`.
///
/// Default:
/// - `prior_block_size = 100`
/// - `annealing = AnnealingSchedule::default()`
/// - `min_improvement = 1e-4`, `rolling_average_size = 10`
/// - `min_epochs = 2`, `max_epochs = 1000`
/// - `verbose = false`
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingOptions {
    pub prior_block_size: usize,
    pub annealing: AnnealingSchedule,
    pub min_improvement: f64,
    pub rolling_average_size: usize,
    pub min_epochs: usize,
    pub max_epochs: usize,
    pub verbose: bool,
}

impl TrainingOptions {
    /// Validate and bundle the options.
    ///
    /// # Errors
    /// - [`RegressionError::InvalidBlockSize`] when `prior_block_size == 0`.
    /// - [`RegressionError::InvalidMinImprovement`] for a negative or
    ///   non-finite threshold.
    /// - [`RegressionError::InvalidRollingAverageSize`] when the window is 0.
    /// - [`RegressionError::InvalidEpochBounds`] when `max_epochs == 0` or
    ///   `min_epochs > max_epochs`.
    pub fn new(
        prior_block_size: usize, annealing: AnnealingSchedule, min_improvement: f64,
        rolling_average_size: usize, min_epochs: usize, max_epochs: usize, verbose: bool,
    ) -> RegressionResult<Self> {
        let opts = Self {
            prior_block_size,
            annealing,
            min_improvement,
            rolling_average_size,
            min_epochs,
            max_epochs,
            verbose,
        };
        opts.validate()?;
        Ok(opts)
    }

    /// Re-check invariants, for options assembled through public fields.
    pub fn validate(&self) -> RegressionResult<()> {
        if self.prior_block_size == 0 {
            return Err(RegressionError::InvalidBlockSize { value: self.prior_block_size });
        }
        if !self.min_improvement.is_finite() || self.min_improvement < 0.0 {
            return Err(RegressionError::InvalidMinImprovement { value: self.min_improvement });
        }
        if self.rolling_average_size == 0 {
            return Err(RegressionError::InvalidRollingAverageSize {
                value: self.rolling_average_size,
            });
        }
        if self.max_epochs == 0 || self.min_epochs > self.max_epochs {
            return Err(RegressionError::InvalidEpochBounds {
                min_epochs: self.min_epochs,
                max_epochs: self.max_epochs,
            });
        }
        Ok(())
    }
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            prior_block_size: 100,
            annealing: AnnealingSchedule::default(),
            min_improvement: 1e-4,
            rolling_average_size: 10,
            min_epochs: 2,
            max_epochs: 1000,
            verbose: false,
        }
    }
}
