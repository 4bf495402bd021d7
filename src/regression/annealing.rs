//! Learning-rate schedules indexed by epoch.

use crate::regression::errors::{RegressionError, RegressionResult};

/// Maps a zero-based epoch number to a learning rate.
///
/// - `Constant`: `rate`.
/// - `Inverse`: `initial / (1 + epoch / annealing_rate)`.
/// - `Exponential`: `initial · base^epoch` with `base ∈ (0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnnealingSchedule {
    Constant { rate: f64 },
    Inverse { initial: f64, annealing_rate: f64 },
    Exponential { initial: f64, base: f64 },
}

impl AnnealingSchedule {
    /// # Errors
    /// [`RegressionError::InvalidLearningRate`] unless `rate` is finite and > 0.
    pub fn constant(rate: f64) -> RegressionResult<Self> {
        verify_positive(rate, "Learning rate must be finite and positive.")?;
        Ok(AnnealingSchedule::Constant { rate })
    }

    /// # Errors
    /// [`RegressionError::InvalidLearningRate`] unless both arguments are
    /// finite and > 0.
    pub fn inverse(initial: f64, annealing_rate: f64) -> RegressionResult<Self> {
        verify_positive(initial, "Initial learning rate must be finite and positive.")?;
        verify_positive(annealing_rate, "Annealing rate must be finite and positive.")?;
        Ok(AnnealingSchedule::Inverse { initial, annealing_rate })
    }

    /// # Errors
    /// [`RegressionError::InvalidLearningRate`] unless `initial` is finite
    /// and > 0 and `base` is in (0, 1].
    pub fn exponential(initial: f64, base: f64) -> RegressionResult<Self> {
        verify_positive(initial, "Initial learning rate must be finite and positive.")?;
        if !base.is_finite() || base <= 0.0 || base > 1.0 {
            return Err(RegressionError::InvalidLearningRate {
                value: base,
                reason: "Exponential base must be in (0, 1].",
            });
        }
        Ok(AnnealingSchedule::Exponential { initial, base })
    }

    pub fn learning_rate(&self, epoch: usize) -> f64 {
        let e = epoch as f64;
        match *self {
            AnnealingSchedule::Constant { rate } => rate,
            AnnealingSchedule::Inverse { initial, annealing_rate } => {
                initial / (1.0 + e / annealing_rate)
            }
            AnnealingSchedule::Exponential { initial, base } => initial * base.powf(e),
        }
    }
}

impl Default for AnnealingSchedule {
    fn default() -> Self {
        AnnealingSchedule::Inverse { initial: 0.002, annealing_rate: 10_000.0 }
    }
}

fn verify_positive(value: f64, reason: &'static str) -> RegressionResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(RegressionError::InvalidLearningRate { value, reason });
    }
    Ok(())
}
