//! Incremental estimator for a [`Poisson`] rate.

use crate::distributions::{
    errors::{DistError, DistResult},
    poisson::Poisson,
    validation::validate_count,
};

/// Integer sums of `count`, `k·count` and `k²·count` over observed counts.
///
/// Sums are exact, so `un_train` restores the previous state regardless of
/// the order of removals. `compile` uses the mean as λ; the variance is kept
/// for dispersion checks, since for Poisson data it tracks the mean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoissonEstimator {
    count: u64,
    sum: u128,
    sum_squares: u128,
}

impl PoissonEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record outcome `k` observed `count` times.
    ///
    /// # Errors
    /// - [`DistError::InvalidWeight`] when `count == 0`.
    /// - [`DistError::CountOverflow`] when a running sum would overflow.
    pub fn train(&mut self, outcome: u64, count: u64) -> DistResult<()> {
        validate_count(count)?;
        let (k, c) = (u128::from(outcome), u128::from(count));
        let total = self.count.checked_add(count);
        let sum = k.checked_mul(c).and_then(|s| self.sum.checked_add(s));
        let sum_squares = k
            .checked_mul(k)
            .and_then(|k2| k2.checked_mul(c))
            .and_then(|s| self.sum_squares.checked_add(s));
        match (total, sum, sum_squares) {
            (Some(total), Some(sum), Some(sum_squares)) => {
                *self = Self { count: total, sum, sum_squares };
                Ok(())
            }
            _ => Err(DistError::CountOverflow),
        }
    }

    /// Undo a previous `train(outcome, count)`.
    ///
    /// # Errors
    /// [`DistError::RemovalExceedsRecorded`] when the removal does not fit in
    /// what was recorded.
    pub fn un_train(&mut self, outcome: u64, count: u64) -> DistResult<()> {
        validate_count(count)?;
        let exceeds =
            || DistError::RemovalExceedsRecorded { requested: count as f64, recorded: self.count as f64 };
        let (k, c) = (u128::from(outcome), u128::from(count));
        let total = self.count.checked_sub(count).ok_or_else(exceeds)?;
        let sum = k.checked_mul(c).and_then(|s| self.sum.checked_sub(s)).ok_or_else(exceeds)?;
        let sum_squares = k
            .checked_mul(k)
            .and_then(|k2| k2.checked_mul(c))
            .and_then(|s| self.sum_squares.checked_sub(s))
            .ok_or_else(exceeds)?;
        *self = Self { count: total, sum, sum_squares };
        Ok(())
    }

    pub fn num_samples(&self) -> u64 {
        self.count
    }

    /// # Errors
    /// [`DistError::NoObservations`] before any training.
    pub fn mean(&self) -> DistResult<f64> {
        self.require_observations()?;
        Ok(self.sum as f64 / self.count as f64)
    }

    /// Population variance of the recorded outcomes.
    ///
    /// # Errors
    /// [`DistError::NoObservations`] before any training.
    pub fn variance(&self) -> DistResult<f64> {
        let mean = self.mean()?;
        let n = self.count as f64;
        Ok((self.sum_squares as f64 / n - mean * mean).max(0.0))
    }

    /// # Errors
    /// [`DistError::NoObservations`] before any training.
    pub fn compile(&self) -> DistResult<Poisson> {
        Poisson::new(self.mean()?)
    }

    fn require_observations(&self) -> DistResult<()> {
        if self.count == 0 {
            return Err(DistError::NoObservations);
        }
        Ok(())
    }
}
