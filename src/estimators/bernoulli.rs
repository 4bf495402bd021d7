//! Incremental estimator for a [`Bernoulli`] success probability.

use crate::distributions::{
    bernoulli::Bernoulli,
    errors::{DistError, DistResult},
    validation::validate_count,
};

/// Accumulates success and failure counts.
///
/// Counts are integers, so `un_train` is an exact inverse of `train`. The
/// maximum-likelihood estimate is `successes / (successes + failures)`;
/// `compile` freezes it into an independent [`Bernoulli`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BernoulliEstimator {
    successes: u64,
    failures: u64,
}

impl BernoulliEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `count` outcomes of the same kind.
    ///
    /// # Errors
    /// - [`DistError::InvalidWeight`] when `count == 0`.
    /// - [`DistError::CountOverflow`] when the total would pass `u64::MAX`.
    pub fn train(&mut self, success: bool, count: u64) -> DistResult<()> {
        validate_count(count)?;
        self.num_samples().checked_add(count).ok_or(DistError::CountOverflow)?;
        if success {
            self.successes += count;
        } else {
            self.failures += count;
        }
        Ok(())
    }

    /// Undo a previous `train(success, count)`.
    ///
    /// # Errors
    /// [`DistError::RemovalExceedsRecorded`] if more would be removed from
    /// the success (or failure) tally than it holds.
    pub fn un_train(&mut self, success: bool, count: u64) -> DistResult<()> {
        validate_count(count)?;
        let tally = if success { &mut self.successes } else { &mut self.failures };
        if count > *tally {
            return Err(DistError::RemovalExceedsRecorded {
                requested: count as f64,
                recorded: *tally as f64,
            });
        }
        *tally -= count;
        Ok(())
    }

    pub fn num_samples(&self) -> u64 {
        self.successes + self.failures
    }

    pub fn num_successes(&self) -> u64 {
        self.successes
    }

    pub fn num_failures(&self) -> u64 {
        self.failures
    }

    /// # Errors
    /// [`DistError::NoObservations`] before any training.
    pub fn success_probability(&self) -> DistResult<f64> {
        let total = self.num_samples();
        if total == 0 {
            return Err(DistError::NoObservations);
        }
        Ok(self.successes as f64 / total as f64)
    }

    /// Freeze the current estimate.
    ///
    /// # Errors
    /// [`DistError::NoObservations`] before any training.
    pub fn compile(&self) -> DistResult<Bernoulli> {
        Bernoulli::new(self.success_probability()?)
    }
}
