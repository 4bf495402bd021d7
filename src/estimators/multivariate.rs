//! Label-keyed counting estimator for [`MultivariateConstant`].
//!
//! Outcomes are assigned indices in first-seen order, so the compiled
//! distribution's outcome `i` is the `i`-th distinct label ever trained (or
//! pre-declared through [`MultivariateEstimator::with_labels`]).

use std::collections::HashMap;

use crate::distributions::{
    errors::{DistError, DistResult},
    multivariate::MultivariateConstant,
    validation::{validate_count, validate_unique_labels},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultivariateEstimator {
    labels: Vec<String>,
    index: HashMap<String, usize>,
    counts: Vec<u64>,
    total: u64,
    declared: usize,
}

impl MultivariateEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a fixed outcome set, all counts zero.
    ///
    /// # Errors
    /// [`DistError::DuplicateLabel`] if a label repeats.
    pub fn with_labels(labels: Vec<String>) -> DistResult<Self> {
        validate_unique_labels(&labels)?;
        let index = labels.iter().enumerate().map(|(i, l)| (l.clone(), i)).collect();
        let counts = vec![0; labels.len()];
        let declared = labels.len();
        Ok(Self { labels, index, counts, total: 0, declared })
    }

    /// Add `count` observations of `label`, registering it on first sight.
    ///
    /// # Errors
    /// - [`DistError::InvalidWeight`] when `count == 0`.
    /// - [`DistError::CountOverflow`] when the total would pass `u64::MAX`;
    ///   the estimator is left unchanged.
    pub fn train(&mut self, label: &str, count: u64) -> DistResult<()> {
        validate_count(count)?;
        let total = self.total.checked_add(count).ok_or(DistError::CountOverflow)?;
        let i = match self.index.get(label) {
            Some(&i) => i,
            None => {
                let i = self.labels.len();
                self.labels.push(label.to_owned());
                self.index.insert(label.to_owned(), i);
                self.counts.push(0);
                i
            }
        };
        // Bounded by `total`, which did not overflow.
        self.counts[i] += count;
        self.total = total;
        Ok(())
    }

    /// Add `count` observations of an already known outcome index.
    ///
    /// # Errors
    /// - [`DistError::UnknownOutcome`] when `outcome >= num_dimensions()`.
    /// - [`DistError::InvalidWeight`] when `count == 0`.
    /// - [`DistError::CountOverflow`] when the total would pass `u64::MAX`.
    pub fn train_outcome(&mut self, outcome: usize, count: u64) -> DistResult<()> {
        validate_count(count)?;
        if outcome >= self.counts.len() {
            return Err(DistError::UnknownOutcome {
                outcome,
                num_dimensions: self.counts.len(),
            });
        }
        let total = self.total.checked_add(count).ok_or(DistError::CountOverflow)?;
        self.counts[outcome] += count;
        self.total = total;
        Ok(())
    }

    /// Remove `count` observations of `label`.
    ///
    /// A label that was introduced by `train` and is the most recent one is
    /// unregistered again once its count returns to zero, so `train` followed
    /// by `un_train` leaves the estimator exactly as before.
    ///
    /// # Errors
    /// [`DistError::RemovalExceedsRecorded`] when `count` exceeds the
    /// recorded count (zero for unknown labels).
    pub fn un_train(&mut self, label: &str, count: u64) -> DistResult<()> {
        validate_count(count)?;
        let Some(&i) = self.index.get(label) else {
            return Err(DistError::RemovalExceedsRecorded {
                requested: count as f64,
                recorded: 0.0,
            });
        };
        if count > self.counts[i] {
            return Err(DistError::RemovalExceedsRecorded {
                requested: count as f64,
                recorded: self.counts[i] as f64,
            });
        }
        self.counts[i] -= count;
        self.total -= count;
        if self.counts[i] == 0 && i + 1 == self.labels.len() && i >= self.declared {
            self.counts.pop();
            self.labels.pop();
            self.index.remove(label);
        }
        Ok(())
    }

    /// Zero the count of `label`, returning the previous count.
    ///
    /// The label keeps its outcome index.
    ///
    /// # Errors
    /// [`DistError::UnknownLabel`] if `label` was never seen.
    pub fn reset_count(&mut self, label: &str) -> DistResult<u64> {
        let i = self.lookup(label)?;
        let previous = std::mem::take(&mut self.counts[i]);
        self.total -= previous;
        Ok(previous)
    }

    /// Recorded count of `label`; zero for unknown labels.
    pub fn count(&self, label: &str) -> u64 {
        self.index.get(label).map_or(0, |&i| self.counts[i])
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn total_count(&self) -> u64 {
        self.total
    }

    pub fn num_dimensions(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Maximum-likelihood probability of `label`.
    ///
    /// # Errors
    /// - [`DistError::NoObservations`] when the total count is zero.
    /// - [`DistError::UnknownLabel`] if `label` was never seen.
    pub fn probability(&self, label: &str) -> DistResult<f64> {
        if self.total == 0 {
            return Err(DistError::NoObservations);
        }
        let i = self.lookup(label)?;
        Ok(self.counts[i] as f64 / self.total as f64)
    }

    /// Freeze the counts into a labeled categorical distribution.
    ///
    /// # Errors
    /// [`DistError::NoObservations`] when the total count is zero.
    pub fn compile(&self) -> DistResult<MultivariateConstant> {
        if self.total == 0 {
            return Err(DistError::NoObservations);
        }
        MultivariateConstant::from_counts_labeled(&self.counts, self.labels.clone())
    }

    fn lookup(&self, label: &str) -> DistResult<usize> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| DistError::UnknownLabel { label: label.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::traits::DiscreteDistribution;
    use approx::assert_relative_eq;

    fn sample() -> MultivariateEstimator {
        let mut est = MultivariateEstimator::new();
        est.train("red", 3).unwrap();
        est.train("green", 1).unwrap();
        est.train("blue", 4).unwrap();
        est
    }

    #[test]
    // Purpose
    // -------
    // Compiled probabilities equal count / total, with labels in first-seen
    // order.
    fn compile_matches_direct_ratios() {
        // Arrange
        let est = sample();

        // Act
        let dist = est.compile().unwrap();

        // Assert
        assert_eq!(dist.labels().unwrap(), ["red", "green", "blue"]);
        assert_relative_eq!(dist.probability(0), 3.0 / 8.0, epsilon = 1e-15);
        assert_relative_eq!(dist.probability_of_label("blue").unwrap(), 0.5, epsilon = 1e-15);
        for label in est.labels() {
            assert_relative_eq!(
                dist.probability_of_label(label).unwrap(),
                est.probability(label).unwrap(),
                epsilon = 1e-15
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // `train` then `un_train` restores the previous state, including
    // unregistering a label the `train` call introduced.
    fn train_un_train_restores_exactly() {
        let mut est = sample();
        let before = est.clone();

        est.train("green", 2).unwrap();
        est.un_train("green", 2).unwrap();
        assert_eq!(est, before);

        est.train("violet", 5).unwrap();
        assert_eq!(est.num_dimensions(), 4);
        est.un_train("violet", 5).unwrap();
        assert_eq!(est, before);
    }

    #[test]
    fn removal_beyond_recorded_is_invalid_state() {
        let mut est = sample();
        let err = est.un_train("green", 2).unwrap_err();
        assert_eq!(err, DistError::RemovalExceedsRecorded { requested: 2.0, recorded: 1.0 });
        assert_eq!(err.kind(), crate::errors::ErrorKind::InvalidState);
        assert!(matches!(est.un_train("cyan", 1), Err(DistError::RemovalExceedsRecorded { .. })));
    }

    #[test]
    fn reset_count_keeps_dimension() {
        let mut est = sample();
        assert_eq!(est.reset_count("red").unwrap(), 3);
        assert_eq!(est.total_count(), 5);
        assert_eq!(est.num_dimensions(), 3);
        assert_eq!(est.compile().unwrap().probability(0), 0.0);
        assert_eq!(
            est.reset_count("cyan"),
            Err(DistError::UnknownLabel { label: "cyan".to_owned() })
        );
    }

    #[test]
    fn declared_labels_and_outcome_indices() {
        let mut est =
            MultivariateEstimator::with_labels(vec!["a".into(), "b".into(), "c".into()]).unwrap();
        assert_eq!(est.compile(), Err(DistError::NoObservations));
        est.train_outcome(2, 6).unwrap();
        est.train("a", 2).unwrap();
        assert_eq!(est.counts(), [2, 0, 6]);
        assert_eq!(
            est.train_outcome(3, 1),
            Err(DistError::UnknownOutcome { outcome: 3, num_dimensions: 3 })
        );
        // Declared labels survive dropping back to zero.
        est.un_train("c", 6).unwrap();
        assert_eq!(est.num_dimensions(), 3);
        assert!(MultivariateEstimator::with_labels(vec!["x".into(), "x".into()]).is_err());
        assert_eq!(est.train("a", 0), Err(DistError::InvalidWeight { value: 0.0 }));
    }

    #[test]
    // Purpose
    // -------
    // A count that would push the total past `u64::MAX` fails without
    // touching the estimator, for new labels as well as known outcomes.
    fn overflowing_counts_leave_state_unchanged() {
        let mut est = MultivariateEstimator::new();
        est.train("a", u64::MAX - 1).unwrap();
        let before = est.clone();

        assert_eq!(est.train("b", 2), Err(DistError::CountOverflow));
        assert_eq!(est.train_outcome(0, 2), Err(DistError::CountOverflow));
        assert_eq!(est, before);
        assert_eq!(est.num_dimensions(), 1);

        est.train("b", 1).unwrap();
        assert_eq!(est.total_count(), u64::MAX);
    }
}
