//! Validated training sets for the logistic-regression trainer.
//!
//! [`TrainingData`] checks its inputs once at construction so the training
//! loop can index features, labels and weights without re-validating.

use crate::regression::{
    errors::{RegressionError, RegressionResult},
    vectors::FeatureVector,
};

/// `TrainingData` — feature vectors with integer class labels.
///
/// Invariants
/// ----------
/// - At least one instance, and `features.len() == labels.len()`.
/// - `num_outcomes >= 2` and every label is `< num_outcomes`.
/// - Every feature vector has the same, nonzero dimensionality.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingData<V> {
    features: Vec<V>,
    labels: Vec<usize>,
    num_outcomes: usize,
    num_dimensions: usize,
}

impl<V: FeatureVector> TrainingData<V> {
    /// # Errors
    /// - [`RegressionError::LengthMismatch`] when the arrays differ in length.
    /// - [`RegressionError::EmptyData`] with no instances or zero-dimensional
    ///   features.
    /// - [`RegressionError::TooFewOutcomes`] when `num_outcomes < 2`.
    /// - [`RegressionError::LabelOutOfRange`] for the first bad label.
    /// - [`RegressionError::FeatureDimMismatch`] for the first vector whose
    ///   dimensionality differs from the first one's.
    pub fn new(features: Vec<V>, labels: Vec<usize>, num_outcomes: usize) -> RegressionResult<Self> {
        if features.len() != labels.len() {
            return Err(RegressionError::LengthMismatch {
                features: features.len(),
                labels: labels.len(),
            });
        }
        let num_dimensions = match features.first() {
            Some(first) if first.num_dimensions() > 0 => first.num_dimensions(),
            _ => return Err(RegressionError::EmptyData),
        };
        if num_outcomes < 2 {
            return Err(RegressionError::TooFewOutcomes { value: num_outcomes });
        }
        for (index, &label) in labels.iter().enumerate() {
            if label >= num_outcomes {
                return Err(RegressionError::LabelOutOfRange { index, label, num_outcomes });
            }
        }
        for (index, x) in features.iter().enumerate() {
            if x.num_dimensions() != num_dimensions {
                return Err(RegressionError::FeatureDimMismatch {
                    index,
                    expected: num_dimensions,
                    found: x.num_dimensions(),
                });
            }
        }
        Ok(Self { features, labels, num_outcomes, num_dimensions })
    }

    /// Like [`new`](Self::new) with `num_outcomes = max(label) + 1`, and at
    /// least 2.
    pub fn infer(features: Vec<V>, labels: Vec<usize>) -> RegressionResult<Self> {
        let num_outcomes = labels.iter().max().map_or(2, |&m| (m + 1).max(2));
        Self::new(features, labels, num_outcomes)
    }

    pub fn features(&self) -> &[V] {
        &self.features
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn num_outcomes(&self) -> usize {
        self.num_outcomes
    }

    pub fn num_dimensions(&self) -> usize {
        self.num_dimensions
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false`; kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate `(features, label)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&V, usize)> + '_ {
        self.features.iter().zip(self.labels.iter().copied())
    }
}
