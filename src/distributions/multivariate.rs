//! Categorical distribution over a fixed set of outcomes `0..n`, each
//! optionally carrying a unique string label.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    distributions::{
        errors::{DistError, DistResult},
        traits::DiscreteDistribution,
        validation::{index_labels, validate_probability, validate_ratios},
    },
    persistence::Persist,
};

/// Largest tolerated deviation from 1 for stored probabilities on decode.
const NORMALIZATION_TOLERANCE: f64 = 1e-9;

/// MultivariateConstant — immutable categorical distribution.
///
/// Purpose
/// -------
/// Represent a discrete distribution over `n` outcomes, indexed `0..n`,
/// with an optional bijection between outcome indices and string labels.
///
/// Constructors
/// ------------
/// - [`from_counts`](Self::from_counts) / [`from_counts_labeled`](Self::from_counts_labeled):
///   probabilities proportional to non-negative integer counts.
/// - [`from_ratios`](Self::from_ratios) / [`from_ratios_labeled`](Self::from_ratios_labeled):
///   probabilities proportional to non-negative real ratios.
/// - [`uniform`](Self::uniform) / [`uniform_labeled`](Self::uniform_labeled):
///   equal mass on every outcome.
///
/// Invariants
/// ----------
/// - At least one outcome, at least one positive count/ratio.
/// - Labels, when present, are unique and exactly `n` long.
/// - Probabilities sum to one up to rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MultivariateRepr")]
pub struct MultivariateConstant {
    probabilities: Vec<f64>,
    labels: Option<Vec<String>>,
    #[serde(skip)]
    label_index: HashMap<String, usize>,
}

#[derive(Deserialize)]
struct MultivariateRepr {
    probabilities: Vec<f64>,
    labels: Option<Vec<String>>,
}

impl TryFrom<MultivariateRepr> for MultivariateConstant {
    type Error = DistError;

    fn try_from(repr: MultivariateRepr) -> DistResult<Self> {
        for &p in &repr.probabilities {
            validate_probability(p)?;
        }
        let total = validate_ratios(&repr.probabilities)?;
        if (total - 1.0).abs() > NORMALIZATION_TOLERANCE {
            return Err(DistError::InvalidProbability { value: total });
        }
        Self::from_parts(repr.probabilities, repr.labels)
    }
}

impl MultivariateConstant {
    /// Probabilities proportional to `counts`.
    ///
    /// # Errors
    /// - [`DistError::EmptyOutcomeSet`] for an empty slice.
    /// - [`DistError::NoPositiveMass`] when every count is zero.
    pub fn from_counts(counts: &[u64]) -> DistResult<Self> {
        Self::from_ratios(&counts_as_ratios(counts))
    }

    /// Labeled variant of [`from_counts`](Self::from_counts).
    ///
    /// # Errors
    /// As `from_counts`, plus label length and uniqueness failures.
    pub fn from_counts_labeled(counts: &[u64], labels: Vec<String>) -> DistResult<Self> {
        Self::from_ratios_labeled(&counts_as_ratios(counts), labels)
    }

    /// Probabilities proportional to non-negative `ratios`.
    ///
    /// # Errors
    /// - [`DistError::InvalidRatio`] for a negative or non-finite entry.
    /// - [`DistError::EmptyOutcomeSet`] / [`DistError::NoPositiveMass`].
    pub fn from_ratios(ratios: &[f64]) -> DistResult<Self> {
        let probabilities = normalize(ratios)?;
        Self::from_parts(probabilities, None)
    }

    /// Labeled variant of [`from_ratios`](Self::from_ratios).
    pub fn from_ratios_labeled(ratios: &[f64], labels: Vec<String>) -> DistResult<Self> {
        let probabilities = normalize(ratios)?;
        Self::from_parts(probabilities, Some(labels))
    }

    /// Uniform distribution over `num_dimensions` unlabeled outcomes.
    ///
    /// # Errors
    /// [`DistError::EmptyOutcomeSet`] when `num_dimensions == 0`.
    pub fn uniform(num_dimensions: usize) -> DistResult<Self> {
        Self::from_ratios(&vec![1.0; num_dimensions])
    }

    /// Uniform distribution over the given labels.
    pub fn uniform_labeled(labels: Vec<String>) -> DistResult<Self> {
        Self::from_ratios_labeled(&vec![1.0; labels.len()], labels)
    }

    fn from_parts(probabilities: Vec<f64>, labels: Option<Vec<String>>) -> DistResult<Self> {
        if probabilities.is_empty() {
            return Err(DistError::EmptyOutcomeSet);
        }
        let label_index = match &labels {
            Some(ls) => index_labels(ls, probabilities.len())?,
            None => HashMap::new(),
        };
        Ok(Self { probabilities, labels, label_index })
    }

    pub fn num_dimensions(&self) -> usize {
        self.probabilities.len()
    }

    /// Per-outcome probabilities, indexed by outcome.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    /// Label of `outcome`, if labeled and in range.
    pub fn label(&self, outcome: usize) -> Option<&str> {
        self.labels.as_ref().and_then(|ls| ls.get(outcome)).map(String::as_str)
    }

    /// Outcome index of `label`, if known.
    pub fn outcome(&self, label: &str) -> Option<usize> {
        self.label_index.get(label).copied()
    }

    /// # Errors
    /// [`DistError::UnknownLabel`] if the label is not part of this distribution.
    pub fn probability_of_label(&self, label: &str) -> DistResult<f64> {
        self.outcome(label)
            .map(|o| self.probabilities[o])
            .ok_or_else(|| DistError::UnknownLabel { label: label.to_string() })
    }
}

fn counts_as_ratios(counts: &[u64]) -> Vec<f64> {
    counts.iter().map(|&c| c as f64).collect()
}

fn normalize(ratios: &[f64]) -> DistResult<Vec<f64>> {
    let total = validate_ratios(ratios)?;
    Ok(ratios.iter().map(|&r| r / total).collect())
}

impl DiscreteDistribution for MultivariateConstant {
    fn min_outcome(&self) -> i64 {
        0
    }

    fn max_outcome(&self) -> Option<i64> {
        Some(self.probabilities.len() as i64 - 1)
    }

    fn probability(&self, outcome: i64) -> f64 {
        if outcome < 0 {
            return 0.0;
        }
        self.probabilities.get(outcome as usize).copied().unwrap_or(0.0)
    }
}

impl Persist for MultivariateConstant {
    const TAG: u8 = 0x05;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    // Purpose
    // -------
    // Counts are normalized and labels map both ways.
    //
    // Given
    // -----
    // - Counts [1, 3, 0, 4] labeled a, b, c, d.
    //
    // Expect
    // ------
    // - p(b) = 3/8, p(c) = 0 with log2 p(c) = -∞, labels round-trip.
    fn counts_are_normalized_and_labels_map_both_ways() {
        // Arrange
        let d =
            MultivariateConstant::from_counts_labeled(&[1, 3, 0, 4], labels(&["a", "b", "c", "d"]))
                .unwrap();

        // Act / Assert
        assert_eq!(d.num_dimensions(), 4);
        assert_relative_eq!(d.probability_of_label("b").unwrap(), 0.375);
        assert_eq!(d.probability(2), 0.0);
        assert_eq!(d.log2_probability(2), f64::NEG_INFINITY);
        for o in 0..4 {
            let label = d.label(o).unwrap();
            assert_eq!(d.outcome(label), Some(o));
        }
        assert_eq!(d.outcome("z"), None);
        assert!(matches!(d.probability_of_label("z"), Err(DistError::UnknownLabel { .. })));
        let total: f64 = (0..4).map(|o| d.probability(o)).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn uniform_has_maximal_entropy() {
        let d = MultivariateConstant::uniform(8).unwrap();
        assert_relative_eq!(d.entropy(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(d.mean(), 3.5, epsilon = 1e-12);
        assert_eq!(d.label(0), None);
    }

    #[test]
    // Purpose
    // -------
    // Every construction invariant is enforced.
    fn construction_invariants() {
        assert_eq!(MultivariateConstant::uniform(0), Err(DistError::EmptyOutcomeSet));
        assert_eq!(MultivariateConstant::from_counts(&[0, 0]), Err(DistError::NoPositiveMass));
        assert_eq!(
            MultivariateConstant::from_ratios(&[0.5, -0.1]),
            Err(DistError::InvalidRatio { index: 1, value: -0.1 })
        );
        assert_eq!(
            MultivariateConstant::from_counts_labeled(&[1, 1], labels(&["x"])),
            Err(DistError::LabelLengthMismatch { expected: 2, found: 1 })
        );
        assert_eq!(
            MultivariateConstant::uniform_labeled(labels(&["x", "x"])),
            Err(DistError::DuplicateLabel { label: "x".into() })
        );
    }

    #[test]
    fn persist_round_trip_rebuilds_label_index() {
        let d = MultivariateConstant::from_ratios_labeled(&[0.2, 0.3, 0.5], labels(&["p", "q", "r"]))
            .unwrap();
        let back = MultivariateConstant::from_bytes(&d.to_bytes().unwrap()).unwrap();
        assert_eq!(back, d);
        assert_eq!(back.outcome("r"), Some(2));
    }
}
