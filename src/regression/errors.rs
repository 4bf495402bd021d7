//! regression::errors — error surface for priors, training, and classifiers.
//!
//! Purpose
//! -------
//! Provide [`RegressionError`] and [`RegressionResult`] for every fallible
//! operation in the regression subtree: prior construction and lookup,
//! training-option validation, training-data validation, and classifier
//! construction and evaluation.
//!
//! Key behaviors
//! -------------
//! - Variants carry the offending value plus a short static `reason` where
//!   more than one rule can fail for the same field.
//! - [`RegressionError::kind`] maps each variant into [`ErrorKind`]:
//!   per-dimension lookups past an array are `OutOfRange`, persistence
//!   failures are `Persistence`, everything else is `InvalidArgument`.
//! - [`PersistError`] converts into [`RegressionError::Persistence`].

use crate::{errors::ErrorKind, persistence::PersistError};

/// Crate-wide result alias for regression operations.
pub type RegressionResult<T> = Result<T, RegressionError>;

#[derive(Debug, Clone, PartialEq)]
pub enum RegressionError {
    // ---- Priors ----
    /// Variance or scale must be finite and strictly positive.
    InvalidScale { index: Option<usize>, value: f64, reason: &'static str },
    /// Elastic-net mixing weight must be finite and in [0, 1].
    InvalidAlpha { value: f64 },
    /// Mixture weights must be finite and non-negative, with a positive sum.
    InvalidMixtureWeight { index: usize, value: f64 },
    /// A mixture needs at least one component.
    EmptyMixture,
    /// Mean offsets must be finite.
    InvalidMean { index: usize, value: f64 },
    /// Stacked mean offsets must have matching lengths.
    MeanLengthMismatch { expected: usize, found: usize },
    /// Per-dimension parameter requested past the end of its array.
    DimensionOutOfRange { dimension: usize, len: usize },

    // ---- Options ----
    /// Prior block size must be positive.
    InvalidBlockSize { value: usize },
    /// Learning rate (or annealing constant) must be finite and positive.
    InvalidLearningRate { value: f64, reason: &'static str },
    /// Minimum improvement must be finite and non-negative.
    InvalidMinImprovement { value: f64 },
    /// Rolling-average window must hold at least one epoch.
    InvalidRollingAverageSize { value: usize },
    /// Epoch bounds must satisfy `1 <= max_epochs` and `min_epochs <= max_epochs`.
    InvalidEpochBounds { min_epochs: usize, max_epochs: usize },

    // ---- Data ----
    /// Training needs at least one instance.
    EmptyData,
    /// Feature and label arrays must have equal length.
    LengthMismatch { features: usize, labels: usize },
    /// Labels must lie in `[0, num_outcomes)`.
    LabelOutOfRange { index: usize, label: usize, num_outcomes: usize },
    /// A classifier needs at least two outcomes.
    TooFewOutcomes { value: usize },
    /// Every feature vector in a dataset must have the same dimensionality.
    FeatureDimMismatch { index: usize, expected: usize, found: usize },
    /// Sparse entries must be in range, unique, and finite.
    InvalidSparseEntry { index: usize, value: f64, reason: &'static str },

    // ---- Classifier ----
    /// Weight matrices need at least one row and one column.
    EmptyWeights,
    /// Weights must be finite.
    NonFiniteWeight { row: usize, col: usize, value: f64 },
    /// Input dimensionality differs from the classifier's.
    InputDimMismatch { expected: usize, found: usize },
    /// Outcome index past the classifier's outcome count.
    OutcomeOutOfRange { outcome: usize, num_outcomes: usize },
    /// Hot-start classifier shape disagrees with the training problem.
    HotStartMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    // ---- Persistence ----
    Persistence(PersistError),
}

impl RegressionError {
    /// Classify this error into the crate-wide taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegressionError::DimensionOutOfRange { .. } => ErrorKind::OutOfRange,
            RegressionError::Persistence(_) => ErrorKind::Persistence,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

impl std::error::Error for RegressionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegressionError::Persistence(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for RegressionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Priors ----
            RegressionError::InvalidScale { index: Some(i), value, reason } => {
                write!(f, "Invalid prior scale at dimension {i}: {value}: {reason}")
            }
            RegressionError::InvalidScale { index: None, value, reason } => {
                write!(f, "Invalid prior scale {value}: {reason}")
            }
            RegressionError::InvalidAlpha { value } => {
                write!(f, "Invalid elastic-net alpha {value}, must be finite and in [0, 1]")
            }
            RegressionError::InvalidMixtureWeight { index, value } => {
                write!(
                    f,
                    "Invalid mixture weight at component {index}: {value}, must be finite and non-negative"
                )
            }
            RegressionError::EmptyMixture => {
                write!(f, "Prior mixture needs at least one component with positive weight")
            }
            RegressionError::InvalidMean { index, value } => {
                write!(f, "Invalid prior mean at dimension {index}: {value}, must be finite")
            }
            RegressionError::MeanLengthMismatch { expected, found } => {
                write!(f, "Prior mean length mismatch: expected {expected}, found {found}")
            }
            RegressionError::DimensionOutOfRange { dimension, len } => {
                write!(f, "Dimension {dimension} out of range for per-dimension array of length {len}")
            }

            // ---- Options ----
            RegressionError::InvalidBlockSize { value } => {
                write!(f, "Invalid prior block size {value}, must be positive")
            }
            RegressionError::InvalidLearningRate { value, reason } => {
                write!(f, "Invalid learning rate {value}: {reason}")
            }
            RegressionError::InvalidMinImprovement { value } => {
                write!(f, "Invalid minimum improvement {value}, must be finite and non-negative")
            }
            RegressionError::InvalidRollingAverageSize { value } => {
                write!(f, "Invalid rolling average size {value}, must be positive")
            }
            RegressionError::InvalidEpochBounds { min_epochs, max_epochs } => {
                write!(
                    f,
                    "Invalid epoch bounds: min_epochs = {min_epochs}, max_epochs = {max_epochs}"
                )
            }

            // ---- Data ----
            RegressionError::EmptyData => write!(f, "Training data is empty"),
            RegressionError::LengthMismatch { features, labels } => {
                write!(f, "Length mismatch: {features} feature vectors, {labels} labels")
            }
            RegressionError::LabelOutOfRange { index, label, num_outcomes } => {
                write!(
                    f,
                    "Label {label} at index {index} out of range for {num_outcomes} outcomes"
                )
            }
            RegressionError::TooFewOutcomes { value } => {
                write!(f, "Need at least two outcomes, got {value}")
            }
            RegressionError::FeatureDimMismatch { index, expected, found } => {
                write!(
                    f,
                    "Feature vector {index} has {found} dimensions, expected {expected}"
                )
            }
            RegressionError::InvalidSparseEntry { index, value, reason } => {
                write!(f, "Invalid sparse entry at dimension {index} ({value}): {reason}")
            }

            // ---- Classifier ----
            RegressionError::EmptyWeights => {
                write!(f, "Weight matrix needs at least one row and one column")
            }
            RegressionError::NonFiniteWeight { row, col, value } => {
                write!(f, "Non-finite weight at ({row}, {col}): {value}")
            }
            RegressionError::InputDimMismatch { expected, found } => {
                write!(f, "Input dimension mismatch: expected {expected}, found {found}")
            }
            RegressionError::OutcomeOutOfRange { outcome, num_outcomes } => {
                write!(f, "Outcome {outcome} out of range for {num_outcomes} outcomes")
            }
            RegressionError::HotStartMismatch { expected, found } => {
                write!(
                    f,
                    "Hot-start classifier shape {found:?} (outcomes, dimensions) does not match {expected:?}"
                )
            }

            // ---- Persistence ----
            RegressionError::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl From<PersistError> for RegressionError {
    fn from(err: PersistError) -> Self {
        RegressionError::Persistence(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Kinds follow the shared taxonomy.
    fn kinds_follow_taxonomy() {
        assert_eq!(
            RegressionError::DimensionOutOfRange { dimension: 3, len: 2 }.kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            RegressionError::InvalidEpochBounds { min_epochs: 5, max_epochs: 2 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            RegressionError::from(PersistError::BadMagic).kind(),
            ErrorKind::Persistence
        );
    }

    #[test]
    fn display_embeds_offending_values() {
        let msg = RegressionError::LabelOutOfRange { index: 4, label: 7, num_outcomes: 3 }.to_string();
        assert!(msg.contains('7') && msg.contains('4') && msg.contains('3'), "got {msg}");
    }
}
