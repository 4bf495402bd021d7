//! distributions::errors — error surface for distributions and estimators.
//!
//! Purpose
//! -------
//! Provide [`DistError`] and [`DistResult`] as the canonical error and result
//! types for constructing discrete distributions, evaluating the few
//! operations that can fail (binomial coefficients, z-scores, multinomial
//! count vectors), and mutating incremental estimators.
//!
//! Key behaviors
//! -------------
//! - Attach human-readable `Display` messages that embed the offending value
//!   so diagnostics are meaningful without extra context.
//! - Classify every variant into the crate-wide [`ErrorKind`] taxonomy:
//!   malformed inputs are `InvalidArgument`, operations on empty or
//!   exhausted estimators are `InvalidState`.
//!
//! Conventions
//! -----------
//! - A zero probability is *not* an error anywhere in this subtree;
//!   `log2_probability` returns `-∞` instead.
//! - Errors are small and `Clone`, so they can be stored or compared in
//!   tests.

use crate::errors::ErrorKind;

pub type DistResult<T> = Result<T, DistError>;

/// DistError — error conditions for distributions and estimators.
#[derive(Debug, Clone, PartialEq)]
pub enum DistError {
    // ---- Construction ----
    /// Probability outside `[0, 1]` or non-finite.
    InvalidProbability { value: f64 },
    /// Outcome range with `max < min`.
    InvalidOutcomeRange { min: i64, max: i64 },
    /// Poisson rate must be finite and non-negative.
    InvalidRate { value: f64 },
    /// Ratio entry negative or non-finite.
    InvalidRatio { index: usize, value: f64 },
    /// Counts or ratios must contain at least one positive entry.
    NoPositiveMass,
    /// Categorical distributions need at least one outcome.
    EmptyOutcomeSet,
    /// Label array length disagrees with dimensionality.
    LabelLengthMismatch { expected: usize, found: usize },
    /// Labels must be unique.
    DuplicateLabel { label: String },

    // ---- Evaluation ----
    /// `log2_binomial_coefficient(n, k)` requires `0 <= k <= n`.
    InvalidBinomialArguments { n: i64, k: i64 },
    /// `z(p, k, n)` requires `p ∈ (0, 1)` finite and `0 <= k <= n`.
    InvalidZScoreArguments { p: f64, k: i64, n: i64 },
    /// Count vector length disagrees with the categorical basis.
    CountLengthMismatch { expected: usize, found: usize },
    /// A count total would exceed `u64::MAX`.
    CountOverflow,

    // ---- Estimators ----
    /// Observation weight must be finite and strictly positive.
    InvalidWeight { value: f64 },
    /// Observation value must be finite.
    InvalidObservation { value: f64 },
    /// Label not known to the estimator.
    UnknownLabel { label: String },
    /// Outcome index past the estimator's dimensionality.
    UnknownOutcome { outcome: usize, num_dimensions: usize },
    /// Query requires at least one observation.
    NoObservations,
    /// Unbiased variance needs total weight greater than one.
    InsufficientObservations { weight: f64 },
    /// Removing more than was recorded.
    RemovalExceedsRecorded { requested: f64, recorded: f64 },
}

impl DistError {
    /// Classify this error into the crate-wide taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DistError::NoObservations
            | DistError::InsufficientObservations { .. }
            | DistError::RemovalExceedsRecorded { .. } => ErrorKind::InvalidState,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

impl std::error::Error for DistError {}

impl std::fmt::Display for DistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Construction ----
            DistError::InvalidProbability { value } => {
                write!(f, "Invalid probability {value}: must be finite and in [0, 1]")
            }
            DistError::InvalidOutcomeRange { min, max } => {
                write!(f, "Invalid outcome range [{min}, {max}]: max must be >= min")
            }
            DistError::InvalidRate { value } => {
                write!(f, "Invalid Poisson rate {value}: must be finite and >= 0")
            }
            DistError::InvalidRatio { index, value } => {
                write!(f, "Invalid ratio at index {index}: {value}, must be finite and >= 0")
            }
            DistError::NoPositiveMass => {
                write!(f, "Counts or ratios must contain at least one positive entry")
            }
            DistError::EmptyOutcomeSet => write!(f, "Need at least one outcome"),
            DistError::LabelLengthMismatch { expected, found } => {
                write!(f, "Label length mismatch: expected {expected}, found {found}")
            }
            DistError::DuplicateLabel { label } => write!(f, "Duplicate label '{label}'"),

            // ---- Evaluation ----
            DistError::InvalidBinomialArguments { n, k } => {
                write!(f, "Invalid binomial coefficient arguments n={n}, k={k}: need 0 <= k <= n")
            }
            DistError::InvalidZScoreArguments { p, k, n } => {
                write!(
                    f,
                    "Invalid z-score arguments p={p}, k={k}, n={n}: need p in (0, 1) and 0 <= k <= n"
                )
            }
            DistError::CountLengthMismatch { expected, found } => {
                write!(f, "Count vector length mismatch: expected {expected}, found {found}")
            }
            DistError::CountOverflow => write!(f, "Count total exceeds {}", u64::MAX),

            // ---- Estimators ----
            DistError::InvalidWeight { value } => {
                write!(f, "Invalid weight {value}: must be finite and > 0")
            }
            DistError::InvalidObservation { value } => {
                write!(f, "Invalid observation {value}: must be finite")
            }
            DistError::UnknownLabel { label } => write!(f, "Unknown label '{label}'"),
            DistError::UnknownOutcome { outcome, num_dimensions } => {
                write!(f, "Unknown outcome {outcome}: estimator has {num_dimensions} outcomes")
            }
            DistError::NoObservations => write!(f, "No observations recorded"),
            DistError::InsufficientObservations { weight } => {
                write!(f, "Insufficient observations: total weight {weight} must exceed 1")
            }
            DistError::RemovalExceedsRecorded { requested, recorded } => {
                write!(f, "Cannot remove {requested}: only {recorded} recorded")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // `Display` embeds the offending payload.
    //
    // Given
    // -----
    // - `InvalidProbability { value: 1.5 }`.
    //
    // Expect
    // ------
    // - The message contains "1.5".
    fn invalid_probability_includes_payload_in_display() {
        // Arrange
        let err = DistError::InvalidProbability { value: 1.5 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("1.5"), "Display should include offending value.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Estimator-state failures are classified as `InvalidState`; malformed
    // inputs as `InvalidArgument`.
    fn kind_separates_state_from_argument_errors() {
        assert_eq!(DistError::NoObservations.kind(), ErrorKind::InvalidState);
        assert_eq!(
            DistError::RemovalExceedsRecorded { requested: 2.0, recorded: 1.0 }.kind(),
            ErrorKind::InvalidState
        );
        assert_eq!(DistError::InvalidRate { value: -1.0 }.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            DistError::InvalidBinomialArguments { n: 2, k: 3 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(DistError::CountOverflow.kind(), ErrorKind::InvalidArgument);
    }
}
