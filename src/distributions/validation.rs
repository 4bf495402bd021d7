//! distributions::validation — shared input guards for distribution builders.
//!
//! Purpose
//! -------
//! Centralize the checks every constructor in this subtree performs, so that
//! probabilities, ratios, label arrays, and outcome ranges are rejected with
//! the same [`DistError`] variants wherever they enter the crate.
//!
//! Conventions
//! -----------
//! - All helpers are side-effect free and return `DistResult<()>` (or a
//!   derived value) instead of panicking.
//! - Deserialization goes through the same helpers via the `try_from`
//!   representations, so decoded values obey identical invariants.

use std::collections::{HashMap, HashSet};

use crate::distributions::errors::{DistError, DistResult};

/// Validate a single probability: finite and in `[0, 1]`.
pub fn validate_probability(p: f64) -> DistResult<()> {
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Err(DistError::InvalidProbability { value: p });
    }
    Ok(())
}

/// Validate an inclusive outcome range `[min, max]`.
pub fn validate_outcome_range(min: i64, max: i64) -> DistResult<()> {
    if max < min {
        return Err(DistError::InvalidOutcomeRange { min, max });
    }
    Ok(())
}

/// Validate non-negative ratios with at least one positive entry, returning
/// their sum.
pub fn validate_ratios(ratios: &[f64]) -> DistResult<f64> {
    if ratios.is_empty() {
        return Err(DistError::EmptyOutcomeSet);
    }
    let mut total = 0.0;
    for (index, &value) in ratios.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(DistError::InvalidRatio { index, value });
        }
        total += value;
    }
    if total <= 0.0 || !total.is_finite() {
        return Err(DistError::NoPositiveMass);
    }
    Ok(total)
}

/// Validate an optional label array against a dimensionality and build the
/// reverse lookup table.
///
/// # Errors
/// - [`DistError::LabelLengthMismatch`] when `labels.len() != dims`.
/// - [`DistError::DuplicateLabel`] for the first repeated label.
pub fn index_labels(labels: &[String], dims: usize) -> DistResult<HashMap<String, usize>> {
    if labels.len() != dims {
        return Err(DistError::LabelLengthMismatch { expected: dims, found: labels.len() });
    }
    let mut index = HashMap::with_capacity(labels.len());
    for (i, label) in labels.iter().enumerate() {
        if index.insert(label.clone(), i).is_some() {
            return Err(DistError::DuplicateLabel { label: label.clone() });
        }
    }
    Ok(index)
}

/// Validate that labels are unique without building an index.
pub fn validate_unique_labels(labels: &[String]) -> DistResult<()> {
    let mut seen = HashSet::with_capacity(labels.len());
    for label in labels {
        if !seen.insert(label.as_str()) {
            return Err(DistError::DuplicateLabel { label: label.clone() });
        }
    }
    Ok(())
}

/// Observation counts must be at least one.
pub fn validate_count(count: u64) -> DistResult<()> {
    if count == 0 {
        return Err(DistError::InvalidWeight { value: 0.0 });
    }
    Ok(())
}

/// Validate an observation weight: finite and strictly positive.
pub fn validate_weight(weight: f64) -> DistResult<()> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(DistError::InvalidWeight { value: weight });
    }
    Ok(())
}
