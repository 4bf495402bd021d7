//! Feature vectors consumed by the trainer and classifier.
//!
//! Purpose
//! -------
//! Let training and classification run over dense and sparse inputs through
//! one small contract, [`FeatureVector`], so the per-instance work is
//! proportional to the stored entries rather than the full dimensionality.
//!
//! Key behaviors
//! -------------
//! - Dense inputs are plain `ndarray::Array1<f64>`.
//! - [`SparseVector`] keeps sorted `(index, value)` pairs.
//! - [`FeatureVec`] mixes both in one dataset.
//!
//! Conventions
//! -----------
//! - `value(i)` is 0 for `i >= num_dimensions()`.
//! - `dot` assumes `weights.len() == num_dimensions()`; datasets validate
//!   dimensionality once up front so the hot loop does not.

use std::ops::Range;

use ndarray::{Array1, ArrayView1};

use crate::regression::errors::{RegressionError, RegressionResult};

pub trait FeatureVector {
    fn num_dimensions(&self) -> usize;

    /// Coordinate `i`, or 0 past the end.
    fn value(&self, i: usize) -> f64;

    /// Inner product with a dense weight vector of the same length.
    fn dot(&self, weights: ArrayView1<'_, f64>) -> f64;

    /// Visit every stored coordinate whose index lies in `range`, in
    /// increasing index order. Dense vectors visit every index; sparse
    /// vectors skip implicit zeros.
    fn for_each_in_range<F: FnMut(usize, f64)>(&self, range: Range<usize>, f: F);
}

impl FeatureVector for Array1<f64> {
    fn num_dimensions(&self) -> usize {
        self.len()
    }

    fn value(&self, i: usize) -> f64 {
        self.get(i).copied().unwrap_or(0.0)
    }

    fn dot(&self, weights: ArrayView1<'_, f64>) -> f64 {
        self.view().dot(&weights)
    }

    fn for_each_in_range<F: FnMut(usize, f64)>(&self, range: Range<usize>, mut f: F) {
        let end = range.end.min(self.len());
        for i in range.start..end {
            f(i, self[i]);
        }
    }
}

/// Sparse vector of sorted, unique `(index, value)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    num_dimensions: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Build from unsorted entries.
    ///
    /// # Errors
    /// [`RegressionError::InvalidSparseEntry`] for an index outside
    /// `0..num_dimensions`, a repeated index, or a non-finite value.
    pub fn new(num_dimensions: usize, mut entries: Vec<(usize, f64)>) -> RegressionResult<Self> {
        entries.sort_by_key(|&(i, _)| i);
        let mut indices = Vec::with_capacity(entries.len());
        let mut values = Vec::with_capacity(entries.len());
        for (i, v) in entries {
            if i >= num_dimensions {
                return Err(RegressionError::InvalidSparseEntry {
                    index: i,
                    value: v,
                    reason: "Index past the vector's dimensionality.",
                });
            }
            if !v.is_finite() {
                return Err(RegressionError::InvalidSparseEntry {
                    index: i,
                    value: v,
                    reason: "Value must be finite.",
                });
            }
            if indices.last() == Some(&i) {
                return Err(RegressionError::InvalidSparseEntry {
                    index: i,
                    value: v,
                    reason: "Index appears more than once.",
                });
            }
            indices.push(i);
            values.push(v);
        }
        Ok(Self { num_dimensions, indices, values })
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }
}

impl FeatureVector for SparseVector {
    fn num_dimensions(&self) -> usize {
        self.num_dimensions
    }

    fn value(&self, i: usize) -> f64 {
        match self.indices.binary_search(&i) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    fn dot(&self, weights: ArrayView1<'_, f64>) -> f64 {
        self.entries().map(|(i, v)| v * weights[i]).sum()
    }

    fn for_each_in_range<F: FnMut(usize, f64)>(&self, range: Range<usize>, mut f: F) {
        let start = self.indices.partition_point(|&i| i < range.start);
        for pos in start..self.indices.len() {
            let i = self.indices[pos];
            if i >= range.end {
                break;
            }
            f(i, self.values[pos]);
        }
    }
}

/// Dense or sparse feature vector.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureVec {
    Dense(Array1<f64>),
    Sparse(SparseVector),
}

impl FeatureVector for FeatureVec {
    fn num_dimensions(&self) -> usize {
        match self {
            FeatureVec::Dense(v) => v.num_dimensions(),
            FeatureVec::Sparse(v) => v.num_dimensions(),
        }
    }

    fn value(&self, i: usize) -> f64 {
        match self {
            FeatureVec::Dense(v) => v.value(i),
            FeatureVec::Sparse(v) => v.value(i),
        }
    }

    fn dot(&self, weights: ArrayView1<'_, f64>) -> f64 {
        match self {
            FeatureVec::Dense(v) => FeatureVector::dot(v, weights),
            FeatureVec::Sparse(v) => v.dot(weights),
        }
    }

    fn for_each_in_range<F: FnMut(usize, f64)>(&self, range: Range<usize>, f: F) {
        match self {
            FeatureVec::Dense(v) => v.for_each_in_range(range, f),
            FeatureVec::Sparse(v) => v.for_each_in_range(range, f),
        }
    }
}

impl From<Array1<f64>> for FeatureVec {
    fn from(v: Array1<f64>) -> Self {
        FeatureVec::Dense(v)
    }
}

impl From<SparseVector> for FeatureVec {
    fn from(v: SparseVector) -> Self {
        FeatureVec::Sparse(v)
    }
}
