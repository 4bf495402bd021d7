//! Compiled multinomial logistic-regression classifier.
//!
//! Purpose
//! -------
//! Hold a fitted weight matrix and turn feature vectors into class
//! probabilities:
//!
//! ```text
//! P(c = k | x) = exp(w_k · x) / Σ_j exp(w_j · x),   w_{K-1} ≡ 0
//! ```
//!
//! Key behaviors
//! -------------
//! - The weight matrix has one row per non-reference class (`K - 1` rows)
//!   and one column per input dimension. The last class is the reference
//!   class with an implicit all-zero weight vector.
//! - Softmax is shifted by the maximum score, so large weights neither
//!   overflow nor produce NaN.
//! - Values are immutable once built; [`crate::regression::trainer`] produces
//!   new classifiers instead of mutating old ones.
//!
//! Invariants
//! ----------
//! - At least one row and one column; every weight finite. Enforced on
//!   construction and again on decode.

use ndarray::{Array1, Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::{
    persistence::Persist,
    regression::{
        data::TrainingData,
        errors::{RegressionError, RegressionResult},
        vectors::FeatureVector,
    },
    utils::{ln_to_log2, log_sum_exp},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LogisticRepr")]
pub struct LogisticRegression {
    weights: Array2<f64>,
}

#[derive(Deserialize)]
struct LogisticRepr {
    weights: Array2<f64>,
}

impl TryFrom<LogisticRepr> for LogisticRegression {
    type Error = RegressionError;

    fn try_from(repr: LogisticRepr) -> RegressionResult<Self> {
        Self::new(repr.weights)
    }
}

impl LogisticRegression {
    /// Wrap a `(K - 1) × D` weight matrix.
    ///
    /// # Errors
    /// - [`RegressionError::EmptyWeights`] with zero rows or columns.
    /// - [`RegressionError::NonFiniteWeight`] for the first NaN/∞ entry.
    pub fn new(weights: Array2<f64>) -> RegressionResult<Self> {
        if weights.nrows() == 0 || weights.ncols() == 0 {
            return Err(RegressionError::EmptyWeights);
        }
        for ((row, col), &value) in weights.indexed_iter() {
            if !value.is_finite() {
                return Err(RegressionError::NonFiniteWeight { row, col, value });
            }
        }
        Ok(Self { weights })
    }

    /// All-zero classifier: uniform probabilities for every input.
    ///
    /// # Errors
    /// - [`RegressionError::TooFewOutcomes`] when `num_outcomes < 2`.
    /// - [`RegressionError::EmptyWeights`] when `num_dimensions == 0`.
    pub fn zero(num_outcomes: usize, num_dimensions: usize) -> RegressionResult<Self> {
        if num_outcomes < 2 {
            return Err(RegressionError::TooFewOutcomes { value: num_outcomes });
        }
        Self::new(Array2::zeros((num_outcomes - 1, num_dimensions)))
    }

    pub fn num_outcomes(&self) -> usize {
        self.weights.nrows() + 1
    }

    pub fn num_input_dimensions(&self) -> usize {
        self.weights.ncols()
    }

    /// Read-only view of the `(K - 1) × D` weight matrix.
    pub fn weight_vectors(&self) -> ArrayView2<'_, f64> {
        self.weights.view()
    }

    /// Weight vector of class `k`; the reference class gets zeros.
    ///
    /// # Errors
    /// [`RegressionError::OutcomeOutOfRange`] when `k >= num_outcomes()`.
    pub fn weight_vector(&self, k: usize) -> RegressionResult<Array1<f64>> {
        if k >= self.num_outcomes() {
            return Err(RegressionError::OutcomeOutOfRange {
                outcome: k,
                num_outcomes: self.num_outcomes(),
            });
        }
        if k == self.weights.nrows() {
            return Ok(Array1::zeros(self.num_input_dimensions()));
        }
        Ok(self.weights.row(k).to_owned())
    }

    /// Class probabilities for `x`, summing to one.
    ///
    /// # Errors
    /// [`RegressionError::InputDimMismatch`] when `x` has the wrong
    /// dimensionality.
    pub fn classify<V: FeatureVector>(&self, x: &V) -> RegressionResult<Array1<f64>> {
        self.check_input(x)?;
        let mut probs = vec![0.0; self.num_outcomes()];
        softmax_into(self.weights.view(), x, &mut probs);
        Ok(Array1::from(probs))
    }

    /// `log2 P(c | x)`.
    ///
    /// # Errors
    /// - [`RegressionError::InputDimMismatch`] for a wrongly sized `x`.
    /// - [`RegressionError::OutcomeOutOfRange`] when `c >= num_outcomes()`.
    pub fn log2_conditional_probability<V: FeatureVector>(
        &self, x: &V, c: usize,
    ) -> RegressionResult<f64> {
        self.check_input(x)?;
        if c >= self.num_outcomes() {
            return Err(RegressionError::OutcomeOutOfRange {
                outcome: c,
                num_outcomes: self.num_outcomes(),
            });
        }
        let mut scores = vec![0.0; self.num_outcomes()];
        scores_into(self.weights.view(), x, &mut scores);
        Ok(ln_to_log2(scores[c] - log_sum_exp(&scores)))
    }

    /// Total `log2` likelihood of a labeled dataset.
    ///
    /// # Errors
    /// - [`RegressionError::InputDimMismatch`] on a dimensionality mismatch.
    /// - [`RegressionError::OutcomeOutOfRange`] when the data has more
    ///   outcomes than the classifier.
    pub fn log2_likelihood<V: FeatureVector>(&self, data: &TrainingData<V>) -> RegressionResult<f64> {
        if data.num_dimensions() != self.num_input_dimensions() {
            return Err(RegressionError::InputDimMismatch {
                expected: self.num_input_dimensions(),
                found: data.num_dimensions(),
            });
        }
        if data.num_outcomes() > self.num_outcomes() {
            return Err(RegressionError::OutcomeOutOfRange {
                outcome: data.num_outcomes() - 1,
                num_outcomes: self.num_outcomes(),
            });
        }
        Ok(ln_to_log2(ln_likelihood(self.weights.view(), data)))
    }

    fn check_input<V: FeatureVector>(&self, x: &V) -> RegressionResult<()> {
        if x.num_dimensions() != self.num_input_dimensions() {
            return Err(RegressionError::InputDimMismatch {
                expected: self.num_input_dimensions(),
                found: x.num_dimensions(),
            });
        }
        Ok(())
    }
}

impl Persist for LogisticRegression {
    const TAG: u8 = 0x20;
}

/// Linear scores `w_k · x`, with the reference class at 0.
///
/// `out.len()` must equal `weights.nrows() + 1`.
pub(crate) fn scores_into<V: FeatureVector>(weights: ArrayView2<'_, f64>, x: &V, out: &mut [f64]) {
    for (k, row) in weights.rows().into_iter().enumerate() {
        out[k] = x.dot(row);
    }
    out[weights.nrows()] = 0.0;
}

/// Max-shifted softmax of the linear scores.
pub(crate) fn softmax_into<V: FeatureVector>(weights: ArrayView2<'_, f64>, x: &V, out: &mut [f64]) {
    scores_into(weights, x, out);
    let max = out.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut total = 0.0;
    for s in out.iter_mut() {
        *s = (*s - max).exp();
        total += *s;
    }
    for p in out.iter_mut() {
        *p /= total;
    }
}

/// Natural-log likelihood `Σᵢ ln P(cᵢ | xᵢ)`.
pub(crate) fn ln_likelihood<V: FeatureVector>(
    weights: ArrayView2<'_, f64>, data: &TrainingData<V>,
) -> f64 {
    let mut scores = vec![0.0; weights.nrows() + 1];
    data.iter()
        .map(|(x, c)| {
            scores_into(weights, x, &mut scores);
            scores[c] - log_sum_exp(&scores)
        })
        .sum()
}
