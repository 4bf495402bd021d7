//! Weighted Welford accumulator with exact-inverse removal.
//!
//! Maintains total weight `W`, running mean `μ`, and the centered sum of
//! squares `M₂ = Σ wᵢ (xᵢ - μ)²`. Adding `(x, w)`:
//!
//! ```text
//! W' = W + w
//! μ' = μ + w (x - μ) / W'
//! M₂' = M₂ + w (x - μ)(x - μ')
//! ```
//!
//! The state before the most recent `add` is kept, so a `remove` of that
//! same pair restores it bit for bit. Any other removal runs the update
//! backwards and is exact only up to rounding. Removing the last of the
//! recorded weight resets to the empty state exactly.

use serde::{Deserialize, Serialize};

use crate::distributions::{
    errors::{DistError, DistResult},
    validation::validate_weight,
};

/// Relative slack when deciding whether a removal empties the accumulator.
const REMOVAL_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct OnlineMoments {
    weight: f64,
    mean: f64,
    m2: f64,
    #[serde(skip)]
    last_add: Option<LastAdd>,
}

/// The most recent `add` and the moments it replaced.
#[derive(Debug, Clone, Copy)]
struct LastAdd {
    x: f64,
    w: f64,
    weight: f64,
    mean: f64,
    m2: f64,
}

impl PartialEq for OnlineMoments {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.mean == other.mean && self.m2 == other.m2
    }
}

impl OnlineMoments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record observation `x` with weight `w`.
    ///
    /// # Errors
    /// - [`DistError::InvalidObservation`] for non-finite `x`.
    /// - [`DistError::InvalidWeight`] unless `w` is finite and positive.
    pub fn add(&mut self, x: f64, w: f64) -> DistResult<()> {
        if !x.is_finite() {
            return Err(DistError::InvalidObservation { value: x });
        }
        validate_weight(w)?;
        self.last_add =
            Some(LastAdd { x, w, weight: self.weight, mean: self.mean, m2: self.m2 });
        let weight = self.weight + w;
        let delta = x - self.mean;
        let mean = self.mean + delta * w / weight;
        self.m2 += w * delta * (x - mean);
        self.mean = mean;
        self.weight = weight;
        Ok(())
    }

    /// Undo a previous `add(x, w)`.
    ///
    /// # Errors
    /// - [`DistError::RemovalExceedsRecorded`] if `w` exceeds the recorded
    ///   total weight.
    /// - Validation errors as for [`add`](Self::add).
    pub fn remove(&mut self, x: f64, w: f64) -> DistResult<()> {
        if !x.is_finite() {
            return Err(DistError::InvalidObservation { value: x });
        }
        validate_weight(w)?;
        let mirrored = |l: &LastAdd| l.x.to_bits() == x.to_bits() && l.w.to_bits() == w.to_bits();
        if let Some(last) = self.last_add.filter(mirrored) {
            *self = Self { weight: last.weight, mean: last.mean, m2: last.m2, last_add: None };
            return Ok(());
        }
        let slack = REMOVAL_TOLERANCE * self.weight.max(1.0);
        if w > self.weight + slack {
            return Err(DistError::RemovalExceedsRecorded { requested: w, recorded: self.weight });
        }
        self.last_add = None;
        if w >= self.weight - slack {
            *self = Self::default();
            return Ok(());
        }
        let weight = self.weight - w;
        let mean = (self.weight * self.mean - w * x) / weight;
        self.m2 = (self.m2 - w * (x - mean) * (x - self.mean)).max(0.0);
        self.mean = mean;
        self.weight = weight;
        Ok(())
    }

    /// Total recorded weight (the sample count for unit weights).
    pub fn num_samples(&self) -> f64 {
        self.weight
    }

    pub fn is_empty(&self) -> bool {
        self.weight == 0.0
    }

    /// # Errors
    /// [`DistError::NoObservations`] when empty.
    pub fn mean(&self) -> DistResult<f64> {
        self.require_observations()?;
        Ok(self.mean)
    }

    /// Population variance `M₂ / W`.
    ///
    /// # Errors
    /// [`DistError::NoObservations`] when empty.
    pub fn variance(&self) -> DistResult<f64> {
        self.require_observations()?;
        Ok(self.m2 / self.weight)
    }

    /// Sample-corrected variance `M₂ / (W - 1)`.
    ///
    /// # Errors
    /// [`DistError::InsufficientObservations`] when `W <= 1`.
    pub fn variance_unbiased(&self) -> DistResult<f64> {
        if self.weight <= 1.0 {
            return Err(DistError::InsufficientObservations { weight: self.weight });
        }
        Ok(self.m2 / (self.weight - 1.0))
    }

    pub fn standard_deviation(&self) -> DistResult<f64> {
        self.variance().map(f64::sqrt)
    }

    fn require_observations(&self) -> DistResult<()> {
        if self.is_empty() {
            return Err(DistError::NoObservations);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // Running moments match the two-pass formulas.
    //
    // Given
    // -----
    // - Observations 2, 4, 4, 4, 5, 5, 7, 9 with unit weight.
    //
    // Expect
    // ------
    // - mean = 5, population variance = 4, unbiased = 32/7.
    fn matches_two_pass_formulas() {
        let mut m = OnlineMoments::new();
        for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            m.add(x, 1.0).unwrap();
        }
        assert_eq!(m.num_samples(), 8.0);
        assert_relative_eq!(m.mean().unwrap(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(m.variance().unwrap(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(m.variance_unbiased().unwrap(), 32.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(m.standard_deviation().unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // A weight-w observation is equivalent to w unit observations.
    fn weights_act_as_repeat_counts() {
        let mut weighted = OnlineMoments::new();
        weighted.add(1.0, 3.0).unwrap();
        weighted.add(4.0, 1.0).unwrap();

        let mut repeated = OnlineMoments::new();
        for x in [1.0, 1.0, 1.0, 4.0] {
            repeated.add(x, 1.0).unwrap();
        }
        assert_relative_eq!(weighted.mean().unwrap(), repeated.mean().unwrap(), epsilon = 1e-12);
        assert_relative_eq!(
            weighted.variance().unwrap(),
            repeated.variance().unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    // Purpose
    // -------
    // `add` then `remove` restores the previous state for any prefix.
    fn add_then_remove_restores_state() {
        let mut m = OnlineMoments::new();
        for (i, x) in [3.0, -1.5, 8.25, 0.0, 2.0].into_iter().enumerate() {
            let before = m;
            m.add(17.5, 2.0).unwrap();
            m.remove(17.5, 2.0).unwrap();
            assert_eq!(m.num_samples(), before.num_samples(), "step {i}");
            if !before.is_empty() {
                assert_relative_eq!(m.mean().unwrap(), before.mean().unwrap(), epsilon = 1e-12);
                assert_relative_eq!(
                    m.variance().unwrap(),
                    before.variance().unwrap(),
                    epsilon = 1e-10
                );
            } else {
                assert!(m.is_empty());
            }
            m.add(x, 1.0).unwrap();
        }
    }

    #[test]
    // Purpose
    // -------
    // Non-dyadic weights do not survive the backward update exactly, so the
    // mirrored removal must restore the saved state.
    //
    // Given
    // -----
    // - Observations with weights 0.1 and 0.2, then a mirrored add/remove
    //   of 0.1.
    //
    // Expect
    // ------
    // - Bitwise equal weight, mean and variance after the removal.
    fn mirrored_remove_is_bit_exact_with_non_dyadic_weights() {
        // Arrange
        let mut m = OnlineMoments::new();
        m.add(3.0, 0.1).unwrap();
        m.add(7.0, 0.2).unwrap();
        let before = m;

        // Act
        m.add(11.0, 0.1).unwrap();
        m.remove(11.0, 0.1).unwrap();

        // Assert
        assert_eq!(m, before);
        assert_eq!(m.num_samples().to_bits(), before.num_samples().to_bits());
        assert_eq!(m.mean().unwrap().to_bits(), before.mean().unwrap().to_bits());
        assert_eq!(m.variance().unwrap().to_bits(), before.variance().unwrap().to_bits());
    }

    #[test]
    // Purpose
    // -------
    // Removing something other than the last addition falls back to the
    // backward update and forgets the saved state.
    fn unmirrored_remove_uses_backward_update() {
        let mut m = OnlineMoments::new();
        m.add(2.0, 1.0).unwrap();
        m.add(4.0, 1.0).unwrap();
        m.remove(2.0, 1.0).unwrap();
        assert_eq!(m.num_samples(), 1.0);
        assert_relative_eq!(m.mean().unwrap(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(m.variance().unwrap(), 0.0, epsilon = 1e-12);

        // The mirrored pair restores weight 1; what remains empties it.
        m.add(6.0, 0.5).unwrap();
        m.remove(6.0, 0.5).unwrap();
        assert_eq!(m.num_samples(), 1.0);
        m.remove(4.0, 1.0).unwrap();
        assert!(m.is_empty());
    }

    #[test]
    fn empty_state_errors() {
        let mut m = OnlineMoments::new();
        assert_eq!(m.mean(), Err(DistError::NoObservations));
        assert_eq!(m.variance(), Err(DistError::NoObservations));
        assert!(matches!(m.variance_unbiased(), Err(DistError::InsufficientObservations { .. })));
        assert_eq!(
            m.remove(1.0, 1.0),
            Err(DistError::RemovalExceedsRecorded { requested: 1.0, recorded: 0.0 })
        );
        assert!(m.add(f64::NAN, 1.0).is_err());
        assert!(m.add(1.0, -1.0).is_err());
    }
}
