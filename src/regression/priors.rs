//! Regularization priors over logistic-regression coefficients.
//!
//! Purpose
//! -------
//! Score a single coefficient `x` in dimension `d` under a prior and supply
//! the exact derivative of that score, so the trainer can add the prior's
//! contribution to the likelihood gradient one dimension at a time.
//!
//! Key behaviors
//! -------------
//! - [`RegressionPrior`] is a closed set of variants behind constructors:
//!   noninformative, Gaussian (L2), Laplace (L1), Cauchy, elastic net,
//!   weighted mixtures, and mean-shifted wrappers around any of these.
//! - Every scale-based variant takes either one shared scale or one scale
//!   per dimension ([`PriorScales`]).
//! - With `penalize_intercept = false`, dimension 0 scores 0 with gradient 0.
//!
//! Conventions
//! -----------
//! - `log_prior` is the *unnormalized* natural-log density (kernel only):
//!
//!   | variant     | `log_prior(x)`                       | `gradient(x)`        |
//!   |-------------|--------------------------------------|----------------------|
//!   | Gaussian    | `-x² / (2σ²)`                        | `-x / σ²`            |
//!   | Laplace     | `-|x| / b`                           | `-sign(x) / b`       |
//!   | Cauchy      | `-ln(1 + x² / s²)`                   | `-2x / (s² + x²)`    |
//!   | Elastic net | `α·Laplace(s) + (1-α)·Gaussian(σ²=s)`| same mixture         |
//!
//!   with `sign(0) = 0` for the Laplace subgradient.
//! - `log2_prior = log_prior / ln 2`.
//! - Constant normalizers are dropped; they do not move the optimum.

use ndarray::ArrayView2;

use crate::regression::errors::{RegressionError, RegressionResult};

/// One scale (variance for Gaussian) shared by all dimensions, or one per
/// dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum PriorScales {
    Shared(f64),
    PerDimension(Vec<f64>),
}

impl PriorScales {
    /// Scale for dimension `d`.
    ///
    /// # Errors
    /// [`RegressionError::DimensionOutOfRange`] past a per-dimension array.
    pub fn get(&self, d: usize) -> RegressionResult<f64> {
        match self {
            PriorScales::Shared(s) => Ok(*s),
            PriorScales::PerDimension(v) => v
                .get(d)
                .copied()
                .ok_or(RegressionError::DimensionOutOfRange { dimension: d, len: v.len() }),
        }
    }

    fn validate(&self) -> RegressionResult<()> {
        match self {
            PriorScales::Shared(s) => validate_scale(None, *s),
            PriorScales::PerDimension(v) => {
                v.iter().enumerate().try_for_each(|(i, &s)| validate_scale(Some(i), s))
            }
        }
    }

    fn len(&self) -> Option<usize> {
        match self {
            PriorScales::Shared(_) => None,
            PriorScales::PerDimension(v) => Some(v.len()),
        }
    }
}

/// A prior over coefficient vectors, applied dimension by dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionPrior {
    kind: PriorKind,
}

#[derive(Debug, Clone, PartialEq)]
enum PriorKind {
    Noninformative,
    Gaussian { variances: PriorScales, penalize_intercept: bool },
    Laplace { scales: PriorScales, penalize_intercept: bool },
    Cauchy { scales: PriorScales, penalize_intercept: bool },
    ElasticNet { alpha: f64, scales: PriorScales, penalize_intercept: bool },
    Mixture(Vec<(f64, RegressionPrior)>),
    Shifted { base: Box<RegressionPrior>, means: Vec<f64> },
}

impl Default for RegressionPrior {
    fn default() -> Self {
        Self::noninformative()
    }
}

impl RegressionPrior {
    /// Flat prior: zero score and zero gradient everywhere.
    pub fn noninformative() -> Self {
        Self { kind: PriorKind::Noninformative }
    }

    /// Gaussian (L2) prior with one shared variance.
    ///
    /// # Errors
    /// [`RegressionError::InvalidScale`] unless `variance` is finite and > 0.
    pub fn gaussian(variance: f64, penalize_intercept: bool) -> RegressionResult<Self> {
        Self::gaussian_with(PriorScales::Shared(variance), penalize_intercept)
    }

    /// Gaussian (L2) prior with a variance per dimension.
    pub fn gaussian_per_dimension(
        variances: Vec<f64>, penalize_intercept: bool,
    ) -> RegressionResult<Self> {
        Self::gaussian_with(PriorScales::PerDimension(variances), penalize_intercept)
    }

    fn gaussian_with(variances: PriorScales, penalize_intercept: bool) -> RegressionResult<Self> {
        variances.validate()?;
        Ok(Self { kind: PriorKind::Gaussian { variances, penalize_intercept } })
    }

    /// Laplace (L1) prior with one shared scale `b`.
    pub fn laplace(scale: f64, penalize_intercept: bool) -> RegressionResult<Self> {
        Self::laplace_with(PriorScales::Shared(scale), penalize_intercept)
    }

    pub fn laplace_per_dimension(
        scales: Vec<f64>, penalize_intercept: bool,
    ) -> RegressionResult<Self> {
        Self::laplace_with(PriorScales::PerDimension(scales), penalize_intercept)
    }

    fn laplace_with(scales: PriorScales, penalize_intercept: bool) -> RegressionResult<Self> {
        scales.validate()?;
        Ok(Self { kind: PriorKind::Laplace { scales, penalize_intercept } })
    }

    /// Cauchy prior with one shared scale `s`.
    pub fn cauchy(scale: f64, penalize_intercept: bool) -> RegressionResult<Self> {
        Self::cauchy_with(PriorScales::Shared(scale), penalize_intercept)
    }

    pub fn cauchy_per_dimension(
        scales: Vec<f64>, penalize_intercept: bool,
    ) -> RegressionResult<Self> {
        Self::cauchy_with(PriorScales::PerDimension(scales), penalize_intercept)
    }

    fn cauchy_with(scales: PriorScales, penalize_intercept: bool) -> RegressionResult<Self> {
        scales.validate()?;
        Ok(Self { kind: PriorKind::Cauchy { scales, penalize_intercept } })
    }

    /// Elastic net: `alpha` of a Laplace prior with scale `scale` plus
    /// `1 - alpha` of a Gaussian prior with variance `scale`.
    ///
    /// # Errors
    /// - [`RegressionError::InvalidAlpha`] unless `alpha` is finite and in [0, 1].
    /// - [`RegressionError::InvalidScale`] unless `scale` is finite and > 0.
    pub fn elastic_net(alpha: f64, scale: f64, penalize_intercept: bool) -> RegressionResult<Self> {
        Self::elastic_net_with(alpha, PriorScales::Shared(scale), penalize_intercept)
    }

    pub fn elastic_net_per_dimension(
        alpha: f64, scales: Vec<f64>, penalize_intercept: bool,
    ) -> RegressionResult<Self> {
        Self::elastic_net_with(alpha, PriorScales::PerDimension(scales), penalize_intercept)
    }

    fn elastic_net_with(
        alpha: f64, scales: PriorScales, penalize_intercept: bool,
    ) -> RegressionResult<Self> {
        if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
            return Err(RegressionError::InvalidAlpha { value: alpha });
        }
        scales.validate()?;
        Ok(Self { kind: PriorKind::ElasticNet { alpha, scales, penalize_intercept } })
    }

    /// Weighted sum of component priors.
    ///
    /// # Errors
    /// - [`RegressionError::InvalidMixtureWeight`] for a negative or
    ///   non-finite weight.
    /// - [`RegressionError::EmptyMixture`] when no weight is positive.
    pub fn mixture(components: Vec<(f64, RegressionPrior)>) -> RegressionResult<Self> {
        for (index, &(w, _)) in components.iter().enumerate() {
            if !w.is_finite() || w < 0.0 {
                return Err(RegressionError::InvalidMixtureWeight { index, value: w });
            }
        }
        if !components.iter().any(|&(w, _)| w > 0.0) {
            return Err(RegressionError::EmptyMixture);
        }
        Ok(Self { kind: PriorKind::Mixture(components) })
    }

    /// Move the mode of dimension `d` to `means[d]`:
    /// `shifted.log_prior(means[d] + δ, d) == self.log_prior(δ, d)`.
    ///
    /// Shifting an already shifted prior adds the offsets.
    ///
    /// # Errors
    /// - [`RegressionError::InvalidMean`] for a non-finite offset.
    /// - [`RegressionError::MeanLengthMismatch`] when stacking offsets of a
    ///   different length.
    pub fn shift_means(self, means: Vec<f64>) -> RegressionResult<Self> {
        for (index, &m) in means.iter().enumerate() {
            if !m.is_finite() {
                return Err(RegressionError::InvalidMean { index, value: m });
            }
        }
        match self.kind {
            PriorKind::Shifted { base, means: existing } => {
                if existing.len() != means.len() {
                    return Err(RegressionError::MeanLengthMismatch {
                        expected: existing.len(),
                        found: means.len(),
                    });
                }
                let means = existing.iter().zip(&means).map(|(a, b)| a + b).collect();
                Ok(Self { kind: PriorKind::Shifted { base, means } })
            }
            kind => Ok(Self { kind: PriorKind::Shifted { base: Box::new(Self { kind }), means } }),
        }
    }

    /// Offsets applied by [`shift_means`](Self::shift_means), if any.
    pub fn means(&self) -> Option<&[f64]> {
        match &self.kind {
            PriorKind::Shifted { means, .. } => Some(means),
            _ => None,
        }
    }

    /// Short variant name, for diagnostics.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            PriorKind::Noninformative => "noninformative",
            PriorKind::Gaussian { .. } => "gaussian",
            PriorKind::Laplace { .. } => "laplace",
            PriorKind::Cauchy { .. } => "cauchy",
            PriorKind::ElasticNet { .. } => "elastic-net",
            PriorKind::Mixture(_) => "mixture",
            PriorKind::Shifted { .. } => "mean-shifted",
        }
    }

    /// Unnormalized natural-log prior density of coefficient `x` in
    /// dimension `d`.
    ///
    /// # Errors
    /// [`RegressionError::DimensionOutOfRange`] when `d` is past a
    /// per-dimension scale or mean array.
    pub fn log_prior(&self, x: f64, d: usize) -> RegressionResult<f64> {
        match &self.kind {
            PriorKind::Noninformative => Ok(0.0),
            PriorKind::Gaussian { variances, penalize_intercept } => {
                if skip(d, *penalize_intercept) {
                    return Ok(0.0);
                }
                Ok(gaussian_log(x, variances.get(d)?))
            }
            PriorKind::Laplace { scales, penalize_intercept } => {
                if skip(d, *penalize_intercept) {
                    return Ok(0.0);
                }
                Ok(laplace_log(x, scales.get(d)?))
            }
            PriorKind::Cauchy { scales, penalize_intercept } => {
                if skip(d, *penalize_intercept) {
                    return Ok(0.0);
                }
                let s = scales.get(d)?;
                Ok(-(x * x / (s * s)).ln_1p())
            }
            PriorKind::ElasticNet { alpha, scales, penalize_intercept } => {
                if skip(d, *penalize_intercept) {
                    return Ok(0.0);
                }
                let s = scales.get(d)?;
                Ok(alpha * laplace_log(x, s) + (1.0 - alpha) * gaussian_log(x, s))
            }
            PriorKind::Mixture(components) => components
                .iter()
                .try_fold(0.0, |acc, (w, prior)| Ok(acc + w * prior.log_prior(x, d)?)),
            PriorKind::Shifted { base, means } => base.log_prior(x - mean_at(means, d)?, d),
        }
    }

    /// `log_prior` in bits.
    pub fn log2_prior(&self, x: f64, d: usize) -> RegressionResult<f64> {
        Ok(self.log_prior(x, d)? / std::f64::consts::LN_2)
    }

    /// Exact derivative of [`log_prior`](Self::log_prior) with respect to `x`.
    pub fn gradient(&self, x: f64, d: usize) -> RegressionResult<f64> {
        match &self.kind {
            PriorKind::Noninformative => Ok(0.0),
            PriorKind::Gaussian { variances, penalize_intercept } => {
                if skip(d, *penalize_intercept) {
                    return Ok(0.0);
                }
                Ok(gaussian_grad(x, variances.get(d)?))
            }
            PriorKind::Laplace { scales, penalize_intercept } => {
                if skip(d, *penalize_intercept) {
                    return Ok(0.0);
                }
                Ok(laplace_grad(x, scales.get(d)?))
            }
            PriorKind::Cauchy { scales, penalize_intercept } => {
                if skip(d, *penalize_intercept) {
                    return Ok(0.0);
                }
                let s = scales.get(d)?;
                Ok(-2.0 * x / (s * s + x * x))
            }
            PriorKind::ElasticNet { alpha, scales, penalize_intercept } => {
                if skip(d, *penalize_intercept) {
                    return Ok(0.0);
                }
                let s = scales.get(d)?;
                Ok(alpha * laplace_grad(x, s) + (1.0 - alpha) * gaussian_grad(x, s))
            }
            PriorKind::Mixture(components) => components
                .iter()
                .try_fold(0.0, |acc, (w, prior)| Ok(acc + w * prior.gradient(x, d)?)),
            PriorKind::Shifted { base, means } => base.gradient(x - mean_at(means, d)?, d),
        }
    }

    /// Total `log2_prior` over a weight matrix whose column `d` holds
    /// dimension `d` of every class's weight vector.
    pub fn log2_prior_weights(&self, weights: ArrayView2<'_, f64>) -> RegressionResult<f64> {
        let mut total = 0.0;
        for row in weights.rows() {
            for (d, &x) in row.iter().enumerate() {
                total += self.log2_prior(x, d)?;
            }
        }
        Ok(total)
    }

    /// Check that every per-dimension array covers `num_dimensions`.
    ///
    /// # Errors
    /// [`RegressionError::DimensionOutOfRange`] naming the first dimension
    /// that is not covered.
    pub fn check_dimensions(&self, num_dimensions: usize) -> RegressionResult<()> {
        let covers = |len: Option<usize>| match len {
            Some(len) if len < num_dimensions => {
                Err(RegressionError::DimensionOutOfRange { dimension: len, len })
            }
            _ => Ok(()),
        };
        match &self.kind {
            PriorKind::Noninformative => Ok(()),
            PriorKind::Gaussian { variances: scales, .. }
            | PriorKind::Laplace { scales, .. }
            | PriorKind::Cauchy { scales, .. }
            | PriorKind::ElasticNet { scales, .. } => covers(scales.len()),
            PriorKind::Mixture(components) => {
                components.iter().try_for_each(|(_, p)| p.check_dimensions(num_dimensions))
            }
            PriorKind::Shifted { base, means } => {
                covers(Some(means.len()))?;
                base.check_dimensions(num_dimensions)
            }
        }
    }
}

fn skip(d: usize, penalize_intercept: bool) -> bool {
    d == 0 && !penalize_intercept
}

fn mean_at(means: &[f64], d: usize) -> RegressionResult<f64> {
    means.get(d).copied().ok_or(RegressionError::DimensionOutOfRange { dimension: d, len: means.len() })
}

fn gaussian_log(x: f64, variance: f64) -> f64 {
    -x * x / (2.0 * variance)
}

fn gaussian_grad(x: f64, variance: f64) -> f64 {
    -x / variance
}

fn laplace_log(x: f64, scale: f64) -> f64 {
    -x.abs() / scale
}

fn laplace_grad(x: f64, scale: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        -x.signum() / scale
    }
}

fn validate_scale(index: Option<usize>, value: f64) -> RegressionResult<()> {
    if !value.is_finite() {
        return Err(RegressionError::InvalidScale { index, value, reason: "Scale must be finite." });
    }
    if value <= 0.0 {
        return Err(RegressionError::InvalidScale {
            index,
            value,
            reason: "Scale must be strictly positive.",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use approx::assert_relative_eq;
    use finitediff::FiniteDiff;
    use ndarray::array;

    fn zoo() -> Vec<RegressionPrior> {
        vec![
            RegressionPrior::gaussian(2.0, true).unwrap(),
            RegressionPrior::laplace_per_dimension(vec![0.5, 1.0, 3.0], true).unwrap(),
            RegressionPrior::cauchy(1.5, true).unwrap(),
            RegressionPrior::elastic_net(0.3, 0.8, true).unwrap(),
            RegressionPrior::mixture(vec![
                (0.25, RegressionPrior::gaussian(1.0, true).unwrap()),
                (0.75, RegressionPrior::cauchy(2.0, true).unwrap()),
            ])
            .unwrap(),
            RegressionPrior::gaussian(1.0, true).unwrap().shift_means(vec![0.5, -1.0, 2.0]).unwrap(),
        ]
    }

    #[test]
    // Purpose
    // -------
    // Analytic gradients match central finite differences of `log_prior`.
    //
    // Given
    // -----
    // - Every variant, points away from the Laplace kink, dimensions 0..3.
    //
    // Expect
    // ------
    // - |analytic - numeric| < 1e-6.
    fn gradients_match_finite_differences() {
        for prior in zoo() {
            for d in 0..3 {
                for x in [-2.3, -0.4, 0.7, 1.9] {
                    let numeric = vec![x]
                        .central_diff(&|v: &Vec<f64>| prior.log_prior(v[0], d).unwrap())[0];
                    let analytic = prior.gradient(x, d).unwrap();
                    assert!(
                        (analytic - numeric).abs() < 1e-6,
                        "{} d={d} x={x}: analytic {analytic}, numeric {numeric}",
                        prior.name()
                    );
                }
            }
        }
    }

    #[test]
    fn closed_form_kernels() {
        let g = RegressionPrior::gaussian(4.0, true).unwrap();
        assert_relative_eq!(g.log_prior(2.0, 1).unwrap(), -0.5, epsilon = 1e-15);
        assert_relative_eq!(g.gradient(2.0, 1).unwrap(), -0.5, epsilon = 1e-15);
        assert_relative_eq!(
            g.log2_prior(2.0, 1).unwrap(),
            -0.5 / std::f64::consts::LN_2,
            epsilon = 1e-15
        );

        let l = RegressionPrior::laplace(2.0, true).unwrap();
        assert_relative_eq!(l.log_prior(-3.0, 0).unwrap(), -1.5, epsilon = 1e-15);
        assert_eq!(l.gradient(-3.0, 0).unwrap(), 0.5);
        assert_eq!(l.gradient(0.0, 0).unwrap(), 0.0);

        let c = RegressionPrior::cauchy(1.0, true).unwrap();
        assert_relative_eq!(c.log_prior(1.0, 0).unwrap(), -(2.0_f64.ln()), epsilon = 1e-15);
        assert_relative_eq!(c.gradient(1.0, 0).unwrap(), -1.0, epsilon = 1e-15);

        let flat = RegressionPrior::noninformative();
        assert_eq!(flat.log_prior(123.0, 99).unwrap(), 0.0);
        assert_eq!(flat.gradient(123.0, 99).unwrap(), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // The elastic net is exactly `α·Laplace + (1-α)·Gaussian` with matching
    // scale, in value and gradient.
    fn elastic_net_is_weighted_sum() {
        let scales = vec![0.5, 2.0, 1.25];
        for alpha in [0.0, 0.2, 0.5, 1.0] {
            let en = RegressionPrior::elastic_net_per_dimension(alpha, scales.clone(), true).unwrap();
            let l = RegressionPrior::laplace_per_dimension(scales.clone(), true).unwrap();
            let g = RegressionPrior::gaussian_per_dimension(scales.clone(), true).unwrap();
            for d in 0..3 {
                for x in [-1.7, -0.1, 0.0, 0.9, 4.0] {
                    let expected =
                        alpha * l.log_prior(x, d).unwrap() + (1.0 - alpha) * g.log_prior(x, d).unwrap();
                    assert_relative_eq!(en.log_prior(x, d).unwrap(), expected, epsilon = 1e-14);
                    let expected_grad =
                        alpha * l.gradient(x, d).unwrap() + (1.0 - alpha) * g.gradient(x, d).unwrap();
                    assert_relative_eq!(en.gradient(x, d).unwrap(), expected_grad, epsilon = 1e-14);
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // `shifted.log2_prior(mean[d] + δ, d) == base.log2_prior(δ, d)`, and
    // shifting twice accumulates the offsets.
    fn mean_shift_moves_the_mode() {
        let base = RegressionPrior::laplace(0.7, true).unwrap();
        let means = vec![1.0, -2.0];
        let shifted = base.clone().shift_means(means.clone()).unwrap();
        for d in 0..2 {
            for delta in [-1.5, -0.2, 0.0, 0.3, 2.5] {
                assert_relative_eq!(
                    shifted.log2_prior(means[d] + delta, d).unwrap(),
                    base.log2_prior(delta, d).unwrap(),
                    epsilon = 1e-14
                );
            }
        }

        let twice = shifted.shift_means(vec![0.5, 0.5]).unwrap();
        assert_eq!(twice.means(), Some(&[1.5, -1.5][..]));
        assert_relative_eq!(
            twice.log_prior(1.5 + 0.4, 0).unwrap(),
            base.log_prior(0.4, 0).unwrap(),
            epsilon = 1e-14
        );
        assert_eq!(
            twice.shift_means(vec![1.0]),
            Err(RegressionError::MeanLengthMismatch { expected: 2, found: 1 })
        );
    }

    #[test]
    fn unpenalized_intercept_scores_zero() {
        for prior in [
            RegressionPrior::gaussian(1.0, false).unwrap(),
            RegressionPrior::laplace(1.0, false).unwrap(),
            RegressionPrior::cauchy(1.0, false).unwrap(),
            RegressionPrior::elastic_net(0.5, 1.0, false).unwrap(),
        ] {
            assert_eq!(prior.log2_prior(5.0, 0).unwrap(), 0.0, "{}", prior.name());
            assert_eq!(prior.gradient(5.0, 0).unwrap(), 0.0, "{}", prior.name());
            assert!(prior.log2_prior(5.0, 1).unwrap() < 0.0, "{}", prior.name());
        }
    }

    #[test]
    fn per_dimension_lookup_past_array_is_out_of_range() {
        let prior = RegressionPrior::gaussian_per_dimension(vec![1.0, 2.0], true).unwrap();
        let err = prior.log_prior(1.0, 2).unwrap_err();
        assert_eq!(err, RegressionError::DimensionOutOfRange { dimension: 2, len: 2 });
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert!(prior.gradient(1.0, 5).is_err());
        assert!(prior.check_dimensions(2).is_ok());
        assert_eq!(
            prior.check_dimensions(3),
            Err(RegressionError::DimensionOutOfRange { dimension: 2, len: 2 })
        );

        let shifted = RegressionPrior::noninformative().shift_means(vec![0.0]).unwrap();
        assert!(shifted.log_prior(0.0, 1).is_err());
        assert!(shifted.check_dimensions(2).is_err());
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                RegressionPrior::gaussian(bad, true),
                Err(RegressionError::InvalidScale { .. })
            ));
            assert!(RegressionPrior::elastic_net(0.5, bad, true).is_err());
        }
        for bad in [-0.1, 1.1, f64::NAN, f64::INFINITY] {
            assert_eq!(
                RegressionPrior::elastic_net(bad, 1.0, true).map(|_| ()).map_err(|e| e.kind()),
                Err(ErrorKind::InvalidArgument)
            );
        }
        assert!(matches!(
            RegressionPrior::cauchy_per_dimension(vec![1.0, -2.0], true),
            Err(RegressionError::InvalidScale { index: Some(1), .. })
        ));
        assert_eq!(RegressionPrior::mixture(vec![]), Err(RegressionError::EmptyMixture));
        assert!(RegressionPrior::mixture(vec![(-1.0, RegressionPrior::noninformative())]).is_err());
        assert!(RegressionPrior::noninformative().shift_means(vec![f64::NAN]).is_err());
    }

    #[test]
    fn log2_prior_weights_sums_rows_and_columns() {
        let prior = RegressionPrior::gaussian(1.0, false).unwrap();
        let w = array![[9.0, 1.0, 2.0], [9.0, -1.0, 0.0]];
        // intercept column skipped; -(1 + 4 + 1) / 2 nats
        let expected = -3.0 / std::f64::consts::LN_2;
        assert_relative_eq!(prior.log2_prior_weights(w.view()).unwrap(), expected, epsilon = 1e-14);
    }
}
