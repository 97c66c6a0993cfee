//! Distance metrics for stationary covariance functions
//!
//! A stationary kernel sees its two input points only through a scalar
//! squared distance `r2` produced by a metric. The metric owns any
//! learnable structure of that distance (length scales) and exposes it
//! through the same [`Parameterized`] protocol kernels use, so a leaf
//! kernel can append the metric's parameters to its own without knowing
//! how the distance is parameterized internally.
//!
//! `gradient` emits `d(r2)/d(param)` directly; the consuming kernel
//! rescales those entries by its radial gradient to complete the chain
//! rule.

use crate::{Error, Parameterized, Result};

/// Squared-distance provider for stationary kernels
pub trait Metric: Parameterized + Send + Sync {
    /// Input dimensionality this metric operates on
    fn ndim(&self) -> usize;

    /// Squared distance between two `ndim`-dimensional points
    fn value(&self, x1: &[f64], x2: &[f64]) -> f64;

    /// Write `d(r2)/d(param_i)` into `grad[i]` for each own parameter
    ///
    /// Writes exactly `n_parameters()` entries; `grad` must be at least
    /// that long.
    fn gradient(&self, x1: &[f64], x2: &[f64], grad: &mut [f64]);
}

fn check_ndim(ndim: usize) -> Result<()> {
    if ndim == 0 {
        return Err(Error::InvalidParameter(
            "metric dimensionality must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn check_scale(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::non_finite(name));
    }
    if value <= 0.0 {
        return Err(Error::non_positive(name, value));
    }
    Ok(())
}

/// Plain squared Euclidean distance, no learnable parameters
#[derive(Debug, Clone)]
pub struct EuclideanMetric {
    ndim: usize,
}

impl EuclideanMetric {
    pub fn new(ndim: usize) -> Result<Self> {
        check_ndim(ndim)?;
        Ok(Self { ndim })
    }
}

impl Parameterized for EuclideanMetric {
    fn n_parameters(&self) -> usize {
        0
    }

    fn parameter(&self, i: usize) -> f64 {
        panic!("parameter index {i} out of range for EuclideanMetric");
    }

    fn set_parameter(&mut self, i: usize, _value: f64) {
        panic!("parameter index {i} out of range for EuclideanMetric");
    }
}

impl Metric for EuclideanMetric {
    fn ndim(&self) -> usize {
        self.ndim
    }

    fn value(&self, x1: &[f64], x2: &[f64]) -> f64 {
        debug_assert_eq!(x1.len(), self.ndim);
        debug_assert_eq!(x2.len(), self.ndim);
        x1.iter()
            .zip(x2)
            .map(|(a, b)| {
                let d = a - b;
                d * d
            })
            .sum()
    }

    fn gradient(&self, _x1: &[f64], _x2: &[f64], _grad: &mut [f64]) {}
}

/// Squared distance scaled by a single shared length scale
///
/// `r2 = sum_i (x1_i - x2_i)^2 / ell^2`, one parameter `ell`.
#[derive(Debug, Clone)]
pub struct IsotropicMetric {
    ndim: usize,
    length_scale: f64,
}

impl IsotropicMetric {
    pub fn new(ndim: usize, length_scale: f64) -> Result<Self> {
        check_ndim(ndim)?;
        check_scale("length scale", length_scale)?;
        log::debug!("isotropic metric: ndim={ndim}, length scale={length_scale}");
        Ok(Self { ndim, length_scale })
    }
}

impl Parameterized for IsotropicMetric {
    fn n_parameters(&self) -> usize {
        1
    }

    fn parameter(&self, i: usize) -> f64 {
        assert_eq!(i, 0, "parameter index {i} out of range for IsotropicMetric");
        self.length_scale
    }

    fn set_parameter(&mut self, i: usize, value: f64) {
        assert_eq!(i, 0, "parameter index {i} out of range for IsotropicMetric");
        self.length_scale = value;
    }
}

impl Metric for IsotropicMetric {
    fn ndim(&self) -> usize {
        self.ndim
    }

    fn value(&self, x1: &[f64], x2: &[f64]) -> f64 {
        debug_assert_eq!(x1.len(), self.ndim);
        debug_assert_eq!(x2.len(), self.ndim);
        let ell2 = self.length_scale * self.length_scale;
        x1.iter()
            .zip(x2)
            .map(|(a, b)| {
                let d = a - b;
                d * d / ell2
            })
            .sum()
    }

    fn gradient(&self, x1: &[f64], x2: &[f64], grad: &mut [f64]) {
        // d(r2)/d(ell) = -2 r2 / ell
        grad[0] = -2.0 * self.value(x1, x2) / self.length_scale;
    }
}

/// Squared distance with an independent length scale per axis
///
/// `r2 = sum_i (x1_i - x2_i)^2 / ell_i^2`, `ndim` parameters.
#[derive(Debug, Clone)]
pub struct AxisAlignedMetric {
    length_scales: Vec<f64>,
}

impl AxisAlignedMetric {
    pub fn new(length_scales: Vec<f64>) -> Result<Self> {
        check_ndim(length_scales.len())?;
        for &ell in &length_scales {
            check_scale("length scale", ell)?;
        }
        log::debug!("axis-aligned metric: ndim={}", length_scales.len());
        Ok(Self { length_scales })
    }
}

impl Parameterized for AxisAlignedMetric {
    fn n_parameters(&self) -> usize {
        self.length_scales.len()
    }

    fn parameter(&self, i: usize) -> f64 {
        self.length_scales[i]
    }

    fn set_parameter(&mut self, i: usize, value: f64) {
        self.length_scales[i] = value;
    }
}

impl Metric for AxisAlignedMetric {
    fn ndim(&self) -> usize {
        self.length_scales.len()
    }

    fn value(&self, x1: &[f64], x2: &[f64]) -> f64 {
        debug_assert_eq!(x1.len(), self.ndim());
        debug_assert_eq!(x2.len(), self.ndim());
        x1.iter()
            .zip(x2)
            .zip(&self.length_scales)
            .map(|((a, b), ell)| {
                let d = (a - b) / ell;
                d * d
            })
            .sum()
    }

    fn gradient(&self, x1: &[f64], x2: &[f64], grad: &mut [f64]) {
        // d(r2)/d(ell_i) = -2 d_i^2 / ell_i^3
        for (i, ell) in self.length_scales.iter().enumerate() {
            let d = x1[i] - x2[i];
            grad[i] = -2.0 * d * d / (ell * ell * ell);
        }
    }
}
