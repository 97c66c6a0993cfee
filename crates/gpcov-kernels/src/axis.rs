//! Non-stationary covariance functions
//!
//! A non-stationary kernel is not a function of distance: it evaluates a
//! per-axis formula on one coordinate pair at a time and sums the
//! contributions over the axes a [`Subspace`] selects. The subspace is a
//! fixed structural choice — it contributes no parameters and no
//! gradient entries. An empty subspace yields exactly `0.0`.

use crate::Kernel;
use gpcov_core::{Error, Parameterized, Result, Subspace};

/// A covariance contribution from a single coordinate pair
///
/// `parameter_gradient(i, x1, x2)` is the hand-derived
/// `d(value)/d(param_i)` for one axis; the enclosing kernel accumulates
/// it across the selected axes.
pub trait PairForm: Parameterized + Clone + Send + Sync {
    fn value(&self, x1: f64, x2: f64) -> f64;
    fn parameter_gradient(&self, i: usize, x1: f64, x2: f64) -> f64;
}

/// A pair form summed over the axes of a subspace
#[derive(Debug, Clone)]
pub struct AxisSumKernel<F: PairForm> {
    form: F,
    subspace: Subspace,
}

impl<F: PairForm> AxisSumKernel<F> {
    pub fn new(form: F, subspace: Subspace) -> Self {
        Self { form, subspace }
    }

    pub fn subspace(&self) -> &Subspace {
        &self.subspace
    }
}

impl<F: PairForm> Parameterized for AxisSumKernel<F> {
    fn n_parameters(&self) -> usize {
        self.form.n_parameters()
    }

    fn parameter(&self, i: usize) -> f64 {
        self.form.parameter(i)
    }

    fn set_parameter(&mut self, i: usize, value: f64) {
        self.form.set_parameter(i, value);
    }
}

impl<F: PairForm> Kernel for AxisSumKernel<F> {
    fn ndim(&self) -> usize {
        self.subspace.ndim()
    }

    fn value(&self, x1: &[f64], x2: &[f64]) -> f64 {
        debug_assert_eq!(x1.len(), self.ndim());
        debug_assert_eq!(x2.len(), self.ndim());
        self.subspace
            .iter()
            .map(|j| self.form.value(x1[j], x2[j]))
            .sum()
    }

    fn gradient(&self, x1: &[f64], x2: &[f64], grad: &mut [f64]) {
        let n = self.form.n_parameters();
        assert!(grad.len() >= n, "gradient buffer too small: {} < {n}", grad.len());
        grad[..n].fill(0.0);
        for j in self.subspace.iter() {
            for (i, g) in grad[..n].iter_mut().enumerate() {
                *g += self.form.parameter_gradient(i, x1[j], x2[j]);
            }
        }
    }
}

/// Constant contribution per selected axis
#[derive(Debug, Clone, Copy)]
pub struct Constant {
    value: f64,
}

impl Constant {
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::non_finite("constant"));
        }
        Ok(Self { value })
    }
}

impl Parameterized for Constant {
    fn n_parameters(&self) -> usize {
        1
    }

    fn parameter(&self, i: usize) -> f64 {
        assert_eq!(i, 0, "parameter index {i} out of range for Constant");
        self.value
    }

    fn set_parameter(&mut self, i: usize, value: f64) {
        assert_eq!(i, 0, "parameter index {i} out of range for Constant");
        self.value = value;
    }
}

impl PairForm for Constant {
    fn value(&self, _x1: f64, _x2: f64) -> f64 {
        self.value
    }

    fn parameter_gradient(&self, i: usize, _x1: f64, _x2: f64) -> f64 {
        assert_eq!(i, 0, "parameter index {i} out of range for Constant");
        1.0
    }
}

/// Per-axis dot product `x1 * x2`, no parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct DotProduct;

impl Parameterized for DotProduct {
    fn n_parameters(&self) -> usize {
        0
    }

    fn parameter(&self, i: usize) -> f64 {
        panic!("parameter index {i} out of range for DotProduct");
    }

    fn set_parameter(&mut self, i: usize, _value: f64) {
        panic!("parameter index {i} out of range for DotProduct");
    }
}

impl PairForm for DotProduct {
    fn value(&self, x1: f64, x2: f64) -> f64 {
        x1 * x2
    }

    fn parameter_gradient(&self, i: usize, _x1: f64, _x2: f64) -> f64 {
        panic!("parameter index {i} out of range for DotProduct");
    }
}

/// Cosine of the coordinate difference: `cos(2 pi (x1 - x2) / period)`
#[derive(Debug, Clone, Copy)]
pub struct Cosine {
    period: f64,
}

impl Cosine {
    pub fn new(period: f64) -> Result<Self> {
        if !period.is_finite() {
            return Err(Error::non_finite("period"));
        }
        if period <= 0.0 {
            return Err(Error::non_positive("period", period));
        }
        Ok(Self { period })
    }
}

impl Parameterized for Cosine {
    fn n_parameters(&self) -> usize {
        1
    }

    fn parameter(&self, i: usize) -> f64 {
        assert_eq!(i, 0, "parameter index {i} out of range for Cosine");
        self.period
    }

    fn set_parameter(&mut self, i: usize, value: f64) {
        assert_eq!(i, 0, "parameter index {i} out of range for Cosine");
        self.period = value;
    }
}

impl PairForm for Cosine {
    fn value(&self, x1: f64, x2: f64) -> f64 {
        let d = x1 - x2;
        (2.0 * std::f64::consts::PI * d / self.period).cos()
    }

    fn parameter_gradient(&self, i: usize, x1: f64, x2: f64) -> f64 {
        assert_eq!(i, 0, "parameter index {i} out of range for Cosine");
        let d = x1 - x2;
        let theta = 2.0 * std::f64::consts::PI * d / self.period;
        theta.sin() * theta / self.period
    }
}

/// Exponential sine-squared: `exp(-gamma sin^2(pi (x1 - x2) / period))`
///
/// Two own parameters, in declaration order `gamma` then `period`.
#[derive(Debug, Clone, Copy)]
pub struct ExpSine2 {
    gamma: f64,
    period: f64,
}

impl ExpSine2 {
    pub fn new(gamma: f64, period: f64) -> Result<Self> {
        if !gamma.is_finite() {
            return Err(Error::non_finite("gamma"));
        }
        if !period.is_finite() {
            return Err(Error::non_finite("period"));
        }
        if period <= 0.0 {
            return Err(Error::non_positive("period", period));
        }
        Ok(Self { gamma, period })
    }
}

impl Parameterized for ExpSine2 {
    fn n_parameters(&self) -> usize {
        2
    }

    fn parameter(&self, i: usize) -> f64 {
        match i {
            0 => self.gamma,
            1 => self.period,
            _ => panic!("parameter index {i} out of range for ExpSine2"),
        }
    }

    fn set_parameter(&mut self, i: usize, value: f64) {
        match i {
            0 => self.gamma = value,
            1 => self.period = value,
            _ => panic!("parameter index {i} out of range for ExpSine2"),
        }
    }
}

impl PairForm for ExpSine2 {
    fn value(&self, x1: f64, x2: f64) -> f64 {
        let theta = std::f64::consts::PI * (x1 - x2) / self.period;
        let s = theta.sin();
        (-self.gamma * s * s).exp()
    }

    fn parameter_gradient(&self, i: usize, x1: f64, x2: f64) -> f64 {
        let d = x1 - x2;
        let theta = std::f64::consts::PI * d / self.period;
        let s = theta.sin();
        let k = (-self.gamma * s * s).exp();
        match i {
            0 => -s * s * k,
            1 => {
                k * self.gamma * (2.0 * theta).sin() * std::f64::consts::PI * d
                    / (self.period * self.period)
            }
            _ => panic!("parameter index {i} out of range for ExpSine2"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_sums_over_axes() {
        let k = AxisSumKernel::new(Constant::new(0.5).unwrap(), Subspace::full(3).unwrap());
        assert_relative_eq!(k.value(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 1.5);
        assert_eq!(k.n_parameters(), 1);

        let mut grad = [0.0];
        k.gradient(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &mut grad);
        // One unit contribution per selected axis
        assert_relative_eq!(grad[0], 3.0);
    }

    #[test]
    fn test_dot_product_over_subset() {
        let s = Subspace::new(3, vec![0, 2]).unwrap();
        let k = AxisSumKernel::new(DotProduct, s);
        // 1*4 + 3*6, axis 1 ignored
        assert_relative_eq!(k.value(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 22.0);
        assert_eq!(k.n_parameters(), 0);
    }

    #[test]
    fn test_empty_subspace_is_zero() {
        let k = AxisSumKernel::new(
            ExpSine2::new(1.0, 2.0).unwrap(),
            Subspace::new(2, vec![]).unwrap(),
        );
        assert_eq!(k.value(&[1.0, 2.0], &[3.0, 4.0]), 0.0);

        let mut grad = [7.0, 7.0];
        k.gradient(&[1.0, 2.0], &[3.0, 4.0], &mut grad);
        assert_eq!(grad, [0.0, 0.0]);
    }

    #[test]
    fn test_cosine_period_gradient_matches_finite_difference() {
        let eps = 1e-6;
        let period = 1.3;
        let mut form = Cosine::new(period).unwrap();
        let (x1, x2) = (0.7, -0.2);

        let analytic = form.parameter_gradient(0, x1, x2);
        form.set_parameter(0, period + eps);
        let hi = form.value(x1, x2);
        form.set_parameter(0, period - eps);
        let lo = form.value(x1, x2);
        assert_relative_eq!(analytic, (hi - lo) / (2.0 * eps), epsilon = 1e-6);
    }

    #[test]
    fn test_exp_sine2_gradients_match_finite_difference() {
        let eps = 1e-6;
        let (gamma, period) = (1.4, 2.3);
        let (x1, x2) = (0.9, 0.1);

        for i in 0..2 {
            let mut form = ExpSine2::new(gamma, period).unwrap();
            let analytic = form.parameter_gradient(i, x1, x2);
            let p0 = form.parameter(i);
            form.set_parameter(i, p0 + eps);
            let hi = form.value(x1, x2);
            form.set_parameter(i, p0 - eps);
            let lo = form.value(x1, x2);
            assert_relative_eq!(analytic, (hi - lo) / (2.0 * eps), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_form_validation() {
        assert!(Constant::new(f64::NAN).is_err());
        assert!(Cosine::new(0.0).is_err());
        assert!(ExpSine2::new(1.0, -2.0).is_err());
        assert!(ExpSine2::new(f64::INFINITY, 1.0).is_err());
    }
}
