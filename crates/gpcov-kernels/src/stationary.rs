//! Stationary covariance functions
//!
//! A stationary kernel sees its inputs only through the scalar squared
//! distance `r2` produced by a [`Metric`]. Each concrete shape is a
//! [`RadialForm`]: its own hyperparameters plus closed-form expressions
//! for the value, the per-parameter gradients, and the radial gradient
//! `d(value)/d(r2)`. The generic [`StationaryKernel`] pairs a form with
//! a metric and carries the chain-rule composition exactly once, so a
//! form never needs to know how the distance is parameterized.

use crate::Kernel;
use gpcov_core::{Error, Metric, Parameterized, Result};

/// A covariance shape as a function of squared distance
///
/// All gradients are hand-derived closed forms. `parameter_gradient(i, r2)`
/// is `d(value)/d(param_i)` at the current parameter values;
/// `radial_gradient(r2)` is `d(value)/d(r2)`, the chain-rule factor
/// applied to the metric's own parameter gradients.
pub trait RadialForm: Parameterized + Clone + Send + Sync {
    fn value(&self, r2: f64) -> f64;
    fn parameter_gradient(&self, i: usize, r2: f64) -> f64;
    fn radial_gradient(&self, r2: f64) -> f64;
}

/// A radial form evaluated through a distance metric
///
/// Parameter vector layout: the form's own parameters first, in
/// declaration order, then the metric's parameters.
#[derive(Debug, Clone)]
pub struct StationaryKernel<F: RadialForm, M: Metric> {
    form: F,
    metric: M,
}

impl<F: RadialForm, M: Metric> StationaryKernel<F, M> {
    pub fn new(form: F, metric: M) -> Self {
        Self { form, metric }
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }
}

impl<F: RadialForm, M: Metric> Parameterized for StationaryKernel<F, M> {
    fn n_parameters(&self) -> usize {
        self.form.n_parameters() + self.metric.n_parameters()
    }

    fn parameter(&self, i: usize) -> f64 {
        let n_own = self.form.n_parameters();
        if i < n_own {
            self.form.parameter(i)
        } else {
            self.metric.parameter(i - n_own)
        }
    }

    fn set_parameter(&mut self, i: usize, value: f64) {
        let n_own = self.form.n_parameters();
        if i < n_own {
            self.form.set_parameter(i, value);
        } else {
            self.metric.set_parameter(i - n_own, value);
        }
    }
}

impl<F: RadialForm, M: Metric> Kernel for StationaryKernel<F, M> {
    fn ndim(&self) -> usize {
        self.metric.ndim()
    }

    fn value(&self, x1: &[f64], x2: &[f64]) -> f64 {
        debug_assert_eq!(x1.len(), self.ndim());
        debug_assert_eq!(x2.len(), self.ndim());
        self.form.value(self.metric.value(x1, x2))
    }

    fn gradient(&self, x1: &[f64], x2: &[f64], grad: &mut [f64]) {
        let n_own = self.form.n_parameters();
        let n = n_own + self.metric.n_parameters();
        assert!(grad.len() >= n, "gradient buffer too small: {} < {n}", grad.len());

        let r2 = self.metric.value(x1, x2);
        for i in 0..n_own {
            grad[i] = self.form.parameter_gradient(i, r2);
        }
        // The metric emits d(r2)/d(param); rescale in place by d(value)/d(r2)
        self.metric.gradient(x1, x2, &mut grad[n_own..n]);
        let dr2 = self.form.radial_gradient(r2);
        for g in &mut grad[n_own..n] {
            *g *= dr2;
        }
    }
}

fn no_own_parameters(form: &str, i: usize) -> ! {
    panic!("parameter index {i} out of range for {form}");
}

/// Squared-exponential shape: `exp(-r2 / 2)`
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpSquared;

impl Parameterized for ExpSquared {
    fn n_parameters(&self) -> usize {
        0
    }

    fn parameter(&self, i: usize) -> f64 {
        no_own_parameters("ExpSquared", i)
    }

    fn set_parameter(&mut self, i: usize, _value: f64) {
        no_own_parameters("ExpSquared", i)
    }
}

impl RadialForm for ExpSquared {
    fn value(&self, r2: f64) -> f64 {
        (-0.5 * r2).exp()
    }

    fn parameter_gradient(&self, i: usize, _r2: f64) -> f64 {
        no_own_parameters("ExpSquared", i)
    }

    fn radial_gradient(&self, r2: f64) -> f64 {
        -0.5 * (-0.5 * r2).exp()
    }
}

/// Exponential shape: `exp(-sqrt(r2))`
///
/// Non-smooth at `r2 = 0`; the radial gradient there is an IEEE-754
/// infinity/NaN and propagates as such.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exp;

impl Parameterized for Exp {
    fn n_parameters(&self) -> usize {
        0
    }

    fn parameter(&self, i: usize) -> f64 {
        no_own_parameters("Exp", i)
    }

    fn set_parameter(&mut self, i: usize, _value: f64) {
        no_own_parameters("Exp", i)
    }
}

impl RadialForm for Exp {
    fn value(&self, r2: f64) -> f64 {
        (-r2.sqrt()).exp()
    }

    fn parameter_gradient(&self, i: usize, _r2: f64) -> f64 {
        no_own_parameters("Exp", i)
    }

    fn radial_gradient(&self, r2: f64) -> f64 {
        let r = r2.sqrt();
        -(-r).exp() / (2.0 * r)
    }
}

/// Matern-3/2 shape: `(1 + s) exp(-s)` with `s = sqrt(3 r2)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Matern32;

impl Parameterized for Matern32 {
    fn n_parameters(&self) -> usize {
        0
    }

    fn parameter(&self, i: usize) -> f64 {
        no_own_parameters("Matern32", i)
    }

    fn set_parameter(&mut self, i: usize, _value: f64) {
        no_own_parameters("Matern32", i)
    }
}

impl RadialForm for Matern32 {
    fn value(&self, r2: f64) -> f64 {
        let s = (3.0 * r2).sqrt();
        (1.0 + s) * (-s).exp()
    }

    fn parameter_gradient(&self, i: usize, _r2: f64) -> f64 {
        no_own_parameters("Matern32", i)
    }

    fn radial_gradient(&self, r2: f64) -> f64 {
        let s = (3.0 * r2).sqrt();
        -1.5 * (-s).exp()
    }
}

/// Matern-5/2 shape: `(1 + s + s^2/3) exp(-s)` with `s = sqrt(5 r2)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Matern52;

impl Parameterized for Matern52 {
    fn n_parameters(&self) -> usize {
        0
    }

    fn parameter(&self, i: usize) -> f64 {
        no_own_parameters("Matern52", i)
    }

    fn set_parameter(&mut self, i: usize, _value: f64) {
        no_own_parameters("Matern52", i)
    }
}

impl RadialForm for Matern52 {
    fn value(&self, r2: f64) -> f64 {
        let s = (5.0 * r2).sqrt();
        (1.0 + s + s * s / 3.0) * (-s).exp()
    }

    fn parameter_gradient(&self, i: usize, _r2: f64) -> f64 {
        no_own_parameters("Matern52", i)
    }

    fn radial_gradient(&self, r2: f64) -> f64 {
        let s = (5.0 * r2).sqrt();
        -(5.0 / 6.0) * (1.0 + s) * (-s).exp()
    }
}

/// Rational-quadratic shape: `(1 + r2 / (2 alpha))^(-alpha)`
///
/// One own parameter, the scale-mixture exponent `alpha`.
#[derive(Debug, Clone, Copy)]
pub struct RationalQuadratic {
    alpha: f64,
}

impl RationalQuadratic {
    pub fn new(alpha: f64) -> Result<Self> {
        if !alpha.is_finite() {
            return Err(Error::non_finite("alpha"));
        }
        if alpha <= 0.0 {
            return Err(Error::non_positive("alpha", alpha));
        }
        Ok(Self { alpha })
    }
}

impl Parameterized for RationalQuadratic {
    fn n_parameters(&self) -> usize {
        1
    }

    fn parameter(&self, i: usize) -> f64 {
        assert_eq!(i, 0, "parameter index {i} out of range for RationalQuadratic");
        self.alpha
    }

    fn set_parameter(&mut self, i: usize, value: f64) {
        assert_eq!(i, 0, "parameter index {i} out of range for RationalQuadratic");
        self.alpha = value;
    }
}

impl RadialForm for RationalQuadratic {
    fn value(&self, r2: f64) -> f64 {
        let t = 1.0 + 0.5 * r2 / self.alpha;
        t.powf(-self.alpha)
    }

    fn parameter_gradient(&self, i: usize, r2: f64) -> f64 {
        assert_eq!(i, 0, "parameter index {i} out of range for RationalQuadratic");
        let t = 1.0 + 0.5 * r2 / self.alpha;
        // d/d(alpha) of exp(-alpha ln t)
        t.powf(-self.alpha) * (0.5 * r2 / (self.alpha * t) - t.ln())
    }

    fn radial_gradient(&self, r2: f64) -> f64 {
        let t = 1.0 + 0.5 * r2 / self.alpha;
        -0.5 * t.powf(-self.alpha - 1.0)
    }
}
