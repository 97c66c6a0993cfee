//! Binary composition operators
//!
//! [`Sum`] and [`Product`] each own exactly two child kernels and expose
//! the concatenation of their parameter vectors: indices `[0, n1)` route
//! to the first child, `[n1, n1 + n2)` to the second at offset `-n1`.
//! Nesting is unbounded; every level preserves the index contract purely
//! by trusting its children's `n_parameters()`.

use crate::Kernel;
use gpcov_core::{Error, Parameterized, Result};

fn check_children(k1: &dyn Kernel, k2: &dyn Kernel) -> Result<()> {
    if k1.ndim() != k2.ndim() {
        return Err(Error::dimension_mismatch(k1.ndim(), k2.ndim()));
    }
    Ok(())
}

/// Pointwise sum of two kernels
pub struct Sum {
    kernel1: Box<dyn Kernel>,
    kernel2: Box<dyn Kernel>,
}

impl Sum {
    /// Combine two boxed kernels; they must agree on `ndim`
    pub fn new(kernel1: Box<dyn Kernel>, kernel2: Box<dyn Kernel>) -> Result<Self> {
        check_children(kernel1.as_ref(), kernel2.as_ref())?;
        log::debug!(
            "sum node: {} + {} parameters",
            kernel1.n_parameters(),
            kernel2.n_parameters()
        );
        Ok(Self { kernel1, kernel2 })
    }

    /// Convenience constructor taking the children by value
    pub fn of(kernel1: impl Kernel + 'static, kernel2: impl Kernel + 'static) -> Result<Self> {
        Self::new(Box::new(kernel1), Box::new(kernel2))
    }

    pub fn kernel1(&self) -> &dyn Kernel {
        self.kernel1.as_ref()
    }

    pub fn kernel2(&self) -> &dyn Kernel {
        self.kernel2.as_ref()
    }
}

impl Parameterized for Sum {
    fn n_parameters(&self) -> usize {
        self.kernel1.n_parameters() + self.kernel2.n_parameters()
    }

    fn parameter(&self, i: usize) -> f64 {
        let n1 = self.kernel1.n_parameters();
        if i < n1 {
            self.kernel1.parameter(i)
        } else {
            self.kernel2.parameter(i - n1)
        }
    }

    fn set_parameter(&mut self, i: usize, value: f64) {
        let n1 = self.kernel1.n_parameters();
        if i < n1 {
            self.kernel1.set_parameter(i, value);
        } else {
            self.kernel2.set_parameter(i - n1, value);
        }
    }
}

impl Kernel for Sum {
    fn ndim(&self) -> usize {
        self.kernel1.ndim()
    }

    fn value(&self, x1: &[f64], x2: &[f64]) -> f64 {
        self.kernel1.value(x1, x2) + self.kernel2.value(x1, x2)
    }

    fn gradient(&self, x1: &[f64], x2: &[f64], grad: &mut [f64]) {
        let n1 = self.kernel1.n_parameters();
        let n = n1 + self.kernel2.n_parameters();
        assert!(grad.len() >= n, "gradient buffer too small: {} < {n}", grad.len());
        self.kernel1.gradient(x1, x2, &mut grad[..n1]);
        self.kernel2.gradient(x1, x2, &mut grad[n1..n]);
    }
}

/// Pointwise product of two kernels
pub struct Product {
    kernel1: Box<dyn Kernel>,
    kernel2: Box<dyn Kernel>,
}

impl Product {
    /// Combine two boxed kernels; they must agree on `ndim`
    pub fn new(kernel1: Box<dyn Kernel>, kernel2: Box<dyn Kernel>) -> Result<Self> {
        check_children(kernel1.as_ref(), kernel2.as_ref())?;
        log::debug!(
            "product node: {} + {} parameters",
            kernel1.n_parameters(),
            kernel2.n_parameters()
        );
        Ok(Self { kernel1, kernel2 })
    }

    /// Convenience constructor taking the children by value
    pub fn of(kernel1: impl Kernel + 'static, kernel2: impl Kernel + 'static) -> Result<Self> {
        Self::new(Box::new(kernel1), Box::new(kernel2))
    }

    pub fn kernel1(&self) -> &dyn Kernel {
        self.kernel1.as_ref()
    }

    pub fn kernel2(&self) -> &dyn Kernel {
        self.kernel2.as_ref()
    }
}

impl Parameterized for Product {
    fn n_parameters(&self) -> usize {
        self.kernel1.n_parameters() + self.kernel2.n_parameters()
    }

    fn parameter(&self, i: usize) -> f64 {
        let n1 = self.kernel1.n_parameters();
        if i < n1 {
            self.kernel1.parameter(i)
        } else {
            self.kernel2.parameter(i - n1)
        }
    }

    fn set_parameter(&mut self, i: usize, value: f64) {
        let n1 = self.kernel1.n_parameters();
        if i < n1 {
            self.kernel1.set_parameter(i, value);
        } else {
            self.kernel2.set_parameter(i - n1, value);
        }
    }
}

impl Kernel for Product {
    fn ndim(&self) -> usize {
        self.kernel1.ndim()
    }

    fn value(&self, x1: &[f64], x2: &[f64]) -> f64 {
        self.kernel1.value(x1, x2) * self.kernel2.value(x1, x2)
    }

    fn gradient(&self, x1: &[f64], x2: &[f64], grad: &mut [f64]) {
        let n1 = self.kernel1.n_parameters();
        let n = n1 + self.kernel2.n_parameters();
        assert!(grad.len() >= n, "gradient buffer too small: {} < {n}", grad.len());
        self.kernel1.gradient(x1, x2, &mut grad[..n1]);
        self.kernel2.gradient(x1, x2, &mut grad[n1..n]);
        // Product rule: fresh re-evaluation of both factors, no caching
        let v1 = self.kernel1.value(x1, x2);
        let v2 = self.kernel2.value(x1, x2);
        for g in &mut grad[..n1] {
            *g *= v2;
        }
        for g in &mut grad[n1..n] {
            *g *= v1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stationary::{ExpSquared, RationalQuadratic, StationaryKernel};
    use gpcov_core::{EuclideanMetric, IsotropicMetric};
    use approx::assert_relative_eq;

    fn exp_squared(ndim: usize) -> StationaryKernel<ExpSquared, EuclideanMetric> {
        StationaryKernel::new(ExpSquared, EuclideanMetric::new(ndim).unwrap())
    }

    fn rq(ndim: usize, alpha: f64, ell: f64) -> StationaryKernel<RationalQuadratic, IsotropicMetric> {
        StationaryKernel::new(
            RationalQuadratic::new(alpha).unwrap(),
            IsotropicMetric::new(ndim, ell).unwrap(),
        )
    }

    #[test]
    fn test_size_is_additive() {
        let sum = Sum::of(rq(1, 1.0, 1.0), exp_squared(1)).unwrap();
        assert_eq!(sum.n_parameters(), 2);
        let product = Product::of(rq(1, 1.0, 1.0), rq(1, 2.0, 2.0)).unwrap();
        assert_eq!(product.n_parameters(), 4);
    }

    #[test]
    fn test_sum_and_product_values() {
        let (x1, x2) = ([0.0], [1.0]);
        let a = exp_squared(1);
        let b = rq(1, 1.0, 2.0);
        let va = a.value(&x1, &x2);
        let vb = b.value(&x1, &x2);

        let sum = Sum::of(exp_squared(1), rq(1, 1.0, 2.0)).unwrap();
        assert_relative_eq!(sum.value(&x1, &x2), va + vb);

        let product = Product::of(exp_squared(1), rq(1, 1.0, 2.0)).unwrap();
        assert_relative_eq!(product.value(&x1, &x2), va * vb);
    }

    #[test]
    fn test_values_commute() {
        let (x1, x2) = ([0.4], [-1.1]);
        let ab = Sum::of(rq(1, 1.5, 0.8), exp_squared(1)).unwrap();
        let ba = Sum::of(exp_squared(1), rq(1, 1.5, 0.8)).unwrap();
        assert_relative_eq!(ab.value(&x1, &x2), ba.value(&x1, &x2));

        let ab = Product::of(rq(1, 1.5, 0.8), exp_squared(1)).unwrap();
        let ba = Product::of(exp_squared(1), rq(1, 1.5, 0.8)).unwrap();
        assert_relative_eq!(ab.value(&x1, &x2), ba.value(&x1, &x2));
    }

    #[test]
    fn test_parameter_layout_follows_construction_order() {
        // rq(alpha, ell) first: indices 0..2 are its (alpha, ell)
        let ab = Sum::of(rq(1, 1.5, 0.8), rq(1, 3.0, 2.5)).unwrap();
        assert_eq!(ab.parameters(), vec![1.5, 0.8, 3.0, 2.5]);

        let ba = Sum::of(rq(1, 3.0, 2.5), rq(1, 1.5, 0.8)).unwrap();
        assert_eq!(ba.parameters(), vec![3.0, 2.5, 1.5, 0.8]);
    }

    #[test]
    fn test_parameter_routing_roundtrip() {
        let mut tree = Product::of(rq(1, 1.0, 1.0), rq(1, 2.0, 2.0)).unwrap();
        for i in 0..tree.n_parameters() {
            tree.set_parameter(i, 10.0 + i as f64);
        }
        assert_eq!(tree.parameters(), vec![10.0, 11.0, 12.0, 13.0]);
        // Child accessors see the routed values
        assert_eq!(tree.kernel1().parameters(), vec![10.0, 11.0]);
        assert_eq!(tree.kernel2().parameters(), vec![12.0, 13.0]);
    }

    #[test]
    fn test_ndim_mismatch_rejected_at_construction() {
        assert!(Sum::of(exp_squared(1), exp_squared(2)).is_err());
        assert!(Product::of(exp_squared(3), exp_squared(2)).is_err());
    }

    #[test]
    fn test_product_of_unit_exp_squared_closed_form() {
        // exp(-0.5 * 1.0) squared
        let (x1, x2) = ([0.0], [1.0]);
        let k = exp_squared(1);
        assert_relative_eq!(k.value(&x1, &x2), (-0.5f64).exp(), epsilon = 1e-12);

        let product = Product::of(exp_squared(1), exp_squared(1)).unwrap();
        assert_relative_eq!(product.value(&x1, &x2), (-1.0f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_product_gradient_rescaling() {
        let (x1, x2) = ([0.2], [1.3]);
        let product = Product::of(rq(1, 1.2, 0.9), rq(1, 2.0, 1.7)).unwrap();

        let mut grad = vec![0.0; 4];
        product.gradient(&x1, &x2, &mut grad);

        let mut g1 = vec![0.0; 2];
        product.kernel1().gradient(&x1, &x2, &mut g1);
        let mut g2 = vec![0.0; 2];
        product.kernel2().gradient(&x1, &x2, &mut g2);
        let v1 = product.kernel1().value(&x1, &x2);
        let v2 = product.kernel2().value(&x1, &x2);

        for i in 0..2 {
            assert_relative_eq!(grad[i], g1[i] * v2, epsilon = 1e-12);
            assert_relative_eq!(grad[2 + i], g2[i] * v1, epsilon = 1e-12);
        }
    }

    #[test]
    #[should_panic]
    fn test_gradient_buffer_too_small_panics() {
        let sum = Sum::of(rq(1, 1.0, 1.0), rq(1, 2.0, 2.0)).unwrap();
        let mut grad = vec![0.0; 3];
        sum.gradient(&[0.0], &[1.0], &mut grad);
    }
}
