//! gp-cov: composable Gaussian-process covariance functions
//!
//! Facade crate re-exporting the workspace members:
//!
//! - [`gpcov_core`] — parameter-vector protocol, distance metrics, axis
//!   subspaces, construction errors
//! - [`gpcov_kernels`] — the kernel algebra: leaf families and the
//!   Sum/Product composition operators
//!
//! # Example
//!
//! ```rust
//! use gp_cov::{
//!     EuclideanMetric, ExpSquared, Kernel, Parameterized, Product, StationaryKernel,
//! };
//!
//! let leaf = || StationaryKernel::new(ExpSquared, EuclideanMetric::new(1).unwrap());
//! let tree = Product::of(leaf(), leaf()).unwrap();
//!
//! let value = tree.value(&[0.0], &[1.0]);
//! let mut grad = vec![0.0; tree.n_parameters()];
//! tree.gradient(&[0.0], &[1.0], &mut grad);
//! assert!((value - (-1.0f64).exp()).abs() < 1e-12);
//! ```

pub use gpcov_core;
pub use gpcov_kernels;

pub use gpcov_core::{
    AxisAlignedMetric, Error, EuclideanMetric, IsotropicMetric, Metric, Parameterized, Result,
    Subspace,
};
pub use gpcov_kernels::{
    AxisSumKernel, Constant, Cosine, DotProduct, Exp, ExpSine2, ExpSquared, Kernel, Matern32,
    Matern52, PairForm, Product, RadialForm, RationalQuadratic, StationaryKernel, Sum,
};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_facade_reexports_compose() {
        let periodic = AxisSumKernel::new(
            ExpSine2::new(1.0, 2.0).unwrap(),
            Subspace::full(1).unwrap(),
        );
        let smooth = StationaryKernel::new(
            Matern52,
            IsotropicMetric::new(1, 1.5).unwrap(),
        );
        let tree = Sum::of(periodic, smooth).unwrap();
        assert_eq!(tree.n_parameters(), 3);
        assert_relative_eq!(tree.value(&[0.3], &[0.3]), 2.0);
    }
}
