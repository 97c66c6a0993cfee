//! Composable Gaussian-process covariance functions
//!
//! Kernels form a binary expression tree: primitive (leaf) kernels are
//! combined with [`Sum`] and [`Product`] nodes into arbitrary shapes,
//! and the whole tree exposes one flattened hyperparameter vector whose
//! indices line up exactly with the gradient vector every node writes.
//!
//! Leaves come in two structural families:
//!
//! - **Stationary** ([`StationaryKernel`]): a [`RadialForm`] — a shape
//!   as a function of squared distance — evaluated through a pluggable
//!   distance [`Metric`](gpcov_core::Metric). Metric parameters are
//!   appended to the form's own and their gradients are chain-ruled
//!   through the radial derivative.
//! - **Non-stationary** ([`AxisSumKernel`]): a [`PairForm`] evaluated on
//!   one coordinate pair per selected axis of a
//!   [`Subspace`](gpcov_core::Subspace) and summed.
//!
//! # Example
//!
//! ```rust
//! use gpcov_core::{EuclideanMetric, Parameterized};
//! use gpcov_kernels::{ExpSquared, Kernel, Product, StationaryKernel};
//!
//! let leaf = || StationaryKernel::new(ExpSquared, EuclideanMetric::new(1).unwrap());
//! let tree = Product::of(leaf(), leaf()).unwrap();
//!
//! let (x1, x2) = ([0.0], [1.0]);
//! assert!((tree.value(&x1, &x2) - (-1.0f64).exp()).abs() < 1e-12);
//!
//! let mut grad = vec![0.0; tree.n_parameters()];
//! tree.gradient(&x1, &x2, &mut grad);
//! ```

pub mod axis;
pub mod ops;
pub mod stationary;
pub mod traits;

pub use axis::{AxisSumKernel, Constant, Cosine, DotProduct, ExpSine2, PairForm};
pub use ops::{Product, Sum};
pub use stationary::{
    Exp, ExpSquared, Matern32, Matern52, RadialForm, RationalQuadratic, StationaryKernel,
};
pub use traits::Kernel;
