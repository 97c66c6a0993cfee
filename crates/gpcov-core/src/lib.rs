//! Foundational contracts for gp-cov
//!
//! This crate provides the pieces the kernel algebra in `gpcov-kernels`
//! builds on:
//!
//! - [`Parameterized`] — the flat hyperparameter-vector protocol shared
//!   by every kernel-tree node and every metric
//! - [`Metric`] — squared-distance providers for stationary kernels,
//!   with concrete Euclidean, isotropic, and axis-aligned metrics
//! - [`Subspace`] — axis-subset selection for non-stationary kernels
//! - [`Error`] / [`Result`] — construction-time failures
//!
//! # Design Philosophy
//!
//! - **Fail at assembly, not in the hot path**: everything checkable is
//!   checked by `Result`-returning constructors; `value`/`gradient`
//!   never allocate, lock, or return errors
//! - **One parameter protocol**: metrics reuse the kernel parameter
//!   contract verbatim, so composite parameter vectors concatenate
//!   without special cases

pub mod error;
pub mod metric;
pub mod params;
pub mod subspace;

pub use error::{Error, Result};
pub use metric::{AxisAlignedMetric, EuclideanMetric, IsotropicMetric, Metric};
pub use params::Parameterized;
pub use subspace::Subspace;
