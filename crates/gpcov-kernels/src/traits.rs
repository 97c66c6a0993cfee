//! The covariance-function contract
//!
//! Every node in a kernel expression tree — leaves and Sum/Product
//! operators alike — implements [`Kernel`]. A consumer (a GP likelihood,
//! a marginalization routine, a hyperparameter optimizer) only ever sees
//! the root of a tree through this trait.

use gpcov_core::Parameterized;

/// A node in a covariance expression tree
///
/// `value` and `gradient` are pure functions of the current parameter
/// values and the two input points. They take `&self`, so a fully built
/// tree may be evaluated concurrently from many threads; mutation goes
/// through [`Parameterized::set_parameter`], which takes `&mut self` and
/// therefore excludes concurrent readers at compile time.
///
/// # Gradient contract
///
/// `gradient` writes exactly `n_parameters()` leading entries of `grad`,
/// where `grad[i]` is the partial derivative of `value(x1, x2)` with
/// respect to the parameter that `parameter(i)` reads. Implementations
/// assert `grad.len() >= n_parameters()` before writing.
///
/// # Numeric degeneracies
///
/// Degenerate inputs (identical points under a non-smooth form, a zero
/// length scale) propagate whatever IEEE-754 result the closed-form
/// expressions produce; callers detect NaN/Inf with the standard float
/// predicates.
pub trait Kernel: Parameterized + Send + Sync {
    /// Required input dimensionality
    fn ndim(&self) -> usize;

    /// Covariance between two `ndim`-dimensional points
    fn value(&self, x1: &[f64], x2: &[f64]) -> f64;

    /// Write the partial derivative of `value(x1, x2)` w.r.t. parameter
    /// `i` into `grad[i]`, for every own parameter
    fn gradient(&self, x1: &[f64], x2: &[f64], grad: &mut [f64]);
}
