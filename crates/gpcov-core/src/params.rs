//! Flat parameter-vector protocol
//!
//! Every node in a kernel tree — and every distance metric — exposes its
//! tunable hyperparameters through the same dense, 0-based, contiguous
//! vector view. External optimizers operate on this flat vector without
//! knowing anything about the tree structure behind it.
//!
//! The central contract: `parameter(i)` and `set_parameter(i, v)` for
//! `0 <= i < n_parameters()` address the same logical slot that a
//! gradient computation writes at index `i`. Composite nodes preserve
//! this transitively by concatenating their children's vectors.

use crate::{Error, Result};

/// Random access into a component's flattened hyperparameter vector
///
/// # Panics
///
/// `parameter` and `set_parameter` panic on an index outside
/// `[0, n_parameters())`. An out-of-range index is a programmer error,
/// equivalent to out-of-bounds slice indexing, and is not recoverable.
pub trait Parameterized {
    /// Number of entries in this component's parameter vector
    fn n_parameters(&self) -> usize;

    /// Read the parameter at index `i`
    fn parameter(&self, i: usize) -> f64;

    /// Overwrite the parameter at index `i`
    fn set_parameter(&mut self, i: usize, value: f64);

    /// Collect the full parameter vector
    fn parameters(&self) -> Vec<f64> {
        (0..self.n_parameters()).map(|i| self.parameter(i)).collect()
    }

    /// Overwrite the full parameter vector from a slice
    ///
    /// Fails without modifying anything if `values.len()` disagrees with
    /// `n_parameters()`.
    fn set_parameters(&mut self, values: &[f64]) -> Result<()> {
        let n = self.n_parameters();
        if values.len() != n {
            return Err(Error::ParameterCount {
                expected: n,
                actual: values.len(),
            });
        }
        for (i, &v) in values.iter().enumerate() {
            self.set_parameter(i, v);
        }
        Ok(())
    }
}
