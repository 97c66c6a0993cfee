//! Axis-subset selection for non-stationary covariance functions
//!
//! A non-stationary kernel evaluates a per-axis formula over a chosen
//! subset of the input coordinates and sums the contributions. The
//! subset is a fixed structural choice made at construction time; it
//! carries no learnable parameters and therefore contributes nothing to
//! any gradient vector.

use crate::{Error, Result};

/// Validated selection of input axes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subspace {
    ndim: usize,
    axes: Vec<usize>,
}

impl Subspace {
    /// Select the given axes of an `ndim`-dimensional input
    ///
    /// Every axis index must be below `ndim`. An empty selection is
    /// valid: a kernel over it evaluates to exactly zero.
    pub fn new(ndim: usize, axes: Vec<usize>) -> Result<Self> {
        if ndim == 0 {
            return Err(Error::InvalidParameter(
                "subspace dimensionality must be at least 1".to_string(),
            ));
        }
        for &axis in &axes {
            if axis >= ndim {
                return Err(Error::AxisOutOfBounds { axis, ndim });
            }
        }
        log::debug!("subspace: {} of {ndim} axes selected", axes.len());
        Ok(Self { ndim, axes })
    }

    /// Select every axis of an `ndim`-dimensional input
    pub fn full(ndim: usize) -> Result<Self> {
        Self::new(ndim, (0..ndim).collect())
    }

    /// Full input dimensionality
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Number of selected axes
    pub fn n_axes(&self) -> usize {
        self.axes.len()
    }

    /// Map a local axis index to a full-dimensional coordinate index
    pub fn axis(&self, i: usize) -> usize {
        self.axes[i]
    }

    /// Iterate over the selected coordinate indices in selection order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.axes.iter().copied()
    }
}
