//! Error types for kernel-tree construction
//!
//! Provides a unified error type for all gp-cov crates. Errors occur only
//! while a tree is being assembled; the evaluation hot path is infallible.

use thiserror::Error;

/// Core error type for covariance-function construction
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid hyperparameter supplied to a constructor
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Two components disagree on input dimensionality
    #[error("Dimension mismatch: expected {expected} input dimensions, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A subspace selects an axis outside the input space
    #[error("Axis {axis} out of bounds for {ndim}-dimensional input")]
    AxisOutOfBounds { axis: usize, ndim: usize },

    /// A flat parameter vector has the wrong length
    #[error("Parameter vector length mismatch: expected {expected}, got {actual}")]
    ParameterCount { expected: usize, actual: usize },
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a hyperparameter that must be positive
    pub fn non_positive(name: &str, value: f64) -> Self {
        Self::InvalidParameter(format!("{name} must be positive, got {value}"))
    }

    /// Create an error for a hyperparameter that must be finite
    pub fn non_finite(name: &str) -> Self {
        Self::InvalidParameter(format!("{name} must be finite"))
    }

    /// Create an error for an input-dimensionality disagreement
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("alpha must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: alpha must be positive");

        let err = Error::DimensionMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "Dimension mismatch: expected 3 input dimensions, got 2"
        );

        let err = Error::AxisOutOfBounds { axis: 5, ndim: 3 };
        assert_eq!(err.to_string(), "Axis 5 out of bounds for 3-dimensional input");

        let err = Error::ParameterCount {
            expected: 4,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "Parameter vector length mismatch: expected 4, got 2"
        );
    }

    #[test]
    fn test_error_helpers() {
        let err = Error::non_positive("length scale", -1.0);
        assert_eq!(
            err.to_string(),
            "Invalid parameter: length scale must be positive, got -1"
        );

        let err = Error::non_finite("period");
        assert_eq!(err.to_string(), "Invalid parameter: period must be finite");

        let err = Error::dimension_mismatch(2, 1);
        match err {
            Error::DimensionMismatch { expected, actual } => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            _ => panic!("Wrong error type"),
        }
    }
}
