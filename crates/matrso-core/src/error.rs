//! Error types for matrix operations
//!
//! Every fallible named operation on [`Matrix`](crate::Matrix) and on the
//! decompositions returns [`MatrixResult`]. Operator overloads panic instead,
//! with the same message these errors render.
//!
//! # Examples
//!
//! ```
//! use matrso_core::{Matrix, MatrixError};
//!
//! let a = Matrix::zeros(2, 3).unwrap();
//! let b = Matrix::zeros(2, 3).unwrap();
//! match a.mul(&b) {
//!     Err(MatrixError::DimensionMismatch { operation, .. }) => assert_eq!(operation, "mul"),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

use matrso_kernels::KernelError;
use thiserror::Error;

/// Errors raised by matrix operations and decompositions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// Operand dimensions are incompatible
    #[error("{operation}: dimension mismatch, expected {}x{}, got {}x{}", expected.0, expected.1, actual.0, actual.1)]
    DimensionMismatch {
        operation: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// The operation needs a square matrix
    #[error("{operation}: matrix must be square, got {rows}x{cols}")]
    NotSquare {
        operation: &'static str,
        rows: usize,
        cols: usize,
    },

    /// Least-squares solve on a rank-deficient QR factorization
    #[error("Matrix is rank deficient")]
    RankDeficient,

    /// LU solve or inverse with an exactly zero pivot
    #[error("Matrix is singular")]
    Singular,

    /// Cholesky solve on a matrix that failed the symmetric positive-definite check
    #[error("Matrix is not symmetric positive definite")]
    NotSymmetricPositiveDefinite,

    /// Determinant requested from an eigen decomposition with complex eigenvalues
    #[error("Matrix has complex eigenvalues")]
    ComplexEigenvalues,

    /// Row or column index outside the valid range
    #[error("{operation}: index {index} out of bounds (limit {bound})")]
    IndexOutOfBounds {
        operation: &'static str,
        index: usize,
        bound: usize,
    },

    /// Zero-sized shape or a buffer too short for the requested shape
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Malformed textual matrix
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error reported by the multiplication kernels
    #[error("Kernel error: {0}")]
    Kernel(#[from] KernelError),
}

/// Result type for matrix operations
pub type MatrixResult<T> = Result<T, MatrixError>;

impl MatrixError {
    pub(crate) fn mismatch(
        operation: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> Self {
        MatrixError::DimensionMismatch {
            operation,
            expected,
            actual,
        }
    }

    pub(crate) fn not_square(operation: &'static str, rows: usize, cols: usize) -> Self {
        MatrixError::NotSquare {
            operation,
            rows,
            cols,
        }
    }
}
