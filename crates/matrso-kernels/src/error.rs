//! Error types for multiplication kernel operations
//!
//! This module provides structured error types for kernel operations,
//! making error handling more robust and informative.

use std::fmt;

/// Error type for multiplication kernel operations
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Dimension mismatch between operands
    DimensionMismatch {
        operation: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
        context: String,
    },

    /// A flat buffer is shorter than its declared dimensions require
    BufferTooShort {
        operation: String,
        parameter: String,
        required: usize,
        actual: usize,
    },

    /// Empty input not allowed
    EmptyInput {
        operation: String,
        parameter: String,
    },

    /// Generic operation error with context
    OperationError { operation: String, message: String },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::DimensionMismatch {
                operation,
                expected,
                actual,
                context,
            } => write!(
                f,
                "{}: dimension mismatch - expected {:?}, got {:?}. {}",
                operation, expected, actual, context
            ),

            KernelError::BufferTooShort {
                operation,
                parameter,
                required,
                actual,
            } => write!(
                f,
                "{}: buffer '{}' holds {} elements but {} are required",
                operation, parameter, actual, required
            ),

            KernelError::EmptyInput {
                operation,
                parameter,
            } => write!(
                f,
                "{}: empty input not allowed for parameter '{}'",
                operation, parameter
            ),

            KernelError::OperationError { operation, message } => {
                write!(f, "{}: {}", operation, message)
            }
        }
    }
}

impl std::error::Error for KernelError {}

/// Result type for kernel operations
pub type KernelResult<T> = Result<T, KernelError>;

impl KernelError {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(
        operation: impl Into<String>,
        expected: Vec<usize>,
        actual: Vec<usize>,
        context: impl Into<String>,
    ) -> Self {
        KernelError::DimensionMismatch {
            operation: operation.into(),
            expected,
            actual,
            context: context.into(),
        }
    }

    /// Create a short buffer error
    pub fn buffer_too_short(
        operation: impl Into<String>,
        parameter: impl Into<String>,
        required: usize,
        actual: usize,
    ) -> Self {
        KernelError::BufferTooShort {
            operation: operation.into(),
            parameter: parameter.into(),
            required,
            actual,
        }
    }

    /// Create an empty input error
    pub fn empty_input(operation: impl Into<String>, parameter: impl Into<String>) -> Self {
        KernelError::EmptyInput {
            operation: operation.into(),
            parameter: parameter.into(),
        }
    }

    /// Create a generic operation error
    pub fn operation_error(operation: impl Into<String>, message: impl Into<String>) -> Self {
        KernelError::OperationError {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = KernelError::dimension_mismatch(
            "multiply",
            vec![4, 3],
            vec![5, 3],
            "inner dimensions must agree",
        );

        let msg = format!("{}", err);
        assert!(msg.contains("multiply"));
        assert!(msg.contains("dimension mismatch"));
        assert!(msg.contains("[4, 3]"));
        assert!(msg.contains("[5, 3]"));
    }

    #[test]
    fn test_buffer_too_short_display() {
        let err = KernelError::buffer_too_short("multiply", "a", 12, 10);

        let msg = format!("{}", err);
        assert!(msg.contains("buffer 'a'"));
        assert!(msg.contains("holds 10"));
        assert!(msg.contains("12 are required"));
    }

    #[test]
    fn test_empty_input_display() {
        let err = KernelError::empty_input("multiply", "l");

        let msg = format!("{}", err);
        assert!(msg.contains("multiply"));
        assert!(msg.contains("empty input"));
        assert!(msg.contains("'l'"));
    }

    #[test]
    fn test_operation_error_display() {
        let err = KernelError::operation_error("matrix_power", "matrix must be square");
        assert_eq!(format!("{}", err), "matrix_power: matrix must be square");
    }
}
