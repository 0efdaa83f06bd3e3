//! Approximate equality
//!
//! `PartialEq` compares with [`DEFAULT_TOLERANCE`], never bitwise. Values
//! are compared absolutely below magnitude 1 and relatively above it.

use super::types::{Matrix, DEFAULT_TOLERANCE};

#[inline]
pub(crate) fn approx_eq_scalar(a: f64, b: f64, tolerance: f64) -> bool {
    a == b || (a - b).abs() <= tolerance * a.abs().max(b.abs()).max(1.0)
}

impl Matrix {
    /// Same shape and every pair of cells within `tolerance`
    ///
    /// # Examples
    ///
    /// ```
    /// use matrso_core::Matrix;
    ///
    /// let a = Matrix::from_rows(&[[1.0, 2.0]]).unwrap();
    /// let b = Matrix::from_rows(&[[1.0 + 1e-12, 2.0]]).unwrap();
    /// assert!(a.approx_eq(&b, 1e-10));
    /// assert!(!a.approx_eq(&b, 1e-14));
    /// ```
    pub fn approx_eq(&self, other: &Matrix, tolerance: f64) -> bool {
        self.shape() == other.shape()
            && self
                .as_slice()
                .iter()
                .zip(other.as_slice())
                .all(|(&a, &b)| approx_eq_scalar(a, b, tolerance))
    }

    /// Largest absolute element-wise difference, or `None` if shapes differ
    pub fn max_abs_diff(&self, other: &Matrix) -> Option<f64> {
        if self.shape() != other.shape() {
            return None;
        }
        Some(
            self.as_slice()
                .iter()
                .zip(other.as_slice())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
        )
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, DEFAULT_TOLERANCE)
    }
}
