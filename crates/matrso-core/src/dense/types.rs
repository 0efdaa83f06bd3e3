//! Dense matrix type definition and basic constructors
//!
//! This module defines the core [`Matrix`] type. Operations are organized in
//! the sibling modules by concern (arithmetic, structure, norms, ...).

use crate::error::{MatrixError, MatrixResult};

/// Tolerance used by `PartialEq` and the default approximate comparisons
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Dense row-major matrix of `f64`
///
/// Element `(i, j)` lives at `data[i * cols + j]`. The buffer may be longer
/// than `rows * cols`; the slack is spare capacity for row and column
/// insertion and is only visible through [`Matrix::capacity`].
///
/// # Examples
///
/// ```
/// use matrso_core::Matrix;
///
/// let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// assert_eq!(a.rows(), 2);
/// assert_eq!(a.cols(), 2);
/// assert_eq!(a.get(1, 0), 3.0);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) data: Vec<f64>,
}

pub(crate) fn check_shape(rows: usize, cols: usize) -> MatrixResult<()> {
    if rows == 0 || cols == 0 {
        return Err(MatrixError::InvalidDimensions(format!(
            "matrix must have at least one row and one column, got {}x{}",
            rows, cols
        )));
    }
    Ok(())
}

impl Matrix {
    /// Create a `rows×cols` matrix filled with zeros
    pub fn zeros(rows: usize, cols: usize) -> MatrixResult<Self> {
        Self::filled(rows, cols, 0.0)
    }

    /// Create a `rows×cols` matrix with every element set to `value`
    pub fn filled(rows: usize, cols: usize, value: f64) -> MatrixResult<Self> {
        check_shape(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        })
    }

    /// Create the `n×n` identity matrix
    ///
    /// # Examples
    ///
    /// ```
    /// use matrso_core::Matrix;
    ///
    /// let id = Matrix::identity(3).unwrap();
    /// assert_eq!(id.trace().unwrap(), 3.0);
    /// ```
    pub fn identity(n: usize) -> MatrixResult<Self> {
        let mut m = Self::zeros(n, n)?;
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        Ok(m)
    }

    /// Create a zero matrix whose buffer holds `capacity` elements.
    ///
    /// Rows and columns can later be inserted without reallocating as long
    /// as the new shape fits in `capacity`. A capacity below `rows * cols`
    /// is raised to it.
    pub fn with_capacity(rows: usize, cols: usize, capacity: usize) -> MatrixResult<Self> {
        check_shape(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            data: vec![0.0f64; capacity.max(rows * cols)],
        })
    }

    /// Adopt `data` as the row-major buffer without copying.
    ///
    /// Any elements past `rows * cols` become spare capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use matrso_core::Matrix;
    ///
    /// let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(a.get(0, 1), 2.0);
    /// assert!(Matrix::from_vec(2, 2, vec![1.0]).is_err());
    /// ```
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> MatrixResult<Self> {
        check_shape(rows, cols)?;
        if data.len() < rows * cols {
            return Err(MatrixError::InvalidDimensions(format!(
                "buffer of {} elements cannot hold a {}x{} matrix",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Copy `rows * cols` elements of `data` starting at `offset`
    pub fn from_slice_at(
        rows: usize,
        cols: usize,
        data: &[f64],
        offset: usize,
    ) -> MatrixResult<Self> {
        check_shape(rows, cols)?;
        let end = offset + rows * cols;
        if data.len() < end {
            return Err(MatrixError::InvalidDimensions(format!(
                "buffer of {} elements cannot supply {}x{} from offset {}",
                data.len(),
                rows,
                cols,
                offset
            )));
        }
        Ok(Self {
            rows,
            cols,
            data: data[offset..end].to_vec(),
        })
    }

    /// Build from a two-dimensional literal; every row must have the same length
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> MatrixResult<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        check_shape(rows.len(), cols)?;
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(MatrixError::InvalidDimensions(format!(
                    "row {} has {} elements, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Build a matrix from a function of `(row, col)`
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> MatrixResult<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        check_shape(rows, cols)?;
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Ok(Self { rows, cols, data })
    }

    /// Wrap a buffer whose shape the caller has already validated
    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert!(rows > 0 && cols > 0 && data.len() >= rows * cols);
        Self { rows, cols, data }
    }

    /// Number of rows (height)
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (width)
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Number of elements the backing buffer can hold
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// The live `rows * cols` elements in row-major order
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data[..self.rows * self.cols]
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        let len = self.rows * self.cols;
        &mut self.data[..len]
    }

    /// Copy out the live elements in row-major order
    pub fn to_vec(&self) -> Vec<f64> {
        self.as_slice().to_vec()
    }

    pub(crate) fn require_square(&self, operation: &'static str) -> MatrixResult<()> {
        if !self.is_square() {
            return Err(MatrixError::not_square(operation, self.rows, self.cols));
        }
        Ok(())
    }

    pub(crate) fn require_same_shape(
        &self,
        other: &Matrix,
        operation: &'static str,
    ) -> MatrixResult<()> {
        if self.shape() != other.shape() {
            return Err(MatrixError::mismatch(operation, self.shape(), other.shape()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(Matrix::zeros(0, 3).is_err());
        assert!(Matrix::filled(2, 0, 1.0).is_err());
        assert!(Matrix::from_rows::<Vec<f64>>(&[]).is_err());
    }

    #[test]
    fn test_from_vec_keeps_slack_as_capacity() {
        let m = Matrix::from_vec(2, 2, vec![1.0; 10]).unwrap();
        assert_eq!(m.capacity(), 10);
        assert_eq!(m.as_slice().len(), 4);
    }

    #[test]
    fn test_from_slice_at_copies_from_offset() {
        let buf = [9.0, 9.0, 1.0, 2.0, 3.0, 4.0];
        let m = Matrix::from_slice_at(2, 2, &buf, 2).unwrap();
        assert_eq!(m.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
        assert!(Matrix::from_slice_at(2, 2, &buf, 3).is_err());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, MatrixError::InvalidDimensions(_)));
    }

    #[test]
    fn test_with_capacity() {
        let m = Matrix::with_capacity(2, 3, 24).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.capacity(), 24);
        let small = Matrix::with_capacity(2, 3, 1).unwrap();
        assert_eq!(small.capacity(), 6);
    }
}
