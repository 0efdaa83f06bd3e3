//! Random initialization and ndarray interop

use super::types::{check_shape, Matrix};
use crate::error::{MatrixError, MatrixResult};
use scirs2_core::ndarray_ext::Array2;

impl Matrix {
    /// Create a matrix with values drawn uniformly from `[low, high)`
    ///
    /// Uses scirs2_core::random for RNG.
    ///
    /// # Examples
    ///
    /// ```
    /// use matrso_core::Matrix;
    ///
    /// let m = Matrix::random_uniform(3, 4, -1.0, 1.0).unwrap();
    /// assert_eq!(m.shape(), (3, 4));
    /// assert!(m.as_slice().iter().all(|&x| (-1.0..1.0).contains(&x)));
    /// ```
    pub fn random_uniform(rows: usize, cols: usize, low: f64, high: f64) -> MatrixResult<Self> {
        use scirs2_core::random::quick::random_f64;
        check_shape(rows, cols)?;
        let range = high - low;
        let data: Vec<f64> = (0..rows * cols)
            .map(|_| low + random_f64() * range)
            .collect();
        Ok(Self { rows, cols, data })
    }

    /// Copy a two-dimensional array into a matrix
    pub fn from_array2(array: &Array2<f64>) -> MatrixResult<Self> {
        let (rows, cols) = array.dim();
        check_shape(rows, cols)?;
        let data: Vec<f64> = array.iter().copied().collect();
        Ok(Self { rows, cols, data })
    }

    /// Copy the live elements into a two-dimensional array
    pub fn to_array2(&self) -> MatrixResult<Array2<f64>> {
        Array2::from_shape_vec((self.rows, self.cols), self.to_vec())
            .map_err(|e| MatrixError::InvalidDimensions(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_uniform_range() {
        let m = Matrix::random_uniform(10, 10, 2.0, 3.0).unwrap();
        assert!(m.as_slice().iter().all(|&x| (2.0..3.0).contains(&x)));
    }

    #[test]
    fn test_array2_roundtrip_is_row_major() {
        let array = Array2::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let m = Matrix::from_array2(&array).unwrap();
        assert_eq!(m.get(1, 0), 4.0);
        let back = m.to_array2().unwrap();
        assert_eq!(back, array);
    }

    #[test]
    fn test_from_transposed_array_view_order() {
        // iteration follows logical order even for a non-standard layout
        let array = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let t = array.t().to_owned();
        let m = Matrix::from_array2(&t).unwrap();
        assert_eq!(m.to_vec(), vec![1.0, 3.0, 2.0, 4.0]);
    }
}
