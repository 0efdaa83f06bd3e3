//! Norms, determinant, rank and linear solves
//!
//! The spectral quantities (`norm2`, `rank`, `cond`) run a singular value
//! decomposition without accumulating vectors. `det` and `invert` go through
//! LU; `solve` picks LU for square systems and QR least squares otherwise.

use super::types::Matrix;
use crate::error::{MatrixError, MatrixResult};

impl Matrix {
    /// Sum of the diagonal of a square matrix
    pub fn trace(&self) -> MatrixResult<f64> {
        self.require_square("trace")?;
        Ok((0..self.rows).map(|i| self.data[i * self.cols + i]).sum())
    }

    /// Sum of all elements
    pub fn sum(&self) -> f64 {
        self.as_slice().iter().sum()
    }

    /// One-norm: maximum absolute column sum
    pub fn norm1(&self) -> f64 {
        (0..self.cols)
            .map(|j| (0..self.rows).map(|i| self.data[i * self.cols + j].abs()).sum::<f64>())
            .fold(0.0, f64::max)
    }

    /// Infinity norm: maximum absolute row sum
    pub fn norm_inf(&self) -> f64 {
        self.as_slice()
            .chunks_exact(self.cols)
            .map(|row| row.iter().map(|x| x.abs()).sum::<f64>())
            .fold(0.0, f64::max)
    }

    /// Frobenius norm, accumulated with `hypot` so it neither overflows nor
    /// underflows on extreme magnitudes
    ///
    /// # Examples
    ///
    /// ```
    /// use matrso_core::Matrix;
    ///
    /// let a = Matrix::from_rows(&[[3.0, 0.0], [0.0, 4.0]]).unwrap();
    /// assert_eq!(a.norm_frobenius(), 5.0);
    ///
    /// let huge = Matrix::filled(2, 2, 1e300).unwrap();
    /// assert!((huge.norm_frobenius() - 2e300).abs() < 1e286);
    /// ```
    pub fn norm_frobenius(&self) -> f64 {
        self.as_slice().iter().fold(0.0, |acc: f64, &x| acc.hypot(x))
    }

    /// Two-norm: the largest singular value
    pub fn norm2(&self) -> MatrixResult<f64> {
        Ok(self.singular_value_decompose(false, false)?.norm2())
    }

    /// Determinant of a square matrix
    pub fn det(&self) -> MatrixResult<f64> {
        self.require_square("det")?;
        self.lu_decompose()?.det()
    }

    /// Numerical rank from the singular values
    pub fn rank(&self) -> MatrixResult<usize> {
        Ok(self.singular_value_decompose(false, false)?.rank())
    }

    /// Two-norm condition number
    pub fn cond(&self) -> MatrixResult<f64> {
        Ok(self.singular_value_decompose(false, false)?.cond())
    }

    /// Solve `A·X = B`: exact for square `A`, least squares otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use matrso_core::Matrix;
    ///
    /// let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 3.0]]).unwrap();
    /// let b = Matrix::from_rows(&[[3.0], [5.0]]).unwrap();
    /// let x = a.solve(&b).unwrap();
    /// assert!(a.mul(&x).unwrap().approx_eq(&b, 1e-12));
    /// ```
    pub fn solve(&self, b: &Matrix) -> MatrixResult<Matrix> {
        if b.rows != self.rows {
            return Err(MatrixError::mismatch(
                "solve",
                (self.rows, b.cols),
                b.shape(),
            ));
        }
        if self.is_square() {
            self.lu_decompose()?.solve(b)
        } else {
            self.qr_decompose()?.solve(b)
        }
    }

    /// Solve `X·A = B`
    pub fn solve_transpose(&self, b: &Matrix) -> MatrixResult<Matrix> {
        if b.cols != self.cols {
            return Err(MatrixError::mismatch(
                "solve_transpose",
                (b.rows, self.cols),
                b.shape(),
            ));
        }
        Ok(self.transpose().solve(&b.transpose())?.transpose())
    }

    /// Inverse of a square matrix
    ///
    /// # Errors
    ///
    /// `NotSquare` for rectangular input and `Singular` when LU meets an
    /// exactly zero pivot.
    pub fn invert(&self) -> MatrixResult<Matrix> {
        self.require_square("invert")?;
        self.lu_decompose()?.inverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix {
        Matrix::from_rows(&[[1.0, -2.0, 3.0], [-4.0, 5.0, -6.0], [7.0, 8.0, 10.0]]).unwrap()
    }

    #[test]
    fn test_trace_and_sum() {
        let a = sample();
        assert_eq!(a.trace().unwrap(), 16.0);
        assert_eq!(a.sum(), 22.0);
        assert!(Matrix::zeros(2, 3).unwrap().trace().is_err());
    }

    #[test]
    fn test_norms() {
        let a = sample();
        assert_eq!(a.norm1(), 19.0);
        assert_eq!(a.norm_inf(), 25.0);
        let fro: f64 = a.as_slice().iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!((a.norm_frobenius() - fro).abs() < 1e-12);
        assert!(a.norm2().unwrap() <= a.norm_frobenius() + 1e-12);
    }

    #[test]
    fn test_det_rank_cond() {
        let a = Matrix::from_rows(&[[4.0, 0.0], [0.0, 9.0]]).unwrap();
        assert!((a.det().unwrap() - 36.0).abs() < 1e-12);
        assert_eq!(a.rank().unwrap(), 2);
        assert!((a.cond().unwrap() - 2.25).abs() < 1e-12);

        let singular = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        assert_eq!(singular.rank().unwrap(), 1);
        assert_eq!(singular.det().unwrap(), 0.0);
    }

    #[test]
    fn test_solve_identity_matches_invert() {
        let a = sample();
        let id = Matrix::identity(3).unwrap();
        let inv = a.invert().unwrap();
        assert!(a.solve(&id).unwrap().approx_eq(&inv, 1e-12));
        assert!(a.mul(&inv).unwrap().approx_eq(&id, 1e-12));
    }

    #[test]
    fn test_least_squares() {
        let a = Matrix::from_rows(&[[1.0, 1.0], [1.0, 2.0], [1.0, 3.0], [1.0, 4.0]]).unwrap();
        let b = Matrix::from_rows(&[[6.0], [5.0], [7.0], [10.0]]).unwrap();
        let x = a.solve(&b).unwrap();
        assert!((x.get(0, 0) - 3.5).abs() < 1e-12);
        assert!((x.get(1, 0) - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_solve_transpose() {
        let a = sample();
        let b = Matrix::from_rows(&[[1.0, 2.0, 3.0]]).unwrap();
        let x = a.solve_transpose(&b).unwrap();
        assert_eq!(x.shape(), (1, 3));
        assert!(x.mul(&a).unwrap().approx_eq(&b, 1e-12));
    }

    #[test]
    fn test_errors() {
        let a = sample();
        assert!(matches!(
            a.solve(&Matrix::zeros(2, 1).unwrap()),
            Err(MatrixError::DimensionMismatch { operation: "solve", .. })
        ));
        assert!(matches!(
            Matrix::zeros(2, 3).unwrap().invert(),
            Err(MatrixError::NotSquare { operation: "invert", .. })
        ));
        let singular = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        assert_eq!(singular.invert().unwrap_err(), MatrixError::Singular);
    }
}
