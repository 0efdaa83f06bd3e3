//! Cholesky decomposition `A = L·Lᵀ`
//!
//! The factorization does not validate its input up front. While building
//! `L` it tracks whether the matrix is square, symmetric and yields positive
//! diagonal terms; the outcome is reported by
//! [`CholeskyDecomposition::is_symmetric_positive_definite`], and the factor
//! is only best effort when that is `false`.

use super::{load, unload};
use crate::error::{MatrixError, MatrixResult};
use crate::Matrix;
use scirs2_core::ndarray_ext::Array2;

/// Lower-triangular Cholesky factor with its SPD flag
///
/// # Examples
///
/// ```
/// use matrso_core::Matrix;
///
/// let a = Matrix::from_rows(&[[4.0, 0.0], [0.0, 9.0]]).unwrap();
/// let chol = a.cholesky_decompose().unwrap();
/// assert!(chol.is_symmetric_positive_definite());
/// assert_eq!(chol.l().to_vec(), vec![2.0, 0.0, 0.0, 3.0]);
/// ```
#[derive(Debug, Clone)]
pub struct CholeskyDecomposition {
    l: Array2<f64>,
    is_spd: bool,
}

impl CholeskyDecomposition {
    /// Factor the `rows×cols` row-major buffer `data`
    ///
    /// A rectangular input is factored over its leading square block and
    /// flagged as not SPD.
    pub fn new(rows: usize, cols: usize, data: &[f64]) -> MatrixResult<Self> {
        let a = load(rows, cols, data)?;
        let n = rows.min(cols);
        let mut l = Array2::<f64>::zeros((n, n));
        let mut is_spd = rows == cols;

        for j in 0..n {
            let mut d = 0.0f64;
            for k in 0..j {
                let mut s = 0.0f64;
                for i in 0..k {
                    s += l[[k, i]] * l[[j, i]];
                }
                s = (a[[j, k]] - s) / l[[k, k]];
                l[[j, k]] = s;
                d += s * s;
                is_spd = is_spd && a[[k, j]] == a[[j, k]];
            }
            d = a[[j, j]] - d;
            is_spd = is_spd && d > 0.0;
            l[[j, j]] = d.max(0.0).sqrt();
        }

        tracing::debug!(n, is_spd, "cholesky factorization");
        Ok(Self { l, is_spd })
    }

    /// Deep copy
    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn is_symmetric_positive_definite(&self) -> bool {
        self.is_spd
    }

    /// Lower-triangular factor
    pub fn l(&self) -> Matrix {
        unload(&self.l)
    }

    /// Solve `A·X = B`
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `B` does not have `n` rows and
    /// `NotSymmetricPositiveDefinite` if the input failed the SPD check.
    pub fn solve(&self, b: &Matrix) -> MatrixResult<Matrix> {
        let n = self.l.nrows();
        if b.rows() != n {
            return Err(MatrixError::mismatch(
                "cholesky_solve",
                (n, b.cols()),
                b.shape(),
            ));
        }
        if !self.is_spd {
            return Err(MatrixError::NotSymmetricPositiveDefinite);
        }

        let nx = b.cols();
        let mut x = b.to_vec();
        let l = &self.l;

        // L·Y = B
        for k in 0..n {
            for j in 0..nx {
                let mut v = x[k * nx + j];
                for i in 0..k {
                    v -= x[i * nx + j] * l[[k, i]];
                }
                x[k * nx + j] = v / l[[k, k]];
            }
        }

        // Lᵀ·X = Y
        for k in (0..n).rev() {
            for j in 0..nx {
                let mut v = x[k * nx + j];
                for i in k + 1..n {
                    v -= x[i * nx + j] * l[[i, k]];
                }
                x[k * nx + j] = v / l[[k, k]];
            }
        }

        Ok(Matrix::from_parts(n, nx, x))
    }
}
