//! QR decomposition by Householder reflections
//!
//! Column `k` is reflected onto a multiple of `e_k`. The sign of the
//! reflection follows the pivot element so the update never subtracts
//! nearly equal numbers. Reflection vectors are stored below (and on) the
//! diagonal of the working array, with the diagonal of `R` kept separately.

use super::load;
use crate::error::{MatrixError, MatrixResult};
use crate::Matrix;
use scirs2_core::ndarray_ext::Array2;

/// Householder QR factors of an `m×n` matrix
///
/// `Q` is `m×p` with orthonormal columns and `R` is `p×n` upper triangular,
/// where `p = min(m, n)`.
///
/// # Examples
///
/// ```
/// use matrso_core::Matrix;
///
/// // least-squares line through (0, 1), (1, 3), (2, 5)
/// let a = Matrix::from_rows(&[[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]]).unwrap();
/// let b = Matrix::from_rows(&[[1.0], [3.0], [5.0]]).unwrap();
/// let x = a.qr_decompose().unwrap().solve(&b).unwrap();
/// assert!((x.get(0, 0) - 1.0).abs() < 1e-12);
/// assert!((x.get(1, 0) - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct QrDecomposition {
    qr: Array2<f64>,
    r_diag: Vec<f64>,
}

impl QrDecomposition {
    /// Factor the `rows×cols` row-major buffer `data`
    pub fn new(rows: usize, cols: usize, data: &[f64]) -> MatrixResult<Self> {
        let mut qr = load(rows, cols, data)?;
        let (m, n) = (rows, cols);
        let mut r_diag = vec![0.0f64; n];

        for k in 0..n {
            let mut nrm = 0.0f64;
            for i in k..m {
                nrm = nrm.hypot(qr[[i, k]]);
            }

            if nrm != 0.0 {
                if qr[[k, k]] < 0.0 {
                    nrm = -nrm;
                }
                for i in k..m {
                    qr[[i, k]] /= nrm;
                }
                qr[[k, k]] += 1.0;

                for j in k + 1..n {
                    let mut s = 0.0f64;
                    for i in k..m {
                        s += qr[[i, k]] * qr[[i, j]];
                    }
                    s = -s / qr[[k, k]];
                    for i in k..m {
                        let v = qr[[i, k]];
                        qr[[i, j]] += s * v;
                    }
                }
            }
            r_diag[k] = -nrm;
        }

        Ok(Self { qr, r_diag })
    }

    /// Deep copy
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// `true` when every diagonal entry of `R` is nonzero
    pub fn is_full_rank(&self) -> bool {
        self.r_diag.iter().all(|&d| d != 0.0)
    }

    /// Householder vectors, lower trapezoidal `m×n`
    pub fn h(&self) -> Matrix {
        let (m, n) = self.qr.dim();
        let mut data = vec![0.0f64; m * n];
        for i in 0..m {
            for j in 0..=i.min(n - 1) {
                data[i * n + j] = self.qr[[i, j]];
            }
        }
        Matrix::from_parts(m, n, data)
    }

    /// Upper-triangular factor (`p×n`)
    pub fn r(&self) -> Matrix {
        let (m, n) = self.qr.dim();
        let p = m.min(n);
        let mut data = vec![0.0f64; p * n];
        for i in 0..p {
            data[i * n + i] = self.r_diag[i];
            for j in i + 1..n {
                data[i * n + j] = self.qr[[i, j]];
            }
        }
        Matrix::from_parts(p, n, data)
    }

    /// Orthogonal factor (`m×p`), accumulated from the reflections
    pub fn q(&self) -> Matrix {
        let (m, n) = self.qr.dim();
        let p = m.min(n);
        let mut q = Array2::<f64>::zeros((m, p));
        for k in (0..p).rev() {
            q[[k, k]] = 1.0;
            for j in k..p {
                if self.qr[[k, k]] != 0.0 {
                    let mut s = 0.0f64;
                    for i in k..m {
                        s += self.qr[[i, k]] * q[[i, j]];
                    }
                    s = -s / self.qr[[k, k]];
                    for i in k..m {
                        q[[i, j]] += s * self.qr[[i, k]];
                    }
                }
            }
        }
        super::unload(&q)
    }

    /// Least-squares solution of `A·X = B`
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `B` does not have `m` rows and `RankDeficient`
    /// if the factorization is not full rank.
    pub fn solve(&self, b: &Matrix) -> MatrixResult<Matrix> {
        let (m, n) = self.qr.dim();
        if b.rows() != m {
            return Err(MatrixError::mismatch("qr_solve", (m, b.cols()), b.shape()));
        }
        if !self.is_full_rank() {
            return Err(MatrixError::RankDeficient);
        }

        let nx = b.cols();
        let mut x = b.to_vec();

        // X = Qᵀ·B
        for k in 0..n {
            for j in 0..nx {
                let mut s = 0.0f64;
                for i in k..m {
                    s += self.qr[[i, k]] * x[i * nx + j];
                }
                s = -s / self.qr[[k, k]];
                for i in k..m {
                    x[i * nx + j] += s * self.qr[[i, k]];
                }
            }
        }

        // R·X = Qᵀ·B
        for k in (0..n).rev() {
            for j in 0..nx {
                x[k * nx + j] /= self.r_diag[k];
            }
            for i in 0..k {
                let f = self.qr[[i, k]];
                for j in 0..nx {
                    x[i * nx + j] -= x[k * nx + j] * f;
                }
            }
        }

        x.truncate(n * nx);
        Ok(Matrix::from_parts(n, nx, x))
    }
}
