//! LU decomposition with partial pivoting
//!
//! Left-looking Crout/Doolittle elimination: column `j` is updated with dot
//! products against the already-finished columns, then the entry of largest
//! magnitude on or below the diagonal is swapped into the pivot position.
//! The result satisfies `P·A = L·U` with `L` unit lower triangular.
//!
//! The factorization itself never fails; a zero pivot only shows up in
//! [`LuDecomposition::is_nonsingular`] and makes [`LuDecomposition::solve`]
//! and [`LuDecomposition::inverse`] return [`MatrixError::Singular`].

use super::{load, unload};
use crate::error::{MatrixError, MatrixResult};
use crate::Matrix;
use scirs2_core::ndarray_ext::Array2;

/// LU factors of an `m×n` matrix
///
/// # Examples
///
/// ```
/// use matrso_core::Matrix;
///
/// let a = Matrix::from_rows(&[[4.0, 3.0], [6.0, 3.0]]).unwrap();
/// let lu = a.lu_decompose().unwrap();
/// assert!((lu.det().unwrap() - (-6.0)).abs() < 1e-12);
/// assert_eq!(lu.pivot(), &[1, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    lu: Array2<f64>,
    piv: Vec<usize>,
    pivot_sign: i32,
}

impl LuDecomposition {
    /// Factor the `rows×cols` row-major buffer `data`
    pub fn new(rows: usize, cols: usize, data: &[f64]) -> MatrixResult<Self> {
        let mut lu = load(rows, cols, data)?;
        let (m, n) = (rows, cols);
        let mut piv: Vec<usize> = (0..m).collect();
        let mut pivot_sign = 1;
        let mut col = vec![0.0f64; m];

        for j in 0..n {
            for (i, c) in col.iter_mut().enumerate() {
                *c = lu[[i, j]];
            }

            for i in 0..m {
                let kmax = i.min(j);
                let s: f64 = (0..kmax).map(|k| lu[[i, k]] * col[k]).sum();
                col[i] -= s;
                lu[[i, j]] = col[i];
            }

            let mut p = j;
            for i in j + 1..m {
                if col[i].abs() > col[p].abs() {
                    p = i;
                }
            }
            if p != j {
                for k in 0..n {
                    lu.swap([p, k], [j, k]);
                }
                piv.swap(p, j);
                pivot_sign = -pivot_sign;
            }

            if j < m && lu[[j, j]] != 0.0 {
                let d = lu[[j, j]];
                for i in j + 1..m {
                    lu[[i, j]] /= d;
                }
            }
        }

        Ok(Self {
            lu,
            piv,
            pivot_sign,
        })
    }

    /// Deep copy
    pub fn copy(&self) -> Self {
        self.clone()
    }

    fn dims(&self) -> (usize, usize) {
        self.lu.dim()
    }

    /// `true` when no diagonal entry of `U` is exactly zero
    pub fn is_nonsingular(&self) -> bool {
        let (m, n) = self.dims();
        (0..n.min(m)).all(|j| self.lu[[j, j]] != 0.0) && m >= n
    }

    /// Unit lower-triangular factor (`m×n`)
    pub fn l(&self) -> Matrix {
        let (m, n) = self.dims();
        let mut data = vec![0.0f64; m * n];
        for i in 0..m {
            for j in 0..n {
                data[i * n + j] = match i.cmp(&j) {
                    std::cmp::Ordering::Greater => self.lu[[i, j]],
                    std::cmp::Ordering::Equal => 1.0,
                    std::cmp::Ordering::Less => 0.0,
                };
            }
        }
        Matrix::from_parts(m, n, data)
    }

    /// Upper-triangular factor (`n×n`)
    pub fn u(&self) -> Matrix {
        let (m, n) = self.dims();
        let mut data = vec![0.0f64; n * n];
        for i in 0..n.min(m) {
            for j in i..n {
                data[i * n + j] = self.lu[[i, j]];
            }
        }
        Matrix::from_parts(n, n, data)
    }

    /// Row permutation: row `i` of `P·A` is row `pivot()[i]` of `A`
    pub fn pivot(&self) -> &[usize] {
        &self.piv
    }

    /// `+1` for an even number of row swaps, `-1` for odd
    pub fn pivot_sign(&self) -> i32 {
        self.pivot_sign
    }

    /// The permutation as an `m×m` matrix `P`
    pub fn permutation(&self) -> Matrix {
        let m = self.piv.len();
        let mut data = vec![0.0f64; m * m];
        for (i, &p) in self.piv.iter().enumerate() {
            data[i * m + p] = 1.0;
        }
        Matrix::from_parts(m, m, data)
    }

    /// Determinant; zero for a singular matrix
    pub fn det(&self) -> MatrixResult<f64> {
        let (m, n) = self.dims();
        if m != n {
            return Err(MatrixError::not_square("det", m, n));
        }
        Ok((0..n).fold(f64::from(self.pivot_sign), |d, j| d * self.lu[[j, j]]))
    }

    /// Solve `A·X = B`
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `B` does not have `m` rows, `NotSquare` for a
    /// rectangular factorization and `Singular` if a pivot is zero.
    pub fn solve(&self, b: &Matrix) -> MatrixResult<Matrix> {
        let (m, n) = self.dims();
        if b.rows() != m {
            return Err(MatrixError::mismatch("lu_solve", (m, b.cols()), b.shape()));
        }
        if m != n {
            return Err(MatrixError::not_square("lu_solve", m, n));
        }
        if !self.is_nonsingular() {
            return Err(MatrixError::Singular);
        }

        let nx = b.cols();
        let mut x = vec![0.0f64; n * nx];
        for (i, &p) in self.piv.iter().enumerate() {
            x[i * nx..(i + 1) * nx].copy_from_slice(&b.as_slice()[p * nx..(p + 1) * nx]);
        }
        self.substitute(&mut x, nx);
        Ok(Matrix::from_parts(n, nx, x))
    }

    /// Inverse of a square nonsingular matrix
    pub fn inverse(&self) -> MatrixResult<Matrix> {
        let (m, n) = self.dims();
        if m != n {
            return Err(MatrixError::not_square("inverse", m, n));
        }
        if !self.is_nonsingular() {
            return Err(MatrixError::Singular);
        }

        // seed with the permuted identity
        let mut x = vec![0.0f64; n * n];
        for (i, &p) in self.piv.iter().enumerate() {
            x[i * n + p] = 1.0;
        }
        self.substitute(&mut x, n);
        Ok(Matrix::from_parts(n, n, x))
    }

    /// Forward substitution with `L`, then back substitution with `U`, on
    /// the row-major `n×nx` right-hand side in `x`
    fn substitute(&self, x: &mut [f64], nx: usize) {
        let n = self.dims().1;
        for k in 0..n {
            for i in k + 1..n {
                let f = self.lu[[i, k]];
                if f == 0.0 {
                    continue;
                }
                for j in 0..nx {
                    x[i * nx + j] -= x[k * nx + j] * f;
                }
            }
        }
        for k in (0..n).rev() {
            let d = self.lu[[k, k]];
            for j in 0..nx {
                x[k * nx + j] /= d;
            }
            for i in 0..k {
                let f = self.lu[[i, k]];
                for j in 0..nx {
                    x[i * nx + j] -= x[k * nx + j] * f;
                }
            }
        }
    }

    /// Raw packed factors (`L` below the diagonal, `U` on and above)
    pub fn packed(&self) -> Matrix {
        unload(&self.lu)
    }
}
