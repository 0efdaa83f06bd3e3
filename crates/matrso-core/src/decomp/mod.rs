//! Matrix decompositions
//!
//! Each decomposition copies the input buffer at construction, factors the
//! copy and is immutable afterwards. Mutating the source matrix later has no
//! effect on a decomposition.
//!
//! | Decomposition | Fails on | Supplies |
//! |---------------|----------|----------|
//! | [`LuDecomposition`] | never | `det`, `solve`, `inverse`, pivoting |
//! | [`QrDecomposition`] | never | least-squares `solve`, full-rank test |
//! | [`CholeskyDecomposition`] | never (flags non-SPD input) | `solve` |
//! | [`EigenDecomposition`] | non-square input | eigenvalues, eigenvectors, `det` |
//! | [`SvdDecomposition`] | never | singular values/vectors, `norm2`, `cond`, `rank` |

pub mod cholesky;
pub mod eigen;
pub mod lu;
pub mod qr;
pub mod svd;

pub use cholesky::CholeskyDecomposition;
pub use eigen::EigenDecomposition;
pub use lu::LuDecomposition;
pub use qr::QrDecomposition;
pub use svd::SvdDecomposition;

use crate::dense::types::check_shape;
use crate::error::{MatrixError, MatrixResult};
use crate::Matrix;
use scirs2_core::ndarray_ext::Array2;

/// Machine epsilon used by the iterative decompositions (2⁻⁵²)
pub(crate) const EPS: f64 = f64::EPSILON;

/// Copy a raw `rows×cols` buffer into a working array
pub(crate) fn load(rows: usize, cols: usize, data: &[f64]) -> MatrixResult<Array2<f64>> {
    check_shape(rows, cols)?;
    if data.len() < rows * cols {
        return Err(MatrixError::InvalidDimensions(format!(
            "buffer of {} elements cannot hold a {}x{} matrix",
            data.len(),
            rows,
            cols
        )));
    }
    Array2::from_shape_vec((rows, cols), data[..rows * cols].to_vec())
        .map_err(|e| MatrixError::InvalidDimensions(e.to_string()))
}

/// Copy a working array back out as a matrix
pub(crate) fn unload(array: &Array2<f64>) -> Matrix {
    let (rows, cols) = array.dim();
    Matrix::from_parts(rows, cols, array.iter().copied().collect())
}

impl Matrix {
    /// LU decomposition with partial pivoting
    pub fn lu_decompose(&self) -> MatrixResult<LuDecomposition> {
        LuDecomposition::new(self.rows, self.cols, self.as_slice())
    }

    /// Householder QR decomposition
    pub fn qr_decompose(&self) -> MatrixResult<QrDecomposition> {
        QrDecomposition::new(self.rows, self.cols, self.as_slice())
    }

    /// Cholesky decomposition; check
    /// [`is_symmetric_positive_definite`](CholeskyDecomposition::is_symmetric_positive_definite)
    /// before trusting the factor
    pub fn cholesky_decompose(&self) -> MatrixResult<CholeskyDecomposition> {
        CholeskyDecomposition::new(self.rows, self.cols, self.as_slice())
    }

    /// Eigenvalue decomposition of a square matrix
    pub fn eigen_decompose(&self) -> MatrixResult<EigenDecomposition> {
        EigenDecomposition::new(self.rows, self.cols, self.as_slice())
    }

    /// Singular value decomposition, accumulating `U` and/or `V` on request
    pub fn singular_value_decompose(
        &self,
        want_u: bool,
        want_v: bool,
    ) -> MatrixResult<SvdDecomposition> {
        SvdDecomposition::with_vectors(self.rows, self.cols, self.as_slice(), want_u, want_v)
    }
}
