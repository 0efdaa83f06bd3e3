//! # matrso-core
//!
//! Dense matrix type, matrix functions and factorizations for matrso.
//!
//! This crate provides the numerical building blocks of the matrso stack:
//!
//! - **Dense matrix** ([`Matrix`]) over a flat row-major `f64` buffer with
//!   spare capacity for row/column growth
//! - **Arithmetic** with copying and `_inplace` forms of every operation
//! - **Structural edits** including a fixed-capacity circular append for
//!   sliding windows
//! - **Matrix functions**: integer `power`, Taylor-series `exp`, `ln`, `sin`, `cos`
//! - **Decompositions**: [`LuDecomposition`], [`QrDecomposition`],
//!   [`CholeskyDecomposition`], [`EigenDecomposition`], [`SvdDecomposition`]
//! - **Text format** ([`TextFormat`]) with exact `Display`/`FromStr` round-trips
//!
//! ## Core Principles
//!
//! ### SciRS2 Integration
//!
//! Array interop and random initialization come from `scirs2-core`. Direct use
//! of `ndarray` or `rand` is avoided.
//!
//! ### Memory Layout
//!
//! Element `(i, j)` lives at `i * cols + j`. Products are delegated to
//! `matrso-kernels`, which picks a tiny, direct or Strassen path per call.
//!
//! ## Quick Start
//!
//! ```
//! use matrso_core::Matrix;
//!
//! let a = Matrix::from_rows(&[[4.0, 1.0], [1.0, 3.0]]).unwrap();
//! let b = Matrix::from_rows(&[[1.0], [2.0]]).unwrap();
//!
//! let x = a.solve(&b).unwrap();
//! assert!(a.mul(&x).unwrap().approx_eq(&b, 1e-12));
//!
//! let inv = a.invert().unwrap();
//! assert_eq!(a.mul(&inv).unwrap(), Matrix::identity(2).unwrap());
//! ```
//!
//! ## Decompositions
//!
//! ```
//! use matrso_core::Matrix;
//!
//! let a = Matrix::from_rows(&[[4.0, 0.0], [0.0, 9.0]]).unwrap();
//!
//! let chol = a.cholesky_decompose().unwrap();
//! assert_eq!(chol.l().to_vec(), vec![2.0, 0.0, 0.0, 3.0]);
//!
//! let svd = a.singular_value_decompose(true, true).unwrap();
//! assert_eq!(svd.singular_values(), &[9.0, 4.0]);
//!
//! let eig = a.eigen_decompose().unwrap();
//! assert_eq!(eig.real_eigenvalues(), &[4.0, 9.0]);
//! ```
//!
//! ## Text Format
//!
//! ```
//! use matrso_core::Matrix;
//!
//! let a = Matrix::from_rows(&[[1.5, -2.0], [0.25, 4.0]]).unwrap();
//! let text = a.to_string();
//! assert_eq!(text, "{{1.5, -2}, {0.25, 4}}");
//! let back: Matrix = text.parse().unwrap();
//! assert_eq!(back.to_vec(), a.to_vec());
//! ```
//!
//! ## Error Handling
//!
//! Named operations return [`MatrixResult`]; the operator overloads panic on
//! dimension mismatch.
//!
//! ```
//! use matrso_core::Matrix;
//!
//! let a = Matrix::zeros(2, 3).unwrap();
//! assert!(a.det().is_err());
//! assert!(a.add(&Matrix::zeros(3, 2).unwrap()).is_err());
//! ```
//!
//! ## Features
//!
//! - `serde`: Enable serialization/deserialization of [`Matrix`] and [`TextFormat`]

#![deny(warnings)]

pub mod decomp;
pub mod dense;
pub mod error;

#[cfg(test)]
mod property_tests;

pub use decomp::{
    CholeskyDecomposition, EigenDecomposition, LuDecomposition, QrDecomposition, SvdDecomposition,
};
pub use dense::{CellParser, Matrix, StringOptions, TextFormat, DEFAULT_TOLERANCE};
pub use error::{MatrixError, MatrixResult};
pub use matrso_kernels::MulConfig;
