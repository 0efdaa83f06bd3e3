//! # matrso - Dense Linear Algebra for COOLJAPAN
//!
//! Dense `f64` matrices with a Strassen-Winograd multiplication kernel,
//! Taylor-series matrix functions and the classic factorizations.
//!
//! This is the **meta crate** that re-exports the matrso components.
//!
//! ## Quick Start
//!
//! ```
//! use matrso::prelude::*;
//!
//! let a = Matrix::from_rows(&[[4.0, 1.0], [1.0, 3.0]])?;
//! let inv = a.invert()?;
//! assert_eq!(a.mul(&inv)?, Matrix::identity(2)?);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Multiplication Kernel ([`kernels`])
//!
//! Tiny straight-line kernels, the direct Winograd kernel and Strassen
//! recursion over flat row-major buffers, selected per call by [`MulConfig`].
//!
//! ```
//! use matrso::kernels::{multiply_with, MulConfig, MulStrategy};
//!
//! let config = MulConfig::default();
//! assert_eq!(config.strategy_for(2, 2, 2), MulStrategy::Tiny);
//! assert_eq!(config.strategy_for(512, 512, 512), MulStrategy::Recursive);
//!
//! let c = multiply_with(&config, 2, 1, 1, &[1.0, 2.0], &[3.0, 4.0]).unwrap();
//! assert_eq!(c, vec![11.0]);
//! ```
//!
//! ### Matrix and Decompositions ([`core`])
//!
//! ```
//! use matrso::core::Matrix;
//!
//! let a = Matrix::from_rows(&[[2.0, 0.0], [0.0, 3.0]]).unwrap();
//! assert_eq!(a.power(-1).unwrap(), Matrix::from_rows(&[[0.5, 0.0], [0.0, 1.0 / 3.0]]).unwrap());
//!
//! let svd = a.singular_value_decompose(true, true).unwrap();
//! assert_eq!(svd.singular_values(), &[3.0, 2.0]);
//! ```
//!
//! ### Logging ([`tracing_support`])
//!
//! Subscriber setup for the `tracing` events the library emits.
//!
//! ## Features
//!
//! - `tracing`: install a `tracing-subscriber` via [`tracing_support::init_tracing`]
//! - `serde`: serialization of `Matrix` and `TextFormat`
//! - `full`: Enable all features
//!
//! ## Examples
//!
//! See `examples/linear_algebra_tour.rs` for an end-to-end walkthrough.

#![deny(warnings)]

// Re-export all components
pub use matrso_core as core;
pub use matrso_kernels as kernels;

pub use matrso_kernels::MulConfig;

pub mod tracing_support;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use matrso::prelude::*;
    //!
    //! let id = Matrix::identity(3).unwrap();
    //! assert_eq!(id.trace().unwrap(), 3.0);
    //! ```

    // Core types
    pub use crate::core::{Matrix, MatrixError, MatrixResult, TextFormat};

    // Decompositions
    pub use crate::core::{
        CholeskyDecomposition, EigenDecomposition, LuDecomposition, QrDecomposition,
        SvdDecomposition,
    };

    // Kernel configuration
    pub use crate::kernels::{MulConfig, MulStrategy};
}
