//! # matrso-kernels
//!
//! Dense matrix multiplication kernels for matrso.
//!
//! ## Overview
//!
//! Every product in matrso, from `Matrix * Matrix` to the Taylor series
//! behind the matrix exponential, runs through this crate. Operands are flat
//! row-major `f64` buffers, viewed through [`MatView`] / [`MatViewMut`]
//! (`buffer, offset, stride, rows, cols`).
//!
//! **Key Features:**
//! - **Tiny kernels** - 27 unrolled kernels for `l, m, n <= 3`
//! - **Direct Winograd kernel** - inner-product identity that halves the multiply count
//! - **Strassen recursion** - Winograd's 7-multiply/15-add schedule with rank-1 odd fix-ups
//! - **Injectable cutoffs** - [`MulConfig`] pins any code path for testing
//! - **Integer powers** - binary exponentiation on square buffers
//!
//! ## Quick Start
//!
//! ```rust
//! use matrso_kernels::{multiply, multiply_with, MulConfig, MulStrategy};
//!
//! // (2x3) * (3x2)
//! let a = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let b = vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
//! let c = multiply(3, 2, 2, &a, &b).unwrap();
//! assert_eq!(c, vec![58.0, 64.0, 139.0, 154.0]);
//!
//! // Force the recursive path on a small problem
//! let config = MulConfig::always_recurse();
//! assert_eq!(config.strategy_for(8, 8, 8), MulStrategy::Recursive);
//! let x = vec![1.0; 64];
//! let y = multiply_with(&config, 8, 8, 8, &x, &x).unwrap();
//! assert!(y.iter().all(|&v| (v - 8.0).abs() < 1e-12));
//! ```
//!
//! ## Dimension convention
//!
//! All entry points take `(l, m, n)`: `l` is the shared inner dimension, the
//! left operand is `m×l`, the right operand `l×n` and the product `m×n`.

#![deny(warnings)]

pub mod config;
mod direct;
pub mod error;
pub mod multiply;
pub mod power;
pub mod rank1;
pub mod strassen;
pub mod tiny;
pub mod view;

#[cfg(test)]
mod property_tests;

// Re-exports
pub use config::*;
pub use error::{KernelError, KernelResult};
pub use multiply::*;
pub use power::*;
pub use rank1::*;
pub use strassen::{strassen_depth, strassen_scratch_len};
pub use tiny::multiply_tiny;
pub use view::{MatView, MatViewMut};
