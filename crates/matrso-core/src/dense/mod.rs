//! Dense matrix implementation and operations
//!
//! The [`Matrix`] type lives in [`types`]; its operations are spread over
//! sub-modules by concern.

// Core type definition
pub mod types;

// Operation modules
mod arithmetic;
mod comparison;
mod creation;
mod elementwise;
mod indexing;
mod linalg;
mod structural;
mod transform;

// Matrix functions and the text format
pub mod format;
pub mod functions;

pub use format::{CellParser, StringOptions, TextFormat};
pub use types::{Matrix, DEFAULT_TOLERANCE};
