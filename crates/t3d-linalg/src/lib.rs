#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! [`solve`] validates its operands, converts them to the column-major layout
//! the numeric routines expect, resolves a routine for the operands' device
//! category and returns the solution in the caller's row-major layout.

/// Device category to solve routine mapping.
pub mod backend;

/// Host LU routine.
pub mod cpu;

/// Error types for the solver and its backends.
pub mod error;

/// Row-major / column-major conversion.
pub mod layout;

mod matmul;
mod solve;

pub use error::{BackendError, SolveError};
pub use matmul::matmul;
pub use solve::solve;
