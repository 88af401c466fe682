#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the transformation builders.
pub mod error;

mod transformation;

pub use error::TransformError;
pub use transformation::{compute_transformation_from_pose, compute_transformation_from_rt};
