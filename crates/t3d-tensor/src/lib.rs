#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `t3d-tensor` is the dense value type consumed by the solver and the
//! transform builders. It is deliberately small: a row-major, always
//! contiguous buffer tagged with a runtime [`DType`] and a [`Device`].
//!
//! - **Tensor**: shape, strides, device and an owned [`TensorStorage`]
//! - **TensorStorage**: one `Vec` per supported element type
//! - **Device**: `(category, index)` placement tag, compared for validation
//! - **Element**: sealed trait mapping Rust scalars to their [`DType`]
//!
//! Every layout-changing operation returns a fresh buffer, so tensors never
//! alias each other.
//!
//! ```rust
//! use t3d_tensor::{DType, Device, Tensor};
//!
//! let mut t = Tensor::zeros(&[4, 4], DType::Float32, Device::Cpu);
//! let block = Tensor::eye(3, DType::Float32, Device::Cpu);
//! t.slice_assign(&[0..3, 0..3], &block).unwrap();
//! t.set(&[3, 3], 1.0f32).unwrap();
//! assert_eq!(t, Tensor::eye(4, DType::Float32, Device::Cpu));
//! ```

/// Device module containing the device abstraction.
pub mod device;

/// Runtime element types and the [`Element`] trait.
pub mod dtype;

/// Serde module for serialization and deserialization.
///
/// Available when the `serde` feature is enabled.
#[cfg(feature = "serde")]
pub mod serde;

/// Storage module containing the dtype-tagged element buffers.
pub mod storage;

/// Tensor module containing the main tensor implementation and error types.
pub mod tensor;

pub use crate::device::{Device, DeviceType};
pub use crate::dtype::{DType, Element};
pub use crate::storage::TensorStorage;
pub use crate::tensor::{Tensor, TensorError};
