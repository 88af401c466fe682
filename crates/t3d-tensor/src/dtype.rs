use num_traits::{One, Zero};

use crate::storage::TensorStorage;

/// Element type of a tensor, known at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DType {
    /// 32-bit IEEE float.
    Float32,
    /// 64-bit IEEE float.
    Float64,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 8-bit unsigned integer.
    UInt8,
}

impl DType {
    /// Returns the size in bytes of one element.
    pub fn size_of(&self) -> usize {
        match self {
            DType::Float32 | DType::Int32 => 4,
            DType::Float64 | DType::Int64 => 8,
            DType::UInt8 => 1,
        }
    }

    /// Returns true for `Float32` and `Float64`.
    pub fn is_floating_point(&self) -> bool {
        matches!(self, DType::Float32 | DType::Float64)
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DType::Float32 => "Float32",
            DType::Float64 => "Float64",
            DType::Int32 => "Int32",
            DType::Int64 => "Int64",
            DType::UInt8 => "UInt8",
        };
        write!(f, "{name}")
    }
}

/// Rust scalar types that can be stored in a [`crate::Tensor`].
///
/// This trait is sealed; it is implemented for `f32`, `f64`, `i32`, `i64` and `u8`.
pub trait Element:
    private::Sealed
    + Copy
    + PartialEq
    + PartialOrd
    + Zero
    + One
    + std::fmt::Debug
    + std::fmt::Display
    + Send
    + Sync
    + 'static
{
    /// The runtime dtype matching this type.
    const DTYPE: DType;

    /// Borrows the storage as a typed slice, if the dtype matches.
    fn from_storage(storage: &TensorStorage) -> Option<&[Self]>;

    /// Mutably borrows the storage as a typed slice, if the dtype matches.
    fn from_storage_mut(storage: &mut TensorStorage) -> Option<&mut [Self]>;

    /// Wraps a vector into the matching storage variant.
    fn into_storage(data: Vec<Self>) -> TensorStorage;
}

mod private {
    pub trait Sealed {}
}

macro_rules! impl_element {
    ($ty:ty, $variant:ident) => {
        impl private::Sealed for $ty {}

        impl Element for $ty {
            const DTYPE: DType = DType::$variant;

            fn from_storage(storage: &TensorStorage) -> Option<&[Self]> {
                match storage {
                    TensorStorage::$variant(data) => Some(data.as_slice()),
                    _ => None,
                }
            }

            fn from_storage_mut(storage: &mut TensorStorage) -> Option<&mut [Self]> {
                match storage {
                    TensorStorage::$variant(data) => Some(data.as_mut_slice()),
                    _ => None,
                }
            }

            fn into_storage(data: Vec<Self>) -> TensorStorage {
                TensorStorage::$variant(data)
            }
        }
    };
}

impl_element!(f32, Float32);
impl_element!(f64, Float64);
impl_element!(i32, Int32);
impl_element!(i64, Int64);
impl_element!(u8, UInt8);
