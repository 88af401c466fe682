//! Host-resident, dtype-tagged contiguous buffers.
//!
//! [`TensorStorage`] owns the elements of a tensor in a plain `Vec` whose
//! variant encodes the runtime [`DType`]. Layout (shape, strides) and placement
//! (device) live on [`crate::Tensor`]; the storage only knows how many
//! elements it holds and of which type.

use num_traits::{One, Zero};

use crate::{DType, TensorError};

/// Contiguous element buffer tagged with its dtype.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TensorStorage {
    /// `f32` elements.
    Float32(Vec<f32>),
    /// `f64` elements.
    Float64(Vec<f64>),
    /// `i32` elements.
    Int32(Vec<i32>),
    /// `i64` elements.
    Int64(Vec<i64>),
    /// `u8` elements.
    UInt8(Vec<u8>),
}

/// Applies `$body` to the inner vector of every variant, yielding a value of the same type.
macro_rules! with_storage {
    ($storage:expr, $data:ident => $body:expr) => {
        match $storage {
            TensorStorage::Float32($data) => $body,
            TensorStorage::Float64($data) => $body,
            TensorStorage::Int32($data) => $body,
            TensorStorage::Int64($data) => $body,
            TensorStorage::UInt8($data) => $body,
        }
    };
}

/// Like [`with_storage`] but rewraps the resulting vector into the same variant.
macro_rules! map_storage {
    ($storage:expr, $data:ident => $body:expr) => {
        match $storage {
            TensorStorage::Float32($data) => TensorStorage::Float32($body),
            TensorStorage::Float64($data) => TensorStorage::Float64($body),
            TensorStorage::Int32($data) => TensorStorage::Int32($body),
            TensorStorage::Int64($data) => TensorStorage::Int64($body),
            TensorStorage::UInt8($data) => TensorStorage::UInt8($body),
        }
    };
}

impl TensorStorage {
    /// Allocates a zero-filled buffer of `len` elements.
    pub fn zeros(dtype: DType, len: usize) -> Self {
        match dtype {
            DType::Float32 => TensorStorage::Float32(vec![0.0; len]),
            DType::Float64 => TensorStorage::Float64(vec![0.0; len]),
            DType::Int32 => TensorStorage::Int32(vec![0; len]),
            DType::Int64 => TensorStorage::Int64(vec![0; len]),
            DType::UInt8 => TensorStorage::UInt8(vec![0; len]),
        }
    }

    /// Returns the dtype of the stored elements.
    pub fn dtype(&self) -> DType {
        match self {
            TensorStorage::Float32(_) => DType::Float32,
            TensorStorage::Float64(_) => DType::Float64,
            TensorStorage::Int32(_) => DType::Int32,
            TensorStorage::Int64(_) => DType::Int64,
            TensorStorage::UInt8(_) => DType::UInt8,
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        with_storage!(self, data => data.len())
    }

    /// Returns true if the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Builds a new buffer by reading the elements at `offsets`, in order.
    ///
    /// PRECONDITION: every offset is smaller than `self.len()`.
    pub(crate) fn gather(&self, offsets: &[usize]) -> Self {
        map_storage!(self, data => offsets.iter().map(|&i| data[i]).collect())
    }

    /// Writes `src[k]` into `self[offsets[k]]` for every `k`.
    ///
    /// PRECONDITION: `offsets.len() == src.len()` and every offset is in bounds.
    pub(crate) fn scatter(&mut self, offsets: &[usize], src: &TensorStorage) -> Result<(), TensorError> {
        match (self, src) {
            (TensorStorage::Float32(dst), TensorStorage::Float32(src)) => scatter_into(dst, offsets, src),
            (TensorStorage::Float64(dst), TensorStorage::Float64(src)) => scatter_into(dst, offsets, src),
            (TensorStorage::Int32(dst), TensorStorage::Int32(src)) => scatter_into(dst, offsets, src),
            (TensorStorage::Int64(dst), TensorStorage::Int64(src)) => scatter_into(dst, offsets, src),
            (TensorStorage::UInt8(dst), TensorStorage::UInt8(src)) => scatter_into(dst, offsets, src),
            (dst, src) => {
                return Err(TensorError::DtypeMismatch {
                    expected: dst.dtype(),
                    actual: src.dtype(),
                })
            }
        }
        Ok(())
    }

    /// Sets the element at `offset` to one.
    pub(crate) fn set_one(&mut self, offset: usize) {
        with_storage!(self, data => data[offset] = One::one())
    }

    /// Returns true if every element equals zero.
    pub fn is_zero(&self) -> bool {
        with_storage!(self, data => data.iter().all(|v| v.is_zero()))
    }

    /// Formats the element at `offset` with four decimals for floats.
    pub(crate) fn format_element(&self, offset: usize) -> String {
        match self {
            TensorStorage::Float32(data) => format!("{:.4}", data[offset]),
            TensorStorage::Float64(data) => format!("{:.4}", data[offset]),
            TensorStorage::Int32(data) => format!("{}", data[offset]),
            TensorStorage::Int64(data) => format!("{}", data[offset]),
            TensorStorage::UInt8(data) => format!("{}", data[offset]),
        }
    }
}

fn scatter_into<T: Copy>(dst: &mut [T], offsets: &[usize], src: &[T]) {
    for (&offset, &value) in offsets.iter().zip(src.iter()) {
        dst[offset] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let storage = TensorStorage::zeros(DType::Int32, 4);
        assert_eq!(storage.dtype(), DType::Int32);
        assert_eq!(storage.len(), 4);
        assert!(storage.is_zero());
        assert!(TensorStorage::zeros(DType::Float32, 0).is_empty());
    }

    #[test]
    fn test_gather_scatter() -> Result<(), TensorError> {
        let src = TensorStorage::Float64(vec![1.0, 2.0, 3.0, 4.0]);
        let gathered = src.gather(&[3, 0]);
        assert_eq!(gathered, TensorStorage::Float64(vec![4.0, 1.0]));

        let mut dst = TensorStorage::zeros(DType::Float64, 3);
        dst.scatter(&[2, 1], &gathered)?;
        assert_eq!(dst, TensorStorage::Float64(vec![0.0, 1.0, 4.0]));
        Ok(())
    }

    #[test]
    fn test_scatter_dtype_mismatch() {
        let mut dst = TensorStorage::zeros(DType::Float32, 2);
        let src = TensorStorage::Float64(vec![1.0]);
        assert_eq!(
            dst.scatter(&[0], &src),
            Err(TensorError::DtypeMismatch {
                expected: DType::Float32,
                actual: DType::Float64
            })
        );
    }
}
