use std::ops::Range;

use thiserror::Error;

use crate::{
    device::Device,
    dtype::{DType, Element},
    storage::TensorStorage,
};

/// Error type for tensor operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TensorError {
    /// Tensor shape does not match the provided data.
    #[error("Shape mismatch: expected {expected} elements for shape, but got {actual} elements in data")]
    InvalidShape {
        /// Expected number of elements based on shape
        expected: usize,
        /// Actual number of elements in the data
        actual: usize,
    },

    /// Index exceeds tensor bounds.
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index that was attempted
        index: usize,
        /// The size of the dimension being indexed
        size: usize,
    },

    /// Number of indices or ranges does not match the number of dimensions.
    #[error("Rank mismatch: expected {expected} dimensions, got {actual}")]
    RankMismatch {
        /// Number of dimensions of the tensor
        expected: usize,
        /// Number of dimensions provided
        actual: usize,
    },

    /// Tensor shape differs from the required one.
    #[error("Tensor has shape {actual:?}, but is expected to have {expected:?}")]
    ShapeMismatch {
        /// Required shape
        expected: Vec<usize>,
        /// Shape of the tensor
        actual: Vec<usize>,
    },

    /// Tensor dtype differs from the required one.
    #[error("Tensor has dtype {actual}, but is expected to have {expected}")]
    DtypeMismatch {
        /// Required dtype
        expected: DType,
        /// Dtype of the tensor
        actual: DType,
    },

    /// Tensor device differs from the required one.
    #[error("Tensor has device {actual}, but is expected to be on {expected}")]
    DeviceMismatch {
        /// Required device
        expected: Device,
        /// Device of the tensor
        actual: Device,
    },

    /// Operation not supported for this tensor configuration.
    #[error("Unsupported operation: {operation} - {reason}")]
    UnsupportedOperation {
        /// Name of the operation that failed
        operation: String,
        /// Reason why the operation is not supported
        reason: String,
    },

    /// A device string could not be parsed.
    #[error("Invalid device string {0:?}, expected cpu:0 or cuda:N")]
    InvalidDevice(String),
}

impl TensorError {
    /// Creates an UnsupportedOperation error with context.
    pub fn unsupported_operation(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

/// Computes the strides for a row-major (C-contiguous) tensor layout.
///
/// The rightmost dimension has stride 1 and each dimension's stride is the
/// product of all dimensions to its right.
///
/// ```rust
/// use t3d_tensor::tensor::get_strides_from_shape;
///
/// assert_eq!(get_strides_from_shape(&[2, 3]), vec![3, 1]);
/// assert_eq!(get_strides_from_shape(&[2, 3, 4]), vec![12, 4, 1]);
/// ```
pub fn get_strides_from_shape(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![0; shape.len()];
    let mut stride = 1;
    for i in (0..shape.len()).rev() {
        strides[i] = stride;
        stride *= shape[i];
    }
    strides
}

/// A dense, contiguous, row-major tensor with runtime dtype and device tag.
///
/// The tensor always owns its buffer. Operations that change the layout
/// (`transpose`, `slice`, `reshape`, `to_device`) return a new tensor with a
/// fresh buffer, so no two tensors ever alias.
///
/// Element data lives in host memory. The [`Device`] records where the tensor
/// is considered placed and is what operations compare and dispatch on.
///
/// # Examples
///
/// ```rust
/// use t3d_tensor::{DType, Device, Tensor};
///
/// let t = Tensor::from_shape_vec(&[2, 2], vec![1.0f32, 2.0, 3.0, 4.0], Device::Cpu).unwrap();
/// assert_eq!(t.shape(), &[2, 2]);
/// assert_eq!(t.dtype(), DType::Float32);
/// assert_eq!(t.get::<f32>(&[1, 0]).unwrap(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    storage: TensorStorage,
    shape: Vec<usize>,
    strides: Vec<usize>,
    device: Device,
}

impl Tensor {
    /// Creates a zero-filled tensor.
    pub fn zeros(shape: &[usize], dtype: DType, device: Device) -> Self {
        let numel = shape.iter().product();
        Self {
            storage: TensorStorage::zeros(dtype, numel),
            shape: shape.to_vec(),
            strides: get_strides_from_shape(shape),
            device,
        }
    }

    /// Creates an `n x n` identity matrix.
    pub fn eye(n: usize, dtype: DType, device: Device) -> Self {
        let mut tensor = Self::zeros(&[n, n], dtype, device);
        for i in 0..n {
            tensor.storage.set_one(i * n + i);
        }
        tensor
    }

    /// Creates a new tensor with the given shape and data.
    ///
    /// # Errors
    ///
    /// If the number of elements in the data does not match the shape of the tensor.
    pub fn from_shape_vec<T: Element>(
        shape: &[usize],
        data: Vec<T>,
        device: Device,
    ) -> Result<Self, TensorError> {
        let numel = shape.iter().product::<usize>();
        if numel != data.len() {
            return Err(TensorError::InvalidShape {
                expected: numel,
                actual: data.len(),
            });
        }
        Ok(Self {
            storage: T::into_storage(data),
            shape: shape.to_vec(),
            strides: get_strides_from_shape(shape),
            device,
        })
    }

    /// Creates a new tensor from an existing storage buffer.
    pub fn from_storage(
        shape: &[usize],
        storage: TensorStorage,
        device: Device,
    ) -> Result<Self, TensorError> {
        let numel = shape.iter().product::<usize>();
        if numel != storage.len() {
            return Err(TensorError::InvalidShape {
                expected: numel,
                actual: storage.len(),
            });
        }
        Ok(Self {
            storage,
            shape: shape.to_vec(),
            strides: get_strides_from_shape(shape),
            device,
        })
    }

    /// The shape of the tensor.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The strides of the tensor data in memory.
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    #[inline]
    pub fn numel(&self) -> usize {
        self.storage.len()
    }

    /// Element dtype.
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// The device the tensor is placed on.
    #[inline]
    pub fn device(&self) -> Device {
        self.device
    }

    /// Borrows the underlying buffer.
    #[inline]
    pub fn storage(&self) -> &TensorStorage {
        &self.storage
    }

    /// Mutably borrows the underlying buffer.
    ///
    /// The buffer length is fixed; callers may only overwrite elements.
    #[inline]
    pub fn storage_mut(&mut self) -> &mut TensorStorage {
        &mut self.storage
    }

    /// Consumes the tensor and returns its buffer.
    pub fn into_storage(self) -> TensorStorage {
        self.storage
    }

    /// Returns the data as a typed slice in row-major order.
    ///
    /// # Errors
    ///
    /// If `T` does not match the tensor dtype.
    pub fn as_slice<T: Element>(&self) -> Result<&[T], TensorError> {
        let dtype = self.dtype();
        T::from_storage(&self.storage).ok_or(TensorError::DtypeMismatch {
            expected: T::DTYPE,
            actual: dtype,
        })
    }

    /// Returns the data as a mutable typed slice in row-major order.
    pub fn as_slice_mut<T: Element>(&mut self) -> Result<&mut [T], TensorError> {
        let dtype = self.dtype();
        T::from_storage_mut(&mut self.storage).ok_or(TensorError::DtypeMismatch {
            expected: T::DTYPE,
            actual: dtype,
        })
    }

    /// Converts a multi-dimensional index into a buffer offset.
    pub fn offset(&self, index: &[usize]) -> Result<usize, TensorError> {
        if index.len() != self.ndim() {
            return Err(TensorError::RankMismatch {
                expected: self.ndim(),
                actual: index.len(),
            });
        }
        let mut offset = 0;
        for ((&i, &size), &stride) in index.iter().zip(&self.shape).zip(&self.strides) {
            if i >= size {
                return Err(TensorError::IndexOutOfBounds { index: i, size });
            }
            offset += i * stride;
        }
        Ok(offset)
    }

    /// Reads a single element.
    pub fn get<T: Element>(&self, index: &[usize]) -> Result<T, TensorError> {
        let offset = self.offset(index)?;
        Ok(self.as_slice::<T>()?[offset])
    }

    /// Writes a single element.
    pub fn set<T: Element>(&mut self, index: &[usize], value: T) -> Result<(), TensorError> {
        let offset = self.offset(index)?;
        self.as_slice_mut::<T>()?[offset] = value;
        Ok(())
    }

    /// Returns a copy of the tensor with a new shape.
    ///
    /// # Errors
    ///
    /// If the new shape does not have the same number of elements.
    pub fn reshape(&self, shape: &[usize]) -> Result<Tensor, TensorError> {
        Tensor::from_storage(shape, self.storage.clone(), self.device)
    }

    /// Returns a transposed copy of the tensor.
    ///
    /// 0-D and 1-D tensors are returned unchanged (as a copy); 2-D tensors have
    /// their axes swapped and the result is materialized in row-major order.
    ///
    /// # Errors
    ///
    /// If the tensor has more than two dimensions.
    pub fn transpose(&self) -> Result<Tensor, TensorError> {
        match self.shape[..] {
            [] | [_] => Ok(self.clone()),
            [rows, cols] => {
                let offsets = (0..cols)
                    .flat_map(|j| (0..rows).map(move |i| i * cols + j))
                    .collect::<Vec<_>>();
                Ok(Tensor {
                    storage: self.storage.gather(&offsets),
                    shape: vec![cols, rows],
                    strides: get_strides_from_shape(&[cols, rows]),
                    device: self.device,
                })
            }
            _ => Err(TensorError::unsupported_operation(
                "transpose",
                format!("expected a tensor with at most 2 dimensions, got {}", self.ndim()),
            )),
        }
    }

    /// Returns a copy of the tensor placed on `device`.
    pub fn to_device(&self, device: Device) -> Tensor {
        Tensor {
            device,
            ..self.clone()
        }
    }

    /// Returns the tensor placed on `device`, reusing its buffer.
    pub fn into_device(self, device: Device) -> Tensor {
        Tensor { device, ..self }
    }

    /// Returns the sub-tensor `range` along dimension `dim`.
    pub fn slice(&self, dim: usize, range: Range<usize>) -> Result<Tensor, TensorError> {
        if dim >= self.ndim() {
            return Err(TensorError::IndexOutOfBounds {
                index: dim,
                size: self.ndim(),
            });
        }
        let mut ranges = self.shape.iter().map(|&s| 0..s).collect::<Vec<_>>();
        ranges[dim] = range;
        let (shape, offsets) = self.block_offsets(&ranges)?;
        Ok(Tensor {
            storage: self.storage.gather(&offsets),
            strides: get_strides_from_shape(&shape),
            shape,
            device: self.device,
        })
    }

    /// Copies `src` into the block selected by one range per dimension.
    ///
    /// # Errors
    ///
    /// If the block does not fit the tensor, `src` does not have the block's
    /// shape, or `src` has a different dtype or device.
    pub fn slice_assign(&mut self, ranges: &[Range<usize>], src: &Tensor) -> Result<(), TensorError> {
        src.assert_device(self.device)?;
        src.assert_dtype(self.dtype())?;
        let (shape, offsets) = self.block_offsets(ranges)?;
        src.assert_shape(&shape)?;
        self.storage.scatter(&offsets, &src.storage)
    }

    /// Computes the shape of a block and the row-major list of its buffer offsets.
    fn block_offsets(&self, ranges: &[Range<usize>]) -> Result<(Vec<usize>, Vec<usize>), TensorError> {
        if ranges.len() != self.ndim() {
            return Err(TensorError::RankMismatch {
                expected: self.ndim(),
                actual: ranges.len(),
            });
        }
        for (range, &size) in ranges.iter().zip(&self.shape) {
            if range.start > range.end || range.end > size {
                return Err(TensorError::IndexOutOfBounds {
                    index: range.end,
                    size,
                });
            }
        }

        let shape = ranges.iter().map(|r| r.len()).collect::<Vec<_>>();
        let numel = shape.iter().product::<usize>();
        let block_strides = get_strides_from_shape(&shape);

        let offsets = (0..numel)
            .map(|linear| {
                ranges
                    .iter()
                    .zip(&block_strides)
                    .zip(&shape)
                    .zip(&self.strides)
                    .map(|(((range, &bstride), &extent), &stride)| {
                        (range.start + (linear / bstride) % extent) * stride
                    })
                    .sum::<usize>()
            })
            .collect();

        Ok((shape, offsets))
    }

    /// Checks that the tensor has exactly `shape`.
    pub fn assert_shape(&self, shape: &[usize]) -> Result<(), TensorError> {
        if self.shape != shape {
            return Err(TensorError::ShapeMismatch {
                expected: shape.to_vec(),
                actual: self.shape.clone(),
            });
        }
        Ok(())
    }

    /// Checks that the tensor has dtype `dtype`.
    pub fn assert_dtype(&self, dtype: DType) -> Result<(), TensorError> {
        if self.dtype() != dtype {
            return Err(TensorError::DtypeMismatch {
                expected: dtype,
                actual: self.dtype(),
            });
        }
        Ok(())
    }

    /// Checks that the tensor is placed on `device`.
    pub fn assert_device(&self, device: Device) -> Result<(), TensorError> {
        if self.device != device {
            return Err(TensorError::DeviceMismatch {
                expected: device,
                actual: self.device,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for Tensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cols = self.shape.last().copied().unwrap_or(1).max(1);
        let rows = self.numel() / cols;
        for r in 0..rows {
            let row = (0..cols)
                .map(|c| self.storage.format_element(r * cols + c))
                .collect::<Vec<_>>()
                .join(", ");
            if r + 1 < rows {
                writeln!(f, "[{row}]")?;
            } else {
                write!(f, "[{row}]")?;
            }
        }
        write!(f, " Tensor{:?} {} {}", self.shape, self.dtype(), self.device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_2d() -> Result<(), TensorError> {
        let t = Tensor::from_shape_vec(&[1, 2], vec![1u8, 2], Device::Cpu)?;
        assert_eq!(t.shape(), &[1, 2]);
        assert_eq!(t.strides(), &[2, 1]);
        assert_eq!(t.as_slice::<u8>()?, &[1, 2]);
        assert_eq!(t.numel(), 2);
        assert_eq!(t.dtype(), DType::UInt8);
        Ok(())
    }

    #[test]
    fn constructor_invalid_shape() {
        let res = Tensor::from_shape_vec(&[2, 2], vec![1.0f32; 3], Device::Cpu);
        assert_eq!(
            res,
            Err(TensorError::InvalidShape {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn zeros_and_eye() -> Result<(), TensorError> {
        let z = Tensor::zeros(&[2, 3], DType::Float64, Device::cuda(0));
        assert_eq!(z.device(), Device::cuda(0));
        assert!(z.storage().is_zero());

        let eye = Tensor::eye(3, DType::Int32, Device::Cpu);
        assert_eq!(eye.as_slice::<i32>()?, &[1, 0, 0, 0, 1, 0, 0, 0, 1]);
        Ok(())
    }

    #[test]
    fn get_set() -> Result<(), TensorError> {
        let mut t = Tensor::zeros(&[2, 2], DType::Float32, Device::Cpu);
        t.set(&[1, 0], 5.0f32)?;
        assert_eq!(t.get::<f32>(&[1, 0])?, 5.0);
        assert_eq!(t.as_slice::<f32>()?, &[0.0, 0.0, 5.0, 0.0]);

        assert_eq!(
            t.get::<f32>(&[2, 0]),
            Err(TensorError::IndexOutOfBounds { index: 2, size: 2 })
        );
        assert_eq!(
            t.get::<f32>(&[0]),
            Err(TensorError::RankMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            t.get::<f64>(&[0, 0]),
            Err(TensorError::DtypeMismatch {
                expected: DType::Float64,
                actual: DType::Float32
            })
        );
        Ok(())
    }

    #[test]
    fn transpose_2d() -> Result<(), TensorError> {
        let t = Tensor::from_shape_vec(&[2, 3], vec![1, 2, 3, 4, 5, 6i64], Device::Cpu)?;
        let tt = t.transpose()?;
        assert_eq!(tt.shape(), &[3, 2]);
        assert_eq!(tt.as_slice::<i64>()?, &[1, 4, 2, 5, 3, 6]);
        assert_eq!(tt.transpose()?, t);
        Ok(())
    }

    #[test]
    fn transpose_1d_and_3d() -> Result<(), TensorError> {
        let v = Tensor::from_shape_vec(&[3], vec![1.0f64, 2.0, 3.0], Device::Cpu)?;
        assert_eq!(v.transpose()?, v);

        let t = Tensor::zeros(&[2, 2, 2], DType::Float32, Device::Cpu);
        assert!(matches!(
            t.transpose(),
            Err(TensorError::UnsupportedOperation { .. })
        ));
        Ok(())
    }

    #[test]
    fn reshape() -> Result<(), TensorError> {
        let t = Tensor::from_shape_vec(&[3], vec![1.0f32, 2.0, 3.0], Device::Cpu)?;
        let r = t.reshape(&[3, 1])?;
        assert_eq!(r.shape(), &[3, 1]);
        assert_eq!(r.strides(), &[1, 1]);
        assert_eq!(r.as_slice::<f32>()?, t.as_slice::<f32>()?);
        assert!(t.reshape(&[2, 2]).is_err());
        Ok(())
    }

    #[test]
    fn to_device_copies() -> Result<(), TensorError> {
        let t = Tensor::from_shape_vec(&[2], vec![1.0f32, 2.0], Device::Cpu)?;
        let mut moved = t.to_device(Device::cuda(0));
        assert_eq!(moved.device(), Device::cuda(0));
        moved.set(&[0], 9.0f32)?;
        assert_eq!(t.get::<f32>(&[0])?, 1.0);
        Ok(())
    }

    #[test]
    fn slice_along_dims() -> Result<(), TensorError> {
        let t = Tensor::from_shape_vec(&[6], (0..6).collect::<Vec<i32>>(), Device::Cpu)?;
        let s = t.slice(0, 3..6)?;
        assert_eq!(s.shape(), &[3]);
        assert_eq!(s.as_slice::<i32>()?, &[3, 4, 5]);

        let m = Tensor::from_shape_vec(&[3, 3], (0..9).collect::<Vec<i32>>(), Device::Cpu)?;
        let col = m.slice(1, 2..3)?;
        assert_eq!(col.shape(), &[3, 1]);
        assert_eq!(col.as_slice::<i32>()?, &[2, 5, 8]);

        assert!(m.slice(2, 0..1).is_err());
        assert!(m.slice(0, 2..4).is_err());
        Ok(())
    }

    #[test]
    fn slice_assign_block() -> Result<(), TensorError> {
        let mut t = Tensor::zeros(&[3, 3], DType::Float32, Device::Cpu);
        let block = Tensor::from_shape_vec(&[2, 1], vec![7.0f32, 8.0], Device::Cpu)?;
        t.slice_assign(&[1..3, 2..3], &block)?;
        assert_eq!(
            t.as_slice::<f32>()?,
            &[0.0, 0.0, 0.0, 0.0, 0.0, 7.0, 0.0, 0.0, 8.0]
        );

        let wrong = Tensor::zeros(&[1, 2], DType::Float32, Device::Cpu);
        assert_eq!(
            t.slice_assign(&[1..3, 2..3], &wrong),
            Err(TensorError::ShapeMismatch {
                expected: vec![2, 1],
                actual: vec![1, 2]
            })
        );

        let other_device = block.to_device(Device::cuda(0));
        assert!(matches!(
            t.slice_assign(&[1..3, 2..3], &other_device),
            Err(TensorError::DeviceMismatch { .. })
        ));
        Ok(())
    }

    #[test]
    fn asserts() {
        let t = Tensor::zeros(&[3], DType::Float32, Device::Cpu);
        assert!(t.assert_shape(&[3]).is_ok());
        assert!(t.assert_shape(&[3, 1]).is_err());
        assert!(t.assert_dtype(DType::Float32).is_ok());
        assert!(t.assert_dtype(DType::Float64).is_err());
        assert!(t.assert_device(Device::Cpu).is_ok());
        assert!(t.assert_device(Device::cuda(0)).is_err());
    }

    #[test]
    fn display() -> Result<(), TensorError> {
        let t = Tensor::from_shape_vec(&[2, 2], vec![1.0f32, 0.0, 0.0, 1.0], Device::Cpu)?;
        let s = format!("{t}");
        assert!(s.starts_with("[1.0000, 0.0000]\n[0.0000, 1.0000]"));
        assert!(s.ends_with("Float32 cpu:0"));
        Ok(())
    }
}
