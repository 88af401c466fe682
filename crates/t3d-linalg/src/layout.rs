//! Row-major to column-major adapter.
//!
//! Tensors are row-major; the numeric routines expect column-major (Fortran)
//! storage and overwrite their inputs. Storing the transpose of a row-major
//! matrix row-major is the same buffer as the matrix itself column-major, so
//! a transposed copy is both the layout conversion and the defensive copy.

use t3d_tensor::{Device, Tensor, TensorError};

/// Returns a fresh column-major copy of `tensor` placed on `device`.
///
/// A 2-D `r x c` tensor becomes a `c x r` row-major tensor whose buffer is
/// the original matrix in column-major order. 1-D tensors are copied as is.
pub fn to_column_major(tensor: &Tensor, device: Device) -> Result<Tensor, TensorError> {
    Ok(tensor.transpose()?.into_device(device))
}

/// Converts a buffer produced by [`to_column_major`] back to row-major.
pub fn from_column_major(tensor: &Tensor) -> Result<Tensor, TensorError> {
    tensor.transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_major_buffer() -> Result<(), TensorError> {
        let t = Tensor::from_shape_vec(&[2, 3], vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], Device::Cpu)?;
        let cm = to_column_major(&t, Device::Cpu)?;
        assert_eq!(cm.shape(), &[3, 2]);
        assert_eq!(cm.as_slice::<f32>()?, &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(from_column_major(&cm)?, t);
        Ok(())
    }

    #[test]
    fn test_vector_unchanged() -> Result<(), TensorError> {
        let v = Tensor::from_shape_vec(&[3], vec![1.0f64, 2.0, 3.0], Device::Cpu)?;
        let cm = to_column_major(&v, Device::cuda(0))?;
        assert_eq!(cm.shape(), &[3]);
        assert_eq!(cm.device(), Device::cuda(0));
        assert_eq!(cm.as_slice::<f64>()?, v.as_slice::<f64>()?);
        Ok(())
    }
}
