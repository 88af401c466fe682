use t3d_tensor::TensorError;
use thiserror::Error;

/// An error type for the transformation builders.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// An input has the wrong shape, dtype or device.
    #[error("Invalid input: {0}")]
    Tensor(#[from] TensorError),
}
