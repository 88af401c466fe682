use t3d_tensor::{DType, Device, TensorError};
use thiserror::Error;

/// Error raised by a numeric backend routine.
///
/// Backends either fully succeed or return one of these; the dispatcher
/// forwards them without interpretation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    /// The factorization produced an exactly zero pivot.
    #[error("Singular matrix: U({pivot}, {pivot}) is exactly zero")]
    Singular {
        /// Index of the first zero diagonal entry of U.
        pivot: usize,
    },

    /// The routine has no implementation for this dtype.
    #[error("Backend does not support dtype {0}")]
    UnsupportedDtype(DType),

    /// The buffers handed to the backend do not hold the declared dtype.
    #[error("Backend buffer has dtype {actual}, expected {expected}")]
    DtypeMismatch {
        /// Dtype the routine was invoked with.
        expected: DType,
        /// Dtype found in the buffer.
        actual: DType,
    },

    /// A buffer is shorter or longer than `n`/`m` imply.
    #[error("Backend buffer has {actual} elements, expected {expected}")]
    BufferSize {
        /// Number of elements implied by the problem size.
        expected: usize,
        /// Number of elements in the buffer.
        actual: usize,
    },
}

/// An error type for the linear algebra operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    /// Operands live on different devices.
    #[error("Tensor A device {a} and Tensor B device {b} mismatch")]
    DeviceMismatch {
        /// Device of A.
        a: Device,
        /// Device of B.
        b: Device,
    },

    /// Operands have different dtypes.
    #[error("Tensor A dtype {a} and Tensor B dtype {b} mismatch")]
    DtypeMismatch {
        /// Dtype of A.
        a: DType,
        /// Dtype of B.
        b: DType,
    },

    /// Only Float32 and Float64 are supported.
    #[error("Only tensors with Float32 or Float64 are supported, but received {0}")]
    UnsupportedDtype(DType),

    /// Wrong rank, non-square matrix, or a right-hand side that is neither vector nor matrix.
    #[error("Shape error: {0}")]
    ShapeError(String),

    /// Inner dimensions of A and B are incompatible.
    #[error("Tensor A columns {a_cols} mismatch with Tensor B rows {b_rows}")]
    DimensionMismatch {
        /// Number of columns of A.
        a_cols: usize,
        /// Number of rows of B.
        b_rows: usize,
    },

    /// No numeric routine is compiled in for the device category.
    #[error("Unimplemented backend {0}")]
    UnimplementedBackend(Device),

    /// The numeric routine failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Tensor error
    #[error("Error with the tensor: {0}")]
    Tensor(#[from] TensorError),
}
