use t3d_tensor::{DType, Device, Tensor};

use crate::{backend::backend_for, error::SolveError, layout};

/// Sizes of a validated operand pair `A (rows x cols)`, `B (cols x m)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Operands {
    pub rows: usize,
    pub cols: usize,
    pub m: usize,
}

/// Validates that A is a matrix and B a vector or matrix on the same device,
/// with the same floating point dtype and compatible inner dimensions.
///
/// Checks run in a fixed order so the first violation is the one reported.
pub(crate) fn check_operands(a: &Tensor, b: &Tensor, square: bool) -> Result<Operands, SolveError> {
    if a.device() != b.device() {
        return Err(SolveError::DeviceMismatch {
            a: a.device(),
            b: b.device(),
        });
    }

    if a.dtype() != b.dtype() {
        return Err(SolveError::DtypeMismatch {
            a: a.dtype(),
            b: b.dtype(),
        });
    }
    if !matches!(a.dtype(), DType::Float32 | DType::Float64) {
        return Err(SolveError::UnsupportedDtype(a.dtype()));
    }

    let (rows, cols) = match a.shape() {
        &[rows, cols] => (rows, cols),
        shape => {
            return Err(SolveError::ShapeError(format!(
                "Tensor A must be 2D, but got {}D",
                shape.len()
            )))
        }
    };
    if square && rows != cols {
        return Err(SolveError::ShapeError(format!(
            "Tensor A must be square, but got {rows} x {cols}"
        )));
    }

    let (b_rows, m) = match b.shape() {
        &[b_rows] => (b_rows, 1),
        &[b_rows, m] => (b_rows, m),
        shape => {
            return Err(SolveError::ShapeError(format!(
                "Tensor B must be 1D (vector) or 2D (matrix), but got {}D",
                shape.len()
            )))
        }
    };
    if cols != b_rows {
        return Err(SolveError::DimensionMismatch {
            a_cols: cols,
            b_rows,
        });
    }

    Ok(Operands { rows, cols, m })
}

/// Solves the linear system `A X = B`.
///
/// # Arguments
///
/// * `a` - Square `n x n` matrix.
/// * `b` - Right-hand side, either a vector of length `n` or an `n x m` matrix.
///
/// # Returns
///
/// `X` with the same shape, dtype and device as `b`, in a freshly allocated
/// buffer. The inputs are never modified.
///
/// # Errors
///
/// Operand validation errors are reported before any work is done:
/// [`SolveError::DeviceMismatch`], [`SolveError::DtypeMismatch`],
/// [`SolveError::UnsupportedDtype`], [`SolveError::ShapeError`] and
/// [`SolveError::DimensionMismatch`]. [`SolveError::UnimplementedBackend`] is
/// returned when no routine exists for the device category, and numeric
/// failures of the routine (e.g. a singular `A`) come back as
/// [`SolveError::Backend`].
///
/// Example:
///
/// ```
/// use t3d_linalg::solve;
/// use t3d_tensor::{Device, Tensor};
///
/// let a = Tensor::from_shape_vec(&[2, 2], vec![2.0f64, 0.0, 0.0, 3.0], Device::Cpu).unwrap();
/// let b = Tensor::from_shape_vec(&[2, 1], vec![4.0f64, 9.0], Device::Cpu).unwrap();
/// let x = solve(&a, &b).unwrap();
/// assert_eq!(x.shape(), &[2, 1]);
/// assert_eq!(x.as_slice::<f64>().unwrap(), &[2.0, 3.0]);
/// ```
pub fn solve(a: &Tensor, b: &Tensor) -> Result<Tensor, SolveError> {
    let Operands { rows: n, m, .. } = check_operands(a, b, true)?;
    let device = a.device();
    let dtype = a.dtype();

    let backend = backend_for(device.device_type()).ok_or(SolveError::UnimplementedBackend(device))?;

    if n == 0 || m == 0 {
        return Ok(Tensor::zeros(b.shape(), dtype, device));
    }

    log::debug!(
        "solve: {n}x{n} system with {m} right-hand side(s), {dtype} on {device} via {}",
        backend.name()
    );

    // the routine factors in place, so it only ever sees these copies
    let mut a_copy = layout::to_column_major(a, device)?;
    let mut b_copy = layout::to_column_major(b, device)?;

    // pivots are reported to host memory whatever the device
    let mut ipiv = Tensor::zeros(&[n], DType::Int32, Device::Cpu);

    backend.invoke(
        dtype,
        a_copy.storage_mut(),
        b_copy.storage_mut(),
        ipiv.as_slice_mut::<i32>()?,
        n,
        m,
    )?;

    Ok(layout::from_column_major(&b_copy)?)
}
