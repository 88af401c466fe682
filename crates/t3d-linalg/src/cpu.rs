//! Host LU solver built on `faer`.
//!
//! The routine follows the `gesv` calling convention: A and B arrive as
//! column-major buffers, A is overwritten with its packed LU factors, B with
//! the solution, and the pivot buffer with the row permutation.

use faer::prelude::SpSolver;
use t3d_tensor::{DType, Element, TensorStorage};

use crate::error::BackendError;

/// Solves `A X = B` in place for column-major host buffers.
///
/// # Arguments
///
/// * `dtype` - Element type of both buffers, `Float32` or `Float64`.
/// * `a` - `n x n` column-major matrix, replaced by `L` (strictly lower, unit
///   diagonal implied) and `U` (upper) of `P A = L U`.
/// * `b` - `n x m` column-major right-hand side, replaced by the solution.
/// * `ipiv` - length `n`, receives the row permutation: row `i` of `P A` is
///   row `ipiv[i]` of `A` (0-based).
///
/// # Errors
///
/// [`BackendError::Singular`] if `U` has an exactly zero diagonal entry, in
/// which case `a`, `b` and `ipiv` are left untouched.
pub fn gesv(
    dtype: DType,
    a: &mut TensorStorage,
    b: &mut TensorStorage,
    ipiv: &mut [i32],
    n: usize,
    m: usize,
) -> Result<(), BackendError> {
    log::trace!("cpu gesv: n={n} m={m} dtype={dtype}");
    match dtype {
        DType::Float32 => gesv_typed::<f32>(a, b, ipiv, n, m),
        DType::Float64 => gesv_typed::<f64>(a, b, ipiv, n, m),
        other => Err(BackendError::UnsupportedDtype(other)),
    }
}

fn typed_buffer<T: Element>(
    storage: &mut TensorStorage,
    len: usize,
) -> Result<&mut [T], BackendError> {
    let dtype = storage.dtype();
    let buffer = T::from_storage_mut(storage).ok_or(BackendError::DtypeMismatch {
        expected: T::DTYPE,
        actual: dtype,
    })?;
    if buffer.len() != len {
        return Err(BackendError::BufferSize {
            expected: len,
            actual: buffer.len(),
        });
    }
    Ok(buffer)
}

fn gesv_typed<T>(
    a: &mut TensorStorage,
    b: &mut TensorStorage,
    ipiv: &mut [i32],
    n: usize,
    m: usize,
) -> Result<(), BackendError>
where
    T: Element + faer::RealField,
{
    let a_buf = typed_buffer::<T>(a, n * n)?;
    let b_buf = typed_buffer::<T>(b, n * m)?;
    if ipiv.len() != n {
        return Err(BackendError::BufferSize {
            expected: n,
            actual: ipiv.len(),
        });
    }

    // column-major: entry (i, j) lives at i + j * n
    let a_mat = faer::Mat::<T>::from_fn(n, n, |i, j| a_buf[i + j * n]);
    let b_mat = faer::Mat::<T>::from_fn(n, m, |i, j| b_buf[i + j * n]);

    let lu = a_mat.partial_piv_lu();
    let u = lu.compute_u();
    if let Some(pivot) = (0..n).find(|&i| u.read(i, i) == T::zero()) {
        return Err(BackendError::Singular { pivot });
    }
    let l = lu.compute_l();
    let x = lu.solve(b_mat.as_ref());

    for j in 0..n {
        for i in 0..n {
            a_buf[i + j * n] = if i > j { l.read(i, j) } else { u.read(i, j) };
        }
    }
    for j in 0..m {
        for i in 0..n {
            b_buf[i + j * n] = x.read(i, j);
        }
    }
    let (forward, _) = lu.row_permutation().arrays();
    for (p, &row) in ipiv.iter_mut().zip(forward) {
        *p = row as i32;
    }

    Ok(())
}
