use t3d_tensor::{DType, DeviceType, Element, Tensor};

use crate::{error::SolveError, solve::check_operands};

/// Computes the matrix product `A B`.
///
/// `a` is `r x k`; `b` is either a vector of length `k` (result of length `r`)
/// or a `k x m` matrix (result `r x m`). Operands are validated like in
/// [`crate::solve`] except that `a` need not be square.
///
/// # Errors
///
/// The same validation errors as [`crate::solve`]; only host tensors can be
/// multiplied, other devices yield [`SolveError::UnimplementedBackend`].
pub fn matmul(a: &Tensor, b: &Tensor) -> Result<Tensor, SolveError> {
    let ops = check_operands(a, b, false)?;
    let device = a.device();
    match device.device_type() {
        DeviceType::Cpu => {}
        DeviceType::Cuda => return Err(SolveError::UnimplementedBackend(device)),
    }

    let data = match a.dtype() {
        DType::Float32 => matmul_typed::<f32>(a, b, ops.rows, ops.cols, ops.m)?,
        DType::Float64 => matmul_typed::<f64>(a, b, ops.rows, ops.cols, ops.m)?,
        other => return Err(SolveError::UnsupportedDtype(other)),
    };

    let shape = match b.ndim() {
        1 => vec![ops.rows],
        _ => vec![ops.rows, ops.m],
    };
    Ok(Tensor::from_storage(&shape, data, device)?)
}

fn matmul_typed<T>(
    a: &Tensor,
    b: &Tensor,
    rows: usize,
    inner: usize,
    m: usize,
) -> Result<t3d_tensor::TensorStorage, SolveError>
where
    T: Element + faer::RealField,
{
    let a_data = a.as_slice::<T>()?;
    let b_data = b.as_slice::<T>()?;

    let a_mat = faer::Mat::<T>::from_fn(rows, inner, |i, j| a_data[i * inner + j]);
    let b_mat = faer::Mat::<T>::from_fn(inner, m, |i, j| b_data[i * m + j]);
    let c = &a_mat * &b_mat;

    let c = &c;
    let out = (0..rows)
        .flat_map(|i| (0..m).map(move |j| c.read(i, j)))
        .collect::<Vec<T>>();
    Ok(T::into_storage(out))
}
