//! Mapping from device category to numeric solve routine.
//!
//! The set of device categories is closed ([`DeviceType`]) and resolved with an
//! exhaustive `match`, so every supported backend is visible here and adding a
//! category is a compile error until it is handled. There is no runtime
//! registration and no shared mutable state; lookups are safe from any thread.

use t3d_tensor::{DType, DeviceType, TensorStorage};

use crate::{cpu, error::BackendError};

/// Signature shared by all solve routines.
///
/// `(dtype, A, B, pivots, n, m)`: A is `n x n` and B is `n x m`, both
/// column-major. The routine overwrites A with its factors and B with the
/// solution. The pivot buffer always lives in host memory.
pub type SolverRoutine = fn(
    DType,
    &mut TensorStorage,
    &mut TensorStorage,
    &mut [i32],
    usize,
    usize,
) -> Result<(), BackendError>;

/// A resolved numeric backend.
#[derive(Clone, Copy)]
pub struct SolverBackend {
    name: &'static str,
    routine: SolverRoutine,
}

impl std::fmt::Debug for SolverBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverBackend").field("name", &self.name).finish()
    }
}

impl SolverBackend {
    /// Human readable backend name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Runs the solve routine on column-major buffers.
    pub fn invoke(
        &self,
        dtype: DType,
        a: &mut TensorStorage,
        b: &mut TensorStorage,
        ipiv: &mut [i32],
        n: usize,
        m: usize,
    ) -> Result<(), BackendError> {
        (self.routine)(dtype, a, b, ipiv, n, m)
    }
}

/// Returns the solve routine for a device category, if one is compiled in.
pub fn backend_for(device_type: DeviceType) -> Option<SolverBackend> {
    match device_type {
        DeviceType::Cpu => Some(SolverBackend {
            name: "cpu-faer-lu",
            routine: cpu::gesv,
        }),
        // no accelerator solver is built into this crate
        DeviceType::Cuda => None,
    }
}

/// Lists the device categories that have a solve routine.
pub fn available_backends() -> Vec<DeviceType> {
    [DeviceType::Cpu, DeviceType::Cuda]
        .into_iter()
        .filter(|device_type| backend_for(*device_type).is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_backend_present() {
        let backend = backend_for(DeviceType::Cpu);
        assert!(backend.is_some());
        assert_eq!(backend.map(|b| b.name()), Some("cpu-faer-lu"));
    }

    #[test]
    fn test_cuda_backend_absent() {
        assert!(backend_for(DeviceType::Cuda).is_none());
        assert_eq!(available_backends(), vec![DeviceType::Cpu]);
    }

    #[test]
    fn test_lookup_from_threads() {
        let handles = (0..4)
            .map(|_| std::thread::spawn(|| backend_for(DeviceType::Cpu).map(|b| b.name())))
            .collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(handle.join().ok().flatten(), Some("cpu-faer-lu"));
        }
    }

    #[test]
    fn test_invoke() -> Result<(), BackendError> {
        let backend = backend_for(DeviceType::Cpu).ok_or(BackendError::UnsupportedDtype(DType::Float64))?;
        let mut a = TensorStorage::Float64(vec![4.0]);
        let mut b = TensorStorage::Float64(vec![2.0]);
        let mut ipiv = vec![0i32];
        backend.invoke(DType::Float64, &mut a, &mut b, &mut ipiv, 1, 1)?;
        assert_eq!(b, TensorStorage::Float64(vec![0.5]));
        Ok(())
    }
}
