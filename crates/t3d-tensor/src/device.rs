use std::str::FromStr;

use crate::TensorError;

/// Category of compute device a tensor is placed on.
///
/// The category is what numeric backends are keyed by; the device index is
/// only relevant for equality between tensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceType {
    /// Host memory.
    Cpu,
    /// CUDA accelerator.
    Cuda,
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceType::Cpu => write!(f, "cpu"),
            DeviceType::Cuda => write!(f, "cuda"),
        }
    }
}

/// Device identifier for tensor placement.
///
/// A device is a `(category, index)` pair. The host is always `cpu:0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Device {
    /// CPU device
    #[default]
    Cpu,
    /// CUDA device with device ID
    Cuda {
        /// The CUDA device ID
        device_id: usize,
    },
}

impl Device {
    /// Returns the device category.
    pub fn device_type(&self) -> DeviceType {
        match self {
            Device::Cpu => DeviceType::Cpu,
            Device::Cuda { .. } => DeviceType::Cuda,
        }
    }

    /// Returns the device index. The host is always index 0.
    pub fn device_id(&self) -> usize {
        match self {
            Device::Cpu => 0,
            Device::Cuda { device_id } => *device_id,
        }
    }

    /// Returns true if the device is CPU.
    pub fn is_cpu(&self) -> bool {
        matches!(self, Device::Cpu)
    }

    /// Returns true if the device is a GPU.
    pub fn is_gpu(&self) -> bool {
        !self.is_cpu()
    }

    /// Creates a CUDA device with the specified device ID.
    pub fn cuda(device_id: usize) -> Self {
        Device::Cuda { device_id }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.device_type(), self.device_id())
    }
}

impl FromStr for Device {
    type Err = TensorError;

    /// Parses `cpu`, `cpu:0` or `cuda:N`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let (kind, index) = match lower.split_once(':') {
            Some((kind, index)) => {
                let index = index
                    .parse::<usize>()
                    .map_err(|_| TensorError::InvalidDevice(s.to_string()))?;
                (kind.to_string(), Some(index))
            }
            None => (lower, None),
        };

        match (kind.as_str(), index) {
            ("cpu", None | Some(0)) => Ok(Device::Cpu),
            ("cuda", Some(device_id)) => Ok(Device::Cuda { device_id }),
            _ => Err(TensorError::InvalidDevice(s.to_string())),
        }
    }
}
