use serde::ser::SerializeStruct;
use serde::Deserialize;

use crate::{storage::TensorStorage, Device, Tensor};

impl serde::Serialize for Tensor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Tensor", 3)?;
        state.serialize_field("data", self.storage())?;
        state.serialize_field("shape", self.shape())?;
        state.serialize_field("device", &self.device())?;
        state.end()
    }
}

impl<'de> serde::Deserialize<'de> for Tensor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct TensorData {
            data: TensorStorage,
            shape: Vec<usize>,
            device: Device,
        }

        let TensorData {
            data,
            shape,
            device,
        } = TensorData::deserialize(deserializer)?;

        Tensor::from_storage(&shape, data, device).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use crate::{DType, Device, Tensor};

    #[test]
    fn test_serde() -> Result<(), Box<dyn std::error::Error>> {
        let tensor = Tensor::from_shape_vec(&[2, 3], vec![1u8, 2, 3, 4, 5, 6], Device::cuda(1))?;
        let serialized = serde_json::to_string(&tensor)?;
        let deserialized: Tensor = serde_json::from_str(&serialized)?;
        assert_eq!(tensor, deserialized);
        assert_eq!(deserialized.dtype(), DType::UInt8);
        Ok(())
    }

    #[test]
    fn test_serde_invalid_shape() {
        let json = r#"{"data":{"Float32":[1.0,2.0,3.0]},"shape":[2,2],"device":"Cpu"}"#;
        assert!(serde_json::from_str::<Tensor>(json).is_err());
    }
}
