use t3d_tensor::{DType, Tensor};

use crate::error::TransformError;

/// Compose a 4x4 homogeneous transformation from a rotation and a translation.
///
/// # Arguments
///
/// * `r` - Rotation matrix of shape `[3, 3]` and dtype `Float32`.
/// * `t` - Translation vector of shape `[3]`, dtype `Float32`, on the same device as `r`.
///
/// # Returns
///
/// A `[4, 4]` `Float32` tensor on the device of `r`:
///
/// ```text
/// | R t |
/// | 0 1 |
/// ```
///
/// The scale is assumed to be 1 and `r` is not checked for orthonormality.
///
/// Example:
///
/// ```
/// use t3d_registration::compute_transformation_from_rt;
/// use t3d_tensor::{DType, Device, Tensor};
///
/// let r = Tensor::eye(3, DType::Float32, Device::Cpu);
/// let t = Tensor::zeros(&[3], DType::Float32, Device::Cpu);
/// let transformation = compute_transformation_from_rt(&r, &t).unwrap();
/// assert_eq!(transformation, Tensor::eye(4, DType::Float32, Device::Cpu));
/// ```
pub fn compute_transformation_from_rt(r: &Tensor, t: &Tensor) -> Result<Tensor, TransformError> {
    let dtype = DType::Float32;
    let device = r.device();
    r.assert_shape(&[3, 3])?;
    r.assert_dtype(dtype)?;
    t.assert_shape(&[3])?;
    t.assert_device(device)?;
    t.assert_dtype(dtype)?;

    let mut transformation = Tensor::zeros(&[4, 4], dtype, device);

    // rotation
    transformation.slice_assign(&[0..3, 0..3], r)?;

    // translation, scale is assumed to be 1
    transformation.slice_assign(&[0..3, 3..4], &t.reshape(&[3, 1])?)?;

    transformation.set(&[3, 3], 1.0f32)?;
    Ok(transformation)
}

/// Compose a 4x4 homogeneous transformation from a 6-DoF pose vector.
///
/// The pose is `[rx, ry, rz, tx, ty, tz]`: three rotation angles in radians
/// followed by the translation. The rotation block is `Rz(rz) * Ry(ry) * Rx(rx)`,
/// written out in closed form.
///
/// # Arguments
///
/// * `x` - Pose vector of shape `[6]` and dtype `Float32`.
///
/// # Returns
///
/// A `[4, 4]` `Float32` tensor on the device of `x` with bottom row `[0, 0, 0, 1]`.
/// Scale is not supported.
///
/// Example:
///
/// ```
/// use t3d_registration::compute_transformation_from_pose;
/// use t3d_tensor::{Device, Tensor};
///
/// let pose = Tensor::from_shape_vec(&[6], vec![0.0f32, 0.0, 0.0, 1.0, 2.0, 3.0], Device::Cpu).unwrap();
/// let transformation = compute_transformation_from_pose(&pose).unwrap();
/// assert_eq!(transformation.get::<f32>(&[1, 3]).unwrap(), 2.0);
/// ```
pub fn compute_transformation_from_pose(x: &Tensor) -> Result<Tensor, TransformError> {
    let dtype = DType::Float32;
    let device = x.device();
    x.assert_shape(&[6])?;
    x.assert_dtype(dtype)?;

    let pose = x.as_slice::<f32>()?;
    let (sx, cx) = pose[0].sin_cos();
    let (sy, cy) = pose[1].sin_cos();
    let (sz, cz) = pose[2].sin_cos();

    let mut transformation = Tensor::zeros(&[4, 4], dtype, device);

    let m = transformation.as_slice_mut::<f32>()?;
    m[0] = cz * cy;
    m[1] = -sz * cx + cz * sy * sx;
    m[2] = sz * sx + cz * sy * cx;
    m[4] = sz * cy;
    m[5] = cz * cx + sz * sy * sx;
    m[6] = -cz * sx + sz * sy * cx;
    m[8] = -sy;
    m[9] = cy * sx;
    m[10] = cy * cx;

    transformation.slice_assign(&[0..3, 3..4], &x.slice(0, 3..6)?.reshape(&[3, 1])?)?;

    // NOTE: scale is not supported
    transformation.set(&[3, 3], 1.0f32)?;
    Ok(transformation)
}
