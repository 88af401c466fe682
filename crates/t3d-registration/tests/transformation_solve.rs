use approx::assert_relative_eq;

use t3d_linalg::{matmul, solve};
use t3d_registration::compute_transformation_from_pose;
use t3d_tensor::{DType, Device, Tensor};

#[test]
fn test_inverse_of_pose_is_rigid_inverse() -> Result<(), Box<dyn std::error::Error>> {
    let pose = Tensor::from_shape_vec(&[6], vec![0.1f32, -0.4, 0.9, 1.0, -2.0, 0.5], Device::Cpu)?;
    let transformation = compute_transformation_from_pose(&pose)?;

    let identity = Tensor::eye(4, DType::Float32, Device::Cpu);
    let inverse = solve(&transformation, &identity)?;

    // [R t; 0 1]^-1 = [R^T -R^T t; 0 1]
    let t = [1.0f32, -2.0, 0.5];
    for i in 0..3 {
        for j in 0..3 {
            assert_relative_eq!(
                inverse.get::<f32>(&[i, j])?,
                transformation.get::<f32>(&[j, i])?,
                epsilon = 1e-5
            );
        }
        let expected = -(0..3)
            .map(|k| transformation.get::<f32>(&[k, i]).map(|r| r * t[k]))
            .sum::<Result<f32, _>>()?;
        assert_relative_eq!(inverse.get::<f32>(&[i, 3])?, expected, epsilon = 1e-5);
    }
    for j in 0..3 {
        assert_relative_eq!(inverse.get::<f32>(&[3, j])?, 0.0, epsilon = 1e-6);
    }
    assert_relative_eq!(inverse.get::<f32>(&[3, 3])?, 1.0, epsilon = 1e-6);

    Ok(())
}

#[test]
fn test_solve_recovers_transformed_point() -> Result<(), Box<dyn std::error::Error>> {
    let pose = Tensor::from_shape_vec(&[6], vec![0.7f32, 0.2, -1.3, 3.0, 0.0, -1.0], Device::Cpu)?;
    let transformation = compute_transformation_from_pose(&pose)?;

    let point = Tensor::from_shape_vec(&[4], vec![0.25f32, -1.5, 2.0, 1.0], Device::Cpu)?;
    let transformed = matmul(&transformation, &point)?;
    let recovered = solve(&transformation, &transformed)?;

    assert_eq!(recovered.shape(), &[4]);
    for (x, p) in recovered.as_slice::<f32>()?.iter().zip(point.as_slice::<f32>()?) {
        assert_relative_eq!(*x, *p, epsilon = 1e-5);
    }
    Ok(())
}
