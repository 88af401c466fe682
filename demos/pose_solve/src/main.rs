use argh::FromArgs;

use t3d::linalg;
use t3d::registration;
use t3d::tensor::{Device, Tensor};

#[derive(FromArgs)]
/// Builds a rigid transformation from a pose, applies it to a point and
/// recovers the point with a dense solve
struct Args {
    /// pose as rx,ry,rz,tx,ty,tz (radians, then translation)
    #[argh(option, from_str_fn(parse_pose))]
    pose: [f32; 6],

    /// point to transform as x,y,z
    #[argh(option, default = "[1.0, 0.0, 0.0]", from_str_fn(parse_point))]
    point: [f32; 3],

    /// device tag, e.g. cpu:0 or cuda:0
    #[argh(option, default = "Device::Cpu")]
    device: Device,
}

fn parse_pose(value: &str) -> Result<[f32; 6], String> {
    parse_floats(value)
}

fn parse_point(value: &str) -> Result<[f32; 3], String> {
    parse_floats(value)
}

fn parse_floats<const N: usize>(value: &str) -> Result<[f32; N], String> {
    let values = value
        .split(',')
        .map(|v| v.trim().parse::<f32>().map_err(|e| format!("{v}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    <[f32; N]>::try_from(values).map_err(|v| format!("expected {N} values, got {}", v.len()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let pose = Tensor::from_shape_vec(&[6], args.pose.to_vec(), args.device)?;
    let transformation = registration::compute_transformation_from_pose(&pose)?;
    println!("Transformation:\n{transformation}");

    let point = Tensor::from_shape_vec(
        &[4],
        vec![args.point[0], args.point[1], args.point[2], 1.0],
        args.device,
    )?;
    let transformed = linalg::matmul(&transformation, &point)?;
    log::info!("transformed point: {:?}", transformed.as_slice::<f32>()?);

    // T * x = T * p, so x recovers p
    let recovered = linalg::solve(&transformation, &transformed)?;
    let recovered = recovered.as_slice::<f32>()?;
    println!(
        "Point {:?} -> {:?} -> recovered {:?}",
        args.point,
        transformed.as_slice::<f32>()?,
        recovered
    );

    Ok(())
}
