use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use t3d_linalg::solve;
use t3d_tensor::{DType, Device, Tensor};

fn random_system(n: usize) -> Tensor {
    let data = (0..n * n)
        .map(|k| {
            let noise = rand::random::<f64>();
            if k / n == k % n {
                n as f64 + noise
            } else {
                noise
            }
        })
        .collect::<Vec<_>>();
    Tensor::from_shape_vec(&[n, n], data, Device::Cpu).unwrap()
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");

    for n in [6, 32, 128] {
        let a = random_system(n);
        let b = Tensor::eye(n, DType::Float64, Device::Cpu);
        let v = Tensor::from_shape_vec(&[n], vec![1.0f64; n], Device::Cpu).unwrap();

        group.bench_with_input(BenchmarkId::new("vector_rhs", n), &(&a, &v), |bencher, (a, v)| {
            bencher.iter(|| black_box(solve(a, v)))
        });

        group.bench_with_input(BenchmarkId::new("inverse", n), &(&a, &b), |bencher, (a, b)| {
            bencher.iter(|| black_box(solve(a, b)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_solve);
criterion_main!(benches);
