//! Benchmarks for volumetric compute dispatch.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use voluma::gpu::compute::generators;
use voluma::{ComputeSession, VolumeConfig};

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Volume Dispatch");
    group.sample_size(10);

    let dir = tempfile::tempdir().unwrap();
    let kernel = dir.path().join("mandelbrot.wgsl");
    std::fs::write(&kernel, generators::MANDELBROT_WGSL).unwrap();

    for size in [32u32, 64, 128] {
        let config = VolumeConfig::new(size, size, size, 4, &kernel);
        let mut session = match pollster::block_on(ComputeSession::new(config)) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Skipping GPU benchmarks: {}", e);
                return;
            }
        };

        group.bench_function(BenchmarkId::new("mandelbrot", size), |b| {
            b.iter(|| {
                session.run().unwrap();
                black_box(session.result_view().unwrap().len());
            });
        });
    }

    group.finish();
}

fn bench_readback_adaptation(c: &mut Criterion) {
    use voluma::VolumeArray;

    let mut group = c.benchmark_group("Result Adaptation");

    let dir = tempfile::tempdir().unwrap();
    let kernel = dir.path().join("gradient.wgsl");
    std::fs::write(&kernel, generators::GRADIENT_X_WGSL).unwrap();

    let config = VolumeConfig::new(64, 64, 64, 4, &kernel);
    let mut session = match pollster::block_on(ComputeSession::new(config.clone())) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Skipping GPU benchmarks: {}", e);
            return;
        }
    };
    session.run().unwrap();

    group.bench_function("adapt_64_cubed", |b| {
        b.iter(|| {
            let view = session.result_view().unwrap();
            let volume = VolumeArray::from_view(&view, &config).unwrap();
            black_box(volume.scalar().unwrap().len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_readback_adaptation);
criterion_main!(benches);
