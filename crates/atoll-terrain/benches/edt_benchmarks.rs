//! Benchmarks for the iterative distance transform, the per-tile cost center.

use std::hint::black_box;

use atoll_field::Mask;
use atoll_terrain::compute_distance_field;
use criterion::{Criterion, criterion_group, criterion_main};

/// A half-water mask at the given resolution.
fn split_mask(res: usize) -> Mask {
    let mut mask = Mask::new(res, 1.0);
    for y in 0..res {
        for x in 0..res / 2 {
            mask.set(x, y, 0.0);
        }
    }
    mask
}

fn bench_edt_iterations(c: &mut Criterion) {
    let mask = split_mask(256);
    let mut group = c.benchmark_group("edt");

    for iterations in [8_u32, 32, 128] {
        group.bench_function(format!("256px_{iterations}it"), |b| {
            b.iter(|| compute_distance_field(black_box(&mask), black_box(iterations)))
        });
    }
    group.finish();
}

fn bench_edt_resolutions(c: &mut Criterion) {
    let mut group = c.benchmark_group("edt_resolution");

    for res in [64_usize, 256] {
        let mask = split_mask(res);
        group.bench_function(format!("{res}px_32it"), |b| {
            b.iter(|| compute_distance_field(black_box(&mask), black_box(32)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_edt_iterations, bench_edt_resolutions);
criterion_main!(benches);
