//! Benchmarks for the edge-to-music pipeline.
//!
//! Run with: cargo bench
//!
//! `compose` runs once per capture, synchronously, before playback starts;
//! these benchmarks track how that cost scales with edge density.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use edgetone::edge::EdgePoint;
use edgetone::pipeline::{compose, ComposeConfig};
use edgetone::style::Style;

const IMG_W: u32 = 128;
const IMG_H: u32 = 128;

/// Regular grid of edge points, `step` pixels apart.
fn grid_points(step: u32) -> Vec<EdgePoint> {
    let mut points = Vec::new();
    for y in (0..IMG_H).step_by(step as usize) {
        for x in (0..IMG_W).step_by(step as usize) {
            points.push(EdgePoint::new(x, y, 1.0 + (x % 11) as f32 * 0.2, 0.0));
        }
    }
    points
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline/compose");
    let config = ComposeConfig::default();

    // step 8 -> 256 points, step 2 -> 4096 points
    for &step in &[8u32, 4, 2] {
        let points = grid_points(step);
        group.bench_with_input(
            BenchmarkId::new("grid", points.len()),
            &points,
            |b, points| {
                b.iter(|| {
                    let mut rng = StdRng::seed_from_u64(7);
                    compose(
                        black_box(points),
                        IMG_W,
                        IMG_H,
                        Style::Pentatonic,
                        black_box(&config),
                        &mut rng,
                    )
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compose);
criterion_main!(benches);
