//! Benchmark for obstacle collision queries
//!
//! Compares the brute-force index against the grid index on the reference
//! scatter (80 trees in a 2000x2000 square) and on a much denser forest.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use grove_physics::{
    scatter_obstacles, Aabb, CollisionIndex, GridIndex, LinearIndex, ScatterConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

fn query_footprints(count: usize) -> Vec<Aabb> {
    let avatar = Aabb::grounded(20.0, 180.0, 20.0);
    let mut rng = StdRng::seed_from_u64(99);
    (0..count)
        .map(|_| {
            avatar.translated(Vec3::new(
                rng.random_range(-1000.0..1000.0),
                0.0,
                rng.random_range(-1000.0..1000.0),
            ))
        })
        .collect()
}

fn bench_queries(c: &mut Criterion) {
    let tree = Aabb::grounded(25.0, 300.0, 25.0);
    let footprints = query_footprints(256);
    let mut group = c.benchmark_group("would_collide");

    for count in [80usize, 2000] {
        let config = ScatterConfig {
            count,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let obstacles =
            scatter_obstacles(&tree, Vec3::ZERO, &config, &mut rng).expect("scatter");

        let linear = LinearIndex::new(obstacles.clone());
        let grid = GridIndex::new(obstacles, 100.0);

        group.bench_with_input(BenchmarkId::new("linear", count), &linear, |b, index| {
            b.iter(|| {
                footprints
                    .iter()
                    .filter(|fp| index.would_collide(black_box(fp)))
                    .count()
            })
        });
        group.bench_with_input(BenchmarkId::new("grid", count), &grid, |b, index| {
            b.iter(|| {
                footprints
                    .iter()
                    .filter(|fp| index.would_collide(black_box(fp)))
                    .count()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_queries);
criterion_main!(benches);
