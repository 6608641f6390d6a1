//! Benchmarks for the triangulation algorithms and derived structures.
//!
//! This benchmark suite measures:
//! - Each algorithm on random point sets of increasing size
//! - Convex hull and Voronoi derivation
//! - A full session recomputation

#![allow(missing_docs)] // Allow missing docs for criterion-generated functions

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use delaunay_explorer::derived::voronoi::voronoi_from_triangulation;
use delaunay_explorer::{Algorithm, Point, Session, convex_hull, triangulate};
use std::hint::black_box;

fn random_points(count: usize, seed: u64) -> Vec<Point> {
    let mut session = Session::with_seed(seed);
    session.set_algorithm(Algorithm::BowyerWatson);
    session
        .generate_random_points(count, 800.0, 600.0, 50.0)
        .expect("Failed to generate points");
    session.points().to_vec()
}

/// Benchmark every algorithm on the same inputs
fn bench_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangulate");

    for count in [10_usize, 25, 50, 100] {
        let points = random_points(count, 1);
        group.throughput(Throughput::Elements(count as u64));

        for algorithm in Algorithm::ALL {
            // Brute force is O(n⁴)
            if algorithm == Algorithm::BruteForce && count > 25 {
                continue;
            }
            group.bench_with_input(
                BenchmarkId::new(algorithm.as_str(), count),
                &points,
                |b, points| b.iter(|| black_box(triangulate(algorithm, black_box(points)))),
            );
        }
    }
    group.finish();
}

/// Benchmark hull and Voronoi derivation from an existing triangulation
fn bench_derived_structures(c: &mut Criterion) {
    let mut group = c.benchmark_group("derived");

    for count in [50_usize, 200] {
        let points = random_points(count, 2);
        let output = triangulate(Algorithm::BowyerWatson, &points);

        group.bench_with_input(BenchmarkId::new("convex_hull", count), &points, |b, points| {
            b.iter(|| black_box(convex_hull(black_box(points))));
        });
        group.bench_with_input(
            BenchmarkId::new("voronoi", count),
            &output.triangles,
            |b, triangles| {
                b.iter(|| black_box(voronoi_from_triangulation(&points, black_box(triangles))));
            },
        );
    }
    group.finish();
}

/// Benchmark a full session pass, stats included
fn bench_session_recompute(c: &mut Criterion) {
    let mut session = Session::with_seed(3);
    session
        .generate_random_points(100, 800.0, 600.0, 50.0)
        .expect("Failed to generate points");

    c.bench_function("session_recompute_100", |b| {
        b.iter(|| {
            session.compute_triangulation();
            black_box(session.stats().total_triangles)
        });
    });
}

criterion_group!(
    benches,
    bench_algorithms,
    bench_derived_structures,
    bench_session_recompute
);
criterion_main!(benches);
