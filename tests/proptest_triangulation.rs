//! Property-based tests for the triangulation engine.
//!
//! This module uses proptest to verify structural properties of the
//! triangulations and derived structures, including:
//! - No input point lies inside any triangle's circumcircle
//! - Super-triangle vertices never reach the output
//! - Triangle count respects the planar Euler bound
//! - The convex hull is convex and contains every point
//! - Recomputation is deterministic
//! - Bowyer–Watson agrees with the brute-force oracle on small inputs

use delaunay_explorer::geometry::kernel::{Orientation, orientation};
use delaunay_explorer::triangulation::bowyer_watson::BowyerWatson;
use delaunay_explorer::{
    Algorithm, Point, PointId, Triangle, convex_hull, triangulate, validate_delaunay,
};
use proptest::prelude::*;

// =============================================================================
// TEST CONFIGURATION
// =============================================================================

/// Strategy for generating finite f64 coordinates
fn finite_coordinate() -> impl Strategy<Value = f64> {
    (-100.0..100.0).prop_filter("must be finite", |x: &f64| x.is_finite())
}

/// Strategy for point sets of `min..=max` points with sequential ids
fn point_set(min: usize, max: usize) -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((finite_coordinate(), finite_coordinate()), min..=max).prop_map(
        |coords| {
            coords
                .into_iter()
                .zip(0_u64..)
                .map(|((x, y), id)| Point::new(PointId::new(id), x, y))
                .collect()
        },
    )
}

fn id_triples(points: &[Point], triangles: &[Triangle]) -> Vec<[PointId; 3]> {
    let mut triples: Vec<_> = triangles.iter().map(|t| t.sorted_ids(points)).collect();
    triples.sort_unstable();
    triples
}

fn cross(a: &Point, b: &Point, p: &Point) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    /// Property: Bowyer–Watson output satisfies the empty-circumcircle property
    #[test]
    fn prop_bowyer_watson_empty_circumcircles(points in point_set(3, 40)) {
        let output = triangulate(Algorithm::BowyerWatson, &points);
        prop_assert_eq!(validate_delaunay(&points, &output.triangles), 0);
    }

    /// Property: Triangles touching the super-triangle are stripped
    #[test]
    fn prop_super_triangle_is_stripped(points in point_set(3, 40)) {
        let n = points.len();
        let output = BowyerWatson::steps(&points).finish();
        for t in &output.triangles {
            prop_assert!(
                t.vertices.iter().all(|&v| v < n),
                "super-triangle vertex in {:?}",
                t.vertices
            );
        }
    }

    /// Property: A planar triangulation has at most 2n - 2 - h triangles
    #[test]
    fn prop_euler_bound(points in point_set(3, 40)) {
        let hull = convex_hull(&points);
        prop_assume!(hull.len() >= 3);

        let output = triangulate(Algorithm::BowyerWatson, &points);
        let bound = 2 * points.len() - 2 - hull.len();
        prop_assert!(
            output.triangles.len() <= bound,
            "{} triangles for {} points with {} hull vertices",
            output.triangles.len(),
            points.len(),
            hull.len()
        );
    }

    /// Property: The hull is counter-clockwise, convex and contains every point
    #[test]
    fn prop_hull_is_convex_and_contains_points(points in point_set(3, 40)) {
        let hull = convex_hull(&points);
        prop_assume!(hull.len() >= 3);

        let h = hull.len();
        for i in 0..h {
            let (a, b, c) = (&hull[i], &hull[(i + 1) % h], &hull[(i + 2) % h]);
            prop_assert_ne!(orientation(a, b, c), Orientation::Clockwise);
            for p in &points {
                prop_assert!(
                    cross(a, b, p) >= -1e-6,
                    "point {} outside hull edge {} -> {}",
                    p.id,
                    a.id,
                    b.id
                );
            }
        }
    }

    /// Property: Triangulating the same input twice gives the same triangles
    #[test]
    fn prop_recompute_is_idempotent(points in point_set(3, 30)) {
        for algorithm in Algorithm::ALL {
            let first = triangulate(algorithm, &points);
            let second = triangulate(algorithm, &points);
            prop_assert_eq!(
                id_triples(&points, &first.triangles),
                id_triples(&points, &second.triangles)
            );
        }
    }

    /// Property: Bowyer–Watson matches the brute-force oracle on small inputs
    #[test]
    fn prop_bowyer_watson_matches_brute_force(points in point_set(3, 7)) {
        let bowyer = triangulate(Algorithm::BowyerWatson, &points);
        let brute = triangulate(Algorithm::BruteForce, &points);
        prop_assert_eq!(
            id_triples(&points, &bowyer.triangles),
            id_triples(&points, &brute.triangles)
        );
    }
}
