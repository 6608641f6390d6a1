//! Brute-force Delaunay oracle.
//!
//! Keeps every point triple whose circumcircle contains no other input point.
//! O(n⁴); only use on small inputs, typically to validate the other
//! algorithms.

use super::traits::{InstabilityCounter, TriangulationAlgorithm, TriangulationOutput};
use crate::geometry::point::Point;
use crate::geometry::triangle::Triangle;

/// Exhaustive empty-circumcircle search.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForce;

impl TriangulationAlgorithm for BruteForce {
    fn name(&self) -> &'static str {
        "bruteForce"
    }

    fn triangulate(&self, points: &[Point]) -> TriangulationOutput {
        let n = points.len();
        if n < 3 {
            return TriangulationOutput::insufficient(n);
        }
        if n > 60 {
            log::warn!("Brute-force triangulation of {n} points is O(n^4) and will be slow");
        }

        let mut output = TriangulationOutput::default();
        let mut instability = InstabilityCounter::default();
        for i in 0..n {
            for j in (i + 1)..n {
                for k in (j + 1)..n {
                    let triangle = Triangle::new([i, j, k], points);
                    if triangle.is_degenerate() {
                        output.triangles.push(triangle);
                        continue;
                    }
                    let empty = (0..n).filter(|&l| l != i && l != j && l != k).all(|l| {
                        !instability.inside(triangle.incircle(points, &points[l]))
                    });
                    if empty {
                        output.triangles.push(triangle);
                    }
                }
            }
        }

        output.discard_degenerate();
        output.note_instability(instability.count());
        output
    }
}
