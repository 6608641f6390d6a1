//! Common interface of the triangulation algorithms.

use crate::errors::Diagnostic;
use crate::geometry::kernel::InCircle;
use crate::geometry::point::Point;
use crate::geometry::triangle::Triangle;

/// Raw result of one triangulation pass.
///
/// Triangle vertex indices refer to the input point slice.
#[derive(Debug, Clone, Default)]
pub struct TriangulationOutput {
    /// Output triangles
    pub triangles: Vec<Triangle>,
    /// Edge flips performed (flip algorithm only)
    pub flips: usize,
    /// Non-fatal conditions observed during the pass
    pub diagnostics: Vec<Diagnostic>,
}

impl TriangulationOutput {
    /// Empty result for inputs with fewer than three points.
    #[must_use]
    pub fn insufficient(count: usize) -> Self {
        Self {
            diagnostics: vec![Diagnostic::InsufficientPoints { count }],
            ..Self::default()
        }
    }

    /// Drops collinear triangles and records how many were dropped.
    pub fn discard_degenerate(&mut self) {
        let before = self.triangles.len();
        self.triangles.retain(|t| !t.is_degenerate());
        let dropped = before - self.triangles.len();
        if dropped > 0 {
            self.diagnostics
                .push(Diagnostic::DegenerateTriangles { count: dropped });
        }
    }

    /// Records near-zero in-circle evaluations, if any.
    pub fn note_instability(&mut self, near_zero: usize) {
        if near_zero > 0 {
            self.diagnostics
                .push(Diagnostic::NumericInstability { count: near_zero });
        }
    }
}

/// A Delaunay triangulation algorithm.
///
/// Every call starts from scratch; nothing is carried between calls.
pub trait TriangulationAlgorithm {
    /// Short identifier for logs
    fn name(&self) -> &'static str;

    /// Triangulates `points`. Never fails: degenerate input yields an empty
    /// or partial triangle set plus diagnostics.
    fn triangulate(&self, points: &[Point]) -> TriangulationOutput;
}

/// Counts in-circle tests that landed within rounding error of the circle.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct InstabilityCounter(usize);

impl InstabilityCounter {
    /// Records `position` and returns whether it means "inside". Cocircular
    /// points count as outside.
    pub(crate) fn inside(&mut self, position: InCircle) -> bool {
        if position == InCircle::Cocircular {
            self.0 += 1;
        }
        position == InCircle::Inside
    }

    pub(crate) const fn count(self) -> usize {
        self.0
    }
}
