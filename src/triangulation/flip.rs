//! Lawson edge-flip triangulation.
//!
//! Starts from the triangle on the first three points. Every later point is
//! located by testing each triangle in turn, the containing triangle is split
//! in three, and then all triangle pairs are rescanned for a shared edge whose
//! opposite vertex lies inside the neighbour's circumcircle; that edge is
//! flipped and the scan restarts until a full pass finds nothing.
//!
//! Each scan is O(n²) in the number of triangles. The algorithm exists to
//! compare against Bowyer–Watson and is deliberately not optimised.
//!
//! Points outside the current triangulation (i.e. outside the first
//! triangle's growing region) are skipped.

use super::traits::{TriangulationAlgorithm, TriangulationOutput};
use crate::errors::Diagnostic;
use crate::geometry::kernel::{InCircle, point_in_triangle};
use crate::geometry::point::{Coord, Point};
use crate::geometry::triangle::{Edge, Triangle};
use std::collections::BTreeSet;

/// Flips allowed per squared input size before the pass gives up.
pub const FLIP_LIMIT_FACTOR: usize = 64;

/// Incremental insertion with Lawson flips.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlipAlgorithm;

impl TriangulationAlgorithm for FlipAlgorithm {
    fn name(&self) -> &'static str {
        "flipAlgorithm"
    }

    fn triangulate(&self, points: &[Point]) -> TriangulationOutput {
        if points.len() < 3 {
            return TriangulationOutput::insufficient(points.len());
        }

        let limit = FLIP_LIMIT_FACTOR.saturating_mul(points.len().saturating_mul(points.len()));
        let mut state = FlipState::new(points, limit);
        let limit_hit = !state.insert_all(points);
        state.into_output(limit_hit)
    }
}

struct FlipState {
    arena: Vec<Coord>,
    triangles: Vec<Triangle>,
    flips: usize,
    limit: usize,
    /// Vertex quadruples whose flip test came out cocircular
    cocircular: BTreeSet<[usize; 4]>,
}

impl FlipState {
    /// Seeds the triangulation with the first three points.
    fn new(points: &[Point], limit: usize) -> Self {
        let arena: Vec<Coord> = points.iter().map(Point::coord).collect();
        let seed = Triangle::new([0, 1, 2], &arena);
        Self {
            arena,
            triangles: vec![seed],
            flips: 0,
            limit,
            cocircular: BTreeSet::new(),
        }
    }

    /// Inserts every point after the seed. Returns `false` when the flip
    /// limit stopped the insertions early.
    fn insert_all(&mut self, points: &[Point]) -> bool {
        let mut skipped = 0;
        for index in 3..points.len() {
            if !self.split_containing(index) {
                skipped += 1;
                log::debug!(
                    "Point {} lies outside the current triangulation; skipped",
                    points[index].id
                );
                continue;
            }
            if !self.apply_flips() {
                return false;
            }
        }
        if skipped > 0 {
            log::debug!("{skipped} point(s) skipped by the flip algorithm");
        }
        true
    }

    fn into_output(self, limit_hit: bool) -> TriangulationOutput {
        let mut output = TriangulationOutput {
            triangles: self.triangles,
            flips: self.flips,
            diagnostics: Vec::new(),
        };
        if limit_hit {
            output
                .diagnostics
                .push(Diagnostic::FlipLimitReached { flips: self.flips });
        }
        output.discard_degenerate();
        output.note_instability(self.cocircular.len());
        output
    }

    /// Splits the first triangle containing point `index` into three.
    fn split_containing(&mut self, index: usize) -> bool {
        let p = self.arena[index];
        let Some(position) = self.triangles.iter().position(|t| {
            let [a, b, c] = t.corners(&self.arena);
            point_in_triangle(&p, a, b, c)
        }) else {
            return false;
        };

        let container = self.triangles.swap_remove(position);
        let [a, b, c] = container.vertices;
        for (u, v) in [(a, b), (b, c), (c, a)] {
            self.triangles.push(Triangle::new([u, v, index], &self.arena));
        }
        true
    }

    /// Flips illegal edges until none remain. Returns `false` when the flip
    /// limit stopped the loop.
    fn apply_flips(&mut self) -> bool {
        while let Some(flip) = self.find_illegal_edge() {
            self.flip(flip);
            self.flips += 1;
            if self.flips >= self.limit {
                log::warn!("Flip limit of {} reached; stopping", self.limit);
                return false;
            }
        }
        true
    }

    /// First adjacent pair whose opposite vertex lies inside the neighbour's
    /// circumcircle. Cocircular pairs are recorded once however often the
    /// scan revisits them.
    fn find_illegal_edge(&mut self) -> Option<PendingFlip> {
        let n = self.triangles.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (t1, t2) = (&self.triangles[i], &self.triangles[j]);
                if t1.is_degenerate() || t2.is_degenerate() {
                    continue;
                }
                let Some(edge) = t1.shared_edge(t2) else {
                    continue;
                };
                let (Some(o1), Some(o2)) = (t1.opposite(edge), t2.opposite(edge)) else {
                    continue;
                };
                match t1.incircle(&self.arena, &self.arena[o2]) {
                    InCircle::Inside => {
                        return Some(PendingFlip {
                            first: i,
                            second: j,
                            edge,
                            opposite: (o1, o2),
                        });
                    }
                    InCircle::Cocircular => {
                        let mut quad = [edge.0, edge.1, o1, o2];
                        quad.sort_unstable();
                        self.cocircular.insert(quad);
                    }
                    InCircle::Outside => {}
                }
            }
        }
        None
    }

    /// Replaces the two triangles sharing `edge` with the two on the other
    /// diagonal.
    fn flip(&mut self, flip: PendingFlip) {
        let PendingFlip {
            first,
            second,
            edge,
            opposite: (o1, o2),
        } = flip;

        // second > first, so removing it first keeps `first` valid
        self.triangles.remove(second);
        self.triangles.remove(first);
        self.triangles
            .push(Triangle::new([edge.0, o1, o2], &self.arena));
        self.triangles
            .push(Triangle::new([edge.1, o1, o2], &self.arena));
    }
}

struct PendingFlip {
    first: usize,
    second: usize,
    edge: Edge,
    opposite: (usize, usize),
}
