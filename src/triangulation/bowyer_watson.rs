//! Incremental Bowyer–Watson triangulation.
//!
//! Each pass runs the state machine
//! `Idle → SuperTriangleCreated → Inserting* → SuperTriangleStripped → Done`:
//!
//! 1. A super-triangle enclosing every input point seeds the triangle set.
//! 2. Each point, in input order, removes the triangles whose circumcircle
//!    contains it ("bad" triangles) and re-triangulates the cavity by
//!    connecting the cavity boundary to the point.
//! 3. Triangles touching a super-triangle vertex are stripped.
//!
//! The super-triangle corners are stored at finite coordinates for display,
//! but the in-circle test treats them as points at infinity in fixed
//! directions: a circle through one corner degenerates to the half-plane
//! beyond the opposite edge, a circle through two corners to a half-plane
//! through the remaining vertex. Thin triangles along the convex hull are
//! therefore never lost to a super-triangle corner that happens to fall
//! inside their circumcircle.
//!
//! [`BowyerWatson::steps`] exposes the same state machine one insertion at a
//! time for step-through rendering; [`BowyerWatson::triangulate`] simply
//! drives it to completion.

use super::traits::{InstabilityCounter, TriangulationAlgorithm, TriangulationOutput};
use crate::geometry::kernel::{INCIRCLE_RELATIVE_TOLERANCE, InCircle};
use crate::geometry::point::{Coord, Point, PointId};
use crate::geometry::triangle::{Edge, Triangle};

/// Multiplier applied to the bounding box extent when sizing the super-triangle.
pub const SUPER_TRIANGLE_SCALE: f64 = 20.0;

/// Directions of the super-triangle corners from the bounding box center.
const SUPER_DIRECTIONS: [Coord; 3] = [
    Coord::new(-2.0, -1.0),
    Coord::new(0.0, 2.0),
    Coord::new(2.0, -1.0),
];

/// Bowyer–Watson algorithm (the default).
#[derive(Debug, Clone, Copy, Default)]
pub struct BowyerWatson;

impl BowyerWatson {
    /// Step-through iterator yielding after every point insertion.
    #[must_use]
    pub fn steps(points: &[Point]) -> InsertionSteps<'_> {
        InsertionSteps::new(points)
    }
}

impl TriangulationAlgorithm for BowyerWatson {
    fn name(&self) -> &'static str {
        "bowyerWatson"
    }

    fn triangulate(&self, points: &[Point]) -> TriangulationOutput {
        Self::steps(points).finish()
    }
}

/// Phase of a Bowyer–Watson pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fewer than three points; nothing to do
    Idle,
    /// Super-triangle seeded, no point inserted yet
    SuperTriangleCreated,
    /// At least one point inserted, more remain
    Inserting,
    /// Super-triangle vertices and their triangles removed
    SuperTriangleStripped,
    /// Output handed out
    Done,
}

/// Summary of a single point insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionStep {
    /// Index of the inserted point in the input slice
    pub index: usize,
    /// Id of the inserted point
    pub point_id: PointId,
    /// Triangles whose circumcircle contained the point
    pub bad_triangles: usize,
    /// Edges of the cavity boundary, one new triangle each
    pub boundary_edges: usize,
    /// Triangles in the working set after the insertion, super-triangle included
    pub triangle_count: usize,
}

/// Super-triangle corners enclosing every point in `points`.
///
/// The bounding box is inflated by [`SUPER_TRIANGLE_SCALE`] times its larger
/// extent; a zero extent (all points coincident) is treated as one unit.
#[must_use]
pub fn super_triangle(points: &[Point]) -> [Coord; 3] {
    let (center, extent) = bounding_box(points);
    let reach = SUPER_TRIANGLE_SCALE / 2.0 * extent;
    SUPER_DIRECTIONS.map(|d| {
        Coord::new(
            reach.mul_add(d.x, center.x),
            reach.mul_add(d.y, center.y),
        )
    })
}

/// Center and larger extent of the bounding box, with a zero extent raised
/// to one.
fn bounding_box(points: &[Point]) -> (Coord, f64) {
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let extent = (max_x - min_x).max(max_y - min_y);
    let extent = if extent > 0.0 { extent } else { 1.0 };
    let center = Coord::new(f64::midpoint(min_x, max_x), f64::midpoint(min_y, max_y));
    (center, extent)
}

const fn cross(u: Coord, v: Coord) -> f64 {
    u.x * v.y - u.y * v.x
}

const fn dot(u: Coord, v: Coord) -> f64 {
    u.x * v.x + u.y * v.y
}

const fn sub(a: Coord, b: Coord) -> Coord {
    Coord::new(a.x - b.x, a.y - b.y)
}

fn norm(u: Coord) -> f64 {
    u.x.hypot(u.y)
}

/// In-circle test against the triangle `a, b` plus the corner at infinity in
/// direction `d`: the half-plane bounded by line `ab` on the side of `d`.
/// Points on the line are inside only strictly between `a` and `b`.
///
/// Ties are exact configurations rather than rounding noise, so this never
/// answers [`InCircle::Cocircular`].
fn beyond_edge(a: Coord, b: Coord, d: Coord, center: Coord, p: Coord) -> InCircle {
    let ab = sub(b, a);
    let ap = sub(p, a);
    let mut side = cross(ab, d);
    if side == 0.0 {
        side = cross(ab, sub(center, a));
    }

    let turn = cross(ab, ap);
    if turn.abs() <= INCIRCLE_RELATIVE_TOLERANCE * norm(ab) * norm(ap) {
        return if dot(ap, ab) > 0.0 && dot(sub(p, b), sub(a, b)) > 0.0 {
            InCircle::Inside
        } else {
            InCircle::Outside
        };
    }
    if (turn > 0.0) == (side > 0.0) {
        InCircle::Inside
    } else {
        InCircle::Outside
    }
}

/// In-circle test against the triangle `a` plus the corners at infinity in
/// directions `di` and `dj`: the half-plane through `a` facing the
/// circumcenter of the origin, `di` and `dj`. Like [`beyond_edge`], never
/// answers [`InCircle::Cocircular`].
fn beyond_vertex(a: Coord, di: Coord, dj: Coord, center: Coord, p: Coord) -> InCircle {
    let denominator = 2.0 * cross(di, dj);
    let normal = Coord::new(
        (dj.y * dot(di, di) - di.y * dot(dj, dj)) / denominator,
        (di.x * dot(dj, dj) - dj.x * dot(di, di)) / denominator,
    );

    let ap = sub(p, a);
    let along = dot(normal, ap);
    if along.abs() <= INCIRCLE_RELATIVE_TOLERANCE * norm(normal) * norm(ap) {
        // Tie on the boundary line: compare distances to the center
        let from_p = dot(sub(p, center), sub(p, center));
        let from_a = dot(sub(a, center), sub(a, center));
        return if from_p < from_a {
            InCircle::Inside
        } else {
            InCircle::Outside
        };
    }
    if along > 0.0 {
        InCircle::Inside
    } else {
        InCircle::Outside
    }
}

/// Boundary of the union of `bad` triangles: edges that belong to exactly
/// one of them, compared by endpoint identity in either order.
#[must_use]
pub fn cavity_boundary(bad: &[Triangle]) -> Vec<Edge> {
    let mut boundary = Vec::new();
    for (i, triangle) in bad.iter().enumerate() {
        for edge in triangle.edges() {
            let shared = bad
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && other.has_edge(edge));
            if !shared {
                boundary.push(edge);
            }
        }
    }
    boundary
}

/// In-progress Bowyer–Watson pass.
///
/// The arena holds the input coordinates followed by the three
/// super-triangle corners, so any index `>= input_len` is synthetic.
#[derive(Debug)]
pub struct InsertionSteps<'a> {
    points: &'a [Point],
    arena: Vec<Coord>,
    center: Coord,
    triangles: Vec<Triangle>,
    next: usize,
    phase: Phase,
    instability: InstabilityCounter,
}

impl<'a> InsertionSteps<'a> {
    fn new(points: &'a [Point]) -> Self {
        if points.len() < 3 {
            return Self {
                points,
                arena: Vec::new(),
                center: Coord::default(),
                triangles: Vec::new(),
                next: 0,
                phase: Phase::Idle,
                instability: InstabilityCounter::default(),
            };
        }

        let mut arena: Vec<Coord> = points.iter().map(Point::coord).collect();
        arena.extend(super_triangle(points));
        let n = points.len();
        let seed = Triangle::new([n, n + 1, n + 2], &arena);
        log::debug!("Super-triangle created for {n} points");

        Self {
            points,
            arena,
            center: bounding_box(points).0,
            triangles: vec![seed],
            next: 0,
            phase: Phase::SuperTriangleCreated,
            instability: InstabilityCounter::default(),
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Working triangle set, including triangles on super-triangle vertices.
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Coordinates the working triangles index into: input points followed
    /// by the three super-triangle corners.
    #[must_use]
    pub fn arena(&self) -> &[Coord] {
        &self.arena
    }

    /// Whether `index` addresses a super-triangle corner.
    #[must_use]
    pub const fn is_super_vertex(&self, index: usize) -> bool {
        index >= self.points.len()
    }

    /// In-circle classification with super-triangle corners at infinity.
    fn classify(&self, triangle: &Triangle, p: Coord) -> InCircle {
        let n = self.points.len();
        let mut finite = [0; 3];
        let mut ideal = [0; 3];
        let (mut f, mut i) = (0, 0);
        for &v in &triangle.vertices {
            if v < n {
                finite[f] = v;
                f += 1;
            } else {
                ideal[i] = v - n;
                i += 1;
            }
        }

        match i {
            0 => triangle.incircle(&self.arena, &p),
            1 => beyond_edge(
                self.arena[finite[0]],
                self.arena[finite[1]],
                SUPER_DIRECTIONS[ideal[0]],
                self.center,
                p,
            ),
            2 => beyond_vertex(
                self.arena[finite[0]],
                SUPER_DIRECTIONS[ideal[0]],
                SUPER_DIRECTIONS[ideal[1]],
                self.center,
                p,
            ),
            _ => InCircle::Inside,
        }
    }

    fn insert(&mut self, index: usize) -> InsertionStep {
        let p = self.arena[index];

        let mut bad = Vec::new();
        let mut kept = Vec::with_capacity(self.triangles.len());
        for t in std::mem::take(&mut self.triangles) {
            let position = self.classify(&t, p);
            if self.instability.inside(position) {
                bad.push(t);
            } else {
                kept.push(t);
            }
        }

        let boundary = cavity_boundary(&bad);
        self.triangles = kept;
        self.triangles.extend(
            boundary
                .iter()
                .map(|&(u, v)| Triangle::new([u, v, index], &self.arena)),
        );

        let step = InsertionStep {
            index,
            point_id: self.points[index].id,
            bad_triangles: bad.len(),
            boundary_edges: boundary.len(),
            triangle_count: self.triangles.len(),
        };
        log::debug!(
            "Inserted point {} ({}/{}): {} bad triangles, {} boundary edges",
            step.point_id,
            index + 1,
            self.points.len(),
            step.bad_triangles,
            step.boundary_edges
        );
        step
    }

    fn strip_super_triangle(&mut self) {
        let n = self.points.len();
        self.triangles.retain(|t| t.vertices.iter().all(|&v| v < n));
        self.phase = Phase::SuperTriangleStripped;
    }

    /// Runs any remaining insertions, strips the super-triangle and returns
    /// the result.
    #[must_use]
    pub fn finish(mut self) -> TriangulationOutput {
        if self.phase == Phase::Idle {
            self.phase = Phase::Done;
            return TriangulationOutput::insufficient(self.points.len());
        }

        self.by_ref().for_each(drop);
        if self.phase != Phase::SuperTriangleStripped {
            self.strip_super_triangle();
        }

        let mut output = TriangulationOutput {
            triangles: std::mem::take(&mut self.triangles),
            ..TriangulationOutput::default()
        };
        output.discard_degenerate();
        output.note_instability(self.instability.count());
        self.phase = Phase::Done;
        output
    }
}

impl Iterator for InsertionSteps<'_> {
    type Item = InsertionStep;

    fn next(&mut self) -> Option<Self::Item> {
        match self.phase {
            Phase::SuperTriangleCreated | Phase::Inserting => {
                let step = self.insert(self.next);
                self.next += 1;
                if self.next == self.points.len() {
                    self.strip_super_triangle();
                } else {
                    self.phase = Phase::Inserting;
                }
                Some(step)
            }
            Phase::Idle | Phase::SuperTriangleStripped | Phase::Done => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::kernel::point_in_triangle;

    fn points(coords: &[(f64, f64)]) -> Vec<Point> {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Point::new(PointId::new(i as u64), x, y))
            .collect()
    }

    #[test]
    fn test_super_triangle_contains_all_points() {
        let pts = points(&[(0.0, 0.0), (100.0, 0.0), (50.0, 80.0), (-30.0, 40.0)]);
        let [a, b, c] = super_triangle(&pts);
        for p in &pts {
            assert!(point_in_triangle(p, &a, &b, &c));
        }
    }

    #[test]
    fn test_super_triangle_coincident_points() {
        let pts = points(&[(5.0, 5.0), (5.0, 5.0), (5.0, 5.0)]);
        let [a, b, c] = super_triangle(&pts);
        assert!(point_in_triangle(&pts[0], &a, &b, &c));
    }

    #[test]
    fn test_single_triangle() {
        let pts = points(&[(0.0, 0.0), (10.0, 0.0), (5.0, 10.0)]);
        let output = BowyerWatson.triangulate(&pts);
        assert_eq!(output.triangles.len(), 1);
        let mut vertices = output.triangles[0].vertices;
        vertices.sort_unstable();
        assert_eq!(vertices, [0, 1, 2]);
    }

    #[test]
    fn test_square_gives_two_triangles() {
        let pts = points(&[(0.0, 0.0), (10.0, 0.0), (10.0, 11.0), (0.0, 10.0)]);
        let output = BowyerWatson.triangulate(&pts);
        assert_eq!(output.triangles.len(), 2);
        assert_eq!(output.flips, 0);
    }

    #[test]
    fn test_fewer_than_three_points() {
        let pts = points(&[(0.0, 0.0), (10.0, 0.0)]);
        let output = BowyerWatson.triangulate(&pts);
        assert!(output.triangles.is_empty());
        assert_eq!(output.diagnostics.len(), 1);
        assert!(output.diagnostics[0].is_benign());
    }

    #[test]
    fn test_collinear_points_yield_no_triangles() {
        let pts = points(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
        let output = BowyerWatson.triangulate(&pts);
        assert!(output.triangles.is_empty());
    }

    #[test]
    fn test_steps_walk_the_state_machine() {
        let pts = points(&[(0.0, 0.0), (10.0, 0.0), (5.0, 10.0), (5.0, 3.0)]);
        let mut steps = BowyerWatson::steps(&pts);
        assert_eq!(steps.phase(), Phase::SuperTriangleCreated);
        assert_eq!(steps.triangles().len(), 1);
        assert_eq!(steps.arena().len(), pts.len() + 3);
        assert!(steps.is_super_vertex(pts.len()));

        let first = steps.next().expect("first insertion");
        assert_eq!(first.index, 0);
        assert_eq!(first.bad_triangles, 1);
        assert_eq!(first.boundary_edges, 3);
        assert_eq!(first.triangle_count, 3);
        assert_eq!(steps.phase(), Phase::Inserting);

        let remaining: Vec<_> = steps.by_ref().collect();
        assert_eq!(remaining.len(), 3);
        assert_eq!(remaining[2].point_id, PointId::new(3));
        assert_eq!(steps.phase(), Phase::SuperTriangleStripped);

        let output = steps.finish();
        // Interior point splits the outer triangle into three
        assert_eq!(output.triangles.len(), 3);
    }

    #[test]
    fn test_finish_midway_completes_the_pass() {
        let pts = points(&[(0.0, 0.0), (10.0, 0.0), (5.0, 10.0), (5.0, 3.0)]);
        let mut steps = BowyerWatson::steps(&pts);
        let _ = steps.next();
        let output = steps.finish();
        assert_eq!(output.triangles.len(), 3);
    }

    #[test]
    fn test_thin_hull_triangle_is_kept() {
        // (10,95), (50,60), (75,40) is nearly flat; a finite super-triangle
        // corner falls inside its circumcircle
        let pts = points(&[
            (10.0, 95.0),
            (50.0, 60.0),
            (80.0, 35.0),
            (25.0, 35.0),
            (75.0, 40.0),
        ]);
        let output = BowyerWatson.triangulate(&pts);
        let mut triples: Vec<_> = output
            .triangles
            .iter()
            .map(|t| {
                let mut v = t.vertices;
                v.sort_unstable();
                v
            })
            .collect();
        triples.sort_unstable();
        assert_eq!(triples, vec![[0, 1, 3], [0, 1, 4], [1, 3, 4], [2, 3, 4]]);
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_ideal_corner_predicates() {
        let center = Coord::new(0.0, 0.0);
        let a = Coord::new(-1.0, 0.0);
        let b = Coord::new(1.0, 0.0);
        // Corner below: the half-plane under line ab
        let down = SUPER_DIRECTIONS[0];
        let edge = |x, y| beyond_edge(a, b, down, center, Coord::new(x, y));
        assert_eq!(edge(0.0, -5.0), InCircle::Inside);
        assert_eq!(edge(0.0, 5.0), InCircle::Outside);
        assert_eq!(edge(0.5, 0.0), InCircle::Inside);
        assert_eq!(edge(3.0, 0.0), InCircle::Outside);

        // Two lower corners: the half-plane through a facing down
        let (left, right) = (SUPER_DIRECTIONS[0], SUPER_DIRECTIONS[2]);
        let vertex = |x, y| beyond_vertex(a, left, right, center, Coord::new(x, y));
        assert_eq!(vertex(-1.0, -3.0), InCircle::Inside);
        assert_eq!(vertex(-1.0, 3.0), InCircle::Outside);
        // On the boundary line: closer to the center wins
        assert_eq!(vertex(0.5, 0.0), InCircle::Inside);
        assert_eq!(vertex(-3.0, 0.0), InCircle::Outside);
        assert_eq!(vertex(1.0, 0.0), InCircle::Outside);
    }

    #[test]
    fn test_cavity_boundary_of_two_adjacent_triangles() {
        let arena = vec![
            Coord::new(0.0, 0.0),
            Coord::new(10.0, 0.0),
            Coord::new(5.0, 10.0),
            Coord::new(5.0, -10.0),
        ];
        let bad = vec![
            Triangle::new([0, 1, 2], &arena),
            Triangle::new([0, 1, 3], &arena),
        ];
        let boundary = cavity_boundary(&bad);
        assert_eq!(boundary.len(), 4);
        assert!(
            !boundary
                .iter()
                .any(|&e| crate::geometry::triangle::same_edge(e, (0, 1)))
        );
    }
}
