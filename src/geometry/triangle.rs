//! Triangle records over a point arena.
//!
//! A [`Triangle`] stores three indices into the slice of points it was built
//! from, plus geometry cached at construction. Triangles are never edited in
//! place; any change produces a new triangle with a new id.

use super::kernel::{self, Angles, Circle, InCircle, Orientation};
use super::point::{Planar, Point, PointId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Undirected edge as a pair of arena indices.
pub type Edge = (usize, usize);

/// Triangle with cached circumcircle, angles and area.
///
/// Vertices are stored counter-clockwise (y-up frame) unless collinear, so
/// [`kernel::point_in_circumcircle`] on them is a correct inside test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Triangle {
    /// Unique identity of this triangle instance
    pub id: Uuid,
    /// Arena indices of the vertices
    pub vertices: [usize; 3],
    /// Circumscribed circle, `None` for collinear vertices
    pub circumcircle: Option<Circle>,
    /// Interior angles in degrees
    pub angles: Angles,
    /// Unsigned area
    pub area: f64,
}

impl Triangle {
    /// Builds a triangle over `arena`, normalising the winding.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds for `arena`.
    #[must_use]
    pub fn new<P: Planar>(vertices: [usize; 3], arena: &[P]) -> Self {
        let [i, mut j, mut k] = vertices;
        if kernel::orientation(&arena[i], &arena[j], &arena[k]) == Orientation::Clockwise {
            std::mem::swap(&mut j, &mut k);
        }
        let (a, b, c) = (&arena[i], &arena[j], &arena[k]);

        Self {
            id: Uuid::new_v4(),
            vertices: [i, j, k],
            circumcircle: kernel::circumcircle(a, b, c),
            angles: kernel::triangle_angles(a, b, c),
            area: kernel::triangle_area(a, b, c),
        }
    }

    /// The three vertices resolved against `arena`.
    #[must_use]
    pub fn corners<'a, P>(&self, arena: &'a [P]) -> [&'a P; 3] {
        self.vertices.map(|i| &arena[i])
    }

    /// Ids of the vertices, resolved against the input points.
    #[must_use]
    pub fn vertex_ids(&self, points: &[Point]) -> [PointId; 3] {
        self.vertices.map(|i| points[i].id)
    }

    /// Vertex ids in ascending order, for comparing triangulations as sets.
    #[must_use]
    pub fn sorted_ids(&self, points: &[Point]) -> [PointId; 3] {
        let mut ids = self.vertex_ids(points);
        ids.sort_unstable();
        ids
    }

    /// The three directed edges `a→b`, `b→c`, `c→a`.
    #[must_use]
    pub const fn edges(&self) -> [Edge; 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }

    /// Whether `index` is one of the vertices.
    #[must_use]
    pub fn has_vertex(&self, index: usize) -> bool {
        self.vertices.contains(&index)
    }

    /// Whether `edge` (in either direction) is an edge of this triangle.
    #[must_use]
    pub fn has_edge(&self, edge: Edge) -> bool {
        self.edges().iter().any(|&e| same_edge(e, edge))
    }

    /// First edge of `self` that `other` also has, in `self`'s direction.
    #[must_use]
    pub fn shared_edge(&self, other: &Self) -> Option<Edge> {
        self.edges().into_iter().find(|&e| other.has_edge(e))
    }

    /// Vertex not on `edge`.
    #[must_use]
    pub fn opposite(&self, edge: Edge) -> Option<usize> {
        self.vertices
            .into_iter()
            .find(|&v| v != edge.0 && v != edge.1)
    }

    /// Whether the vertices are collinear (no circumcircle).
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.circumcircle.is_none()
    }

    /// Whether `p` lies clearly inside the circumcircle; cocircular points
    /// are not inside.
    #[must_use]
    pub fn circumcircle_contains<P: Planar>(&self, arena: &[P], p: &impl Planar) -> bool {
        self.incircle(arena, p) == InCircle::Inside
    }

    /// Position of `p` relative to the circumcircle.
    #[must_use]
    pub fn incircle<P: Planar>(&self, arena: &[P], p: &impl Planar) -> InCircle {
        let [a, b, c] = self.corners(arena);
        kernel::classify_incircle(a, b, c, p)
    }

    /// Smallest interior angle in degrees.
    #[must_use]
    pub const fn min_angle(&self) -> f64 {
        self.angles.min
    }
}

/// Edge equality ignoring direction.
#[must_use]
pub const fn same_edge(e1: Edge, e2: Edge) -> bool {
    (e1.0 == e2.0 && e1.1 == e2.1) || (e1.0 == e2.1 && e1.1 == e2.0)
}
