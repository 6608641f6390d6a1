//! Approximate Voronoi diagram read off a Delaunay triangulation.
//!
//! Each cell lists the circumcenters of the triangles incident to its site.
//! Cells are neither ordered nor clipped, and hull sites get open cells with
//! only their finite vertices. Good enough for drawing, not a true dual graph.

use crate::geometry::point::{Coord, Point, PointId};
use crate::geometry::triangle::Triangle;
use float_ord::FloatOrd;
use serde::{Deserialize, Serialize};

/// Voronoi region of one input point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoronoiCell {
    /// Generating input point
    pub site: Point,
    /// Circumcenters of the incident triangles, in triangle order
    pub vertices: Vec<Coord>,
}

impl VoronoiCell {
    /// The cell vertices sorted by angle around the site.
    #[must_use]
    pub fn ordered_vertices(&self) -> Vec<Coord> {
        let mut vertices = self.vertices.clone();
        vertices.sort_by_key(|v| FloatOrd((v.y - self.site.y).atan2(v.x - self.site.x)));
        vertices
    }
}

/// Set of Voronoi cells, one per input point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoronoiDiagram {
    /// Cells in point order
    pub cells: Vec<VoronoiCell>,
}

impl VoronoiDiagram {
    /// Whether the diagram has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell generated by the point with `id`.
    #[must_use]
    pub fn cell(&self, id: PointId) -> Option<&VoronoiCell> {
        self.cells.iter().find(|c| c.site.id == id)
    }

    /// Distinct Voronoi vertices across all cells.
    #[must_use]
    pub fn vertices(&self) -> Vec<Coord> {
        let mut all: Vec<Coord> = self
            .cells
            .iter()
            .flat_map(|c| c.vertices.iter().copied())
            .collect();
        all.sort_by_key(|v| (FloatOrd(v.x), FloatOrd(v.y)));
        all.dedup();
        all
    }
}

/// Builds the approximate diagram for `points` from `triangles`, whose vertex
/// indices refer to `points`.
#[must_use]
pub fn voronoi_from_triangulation(points: &[Point], triangles: &[Triangle]) -> VoronoiDiagram {
    if triangles.is_empty() {
        return VoronoiDiagram::default();
    }

    let cells = points
        .iter()
        .enumerate()
        .map(|(index, site)| VoronoiCell {
            site: *site,
            vertices: triangles
                .iter()
                .filter(|t| t.has_vertex(index))
                .filter_map(|t| t.circumcircle.map(|c| c.center))
                .collect(),
        })
        .collect();
    VoronoiDiagram { cells }
}
