//! Interactive session state.
//!
//! A [`Session`] owns the mutable point set and everything derived from it.
//! Every mutation recomputes the triangulation, convex hull, Voronoi diagram
//! and statistics from scratch; nothing is carried over between passes.

use crate::derived::convex_hull::convex_hull;
use crate::derived::voronoi::{VoronoiDiagram, voronoi_from_triangulation};
use crate::errors::{Diagnostic, ExplorerError, ExplorerResult};
use crate::geometry::kernel::distance;
use crate::geometry::point::{Coord, Point, PointId};
use crate::geometry::triangle::Triangle;
use crate::triangulation::engine::{Algorithm, triangulate};
use crate::util::{jitter, random_coord, random_coord_in, seeded_rng};
use float_ord::FloatOrd;
use num_traits::cast::NumCast;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// Default radius for [`Session::find_point_near`].
pub const DEFAULT_PICK_RADIUS: f64 = 10.0;

/// Default border kept free by [`Session::generate_random_points`].
pub const DEFAULT_MARGIN: f64 = 50.0;

/// Canvas width the presets are laid out for.
pub const CANVAS_WIDTH: f64 = 800.0;

/// Canvas height the presets are laid out for.
pub const CANVAS_HEIGHT: f64 = 600.0;

/// Number of points in [`Preset::Random`].
pub const RANDOM_PRESET_POINTS: usize = 15;

const CANVAS_CENTER: Coord = Coord::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);

/// Named point layouts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum Preset {
    /// Twelve points on a circle of radius 200 plus its center
    #[default]
    Circle,
    /// Jittered 4×4 grid with spacing 100
    Grid,
    /// Fifteen uniform random points on the canvas
    Random,
    /// Four points on a circle of radius 150 plus its center
    Cocircular,
}

impl Preset {
    /// All presets.
    pub const ALL: [Self; 4] = [Self::Circle, Self::Grid, Self::Random, Self::Cocircular];

    /// Name used in the public interface.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Grid => "grid",
            Self::Random => "random",
            Self::Cocircular => "cocircular",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ExplorerError::UnknownPreset(s.to_string()))
    }
}

/// Aggregated statistics of the last recomputation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Points in the session
    pub total_points: usize,
    /// Triangles in the triangulation
    pub total_triangles: usize,
    /// Distinct undirected edges
    pub total_edges: usize,
    /// Edge flips performed (flip algorithm only)
    pub total_flips: usize,
    /// Smallest interior angle in degrees, `0.0` without triangles
    pub min_angle: f64,
    /// Wall-clock duration of the last recomputation
    pub calc_time: Duration,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "points: {}, triangles: {}, edges: {}, flips: {}, min angle: {:.1}°, time: {:.3} ms",
            self.total_points,
            self.total_triangles,
            self.total_edges,
            self.total_flips,
            self.min_angle,
            self.calc_time.as_secs_f64() * 1000.0
        )
    }
}

/// Mutable point set with its derived triangulation.
#[derive(Debug)]
pub struct Session {
    points: Vec<Point>,
    next_id: u64,
    algorithm: Algorithm,
    triangles: Vec<Triangle>,
    hull: Vec<Point>,
    voronoi: VoronoiDiagram,
    stats: Stats,
    diagnostics: Vec<Diagnostic>,
    rng: StdRng,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates an empty session with a randomly seeded generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(seeded_rng(None))
    }

    /// Creates an empty session whose random layouts are reproducible.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(seeded_rng(Some(seed)))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            points: Vec::new(),
            next_id: 0,
            algorithm: Algorithm::default(),
            triangles: Vec::new(),
            hull: Vec::new(),
            voronoi: VoronoiDiagram::default(),
            stats: Stats::default(),
            diagnostics: Vec::new(),
            rng,
        }
    }

    /// Appends a point and recomputes.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::NonFiniteCoordinate`] for NaN or infinite input.
    pub fn add_point(&mut self, x: f64, y: f64) -> ExplorerResult<Point> {
        ensure_finite(x, y)?;
        let point = self.push_point(x, y);
        self.compute_triangulation();
        Ok(point)
    }

    /// Removes the point with `id` and recomputes, even when no such point
    /// exists.
    pub fn remove_point(&mut self, id: PointId) -> Option<Point> {
        let removed = self
            .points
            .iter()
            .position(|p| p.id == id)
            .map(|index| self.points.remove(index));
        if removed.is_none() {
            log::debug!("remove_point: no point {id}");
        }
        self.compute_triangulation();
        removed
    }

    /// Moves the point with `id` to `(x, y)`, keeping its identity.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::NonFiniteCoordinate`] for NaN or infinite input
    /// and [`ExplorerError::PointNotFound`] for an unknown id.
    pub fn move_point(&mut self, id: PointId, x: f64, y: f64) -> ExplorerResult<Point> {
        ensure_finite(x, y)?;
        let point = self
            .points
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ExplorerError::PointNotFound(id))?;
        point.x = x;
        point.y = y;
        let moved = *point;
        self.compute_triangulation();
        Ok(moved)
    }

    /// First point, in insertion order, strictly within `threshold` of
    /// `(x, y)`. Not a nearest-neighbour search.
    #[must_use]
    pub fn find_point_near(&self, x: f64, y: f64, threshold: f64) -> Option<Point> {
        let target = Coord::new(x, y);
        self.points
            .iter()
            .find(|p| distance(*p, &target) < threshold)
            .copied()
    }

    /// Replaces the point set with `count` uniform random points inside
    /// `[margin, width - margin] × [margin, height - margin]`.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::InvalidParameters`] when the sampling rectangle
    /// is empty; the session is left unchanged.
    pub fn generate_random_points(
        &mut self,
        count: usize,
        width: f64,
        height: f64,
        margin: f64,
    ) -> ExplorerResult<()> {
        let x_range = (margin, width - margin);
        let y_range = (margin, height - margin);
        if !(x_range.0 <= x_range.1 && y_range.0 <= y_range.1) {
            return Err(ExplorerError::InvalidParameters(format!(
                "margin {margin} leaves no room on a {width}x{height} canvas"
            )));
        }

        let coords = (0..count)
            .map(|_| random_coord_in(&mut self.rng, x_range, y_range))
            .collect::<ExplorerResult<Vec<_>>>()?;

        self.points.clear();
        for c in coords {
            self.push_point(c.x, c.y);
        }
        log::debug!("Generated {count} random points");
        self.compute_triangulation();
        Ok(())
    }

    /// Replaces the point set with a preset layout.
    pub fn load_preset(&mut self, preset: Preset) {
        self.points.clear();
        match preset {
            Preset::Circle => {
                self.push_ring(CANVAS_CENTER, 200.0, 12);
                self.push_point(CANVAS_CENTER.x, CANVAS_CENTER.y);
            }
            Preset::Grid => {
                for row in 0..4_u32 {
                    for col in 0..4_u32 {
                        let dx = jitter(&mut self.rng, 10.0);
                        let dy = jitter(&mut self.rng, 10.0);
                        self.push_point(
                            100.0f64.mul_add(<f64 as From<u32>>::from(col), 200.0) + dx,
                            100.0f64.mul_add(<f64 as From<u32>>::from(row), 150.0) + dy,
                        );
                    }
                }
            }
            Preset::Random => {
                let x_range = (DEFAULT_MARGIN, CANVAS_WIDTH - DEFAULT_MARGIN);
                let y_range = (DEFAULT_MARGIN, CANVAS_HEIGHT - DEFAULT_MARGIN);
                for _ in 0..RANDOM_PRESET_POINTS {
                    let c = random_coord(&mut self.rng, x_range, y_range);
                    self.push_point(c.x, c.y);
                }
            }
            Preset::Cocircular => {
                self.push_ring(CANVAS_CENTER, 150.0, 4);
                self.push_point(CANVAS_CENTER.x, CANVAS_CENTER.y);
            }
        }
        log::debug!("Loaded preset {preset} with {} points", self.points.len());
        self.compute_triangulation();
    }

    /// Loads a preset by its public name.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::UnknownPreset`] for an unrecognised name.
    pub fn load_preset_by_name(&mut self, name: &str) -> ExplorerResult<()> {
        let preset = name.parse()?;
        self.load_preset(preset);
        Ok(())
    }

    /// Switches algorithm and recomputes.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
        self.compute_triangulation();
    }

    /// Switches algorithm by its public name.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::UnknownAlgorithm`] for an unrecognised name.
    pub fn set_algorithm_by_name(&mut self, name: &str) -> ExplorerResult<()> {
        let algorithm = name.parse()?;
        self.set_algorithm(algorithm);
        Ok(())
    }

    /// Clears points and every derived structure. Ids keep counting.
    pub fn reset(&mut self) {
        self.points.clear();
        self.triangles.clear();
        self.hull.clear();
        self.voronoi = VoronoiDiagram::default();
        self.stats = Stats::default();
        self.diagnostics.clear();
    }

    /// Recomputes triangles, hull, Voronoi diagram and statistics from the
    /// current point set.
    pub fn compute_triangulation(&mut self) {
        let start = Instant::now();

        let output = triangulate(self.algorithm, &self.points);
        self.triangles = output.triangles;
        self.diagnostics = output.diagnostics;
        self.hull = convex_hull(&self.points);
        self.voronoi = voronoi_from_triangulation(&self.points, &self.triangles);

        let min_angle = self
            .triangles
            .iter()
            .map(Triangle::min_angle)
            .min_by_key(|&a| FloatOrd(a))
            .unwrap_or(0.0);
        self.stats = Stats {
            total_points: self.points.len(),
            total_triangles: self.triangles.len(),
            total_edges: self.edges().len(),
            total_flips: output.flips,
            min_angle,
            calc_time: start.elapsed(),
        };

        log::info!("{}: {}", self.algorithm, self.stats);
        for diagnostic in self.diagnostics.iter().filter(|d| !d.is_benign()) {
            log::warn!("{diagnostic}");
        }
    }

    /// Current point set in insertion order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Triangles of the last recomputation; vertex indices refer to
    /// [`Session::points`].
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Convex hull, counter-clockwise in a y-up frame.
    #[must_use]
    pub fn convex_hull(&self) -> &[Point] {
        &self.hull
    }

    /// Approximate Voronoi diagram.
    #[must_use]
    pub const fn voronoi_diagram(&self) -> &VoronoiDiagram {
        &self.voronoi
    }

    /// Distinct undirected edges keyed by `(min id, max id)`.
    #[must_use]
    pub fn edges(&self) -> Vec<(PointId, PointId)> {
        let edges: BTreeSet<(PointId, PointId)> = self
            .triangles
            .iter()
            .flat_map(|t| t.edges())
            .map(|(i, j)| {
                let (a, b) = (self.points[i].id, self.points[j].id);
                (a.min(b), a.max(b))
            })
            .collect();
        edges.into_iter().collect()
    }

    /// Statistics of the last recomputation.
    #[must_use]
    pub const fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Diagnostics of the last recomputation.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Selected algorithm.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn push_point(&mut self, x: f64, y: f64) -> Point {
        let point = Point::new(PointId::new(self.next_id), x, y);
        self.next_id += 1;
        self.points.push(point);
        point
    }

    fn push_ring(&mut self, center: Coord, radius: f64, count: usize) {
        let n: f64 = NumCast::from(count).unwrap_or(1.0);
        for i in 0..count {
            let i: f64 = NumCast::from(i).unwrap_or(0.0);
            let angle = 2.0 * PI * i / n;
            self.push_point(
                radius.mul_add(angle.cos(), center.x),
                radius.mul_add(angle.sin(), center.y),
            );
        }
    }
}

fn ensure_finite(x: f64, y: f64) -> ExplorerResult<()> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(ExplorerError::NonFiniteCoordinate { x, y })
    }
}
