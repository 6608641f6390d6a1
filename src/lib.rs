#![allow(clippy::multiple_crate_versions)]
#![warn(missing_docs)]

//! Interactive planar Delaunay triangulation engine.
//!
//! This library maintains a mutable 2D point set and recomputes, after every
//! mutation, its Delaunay triangulation together with the convex hull, an
//! approximate Voronoi diagram and summary statistics.
//!
//! # Key Features
//!
//! - Bowyer–Watson triangulation with a step-through iterator
//! - Lawson edge-flip and brute-force algorithms for comparison
//! - Graham-scan convex hull and triangulation-derived Voronoi cells
//! - Diagnostics instead of errors for degenerate geometry
//!
//! # Example
//!
//! ```rust
//! use delaunay_explorer::Session;
//!
//! let mut session = Session::with_seed(7);
//! session.add_point(0.0, 0.0)?;
//! session.add_point(10.0, 0.0)?;
//! session.add_point(5.0, 10.0)?;
//! assert_eq!(session.triangles().len(), 1);
//! # Ok::<(), delaunay_explorer::ExplorerError>(())
//! ```

use serde::{Deserialize, Serialize};

// Module declarations (avoiding mod.rs files)
/// Configuration for the command-line binary.
pub mod config;

/// Error and diagnostic types.
pub mod errors;

/// Interactive session holding the point set and its derived structures.
pub mod session;

/// Utility functions for random number generation.
pub mod util;

/// Geometry primitives and predicates.
pub mod geometry {
    /// Geometric predicates and measurements.
    pub mod kernel;
    /// Points, coordinates and point identity.
    pub mod point;
    /// Triangles over a point arena.
    pub mod triangle;
}

/// Delaunay triangulation algorithms.
pub mod triangulation {
    /// Incremental Bowyer–Watson with a super-triangle.
    pub mod bowyer_watson;
    /// Exhaustive O(n⁴) oracle.
    pub mod brute_force;
    /// Algorithm selection, dispatch and validation.
    pub mod engine;
    /// Lawson edge-flip algorithm.
    pub mod flip;
    /// Shared algorithm interface.
    pub mod traits;
}

/// Structures derived from a triangulation.
pub mod derived {
    /// Graham-scan convex hull.
    pub mod convex_hull;
    /// Approximate Voronoi diagram.
    pub mod voronoi;
}

// Re-exports for convenience
pub use config::ExplorerConfig;
pub use derived::convex_hull::convex_hull;
pub use derived::voronoi::{VoronoiCell, VoronoiDiagram};
pub use errors::{Diagnostic, ExplorerError, ExplorerResult};
pub use geometry::point::{Coord, Point, PointId};
pub use geometry::triangle::Triangle;
pub use session::{Preset, Session, Stats};
pub use triangulation::engine::{Algorithm, triangulate, validate_delaunay};

/// Serializable view of a session after a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Algorithm used
    pub algorithm: Algorithm,
    /// Input points
    pub points: Vec<Point>,
    /// Triangles; vertex indices refer to `points`
    pub triangles: Vec<Triangle>,
    /// Convex hull vertices
    pub convex_hull: Vec<Point>,
    /// Approximate Voronoi diagram
    pub voronoi: VoronoiDiagram,
    /// Undirected edges by point id
    pub edges: Vec<(PointId, PointId)>,
    /// Summary statistics
    pub stats: Stats,
    /// Non-fatal conditions of the last recomputation
    pub diagnostics: Vec<Diagnostic>,
}

impl Snapshot {
    /// Captures the current state of `session`.
    #[must_use]
    pub fn capture(session: &Session) -> Self {
        Self {
            algorithm: session.algorithm(),
            points: session.points().to_vec(),
            triangles: session.triangles().to_vec(),
            convex_hull: session.convex_hull().to_vec(),
            voronoi: session.voronoi_diagram().clone(),
            edges: session.edges(),
            stats: session.stats().clone(),
            diagnostics: session.diagnostics().to_vec(),
        }
    }
}

/// Runs one explorer pass with the given configuration.
///
/// Loads the configured preset, or generates random points, triangulates
/// with the configured algorithm and returns a snapshot of the result.
///
/// # Errors
///
/// Returns [`ExplorerError::InvalidParameters`] if the configuration fails
/// validation.
pub fn run(config: &ExplorerConfig) -> ExplorerResult<Snapshot> {
    config.validate().map_err(ExplorerError::InvalidParameters)?;

    let mut session = config.seed.map_or_else(Session::new, Session::with_seed);
    session.set_algorithm(config.algorithm);

    log::info!("Algorithm: {}", config.algorithm);
    if let Some(preset) = config.preset {
        log::info!("Preset: {preset}");
        session.load_preset(preset);
    } else {
        log::info!("Random points: {}", config.points);
        session.generate_random_points(
            usize::try_from(config.points).unwrap_or_default(),
            config.width,
            config.height,
            config.margin,
        )?;
    }

    let snapshot = Snapshot::capture(&session);
    log::info!(
        "Triangulation has {} points, {} edges, {} triangles",
        snapshot.stats.total_points,
        snapshot.stats.total_edges,
        snapshot.stats.total_triangles
    );
    Ok(snapshot)
}
