//! Basic example of using the Delaunay explorer library
//!
//! This example shows how to:
//! - Build a session from presets and individual points
//! - Switch algorithms and compare statistics
//! - Drag and remove points
//! - Read the convex hull and Voronoi cells

use delaunay_explorer::session::DEFAULT_PICK_RADIUS;
use delaunay_explorer::{Algorithm, Preset, Session};
use log::{LevelFilter, info, warn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .init();

    info!("Starting basic explorer example");

    let mut session = Session::with_seed(42);
    session.load_preset(Preset::Grid);
    info!("Grid preset: {}", session.stats());

    // Same points, every algorithm
    for algorithm in Algorithm::ALL {
        session.set_algorithm(algorithm);
        info!("{algorithm}: {}", session.stats());
        for diagnostic in session.diagnostics() {
            warn!("  {diagnostic}");
        }
    }
    session.set_algorithm(Algorithm::BowyerWatson);

    // Add a point, then drag it somewhere else
    let extra = session.add_point(420.0, 310.0)?;
    info!("Added point {} at ({}, {})", extra.id, extra.x, extra.y);
    let moved = session.move_point(extra.id, 120.0, 480.0)?;
    info!("Moved point {} to ({}, {})", moved.id, moved.x, moved.y);

    if let Some(hit) = session.find_point_near(121.0, 479.0, DEFAULT_PICK_RADIUS) {
        info!("Picked point {} near the cursor", hit.id);
    }

    let hull: Vec<String> = session
        .convex_hull()
        .iter()
        .map(|p| p.id.to_string())
        .collect();
    info!("Convex hull: {}", hull.join(" -> "));

    for cell in session.voronoi_diagram().cells.iter().take(3) {
        info!(
            "Voronoi cell of {}: {} vertices",
            cell.site.id,
            cell.ordered_vertices().len()
        );
    }

    session.remove_point(extra.id);
    info!("After removal: {}", session.stats());

    session.reset();
    info!("After reset: {} points", session.points().len());

    Ok(())
}
