//! Step-through example for the Bowyer–Watson state machine
//!
//! Inserts the points of the circle preset one at a time and logs the
//! cavity of every insertion, the way an animated view would replay it.

use delaunay_explorer::triangulation::bowyer_watson::BowyerWatson;
use delaunay_explorer::{Preset, Session, validate_delaunay};
use log::{LevelFilter, info};

fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .init();

    let mut session = Session::with_seed(7);
    session.load_preset(Preset::Circle);
    let points = session.points().to_vec();

    let mut steps = BowyerWatson::steps(&points);
    info!("{:?} with {} working triangle(s)", steps.phase(), steps.triangles().len());

    while let Some(step) = steps.next() {
        let synthetic = steps
            .triangles()
            .iter()
            .filter(|t| t.vertices.iter().any(|&v| steps.is_super_vertex(v)))
            .count();
        info!(
            "Point {} ({}/{}): {} bad, {} boundary edges, {} triangles ({} on the super-triangle)",
            step.point_id,
            step.index + 1,
            points.len(),
            step.bad_triangles,
            step.boundary_edges,
            step.triangle_count,
            synthetic
        );
    }

    info!("{:?}", steps.phase());
    let output = steps.finish();
    info!(
        "{} triangles, {} Delaunay violations",
        output.triangles.len(),
        validate_delaunay(&points, &output.triangles)
    );
}
