//! Delaunay explorer binary executable.
//!
//! Generates or loads a point layout, triangulates it and reports the
//! statistics, or the full result as JSON with `--json`.

use delaunay_explorer::{ExplorerConfig, run};

fn main() {
    // Initialize logging
    env_logger::init();

    let config = ExplorerConfig::from_args();
    match run(&config) {
        Ok(snapshot) => {
            if config.json {
                match serde_json::to_string_pretty(&snapshot) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        log::error!("Failed to serialize result: {e}");
                        std::process::exit(1);
                    }
                }
            } else {
                println!("{}", snapshot.stats);
            }
            log::info!("Triangulation completed successfully");
        }
        Err(e) => {
            log::error!("Triangulation failed: {e}");
            std::process::exit(1);
        }
    }
}
