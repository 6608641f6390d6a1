//! Configuration management for explorer runs.
//!
//! This module provides the command-line configuration of the binary:
//! - Algorithm selection
//! - Point source (a named preset or uniform random points)
//! - Canvas geometry for random generation
//! - Output options

use crate::session::{CANVAS_HEIGHT, CANVAS_WIDTH, DEFAULT_MARGIN, Preset};
use crate::triangulation::engine::Algorithm;
use clap::Parser;

/// Main configuration structure for an explorer run.
///
/// Either loads a preset layout or generates uniform random points on the
/// canvas, then triangulates with the selected algorithm.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct ExplorerConfig {
    /// Triangulation algorithm
    #[arg(short, long, value_enum, default_value_t = Algorithm::BowyerWatson)]
    pub algorithm: Algorithm,

    /// Load a preset layout instead of random points
    #[arg(short, long, value_enum)]
    pub preset: Option<Preset>,

    /// Number of random points (ignored with --preset)
    #[arg(short = 'n', long, default_value = "20")]
    pub points: u32,

    /// Canvas width for random points
    #[arg(long, default_value_t = CANVAS_WIDTH)]
    pub width: f64,

    /// Canvas height for random points
    #[arg(long, default_value_t = CANVAS_HEIGHT)]
    pub height: f64,

    /// Border kept free of random points
    #[arg(long, default_value_t = DEFAULT_MARGIN)]
    pub margin: f64,

    /// Seed for reproducible random layouts
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Print the full result as JSON on stdout
    #[arg(long, default_value = "false")]
    pub json: bool,
}

impl ExplorerConfig {
    /// Builds a new instance of `ExplorerConfig` from command line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Creates a configuration for `points` random points with the default
    /// canvas and algorithm.
    #[must_use]
    pub const fn new(points: u32) -> Self {
        Self {
            algorithm: Algorithm::BowyerWatson,
            preset: None,
            points,
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            margin: DEFAULT_MARGIN,
            seed: None,
            json: false,
        }
    }

    /// Validates the configuration parameters.
    ///
    /// # Errors
    ///
    /// Returns an error message if any parameters are invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(format!("Canvas width must be positive, got {}", self.width));
        }

        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(format!("Canvas height must be positive, got {}", self.height));
        }

        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(format!("Margin must be non-negative, got {}", self.margin));
        }

        if 2.0 * self.margin > self.width.min(self.height) {
            return Err(format!(
                "Margin {} leaves no room on a {}x{} canvas",
                self.margin, self.width, self.height
            ));
        }

        Ok(())
    }
}

/// Configuration presets for quick testing.
#[derive(Debug, Clone)]
pub struct TestConfig;

impl TestConfig {
    /// Small seeded random configuration suitable for unit tests.
    #[must_use]
    pub const fn small() -> ExplorerConfig {
        ExplorerConfig {
            seed: Some(1),
            ..ExplorerConfig::new(8)
        }
    }

    /// Medium seeded configuration for integration tests.
    #[must_use]
    pub const fn medium() -> ExplorerConfig {
        ExplorerConfig {
            seed: Some(2),
            ..ExplorerConfig::new(64)
        }
    }

    /// Large configuration for performance testing.
    #[must_use]
    pub const fn large() -> ExplorerConfig {
        ExplorerConfig {
            seed: Some(3),
            ..ExplorerConfig::new(512)
        }
    }
}
