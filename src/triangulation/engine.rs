//! Algorithm selection and post-pass validation.

use super::bowyer_watson::BowyerWatson;
use super::brute_force::BruteForce;
use super::flip::FlipAlgorithm;
use super::traits::{TriangulationAlgorithm, TriangulationOutput};
use crate::errors::{Diagnostic, ExplorerError};
use crate::geometry::point::Point;
use crate::geometry::triangle::Triangle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Triangulation algorithm selector.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum Algorithm {
    /// Incremental Bowyer–Watson with a super-triangle
    #[default]
    #[value(alias = "bowyerWatson")]
    BowyerWatson,
    /// Incremental insertion with Lawson edge flips
    #[value(alias = "flipAlgorithm")]
    FlipAlgorithm,
    /// O(n⁴) empty-circumcircle enumeration
    #[value(alias = "bruteForce")]
    BruteForce,
}

impl Algorithm {
    /// All selectable algorithms.
    pub const ALL: [Self; 3] = [Self::BowyerWatson, Self::FlipAlgorithm, Self::BruteForce];

    /// Name used in the public interface (`bowyerWatson`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BowyerWatson => "bowyerWatson",
            Self::FlipAlgorithm => "flipAlgorithm",
            Self::BruteForce => "bruteForce",
        }
    }

    fn implementation(self) -> &'static dyn TriangulationAlgorithm {
        match self {
            Self::BowyerWatson => &BowyerWatson,
            Self::FlipAlgorithm => &FlipAlgorithm,
            Self::BruteForce => &BruteForce,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bowyerWatson" | "bowyer-watson" => Ok(Self::BowyerWatson),
            "flipAlgorithm" | "flip-algorithm" | "flip" => Ok(Self::FlipAlgorithm),
            "bruteForce" | "brute-force" => Ok(Self::BruteForce),
            other => Err(ExplorerError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Runs `algorithm` on `points` and appends a Delaunay-violation diagnostic
/// when the result does not satisfy the empty-circumcircle property.
#[must_use]
pub fn triangulate(algorithm: Algorithm, points: &[Point]) -> TriangulationOutput {
    let implementation = algorithm.implementation();
    log::debug!(
        "Triangulating {} points with {}",
        points.len(),
        implementation.name()
    );

    let mut output = implementation.triangulate(points);
    let violations = validate_delaunay(points, &output.triangles);
    if violations > 0 {
        output
            .diagnostics
            .push(Diagnostic::DelaunayViolations { count: violations });
    }
    output
}

/// Counts (triangle, point) pairs where a non-vertex input point lies
/// inside the triangle's circumcircle. Cocircular points are not violations.
#[must_use]
pub fn validate_delaunay(points: &[Point], triangles: &[Triangle]) -> usize {
    triangles
        .iter()
        .filter(|t| !t.is_degenerate())
        .map(|t| {
            points
                .iter()
                .enumerate()
                .filter(|&(k, p)| !t.has_vertex(k) && t.circumcircle_contains(points, p))
                .count()
        })
        .sum()
}
