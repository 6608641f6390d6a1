//! Error and diagnostic types for the explorer library.
//!
//! Geometric degeneracy is never an error: collinear input, fewer than three
//! points or near-zero determinants produce empty or partial triangulations
//! plus a [`Diagnostic`] entry. [`ExplorerError`] is reserved for rejected
//! caller input.

use crate::geometry::point::PointId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for explorer operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExplorerError {
    /// Invalid parameters supplied to a generator or configuration
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Algorithm name not recognised
    #[error("Unknown algorithm: {0}. Expected one of bowyerWatson, flipAlgorithm, bruteForce")]
    UnknownAlgorithm(String),

    /// Preset name not recognised
    #[error("Unknown preset: {0}. Expected one of circle, grid, random, cocircular")]
    UnknownPreset(String),

    /// No point with the given id exists in the session
    #[error("Point not found: {0}")]
    PointNotFound(PointId),

    /// A coordinate was NaN or infinite
    #[error("Non-finite coordinate: ({x}, {y})")]
    NonFiniteCoordinate {
        /// Offending x coordinate
        x: f64,
        /// Offending y coordinate
        y: f64,
    },
}

/// Result type for explorer operations.
pub type ExplorerResult<T> = Result<T, ExplorerError>;

/// Non-fatal conditions observed while computing a triangulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// Fewer than three points were supplied; the triangulation is empty
    InsufficientPoints {
        /// Number of points supplied
        count: usize,
    },
    /// Collinear triangles were produced and filtered out
    DegenerateTriangles {
        /// Number of triangles dropped
        count: usize,
    },
    /// In-circle evaluations landed within tolerance of zero
    NumericInstability {
        /// Number of cocircular tests; the flip algorithm counts each
        /// vertex quadruple once
        count: usize,
    },
    /// Output triangles whose circumcircle contains another input point
    DelaunayViolations {
        /// Number of violating (triangle, point) pairs
        count: usize,
    },
    /// The flip algorithm stopped at its safety cap
    FlipLimitReached {
        /// Flips performed before stopping
        flips: usize,
    },
}

impl Diagnostic {
    /// Whether the condition is expected for the input rather than suspicious.
    #[must_use]
    pub const fn is_benign(&self) -> bool {
        matches!(self, Self::InsufficientPoints { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientPoints { count } => {
                write!(f, "insufficient points: {count} (need at least 3)")
            }
            Self::DegenerateTriangles { count } => {
                write!(f, "{count} degenerate triangle(s) filtered")
            }
            Self::NumericInstability { count } => {
                write!(f, "{count} near-zero in-circle determinant(s)")
            }
            Self::DelaunayViolations { count } => {
                write!(f, "{count} empty-circumcircle violation(s)")
            }
            Self::FlipLimitReached { flips } => {
                write!(f, "flip limit reached after {flips} flips")
            }
        }
    }
}
