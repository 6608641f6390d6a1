//! Point primitives.
//!
//! A [`Point`] carries a stable [`PointId`] assigned once at creation. Two
//! points are the same only when their ids match; coincident coordinates do
//! not make points equal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an input point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PointId(u64);

impl PointId {
    /// Wraps a raw id value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bare 2D location with no identity (circumcenters, super-triangle corners).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coord {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Coord {
    /// Creates a coordinate pair.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both components are finite.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An input point with identity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Point {
    /// Stable identity, never recomputed
    pub id: PointId,
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Creates a point with the given identity.
    #[must_use]
    pub const fn new(id: PointId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Location of this point.
    #[must_use]
    pub const fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Point {}

/// Anything with planar x/y coordinates; lets the kernel accept points and
/// bare coordinates alike.
pub trait Planar {
    /// Horizontal coordinate
    fn x(&self) -> f64;
    /// Vertical coordinate
    fn y(&self) -> f64;
}

impl Planar for Coord {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

impl Planar for Point {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

impl<P: Planar + ?Sized> Planar for &P {
    fn x(&self) -> f64 {
        (**self).x()
    }

    fn y(&self) -> f64 {
        (**self).y()
    }
}

impl From<Point> for Coord {
    fn from(point: Point) -> Self {
        point.coord()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_identity_equality() {
        let p1 = Point::new(PointId::new(1), 5.0, 5.0);
        let p2 = Point::new(PointId::new(2), 5.0, 5.0);
        let p1_moved = Point::new(PointId::new(1), 9.0, -3.0);

        assert_ne!(p1, p2, "coincident coordinates must not imply equality");
        assert_eq!(p1, p1_moved, "same id is the same point");
    }

    #[test]
    fn test_point_id_ordering_and_display() {
        assert!(PointId::new(3) < PointId::new(10));
        assert_eq!(PointId::new(42).to_string(), "#42");
        assert_eq!(PointId::new(42).get(), 42);
    }

    #[test]
    fn test_coord_finite() {
        assert!(Coord::new(1.0, 2.0).is_finite());
        assert!(!Coord::new(f64::NAN, 2.0).is_finite());
        assert!(!Coord::new(1.0, f64::INFINITY).is_finite());
    }
}
