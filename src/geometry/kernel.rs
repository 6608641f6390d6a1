//! Stateless geometric predicates and measures.
//!
//! All functions accept anything implementing [`Planar`], so they work on
//! identified [`Point`](super::point::Point)s and bare [`Coord`]s alike.
//! Arithmetic is plain `f64`. Orientation and circumcircle construction use
//! the absolute [`COLLINEAR_EPSILON`]; [`classify_incircle`] scales its
//! tolerance with the magnitude of the input.
//!
//! # Orientation convention
//!
//! [`orientation`] evaluates `v = (b.y - a.y)(c.x - b.x) - (b.x - a.x)(c.y - b.y)`,
//! the negated cross product `(b - a) × (c - b)`. In a y-up Cartesian frame
//! `v > 0` is a clockwise turn and `v < 0` a counter-clockwise turn. On a
//! y-down screen the two senses appear mirrored.

use super::point::{Coord, Planar};
use serde::{Deserialize, Serialize};

/// Absolute tolerance under which cross products and circumcircle
/// denominators are treated as zero.
pub const COLLINEAR_EPSILON: f64 = 1e-10;

/// Fraction of the in-circle permanent under which the determinant is too
/// small to trust its sign.
pub const INCIRCLE_RELATIVE_TOLERANCE: f64 = 1e-12;

/// Rotational sense of an ordered point triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Clockwise in a y-up frame (`+1`)
    Clockwise,
    /// Within [`COLLINEAR_EPSILON`] of a straight line (`0`)
    Collinear,
    /// Counter-clockwise in a y-up frame (`-1`)
    CounterClockwise,
}

impl Orientation {
    /// Integer form: `+1`, `0` or `-1`.
    #[must_use]
    pub const fn sign(self) -> i8 {
        match self {
            Self::Clockwise => 1,
            Self::Collinear => 0,
            Self::CounterClockwise => -1,
        }
    }
}

/// Circle through three points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Circumcenter
    pub center: Coord,
    /// Circumradius
    pub radius: f64,
}

impl Circle {
    /// Whether `p` lies strictly inside, measured by distance to the center.
    #[must_use]
    pub fn contains(&self, p: &impl Planar) -> bool {
        distance(&self.center, p) < self.radius
    }
}

/// Interior angles of a triangle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angles {
    /// Angle at the first vertex
    pub a: f64,
    /// Angle at the second vertex
    pub b: f64,
    /// Angle at the third vertex
    pub c: f64,
    /// Smallest of the three, the usual quality metric
    pub min: f64,
}

/// Euclidean distance.
#[must_use]
pub fn distance(p1: &impl Planar, p2: &impl Planar) -> f64 {
    distance_squared(p1, p2).sqrt()
}

/// Squared Euclidean distance, for comparisons that do not need the root.
#[must_use]
pub fn distance_squared(p1: &impl Planar, p2: &impl Planar) -> f64 {
    let dx = p2.x() - p1.x();
    let dy = p2.y() - p1.y();
    dx.mul_add(dx, dy * dy)
}

/// Rotational sense of `a → b → c`. See the module docs for the convention.
#[must_use]
pub fn orientation(a: &impl Planar, b: &impl Planar, c: &impl Planar) -> Orientation {
    let val = (b.y() - a.y()) * (c.x() - b.x()) - (b.x() - a.x()) * (c.y() - b.y());
    if val.abs() < COLLINEAR_EPSILON {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Unsigned area (shoelace formula).
#[must_use]
pub fn triangle_area(a: &impl Planar, b: &impl Planar, c: &impl Planar) -> f64 {
    ((a.x() * (b.y() - c.y()) + b.x() * (c.y() - a.y()) + c.x() * (a.y() - b.y())) / 2.0).abs()
}

/// Signed in-circle determinant of `p` against `a, b, c`.
///
/// Positive when `p` is inside the circumcircle of a counter-clockwise
/// (y-up) triangle; the sign flips for clockwise input.
#[must_use]
pub fn incircle_determinant(
    a: &impl Planar,
    b: &impl Planar,
    c: &impl Planar,
    p: &impl Planar,
) -> f64 {
    let row = |x: f64, y: f64| [x, y, x.mul_add(x, y * y)];
    let r0 = row(a.x() - p.x(), a.y() - p.y());
    let r1 = row(b.x() - p.x(), b.y() - p.y());
    let r2 = row(c.x() - p.x(), c.y() - p.y());

    r0[0] * (r1[1] * r2[2] - r2[1] * r1[2]) - r0[1] * (r1[0] * r2[2] - r2[0] * r1[2])
        + r0[2] * (r1[0] * r2[1] - r2[0] * r1[1])
}

/// Whether `p` lies strictly inside the circumcircle of `a, b, c`.
///
/// Only meaningful when `a, b, c` wind counter-clockwise in a y-up frame;
/// [`Triangle`](super::triangle::Triangle) normalises its vertices to that
/// winding on construction.
#[must_use]
pub fn point_in_circumcircle(
    a: &impl Planar,
    b: &impl Planar,
    c: &impl Planar,
    p: &impl Planar,
) -> bool {
    incircle_determinant(a, b, c, p) > 0.0
}

/// Position of a point relative to a circumcircle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InCircle {
    /// Clearly inside
    Inside,
    /// On the circle within rounding error
    Cocircular,
    /// Clearly outside
    Outside,
}

/// Sum of the absolute values of the terms of [`incircle_determinant`],
/// which bounds its rounding error.
#[must_use]
pub fn incircle_permanent(
    a: &impl Planar,
    b: &impl Planar,
    c: &impl Planar,
    p: &impl Planar,
) -> f64 {
    let row = |x: f64, y: f64| [x.abs(), y.abs(), x.mul_add(x, y * y)];
    let r0 = row(a.x() - p.x(), a.y() - p.y());
    let r1 = row(b.x() - p.x(), b.y() - p.y());
    let r2 = row(c.x() - p.x(), c.y() - p.y());

    r0[0] * (r1[1] * r2[2] + r2[1] * r1[2])
        + r0[1] * (r1[0] * r2[2] + r2[0] * r1[2])
        + r0[2] * (r1[0] * r2[1] + r2[0] * r1[1])
}

/// Classifies `p` against the circumcircle of the counter-clockwise (y-up)
/// triangle `a, b, c`, treating determinants within
/// [`INCIRCLE_RELATIVE_TOLERANCE`] of the permanent as cocircular.
///
/// Exactly cocircular configurations such as points on a ring come out as
/// [`InCircle::Cocircular`] consistently, whatever the rounding of the
/// individual determinant.
#[must_use]
pub fn classify_incircle(
    a: &impl Planar,
    b: &impl Planar,
    c: &impl Planar,
    p: &impl Planar,
) -> InCircle {
    let det = incircle_determinant(a, b, c, p);
    let bound = INCIRCLE_RELATIVE_TOLERANCE * incircle_permanent(a, b, c, p);
    if det > bound {
        InCircle::Inside
    } else if det < -bound {
        InCircle::Outside
    } else {
        InCircle::Cocircular
    }
}

/// Circumscribed circle, or `None` for (near-)collinear input.
#[must_use]
pub fn circumcircle(a: &impl Planar, b: &impl Planar, c: &impl Planar) -> Option<Circle> {
    let d = 2.0 * (a.x() * (b.y() - c.y()) + b.x() * (c.y() - a.y()) + c.x() * (a.y() - b.y()));
    if d.abs() < COLLINEAR_EPSILON {
        return None;
    }

    let a_sq = a.x().mul_add(a.x(), a.y() * a.y());
    let b_sq = b.x().mul_add(b.x(), b.y() * b.y());
    let c_sq = c.x().mul_add(c.x(), c.y() * c.y());

    let ux = (a_sq * (b.y() - c.y()) + b_sq * (c.y() - a.y()) + c_sq * (a.y() - b.y())) / d;
    let uy = (a_sq * (c.x() - b.x()) + b_sq * (a.x() - c.x()) + c_sq * (b.x() - a.x())) / d;

    let center = Coord::new(ux, uy);
    Some(Circle {
        center,
        radius: distance(a, &center),
    })
}

/// Interior angles via the law of cosines, in degrees.
///
/// Zero-length sides give a zero angle instead of NaN; cosines are clamped
/// to `[-1, 1]` to absorb rounding.
#[must_use]
pub fn triangle_angles(a: &impl Planar, b: &impl Planar, c: &impl Planar) -> Angles {
    let side_a = distance(b, c);
    let side_b = distance(a, c);
    let side_c = distance(a, b);

    let angle = |opposite: f64, s1: f64, s2: f64| {
        let denom = 2.0 * s1 * s2;
        if denom == 0.0 {
            return 0.0;
        }
        let cos = (s1.mul_add(s1, s2 * s2) - opposite * opposite) / denom;
        cos.clamp(-1.0, 1.0).acos().to_degrees()
    };

    let angle_a = angle(side_a, side_b, side_c);
    let angle_b = angle(side_b, side_a, side_c);
    let angle_c = 180.0 - angle_a - angle_b;

    Angles {
        a: angle_a,
        b: angle_b,
        c: angle_c,
        min: angle_a.min(angle_b).min(angle_c),
    }
}

/// Barycentric point-in-triangle test. Points on an edge count as inside;
/// degenerate triangles contain nothing.
#[must_use]
pub fn point_in_triangle(
    p: &impl Planar,
    a: &impl Planar,
    b: &impl Planar,
    c: &impl Planar,
) -> bool {
    let denominator = (b.y() - c.y()) * (a.x() - c.x()) + (c.x() - b.x()) * (a.y() - c.y());
    if denominator.abs() < COLLINEAR_EPSILON {
        return false;
    }

    let alpha = ((b.y() - c.y()) * (p.x() - c.x()) + (c.x() - b.x()) * (p.y() - c.y())) / denominator;
    let beta = ((c.y() - a.y()) * (p.x() - c.x()) + (a.x() - c.x()) * (p.y() - c.y())) / denominator;
    let gamma = 1.0 - alpha - beta;

    alpha >= 0.0 && beta >= 0.0 && gamma >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(x: f64, y: f64) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn test_distance() {
        assert_relative_eq!(distance(&c(0.0, 0.0), &c(3.0, 4.0)), 5.0);
        assert_relative_eq!(distance_squared(&c(0.0, 0.0), &c(3.0, 4.0)), 25.0);
    }

    #[test]
    fn test_orientation_convention() {
        // Counter-clockwise in a y-up frame
        let ccw = orientation(&c(0.0, 0.0), &c(10.0, 0.0), &c(5.0, 10.0));
        assert_eq!(ccw, Orientation::CounterClockwise);
        assert_eq!(ccw.sign(), -1);

        let cw = orientation(&c(0.0, 0.0), &c(5.0, 10.0), &c(10.0, 0.0));
        assert_eq!(cw, Orientation::Clockwise);
        assert_eq!(cw.sign(), 1);

        let line = orientation(&c(0.0, 0.0), &c(5.0, 0.0), &c(10.0, 0.0));
        assert_eq!(line, Orientation::Collinear);
        assert_eq!(line.sign(), 0);
    }

    #[test]
    fn test_triangle_area() {
        assert_relative_eq!(
            triangle_area(&c(0.0, 0.0), &c(10.0, 0.0), &c(5.0, 10.0)),
            50.0
        );
        // Winding does not matter
        assert_relative_eq!(
            triangle_area(&c(0.0, 0.0), &c(5.0, 10.0), &c(10.0, 0.0)),
            50.0
        );
    }

    #[test]
    fn test_circumcircle_right_triangle() {
        let circle = circumcircle(&c(0.0, 0.0), &c(4.0, 0.0), &c(0.0, 3.0))
            .expect("non-collinear triangle has a circumcircle");
        assert_relative_eq!(circle.center.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(circle.center.y, 1.5, epsilon = 1e-12);
        assert_relative_eq!(circle.radius, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_circumcircle_collinear_is_none() {
        assert!(circumcircle(&c(0.0, 0.0), &c(5.0, 0.0), &c(10.0, 0.0)).is_none());
        assert!(circumcircle(&c(1.0, 1.0), &c(1.0, 1.0), &c(4.0, 2.0)).is_none());
    }

    #[test]
    fn test_point_in_circumcircle_ccw() {
        let (a, b, cc) = (c(0.0, 0.0), c(4.0, 0.0), c(0.0, 4.0));
        assert!(point_in_circumcircle(&a, &b, &cc, &c(1.0, 1.0)));
        assert!(!point_in_circumcircle(&a, &b, &cc, &c(10.0, 10.0)));
        // On the circle is not strictly inside
        assert!(!point_in_circumcircle(&a, &b, &cc, &c(4.0, 4.0)));
    }

    #[test]
    fn test_point_in_circumcircle_sign_depends_on_winding() {
        let inside = c(1.0, 1.0);
        assert!(point_in_circumcircle(
            &c(0.0, 0.0),
            &c(4.0, 0.0),
            &c(0.0, 4.0),
            &inside
        ));
        assert!(!point_in_circumcircle(
            &c(0.0, 0.0),
            &c(0.0, 4.0),
            &c(4.0, 0.0),
            &inside
        ));
    }

    #[test]
    fn test_classify_incircle() {
        let (a, b, cc) = (c(0.0, 0.0), c(4.0, 0.0), c(0.0, 4.0));
        assert_eq!(classify_incircle(&a, &b, &cc, &c(1.0, 1.0)), InCircle::Inside);
        assert_eq!(classify_incircle(&a, &b, &cc, &c(10.0, 10.0)), InCircle::Outside);
        assert_eq!(classify_incircle(&a, &b, &cc, &c(4.0, 4.0)), InCircle::Cocircular);
        // Coincident with a vertex
        assert_eq!(classify_incircle(&a, &b, &cc, &a), InCircle::Cocircular);
    }

    #[test]
    fn test_classify_incircle_ring_points_are_cocircular() {
        let ring: Vec<Coord> = (0..12)
            .map(|i| {
                let angle = f64::from(i) * std::f64::consts::PI / 6.0;
                c(200.0f64.mul_add(angle.cos(), 400.0), 200.0f64.mul_add(angle.sin(), 300.0))
            })
            .collect();
        for p in &ring[3..] {
            assert_eq!(
                classify_incircle(&ring[0], &ring[1], &ring[2], p),
                InCircle::Cocircular
            );
        }
        assert_eq!(
            classify_incircle(&ring[0], &ring[1], &ring[2], &c(400.0, 300.0)),
            InCircle::Inside
        );
    }

    #[test]
    fn test_triangle_angles_equilateral() {
        let h = 3.0_f64.sqrt() / 2.0;
        let angles = triangle_angles(&c(0.0, 0.0), &c(1.0, 0.0), &c(0.5, h));
        assert_relative_eq!(angles.a, 60.0, epsilon = 1e-9);
        assert_relative_eq!(angles.b, 60.0, epsilon = 1e-9);
        assert_relative_eq!(angles.c, 60.0, epsilon = 1e-9);
        assert_relative_eq!(angles.min, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_triangle_angles_right() {
        let angles = triangle_angles(&c(0.0, 0.0), &c(4.0, 0.0), &c(0.0, 3.0));
        assert_relative_eq!(angles.a, 90.0, epsilon = 1e-9);
        assert_relative_eq!(angles.a + angles.b + angles.c, 180.0, epsilon = 1e-9);
        assert!(angles.min < 40.0);
    }

    #[test]
    fn test_triangle_angles_duplicate_vertex_is_finite() {
        let angles = triangle_angles(&c(1.0, 1.0), &c(1.0, 1.0), &c(3.0, 1.0));
        assert!(angles.a.is_finite());
        assert!(angles.min.is_finite());
    }

    #[test]
    fn test_point_in_triangle() {
        let (a, b, cc) = (c(0.0, 0.0), c(10.0, 0.0), c(5.0, 10.0));
        assert!(point_in_triangle(&c(5.0, 3.0), &a, &b, &cc));
        assert!(point_in_triangle(&c(5.0, 0.0), &a, &b, &cc), "edge counts");
        assert!(!point_in_triangle(&c(20.0, 3.0), &a, &b, &cc));
        assert!(!point_in_triangle(
            &c(1.0, 0.0),
            &c(0.0, 0.0),
            &c(5.0, 0.0),
            &c(10.0, 0.0)
        ));
    }

    #[test]
    fn test_circle_contains() {
        let circle = Circle {
            center: c(0.0, 0.0),
            radius: 2.0,
        };
        assert!(circle.contains(&c(1.0, 1.0)));
        assert!(!circle.contains(&c(2.0, 0.0)));
    }
}
