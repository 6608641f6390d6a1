//! Graham-scan convex hull.

use crate::geometry::kernel::{Orientation, distance_squared, orientation};
use crate::geometry::point::Point;
use float_ord::FloatOrd;

/// Computes the convex hull of `points`, counter-clockwise in a y-up frame
/// starting from the lowest (then leftmost) point.
///
/// Points on a hull edge are not hull vertices. Fewer than three points are
/// returned unchanged; collinear input yields its two extreme points.
#[must_use]
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let Some(anchor) = points
        .iter()
        .min_by_key(|p| (FloatOrd(p.y), FloatOrd(p.x)))
        .copied()
    else {
        return Vec::new();
    };

    let mut rest: Vec<Point> = points
        .iter()
        .filter(|p| p.id != anchor.id && distance_squared(*p, &anchor) > 0.0)
        .copied()
        .collect();
    rest.sort_by_key(|p| {
        (
            FloatOrd((p.y - anchor.y).atan2(p.x - anchor.x)),
            FloatOrd(distance_squared(p, &anchor)),
        )
    });

    // Keep only the farthest point of every ray leaving the anchor
    let mut candidates: Vec<Point> = Vec::with_capacity(rest.len());
    for p in rest {
        if let Some(last) = candidates.last_mut()
            && orientation(&anchor, last, &p) == Orientation::Collinear
        {
            if distance_squared(&p, &anchor) > distance_squared(last, &anchor) {
                *last = p;
            }
            continue;
        }
        candidates.push(p);
    }

    let mut hull = vec![anchor];
    for p in candidates {
        while hull.len() >= 2
            && orientation(&hull[hull.len() - 2], &hull[hull.len() - 1], &p)
                != Orientation::CounterClockwise
        {
            hull.pop();
        }
        hull.push(p);
    }
    hull
}
