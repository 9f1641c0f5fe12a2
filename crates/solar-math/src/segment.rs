//! Segment predicates in plan space.

use solar_core::Tolerance;

use crate::{Aabb2, Point2};

/// Turn direction of the ordered triple `(p, q, r)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

pub fn orientation(p: Point2, q: Point2, r: Point2) -> Orientation {
    let cross = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if cross.abs() < Tolerance::DEFAULT_LINEAR {
        Orientation::Collinear
    } else if cross > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Given collinear `p`, `q`, `r`, check whether `q` lies on segment `pr`.
pub fn on_segment(p: Point2, q: Point2, r: Point2) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Bounded segment-segment intersection, including touching and collinear overlap.
pub fn segments_intersect(a0: Point2, a1: Point2, b0: Point2, b1: Point2) -> bool {
    let o1 = orientation(a0, a1, b0);
    let o2 = orientation(a0, a1, b1);
    let o3 = orientation(b0, b1, a0);
    let o4 = orientation(b0, b1, a1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(a0, b0, a1))
        || (o2 == Orientation::Collinear && on_segment(a0, b1, a1))
        || (o3 == Orientation::Collinear && on_segment(b0, a0, b1))
        || (o4 == Orientation::Collinear && on_segment(b0, a1, b1))
}

/// True if the segment touches the box: an endpoint inside, or a crossing
/// with one of the four edges.
pub fn segment_intersects_aabb(a: Point2, b: Point2, rect: &Aabb2) -> bool {
    if rect.contains_point(a) || rect.contains_point(b) {
        return true;
    }
    rect.edges()
        .iter()
        .any(|&(e0, e1)| segments_intersect(a, b, e0, e1))
}

pub fn segment_length(a: Point2, b: Point2) -> f64 {
    a.distance(b)
}

/// Minimum distance from `p` to the segment `ab`.
pub fn point_to_segment_distance(p: Point2, a: Point2, b: Point2) -> f64 {
    let d = b - a;
    let len_sq = d.length_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return p.distance(a);
    }

    // Project onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(d) / len_sq).clamp(0.0, 1.0);
    p.distance(a + d * t)
}
