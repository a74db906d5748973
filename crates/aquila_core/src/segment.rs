use crate::{EPSILON, Point};

/// Turn direction of the triple `(p, q, r)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    Collinear,
    CounterClockwise,
}

pub fn orientation(p: &Point, q: &Point, r: &Point) -> Orientation {
    let value = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);

    if value.abs() < EPSILON {
        Orientation::Collinear
    } else if value > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Whether `q` lies within the bounding box of the segment `p r`.
/// Only meaningful when the three points are collinear.
pub fn on_segment(p: &Point, q: &Point, r: &Point) -> bool {
    q.x <= p.x.max(r.x) + EPSILON
        && q.x >= p.x.min(r.x) - EPSILON
        && q.y <= p.y.max(r.y) + EPSILON
        && q.y >= p.y.min(r.y) - EPSILON
}

/// Four-orientation segment intersection test with the collinear sub-cases.
pub fn segments_intersect(p1: &Point, q1: &Point, p2: &Point, q2: &Point) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Collinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Collinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
}

/// Distance from `point` to the segment `a b`, clamping the projection to the
/// segment. A zero-length segment degrades to the endpoint distance.
pub fn point_to_segment_distance(point: &Point, a: &Point, b: &Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_squared = dx * dx + dy * dy;

    if length_squared < EPSILON {
        return point.distance(a);
    }

    let t = (((point.x - a.x) * dx + (point.y - a.y) * dy) / length_squared).clamp(0.0, 1.0);
    let projection = Point::new(a.x + t * dx, a.y + t * dy);
    point.distance(&projection)
}
