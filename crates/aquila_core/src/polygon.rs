use serde::{Deserialize, Serialize};

use crate::{
    Point,
    segment::{Orientation, on_segment, orientation, point_to_segment_distance, segments_intersect},
};

/// Horizontal extent of the ray cast used by the point-in-polygon test.
const RAY_EXTENT: f64 = 1e9;

/// A simple closed shape; vertices are stored in boundary order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Polygon { vertices }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn edges(&self) -> impl Iterator<Item = (&Point, &Point)> {
        let n = self.vertices.len();
        (0..n).map(move |i| (&self.vertices[i], &self.vertices[(i + 1) % n]))
    }

    /// Ray-casting containment test. The boundary counts as inside.
    pub fn contains(&self, point: &Point) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }

        let extreme = Point::new(RAY_EXTENT, point.y);
        let mut crossings = 0;

        for (a, b) in self.edges() {
            if segments_intersect(a, b, point, &extreme) {
                if orientation(a, point, b) == Orientation::Collinear {
                    return on_segment(a, point, b);
                }
                crossings += 1;
            }
        }

        crossings % 2 == 1
    }

    /// Whether the segment `a b` crosses this polygon: any edge intersection,
    /// or either endpoint lying inside.
    pub fn intersects_segment(&self, a: &Point, b: &Point) -> bool {
        self.edges().any(|(p, q)| segments_intersect(p, q, a, b))
            || self.contains(a)
            || self.contains(b)
    }

    /// Clearance between the segment `a b` and this polygon. Zero when the
    /// segment crosses it.
    pub fn distance_to_segment(&self, a: &Point, b: &Point) -> f64 {
        if self.intersects_segment(a, b) {
            return 0.0;
        }

        let mut minimum = f64::INFINITY;

        for (p, q) in self.edges() {
            minimum = minimum.min(point_to_segment_distance(a, p, q));
            minimum = minimum.min(point_to_segment_distance(b, p, q));
        }
        for vertex in &self.vertices {
            minimum = minimum.min(point_to_segment_distance(vertex, a, b));
        }

        minimum
    }

    /// Clearance between a point and this polygon. Zero when the point is
    /// inside or on the boundary.
    pub fn distance_to_point(&self, point: &Point) -> f64 {
        if self.contains(point) {
            return 0.0;
        }

        self.edges()
            .map(|(p, q)| point_to_segment_distance(point, p, q))
            .fold(f64::INFINITY, f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ])
    }

    #[test]
    fn test_contains_interior_and_exterior() {
        let square = square();
        assert!(square.contains(&Point::new(2.0, 2.0)));
        assert!(!square.contains(&Point::new(5.0, 2.0)));
        assert!(!square.contains(&Point::new(-1.0, -1.0)));
    }

    #[test]
    fn test_contains_boundary() {
        let square = square();
        assert!(square.contains(&Point::new(4.0, 2.0)));
        assert!(square.contains(&Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_intersects_segment_crossing() {
        let square = square();
        assert!(square.intersects_segment(&Point::new(-1.0, 2.0), &Point::new(5.0, 2.0)));
    }

    #[test]
    fn test_intersects_segment_endpoint_inside() {
        let square = square();
        assert!(square.intersects_segment(&Point::new(2.0, 2.0), &Point::new(9.0, 9.0)));
    }

    #[test]
    fn test_intersects_segment_disjoint() {
        let square = square();
        assert!(!square.intersects_segment(&Point::new(5.0, 5.0), &Point::new(9.0, 5.0)));
    }

    #[test]
    fn test_distance_to_segment() {
        let square = square();
        assert_eq!(
            square.distance_to_segment(&Point::new(6.0, 0.0), &Point::new(6.0, 4.0)),
            2.0
        );
        assert_eq!(
            square.distance_to_segment(&Point::new(-1.0, 2.0), &Point::new(5.0, 2.0)),
            0.0
        );
    }

    #[test]
    fn test_distance_to_point() {
        let square = square();
        assert_eq!(square.distance_to_point(&Point::new(7.0, 2.0)), 3.0);
        assert_eq!(square.distance_to_point(&Point::new(1.0, 1.0)), 0.0);
    }
}
