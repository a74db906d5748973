use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance(&self, to: &Point) -> f64 {
        let dx = self.x - to.x;
        let dy = self.y - to.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle of `to` as seen from `self`, in `(-π, π]`.
    pub fn polar_angle(&self, to: &Point) -> f64 {
        (to.y - self.y).atan2(to.x - self.x)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}
