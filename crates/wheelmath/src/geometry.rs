use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelGeometry {
    pub center: Point,
    pub radius: f64,
}

impl WheelGeometry {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn point_at(&self, angle_rad: f64) -> Point {
        Point::new(
            self.center.x + self.radius * angle_rad.cos(),
            self.center.y - self.radius * angle_rad.sin(),
        )
    }
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self::new(Point::default(), 1.0)
    }
}
