//! Captured pressure samples.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One captured point of a stroke.
///
/// `t` is the number of milliseconds elapsed since the first sample of the
/// stroke the point belongs to, so every stroke starts at `t == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointSample {
    x: f64,
    y: f64,
    force: f64,
    t: i64,
}

impl PointSample {
    /// Create a sample in canvas coordinates.
    pub fn new(x: f64, y: f64, force: f64, t: i64) -> Self {
        Self { x, y, force, t }
    }

    /// Create a sample at a canvas position.
    pub fn at(position: Point, force: f64, t: i64) -> Self {
        Self::new(position.x, position.y, force, t)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Pressure, nominally in `[0, 1]`.
    pub fn force(&self) -> f64 {
        self.force
    }

    /// Milliseconds since the start of the stroke.
    pub fn t(&self) -> i64 {
        self.t
    }

    /// Position in canvas coordinates.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Euclidean distance from this sample to a point.
    pub fn distance_to(&self, point: Point) -> f64 {
        ((self.x - point.x).powi(2) + (self.y - point.y).powi(2)).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_accessors() {
        let sample = PointSample::new(10.0, 20.0, 0.5, 42);
        assert!((sample.x() - 10.0).abs() < f64::EPSILON);
        assert!((sample.y() - 20.0).abs() < f64::EPSILON);
        assert!((sample.force() - 0.5).abs() < f64::EPSILON);
        assert_eq!(sample.t(), 42);
        assert_eq!(sample.position(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_value_equality() {
        let a = PointSample::at(Point::new(1.0, 2.0), 0.3, 0);
        let b = PointSample::new(1.0, 2.0, 0.3, 0);
        assert_eq!(a, b);
        assert_ne!(a, PointSample::new(1.0, 2.0, 0.3, 1));
    }

    #[test]
    fn test_distance() {
        let sample = PointSample::new(0.0, 0.0, 1.0, 0);
        assert!((sample.distance_to(Point::new(3.0, 4.0)) - 5.0).abs() < f64::EPSILON);
    }
}
