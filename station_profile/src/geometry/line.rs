//! Basic 2D line segment type.

use super::Point;

/// Representation of a 2D line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    /// Creates a new line segment.
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Creates a vertical segment at `x` spanning `y0..y1`.
    pub fn vertical(x: f64, y0: f64, y1: f64) -> Self {
        Self::new(Point::new(x, y0), Point::new(x, y1))
    }
}
