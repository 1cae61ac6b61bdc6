//! Layout primitives for the drag engine.
//!
//! Pointer positions and element rectangles arrive from the host UI
//! toolkit already normalized to these types, so the reorder algorithm
//! never touches a real layout system.

use serde::{Deserialize, Serialize};

/// A pointer position or displacement, regardless of input modality
/// (mouse, touch, pen).
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

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

/// An element's layout rectangle at gesture start.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Vertical midpoint — the line a drag must cross to pass this target.
    pub fn mid_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// This rectangle displaced by a pointer delta.
    pub fn translated(&self, delta: Point) -> Rect {
        Rect {
            top: self.top + delta.y,
            left: self.left + delta.x,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mid_y() {
        let rect = Rect::new(40.0, 0.0, 100.0, 40.0);
        assert_eq!(rect.mid_y(), 60.0);
        assert_eq!(rect.bottom(), 80.0);
    }

    #[test]
    fn test_translated_keeps_size() {
        let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
        let moved = rect.translated(Point::new(5.0, -3.0));
        assert_eq!(moved, Rect::new(7.0, 25.0, 100.0, 40.0));
    }
}
