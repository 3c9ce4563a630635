//! Screen geometry types

use serde::{Deserialize, Serialize};

/// A point in screen coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangle in screen coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if a point lies inside (edges inclusive)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// The visible screen area the reading surface draws into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width of the visible area
    pub width: f64,
    /// Height of the visible area
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp a box of `size` starting at `value` so it stays within
    /// `[margin, extent - size - margin]`.
    ///
    /// When the box cannot fit, or the extent is not a number, it is pinned
    /// to the leading margin.
    pub fn clamp_axis(value: f64, size: f64, extent: f64, margin: f64) -> f64 {
        let max = extent - size - margin;
        if value.is_nan() || max.is_nan() || max < margin {
            return margin;
        }
        value.clamp(margin, max)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(390.0, 844.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert!(rect.contains(Point::new(10.0, 20.0)));
        assert!(rect.contains(Point::new(110.0, 60.0)));
        assert!(!rect.contains(Point::new(111.0, 30.0)));
        assert!(!rect.contains(Point::new(50.0, 19.0)));
    }

    #[test]
    fn test_clamp_axis() {
        assert_eq!(Viewport::clamp_axis(-40.0, 300.0, 390.0, 10.0), 10.0);
        assert_eq!(Viewport::clamp_axis(200.0, 300.0, 390.0, 10.0), 80.0);
        assert_eq!(Viewport::clamp_axis(50.0, 300.0, 390.0, 10.0), 50.0);
    }

    #[test]
    fn test_clamp_axis_when_box_does_not_fit() {
        assert_eq!(Viewport::clamp_axis(5.0, 300.0, 200.0, 10.0), 10.0);
        assert_eq!(Viewport::clamp_axis(f64::NAN, 300.0, 390.0, 10.0), 10.0);
    }

    #[test]
    fn test_clamp_axis_with_nan_extent() {
        assert_eq!(Viewport::clamp_axis(50.0, 300.0, f64::NAN, 10.0), 10.0);
        assert_eq!(Viewport::clamp_axis(50.0, f64::NAN, 390.0, 10.0), 10.0);
    }
}
