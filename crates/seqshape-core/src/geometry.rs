//! Basic geometric types used by the layout engine and shape primitives.
//!
//! All coordinates are absolute, with the origin at the top-left corner of the
//! canvas and `y` growing downwards.

use serde::{Deserialize, Serialize};

/// A point on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Treats the point as the top-left corner of an area of the given size.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_top_left(self, size)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size grown by `padding` on every side
    pub fn add_padding(self, padding: f32) -> Self {
        Self {
            width: self.width + padding * 2.0,
            height: self.height + padding * 2.0,
        }
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from a top-left corner and a size.
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Merges two bounds to create a larger bounds that contains both
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Returns true if `other` lies at least `margin` inside the left and right
    /// edges and strictly inside the top and bottom edges.
    pub fn contains_with_margin(&self, other: &Self, margin: f32) -> bool {
        other.min_x >= self.min_x + margin
            && other.max_x <= self.max_x - margin
            && other.min_y > self.min_y
            && other.max_y < self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_size_add_padding() {
        let size = Size::new(10.0, 4.0).add_padding(3.0);
        assert_eq!(size, Size::new(16.0, 10.0));
    }

    #[test]
    fn test_bounds_from_top_left() {
        let bounds = Point::new(10.0, 20.0).to_bounds(Size::new(30.0, 40.0));
        assert_eq!(bounds.min_x(), 10.0);
        assert_eq!(bounds.min_y(), 20.0);
        assert_eq!(bounds.max_x(), 40.0);
        assert_eq!(bounds.max_y(), 60.0);
        assert_eq!(bounds.width(), 30.0);
        assert_eq!(bounds.height(), 40.0);
    }

    #[test]
    fn test_bounds_merge() {
        let a = Point::new(0.0, 0.0).to_bounds(Size::new(10.0, 10.0));
        let b = Point::new(5.0, -5.0).to_bounds(Size::new(10.0, 10.0));
        let merged = a.merge(&b);
        assert_eq!(merged.min_y(), -5.0);
        assert_eq!(merged.max_x(), 15.0);
        assert_eq!(merged.width(), 15.0);
        assert_eq!(merged.height(), 15.0);
    }

    #[test]
    fn test_bounds_contains_with_margin() {
        let outer = Point::new(0.0, 0.0).to_bounds(Size::new(100.0, 100.0));
        let inner = Point::new(10.0, 10.0).to_bounds(Size::new(80.0, 80.0));
        assert!(outer.contains_with_margin(&inner, 10.0));
        assert!(!outer.contains_with_margin(&inner, 11.0));
        assert!(!inner.contains_with_margin(&outer, 0.0));
    }
}
