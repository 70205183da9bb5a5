//! Geometric primitives: Point, Size, Rect, `CornerRadius`.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A 2D size with width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Size {
    /// Zero size
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::ZERO
    }
}

/// An axis-aligned rectangle defined by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X position of top-left corner
    pub x: f32,
    /// Y position of top-left corner
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create from size at origin.
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Get the origin (top-left) point.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Get the size.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if the rectangle has no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle (inclusive).
    #[must_use]
    pub fn contains_point(&self, point: &Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Rectangle of the same width stacked directly below this one.
    #[must_use]
    pub fn below(&self, gap: f32, height: f32) -> Self {
        Self::new(self.x, self.bottom() + gap, self.width, height.max(0.0))
    }

    /// Create a new rectangle inset by the given amount on all sides.
    #[must_use]
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            2.0f32.mul_add(-amount, self.width).max(0.0),
            2.0f32.mul_add(-amount, self.height).max(0.0),
        )
    }

    /// Point at fractional coordinates inside the rectangle.
    ///
    /// `(0.0, 0.0)` is the top-left corner and `(1.0, 1.0)` the bottom-right.
    #[must_use]
    pub fn at_fraction(&self, fx: f32, fy: f32) -> Point {
        Point::new(
            self.width.mul_add(fx, self.x),
            self.height.mul_add(fy, self.y),
        )
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// Corner radii for rounded rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerRadius {
    /// Top-left radius
    pub top_left: f32,
    /// Top-right radius
    pub top_right: f32,
    /// Bottom-right radius
    pub bottom_right: f32,
    /// Bottom-left radius
    pub bottom_left: f32,
}

impl CornerRadius {
    /// Square corners.
    pub const ZERO: Self = Self::uniform(0.0);

    /// Same radius on every corner.
    #[must_use]
    pub const fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }
}

impl Default for CornerRadius {
    fn default() -> Self {
        Self::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_point_ops() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, 5.0);
        assert_eq!(a + b, Point::new(4.0, 7.0));
        assert_eq!(b - a, Point::new(2.0, 3.0));
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 70.0);
        assert_eq!(r.center(), Point::new(60.0, 45.0));
        assert_eq!(r.size(), Size::new(100.0, 50.0));
    }

    #[test]
    fn test_rect_contains_point_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(&Point::new(0.0, 0.0)));
        assert!(r.contains_point(&Point::new(10.0, 10.0)));
        assert!(!r.contains_point(&Point::new(10.1, 5.0)));
        assert!(!r.contains_point(&Point::new(5.0, -0.1)));
    }

    #[test]
    fn test_rect_below() {
        let trigger = Rect::new(10.0, 10.0, 150.0, 36.0);
        let panel = trigger.below(4.0, 80.0);
        assert_eq!(panel, Rect::new(10.0, 50.0, 150.0, 80.0));
        assert_eq!(trigger.below(0.0, -5.0).height, 0.0);
    }

    #[test]
    fn test_rect_inset_and_empty() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(r.inset(2.0), Rect::new(2.0, 2.0, 6.0, 6.0));
        assert!(r.inset(6.0).is_empty());
        assert!(Rect::default().is_empty());
    }

    #[test]
    fn test_rect_at_fraction() {
        let r = Rect::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(r.at_fraction(0.5, 0.0), Point::new(100.0, 0.0));
        assert_eq!(r.at_fraction(1.0, 0.75), Point::new(200.0, 75.0));
    }

    #[test]
    fn test_corner_radius() {
        assert_eq!(CornerRadius::uniform(4.0).bottom_left, 4.0);
        assert_eq!(CornerRadius::default(), CornerRadius::ZERO);
    }

    proptest! {
        #[test]
        fn prop_panel_below_never_overlaps_trigger(
            x in -100.0f32..100.0, y in -100.0f32..100.0, w in 1.0f32..300.0, h in 1.0f32..60.0,
            gap in 0.5f32..16.0, height in 0.0f32..400.0,
        ) {
            let trigger = Rect::new(x, y, w, h);
            let panel = trigger.below(gap, height);
            prop_assert!(!trigger.contains_point(&panel.origin()));
            prop_assert!(panel.contains_point(&panel.center()));
            prop_assert_eq!(panel.width, trigger.width);
        }
    }
}
