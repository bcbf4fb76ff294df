use serde::{Deserialize, Serialize};

use super::Point;

/// Axis-aligned rectangle in integer logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Point,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Point::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Point, size: Point) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn min(self) -> Point {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Point {
        Point::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.origin.x
            && p.y >= self.origin.y
            && p.x < self.origin.x + self.size.x
            && p.y < self.origin.y + self.size.y
    }

    /// The same rectangle shifted by `delta`.
    #[inline]
    #[must_use]
    pub fn translate(self, delta: Point) -> Rect {
        Rect::from_origin_size(self.origin + delta, self.size)
    }

    /// Smallest rectangle enclosing both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Rect) -> Rect {
        let min = Point::new(self.min().x.min(other.min().x), self.min().y.min(other.min().y));
        let max = Point::new(self.max().x.max(other.max().x), self.max().y.max(other.max().y));
        Rect::from_origin_size(min, max - min)
    }
}
