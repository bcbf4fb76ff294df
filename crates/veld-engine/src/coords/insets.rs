use serde::{Deserialize, Serialize};

use super::Point;

/// Symmetric content margin between a container's bounding rect and the area
/// where it positions children. `x` applies to the left and right edges, `y`
/// to the top and bottom edges.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub x: i32,
    pub y: i32,
}

impl Insets {
    pub const ZERO: Insets = Insets { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn uniform(v: i32) -> Self {
        Self { x: v, y: v }
    }

    /// Total inset on the horizontal axis (both edges).
    #[inline]
    pub fn h(self) -> i32 {
        self.x * 2
    }

    /// Total inset on the vertical axis (both edges).
    #[inline]
    pub fn v(self) -> i32 {
        self.y * 2
    }

    /// Displacement of the content origin from the bounding-rect origin.
    #[inline]
    pub fn offset(self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_count_both_edges() {
        let i = Insets::new(4, 7);
        assert_eq!(i.h(), 8);
        assert_eq!(i.v(), 14);
    }

    #[test]
    fn offset_is_one_edge() {
        assert_eq!(Insets::uniform(3).offset(), Point::new(3, 3));
    }
}
