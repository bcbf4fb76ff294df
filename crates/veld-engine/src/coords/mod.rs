//! Coordinate and geometry types shared across the workspace engine and UI.
//!
//! Canonical space:
//! - Integer logical pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! The workspace is unbounded in every direction, so positions are plain
//! `i32` and never clamped. Integer coordinates keep the local/world/view
//! conversions exact no matter how far the viewport pans.

mod insets;
mod point;
mod rect;

pub use insets::Insets;
pub use point::Point;
pub use rect::Rect;
