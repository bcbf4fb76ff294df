//! Veld UI — a retained control tree over an unbounded, panned workspace.
//!
//! Controls live in a tree owned by one [`gui::Gui`] root. Every control has
//! a bounding rect in its parent's content space; containers continuously
//! re-tighten themselves around their children without ever displacing
//! placed content, and screen-anchored controls pin themselves to the
//! viewport for HUD-style overlays. Focus moves through stacked, cyclic
//! rings; hit testing and the paint-order traversal consume the same
//! coordinate transforms the renderer does.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use veld_ui::prelude::*;
//!
//! let mut gui = Gui::new();
//! let root = gui.root();
//!
//! // A panel that stacks its children and hugs them with a 4px inset.
//! let panel = gui.create_container(
//!     Some(root),
//!     Rect::new(40, 40, 0, 0),
//!     Insets::uniform(4),
//!     ControlFlags::default(),
//!     Some(Layout::Column),
//! )?;
//! let field = gui.create_control(
//!     Some(panel),
//!     Rect::new(0, 0, 120, 24),
//!     ControlFlags { can_focus: true, ..Default::default() },
//! )?;
//!
//! gui.ring_add(field, true)?;
//! gui.set_view_pos(Point::new(0, 0));
//!
//! // Per frame: route input with hit_test, then draw paint_order().
//! if let Some(hit) = gui.hit_test(Point::new(45, 45)) {
//!     gui.set_focus(hit, true);
//! }
//! ```
//!
//! The engine is single-threaded and frame-driven: all mutation and every
//! traversal happen on the thread that owns the [`gui::Gui`].

pub mod control;
pub mod error;
pub mod focus;
pub mod gui;
pub mod layout;
pub mod persist;
mod transform;

/// Everything needed to build on the control tree.
pub mod prelude {
    pub use crate::control::{Control, ControlFlags, ControlId, ControlKind};
    pub use crate::error::{FocusError, TreeError};
    pub use crate::focus::FocusRing;
    pub use crate::gui::Gui;
    pub use crate::layout::Layout;
    pub use crate::persist::{SavedControl, SavedKind};

    // Re-export the engine primitives everyone needs.
    pub use veld_engine::coords::{Insets, Point, Rect};
}
