//! Layout strategies and the auto-sizing reflow pipeline.
//!
//! A container may carry a [`Layout`] strategy that deterministically places
//! its children, and every container continuously re-tightens its own
//! bounding rect around them ([`Gui::size_to_children`]). The pipeline runs
//! after any structural or geometric mutation and propagates bottom-up so
//! ancestors re-tighten around the new subtree extent.
//!
//! The central invariant: a sizing pass never visibly displaces placed
//! content. Only the container's local coordinate frame shifts — the
//! container moves in its parent's frame and every sized child moves by the
//! exact opposite amount, so world positions are untouched.

use log::trace;
use serde::{Deserialize, Serialize};
use veld_engine::coords::{Point, Rect};

use crate::control::{ControlId, ControlKind};
use crate::gui::Gui;

// ── Layout ────────────────────────────────────────────────────────────────

/// Deterministic, stateless child-placement rule applied by a container.
///
/// Strategies are pure functions of child sizes and order, and idempotent:
/// re-running one on already-placed children changes nothing.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Stack children vertically from the content origin, in list order.
    Column,
    /// Stack children horizontally from the content origin, in list order.
    Row,
}

impl Layout {
    /// Stable name used at the serialization boundary.
    pub fn name(self) -> &'static str {
        match self {
            Layout::Column => "column",
            Layout::Row => "row",
        }
    }
}

// ── reflow pipeline ───────────────────────────────────────────────────────

impl Gui {
    /// Run the full settling pipeline on `id` and every ancestor: apply the
    /// container's layout strategy, re-tighten around the children, then
    /// repeat on the parent until the root settles.
    pub(crate) fn reflow(&mut self, id: ControlId) {
        self.apply_layout(id);
        self.size_pass(id);
        if let Some(parent) = self.node(id).parent {
            self.reflow(parent);
        }
    }

    /// Recompute this container's bounding rect so it tightly encloses its
    /// sized children (plus inset), without moving any child in world space,
    /// then propagate upward so ancestors re-tighten too.
    ///
    /// Screen-anchored children are ignored for sizing and never moved. With
    /// no sized children at all, the content extent collapses to zero (the
    /// bounding rect shrinks to twice the inset per dimension).
    ///
    /// No-op on plain controls.
    pub fn size_to_children(&mut self, id: ControlId) {
        self.size_pass(id);
        if let Some(parent) = self.node(id).parent {
            self.reflow(parent);
        }
    }

    /// Place children according to the container's layout strategy, if any.
    ///
    /// Screen-anchored children keep their view-space position; everything
    /// else is stacked from the content origin in list order. Hidden
    /// children still occupy their slot.
    pub(crate) fn apply_layout(&mut self, id: ControlId) {
        let (children, layout) = match &self.node(id).kind {
            ControlKind::Container {
                children,
                layout: Some(layout),
            } => (children.clone(), *layout),
            _ => return,
        };

        let mut cursor = 0;
        for child in children {
            let node = self.node_mut(child);
            if node.flags.screen_relative {
                continue;
            }
            match layout {
                Layout::Column => {
                    node.rect.origin = Point::new(0, cursor);
                    cursor += node.rect.size.y;
                }
                Layout::Row => {
                    node.rect.origin = Point::new(cursor, 0);
                    cursor += node.rect.size.x;
                }
            }
        }
    }

    /// One local sizing step (no propagation).
    pub(crate) fn size_pass(&mut self, id: ControlId) {
        let node = self.node(id);
        let ControlKind::Container { children, .. } = &node.kind else {
            return;
        };
        let children = children.clone();
        let inset = node.inset;
        let old = node.rect;

        let mut bounds: Option<Rect> = None;
        let mut sized = Vec::with_capacity(children.len());
        for child in children {
            let c = self.node(child);
            if c.flags.screen_relative {
                continue;
            }
            bounds = Some(match bounds {
                Some(b) => b.union(c.rect),
                None => c.rect,
            });
            sized.push(child);
        }

        let Some(bounds) = bounds else {
            self.node_mut(id).rect.size = Point::new(inset.h(), inset.v());
            if old != self.node(id).rect {
                trace!("container {id:?} collapsed {old:?} -> {:?}", self.node(id).rect);
            }
            return;
        };

        // The child corner at (xmin, ymin) becomes the new content origin:
        // the container moves by that offset in its parent's frame and every
        // sized child moves back, so world positions are unchanged.
        let shift = bounds.origin;
        {
            let node = self.node_mut(id);
            node.rect.origin += shift;
            node.rect.size = Point::new(bounds.size.x + inset.h(), bounds.size.y + inset.v());
        }
        for child in sized {
            self.node_mut(child).rect.origin -= shift;
        }

        if old != self.node(id).rect {
            trace!("container {id:?} sized {old:?} -> {:?}", self.node(id).rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ControlFlags;
    use veld_engine::coords::Insets;

    fn plain() -> ControlFlags {
        ControlFlags::default()
    }

    fn anchored() -> ControlFlags {
        ControlFlags {
            screen_relative: true,
            ..Default::default()
        }
    }

    fn r(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect::new(x, y, w, h)
    }

    /// Floating container with the given inset and layout.
    fn free_container(gui: &mut Gui, inset: Insets, layout: Option<Layout>) -> ControlId {
        gui.create_container(None, Rect::default(), inset, plain(), layout)
            .unwrap()
    }

    /// Raw attach that bypasses the settle attachment normally triggers, so
    /// a scenario can stage exact pre-settle child positions.
    fn place(gui: &mut Gui, parent: ControlId, rect: Rect) -> ControlId {
        let id = gui.create_control(None, rect, plain()).unwrap();
        gui.node_mut(id).parent = Some(parent);
        if let ControlKind::Container { children, .. } = &mut gui.node_mut(parent).kind {
            children.push(id);
        }
        id
    }

    // ── size_to_children ──────────────────────────────────────────────────

    #[test]
    fn sizing_moves_frame_not_content() {
        let mut gui = Gui::new();
        let c = free_container(&mut gui, Insets::ZERO, None);
        let a = place(&mut gui, c, r(5, 7, 10, 20));
        let b = place(&mut gui, c, r(31, 37, 10, 20));
        let a_world = Point::new(5, 7);

        gui.size_to_children(c);

        // The container's new origin is the first child's pre-resize world
        // position, and that child now sits at the content origin.
        assert_eq!(gui.control(c).rect(), r(5, 7, 36, 50));
        assert_eq!(gui.control(a).rect(), r(0, 0, 10, 20));
        assert_eq!(gui.control(b).rect(), r(26, 30, 10, 20));
        assert_eq!(gui.world_rect(a).origin, a_world);
    }

    #[test]
    fn sizing_accounts_for_inset() {
        let mut gui = Gui::new();
        let c = free_container(&mut gui, Insets::new(3, 4), None);
        place(&mut gui, c, r(5, 7, 10, 20));

        gui.size_to_children(c);

        assert_eq!(gui.control(c).rect(), r(5, 7, 16, 28));
    }

    #[test]
    fn sizing_is_idempotent() {
        let mut gui = Gui::new();
        let c = free_container(&mut gui, Insets::uniform(2), None);
        let a = place(&mut gui, c, r(-4, 9, 10, 10));
        gui.size_to_children(c);
        let settled = (gui.control(c).rect(), gui.control(a).rect());
        gui.size_to_children(c);
        assert_eq!((gui.control(c).rect(), gui.control(a).rect()), settled);
    }

    #[test]
    fn no_sized_children_collapses_to_inset() {
        let mut gui = Gui::new();
        let c = free_container(&mut gui, Insets::new(3, 5), None);
        gui.node_mut(c).rect = r(10, 10, 50, 50);
        gui.size_to_children(c);
        assert_eq!(gui.control(c).rect(), r(10, 10, 6, 10));
    }

    #[test]
    fn anchored_children_do_not_size_or_move() {
        let mut gui = Gui::new();
        let c = free_container(&mut gui, Insets::ZERO, None);
        let hud = gui
            .create_control(Some(c), r(500, 500, 40, 40), anchored())
            .unwrap();
        let a = place(&mut gui, c, r(5, 7, 10, 20));

        gui.size_to_children(c);

        // Only the sized child drives the bounds; the anchored child keeps
        // its view-space rect.
        assert_eq!(gui.control(c).rect().size, Point::new(10, 20));
        assert_eq!(gui.control(hud).rect(), r(500, 500, 40, 40));
        assert_eq!(gui.control(a).rect().origin, Point::ZERO);
    }

    #[test]
    fn sizing_propagates_to_ancestors() {
        let mut gui = Gui::new();
        let outer = free_container(&mut gui, Insets::ZERO, None);
        let inner = gui
            .create_container(Some(outer), r(0, 0, 0, 0), Insets::ZERO, plain(), None)
            .unwrap();
        let leaf = gui.create_control(Some(inner), r(0, 0, 10, 10), plain()).unwrap();

        // Growing the leaf grows both enclosing containers.
        gui.set_size(leaf, Point::new(25, 30));
        assert_eq!(gui.control(inner).rect().size, Point::new(25, 30));
        assert_eq!(gui.control(outer).rect().size, Point::new(25, 30));
    }

    #[test]
    fn negative_child_positions_shift_frame() {
        let mut gui = Gui::new();
        let c = free_container(&mut gui, Insets::ZERO, None);
        let a = place(&mut gui, c, r(-10, -20, 5, 5));
        let world_before = gui.world_rect(a).origin;

        gui.size_to_children(c);

        assert_eq!(gui.control(c).rect(), r(-10, -20, 5, 5));
        assert_eq!(gui.control(a).rect().origin, Point::ZERO);
        assert_eq!(gui.world_rect(a).origin, world_before);
    }

    // ── layout strategies ─────────────────────────────────────────────────

    #[test]
    fn column_stacks_in_list_order() {
        let mut gui = Gui::new();
        let c = free_container(&mut gui, Insets::ZERO, Some(Layout::Column));
        let a = gui.create_control(Some(c), r(9, 9, 10, 20), plain()).unwrap();
        let b = gui.create_control(Some(c), r(9, 9, 15, 30), plain()).unwrap();
        let d = gui.create_control(Some(c), r(9, 9, 5, 12), plain()).unwrap();

        assert_eq!(gui.control(a).rect().origin, Point::new(0, 0));
        assert_eq!(gui.control(b).rect().origin, Point::new(0, 20));
        assert_eq!(gui.control(d).rect().origin, Point::new(0, 50));
        assert_eq!(gui.control(c).rect().size, Point::new(15, 62));
    }

    #[test]
    fn row_stacks_horizontally() {
        let mut gui = Gui::new();
        let c = free_container(&mut gui, Insets::ZERO, Some(Layout::Row));
        let a = gui.create_control(Some(c), r(0, 0, 10, 20), plain()).unwrap();
        let b = gui.create_control(Some(c), r(0, 0, 15, 30), plain()).unwrap();

        assert_eq!(gui.control(a).rect().origin, Point::new(0, 0));
        assert_eq!(gui.control(b).rect().origin, Point::new(10, 0));
        assert_eq!(gui.control(c).rect().size, Point::new(25, 30));
    }

    #[test]
    fn layout_skips_anchored_children() {
        let mut gui = Gui::new();
        let c = free_container(&mut gui, Insets::ZERO, Some(Layout::Column));
        let a = gui.create_control(Some(c), r(0, 0, 10, 20), plain()).unwrap();
        let hud = gui
            .create_control(Some(c), r(700, 9, 40, 40), anchored())
            .unwrap();
        let b = gui.create_control(Some(c), r(0, 0, 10, 8), plain()).unwrap();

        assert_eq!(gui.control(a).rect().origin, Point::new(0, 0));
        assert_eq!(gui.control(hud).rect().origin, Point::new(700, 9));
        // The anchored sibling does not consume a layout slot.
        assert_eq!(gui.control(b).rect().origin, Point::new(0, 20));
    }

    #[test]
    fn relayout_after_child_resize() {
        let mut gui = Gui::new();
        let c = free_container(&mut gui, Insets::ZERO, Some(Layout::Column));
        let a = gui.create_control(Some(c), r(0, 0, 10, 20), plain()).unwrap();
        let b = gui.create_control(Some(c), r(0, 0, 10, 10), plain()).unwrap();

        gui.set_size(a, Point::new(10, 35));
        assert_eq!(gui.control(b).rect().origin, Point::new(0, 35));
        assert_eq!(gui.control(c).rect().size, Point::new(10, 45));
    }

    #[test]
    fn layout_names_are_stable() {
        assert_eq!(Layout::Column.name(), "column");
        assert_eq!(Layout::Row.name(), "row");
    }
}
