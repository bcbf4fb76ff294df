//! Transforms between the three coordinate spaces, hit testing, and the
//! read-only paint-order traversal.
//!
//! Per control there are three spaces: **local** (relative to the control's
//! own content origin), **world** (absolute position in the unbounded
//! workspace), and **view** (what is rendered at the window origin; world
//! minus the viewport offset). A `screen_relative` control opts out of the
//! world: its bounding rect *is* its view rect, wherever the viewport pans.

use veld_engine::coords::{Point, Rect};

use crate::control::ControlId;
use crate::gui::Gui;

impl Gui {
    /// World position of `id`'s content origin: the sum of
    /// `(position + inset)` from the tree root down to `id` inclusive.
    fn content_origin_world(&self, id: ControlId) -> Point {
        let mut acc = Point::ZERO;
        let mut cur = Some(id);
        while let Some(c) = cur {
            let node = self.node(c);
            acc += node.rect.origin + node.inset.offset();
            cur = node.parent;
        }
        acc
    }

    /// Convert a point in `id`'s local space to world space.
    ///
    /// # Panics
    /// Panics if `id` refers to a destroyed control.
    #[inline]
    pub fn local_to_world(&self, id: ControlId, p: Point) -> Point {
        self.content_origin_world(id) + p
    }

    /// Exact inverse of [`local_to_world`](Self::local_to_world).
    #[inline]
    pub fn world_to_local(&self, id: ControlId, p: Point) -> Point {
        p - self.content_origin_world(id)
    }

    /// Convert a world point to view space.
    #[inline]
    pub fn world_to_view(&self, p: Point) -> Point {
        p - self.viewport
    }

    /// Exact inverse of [`world_to_view`](Self::world_to_view).
    #[inline]
    pub fn view_to_world(&self, p: Point) -> Point {
        p + self.viewport
    }

    /// Bounding rect of `id` in world space.
    ///
    /// A `screen_relative` control has no real world position; it is given
    /// the fictive one that pans along with the viewport, so the rect stays
    /// well defined for persistence and debugging.
    pub fn world_rect(&self, id: ControlId) -> Rect {
        let node = self.node(id);
        if node.flags.screen_relative {
            node.rect.translate(self.viewport)
        } else {
            let origin = self.local_to_world(id, -node.inset.offset());
            Rect::from_origin_size(origin, node.rect.size)
        }
    }

    /// Bounding rect of `id` in view space — what the renderer consumes.
    ///
    /// A `screen_relative` control's own rect is already in view space. A
    /// normal control nested anywhere under a screen-anchored ancestor
    /// composes its local offsets onto that ancestor's view rect, so HUD
    /// content tracks the HUD rather than the panned world. Everything else
    /// is the world rect shifted by the viewport offset.
    pub fn view_rect(&self, id: ControlId) -> Rect {
        let node = self.node(id);
        if node.flags.screen_relative {
            return node.rect;
        }
        let size = node.rect.size;
        match self.senior_anchor(id) {
            Some(anchor) => {
                let offset = self.local_to_world(id, -node.inset.offset())
                    - self.local_to_world(anchor, -self.node(anchor).inset.offset());
                Rect::from_origin_size(self.node(anchor).rect.origin + offset, size)
            }
            None => self.world_rect(id).translate(-self.viewport),
        }
    }

    /// The most senior `screen_relative` ancestor of `id` (closest to the
    /// root), excluding `id` itself.
    fn senior_anchor(&self, id: ControlId) -> Option<ControlId> {
        let mut anchor = None;
        let mut cur = self.node(id).parent;
        while let Some(c) = cur {
            let node = self.node(c);
            if node.flags.screen_relative {
                anchor = Some(c);
            }
            cur = node.parent;
        }
        anchor
    }

    // ── hit testing ───────────────────────────────────────────────────────

    /// Frontmost visible control containing the view-space point `p`, or
    /// `None`.
    ///
    /// Later siblings (higher z-order) win over earlier ones; a descendant
    /// wins over any ancestor that also contains the point. Invisible
    /// controls are pruned together with their subtrees.
    pub fn hit_test(&self, p: Point) -> Option<ControlId> {
        self.hit_descend(self.root(), p)
    }

    fn hit_descend(&self, id: ControlId, p: Point) -> Option<ControlId> {
        let node = self.node(id);
        if !node.flags.visible {
            return None;
        }
        for &child in node.children().iter().rev() {
            if let Some(hit) = self.hit_descend(child, p) {
                return Some(hit);
            }
        }
        self.view_rect(id).contains(p).then_some(id)
    }

    // ── paint order ───────────────────────────────────────────────────────

    /// Visible controls back-to-front, each with its current view rect.
    ///
    /// Parents precede children, children follow list order, so drawing the
    /// result in sequence yields correct stacking. Read-only.
    pub fn paint_order(&self) -> Vec<(ControlId, Rect)> {
        let mut out = Vec::new();
        self.paint_descend(self.root(), &mut out);
        out
    }

    fn paint_descend(&self, id: ControlId, out: &mut Vec<(ControlId, Rect)>) {
        let node = self.node(id);
        if !node.flags.visible {
            return;
        }
        out.push((id, self.view_rect(id)));
        for &child in node.children() {
            self.paint_descend(child, out);
        }
    }
}
