//! GUI root coordinator.
//!
//! [`Gui`] owns every control in the workspace (a generational arena),
//! the viewport offset with its named bookmarks, the focus-ring stack, and
//! the single globally-focused control. All tree mutation goes through it;
//! the read-only queries (transforms, hit testing, paint order) live in
//! `transform`, the reflow pipeline in [`crate::layout`], and the focus
//! operations in [`crate::focus`].
//!
//! Single-threaded by design: mutation and read-only traversal never
//! interleave because both are driven from the owning frame loop's thread.

use std::collections::HashMap;

use log::{debug, warn};
use slotmap::SlotMap;
use veld_engine::coords::{Insets, Point, Rect};

use crate::control::{Control, ControlFlags, ControlId, ControlKind};
use crate::error::TreeError;
use crate::focus::FocusRing;
use crate::layout::Layout;

/// Root coordinator for one workspace session.
///
/// Created once; the content-tree root container and its base focus ring
/// exist from construction on and are never removed.
pub struct Gui {
    pub(crate) controls: SlotMap<ControlId, Control>,
    root: ControlId,
    pub(crate) viewport: Point,
    bookmarks: HashMap<String, Point>,
    pub(crate) focus_stack: Vec<FocusRing>,
    pub(crate) global_focus: Option<ControlId>,
}

impl Gui {
    pub fn new() -> Self {
        let mut controls = SlotMap::with_key();
        let root = controls.insert(Control::new_container(
            Rect::default(),
            Insets::ZERO,
            ControlFlags::default(),
            None,
        ));
        Self {
            controls,
            root,
            viewport: Point::ZERO,
            bookmarks: HashMap::new(),
            focus_stack: vec![FocusRing::new(root)],
            global_focus: None,
        }
    }

    /// The content-tree root container.
    #[inline]
    pub fn root(&self) -> ControlId {
        self.root
    }

    // ── arena access ──────────────────────────────────────────────────────

    /// Borrow a control.
    ///
    /// # Panics
    /// Panics if `id` refers to a destroyed control. A stale id is an
    /// unrecoverable precondition violation, not a runtime condition.
    pub fn control(&self, id: ControlId) -> &Control {
        self.node(id)
    }

    pub(crate) fn node(&self, id: ControlId) -> &Control {
        match self.controls.get(id) {
            Some(c) => c,
            None => panic!("operation on detached control {id:?}"),
        }
    }

    pub(crate) fn node_mut(&mut self, id: ControlId) -> &mut Control {
        match self.controls.get_mut(id) {
            Some(c) => c,
            None => panic!("operation on detached control {id:?}"),
        }
    }

    // ── construction ──────────────────────────────────────────────────────

    /// Create a plain control, optionally attached to `parent`.
    pub fn create_control(
        &mut self,
        parent: Option<ControlId>,
        rect: Rect,
        flags: ControlFlags,
    ) -> Result<ControlId, TreeError> {
        if let Some(p) = parent {
            self.ensure_container(p)?;
        }
        let id = self.controls.insert(Control::new(rect, flags));
        debug!("created control {id:?} at {:?}", rect.origin);
        if let Some(p) = parent {
            self.attach(p, id);
        }
        Ok(id)
    }

    /// Create a container, optionally attached to `parent`.
    ///
    /// The container keeps its given rect until the first sizing trigger
    /// (adding/removing a child, a child resize or move).
    pub fn create_container(
        &mut self,
        parent: Option<ControlId>,
        rect: Rect,
        inset: Insets,
        flags: ControlFlags,
        layout: Option<Layout>,
    ) -> Result<ControlId, TreeError> {
        if let Some(p) = parent {
            self.ensure_container(p)?;
        }
        let id = self
            .controls
            .insert(Control::new_container(rect, inset, flags, layout));
        debug!("created container {id:?} at {:?}", rect.origin);
        if let Some(p) = parent {
            self.attach(p, id);
        }
        Ok(id)
    }

    fn ensure_container(&self, id: ControlId) -> Result<(), TreeError> {
        if self.node(id).is_container() {
            Ok(())
        } else {
            Err(TreeError::NotAContainer)
        }
    }

    // ── tree mutation ─────────────────────────────────────────────────────

    /// Attach a floating control as the topmost child of `parent`.
    ///
    /// The child's rect is interpreted in the parent's content space as-is;
    /// use [`reparent`](Self::reparent) to move a control between containers
    /// without visually displacing it.
    pub fn add_child(&mut self, parent: ControlId, child: ControlId) -> Result<(), TreeError> {
        self.ensure_container(parent)?;
        if self.node(child).parent.is_some() {
            return Err(TreeError::AlreadyAttached);
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(TreeError::WouldCycle);
        }
        self.attach(parent, child);
        Ok(())
    }

    /// Detach `child` from `parent`. The child lives on as a floating
    /// control (its rect now interpreted in world space) and can be
    /// re-attached elsewhere.
    pub fn remove_child(&mut self, parent: ControlId, child: ControlId) -> Result<(), TreeError> {
        if self.node(child).parent != Some(parent) {
            return Err(TreeError::NotAChild);
        }
        self.detach(child);
        Ok(())
    }

    /// Move `child` into `new_parent`, preserving its world position: the
    /// local rect is rewritten in the new parent's content frame. Both the
    /// old and the new container reflow.
    pub fn reparent(&mut self, child: ControlId, new_parent: ControlId) -> Result<(), TreeError> {
        if self.node(child).parent.is_none() {
            return Err(TreeError::NotAttached);
        }
        self.ensure_container(new_parent)?;
        if new_parent == child || self.is_ancestor(child, new_parent) {
            return Err(TreeError::WouldCycle);
        }
        let anchored = self.node(child).flags.screen_relative;
        let world = self.world_rect(child).origin;
        self.detach(child);
        if !anchored {
            let content_origin = self.local_to_world(new_parent, Point::ZERO);
            self.node_mut(child).rect.origin = world - content_origin;
        }
        self.attach(new_parent, child);
        Ok(())
    }

    /// Destroy a control and its whole subtree.
    ///
    /// Destroyed ids are purged from every focus ring; global focus clears
    /// if it pointed into the subtree. Any later use of a destroyed id
    /// panics.
    ///
    /// # Panics
    /// Panics when asked to destroy the root container.
    pub fn destroy(&mut self, id: ControlId) {
        assert!(id != self.root, "cannot destroy the root container");
        let _ = self.node(id);
        self.detach(id);
        let mut doomed = Vec::new();
        self.collect_subtree(id, &mut doomed);
        for &d in &doomed {
            self.controls.remove(d);
        }
        for ring in &mut self.focus_stack {
            ring.members.retain(|m| !doomed.contains(m));
            if ring.focused.is_some_and(|f| doomed.contains(&f)) {
                ring.focused = None;
            }
        }
        if self.global_focus.is_some_and(|f| doomed.contains(&f)) {
            self.global_focus = None;
        }
        debug!("destroyed {} control(s) rooted at {id:?}", doomed.len());
    }

    /// Move `id` to the end of its parent's child list (topmost z-order).
    pub fn bring_to_front(&mut self, id: ControlId) -> Result<(), TreeError> {
        let Some(parent) = self.node(id).parent else {
            return Err(TreeError::NotAttached);
        };
        if let ControlKind::Container { children, .. } = &mut self.node_mut(parent).kind {
            children.retain(|&c| c != id);
            children.push(id);
        }
        Ok(())
    }

    fn attach(&mut self, parent: ControlId, child: ControlId) {
        self.node_mut(child).parent = Some(parent);
        if let ControlKind::Container { children, .. } = &mut self.node_mut(parent).kind {
            children.push(child);
        }
        debug!("attached {child:?} to {parent:?}");
        self.reflow(parent);
    }

    fn detach(&mut self, child: ControlId) {
        let Some(parent) = self.node_mut(child).parent.take() else {
            return;
        };
        if let ControlKind::Container { children, .. } = &mut self.node_mut(parent).kind {
            children.retain(|&c| c != child);
        }
        debug!("detached {child:?} from {parent:?}");
        self.reflow(parent);
    }

    /// Whether `ancestor` appears on `id`'s parent chain (excluding `id`).
    fn is_ancestor(&self, ancestor: ControlId, id: ControlId) -> bool {
        let mut cur = self.node(id).parent;
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.node(c).parent;
        }
        false
    }

    pub(crate) fn collect_subtree(&self, id: ControlId, out: &mut Vec<ControlId>) {
        out.push(id);
        for &child in self.node(id).children() {
            self.collect_subtree(child, out);
        }
    }

    // ── geometry mutation ─────────────────────────────────────────────────

    /// Move a control within its parent's content space (view space for a
    /// `screen_relative` control). Triggers the parent's reflow.
    pub fn set_position(&mut self, id: ControlId, pos: Point) {
        if self.node(id).rect.origin == pos {
            return;
        }
        self.node_mut(id).rect.origin = pos;
        if let Some(parent) = self.node(id).parent {
            self.reflow(parent);
        }
    }

    /// Resize a control. Triggers the parent's reflow.
    pub fn set_size(&mut self, id: ControlId, size: Point) {
        if self.node(id).rect.size == size {
            return;
        }
        self.node_mut(id).rect.size = size;
        if let Some(parent) = self.node(id).parent {
            self.reflow(parent);
        }
    }

    /// Show or hide a control (and, transitively, its subtree).
    ///
    /// Visibility does not take part in layout — hidden controls keep their
    /// slot — but it prunes hit testing, paint order, and focus acceptance.
    pub fn set_visible(&mut self, id: ControlId, visible: bool) {
        self.node_mut(id).flags.visible = visible;
    }

    // ── viewport ──────────────────────────────────────────────────────────

    /// Pan the workspace: `pos` is the world point displayed at the view
    /// origin. Unclamped — the workspace is unbounded in all directions.
    #[inline]
    pub fn set_view_pos(&mut self, pos: Point) {
        self.viewport = pos;
    }

    #[inline]
    pub fn view_pos(&self) -> Point {
        self.viewport
    }

    /// Remember a viewport position under `name`.
    pub fn set_bookmark(&mut self, name: impl Into<String>, pos: Point) {
        self.bookmarks.insert(name.into(), pos);
    }

    /// Look up a stored viewport position.
    pub fn bookmark(&self, name: &str) -> Option<Point> {
        self.bookmarks.get(name).copied()
    }

    /// Pan to a stored viewport position. Returns `false` (and logs) when
    /// no bookmark of that name exists.
    pub fn goto_bookmark(&mut self, name: &str) -> bool {
        match self.bookmarks.get(name) {
            Some(&pos) => {
                self.viewport = pos;
                true
            }
            None => {
                warn!("unknown viewport bookmark {name:?}");
                false
            }
        }
    }
}

impl Default for Gui {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> ControlFlags {
        ControlFlags::default()
    }

    fn r(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect::new(x, y, w, h)
    }

    fn container(gui: &mut Gui, parent: Option<ControlId>) -> ControlId {
        gui.create_container(parent, Rect::default(), Insets::ZERO, plain(), None)
            .unwrap()
    }

    // ── construction & attachment ─────────────────────────────────────────

    #[test]
    fn create_attaches_to_parent() {
        let mut gui = Gui::new();
        let root = gui.root();
        let c = gui.create_control(Some(root), r(1, 2, 3, 4), plain()).unwrap();
        assert_eq!(gui.control(c).parent(), Some(root));
        assert_eq!(gui.control(root).children(), &[c]);
    }

    #[test]
    fn attach_to_plain_control_fails() {
        let mut gui = Gui::new();
        let leaf = gui.create_control(None, r(0, 0, 5, 5), plain()).unwrap();
        let err = gui.create_control(Some(leaf), r(0, 0, 1, 1), plain());
        assert_eq!(err.unwrap_err(), TreeError::NotAContainer);
    }

    #[test]
    fn double_attach_fails() {
        let mut gui = Gui::new();
        let root = gui.root();
        let c = gui.create_control(Some(root), r(0, 0, 5, 5), plain()).unwrap();
        assert_eq!(gui.add_child(root, c), Err(TreeError::AlreadyAttached));
    }

    #[test]
    fn attach_inside_own_subtree_fails() {
        let mut gui = Gui::new();
        let outer = container(&mut gui, None);
        let inner = container(&mut gui, Some(outer));
        // `outer` floats; attaching it under its own descendant must fail.
        assert_eq!(gui.add_child(inner, outer), Err(TreeError::WouldCycle));
    }

    #[test]
    fn remove_non_child_fails() {
        let mut gui = Gui::new();
        let root = gui.root();
        let floating = gui.create_control(None, r(0, 0, 5, 5), plain()).unwrap();
        assert_eq!(gui.remove_child(root, floating), Err(TreeError::NotAChild));
    }

    #[test]
    fn removed_child_floats() {
        let mut gui = Gui::new();
        let root = gui.root();
        let c = gui.create_control(Some(root), r(3, 4, 5, 5), plain()).unwrap();
        gui.remove_child(root, c).unwrap();
        assert_eq!(gui.control(c).parent(), None);
        assert!(gui.control(root).children().is_empty());
    }

    // ── z-order ───────────────────────────────────────────────────────────

    #[test]
    fn bring_to_front_reorders_siblings() {
        let mut gui = Gui::new();
        let root = gui.root();
        let a = gui.create_control(Some(root), r(0, 0, 5, 5), plain()).unwrap();
        let b = gui.create_control(Some(root), r(0, 0, 5, 5), plain()).unwrap();
        let c = gui.create_control(Some(root), r(0, 0, 5, 5), plain()).unwrap();
        gui.bring_to_front(a).unwrap();
        assert_eq!(gui.control(root).children(), &[b, c, a]);
    }

    #[test]
    fn bring_to_front_needs_parent() {
        let mut gui = Gui::new();
        let floating = gui.create_control(None, r(0, 0, 5, 5), plain()).unwrap();
        assert_eq!(gui.bring_to_front(floating), Err(TreeError::NotAttached));
    }

    // ── reparent ──────────────────────────────────────────────────────────

    #[test]
    fn reparent_preserves_world_position() {
        let mut gui = Gui::new();
        let root = gui.root();
        let a = gui
            .create_container(Some(root), r(10, 10, 0, 0), Insets::ZERO, plain(), None)
            .unwrap();
        let b = gui
            .create_container(Some(root), r(100, 200, 0, 0), Insets::ZERO, plain(), None)
            .unwrap();
        let c = gui.create_control(Some(a), r(5, 7, 8, 8), plain()).unwrap();
        let before = gui.world_rect(c);
        gui.reparent(c, b).unwrap();
        assert_eq!(gui.control(c).parent(), Some(b));
        assert_eq!(gui.world_rect(c), before);
    }

    // ── destroy ───────────────────────────────────────────────────────────

    #[test]
    fn destroy_removes_subtree() {
        let mut gui = Gui::new();
        let root = gui.root();
        let panel = container(&mut gui, Some(root));
        let leaf = gui.create_control(Some(panel), r(0, 0, 5, 5), plain()).unwrap();
        gui.destroy(panel);
        assert!(gui.controls.get(panel).is_none());
        assert!(gui.controls.get(leaf).is_none());
        assert!(gui.control(root).children().is_empty());
    }

    #[test]
    #[should_panic(expected = "detached control")]
    fn stale_id_is_loud() {
        let mut gui = Gui::new();
        let root = gui.root();
        let c = gui.create_control(Some(root), r(0, 0, 5, 5), plain()).unwrap();
        gui.destroy(c);
        let _ = gui.control(c);
    }

    #[test]
    #[should_panic(expected = "root container")]
    fn destroying_root_is_loud() {
        let mut gui = Gui::new();
        let root = gui.root();
        gui.destroy(root);
    }

    // ── viewport & bookmarks ──────────────────────────────────────────────

    #[test]
    fn viewport_is_unclamped() {
        let mut gui = Gui::new();
        gui.set_view_pos(Point::new(-1_000_000, 2_000_000));
        assert_eq!(gui.view_pos(), Point::new(-1_000_000, 2_000_000));
    }

    #[test]
    fn bookmarks_round_trip() {
        let mut gui = Gui::new();
        gui.set_bookmark("desk", Point::new(40, -60));
        assert_eq!(gui.bookmark("desk"), Some(Point::new(40, -60)));
        assert!(gui.goto_bookmark("desk"));
        assert_eq!(gui.view_pos(), Point::new(40, -60));
        assert!(!gui.goto_bookmark("nowhere"));
    }
}
