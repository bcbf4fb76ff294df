use serde::{Deserialize, Serialize};
use veld_engine::coords::{Insets, Rect};

use crate::layout::Layout;

slotmap::new_key_type! {
    /// Stable identity of a control, assigned at creation.
    ///
    /// Keys are generational: once a control is destroyed its id never
    /// resolves again, even if the slot is reused.
    pub struct ControlId;
}

// ── ControlFlags ──────────────────────────────────────────────────────────

/// Behavior flags carried by every control.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ControlFlags {
    /// Participates in focus traversal and can hold input focus.
    pub can_focus: bool,
    /// Drawn and hit-testable. Hiding a control hides its whole subtree.
    pub visible: bool,
    /// May be moved by pointer drags (consulted by the input dispatcher).
    pub draggable: bool,
    /// Anchored to the viewport: the bounding rect is in view space and the
    /// control is immune to panning and to parent auto-sizing.
    pub screen_relative: bool,
    /// Included when the subtree is exported for persistence.
    pub saveable: bool,
}

impl Default for ControlFlags {
    fn default() -> Self {
        Self {
            can_focus: false,
            visible: true,
            draggable: false,
            screen_relative: false,
            saveable: true,
        }
    }
}

// ── Control ───────────────────────────────────────────────────────────────

/// What a control is: a leaf, or a container with ordered children.
///
/// Child order doubles as z-order — later children draw on top and are
/// hit-tested first.
#[derive(Debug)]
pub enum ControlKind {
    Plain,
    Container {
        children: Vec<ControlId>,
        layout: Option<Layout>,
    },
}

/// Smallest positioned, sizable, focusable unit in the workspace tree.
///
/// The bounding rect is relative to the parent's content area; for a
/// control with no parent (or a `screen_relative` one) it is interpreted
/// directly in world (respectively view) space. All structural mutation
/// goes through [`crate::gui::Gui`], which owns every control.
#[derive(Debug)]
pub struct Control {
    pub(crate) parent: Option<ControlId>,
    pub(crate) rect: Rect,
    pub(crate) inset: Insets,
    pub(crate) flags: ControlFlags,
    pub(crate) focused: bool,
    pub(crate) kind: ControlKind,
}

impl Control {
    pub(crate) fn new(rect: Rect, flags: ControlFlags) -> Self {
        Self {
            parent: None,
            rect,
            inset: Insets::ZERO,
            flags,
            focused: false,
            kind: ControlKind::Plain,
        }
    }

    pub(crate) fn new_container(
        rect: Rect,
        inset: Insets,
        flags: ControlFlags,
        layout: Option<Layout>,
    ) -> Self {
        Self {
            parent: None,
            rect,
            inset,
            flags,
            focused: false,
            kind: ControlKind::Container {
                children: Vec::new(),
                layout,
            },
        }
    }

    /// Bounding rect in the parent's content space (view space when
    /// `screen_relative`, world space when unparented).
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Margin between the bounding rect and the content area.
    #[inline]
    pub fn inset(&self) -> Insets {
        self.inset
    }

    #[inline]
    pub fn flags(&self) -> ControlFlags {
        self.flags
    }

    #[inline]
    pub fn parent(&self) -> Option<ControlId> {
        self.parent
    }

    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self.kind, ControlKind::Container { .. })
    }

    /// Children in z-order. Empty for plain controls.
    pub fn children(&self) -> &[ControlId] {
        match &self.kind {
            ControlKind::Plain => &[],
            ControlKind::Container { children, .. } => children,
        }
    }

    pub fn layout(&self) -> Option<Layout> {
        match &self.kind {
            ControlKind::Plain => None,
            ControlKind::Container { layout, .. } => *layout,
        }
    }

    /// Whether this control currently holds global input focus.
    ///
    /// Maintained exclusively by the focus-transfer path; renderers read it
    /// to draw focus indication.
    #[inline]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The accept-focus check run on every transfer attempt.
    #[inline]
    pub(crate) fn accepts_focus(&self) -> bool {
        self.flags.can_focus && self.flags.visible
    }
}
