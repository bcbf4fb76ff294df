//! Focus rings and the stacked focus-scope model.
//!
//! A [`FocusRing`] is the ordered, cyclic set of focusable controls within
//! one scope (a container): Tab cycles forward, Shift-Tab backward. Rings
//! stack on the [`Gui`]: entering a sub-scope pushes a ring and makes it
//! authoritative for traversal; leaving pops it and re-affirms the exposed
//! ring's recorded member, so focus indication and input routing always
//! follow the active ring.
//!
//! Every transfer is mediated by the root coordinator: the old holder is
//! blurred, the candidate runs its accept check (`can_focus && visible`),
//! and only on acceptance does any state change. Acceptance failure is a
//! plain `bool` — ring traversal uses it to skip members transparently.

use log::debug;

use crate::control::ControlId;
use crate::error::FocusError;
use crate::gui::Gui;

// ── FocusRing ─────────────────────────────────────────────────────────────

/// Ordered, cyclic set of focusable controls scoped to one container.
#[derive(Debug, Clone)]
pub struct FocusRing {
    pub(crate) container: ControlId,
    pub(crate) members: Vec<ControlId>,
    pub(crate) focused: Option<ControlId>,
}

impl FocusRing {
    /// A new, empty ring scoped to `container`. Push it with
    /// [`Gui::push_focus_ring`] and populate it through [`Gui::ring_add`].
    pub fn new(container: ControlId) -> Self {
        Self {
            container,
            members: Vec::new(),
            focused: None,
        }
    }

    /// The container this ring is scoped to.
    #[inline]
    pub fn container(&self) -> ControlId {
        self.container
    }

    /// Members in traversal order.
    #[inline]
    pub fn members(&self) -> &[ControlId] {
        &self.members
    }

    /// The ring's recorded focus holder. Equal to the global focus whenever
    /// this ring is the active one.
    #[inline]
    pub fn focused(&self) -> Option<ControlId> {
        self.focused
    }

    #[inline]
    pub fn contains(&self, id: ControlId) -> bool {
        self.members.contains(&id)
    }
}

// ── focus operations ──────────────────────────────────────────────────────

impl Gui {
    /// The authoritative (top-of-stack) ring.
    pub fn active_ring(&self) -> &FocusRing {
        self.focus_stack.last().expect("focus stack is never empty")
    }

    fn active_ring_mut(&mut self) -> &mut FocusRing {
        self.focus_stack
            .last_mut()
            .expect("focus stack is never empty")
    }

    /// Enter a focus sub-scope: `ring` becomes authoritative for traversal.
    ///
    /// Pushing by itself moves no focus; populate the ring or call
    /// [`focus`](Self::focus) afterwards.
    pub fn push_focus_ring(&mut self, ring: FocusRing) {
        let _ = self.node(ring.container);
        debug!("push focus ring (scope {:?})", ring.container);
        self.focus_stack.push(ring);
    }

    /// Leave the current focus sub-scope.
    ///
    /// The newly exposed ring's recorded member is re-affirmed as the global
    /// focus holder, re-running its accept check; if it no longer accepts,
    /// focus clears instead.
    pub fn pop_focus_ring(&mut self) -> Result<FocusRing, FocusError> {
        if self.focus_stack.len() == 1 {
            return Err(FocusError::BaseRing);
        }
        let popped = self.focus_stack.pop().expect("focus stack is never empty");
        debug!("pop focus ring (scope {:?})", popped.container);
        let recorded = self.active_ring().focused;
        match recorded {
            Some(id) if self.node(id).accepts_focus() => {
                self.transfer_focus(Some(id));
            }
            _ => {
                self.transfer_focus(None);
                self.active_ring_mut().focused = None;
            }
        }
        Ok(popped)
    }

    /// Append `control` to the active ring.
    ///
    /// If the ring had no focused member, or `set_focus` is given, a focus
    /// transfer is attempted; the returned `bool` reports whether `control`
    /// accepted.
    pub fn ring_add(&mut self, control: ControlId, set_focus: bool) -> Result<bool, FocusError> {
        let _ = self.node(control);
        let ring = self.active_ring_mut();
        if ring.members.contains(&control) {
            return Err(FocusError::DuplicateMember);
        }
        let try_focus = set_focus || ring.focused.is_none();
        ring.members.push(control);
        if try_focus {
            Ok(self.transfer_focus(Some(control)))
        } else {
            Ok(false)
        }
    }

    /// Remove `control` from the active ring.
    ///
    /// If it was the ring's focus holder the pointer clears — no other
    /// member is focused automatically.
    pub fn ring_remove(&mut self, control: ControlId) -> Result<(), FocusError> {
        let ring = self.active_ring_mut();
        let Some(pos) = ring.members.iter().position(|&m| m == control) else {
            return Err(FocusError::NotAMember);
        };
        ring.members.remove(pos);
        let was_focused = ring.focused == Some(control);
        if was_focused {
            ring.focused = None;
        }
        if was_focused && self.global_focus == Some(control) {
            self.transfer_focus(None);
        }
        Ok(())
    }

    /// Focus a member of the active ring.
    ///
    /// Returns `Ok(true)` on acceptance, `Ok(false)` if the control declined
    /// (nothing changes), `Err` if it is not a member at all.
    pub fn focus(&mut self, control: ControlId) -> Result<bool, FocusError> {
        if !self.active_ring().contains(control) {
            return Err(FocusError::NotAMember);
        }
        Ok(self.transfer_focus(Some(control)))
    }

    /// Cycle focus forward through the active ring, skipping members that
    /// decline. Returns `false` when a full cycle finds no taker.
    pub fn focus_next(&mut self) -> bool {
        self.advance(1)
    }

    /// Cycle focus backward through the active ring.
    pub fn focus_previous(&mut self) -> bool {
        self.advance(-1)
    }

    fn advance(&mut self, dir: isize) -> bool {
        let ring = self.active_ring();
        let n = ring.members.len() as isize;
        if n == 0 {
            return false;
        }
        let start = match ring
            .focused
            .and_then(|f| ring.members.iter().position(|&m| m == f))
        {
            Some(i) => (i as isize + dir).rem_euclid(n),
            None => 0,
        };
        let members = ring.members.clone();
        for step in 0..n {
            let idx = (start + dir * step).rem_euclid(n) as usize;
            if self.transfer_focus(Some(members[idx])) {
                return true;
            }
        }
        false
    }

    /// Give focus to (or take it from) `control`, bypassing ring membership.
    ///
    /// Used by the input dispatcher for click-to-focus. Returns whether the
    /// transfer happened.
    pub fn set_focus(&mut self, control: ControlId, focused: bool) -> bool {
        if focused {
            self.transfer_focus(Some(control))
        } else if self.global_focus == Some(control) {
            self.transfer_focus(None)
        } else {
            false
        }
    }

    /// The single control holding input focus across the whole tree.
    #[inline]
    pub fn focused(&self) -> Option<ControlId> {
        self.global_focus
    }

    /// Blur whatever holds focus.
    pub fn clear_focus(&mut self) {
        self.transfer_focus(None);
    }

    /// The one true focus transfer: blur the old holder, run the
    /// candidate's accept check, update the global pointer, the per-control
    /// indication flags, and the active ring's recorded member.
    ///
    /// On a declined transfer nothing changes and `false` is returned.
    pub(crate) fn transfer_focus(&mut self, to: Option<ControlId>) -> bool {
        if let Some(id) = to {
            if !self.node(id).accepts_focus() {
                return false;
            }
        }
        let old = self.global_focus;
        if let Some(old_id) = old {
            if let Some(node) = self.controls.get_mut(old_id) {
                node.focused = false;
            }
        }
        if let Some(id) = to {
            self.node_mut(id).focused = true;
        }
        self.global_focus = to;
        let recorded = to.filter(|&id| self.active_ring().contains(id));
        self.active_ring_mut().focused = recorded;
        if old != to {
            debug!("focus {old:?} -> {to:?}");
        }
        true
    }
}
