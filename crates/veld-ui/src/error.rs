use std::fmt;

/// Tree-structure misuse reported by [`crate::gui::Gui`] mutators.
///
/// These are recoverable precondition failures: the operation is aborted and
/// the tree is left untouched. Operating on a *destroyed* control is not an
/// error value — it is a programmer error and panics at the arena lookup.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TreeError {
    /// The attach target is a plain control, not a container.
    NotAContainer,
    /// The control already has a parent.
    AlreadyAttached,
    /// The control is not a child of the given container.
    NotAChild,
    /// The control has no parent.
    NotAttached,
    /// Attaching would make a control its own ancestor.
    WouldCycle,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            TreeError::NotAContainer => "target control is not a container",
            TreeError::AlreadyAttached => "control already has a parent",
            TreeError::NotAChild => "control is not a child of this container",
            TreeError::NotAttached => "control has no parent",
            TreeError::WouldCycle => "attachment would create a cycle",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for TreeError {}

/// Focus-ring misuse reported by the ring API on [`crate::gui::Gui`].
///
/// Distinct from focus-transfer *failure* (a control declining focus), which
/// is a plain `bool` so ring traversal can skip and try the next candidate.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FocusError {
    /// The control is already a member of the ring.
    DuplicateMember,
    /// The control is not a member of the ring.
    NotAMember,
    /// The base focus ring can never be popped.
    BaseRing,
}

impl fmt::Display for FocusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            FocusError::DuplicateMember => "control is already a ring member",
            FocusError::NotAMember => "control is not a ring member",
            FocusError::BaseRing => "the base focus ring cannot be popped",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for FocusError {}
