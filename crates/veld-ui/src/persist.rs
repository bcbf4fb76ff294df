//! Persistence boundary.
//!
//! The engine does not own a file format; it only defines the per-node
//! record an external serializer consumes and produces. Each control
//! round-trips its bounding rect, inset, flags, and a type tag; containers
//! additionally round-trip their ordered children and layout-strategy name.
//! Subtrees marked `saveable: false` are left out of the export entirely.

use serde::{Deserialize, Serialize};
use veld_engine::coords::{Insets, Rect};

use crate::control::{ControlFlags, ControlId, ControlKind};
use crate::error::TreeError;
use crate::gui::Gui;
use crate::layout::Layout;

/// Stable type tag distinguishing the two control kinds on disk.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavedKind {
    Control,
    Container,
}

/// Serializable snapshot of one control and its saveable descendants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedControl {
    #[serde(rename = "type")]
    pub kind: SavedKind,
    pub rect: Rect,
    pub inset: Insets,
    pub flags: ControlFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SavedControl>,
}

impl Gui {
    /// Export `id` and its saveable descendants.
    ///
    /// Returns `None` when the control itself is marked `saveable: false`.
    pub fn save_control(&self, id: ControlId) -> Option<SavedControl> {
        let node = self.node(id);
        if !node.flags.saveable {
            return None;
        }
        let (kind, layout, children) = match &node.kind {
            ControlKind::Plain => (SavedKind::Control, None, Vec::new()),
            ControlKind::Container { children, layout } => (
                SavedKind::Container,
                *layout,
                children
                    .iter()
                    .filter_map(|&child| self.save_control(child))
                    .collect(),
            ),
        };
        Some(SavedControl {
            kind,
            rect: node.rect,
            inset: node.inset,
            flags: node.flags,
            layout,
            children,
        })
    }

    /// Rebuild a saved subtree, optionally attached to `parent`.
    ///
    /// Children re-attach one by one, so the usual sizing triggers run; a
    /// snapshot taken from a settled tree restores to the same settled
    /// geometry.
    pub fn restore_control(
        &mut self,
        parent: Option<ControlId>,
        saved: &SavedControl,
    ) -> Result<ControlId, TreeError> {
        let id = match saved.kind {
            SavedKind::Control => self.create_control(parent, saved.rect, saved.flags)?,
            SavedKind::Container => {
                self.create_container(parent, saved.rect, saved.inset, saved.flags, saved.layout)?
            }
        };
        if saved.kind == SavedKind::Control && saved.inset != Insets::ZERO {
            self.node_mut(id).inset = saved.inset;
        }
        for child in &saved.children {
            self.restore_control(Some(id), child)?;
        }
        Ok(id)
    }
}
