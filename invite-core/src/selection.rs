//! Selection state machine.
//!
//! ```text
//!            select(id)
//!   Idle ─────────────────▶ Selected(id) ──┐ select(other)
//!    ▲                           │  ◀──────┘
//!    └──────── deselect() ───────┘
//! ```
//!
//! The active marker lives on the overlays themselves; the controller keeps it on
//! exactly one overlay (or none).

use serde::{Deserialize, Serialize};

use crate::{EditorError, EditorResult, OverlayId, OverlayRegistry};

/// Current selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "overlay", rename_all = "lowercase")]
pub enum Selection {
    /// No active overlay.
    #[default]
    Idle,
    /// Exactly one active overlay.
    Selected(OverlayId),
}

/// Owns the selection and keeps overlay markers consistent with it.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: Selection,
}

impl SelectionController {
    /// Create an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> Selection {
        self.state
    }

    /// The active overlay, if any.
    #[must_use]
    pub const fn active(&self) -> Option<OverlayId> {
        match self.state {
            Selection::Idle => None,
            Selection::Selected(id) => Some(id),
        }
    }

    /// Make `id` the only active overlay.
    ///
    /// Every overlay leaves edit mode; the target resumes editing if it was editing.
    ///
    /// # Errors
    ///
    /// Returns an error if the overlay is not in the registry. The selection is
    /// left unchanged in that case.
    pub fn select(&mut self, registry: &mut OverlayRegistry, id: OverlayId) -> EditorResult<()> {
        let was_editing = registry
            .get(id)
            .map(|o| o.editing)
            .ok_or_else(|| EditorError::OverlayNotFound(id.to_string()))?;

        for overlay in registry.iter_mut() {
            let is_target = overlay.id == id;
            overlay.active = is_target;
            overlay.editing = is_target && was_editing;
        }
        self.state = Selection::Selected(id);
        tracing::debug!("Selected overlay {id}");
        Ok(())
    }

    /// Clear the selection and every overlay's marker and edit mode.
    pub fn deselect(&mut self, registry: &mut OverlayRegistry) {
        for overlay in registry.iter_mut() {
            overlay.active = false;
            overlay.editing = false;
        }
        if let Selection::Selected(id) = self.state {
            tracing::debug!("Deselected overlay {id}");
        }
        self.state = Selection::Idle;
    }

    /// Drop the selection if it points at `id` (used after `id` was removed).
    ///
    /// Returns whether the selection changed.
    pub fn forget(&mut self, id: OverlayId) -> bool {
        if self.active() == Some(id) {
            self.state = Selection::Idle;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cards, StyleOverrides};

    fn registry_with(n: usize) -> (OverlayRegistry, Vec<OverlayId>) {
        let card = Cards::new(1).id(0).expect("card");
        let mut registry = OverlayRegistry::default();
        let ids = (0..n)
            .map(|i| registry.create(format!("overlay {i}"), card, &StyleOverrides::default()))
            .collect();
        (registry, ids)
    }

    fn marked(registry: &OverlayRegistry) -> usize {
        registry.iter().filter(|o| o.active).count()
    }

    #[test]
    fn select_marks_exactly_one() {
        let (mut registry, ids) = registry_with(3);
        let mut selection = SelectionController::new();

        selection.select(&mut registry, ids[0]).expect("select");
        selection.select(&mut registry, ids[2]).expect("select");

        assert_eq!(marked(&registry), 1);
        assert_eq!(selection.active(), Some(ids[2]));
        assert!(registry.get(ids[2]).is_some_and(|o| o.active));
    }

    #[test]
    fn deselect_clears_all_markers() {
        let (mut registry, ids) = registry_with(2);
        let mut selection = SelectionController::new();
        selection.select(&mut registry, ids[1]).expect("select");

        selection.deselect(&mut registry);
        assert_eq!(marked(&registry), 0);
        assert_eq!(selection.state(), Selection::Idle);
    }

    #[test]
    fn select_keeps_target_editing_but_stops_others() {
        let (mut registry, ids) = registry_with(2);
        let mut selection = SelectionController::new();
        for o in registry.iter_mut() {
            o.editing = true;
        }

        selection.select(&mut registry, ids[0]).expect("select");
        assert!(registry.get(ids[0]).is_some_and(|o| o.editing));
        assert!(registry.get(ids[1]).is_some_and(|o| !o.editing));
    }

    #[test]
    fn select_unknown_leaves_state() {
        let (mut registry, ids) = registry_with(1);
        let mut selection = SelectionController::new();
        selection.select(&mut registry, ids[0]).expect("select");

        let err = selection.select(&mut registry, OverlayId::new());
        assert!(err.is_err());
        assert_eq!(selection.active(), Some(ids[0]));
        assert_eq!(marked(&registry), 1);
    }

    #[test]
    fn forget_only_matches_active() {
        let (mut registry, ids) = registry_with(2);
        let mut selection = SelectionController::new();
        selection.select(&mut registry, ids[0]).expect("select");

        assert!(!selection.forget(ids[1]));
        assert!(selection.forget(ids[0]));
        assert_eq!(selection.active(), None);
    }
}
