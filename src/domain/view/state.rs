// SPDX-License-Identifier: MPL-2.0
//! Lifecycle state of one preview view.

/// Lifecycle phase of a preview.
///
/// `Constructing → Active ⇄ Inactive → Disposed`; `Disposed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewPhase {
    #[default]
    Constructing,
    Active,
    Inactive,
    Disposed,
}

/// View state derived from surface events.
///
/// Only the coordinator mutates it; outside code can read `active` and
/// `surface_disposed` but cannot set them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    phase: PreviewPhase,
}

impl ViewState {
    #[must_use]
    pub fn phase(self) -> PreviewPhase {
        self.phase
    }

    /// Whether this view is the focused one among the open previews.
    #[must_use]
    pub fn is_active(self) -> bool {
        self.phase == PreviewPhase::Active
    }

    #[must_use]
    pub fn is_surface_disposed(self) -> bool {
        self.phase == PreviewPhase::Disposed
    }

    /// Applies the surface's current focus flag.
    ///
    /// Returns the new phase, or `None` once disposed.
    pub(crate) fn reconcile(&mut self, surface_active: bool) -> Option<PreviewPhase> {
        if self.is_surface_disposed() {
            return None;
        }
        self.phase = if surface_active {
            PreviewPhase::Active
        } else {
            PreviewPhase::Inactive
        };
        Some(self.phase)
    }

    /// Forces the terminal phase. Returns `false` if it was already disposed.
    pub(crate) fn mark_disposed(&mut self) -> bool {
        if self.is_surface_disposed() {
            return false;
        }
        self.phase = PreviewPhase::Disposed;
        true
    }
}
