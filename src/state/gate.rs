//! Modal/Focus Gate.
//!
//! Blocking overlays and the home screen's text input are modeled as leases
//! rather than free-standing booleans. A lease is granted to exactly one
//! holder and remembers the screen it belongs to, so the controller can
//! revoke it when that screen stops being active. Releasing consumes the
//! lease; releasing one that was already revoked does nothing.

use super::Screen;
use crate::error::{NavError, Result};
use tracing::{debug, warn};

/// Proof of holding the modal gate.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a modal lease without releasing it keeps the modal gate closed"]
pub struct ModalLease {
    id: u64,
    owner: Screen,
}

impl ModalLease {
    /// Screen that opened the modal.
    pub fn owner(&self) -> Screen {
        self.owner
    }
}

/// Proof of holding input focus.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a focus lease without releasing it keeps the input focused"]
pub struct FocusLease {
    id: u64,
}

#[derive(Debug, Clone, Copy)]
struct Holder {
    id: u64,
    owner: Screen,
}

/// Aggregated gate flags for the rendering layer.
#[derive(Debug, Clone, Default)]
pub struct GateState {
    modal: Option<Holder>,
    focus: Option<Holder>,
    next_id: u64,
}

impl GateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a blocking overlay is open.
    pub fn modal_open(&self) -> bool {
        self.modal.is_some()
    }

    /// Whether the home text input holds focus.
    pub fn input_focused(&self) -> bool {
        self.focus.is_some()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub(crate) fn acquire_modal(&mut self, owner: Screen) -> Result<ModalLease> {
        if let Some(holder) = self.modal {
            warn!(
                "modal requested on {} while one is open on {}",
                owner, holder.owner
            );
            return Err(NavError::ModalAlreadyHeld {
                holder: holder.owner,
            });
        }
        let id = self.next_id();
        self.modal = Some(Holder { id, owner });
        debug!("modal gate closed by {}", owner);
        Ok(ModalLease { id, owner })
    }

    /// Release a modal lease. Returns false when the lease was already revoked.
    pub(crate) fn release_modal(&mut self, lease: ModalLease) -> bool {
        match self.modal {
            Some(holder) if holder.id == lease.id => {
                self.modal = None;
                debug!("modal gate opened by {}", lease.owner);
                true
            }
            _ => false,
        }
    }

    /// Focus moves to the new holder; any previous focus lease goes stale.
    pub(crate) fn acquire_focus(&mut self, active: Screen) -> Result<FocusLease> {
        if active != Screen::Home {
            warn!("input focus requested on {}", active);
            return Err(NavError::FocusOutOfScope { active });
        }
        let id = self.next_id();
        self.focus = Some(Holder { id, owner: active });
        Ok(FocusLease { id })
    }

    pub(crate) fn release_focus(&mut self, lease: FocusLease) -> bool {
        match self.focus {
            Some(holder) if holder.id == lease.id => {
                self.focus = None;
                true
            }
            _ => false,
        }
    }

    /// Revoke every lease owned by `screen`, which is no longer active.
    pub(crate) fn revoke_owned_by(&mut self, screen: Screen) {
        if self.modal.is_some_and(|h| h.owner == screen) {
            debug!("modal lease of {} revoked", screen);
            self.modal = None;
        }
        if self.focus.is_some_and(|h| h.owner == screen) {
            debug!("focus lease of {} revoked", screen);
            self.focus = None;
        }
    }
}
