//! Top-level application session state.
//!
//! # Responsibility
//! - Own the contact list, load phase, overlay state and favorite manager
//!   as one explicit struct (no global mutable state).
//! - Enforce the overlay state machine: Hidden -> Shown on row selection,
//!   Shown -> Hidden on dismiss/back.
//!
//! # Invariants
//! - The favorite id is only restored after the contact fetch completes.
//! - Overlay can only show an id present in the current contact list.
//! - All mutation happens on the single UI thread, one call at a time.

use crate::model::contact::{Contact, ContactId};
use crate::repo::prefs_repo::PrefsRepository;
use crate::service::favorite_service::FavoriteService;
use crate::view::detail::{detail_lines, toggle_label, DetailLine};
use crate::view::list::{contact_rows, ContactRow};
use log::{info, warn};

/// Contact fetch lifecycle.
///
/// A failed fetch is surfaced as its own state instead of leaving the
/// loading indicator up forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    /// Fetch in flight; the UI shows a loading indicator.
    Loading,
    /// Contacts arrived; list is renderable.
    Ready,
    /// Fetch failed; `reason` is diagnostic text, not user copy.
    Failed(String),
}

/// Detail overlay visibility. No other states exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Hidden,
    /// Overlay shown for the recorded contact id.
    Shown(ContactId),
}

/// Session state owned by the top-level application component.
pub struct Session<R: PrefsRepository> {
    phase: LoadPhase,
    contacts: Vec<Contact>,
    overlay: Overlay,
    favorites: FavoriteService<R>,
}

impl<R: PrefsRepository> Session<R> {
    /// Creates a session in the loading phase with no contacts yet.
    pub fn new(favorites: FavoriteService<R>) -> Self {
        Self {
            phase: LoadPhase::Loading,
            contacts: Vec::new(),
            overlay: Overlay::Hidden,
            favorites,
        }
    }

    /// Completes the startup fetch and restores the persisted favorite.
    ///
    /// The favorite load deliberately runs after the fetch completion, the
    /// defined ordering of the two startup operations.
    pub fn finish_load(&mut self, contacts: Vec<Contact>) {
        info!(
            "event=session_load module=session status=ok contact_count={}",
            contacts.len()
        );
        self.contacts = contacts;
        self.phase = LoadPhase::Ready;
        self.favorites.load();
    }

    /// Records a failed startup fetch.
    pub fn fail_load(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!("event=session_load module=session status=error error={reason}");
        self.phase = LoadPhase::Failed(reason);
    }

    /// Row selection: shows the overlay for `contact_id`.
    ///
    /// Returns whether the overlay transitioned to Shown. Selection of an
    /// unknown id, or any selection before the list is ready, is ignored.
    pub fn select_contact(&mut self, contact_id: &str) -> bool {
        if self.phase != LoadPhase::Ready {
            return false;
        }
        if !self.contacts.iter().any(|contact| contact.id == contact_id) {
            warn!("event=contact_select module=session status=ignored reason=unknown_id");
            return false;
        }
        self.overlay = Overlay::Shown(contact_id.to_string());
        true
    }

    /// Dismiss/back: hides the overlay and drops the selection.
    pub fn dismiss_overlay(&mut self) {
        self.overlay = Overlay::Hidden;
    }

    /// Toggles favorite state of the overlay's active contact.
    ///
    /// No-op when the overlay is hidden. Returns the resulting favorite id
    /// when a toggle happened.
    pub fn toggle_active_favorite(&mut self) -> Option<&str> {
        let active_id = match &self.overlay {
            Overlay::Shown(id) => id.clone(),
            Overlay::Hidden => return None,
        };
        Some(self.favorites.toggle(&active_id))
    }

    /// Toggles favorite state for an explicit contact id.
    ///
    /// Returns the resulting favorite id.
    pub fn toggle_favorite(&mut self, contact_id: &str) -> &str {
        self.favorites.toggle(contact_id)
    }

    /// Rendered list rows for the current state.
    pub fn rows(&self) -> Vec<ContactRow> {
        contact_rows(&self.contacts, self.favorites.favorite_id())
    }

    /// Rendered detail lines for the active contact, when the overlay is
    /// shown.
    pub fn detail(&self) -> Option<Vec<DetailLine>> {
        self.active_contact().map(detail_lines)
    }

    /// Toggle control label for the active contact, when the overlay is
    /// shown.
    pub fn detail_toggle_label(&self) -> Option<&'static str> {
        self.active_contact()
            .map(|contact| toggle_label(&contact.id, self.favorites.favorite_id()))
    }

    /// The contact the overlay currently shows, if any.
    pub fn active_contact(&self) -> Option<&Contact> {
        match &self.overlay {
            Overlay::Shown(id) => self.contacts.iter().find(|contact| &contact.id == id),
            Overlay::Hidden => None,
        }
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn favorite_id(&self) -> &str {
        self.favorites.favorite_id()
    }
}
