//! Favorite state manager.
//!
//! # Responsibility
//! - Hold the in-memory favorite contact id for the session.
//! - Mirror every change to the preference store under one fixed key.
//!
//! # Invariants
//! - At most one contact is favorite at a time; empty means none.
//! - Store failures never propagate: reads fall back to "no favorite",
//!   writes keep the in-memory change (known, accepted inconsistency).
//! - Single UI thread drives at most one toggle at a time.

use crate::model::contact::ContactId;
use crate::repo::prefs_repo::PrefsRepository;
use log::{error, info};

/// Fixed preference key holding the favorite contact id.
pub const FAVORITE_ID_KEY: &str = "favorite_contact_id";

/// Use-case service owning the favorite id and its write-through.
pub struct FavoriteService<R: PrefsRepository> {
    repo: R,
    favorite_id: ContactId,
}

impl<R: PrefsRepository> FavoriteService<R> {
    /// Creates a service with no favorite restored yet.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            favorite_id: ContactId::new(),
        }
    }

    /// Restores the favorite id persisted by a previous session.
    ///
    /// Absent key leaves the default (empty). A store read failure is
    /// logged and treated as "no favorite" — never fatal.
    ///
    /// Returns the effective favorite id after the load.
    pub fn load(&mut self) -> &str {
        match self.repo.get_pref(FAVORITE_ID_KEY) {
            Ok(Some(value)) => {
                self.favorite_id = value;
                info!(
                    "event=favorite_load module=favorite status=ok restored={}",
                    !self.favorite_id.is_empty()
                );
            }
            Ok(None) => {
                info!("event=favorite_load module=favorite status=ok restored=false");
            }
            Err(err) => {
                error!(
                    "event=favorite_load module=favorite status=error error_code=prefs_read_failed error={err}"
                );
            }
        }
        &self.favorite_id
    }

    /// Toggles favorite state for `contact_id`.
    ///
    /// Equal to the current favorite → cleared; otherwise `contact_id`
    /// becomes the favorite (displacing any previous one). The new value is
    /// written through to the store; a write failure is logged and the
    /// in-memory change is kept.
    ///
    /// Returns the resulting favorite id.
    pub fn toggle(&mut self, contact_id: &str) -> &str {
        if self.favorite_id == contact_id {
            self.favorite_id.clear();
        } else {
            self.favorite_id = contact_id.to_string();
        }

        match self.repo.set_pref(FAVORITE_ID_KEY, &self.favorite_id) {
            Ok(()) => {
                info!(
                    "event=favorite_toggle module=favorite status=ok cleared={}",
                    self.favorite_id.is_empty()
                );
            }
            Err(err) => {
                error!(
                    "event=favorite_toggle module=favorite status=error error_code=prefs_write_failed error={err}"
                );
            }
        }

        &self.favorite_id
    }

    /// Current favorite id; empty when no contact is favorite.
    pub fn favorite_id(&self) -> &str {
        &self.favorite_id
    }

    /// Whether `contact_id` is the current favorite.
    pub fn is_favorite(&self, contact_id: &str) -> bool {
        !self.favorite_id.is_empty() && self.favorite_id == contact_id
    }
}
