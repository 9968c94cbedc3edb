//! Core domain logic for Contactbook.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;
pub mod source;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{Contact, ContactId, ContactValidationError, FieldNode, PhoneNumber};
pub use repo::prefs_repo::{PrefsRepository, RepoError, RepoResult, SqlitePrefsRepository};
pub use service::favorite_service::{FavoriteService, FAVORITE_ID_KEY};
pub use session::{LoadPhase, Overlay, Session};
pub use source::{ContactSource, JsonContactSource, SourceError};
pub use view::detail::{detail_lines, toggle_label, DetailLine};
pub use view::list::{contact_rows, ContactRow};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
