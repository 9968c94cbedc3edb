//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Hold the single long-lived session behind a process-wide lock.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - One session exists at a time; `session_start` replaces it wholesale.

use contactbook_core::db::{open_db, open_db_in_memory};
use contactbook_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ContactSource, FavoriteService, JsonContactSource, LoadPhase, Session, SqlitePrefsRepository,
};
use log::{error, warn};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

const SESSION_DB_FILE_NAME: &str = "contactbook_prefs.sqlite3";
static SESSION_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static SESSION: OnceLock<Mutex<Option<Session<SqlitePrefsRepository>>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One rendered contact list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRowItem {
    /// Stable contact id, echoed back on selection.
    pub id: String,
    /// Display name.
    pub name: String,
    /// First phone number display text; empty when the contact has none.
    pub phone: String,
    /// Favorite marker for this row.
    pub is_favorite: bool,
}

/// One labeled line of the detail overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLineItem {
    pub label: String,
    pub value: String,
}

/// Result envelope for `session_start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStartResponse {
    /// Whether the contact payload was ingested.
    pub ok: bool,
    /// Number of contacts in the session list.
    pub contact_count: u32,
    /// Favorite id restored from the previous launch; empty for none.
    pub favorite_id: String,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Result envelope for `contact_rows`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRowsResponse {
    /// True while the startup fetch has not completed.
    pub loading: bool,
    /// True when the startup fetch failed; `message` carries the reason.
    pub failed: bool,
    pub rows: Vec<ContactRowItem>,
    pub message: String,
}

/// Result envelope for `open_contact`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetailResponse {
    /// Whether the overlay is now shown for the requested contact.
    pub ok: bool,
    pub lines: Vec<DetailLineItem>,
    /// Label for the favorite toggle control (`Favorite` / `Unfavorite`).
    pub toggle_label: String,
    pub message: String,
}

/// Result envelope for `toggle_favorite`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleFavoriteResponse {
    pub ok: bool,
    /// Favorite id after the toggle; empty when cleared.
    pub favorite_id: String,
    pub message: String,
}

/// Starts (or restarts) the app session from a platform contact payload.
///
/// The Flutter side queries the device contact store (it owns the OS
/// permission flow) and hands the records over as one JSON array.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - A malformed payload yields `ok=false` and a failed session whose state
///   `contact_rows` keeps reporting.
#[flutter_rust_bridge::frb(sync)]
pub fn session_start(contacts_json: String) -> SessionStartResponse {
    let favorites = match build_favorite_service() {
        Ok(favorites) => favorites,
        Err(message) => {
            return SessionStartResponse {
                ok: false,
                contact_count: 0,
                favorite_id: String::new(),
                message,
            };
        }
    };

    let mut session = Session::new(favorites);
    let source = JsonContactSource::new(contacts_json);
    let response = match source.fetch_contacts() {
        Ok(contacts) => {
            session.finish_load(contacts);
            SessionStartResponse {
                ok: true,
                contact_count: session.contacts().len() as u32,
                favorite_id: session.favorite_id().to_string(),
                message: format!("Loaded {} contact(s).", session.contacts().len()),
            }
        }
        Err(err) => {
            let message = format!("session_start failed: {err}");
            session.fail_load(err.to_string());
            SessionStartResponse {
                ok: false,
                contact_count: 0,
                favorite_id: String::new(),
                message,
            }
        }
    };

    match session_cell().lock() {
        Ok(mut guard) => {
            *guard = Some(session);
            response
        }
        Err(_) => poisoned_response(),
    }
}

/// Returns the rendered contact list for the current session state.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics.
/// - Before `session_start` the response reports `loading=true` with no
///   rows, matching the startup loading indicator.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_rows() -> ContactRowsResponse {
    let guard = match session_cell().lock() {
        Ok(guard) => guard,
        Err(_) => {
            return ContactRowsResponse {
                loading: false,
                failed: true,
                rows: Vec::new(),
                message: "session lock poisoned".to_string(),
            };
        }
    };

    let session = match guard.as_ref() {
        Some(session) => session,
        None => {
            return ContactRowsResponse {
                loading: true,
                failed: false,
                rows: Vec::new(),
                message: "Loading contacts...".to_string(),
            };
        }
    };

    match session.phase() {
        LoadPhase::Loading => ContactRowsResponse {
            loading: true,
            failed: false,
            rows: Vec::new(),
            message: "Loading contacts...".to_string(),
        },
        LoadPhase::Failed(reason) => ContactRowsResponse {
            loading: false,
            failed: true,
            rows: Vec::new(),
            message: format!("Contact fetch failed: {reason}"),
        },
        LoadPhase::Ready => {
            let rows = session
                .rows()
                .into_iter()
                .map(|row| ContactRowItem {
                    id: row.id,
                    name: row.name,
                    phone: row.phone,
                    is_favorite: row.is_favorite,
                })
                .collect::<Vec<_>>();
            let message = format!("{} contact(s).", rows.len());
            ContactRowsResponse {
                loading: false,
                failed: false,
                rows,
                message,
            }
        }
    }
}

/// Row selection: opens the detail overlay for one contact.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics.
/// - Unknown ids and calls before the list is ready return `ok=false`
///   without changing overlay state.
#[flutter_rust_bridge::frb(sync)]
pub fn open_contact(contact_id: String) -> ContactDetailResponse {
    let mut guard = match session_cell().lock() {
        Ok(guard) => guard,
        Err(_) => return detail_failure("session lock poisoned"),
    };
    let session = match guard.as_mut() {
        Some(session) => session,
        None => return detail_failure("session not started"),
    };

    if !session.select_contact(&contact_id) {
        return detail_failure(format!("contact `{contact_id}` is not selectable"));
    }

    let lines = session
        .detail()
        .unwrap_or_default()
        .into_iter()
        .map(|line| DetailLineItem {
            label: line.label,
            value: line.value,
        })
        .collect();
    ContactDetailResponse {
        ok: true,
        lines,
        toggle_label: session.detail_toggle_label().unwrap_or("Favorite").to_string(),
        message: String::new(),
    }
}

/// Dismiss/back: hides the detail overlay.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics; dismissing an already hidden overlay is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn dismiss_contact() {
    match session_cell().lock() {
        Ok(mut guard) => {
            if let Some(session) = guard.as_mut() {
                session.dismiss_overlay();
            }
        }
        Err(_) => error!("event=overlay_dismiss module=ffi status=error error=lock_poisoned"),
    }
}

/// Toggles favorite state for one contact and persists the result.
///
/// # FFI contract
/// - Sync call, DB-backed write-through.
/// - Never panics.
/// - Returns the favorite id after the toggle; empty when cleared.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_favorite(contact_id: String) -> ToggleFavoriteResponse {
    let mut guard = match session_cell().lock() {
        Ok(guard) => guard,
        Err(_) => {
            return ToggleFavoriteResponse {
                ok: false,
                favorite_id: String::new(),
                message: "session lock poisoned".to_string(),
            };
        }
    };
    let session = match guard.as_mut() {
        Some(session) => session,
        None => {
            return ToggleFavoriteResponse {
                ok: false,
                favorite_id: String::new(),
                message: "session not started".to_string(),
            };
        }
    };

    let favorite_id = session.toggle_favorite(&contact_id).to_string();
    ToggleFavoriteResponse {
        ok: true,
        favorite_id,
        message: String::new(),
    }
}

fn session_cell() -> &'static Mutex<Option<Session<SqlitePrefsRepository>>> {
    SESSION.get_or_init(|| Mutex::new(None))
}

fn resolve_session_db_path() -> PathBuf {
    SESSION_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("CONTACTBOOK_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(SESSION_DB_FILE_NAME)
        })
        .clone()
}

/// Builds the favorite service over the prefs database.
///
/// An unreadable on-disk store is non-fatal: the session falls back to an
/// in-memory store so the app still renders, losing only persistence.
fn build_favorite_service() -> Result<FavoriteService<SqlitePrefsRepository>, String> {
    let db_path = resolve_session_db_path();
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            warn!(
                "event=session_db_open module=ffi status=error error_code=prefs_db_unavailable error={err}"
            );
            open_db_in_memory().map_err(|err| format!("prefs DB open failed: {err}"))?
        }
    };
    let repo = SqlitePrefsRepository::try_new(conn)
        .map_err(|err| format!("prefs repo init failed: {err}"))?;
    Ok(FavoriteService::new(repo))
}

fn detail_failure(message: impl Into<String>) -> ContactDetailResponse {
    ContactDetailResponse {
        ok: false,
        lines: Vec::new(),
        toggle_label: "Favorite".to_string(),
        message: message.into(),
    }
}

fn poisoned_response() -> SessionStartResponse {
    SessionStartResponse {
        ok: false,
        contact_count: 0,
        favorite_id: String::new(),
        message: "session lock poisoned".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        contact_rows, core_version, dismiss_contact, init_logging, open_contact, ping,
        session_start, toggle_favorite,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    // The session is process-global, so the full surface is exercised as one
    // sequential flow instead of parallel per-call tests.
    #[test]
    fn session_surface_flow() {
        // Fresh db per process so favorites from earlier runs cannot leak in.
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system time should be after unix epoch")
            .as_nanos();
        let db_path = std::env::temp_dir().join(format!(
            "contactbook-ffi-test-{}-{nanos}.sqlite3",
            std::process::id()
        ));
        std::env::set_var("CONTACTBOOK_DB_PATH", &db_path);

        let bad = session_start("not json".to_string());
        assert!(!bad.ok);
        let failed_rows = contact_rows();
        assert!(failed_rows.failed);
        assert!(!failed_rows.loading);
        assert!(failed_rows.rows.is_empty());

        let payload = serde_json::json!([
            {"id": "1", "name": "Ann", "phoneNumbers": [{"number": "555"}]},
            {"id": "2", "name": "Bo"}
        ])
        .to_string();
        let started = session_start(payload);
        assert!(started.ok, "{}", started.message);
        assert_eq!(started.contact_count, 2);

        let listed = contact_rows();
        assert!(!listed.loading);
        assert!(!listed.failed);
        assert_eq!(listed.rows.len(), 2);
        assert_eq!(listed.rows[0].name, "Ann");
        assert_eq!(listed.rows[0].phone, "555");
        assert_eq!(listed.rows[1].phone, "");

        let missing = open_contact("99".to_string());
        assert!(!missing.ok);

        let detail = open_contact("1".to_string());
        assert!(detail.ok, "{}", detail.message);
        assert!(detail
            .lines
            .iter()
            .any(|line| line.label == "name" && line.value == "Ann"));
        assert_eq!(detail.toggle_label, "Favorite");

        let toggled = toggle_favorite("1".to_string());
        assert!(toggled.ok);
        assert_eq!(toggled.favorite_id, "1");

        let relabeled = open_contact("1".to_string());
        assert_eq!(relabeled.toggle_label, "Unfavorite");

        dismiss_contact();
        let rows_after = contact_rows();
        assert!(rows_after.rows[0].is_favorite);
        assert!(!rows_after.rows[1].is_favorite);

        let cleared = toggle_favorite("1".to_string());
        assert!(cleared.ok);
        assert_eq!(cleared.favorite_id, "");
    }
}
