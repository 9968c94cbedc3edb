//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `contactbook_core` linkage.
//! - Render a contacts JSON file as list rows for quick local checks.

use contactbook_core::db::open_db_in_memory;
use contactbook_core::{
    ContactSource, FavoriteService, JsonContactSource, Session, SqlitePrefsRepository,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Why: keep a tiny probe to validate core crate wiring independently
    // from the Flutter/FFI runtime setup.
    println!("contactbook_core ping={}", contactbook_core::ping());
    println!("contactbook_core version={}", contactbook_core::core_version());

    let Some(path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    match render_rows(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn render_rows(path: &str) -> Result<(), String> {
    let payload =
        std::fs::read_to_string(path).map_err(|err| format!("cannot read `{path}`: {err}"))?;
    let contacts = JsonContactSource::new(payload)
        .fetch_contacts()
        .map_err(|err| format!("cannot parse `{path}`: {err}"))?;

    let conn = open_db_in_memory().map_err(|err| format!("prefs db open failed: {err}"))?;
    let repo =
        SqlitePrefsRepository::try_new(conn).map_err(|err| format!("prefs repo failed: {err}"))?;
    let mut session = Session::new(FavoriteService::new(repo));
    session.finish_load(contacts);

    for row in session.rows() {
        let marker = if row.is_favorite { " [favorite]" } else { "" };
        println!("{}  {}{marker}", row.name, row.phone);
    }
    Ok(())
}
