use contactbook_core::db::{open_db, open_db_in_memory};
use contactbook_core::{
    Contact, FavoriteService, LoadPhase, Overlay, PhoneNumber, Session, SqlitePrefsRepository,
};

fn sample_contacts() -> Vec<Contact> {
    let mut ann = Contact::new("1", "Ann");
    ann.phone_numbers.push(PhoneNumber::new("555"));
    let bo = Contact::new("2", "Bo");
    vec![ann, bo]
}

fn fresh_session() -> Session<SqlitePrefsRepository> {
    let repo = SqlitePrefsRepository::try_new(open_db_in_memory().unwrap()).unwrap();
    Session::new(FavoriteService::new(repo))
}

#[test]
fn session_starts_loading_with_no_rows() {
    let session = fresh_session();
    assert_eq!(session.phase(), &LoadPhase::Loading);
    assert_eq!(session.overlay(), &Overlay::Hidden);
    assert!(session.rows().is_empty());
}

#[test]
fn finish_load_renders_one_row_per_contact() {
    let mut session = fresh_session();
    session.finish_load(sample_contacts());

    assert_eq!(session.phase(), &LoadPhase::Ready);
    let rows = session.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Ann");
    assert_eq!(rows[0].phone, "555");
    assert_eq!(rows[1].name, "Bo");
    // No phone numbers renders an empty placeholder, not a crash.
    assert_eq!(rows[1].phone, "");
    assert!(rows.iter().all(|row| !row.is_favorite));
}

#[test]
fn fail_load_surfaces_failed_phase() {
    let mut session = fresh_session();
    session.fail_load("source unavailable");

    match session.phase() {
        LoadPhase::Failed(reason) => assert_eq!(reason, "source unavailable"),
        other => panic!("unexpected phase: {other:?}"),
    }
    assert!(session.rows().is_empty());
    assert!(!session.select_contact("1"));
}

#[test]
fn selection_is_ignored_before_load_completes() {
    let mut session = fresh_session();
    assert!(!session.select_contact("1"));
    assert_eq!(session.overlay(), &Overlay::Hidden);
}

#[test]
fn overlay_state_machine_shows_and_dismisses() {
    let mut session = fresh_session();
    session.finish_load(sample_contacts());

    assert!(session.select_contact("1"));
    assert_eq!(session.overlay(), &Overlay::Shown("1".to_string()));
    assert_eq!(session.active_contact().map(|c| c.name.as_str()), Some("Ann"));

    session.dismiss_overlay();
    assert_eq!(session.overlay(), &Overlay::Hidden);
    assert!(session.active_contact().is_none());

    // Unknown id leaves the overlay hidden.
    assert!(!session.select_contact("99"));
    assert_eq!(session.overlay(), &Overlay::Hidden);
}

#[test]
fn toggle_active_favorite_follows_overlay() {
    let mut session = fresh_session();
    session.finish_load(sample_contacts());

    // Hidden overlay: nothing to toggle.
    assert_eq!(session.toggle_active_favorite(), None);

    session.select_contact("1");
    assert_eq!(session.toggle_active_favorite(), Some("1"));
    assert_eq!(session.favorite_id(), "1");

    let rows = session.rows();
    assert!(rows[0].is_favorite);
    assert!(!rows[1].is_favorite);

    // Toggling the other contact moves the single favorite.
    session.select_contact("2");
    assert_eq!(session.toggle_active_favorite(), Some("2"));
    let rows = session.rows();
    assert!(!rows[0].is_favorite);
    assert!(rows[1].is_favorite);

    // Same contact again clears it.
    assert_eq!(session.toggle_active_favorite(), Some(""));
    assert!(session.rows().iter().all(|row| !row.is_favorite));
}

#[test]
fn detail_labels_reflect_favorite_state() {
    let mut session = fresh_session();
    session.finish_load(sample_contacts());

    session.select_contact("1");
    assert_eq!(session.detail_toggle_label(), Some("Favorite"));

    session.toggle_active_favorite();
    assert_eq!(session.detail_toggle_label(), Some("Unfavorite"));

    let lines = session.detail().expect("overlay is shown");
    assert!(lines
        .iter()
        .any(|line| line.label == "name" && line.value == "Ann"));
}

#[test]
fn favorite_restores_after_fetch_on_relaunch() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("prefs.sqlite3");

    {
        let repo = SqlitePrefsRepository::try_new(open_db(&db_path).unwrap()).unwrap();
        let mut session = Session::new(FavoriteService::new(repo));
        session.finish_load(sample_contacts());
        session.toggle_favorite("1");
    }

    // Relaunch: favorite comes back once the fetch completes, not before.
    let repo = SqlitePrefsRepository::try_new(open_db(&db_path).unwrap()).unwrap();
    let mut session = Session::new(FavoriteService::new(repo));
    assert_eq!(session.favorite_id(), "");

    session.finish_load(sample_contacts());
    assert_eq!(session.favorite_id(), "1");
    assert!(session.rows()[0].is_favorite);

    // Toggling the restored favorite clears it.
    assert_eq!(session.toggle_favorite("1"), "");
}
