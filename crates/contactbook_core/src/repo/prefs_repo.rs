//! Preference repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide a stable key-value get/set API over `prefs` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `try_new` rejects connections without a fully migrated `prefs` table.
//! - `set_pref` is an upsert; `updated_at` is refreshed on every write.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PREFS_TABLE: &str = "prefs";
const REQUIRED_COLUMNS: &[&str] = &["key", "value", "updated_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for preference persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not migrated: expected schema version {expected_version}, found {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted preference: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value preference access contract.
///
/// Exactly one key is used today (the favorite contact id); the contract
/// stays generic so later preferences need no new storage plumbing.
pub trait PrefsRepository {
    fn get_pref(&self, key: &str) -> RepoResult<Option<String>>;
    fn set_pref(&self, key: &str, value: &str) -> RepoResult<()>;
}

/// SQLite-backed preference repository.
///
/// Owns its connection: the FFI session keeps one repository alive for the
/// whole process instead of reopening per call.
pub struct SqlitePrefsRepository {
    conn: Connection,
}

impl SqlitePrefsRepository {
    /// Wraps a migrated connection after validating the schema it needs.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` is behind.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the `prefs`
    ///   shape is absent despite the version claim.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version < expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: bool = conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [PREFS_TABLE],
            |row| row.get(0),
        )?;
        if !table_exists {
            return Err(RepoError::MissingRequiredTable(PREFS_TABLE));
        }

        for column in REQUIRED_COLUMNS {
            let column_exists: bool = conn.query_row(
                "SELECT EXISTS (SELECT 1 FROM pragma_table_info(?1) WHERE name = ?2);",
                params![PREFS_TABLE, column],
                |row| row.get(0),
            )?;
            if !column_exists {
                return Err(RepoError::MissingRequiredColumn {
                    table: PREFS_TABLE,
                    column,
                });
            }
        }

        Ok(Self { conn })
    }
}

impl PrefsRepository for SqlitePrefsRepository {
    fn get_pref(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM prefs WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set_pref(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO prefs (key, value) VALUES (?1, ?2)
             ON CONFLICT (key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}
