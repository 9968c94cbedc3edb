//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value preference access contract.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository construction verifies the connection is migrated before any
//!   preference read/write is possible.

pub mod prefs_repo;
