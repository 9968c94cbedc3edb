//! Domain model for contact records.
//!
//! # Responsibility
//! - Define the canonical contact shape shared by list and detail views.
//! - Represent dynamic platform-supplied fields as a typed tree.
//!
//! # Invariants
//! - Every contact is identified by a non-empty, source-assigned `ContactId`.
//! - Contacts are immutable once ingested; the session owns the list.

pub mod contact;
