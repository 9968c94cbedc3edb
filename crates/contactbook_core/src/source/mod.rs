//! Contact source seam and platform JSON ingest.
//!
//! # Responsibility
//! - Define the read-only contract for fetching the device contact list.
//! - Normalize the platform's dynamic JSON records into typed contacts.
//!
//! # Invariants
//! - The source is queried once at session start; contacts are never
//!   re-fetched or mutated afterwards.

mod json_source;

pub use json_source::JsonContactSource;

use crate::model::contact::Contact;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Read-only supplier of the device contact list.
///
/// Implementations must include phone numbers with each record; there is no
/// pagination or filtering.
pub trait ContactSource {
    fn fetch_contacts(&self) -> Result<Vec<Contact>, SourceError>;
}

/// Error taxonomy for contact ingestion.
#[derive(Debug)]
pub enum SourceError {
    /// Payload is not valid JSON.
    Parse(serde_json::Error),
    /// Top-level payload is not a JSON array of contact records.
    NotAnArray,
    /// Record at `index` has no usable string `id`.
    MissingId { index: usize },
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "contact payload is not valid JSON: {err}"),
            Self::NotAnArray => write!(f, "contact payload must be a JSON array"),
            Self::MissingId { index } => {
                write!(f, "contact record at index {index} has no string `id`")
            }
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}
