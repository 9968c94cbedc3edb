//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical contact record fetched from the platform source.
//! - Represent nested platform extras as a typed `FieldNode` tree.
//!
//! # Invariants
//! - `id` is assigned by the contact source, never minted here, and must be
//!   non-empty.
//! - `FieldNode` values form a tree by construction; walks need no cycle
//!   protection.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static PHONE_JUNK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9+*#() \-]").expect("valid phone junk regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Stable identifier assigned by the contact source.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// The value is opaque; only equality matters.
pub type ContactId = String;

/// One phone number entry as supplied by the contact source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    /// Raw number text, unmodified from the source.
    pub number: String,
    /// Optional source-side label (`mobile`, `home`, ...).
    pub label: Option<String>,
}

impl PhoneNumber {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            label: None,
        }
    }

    /// Returns the number in display form.
    ///
    /// Collapses whitespace runs and strips characters that are neither
    /// dialable nor conventional formatting.
    pub fn display(&self) -> String {
        let cleaned = PHONE_JUNK_RE.replace_all(&self.number, "");
        WHITESPACE_RE.replace_all(cleaned.trim(), " ").into_owned()
    }
}

/// Typed rendering tree for dynamic contact fields.
///
/// The platform hands over arbitrarily nested records (address, email,
/// birthday, ...). They are normalized into this tagged union at ingest
/// time so views walk a known shape instead of inspecting runtime types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldNode {
    /// Terminal labeled value, rendered as one detail line.
    Leaf { label: String, value: String },
    /// Nested record or list; children render depth-first under this label.
    Group { label: String, children: Vec<FieldNode> },
}

impl FieldNode {
    pub fn leaf(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Leaf {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn group(label: impl Into<String>, children: Vec<FieldNode>) -> Self {
        Self::Group {
            label: label.into(),
            children,
        }
    }

    /// Returns the immediate key this node was ingested under.
    pub fn label(&self) -> &str {
        match self {
            Self::Leaf { label, .. } | Self::Group { label, .. } => label,
        }
    }
}

/// Validation error for contact records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    /// Contact id must be a non-empty source-assigned string.
    EmptyId,
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "contact id must not be empty"),
        }
    }
}

impl Error for ContactValidationError {}

/// Canonical contact record for one session.
///
/// Immutable once fetched; the session list is its sole owner. Fields the
/// list view needs (`name`, `phone_numbers`) are first-class, everything
/// else the source supplied lives in the `extras` tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Stable source-assigned ID, unique within the session.
    pub id: ContactId,
    /// Display name. May be empty for nameless records.
    pub name: String,
    /// Ordered phone numbers; first entry is the list-row number.
    pub phone_numbers: Vec<PhoneNumber>,
    /// Remaining source fields, normalized into a typed tree.
    pub extras: Vec<FieldNode>,
}

impl Contact {
    /// Creates a contact with no phone numbers and no extras.
    pub fn new(id: impl Into<ContactId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone_numbers: Vec::new(),
            extras: Vec::new(),
        }
    }

    /// Returns the first phone number, if any.
    pub fn first_phone(&self) -> Option<&PhoneNumber> {
        self.phone_numbers.first()
    }

    /// Validates source-assigned identity.
    ///
    /// # Errors
    /// - `ContactValidationError::EmptyId` when `id` is empty.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.id.is_empty() {
            return Err(ContactValidationError::EmptyId);
        }
        Ok(())
    }
}
