//! Contact list projection.
//!
//! # Responsibility
//! - Produce one row per contact, in source order, with the favorite
//!   annotation resolved against the current favorite id.
//!
//! # Invariants
//! - Exactly one row per contact; rows never reorder or filter.
//! - `is_favorite` is true for at most one row.

use crate::model::contact::Contact;

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRow {
    /// Source-assigned contact id, used for row selection.
    pub id: String,
    /// Display name.
    pub name: String,
    /// First phone number in display form; empty placeholder when the
    /// contact has none.
    pub phone: String,
    /// Favorite marker, set exactly when this row's id is the favorite.
    pub is_favorite: bool,
}

/// Projects the session contact list into rendered rows.
pub fn contact_rows(contacts: &[Contact], favorite_id: &str) -> Vec<ContactRow> {
    contacts
        .iter()
        .map(|contact| ContactRow {
            id: contact.id.clone(),
            name: contact.name.clone(),
            phone: contact
                .first_phone()
                .map(|phone| phone.display())
                .unwrap_or_default(),
            is_favorite: !favorite_id.is_empty() && contact.id == favorite_id,
        })
        .collect()
}
