//! Contact detail projection for the modal overlay.
//!
//! # Responsibility
//! - Flatten one contact record into labeled detail lines, depth-first.
//! - Resolve the favorite toggle control label.
//!
//! # Invariants
//! - Every leaf of the contact's field tree becomes exactly one line,
//!   labeled by its immediate key.
//! - The walk terminates: `FieldNode` trees are acyclic by construction.

use crate::model::contact::{Contact, FieldNode};

/// One labeled line in the detail overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    /// Immediate key of the rendered field.
    pub label: String,
    /// Leaf value text.
    pub value: String,
}

impl DetailLine {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Flattens a contact into overlay lines.
///
/// Order: identity fields first (`id`, `name`), then one `number` line per
/// phone (with its `label` line when present), then the extras tree
/// depth-first.
pub fn detail_lines(contact: &Contact) -> Vec<DetailLine> {
    let mut lines = Vec::new();
    lines.push(DetailLine::new("id", contact.id.as_str()));
    lines.push(DetailLine::new("name", contact.name.as_str()));

    for phone in &contact.phone_numbers {
        lines.push(DetailLine::new("number", phone.number.as_str()));
        if let Some(label) = &phone.label {
            lines.push(DetailLine::new("label", label.as_str()));
        }
    }

    for node in &contact.extras {
        flatten_node(node, &mut lines);
    }

    lines
}

fn flatten_node(node: &FieldNode, lines: &mut Vec<DetailLine>) {
    match node {
        FieldNode::Leaf { label, value } => {
            lines.push(DetailLine::new(label.as_str(), value.as_str()));
        }
        FieldNode::Group { children, .. } => {
            for child in children {
                flatten_node(child, lines);
            }
        }
    }
}

/// Label for the overlay's favorite toggle control.
///
/// Reflects current state: the active contact being the favorite offers
/// "Unfavorite", anything else offers "Favorite".
pub fn toggle_label(contact_id: &str, favorite_id: &str) -> &'static str {
    if !favorite_id.is_empty() && contact_id == favorite_id {
        "Unfavorite"
    } else {
        "Favorite"
    }
}
