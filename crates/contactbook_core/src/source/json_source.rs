//! JSON-backed contact source.
//!
//! # Responsibility
//! - Parse the contact array the platform fetched and handed over the FFI
//!   boundary into typed `Contact` records.
//! - Fold every field the views do not know first-class into the
//!   `FieldNode` extras tree.
//!
//! # Invariants
//! - `id` is required per record; `name` and `phoneNumbers` are optional.
//! - The extras tree is finite by construction (JSON has no cycles).

use super::{ContactSource, SourceError};
use crate::model::contact::{Contact, FieldNode, PhoneNumber};
use serde_json::{Map, Value};

const ID_KEY: &str = "id";
const NAME_KEY: &str = "name";
const PHONES_KEY: &str = "phoneNumbers";
const PHONE_NUMBER_KEY: &str = "number";
const PHONE_LABEL_KEY: &str = "label";

/// Contact source over a platform-supplied JSON array.
///
/// The mobile side performs the actual device query (it owns the OS
/// permission flow) and passes the raw records down once at startup.
pub struct JsonContactSource {
    payload: String,
}

impl JsonContactSource {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

impl ContactSource for JsonContactSource {
    fn fetch_contacts(&self) -> Result<Vec<Contact>, SourceError> {
        let value: Value = serde_json::from_str(&self.payload)?;
        let records = match value {
            Value::Array(records) => records,
            _ => return Err(SourceError::NotAnArray),
        };

        let mut contacts = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            contacts.push(parse_record(record, index)?);
        }
        Ok(contacts)
    }
}

fn parse_record(record: Value, index: usize) -> Result<Contact, SourceError> {
    let mut fields = match record {
        Value::Object(fields) => fields,
        _ => return Err(SourceError::MissingId { index }),
    };

    let id = match fields.remove(ID_KEY) {
        Some(Value::String(id)) if !id.is_empty() => id,
        _ => return Err(SourceError::MissingId { index }),
    };

    let name = match fields.remove(NAME_KEY) {
        Some(Value::String(name)) => name,
        _ => String::new(),
    };

    let phone_numbers = fields
        .remove(PHONES_KEY)
        .map(parse_phone_numbers)
        .unwrap_or_default();

    Ok(Contact {
        id,
        name,
        phone_numbers,
        extras: object_to_nodes(fields),
    })
}

fn parse_phone_numbers(value: Value) -> Vec<PhoneNumber> {
    let entries = match value {
        Value::Array(entries) => entries,
        _ => return Vec::new(),
    };

    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::Object(fields) => {
                let number = match fields.get(PHONE_NUMBER_KEY) {
                    Some(Value::String(number)) => number.clone(),
                    _ => return None,
                };
                let label = match fields.get(PHONE_LABEL_KEY) {
                    Some(Value::String(label)) => Some(label.clone()),
                    _ => None,
                };
                Some(PhoneNumber { number, label })
            }
            // Bare string entries are tolerated for lenient sources.
            Value::String(number) => Some(PhoneNumber::new(number)),
            _ => None,
        })
        .collect()
}

fn object_to_nodes(fields: Map<String, Value>) -> Vec<FieldNode> {
    fields
        .into_iter()
        .filter_map(|(key, value)| value_to_node(key, value))
        .collect()
}

/// Maps one JSON field to its typed render node.
///
/// Strings stay verbatim; numbers and booleans are stringified (they are
/// real contact data); nulls are dropped; objects and arrays recurse into
/// groups labeled by their immediate key.
fn value_to_node(label: String, value: Value) -> Option<FieldNode> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(FieldNode::Leaf { label, value: text }),
        Value::Bool(flag) => Some(FieldNode::Leaf {
            label,
            value: flag.to_string(),
        }),
        Value::Number(number) => Some(FieldNode::Leaf {
            label,
            value: number.to_string(),
        }),
        Value::Object(fields) => Some(FieldNode::Group {
            label,
            children: object_to_nodes(fields),
        }),
        Value::Array(entries) => {
            let children = entries
                .into_iter()
                .enumerate()
                .filter_map(|(index, entry)| value_to_node(index.to_string(), entry))
                .collect();
            Some(FieldNode::Group { label, children })
        }
    }
}
