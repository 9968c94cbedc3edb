use contactbook_core::{Contact, ContactValidationError, FieldNode, PhoneNumber};

#[test]
fn contact_new_sets_defaults() {
    let contact = Contact::new("abc-1", "Ann");

    assert_eq!(contact.id, "abc-1");
    assert_eq!(contact.name, "Ann");
    assert!(contact.phone_numbers.is_empty());
    assert!(contact.extras.is_empty());
    assert!(contact.first_phone().is_none());
}

#[test]
fn validate_rejects_empty_id() {
    let contact = Contact::new("", "Nobody");
    assert_eq!(contact.validate(), Err(ContactValidationError::EmptyId));

    let valid = Contact::new("1", "");
    assert_eq!(valid.validate(), Ok(()));
}

#[test]
fn first_phone_returns_leading_entry() {
    let mut contact = Contact::new("1", "Ann");
    contact.phone_numbers.push(PhoneNumber::new("555"));
    contact.phone_numbers.push(PhoneNumber::new("777"));

    assert_eq!(contact.first_phone().map(|p| p.number.as_str()), Some("555"));
}

#[test]
fn phone_display_normalizes_formatting() {
    assert_eq!(PhoneNumber::new("555").display(), "555");
    assert_eq!(
        PhoneNumber::new("  +1 (406)  555-0199 ").display(),
        "+1 (406) 555-0199"
    );
    assert_eq!(PhoneNumber::new("555.01_99x").display(), "5550199");
    assert_eq!(PhoneNumber::new("call\u{a0}me").display(), "");
}

#[test]
fn field_node_label_matches_immediate_key() {
    let leaf = FieldNode::leaf("email", "ann@example.com");
    let group = FieldNode::group("address", vec![leaf.clone()]);

    assert_eq!(leaf.label(), "email");
    assert_eq!(group.label(), "address");
}

#[test]
fn contact_serialization_round_trips() {
    let mut contact = Contact::new("1", "Ann");
    contact.phone_numbers.push(PhoneNumber {
        number: "555".to_string(),
        label: Some("mobile".to_string()),
    });
    contact.extras.push(FieldNode::group(
        "address",
        vec![FieldNode::leaf("city", "Bozeman")],
    ));

    let json = serde_json::to_value(&contact).unwrap();
    assert_eq!(json["id"], "1");
    assert_eq!(json["name"], "Ann");
    assert_eq!(json["phone_numbers"][0]["number"], "555");

    let decoded: Contact = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, contact);
}
