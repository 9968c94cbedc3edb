use contactbook_core::{
    contact_rows, detail_lines, toggle_label, Contact, DetailLine, FieldNode, PhoneNumber,
};

fn line(label: &str, value: &str) -> DetailLine {
    DetailLine {
        label: label.to_string(),
        value: value.to_string(),
    }
}

#[test]
fn detail_lines_flatten_depth_first() {
    let mut contact = Contact::new("1", "Ann");
    contact.phone_numbers.push(PhoneNumber {
        number: "555".to_string(),
        label: Some("mobile".to_string()),
    });
    contact.phone_numbers.push(PhoneNumber::new("777"));
    contact.extras = vec![
        FieldNode::leaf("email", "ann@example.com"),
        FieldNode::group(
            "address",
            vec![
                FieldNode::leaf("city", "Bozeman"),
                FieldNode::group("geo", vec![FieldNode::leaf("lat", "45.68")]),
            ],
        ),
    ];

    let lines = detail_lines(&contact);
    assert_eq!(
        lines,
        vec![
            line("id", "1"),
            line("name", "Ann"),
            line("number", "555"),
            line("label", "mobile"),
            line("number", "777"),
            line("email", "ann@example.com"),
            line("city", "Bozeman"),
            line("lat", "45.68"),
        ]
    );
}

#[test]
fn empty_groups_contribute_no_lines() {
    let mut contact = Contact::new("1", "Ann");
    contact.extras = vec![FieldNode::group("empty", Vec::new())];

    let lines = detail_lines(&contact);
    assert_eq!(lines, vec![line("id", "1"), line("name", "Ann")]);
}

#[test]
fn toggle_label_reflects_equality_with_favorite() {
    assert_eq!(toggle_label("1", "1"), "Unfavorite");
    assert_eq!(toggle_label("1", "2"), "Favorite");
    assert_eq!(toggle_label("1", ""), "Favorite");
    // An empty active id never matches an empty favorite.
    assert_eq!(toggle_label("", ""), "Favorite");
}

#[test]
fn rows_mark_exactly_the_favorite() {
    let contacts = vec![Contact::new("1", "Ann"), Contact::new("2", "Bo")];

    let rows = contact_rows(&contacts, "2");
    assert_eq!(rows.len(), 2);
    assert!(!rows[0].is_favorite);
    assert!(rows[1].is_favorite);

    let none = contact_rows(&contacts, "");
    assert!(none.iter().all(|row| !row.is_favorite));
}
