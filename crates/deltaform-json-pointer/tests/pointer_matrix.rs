//! Integration matrix for pointer parsing, formatting, and lookup against a
//! realistic document.

use deltaform_json_pointer::{
    format_json_pointer, get, get_mut, is_prefix, parse_json_pointer, validate_json_pointer,
};
use serde_json::{json, Value};

fn doc() -> Value {
    json!({
        "name": "store",
        "meta": {
            "a~b": 1,
            "c/d": 2,
            "": "empty-key"
        },
        "items": [
            {"sku": "x1", "qty": 3},
            {"sku": "x2", "qty": 0}
        ]
    })
}

#[test]
fn lookup_matrix() {
    let doc = doc();
    let cases: Vec<(&str, Option<Value>)> = vec![
        ("", Some(doc.clone())),
        ("/name", Some(json!("store"))),
        ("/meta/a~0b", Some(json!(1))),
        ("/meta/c~1d", Some(json!(2))),
        ("/meta/", Some(json!("empty-key"))),
        ("/items/0/sku", Some(json!("x1"))),
        ("/items/1/qty", Some(json!(0))),
        ("/items/2", None),
        ("/items/-", None),
        ("/name/deeper", None),
        ("/missing", None),
    ];
    for (pointer, expected) in cases {
        let path = parse_json_pointer(pointer);
        assert_eq!(
            get(&doc, &path).cloned(),
            expected,
            "pointer: {pointer:?}"
        );
    }
}

#[test]
fn round_trip_through_escaping() {
    let pointers = ["/meta/a~0b", "/meta/c~1d", "/items/0/sku", "/meta/"];
    for pointer in pointers {
        let path = parse_json_pointer(pointer);
        assert_eq!(format_json_pointer(&path), pointer);
        assert!(validate_json_pointer(pointer).is_ok());
    }
}

#[test]
fn mutation_through_get_mut() {
    let mut doc = doc();
    let path = parse_json_pointer("/items/1/qty");
    *get_mut(&mut doc, &path).unwrap() = json!(7);
    assert_eq!(get(&doc, &path), Some(&json!(7)));
}

#[test]
fn prefix_relation_over_parsed_pointers() {
    let filter = parse_json_pointer("/meta");
    assert!(is_prefix(&filter, &parse_json_pointer("/meta/a~0b")));
    assert!(is_prefix(&filter, &parse_json_pointer("/meta")));
    assert!(!is_prefix(&filter, &parse_json_pointer("/items/0")));
}
