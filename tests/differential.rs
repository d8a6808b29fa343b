//! Differential tests against `serde_json` on standard JSON.
//!
//! Inputs stay inside the subset both parsers read identically: no escape
//! sequences in strings and no exponents (which need a fractional part here).
//! On that subset the parsed trees must agree and, because `serde_json`'s
//! default map is also key-sorted, the compact serializations must match once
//! floats are normalized.

use jsonplus::{parse, Value};
use serde_json::Value as Reference;

/// Convert a reference tree into ours.
fn convert(reference: &Reference) -> Value {
    match reference {
        Reference::Null => Value::Null,
        Reference::Bool(b) => Value::Bool(*b),
        Reference::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap()),
        },
        Reference::String(s) => Value::from(s.as_str()),
        Reference::Array(items) => items.iter().map(convert).collect(),
        Reference::Object(map) => map.iter().map(|(k, v)| (k.as_str(), convert(v))).collect(),
    }
}

const DOCUMENTS: &[&str] = &[
    "null",
    "true",
    "false",
    "0",
    "-17",
    "9223372036854775807",
    "-9223372036854775808",
    "0.5",
    "-12.125",
    "1.0",
    r#""""#,
    r#""plain ascii text""#,
    "\"unicode \u{e9}\u{4e2d}\u{1f600}\"",
    "[]",
    "{}",
    "[1, 2.5, \"three\", null, true, [false], {}]",
    r#"{"z": 1, "a": 2, "m": {"y": [], "b": {}}}"#,
    r#"{"k": 1, "k": 2}"#,
    r#"
    {
        "id": 7,
        "items": [
            {"sku": "a-1", "qty": 2, "price": 9.75},
            {"sku": "b-2", "qty": 1, "price": 100.0}
        ],
        "meta": {"tags": ["x", "y"], "active": false, "note": null}
    }
    "#,
];

#[test]
fn trees_agree_with_reference() {
    for doc in DOCUMENTS {
        let reference: Reference = serde_json::from_str(doc).unwrap();
        let ours = parse(doc).unwrap_or_else(|| panic!("failed to parse {:?}", doc));
        assert_eq!(ours, convert(&reference), "document {:?}", doc);
    }
}

#[test]
fn integral_document_dumps_match_reference() {
    // Without floats both serializers emit the same compact text.
    for doc in DOCUMENTS {
        let ours = parse(doc).unwrap();
        if contains_float(&ours) {
            continue;
        }
        let reference: Reference = serde_json::from_str(doc).unwrap();
        assert_eq!(
            ours.dump(),
            serde_json::to_string(&reference).unwrap(),
            "document {:?}",
            doc
        );
    }
}

#[test]
fn our_dump_is_valid_json() {
    for doc in DOCUMENTS {
        let ours = parse(doc).unwrap();
        let reparsed: Reference = serde_json::from_str(&ours.dump())
            .unwrap_or_else(|e| panic!("dump of {:?} is not JSON: {}", doc, e));
        assert_eq!(convert(&reparsed), ours, "document {:?}", doc);
    }
}

#[test]
fn dumped_control_characters_are_valid_json() {
    let value = Value::from("tab\tnewline\nbell\x07");
    let reparsed: Reference = serde_json::from_str(&value.dump()).unwrap();
    assert_eq!(reparsed, Reference::from("tab\tnewline\nbell\x07"));
}

#[test]
fn escapes_diverge_from_reference() {
    // Escapes are not decoded: the backslash is dropped and the next byte kept.
    let doc = r#""line\nbreak""#;
    let reference: Reference = serde_json::from_str(doc).unwrap();
    assert_eq!(reference, Reference::from("line\nbreak"));
    assert_eq!(parse(doc), Some(Value::from("linenbreak")));
}

fn contains_float(value: &Value) -> bool {
    match value {
        Value::Float(_) => true,
        Value::Array(items) => items.iter().any(contains_float),
        Value::Object(map) => map.values().any(contains_float),
        _ => false,
    }
}
