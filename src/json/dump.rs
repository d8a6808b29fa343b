//! Canonical serialization.
//!
//! Output is minimal standard JSON: no whitespace, object members in key order
//! (the order the `BTreeMap` already keeps), and floats always carrying a
//! fractional part so that they read back as floats.

use super::value::{Object, Value};

/// Serialize a value to its canonical text.
pub fn dump(value: &Value) -> String {
    let mut output = String::new();
    serialize_value(value, &mut output);
    output
}

/// Serialize a value to the output string.
fn serialize_value(value: &Value, output: &mut String) {
    match value {
        Value::Null => output.push_str("null"),
        Value::Bool(true) => output.push_str("true"),
        Value::Bool(false) => output.push_str("false"),
        Value::Int(n) => output.push_str(&n.to_string()),
        Value::Float(x) => serialize_float(*x, output),
        Value::String(s) => serialize_string(s, output),
        Value::Array(arr) => serialize_array(arr, output),
        Value::Object(obj) => serialize_object(obj, output),
    }
}

/// Shortest round-trip decimal, with `.0` forced onto integral values.
///
/// NaN and the infinities have no textual form and are written as `null`.
fn serialize_float(x: f64, output: &mut String) {
    if !x.is_finite() {
        output.push_str("null");
        return;
    }
    let text = x.to_string();
    output.push_str(&text);
    if x.fract() == 0.0 && !text.contains('.') {
        output.push_str(".0");
    }
}

/// Serialize a string with proper JSON escaping.
fn serialize_string(s: &str, output: &mut String) {
    output.push('"');
    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\x08' => output.push_str("\\b"),
            '\x0C' => output.push_str("\\f"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if c < '\x20' => {
                // Other control characters as \u00XX
                output.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => output.push(c),
        }
    }
    output.push('"');
}

fn serialize_array(arr: &[Value], output: &mut String) {
    output.push('[');
    for (i, value) in arr.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        serialize_value(value, output);
    }
    output.push(']');
}

fn serialize_object(obj: &Object, output: &mut String) {
    output.push('{');
    for (i, (key, value)) in obj.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        serialize_string(key, output);
        output.push(':');
        serialize_value(value, output);
    }
    output.push('}');
}

/// Check whether `input` is exactly the canonical text of `value`.
pub fn is_canonical(input: &str, value: &Value) -> bool {
    dump(value) == input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_scalars() {
        assert_eq!(dump(&Value::Null), "null");
        assert_eq!(dump(&Value::Bool(true)), "true");
        assert_eq!(dump(&Value::Bool(false)), "false");
        assert_eq!(dump(&Value::Int(0)), "0");
        assert_eq!(dump(&Value::Int(-123)), "-123");
        assert_eq!(dump(&Value::Int(i64::MIN)), "-9223372036854775808");
    }

    #[test]
    fn test_dump_floats() {
        assert_eq!(dump(&Value::Float(3.0)), "3.0");
        assert_eq!(dump(&Value::Float(0.0)), "0.0");
        assert_eq!(dump(&Value::Float(-0.0)), "-0.0");
        assert_eq!(dump(&Value::Float(1.5)), "1.5");
        assert_eq!(dump(&Value::Float(-2.25)), "-2.25");
        assert_eq!(dump(&Value::Float(123.4)), "123.4");
        assert_eq!(dump(&Value::Float(0.1)), "0.1");
        assert_eq!(dump(&Value::Float(1e20)), "100000000000000000000.0");
    }

    #[test]
    fn test_dump_non_finite_floats() {
        assert_eq!(dump(&Value::Float(f64::NAN)), "null");
        assert_eq!(dump(&Value::Float(f64::INFINITY)), "null");
        assert_eq!(dump(&Value::Float(f64::NEG_INFINITY)), "null");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(dump(&Value::from("hello")), r#""hello""#);
        assert_eq!(dump(&Value::from("a\"b")), r#""a\"b""#);
        assert_eq!(dump(&Value::from("a\\b")), r#""a\\b""#);
        assert_eq!(dump(&Value::from("a\nb")), r#""a\nb""#);
        assert_eq!(dump(&Value::from("a\tb")), r#""a\tb""#);
        assert_eq!(dump(&Value::from("\x01")), r#""\u0001""#);
        assert_eq!(dump(&Value::from("é")), "\"é\"");
    }

    #[test]
    fn test_dump_containers() {
        assert_eq!(dump(&Value::Array(vec![])), "[]");
        assert_eq!(dump(&Value::Object(Object::new())), "{}");
        assert_eq!(
            dump(&Value::from(vec![Value::Int(1), Value::Null, Value::from("x")])),
            r#"[1,null,"x"]"#
        );
    }

    #[test]
    fn test_object_keys_sorted() {
        let value = Value::object([("b", 2), ("a", 1), ("c", 3)]);
        assert_eq!(dump(&value), r#"{"a":1,"b":2,"c":3}"#);
    }

    #[test]
    fn test_nested_dump() {
        let value = Value::object([
            ("list", Value::from(vec![Value::from([1, 2]), Value::object([("x", 1.0)])])),
            ("flag", Value::Bool(false)),
        ]);
        assert_eq!(dump(&value), r#"{"flag":false,"list":[[1,2],{"x":1.0}]}"#);
    }

    #[test]
    fn test_is_canonical() {
        let value = Value::object([("a", 1), ("b", 2)]);
        assert!(is_canonical(r#"{"a":1,"b":2}"#, &value));
        assert!(!is_canonical(r#"{"b":2,"a":1}"#, &value));
        assert!(!is_canonical(r#"{ "a": 1, "b": 2 }"#, &value));
    }
}
