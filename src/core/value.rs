//! Value helpers shared by the flattener, matcher and query surface
//!
//! Documents are plain `serde_json::Value` trees. These helpers give the rest
//! of the crate one place for the classification and coercion rules: which
//! values are nodes, which are truthy, how a property is looked up and how two
//! values compare loosely.

use serde_json::{Number, Value};
use std::borrow::Cow;

/// Check if a value is a node (a mapping or a sequence)
///
/// Only nodes become registry entries; scalars and null never do.
pub fn is_node(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

/// Check if a value is truthy
///
/// `null`, `false`, zero, NaN and the empty string are falsy. Containers are
/// always truthy, even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Look up a named property of a value
///
/// Mappings are looked up by key. Sequences accept a canonical decimal index
/// (`"0"`, `"12"`, never `"01"` or `"+1"`). Scalars have no properties.
pub fn property<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => array_index(key).and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Check if a value has a truthy property named `key`
pub fn has_property(value: &Value, key: &str) -> bool {
    property(value, key).map(is_truthy).unwrap_or(false)
}

/// The property-name form of a value, used when a value is looked up as a key
///
/// Integral floats render without a fraction (`1.0` is `"1"`). A sequence
/// renders as its elements joined with commas, so `["a1"]` is `"a1"`.
pub fn property_key(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed("null"),
        other => Cow::Owned(primitive_string(other)),
    }
}

/// Loose, value-based equality
///
/// Numbers compare numerically, a string compares against a number by its
/// numeric reading (blank strings read as zero), booleans compare as 1/0
/// against anything but another boolean, and `null` equals only `null`.
/// Containers of the same kind compare structurally; a container against a
/// scalar compares through its string form, so `["a1"]` equals `"a1"`.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Bool(flag), other) | (other, Value::Bool(flag)) => {
            loose_eq(&Value::from(u8::from(*flag)), other)
        }
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            match (n.as_f64(), string_to_number(s)) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            }
        }
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => a == b,
        (Value::Array(_) | Value::Object(_), Value::Array(_) | Value::Object(_)) => false,
        (container @ (Value::Array(_) | Value::Object(_)), scalar)
        | (scalar, container @ (Value::Array(_) | Value::Object(_))) => {
            loose_eq(&Value::String(primitive_string(container)), scalar)
        }
        _ => false,
    }
}

/// Spread a property value into a flat list of items
///
/// Sequences contribute their elements, mappings their property values and a
/// scalar contributes itself.
pub fn arrayify(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        scalar => vec![scalar],
    }
}

/// Parse a textual query value
///
/// Valid JSON is taken as-is (`42`, `true`, `["x","y"]`, `{"a1": true}`);
/// anything else is treated as a plain string.
pub fn parse_query_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn array_index(key: &str) -> Option<usize> {
    let canonical = !key.is_empty()
        && key.bytes().all(|b| b.is_ascii_digit())
        && (key == "0" || !key.starts_with('0'));
    if canonical {
        key.parse().ok()
    } else {
        None
    }
}

/// String form of a value as it appears inside a joined sequence
fn primitive_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(primitive_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_string(n: &Number) -> String {
    if n.is_f64() {
        match n.as_f64() {
            Some(f) if f == 0.0 => "0".to_string(),
            Some(f) => f.to_string(),
            None => n.to_string(),
        }
    } else {
        n.to_string()
    }
}

fn string_to_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_classification() {
        assert!(is_node(&json!({})));
        assert!(is_node(&json!([])));
        assert!(!is_node(&json!(null)));
        assert!(!is_node(&json!("urn:a1")));
        assert!(!is_node(&json!(3)));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_property_lookup() {
        let doc = json!({"prov:type": "document", "members": ["e1", "e2"]});
        assert_eq!(property(&doc, "prov:type"), Some(&json!("document")));
        assert_eq!(property(&doc, "missing"), None);

        let members = &doc["members"];
        assert_eq!(property(members, "1"), Some(&json!("e2")));
        assert_eq!(property(members, "01"), None);
        assert_eq!(property(members, "+1"), None);
        assert_eq!(property(members, "2"), None);
        assert_eq!(property(&json!("scalar"), "0"), None);
    }

    #[test]
    fn test_has_property_requires_truthy_value() {
        let doc = json!({"a": 1, "b": 0, "c": null, "d": {}});
        assert!(has_property(&doc, "a"));
        assert!(!has_property(&doc, "b"));
        assert!(!has_property(&doc, "c"));
        assert!(has_property(&doc, "d"));
        assert!(!has_property(&doc, "e"));
    }

    #[test]
    fn test_property_key_forms() {
        assert_eq!(property_key(&json!("a1")), "a1");
        assert_eq!(property_key(&json!(7)), "7");
        assert_eq!(property_key(&json!(true)), "true");
        assert_eq!(property_key(&json!(null)), "null");
        assert_eq!(property_key(&json!(["a1"])), "a1");
        assert_eq!(property_key(&json!(["a1", null, ["a2", 3]])), "a1,,a2,3");
        assert_eq!(property_key(&json!({"a1": true})), "[object Object]");
    }

    #[test]
    fn test_integral_floats_render_as_integers() {
        assert_eq!(property_key(&json!(1.0)), "1");
        assert_eq!(property_key(&json!(-0.0)), "0");
        assert_eq!(property_key(&json!(2.5)), "2.5");
        assert_eq!(property_key(&json!([1.0, 2.5])), "1,2.5");
    }

    #[test]
    fn test_loose_equality() {
        assert!(loose_eq(&json!("a1"), &json!("a1")));
        assert!(!loose_eq(&json!("a1"), &json!("a2")));
        assert!(loose_eq(&json!(1), &json!(1.0)));
        assert!(loose_eq(&json!("42"), &json!(42)));
        assert!(loose_eq(&json!(" 42 "), &json!(42)));
        assert!(loose_eq(&json!(""), &json!(0)));
        assert!(!loose_eq(&json!("x"), &json!(0)));
        assert!(loose_eq(&json!(true), &json!(1)));
        assert!(loose_eq(&json!("1"), &json!(true)));
        assert!(!loose_eq(&json!(false), &json!(null)));
        assert!(loose_eq(&json!(null), &json!(null)));
        assert!(loose_eq(&json!({"a": 1}), &json!({"a": 1})));
        assert!(!loose_eq(&json!({"a": 1}), &json!("a")));
        assert!(!loose_eq(&json!([1]), &json!({"0": 1})));
    }

    #[test]
    fn test_loose_equality_of_sequence_and_scalar() {
        assert!(loose_eq(&json!(["ag1"]), &json!("ag1")));
        assert!(loose_eq(&json!("ag1,ag2"), &json!(["ag1", "ag2"])));
        assert!(!loose_eq(&json!(["ag1", "ag2"]), &json!("ag1")));
        assert!(loose_eq(&json!([2]), &json!(2)));
        assert!(loose_eq(&json!([1.0]), &json!("1")));
        assert!(loose_eq(&json!([]), &json!("")));
        assert!(loose_eq(&json!([1]), &json!(true)));
        assert!(!loose_eq(&json!([]), &json!(null)));
    }

    #[test]
    fn test_arrayify() {
        let seq = json!(["urn:a1", "urn:a2"]);
        assert_eq!(arrayify(&seq), vec![&json!("urn:a1"), &json!("urn:a2")]);

        let map = json!({"e1": {"x": 1}, "e2": 2});
        assert_eq!(arrayify(&map), vec![&json!({"x": 1}), &json!(2)]);

        let scalar = json!("urn:a1");
        assert_eq!(arrayify(&scalar), vec![&json!("urn:a1")]);
    }

    #[test]
    fn test_parse_query_value() {
        assert_eq!(parse_query_value("42"), json!(42));
        assert_eq!(parse_query_value("[\"x\",\"y\"]"), json!(["x", "y"]));
        assert_eq!(parse_query_value("{\"a1\": true}"), json!({"a1": true}));
        assert_eq!(parse_query_value("urn:a1"), json!("urn:a1"));
        assert_eq!(parse_query_value("\"quoted\""), json!("quoted"));
    }
}
