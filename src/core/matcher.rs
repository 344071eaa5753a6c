//! Matching of a candidate property value against a query value
//!
//! Rules, first applicable wins:
//!
//! 1. Two sequences match when they have the same length and every position
//!    matches recursively. This is positional equality, not a subset test.
//! 2. A keyed query (a mapping, or a sequence indexed by a numeric
//!    candidate) matches when it has a truthy property named after the
//!    candidate. This is how membership is asked: "is `a1` one of the keys of
//!    `{"a1": true, "a2": true}`".
//! 3. Otherwise the values must be loosely equal. A sequence compared with a
//!    scalar goes through its comma-joined form, so a one-element list of
//!    identifiers matches that identifier.

use crate::core::value::{is_truthy, loose_eq, property, property_key};
use serde_json::Value;

/// Check if `candidate` satisfies `query`
pub fn matches(candidate: &Value, query: &Value) -> bool {
    if let (Value::Array(left), Value::Array(right)) = (candidate, query) {
        return left.len() == right.len()
            && left.iter().zip(right).all(|(c, q)| matches(c, q));
    }

    if is_member(candidate, query) {
        return true;
    }

    loose_eq(query, candidate)
}

fn is_member(candidate: &Value, query: &Value) -> bool {
    if !matches!(query, Value::Object(_) | Value::Array(_)) {
        return false;
    }
    property(query, &property_key(candidate))
        .map(is_truthy)
        .unwrap_or(false)
}
