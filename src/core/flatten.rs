//! Flattening of a document into its registry of nodes
//!
//! The walk is depth-first and pre-order: a node is appended before any of
//! its own children, mapping children follow the mapping's declared key
//! order and sequence children follow sequence order. Sequences are
//! transparent for tagging; their elements are walked but never appended or
//! tagged themselves.

use crate::core::entry::Entry;
use crate::core::value::is_node;
use serde_json::Value;

/// Flatten a document root into a registry
///
/// A mapping root is the untagged entry at position 0. A sequence root has
/// each of its elements flattened independently, without the elements
/// themselves becoming entries. Scalar and null roots yield an empty registry.
pub fn flatten(root: &Value) -> Vec<Entry<'_>> {
    let mut registry = Vec::new();
    match root {
        Value::Object(_) => {
            registry.push(Entry::new(root));
            flatten_into(&mut registry, root);
        }
        Value::Array(items) => {
            for item in items {
                flatten_into(&mut registry, item);
            }
        }
        _ => {}
    }
    registry
}

/// Flatten an existing entry, keeping its tag at position 0
///
/// The entry is never re-tagged; its descendants are appended exactly as a
/// flatten of the whole document would have appended them.
pub fn flatten_entry(entry: Entry<'_>) -> Vec<Entry<'_>> {
    let mut registry = vec![entry];
    flatten_into(&mut registry, entry.value());
    registry
}

/// Append every node nested below `value` to `registry`
pub fn flatten_into<'a>(registry: &mut Vec<Entry<'a>>, value: &'a Value) {
    match value {
        Value::Array(items) => {
            for item in items {
                flatten_into(registry, item);
            }
        }
        Value::Object(map) => {
            for (key, child) in map {
                if !is_node(child) {
                    continue;
                }
                registry.push(Entry::tagged(key, child));
                flatten_into(registry, child);
            }
        }
        _ => {}
    }
}
