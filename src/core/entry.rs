//! Registry entries: document nodes paired with the tag they were found under

use crate::core::value;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// A node of the document together with its tag
///
/// The tag is the property name through which the node was discovered in
/// its parent mapping. It lives beside the value rather than inside it, so
/// the document itself is never modified and the tag can never collide with
/// one of the node's own keys.
///
/// Entries borrow the document; copying an entry shares the node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry<'a> {
    tag: Option<&'a str>,
    value: &'a Value,
}

impl<'a> Entry<'a> {
    /// Create an untagged entry
    pub fn new(value: &'a Value) -> Self {
        Self { tag: None, value }
    }

    /// Create an entry tagged with the property name it was found under
    pub fn tagged(tag: &'a str, value: &'a Value) -> Self {
        Self {
            tag: Some(tag),
            value,
        }
    }

    /// Get the tag, if the entry has one
    pub fn tag(&self) -> Option<&'a str> {
        self.tag
    }

    /// Get the underlying document node
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Look up one of the node's own properties
    pub fn property(&self, key: &str) -> Option<&'a Value> {
        value::property(self.value, key)
    }

    /// Check if the node has a truthy property named `key`
    pub fn has_property(&self, key: &str) -> bool {
        value::has_property(self.value, key)
    }

    /// Check if the node has a property named `key`, whatever its value
    pub fn contains_key(&self, key: &str) -> bool {
        self.property(key).is_some()
    }

    /// The node's own property names, in declared order
    ///
    /// Sequence nodes have no keys. The tag is never reported.
    pub fn keys(&self) -> Vec<&'a str> {
        match self.value {
            Value::Object(map) => map.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Iterate over the node's own `(key, value)` properties
    ///
    /// Mapping entries yield their keys; sequence entries yield each element
    /// under its decimal index, the same name [`Entry::property`] accepts.
    pub fn properties(&self) -> Box<dyn Iterator<Item = (Cow<'a, str>, &'a Value)> + 'a> {
        match self.value {
            Value::Object(map) => {
                Box::new(map.iter().map(|(k, v)| (Cow::Borrowed(k.as_str()), v)))
            }
            Value::Array(items) => Box::new(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (Cow::Owned(i.to_string()), v)),
            ),
            _ => Box::new(std::iter::empty()),
        }
    }
}

impl Serialize for Entry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl fmt::Display for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag {
            Some(tag) => write!(f, "{}: {}", tag, self.value),
            None => write!(f, "{}", self.value),
        }
    }
}
