//! Indexed, queryable view over a JSON document
//!
//! An [`IndexedJson`] holds the registry of every mapping and sequence node
//! reachable from a document root, each tagged with the property name it was
//! found under. Queries never modify an instance: narrowing operations
//! return a new instance over a fresh registry that shares the same document
//! nodes, so queries can be chained.
//!
//! ```rust
//! use idxjson::IndexedJson;
//! use serde_json::json;
//!
//! let doc = json!({"activity": {"a1": {"prov:startTime": "2020-01-01"}}});
//! let index = IndexedJson::new(&doc);
//!
//! let a1 = index.get_by_tag("a1").unwrap();
//! assert_eq!(a1.value(), &json!({"prov:startTime": "2020-01-01"}));
//! assert_eq!(index.collect_keys(None), vec!["activity", "a1"]);
//! ```

use crate::core::entry::Entry;
use crate::core::flatten::{flatten, flatten_entry};
use crate::core::matcher::matches;
use crate::core::value::{arrayify, is_node, is_truthy};
use log::trace;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::Value;
use std::cell::OnceCell;
use std::collections::HashMap;

/// A flattened, queryable registry of document nodes
#[derive(Debug, Clone, Default)]
pub struct IndexedJson<'a> {
    registry: Vec<Entry<'a>>,
    index: OnceCell<HashMap<&'a str, usize>>,
}

impl<'a> IndexedJson<'a> {
    /// Index a document
    ///
    /// A `null` or scalar document produces an empty instance on which every
    /// query returns an empty or `None` result.
    pub fn new(document: &'a Value) -> Self {
        let registry = flatten(document);
        trace!("indexed document into {} entries", registry.len());
        Self::from_entries(registry)
    }

    /// Index the subtree below an existing entry
    ///
    /// The entry keeps its tag and sits at position 0.
    pub fn from_entry(entry: Entry<'a>) -> Self {
        Self::from_entries(flatten_entry(entry))
    }

    /// Wrap an already-built registry
    pub fn from_entries(registry: Vec<Entry<'a>>) -> Self {
        Self {
            registry,
            index: OnceCell::new(),
        }
    }

    /// Number of entries in the registry
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// The registry, in flattening order
    pub fn entries(&self) -> &[Entry<'a>] {
        &self.registry
    }

    /// Iterate over the registry
    pub fn iter(&self) -> std::slice::Iter<'_, Entry<'a>> {
        self.registry.iter()
    }

    /// The first entry of the registry
    pub fn first(&self) -> Option<Entry<'a>> {
        self.registry.first().copied()
    }

    /// Look up the first entry carrying `tag`
    ///
    /// The tag index is built on first use and kept for the lifetime of the
    /// instance. Later entries sharing a tag are not reachable here but still
    /// take part in filtering and value collection.
    pub fn get_by_tag(&self, tag: &str) -> Option<Entry<'a>> {
        let index = self.index.get_or_init(|| self.build_index());
        index.get(tag).map(|&position| self.registry[position])
    }

    /// Combined accessor: tag lookup without a value, key/value lookup with one
    pub fn get(&self, key: &str, value: Option<&Value>) -> Option<Entry<'a>> {
        match value {
            Some(value) => self.get_by_key_value(key, value),
            None => self.get_by_tag(key),
        }
    }

    /// First entry whose `key` property matches `value`
    pub fn get_by_key_value(&self, key: &str, value: &Value) -> Option<Entry<'a>> {
        self.first_match(key, value)
    }

    /// Tag of the first entry whose `key` property matches `value`
    ///
    /// `None` when nothing matches or when the match is untagged.
    pub fn tag_of(&self, key: &str, value: &Value) -> Option<&'a str> {
        self.first_match(key, value).and_then(|entry| entry.tag())
    }

    /// Collect values from the registry
    ///
    /// Without a key, every entry's node in registry order. With a key, the
    /// arrayified `key` property of every entry that has it: sequence elements
    /// and mapping values are spread in, scalars are kept as they are.
    pub fn collect_values(&self, key: Option<&str>) -> Vec<&'a Value> {
        match key {
            None => self.registry.iter().map(|entry| entry.value()).collect(),
            Some(key) => self
                .with_property(key)
                .flat_map(arrayify)
                .collect(),
        }
    }

    /// Collect keys from the registry
    ///
    /// Without a key, the tag of every tagged entry. With a key, the property
    /// names of the mapping held in each entry's `key` property.
    pub fn collect_keys(&self, key: Option<&str>) -> Vec<&'a str> {
        match key {
            None => self.tags().collect(),
            Some(key) => self
                .registry
                .iter()
                .filter_map(|entry| entry.property(key))
                .filter_map(Value::as_object)
                .flat_map(|map| map.keys().map(String::as_str))
                .collect(),
        }
    }

    /// Tags of every tagged entry, in registry order
    pub fn tags(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.registry.iter().filter_map(|entry| entry.tag())
    }

    /// Keep the entries that have a `key` property, optionally matching `value`
    ///
    /// Without a value this is an existence filter.
    pub fn filter(&self, key: &str, value: Option<&Value>) -> IndexedJson<'a> {
        let registry: Vec<_> = self
            .registry
            .iter()
            .filter(|entry| Self::entry_matches(entry, key, value))
            .copied()
            .collect();
        trace!(
            "filter on '{}' kept {} of {} entries",
            key,
            registry.len(),
            self.registry.len()
        );
        Self::from_entries(registry)
    }

    /// Keep the entries with at least one property matching `value`
    pub fn filter_by_value(&self, value: &Value) -> IndexedJson<'a> {
        let registry: Vec<_> = self
            .registry
            .iter()
            .filter(|entry| entry.properties().any(|(_, prop)| matches(prop, value)))
            .copied()
            .collect();
        trace!(
            "value filter kept {} of {} entries",
            registry.len(),
            self.registry.len()
        );
        Self::from_entries(registry)
    }

    /// Descend one level through `key`
    ///
    /// The new registry holds the nodes found inside each entry's `key`
    /// property: values of a mapping keep their own key as tag, elements of a
    /// sequence are untagged, and scalars are dropped.
    pub fn children_of(&self, key: &str) -> IndexedJson<'a> {
        let mut registry = Vec::new();
        for entry in &self.registry {
            match entry.property(key).filter(|prop| is_truthy(prop)) {
                Some(Value::Object(map)) => registry.extend(
                    map.iter()
                        .filter(|(_, child)| is_node(child))
                        .map(|(tag, child)| Entry::tagged(tag, child)),
                ),
                Some(Value::Array(items)) => registry.extend(
                    items
                        .iter()
                        .filter(|child| is_node(child))
                        .map(Entry::new),
                ),
                _ => {}
            }
        }
        trace!("children of '{}': {} entries", key, registry.len());
        Self::from_entries(registry)
    }

    /// Alias of [`IndexedJson::children_of`]
    pub fn within(&self, key: &str) -> IndexedJson<'a> {
        self.children_of(key)
    }

    fn build_index(&self) -> HashMap<&'a str, usize> {
        let mut index = HashMap::new();
        for (position, entry) in self.registry.iter().enumerate() {
            if let Some(tag) = entry.tag() {
                index.entry(tag).or_insert(position);
            }
        }
        trace!("built tag index with {} tags", index.len());
        index
    }

    fn first_match(&self, key: &str, value: &Value) -> Option<Entry<'a>> {
        self.registry
            .iter()
            .find(|entry| Self::entry_matches(entry, key, Some(value)))
            .copied()
    }

    fn entry_matches(entry: &Entry<'a>, key: &str, value: Option<&Value>) -> bool {
        if !entry.has_property(key) {
            return false;
        }
        match (value, entry.property(key)) {
            (None, _) => true,
            (Some(query), Some(prop)) => matches(prop, query),
            (Some(_), None) => false,
        }
    }

    fn with_property<'s>(&'s self, key: &'s str) -> impl Iterator<Item = &'a Value> + 's {
        self.registry
            .iter()
            .filter(move |entry| entry.has_property(key))
            .filter_map(move |entry| entry.property(key))
    }
}

impl PartialEq for IndexedJson<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.registry == other.registry
    }
}

impl<'a, 'i> IntoIterator for &'i IndexedJson<'a> {
    type Item = &'i Entry<'a>;
    type IntoIter = std::slice::Iter<'i, Entry<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.registry.iter()
    }
}

impl Serialize for IndexedJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.registry.len()))?;
        for entry in &self.registry {
            seq.serialize_element(entry)?;
        }
        seq.end()
    }
}
