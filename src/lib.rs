//! idxjson: in-memory indexing and querying of nested JSON documents
//!
//! Every mapping or sequence reachable from a document root becomes an
//! addressable node, tagged with the property name it was found under. Nodes
//! can then be looked up by tag, by a sibling property's value, or by value
//! matching, and narrowed step by step without a schema. The library was
//! built for provenance documents (`entity`, `activity`, `agent`, relation
//! records keyed by identifier) but knows nothing about any vocabulary.
//!
//! # Features
//!
//! - **Flattening** of any JSON tree into an ordered registry of nodes
//! - **Tag lookup** through a lazily built index
//! - **Filtering** by key existence, by key/value and by any value, with
//!   positional sequence matching and key-membership queries
//! - **Traversal** one level down through a key, chainable with filters
//! - **Document I/O** for JSON and YAML files, including directory walking
//!
//! # Quick Start
//!
//! ```rust
//! use idxjson::IndexedJson;
//! use serde_json::json;
//!
//! let doc = json!({
//!     "entity": {
//!         "e1": {"prov:type": "document"},
//!         "e2": {"prov:type": "figure"}
//!     },
//!     "wasGeneratedBy": {
//!         "_:g1": {"prov:entity": "e2", "prov:activity": "a1"}
//!     }
//! });
//! let index = IndexedJson::new(&doc);
//!
//! // Lookup by tag
//! assert!(index.get_by_tag("e1").is_some());
//!
//! // Lookup by key/value
//! assert_eq!(index.tag_of("prov:entity", &json!("e2")), Some("_:g1"));
//!
//! // Chained traversal and filtering
//! let figures = index
//!     .children_of("entity")
//!     .filter("prov:type", Some(&json!("figure")));
//! assert_eq!(figures.collect_keys(None), vec!["e2"]);
//!
//! // Membership: which generations produced e1 or e2?
//! let produced = index.filter("prov:entity", Some(&json!({"e1": true, "e2": true})));
//! assert_eq!(produced.len(), 1);
//! ```
//!
//! ## Reading Documents
//!
//! ```rust,no_run
//! use idxjson::{DocumentReader, IndexedJson, Result};
//!
//! fn main() -> Result<()> {
//!     let document = DocumentReader::new().read_file("prov.json")?;
//!     let index = IndexedJson::new(&document);
//!     println!("{} nodes", index.len());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`]: flattening, matching and the query surface
//! - [`io`]: reading documents and resolving input paths
//! - [`error`]: error types for everything outside the query surface
//!
//! Queries themselves never fail. A tag, key or value with no match yields
//! `None` or an empty result.

// Public API exports
pub use crate::error::{ErrorSeverity, IdxJsonError, Result};

// Core types
pub use crate::core::{matches, parse_query_value, Entry, IndexedJson, Step};

// IO types
pub use crate::io::{
    DocumentReader, FileResolver, InputFormat, ReaderConfig, ResolvedFile, ResolverConfig,
};

pub mod core;
pub mod error;
pub mod io;

// CLI components are available only in the binary, not as part of the library API

/// Convenience functions for common operations
pub mod convenience {
    //! Convenience functions that provide simple APIs for common use cases
    //!
    //! Each call reads its document afresh with default settings, so these are
    //! best suited to one-off lookups in scripts.

    pub use crate::io::convenience::*;

    use crate::{IndexedJson, Result};
    use serde_json::Value;
    use std::path::Path;

    /// Quick way to get the node tagged `tag` from a file
    pub fn get_by_tag<P: AsRef<Path>>(path: P, tag: &str) -> Result<Option<Value>> {
        let document = read_document(path)?;
        let index = IndexedJson::new(&document);
        Ok(index.get_by_tag(tag).map(|entry| entry.value().clone()))
    }

    /// Quick way to get every tag in a file, in document order
    pub fn tags<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let document = read_document(path)?;
        let index = IndexedJson::new(&document);
        Ok(index.tags().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_end_to_end_workflow() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let content = r#"{
            "activity": {"a1": {"prov:startTime": "2020-01-01"}},
            "used": {"_:u1": {"prov:activity": "a1", "prov:entity": "e1"}}
        }"#;
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let document = DocumentReader::new().read_file(temp_file.path()).unwrap();
        let index = IndexedJson::new(&document);

        assert_eq!(
            index.get_by_tag("a1").unwrap().value(),
            &json!({"prov:startTime": "2020-01-01"})
        );
        assert_eq!(index.tag_of("prov:activity", &json!("a1")), Some("_:u1"));
    }

    #[test]
    fn test_convenience_functions() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(br#"{"agent": {"ag1": {"prov:type": "prov:Person"}}}"#)
            .unwrap();
        temp_file.flush().unwrap();

        let ag1 = convenience::get_by_tag(temp_file.path(), "ag1").unwrap();
        assert_eq!(ag1, Some(json!({"prov:type": "prov:Person"})));

        let missing = convenience::get_by_tag(temp_file.path(), "ag2").unwrap();
        assert_eq!(missing, None);

        let tags = convenience::tags(temp_file.path()).unwrap();
        assert_eq!(tags, vec!["agent", "ag1"]);
    }

    #[test]
    fn test_error_handling() {
        let result = convenience::read_document("/nonexistent/prov.json");
        assert!(matches!(result, Err(IdxJsonError::FileNotFound { .. })));

        let step = "sideways:entity".parse::<Step>();
        assert!(matches!(step, Err(IdxJsonError::InvalidQuery { .. })));
    }
}
