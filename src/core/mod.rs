//! Core library types for indexing and querying JSON documents
//!
//! - [`value`]: classification and coercion helpers over `serde_json::Value`
//! - [`entry`]: document nodes paired with the tag they were found under
//! - [`flatten`]: the depth-first walk that builds a registry
//! - [`matcher`]: the three-tier matching rule used by filters
//! - [`indexed`]: the query surface, [`IndexedJson`]
//! - [`pipeline`]: chained query steps

pub mod entry;
pub mod flatten;
pub mod indexed;
pub mod matcher;
pub mod pipeline;
pub mod value;

pub use entry::Entry;
pub use flatten::{flatten, flatten_entry};
pub use indexed::IndexedJson;
pub use matcher::matches;
pub use pipeline::Step;
pub use value::parse_query_value;
