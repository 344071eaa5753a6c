//! Reading documents from disk
//!
//! The query core never performs I/O; this module turns paths into parsed
//! document values for it.

pub mod reader;
pub mod resolver;

pub use reader::{DocumentReader, InputFormat, ReaderConfig};
pub use resolver::{FileResolver, ResolvedFile, ResolverConfig};

/// Convenience functions that use default reader and resolver settings
pub mod convenience {
    use super::*;
    use crate::error::Result;
    use serde_json::Value;
    use std::path::{Path, PathBuf};

    /// Read and parse a single document
    pub fn read_document<P: AsRef<Path>>(path: P) -> Result<Value> {
        DocumentReader::new().read_file(path)
    }

    /// Parse a JSON document from a string
    pub fn parse_document(content: &str) -> Result<Value> {
        DocumentReader::new().parse_content(content, InputFormat::Json, None)
    }

    /// Resolve paths to document files with default settings
    pub fn resolve_documents<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PathBuf>> {
        let resolved = FileResolver::new().resolve_paths(paths)?;
        Ok(resolved.into_iter().map(|f| f.path().to_path_buf()).collect())
    }
}
