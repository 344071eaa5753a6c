//! Document reading and parsing
//!
//! Documents are read whole into a `serde_json::Value`. JSON is the default
//! format; YAML files are accepted too and land in the same value model, so
//! every query behaves identically whichever format a document came from.

use crate::error::{IdxJsonError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// Detect the format from a file extension
    ///
    /// `.yaml` and `.yml` are YAML; anything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "yaml" | "yml" => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Configuration for the document reader
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Maximum file size to read (in bytes)
    pub max_file_size: Option<usize>,
    /// Force a format instead of detecting it from the extension
    pub format: Option<InputFormat>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_file_size: Some(10 * 1024 * 1024), // 10MB default limit
            format: None,
        }
    }
}

/// Document reader
#[derive(Debug, Clone, Default)]
pub struct DocumentReader {
    config: ReaderConfig,
}

impl DocumentReader {
    /// Create a new reader with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new reader with custom configuration
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a document from a file path
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<Value> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(IdxJsonError::file_not_found(path));
        }

        if !path.is_file() {
            return Err(IdxJsonError::invalid_file_format(path));
        }

        if let Some(max_size) = self.config.max_file_size {
            let metadata = fs::metadata(path)?;

            if metadata.len() as usize > max_size {
                return Err(IdxJsonError::validation(format!(
                    "File too large: {} bytes (limit: {} bytes)",
                    metadata.len(),
                    max_size
                )));
            }
        }

        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => IdxJsonError::permission_denied(path),
            _ => IdxJsonError::Io(e),
        })?;

        let format = self
            .config
            .format
            .unwrap_or_else(|| InputFormat::from_path(path));
        debug!("Reading {} as {:?}", path.display(), format);

        self.parse_content(&content, format, Some(path))
    }

    /// Parse a document from string content
    ///
    /// Blank content is an empty (`null`) document.
    pub fn parse_content(
        &self,
        content: &str,
        format: InputFormat,
        path: Option<&Path>,
    ) -> Result<Value> {
        if content.trim().is_empty() {
            return Ok(Value::Null);
        }

        let parsed: std::result::Result<Value, String> = match format {
            InputFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            InputFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        };

        parsed.map_err(|reason| {
            IdxJsonError::invalid_document(path.unwrap_or_else(|| Path::new("<input>")), reason)
        })
    }
}
