//! Error types for the idxjson library
//!
//! Query operations never fail: a missing tag, key or value is reported as
//! `None` or an empty result. The errors here cover everything around the
//! index: reading and parsing documents, resolving input paths and parsing
//! chained query steps.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum IdxJsonError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Regular expression errors
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// File not found or invalid path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path exists but is not a regular file
    #[error("Invalid file format: {path} (expected a JSON or YAML file)")]
    InvalidFileFormat { path: PathBuf },

    /// Document content could not be parsed
    #[error("Invalid document {path}: {reason}")]
    InvalidDocument { path: PathBuf, reason: String },

    /// Query step parsing errors
    #[error("Invalid query: {reason}")]
    InvalidQuery { reason: String },

    /// Path resolution errors
    #[error("Path resolution error: {reason}")]
    PathResolution { reason: String },

    /// Permission errors
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Generic validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Multiple errors (for batch operations)
    #[error("Multiple errors occurred ({} failures)", .errors.len())]
    Multiple { errors: Vec<IdxJsonError> },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, IdxJsonError>;

impl IdxJsonError {
    /// Create a new file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new invalid file format error
    pub fn invalid_file_format(path: impl Into<PathBuf>) -> Self {
        Self::InvalidFileFormat { path: path.into() }
    }

    /// Create a new invalid document error
    pub fn invalid_document(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid query error
    pub fn invalid_query(reason: impl Into<String>) -> Self {
        Self::InvalidQuery {
            reason: reason.into(),
        }
    }

    /// Create a new path resolution error
    pub fn path_resolution(reason: impl Into<String>) -> Self {
        Self::PathResolution {
            reason: reason.into(),
        }
    }

    /// Create a new permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a multiple errors wrapper
    pub fn multiple(errors: Vec<IdxJsonError>) -> Self {
        Self::Multiple { errors }
    }

    /// Check if this error is recoverable
    ///
    /// Recoverable errors affect a single document or query; the caller can
    /// skip it and carry on with the rest of a batch.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(io_err) => !matches!(
                io_err.kind(),
                std::io::ErrorKind::NotFound
                    | std::io::ErrorKind::PermissionDenied
                    | std::io::ErrorKind::AlreadyExists
            ),
            Self::FileNotFound { .. } | Self::PermissionDenied { .. } => false,
            Self::InvalidFileFormat { .. }
            | Self::InvalidDocument { .. }
            | Self::InvalidQuery { .. }
            | Self::PathResolution { .. }
            | Self::Validation { .. } => true,
            Self::Json(_) | Self::Yaml(_) | Self::Regex(_) => true,
            Self::Multiple { errors } => errors.iter().any(|e| e.is_recoverable()),
        }
    }

    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::FileNotFound { .. } | Self::PermissionDenied { .. } => ErrorSeverity::Critical,
            Self::InvalidDocument { .. } | Self::Json(_) | Self::Yaml(_) => ErrorSeverity::High,
            Self::InvalidQuery { .. } | Self::Regex(_) => ErrorSeverity::Medium,
            Self::Validation { .. } | Self::PathResolution { .. } => ErrorSeverity::Low,
            Self::Multiple { errors } => errors
                .iter()
                .map(|e| e.severity())
                .max()
                .unwrap_or(ErrorSeverity::Low),
            _ => ErrorSeverity::Medium,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
