//! Resolution of input paths to document files
//!
//! Files are taken as given; directories are walked and filtered down to
//! document extensions. Results are de-duplicated and sorted so batch output
//! is stable.

use crate::error::{IdxJsonError, Result};
use log::debug;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for file resolution
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Follow symbolic links
    pub follow_links: bool,
    /// Maximum recursion depth for directory traversal
    pub max_depth: Option<usize>,
    /// Include hidden files (starting with .)
    pub include_hidden: bool,
    /// File extensions picked up while walking directories
    pub include_extensions: Vec<String>,
    /// Patterns to exclude (glob-style, `*` and `?`)
    pub exclude_patterns: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            follow_links: false,
            max_depth: None,
            include_hidden: false,
            include_extensions: vec!["json".to_string(), "yaml".to_string(), "yml".to_string()],
            exclude_patterns: Vec::new(),
        }
    }
}

/// File resolver for handling multiple files and directories
#[derive(Debug, Clone, Default)]
pub struct FileResolver {
    config: ResolverConfig,
}

/// A resolved document file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    path: PathBuf,
}

impl FileResolver {
    /// Create a new resolver with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new resolver with custom configuration
    pub fn with_config(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Resolve multiple paths to a list of files
    ///
    /// A path that does not exist is an error. Files named explicitly are kept
    /// whatever their extension; files found by walking a directory must carry
    /// one of the configured extensions.
    pub fn resolve_paths<P>(&self, paths: &[P]) -> Result<Vec<ResolvedFile>>
    where
        P: AsRef<Path>,
    {
        let excludes = self.exclude_regexes()?;
        let mut seen_paths = HashSet::new();
        let mut resolved_files = Vec::new();

        for path in paths {
            for file in self.resolve_single_path(path.as_ref())? {
                if excludes.iter().any(|re| re.is_match(&file.path.to_string_lossy())) {
                    debug!("Excluded {}", file.path.display());
                    continue;
                }
                if seen_paths.insert(file.path.clone()) {
                    resolved_files.push(file);
                }
            }
        }

        resolved_files.sort_by(|a, b| a.path.cmp(&b.path));
        debug!("Resolved {} document files", resolved_files.len());
        Ok(resolved_files)
    }

    fn resolve_single_path(&self, path: &Path) -> Result<Vec<ResolvedFile>> {
        if path.is_file() {
            Ok(vec![ResolvedFile {
                path: path.to_path_buf(),
            }])
        } else if path.is_dir() {
            self.traverse_directory(path)
        } else {
            Err(IdxJsonError::file_not_found(path))
        }
    }

    fn traverse_directory(&self, dir_path: &Path) -> Result<Vec<ResolvedFile>> {
        let mut resolved_files = Vec::new();

        let walker = WalkDir::new(dir_path)
            .follow_links(self.config.follow_links)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .into_iter();

        for entry in walker {
            let entry = entry.map_err(|e| {
                IdxJsonError::path_resolution(format!("Error traversing directory: {}", e))
            })?;

            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            if !self.config.include_hidden && is_hidden_file(path) {
                continue;
            }
            if !self.has_document_extension(path) {
                continue;
            }

            resolved_files.push(ResolvedFile {
                path: path.to_path_buf(),
            });
        }

        Ok(resolved_files)
    }

    fn has_document_extension(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();
        self.config
            .include_extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(&ext))
    }

    /// Convert glob-like exclude patterns to anchored regexes
    fn exclude_regexes(&self) -> Result<Vec<Regex>> {
        self.config
            .exclude_patterns
            .iter()
            .map(|pattern| {
                let regex_pattern = regex::escape(pattern)
                    .replace(r"\*", ".*")
                    .replace(r"\?", ".");
                Regex::new(&format!("^{}$", regex_pattern)).map_err(IdxJsonError::from)
            })
            .collect()
    }
}

impl ResolvedFile {
    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn is_hidden_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
