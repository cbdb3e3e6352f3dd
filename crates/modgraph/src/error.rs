//! Error types for modgraph operations.
//!
//! Errors are split into two groups:
//!
//! - **`Error`**: failures that halt an operation (unresolvable entry,
//!   malformed manifest, invalid configuration)
//! - **`Warning`**: per-module conditions that are collected while the graph
//!   is built but never stop the traversal
//!
//! ## Error Philosophy
//!
//! Graph collection is "best effort":
//! - A missing or unreadable module becomes a placeholder node plus a warning
//! - An import that cannot be classified becomes a warning
//! - Only an entry that cannot be resolved is fatal, since there is nothing
//!   to analyze

use std::path::PathBuf;
use thiserror::Error;

/// Result type for modgraph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for modgraph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A path could not be mapped to an existing source file or directory index
    #[error("not resolvable: {} is not a file or directory with a recognized extension", path.display())]
    NotResolvable {
        /// The path that failed to resolve
        path: PathBuf,
    },

    /// The entry module could not be resolved, so there is nothing to analyze
    #[error("entry not resolvable: {}", path.display())]
    EntryNotResolvable {
        /// The entry path as given by the caller
        path: PathBuf,
    },

    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tree-sitter parsing infrastructure failed
    #[error("parser error: {0}")]
    Parser(String),

    /// The package manifest exists but is not valid JSON
    #[error("manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<serde_yaml::Error> for Error {
    fn from(error: serde_yaml::Error) -> Self {
        Self::Config(error.to_string())
    }
}

/// A non-fatal condition encountered while collecting a module.
///
/// Warnings are recorded per visited module and handed back to the caller
/// alongside the graph. Callers must inspect them: a graph key may be a
/// placeholder for a file that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Warning {
    /// Identity of the module the warning was raised for
    pub module: String,
    /// Category of the warning
    pub kind: WarningKind,
    /// Human-readable message
    pub message: String,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.module, self.message, self.kind)
    }
}

impl std::error::Error for Warning {}

/// Categorization of collection warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The module path could not be resolved to a source file
    FileNotFound,

    /// An import specifier is neither local, builtin, nor a declared package
    UnknownSpecifier,

    /// The module exists but its source could not be read or parsed
    ExtractionFailed,
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileNotFound => write!(f, "file not found"),
            Self::UnknownSpecifier => write!(f, "unknown specifier"),
            Self::ExtractionFailed => write!(f, "extraction failed"),
        }
    }
}

impl WarningKind {
    /// Returns `true` if the warning marks a placeholder node in the graph.
    #[must_use]
    pub fn is_missing_module(&self) -> bool {
        matches!(self, Self::FileNotFound | Self::ExtractionFailed)
    }

    /// Returns `true` if the warning points at something in the analyzed
    /// sources the user can fix (a typo or an undeclared dependency).
    #[must_use]
    pub fn is_input_problem(&self) -> bool {
        matches!(self, Self::UnknownSpecifier)
    }
}

impl Warning {
    /// Create a new warning.
    #[must_use]
    pub fn new(module: impl Into<String>, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            kind,
            message: message.into(),
        }
    }

    /// A module path that did not resolve to any file.
    #[must_use]
    pub fn file_not_found(module: impl Into<String>, path: &std::path::Path) -> Self {
        Self::new(
            module,
            WarningKind::FileNotFound,
            format!("file not found: {}", path.display()),
        )
    }

    /// An import specifier that could not be classified.
    #[must_use]
    pub fn unknown_specifier(module: impl Into<String>, specifier: &str) -> Self {
        Self::new(
            module,
            WarningKind::UnknownSpecifier,
            format!("unknown import specifier: {specifier}"),
        )
    }

    /// A module whose source could not be read or handed to the extractor.
    #[must_use]
    pub fn extraction_failed(module: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(module, WarningKind::ExtractionFailed, message)
    }
}
