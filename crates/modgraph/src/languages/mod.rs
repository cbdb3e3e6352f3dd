//! Import specifier extraction.
//!
//! The collector only needs an ordered list of raw specifiers per module.
//! [`SpecifierExtractor`] is that seam; [`javascript::JsExtractor`] is the
//! tree-sitter implementation used by default.
//!
//! ## Adding a New Extractor
//!
//! 1. Implement `SpecifierExtractor` (source order, literals only)
//! 2. Pass it to `Collector::new` or `Analysis::with_collaborators`

pub mod javascript;
mod tree_sitter_utils;

use std::path::Path;

use crate::error::Result;
use crate::types::ImportSpecifier;

pub use javascript::JsExtractor;

/// Extracts raw import specifiers from a module's source text.
pub trait SpecifierExtractor {
    /// Return every statically determinable specifier in `source`, in source
    /// order. `path` identifies the module (e.g. to pick a grammar).
    ///
    /// Computed specifiers (identifiers, interpolated templates) are skipped,
    /// not reported as errors.
    ///
    /// # Errors
    ///
    /// Returns an error when the source cannot be parsed at all; the
    /// collector turns it into a warning for this module.
    fn extract(&self, path: &Path, source: &str) -> Result<Vec<ImportSpecifier>>;
}

/// Grammar used to parse a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLanguage {
    /// TypeScript (`.ts`, `.mts`, `.cts`)
    TypeScript,
    /// TypeScript with JSX (`.tsx`)
    Tsx,
    /// JavaScript, JSX included (`.js`, `.jsx`, `.mjs`, `.cjs`)
    JavaScript,
}

impl SourceLanguage {
    /// Detect the grammar from a file extension.
    ///
    /// # Returns
    ///
    /// `None` if the extension is not recognized.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            _ => None,
        }
    }

    /// Get the tree-sitter language for parsing.
    #[must_use]
    pub fn tree_sitter_language(&self) -> tree_sitter::Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}
