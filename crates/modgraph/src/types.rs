//! Domain types for module graph analysis.
//!
//! - **Resolution**: `ResolvedModule` (resolver output)
//! - **Extraction**: `ImportSpecifier`, `ImportKind` (extractor output)
//! - **Classification**: `SpecifierKind`
//! - **Collection**: `ModuleRecord` (one per visited module)
//! - **Results**: `Cycle`, `DependencyAnalysis`

use serde::Serialize;
use std::path::PathBuf;

use crate::graph::DependencyChains;

/// Source extensions recognized by the resolver, in priority order.
///
/// When several siblings share a base name the first extension listed here
/// wins, so resolution never depends on directory enumeration order.
pub const DEFAULT_EXTENSIONS: [&str; 8] = ["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// A path resolved to exactly one existing source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedModule {
    /// Absolute (or caller-relative) path of the resolved file
    pub path: PathBuf,
    /// Extension of the resolved file, without the leading dot
    pub extension: String,
    /// Whether the input named a directory and its `index` file was chosen
    pub is_directory_index: bool,
}

/// How an import specifier appeared in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    /// `import x from "m"`, `import "m"`, `import type { X } from "m"`
    Static,
    /// `export { x } from "m"`, `export * from "m"`
    ReExport,
    /// `import("m")`, awaited or not
    Dynamic,
    /// `require("m")` and `require("m").prop`
    Require,
    /// `import x = require("m")`
    ImportEquals,
}

impl ImportKind {
    /// Convert to a stable string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::ReExport => "re_export",
            Self::Dynamic => "dynamic",
            Self::Require => "require",
            Self::ImportEquals => "import_equals",
        }
    }
}

/// A raw module specifier extracted from a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSpecifier {
    /// The specifier text with quotes removed (e.g. `./utils`, `node:fs`)
    pub text: String,
    /// The syntactic form the specifier appeared in
    pub kind: ImportKind,
    /// Line number (1-indexed)
    pub line: u32,
}

impl ImportSpecifier {
    /// Create a new specifier.
    #[must_use]
    pub fn new(text: impl Into<String>, kind: ImportKind, line: u32) -> Self {
        Self {
            text: text.into(),
            kind,
            line,
        }
    }
}

/// Category of an import specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecifierKind {
    /// Relative path into the project (`./x`, `../y`)
    Local,
    /// Platform builtin module (`fs`, `node:path`)
    Builtin,
    /// Declared third-party package
    External,
    /// Anything else; surfaced as a warning
    Unknown,
}

/// Everything the collector learned about one visited module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRecord {
    /// Absolute path of the module (the unresolved path for placeholders)
    pub file: PathBuf,
    /// Root-relative module identity
    pub id: String,
    /// Visitation index, equal to the record's position in visitation order
    pub index: usize,
    /// Identities of direct local dependencies, in source order
    pub imports: Vec<String>,
}

/// Tag carried by every detected cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleKind {
    /// A chain of local dependencies returning to its start
    Circular,
}

/// A circular dependency.
///
/// The chain starts and ends with the same module. Two cycles are equal
/// only when their chains are equal as sequences, so rotations of the same
/// loop discovered from different roots are distinct values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Cycle {
    /// Modules in dependency order, first element repeated at the end
    pub chain: Vec<String>,
    /// Always [`CycleKind::Circular`]
    #[serde(rename = "type")]
    pub kind: CycleKind,
}

impl Cycle {
    /// Create a circular dependency from a closed chain.
    #[must_use]
    pub fn circular(chain: Vec<String>) -> Self {
        Self {
            chain,
            kind: CycleKind::Circular,
        }
    }

    /// Render the chain as `a -> b -> a`.
    #[must_use]
    pub fn display_chain(&self) -> String {
        self.chain.join(" -> ")
    }
}

/// Output of the cycle and chain analyzer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyAnalysis {
    /// De-duplicated cycles, in discovery order
    pub circular_dependencies: Vec<Cycle>,
    /// Path from a traversal root to each module, inclusive, keyed in
    /// completion order
    pub dependency_chains: DependencyChains,
    /// One root-to-leaf path per leaf reached
    pub entry_to_leaf_chains: Vec<Vec<String>>,
}
