//! # modgraph: Static Module Dependency Graphs
//!
//! modgraph walks a JavaScript or TypeScript project from an entry file,
//! discovers every locally reachable module, and answers structural
//! questions about the resulting graph: build order, circular imports,
//! leaf modules, mutually dependent pairs, and the chain of imports that
//! led to any module.
//!
//! ## Design Philosophy
//!
//! - **Best effort** - Missing files and unknown imports become warnings and
//!   placeholder nodes, never silent drops
//! - **Deterministic** - Same filesystem, same output, order included
//! - **Pluggable collaborators** - Specifier extraction and manifest reading
//!   sit behind traits with tree-sitter and `package.json` defaults
//! - **Library only** - No CLI, no file writing; outputs implement `Serialize`
//!
//! ## Quick Start
//!
//! ```no_run
//! use modgraph::{Analysis, Config};
//! use std::path::Path;
//!
//! let config = Config::new("/path/to/project");
//! let analysis = Analysis::run(Path::new("src/index.ts"), &config)?;
//!
//! for cycle in analysis.cycles() {
//!     println!("cycle: {}", cycle.display_chain());
//! }
//! println!("{}", analysis.render_text());
//! # Ok::<(), modgraph::Error>(())
//! ```

pub mod classify;
pub mod collect;
pub mod config;
mod error;
pub mod graph;
pub mod languages;
pub mod manifest;
pub mod paths;
pub mod resolver;
mod types;

pub use collect::{Collected, Collector};
pub use config::Config;
pub use error::{Error, Result, Warning, WarningKind};
pub use graph::{DependencyChains, DependencyGraph};
pub use languages::{JsExtractor, SpecifierExtractor};
pub use manifest::{ExternalPackages, PackageJson, PackageProvider};
pub use resolver::Resolver;
pub use types::{
    Cycle, CycleKind, DEFAULT_EXTENSIONS, DependencyAnalysis, ImportKind, ImportSpecifier,
    ModuleRecord, ResolvedModule, SpecifierKind,
};

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use serde::Serialize;
use tracing::{debug, info};

/// Result of one analysis pass over a project.
///
/// Construction collects and analyzes the graph once; every accessor is a
/// read of that snapshot or a pure computation over it.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    #[serde(skip)]
    root: PathBuf,
    entry: String,
    #[serde(rename = "dependency_graph")]
    graph: DependencyGraph,
    #[serde(flatten)]
    analysis: DependencyAnalysis,
    external_packages: Vec<String>,
    platform_modules: Vec<String>,
    warnings: Vec<Warning>,
}

impl Analysis {
    /// Analyze the project described by `config`, starting at `entry`.
    ///
    /// Uses [`JsExtractor`] for specifiers and [`PackageJson`] for declared
    /// dependencies. A relative `entry` is taken relative to the root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryNotResolvable`] if `entry` does not resolve to a
    /// source file, [`Error::Config`] for an invalid configuration, and
    /// [`Error::Manifest`] for a malformed `package.json`.
    pub fn run(entry: &Path, config: &Config) -> Result<Self> {
        Self::with_collaborators(entry, config, &JsExtractor, &config.package_json())
    }

    /// Analyze with caller-supplied collaborators.
    ///
    /// # Errors
    ///
    /// Same as [`Analysis::run`], plus whatever `packages` returns.
    pub fn with_collaborators(
        entry: &Path,
        config: &Config,
        extractor: &dyn SpecifierExtractor,
        packages: &dyn PackageProvider,
    ) -> Result<Self> {
        config.validate()?;
        let root = config.absolute_root()?;

        let mut declared = packages.declared_dependencies(&root)?;
        declared.extend(config.extra_packages.iter().cloned());

        let resolver = config.resolver();
        let entry_path = paths::absolutize(&root, entry);
        if let Err(e) = resolver.resolve(&entry_path) {
            debug!(entry = %entry.display(), error = %e, "Entry did not resolve");
            return Err(Error::EntryNotResolvable {
                path: entry.to_path_buf(),
            });
        }

        let collected = Collector::new(&root, resolver, extractor, declared).collect(&entry_path);
        let entry_id = collected
            .records
            .first()
            .map(|record| record.id.clone())
            .unwrap_or_default();

        let graph = graph::from_records(&collected.records);
        let analysis = graph::analyze(&graph);

        let analysis = Self {
            root,
            entry: entry_id,
            graph,
            analysis,
            external_packages: first_seen(collected.externals),
            platform_modules: first_seen(collected.builtins),
            warnings: graph::flatten(collected.warnings),
        };

        info!(
            entry = %analysis.entry,
            modules = analysis.graph.len(),
            cycles = analysis.analysis.circular_dependencies.len(),
            warnings = analysis.warnings.len(),
            "Analysis complete"
        );
        Ok(analysis)
    }

    /// Absolute project root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Identity of the entry module.
    #[must_use]
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Every module, each after its dependencies.
    #[must_use]
    pub fn sort(&self) -> Vec<String> {
        graph::sort(&self.graph)
    }

    /// Module identity → direct local dependencies.
    #[must_use]
    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Declared-package specifiers as written, first occurrence kept.
    #[must_use]
    pub fn external_packages(&self) -> &[String] {
        &self.external_packages
    }

    /// Builtin specifiers as written, first occurrence kept.
    #[must_use]
    pub fn platform_modules(&self) -> &[String] {
        &self.platform_modules
    }

    /// All warnings in visitation order.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Pairs of modules that import each other.
    #[must_use]
    pub fn mutual_pairs(&self) -> Vec<(String, String)> {
        graph::mutual_pairs(&self.graph)
    }

    /// Modules without local dependencies.
    #[must_use]
    pub fn leaves(&self) -> Vec<String> {
        graph::leaves(&self.graph)
    }

    /// Circular dependencies, each chain closed on its first module.
    #[must_use]
    pub fn cycles(&self) -> &[Cycle] {
        &self.analysis.circular_dependencies
    }

    /// Modules on the first-discovered import chain leading to `module`.
    ///
    /// `module` may be an identity, a root-relative path, or an absolute
    /// path.
    #[must_use]
    pub fn dependents(&self, module: impl AsRef<Path>) -> Vec<String> {
        let id = paths::module_id(&self.root, &paths::absolutize(&self.root, module.as_ref()));
        graph::dependents(&self.analysis.dependency_chains, &id)
    }

    /// Module identity → first-discovered chain from a traversal root.
    #[must_use]
    pub fn dependency_chains(&self) -> &DependencyChains {
        &self.analysis.dependency_chains
    }

    /// One full path per leaf reached.
    #[must_use]
    pub fn entry_to_leaf_chains(&self) -> &[Vec<String>] {
        &self.analysis.entry_to_leaf_chains
    }

    /// Cycles, chains, and leaf paths together.
    #[must_use]
    pub fn analysis(&self) -> &DependencyAnalysis {
        &self.analysis
    }

    /// Indented tree view of the graph.
    #[must_use]
    pub fn render_text(&self) -> String {
        graph::render_text(&self.graph)
    }
}

/// Flatten a side channel, keeping the first occurrence of each specifier.
fn first_seen(channel: Vec<Vec<String>>) -> Vec<String> {
    channel
        .into_iter()
        .flatten()
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}
