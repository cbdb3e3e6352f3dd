//! Recursive module discovery.
//!
//! The collector walks the entry module and everything it reaches through
//! local imports, depth first. Each visited path yields one
//! [`ModuleRecord`] plus one slot in every side channel, so the channels
//! stay positionally aligned with the records:
//!
//! ```text
//! records[i]   ── module identity + local imports
//! externals[i] ── declared-package specifiers seen in records[i]
//! builtins[i]  ── platform-builtin specifiers seen in records[i]
//! warnings[i]  ── non-fatal conditions raised for records[i]
//! ```
//!
//! Nothing here is fatal. A path that does not resolve, cannot be read, or
//! cannot be parsed becomes a placeholder record with no imports and a
//! warning explaining why.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::classify::classify;
use crate::error::Warning;
use crate::languages::SpecifierExtractor;
use crate::manifest::ExternalPackages;
use crate::paths::{absolutize, module_id, normalize};
use crate::resolver::Resolver;
use crate::types::{ImportSpecifier, ModuleRecord, SpecifierKind};

/// Output of one collection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collected {
    /// One record per visited path, in visitation (DFS pre-order) order
    pub records: Vec<ModuleRecord>,
    /// External-package specifiers, aligned with `records`
    pub externals: Vec<Vec<String>>,
    /// Builtin specifiers, aligned with `records`
    pub builtins: Vec<Vec<String>>,
    /// Warnings, aligned with `records`
    pub warnings: Vec<Vec<Warning>>,
}

impl Collected {
    /// Reserve a slot in every channel and return its index.
    fn push_record(&mut self, file: PathBuf, id: String) -> usize {
        let index = self.records.len();
        self.records.push(ModuleRecord {
            file,
            id,
            index,
            imports: Vec::new(),
        });
        self.externals.push(Vec::new());
        self.builtins.push(Vec::new());
        self.warnings.push(Vec::new());
        index
    }
}

/// Walks a project's local imports starting from an entry module.
pub struct Collector<'a> {
    root: PathBuf,
    resolver: Resolver,
    extractor: &'a dyn SpecifierExtractor,
    packages: ExternalPackages,
}

impl std::fmt::Debug for Collector<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collector")
            .field("root", &self.root)
            .field("resolver", &self.resolver)
            .field("packages", &self.packages)
            .finish_non_exhaustive()
    }
}

impl<'a> Collector<'a> {
    /// Create a collector for the project at `root`.
    ///
    /// `root` should be absolute; module identities are computed relative
    /// to it.
    pub fn new(
        root: impl Into<PathBuf>,
        resolver: Resolver,
        extractor: &'a dyn SpecifierExtractor,
        packages: ExternalPackages,
    ) -> Self {
        Self {
            root: normalize(&root.into()),
            resolver,
            extractor,
            packages,
        }
    }

    /// Project root used for module identities.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Visit `entry` and every module it reaches through local imports.
    ///
    /// A relative `entry` is taken relative to the root. An entry that does
    /// not resolve yields a single placeholder record.
    #[must_use]
    pub fn collect(&self, entry: &Path) -> Collected {
        let mut visited: HashSet<PathBuf> = HashSet::new();
        let mut collected = Collected::default();

        // Pending paths, next to visit on top; pushing each module's imports
        // in reverse keeps the visit order depth-first pre-order
        let mut pending: Vec<PathBuf> = vec![absolutize(&self.root, entry)];
        while let Some(path) = pending.pop() {
            if let Some(dependencies) = self.visit(path, &mut visited, &mut collected) {
                pending.extend(dependencies.into_iter().rev());
            }
        }

        debug!(
            root = %self.root.display(),
            modules = collected.records.len(),
            warnings = collected.warnings.iter().map(Vec::len).sum::<usize>(),
            "Collection complete"
        );
        collected
    }

    /// Record one module and return the local paths it imports.
    ///
    /// `None` for paths already visited and for placeholders.
    fn visit(
        &self,
        path: PathBuf,
        visited: &mut HashSet<PathBuf>,
        out: &mut Collected,
    ) -> Option<Vec<PathBuf>> {
        let resolved = self.resolver.resolve(&path).map(|r| normalize(&r.path));
        let file = match &resolved {
            Ok(file) => file.clone(),
            Err(_) => path.clone(),
        };
        if !visited.insert(file.clone()) {
            return None;
        }

        let id = module_id(&self.root, &file);
        let index = out.push_record(file.clone(), id.clone());

        if let Err(e) = resolved {
            warn!(module = %id, error = %e, "Module not found, recording placeholder");
            out.warnings[index].push(Warning::file_not_found(&id, &path));
            return None;
        }

        let local_paths = self.read_module(&file, &id, index, out)?;

        debug!(
            module = %id,
            index,
            local_imports = out.records[index].imports.len(),
            "Visited module"
        );
        Some(local_paths)
    }

    /// Read and classify one module's imports into slot `index`.
    ///
    /// Returns the paths to visit next, or `None` when the module has to
    /// stay a placeholder.
    fn read_module(
        &self,
        file: &Path,
        id: &str,
        index: usize,
        out: &mut Collected,
    ) -> Option<Vec<PathBuf>> {
        let specifiers = match self.extract(file) {
            Ok(specifiers) => specifiers,
            Err(message) => {
                warn!(module = %id, error = %message, "Extraction failed, recording placeholder");
                out.warnings[index].push(Warning::extraction_failed(id, message));
                return None;
            }
        };

        let dir = file.parent().unwrap_or(&self.root);
        let mut local_paths: Vec<PathBuf> = Vec::new();

        for specifier in specifiers {
            let text = specifier.text;
            match classify(&text, &self.packages) {
                SpecifierKind::Local => {
                    let dependency = self.resolve_local(dir, &text);
                    let dependency_id = module_id(&self.root, &dependency);
                    trace!(module = %id, specifier = %text, resolved = %dependency_id, "Local import");

                    let imports = &mut out.records[index].imports;
                    if !imports.contains(&dependency_id) {
                        imports.push(dependency_id);
                        local_paths.push(dependency);
                    }
                }
                SpecifierKind::Builtin => out.builtins[index].push(text),
                SpecifierKind::External => out.externals[index].push(text),
                SpecifierKind::Unknown => {
                    trace!(module = %id, specifier = %text, "Unknown import specifier");
                    out.warnings[index].push(Warning::unknown_specifier(id, &text));
                }
            }
        }

        Some(local_paths)
    }

    fn extract(&self, file: &Path) -> Result<Vec<ImportSpecifier>, String> {
        let source = std::fs::read_to_string(file)
            .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
        self.extractor
            .extract(file, &source)
            .map_err(|e| e.to_string())
    }

    /// Resolved path of a local specifier, or the literal joined path when
    /// nothing on disk matches.
    fn resolve_local(&self, dir: &Path, specifier: &str) -> PathBuf {
        let joined = normalize(&dir.join(specifier));
        match self.resolver.resolve(&joined) {
            Ok(resolved) => normalize(&resolved.path),
            Err(_) => joined,
        }
    }
}
