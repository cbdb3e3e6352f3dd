//! `package.json` discovery and parsing.
//!
//! The classifier needs the names of a project's declared dependencies to
//! tell external packages from typos. [`PackageProvider`] is the seam;
//! [`PackageJson`] reads them from `<root>/package.json`.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;

/// File name of the package manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// Names of the packages a project declares as dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalPackages {
    names: BTreeSet<String>,
}

impl ExternalPackages {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package name.
    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// Whether `name` is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Declared names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of declared names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no names are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExternalPackages {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for ExternalPackages {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

/// Source of declared dependency names for a project root.
pub trait PackageProvider {
    /// Read the declared dependency names for the project at `root`.
    ///
    /// # Errors
    ///
    /// Implementations return an error when a manifest exists but cannot be
    /// interpreted.
    fn declared_dependencies(&self, root: &Path) -> Result<ExternalPackages>;
}

/// Reads declared dependencies from `package.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageJson {
    /// Whether `devDependencies` count as declared
    pub include_dev_dependencies: bool,
}

impl Default for PackageJson {
    fn default() -> Self {
        Self {
            include_dev_dependencies: true,
        }
    }
}

/// The parts of `package.json` the classifier cares about.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Manifest {
    #[serde(default)]
    dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    dev_dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    peer_dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    optional_dependencies: BTreeMap<String, serde_json::Value>,
}

impl PackageJson {
    /// Parse declared dependency names from manifest text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Manifest`] if `content` is not a JSON object
    /// with object-valued dependency tables.
    pub fn parse(&self, content: &str) -> Result<ExternalPackages> {
        let manifest: Manifest = serde_json::from_str(content)?;

        let mut packages = ExternalPackages::new();
        packages.extend(manifest.dependencies.into_keys());
        packages.extend(manifest.peer_dependencies.into_keys());
        packages.extend(manifest.optional_dependencies.into_keys());
        if self.include_dev_dependencies {
            packages.extend(manifest.dev_dependencies.into_keys());
        }
        Ok(packages)
    }
}

impl PackageProvider for PackageJson {
    /// A missing manifest is not an error: the project simply declares no
    /// dependencies and every bare specifier is reported as unknown.
    fn declared_dependencies(&self, root: &Path) -> Result<ExternalPackages> {
        let manifest_path = root.join(MANIFEST_FILE);
        let content = match std::fs::read_to_string(&manifest_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(
                    path = %manifest_path.display(),
                    "No package manifest found, assuming no declared dependencies"
                );
                return Ok(ExternalPackages::new());
            }
            Err(e) => return Err(e.into()),
        };

        let packages = self.parse(&content)?;
        debug!(
            path = %manifest_path.display(),
            package_count = packages.len(),
            "Read declared dependencies"
        );
        Ok(packages)
    }
}

impl PackageProvider for ExternalPackages {
    /// A fixed set, independent of the root.
    fn declared_dependencies(&self, _root: &Path) -> Result<ExternalPackages> {
        Ok(self.clone())
    }
}
