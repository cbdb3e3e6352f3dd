//! Module path resolution for JavaScript and TypeScript sources.
//!
//! Maps a path fragment as written in an import (with or without extension,
//! or naming a directory) to exactly one existing source file. Resolution is
//! a pure function of the filesystem at call time; nothing is cached.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{trace, warn};

use crate::error::{Error, Result};
use crate::types::{DEFAULT_EXTENSIONS, ResolvedModule};

/// Base name of the file chosen when a directory is imported.
const INDEX_FILE: &str = "index";

/// Resolves path fragments to source files using a prioritized extension list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolver {
    extensions: Vec<String>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

impl Resolver {
    /// Create a resolver recognizing `extensions`, highest priority first.
    #[must_use]
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// Recognized extensions in priority order.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Whether `ext` (without the leading dot) is a recognized source extension.
    #[must_use]
    pub fn is_recognized(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }

    /// Resolve `path` to an existing source file.
    ///
    /// A recognized extension in `path` is kept when that exact file exists.
    /// Otherwise the sibling with the highest-priority extension wins, which
    /// maps `util.js` onto `util.ts`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotResolvable`] when neither a sibling file with a
    /// recognized extension nor a directory index matches.
    pub fn resolve(&self, path: &Path) -> Result<ResolvedModule> {
        if path.is_dir() {
            return self
                .resolve_directory_index(path)
                .ok_or_else(|| not_resolvable(path));
        }

        if let Some(resolved) = self.resolve_file(path) {
            return Ok(resolved);
        }

        // A directory import the filesystem layer did not report as one
        self.resolve_directory_index(path)
            .ok_or_else(|| not_resolvable(path))
    }

    /// Match `path` against its sibling files.
    fn resolve_file(&self, path: &Path) -> Option<ResolvedModule> {
        let file_name = path.file_name()?.to_str()?;
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let (base, given_ext) = self.split_name(file_name);

        let available: HashSet<String> = list_files(dir)
            .iter()
            .filter_map(|name| match self.split_name(name) {
                (stem, Some(ext)) if stem == base => Some(ext.to_string()),
                _ => None,
            })
            .collect();
        // An explicit extension wins when that exact file exists
        let matched = given_ext
            .and_then(|ext| self.extensions.iter().find(|e| *e == ext && available.contains(*e)))
            .or_else(|| self.extensions.iter().find(|e| available.contains(*e)))?;

        let resolved = match given_ext {
            None => {
                let mut with_ext = OsString::from(path.as_os_str());
                with_ext.push(".");
                with_ext.push(matched);
                PathBuf::from(with_ext)
            }
            Some(ext) if ext == matched => path.to_path_buf(),
            Some(ext) => {
                trace!(
                    path = %path.display(),
                    given = ext,
                    matched = %matched,
                    "Correcting import extension"
                );
                dir.join(format!("{base}.{matched}"))
            }
        };

        Some(ResolvedModule {
            path: resolved,
            extension: matched.clone(),
            is_directory_index: false,
        })
    }

    /// Find `index.<ext>` directly inside `dir`, by extension priority.
    fn resolve_directory_index(&self, dir: &Path) -> Option<ResolvedModule> {
        if !dir.is_dir() {
            return None;
        }

        let files: HashSet<String> = list_files(dir).into_iter().collect();
        let ext = self
            .extensions
            .iter()
            .find(|ext| files.contains(&format!("{INDEX_FILE}.{ext}")))?;

        Some(ResolvedModule {
            path: dir.join(format!("{INDEX_FILE}.{ext}")),
            extension: ext.clone(),
            is_directory_index: true,
        })
    }

    /// Split a file name into base name and recognized extension.
    ///
    /// Only a trailing recognized extension is split off, so `app.test`
    /// stays whole and `app.test.ts` splits into `app.test` + `ts`.
    fn split_name<'a>(&self, file_name: &'a str) -> (&'a str, Option<&'a str>) {
        match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && self.is_recognized(ext) => (stem, Some(ext)),
            _ => (file_name, None),
        }
    }
}

/// Names of the regular files directly inside `dir`.
///
/// An unreadable directory yields no names; the caller reports the module
/// as unresolvable.
fn list_files(dir: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    directory = %dir.display(),
                    error = %e,
                    "Cannot read directory while resolving module"
                );
            }
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(
                    directory = %dir.display(),
                    error = %e,
                    "Failed to read directory entry, skipping"
                );
                None
            }
        })
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect()
}

fn not_resolvable(path: &Path) -> Error {
    Error::NotResolvable {
        path: path.to_path_buf(),
    }
}
