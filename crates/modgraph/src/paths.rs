//! Lexical path normalization and module identities.
//!
//! Module identities are root-relative, `/`-separated strings. They are
//! computed lexically (no symlink resolution), so placeholders for files
//! that do not exist get identities the same way real files do.

use std::path::{Component, Path, PathBuf};

/// Fold `.` and `..` segments without touching the filesystem.
///
/// `..` segments that climb above the start of a relative path are kept;
/// `..` at the filesystem root is dropped.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Compute the module identity of `path` relative to `root`.
///
/// Paths outside `root` get leading `..` segments. A path sharing no prefix
/// with `root` at all is returned normalized, with `/` separators.
#[must_use]
pub fn module_id(root: &Path, path: &Path) -> String {
    let root = normalize(root);
    let path = normalize(path);
    to_slash(&relative_to(&root, &path))
}

/// Resolve `path` against `root` when it is relative, then normalize.
#[must_use]
pub fn absolutize(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&root.join(path))
    }
}

fn relative_to(base: &Path, path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix(base) {
        return stripped.to_path_buf();
    }

    let base_components: Vec<Component<'_>> = base.components().collect();
    let path_components: Vec<Component<'_>> = path.components().collect();
    let common = base_components
        .iter()
        .zip(&path_components)
        .take_while(|(a, b)| a == b)
        .count();

    if common == 0 {
        return path.to_path_buf();
    }

    let mut relative = PathBuf::new();
    for _ in common..base_components.len() {
        relative.push("..");
    }
    for component in &path_components[common..] {
        relative.push(component.as_os_str());
    }
    relative
}

fn to_slash(path: &Path) -> String {
    if path.has_root() {
        return path.to_string_lossy().replace('\\', "/");
    }
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
