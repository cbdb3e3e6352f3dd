//! Single-pass queries over a dependency graph.

use std::collections::HashSet;

use super::{DependencyChains, DependencyGraph};
use crate::classify::is_builtin;

/// Path segment that marks an installed package.
const NODE_MODULES: &str = "node_modules";

/// Whether a dependency entry counts towards a module's local dependencies.
///
/// Entries starting with `.` always count; otherwise installed-package paths
/// and builtin names are discarded.
fn is_local_entry(entry: &str) -> bool {
    entry.starts_with('.') || !(entry.contains(NODE_MODULES) || is_builtin(entry))
}

/// Modules without local dependencies, in mapping order.
#[must_use]
pub fn leaves(graph: &DependencyGraph) -> Vec<String> {
    graph
        .iter()
        .filter(|(_, deps)| !deps.iter().any(|d| is_local_entry(d)))
        .map(|(module, _)| module.to_string())
        .collect()
}

/// Pairs of distinct modules that depend on each other.
///
/// Each pair is reported once, as `(a, b)` where `a` is the key whose
/// dependency list revealed the pair first. Self-dependencies are not pairs.
#[must_use]
pub fn mutual_pairs(graph: &DependencyGraph) -> Vec<(String, String)> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut pairs = Vec::new();

    for (module, deps) in graph {
        let module = module.as_str();
        for dep in deps {
            let dep = dep.as_str();
            if dep == module {
                continue;
            }
            let depends_back = graph
                .get(dep)
                .is_some_and(|back| back.iter().any(|b| b == module));
            if !depends_back {
                continue;
            }
            let key = if module < dep { (module, dep) } else { (dep, module) };
            if seen.insert(key) {
                pairs.push((module.to_string(), dep.to_string()));
            }
        }
    }

    pairs
}

/// Modules on the recorded chain leading to `module`, root first.
///
/// This is the single first-discovery path, not every importer. Empty when
/// no chain was recorded for `module`.
#[must_use]
pub fn dependents(chains: &DependencyChains, module: &str) -> Vec<String> {
    match chains.get(module).map(Vec::as_slice) {
        Some([ancestors @ .., _]) => ancestors.to_vec(),
        _ => Vec::new(),
    }
}
