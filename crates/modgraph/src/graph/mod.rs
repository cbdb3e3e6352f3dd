//! Graph construction and analysis over module identities.
//!
//! The collector hands over per-visit [`ModuleRecord`]s;
//! [`from_records`] folds them into the canonical [`DependencyGraph`], which
//! is the sole input of every algorithm in this module:
//!
//! | Operation | Module | Algorithm |
//! |-----------|--------|-----------|
//! | Topological order | `sort` | Post-order DFS, cycle tolerant |
//! | Cycles, chains, leaf paths | `analyze` | Three-state DFS |
//! | Leaves, mutual pairs, dependents | `query` | Single pass |
//! | Text tree | `render` | Single pass |
//!
//! All traversal state lives inside the call that needs it, so every
//! function here can be called repeatedly on the same graph.

pub mod analyze;
pub mod query;
pub mod render;
pub mod sort;

use indexmap::IndexMap;

use crate::types::ModuleRecord;

pub use analyze::analyze;
pub use query::{dependents, leaves, mutual_pairs};
pub use render::render_text;
pub use sort::sort;

/// Module identity → direct local dependencies, in source order.
///
/// Keys iterate (and serialize) in the order the collector visited them.
pub type DependencyGraph = IndexMap<String, Vec<String>>;

/// Module identity → path from a traversal root to it, inclusive.
pub type DependencyChains = IndexMap<String, Vec<String>>;

/// Fold the collector's per-visit records into the canonical graph.
///
/// Lossless and order preserving: records are keyed by identity in
/// visitation-index order and every import list is kept as recorded.
#[must_use]
pub fn from_records(records: &[ModuleRecord]) -> DependencyGraph {
    let mut ordered: Vec<&ModuleRecord> = records.iter().collect();
    ordered.sort_by_key(|record| record.index);

    ordered
        .into_iter()
        .map(|record| (record.id.clone(), record.imports.clone()))
        .collect()
}

/// Direct dependencies of `module`; empty for modules that are not keys.
#[must_use]
pub fn dependencies_of<'g>(graph: &'g DependencyGraph, module: &str) -> &'g [String] {
    graph.get(module).map_or(&[][..], Vec::as_slice)
}

/// Concatenate per-module side channels into one list.
#[must_use]
pub fn flatten<T>(nested: Vec<Vec<T>>) -> Vec<T> {
    nested.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(id: &str, index: usize, imports: &[&str]) -> ModuleRecord {
        ModuleRecord {
            file: PathBuf::from("/repo").join(id),
            id: id.to_string(),
            index,
            imports: imports.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn from_records_orders_by_visitation_index() {
        let records = vec![
            record("src/b.ts", 1, &["src/c.ts"]),
            record("src/index.ts", 0, &["src/b.ts", "src/missing"]),
            record("src/c.ts", 2, &[]),
            record("src/missing", 3, &[]),
        ];

        let graph = from_records(&records);

        assert_eq!(
            graph.keys().collect::<Vec<_>>(),
            vec!["src/index.ts", "src/b.ts", "src/c.ts", "src/missing"]
        );
        assert_eq!(dependencies_of(&graph, "src/index.ts"), ["src/b.ts", "src/missing"]);
        assert!(dependencies_of(&graph, "src/missing").is_empty());
    }

    #[test]
    fn dependencies_of_non_key_is_empty() {
        let graph = from_records(&[record("a.ts", 0, &["ghost.ts"])]);

        assert!(dependencies_of(&graph, "ghost.ts").is_empty());
    }

    #[test]
    fn flatten_concatenates_in_order() {
        let nested = vec![vec!["fs"], vec![], vec!["path", "fs"]];

        assert_eq!(flatten(nested), vec!["fs", "path", "fs"]);
    }

    #[test]
    fn serializes_as_ordered_object() {
        let graph = from_records(&[record("z.ts", 0, &["a.ts"]), record("a.ts", 1, &[])]);

        let json = serde_json::to_string(&graph).expect("graph should serialize");

        assert_eq!(json, r#"{"z.ts":["a.ts"],"a.ts":[]}"#);
    }
}
