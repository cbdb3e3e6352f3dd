//! Cycle-tolerant topological ordering.

use std::collections::HashSet;

use tracing::debug;

use super::{DependencyGraph, dependencies_of};

/// Order modules so each one comes after its dependencies.
///
/// Post-order DFS over the keys in mapping order. A module is marked visited
/// before its dependencies are explored, so cycles terminate; within a cycle
/// the order is whatever the traversal produced. Dependencies that are not
/// keys are emitted too, which keeps the result total even for mappings that
/// break the collector's invariant.
///
/// The traversal keeps its own stack, so depth is bounded by memory rather
/// than the thread's call stack.
#[must_use]
pub fn sort(graph: &DependencyGraph) -> Vec<String> {
    let mut visited: HashSet<&str> = HashSet::with_capacity(graph.len());
    let mut order: Vec<String> = Vec::with_capacity(graph.len());

    for module in graph.keys() {
        visit(module, graph, &mut visited, &mut order);
    }

    debug!(module_count = order.len(), "Topological sort complete");
    order
}

fn visit<'g>(
    root: &'g str,
    graph: &'g DependencyGraph,
    visited: &mut HashSet<&'g str>,
    order: &mut Vec<String>,
) {
    if !visited.insert(root) {
        return;
    }

    // (module, dependencies, next dependency to explore)
    let mut stack: Vec<(&'g str, &'g [String], usize)> =
        vec![(root, dependencies_of(graph, root), 0)];

    while let Some(frame) = stack.last_mut() {
        let (module, dependencies, next) = *frame;
        match dependencies.get(next) {
            Some(dependency) => {
                frame.2 += 1;
                if visited.insert(dependency) {
                    stack.push((dependency.as_str(), dependencies_of(graph, dependency), 0));
                }
            }
            None => {
                order.push(module.to_string());
                stack.pop();
            }
        }
    }
}
