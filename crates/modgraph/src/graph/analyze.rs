//! Depth-first cycle detection with chain reconstruction.
//!
//! One traversal produces all three views of [`DependencyAnalysis`]:
//!
//! - **Cycles**: a dependency that is still in progress closes a back edge;
//!   the current path from its first occurrence, plus the dependency again,
//!   is the cycle.
//! - **Dependency chains**: the path from the traversal root to each module,
//!   recorded when the module completes. A module completes once, so later,
//!   shorter or alternative paths are not recorded, and the chains are keyed
//!   in completion order.
//! - **Entry-to-leaf chains**: the full path every time the traversal
//!   enters a module with no dependencies.
//!
//! Cycles are de-duplicated by exact sequence. Rotations of the same cycle
//! found from different roots are kept as distinct entries.
//!
//! The in-progress path lives on the heap as a stack of frames, so import
//! chains of any depth are handled without recursion.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::{DependencyChains, DependencyGraph, dependencies_of};
use crate::types::{Cycle, DependencyAnalysis};

/// Per-traversal marking of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

/// A module on the in-progress path and how far its dependencies have been
/// explored.
struct Frame<'g> {
    module: &'g str,
    dependencies: &'g [String],
    next: usize,
}

/// Mutable state owned by one `analyze` call.
struct Traversal<'g> {
    graph: &'g DependencyGraph,
    states: HashMap<&'g str, VisitState>,
    path: Vec<Frame<'g>>,
    cycles: Vec<Vec<String>>,
    chains: DependencyChains,
    leaf_chains: Vec<Vec<String>>,
}

impl<'g> Traversal<'g> {
    fn new(graph: &'g DependencyGraph) -> Self {
        Self {
            graph,
            states: HashMap::with_capacity(graph.len()),
            path: Vec::new(),
            cycles: Vec::new(),
            chains: DependencyChains::with_capacity(graph.len()),
            leaf_chains: Vec::new(),
        }
    }

    fn state(&self, module: &str) -> VisitState {
        self.states
            .get(module)
            .copied()
            .unwrap_or(VisitState::Unvisited)
    }

    fn current_path(&self) -> Vec<String> {
        self.path.iter().map(|frame| frame.module.to_string()).collect()
    }

    /// Explore everything reachable from `root` that is not yet done.
    fn run_from(&mut self, root: &'g str) {
        self.enter(root);

        while let Some(frame) = self.path.last_mut() {
            let dependencies = frame.dependencies;
            let Some(dependency) = dependencies.get(frame.next) else {
                self.complete();
                continue;
            };
            frame.next += 1;

            match self.state(dependency) {
                VisitState::InProgress => self.record_cycle(dependency),
                VisitState::Done => {}
                VisitState::Unvisited => self.enter(dependency),
            }
        }
    }

    fn enter(&mut self, module: &'g str) {
        self.states.insert(module, VisitState::InProgress);
        // Non-key dependencies count as modules without dependencies
        let dependencies = dependencies_of(self.graph, module);
        self.path.push(Frame {
            module,
            dependencies,
            next: 0,
        });
        if dependencies.is_empty() {
            self.leaf_chains.push(self.current_path());
        }
    }

    fn complete(&mut self) {
        let chain = self.current_path();
        if let Some(frame) = self.path.pop() {
            self.chains.insert(frame.module.to_string(), chain);
            self.states.insert(frame.module, VisitState::Done);
        }
    }

    fn record_cycle(&mut self, back_to: &str) {
        let Some(start) = self.path.iter().position(|frame| frame.module == back_to) else {
            return;
        };
        let mut chain: Vec<String> = self.path[start..]
            .iter()
            .map(|frame| frame.module.to_string())
            .collect();
        chain.push(back_to.to_string());
        self.cycles.push(chain);
    }
}

/// Detect cycles and record dependency chains over `graph`.
///
/// Every still-unvisited key is used as a traversal root, in mapping order.
/// The result depends only on `graph`, so repeated calls agree.
#[must_use]
pub fn analyze(graph: &DependencyGraph) -> DependencyAnalysis {
    let mut traversal = Traversal::new(graph);

    for module in graph.keys() {
        if traversal.state(module) == VisitState::Unvisited {
            traversal.run_from(module);
        }
    }

    let raw_cycle_count = traversal.cycles.len();
    let circular_dependencies = deduplicate_cycles(traversal.cycles);

    debug!(
        module_count = graph.len(),
        raw_cycles = raw_cycle_count,
        unique_cycles = circular_dependencies.len(),
        leaf_chains = traversal.leaf_chains.len(),
        "Dependency analysis complete"
    );

    DependencyAnalysis {
        circular_dependencies,
        dependency_chains: traversal.chains,
        entry_to_leaf_chains: traversal.leaf_chains,
    }
}

/// Keep the first occurrence of each exact chain.
fn deduplicate_cycles(chains: Vec<Vec<String>>) -> Vec<Cycle> {
    let mut seen: HashSet<Vec<String>> = HashSet::new();
    chains
        .into_iter()
        .filter(|chain| seen.insert(chain.clone()))
        .map(Cycle::circular)
        .collect()
}
