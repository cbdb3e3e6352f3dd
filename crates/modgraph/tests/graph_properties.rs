//! Property tests for the graph algorithms.
//!
//! Graphs are generated directly as adjacency mappings whose every
//! dependency is also a key, the shape the collector produces. `petgraph`
//! serves as an independent oracle for acyclicity.

use std::collections::{HashMap, HashSet};

use modgraph::DependencyGraph;
use modgraph::graph::{analyze, dependencies_of, leaves, mutual_pairs, sort};
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::DiGraph;
use proptest::prelude::*;

fn name(index: usize) -> String {
    format!("src/m{index}.ts")
}

/// Build a mapping from per-node target lists, dropping repeated targets.
fn to_graph(adjacency: &[Vec<usize>]) -> DependencyGraph {
    adjacency
        .iter()
        .enumerate()
        .map(|(i, targets)| {
            let mut seen = HashSet::new();
            let deps: Vec<String> = targets
                .iter()
                .filter(|t| seen.insert(**t))
                .map(|t| name(*t))
                .collect();
            (name(i), deps)
        })
        .collect()
}

/// Any directed graph, self-loops and cycles included.
fn arb_graph() -> impl Strategy<Value = DependencyGraph> {
    (1usize..12)
        .prop_flat_map(|n| prop::collection::vec(prop::collection::vec(0..n, 0..4), n))
        .prop_map(|adjacency| to_graph(&adjacency))
}

/// Directed acyclic graphs: edges only point to later nodes.
fn arb_dag() -> impl Strategy<Value = DependencyGraph> {
    (1usize..12)
        .prop_flat_map(|n| prop::collection::vec(prop::collection::vec(0..n, 0..4), n))
        .prop_map(|adjacency| {
            let forward: Vec<Vec<usize>> = adjacency
                .into_iter()
                .enumerate()
                .map(|(i, targets)| targets.into_iter().filter(|t| *t > i).collect())
                .collect();
            to_graph(&forward)
        })
}

fn to_petgraph(graph: &DependencyGraph) -> DiGraph<&str, ()> {
    let mut pg = DiGraph::new();
    let nodes: HashMap<&str, _> = graph
        .keys()
        .map(|k| (k.as_str(), pg.add_node(k.as_str())))
        .collect();
    for (module, deps) in graph {
        for dep in deps {
            pg.add_edge(nodes[module.as_str()], nodes[dep.as_str()], ());
        }
    }
    pg
}

fn has_edge(graph: &DependencyGraph, from: &str, to: &str) -> bool {
    graph.get(from).is_some_and(|deps| deps.iter().any(|d| d == to))
}

proptest! {
    #[test]
    fn sort_places_dependencies_first_in_dags(graph in arb_dag()) {
        let order = sort(&graph);
        let position: HashMap<&str, usize> =
            order.iter().enumerate().map(|(i, m)| (m.as_str(), i)).collect();

        for (module, deps) in &graph {
            for dep in deps {
                prop_assert!(position[dep.as_str()] < position[module.as_str()]);
            }
        }
    }

    #[test]
    fn sort_is_total(graph in arb_graph()) {
        let order = sort(&graph);

        prop_assert_eq!(order.len(), graph.len());
        let unique: HashSet<&str> = order.iter().map(String::as_str).collect();
        let keys: HashSet<&str> = graph.keys().map(String::as_str).collect();
        prop_assert_eq!(unique, keys);
    }

    #[test]
    fn cycles_found_exactly_when_petgraph_finds_one(graph in arb_graph()) {
        let analysis = analyze(&graph);

        prop_assert_eq!(
            !analysis.circular_dependencies.is_empty(),
            is_cyclic_directed(&to_petgraph(&graph))
        );
    }

    #[test]
    fn cycles_are_closed_walks_of_real_edges(graph in arb_graph()) {
        for cycle in analyze(&graph).circular_dependencies {
            prop_assert!(cycle.chain.len() >= 2);
            prop_assert_eq!(cycle.chain.first(), cycle.chain.last());
            for step in cycle.chain.windows(2) {
                prop_assert!(has_edge(&graph, &step[0], &step[1]));
            }
        }
    }

    #[test]
    fn cycles_are_unique(graph in arb_graph()) {
        let cycles = analyze(&graph).circular_dependencies;
        let unique: HashSet<&Vec<String>> = cycles.iter().map(|c| &c.chain).collect();

        prop_assert_eq!(unique.len(), cycles.len());
    }

    #[test]
    fn analysis_is_idempotent(graph in arb_graph()) {
        prop_assert_eq!(analyze(&graph), analyze(&graph));
    }

    #[test]
    fn empty_dependency_lists_are_leaves(graph in arb_graph()) {
        let found = leaves(&graph);

        for (module, deps) in &graph {
            if deps.is_empty() {
                prop_assert!(found.iter().any(|l| l == module));
            }
        }
    }

    #[test]
    fn every_key_has_a_chain_ending_at_itself(graph in arb_graph()) {
        let chains = analyze(&graph).dependency_chains;

        prop_assert_eq!(chains.len(), graph.len());
        for module in graph.keys() {
            let last = chains.get(module).and_then(|chain| chain.last());
            prop_assert_eq!(last, Some(module));
        }
    }

    #[test]
    fn chains_complete_dependencies_first_in_dags(graph in arb_dag()) {
        let chains = analyze(&graph).dependency_chains;

        for (module, deps) in &graph {
            for dep in deps {
                prop_assert!(chains.get_index_of(dep) < chains.get_index_of(module));
            }
        }
    }

    #[test]
    fn leaf_chains_follow_edges_to_leaves(graph in arb_graph()) {
        for chain in analyze(&graph).entry_to_leaf_chains {
            let last = chain.last().map(String::as_str).unwrap_or_default();
            prop_assert!(dependencies_of(&graph, last).is_empty());
            for step in chain.windows(2) {
                prop_assert!(has_edge(&graph, &step[0], &step[1]));
            }
        }
    }

    #[test]
    fn mutual_pairs_are_distinct_two_cycles(graph in arb_graph()) {
        let pairs = mutual_pairs(&graph);
        let mut seen = HashSet::new();

        for (a, b) in &pairs {
            prop_assert_ne!(a, b);
            prop_assert!(has_edge(&graph, a, b) && has_edge(&graph, b, a));
            let key = if a < b { (a, b) } else { (b, a) };
            prop_assert!(seen.insert(key));
        }
    }
}

#[test]
fn three_node_cycle_matches_petgraph() {
    let graph = to_graph(&[vec![1], vec![2], vec![0]]);

    assert!(is_cyclic_directed(&to_petgraph(&graph)));
    assert_eq!(
        analyze(&graph).circular_dependencies[0].chain,
        ["src/m0.ts", "src/m1.ts", "src/m2.ts", "src/m0.ts"]
    );
}
