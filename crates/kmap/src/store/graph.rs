//! Dependency graph diagnostics using petgraph.
//!
//! Cycles are legal in a knowledge map (the extractor terminates on them),
//! but they usually point at a data-entry mistake, so the CLI reports them.
//!
//! # Edge Direction
//!
//! Edges point from **prerequisite -> dependent**, the same direction the
//! DOT output draws them.

use super::ModelStore;
use crate::domain::NodeId;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Build a petgraph view of the store.
///
/// Dependency sources that are not in the store get their own graph node so
/// that orphaned edges still show up in the structure.
pub(crate) fn build_graph(store: &dyn ModelStore) -> (DiGraph<NodeId, ()>, HashMap<NodeId, NodeIndex>) {
    let mut graph = DiGraph::new();
    let mut node_map: HashMap<NodeId, NodeIndex> = HashMap::new();

    for node in store.nodes() {
        let idx = graph.add_node(node.id().clone());
        node_map.insert(node.id().clone(), idx);
    }

    for node in store.nodes() {
        let target = node_map[node.id()];
        for source_id in store.unique_dependency_source_ids(node) {
            let source = *node_map
                .entry(source_id.clone())
                .or_insert_with(|| graph.add_node(source_id));
            graph.add_edge(source, target, ());
        }
    }

    (graph, node_map)
}

/// Find all dependency cycles.
///
/// Returns one entry per strongly connected component with more than one
/// node, plus one entry per self-dependency. Each cycle is sorted by ID and
/// the list is sorted by its first ID, so output is stable across runs.
pub fn find_cycles(store: &dyn ModelStore) -> Vec<Vec<NodeId>> {
    let (graph, _) = build_graph(store);

    let mut cycles: Vec<Vec<NodeId>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1 || graph.contains_edge(component[0], component[0])
        })
        .map(|component| {
            let mut ids: Vec<NodeId> = component.into_iter().map(|idx| graph[idx].clone()).collect();
            ids.sort();
            ids
        })
        .collect();

    cycles.sort();
    tracing::debug!(count = cycles.len(), "Dependency cycle scan complete");
    cycles
}
