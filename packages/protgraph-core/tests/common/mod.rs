//! Shared fixtures for protgraph-core integration tests

#![allow(dead_code)]

use protgraph_core::{IdentifierBundle, Interaction, NodeId, ProteinGraph};

/// Interaction between two single-alias proteins
pub fn interaction(a: &str, b: &str, id: &str) -> Interaction {
    Interaction::new(IdentifierBundle::new(a), IdentifierBundle::new(b), id, 1.0)
}

/// Graph from `(a, b, interaction_id)` triples
pub fn graph_of(edges: &[(&str, &str, &str)]) -> ProteinGraph {
    ProteinGraph::from_interactions(edges.iter().map(|(a, b, id)| interaction(a, b, id)))
        .expect("fixture interactions are valid")
}

/// Graph1 of the reference merge scenario
pub fn scenario_destination() -> ProteinGraph {
    graph_of(&[("P1", "P2", "E1"), ("P3", "P4", "E2"), ("P1", "P4", "E3")])
}

/// Graph2 of the reference merge scenario
pub fn scenario_source() -> ProteinGraph {
    graph_of(&[
        ("P1", "P2", "X1"),
        ("P1", "X4", "X2"),
        ("P2", "P3", "X3"),
        ("Z4", "Z5", "X4"),
    ])
}

/// Sorted primary ids of `nodes`
pub fn names(graph: &ProteinGraph, nodes: &[NodeId]) -> Vec<String> {
    let mut names: Vec<String> = nodes
        .iter()
        .filter_map(|&node| graph.node(node))
        .map(|protein| protein.primary_id().to_string())
        .collect();
    names.sort();
    names
}

/// Every handle referenced by an edge or adjacency list is a live node, and
/// adjacency is symmetric.
pub fn assert_consistent(graph: &ProteinGraph) {
    let live: Vec<NodeId> = graph.nodes();

    for edge in graph
        .edges()
        .into_iter()
        .chain(graph.duplicate_edges())
        .chain(graph.redundant_edges())
    {
        assert!(live.contains(&edge.pair.first()), "dangling edge endpoint");
        assert!(live.contains(&edge.pair.second()), "dangling edge endpoint");
        assert_ne!(edge.pair.first(), edge.pair.second(), "self-loop stored");
    }

    for &node in &live {
        for neighbor in graph.neighbors(node).unwrap() {
            assert!(live.contains(&neighbor), "dangling neighbor");
            assert!(
                graph.neighbors(neighbor).unwrap().contains(&node),
                "asymmetric adjacency"
            );
        }
    }

    for alias in graph.registry().identifiers() {
        let node = graph.registry().resolve(alias).unwrap();
        assert!(live.contains(&node), "alias '{}' points at a removed node", alias);
    }
}
