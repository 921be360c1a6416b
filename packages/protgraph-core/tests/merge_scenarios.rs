//! Union of independently built interaction datasets

#[path = "common/mod.rs"]
mod common;
use common::*;

use pretty_assertions::assert_eq;
use protgraph_core::{
    AliasMatchPolicy, EdgeClass, GraphConfig, IdentifierBundle, Interaction, MergeReport,
    ProteinGraph,
};

// ═══════════════════════════════════════════════════════════════════════════
// Reference scenario
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_reference_scenario() {
    let mut graph1 = scenario_destination();
    let graph2 = scenario_source();

    let report = graph1.union(&graph2).unwrap();

    assert_eq!(
        report,
        MergeReport {
            shared_nodes: 3,
            primary_added: 2,
            duplicates_added: 1,
            redundant_added: 1,
            nodes_created: 1,
            unchanged: 1,
            ambiguous_skipped: 0,
        }
    );

    // (P1, P2) keeps E1 as primary and gains X1 as duplicate
    assert_eq!(graph1.edge("P1", "P2").unwrap().unwrap().id, "E1");
    let duplicates: Vec<&str> = graph1
        .duplicate_edges()
        .iter()
        .map(|edge| edge.id.as_str())
        .collect();
    assert_eq!(duplicates, vec!["X1"]);

    // X4 is created and linked to P1
    assert_eq!(graph1.edge("P1", "X4").unwrap().unwrap().id, "X2");
    assert_eq!(graph1.neighbor_count("X4").unwrap(), 1);

    // New primary edge between two known proteins; walking it again from
    // P3 records it once as redundant
    assert_eq!(graph1.edge("P2", "P3").unwrap().unwrap().id, "X3");
    let redundant: Vec<&str> = graph1
        .redundant_edges()
        .iter()
        .map(|edge| edge.id.as_str())
        .collect();
    assert_eq!(redundant, vec!["X3"]);

    // Interaction between two unknown proteins is not imported
    assert!(!graph1.has_node("Z4"));
    assert!(!graph1.has_node("Z5"));
    assert!(graph1.edge_by_id("X4").is_empty());

    assert_eq!(graph1.node_count(), 5);
    assert_eq!(graph1.edge_count(), 5);
    assert_consistent(&graph1);
}

#[test]
fn test_union_does_not_mutate_source() {
    let mut graph1 = scenario_destination();
    let graph2 = scenario_source();

    let nodes_before = graph2.node_count();
    let edges_before = graph2.edge_count();
    let aliases_before = graph2.registry().identifiers().len();

    graph1.union(&graph2).unwrap();

    assert_eq!(graph2.node_count(), nodes_before);
    assert_eq!(graph2.edge_count(), edges_before);
    assert_eq!(graph2.registry().identifiers().len(), aliases_before);
    assert!(graph2.duplicate_edges().is_empty());
}

#[test]
fn test_repeated_union_adds_no_structure() {
    let mut graph1 = scenario_destination();
    let graph2 = scenario_source();

    graph1.union(&graph2).unwrap();
    let second = graph1.union(&graph2).unwrap();

    // X4 is shared now, so only its edge to P1 gains a redundant record
    assert_eq!(second.shared_nodes, 4);
    assert_eq!(second.nodes_created, 0);
    assert_eq!(second.primary_added, 0);
    assert_eq!(second.duplicates_added, 0);
    assert_eq!(second.redundant_added, 1);
    assert_eq!(second.unchanged, 4);
    assert_eq!(graph1.duplicate_edges().len(), 1);
    assert_eq!(graph1.redundant_edges().len(), 2);
    assert_eq!(graph1.edge_count(), 5);
}

#[test]
fn test_reference_scenario_importing_each_edge_once() {
    let mut graph1: ProteinGraph =
        ProteinGraph::with_config(GraphConfig::default().import_each_source_edge_once(true));
    graph1
        .extend_interactions(vec![
            interaction("P1", "P2", "E1"),
            interaction("P3", "P4", "E2"),
            interaction("P1", "P4", "E3"),
        ])
        .unwrap();

    let report = graph1.union(&scenario_source()).unwrap();

    assert_eq!(report.primary_added, 2);
    assert_eq!(report.duplicates_added, 1);
    assert_eq!(report.redundant_added, 0);
    assert_eq!(report.unchanged, 0);
    assert!(graph1.redundant_edges().is_empty());
    assert_eq!(graph1.edge_count(), 5);
}

// ═══════════════════════════════════════════════════════════════════════════
// Identifier reconciliation
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cross_reference_links_differently_named_proteins() {
    // Destination knows CDC28 by accession, source by systematic name
    let mut dest = ProteinGraph::new();
    dest.add_interaction(&Interaction::new(
        IdentifierBundle::new("CDC28").with_accession("P00546"),
        IdentifierBundle::new("CLN2").with_accession("P20438"),
        "IntAct-1",
        0.9,
    ))
    .unwrap();

    let mut source = ProteinGraph::new();
    source
        .add_interaction(&Interaction::new(
            IdentifierBundle::new("YBR160W").with_xref("P00546"),
            IdentifierBundle::new("YPL256C").with_xref("P20438"),
            "DIP-7",
            0.4,
        ))
        .unwrap();

    let report = dest.union(&source).unwrap();

    assert_eq!(report.nodes_created, 0);
    assert_eq!(report.duplicates_added, 1);
    assert_eq!(dest.node_count(), 2);

    let records = dest.edge_by_id("DIP-7");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, EdgeClass::Duplicate);
    assert_eq!(records[0].1.weight, 0.4);
}

#[test]
fn test_same_interaction_id_becomes_redundant() {
    let mut dest = graph_of(&[("P1", "P2", "E1")]);
    let source = graph_of(&[("P1", "P2", "E1")]);

    let report = dest.union(&source).unwrap();
    assert_eq!(report.redundant_added, 1);
    assert_eq!(dest.redundant_edges().len(), 1);
    assert!(dest.duplicate_edges().is_empty());
}

#[test]
fn test_skip_ambiguous_keeps_destination_unchanged() {
    let mut dest: ProteinGraph =
        ProteinGraph::with_config(GraphConfig::default().alias_match(AliasMatchPolicy::SkipAmbiguous));
    dest.extend_interactions(vec![
        interaction("HUB", "A", "E1"),
        interaction("B", "C", "E2"),
    ])
    .unwrap();

    let mut source = ProteinGraph::new();
    source
        .add_interaction(&Interaction::new(
            IdentifierBundle::new("HUB"),
            IdentifierBundle::new("merged").with_xref("B").with_xref("C"),
            "X1",
            1.0,
        ))
        .unwrap();

    let report = dest.union(&source).unwrap();
    assert_eq!(report.ambiguous_skipped, 1);
    assert_eq!(dest.edge_count(), 2);
    assert_consistent(&dest);
}

#[test]
fn test_fan_in_of_partial_graphs() {
    let shards = vec![
        graph_of(&[("A", "B", "S1"), ("B", "C", "S2")]),
        graph_of(&[("C", "D", "S3"), ("B", "D", "S4")]),
        graph_of(&[("D", "E", "S5"), ("A", "B", "S6")]),
    ];

    let mut combined = graph_of(&[("A", "B", "S1")]);
    for shard in &shards {
        combined.union(shard).unwrap();
    }

    assert_eq!(
        names(&combined, &combined.nodes()),
        vec!["A", "B", "C", "D", "E"]
    );
    assert_eq!(combined.edge_count(), 5);
    assert!(combined.is_connected());
    assert_eq!(combined.duplicate_edges().len(), 1);
    assert_consistent(&combined);
}
