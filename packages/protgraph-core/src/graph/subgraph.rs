//! Induced subgraph extraction

use rustc_hash::FxHashMap;

use super::ProteinGraph;
use crate::domain::{Edge, GraphStore, NodeId, NodePair, NodeRef};
use crate::error::Result;

impl<S: GraphStore> ProteinGraph<S> {
    /// New graph with the given nodes, the primary edges among them and
    /// their duplicate/redundant records.
    ///
    /// Each copied node keeps exactly the aliases it owns here. The new graph
    /// shares this graph's configuration; handles are not preserved.
    ///
    /// # Errors
    ///
    /// `NotFound` if any argument does not resolve.
    pub fn subgraph<'a, I>(&self, nodes: I) -> Result<ProteinGraph<S>>
    where
        I: IntoIterator,
        I::Item: Into<NodeRef<'a>>,
    {
        let mut selected = self.resolve_all(nodes)?;
        selected.sort_unstable();

        let mut sub: ProteinGraph<S> = ProteinGraph::with_config(self.config.clone());
        let mut remap: FxHashMap<NodeId, NodeId> = FxHashMap::default();

        for &node in &selected {
            let Some(protein) = self.store.node(node) else {
                continue;
            };
            let copy = sub.store.add_node(protein.clone());
            sub.registry
                .register(copy, self.registry.aliases_of(node));
            remap.insert(node, copy);
        }

        let translate = |edge: &Edge| -> Option<Edge> {
            let a = remap.get(&edge.pair.first())?;
            let b = remap.get(&edge.pair.second())?;
            NodePair::new(*a, *b).map(|pair| Edge::new(pair, edge.id.clone(), edge.weight))
        };

        for edge in self.store.edges() {
            if let Some(copy) = translate(edge) {
                sub.store.insert_edge(copy);
            }
        }
        for edge in &self.duplicates {
            if let Some(copy) = translate(edge) {
                sub.duplicate_keys.insert((copy.pair, copy.id.clone()));
                sub.duplicates.push(copy);
            }
        }
        for edge in &self.redundant {
            if let Some(copy) = translate(edge) {
                sub.redundant_keys.insert((copy.pair, copy.id.clone()));
                sub.redundant.push(copy);
            }
        }

        Ok(sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IdentifierBundle, Interaction};
    use crate::infrastructure::PetgraphStore;

    fn interaction(a: &str, b: &str, id: &str) -> Interaction {
        Interaction::new(IdentifierBundle::new(a), IdentifierBundle::new(b), id, 1.0)
    }

    #[test]
    fn test_subgraph_keeps_internal_edges_only() {
        let graph = ProteinGraph::from_interactions(vec![
            interaction("A", "B", "E1"),
            interaction("B", "C", "E2"),
            interaction("C", "D", "E3"),
            interaction("A", "B", "E4"),
            interaction("C", "D", "E5"),
        ])
        .unwrap();

        let sub = graph.subgraph(["A", "B", "C"]).unwrap();
        assert_eq!(sub.node_count(), 3);
        assert_eq!(sub.edge_count(), 2);
        assert!(!sub.has_node("D"));
        assert_eq!(sub.duplicate_edges().len(), 1);
        assert_eq!(sub.duplicate_edges()[0].id, "E4");
        assert_eq!(sub.edge("B", "C").unwrap().unwrap().id, "E2");

        // Source graph untouched
        assert_eq!(graph.node_count(), 4);
    }

    #[test]
    fn test_subgraph_copies_owned_aliases() {
        let mut graph = ProteinGraph::new();
        graph
            .add_interaction(&Interaction::new(
                IdentifierBundle::new("CDC28")
                    .with_accession("P00546")
                    .with_xref("YBR160W"),
                IdentifierBundle::new("CLN1").with_xref("YMR199W"),
                "E1",
                1.0,
            ))
            .unwrap();

        let sub = graph.subgraph(["YBR160W"]).unwrap();
        assert_eq!(sub.node_count(), 1);
        assert_eq!(sub.edge_count(), 0);
        assert_eq!(sub.registry().len(), 3);
        assert!(sub.has_node("P00546"));
        assert!(!sub.has_node("YMR199W"));
    }

    #[test]
    fn test_subgraph_keeps_store_and_config() {
        let config = crate::GraphConfig::default().articulation_min_component(2);
        let mut graph: ProteinGraph<PetgraphStore> = ProteinGraph::with_config(config.clone());
        graph
            .extend_interactions(vec![interaction("A", "B", "E1"), interaction("B", "C", "E2")])
            .unwrap();

        let sub: ProteinGraph<PetgraphStore> = graph.subgraph(["A", "B"]).unwrap();
        assert_eq!(sub.config(), &config);
        assert_eq!(sub.edge("A", "B").unwrap().unwrap().id, "E1");
        assert_consistent_adjacency(&sub);
    }

    fn assert_consistent_adjacency(graph: &ProteinGraph) {
        for node in graph.nodes() {
            for neighbor in graph.neighbors(node).unwrap() {
                assert!(graph.neighbors(neighbor).unwrap().contains(&node));
            }
        }
    }

    #[test]
    fn test_subgraph_unknown_node() {
        let graph = ProteinGraph::from_interactions(vec![interaction("A", "B", "E1")]).unwrap();
        assert!(graph.subgraph(["Z"]).unwrap_err().is_not_found());
    }

    #[test]
    fn test_subgraph_new_records_deduplicated() {
        let graph = ProteinGraph::from_interactions(vec![
            interaction("A", "B", "E1"),
            interaction("A", "B", "E1"),
        ])
        .unwrap();

        let mut sub = graph.subgraph(["A", "B"]).unwrap();
        assert_eq!(sub.redundant_edges().len(), 1);
        sub.add_interaction(&interaction("B", "A", "E1")).unwrap();
        assert_eq!(sub.redundant_edges().len(), 1);
    }
}
