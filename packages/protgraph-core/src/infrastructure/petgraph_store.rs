//! GraphStore backed by petgraph
//!
//! `StableUnGraph` keeps node indices valid across removals, so they double as
//! `NodeId`s. A side map from normalized pair to edge index gives O(1) primary
//! edge lookup; connected components come from Tarjan SCC, which on an
//! undirected graph yields exactly the components.

use petgraph::algo::tarjan_scc;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableUnGraph};
use rustc_hash::FxHashMap;

use crate::domain::{Edge, GraphStore, NodeId, NodePair, Protein};

#[derive(Debug, Clone, Default)]
pub struct PetgraphStore {
    /// Undirected graph: proteins as nodes, primary interactions as edges
    graph: StableUnGraph<Protein, Edge>,

    /// Normalized pair → edge index mapping
    pair_to_edge: FxHashMap<NodePair, EdgeIndex>,
}

fn to_index(node: NodeId) -> NodeIndex {
    NodeIndex::new(node.index())
}

fn to_id(index: NodeIndex) -> NodeId {
    NodeId(index.index() as u32)
}

impl PetgraphStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GraphStore for PetgraphStore {
    fn add_node(&mut self, protein: Protein) -> NodeId {
        to_id(self.graph.add_node(protein))
    }

    fn remove_node(&mut self, node: NodeId) -> Option<Protein> {
        let index = to_index(node);
        if !self.graph.contains_node(index) {
            return None;
        }

        // petgraph drops the incident edges; the pair index must follow
        for neighbor in self.graph.neighbors(index).collect::<Vec<_>>() {
            if let Some(pair) = NodePair::new(node, to_id(neighbor)) {
                self.pair_to_edge.remove(&pair);
            }
        }

        self.graph.remove_node(index)
    }

    fn node(&self, node: NodeId) -> Option<&Protein> {
        self.graph.node_weight(to_index(node))
    }

    fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.graph.node_indices().map(to_id).collect();
        ids.sort_unstable();
        ids
    }

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn insert_edge(&mut self, edge: Edge) -> bool {
        let pair = edge.pair;
        let (a, b) = (to_index(pair.first()), to_index(pair.second()));

        if !self.graph.contains_node(a) || !self.graph.contains_node(b) {
            return false;
        }
        if self.pair_to_edge.contains_key(&pair) {
            return false;
        }

        let index = self.graph.add_edge(a, b, edge);
        self.pair_to_edge.insert(pair, index);
        true
    }

    fn edge(&self, pair: NodePair) -> Option<&Edge> {
        self.pair_to_edge
            .get(&pair)
            .and_then(|&index| self.graph.edge_weight(index))
    }

    fn edges(&self) -> Vec<&Edge> {
        let mut pairs: Vec<(&NodePair, &EdgeIndex)> = self.pair_to_edge.iter().collect();
        pairs.sort_unstable_by_key(|(pair, _)| **pair);
        pairs
            .into_iter()
            .filter_map(|(_, &index)| self.graph.edge_weight(index))
            .collect()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        let index = to_index(node);
        if !self.graph.contains_node(index) {
            return Vec::new();
        }

        let mut neighbors: Vec<NodeId> = self.graph.neighbors(index).map(to_id).collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    fn connected_components(&self) -> Vec<Vec<NodeId>> {
        let mut components: Vec<Vec<NodeId>> = tarjan_scc(&self.graph)
            .into_iter()
            .map(|scc| {
                let mut members: Vec<NodeId> = scc.into_iter().map(to_id).collect();
                members.sort_unstable();
                members
            })
            .collect();

        components.sort_unstable_by_key(|members| members.first().copied());
        components
    }
}
