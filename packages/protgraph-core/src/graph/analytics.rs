//! Topology analytics
//!
//! All queries are recomputed from the store on each call, except the
//! connectivity flag which is cached until the next structural change.
//! Time: O(V + E) per call for components and articulation points.

use rustc_hash::FxHashMap;
use std::cmp::{min, Reverse};

use super::ProteinGraph;
use crate::domain::{GraphStore, NodeId, NodePair, NodeRef};
use crate::error::Result;

/// Clustering coefficient of a node with fewer than two neighbors
pub const UNDEFINED_CLUSTERING: f64 = -1.0;

impl<S: GraphStore> ProteinGraph<S> {
    /// Primary edges over the `n·(n-1)/2` possible ones; 0 below two nodes
    pub fn density(&self) -> f64 {
        let n = self.store.node_count();
        if n < 2 {
            return 0.0;
        }
        let max_edges = (n * (n - 1)) as f64 / 2.0;
        self.store.edge_count() as f64 / max_edges
    }

    /// Fraction of neighbor pairs that interact directly.
    ///
    /// Returns [`UNDEFINED_CLUSTERING`] for nodes with fewer than two
    /// neighbors, otherwise a value in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// `NotFound` if `node` does not resolve.
    pub fn clustering_coefficient<'a>(&self, node: impl Into<NodeRef<'a>>) -> Result<f64> {
        let node = self.resolve(node)?;
        let neighbors = self.store.neighbors(node);
        let k = neighbors.len();
        if k < 2 {
            return Ok(UNDEFINED_CLUSTERING);
        }

        let mut linked_pairs = 0usize;
        for (i, &a) in neighbors.iter().enumerate() {
            for &b in &neighbors[i + 1..] {
                if NodePair::new(a, b).and_then(|pair| self.store.edge(pair)).is_some() {
                    linked_pairs += 1;
                }
            }
        }

        Ok(2.0 * linked_pairs as f64 / (k * (k - 1)) as f64)
    }

    /// Nodes without any interaction partner, ascending
    pub fn unconnected_nodes(&self) -> Vec<NodeId> {
        self.store
            .node_ids()
            .into_iter()
            .filter(|&node| self.store.degree(node) == 0)
            .collect()
    }

    /// Connected components; each sorted, ordered by smallest member
    pub fn components(&self) -> Vec<Vec<NodeId>> {
        self.store.connected_components()
    }

    /// True iff the graph has exactly one connected component.
    pub fn is_connected(&self) -> bool {
        *self
            .connected
            .get_or_init(|| self.store.connected_components().len() == 1)
    }

    /// True iff the primary edges contain no cycle
    pub fn is_forest(&self) -> bool {
        let components = self.store.connected_components().len();
        self.store.edge_count() + components == self.store.node_count()
    }

    pub fn is_tree(&self) -> bool {
        self.is_connected() && self.is_forest()
    }

    /// Nodes whose removal splits their component, ascending.
    ///
    /// Components smaller than `analytics.articulation_min_component` are
    /// skipped.
    pub fn articulation_points(&self) -> Vec<NodeId> {
        let min_size = self.config.analytics.articulation_min_component;
        let mut points: Vec<NodeId> = self
            .store
            .connected_components()
            .iter()
            .filter(|component| component.len() >= min_size)
            .flat_map(|component| self.component_articulation_points(component))
            .collect();

        points.sort_unstable();
        points.dedup();
        points
    }

    pub fn is_articulation_point<'a>(&self, node: impl Into<NodeRef<'a>>) -> Result<bool> {
        let node = self.resolve(node)?;
        Ok(self.articulation_points().binary_search(&node).is_ok())
    }

    /// Low-link search over one component.
    ///
    /// DFS from the highest-degree node assigns preorder numbers; then, in
    /// reverse preorder, `low[v]` is the minimum of `pre[v]`, `pre[u]` over
    /// non-tree neighbors `u`, and `low[c]` over tree children `c`.
    fn component_articulation_points(&self, component: &[NodeId]) -> Vec<NodeId> {
        let adjacency: FxHashMap<NodeId, Vec<NodeId>> = component
            .iter()
            .map(|&node| (node, self.store.neighbors(node)))
            .collect();
        let neighbors_of = |node: NodeId| adjacency.get(&node).map(Vec::as_slice).unwrap_or(&[]);

        let Some(&root) = component
            .iter()
            .max_by_key(|&&node| (neighbors_of(node).len(), Reverse(node)))
        else {
            return Vec::new();
        };

        // Iterative DFS: (node, next neighbor cursor)
        let mut preorder: FxHashMap<NodeId, usize> = FxHashMap::default();
        let mut parent: FxHashMap<NodeId, NodeId> = FxHashMap::default();
        let mut order: Vec<NodeId> = Vec::with_capacity(component.len());
        let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
        preorder.insert(root, 0);
        order.push(root);

        while let Some(&(node, cursor)) = stack.last() {
            let neighbors = neighbors_of(node);
            if cursor >= neighbors.len() {
                stack.pop();
                continue;
            }
            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }

            let next = neighbors[cursor];
            if !preorder.contains_key(&next) {
                preorder.insert(next, order.len());
                order.push(next);
                parent.insert(next, node);
                stack.push((next, 0));
            }
        }

        let mut low: FxHashMap<NodeId, usize> = FxHashMap::default();
        let mut points = Vec::new();
        let mut root_children = 0usize;

        for &node in order.iter().rev() {
            let pre = preorder[&node];
            let mut node_low = pre;
            let mut separates = false;

            for &other in neighbors_of(node) {
                if parent.get(&other) == Some(&node) {
                    let child_low = low[&other];
                    node_low = min(node_low, child_low);
                    if node == root {
                        root_children += 1;
                    } else if child_low >= pre {
                        separates = true;
                    }
                } else if parent.get(&node) != Some(&other) {
                    node_low = min(node_low, preorder[&other]);
                }
            }

            low.insert(node, node_low);
            if separates {
                points.push(node);
            }
        }

        if root_children > 1 {
            points.push(root);
        }
        points
    }
}
