//! Cascading node removal
//!
//! Removing a node drops, in order: duplicate/redundant records touching it,
//! its entries in the neighbors' adjacency, its primary edges, the node
//! itself, and every alias it owns in the registry.

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use super::ProteinGraph;
use crate::domain::{Edge, GraphStore, NodeId, NodeRef};
use crate::error::Result;

/// Remove records touching any of `nodes`, keeping the dedup keys in sync
fn retain_untouched(
    records: &mut Vec<Edge>,
    keys: &mut FxHashSet<super::EvidenceKey>,
    touches: impl Fn(&Edge) -> bool,
) -> usize {
    let before = records.len();
    records.retain(|edge| {
        if touches(edge) {
            keys.remove(&(edge.pair, edge.id.clone()));
            false
        } else {
            true
        }
    });
    before - records.len()
}

impl<S: GraphStore> ProteinGraph<S> {
    /// Remove nodes by handle or alias.
    ///
    /// All arguments are resolved before anything is removed, so an unknown
    /// node leaves the graph untouched. Repeated arguments are removed once.
    ///
    /// # Errors
    ///
    /// `NotFound` if any argument does not resolve.
    pub fn remove_nodes<'a, I>(&mut self, nodes: I) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: Into<NodeRef<'a>>,
    {
        let targets = self.resolve_all(nodes)?;

        for &node in &targets {
            self.remove_resolved(node);
        }

        info!(removed = targets.len(), remaining = self.node_count(), "nodes removed");
        Ok(targets.len())
    }

    /// Drop duplicate records touching any of `nodes`; all of them when
    /// `nodes` is empty. Returns the number of records dropped.
    pub fn remove_dup_edges<'a, I>(&mut self, nodes: I) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: Into<NodeRef<'a>>,
    {
        let targets: FxHashSet<NodeId> = self.resolve_all(nodes)?.into_iter().collect();

        let dropped = if targets.is_empty() {
            let count = self.duplicates.len();
            self.duplicates.clear();
            self.duplicate_keys.clear();
            count
        } else {
            retain_untouched(&mut self.duplicates, &mut self.duplicate_keys, |edge| {
                targets.contains(&edge.pair.first()) || targets.contains(&edge.pair.second())
            })
        };

        if dropped > 0 {
            self.invalidate();
        }
        Ok(dropped)
    }

    pub(super) fn resolve_all<'a, I>(&self, nodes: I) -> Result<Vec<NodeId>>
    where
        I: IntoIterator,
        I::Item: Into<NodeRef<'a>>,
    {
        let mut seen = FxHashSet::default();
        let mut resolved = Vec::new();
        for node in nodes {
            let node = self.resolve(node)?;
            if seen.insert(node) {
                resolved.push(node);
            }
        }
        Ok(resolved)
    }

    fn remove_resolved(&mut self, node: NodeId) {
        let touches = |edge: &Edge| edge.pair.contains(node);
        let duplicates = retain_untouched(&mut self.duplicates, &mut self.duplicate_keys, touches);
        let redundant = retain_untouched(&mut self.redundant, &mut self.redundant_keys, touches);

        let Some(protein) = self.store.remove_node(node) else {
            return;
        };
        let aliases = self.registry.purge(node);
        self.invalidate();

        debug!(
            node = %node,
            protein = %protein.ids,
            duplicates,
            redundant,
            aliases,
            "node removed"
        );
    }
}
