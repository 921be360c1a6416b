//! Protein interaction graph
//!
//! `ProteinGraph` owns the node/edge store, the identity registry and the
//! duplicate/redundant evidence lists. Operations are split by concern:
//!
//! - [`classifier`]: `add_edge`, `add_interaction` (edge classification, ingestion)
//! - [`merge`]: `union` of two independently built graphs
//! - [`analytics`]: density, clustering coefficient, articulation points, connectivity
//! - [`removal`]: cascading node removal, duplicate pruning
//! - [`subgraph`]: induced subgraph extraction
//!
//! The graph is single-threaded and not internally synchronized; build
//! partial graphs independently and fan them in with `union`.

pub mod analytics;
pub mod classifier;
pub mod merge;
pub mod removal;
pub mod subgraph;

use once_cell::unsync::OnceCell;
use rustc_hash::FxHashSet;

use crate::config::GraphConfig;
use crate::domain::{
    Edge, EdgeClass, GraphStore, IdentifierBundle, IdentityRegistry, NodeId, NodePair, NodeRef,
    Protein,
};
use crate::error::{GraphError, Result};
use crate::infrastructure::PetgraphStore;

pub use analytics::UNDEFINED_CLUSTERING;
pub use classifier::EdgeOutcome;
pub use merge::MergeReport;

/// Key used to deduplicate duplicate/redundant records
type EvidenceKey = (NodePair, String);

#[derive(Debug, Clone, Default)]
pub struct ProteinGraph<S: GraphStore = PetgraphStore> {
    store: S,
    registry: IdentityRegistry,

    /// Extra evidence for already connected pairs, different interaction id
    duplicates: Vec<Edge>,
    duplicate_keys: FxHashSet<EvidenceKey>,

    /// Repeated records of the primary interaction id
    redundant: Vec<Edge>,
    redundant_keys: FxHashSet<EvidenceKey>,

    config: GraphConfig,

    /// Cached `is_connected`; reset on every structural mutation
    connected: OnceCell<bool>,
}

impl ProteinGraph<PetgraphStore> {
    /// Create empty graph with default configuration
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: GraphStore> ProteinGraph<S> {
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            store: S::default(),
            registry: IdentityRegistry::new(),
            duplicates: Vec::new(),
            duplicate_keys: FxHashSet::default(),
            redundant: Vec::new(),
            redundant_keys: FxHashSet::default(),
            config,
            connected: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GraphConfig) {
        self.config = config;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Nodes
    // ═══════════════════════════════════════════════════════════════════════

    pub fn node_count(&self) -> usize {
        self.store.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.store.node_count() == 0
    }

    /// All node handles, ascending
    pub fn nodes(&self) -> Vec<NodeId> {
        self.store.node_ids()
    }

    pub fn node(&self, node: NodeId) -> Option<&Protein> {
        self.store.node(node)
    }

    /// Resolve a handle or alias to a live node
    ///
    /// # Errors
    ///
    /// `NotFound` if the handle is dead or the alias is unknown.
    pub fn resolve<'a>(&self, node: impl Into<NodeRef<'a>>) -> Result<NodeId> {
        let node = node.into();
        self.try_resolve(node).ok_or_else(|| GraphError::not_found(node))
    }

    pub fn try_resolve(&self, node: NodeRef<'_>) -> Option<NodeId> {
        match node {
            NodeRef::Handle(id) => self.store.contains_node(id).then_some(id),
            NodeRef::Identifier(alias) => self.registry.resolve(alias),
        }
    }

    pub fn has_node<'a>(&self, node: impl Into<NodeRef<'a>>) -> bool {
        self.try_resolve(node.into()).is_some()
    }

    /// Nodes for the aliases that resolve; unknown aliases are skipped.
    ///
    /// Each node appears once, in order of first match.
    pub fn nodes_by_ids<'a, I>(&self, aliases: I) -> Vec<NodeId>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = FxHashSet::default();
        aliases
            .into_iter()
            .filter_map(|alias| self.registry.resolve(alias))
            .filter(|node| seen.insert(*node))
            .collect()
    }

    /// Return the node any alias of `ids` resolves to, or insert a new one.
    ///
    /// A new node claims every alias of the bundle not owned by another node.
    pub fn ensure_node(&mut self, ids: &IdentifierBundle) -> Result<NodeId> {
        if ids.is_empty() {
            return Err(GraphError::invalid_argument(
                "identifier bundle has no aliases",
            ));
        }

        if let Some(existing) = self.registry.resolve_any(ids.aliases()) {
            return Ok(existing);
        }
        Ok(self.insert_protein(Protein::new(ids.clone())))
    }

    /// Insert `protein` as a new node and register all of its aliases
    pub(crate) fn insert_protein(&mut self, protein: Protein) -> NodeId {
        let aliases: Vec<String> = protein.aliases().into_iter().map(str::to_string).collect();
        let node = self.store.add_node(protein);
        self.registry
            .register(node, aliases.iter().map(String::as_str));
        self.invalidate();
        node
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Adjacency
    // ═══════════════════════════════════════════════════════════════════════

    /// Interaction partners of `node`, ascending
    pub fn neighbors<'a>(&self, node: impl Into<NodeRef<'a>>) -> Result<Vec<NodeId>> {
        let node = self.resolve(node)?;
        Ok(self.store.neighbors(node))
    }

    pub fn neighbor_count<'a>(&self, node: impl Into<NodeRef<'a>>) -> Result<usize> {
        let node = self.resolve(node)?;
        Ok(self.store.degree(node))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Edges
    // ═══════════════════════════════════════════════════════════════════════

    /// Number of primary edges
    pub fn edge_count(&self) -> usize {
        self.store.edge_count()
    }

    /// Primary edge between two nodes, if any
    pub fn edge<'a, 'b>(
        &self,
        a: impl Into<NodeRef<'a>>,
        b: impl Into<NodeRef<'b>>,
    ) -> Result<Option<&Edge>> {
        let a = self.resolve(a)?;
        let b = self.resolve(b)?;
        Ok(NodePair::new(a, b).and_then(|pair| self.store.edge(pair)))
    }

    /// All primary edges, ordered by pair
    pub fn edges(&self) -> Vec<&Edge> {
        self.store.edges()
    }

    pub fn duplicate_edges(&self) -> &[Edge] {
        &self.duplicates
    }

    pub fn redundant_edges(&self) -> &[Edge] {
        &self.redundant
    }

    /// Every record carrying `interaction_id`, tagged with its class
    pub fn edge_by_id(&self, interaction_id: &str) -> Vec<(EdgeClass, &Edge)> {
        let primary = self
            .store
            .edges()
            .into_iter()
            .filter(|edge| edge.id == interaction_id)
            .map(|edge| (EdgeClass::Primary, edge));
        let duplicate = self
            .duplicates
            .iter()
            .filter(|edge| edge.id == interaction_id)
            .map(|edge| (EdgeClass::Duplicate, edge));
        let redundant = self
            .redundant
            .iter()
            .filter(|edge| edge.id == interaction_id)
            .map(|edge| (EdgeClass::Redundant, edge));

        primary.chain(duplicate).chain(redundant).collect()
    }

    fn invalidate(&mut self) {
        self.connected.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(id: &str) -> IdentifierBundle {
        IdentifierBundle::new(id)
    }

    #[test]
    fn test_empty_graph() {
        let graph = ProteinGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_ensure_node_reuses_existing() {
        let mut graph = ProteinGraph::new();
        let a = graph
            .ensure_node(&bundle("CDC28").with_accession("P00546"))
            .unwrap();
        let again = graph
            .ensure_node(&bundle("other").with_xref("P00546"))
            .unwrap();

        assert_eq!(a, again);
        assert_eq!(graph.node_count(), 1);
        assert!(!graph.registry().has("other"));
    }

    #[test]
    fn test_ensure_node_rejects_empty_bundle() {
        let mut graph = ProteinGraph::new();
        let err = graph.ensure_node(&bundle("")).unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_resolve_by_handle_and_alias() {
        let mut graph = ProteinGraph::new();
        let a = graph.ensure_node(&bundle("A").with_xref("xa")).unwrap();

        assert_eq!(graph.resolve(a).unwrap(), a);
        assert_eq!(graph.resolve("xa").unwrap(), a);
        assert!(graph.has_node("A"));
        assert!(graph.resolve("nope").unwrap_err().is_not_found());
        assert!(graph.resolve(NodeId(99)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_nodes_by_ids_skips_unknown_and_repeats() {
        let mut graph = ProteinGraph::new();
        let a = graph.ensure_node(&bundle("A").with_xref("xa")).unwrap();
        let b = graph.ensure_node(&bundle("B")).unwrap();

        assert_eq!(graph.nodes_by_ids(["B", "missing", "A", "xa"]), vec![b, a]);
    }

    #[test]
    fn test_edge_by_id_reports_every_class() {
        let mut graph = ProteinGraph::new();
        let a = graph.ensure_node(&bundle("A")).unwrap();
        let b = graph.ensure_node(&bundle("B")).unwrap();
        let c = graph.ensure_node(&bundle("C")).unwrap();

        graph.add_edge(a, b, "E1", 1.0).unwrap();
        graph.add_edge(b, c, "E2", 1.0).unwrap();
        graph.add_edge(a, b, "E1", 0.5).unwrap();
        graph.add_edge(b, c, "E1", 0.5).unwrap();

        let classes: Vec<EdgeClass> = graph
            .edge_by_id("E1")
            .into_iter()
            .map(|(class, _)| class)
            .collect();
        assert_eq!(
            classes,
            vec![EdgeClass::Primary, EdgeClass::Duplicate, EdgeClass::Redundant]
        );
        assert!(graph.edge_by_id("E9").is_empty());
    }
}
