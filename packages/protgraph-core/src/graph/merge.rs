//! Dataset union
//!
//! Folds a second, independently built graph into this one without creating
//! duplicate proteins for identifiers both datasets already know.
//!
//! 1. Collect the aliases registered in both graphs, one per destination node.
//! 2. For each shared node `c`, walk every neighbor `s` of its source node:
//!    - an alias of `s` resolves here to `m` → submit `(c, m)` with the source
//!      interaction id and weight to the classifier
//!    - nothing resolves → copy `s` as a new node, then submit `(c, copy)`
//! 3. Source interactions between two nodes that are both unknown here are
//!    not imported: neither endpoint can be cross-referenced.
//!
//! A source interaction between two shared nodes is submitted from both
//! endpoints, so a newly imported primary edge is also recorded once as
//! redundant. `merge.import_each_source_edge_once` submits it once instead.
//!
//! The source graph is only read. A failing union leaves the destination
//! partially merged.

use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use super::{EdgeOutcome, ProteinGraph};
use crate::config::AliasMatchPolicy;
use crate::domain::{GraphStore, NodeId, NodePair, Protein};
use crate::error::{GraphError, Result};

/// Counters describing what `union` changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Destination nodes sharing at least one alias with the source
    pub shared_nodes: usize,
    /// New primary edges
    pub primary_added: usize,
    /// New duplicate records
    pub duplicates_added: usize,
    /// New redundant records
    pub redundant_added: usize,
    /// Source nodes copied into the destination
    pub nodes_created: usize,
    /// Source interactions that changed nothing (already recorded, self-loop)
    pub unchanged: usize,
    /// Source proteins left out by `AliasMatchPolicy::SkipAmbiguous`
    pub ambiguous_skipped: usize,
}

impl MergeReport {
    fn record(&mut self, outcome: EdgeOutcome) {
        match outcome {
            EdgeOutcome::Primary => self.primary_added += 1,
            EdgeOutcome::Duplicate => self.duplicates_added += 1,
            EdgeOutcome::Redundant => self.redundant_added += 1,
            EdgeOutcome::AlreadyRecorded(_) | EdgeOutcome::SelfLoop => self.unchanged += 1,
        }
    }

    /// Total records added to the destination
    pub fn edges_added(&self) -> usize {
        self.primary_added + self.duplicates_added + self.redundant_added
    }
}

/// Where a source protein lands in the destination
enum Match {
    Existing(NodeId),
    Unknown,
    Ambiguous(Vec<NodeId>),
}

impl<S: GraphStore> ProteinGraph<S> {
    /// Merge `source` into `self`.
    ///
    /// # Errors
    ///
    /// `InvalidGraph` if `source` is internally inconsistent (an alias or a
    /// neighbor pointing at a missing node or edge).
    pub fn union<T: GraphStore>(&mut self, source: &ProteinGraph<T>) -> Result<MergeReport> {
        let shared = self.shared_nodes(source)?;
        let mut report = MergeReport {
            shared_nodes: shared.len(),
            ..MergeReport::default()
        };
        let mut imported: FxHashSet<NodePair> = FxHashSet::default();
        let mut ambiguous: FxHashSet<NodeId> = FxHashSet::default();

        for (&dest_node, (src_node, alias)) in &shared {
            debug!(node = %dest_node, alias = %alias, "merging shared node");

            let src_protein = source.store.node(*src_node).ok_or_else(|| {
                GraphError::invalid_graph(format!("source node {} is not a node", src_node))
            })?;
            if let Match::Ambiguous(candidates) = self.match_protein(src_protein) {
                if ambiguous.insert(*src_node) {
                    warn!(
                        protein = %src_protein.ids,
                        candidates = candidates.len(),
                        "ambiguous aliases, shared node not merged"
                    );
                }
                continue;
            }

            for src_neighbor in source.store.neighbors(*src_node) {
                let src_pair = NodePair::new(*src_node, src_neighbor).ok_or_else(|| {
                    GraphError::invalid_graph(format!("source node {} lists itself as neighbor", src_node))
                })?;
                if self.config.merge.import_each_source_edge_once && !imported.insert(src_pair) {
                    continue;
                }

                let src_edge = source.store.edge(src_pair).ok_or_else(|| {
                    GraphError::invalid_graph(format!(
                        "source nodes {} and {} are neighbors without an edge",
                        src_pair.first(),
                        src_pair.second()
                    ))
                })?;
                let protein = source.store.node(src_neighbor).ok_or_else(|| {
                    GraphError::invalid_graph(format!("source neighbor {} is not a node", src_neighbor))
                })?;

                let partner = match self.match_protein(protein) {
                    Match::Existing(node) => node,
                    Match::Unknown => {
                        report.nodes_created += 1;
                        self.insert_protein(protein.clone())
                    }
                    Match::Ambiguous(candidates) => {
                        if ambiguous.insert(src_neighbor) {
                            warn!(
                                protein = %protein.ids,
                                candidates = candidates.len(),
                                "ambiguous aliases, neighbor not imported"
                            );
                        }
                        continue;
                    }
                };

                let outcome = self.add_edge(dest_node, partner, &src_edge.id, src_edge.weight)?;
                report.record(outcome);
            }
        }
        report.ambiguous_skipped = ambiguous.len();

        info!(
            shared = report.shared_nodes,
            primary = report.primary_added,
            duplicates = report.duplicates_added,
            redundant = report.redundant_added,
            created = report.nodes_created,
            skipped = report.ambiguous_skipped,
            "union complete"
        );
        Ok(report)
    }

    /// Shared destination nodes, each with its source node and the alias
    /// that linked them. The smallest alias wins when several do.
    fn shared_nodes<T: GraphStore>(
        &self,
        source: &ProteinGraph<T>,
    ) -> Result<BTreeMap<NodeId, (NodeId, String)>> {
        let mut shared = BTreeMap::new();

        for alias in source.registry.identifiers() {
            let Some(dest_node) = self.registry.resolve(alias) else {
                continue;
            };
            let src_node = source
                .registry
                .resolve(alias)
                .filter(|node| source.store.contains_node(*node))
                .ok_or_else(|| {
                    GraphError::invalid_graph(format!(
                        "source alias '{}' does not resolve to a node",
                        alias
                    ))
                })?;

            shared
                .entry(dest_node)
                .or_insert_with(|| (src_node, alias.to_string()));
        }
        Ok(shared)
    }

    fn match_protein(&self, protein: &Protein) -> Match {
        let aliases = protein.aliases();
        match self.config.merge.alias_match {
            AliasMatchPolicy::FirstMatch => match self.registry.resolve_any(aliases) {
                Some(node) => Match::Existing(node),
                None => Match::Unknown,
            },
            AliasMatchPolicy::SkipAmbiguous => {
                let mut candidates: Vec<NodeId> = aliases
                    .into_iter()
                    .filter_map(|alias| self.registry.resolve(alias))
                    .collect();
                candidates.sort_unstable();
                candidates.dedup();

                match candidates.len() {
                    0 => Match::Unknown,
                    1 => Match::Existing(candidates[0]),
                    _ => Match::Ambiguous(candidates),
                }
            }
        }
    }
}
