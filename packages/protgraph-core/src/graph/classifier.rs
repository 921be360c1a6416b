//! Edge classification and ingestion
//!
//! For a normalized node pair the first edge becomes the primary edge. Later
//! edges on the same pair are recorded as evidence:
//!
//! | incoming id vs primary id | class     |
//! |---------------------------|-----------|
//! | equal                     | Redundant |
//! | different                 | Duplicate |
//!
//! Duplicate and redundant records are each kept at most once per
//! `(pair, interaction id)`.

use tracing::debug;

use super::ProteinGraph;
use crate::domain::{Edge, EdgeClass, GraphStore, Interaction, NodeId, NodePair};
use crate::error::{GraphError, Result};

/// What `add_edge` did with an incoming edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOutcome {
    /// Stored as the pair's primary edge
    Primary,
    /// Recorded as a new duplicate
    Duplicate,
    /// Recorded as a new redundant record
    Redundant,
    /// Same `(pair, id)` already recorded under this class; nothing changed
    AlreadyRecorded(EdgeClass),
    /// Both endpoints are the same node; dropped
    SelfLoop,
}

impl EdgeOutcome {
    /// Class the edge was filed under, if it was not dropped
    pub fn class(&self) -> Option<EdgeClass> {
        match self {
            Self::Primary => Some(EdgeClass::Primary),
            Self::Duplicate => Some(EdgeClass::Duplicate),
            Self::Redundant => Some(EdgeClass::Redundant),
            Self::AlreadyRecorded(class) => Some(*class),
            Self::SelfLoop => None,
        }
    }

    /// True if the graph changed
    pub fn is_new_record(&self) -> bool {
        matches!(self, Self::Primary | Self::Duplicate | Self::Redundant)
    }
}

fn validate_evidence(interaction_id: &str, weight: f64) -> Result<()> {
    if interaction_id.is_empty() {
        return Err(GraphError::invalid_argument("interaction id is empty"));
    }
    if !weight.is_finite() {
        return Err(GraphError::invalid_argument(format!(
            "interaction '{}' has non-finite weight {}",
            interaction_id, weight
        )));
    }
    Ok(())
}

impl<S: GraphStore> ProteinGraph<S> {
    /// Add an edge between two existing nodes and classify it.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if either handle is not a live node, the interaction
    /// id is empty or the weight is not finite. The graph is unchanged on error.
    pub fn add_edge(
        &mut self,
        a: NodeId,
        b: NodeId,
        interaction_id: &str,
        weight: f64,
    ) -> Result<EdgeOutcome> {
        validate_evidence(interaction_id, weight)?;
        for endpoint in [a, b] {
            if !self.store.contains_node(endpoint) {
                return Err(GraphError::invalid_argument(format!(
                    "edge endpoint {} is not a node of this graph",
                    endpoint
                )));
            }
        }

        let Some(pair) = NodePair::new(a, b) else {
            debug!(node = %a, interaction = interaction_id, "self-loop dropped");
            return Ok(EdgeOutcome::SelfLoop);
        };

        let primary_id = match self.store.edge(pair) {
            Some(primary) => primary.id.clone(),
            None => {
                self.store
                    .insert_edge(Edge::new(pair, interaction_id, weight));
                self.invalidate();
                debug!(a = %pair.first(), b = %pair.second(), interaction = interaction_id, "primary edge");
                return Ok(EdgeOutcome::Primary);
            }
        };

        let edge = Edge::new(pair, interaction_id, weight);
        let key = (pair, interaction_id.to_string());
        let outcome = if primary_id == interaction_id {
            if self.redundant_keys.insert(key) {
                self.redundant.push(edge);
                EdgeOutcome::Redundant
            } else {
                EdgeOutcome::AlreadyRecorded(EdgeClass::Redundant)
            }
        } else if self.duplicate_keys.insert(key) {
            self.duplicates.push(edge);
            EdgeOutcome::Duplicate
        } else {
            EdgeOutcome::AlreadyRecorded(EdgeClass::Duplicate)
        };

        if outcome.is_new_record() {
            self.invalidate();
        }
        debug!(a = %pair.first(), b = %pair.second(), interaction = interaction_id, outcome = ?outcome, "edge classified");
        Ok(outcome)
    }

    /// Add a parsed interaction, creating nodes for unknown bundles.
    ///
    /// Each bundle resolves through its first registered alias. Two bundles
    /// naming the same protein are dropped as a self-loop without creating
    /// any node.
    pub fn add_interaction(&mut self, interaction: &Interaction) -> Result<EdgeOutcome> {
        validate_evidence(&interaction.id, interaction.weight)?;
        for ids in [&interaction.a, &interaction.b] {
            if ids.is_empty() {
                return Err(GraphError::invalid_argument(format!(
                    "interaction '{}' has an endpoint without identifiers",
                    interaction.id
                )));
            }
        }

        let known_a = self.registry.resolve_any(interaction.a.aliases());
        let known_b = self.registry.resolve_any(interaction.b.aliases());
        let same_protein = match (known_a, known_b) {
            (Some(a), Some(b)) => a == b,
            (None, None) => interaction.a.overlaps(&interaction.b),
            _ => false,
        };
        if same_protein {
            debug!(interaction = %interaction.id, "self-loop dropped");
            return Ok(EdgeOutcome::SelfLoop);
        }

        let a = self.ensure_node(&interaction.a)?;
        let b = self.ensure_node(&interaction.b)?;
        self.add_edge(a, b, &interaction.id, interaction.weight)
    }

    /// Add every interaction in order, stopping at the first error.
    pub fn extend_interactions<I>(&mut self, interactions: I) -> Result<usize>
    where
        I: IntoIterator<Item = Interaction>,
    {
        let mut added = 0;
        for interaction in interactions {
            if self.add_interaction(&interaction)?.is_new_record() {
                added += 1;
            }
        }
        Ok(added)
    }
}

impl ProteinGraph {
    /// Build a graph with default configuration from parsed interactions
    pub fn from_interactions<I>(interactions: I) -> Result<Self>
    where
        I: IntoIterator<Item = Interaction>,
    {
        let mut graph = Self::new();
        graph.extend_interactions(interactions)?;
        Ok(graph)
    }
}
