//! Domain layer for the interaction graph
//!
//! # Domain Models
//!
//! - `IdentifierBundle`: accession, primary id and cross-references of one protein
//! - `Protein`: node payload owned by the store
//! - `NodeId` / `NodeRef`: stable arena handle, and the typed "handle or identifier" argument
//! - `NodePair`: normalized unordered endpoint pair (never a self-loop)
//! - `Edge` / `EdgeClass`: one recorded interaction and its classification
//! - `Interaction`: the tuple handed over by file parsers
//!
//! # Port Trait
//!
//! - `GraphStore`: node/edge containers, adjacency and component enumeration.
//!   The graph engine in [`crate::graph`] only talks to this trait.

pub mod registry;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use registry::IdentityRegistry;

// ═══════════════════════════════════════════════════════════════════════════
// Identity
// ═══════════════════════════════════════════════════════════════════════════

/// Identifiers of one protein as produced by a parser.
///
/// All fields share a single alias namespace; no database qualifier is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierBundle {
    /// Accession number (e.g. UniProt accession)
    #[serde(default)]
    pub accession: Option<String>,
    /// Primary display id
    pub primary_id: String,
    /// Cross-reference ids from other databases
    #[serde(default)]
    pub xrefs: Vec<String>,
}

impl IdentifierBundle {
    pub fn new(primary_id: impl Into<String>) -> Self {
        Self {
            accession: None,
            primary_id: primary_id.into(),
            xrefs: Vec::new(),
        }
    }

    pub fn with_accession(mut self, accession: impl Into<String>) -> Self {
        self.accession = Some(accession.into());
        self
    }

    pub fn with_xref(mut self, xref: impl Into<String>) -> Self {
        self.xrefs.push(xref.into());
        self
    }

    /// Flat alias list: accession, primary id, then xrefs.
    ///
    /// Empty strings are skipped and repeats removed, first occurrence wins.
    pub fn aliases(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::with_capacity(2 + self.xrefs.len());
        let candidates = self
            .accession
            .as_deref()
            .into_iter()
            .chain(std::iter::once(self.primary_id.as_str()))
            .chain(self.xrefs.iter().map(String::as_str));

        for alias in candidates {
            if !alias.is_empty() && !out.contains(&alias) {
                out.push(alias);
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.aliases().is_empty()
    }

    /// True if any alias of `self` is also an alias of `other`
    pub fn overlaps(&self, other: &IdentifierBundle) -> bool {
        let theirs = other.aliases();
        self.aliases().iter().any(|alias| theirs.contains(alias))
    }
}

impl fmt::Display for IdentifierBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.aliases().first() {
            Some(first) if self.primary_id.is_empty() => write!(f, "{}", first),
            _ => write!(f, "{}", self.primary_id),
        }
    }
}

/// Node payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Protein {
    pub ids: IdentifierBundle,
}

impl Protein {
    pub fn new(ids: IdentifierBundle) -> Self {
        Self { ids }
    }

    pub fn aliases(&self) -> Vec<&str> {
        self.ids.aliases()
    }

    pub fn primary_id(&self) -> &str {
        &self.ids.primary_id
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Handles
// ═══════════════════════════════════════════════════════════════════════════

/// Stable arena index of a node.
///
/// Handles stay valid until the node is removed; a store may hand a freed
/// slot to a later node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node argument: either a handle or any registered alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    Handle(NodeId),
    Identifier(&'a str),
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Handle(id) => write!(f, "{}", id),
            NodeRef::Identifier(alias) => write!(f, "'{}'", alias),
        }
    }
}

impl From<NodeId> for NodeRef<'_> {
    fn from(id: NodeId) -> Self {
        NodeRef::Handle(id)
    }
}

impl<'a> From<&'a str> for NodeRef<'a> {
    fn from(alias: &'a str) -> Self {
        NodeRef::Identifier(alias)
    }
}

impl<'a> From<&'a String> for NodeRef<'a> {
    fn from(alias: &'a String) -> Self {
        NodeRef::Identifier(alias.as_str())
    }
}

/// Unordered node pair, stored with the smaller handle first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodePair(NodeId, NodeId);

impl NodePair {
    /// Normalize `(a, b)`; `None` for a self-loop.
    pub fn new(a: NodeId, b: NodeId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self(a, b)),
            std::cmp::Ordering::Greater => Some(Self(b, a)),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn first(&self) -> NodeId {
        self.0
    }

    pub fn second(&self) -> NodeId {
        self.1
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.0 == node || self.1 == node
    }

    /// The opposite endpoint, if `node` is one of the two
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.0 {
            Some(self.1)
        } else if node == self.1 {
            Some(self.0)
        } else {
            None
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Edges
// ═══════════════════════════════════════════════════════════════════════════

/// Classification of a recorded interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeClass {
    /// Representative edge of its pair
    Primary,
    /// Same pair, different interaction id
    Duplicate,
    /// Same pair, same interaction id
    Redundant,
}

impl EdgeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Duplicate => "duplicate",
            Self::Redundant => "redundant",
        }
    }
}

impl fmt::Display for EdgeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recorded interaction between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub pair: NodePair,
    /// Interaction identifier from the source dataset
    pub id: String,
    /// Confidence weight
    pub weight: f64,
}

impl Edge {
    pub fn new(pair: NodePair, id: impl Into<String>, weight: f64) -> Self {
        Self {
            pair,
            id: id.into(),
            weight,
        }
    }
}

/// Parsed interaction tuple: two identifier bundles, an interaction id and a weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub a: IdentifierBundle,
    pub b: IdentifierBundle,
    pub id: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl Interaction {
    pub fn new(
        a: IdentifierBundle,
        b: IdentifierBundle,
        id: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            a,
            b,
            id: id.into(),
            weight,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Port Trait
// ═══════════════════════════════════════════════════════════════════════════

/// Node/edge containers and adjacency for an undirected simple graph.
///
/// Only primary edges live in the store; duplicate and redundant records are
/// kept by the graph engine. Implementations must:
///
/// - never store a self-loop (guaranteed by `NodePair`)
/// - keep at most one edge per `NodePair`
/// - drop every incident edge when a node is removed
/// - keep `NodeId`s stable for the lifetime of a node
pub trait GraphStore: Default {
    /// Insert a node and return its handle
    fn add_node(&mut self, protein: Protein) -> NodeId;

    /// Remove a node together with its incident edges
    fn remove_node(&mut self, node: NodeId) -> Option<Protein>;

    fn node(&self, node: NodeId) -> Option<&Protein>;

    fn contains_node(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    /// All live handles, ascending
    fn node_ids(&self) -> Vec<NodeId>;

    fn node_count(&self) -> usize;

    /// Insert the primary edge for `edge.pair`.
    ///
    /// Returns `false` (and stores nothing) if either endpoint is missing or
    /// the pair already has an edge.
    fn insert_edge(&mut self, edge: Edge) -> bool;

    fn edge(&self, pair: NodePair) -> Option<&Edge>;

    /// All primary edges, ordered by pair
    fn edges(&self) -> Vec<&Edge>;

    fn edge_count(&self) -> usize;

    /// Adjacent nodes through primary edges, ascending
    fn neighbors(&self, node: NodeId) -> Vec<NodeId>;

    fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// Connected components; each sorted, ordered by smallest member
    fn connected_components(&self) -> Vec<Vec<NodeId>>;
}
