//! protgraph-core - Protein-protein interaction graph engine
//!
//! In-memory interaction network that reconciles datasets with inconsistent
//! identifiers.
//!
//! ## Core Pieces
//!
//! 1. **Identity**: every accession, primary id and cross-reference resolves
//!    through one registry to a stable node handle
//! 2. **Edge classification**: one primary edge per node pair; extra evidence
//!    is kept as duplicate (different interaction id) or redundant (same id)
//! 3. **Union**: merge a second dataset through the identifiers both share
//! 4. **Analytics**: density, clustering coefficient, components,
//!    articulation points
//!
//! ## Usage
//!
//! ```rust
//! use protgraph_core::{IdentifierBundle, Interaction, ProteinGraph};
//!
//! let ids = |id: &str| IdentifierBundle::new(id);
//!
//! let mut yeast = ProteinGraph::from_interactions(vec![
//!     Interaction::new(ids("P1"), ids("P2"), "E1", 1.0),
//!     Interaction::new(ids("P3"), ids("P4"), "E2", 1.0),
//! ])?;
//! let screen = ProteinGraph::from_interactions(vec![
//!     Interaction::new(ids("P1"), ids("P2"), "X1", 0.8),
//!     Interaction::new(ids("P2"), ids("P3"), "X3", 0.6),
//! ])?;
//!
//! let report = yeast.union(&screen)?;
//! assert_eq!(report.duplicates_added, 1);
//! assert_eq!(report.primary_added, 1);
//! assert!(yeast.is_connected());
//! # Ok::<(), protgraph_core::GraphError>(())
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod graph;
pub mod infrastructure;

pub use config::{AliasMatchPolicy, AnalyticsConfig, GraphConfig, MergeConfig};
pub use error::{ErrorKind, GraphError, Result};

pub use domain::{
    Edge, EdgeClass, GraphStore, IdentifierBundle, IdentityRegistry, Interaction, NodeId,
    NodePair, NodeRef, Protein,
};
pub use graph::{EdgeOutcome, MergeReport, ProteinGraph, UNDEFINED_CLUSTERING};
pub use infrastructure::PetgraphStore;
