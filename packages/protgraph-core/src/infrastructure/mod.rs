//! Infrastructure layer - GraphStore adapters
//!
//! - `PetgraphStore`: in-memory `StableUnGraph` with a pair → edge index

pub mod petgraph_store;

pub use petgraph_store::PetgraphStore;
