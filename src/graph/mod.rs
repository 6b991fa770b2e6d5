//! Dependency graph module — the structural backbone of ArchLens.
//!
//! Provides the graph data model, the arena-backed store with its
//! traversal operations, and the builder that populates a store from
//! the scanning collaborators.

pub mod builder;
pub mod store;
pub mod types;

pub use builder::{build_graph, BuildResult};
pub use store::GraphStore;
pub use types::{Edge, GraphStats, Level, Node, NodeKind, Relationship};
