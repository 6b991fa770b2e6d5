//! Data model for the dependency graph.

use serde::{Deserialize, Serialize};

use crate::scan::Language;

/// Modelling level that introduced a node or edge.
///
/// Provenance only — no algorithm branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Individual source files and their raw imports.
    Atomic,
    /// Synthesized modules and containment.
    Molecular,
    /// Whole-graph structure (components, complexity).
    Association,
}

/// Semantic relationship carried by an edge.
///
/// Directionality is preserved in the data but ignored by traversal —
/// adjacency, connectivity, and centrality all treat edges as undirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    /// `from` imports `to`.
    Imports,
    /// `from` (a module) contains `to` (a file).
    Contains,
}

/// What a node represents, with per-kind attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeKind {
    /// A scanned source file.
    File {
        extension: String,
        language: Language,
    },
    /// A module synthesized from one connected component of files.
    Module { members: Vec<String> },
}

impl NodeKind {
    /// The level a node of this kind belongs to.
    pub fn level(&self) -> Level {
        match self {
            Self::File { .. } => Level::Atomic,
            Self::Module { .. } => Level::Molecular,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }
}

/// A node in the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique id — a relative path for files, `module:<k>` for modules.
    pub id: String,
    #[serde(flatten)]
    pub kind: NodeKind,
    pub level: Level,
}

/// A directed edge between two node ids.
///
/// Endpoints need not resolve to known nodes: an import of an external
/// or unresolved module produces a dangling edge, which is tolerated by
/// design rather than treated as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub relationship: Relationship,
    pub level: Level,
}

/// Whole-graph summary statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    /// `edges / (nodes * (nodes - 1))`, 0 when fewer than 2 nodes.
    pub density: f64,
}
