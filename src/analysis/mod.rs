//! Metrics engine and score normalizer.
//!
//! Everything here reads a frozen [`crate::graph::GraphStore`]; nothing
//! mutates it.

pub mod centrality;
pub mod levels;
pub mod score;

pub use centrality::{betweenness_centrality, degree_centrality, BetweennessCentrality};
pub use levels::{
    analyze_graph, Analysis, AssociationAnalysis, AtomicAnalysis, MolecularAnalysis, RankedNode,
};
pub use score::{derive_scores, AssociationScores, AtomicScores, MolecularScores, Scores};
