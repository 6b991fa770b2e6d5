//! # ArchLens
//!
//! Dependency-graph analysis engine for scoring architectural health.
//!
//! ArchLens walks a source tree, builds a multi-level graph of files
//! and synthesized modules from heuristically extracted imports, then
//! computes structural metrics — connectivity, centrality, coupling,
//! cohesion, modularity, complexity — and normalizes them into bounded
//! [0, 1] scores, all packaged into a single report.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use archlens::Analyzer;
//!
//! let analyzer = Analyzer::with_defaults();
//! let report = analyzer.analyze(std::path::Path::new(".")).unwrap();
//! println!("{}", report.to_json().unwrap());
//! ```
//!
//! The pipeline is synchronous and single-threaded per run, except the
//! betweenness pair loop which fans out over rayon against the frozen
//! graph.

pub mod analysis;
pub mod config;
pub mod error;
pub mod graph;
pub mod report;
pub mod scan;

// Re-exports for convenience
pub use config::AnalyzerConfig;
pub use error::{ArchLensError, Result};
pub use graph::GraphStore;
pub use report::Report;

use std::path::Path;
use std::time::Instant;
use tracing::info;

use analysis::{analyze_graph, derive_scores};
use graph::build_graph;
use scan::{FsWalker, HeuristicExtractor};

/// The main analyzer facade.
///
/// Wires the shipped walker and extractor into the build → analyze →
/// score → assemble pipeline. Callers with their own collaborators can
/// drive [`graph::build_graph`] directly instead.
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(AnalyzerConfig::default())
    }

    /// Run one full analysis over a source tree.
    pub fn analyze(&self, root: &Path) -> Result<Report> {
        let started = Instant::now();

        let walker = FsWalker::new(root, &self.config.scan)?;
        let extractor = HeuristicExtractor::new()?;
        let built = build_graph(&walker, &extractor);
        info!(
            "graph built: {} nodes, {} edges, {} modules",
            built.store.node_count(),
            built.store.edge_count(),
            built.modules.len()
        );

        let analysis = analyze_graph(&built.store, &self.config.analysis);
        let scores = derive_scores(&analysis);

        Ok(Report::assemble(
            &root.to_string_lossy(),
            started.elapsed(),
            &built.store,
            analysis,
            scores,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn analyze_end_to_end() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("main.rs"),
            "use serde::Serialize;\nfn main() {}\n",
        )
        .unwrap();
        fs::write(dir.path().join("util.py"), "import os\n").unwrap();

        let report = Analyzer::with_defaults().analyze(dir.path()).unwrap();

        assert_eq!(report.analysis.atomic.file_count, 2);
        assert_eq!(report.analysis.atomic.language_histogram["rust"], 1);
        assert_eq!(report.analysis.atomic.language_histogram["python"], 1);
        // Two disconnected files, one module each.
        assert_eq!(report.analysis.molecular.module_count, 2);
        // 2 files + 2 modules; 2 dangling imports + 2 contains edges.
        assert_eq!(report.graph_stats.nodes, 4);
        assert_eq!(report.graph_stats.edges, 4);
        assert!(report.scores.atomic.diversity > 0.9);
    }

    #[test]
    fn analyze_rejects_a_missing_root() {
        let result = Analyzer::with_defaults().analyze(Path::new("/definitely/not/here"));
        assert!(matches!(result, Err(ArchLensError::InvalidRoot(_))));
    }
}
