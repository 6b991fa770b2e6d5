//! Report assembly — the single artifact crossing the core boundary.
//!
//! Where the report is stored and which encoding carries it are the
//! caller's business; the CLI happens to write pretty JSON.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::analysis::{Analysis, Scores};
use crate::graph::{Edge, GraphStats, GraphStore, Node};

/// Run provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// RFC 3339 timestamp of report assembly.
    pub timestamp: String,
    pub root_path: String,
    pub duration_seconds: f64,
}

/// The full serialized graph, nodes and edges in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDump {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Everything one analysis run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub graph_stats: GraphStats,
    pub analysis: Analysis,
    pub scores: Scores,
    pub graph: GraphDump,
}

impl Report {
    /// Combine the run's outputs into the external artifact.
    pub fn assemble(
        root_path: &str,
        duration: Duration,
        store: &GraphStore,
        analysis: Analysis,
        scores: Scores,
    ) -> Self {
        Self {
            metadata: ReportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                root_path: root_path.to_string(),
                duration_seconds: duration.as_secs_f64(),
            },
            graph_stats: store.stats(),
            analysis,
            scores,
            graph: GraphDump {
                nodes: store.nodes().to_vec(),
                edges: store.edges().to_vec(),
            },
        }
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
