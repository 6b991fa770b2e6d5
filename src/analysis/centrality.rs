//! Node centrality measures over a frozen graph store.
//!
//! Betweenness is exact-shortest-path based: every ordered node pair is
//! enumerated and each minimum-length path splits one unit of credit
//! among its interior nodes. The pair loop is O(N²) on top of the path
//! search itself — fine for moderate graphs, impractical at tens of
//! thousands of nodes, which is why a node-count ceiling skips the
//! computation instead of letting it hang.

use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::graph::GraphStore;

/// Degree centrality: id → incident edge count.
pub fn degree_centrality(store: &GraphStore) -> HashMap<String, usize> {
    store
        .nodes()
        .iter()
        .map(|n| (n.id.clone(), store.degree(&n.id)))
        .collect()
}

/// Betweenness scores plus whether they were actually computed.
#[derive(Debug, Clone)]
pub struct BetweennessCentrality {
    /// id → accumulated score, ≥ 0 for every node. Empty when skipped.
    pub scores: HashMap<String, f64>,
    /// False when the node ceiling suppressed the computation.
    pub computed: bool,
}

/// Accumulate betweenness over all ordered pairs of distinct nodes.
///
/// The outer loop is parallelized per source node; each worker writes
/// into a private accumulator and the results merge additively, so the
/// frozen store is only ever read.
pub fn betweenness_centrality(store: &GraphStore, node_limit: usize) -> BetweennessCentrality {
    let n = store.node_count();
    if n > node_limit {
        warn!(
            "betweenness skipped: {} nodes exceeds the configured limit of {}",
            n, node_limit
        );
        return BetweennessCentrality {
            scores: HashMap::new(),
            computed: false,
        };
    }
    debug!("betweenness over {} nodes ({} ordered pairs)", n, n.saturating_sub(1) * n);

    let accumulated: HashMap<usize, f64> = (0..n)
        .into_par_iter()
        .map(|source| {
            let mut local: HashMap<usize, f64> = HashMap::new();
            for target in 0..n {
                if target == source {
                    continue;
                }
                let paths = store.shortest_path_indices(source, target);
                if paths.is_empty() {
                    continue;
                }
                let weight = 1.0 / paths.len() as f64;
                for path in &paths {
                    // Endpoints never accrue credit.
                    for &interior in &path[1..path.len() - 1] {
                        *local.entry(interior).or_insert(0.0) += weight;
                    }
                }
            }
            local
        })
        .reduce(HashMap::new, |mut acc, local| {
            for (idx, score) in local {
                *acc.entry(idx).or_insert(0.0) += score;
            }
            acc
        });

    let mut scores: HashMap<String, f64> = store
        .nodes()
        .iter()
        .map(|n| (n.id.clone(), 0.0))
        .collect();
    for (idx, score) in accumulated {
        scores.insert(store.node_id(idx).to_string(), score);
    }

    BetweennessCentrality {
        scores,
        computed: true,
    }
}
