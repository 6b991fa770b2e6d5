//! Score normalization — pure functions over immutable metric
//! snapshots, each clamped to [0, 1].
//!
//! Every division is guarded explicitly; no formula relies on
//! floating-point NaN propagation for its edge cases.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::levels::Analysis;

/// Average-degree value treated as fully unhealthy.
const DEGREE_CAP: f64 = 20.0;
/// Architectural complexity treated as fully complex.
const COMPLEXITY_CAP: f64 = 100.0;
/// Component count at which the component score halves.
const COMPONENT_SCALE: f64 = 10.0;

/// File-level scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtomicScores {
    pub diversity: f64,
    pub balance: f64,
    pub health: f64,
}

/// Module-level scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MolecularScores {
    pub coupling: f64,
}

/// Whole-graph scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssociationScores {
    pub component: f64,
    pub complexity: f64,
}

/// Normalized scores grouped by the level their inputs come from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub atomic: AtomicScores,
    pub molecular: MolecularScores,
    pub association: AssociationScores,
}

/// Derive all scores from one analysis snapshot.
pub fn derive_scores(analysis: &Analysis) -> Scores {
    let top_degrees: Vec<f64> = analysis
        .atomic
        .top_by_degree
        .iter()
        .map(|r| r.value as f64)
        .collect();

    Scores {
        atomic: AtomicScores {
            diversity: diversity_score(&analysis.atomic.language_histogram),
            balance: balance_score(&top_degrees),
            health: health_score(analysis.atomic.average_degree),
        },
        molecular: MolecularScores {
            coupling: coupling_score(analysis.molecular.coupling_ratio),
        },
        association: AssociationScores {
            component: component_score(analysis.association.component_count),
            complexity: complexity_score(analysis.association.architectural_complexity),
        },
    }
}

/// Shannon entropy of the file-type histogram, normalized by
/// `log2(distinct types)`. 0 when the histogram is empty or has a
/// single type (entropy 0 means score 0, not a division by zero).
pub fn diversity_score(histogram: &BTreeMap<String, usize>) -> f64 {
    let total: usize = histogram.values().sum();
    if total == 0 {
        return 0.0;
    }
    let distinct = histogram.values().filter(|&&count| count > 0).count();
    if distinct <= 1 {
        return 0.0;
    }
    let total = total as f64;
    let entropy: f64 = histogram
        .values()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum();
    clamp_unit(entropy / (distinct as f64).log2())
}

/// `1 - (max - min) / max` over a top-N centrality list. 1 when the
/// list is empty or its maximum is 0.
pub fn balance_score(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 1.0;
    }
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    if max <= 0.0 {
        return 1.0;
    }
    clamp_unit(1.0 - (max - min) / max)
}

/// `1 - min(1, average_degree / 20)`.
pub fn health_score(average_degree: f64) -> f64 {
    clamp_unit(1.0 - (average_degree / DEGREE_CAP).min(1.0))
}

/// `1 - coupling_ratio`.
pub fn coupling_score(coupling_ratio: f64) -> f64 {
    clamp_unit(1.0 - coupling_ratio)
}

/// `1 / (1 + components / 10)`.
pub fn component_score(component_count: usize) -> f64 {
    clamp_unit(1.0 / (1.0 + component_count as f64 / COMPONENT_SCALE))
}

/// `1 - min(1, complexity / 100)`.
pub fn complexity_score(complexity: i64) -> f64 {
    clamp_unit(1.0 - (complexity as f64 / COMPLEXITY_CAP).min(1.0))
}

fn clamp_unit(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}
