//! Level-grouped structural analyses: atomic (files), molecular
//! (modules and coupling), association (whole-graph shape).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use super::centrality::{betweenness_centrality, degree_centrality};
use crate::config::AnalysisConfig;
use crate::graph::{GraphStore, NodeKind, Relationship};

/// One entry of a ranked centrality list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedNode<T> {
    pub id: String,
    pub value: T,
}

/// File-level measures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomicAnalysis {
    pub file_count: usize,
    /// Language name → file count.
    pub language_histogram: BTreeMap<String, usize>,
    /// Top-N by degree; ties keep first-seen insertion order.
    pub top_by_degree: Vec<RankedNode<usize>>,
    /// Mean degree over File nodes only.
    pub average_degree: f64,
}

/// Module-level measures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MolecularAnalysis {
    pub module_count: usize,
    /// Top-N by betweenness. Empty when betweenness was skipped.
    pub critical_connectors: Vec<RankedNode<f64>>,
    pub betweenness_computed: bool,
    /// `|imports| / (N * (N - 1))`, 0 when fewer than 2 nodes.
    pub coupling_ratio: f64,
    /// Mean over components of `internal / (internal + external + 1)`.
    pub cohesion: f64,
}

/// Whole-graph measures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationAnalysis {
    pub component_count: usize,
    pub largest_component: usize,
    /// Component sizes, descending.
    pub component_sizes: Vec<usize>,
    /// `E - N + 2C` — a generalized cyclomatic-complexity analogue.
    pub architectural_complexity: i64,
    /// Fraction of all edges internal to their component; 0 with no
    /// edges.
    pub modularity: f64,
}

/// All three analysis levels over one frozen graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub atomic: AtomicAnalysis,
    pub molecular: MolecularAnalysis,
    pub association: AssociationAnalysis,
}

/// Run the metrics engine over a frozen store.
pub fn analyze_graph(store: &GraphStore, config: &AnalysisConfig) -> Analysis {
    let components = store.connected_components();
    // (internal, external) edge counts per component, reused by both
    // cohesion and modularity.
    let splits: Vec<(usize, usize)> = components
        .iter()
        .map(|members| edge_split(store, members))
        .collect();

    Analysis {
        atomic: atomic_analysis(store, config.top_n),
        molecular: molecular_analysis(store, config, &splits),
        association: association_analysis(store, &components, &splits),
    }
}

/// Count a component's internal edges (both endpoints inside) and
/// external edges (exactly one endpoint inside — the other endpoint in
/// another component or dangling).
fn edge_split(store: &GraphStore, members: &[String]) -> (usize, usize) {
    let inside: HashSet<&str> = members.iter().map(String::as_str).collect();
    let mut internal = 0;
    let mut external = 0;
    for edge in store.edges() {
        let from_in = inside.contains(edge.from.as_str());
        let to_in = inside.contains(edge.to.as_str());
        if from_in && to_in {
            internal += 1;
        } else if from_in || to_in {
            external += 1;
        }
    }
    (internal, external)
}

fn atomic_analysis(store: &GraphStore, top_n: usize) -> AtomicAnalysis {
    let degrees = degree_centrality(store);

    let mut file_count = 0;
    let mut degree_sum = 0usize;
    let mut language_histogram: BTreeMap<String, usize> = BTreeMap::new();
    for node in store.nodes() {
        if let NodeKind::File { language, .. } = &node.kind {
            file_count += 1;
            degree_sum += degrees.get(&node.id).copied().unwrap_or(0);
            *language_histogram
                .entry(language.name().to_string())
                .or_insert(0) += 1;
        }
    }
    let average_degree = if file_count == 0 {
        0.0
    } else {
        degree_sum as f64 / file_count as f64
    };

    AtomicAnalysis {
        file_count,
        language_histogram,
        top_by_degree: top_ranked(store, &degrees, top_n),
        average_degree,
    }
}

fn molecular_analysis(
    store: &GraphStore,
    config: &AnalysisConfig,
    splits: &[(usize, usize)],
) -> MolecularAnalysis {
    let module_count = store
        .nodes()
        .iter()
        .filter(|n| matches!(n.kind, NodeKind::Module { .. }))
        .count();

    let bc = betweenness_centrality(store, config.betweenness_node_limit);
    let critical_connectors = if bc.computed {
        top_ranked(store, &bc.scores, config.top_n)
    } else {
        Vec::new()
    };

    let n = store.node_count();
    let import_edges = store
        .edges()
        .iter()
        .filter(|e| e.relationship == Relationship::Imports)
        .count();
    let coupling_ratio = if n <= 1 {
        0.0
    } else {
        import_edges as f64 / (n * (n - 1)) as f64
    };

    // The +1 in the denominator guards empty components and dampens
    // singletons.
    let cohesion = if splits.is_empty() {
        0.0
    } else {
        splits
            .iter()
            .map(|&(internal, external)| internal as f64 / (internal + external + 1) as f64)
            .sum::<f64>()
            / splits.len() as f64
    };

    MolecularAnalysis {
        module_count,
        critical_connectors,
        betweenness_computed: bc.computed,
        coupling_ratio,
        cohesion,
    }
}

fn association_analysis(
    store: &GraphStore,
    components: &[Vec<String>],
    splits: &[(usize, usize)],
) -> AssociationAnalysis {
    let mut component_sizes: Vec<usize> = components.iter().map(Vec::len).collect();
    component_sizes.sort_unstable_by(|a, b| b.cmp(a));

    let edges = store.edge_count();
    let architectural_complexity =
        edges as i64 - store.node_count() as i64 + 2 * components.len() as i64;

    let internal_total: usize = splits.iter().map(|&(internal, _)| internal).sum();
    let modularity = if edges == 0 {
        0.0
    } else {
        internal_total as f64 / edges as f64
    };

    AssociationAnalysis {
        component_count: components.len(),
        largest_component: component_sizes.first().copied().unwrap_or(0),
        component_sizes,
        architectural_complexity,
        modularity,
    }
}

/// Rank all nodes by a value map, descending, keeping insertion order
/// on ties, truncated to `limit`.
fn top_ranked<T: PartialOrd + Clone>(
    store: &GraphStore,
    values: &HashMap<String, T>,
    limit: usize,
) -> Vec<RankedNode<T>> {
    let mut ranked: Vec<RankedNode<T>> = store
        .nodes()
        .iter()
        .filter_map(|n| {
            values.get(&n.id).map(|v| RankedNode {
                id: n.id.clone(),
                value: v.clone(),
            })
        })
        .collect();
    // Stable sort: equal values keep first-seen order.
    ranked.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Relationship;
    use crate::scan::Language;

    fn file_kind(language: Language) -> NodeKind {
        NodeKind::File {
            extension: String::new(),
            language,
        }
    }

    fn chain_of_three() -> GraphStore {
        // a → b → c, c imports nothing.
        let mut store = GraphStore::new();
        for id in ["a", "b", "c"] {
            store.add_node(id, file_kind(Language::Rust));
        }
        store.add_edge("a", "b", Relationship::Imports);
        store.add_edge("b", "c", Relationship::Imports);
        store
    }

    #[test]
    fn chain_has_one_component_and_complexity_one() {
        let analysis = analyze_graph(&chain_of_three(), &AnalysisConfig::default());
        assert_eq!(analysis.association.component_count, 1);
        assert_eq!(analysis.association.largest_component, 3);
        assert_eq!(analysis.association.component_sizes, vec![3]);
        // E - N + 2C = 2 - 3 + 2
        assert_eq!(analysis.association.architectural_complexity, 1);
    }

    #[test]
    fn modularity_is_one_when_all_edges_internal() {
        // Two components, each with one internal edge.
        let mut store = GraphStore::new();
        for id in ["a", "b", "c", "d"] {
            store.add_node(id, file_kind(Language::Rust));
        }
        store.add_edge("a", "b", Relationship::Imports);
        store.add_edge("c", "d", Relationship::Imports);

        let analysis = analyze_graph(&store, &AnalysisConfig::default());
        assert_eq!(analysis.association.component_count, 2);
        assert!((analysis.association.modularity - 1.0).abs() < 1e-10);
    }

    #[test]
    fn dangling_edges_lower_modularity_and_cohesion() {
        let mut store = GraphStore::new();
        store.add_node("a", file_kind(Language::Rust));
        store.add_node("b", file_kind(Language::Rust));
        store.add_edge("a", "b", Relationship::Imports);
        store.add_edge("a", "somewhere_external", Relationship::Imports);

        let analysis = analyze_graph(&store, &AnalysisConfig::default());
        // 1 internal of 2 total edges.
        assert!((analysis.association.modularity - 0.5).abs() < 1e-10);
        // Single component: 1 / (1 + 1 + 1).
        assert!((analysis.molecular.cohesion - 1.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn coupling_counts_import_edges_over_directed_capacity() {
        let analysis = analyze_graph(&chain_of_three(), &AnalysisConfig::default());
        // 2 imports / (3 * 2)
        assert!((analysis.molecular.coupling_ratio - 2.0 / 6.0).abs() < 1e-10);
    }

    #[test]
    fn histogram_and_average_degree_cover_file_nodes_only() {
        let mut store = chain_of_three();
        store.add_node("pkg/d.py", file_kind(Language::Python));
        store.add_node(
            "module:0",
            NodeKind::Module {
                members: vec!["a".into(), "b".into(), "c".into()],
            },
        );
        store.add_edge("module:0", "a", Relationship::Contains);

        let analysis = analyze_graph(&store, &AnalysisConfig::default());
        assert_eq!(analysis.atomic.file_count, 4);
        assert_eq!(analysis.atomic.language_histogram["rust"], 3);
        assert_eq!(analysis.atomic.language_histogram["python"], 1);
        // Degrees: a=2 (import + contains), b=2, c=1, d.py=0.
        assert!((analysis.atomic.average_degree - 5.0 / 4.0).abs() < 1e-10);
    }

    #[test]
    fn module_count_counts_module_nodes() {
        let mut store = GraphStore::new();
        store.add_node("a", file_kind(Language::Rust));
        store.add_node("module:0", NodeKind::Module { members: vec!["a".into()] });
        let analysis = analyze_graph(&store, &AnalysisConfig::default());
        assert_eq!(analysis.molecular.module_count, 1);
    }

    #[test]
    fn top_by_degree_breaks_ties_by_insertion_order() {
        let mut store = GraphStore::new();
        for id in ["first", "second", "hub"] {
            store.add_node(id, file_kind(Language::Rust));
        }
        // first and second end up with degree 1 each, hub with 2.
        store.add_edge("hub", "first", Relationship::Imports);
        store.add_edge("hub", "second", Relationship::Imports);

        let analysis = analyze_graph(&store, &AnalysisConfig::default());
        let ids: Vec<&str> = analysis
            .atomic
            .top_by_degree
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["hub", "first", "second"]);
    }

    #[test]
    fn top_lists_respect_top_n() {
        let config = AnalysisConfig {
            top_n: 1,
            ..AnalysisConfig::default()
        };
        let analysis = analyze_graph(&chain_of_three(), &config);
        assert_eq!(analysis.atomic.top_by_degree.len(), 1);
        assert_eq!(analysis.atomic.top_by_degree[0].id, "b");
    }

    #[test]
    fn skipped_betweenness_reports_not_computed() {
        let config = AnalysisConfig {
            betweenness_node_limit: 1,
            ..AnalysisConfig::default()
        };
        let analysis = analyze_graph(&chain_of_three(), &config);
        assert!(!analysis.molecular.betweenness_computed);
        assert!(analysis.molecular.critical_connectors.is_empty());
    }

    #[test]
    fn chain_connector_is_the_middle_node() {
        let analysis = analyze_graph(&chain_of_three(), &AnalysisConfig::default());
        assert!(analysis.molecular.betweenness_computed);
        assert_eq!(analysis.molecular.critical_connectors[0].id, "b");
        assert!((analysis.molecular.critical_connectors[0].value - 2.0).abs() < 1e-10);
    }

    #[test]
    fn empty_graph_is_fully_degenerate_but_valid() {
        let analysis = analyze_graph(&GraphStore::new(), &AnalysisConfig::default());
        assert_eq!(analysis.atomic.file_count, 0);
        assert!(analysis.atomic.language_histogram.is_empty());
        assert_eq!(analysis.atomic.average_degree, 0.0);
        assert_eq!(analysis.molecular.coupling_ratio, 0.0);
        assert_eq!(analysis.molecular.cohesion, 0.0);
        assert_eq!(analysis.association.component_count, 0);
        assert_eq!(analysis.association.architectural_complexity, 0);
        assert_eq!(analysis.association.modularity, 0.0);
    }
}
