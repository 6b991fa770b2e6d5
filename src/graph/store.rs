//! The graph store — owns all node and edge data for one analysis run.
//!
//! Nodes live in an arena addressed by stable integer indices assigned at
//! insertion; edges sit in one contiguous growable array. The id → index
//! map is kept only at the API boundary, so traversal works on integers.
//!
//! Lifecycle is EMPTY → BUILDING → FROZEN: the builder is the only
//! mutator, and once metrics computation begins no further mutation
//! occurs. This is a caller contract, not a runtime-enforced lock.

use std::collections::{HashMap, VecDeque};

use super::types::{Edge, GraphStats, Level, Node, NodeKind, Relationship};

/// In-memory dependency graph with id-keyed lookup.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    /// Node arena; indices are stable across overwrites.
    nodes: Vec<Node>,
    /// Edges in insertion order. Order affects only tie-breaking
    /// determinism in traversal, not correctness.
    edges: Vec<Edge>,
    /// Index: node id -> arena index.
    index: HashMap<String, usize>,
    /// Index: endpoint id -> incident edge positions. Keyed by raw id so
    /// dangling endpoints are tracked too.
    incidence: HashMap<String, Vec<usize>>,
}

impl GraphStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Mutation (builder phase only) ──────────────────────────

    /// Insert or overwrite the node entry for `id`.
    ///
    /// Overwriting keeps the original arena index, so edge incidence and
    /// insertion order are unaffected.
    pub fn add_node(&mut self, id: impl Into<String>, kind: NodeKind) {
        let id = id.into();
        let level = kind.level();
        match self.index.get(&id) {
            Some(&idx) => {
                self.nodes[idx] = Node { id, kind, level };
            }
            None => {
                let idx = self.nodes.len();
                self.nodes.push(Node {
                    id: id.clone(),
                    kind,
                    level,
                });
                self.index.insert(id, idx);
            }
        }
    }

    /// Append an edge. No existence check is performed on either
    /// endpoint — unresolved imports stay as dangling edges.
    pub fn add_edge(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        relationship: Relationship,
    ) {
        let from = from.into();
        let to = to.into();
        let level = match relationship {
            Relationship::Imports => Level::Atomic,
            Relationship::Contains => Level::Molecular,
        };
        let pos = self.edges.len();
        self.incidence.entry(from.clone()).or_default().push(pos);
        if to != from {
            self.incidence.entry(to.clone()).or_default().push(pos);
        }
        self.edges.push(Edge {
            from,
            to,
            relationship,
            level,
        });
    }

    // ─── Read access ────────────────────────────────────────────

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub(crate) fn node_id(&self, idx: usize) -> &str {
        &self.nodes[idx].id
    }

    /// All edges where `id` appears as `from` or `to`, in insertion
    /// order. Adjacency is undirected: the stored direction is semantic
    /// metadata that traversal ignores.
    pub fn neighbors(&self, id: &str) -> Vec<&Edge> {
        self.incidence
            .get(id)
            .into_iter()
            .flatten()
            .map(|&pos| &self.edges[pos])
            .collect()
    }

    /// Number of edges incident to `id`. A self-loop counts once.
    pub fn degree(&self, id: &str) -> usize {
        self.incidence.get(id).map_or(0, Vec::len)
    }

    /// Arena indices reachable from `idx` in one hop. Dangling endpoints
    /// are skipped: an id with no node entry joins no traversal.
    fn adjacent(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        let id = self.nodes[idx].id.as_str();
        self.incidence
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(move |&pos| {
                let edge = &self.edges[pos];
                let other = if edge.from == id { &edge.to } else { &edge.from };
                self.index.get(other).copied()
            })
    }

    // ─── Traversal ──────────────────────────────────────────────

    /// Partition all node ids into connected components.
    ///
    /// Iterative depth-first traversal with an explicit stack, seeded in
    /// node insertion order. Every node id appears in exactly one
    /// component; the union of all components is the full node set.
    pub fn connected_components(&self) -> Vec<Vec<String>> {
        let mut visited = vec![false; self.nodes.len()];
        let mut components = Vec::new();

        for seed in 0..self.nodes.len() {
            if visited[seed] {
                continue;
            }
            visited[seed] = true;
            let mut members = Vec::new();
            let mut stack = vec![seed];

            while let Some(idx) = stack.pop() {
                members.push(self.nodes[idx].id.clone());
                for next in self.adjacent(idx) {
                    if !visited[next] {
                        visited[next] = true;
                        stack.push(next);
                    }
                }
            }
            components.push(members);
        }
        components
    }

    /// Enumerate **all** minimum-length simple paths from `source` to
    /// `target`, as id sequences including both endpoints.
    ///
    /// Breadth-first over partial paths. Cycle avoidance uses a per-path
    /// visited set (the candidate path itself), so equal-length
    /// alternatives that pass through a shared node are all reported.
    /// Returns an empty list when `target` is unreachable or either id
    /// is unknown.
    pub fn shortest_paths(&self, source: &str, target: &str) -> Vec<Vec<String>> {
        let (Some(&src), Some(&dst)) = (self.index.get(source), self.index.get(target)) else {
            return Vec::new();
        };
        self.shortest_path_indices(src, dst)
            .into_iter()
            .map(|path| {
                path.into_iter()
                    .map(|idx| self.nodes[idx].id.clone())
                    .collect()
            })
            .collect()
    }

    /// Index-level core of [`Self::shortest_paths`], shared with the
    /// betweenness accumulation.
    pub(crate) fn shortest_path_indices(&self, source: usize, target: usize) -> Vec<Vec<usize>> {
        let mut found: Vec<Vec<usize>> = Vec::new();
        let mut min_len: Option<usize> = None;
        let mut queue: VecDeque<Vec<usize>> = VecDeque::new();
        queue.push_back(vec![source]);

        while let Some(path) = queue.pop_front() {
            // Strictly longer than an established minimum: discard.
            if min_len.is_some_and(|m| path.len() > m) {
                continue;
            }
            let last = path[path.len() - 1];
            if last == target {
                if min_len.is_none() {
                    min_len = Some(path.len());
                }
                if min_len == Some(path.len()) {
                    found.push(path);
                }
                continue;
            }
            // A path already at the minimum length cannot reach the
            // target in fewer steps than an extension would take.
            if min_len.is_some_and(|m| path.len() >= m) {
                continue;
            }
            for next in self.adjacent(last) {
                if !path.contains(&next) {
                    let mut extended = path.clone();
                    extended.push(next);
                    queue.push_back(extended);
                }
            }
        }

        found
    }

    /// Whole-graph summary. `density = E / (N * (N - 1))`, defined as 0
    /// when there are fewer than 2 nodes.
    pub fn stats(&self) -> GraphStats {
        let nodes = self.nodes.len();
        let edges = self.edges.len();
        let density = if nodes <= 1 {
            0.0
        } else {
            edges as f64 / (nodes * (nodes - 1)) as f64
        };
        GraphStats {
            nodes,
            edges,
            density,
        }
    }
}
