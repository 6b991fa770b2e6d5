//! Graph construction from a walked source tree.
//!
//! Three passes: file nodes, import edges, then module synthesis from
//! the connected components. The returned store is frozen by contract —
//! metrics run on it read-only.

use std::path::Path;
use tracing::{debug, warn};

use super::store::GraphStore;
use super::types::{NodeKind, Relationship};
use crate::scan::{DependencyExtractor, Language, SourceWalker};

/// A fully populated store plus the module partition derived from it.
pub struct BuildResult {
    pub store: GraphStore,
    /// File-id membership of each synthesized module, in module-id order.
    pub modules: Vec<Vec<String>>,
}

/// Build the dependency graph for one analysis run.
///
/// Per-file extraction failures are logged and skipped — the file keeps
/// its node, it just contributes no import edges.
pub fn build_graph<W, X>(walker: &W, extractor: &X) -> BuildResult
where
    W: SourceWalker + ?Sized,
    X: DependencyExtractor + ?Sized,
{
    let mut store = GraphStore::new();

    // Pass 1: one File node per scanned file.
    for file in walker.walk() {
        let extension = Path::new(&file.path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();
        let language = Language::from_extension(&extension);
        store.add_node(
            file.path,
            NodeKind::File {
                extension,
                language,
            },
        );
    }
    debug!("scanned {} file nodes", store.node_count());

    // Pass 2: raw import edges, dangling when unresolved.
    for file in walker.walk() {
        let language = Language::from_path(Path::new(&file.path));
        match extractor.extract(&file.content, language) {
            Ok(deps) => {
                for dep in deps {
                    store.add_edge(file.path.clone(), dep, Relationship::Imports);
                }
            }
            Err(e) => {
                warn!("import extraction failed for {}: {}", file.path, e);
            }
        }
    }

    // Pass 3: one Module node per component holding at least one file.
    let mut modules = Vec::new();
    for component in store.connected_components() {
        let members: Vec<String> = component
            .into_iter()
            .filter(|id| store.node(id).is_some_and(|n| n.kind.is_file()))
            .collect();
        if members.is_empty() {
            continue;
        }
        let module_id = format!("module:{}", modules.len());
        store.add_node(
            module_id.clone(),
            NodeKind::Module {
                members: members.clone(),
            },
        );
        for member in &members {
            store.add_edge(module_id.clone(), member.clone(), Relationship::Contains);
        }
        modules.push(members);
    }
    debug!(
        "synthesized {} modules over {} nodes",
        modules.len(),
        store.node_count()
    );

    BuildResult { store, modules }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ArchLensError, Result};
    use crate::scan::SourceFile;
    use std::collections::BTreeSet;

    struct VecWalker(Vec<SourceFile>);

    impl VecWalker {
        fn of(files: &[(&str, &str)]) -> Self {
            Self(
                files
                    .iter()
                    .map(|(path, content)| SourceFile {
                        path: path.to_string(),
                        content: content.to_string(),
                    })
                    .collect(),
            )
        }
    }

    impl SourceWalker for VecWalker {
        fn walk(&self) -> Box<dyn Iterator<Item = SourceFile> + '_> {
            Box::new(self.0.iter().cloned())
        }
    }

    /// Toy syntax: each `dep <id>` line is one dependency; a file
    /// containing `BOOM` fails extraction.
    struct ToyExtractor;

    impl DependencyExtractor for ToyExtractor {
        fn extract(&self, content: &str, _language: Language) -> Result<BTreeSet<String>> {
            if content.contains("BOOM") {
                return Err(ArchLensError::Config("exploded".into()));
            }
            Ok(content
                .lines()
                .filter_map(|l| l.strip_prefix("dep "))
                .map(String::from)
                .collect())
        }
    }

    #[test]
    fn builds_nodes_edges_and_modules() {
        let walker = VecWalker::of(&[("a.rs", "dep b.rs\ndep external"), ("b.rs", "")]);
        let result = build_graph(&walker, &ToyExtractor);
        let store = &result.store;

        // 2 files + 1 module; 2 imports (one dangling) + 2 contains.
        assert_eq!(store.node_count(), 3);
        assert_eq!(store.edge_count(), 4);
        assert!(store.node("module:0").is_some());
        assert!(store.node("external").is_none());

        assert_eq!(result.modules, vec![vec!["a.rs", "b.rs"]]);

        let contains: Vec<_> = store
            .edges()
            .iter()
            .filter(|e| e.relationship == Relationship::Contains)
            .collect();
        assert_eq!(contains.len(), 2);
        assert!(contains.iter().all(|e| e.from == "module:0"));
    }

    #[test]
    fn disjoint_files_get_separate_modules() {
        let walker = VecWalker::of(&[("a.rs", ""), ("b.rs", "")]);
        let result = build_graph(&walker, &ToyExtractor);
        assert_eq!(result.modules.len(), 2);
        assert!(result.store.node("module:0").is_some());
        assert!(result.store.node("module:1").is_some());
    }

    #[test]
    fn extraction_failure_keeps_the_node() {
        let walker = VecWalker::of(&[("bad.rs", "BOOM"), ("ok.rs", "dep bad.rs")]);
        let result = build_graph(&walker, &ToyExtractor);
        let store = &result.store;

        assert!(store.node("bad.rs").is_some());
        // Only ok.rs contributed an import edge.
        let imports: Vec<_> = store
            .edges()
            .iter()
            .filter(|e| e.relationship == Relationship::Imports)
            .collect();
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].from, "ok.rs");
    }

    #[test]
    fn empty_walk_builds_empty_graph() {
        let walker = VecWalker::of(&[]);
        let result = build_graph(&walker, &ToyExtractor);
        assert_eq!(result.store.node_count(), 0);
        assert_eq!(result.store.edge_count(), 0);
        assert!(result.modules.is_empty());
    }

    #[test]
    fn file_language_comes_from_extension() {
        let walker = VecWalker::of(&[("pkg/util.py", "")]);
        let result = build_graph(&walker, &ToyExtractor);
        match &result.store.node("pkg/util.py").unwrap().kind {
            NodeKind::File {
                extension,
                language,
            } => {
                assert_eq!(extension, "py");
                assert_eq!(*language, Language::Python);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}
