//! Dependency-graph construction.

use crate::ResolverConfig;
use crate::resolve::{FileClassifier, ReferenceResolver};
use crate::scope::ProjectScope;
use crate::special::SpecialCaseRegistry;
use indexmap::IndexSet;
use jstd_common::FileId;
use rustc_hash::FxHashMap;

/// Mapping from file to the ordered, deduplicated list of files it
/// directly depends on, as discovered for one resolution run.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    deps: FxHashMap<FileId, Vec<FileId>>,
}

impl DependencyGraph {
    /// Direct dependencies of `file` in discovery order. A file that was
    /// never expanded (e.g. reached only as a dependency target of a
    /// library list) has none.
    pub fn dependencies_of(&self, file: &FileId) -> &[FileId] {
        self.deps.get(file).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, file: &FileId) -> bool {
        self.deps.contains_key(file)
    }

    pub fn len(&self) -> usize {
        self.deps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }
}

/// Run-scoped builder. The memo table in `graph` doubles as the recursion
/// guard: a file's dependency list is computed at most once per run, and
/// a mutual reference that re-reaches a file mid-expansion finds the memo
/// entry and stops.
pub(crate) struct GraphBuilder<'a> {
    references: &'a dyn ReferenceResolver,
    classifier: &'a dyn FileClassifier,
    scope: &'a dyn ProjectScope,
    registry: &'a SpecialCaseRegistry,
    config: &'a ResolverConfig,
    graph: DependencyGraph,
    // Rule results are project-wide, so one resolution per rule per run.
    special_memo: FxHashMap<&'static str, Vec<FileId>>,
}

impl<'a> GraphBuilder<'a> {
    pub(crate) fn new(
        references: &'a dyn ReferenceResolver,
        classifier: &'a dyn FileClassifier,
        scope: &'a dyn ProjectScope,
        registry: &'a SpecialCaseRegistry,
        config: &'a ResolverConfig,
    ) -> Self {
        Self {
            references,
            classifier,
            scope,
            registry,
            config,
            graph: DependencyGraph::default(),
            special_memo: FxHashMap::default(),
        }
    }

    pub(crate) fn finish(self) -> DependencyGraph {
        self.graph
    }

    /// Compute and memoize the dependency list of `file`, then expand
    /// every newly discovered dependency so the graph is complete before
    /// ordering runs.
    pub(crate) fn build(&mut self, file: &FileId) {
        if self.graph.contains(file) {
            return;
        }

        let deps = if let Some(rule) = self.registry.find(file) {
            let deps = match self.special_memo.get(rule.name()) {
                Some(cached) => cached.clone(),
                None => {
                    let resolved = rule.resolve(file, self.scope);
                    self.special_memo.insert(rule.name(), resolved.clone());
                    resolved
                }
            };
            tracing::trace!(file = %file, rule = rule.name(), count = deps.len(), "special-case dependencies");
            deps
        } else if self.is_library(file) {
            // Library files are assumed self-contained: terminal nodes.
            tracing::trace!(file = %file, "library file, not expanded");
            Vec::new()
        } else {
            self.resolve_generic(file)
        };

        self.graph.deps.insert(file.clone(), deps.clone());
        for dep in &deps {
            self.build(dep);
        }
    }

    fn is_library(&self, file: &FileId) -> bool {
        if self.classifier.is_library_file(file) {
            return true;
        }
        file.file_name()
            .is_some_and(|name| self.config.library_file_names.contains(name))
    }

    /// Generic reference resolution: every candidate target of every
    /// outgoing reference, keeping all candidates of an ambiguous
    /// reference (over-approximation rather than guessing one).
    fn resolve_generic(&self, file: &FileId) -> Vec<FileId> {
        let edges = match self.references.resolve_references(file) {
            Ok(edges) => edges,
            Err(err) => {
                // Local failure: this file contributes no further
                // dependencies, the run continues.
                tracing::warn!(file = %file, error = %err, "reference resolution failed, treating as leaf");
                Vec::new()
            }
        };

        let mut deps: IndexSet<FileId> = IndexSet::new();
        for edge in edges {
            let target = edge.to;
            if target == *file {
                continue;
            }
            if self.classifier.is_predefined(&target) {
                continue;
            }
            if self.is_library(&target) {
                continue;
            }
            if deps.insert(target.clone()) {
                tracing::trace!(from = %file, to = %target, "dependency edge");
            }
        }
        deps.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::ReferenceEdge;

    struct EdgeIndex {
        edges: Vec<ReferenceEdge>,
    }

    impl ReferenceResolver for EdgeIndex {
        fn resolve_references(
            &self,
            file: &FileId,
        ) -> Result<Vec<ReferenceEdge>, crate::resolve::ReferenceError> {
            Ok(self
                .edges
                .iter()
                .filter(|edge| edge.from == *file)
                .cloned()
                .collect())
        }
    }

    struct NoClassification;

    impl FileClassifier for NoClassification {
        fn is_library_file(&self, _file: &FileId) -> bool {
            false
        }
        fn is_predefined(&self, _file: &FileId) -> bool {
            false
        }
    }

    struct EmptyScope;

    impl ProjectScope for EmptyScope {
        fn files_named(&self, _name: &str) -> Vec<FileId> {
            Vec::new()
        }
        fn contains(&self, _file: &FileId) -> bool {
            true
        }
    }

    fn build(edges: Vec<(&str, &str)>, entry: &str) -> DependencyGraph {
        let index = EdgeIndex {
            edges: edges
                .into_iter()
                .map(|(from, to)| ReferenceEdge::new(FileId::new(from), FileId::new(to)))
                .collect(),
        };
        let registry = SpecialCaseRegistry::empty();
        let config = ResolverConfig::default();
        let mut builder =
            GraphBuilder::new(&index, &NoClassification, &EmptyScope, &registry, &config);
        builder.build(&FileId::new(entry));
        builder.finish()
    }

    #[test]
    fn self_references_are_dropped() {
        let graph = build(vec![("/p/a.js", "/p/a.js"), ("/p/a.js", "/p/b.js")], "/p/a.js");
        assert_eq!(graph.dependencies_of(&FileId::new("/p/a.js")), &[FileId::new("/p/b.js")]);
    }

    #[test]
    fn duplicate_targets_collapse_in_insertion_order() {
        let graph = build(
            vec![
                ("/p/a.js", "/p/b.js"),
                ("/p/a.js", "/p/c.js"),
                ("/p/a.js", "/p/b.js"),
            ],
            "/p/a.js",
        );
        assert_eq!(
            graph.dependencies_of(&FileId::new("/p/a.js")),
            &[FileId::new("/p/b.js"), FileId::new("/p/c.js")]
        );
    }

    #[test]
    fn mutual_references_terminate() {
        let graph = build(vec![("/p/a.js", "/p/b.js"), ("/p/b.js", "/p/a.js")], "/p/a.js");
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.dependencies_of(&FileId::new("/p/b.js")), &[FileId::new("/p/a.js")]);
    }

    #[test]
    fn transitive_dependencies_are_pre_expanded() {
        let graph = build(vec![("/p/a.js", "/p/b.js"), ("/p/b.js", "/p/c.js")], "/p/a.js");
        assert!(graph.contains(&FileId::new("/p/c.js")));
        assert!(graph.dependencies_of(&FileId::new("/p/c.js")).is_empty());
    }
}
