//! Load-order linearization.

use crate::graph::DependencyGraph;
use jstd_common::FileId;
use rustc_hash::FxHashSet;

/// Flatten the graph rooted at `entry` into a dependency-first load
/// order: every file appears after all of its (acyclic) dependencies,
/// exactly once, with `entry` last.
///
/// Post-order depth-first traversal. A file is marked visited on entry,
/// before its dependencies are walked; re-reaching it through a cycle
/// finds the mark and stops, so termination is guaranteed. For a genuine
/// cycle the member reached first is emitted at the position of its first
/// visit, which satisfies only the first-discovered edges of the cycle.
pub fn load_order(entry: &FileId, graph: &DependencyGraph) -> Vec<FileId> {
    let mut visited = FxHashSet::default();
    let mut out = Vec::with_capacity(graph.len());
    visit(entry, graph, &mut visited, &mut out);
    out
}

fn visit(
    file: &FileId,
    graph: &DependencyGraph,
    visited: &mut FxHashSet<FileId>,
    out: &mut Vec<FileId>,
) {
    if !visited.insert(file.clone()) {
        // Shared dependency or cycle; already satisfied.
        tracing::trace!(file = %file, "already ordered");
        return;
    }
    for dep in graph.dependencies_of(file) {
        visit(dep, graph, visited, out);
    }
    out.push(file.clone());
}
