//! Root detection and join-path enumeration.

use super::JoinGraph;
use crate::diagram::Join;
use ahash::{AHashMap, AHashSet};

/// An ordered walk of joins from a root to a table. Empty means the
/// keyed table is itself a root.
pub type Path = Vec<Join>;

/// Find root tables: nodes with no incoming edge.
///
/// Returned in lexicographic order. If every node has an incoming edge
/// (a pure cycle), the lexicographically smallest node is chosen as the
/// sole root so path enumeration always has a starting point.
pub fn find_roots(graph: &JoinGraph) -> Vec<String> {
    let mut incoming: AHashSet<&str> = AHashSet::new();
    for node in graph.nodes() {
        for (dest, _) in graph.neighbors(node) {
            incoming.insert(dest.as_str());
        }
    }

    let roots: Vec<String> = graph
        .nodes()
        .filter(|n| !incoming.contains(n))
        .map(String::from)
        .collect();

    if roots.is_empty() {
        graph.nodes().next().map(String::from).into_iter().collect()
    } else {
        roots
    }
}

/// Enumerate every simple path from each root to every reachable table.
///
/// Depth-first traversal that records, at each node, the path taken to
/// reach it. Each branch descends with its own copy of the visited set,
/// so diamond-shaped graphs yield one recorded path per distinct route
/// rather than only the first one found. A node already visited within
/// the current branch is not revisited, which bounds recursion depth by
/// the node count. Paths are keyed by destination table; a table may
/// accumulate paths from multiple roots and branches.
pub fn find_paths(graph: &JoinGraph, roots: &[String]) -> AHashMap<String, Vec<Path>> {
    let mut paths: AHashMap<String, Vec<Path>> = AHashMap::new();

    for root in roots {
        dfs(graph, root, Vec::new(), AHashSet::new(), &mut paths);
    }

    paths
}

fn dfs(
    graph: &JoinGraph,
    node: &str,
    current: Path,
    mut visited: AHashSet<String>,
    paths: &mut AHashMap<String, Vec<Path>>,
) {
    visited.insert(node.to_string());
    paths.entry(node.to_string()).or_default().push(current.clone());

    for (neighbor, join) in graph.neighbors(node) {
        if !visited.contains(neighbor) {
            let mut extended = current.clone();
            extended.push(join.clone());
            dfs(graph, neighbor, extended, visited.clone(), paths);
        }
    }
}
