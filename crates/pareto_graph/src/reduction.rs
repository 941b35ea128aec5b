//! Transitive reduction.
//!
//! An edge is redundant when a longer path connects the same endpoints. The
//! global reduction drops every such edge; the local variant only looks at
//! the edges incident to one node and is what fusion uses afterwards.

use crate::graph::Graph;
use crate::node::Node;
use crate::paths::{SuccessorIndex, count_paths_indexed, only_direct_path};

/// Returns the graph keeping exactly the edges whose endpoints are joined by a
/// single path.
#[must_use]
pub fn transitive_reduction(graph: &Graph) -> Graph {
    let index = SuccessorIndex::new(graph);
    let edges = graph
        .edges()
        .iter()
        .filter(|edge| {
            let paths = count_paths_indexed(&edge.from, &edge.to, &index);
            tracing::trace!(edge = %edge, paths, "transitive reduction");
            paths == 1
        })
        .cloned()
        .collect();
    graph.with_edges(edges)
}

/// Transitive reduction restricted to the edges incident to `node`.
///
/// Each edge into or out of `node` is kept only if it is the sole path between
/// its endpoints. Other edges pass through unchanged. Every decision is taken
/// against the input graph.
#[must_use]
pub fn local_transitive_reduction(graph: &Graph, node: &Node) -> Graph {
    let predecessors = graph.predecessors(node);
    let successors = graph.successors(node);

    let edges = graph
        .edges()
        .iter()
        .filter(|edge| {
            let incident = (edge.from == *node && successors.contains(&&edge.to))
                || (edge.to == *node && predecessors.contains(&&edge.from));
            if !incident {
                return true;
            }
            let keep = only_direct_path(&edge.from, &edge.to, graph);
            if !keep {
                tracing::trace!(edge = %edge, "dropping redundant edge");
            }
            keep
        })
        .cloned()
        .collect();
    graph.with_edges(edges)
}
