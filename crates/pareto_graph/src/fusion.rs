//! Node fusion.
//!
//! Fusion merges a monotone node with one neighbor into a single node whose
//! variables are the ordered concatenation of both, and whose state follows
//! a fixed transition table:
//!
//! | direction | neighbor state | fused state |
//! |-----------|----------------|-------------|
//! | up        | `MAXIMUM`      | `MAXIMUM`   |
//! | up        | `TRADEOFF`     | `TRADEOFF`  |
//! | up        | `DESCEND`      | `TRADEOFF`  |
//! | down      | `ASCEND`       | `TRADEOFF`  |
//! | down      | `TRADEOFF`     | `TRADEOFF`  |
//! | down      | `MINIMUM`      | `MINIMUM`   |
//!
//! Any other neighbor state means the caller broke the classification
//! invariant and is reported as a [`FusionError`].

use hashbrown::HashSet;

use crate::edge::Edge;
use crate::graph::Graph;
use crate::node::{Node, NodeState};
use crate::reduction::local_transitive_reduction;

/// Fusion was attempted with a neighbor outside the transition table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FusionError {
    /// Upward fusion with a predecessor that is not `MAXIMUM`, `TRADEOFF` or
    /// `DESCEND`.
    #[error("cannot fuse predecessor {node} upward: state {state} has no up-fusion rule")]
    UnsupportedPredecessorState {
        /// The offending predecessor.
        node: Node,
        /// Its state.
        state: NodeState,
    },
    /// Downward fusion with a successor that is not `ASCEND`, `TRADEOFF` or
    /// `MINIMUM`.
    #[error("cannot fuse successor {node} downward: state {state} has no down-fusion rule")]
    UnsupportedSuccessorState {
        /// The offending successor.
        node: Node,
        /// Its state.
        state: NodeState,
    },
}

/// State of a node produced by fusing a predecessor in `state` with an ascender.
#[must_use]
pub fn up_fuse_state(state: NodeState) -> Option<NodeState> {
    match state {
        NodeState::Maximum => Some(NodeState::Maximum),
        NodeState::Tradeoff | NodeState::Descend => Some(NodeState::Tradeoff),
        NodeState::Ascend | NodeState::Minimum => None,
    }
}

/// State of a node produced by fusing a descender with a successor in `state`.
#[must_use]
pub fn down_fuse_state(state: NodeState) -> Option<NodeState> {
    match state {
        NodeState::Ascend | NodeState::Tradeoff => Some(NodeState::Tradeoff),
        NodeState::Minimum => Some(NodeState::Minimum),
        NodeState::Maximum | NodeState::Descend => None,
    }
}

/// Fuses `ascender` with its predecessor `pred`.
///
/// The fused node lists `pred`'s variables first. Every edge touching either
/// node is re-attached to the fused node with its state preserved, the edge
/// `pred -> ascender` disappears, and redundant edges around the fused node
/// are removed.
///
/// # Errors
///
/// Returns [`FusionError::UnsupportedPredecessorState`] if `pred` is neither
/// `MAXIMUM`, `TRADEOFF` nor `DESCEND`.
pub fn fuse_up(pred: &Node, ascender: &Node, graph: &Graph) -> Result<Graph, FusionError> {
    let state =
        up_fuse_state(pred.state()).ok_or_else(|| FusionError::UnsupportedPredecessorState {
            node: pred.clone(),
            state: pred.state(),
        })?;
    let fused = Node::merged(pred, ascender, state);
    tracing::debug!(pred = %pred, ascender = %ascender, fused = %fused, "fusing up");
    Ok(contract(pred, ascender, fused, graph))
}

/// Fuses `descender` with its successor `succ`.
///
/// Mirror image of [`fuse_up`]: `descender`'s variables come first and the
/// fused state is taken from `succ`.
///
/// # Errors
///
/// Returns [`FusionError::UnsupportedSuccessorState`] if `succ` is neither
/// `ASCEND`, `TRADEOFF` nor `MINIMUM`.
pub fn fuse_down(descender: &Node, succ: &Node, graph: &Graph) -> Result<Graph, FusionError> {
    let state =
        down_fuse_state(succ.state()).ok_or_else(|| FusionError::UnsupportedSuccessorState {
            node: succ.clone(),
            state: succ.state(),
        })?;
    let fused = Node::merged(descender, succ, state);
    tracing::debug!(descender = %descender, succ = %succ, fused = %fused, "fusing down");
    Ok(contract(descender, succ, fused, graph))
}

/// Replaces the adjacent nodes `first -> second` with `fused`.
fn contract(first: &Node, second: &Node, fused: Node, graph: &Graph) -> Graph {
    let relabel = |node: &Node| {
        if node == first || node == second {
            fused.clone()
        } else {
            node.clone()
        }
    };

    let mut nodes: Vec<Node> = graph
        .nodes()
        .iter()
        .filter(|node| *node != first && *node != second)
        .cloned()
        .collect();
    nodes.push(fused.clone());

    // Both halves may have been connected to the same neighbor; only the
    // first such edge survives.
    let mut seen: HashSet<(Node, Node)> = HashSet::with_capacity(graph.edge_count());
    let mut edges = Vec::with_capacity(graph.edge_count());
    for edge in graph.edges() {
        if edge.connects(first, second) {
            continue;
        }
        let rewired = Edge::with_state(relabel(&edge.from), relabel(&edge.to), edge.state);
        if seen.insert((rewired.from.clone(), rewired.to.clone())) {
            edges.push(rewired);
        }
    }

    local_transitive_reduction(&Graph::new(nodes, edges), &fused)
}
