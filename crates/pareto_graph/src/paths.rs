//! Path counting and reachability.
//!
//! Both routines walk the graph with an explicit work-list instead of native
//! recursion, so deep graphs cannot overflow the call stack.

use core::fmt;

use hashbrown::{HashMap, HashSet};

use crate::graph::Graph;
use crate::node::Node;

/// A step of the post-order traversal used by [`count_paths`].
///
/// `Enter` expands a node by scheduling its successors; the matching `Leave`
/// runs once all of them have been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction<'a> {
    /// First visit of a node.
    Enter(&'a Node),
    /// All successors of the node have been counted.
    Leave(&'a Node),
}

impl fmt::Display for Instruction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Enter(node) => write!(f, "[ENTER:{node}]"),
            Instruction::Leave(node) => write!(f, "[LEAVE:{node}]"),
        }
    }
}

/// Successor lists keyed by node value.
///
/// Built once per traversal so that successor lookups do not rescan the edge
/// list. Follows every edge, free or frozen.
#[derive(Debug)]
pub(crate) struct SuccessorIndex<'a> {
    successors: HashMap<&'a Node, Vec<&'a Node>>,
}

impl<'a> SuccessorIndex<'a> {
    pub(crate) fn new(graph: &'a Graph) -> Self {
        let mut successors: HashMap<&'a Node, Vec<&'a Node>> = HashMap::new();
        for edge in graph.edges() {
            successors.entry(&edge.from).or_default().push(&edge.to);
        }
        Self { successors }
    }

    /// Like [`new`](Self::new), but leaves out every edge `from -> to`.
    pub(crate) fn without(graph: &'a Graph, from: &Node, to: &Node) -> Self {
        let mut successors: HashMap<&'a Node, Vec<&'a Node>> = HashMap::new();
        for edge in graph.edges().iter().filter(|edge| !edge.connects(from, to)) {
            successors.entry(&edge.from).or_default().push(&edge.to);
        }
        Self { successors }
    }

    pub(crate) fn of(&self, node: &Node) -> &[&'a Node] {
        self.successors
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Counts the distinct directed paths from `source` to `target`.
///
/// Every edge is followed regardless of its state. The count for a node is 1
/// if it is `target`, otherwise the sum of its successors' counts; each node
/// reachable from `source` is expanded once and its count memoized.
///
/// The graph reachable from `source` must be acyclic. Counts saturate at
/// `u64::MAX`.
#[must_use]
pub fn count_paths(source: &Node, target: &Node, graph: &Graph) -> u64 {
    let index = SuccessorIndex::new(graph);
    count_paths_indexed(source, target, &index)
}

pub(crate) fn count_paths_indexed<'a>(
    source: &'a Node,
    target: &'a Node,
    index: &SuccessorIndex<'a>,
) -> u64 {
    let mut counts: HashMap<&'a Node, u64> = HashMap::new();
    let mut entered: HashSet<&'a Node> = HashSet::new();
    let mut stack = vec![Instruction::Enter(source)];

    while let Some(instruction) = stack.pop() {
        match instruction {
            Instruction::Enter(node) => {
                if !entered.insert(node) {
                    continue;
                }
                if node == target {
                    counts.insert(node, 1);
                    continue;
                }
                stack.push(Instruction::Leave(node));
                stack.extend(index.of(node).iter().map(|succ| Instruction::Enter(*succ)));
            }
            Instruction::Leave(node) => {
                let total = index
                    .of(node)
                    .iter()
                    .map(|succ| counts.get(succ).copied().unwrap_or(0))
                    .fold(0u64, u64::saturating_add);
                counts.insert(node, total);
            }
        }
    }

    counts.get(source).copied().unwrap_or(0)
}

/// Returns true if `target` can be reached from `source` by following at
/// least one edge.
#[must_use]
pub fn reaches(source: &Node, target: &Node, graph: &Graph) -> bool {
    reaches_indexed(source, target, &SuccessorIndex::new(graph))
}

pub(crate) fn reaches_indexed<'a>(
    source: &'a Node,
    target: &Node,
    index: &SuccessorIndex<'a>,
) -> bool {
    let mut todo = vec![source];
    let mut done: HashSet<&'a Node> = HashSet::new();

    while let Some(node) = todo.pop() {
        if !done.insert(node) {
            continue;
        }
        for &succ in index.of(node) {
            if succ == target {
                return true;
            }
            if !done.contains(succ) {
                todo.push(succ);
            }
        }
    }
    false
}

/// Returns true if the edge `from -> to` is the only path between its
/// endpoints, i.e. `to` is unreachable from `from` once that edge is removed.
#[must_use]
pub fn only_direct_path(from: &Node, to: &Node, graph: &Graph) -> bool {
    let cut = SuccessorIndex::without(graph, from, to);
    !reaches_indexed(from, to, &cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;
    use crate::node::NodeState;

    fn nodes(n: u32) -> Vec<Node> {
        (0..n).map(|i| Node::single(i, NodeState::Tradeoff)).collect()
    }

    fn diamond() -> (Vec<Node>, Graph) {
        let n = nodes(4);
        let graph = Graph::new(
            n.clone(),
            vec![
                Edge::new(n[0].clone(), n[1].clone()),
                Edge::new(n[0].clone(), n[2].clone()),
                Edge::new(n[1].clone(), n[3].clone()),
                Edge::new(n[2].clone(), n[3].clone()),
            ],
        );
        (n, graph)
    }

    #[test]
    fn diamond_has_two_paths() {
        let (n, graph) = diamond();
        assert_eq!(count_paths(&n[0], &n[3], &graph), 2);
        assert_eq!(count_paths(&n[0], &n[1], &graph), 1);
        assert_eq!(count_paths(&n[1], &n[2], &graph), 0);
    }

    #[test]
    fn node_has_one_path_to_itself() {
        let (n, graph) = diamond();
        assert_eq!(count_paths(&n[2], &n[2], &graph), 1);
    }

    #[test]
    fn frozen_edges_are_counted() {
        let (n, graph) = diamond();
        let frozen = graph.freeze(&n[0], &n[1]);
        assert_eq!(count_paths(&n[0], &n[3], &frozen), 2);
    }

    #[test]
    fn shared_subpaths_multiply() {
        // Two diamonds in series: 2 * 2 paths.
        let n = nodes(7);
        let e = |a: usize, b: usize| Edge::new(n[a].clone(), n[b].clone());
        let graph = Graph::new(
            n.clone(),
            vec![e(0, 1), e(0, 2), e(1, 3), e(2, 3), e(3, 4), e(3, 5), e(4, 6), e(5, 6)],
        );
        assert_eq!(count_paths(&n[0], &n[6], &graph), 4);
    }

    #[test]
    fn reaches_follows_direction() {
        let (n, graph) = diamond();
        assert!(reaches(&n[0], &n[3], &graph));
        assert!(!reaches(&n[3], &n[0], &graph));
        assert!(!reaches(&n[1], &n[2], &graph));
    }

    #[test]
    fn only_direct_path_detects_shortcut() {
        let n = nodes(3);
        let graph = Graph::new(
            n.clone(),
            vec![
                Edge::new(n[0].clone(), n[1].clone()),
                Edge::new(n[1].clone(), n[2].clone()),
                Edge::new(n[0].clone(), n[2].clone()),
            ],
        );
        assert!(only_direct_path(&n[0], &n[1], &graph));
        assert!(only_direct_path(&n[1], &n[2], &graph));
        assert!(!only_direct_path(&n[0], &n[2], &graph));
    }

    #[test]
    fn instruction_display() {
        let node = Node::single(1, NodeState::Ascend);
        assert_eq!(Instruction::Enter(&node).to_string(), "[ENTER:([1],ASCEND)]");
        assert_eq!(Instruction::Leave(&node).to_string(), "[LEAVE:([1],ASCEND)]");
    }
}
