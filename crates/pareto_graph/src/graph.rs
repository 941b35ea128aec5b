//! Graph value type and query primitives.
//!
//! A [`Graph`] is an ordered node list plus an ordered edge list. It is treated
//! as an immutable value: every transformation (freezing, fusion, reduction)
//! returns a new graph and leaves its input untouched. The orders matter, since
//! they fix which candidate is selected first and the order in which sibling
//! branches are explored.
//!
//! Every graph handed to the algorithm must be a DAG. That is a precondition,
//! not something the algorithm checks; callers who build graphs from untrusted
//! data can use [`Graph::validate`] first.

use core::fmt;
use core::fmt::Write as _;

use hashbrown::{HashMap, HashSet};

use crate::edge::{Edge, EdgeState};
use crate::node::Node;

/// A trade-off graph.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Creates a graph from its nodes and edges.
    #[must_use]
    pub fn new(nodes: impl Into<Vec<Node>>, edges: impl Into<Vec<Edge>>) -> Self {
        Self {
            nodes: nodes.into(),
            edges: edges.into(),
        }
    }

    /// Returns a graph with the same nodes and the given edges.
    #[must_use]
    pub(crate) fn with_edges(&self, edges: Vec<Edge>) -> Self {
        Self {
            nodes: self.nodes.clone(),
            edges,
        }
    }

    /// Returns all nodes in the graph.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns all edges in the graph.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `node` belongs to the graph.
    #[must_use]
    pub fn contains_node(&self, node: &Node) -> bool {
        self.nodes.contains(node)
    }

    /// Finds the edge running from `from` to `to`, regardless of its state.
    #[must_use]
    pub fn find_edge(&self, from: &Node, to: &Node) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.connects(from, to))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query primitives
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the far endpoint of every edge leaving `node`.
    #[must_use]
    pub fn successors(&self, node: &Node) -> Vec<&Node> {
        self.edges
            .iter()
            .filter(|edge| edge.from == *node)
            .map(|edge| &edge.to)
            .collect()
    }

    /// Returns the near endpoint of every edge entering `node`.
    #[must_use]
    pub fn predecessors(&self, node: &Node) -> Vec<&Node> {
        self.edges
            .iter()
            .filter(|edge| edge.to == *node)
            .map(|edge| &edge.from)
            .collect()
    }

    /// Like [`successors`](Self::successors), restricted to free edges.
    #[must_use]
    pub fn free_successors(&self, node: &Node) -> Vec<&Node> {
        self.edges
            .iter()
            .filter(|edge| edge.is_free() && edge.from == *node)
            .map(|edge| &edge.to)
            .collect()
    }

    /// Like [`predecessors`](Self::predecessors), restricted to free edges.
    #[must_use]
    pub fn free_predecessors(&self, node: &Node) -> Vec<&Node> {
        self.edges
            .iter()
            .filter(|edge| edge.is_free() && edge.to == *node)
            .map(|edge| &edge.from)
            .collect()
    }

    /// Returns a copy of the graph where the edge `from -> to` is frozen.
    ///
    /// The edge is looked up by its endpoints only. Freezing a connection
    /// that does not exist returns an unchanged copy.
    #[must_use]
    pub fn freeze(&self, from: &Node, to: &Node) -> Self {
        let edges = self
            .edges
            .iter()
            .map(|edge| {
                if edge.connects(from, to) {
                    Edge::with_state(edge.from.clone(), edge.to.clone(), EdgeState::Frozen)
                } else {
                    edge.clone()
                }
            })
            .collect();
        self.with_edges(edges)
    }

    /// Renders the graph as a "nodes / edges" block for diagnostics.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "nodes");
        let _ = writeln!(out, "{self}");
        let _ = writeln!(out, "edges");
        for edge in &self.edges {
            let _ = writeln!(out, "{edge}");
        }
        out
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates the graph structure.
    ///
    /// The contraction algorithm never calls this itself. It is offered to
    /// callers that want to check the DAG precondition up front.
    ///
    /// # Checks
    ///
    /// - Every node appears once.
    /// - Every edge endpoint is a node of the graph.
    /// - No two edges share the same endpoints.
    /// - The edges form no directed cycle.
    ///
    /// # Errors
    ///
    /// Returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let mut seen = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node) {
                errors.push(ValidationError::DuplicateNode(node.clone()));
            }
        }

        let mut connections = HashSet::with_capacity(self.edges.len());
        for edge in &self.edges {
            if !seen.contains(&edge.from) {
                errors.push(ValidationError::UnknownSource(edge.clone()));
            }
            if !seen.contains(&edge.to) {
                errors.push(ValidationError::UnknownTarget(edge.clone()));
            }
            if !connections.insert((&edge.from, &edge.to)) {
                errors.push(ValidationError::DuplicateConnection(edge.clone()));
            }
        }

        if let Some(node) = self.find_cycle() {
            errors.push(ValidationError::Cycle(node.clone()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Returns a node lying on a directed cycle, if any.
    ///
    /// Kahn's algorithm: whatever cannot be peeled off in topological order
    /// lies on, or downstream of, a cycle.
    fn find_cycle(&self) -> Option<&Node> {
        let mut in_degree: HashMap<&Node, usize> = HashMap::new();
        let mut outgoing: HashMap<&Node, Vec<&Node>> = HashMap::new();
        for node in &self.nodes {
            in_degree.entry(node).or_insert(0);
        }
        for edge in &self.edges {
            *in_degree.entry(&edge.to).or_insert(0) += 1;
            in_degree.entry(&edge.from).or_insert(0);
            outgoing.entry(&edge.from).or_default().push(&edge.to);
        }

        let mut ready: Vec<&Node> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(node, _)| *node)
            .collect();
        while let Some(node) = ready.pop() {
            for &next in outgoing.get(node).into_iter().flatten() {
                if let Some(degree) = in_degree.get_mut(next) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push(next);
                    }
                }
            }
            in_degree.remove(node);
        }

        // Prefer reporting a node in graph order for stable diagnostics.
        self.nodes
            .iter()
            .find(|node| in_degree.contains_key(node))
            .or_else(|| in_degree.keys().next().copied())
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

/// Structural problems reported by [`Graph::validate`].
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// A node appears more than once in the node list.
    DuplicateNode(Node),
    /// An edge's source is not a node of the graph.
    UnknownSource(Edge),
    /// An edge's target is not a node of the graph.
    UnknownTarget(Edge),
    /// Two edges share the same endpoints.
    DuplicateConnection(Edge),
    /// The edges form a directed cycle through (or feeding into) this node.
    Cycle(Node),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateNode(node) => write!(f, "node {node} appears twice"),
            ValidationError::UnknownSource(edge) => {
                write!(f, "edge {edge} has a source outside the node set")
            }
            ValidationError::UnknownTarget(edge) => {
                write!(f, "edge {edge} has a target outside the node set")
            }
            ValidationError::DuplicateConnection(edge) => {
                write!(f, "edge {edge} duplicates an existing connection")
            }
            ValidationError::Cycle(node) => {
                write!(f, "graph is not acyclic: cycle reachable at node {node}")
            }
        }
    }
}

impl core::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeState;

    fn chain() -> (Node, Node, Node, Graph) {
        let mx = Node::single(0, NodeState::Maximum);
        let a = Node::single(1, NodeState::Ascend);
        let mn = Node::single(2, NodeState::Minimum);
        let graph = Graph::new(
            vec![mx.clone(), a.clone(), mn.clone()],
            vec![Edge::new(mx.clone(), a.clone()), Edge::new(a.clone(), mn.clone())],
        );
        (mx, a, mn, graph)
    }

    #[test]
    fn successors_and_predecessors() {
        let (mx, a, mn, graph) = chain();
        assert_eq!(graph.successors(&mx), vec![&a]);
        assert_eq!(graph.predecessors(&mn), vec![&a]);
        assert!(graph.predecessors(&mx).is_empty());
        assert!(graph.successors(&mn).is_empty());
    }

    #[test]
    fn free_queries_skip_frozen_edges() {
        let (mx, a, mn, graph) = chain();
        let frozen = graph.freeze(&mx, &a);

        assert!(frozen.free_predecessors(&a).is_empty());
        assert_eq!(frozen.predecessors(&a), vec![&mx]);
        assert_eq!(frozen.free_successors(&a), vec![&mn]);
    }

    #[test]
    fn freeze_leaves_original_untouched() {
        let (mx, a, _, graph) = chain();
        let frozen = graph.freeze(&mx, &a);

        assert!(graph.find_edge(&mx, &a).is_some_and(Edge::is_free));
        assert!(frozen.find_edge(&mx, &a).is_some_and(|e| !e.is_free()));
        assert_eq!(frozen.edge_count(), graph.edge_count());
    }

    #[test]
    fn freeze_missing_edge_is_noop() {
        let (mx, _, mn, graph) = chain();
        let frozen = graph.freeze(&mx, &mn);
        for (before, after) in graph.edges().iter().zip(frozen.edges()) {
            assert!(before.is_identical(after));
        }
    }

    #[test]
    fn validate_accepts_dag() {
        let (_, _, _, graph) = chain();
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn validate_reports_cycle() {
        let (mx, a, mn, graph) = chain();
        let mut edges = graph.edges().to_vec();
        edges.push(Edge::new(mn.clone(), a.clone()));
        let cyclic = Graph::new(vec![mx, a, mn], edges);

        let errors = cyclic.validate().unwrap_err();
        assert!(
            errors
                .iter()
                .any(|err| matches!(err, ValidationError::Cycle(_)))
        );
    }

    #[test]
    fn validate_reports_unknown_endpoints_and_duplicates() {
        let (mx, a, mn, _) = chain();
        let stray = Node::single(9, NodeState::Tradeoff);
        let graph = Graph::new(
            vec![mx.clone(), a.clone(), mn.clone()],
            vec![
                Edge::new(mx.clone(), a.clone()),
                Edge::with_state(mx.clone(), a.clone(), EdgeState::Frozen),
                Edge::new(a.clone(), stray),
            ],
        );

        let errors = graph.validate().unwrap_err();
        assert!(
            errors
                .iter()
                .any(|err| matches!(err, ValidationError::DuplicateConnection(_)))
        );
        assert!(
            errors
                .iter()
                .any(|err| matches!(err, ValidationError::UnknownTarget(_)))
        );
        assert!(
            !errors
                .iter()
                .any(|err| matches!(err, ValidationError::UnknownSource(_)))
        );
    }

    #[test]
    fn dump_lists_nodes_then_edges() {
        let (_, _, _, graph) = chain();
        let dump = graph.dump();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines[0], "nodes");
        assert_eq!(lines[1], "([0],MAXIMUM)([1],ASCEND)([2],MINIMUM)");
        assert_eq!(lines[2], "edges");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn validation_error_display() {
        let node = Node::single(4, NodeState::Tradeoff);
        let err = ValidationError::DuplicateNode(node);
        assert_eq!(err.to_string(), "node ([4],TRADEOFF) appears twice");
    }
}
