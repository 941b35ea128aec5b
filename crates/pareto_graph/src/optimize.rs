//! Enumeration of terminal graphs.
//!
//! The search repeatedly picks a fusion candidate (see
//! [`select_candidate`](crate::classify::select_candidate)), fuses it with
//! each of its free neighbors in turn, and recurses into every resulting
//! graph. A graph without candidates is terminal and becomes part of the
//! result.
//!
//! Within one step, after a neighbor has been fused its edge to the candidate
//! is frozen in the graph used for the next neighbor, so the same connection
//! is not offered twice by that step. Each fusion removes one node, so the
//! recursion depth never exceeds the input's node count. The number of
//! branches, however, can grow exponentially on densely connected inputs;
//! [`SearchLimits`] lets callers cap the work.
//!
//! # Example
//!
//! ```
//! use pareto_graph::edge::Edge;
//! use pareto_graph::graph::Graph;
//! use pareto_graph::node::{Node, NodeState};
//! use pareto_graph::optimize::pareto_optimize;
//!
//! let mx = Node::single(0, NodeState::Maximum);
//! let a = Node::single(1, NodeState::Ascend);
//! let mn = Node::single(2, NodeState::Minimum);
//! let graph = Graph::new(
//!     vec![mx.clone(), a.clone(), mn.clone()],
//!     vec![Edge::new(mx, a.clone()), Edge::new(a, mn)],
//! );
//!
//! let terminals = pareto_optimize(&graph).unwrap();
//! assert_eq!(terminals.len(), 1);
//! assert_eq!(terminals[0].node_count(), 2);
//! ```

use crate::classify::{Candidate, Direction, order_nodes, select_candidate};
use crate::fusion::{FusionError, fuse_down, fuse_up};
use crate::graph::Graph;

/// Errors returned by the search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// A fusion step violated the transition table.
    #[error(transparent)]
    Fusion(#[from] FusionError),
    /// More terminal graphs were found than allowed.
    #[error("search produced more than {limit} terminal graphs")]
    TerminalLimit {
        /// The configured maximum.
        limit: usize,
    },
    /// More fusions were needed than allowed.
    #[error("search needed more than {limit} fusions")]
    FusionLimit {
        /// The configured maximum.
        limit: usize,
    },
}

/// Optional budgets on the search. The default is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of terminal graphs to collect.
    pub max_terminals: Option<usize>,
    /// Maximum number of fusions to perform over the whole search.
    pub max_fusions: Option<usize>,
}

impl SearchLimits {
    /// No limits at all.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Caps the number of terminal graphs.
    #[must_use]
    pub fn with_max_terminals(mut self, limit: usize) -> Self {
        self.max_terminals = Some(limit);
        self
    }

    /// Caps the number of fusions.
    #[must_use]
    pub fn with_max_fusions(mut self, limit: usize) -> Self {
        self.max_fusions = Some(limit);
        self
    }
}

/// Enumerates the terminal graphs of a trade-off graph.
///
/// Equivalent to `ParetoSearch::new().run(graph)`.
///
/// # Errors
///
/// Returns [`SearchError::Fusion`] only if a fusion precondition is violated,
/// which cannot happen for graphs whose `MAXIMUM` nodes have no predecessors
/// and whose `MINIMUM` nodes have no successors.
pub fn pareto_optimize(graph: &Graph) -> Result<Vec<Graph>, SearchError> {
    ParetoSearch::new().run(graph)
}

/// Configurable entry point of the enumeration.
#[derive(Debug, Clone, Default)]
pub struct ParetoSearch {
    limits: SearchLimits,
}

impl ParetoSearch {
    /// Creates an unbounded search.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a search with the given limits.
    #[must_use]
    pub fn with_limits(limits: SearchLimits) -> Self {
        Self { limits }
    }

    /// Returns the configured limits.
    #[must_use]
    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Runs the search, returning the terminal graphs in discovery order.
    ///
    /// Duplicate (even identical) terminal graphs reached through different
    /// branches are all returned.
    ///
    /// # Errors
    ///
    /// See [`SearchError`].
    pub fn run(&self, graph: &Graph) -> Result<Vec<Graph>, SearchError> {
        let mut state = SearchState {
            limits: self.limits,
            terminals: Vec::new(),
            fusions: 0,
        };
        state.explore(graph, 0)?;
        tracing::debug!(
            terminals = state.terminals.len(),
            fusions = state.fusions,
            "search finished"
        );
        Ok(state.terminals)
    }
}

/// Mutable bookkeeping for one run.
struct SearchState {
    limits: SearchLimits,
    terminals: Vec<Graph>,
    fusions: usize,
}

impl SearchState {
    fn explore(&mut self, graph: &Graph, depth: usize) -> Result<(), SearchError> {
        let span = tracing::debug_span!("pareto_optimize", depth);
        let _enter = span.enter();

        let Some(candidate) = select_candidate(graph) else {
            tracing::debug!(
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "terminal graph"
            );
            return self.record_terminal(graph);
        };

        let children = self.branch(graph, candidate)?;
        for child in &children {
            self.explore(child, depth + 1)?;
        }
        Ok(())
    }

    /// Fuses the candidate with each of its free neighbors.
    fn branch(
        &mut self,
        graph: &Graph,
        candidate: Candidate<'_>,
    ) -> Result<Vec<Graph>, SearchError> {
        let node = candidate.node;
        let direction = candidate.direction();
        let neighbors = match direction {
            Direction::Up => order_nodes(graph.free_predecessors(node)),
            Direction::Down => order_nodes(graph.free_successors(node)),
        };
        tracing::debug!(
            candidate = %node,
            rule = ?candidate.rule,
            %direction,
            neighbors = neighbors.len(),
            "selected candidate"
        );
        if neighbors.is_empty() {
            tracing::debug!(candidate = %node, "no free neighbor, branch abandoned");
        }

        let mut current = graph.clone();
        let mut children = Vec::with_capacity(neighbors.len());
        for neighbor in neighbors {
            self.count_fusion()?;
            let (child, frozen) = match direction {
                Direction::Up => (
                    fuse_up(neighbor, node, &current)?,
                    current.freeze(neighbor, node),
                ),
                Direction::Down => (
                    fuse_down(node, neighbor, &current)?,
                    current.freeze(node, neighbor),
                ),
            };
            children.push(child);
            current = frozen;
        }
        Ok(children)
    }

    fn count_fusion(&mut self) -> Result<(), SearchError> {
        if let Some(limit) = self.limits.max_fusions
            && self.fusions >= limit
        {
            return Err(SearchError::FusionLimit { limit });
        }
        self.fusions += 1;
        Ok(())
    }

    fn record_terminal(&mut self, graph: &Graph) -> Result<(), SearchError> {
        if let Some(limit) = self.limits.max_terminals
            && self.terminals.len() >= limit
        {
            return Err(SearchError::TerminalLimit { limit });
        }
        self.terminals.push(graph.clone());
        Ok(())
    }
}
