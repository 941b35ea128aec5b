//! Edge types for trade-off graphs.
//!
//! Edges are directed connections between two nodes. Besides its endpoints an
//! edge carries an [`EdgeState`]: free edges may still be offered as fusion
//! partners, frozen edges have already been explored within a search branch.

use core::fmt;

use crate::node::Node;

/// Exploration state of an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EdgeState {
    /// Still eligible for fusion.
    #[default]
    Free,
    /// Already explored in the current branch.
    Frozen,
}

impl EdgeState {
    /// Returns true for [`EdgeState::Free`].
    #[must_use]
    pub fn is_free(self) -> bool {
        self == EdgeState::Free
    }
}

impl fmt::Display for EdgeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeState::Free => f.write_str("FREE"),
            EdgeState::Frozen => f.write_str("FROZEN"),
        }
    }
}

/// A directed connection `from -> to`.
///
/// `Edge` deliberately implements neither `PartialEq` nor `Hash`. Two relations are
/// needed and each has its own method:
///
/// - [`same_connection`](Self::same_connection) compares endpoints only and is
///   what lookups such as freezing use.
/// - [`is_identical`](Self::is_identical) also compares the state.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Source node.
    pub from: Node,
    /// Destination node.
    pub to: Node,
    /// Exploration state.
    pub state: EdgeState,
}

impl Edge {
    /// Creates a new free edge.
    #[must_use]
    pub fn new(from: Node, to: Node) -> Self {
        Self::with_state(from, to, EdgeState::Free)
    }

    /// Creates a new edge with an explicit state.
    #[must_use]
    pub fn with_state(from: Node, to: Node, state: EdgeState) -> Self {
        Self { from, to, state }
    }

    /// Returns true if the edge is free.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.state.is_free()
    }

    /// Returns true if this edge runs from `from` to `to`, whatever its state.
    #[must_use]
    pub fn connects(&self, from: &Node, to: &Node) -> bool {
        self.from == *from && self.to == *to
    }

    /// Endpoint-only comparison.
    #[must_use]
    pub fn same_connection(&self, other: &Edge) -> bool {
        self.connects(&other.from, &other.to)
    }

    /// Full comparison of endpoints and state.
    #[must_use]
    pub fn is_identical(&self, other: &Edge) -> bool {
        self.same_connection(other) && self.state == other.state
    }

    /// Returns true if either endpoint is `node`.
    #[must_use]
    pub fn touches(&self, node: &Node) -> bool {
        self.from == *node || self.to == *node
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.from, self.to, self.state)
    }
}
