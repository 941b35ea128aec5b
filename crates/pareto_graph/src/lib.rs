//! Pareto graph contraction.
//!
//! `pareto_graph` analyses *trade-off graphs*: directed acyclic graphs whose
//! nodes group system variables and carry one of five qualitative states
//! (maximum, ascending, trade-off, descending, minimum). Adjacent nodes along
//! monotone chains are fused until no further fusion applies; every way of
//! doing so yields one *terminal graph*, a coarse-grained view corresponding
//! to one branch of a Pareto-front decomposition.
//!
//! # Core Concepts
//!
//! - [`Node`] / [`Edge`] / [`Graph`] - value types; graphs are never mutated,
//!   every transformation returns a new graph
//! - [`count_paths`](paths::count_paths) - number of directed paths between two nodes
//! - [`transitive_reduction`](reduction::transitive_reduction) - drop edges
//!   implied by longer paths
//! - [`select_candidate`](classify::select_candidate) - the next node to fuse
//! - [`fuse_up`](fusion::fuse_up) / [`fuse_down`](fusion::fuse_down) - merge
//!   a monotone node with a neighbor
//! - [`pareto_optimize`] - enumerate all terminal graphs
//!
//! # Example
//!
//! ```
//! use pareto_graph::prelude::*;
//!
//! let mx = Node::single(0, NodeState::Maximum);
//! let a = Node::single(1, NodeState::Ascend);
//! let mn = Node::single(2, NodeState::Minimum);
//! let graph = Graph::new(
//!     vec![mx.clone(), a.clone(), mn.clone()],
//!     vec![Edge::new(mx, a.clone()), Edge::new(a, mn)],
//! );
//!
//! for terminal in pareto_optimize(&graph)? {
//!     print!("{}", terminal.dump());
//! }
//! # Ok::<(), SearchError>(())
//! ```
//!
//! # Preconditions
//!
//! Input graphs must be acyclic. This is not checked by the algorithm; use
//! [`Graph::validate`] when the input is not trusted.

/// Node values and their states.
pub mod node;

/// Edge values and their exploration state.
pub mod edge;

/// The graph value type and its query primitives.
pub mod graph;

/// Path counting and reachability.
pub mod paths;

/// Global and local transitive reduction.
pub mod reduction;

/// Fusion candidate selection.
pub mod classify;

/// Node fusion operators.
pub mod fusion;

/// Recursive enumeration of terminal graphs.
pub mod optimize;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::classify::{
        Candidate, Direction, Rule, bottom_descenders, is_terminal, order_nodes,
        select_candidate, simple_bottom_descenders, simple_top_ascenders, top_ascenders,
    };
    pub use crate::edge::{Edge, EdgeState};
    pub use crate::fusion::{FusionError, fuse_down, fuse_up};
    pub use crate::graph::{Graph, ValidationError};
    pub use crate::node::{Node, NodeState, VarId};
    pub use crate::optimize::{ParetoSearch, SearchError, SearchLimits, pareto_optimize};
    pub use crate::paths::{count_paths, only_direct_path, reaches};
    pub use crate::reduction::{local_transitive_reduction, transitive_reduction};
}

// Re-export key types at crate root for convenience
pub use edge::{Edge, EdgeState};
pub use graph::{Graph, ValidationError};
pub use node::{Node, NodeState, VarId};
pub use optimize::{ParetoSearch, SearchError, SearchLimits, pareto_optimize};
