//! Pareto graph contraction demo.
//!
//! Builds the reference trade-off graph, enumerates its terminal graphs and
//! renders them.
//!
//! ```text
//!        mx            MAXIMUM
//!       /  \
//!      a    c          TRADEOFF, DESCEND
//!       \  / \
//!        b    d        ASCEND, TRADEOFF
//!         \  /
//!          mn          MINIMUM
//! ```

mod config;
mod logging;

pub use config::{ConfigWarning, DemoConfig};
pub use logging::{TracingConfig, TracingFormat};

use core::fmt::Write as _;

use pareto_graph::{Edge, Graph, Node, NodeState, ParetoSearch, SearchError, ValidationError};

/// Errors reported by [`run`].
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// The input graph failed validation.
    #[error("invalid input graph ({} problems)", .0.len())]
    Invalid(Vec<ValidationError>),
    /// The search failed.
    #[error("search failed: {0}")]
    Search(#[from] SearchError),
}

/// Returns the reference graph.
#[must_use]
pub fn reference_graph() -> Graph {
    let mx = Node::single(0, NodeState::Maximum);
    let a = Node::single(1, NodeState::Tradeoff);
    let b = Node::single(2, NodeState::Ascend);
    let c = Node::single(3, NodeState::Descend);
    let d = Node::single(4, NodeState::Tradeoff);
    let mn = Node::single(5, NodeState::Minimum);

    let edges = vec![
        Edge::new(mx.clone(), a.clone()),
        Edge::new(mx.clone(), c.clone()),
        Edge::new(a.clone(), b.clone()),
        Edge::new(c.clone(), b.clone()),
        Edge::new(c.clone(), d.clone()),
        Edge::new(d.clone(), mn.clone()),
        Edge::new(b.clone(), mn.clone()),
    ];
    Graph::new(vec![mx, a, b, c, d, mn], edges)
}

/// Validates `graph` and enumerates its terminal graphs.
///
/// # Errors
///
/// Returns [`DemoError::Invalid`] if the graph is not a well-formed DAG and
/// [`DemoError::Search`] if the search fails or exceeds its limits.
pub fn run(graph: &Graph, search: &ParetoSearch) -> Result<Vec<Graph>, DemoError> {
    if let Err(errors) = graph.validate() {
        for error in &errors {
            tracing::error!(%error, "input graph rejected");
        }
        return Err(DemoError::Invalid(errors));
    }
    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        limits = ?search.limits(),
        "starting contraction"
    );
    let terminals = search.run(graph)?;
    tracing::info!(terminals = terminals.len(), "contraction finished");
    Ok(terminals)
}

/// Renders terminal graphs one after the other.
#[must_use]
pub fn render(terminals: &[Graph]) -> String {
    let mut out = String::new();
    for (i, graph) in terminals.iter().enumerate() {
        let _ = writeln!(out, "# terminal graph {}", i + 1);
        out.push_str(&graph.dump());
    }
    out
}
