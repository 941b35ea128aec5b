//! Node classification.
//!
//! Selects the monotone nodes that can be fused next. Four selectors exist,
//! tried in a fixed priority order by [`select_candidate`]:
//!
//! 1. [`simple_top_ascenders`]
//! 2. [`simple_bottom_descenders`]
//! 3. [`top_ascenders`]
//! 4. [`bottom_descenders`]
//!
//! Each selector returns its nodes in the graph's node order.

use core::fmt;

use crate::graph::Graph;
use crate::node::Node;

/// Direction in which a candidate is fused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// An ascender fused with one of its predecessors.
    Up,
    /// A descender fused with one of its successors.
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.write_str("up"),
            Direction::Down => f.write_str("down"),
        }
    }
}

/// The selector that produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// [`simple_top_ascenders`].
    SimpleTop,
    /// [`simple_bottom_descenders`].
    SimpleBottom,
    /// [`top_ascenders`].
    Top,
    /// [`bottom_descenders`].
    Bottom,
}

impl Rule {
    /// Returns the fusion direction associated with the rule.
    #[must_use]
    pub fn direction(self) -> Direction {
        match self {
            Rule::SimpleTop | Rule::Top => Direction::Up,
            Rule::SimpleBottom | Rule::Bottom => Direction::Down,
        }
    }
}

/// The node chosen for the next fusion step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// The ascender or descender to fuse.
    pub node: &'a Node,
    /// The selector that picked it.
    pub rule: Rule,
}

impl Candidate<'_> {
    /// Returns the fusion direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.rule.direction()
    }
}

/// Ascenders with no ascending predecessor, following every edge.
#[must_use]
pub fn top_ascenders(graph: &Graph) -> Vec<&Node> {
    graph
        .nodes()
        .iter()
        .filter(|node| node.is_ascending())
        .filter(|node| !graph.predecessors(node).iter().any(|p| p.is_ascending()))
        .collect()
}

/// Descenders with no descending successor, following every edge.
#[must_use]
pub fn bottom_descenders(graph: &Graph) -> Vec<&Node> {
    graph
        .nodes()
        .iter()
        .filter(|node| node.is_descending())
        .filter(|node| !graph.successors(node).iter().any(|s| s.is_descending()))
        .collect()
}

/// Ascenders with exactly one free predecessor, which is not itself ascending.
#[must_use]
pub fn simple_top_ascenders(graph: &Graph) -> Vec<&Node> {
    graph
        .nodes()
        .iter()
        .filter(|node| node.is_ascending())
        .filter(|node| {
            matches!(graph.free_predecessors(node).as_slice(), [only] if !only.is_ascending())
        })
        .collect()
}

/// Descenders with exactly one free successor, which is not itself descending.
#[must_use]
pub fn simple_bottom_descenders(graph: &Graph) -> Vec<&Node> {
    graph
        .nodes()
        .iter()
        .filter(|node| node.is_descending())
        .filter(|node| {
            matches!(graph.free_successors(node).as_slice(), [only] if !only.is_descending())
        })
        .collect()
}

/// Picks the next node to fuse, or `None` if the graph is terminal.
#[must_use]
pub fn select_candidate(graph: &Graph) -> Option<Candidate<'_>> {
    let selectors: [(Rule, fn(&Graph) -> Vec<&Node>); 4] = [
        (Rule::SimpleTop, simple_top_ascenders),
        (Rule::SimpleBottom, simple_bottom_descenders),
        (Rule::Top, top_ascenders),
        (Rule::Bottom, bottom_descenders),
    ];

    selectors.into_iter().find_map(|(rule, select)| {
        select(graph)
            .into_iter()
            .next()
            .map(|node| Candidate { node, rule })
    })
}

/// Returns true if no node of the graph can be fused any more.
#[must_use]
pub fn is_terminal(graph: &Graph) -> bool {
    select_candidate(graph).is_none()
}

/// Stable partition putting ascending and descending nodes first.
///
/// Relative order is kept within both halves. This fixes the order in which
/// sibling fusions are explored.
#[must_use]
pub fn order_nodes<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Vec<&'a Node> {
    let (mut active, inactive): (Vec<&Node>, Vec<&Node>) = nodes
        .into_iter()
        .partition(|node| node.state().is_monotone());
    active.extend(inactive);
    active
}
