//! Node types for trade-off graphs.
//!
//! A node groups one or more variables together with the qualitative trend
//! they show against the objectives. Nodes are plain values: two nodes are the
//! same node exactly when their variable lists and states are equal.

use core::fmt;

/// Identifier of a single system variable.
pub type VarId = u32;

/// Qualitative state of a node.
///
/// The discriminants are the signed ordinals used throughout the algorithm:
/// the two monotone states are `1` and `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i8)]
pub enum NodeState {
    /// Local optimum where every objective is maximal.
    Maximum = 2,
    /// All objectives improve together.
    Ascend = 1,
    /// The objectives exhibit a genuine trade-off.
    Tradeoff = 0,
    /// All objectives worsen together.
    Descend = -1,
    /// Local optimum where every objective is minimal.
    Minimum = -2,
}

impl NodeState {
    /// All five states, from [`Maximum`](Self::Maximum) down to [`Minimum`](Self::Minimum).
    pub const ALL: [NodeState; 5] = [
        NodeState::Maximum,
        NodeState::Ascend,
        NodeState::Tradeoff,
        NodeState::Descend,
        NodeState::Minimum,
    ];

    /// Returns the signed ordinal of this state (`2` .. `-2`).
    #[must_use]
    pub fn ordinal(self) -> i8 {
        self as i8
    }

    /// Returns true for the monotone states, [`Ascend`](Self::Ascend) and
    /// [`Descend`](Self::Descend).
    #[must_use]
    pub fn is_monotone(self) -> bool {
        matches!(self.ordinal(), 1 | -1)
    }

    /// Returns the upper-case name used in diagnostic dumps.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            NodeState::Maximum => "MAXIMUM",
            NodeState::Ascend => "ASCEND",
            NodeState::Tradeoff => "TRADEOFF",
            NodeState::Descend => "DESCEND",
            NodeState::Minimum => "MINIMUM",
        }
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node of a trade-off graph.
///
/// `vars` is ordered: fusion concatenates the variable lists of the two merged
/// nodes, so the order records the node's provenance. Equality and hashing
/// cover both `vars` and `state`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node {
    vars: Vec<VarId>,
    state: NodeState,
}

impl Node {
    /// Creates a node from its variables and state.
    #[must_use]
    pub fn new(vars: impl Into<Vec<VarId>>, state: NodeState) -> Self {
        Self {
            vars: vars.into(),
            state,
        }
    }

    /// Creates a single-variable node.
    #[must_use]
    pub fn single(var: VarId, state: NodeState) -> Self {
        Self::new(vec![var], state)
    }

    /// Returns the node's variables in provenance order.
    #[must_use]
    pub fn vars(&self) -> &[VarId] {
        &self.vars
    }

    /// Returns the node's state.
    #[must_use]
    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Returns true if the node is in the [`NodeState::Ascend`] state.
    #[must_use]
    pub fn is_ascending(&self) -> bool {
        self.state == NodeState::Ascend
    }

    /// Returns true if the node is in the [`NodeState::Descend`] state.
    #[must_use]
    pub fn is_descending(&self) -> bool {
        self.state == NodeState::Descend
    }

    /// Builds the node obtained by merging `first` and `second`.
    ///
    /// The variables of `first` come before those of `second`.
    #[must_use]
    pub(crate) fn merged(first: &Node, second: &Node, state: NodeState) -> Self {
        let mut vars = Vec::with_capacity(first.vars.len() + second.vars.len());
        vars.extend_from_slice(&first.vars);
        vars.extend_from_slice(&second.vars);
        Self { vars, state }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?},{})", self.vars, self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashSet;

    #[test]
    fn state_ordinals() {
        let ordinals: Vec<i8> = NodeState::ALL.iter().map(|s| s.ordinal()).collect();
        assert_eq!(ordinals, vec![2, 1, 0, -1, -2]);
    }

    #[test]
    fn only_ascend_and_descend_are_monotone() {
        let monotone: Vec<NodeState> = NodeState::ALL
            .into_iter()
            .filter(|s| s.is_monotone())
            .collect();
        assert_eq!(monotone, vec![NodeState::Ascend, NodeState::Descend]);
    }

    #[test]
    fn node_equality_is_structural() {
        let a = Node::new(vec![1, 2], NodeState::Tradeoff);
        let b = Node::new(vec![1, 2], NodeState::Tradeoff);
        let reordered = Node::new(vec![2, 1], NodeState::Tradeoff);
        let other_state = Node::new(vec![1, 2], NodeState::Maximum);

        assert_eq!(a, b);
        assert_ne!(a, reordered);
        assert_ne!(a, other_state);
    }

    #[test]
    fn equal_nodes_hash_alike() {
        let mut set = HashSet::new();
        set.insert(Node::single(7, NodeState::Ascend));
        assert!(set.contains(&Node::new(vec![7], NodeState::Ascend)));
        assert!(!set.contains(&Node::new(vec![7], NodeState::Descend)));
    }

    #[test]
    fn merged_concatenates_in_order() {
        let pred = Node::new(vec![3], NodeState::Descend);
        let asc = Node::new(vec![1, 2], NodeState::Ascend);
        let fused = Node::merged(&pred, &asc, NodeState::Tradeoff);
        assert_eq!(fused.vars(), &[3, 1, 2]);
        assert_eq!(fused.state(), NodeState::Tradeoff);
    }

    #[test]
    fn node_display() {
        let node = Node::new(vec![0, 1], NodeState::Maximum);
        assert_eq!(format!("{node}"), "([0, 1],MAXIMUM)");
    }
}
