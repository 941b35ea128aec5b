//! End-to-end tests for the contraction pipeline.
//!
//! These tests walk the reference graph through every stage:
//! - Candidate selection
//! - Sibling fusions with freezing in between
//! - Local reduction after each fusion
//! - The final set of terminal graphs


use pareto_graph::classify::{Direction, Rule, is_terminal, select_candidate};
use pareto_graph::edge::EdgeState;
use pareto_graph::fusion::{fuse_down, fuse_up};
use pareto_graph::node::{Node, NodeState};
use pareto_graph::optimize::{ParetoSearch, SearchError, SearchLimits, pareto_optimize};
use pareto_graph::reduction::transitive_reduction;
use test_utils::{all_vars, edge, node, reference};

// ─────────────────────────────────────────────────────────────────────────────
// Single steps
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn reference_selects_plain_top_ascender() {
    let (r, graph) = reference();
    let candidate = select_candidate(&graph).expect("candidate");

    assert_eq!(candidate.node, &r.b);
    assert_eq!(candidate.rule, Rule::Top);
    assert_eq!(candidate.direction(), Direction::Up);
}

#[test]
fn reference_is_already_reduced() {
    let (_, graph) = reference();
    assert_eq!(transitive_reduction(&graph).edge_count(), graph.edge_count());
}

#[test]
fn fusing_descending_predecessor_drops_shortcuts() {
    let (r, graph) = reference();
    let fused = fuse_up(&r.c, &r.b, &graph).unwrap();
    let f = Node::new(vec![3, 2], NodeState::Tradeoff);

    assert_eq!(
        fused.nodes(),
        &[r.mx.clone(), r.a.clone(), r.d.clone(), r.mn.clone(), f.clone()]
    );
    // mx -> f is implied by mx -> a -> f, f -> mn by f -> d -> mn.
    assert_eq!(fused.edge_count(), 4);
    assert!(fused.find_edge(&r.mx, &r.a).is_some());
    assert!(fused.find_edge(&r.a, &f).is_some());
    assert!(fused.find_edge(&f, &r.d).is_some());
    assert!(fused.find_edge(&r.d, &r.mn).is_some());
    assert!(is_terminal(&fused));
}

#[test]
fn second_sibling_sees_frozen_edge() {
    let (r, graph) = reference();
    let frozen = graph.freeze(&r.c, &r.b);
    let fused = fuse_up(&r.a, &r.b, &frozen).unwrap();
    let f = Node::new(vec![1, 2], NodeState::Tradeoff);

    let carried = fused.find_edge(&r.c, &f).expect("c -> f");
    assert_eq!(carried.state, EdgeState::Frozen);
    assert!(fused.find_edge(&r.mx, &f).is_none());

    // c now has a single free successor, d.
    let candidate = select_candidate(&fused).expect("candidate");
    assert_eq!(candidate.node, &r.c);
    assert_eq!(candidate.rule, Rule::SimpleBottom);
}

#[test]
fn fuse_down_takes_successor_state() {
    let d = node(0, NodeState::Descend);
    let mn = node(1, NodeState::Minimum);
    let graph = pareto_graph::Graph::new(vec![d.clone(), mn.clone()], vec![edge(&d, &mn)]);

    let fused = fuse_down(&d, &mn, &graph).unwrap();
    assert_eq!(fused.nodes(), &[Node::new(vec![0, 1], NodeState::Minimum)]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Full enumeration
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn reference_yields_two_terminal_graphs() {
    let (r, graph) = reference();
    let terminals = pareto_optimize(&graph).unwrap();
    assert_eq!(terminals.len(), 2);

    // Branch 1: c fused into b.
    let first = &terminals[0];
    let cb = Node::new(vec![3, 2], NodeState::Tradeoff);
    assert_eq!(
        first.nodes(),
        &[r.mx.clone(), r.a.clone(), r.d.clone(), r.mn.clone(), cb.clone()]
    );
    assert_eq!(first.edge_count(), 4);
    assert!(first.edges().iter().all(|e| e.is_free()));

    // Branch 2: a fused into b, then c fused with d.
    let second = &terminals[1];
    let ab = Node::new(vec![1, 2], NodeState::Tradeoff);
    let cd = Node::new(vec![3, 4], NodeState::Tradeoff);
    assert_eq!(
        second.nodes(),
        &[r.mx.clone(), r.mn.clone(), ab.clone(), cd.clone()]
    );
    assert_eq!(second.edge_count(), 3);
    assert!(second.find_edge(&r.mx, &cd).is_some_and(|e| e.is_free()));
    assert!(second.find_edge(&cd, &ab).is_some_and(|e| !e.is_free()));
    assert!(second.find_edge(&ab, &r.mn).is_some_and(|e| e.is_free()));

    for terminal in &terminals {
        assert!(is_terminal(terminal));
        assert!(terminal.node_count() < graph.node_count());
        assert_eq!(all_vars(terminal), all_vars(&graph));
    }
}

#[test]
fn enumeration_does_not_modify_input() {
    let (_, graph) = reference();
    let before = graph.dump();
    let _ = pareto_optimize(&graph).unwrap();
    assert_eq!(graph.dump(), before);
}

#[test]
fn limits_cap_reference_search() {
    let (_, graph) = reference();

    let one = ParetoSearch::with_limits(SearchLimits::unbounded().with_max_terminals(1));
    assert_eq!(
        one.run(&graph).unwrap_err(),
        SearchError::TerminalLimit { limit: 1 }
    );

    // Three fusions are needed in total.
    let tight = ParetoSearch::with_limits(SearchLimits::unbounded().with_max_fusions(2));
    assert_eq!(
        tight.run(&graph).unwrap_err(),
        SearchError::FusionLimit { limit: 2 }
    );
    let enough = ParetoSearch::with_limits(SearchLimits::unbounded().with_max_fusions(3));
    assert_eq!(enough.run(&graph).unwrap().len(), 2);
}

#[test]
fn dump_renders_terminal() {
    let (_, graph) = reference();
    let terminals = pareto_optimize(&graph).unwrap();
    let dump = terminals[1].dump();

    assert!(dump.starts_with(
        "nodes\n([0],MAXIMUM)([5],MINIMUM)([1, 2],TRADEOFF)([3, 4],TRADEOFF)\nedges\n"
    ));
    assert!(dump.contains("(([3, 4],TRADEOFF),([1, 2],TRADEOFF),FROZEN)"));
}
