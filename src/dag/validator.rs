// src/dag/validator.rs

//! Cycle detection over a [`DependencyGraph`].
//!
//! The traversal is a depth-first search driven by an explicit frame stack,
//! so arbitrarily long dependency chains cannot exhaust the call stack. It
//! visits roots in key order and neighbours in list order, exactly like the
//! recursive formulation would.
//!
//! The same search answers both "is there a cycle?" and "show me one", so
//! [`DagValidator::has_cycle`] and [`DagValidator::find_cycle_path`] can never
//! disagree.

use std::collections::HashMap;

use crate::dag::graph::DependencyGraph;
use crate::errors::{PlanError, Result};
use crate::types::NodeId;

/// Visit state of a node during one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// On the active path, at the given depth of the frame stack.
    OnStack(usize),
    /// Fully explored; reaching it again is a merge point, not a cycle.
    Done,
}

struct Frame<'g> {
    node: NodeId,
    deps: &'g [NodeId],
    next: usize,
}

impl<'g> Frame<'g> {
    fn new(graph: &'g DependencyGraph, node: NodeId) -> Self {
        Self {
            node,
            deps: graph.dependencies_of(&node),
            next: 0,
        }
    }
}

/// Stateless acyclicity checker.
#[derive(Debug, Clone, Copy, Default)]
pub struct DagValidator;

impl DagValidator {
    pub fn new() -> Self {
        Self
    }

    /// Whether following dependency edges can lead from some node back to
    /// itself. Empty and edgeless graphs are acyclic.
    pub fn has_cycle(&self, graph: &DependencyGraph) -> bool {
        find_cycle(graph).is_some()
    }

    /// Fail with [`PlanError::CycleDetected`] exactly when [`Self::has_cycle`]
    /// is true. The error carries the rendered cycle, e.g. `a -> b -> a`.
    pub fn validate(&self, graph: &DependencyGraph) -> Result<()> {
        match find_cycle(graph) {
            None => Ok(()),
            Some(cycle) => Err(PlanError::CycleDetected {
                path: Some(render_cycle(&cycle)),
            }),
        }
    }

    /// One cycle in the graph, as a closed walk: the first and last elements
    /// are the same node and every consecutive pair is an edge.
    ///
    /// The witness is cut from the live traversal path, so it only contains
    /// nodes that are actually on the cycle.
    pub fn find_cycle_path(&self, graph: &DependencyGraph) -> Option<Vec<NodeId>> {
        find_cycle(graph)
    }
}

/// Render a cycle as `a -> b -> c -> a`.
pub fn render_cycle(cycle: &[NodeId]) -> String {
    cycle
        .iter()
        .map(NodeId::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn find_cycle(graph: &DependencyGraph) -> Option<Vec<NodeId>> {
    if graph.is_empty() {
        return None;
    }

    let mut marks: HashMap<NodeId, Mark> = HashMap::with_capacity(graph.len());
    let mut stack: Vec<Frame<'_>> = Vec::new();

    for &root in graph.nodes() {
        if marks.contains_key(&root) {
            continue;
        }

        marks.insert(root, Mark::OnStack(0));
        stack.push(Frame::new(graph, root));

        while let Some(frame) = stack.last_mut() {
            let Some(&next) = frame.deps.get(frame.next) else {
                marks.insert(frame.node, Mark::Done);
                stack.pop();
                continue;
            };
            frame.next += 1;

            match marks.get(&next).copied() {
                None => {
                    marks.insert(next, Mark::OnStack(stack.len()));
                    stack.push(Frame::new(graph, next));
                }
                Some(Mark::OnStack(depth)) => {
                    // Back edge: the path from `next` to the top of the stack,
                    // closed by the edge we just followed.
                    let mut cycle: Vec<NodeId> =
                        stack[depth..].iter().map(|frame| frame.node).collect();
                    cycle.push(next);
                    return Some(cycle);
                }
                Some(Mark::Done) => {}
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<const N: usize>() -> [NodeId; N] {
        std::array::from_fn(|_| NodeId::new_v4())
    }

    fn graph(entries: &[(NodeId, &[NodeId])]) -> DependencyGraph {
        entries
            .iter()
            .map(|(id, deps)| (*id, deps.to_vec()))
            .collect()
    }

    fn assert_closed_walk(g: &DependencyGraph, cycle: &[NodeId]) {
        assert!(cycle.len() >= 2, "cycle too short: {cycle:?}");
        assert_eq!(cycle.first(), cycle.last());
        for pair in cycle.windows(2) {
            assert!(
                g.dependencies_of(&pair[0]).contains(&pair[1]),
                "missing edge {} -> {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn empty_graph_is_valid() {
        let validator = DagValidator::new();
        assert!(!validator.has_cycle(&DependencyGraph::new()));
        assert!(validator.find_cycle_path(&DependencyGraph::new()).is_none());
    }

    #[test]
    fn edgeless_graph_has_no_cycle() {
        let [a, b, c] = ids();
        let g = graph(&[(a, &[]), (b, &[]), (c, &[])]);
        assert!(!DagValidator.has_cycle(&g));
    }

    #[test]
    fn self_loop_detected() {
        let [a] = ids();
        let g = graph(&[(a, &[a])]);
        assert!(DagValidator.has_cycle(&g));
        assert_eq!(DagValidator.find_cycle_path(&g), Some(vec![a, a]));
    }

    #[test]
    fn chain_without_back_edge_is_acyclic_until_closed() {
        let [a, b, c] = ids();
        let mut g = graph(&[(a, &[b]), (b, &[c]), (c, &[])]);
        assert!(!DagValidator.has_cycle(&g));

        g.insert(c, vec![a]);
        assert!(DagValidator.has_cycle(&g));
        assert_eq!(DagValidator.find_cycle_path(&g), Some(vec![a, b, c, a]));
    }

    #[test]
    fn diamond_shape_no_cycle() {
        let [a, b, c, d] = ids();
        let g = graph(&[(a, &[b, c]), (b, &[d]), (c, &[d]), (d, &[])]);
        assert!(!DagValidator.has_cycle(&g));
        assert!(DagValidator.validate(&g).is_ok());
    }

    #[test]
    fn cycle_in_middle_excludes_the_entry_node() {
        // a -> b -> c -> d -> b
        let [a, b, c, d] = ids();
        let g = graph(&[(a, &[b]), (b, &[c]), (c, &[d]), (d, &[b])]);

        let cycle = DagValidator.find_cycle_path(&g).unwrap();
        assert_eq!(cycle, vec![b, c, d, b]);
        assert!(!cycle.contains(&a));
    }

    #[test]
    fn cycle_behind_a_merge_point_is_reported_exactly() {
        // a -> {b, c}, b -> d, c -> d, d -> c
        let [a, b, c, d] = ids();
        let g = graph(&[(a, &[b, c]), (b, &[d]), (c, &[d]), (d, &[c])]);

        let cycle = DagValidator.find_cycle_path(&g).unwrap();
        assert_closed_walk(&g, &cycle);
        assert!(!cycle.contains(&a));
        assert!(!cycle.contains(&b));
    }

    #[test]
    fn dangling_references_are_leaves() {
        let [a, missing] = ids();
        let g = graph(&[(a, &[missing])]);
        assert!(!DagValidator.has_cycle(&g));
    }

    #[test]
    fn validate_reports_rendered_path() {
        let [a, b] = ids();
        let g = graph(&[(a, &[b]), (b, &[a])]);

        let err = DagValidator.validate(&g).unwrap_err();
        match err {
            PlanError::CycleDetected { path: Some(path) } => {
                assert_eq!(path, format!("{a} -> {b} -> {a}"));
            }
            other => panic!("expected CycleDetected, got {other:?}"),
        }
    }

    #[test]
    fn validate_is_idempotent() {
        let [a, b, c] = ids();
        let g = graph(&[(a, &[b]), (b, &[c]), (c, &[a])]);

        let first = DagValidator.validate(&g).unwrap_err().to_string();
        let second = DagValidator.validate(&g).unwrap_err().to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn long_chain_does_not_overflow() {
        let chain: Vec<NodeId> = (0..200_000).map(|_| NodeId::new_v4()).collect();
        let mut g = DependencyGraph::with_capacity(chain.len());
        for pair in chain.windows(2) {
            g.insert(pair[0], vec![pair[1]]);
        }
        assert!(!DagValidator.has_cycle(&g));

        if let (Some(first), Some(last)) = (chain.first(), chain.last()) {
            g.insert(*last, vec![*first]);
        }
        assert!(DagValidator.has_cycle(&g));
    }
}
