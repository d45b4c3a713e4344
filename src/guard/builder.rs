// src/guard/builder.rs

//! Overlay a pending create/update onto the persisted siblings of a scope.

use crate::dag::DependencyGraph;
use crate::store::SiblingRecord;
use crate::types::NodeId;

fn sibling_graph(siblings: &[SiblingRecord], extra: usize) -> DependencyGraph {
    let mut graph = DependencyGraph::with_capacity(siblings.len() + extra);
    for sibling in siblings {
        graph.insert(sibling.id, sibling.dependencies.clone());
    }
    graph
}

/// Graph as it would look if a new entity with `candidate` dependencies
/// existed.
///
/// The new entity is represented by a placeholder id that collides with no
/// key and no referenced id. When `candidate` is empty nothing is added and
/// the placeholder is `None`.
pub fn prepare_create_graph(
    siblings: &[SiblingRecord],
    candidate: &[NodeId],
) -> (DependencyGraph, Option<NodeId>) {
    let mut graph = sibling_graph(siblings, 1);
    if candidate.is_empty() {
        return (graph, None);
    }

    let placeholder = fresh_placeholder(&graph, candidate);
    graph.insert(placeholder, candidate.to_vec());
    (graph, Some(placeholder))
}

/// Graph with `target`'s dependencies replaced by `candidate`.
///
/// Every other sibling keeps its persisted list. If `target` is not among
/// the siblings its entry is appended.
pub fn prepare_update_graph(
    siblings: &[SiblingRecord],
    target: NodeId,
    candidate: &[NodeId],
) -> DependencyGraph {
    let mut graph = sibling_graph(siblings, 1);
    graph.insert(target, candidate.to_vec());
    graph
}

/// Graph of the scope exactly as persisted.
pub fn persisted_graph(siblings: &[SiblingRecord]) -> DependencyGraph {
    sibling_graph(siblings, 0)
}

fn fresh_placeholder(graph: &DependencyGraph, candidate: &[NodeId]) -> NodeId {
    loop {
        let id = NodeId::new_v4();
        if !graph.mentions(&id) && !candidate.contains(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dag::DagValidator;

    fn sibling(id: NodeId, deps: &[NodeId]) -> SiblingRecord {
        SiblingRecord {
            id,
            dependencies: deps.to_vec(),
        }
    }

    #[test]
    fn create_graph_adds_placeholder_last() {
        let a = NodeId::new_v4();
        let b = NodeId::new_v4();
        let siblings = [sibling(a, &[]), sibling(b, &[a])];

        let (graph, placeholder) = prepare_create_graph(&siblings, &[b]);
        let placeholder = placeholder.expect("placeholder for non-empty candidate");

        let order: Vec<_> = graph.nodes().copied().collect();
        assert_eq!(order, vec![a, b, placeholder]);
        assert_eq!(graph.dependencies_of(&placeholder), &[b]);
        assert!(!DagValidator.has_cycle(&graph));
    }

    #[test]
    fn create_graph_with_no_candidate_is_just_the_siblings() {
        let a = NodeId::new_v4();
        let siblings = [sibling(a, &[])];

        let (graph, placeholder) = prepare_create_graph(&siblings, &[]);
        assert!(placeholder.is_none());
        assert_eq!(graph, persisted_graph(&siblings));
    }

    #[test]
    fn update_graph_overrides_only_the_target() {
        let a = NodeId::new_v4();
        let b = NodeId::new_v4();
        let c = NodeId::new_v4();
        let siblings = [sibling(a, &[b]), sibling(b, &[c]), sibling(c, &[])];

        // c -> a closes a -> b -> c -> a through untouched siblings.
        let graph = prepare_update_graph(&siblings, c, &[a]);
        assert_eq!(graph.dependencies_of(&a), &[b]);
        assert_eq!(graph.dependencies_of(&b), &[c]);
        assert_eq!(graph.dependencies_of(&c), &[a]);
        assert!(DagValidator.has_cycle(&graph));

        let cleared = prepare_update_graph(&siblings, c, &[]);
        assert!(!DagValidator.has_cycle(&cleared));
    }

    #[test]
    fn update_graph_appends_unknown_target() {
        let a = NodeId::new_v4();
        let target = NodeId::new_v4();
        let graph = prepare_update_graph(&[sibling(a, &[])], target, &[a]);

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.dependencies_of(&target), &[a]);
    }
}
