// src/dag/graph.rs

use indexmap::IndexMap;

use crate::types::NodeId;

/// Adjacency mapping from a node to its direct dependencies.
///
/// Keys keep insertion order, which is the order the scope was read in.
/// Dependencies may name ids that are not keys; traversal treats those as
/// leaves with no outgoing edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    nodes: IndexMap<NodeId, Vec<NodeId>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: IndexMap::with_capacity(capacity),
        }
    }

    /// Set the dependency list of `id`.
    ///
    /// Replacing an existing entry keeps its original position.
    pub fn insert(&mut self, id: NodeId, deps: Vec<NodeId>) -> Option<Vec<NodeId>> {
        self.nodes.insert(id, deps)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Direct dependencies of `id`; empty for ids that are not keys.
    pub fn dependencies_of(&self, id: &NodeId) -> &[NodeId] {
        self.nodes.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Keys in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &[NodeId])> {
        self.nodes.iter().map(|(id, deps)| (id, deps.as_slice()))
    }

    /// Whether `id` appears anywhere in the graph, as a key or as a dependency.
    pub fn mentions(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id) || self.nodes.values().any(|deps| deps.contains(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(Vec::len).sum()
    }
}

impl FromIterator<(NodeId, Vec<NodeId>)> for DependencyGraph {
    fn from_iter<I: IntoIterator<Item = (NodeId, Vec<NodeId>)>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replacing_an_entry_keeps_its_position() {
        let a = NodeId::new_v4();
        let b = NodeId::new_v4();
        let c = NodeId::new_v4();

        let mut graph: DependencyGraph = [(a, vec![]), (b, vec![a])].into_iter().collect();
        graph.insert(a, vec![c]);

        let order: Vec<_> = graph.nodes().copied().collect();
        assert_eq!(order, vec![a, b]);
        assert_eq!(graph.dependencies_of(&a), &[c]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn unknown_ids_have_no_dependencies() {
        let a = NodeId::new_v4();
        let missing = NodeId::new_v4();
        let graph: DependencyGraph = [(a, vec![missing])].into_iter().collect();

        assert!(graph.dependencies_of(&missing).is_empty());
        assert!(graph.mentions(&missing));
        assert!(!graph.contains(&missing));
    }
}
