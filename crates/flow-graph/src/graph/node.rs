//! Workflow graph vertex.

use std::fmt;

use crate::binding::NodeBinding;
use crate::collections::OrderedSet;
use crate::graph::NodeId;

/// A vertex of a workflow graph.
///
/// Adjacency is stored by identifier, so the graph owns every node in one
/// arena and nodes never own each other. Parents and children keep the order
/// in which edges were added. Adjacency can only be changed through
/// [`WorkflowGraph`](super::WorkflowGraph) edge operations, which keep both
/// directions of an edge in step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    value: NodeBinding,
    parents: OrderedSet<NodeId>,
    children: OrderedSet<NodeId>,
}

impl Node {
    /// Creates a standalone node with a fresh ID and no edges.
    pub fn new(value: NodeBinding) -> Self {
        Self::with_id(NodeId::new(), value)
    }

    /// Creates a standalone node with a specific ID and no edges.
    pub fn with_id(id: NodeId, value: NodeBinding) -> Self {
        Self {
            id,
            value,
            parents: OrderedSet::new(),
            children: OrderedSet::new(),
        }
    }

    /// Returns the node ID.
    #[inline]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the integration binding.
    #[inline]
    pub const fn value(&self) -> &NodeBinding {
        &self.value
    }

    /// Returns the number of parents plus the number of children.
    #[inline]
    pub fn degree(&self) -> usize {
        self.parents.len() + self.children.len()
    }

    /// Returns the number of edges entering this node.
    #[inline]
    pub fn in_degree(&self) -> usize {
        self.parents.len()
    }

    /// Returns the number of edges leaving this node.
    #[inline]
    pub fn out_degree(&self) -> usize {
        self.children.len()
    }

    /// Returns parent IDs in the order their edges were added.
    pub fn parent_ids(&self) -> Vec<NodeId> {
        self.parents.values()
    }

    /// Returns child IDs in the order their edges were added.
    pub fn children_ids(&self) -> Vec<NodeId> {
        self.children.values()
    }

    /// Returns whether `id` is a parent of this node.
    pub fn has_parent(&self, id: NodeId) -> bool {
        self.parents.contains(&id)
    }

    /// Returns whether `id` is a child of this node.
    pub fn has_child(&self, id: NodeId) -> bool {
        self.children.contains(&id)
    }

    pub(crate) fn parents(&self) -> &OrderedSet<NodeId> {
        &self.parents
    }

    pub(crate) fn children(&self) -> &OrderedSet<NodeId> {
        &self.children
    }

    pub(crate) fn link_child(&mut self, id: NodeId) -> bool {
        self.children.insert(id)
    }

    pub(crate) fn link_parent(&mut self, id: NodeId) -> bool {
        self.parents.insert(id)
    }

    pub(crate) fn unlink_child(&mut self, id: NodeId) -> bool {
        self.children.remove_one(&id)
    }

    pub(crate) fn unlink_parent(&mut self, id: NodeId) -> bool {
        self.parents.remove_one(&id)
    }

    /// Drops all adjacency.
    pub(crate) fn detach(&mut self) {
        self.parents.clear();
        self.children.clear();
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} - Parents: {} - Children: {} - Value: {}",
            self.id,
            self.parents.len(),
            self.children.len(),
            self.value
        )
    }
}
