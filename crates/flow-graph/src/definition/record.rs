//! Per-node record exchanged with persistence and HTTP collaborators.

use serde::{Deserialize, Serialize};

use crate::binding::NodeBinding;
use crate::graph::{Node, NodeId};

/// Flat, serializable view of a node and its adjacency.
///
/// The binding is flattened, so a record reads as
/// `{"id", "kind", "integration", "action", "params", "parent_ids", "children_ids"}`,
/// with `action` holding the operation key for trigger nodes too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node identifier.
    pub id: NodeId,
    /// Integration binding.
    #[serde(flatten)]
    pub binding: NodeBinding,
    /// Parent node IDs.
    #[serde(default)]
    pub parent_ids: Vec<NodeId>,
    /// Child node IDs.
    #[serde(default)]
    pub children_ids: Vec<NodeId>,
}

impl NodeRecord {
    /// Creates a record with no adjacency.
    pub fn new(id: NodeId, binding: NodeBinding) -> Self {
        Self {
            id,
            binding,
            parent_ids: Vec::new(),
            children_ids: Vec::new(),
        }
    }

    /// Sets the parent IDs.
    pub fn with_parents(mut self, parent_ids: impl IntoIterator<Item = NodeId>) -> Self {
        self.parent_ids = parent_ids.into_iter().collect();
        self
    }

    /// Sets the child IDs.
    pub fn with_children(mut self, children_ids: impl IntoIterator<Item = NodeId>) -> Self {
        self.children_ids = children_ids.into_iter().collect();
        self
    }

    /// Builds a detached node carrying this record's ID and binding.
    pub fn to_node(&self) -> Node {
        Node::with_id(self.id, self.binding.clone())
    }
}

impl From<&Node> for NodeRecord {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id(),
            binding: node.value().clone(),
            parent_ids: node.parent_ids(),
            children_ids: node.children_ids(),
        }
    }
}

impl From<Node> for NodeRecord {
    fn from(node: Node) -> Self {
        Self::from(&node)
    }
}
