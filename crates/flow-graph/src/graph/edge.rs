//! Directed edge value type.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::NodeId;

/// A directed dependency between two nodes: `tail` runs before `head`.
///
/// Edges are not stored by the graph; this is a plain value used when
/// enumerating or exchanging the edge set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Upstream node.
    pub tail: NodeId,
    /// Downstream node.
    pub head: NodeId,
}

impl Edge {
    /// Creates a new edge from `tail` to `head`.
    pub const fn new(tail: NodeId, head: NodeId) -> Self {
        Self { tail, head }
    }
}

impl From<(NodeId, NodeId)> for Edge {
    fn from((tail, head): (NodeId, NodeId)) -> Self {
        Self::new(tail, head)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.tail, self.head)
    }
}
