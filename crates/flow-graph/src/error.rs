//! Graph error types.

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

use crate::graph::NodeId;

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Categories of graph errors.
///
/// Callers use the kind to decide how to surface a failure, e.g. a
/// `NotFound` on edge creation is usually a client input error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// A referenced node or edge is absent.
    NotFound,
    /// The operation would duplicate an existing node or edge, or close a cycle.
    Conflict,
    /// A definition or binding is malformed or references unknown integrations.
    Invalid,
}

/// Errors that can occur during graph operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The node is not present in the graph.
    #[error("node {0} not found in the graph")]
    NodeNotFound(NodeId),

    /// The edge is not present in the graph.
    #[error("edge ({tail}, {head}) not found in the graph")]
    EdgeNotFound {
        /// Tail of the missing edge.
        tail: NodeId,
        /// Head of the missing edge.
        head: NodeId,
    },

    /// A node with the same ID is already present.
    #[error("node {0} already exists")]
    NodeExists(NodeId),

    /// The edge already exists.
    #[error("edge ({tail}, {head}) already exists")]
    EdgeExists {
        /// Tail of the duplicate edge.
        tail: NodeId,
        /// Head of the duplicate edge.
        head: NodeId,
    },

    /// The graph already holds the configured maximum number of nodes.
    #[error("graph is full: at most {limit} nodes allowed")]
    CapacityExceeded {
        /// Configured node limit.
        limit: usize,
    },

    /// Adding the edge would introduce a cycle.
    #[error("edge ({tail}, {head}) would introduce a cycle")]
    CycleDetected {
        /// Tail of the rejected edge.
        tail: NodeId,
        /// Head of the rejected edge.
        head: NodeId,
    },

    /// The graph contains a cycle where an acyclic graph is required.
    #[error("cycle detected in workflow graph")]
    Cyclic,

    /// Workflow definition is invalid.
    #[error("invalid workflow definition: {0}")]
    InvalidDefinition(String),

    /// A node references an integration missing from the catalog.
    #[error("unknown integration: {0}")]
    UnknownIntegration(String),

    /// A node references a trigger or action the integration does not provide.
    #[error("integration {integration} has no operation {key}")]
    UnknownOperation {
        /// Integration key.
        integration: String,
        /// Trigger or action key.
        key: String,
    },

    /// A required action input has no parameter.
    #[error("node {node_id} is missing required param {key}")]
    MissingParam {
        /// Node with the missing param.
        node_id: NodeId,
        /// Input field key.
        key: String,
    },
}

impl GraphError {
    /// Returns the category of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NodeNotFound(_) | Self::EdgeNotFound { .. } => ErrorKind::NotFound,
            Self::NodeExists(_)
            | Self::EdgeExists { .. }
            | Self::CapacityExceeded { .. }
            | Self::CycleDetected { .. }
            | Self::Cyclic => ErrorKind::Conflict,
            Self::InvalidDefinition(_)
            | Self::UnknownIntegration(_)
            | Self::UnknownOperation { .. }
            | Self::MissingParam { .. } => ErrorKind::Invalid,
        }
    }

    /// Returns whether this is a not-found error.
    #[inline]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotFound)
    }

    /// Returns whether this is a conflict error.
    #[inline]
    pub const fn is_conflict(&self) -> bool {
        matches!(self.kind(), ErrorKind::Conflict)
    }
}
