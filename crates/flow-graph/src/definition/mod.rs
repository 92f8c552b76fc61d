//! Serializable workflow definition.
//!
//! This is the JSON-friendly representation of a workflow graph used by the
//! persistence and HTTP layers. Use [`WorkflowGraph::to_definition`] and
//! [`WorkflowGraph::from_definition`] to convert between the two.

mod metadata;
mod record;

pub use metadata::WorkflowMetadata;
pub use record::NodeRecord;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::graph::{GraphConfig, WorkflowGraph};

/// Serializable workflow definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    /// Workflow metadata.
    #[serde(default)]
    pub metadata: WorkflowMetadata,
    /// Nodes with their adjacency.
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
}

impl WorkflowDefinition {
    /// Creates a new empty workflow definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a workflow definition with metadata.
    pub fn with_metadata(metadata: WorkflowMetadata) -> Self {
        Self {
            metadata,
            nodes: Vec::new(),
        }
    }

    /// Appends a node record.
    pub fn with_node(mut self, record: NodeRecord) -> Self {
        self.nodes.push(record);
        self
    }

    /// Parses a definition from JSON.
    pub fn from_json(json: &str) -> GraphResult<Self> {
        serde_json::from_str(json).map_err(|e| GraphError::InvalidDefinition(e.to_string()))
    }

    /// Serializes the definition to pretty-printed JSON.
    pub fn to_json(&self) -> GraphResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| GraphError::InvalidDefinition(e.to_string()))
    }

    /// Converts this definition into a workflow graph.
    pub fn into_graph(self) -> GraphResult<WorkflowGraph> {
        WorkflowGraph::from_definition(self)
    }

    /// Converts this definition into a workflow graph with the given policies.
    pub fn into_graph_with_config(self, config: GraphConfig) -> GraphResult<WorkflowGraph> {
        WorkflowGraph::from_definition_with_config(self, config)
    }
}

impl TryFrom<WorkflowDefinition> for WorkflowGraph {
    type Error = GraphError;

    fn try_from(definition: WorkflowDefinition) -> Result<Self, Self::Error> {
        Self::from_definition(definition)
    }
}

impl From<&WorkflowGraph> for WorkflowDefinition {
    fn from(graph: &WorkflowGraph) -> Self {
        graph.to_definition()
    }
}

impl From<WorkflowGraph> for WorkflowDefinition {
    fn from(graph: WorkflowGraph) -> Self {
        graph.to_definition()
    }
}
