//! Structural reports of a loaded workflow.

use std::fmt;

use flow_graph::graph::{Node, NodeId, WorkflowGraph, WorkflowId};
use flow_graph::integration::IntegrationCatalog;
use serde::Serialize;

/// Summary of a single node.
#[derive(Debug, Clone, Serialize)]
pub struct NodeSummary {
    pub id: NodeId,
    /// `INTEGRATION/OPERATION`.
    pub binding: String,
    pub parents: usize,
    pub children: usize,
}

impl From<&Node> for NodeSummary {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id(),
            binding: node.value().to_string(),
            parents: node.in_degree(),
            children: node.out_degree(),
        }
    }
}

impl fmt::Display for NodeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (parents: {}, children: {})",
            self.id, self.binding, self.parents, self.children
        )
    }
}

/// Structural report of a workflow graph.
#[derive(Debug, Clone, Serialize)]
pub struct GraphReport {
    pub workflow_id: WorkflowId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub order: usize,
    pub size: usize,
    pub sources: Vec<NodeSummary>,
    pub sinks: Vec<NodeSummary>,
    /// Absent when the graph has a cycle.
    pub topological_order: Option<Vec<NodeId>>,
    /// Validation failure, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid: Option<String>,
}

impl GraphReport {
    /// Builds a report and validates the graph against `catalog`.
    pub fn new(graph: &WorkflowGraph, catalog: &IntegrationCatalog) -> Self {
        Self {
            workflow_id: graph.metadata.id,
            name: graph.metadata.name.clone(),
            order: graph.order(),
            size: graph.size(),
            sources: graph.source_nodes().iter().map(NodeSummary::from).collect(),
            sinks: graph.sink_nodes().iter().map(NodeSummary::from).collect(),
            topological_order: graph.topological_order().ok(),
            invalid: graph.validate(catalog).err().map(|e| e.to_string()),
        }
    }

    /// Returns whether the graph passed validation.
    pub fn is_valid(&self) -> bool {
        self.invalid.is_none()
    }
}

impl fmt::Display for GraphReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => writeln!(f, "Workflow: {name} ({})", self.workflow_id)?,
            None => writeln!(f, "Workflow: {}", self.workflow_id)?,
        }
        writeln!(f, "Nodes: {} - Edges: {}", self.order, self.size)?;

        writeln!(f, "Sources:")?;
        for node in &self.sources {
            writeln!(f, "  {node}")?;
        }

        writeln!(f, "Sinks:")?;
        for node in &self.sinks {
            writeln!(f, "  {node}")?;
        }

        match &self.topological_order {
            Some(order) => {
                writeln!(f, "Topological order:")?;
                for (position, id) in order.iter().enumerate() {
                    writeln!(f, "  {}. {id}", position + 1)?;
                }
            }
            None => writeln!(f, "Topological order: none (graph has a cycle)")?,
        }

        match &self.invalid {
            Some(reason) => writeln!(f, "Invalid: {reason}"),
            None => writeln!(f, "Valid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use flow_graph::binding::{NodeBinding, Param};
    use flow_graph::graph::GraphConfig;

    use super::*;

    fn tweet() -> Node {
        Node::new(
            NodeBinding::action("TWITTER_V1", "CREATE_TWEET")
                .with_param(Param::value("status", "released")),
        )
    }

    #[test]
    fn test_report_of_valid_graph() {
        let graph = WorkflowGraph::new();
        let push = graph
            .add_node(Node::new(NodeBinding::trigger("GITHUB", "PUSH")))
            .unwrap();
        let post = graph.add_node(tweet()).unwrap();
        graph.add_edge(push, post).unwrap();

        let report = GraphReport::new(&graph, &IntegrationCatalog::builtin());
        assert!(report.is_valid());
        assert_eq!(report.order, 2);
        assert_eq!(report.size, 1);
        assert_eq!(report.sources[0].id, push);
        assert_eq!(report.sinks[0].binding, "TWITTER_V1/CREATE_TWEET");
        assert_eq!(report.topological_order, Some(vec![push, post]));

        let text = report.to_string();
        assert!(text.contains("Nodes: 2 - Edges: 1"));
        assert!(text.ends_with("Valid\n"));
    }

    #[test]
    fn test_report_of_cyclic_graph() {
        let graph = WorkflowGraph::with_config(GraphConfig::new().with_allow_cycles(true));
        let a = graph.add_node(tweet()).unwrap();
        let b = graph.add_node(tweet()).unwrap();
        graph.add_edge(a, b).unwrap();
        graph.add_edge(b, a).unwrap();

        let report = GraphReport::new(&graph, &IntegrationCatalog::builtin());
        assert!(!report.is_valid());
        assert!(report.topological_order.is_none());
        assert!(report.sources.is_empty());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["topological_order"].is_null());
        assert!(json["invalid"].is_string());
    }
}
