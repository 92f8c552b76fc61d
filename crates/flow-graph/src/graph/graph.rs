//! Workflow graph runtime representation.

use std::collections::HashSet;
use std::fmt;

use parking_lot::RwLock;
use petgraph::algo::is_cyclic_directed;
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::{DfsPostOrder, Reversed};

use super::{Edge, GraphConfig, Node, NodeId};
use crate::collections::{OrderedMap, OrderedSet};
use crate::definition::{NodeRecord, WorkflowDefinition, WorkflowMetadata};
use crate::error::{GraphError, GraphResult};
use crate::integration::IntegrationCatalog;

/// Tracing target for graph operations.
pub const TRACING_TARGET: &str = "flow_graph::graph";

/// A workflow graph containing nodes and the edges between them.
///
/// All nodes live in one arena guarded by a single lock. Every structural
/// mutation holds the write guard for its full duration, so an edge change
/// never leaves one endpoint updated and the other stale. Queries hold the
/// read guard while they copy what they return; callers only ever see owned
/// snapshots.
///
/// The graph is `Send + Sync` and can be shared between threads by
/// reference or through an `Arc`.
#[derive(Debug, Default)]
pub struct WorkflowGraph {
    /// Structural policies.
    config: GraphConfig,
    /// Nodes keyed by ID, in insertion order.
    nodes: RwLock<OrderedMap<NodeId, Node>>,
    /// Workflow metadata.
    pub metadata: WorkflowMetadata,
}

impl WorkflowGraph {
    /// Creates a new empty workflow graph with the default policies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty workflow graph with the given policies.
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Creates a new empty workflow graph with metadata.
    pub fn with_metadata(metadata: WorkflowMetadata) -> Self {
        Self {
            metadata,
            ..Default::default()
        }
    }

    /// Returns the structural policies of this graph.
    #[inline]
    pub const fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Returns the number of nodes.
    pub fn order(&self) -> usize {
        self.nodes.read().len()
    }

    /// Returns the number of edges.
    ///
    /// Each edge is counted once, from its tail.
    pub fn size(&self) -> usize {
        self.nodes.read().iter_values().map(Node::out_degree).sum()
    }

    /// Returns whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }

    /// Adds a node to the graph and returns its ID.
    ///
    /// Any adjacency the node carries is dropped; edges are only created
    /// through [`add_edge`](Self::add_edge).
    pub fn add_node(&self, mut node: Node) -> GraphResult<NodeId> {
        let mut nodes = self.nodes.write();
        let id = node.id();

        if nodes.contains_key(&id) {
            return Err(GraphError::NodeExists(id));
        }

        if !self.config.has_room(nodes.len()) {
            return Err(GraphError::CapacityExceeded {
                limit: self.config.max_nodes.unwrap_or_default(),
            });
        }

        node.detach();
        nodes.put(id, node);

        tracing::debug!(
            target: TRACING_TARGET,
            node_id = %id,
            order = nodes.len(),
            "Node added",
        );

        Ok(id)
    }

    /// Removes a node and every edge that touches it.
    ///
    /// Returns the removed node with the adjacency it had at removal time.
    pub fn delete_node(&self, id: NodeId) -> GraphResult<Node> {
        let mut nodes = self.nodes.write();
        let node = nodes.remove(&id).ok_or(GraphError::NodeNotFound(id))?;

        for parent in node.parents().iter() {
            if let Some(parent) = nodes.get_mut(parent) {
                parent.unlink_child(id);
            }
        }

        for child in node.children().iter() {
            if let Some(child) = nodes.get_mut(child) {
                child.unlink_parent(id);
            }
        }

        tracing::debug!(
            target: TRACING_TARGET,
            node_id = %id,
            removed_edges = node.degree(),
            "Node deleted",
        );

        Ok(node)
    }

    /// Adds an edge from `tail` to `head`.
    ///
    /// Unless the graph allows cycles, an edge that would close one is
    /// rejected, including a self-loop.
    pub fn add_edge(&self, tail: NodeId, head: NodeId) -> GraphResult<()> {
        let mut nodes = self.nodes.write();

        let tail_node = nodes.get(&tail).ok_or(GraphError::NodeNotFound(tail))?;
        if !nodes.contains_key(&head) {
            return Err(GraphError::NodeNotFound(head));
        }

        if tail_node.has_child(head) {
            return Err(GraphError::EdgeExists { tail, head });
        }

        if !self.config.allow_cycles && closes_cycle(&nodes, tail, head) {
            tracing::debug!(
                target: TRACING_TARGET,
                %tail,
                %head,
                "Rejected edge closing a cycle",
            );
            return Err(GraphError::CycleDetected { tail, head });
        }

        node_mut(&mut nodes, tail)?.link_child(head);
        node_mut(&mut nodes, head)?.link_parent(tail);

        tracing::debug!(target: TRACING_TARGET, %tail, %head, "Edge added");
        Ok(())
    }

    /// Adds an edge.
    pub fn connect(&self, edge: Edge) -> GraphResult<()> {
        self.add_edge(edge.tail, edge.head)
    }

    /// Removes the edge from `tail` to `head`.
    pub fn delete_edge(&self, tail: NodeId, head: NodeId) -> GraphResult<()> {
        let mut nodes = self.nodes.write();

        let tail_node = nodes.get(&tail).ok_or(GraphError::NodeNotFound(tail))?;
        if !nodes.contains_key(&head) {
            return Err(GraphError::NodeNotFound(head));
        }

        if !tail_node.has_child(head) {
            return Err(GraphError::EdgeNotFound { tail, head });
        }

        node_mut(&mut nodes, tail)?.unlink_child(head);
        node_mut(&mut nodes, head)?.unlink_parent(tail);

        tracing::debug!(target: TRACING_TARGET, %tail, %head, "Edge deleted");
        Ok(())
    }

    /// Returns a snapshot of a node.
    pub fn get_node(&self, id: NodeId) -> GraphResult<Node> {
        self.nodes
            .read()
            .get(&id)
            .cloned()
            .ok_or(GraphError::NodeNotFound(id))
    }

    /// Returns whether a node exists.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.read().contains_key(&id)
    }

    /// Returns whether the edge from `tail` to `head` exists.
    pub fn contains_edge(&self, tail: NodeId, head: NodeId) -> bool {
        self.nodes
            .read()
            .get(&tail)
            .is_some_and(|node| node.has_child(head))
    }

    /// Returns snapshots of all nodes in insertion order.
    pub fn nodes(&self) -> Vec<Node> {
        self.nodes.read().values()
    }

    /// Returns all node IDs in insertion order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.read().keys()
    }

    /// Returns all edges, grouped by tail in node insertion order.
    pub fn edges(&self) -> Vec<Edge> {
        let nodes = self.nodes.read();
        nodes
            .iter()
            .flat_map(|(tail, node)| node.children().iter().map(|head| Edge::new(*tail, *head)))
            .collect()
    }

    /// Returns all nodes without incoming edges.
    pub fn source_nodes(&self) -> Vec<Node> {
        self.filter_nodes(|node| node.in_degree() == 0)
    }

    /// Returns all nodes without outgoing edges.
    pub fn sink_nodes(&self) -> Vec<Node> {
        self.filter_nodes(|node| node.out_degree() == 0)
    }

    /// Returns the children of a node in the order their edges were added.
    pub fn successors(&self, id: NodeId) -> GraphResult<Vec<Node>> {
        self.neighbors(id, Node::children)
    }

    /// Returns the parents of a node in the order their edges were added.
    pub fn predecessors(&self, id: NodeId) -> GraphResult<Vec<Node>> {
        self.neighbors(id, Node::parents)
    }

    /// Returns node IDs in topological order.
    ///
    /// Nodes come out in insertion order, except that any ancestor inserted
    /// later than a node is moved ahead of it. Fails with
    /// [`GraphError::Cyclic`] if the graph has a cycle.
    pub fn topological_order(&self) -> GraphResult<Vec<NodeId>> {
        let nodes = self.nodes.read();
        let graph = snapshot(&nodes);

        if is_cyclic_directed(&graph) {
            tracing::trace!(
                target: TRACING_TARGET,
                order = nodes.len(),
                "Topological sort hit a cycle",
            );
            return Err(GraphError::Cyclic);
        }

        // Post-order over parents emits every ancestor before the node itself.
        let reversed = Reversed(&graph);
        let mut dfs = DfsPostOrder::empty(reversed);
        let mut order = Vec::with_capacity(nodes.len());

        for (id, _) in nodes.iter() {
            dfs.move_to(*id);
            while let Some(next) = dfs.next(reversed) {
                order.push(next);
            }
        }

        Ok(order)
    }

    /// Returns whether the graph has no cycles.
    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_directed(&snapshot(&self.nodes.read()))
    }

    /// Validates the workflow against an integration catalog.
    ///
    /// Checks that:
    /// - The graph has at least one node
    /// - There is at least one trigger node
    /// - Trigger nodes have no incoming edges
    /// - The graph is acyclic
    /// - Every binding names a known integration and operation, with all
    ///   required action params present
    pub fn validate(&self, catalog: &IntegrationCatalog) -> GraphResult<()> {
        let nodes = self.nodes.read();

        if nodes.is_empty() {
            return Err(GraphError::InvalidDefinition(
                "workflow must have at least one node".into(),
            ));
        }

        if !nodes.iter_values().any(|node| node.value().is_trigger()) {
            return Err(GraphError::InvalidDefinition(
                "workflow must have at least one trigger node".into(),
            ));
        }

        if let Some(node) = nodes
            .iter_values()
            .find(|node| node.value().is_trigger() && node.in_degree() > 0)
        {
            return Err(GraphError::InvalidDefinition(format!(
                "trigger node {} must not have incoming edges",
                node.id()
            )));
        }

        if is_cyclic_directed(&snapshot(&nodes)) {
            return Err(GraphError::Cyclic);
        }

        for node in nodes.iter_values() {
            catalog.check(node)?;
        }

        tracing::trace!(
            target: TRACING_TARGET,
            workflow_id = %self.metadata.id,
            order = nodes.len(),
            "Workflow validated",
        );

        Ok(())
    }

    /// Converts the workflow graph to a serializable definition.
    pub fn to_definition(&self) -> WorkflowDefinition {
        WorkflowDefinition {
            metadata: self.metadata.clone(),
            nodes: self
                .nodes
                .read()
                .iter_values()
                .map(NodeRecord::from)
                .collect(),
        }
    }

    /// Creates a workflow graph from a definition with the default policies.
    ///
    /// Returns an error if any record references a non-existent node.
    pub fn from_definition(definition: WorkflowDefinition) -> GraphResult<Self> {
        Self::from_definition_with_config(definition, GraphConfig::default())
    }

    /// Creates a workflow graph from a definition with the given policies.
    ///
    /// Every node is added first. Edges are then taken from both the
    /// `children_ids` and `parent_ids` of each record, so an edge listed on
    /// either side (or both) is created once.
    pub fn from_definition_with_config(
        definition: WorkflowDefinition,
        config: GraphConfig,
    ) -> GraphResult<Self> {
        let mut graph = Self::with_config(config);
        graph.metadata = definition.metadata;

        for record in &definition.nodes {
            graph.add_node(record.to_node())?;
        }

        for record in &definition.nodes {
            let outgoing = record.children_ids.iter().map(|head| (record.id, *head));
            let incoming = record.parent_ids.iter().map(|tail| (*tail, record.id));

            for (tail, head) in outgoing.chain(incoming) {
                if !graph.contains_edge(tail, head) {
                    graph.add_edge(tail, head)?;
                }
            }
        }

        tracing::debug!(
            target: TRACING_TARGET,
            workflow_id = %graph.metadata.id,
            order = graph.order(),
            size = graph.size(),
            "Workflow graph loaded from definition",
        );

        Ok(graph)
    }

    fn filter_nodes(&self, predicate: impl Fn(&Node) -> bool) -> Vec<Node> {
        self.nodes
            .read()
            .iter_values()
            .filter(|node| predicate(node))
            .cloned()
            .collect()
    }

    fn neighbors(
        &self,
        id: NodeId,
        adjacency: impl Fn(&Node) -> &OrderedSet<NodeId>,
    ) -> GraphResult<Vec<Node>> {
        let nodes = self.nodes.read();
        let node = nodes.get(&id).ok_or(GraphError::NodeNotFound(id))?;

        Ok(adjacency(node)
            .iter()
            .filter_map(|neighbor| nodes.get(neighbor).cloned())
            .collect())
    }
}

impl Clone for WorkflowGraph {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            nodes: RwLock::new(self.nodes.read().clone()),
            metadata: self.metadata.clone(),
        }
    }
}

impl fmt::Display for WorkflowGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes = self.nodes.read();
        let size: usize = nodes.iter_values().map(Node::out_degree).sum();

        writeln!(f, "DAG Nodes: {} - Edges: {}", nodes.len(), size)?;
        writeln!(f, "Vertices:")?;
        for node in nodes.iter_values() {
            writeln!(f, "{node}")?;
        }
        Ok(())
    }
}

fn node_mut(nodes: &mut OrderedMap<NodeId, Node>, id: NodeId) -> GraphResult<&mut Node> {
    nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))
}

/// Builds a petgraph view of the arena, nodes in insertion order.
fn snapshot(nodes: &OrderedMap<NodeId, Node>) -> DiGraphMap<NodeId, ()> {
    let mut graph = DiGraphMap::with_capacity(nodes.len(), 0);
    for (id, _) in nodes.iter() {
        graph.add_node(*id);
    }
    for (tail, node) in nodes.iter() {
        for head in node.children().iter() {
            graph.add_edge(*tail, *head, ());
        }
    }
    graph
}

/// Returns whether an edge from `tail` to `head` would close a cycle, that
/// is whether `tail` is already reachable from `head`.
fn closes_cycle(nodes: &OrderedMap<NodeId, Node>, tail: NodeId, head: NodeId) -> bool {
    let mut visited = HashSet::new();
    let mut stack = vec![head];

    while let Some(id) = stack.pop() {
        if id == tail {
            return true;
        }
        if !visited.insert(id) {
            continue;
        }
        if let Some(node) = nodes.get(&id) {
            stack.extend(
                node.children()
                    .iter()
                    .filter(|child| !visited.contains(*child))
                    .copied(),
            );
        }
    }

    false
}
