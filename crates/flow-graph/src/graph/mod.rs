//! Workflow graph structures.
//!
//! This module provides the graph representation for workflows:
//! - [`WorkflowGraph`]: The graph owning every node of one workflow
//! - [`Node`]: A vertex bound to an integration trigger or action
//! - [`Edge`]: A directed dependency between two nodes
//! - [`GraphConfig`]: Structural policies (cycles, node limit)
//! - [`NodeId`], [`WorkflowId`]: Unique identifiers

mod config;
mod edge;
mod graph;
mod id;
mod node;

pub use config::GraphConfig;
pub use edge::Edge;
pub use graph::{TRACING_TARGET, WorkflowGraph};
pub use id::{NodeId, WorkflowId};
pub use node::Node;
