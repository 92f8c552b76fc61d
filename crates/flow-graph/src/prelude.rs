//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types for ergonomic imports:
//!
//! ```rust
//! use flow_graph::prelude::*;
//! ```

pub use crate::binding::{ActionBinding, NodeBinding, Param, ParamType, TriggerBinding};
pub use crate::collections::{OrderedMap, OrderedSet};
pub use crate::definition::{NodeRecord, WorkflowDefinition, WorkflowMetadata};
pub use crate::error::{ErrorKind, GraphError, GraphResult};
pub use crate::graph::{Edge, GraphConfig, Node, NodeId, WorkflowGraph, WorkflowId};
pub use crate::integration::IntegrationCatalog;
