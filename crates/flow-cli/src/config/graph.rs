//! Graph policy configuration.

use anyhow::anyhow;
use clap::Args;
use flow_graph::graph::GraphConfig;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Graph policies applied when loading a workflow definition.
///
/// # Environment Variables
///
/// - `FLOW_ALLOW_CYCLES` - Accept edges that close a cycle (default: false)
/// - `FLOW_MAX_NODES` - Maximum number of nodes (default: unbounded)
#[derive(Debug, Clone, Default, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct GraphArgs {
    /// Accept edges that close a cycle.
    ///
    /// Workflows are expected to be acyclic; enable this to inspect
    /// definitions that are not.
    #[arg(long, env = "FLOW_ALLOW_CYCLES")]
    #[serde(default)]
    pub allow_cycles: bool,

    /// Maximum number of nodes the graph accepts.
    #[arg(long, env = "FLOW_MAX_NODES")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<usize>,
}

impl GraphArgs {
    /// Builds the graph configuration.
    pub fn to_config(&self) -> GraphConfig {
        let config = GraphConfig::new().with_allow_cycles(self.allow_cycles);
        match self.max_nodes {
            Some(max_nodes) => config.with_max_nodes(max_nodes),
            None => config,
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.to_config()
            .validate()
            .map_err(|e| anyhow!("invalid graph configuration: {e}"))
    }

    /// Logs the configuration.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            allow_cycles = self.allow_cycles,
            max_nodes = ?self.max_nodes,
            "Graph configuration"
        );
    }
}
