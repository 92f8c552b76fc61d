//! Graph configuration.

use serde::{Deserialize, Serialize};

/// Structural policies applied by a [`WorkflowGraph`](super::WorkflowGraph).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Accept edges that close a cycle. Off by default: workflows are DAGs.
    #[serde(default)]
    pub allow_cycles: bool,
    /// Maximum number of nodes the graph accepts (unbounded if not set).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<usize>,
}

impl GraphConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow or reject edges that close a cycle.
    #[must_use]
    pub fn with_allow_cycles(mut self, allow: bool) -> Self {
        self.allow_cycles = allow;
        self
    }

    /// Set the maximum number of nodes.
    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Returns whether one more node fits next to `order` existing nodes.
    #[inline]
    #[must_use]
    pub fn has_room(&self, order: usize) -> bool {
        self.max_nodes.is_none_or(|max| order < max)
    }

    /// Validate the configuration and return any issues.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_nodes == Some(0) {
            return Err("Maximum node count cannot be zero".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config() {
        let config = GraphConfig::new();
        assert!(!config.allow_cycles);
        assert!(config.has_room(usize::MAX - 1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = GraphConfig::new().with_allow_cycles(true).with_max_nodes(2);
        assert!(config.allow_cycles);
        assert!(config.has_room(1));
        assert!(!config.has_room(2));
    }

    #[test]
    fn test_config_validation() {
        assert!(GraphConfig::new().with_max_nodes(0).validate().is_err());
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: GraphConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GraphConfig::default());
    }
}
