//! Workflow metadata.

use jiff::Timestamp;
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::graph::WorkflowId;

/// Workflow metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkflowMetadata {
    /// Workflow identifier.
    #[serde(default)]
    pub id: WorkflowId,
    /// Workflow name (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Workflow description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Workflow version (semver, optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
    /// Creation timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// Last update timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl WorkflowMetadata {
    /// Creates new metadata with a fresh workflow ID.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the workflow name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the workflow description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the workflow version.
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Stamps creation and update times with the current time.
    pub fn with_timestamps_now(mut self) -> Self {
        let now = Timestamp::now();
        self.created_at = Some(now);
        self.updated_at = Some(now);
        self
    }
}
