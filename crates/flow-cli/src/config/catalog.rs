//! Integration catalog configuration.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use flow_graph::integration::{Integration, IntegrationCatalog};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Integration catalog configuration.
///
/// # Environment Variables
///
/// - `FLOW_CATALOG` - JSON file with extra integrations (optional)
#[derive(Debug, Clone, Default, Args, Serialize, Deserialize)]
pub struct CatalogArgs {
    /// JSON file holding an array of integrations registered on top of the
    /// built-in ones. An entry with a built-in key replaces it.
    #[arg(long = "catalog", env = "FLOW_CATALOG", value_name = "FILE", global = true)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl CatalogArgs {
    /// Builds the catalog.
    pub fn load(&self) -> anyhow::Result<IntegrationCatalog> {
        let mut catalog = IntegrationCatalog::builtin();

        let Some(path) = &self.path else {
            return Ok(catalog);
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        let extra: Vec<Integration> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse catalog {}", path.display()))?;

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            path = %path.display(),
            integrations = extra.len(),
            "Loaded integration catalog"
        );

        for integration in extra {
            catalog.register(integration);
        }

        Ok(catalog)
    }
}
