//! Command implementations.
//!
//! Commands write their output to the given writer so they can be run
//! against a buffer.

use std::fs;
use std::io::Write;

use anyhow::{Context, bail};
use flow_graph::definition::WorkflowDefinition;
use flow_graph::graph::WorkflowGraph;
use flow_graph::integration::IntegrationCatalog;

use crate::TRACING_TARGET_COMMAND;
use crate::config::{InspectArgs, OutputFormat};
use crate::report::GraphReport;

/// Loads a definition, prints its report and fails if it is invalid.
pub fn inspect(
    args: &InspectArgs,
    catalog: &IntegrationCatalog,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let content = fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let definition = WorkflowDefinition::from_json(&content)
        .with_context(|| format!("failed to parse {}", args.path.display()))?;

    let graph = WorkflowGraph::from_definition_with_config(definition, args.graph.to_config())
        .with_context(|| format!("failed to build workflow graph from {}", args.path.display()))?;

    let report = GraphReport::new(&graph, catalog);
    tracing::info!(
        target: TRACING_TARGET_COMMAND,
        path = %args.path.display(),
        workflow_id = %report.workflow_id,
        order = report.order,
        size = report.size,
        valid = report.is_valid(),
        "Workflow inspected"
    );

    match format {
        OutputFormat::Text => write!(out, "{report}")?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?,
    }

    if let Some(reason) = &report.invalid {
        bail!("workflow {} is invalid: {reason}", report.workflow_id);
    }

    Ok(())
}

/// Lists the catalog.
pub fn integrations(
    catalog: &IntegrationCatalog,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    tracing::debug!(
        target: TRACING_TARGET_COMMAND,
        integrations = catalog.len(),
        "Listing integrations"
    );

    match format {
        OutputFormat::Text => {
            for integration in catalog.iter() {
                writeln!(out, "{} - {}", integration.key, integration.label)?;
                for trigger in &integration.triggers {
                    writeln!(out, "  trigger {} - {}", trigger.key, trigger.label)?;
                }
                for action in &integration.actions {
                    writeln!(out, "  action  {} - {}", action.key, action.label)?;
                }
            }
        }
        OutputFormat::Json => {
            let integrations: Vec<_> = catalog.iter().collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&integrations)?)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use flow_graph::binding::{NodeBinding, Param};
    use flow_graph::definition::NodeRecord;
    use flow_graph::graph::NodeId;

    use super::*;
    use crate::config::GraphArgs;

    fn write_definition(dir: &Path, definition: &WorkflowDefinition) -> std::path::PathBuf {
        let path = dir.join("workflow.json");
        fs::write(&path, definition.to_json().unwrap()).unwrap();
        path
    }

    fn inspect_args(path: std::path::PathBuf) -> InspectArgs {
        InspectArgs {
            path,
            graph: GraphArgs::default(),
        }
    }

    fn tweet(id: NodeId) -> NodeRecord {
        NodeRecord::new(
            id,
            NodeBinding::action("TWITTER_V1", "CREATE_TWEET")
                .with_param(Param::value("status", "released")),
        )
    }

    #[test]
    fn test_inspect_valid_definition() {
        let dir = tempfile::tempdir().unwrap();
        let push = NodeId::new();
        let post = NodeId::new();
        let definition = WorkflowDefinition::new()
            .with_node(NodeRecord::new(push, NodeBinding::trigger("GITHUB", "PUSH")).with_children([post]))
            .with_node(tweet(post));
        let args = inspect_args(write_definition(dir.path(), &definition));

        let mut out = Vec::new();
        inspect(&args, &IntegrationCatalog::builtin(), OutputFormat::Json, &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["order"], 2);
        assert_eq!(json["size"], 1);
        assert_eq!(json["topological_order"][0], push.to_string());
    }

    #[test]
    fn test_inspect_invalid_definition_fails_after_report() {
        let dir = tempfile::tempdir().unwrap();
        let definition = WorkflowDefinition::new().with_node(tweet(NodeId::new()));
        let args = inspect_args(write_definition(dir.path(), &definition));

        let mut out = Vec::new();
        let err = inspect(&args, &IntegrationCatalog::builtin(), OutputFormat::Text, &mut out)
            .unwrap_err();

        assert!(err.to_string().contains("trigger"));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Invalid: "));
    }

    #[test]
    fn test_inspect_cycle_needs_allow_cycles() {
        let dir = tempfile::tempdir().unwrap();
        let a = NodeId::new();
        let b = NodeId::new();
        let definition = WorkflowDefinition::new()
            .with_node(tweet(a).with_children([b]))
            .with_node(tweet(b).with_children([a]));
        let mut args = inspect_args(write_definition(dir.path(), &definition));

        let mut out = Vec::new();
        let err = inspect(&args, &IntegrationCatalog::builtin(), OutputFormat::Text, &mut out)
            .unwrap_err();
        assert!(err.to_string().contains("failed to build workflow graph"));
        assert!(out.is_empty());

        args.graph.allow_cycles = true;
        let result = inspect(&args, &IntegrationCatalog::builtin(), OutputFormat::Text, &mut out);
        assert!(result.is_err());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Topological order: none"));
    }

    #[test]
    fn test_inspect_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let args = inspect_args(dir.path().join("absent.json"));

        let mut out = Vec::new();
        let err = inspect(&args, &IntegrationCatalog::builtin(), OutputFormat::Text, &mut out)
            .unwrap_err();
        assert!(err.to_string().starts_with("failed to read"));
    }

    #[test]
    fn test_integrations_listing() {
        let catalog = IntegrationCatalog::builtin();

        let mut out = Vec::new();
        integrations(&catalog, OutputFormat::Text, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("TWITTER_V1 - Twitter\n"));
        assert!(text.contains("  action  CREATE_TWEET - Create Tweet"));
        assert!(text.contains("  trigger PUSH - Push"));

        let mut out = Vec::new();
        integrations(&catalog, OutputFormat::Json, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
    }
}
