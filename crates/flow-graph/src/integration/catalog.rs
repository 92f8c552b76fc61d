//! Catalog of known integrations.

use super::types::{Action, FieldType, InputField, Integration, OutputField, Trigger};
use crate::binding::NodeBinding;
use crate::collections::OrderedMap;
use crate::error::{GraphError, GraphResult};
use crate::graph::Node;

/// Integrations keyed by their key, listed in registration order.
#[derive(Debug, Clone, Default)]
pub struct IntegrationCatalog {
    integrations: OrderedMap<String, Integration>,
}

impl IntegrationCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the integrations shipped with Flow.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register(twitter_v1());
        catalog.register(github());
        catalog
    }

    /// Registers an integration, replacing any with the same key.
    pub fn register(&mut self, integration: Integration) {
        tracing::trace!(
            target: crate::TRACING_TARGET,
            integration = %integration.key,
            triggers = integration.triggers.len(),
            actions = integration.actions.len(),
            "Integration registered",
        );
        self.integrations.put(integration.key.clone(), integration);
    }

    /// Returns the integration with the given key.
    pub fn get(&self, key: &str) -> GraphResult<&Integration> {
        self.integrations
            .get(key)
            .ok_or_else(|| GraphError::UnknownIntegration(key.to_owned()))
    }

    /// Iterates over all integrations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Integration> + '_ {
        self.integrations.iter_values()
    }

    /// Returns the number of registered integrations.
    pub fn len(&self) -> usize {
        self.integrations.len()
    }

    /// Returns whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.integrations.is_empty()
    }

    /// Checks that a node's binding names a known operation and that every
    /// required action input has a param.
    pub fn check(&self, node: &Node) -> GraphResult<()> {
        match node.value() {
            NodeBinding::Trigger(binding) => {
                let integration = self.get(&binding.integration)?;
                integration
                    .trigger(&binding.trigger)
                    .ok_or_else(|| GraphError::UnknownOperation {
                        integration: binding.integration.clone(),
                        key: binding.trigger.clone(),
                    })?;
            }
            NodeBinding::Action(binding) => {
                let integration = self.get(&binding.integration)?;
                let action = integration.action(&binding.action).ok_or_else(|| {
                    GraphError::UnknownOperation {
                        integration: binding.integration.clone(),
                        key: binding.action.clone(),
                    }
                })?;

                if let Some(input) = action
                    .required_inputs()
                    .find(|input| binding.param(&input.key).is_none())
                {
                    return Err(GraphError::MissingParam {
                        node_id: node.id(),
                        key: input.key.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl FromIterator<Integration> for IntegrationCatalog {
    fn from_iter<I: IntoIterator<Item = Integration>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for integration in iter {
            catalog.register(integration);
        }
        catalog
    }
}

fn twitter_v1() -> Integration {
    Integration {
        key: "TWITTER_V1".into(),
        label: "Twitter".into(),
        description: "Integrate with the Twitter V1 API.".into(),
        base_url: "https://api.twitter.com/1.1".into(),
        triggers: vec![Trigger {
            key: "MY_TWEET".into(),
            label: "My Tweet".into(),
            description: "Triggers when you tweet something new.".into(),
            endpoint: String::new(),
            method: String::new(),
            outputs: vec![
                OutputField::new("id", "Tweet ID", FieldType::String, "id_str"),
                OutputField::new("text", "Text", FieldType::String, "text"),
                OutputField::new("created_at", "Created at", FieldType::DateTime, "created_at"),
            ],
        }],
        actions: vec![Action {
            key: "CREATE_TWEET".into(),
            label: "Create Tweet".into(),
            description: "Updates the authenticating user's current status.".into(),
            endpoint: "/statuses/update.json".into(),
            method: "JSON_HTTP_POST".into(),
            inputs: vec![
                InputField::new("status", "Status", FieldType::String)
                    .required()
                    .with_description(
                        "The text of the status update. URL encode as necessary. \
                         t.co link wrapping will affect character counts.",
                    ),
                InputField::new(
                    "in_reply_to_status_id",
                    "In reply to status ID",
                    FieldType::Number,
                )
                .with_description(
                    "The ID of an existing status that the update is in reply to. \
                     Ignored unless the author of the referenced Tweet is mentioned \
                     within the status text.",
                ),
                InputField::new(
                    "auto_populate_reply_metadata",
                    "Auto-populate reply metadata",
                    FieldType::Boolean,
                )
                .with_description(
                    "If set to true and used with in_reply_to_status_id, leading \
                     @mentions will be looked up from the original Tweet and added \
                     to the new Tweet.",
                )
                .with_example("true"),
                InputField::new(
                    "exclude_reply_user_ids",
                    "Exclude reply user IDs",
                    FieldType::String,
                )
                .with_description(
                    "When used with auto_populate_reply_metadata, a comma-separated \
                     list of user ids removed from the server-generated @mentions \
                     prefix. The leading @mention cannot be removed.",
                )
                .with_example("786491,54931584"),
                InputField::new("attachment_url", "Attachment URL", FieldType::String)
                    .with_description(
                        "A Tweet permalink or Direct Message deep link attached to the \
                         Tweet so it does not count towards the status text.",
                    )
                    .with_example("https://twitter.com/andypiper/status/903615884664725505"),
                InputField::new("media_ids", "Media IDs", FieldType::String)
                    .with_description(
                        "A comma-delimited list of media_ids to associate with the \
                         Tweet. Up to 4 photos, 1 animated GIF or 1 video.",
                    )
                    .with_example("471592142565957632"),
                InputField::new("possibly_sensitive", "Possibly sensitive", FieldType::Boolean)
                    .with_description(
                        "Must be set to true when uploading media that might be \
                         considered sensitive content.",
                    )
                    .with_example("true"),
                InputField::new("lat", "Latitude", FieldType::Number)
                    .with_description(
                        "The latitude of the location this Tweet refers to, from -90.0 \
                         to +90.0. Ignored without a corresponding long.",
                    )
                    .with_example("37.7821120598956"),
                InputField::new("long", "Longitude", FieldType::Number)
                    .with_description(
                        "The longitude of the location this Tweet refers to, from \
                         -180.0 to +180.0. Ignored without a corresponding lat.",
                    )
                    .with_example("-122.400612831116"),
                InputField::new("place_id", "Place ID", FieldType::String)
                    .with_description("A place in the world.")
                    .with_example("df51dec6f4ee2b2c"),
                InputField::new(
                    "display_coordinates",
                    "Display coordinates",
                    FieldType::Boolean,
                )
                .with_description(
                    "Whether or not to put a pin on the exact coordinates a Tweet \
                     has been sent from.",
                )
                .with_example("true"),
                InputField::new("trim_user", "Trim user", FieldType::Boolean)
                    .with_description(
                        "When true, the response includes a user object with only the \
                         author's ID.",
                    )
                    .with_example("true"),
                InputField::new(
                    "enable_dmcommands",
                    "Enable direct message commands",
                    FieldType::Boolean,
                )
                .with_description(
                    "When true, enables shortcode commands for sending Direct \
                     Messages as part of the status text.",
                )
                .with_example("true"),
                InputField::new(
                    "fail_dmcommands",
                    "Fail direct message commands",
                    FieldType::Boolean,
                )
                .with_description(
                    "When true, status text that starts with shortcode commands \
                     returns an API error.",
                )
                .with_example("false"),
                InputField::new("card_uri", "Card URI", FieldType::String)
                    .with_description(
                        "Associate an ads card with the Tweet using the card_uri value \
                         from any ads card response.",
                    )
                    .with_example("card://853503245793641682"),
            ],
            outputs: vec![OutputField::new(
                "id",
                "Tweet ID",
                FieldType::String,
                "id_str",
            )],
        }],
    }
}

fn github() -> Integration {
    Integration {
        key: "GITHUB".into(),
        label: "GitHub".into(),
        description: "Integration with the GitHub API.".into(),
        base_url: "https://api.github.com".into(),
        triggers: vec![Trigger {
            key: "PUSH".into(),
            label: "Push".into(),
            description: "Occurs when one or more commits are pushed to a repository branch or tag."
                .into(),
            endpoint: String::new(),
            method: String::new(),
            outputs: vec![
                OutputField::new("ref", "Ref", FieldType::String, "ref"),
                OutputField::new("repository", "Repository", FieldType::Complex, "repository"),
                OutputField::new("commits", "Commits", FieldType::Complex, "commits"),
            ],
        }],
        actions: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Param;

    #[test]
    fn test_builtin_catalog() {
        let catalog = IntegrationCatalog::builtin();
        assert_eq!(catalog.len(), 2);

        let keys: Vec<_> = catalog.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["TWITTER_V1", "GITHUB"]);

        let twitter = catalog.get("TWITTER_V1").unwrap();
        assert!(twitter.trigger("MY_TWEET").is_some());
        assert!(twitter.action("CREATE_TWEET").is_some());
    }

    #[test]
    fn test_create_tweet_inputs() {
        let catalog = IntegrationCatalog::builtin();
        let action = catalog
            .get("TWITTER_V1")
            .unwrap()
            .action("CREATE_TWEET")
            .unwrap();

        assert_eq!(action.inputs.len(), 15);
        let required: Vec<_> = action.required_inputs().map(|i| i.key.as_str()).collect();
        assert_eq!(required, vec!["status"]);

        for key in [
            "exclude_reply_user_ids",
            "attachment_url",
            "display_coordinates",
            "trim_user",
            "enable_dmcommands",
            "fail_dmcommands",
            "card_uri",
        ] {
            let input = action.inputs.iter().find(|i| i.key == key);
            assert!(input.is_some_and(|i| !i.required && i.example.is_some()), "{key}");
        }
    }

    #[test]
    fn test_unknown_integration() {
        let catalog = IntegrationCatalog::builtin();
        let err = catalog.get("SLACK").unwrap_err();
        assert_eq!(err, GraphError::UnknownIntegration("SLACK".into()));
    }

    #[test]
    fn test_check_bindings() {
        let catalog = IntegrationCatalog::builtin();

        let push = Node::new(NodeBinding::trigger("GITHUB", "PUSH"));
        assert!(catalog.check(&push).is_ok());

        let bogus = Node::new(NodeBinding::trigger("GITHUB", "RELEASE"));
        assert!(matches!(
            catalog.check(&bogus),
            Err(GraphError::UnknownOperation { .. })
        ));

        let tweet = Node::new(
            NodeBinding::action("TWITTER_V1", "CREATE_TWEET")
                .with_param(Param::value("status", "shipped")),
        );
        assert!(catalog.check(&tweet).is_ok());

        let bare = Node::new(NodeBinding::action("TWITTER_V1", "CREATE_TWEET"));
        let err = catalog.check(&bare).unwrap_err();
        assert_eq!(
            err,
            GraphError::MissingParam {
                node_id: bare.id(),
                key: "status".into(),
            }
        );
    }

    #[test]
    fn test_catalog_serializes_field_types() {
        let catalog = IntegrationCatalog::builtin();
        let twitter = catalog.get("TWITTER_V1").unwrap();
        let json = serde_json::to_value(twitter).unwrap();

        assert_eq!(json["triggers"][0]["outputs"][2]["type"], "datetime");
        assert_eq!(json["actions"][0]["inputs"][0]["required"], true);
    }
}
