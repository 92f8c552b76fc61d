//! Integration descriptor types.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Type of an input or output field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldType {
    Number,
    String,
    Boolean,
    /// RFC 3339 timestamp.
    #[serde(rename = "datetime")]
    #[strum(serialize = "datetime")]
    DateTime,
    Complex,
}

/// An input accepted by an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputField {
    /// Key matched against a node param.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Longer help text.
    #[serde(default)]
    pub description: String,
    /// Whether an action node must provide a param for this field.
    #[serde(default)]
    pub required: bool,
    /// Value type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Value used when no param is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Example value shown to users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl InputField {
    /// Creates an optional input field.
    pub fn new(key: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: String::new(),
            required: false,
            field_type,
            default: None,
            example: None,
        }
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets an example value.
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }
}

/// An output produced by a trigger or action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputField {
    /// Key downstream params reference.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Longer help text.
    #[serde(default)]
    pub description: String,
    /// Value type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Location of the value in the response payload.
    #[serde(default)]
    pub path: String,
}

impl OutputField {
    /// Creates an output field read from `path`.
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        field_type: FieldType,
        path: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: String::new(),
            field_type,
            path: path.into(),
        }
    }
}

/// An event source exposed by an integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    /// Trigger key, e.g. `PUSH`.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Longer help text.
    #[serde(default)]
    pub description: String,
    /// Path relative to the integration base URL, empty for push-based
    /// triggers.
    #[serde(default)]
    pub endpoint: String,
    /// Request method, empty for push-based triggers.
    #[serde(default)]
    pub method: String,
    /// Values the trigger emits.
    #[serde(default)]
    pub outputs: Vec<OutputField>,
}

/// An operation exposed by an integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Action key, e.g. `CREATE_TWEET`.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Longer help text.
    #[serde(default)]
    pub description: String,
    /// Path relative to the integration base URL.
    #[serde(default)]
    pub endpoint: String,
    /// Request method, e.g. `JSON_HTTP_POST`.
    #[serde(default)]
    pub method: String,
    /// Inputs filled by node params.
    #[serde(default)]
    pub inputs: Vec<InputField>,
    /// Values the action returns.
    #[serde(default)]
    pub outputs: Vec<OutputField>,
}

impl Action {
    /// Iterates over the inputs that must be given a param.
    pub fn required_inputs(&self) -> impl Iterator<Item = &InputField> + '_ {
        self.inputs.iter().filter(|input| input.required)
    }
}

/// A third-party service that workflow nodes bind to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    /// Integration key, e.g. `TWITTER_V1`.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Longer help text.
    #[serde(default)]
    pub description: String,
    /// Base URL action and trigger endpoints are relative to.
    #[serde(default)]
    pub base_url: String,
    /// Event sources.
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    /// Operations.
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Integration {
    /// Returns the trigger with the given key.
    pub fn trigger(&self, key: &str) -> Option<&Trigger> {
        self.triggers.iter().find(|trigger| trigger.key == key)
    }

    /// Returns the action with the given key.
    pub fn action(&self, key: &str) -> Option<&Action> {
        self.actions.iter().find(|action| action.key == key)
    }
}
