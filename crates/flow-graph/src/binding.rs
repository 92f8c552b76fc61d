//! Integration bindings carried by workflow nodes.
//!
//! A node is bound either to a trigger (an event source that starts the
//! workflow) or to an action (a call made against an integration). The graph
//! never interprets the binding; it is carried so that an execution engine can
//! dispatch on it.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// How a parameter value is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ParamType {
    /// The value is used literally.
    #[default]
    Value,
    /// The value references an output of an upstream node.
    Reference,
}

/// A keyed parameter passed to an action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Param {
    /// Input field key this parameter fills.
    pub key: String,
    /// Literal value or reference expression.
    pub value: String,
    /// How `value` is interpreted.
    #[serde(rename = "type", default)]
    pub param_type: ParamType,
}

impl Param {
    /// Creates a literal parameter.
    pub fn value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            param_type: ParamType::Value,
        }
    }

    /// Creates a parameter referencing an upstream output.
    pub fn reference(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            param_type: ParamType::Reference,
        }
    }
}

/// Binding of a node to an integration trigger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerBinding {
    /// Integration key, e.g. `GITHUB`.
    pub integration: String,
    /// Trigger key within the integration, e.g. `PUSH`.
    ///
    /// Serialized as `action` so every node carries its operation key under
    /// the same name; `trigger` is accepted on input.
    #[serde(rename = "action", alias = "trigger")]
    pub trigger: String,
}

/// Binding of a node to an integration action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionBinding {
    /// Integration key, e.g. `TWITTER_V1`.
    pub integration: String,
    /// Action key within the integration, e.g. `CREATE_TWEET`.
    pub action: String,
    /// Parameters for the action inputs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
}

impl ActionBinding {
    /// Returns the parameter for `key`, if set.
    pub fn param(&self, key: &str) -> Option<&Param> {
        self.params.iter().find(|param| param.key == key)
    }
}

/// Payload carried by every workflow node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeBinding {
    /// Node started by an integration event.
    Trigger(TriggerBinding),
    /// Node that runs an integration action.
    Action(ActionBinding),
}

impl NodeBinding {
    /// Creates a trigger binding.
    pub fn trigger(integration: impl Into<String>, trigger: impl Into<String>) -> Self {
        Self::Trigger(TriggerBinding {
            integration: integration.into(),
            trigger: trigger.into(),
        })
    }

    /// Creates an action binding without parameters.
    pub fn action(integration: impl Into<String>, action: impl Into<String>) -> Self {
        Self::Action(ActionBinding {
            integration: integration.into(),
            action: action.into(),
            params: Vec::new(),
        })
    }

    /// Adds a parameter; has no effect on trigger bindings.
    pub fn with_param(mut self, param: Param) -> Self {
        if let Self::Action(action) = &mut self {
            action.params.push(param);
        }
        self
    }

    /// Returns the integration key.
    pub fn integration(&self) -> &str {
        match self {
            Self::Trigger(t) => &t.integration,
            Self::Action(a) => &a.integration,
        }
    }

    /// Returns the trigger or action key.
    pub fn operation(&self) -> &str {
        match self {
            Self::Trigger(t) => &t.trigger,
            Self::Action(a) => &a.action,
        }
    }

    /// Returns whether this is a trigger binding.
    pub const fn is_trigger(&self) -> bool {
        matches!(self, Self::Trigger(_))
    }

    /// Returns whether this is an action binding.
    pub const fn is_action(&self) -> bool {
        matches!(self, Self::Action(_))
    }
}

impl fmt::Display for NodeBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.integration(), self.operation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_accessors() {
        let trigger = NodeBinding::trigger("GITHUB", "PUSH");
        assert!(trigger.is_trigger());
        assert_eq!(trigger.integration(), "GITHUB");
        assert_eq!(trigger.operation(), "PUSH");
        assert_eq!(trigger.to_string(), "GITHUB/PUSH");

        let action = NodeBinding::action("TWITTER_V1", "CREATE_TWEET")
            .with_param(Param::value("status", "hello"));
        assert!(action.is_action());
        let NodeBinding::Action(inner) = &action else {
            panic!("expected action binding");
        };
        assert_eq!(inner.param("status").map(|p| p.value.as_str()), Some("hello"));
    }

    #[test]
    fn test_binding_json_shape() {
        let action = NodeBinding::action("TWITTER_V1", "CREATE_TWEET")
            .with_param(Param::reference("status", "trigger.message"));
        let json = serde_json::to_value(&action).unwrap();

        assert_eq!(json["kind"], "action");
        assert_eq!(json["integration"], "TWITTER_V1");
        assert_eq!(json["action"], "CREATE_TWEET");
        assert_eq!(json["params"][0]["type"], "reference");

        let back: NodeBinding = serde_json::from_value(json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn test_trigger_json_uses_action_key() {
        let trigger = NodeBinding::trigger("GITHUB", "PUSH");
        let json = serde_json::to_value(&trigger).unwrap();

        assert_eq!(json["kind"], "trigger");
        assert_eq!(json["action"], "PUSH");
        assert!(json.get("trigger").is_none());

        let back: NodeBinding = serde_json::from_value(json).unwrap();
        assert_eq!(back, trigger);

        let legacy = serde_json::json!({
            "kind": "trigger",
            "integration": "GITHUB",
            "trigger": "PUSH",
        });
        let parsed: NodeBinding = serde_json::from_value(legacy).unwrap();
        assert_eq!(parsed, trigger);
    }

    #[test]
    fn test_param_type_parse() {
        assert_eq!("reference".parse::<ParamType>().unwrap(), ParamType::Reference);
        assert_eq!(ParamType::Value.as_ref(), "value");
    }
}
