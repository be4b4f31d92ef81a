// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Away rule commands.
//!
//! Every request sent to the device is a [`CommandEnvelope`]: the module
//! namespace wrapping exactly one verb, which wraps that verb's parameters.
//!
//! ```json
//! { "anti_theft": { "delete_rule": { "id": "rule-42" } } }
//! ```
//!
//! # Available Commands
//!
//! | Variant | Verb | Parameters |
//! |---------|------|------------|
//! | [`RuleCommand::GetRules`] | `get_rules` | none |
//! | [`RuleCommand::AddRule`] | `add_rule` | encoded [`RuleSpec`] |
//! | [`RuleCommand::EditRule`] | `edit_rule` | rule id + encoded [`RuleSpec`] |
//! | [`RuleCommand::DeleteRule`] | `delete_rule` | rule id |
//! | [`RuleCommand::DeleteAllRules`] | `delete_all_rules` | none |
//! | [`RuleCommand::SetOverallEnable`] | `set_overall_enable` | `enable` as 1/0 |
//!
//! # Examples
//!
//! ```
//! use away_rules::command::RuleCommand;
//! use away_rules::types::Namespace;
//! use serde_json::json;
//!
//! let envelope = RuleCommand::SetOverallEnable(false).into_envelope(Namespace::ANTI_THEFT);
//! assert_eq!(
//!     envelope.to_value(),
//!     json!({ "anti_theft": { "set_overall_enable": { "enable": 0 } } })
//! );
//! ```

mod rule;
mod schedule;

pub use rule::{RuleSpec, RuleSpecBuilder};
pub use schedule::{Schedule, ScheduleFields};

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value, json};

use crate::error::ValueError;
use crate::types::Namespace;

/// Protocol verb of the away module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// List every rule.
    GetRules,
    /// Create a rule; the device assigns its id.
    AddRule,
    /// Replace a rule addressed by id.
    EditRule,
    /// Remove a rule addressed by id.
    DeleteRule,
    /// Remove every rule.
    DeleteAllRules,
    /// Switch the whole away feature on or off.
    SetOverallEnable,
}

impl Verb {
    /// Returns the verb as it appears on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GetRules => "get_rules",
            Self::AddRule => "add_rule",
            Self::EditRule => "edit_rule",
            Self::DeleteRule => "delete_rule",
            Self::DeleteAllRules => "delete_all_rules",
            Self::SetOverallEnable => "set_overall_enable",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully addressed request: namespace, verb and parameter object.
///
/// Serializes to `{ <namespace>: { <verb>: <params> } }`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandEnvelope {
    namespace: Namespace,
    verb: Verb,
    params: Map<String, Value>,
}

impl CommandEnvelope {
    /// Creates an envelope from its three parts.
    #[must_use]
    pub fn new(namespace: Namespace, verb: Verb, params: Map<String, Value>) -> Self {
        Self {
            namespace,
            verb,
            params,
        }
    }

    /// Returns the module namespace.
    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Returns the verb.
    #[must_use]
    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// Returns the verb's parameter object.
    #[must_use]
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Assembles the nested JSON object sent to the device.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut inner = Map::with_capacity(1);
        inner.insert(self.verb.as_str().to_string(), Value::Object(self.params.clone()));
        let mut outer = Map::with_capacity(1);
        outer.insert(self.namespace.as_str().to_string(), Value::Object(inner));
        Value::Object(outer)
    }
}

impl Serialize for CommandEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct VerbEntry<'a>(&'a CommandEnvelope);

        impl Serialize for VerbEntry<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(self.0.verb.as_str(), &self.0.params)?;
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.namespace.as_str(), &VerbEntry(self))?;
        map.end()
    }
}

/// A single away module operation.
///
/// # Examples
///
/// ```
/// use away_rules::command::{RuleCommand, Verb};
///
/// let cmd = RuleCommand::delete_rule("rule-42").unwrap();
/// assert_eq!(cmd.verb(), Verb::DeleteRule);
///
/// assert!(RuleCommand::delete_rule("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleCommand {
    /// Fetch the full rule list.
    GetRules,
    /// Create a new rule.
    AddRule(RuleSpec),
    /// Overwrite an existing rule.
    EditRule {
        /// Device-assigned rule id.
        id: String,
        /// The new rule contents.
        rule: RuleSpec,
    },
    /// Delete one rule.
    DeleteRule {
        /// Device-assigned rule id.
        id: String,
    },
    /// Delete every rule.
    DeleteAllRules,
    /// Enable or disable the away feature as a whole.
    SetOverallEnable(bool),
}

impl RuleCommand {
    /// Creates an edit command.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::EmptyRuleId` if `id` is empty.
    pub fn edit_rule(id: impl Into<String>, rule: RuleSpec) -> Result<Self, ValueError> {
        let id = non_empty_id(id.into())?;
        Ok(Self::EditRule { id, rule })
    }

    /// Creates a delete command.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::EmptyRuleId` if `id` is empty.
    pub fn delete_rule(id: impl Into<String>) -> Result<Self, ValueError> {
        let id = non_empty_id(id.into())?;
        Ok(Self::DeleteRule { id })
    }

    /// Returns the protocol verb of this command.
    #[must_use]
    pub const fn verb(&self) -> Verb {
        match self {
            Self::GetRules => Verb::GetRules,
            Self::AddRule(_) => Verb::AddRule,
            Self::EditRule { .. } => Verb::EditRule,
            Self::DeleteRule { .. } => Verb::DeleteRule,
            Self::DeleteAllRules => Verb::DeleteAllRules,
            Self::SetOverallEnable(_) => Verb::SetOverallEnable,
        }
    }

    /// Returns the verb's parameter object.
    #[must_use]
    pub fn params(&self) -> Map<String, Value> {
        match self {
            Self::GetRules | Self::DeleteAllRules => Map::new(),
            Self::AddRule(rule) => rule.to_params(),
            Self::EditRule { id, rule } => {
                let mut params = rule.to_params();
                params.insert("id".to_string(), json!(id));
                params
            }
            Self::DeleteRule { id } => {
                let mut params = Map::new();
                params.insert("id".to_string(), json!(id));
                params
            }
            Self::SetOverallEnable(enable) => {
                let mut params = Map::new();
                params.insert("enable".to_string(), json!(u8::from(*enable)));
                params
            }
        }
    }

    /// Wraps this command in an envelope for the given namespace.
    #[must_use]
    pub fn into_envelope(self, namespace: Namespace) -> CommandEnvelope {
        CommandEnvelope::new(namespace, self.verb(), self.params())
    }
}

fn non_empty_id(id: String) -> Result<String, ValueError> {
    if id.is_empty() {
        return Err(ValueError::EmptyRuleId);
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verb_wire_names() {
        assert_eq!(Verb::GetRules.as_str(), "get_rules");
        assert_eq!(Verb::AddRule.to_string(), "add_rule");
        assert_eq!(Verb::DeleteAllRules.as_str(), "delete_all_rules");
    }

    #[test]
    fn empty_params_serialize_as_empty_object() {
        let envelope = RuleCommand::GetRules.into_envelope(Namespace::ANTI_THEFT);
        assert_eq!(envelope.to_value(), json!({ "anti_theft": { "get_rules": {} } }));
    }

    #[test]
    fn serialize_matches_to_value() {
        let envelope = RuleCommand::delete_rule("rule-42")
            .unwrap()
            .into_envelope(Namespace::new("smartlife.iot.common.anti_theft"));
        let serialized = serde_json::to_value(&envelope).unwrap();
        assert_eq!(serialized, envelope.to_value());
        assert_eq!(
            serialized,
            json!({ "smartlife.iot.common.anti_theft": { "delete_rule": { "id": "rule-42" } } })
        );
    }

    #[test]
    fn overall_enable_as_integer() {
        assert_eq!(
            RuleCommand::SetOverallEnable(true).params(),
            json!({ "enable": 1 }).as_object().cloned().unwrap()
        );
    }

    #[test]
    fn empty_ids_rejected() {
        assert_eq!(
            RuleCommand::delete_rule(""),
            Err(ValueError::EmptyRuleId)
        );
    }

    #[test]
    fn same_command_gives_identical_envelopes() {
        let a = RuleCommand::DeleteAllRules.into_envelope(Namespace::ANTI_THEFT);
        let b = RuleCommand::DeleteAllRules.into_envelope(Namespace::ANTI_THEFT);
        assert_eq!(a, b);
    }
}
