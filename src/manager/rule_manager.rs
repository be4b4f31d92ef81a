// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stateless façade over the away module verbs.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::command::{RuleCommand, RuleSpec};
use crate::error::Error;
use crate::response::{AddRuleResponse, DeviceResponse, RuleList, RuleLookup, StatusResponse};
use crate::transport::{CommandTransport, SendOptions};
use crate::types::{ChildId, Namespace, Target};

/// Manages the away rules of one device or child device.
///
/// Holds only the transport handle, the module namespace and the target,
/// all fixed at construction. Cloning is cheap and clones share the
/// transport.
///
/// Each operation sends exactly one command; nothing is cached, retried or
/// deduplicated.
pub struct RuleManager<T> {
    transport: Arc<T>,
    namespace: Namespace,
    target: Target,
}

impl<T> Clone for RuleManager<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            namespace: self.namespace.clone(),
            target: self.target.clone(),
        }
    }
}

impl<T> fmt::Debug for RuleManager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleManager")
            .field("namespace", &self.namespace)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl<T: CommandTransport> RuleManager<T> {
    /// Creates a manager addressing the parent device.
    #[must_use]
    pub fn new(transport: T, namespace: Namespace) -> Self {
        Self::from_shared(Arc::new(transport), namespace)
    }

    /// Creates a manager from a transport shared with other components.
    #[must_use]
    pub fn from_shared(transport: Arc<T>, namespace: Namespace) -> Self {
        Self {
            transport,
            namespace,
            target: Target::Device,
        }
    }

    /// Addresses a child device instead of the parent.
    #[must_use]
    pub fn with_child(mut self, child: ChildId) -> Self {
        self.target = Target::Child(child);
        self
    }

    /// Returns a manager for a child device, sharing this manager's
    /// transport and namespace.
    #[must_use]
    pub fn for_child(&self, child: ChildId) -> Self {
        self.clone().with_child(child)
    }

    /// Returns the module namespace.
    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Returns the addressed device.
    #[must_use]
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Sends one command and parses the reply.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` unchanged from the transport,
    /// `Error::Device` for a non-zero `err_code`, or `Error::Parse` for a
    /// reply of the wrong shape.
    pub async fn send<R: DeserializeOwned>(
        &self,
        command: RuleCommand,
        options: &SendOptions,
    ) -> Result<R, Error> {
        let verb = command.verb();
        let envelope = command.into_envelope(self.namespace.clone());

        tracing::debug!(
            namespace = %self.namespace,
            verb = %verb,
            target = %self.target,
            "Sending away rule command"
        );

        let body = self
            .transport
            .send(&envelope, &self.target, options)
            .await?;
        DeviceResponse::new(body).parse(&self.namespace, verb)
    }

    /// Lists every rule on the device.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails or the device rejects it.
    pub async fn get_rules(&self, options: &SendOptions) -> Result<RuleList, Error> {
        self.send(RuleCommand::GetRules, options).await
    }

    /// Finds a rule by id.
    ///
    /// Fetches the full list once and returns the first rule with a matching
    /// id, wrapped with the list's `err_code`. A missing id is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying `get_rules` fails.
    pub async fn get_rule(
        &self,
        id: &str,
        options: &SendOptions,
    ) -> Result<Option<RuleLookup>, Error> {
        let rules = self.get_rules(options).await?;
        let lookup = rules.into_lookup(id);
        if lookup.is_none() {
            tracing::debug!(id, target = %self.target, "No away rule with this id");
        }
        Ok(lookup)
    }

    /// Creates a rule; the device assigns and returns its id.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails or the device rejects it.
    pub async fn add_rule(
        &self,
        rule: &RuleSpec,
        options: &SendOptions,
    ) -> Result<AddRuleResponse, Error> {
        self.send(RuleCommand::AddRule(rule.clone()), options).await
    }

    /// Replaces the rule with the given id.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::EmptyRuleId` for an empty id, or error if the
    /// command fails or the device rejects it.
    pub async fn edit_rule(
        &self,
        id: &str,
        rule: &RuleSpec,
        options: &SendOptions,
    ) -> Result<StatusResponse, Error> {
        let command = RuleCommand::edit_rule(id, rule.clone())?;
        self.send(command, options).await
    }

    /// Deletes the rule with the given id.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::EmptyRuleId` for an empty id, or error if the
    /// command fails or the device rejects it.
    pub async fn delete_rule(
        &self,
        id: &str,
        options: &SendOptions,
    ) -> Result<StatusResponse, Error> {
        let command = RuleCommand::delete_rule(id)?;
        self.send(command, options).await
    }

    /// Deletes every rule.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails or the device rejects it.
    pub async fn delete_all_rules(&self, options: &SendOptions) -> Result<StatusResponse, Error> {
        self.send(RuleCommand::DeleteAllRules, options).await
    }

    /// Enables or disables the away feature as a whole.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails or the device rejects it.
    pub async fn set_overall_enable(
        &self,
        enable: bool,
        options: &SendOptions,
    ) -> Result<StatusResponse, Error> {
        self.send(RuleCommand::SetOverallEnable(enable), options)
            .await
    }
}
