// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for away module replies.
//!
//! Every reply carries an integer `err_code` (0 = success). A transport may
//! hand back either the verb's reply object directly or the full nested
//! reply `{ <namespace>: { <verb>: {...} } }`; [`DeviceResponse`] accepts
//! both.

pub(crate) mod flag;
mod rule;

pub use rule::{AddRuleResponse, AwayRule, RuleList, RuleLookup, StatusResponse};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::command::Verb;
use crate::error::{DeviceError, Error, ParseError};
use crate::types::Namespace;

/// Access to the status fields every reply carries.
pub trait ResponseStatus {
    /// Returns the reported status code.
    fn err_code(&self) -> i64;

    /// Returns the reported status message, if any.
    fn err_msg(&self) -> Option<&str>;

    /// Returns true if `err_code` is 0.
    fn is_success(&self) -> bool {
        self.err_code() == 0
    }
}

/// A decoded JSON reply as returned by a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceResponse {
    body: Value,
}

impl DeviceResponse {
    /// Wraps a decoded reply.
    #[must_use]
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// Returns the raw reply.
    #[must_use]
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Returns the verb's reply object.
    ///
    /// Descends through the namespace and verb keys when present. A reply
    /// nested only under the namespace (as devices answer for an unsupported
    /// module) yields the namespace-level object.
    #[must_use]
    pub fn payload(&self, namespace: &Namespace, verb: Verb) -> &Value {
        let module = self.body.get(namespace.as_str()).unwrap_or(&self.body);
        module.get(verb.as_str()).unwrap_or(module)
    }

    /// Reads `err_code` and rejects non-zero codes.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if `err_code` is missing or not an integer, and
    /// `DeviceError::Rejected` if it is non-zero.
    pub fn check_status(&self, namespace: &Namespace, verb: Verb) -> Result<i64, Error> {
        let payload = self.payload(namespace, verb);
        let err_code = payload
            .get("err_code")
            .ok_or_else(|| ParseError::MissingField("err_code".to_string()))?
            .as_i64()
            .ok_or_else(|| ParseError::InvalidValue {
                field: "err_code".to_string(),
                message: "expected an integer".to_string(),
            })?;

        if err_code != 0 {
            let err_msg = payload
                .get("err_msg")
                .and_then(Value::as_str)
                .map(str::to_string);
            tracing::warn!(verb = %verb, err_code, err_msg = ?err_msg, "Device rejected command");
            return Err(DeviceError::Rejected {
                verb,
                err_code,
                err_msg,
            }
            .into());
        }
        Ok(err_code)
    }

    /// Checks the status and parses the verb's reply object.
    ///
    /// # Errors
    ///
    /// Returns the status errors of [`check_status`](Self::check_status), or
    /// `ParseError::Json` if the reply does not match `T`.
    pub fn parse<T: DeserializeOwned>(&self, namespace: &Namespace, verb: Verb) -> Result<T, Error> {
        self.check_status(namespace, verb)?;
        <T as Deserialize>::deserialize(self.payload(namespace, verb))
            .map_err(|e| Error::Parse(ParseError::Json(e)))
    }
}

impl From<Value> for DeviceResponse {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}
