// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the away rule client.
//!
//! Failures fall into four groups: invalid caller input caught before a
//! command is built, transport faults raised by the delivery layer, responses
//! that do not have the expected shape, and commands the device itself
//! rejected with a non-zero `err_code`.

use std::time::Duration;

use thiserror::Error;

use crate::command::Verb;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The transport failed before a structured response was obtained.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The device answered with a non-zero status.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),
}

impl Error {
    /// Returns the device status code if the device rejected the command.
    #[must_use]
    pub fn err_code(&self) -> Option<i64> {
        match self {
            Self::Device(DeviceError::Rejected { err_code, .. }) => Some(*err_code),
            _ => None,
        }
    }
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u32,
        /// Maximum allowed value.
        max: u32,
        /// The actual value that was provided.
        actual: u32,
    },

    /// A weekday index is outside 0 (Sunday) to 6 (Saturday).
    #[error("weekday index {0} is out of range [0, 6]")]
    InvalidWeekday(u8),

    /// A rule id was required but empty.
    #[error("rule id must not be empty")]
    EmptyRuleId,

    /// A child device id was empty.
    #[error("child id must not be empty")]
    EmptyChildId,

    /// A required rule field was not set on the builder.
    #[error("missing required rule field: {0}")]
    MissingField(&'static str),
}

/// Faults raised by a [`CommandTransport`](crate::transport::CommandTransport).
///
/// These are passed to the caller unchanged.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {} ms", .0.as_millis())]
    Timeout(Duration),

    /// Any other transport-specific failure.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Errors related to parsing device responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON decoding failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Failed to interpret a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors reported by the device in an otherwise well-formed response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The device returned a non-zero `err_code`.
    #[error("{verb} rejected with err_code {err_code}{}", .err_msg.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Rejected {
        /// The verb that was rejected.
        verb: Verb,
        /// The status code, exactly as reported.
        err_code: i64,
        /// The optional message accompanying the code.
        err_msg: Option<String>,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
