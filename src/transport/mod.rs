// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The delivery seam between rule management and a device.
//!
//! This crate does not open sockets. Sending bytes, encryption, request
//! queuing, retries and timeouts all belong to a [`CommandTransport`]
//! implementation supplied by the caller.

use std::time::Duration;

use serde_json::Value;

use crate::command::CommandEnvelope;
use crate::error::TransportError;
use crate::types::Target;

/// Per-call transport settings.
///
/// Opaque to the rule manager: it only passes them through.
///
/// # Examples
///
/// ```
/// use away_rules::transport::SendOptions;
/// use std::time::Duration;
///
/// let options = SendOptions::new()
///     .with_timeout(Duration::from_secs(3))
///     .with_retries(2);
///
/// assert_eq!(options.timeout(), Some(Duration::from_secs(3)));
/// assert_eq!(options.retries(), Some(2));
/// assert_eq!(SendOptions::default().timeout(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendOptions {
    timeout: Option<Duration>,
    retries: Option<u32>,
}

impl SendOptions {
    /// Creates options that leave every setting to the transport's defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets how many times the transport may retry.
    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    /// Returns the request timeout, if set.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the retry count, if set.
    #[must_use]
    pub fn retries(&self) -> Option<u32> {
        self.retries
    }
}

/// Delivers a command to a device and returns its decoded JSON reply.
///
/// The reply may be the verb's reply object (`{"err_code": 0, ...}`) or the
/// full nested reply; both are accepted by
/// [`DeviceResponse`](crate::response::DeviceResponse).
///
/// Implementations decide how a [`Target::Child`] is addressed on the wire.
#[allow(async_fn_in_trait)]
pub trait CommandTransport {
    /// Sends a command envelope to the target device.
    ///
    /// # Arguments
    ///
    /// * `envelope` - The command to deliver
    /// * `target` - The parent device or one of its children
    /// * `options` - Transport settings for this call
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if no reply could be obtained.
    async fn send(
        &self,
        envelope: &CommandEnvelope,
        target: &Target,
        options: &SendOptions,
    ) -> Result<Value, TransportError>;
}
