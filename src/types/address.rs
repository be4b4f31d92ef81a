// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command addressing.
//!
//! A command is addressed along two independent axes: the protocol
//! [`Namespace`] of the feature module, and the [`Target`] device (the
//! physical device itself or one of its child sockets).

use std::borrow::Cow;
use std::fmt;

use crate::error::ValueError;

/// Identifier of a child device, such as one socket of a power strip.
///
/// # Examples
///
/// ```
/// use away_rules::types::ChildId;
///
/// let socket = ChildId::new("8006231E1499BAC4D8E1B9C1F6E2F57D1B4C1A2B00").unwrap();
/// assert!(socket.as_str().ends_with("00"));
///
/// assert!(ChildId::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChildId(String);

impl ChildId {
    /// Creates a child identifier.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::EmptyChildId` if `id` is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValueError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValueError::EmptyChildId);
        }
        Ok(Self(id))
    }

    /// Returns the identifier as sent to the transport.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The device a command is addressed to.
///
/// # Examples
///
/// ```
/// use away_rules::types::{ChildId, Target};
///
/// let parent = Target::Device;
/// assert!(parent.child_id().is_none());
///
/// let socket = Target::child(ChildId::new("01").unwrap());
/// assert_eq!(socket.child_id().map(|c| c.as_str()), Some("01"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Target {
    /// The physical device itself.
    #[default]
    Device,
    /// A logical sub-device.
    Child(ChildId),
}

impl Target {
    /// Addresses a child device.
    #[must_use]
    pub const fn child(id: ChildId) -> Self {
        Self::Child(id)
    }

    /// Returns the child identifier, if any.
    #[must_use]
    pub fn child_id(&self) -> Option<&ChildId> {
        match self {
            Self::Device => None,
            Self::Child(id) => Some(id),
        }
    }
}

impl From<ChildId> for Target {
    fn from(value: ChildId) -> Self {
        Self::Child(value)
    }
}

impl From<Option<ChildId>> for Target {
    fn from(value: Option<ChildId>) -> Self {
        value.map_or(Self::Device, Self::Child)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device => f.write_str("device"),
            Self::Child(id) => write!(f, "child {id}"),
        }
    }
}

/// Protocol namespace of a device feature module.
///
/// Plugs expose the away feature as `anti_theft`; other device families use
/// a different namespace string for the same verb set.
///
/// # Examples
///
/// ```
/// use away_rules::types::Namespace;
///
/// assert_eq!(Namespace::default().as_str(), "anti_theft");
/// assert_eq!(Namespace::new("smartlife.iot.common.anti_theft").as_str(),
///            "smartlife.iot.common.anti_theft");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(Cow<'static, str>);

impl Namespace {
    /// The away module of smart plugs and power strips.
    pub const ANTI_THEFT: Self = Self(Cow::Borrowed("anti_theft"));

    /// Creates a namespace from any string.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Returns the namespace string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::ANTI_THEFT
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_from_option() {
        assert_eq!(Target::from(None), Target::Device);
        let id = ChildId::new("02").unwrap();
        assert_eq!(Target::from(Some(id.clone())), Target::Child(id));
    }

    #[test]
    fn target_display() {
        assert_eq!(Target::Device.to_string(), "device");
        let target = Target::child(ChildId::new("02").unwrap());
        assert_eq!(target.to_string(), "child 02");
    }

    #[test]
    fn empty_child_id_rejected() {
        assert_eq!(ChildId::new(String::new()), Err(ValueError::EmptyChildId));
    }

    #[test]
    fn namespace_owned_and_borrowed_compare_equal() {
        assert_eq!(Namespace::new(String::from("anti_theft")), Namespace::ANTI_THEFT);
    }
}
