// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serde helpers for 1/0 flags.
//!
//! The device encodes booleans as integers; some firmware answers with JSON
//! booleans instead. Both decode to `bool`, and encoding always yields 1/0.

use serde::de::{self, Deserializer, Unexpected};
use serde::{Deserialize, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Int(i64),
}

impl RawFlag {
    fn into_bool<E: de::Error>(self) -> Result<bool, E> {
        match self {
            Self::Bool(b) => Ok(b),
            Self::Int(0) => Ok(false),
            Self::Int(1) => Ok(true),
            Self::Int(n) => Err(E::invalid_value(Unexpected::Signed(n), &"0 or 1")),
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    RawFlag::deserialize(deserializer)?.into_bool()
}

/// Decodes a weekday mask whose slots are integers or booleans.
///
/// Any non-zero slot counts as selected; the result holds only 0/1.
pub(crate) fn mask<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let slots = Vec::<RawFlag>::deserialize(deserializer)?;
    Ok(slots
        .into_iter()
        .map(|slot| match slot {
            RawFlag::Bool(b) => u8::from(b),
            RawFlag::Int(n) => u8::from(n != 0),
        })
        .collect())
}

pub(crate) mod option {
    use super::RawFlag;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub(crate) fn serialize<S: Serializer>(
        value: &Option<bool>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(b) => serializer.serialize_u8(u8::from(*b)),
            None => serializer.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<bool>, D::Error> {
        Option::<RawFlag>::deserialize(deserializer)?
            .map(RawFlag::into_bool)
            .transpose()
    }
}
