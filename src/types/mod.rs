// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for away rule scheduling.
//!
//! Each type checks its range at construction time, so a command built from
//! these values never carries an out-of-range field.
//!
//! # Types
//!
//! - [`MinuteOfDay`] - Minutes since midnight (0-1440)
//! - [`RuleTime`] - Rule boundary given as minutes or as a point in time
//! - [`Weekday`] / [`DaySet`] - Weekday selection, Sunday = 0
//! - [`Target`] / [`ChildId`] - Parent device or child socket addressing
//! - [`Namespace`] - Protocol namespace of the feature module

mod address;
mod time;
mod weekday;

pub use address::{ChildId, Namespace, Target};
pub use time::{MinuteOfDay, RuleTime};
pub use weekday::{DaySet, Weekday};
