// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Away Rules - A Rust client for the away/anti-theft scheduler of smart plugs.
//!
//! Devices with an away mode evaluate time-window rules on their own, switching
//! their output to make a home look occupied. This library builds the
//! commands that list, create, edit, enable and delete those rules, and
//! interprets the device's replies.
//!
//! # Scope
//!
//! - **Rule encoding**: time windows given as minutes or chrono values, weekday
//!   selection, one-shot rules
//! - **Rule lifecycle**: `get_rules`, `add_rule`, `edit_rule`, `delete_rule`,
//!   `delete_all_rules`, `set_overall_enable`
//! - **Addressing**: any module namespace, parent device or child socket
//!
//! Delivering bytes to the device is left to a caller-supplied
//! [`CommandTransport`](transport::CommandTransport).
//!
//! # Quick Start
//!
//! ```no_run
//! use away_rules::manager::RuleManager;
//! use away_rules::transport::{CommandTransport, SendOptions};
//! use away_rules::types::{ChildId, Namespace};
//!
//! # async fn example<T: CommandTransport>(transport: T) -> away_rules::Result<()> {
//! // Second socket of a power strip
//! let manager = RuleManager::new(transport, Namespace::ANTI_THEFT)
//!     .with_child(ChildId::new("8006A1B2C3D4E5F601")?);
//!
//! let options = SendOptions::default();
//! for rule in manager.get_rules(&options).await?.iter() {
//!     println!("{} {}-{} {}", rule.id, rule.smin, rule.emin, rule.days());
//! }
//!
//! manager.set_overall_enable(false, &options).await?;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod error;
pub mod manager;
pub mod response;
pub mod transport;
pub mod types;

pub use command::{CommandEnvelope, RuleCommand, RuleSpec, RuleSpecBuilder, Schedule, Verb};
pub use error::{DeviceError, Error, ParseError, Result, TransportError, ValueError};
pub use manager::RuleManager;
pub use response::{
    AddRuleResponse, AwayRule, DeviceResponse, ResponseStatus, RuleList, RuleLookup,
    StatusResponse,
};
pub use transport::{CommandTransport, SendOptions};
pub use types::{ChildId, DaySet, MinuteOfDay, Namespace, RuleTime, Target, Weekday};
