// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Away rule lifecycle management.
//!
//! [`RuleManager`] lists, creates, edits, deletes and toggles the away rules a
//! device evaluates on its own. It keeps no rule state: every call is one
//! request/response round trip through the caller's
//! [`CommandTransport`](crate::transport::CommandTransport).
//!
//! # Examples
//!
//! ```
//! use away_rules::command::{CommandEnvelope, RuleSpec};
//! use away_rules::error::TransportError;
//! use away_rules::manager::RuleManager;
//! use away_rules::transport::{CommandTransport, SendOptions};
//! use away_rules::types::{Namespace, Target};
//! use serde_json::{json, Value};
//!
//! struct Plug;
//!
//! impl CommandTransport for Plug {
//!     async fn send(
//!         &self,
//!         _envelope: &CommandEnvelope,
//!         _target: &Target,
//!         _options: &SendOptions,
//!     ) -> Result<Value, TransportError> {
//!         Ok(json!({ "id": "9A3C", "err_code": 0 }))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> away_rules::Result<()> {
//!     let manager = RuleManager::new(Plug, Namespace::ANTI_THEFT);
//!
//!     let rule = RuleSpec::builder()
//!         .start_minutes(1320)
//!         .end_minutes(1440)
//!         .days_of_week([0, 6])
//!         .build()?;
//!
//!     let added = manager.add_rule(&rule, &SendOptions::default()).await?;
//!     assert_eq!(added.id, "9A3C");
//!     Ok(())
//! }
//! ```

mod rule_manager;

pub use rule_manager::RuleManager;
