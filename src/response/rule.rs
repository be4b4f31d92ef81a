// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Away rule response types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ResponseStatus, flag};
use crate::command::RuleSpec;
use crate::error::ParseError;
use crate::types::{DaySet, MinuteOfDay};

fn default_frequency() -> u16 {
    RuleSpec::DEFAULT_FREQUENCY
}

/// A rule as stored by the device.
///
/// Fields the library does not model are kept in [`extra`](Self::extra).
///
/// # Examples
///
/// ```
/// use away_rules::response::AwayRule;
/// use away_rules::types::DaySet;
///
/// let json = r#"{
///     "id": "E1B6A9C0",
///     "name": "weekend nights",
///     "enable": 1,
///     "frequency": 5,
///     "stime_opt": 0, "smin": 1320,
///     "etime_opt": 0, "emin": 1440,
///     "wday": [1, 0, 0, 0, 0, 0, 1],
///     "repeat": 1
/// }"#;
/// let rule: AwayRule = serde_json::from_str(json).unwrap();
/// assert!(rule.is_enabled());
/// assert_eq!(rule.start().unwrap().value(), 1320);
/// assert_eq!(rule.days(), DaySet::WEEKEND);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwayRule {
    /// Device-assigned rule id.
    pub id: String,
    /// Free-text label.
    #[serde(default)]
    pub name: String,
    /// Whether the rule is enabled.
    #[serde(with = "flag", default)]
    pub enable: bool,
    /// Check interval in minutes.
    #[serde(default = "default_frequency")]
    pub frequency: u16,
    /// Start time option.
    #[serde(default)]
    pub stime_opt: i8,
    /// Start, minutes since midnight.
    #[serde(default)]
    pub smin: u16,
    /// End time option.
    #[serde(default)]
    pub etime_opt: i8,
    /// End, minutes since midnight.
    #[serde(default)]
    pub emin: u16,
    /// Weekday mask, Sunday first, normalized to 0/1.
    #[serde(default, deserialize_with = "flag::mask")]
    pub wday: Vec<u8>,
    /// Whether the rule repeats weekly.
    #[serde(
        with = "flag::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub repeat: Option<bool>,
    /// Day of month of a one-shot rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    /// Month of a one-shot rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    /// Year of a one-shot rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Any other field reported by the device.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AwayRule {
    /// Returns the start of the window.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidValue` if `smin` exceeds 1440.
    pub fn start(&self) -> Result<MinuteOfDay, ParseError> {
        minute_field("smin", self.smin)
    }

    /// Returns the end of the window.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidValue` if `emin` exceeds 1440.
    pub fn end(&self) -> Result<MinuteOfDay, ParseError> {
        minute_field("emin", self.emin)
    }

    /// Returns the selected weekdays.
    #[must_use]
    pub fn days(&self) -> DaySet {
        DaySet::from_mask(&self.wday)
    }

    /// Returns whether the rule is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enable
    }

    /// Returns whether the rule repeats weekly.
    ///
    /// When the device omits `repeat`, a rule with selected weekdays is
    /// treated as repeating.
    #[must_use]
    pub fn is_repeating(&self) -> bool {
        self.repeat.unwrap_or_else(|| !self.days().is_empty())
    }

    /// Returns the date of a one-shot rule, if the device reported one.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)
    }
}

fn minute_field(field: &str, raw: u16) -> Result<MinuteOfDay, ParseError> {
    MinuteOfDay::new(raw).map_err(|e| ParseError::InvalidValue {
        field: field.to_string(),
        message: e.to_string(),
    })
}

/// Response to `get_rules`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RuleList {
    /// Rules in device order.
    pub rule_list: Vec<AwayRule>,
    /// Overall enable flag of the away feature, when reported.
    #[serde(with = "flag::option", default)]
    pub enable: Option<bool>,
    /// Rule format version, when reported.
    #[serde(default)]
    pub version: Option<u32>,
    /// Batch status code.
    pub err_code: i64,
    /// Batch status message.
    #[serde(default)]
    pub err_msg: Option<String>,
}

impl RuleList {
    /// Returns the first rule with the given id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&AwayRule> {
        self.rule_list.iter().find(|r| r.id == id)
    }

    /// Takes the first rule with the given id, wrapped with the batch status.
    #[must_use]
    pub fn into_lookup(self, id: &str) -> Option<RuleLookup> {
        let err_code = self.err_code;
        self.rule_list
            .into_iter()
            .find(|r| r.id == id)
            .map(|rule| RuleLookup { rule, err_code })
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rule_list.len()
    }

    /// Returns true if the device has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rule_list.is_empty()
    }

    /// Iterates over the rules in device order.
    pub fn iter(&self) -> std::slice::Iter<'_, AwayRule> {
        self.rule_list.iter()
    }
}

impl ResponseStatus for RuleList {
    fn err_code(&self) -> i64 {
        self.err_code
    }

    fn err_msg(&self) -> Option<&str> {
        self.err_msg.as_deref()
    }
}

/// A single rule found by id, together with the status of the `get_rules`
/// response it came from.
///
/// The device reports one status per batch. `err_code` here is that batch
/// status at the time of the lookup, not a status belonging to the rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleLookup {
    /// The matched rule, unchanged.
    pub rule: AwayRule,
    /// Status of the batch response.
    pub err_code: i64,
}

impl RuleLookup {
    /// Returns the matched rule.
    #[must_use]
    pub fn rule(&self) -> &AwayRule {
        &self.rule
    }

    /// Consumes the lookup and returns the rule.
    #[must_use]
    pub fn into_rule(self) -> AwayRule {
        self.rule
    }
}

impl ResponseStatus for RuleLookup {
    fn err_code(&self) -> i64 {
        self.err_code
    }

    fn err_msg(&self) -> Option<&str> {
        None
    }
}

/// Response to `add_rule`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddRuleResponse {
    /// Id assigned by the device.
    pub id: String,
    /// Status code.
    pub err_code: i64,
    /// Status message.
    #[serde(default)]
    pub err_msg: Option<String>,
}

impl ResponseStatus for AddRuleResponse {
    fn err_code(&self) -> i64 {
        self.err_code
    }

    fn err_msg(&self) -> Option<&str> {
        self.err_msg.as_deref()
    }
}

/// Response carrying only a status, returned by `edit_rule`, `delete_rule`,
/// `delete_all_rules` and `set_overall_enable`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusResponse {
    /// Status code.
    pub err_code: i64,
    /// Status message.
    #[serde(default)]
    pub err_msg: Option<String>,
}

impl ResponseStatus for StatusResponse {
    fn err_code(&self) -> i64 {
        self.err_code
    }

    fn err_msg(&self) -> Option<&str> {
        self.err_msg.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rule_json(id: &str) -> Value {
        json!({
            "id": id,
            "name": "",
            "enable": 1,
            "frequency": 5,
            "stime_opt": 0,
            "smin": 1320,
            "etime_opt": 0,
            "emin": 1440,
            "wday": [1, 0, 0, 0, 0, 0, 1],
            "repeat": 1
        })
    }

    #[test]
    fn rule_decodes_typed_values() {
        let rule: AwayRule = serde_json::from_value(rule_json("a")).unwrap();
        assert_eq!(rule.start().unwrap(), MinuteOfDay::new(1320).unwrap());
        assert_eq!(rule.end().unwrap(), MinuteOfDay::END_OF_DAY);
        assert_eq!(rule.days().indices(), vec![0, 6]);
        assert!(rule.is_repeating());
        assert!(rule.extra.is_empty());
    }

    #[test]
    fn rule_keeps_unknown_fields() {
        let mut raw = rule_json("a");
        raw["lastday"] = json!(1);
        let rule: AwayRule = serde_json::from_value(raw).unwrap();
        assert_eq!(rule.extra.get("lastday"), Some(&json!(1)));
    }

    #[test]
    fn boolean_flags_decode_like_integers() {
        let rule: AwayRule = serde_json::from_value(json!({
            "id": "a",
            "enable": true,
            "smin": 1320,
            "emin": 1440,
            "wday": [true, false, false, false, false, false, true],
            "repeat": true
        }))
        .unwrap();
        assert!(rule.is_enabled());
        assert!(rule.is_repeating());
        assert_eq!(rule.wday, vec![1, 0, 0, 0, 0, 0, 1]);
        assert_eq!(rule.days(), DaySet::WEEKEND);
    }

    #[test]
    fn boolean_mask_does_not_break_rule_list() {
        let mut odd = rule_json("b");
        odd["wday"] = json!([false, true, true, true, true, true, false]);
        let list: RuleList = serde_json::from_value(json!({
            "rule_list": [rule_json("a"), odd],
            "err_code": 0
        }))
        .unwrap();
        assert_eq!(list.find("b").unwrap().days(), DaySet::WEEKDAYS);
    }

    #[test]
    fn rule_defaults_for_sparse_payload() {
        let rule: AwayRule = serde_json::from_value(json!({ "id": "x" })).unwrap();
        assert_eq!(rule.frequency, 5);
        assert_eq!(rule.name, "");
        assert!(!rule.enable);
        assert!(!rule.is_repeating());
        assert_eq!(rule.date(), None);
    }

    #[test]
    fn out_of_range_minutes_reported() {
        let mut raw = rule_json("a");
        raw["emin"] = json!(2000);
        let rule: AwayRule = serde_json::from_value(raw).unwrap();
        assert!(matches!(
            rule.end(),
            Err(ParseError::InvalidValue { ref field, .. }) if field == "emin"
        ));
    }

    #[test]
    fn one_shot_date() {
        let mut raw = rule_json("a");
        raw["repeat"] = json!(0);
        raw["day"] = json!(5);
        raw["month"] = json!(6);
        raw["year"] = json!(2024);
        let rule: AwayRule = serde_json::from_value(raw).unwrap();
        assert!(!rule.is_repeating());
        assert_eq!(rule.date(), NaiveDate::from_ymd_opt(2024, 6, 5));
    }

    #[test]
    fn lookup_copies_batch_status() {
        let list: RuleList = serde_json::from_value(json!({
            "rule_list": [rule_json("a"), rule_json("b"), rule_json("b")],
            "enable": 1,
            "version": 2,
            "err_code": 0
        }))
        .unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.enable, Some(true));
        assert!(list.find("b").is_some());

        let expected: AwayRule = serde_json::from_value(rule_json("b")).unwrap();
        let lookup = list.clone().into_lookup("b").unwrap();
        assert_eq!(lookup.rule(), &expected);
        assert_eq!(lookup.err_code(), 0);

        assert!(list.into_lookup("zzz").is_none());
    }

    #[test]
    fn rule_list_is_required() {
        assert!(serde_json::from_value::<RuleList>(json!({ "err_code": 0 })).is_err());
    }

    #[test]
    fn add_rule_response() {
        let resp: AddRuleResponse =
            serde_json::from_value(json!({ "id": "NEW1", "err_code": 0 })).unwrap();
        assert_eq!(resp.id, "NEW1");
        assert!(resp.is_success());
    }
}
