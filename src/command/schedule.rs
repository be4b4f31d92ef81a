// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Schedule encoding.
//!
//! Converts a rule's time window and weekday selection into the device's
//! time/day fields:
//!
//! | Field | Value |
//! |-------|-------|
//! | `stime_opt`, `etime_opt` | `0` (absolute minutes) |
//! | `smin`, `emin` | minutes since midnight |
//! | `wday` | seven 0/1 slots, Sunday first |
//! | `repeat` | `1` for weekly rules, `0` for one-shot rules |
//! | `day`, `month`, `year` | one-shot rules only |
//!
//! A rule with no weekday selected is sent as a one-shot rule for a single
//! date: the date carried by the start boundary, or today when the start is a
//! plain minute count.

use chrono::{Datelike, Local, NaiveDate};
use serde_json::{Map, Value, json};

use crate::error::ValueError;
use crate::types::{DaySet, MinuteOfDay, RuleTime, Weekday};

/// Time option meaning "absolute minutes since midnight".
const TIME_OPT_MINUTES: i8 = 0;

/// The time window and weekday selection of a rule.
///
/// # Examples
///
/// ```
/// use away_rules::command::Schedule;
/// use away_rules::types::{DaySet, MinuteOfDay};
///
/// let schedule = Schedule::new(
///     MinuteOfDay::new(1320).unwrap(),
///     MinuteOfDay::END_OF_DAY,
///     DaySet::WEEKEND,
/// );
/// let fields = schedule.encode();
/// assert_eq!(fields.smin, 1320);
/// assert_eq!(fields.emin, 1440);
/// assert_eq!(fields.wday, [1, 0, 0, 0, 0, 0, 1]);
/// assert!(fields.repeat);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// Start of the window.
    pub start: RuleTime,
    /// End of the window.
    pub end: RuleTime,
    /// Active weekdays; empty means a one-shot rule.
    pub days: DaySet,
}

impl Schedule {
    /// Creates a schedule.
    #[must_use]
    pub fn new(start: impl Into<RuleTime>, end: impl Into<RuleTime>, days: DaySet) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            days,
        }
    }

    /// Encodes the schedule into device fields.
    ///
    /// One-shot rules whose start carries no date are pinned to today's local
    /// date.
    #[must_use]
    pub fn encode(&self) -> ScheduleFields {
        self.encode_on(Local::now().date_naive())
    }

    /// Encodes the schedule, using `today` for a one-shot rule without a
    /// dated start.
    #[must_use]
    pub fn encode_on(&self, today: NaiveDate) -> ScheduleFields {
        let smin = self.start.minute_of_day().value();
        let emin = self.end.minute_of_day().value();

        if !self.days.is_empty() {
            return ScheduleFields {
                stime_opt: TIME_OPT_MINUTES,
                smin,
                etime_opt: TIME_OPT_MINUTES,
                emin,
                wday: self.days.to_mask(),
                repeat: true,
                date: None,
            };
        }

        let date = self.start.date().unwrap_or(today);
        ScheduleFields {
            stime_opt: TIME_OPT_MINUTES,
            smin,
            etime_opt: TIME_OPT_MINUTES,
            emin,
            wday: DaySet::from(Weekday::from(date.weekday())).to_mask(),
            repeat: false,
            date: Some(date),
        }
    }
}

/// Encoded time/day fields, ready to be merged into a rule's parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleFields {
    /// Start time option.
    pub stime_opt: i8,
    /// Start, minutes since midnight.
    pub smin: u16,
    /// End time option.
    pub etime_opt: i8,
    /// End, minutes since midnight.
    pub emin: u16,
    /// Weekday mask, Sunday first.
    pub wday: [u8; 7],
    /// Whether the rule repeats weekly.
    pub repeat: bool,
    /// Calendar date of a one-shot rule.
    pub date: Option<NaiveDate>,
}

impl ScheduleFields {
    /// Returns the decoded start boundary.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `smin` exceeds 1440.
    pub fn start(&self) -> Result<MinuteOfDay, ValueError> {
        MinuteOfDay::new(self.smin)
    }

    /// Returns the decoded end boundary.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `emin` exceeds 1440.
    pub fn end(&self) -> Result<MinuteOfDay, ValueError> {
        MinuteOfDay::new(self.emin)
    }

    /// Returns the selected weekdays.
    #[must_use]
    pub fn days(&self) -> DaySet {
        DaySet::from_mask(&self.wday)
    }

    /// Writes the fields into a parameter object.
    pub fn write_into(&self, params: &mut Map<String, Value>) {
        params.insert("stime_opt".to_string(), json!(self.stime_opt));
        params.insert("smin".to_string(), json!(self.smin));
        params.insert("etime_opt".to_string(), json!(self.etime_opt));
        params.insert("emin".to_string(), json!(self.emin));
        params.insert("wday".to_string(), json!(self.wday));
        params.insert("repeat".to_string(), json!(u8::from(self.repeat)));
        if let Some(date) = self.date {
            params.insert("day".to_string(), json!(date.day()));
            params.insert("month".to_string(), json!(date.month()));
            params.insert("year".to_string(), json!(date.year()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes(m: u16) -> MinuteOfDay {
        MinuteOfDay::new(m).unwrap()
    }

    #[test]
    fn weekly_rule_has_no_date() {
        let fields = Schedule::new(minutes(480), minutes(1020), DaySet::WEEKDAYS).encode();
        assert_eq!(fields.wday, [0, 1, 1, 1, 1, 1, 0]);
        assert!(fields.repeat);
        assert_eq!(fields.date, None);
        assert_eq!(fields.stime_opt, 0);
        assert_eq!(fields.etime_opt, 0);
    }

    #[test]
    fn datetime_and_minutes_encode_identically() {
        let at = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(22, 0, 0)
            .unwrap();
        let a = Schedule::new(at, MinuteOfDay::END_OF_DAY, DaySet::WEEKEND).encode();
        let b = Schedule::new(minutes(1320), MinuteOfDay::END_OF_DAY, DaySet::WEEKEND).encode();
        assert_eq!(a, b);
    }

    #[test]
    fn one_shot_uses_start_date() {
        // 2024-06-05 is a Wednesday
        let at = NaiveDate::from_ymd_opt(2024, 6, 5)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let fields = Schedule::new(at, minutes(600), DaySet::EMPTY)
            .encode_on(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        assert!(!fields.repeat);
        assert_eq!(fields.date, NaiveDate::from_ymd_opt(2024, 6, 5));
        assert_eq!(fields.wday, [0, 0, 0, 1, 0, 0, 0]);
        assert_eq!(fields.smin, 570);
    }

    #[test]
    fn one_shot_without_date_uses_today() {
        // 2024-06-09 is a Sunday
        let today = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        let fields = Schedule::new(minutes(60), minutes(120), DaySet::EMPTY).encode_on(today);
        assert_eq!(fields.date, Some(today));
        assert_eq!(fields.days(), DaySet::from(Weekday::Sunday));
    }

    #[test]
    fn write_into_emits_date_only_for_one_shot() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();

        let mut weekly = Map::new();
        Schedule::new(minutes(0), minutes(60), DaySet::EVERY_DAY)
            .encode_on(today)
            .write_into(&mut weekly);
        assert!(!weekly.contains_key("day"));
        assert_eq!(weekly["repeat"], json!(1));

        let mut once = Map::new();
        Schedule::new(minutes(0), minutes(60), DaySet::EMPTY)
            .encode_on(today)
            .write_into(&mut once);
        assert_eq!(once["day"], json!(9));
        assert_eq!(once["month"], json!(6));
        assert_eq!(once["year"], json!(2024));
        assert_eq!(once["repeat"], json!(0));
    }

    #[test]
    fn decode_recovers_inputs() {
        let days = DaySet::from_indices([0, 3, 6]).unwrap();
        let fields = Schedule::new(minutes(5), minutes(1439), days).encode();
        assert_eq!(fields.start(), Ok(minutes(5)));
        assert_eq!(fields.end(), Ok(minutes(1439)));
        assert_eq!(fields.days(), days);
    }
}
