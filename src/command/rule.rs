// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rule contents for `add_rule` and `edit_rule`.

use chrono::NaiveDate;
use serde_json::{Map, Value, json};

use crate::command::Schedule;
use crate::error::ValueError;
use crate::types::{DaySet, MinuteOfDay, RuleTime};

/// A validated away rule, without its device-assigned id.
///
/// Required: `start`, `end`, `days`. Defaults: `frequency = 5`, `name = ""`,
/// `enable = true`.
///
/// # Examples
///
/// ```
/// use away_rules::command::RuleSpec;
///
/// // 10pm to midnight on weekends
/// let rule = RuleSpec::builder()
///     .start_minutes(1320)
///     .end_minutes(1440)
///     .days_of_week([0, 6])
///     .build()
///     .unwrap();
///
/// assert_eq!(rule.frequency(), 5);
/// assert_eq!(rule.name(), "");
/// assert!(rule.enable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    schedule: Schedule,
    frequency: u16,
    name: String,
    enable: bool,
    anchor_date: Option<NaiveDate>,
}

impl RuleSpec {
    /// Default check interval in minutes.
    pub const DEFAULT_FREQUENCY: u16 = 5;

    /// Creates a rule with default frequency, name and enable flag.
    #[must_use]
    pub fn new(start: impl Into<RuleTime>, end: impl Into<RuleTime>, days: DaySet) -> Self {
        Self {
            schedule: Schedule::new(start, end, days),
            frequency: Self::DEFAULT_FREQUENCY,
            name: String::new(),
            enable: true,
            anchor_date: None,
        }
    }

    /// Pins a one-shot rule without a dated start to `date`.
    #[must_use]
    pub fn with_anchor_date(mut self, date: NaiveDate) -> Self {
        self.anchor_date = Some(date);
        self
    }

    /// Creates a new rule builder.
    #[must_use]
    pub fn builder() -> RuleSpecBuilder {
        RuleSpecBuilder::default()
    }

    /// Returns the time window and weekdays.
    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Returns the check interval in minutes.
    #[must_use]
    pub fn frequency(&self) -> u16 {
        self.frequency
    }

    /// Returns the rule label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the rule is enabled.
    #[must_use]
    pub fn enable(&self) -> bool {
        self.enable
    }

    /// Returns the date used for a one-shot rule whose start has no date.
    ///
    /// `None` means today's local date at encoding time.
    #[must_use]
    pub fn anchor_date(&self) -> Option<NaiveDate> {
        self.anchor_date
    }

    /// Builds the `add_rule`/`edit_rule` parameter object.
    pub(crate) fn to_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("frequency".to_string(), json!(self.frequency));
        params.insert("name".to_string(), json!(self.name));
        params.insert("enable".to_string(), json!(u8::from(self.enable)));
        let fields = match self.anchor_date {
            Some(date) => self.schedule.encode_on(date),
            None => self.schedule.encode(),
        };
        fields.write_into(&mut params);
        params
    }
}

#[derive(Debug, Clone, Copy)]
enum Boundary {
    Time(RuleTime),
    Minutes(u16),
}

impl Boundary {
    fn resolve(self) -> Result<RuleTime, ValueError> {
        match self {
            Self::Time(t) => Ok(t),
            Self::Minutes(m) => MinuteOfDay::new(m).map(RuleTime::Minutes),
        }
    }
}

#[derive(Debug, Clone)]
enum Days {
    Set(DaySet),
    Indices(Vec<u8>),
}

/// Builder for [`RuleSpec`].
///
/// Raw minute counts and weekday indices are validated in
/// [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct RuleSpecBuilder {
    start: Option<Boundary>,
    end: Option<Boundary>,
    days: Option<Days>,
    frequency: Option<u16>,
    name: Option<String>,
    enable: Option<bool>,
    anchor_date: Option<NaiveDate>,
}

impl RuleSpecBuilder {
    /// Sets the start from a time or a validated minute value.
    #[must_use]
    pub fn start(mut self, start: impl Into<RuleTime>) -> Self {
        self.start = Some(Boundary::Time(start.into()));
        self
    }

    /// Sets the start as minutes since midnight.
    #[must_use]
    pub fn start_minutes(mut self, minutes: u16) -> Self {
        self.start = Some(Boundary::Minutes(minutes));
        self
    }

    /// Sets the end from a time or a validated minute value.
    #[must_use]
    pub fn end(mut self, end: impl Into<RuleTime>) -> Self {
        self.end = Some(Boundary::Time(end.into()));
        self
    }

    /// Sets the end as minutes since midnight.
    #[must_use]
    pub fn end_minutes(mut self, minutes: u16) -> Self {
        self.end = Some(Boundary::Minutes(minutes));
        self
    }

    /// Sets the active weekdays.
    #[must_use]
    pub fn days(mut self, days: DaySet) -> Self {
        self.days = Some(Days::Set(days));
        self
    }

    /// Sets the active weekdays from indices, 0 = Sunday.
    #[must_use]
    pub fn days_of_week(mut self, indices: impl IntoIterator<Item = u8>) -> Self {
        self.days = Some(Days::Indices(indices.into_iter().collect()));
        self
    }

    /// Sets the check interval in minutes.
    #[must_use]
    pub fn frequency(mut self, minutes: u16) -> Self {
        self.frequency = Some(minutes);
        self
    }

    /// Sets the rule label.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets whether the rule is enabled.
    #[must_use]
    pub fn enable(mut self, enable: bool) -> Self {
        self.enable = Some(enable);
        self
    }

    /// Sets the date of a one-shot rule whose start carries no date.
    ///
    /// Unset, today's local date is used when the rule is sent.
    #[must_use]
    pub fn anchor_date(mut self, date: NaiveDate) -> Self {
        self.anchor_date = Some(date);
        self
    }

    /// Validates and builds the rule.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::MissingField` when `start`, `end` or the days are
    /// unset, `ValueError::OutOfRange` for a minute value above 1440 or a zero
    /// frequency, and `ValueError::InvalidWeekday` for an index above 6.
    pub fn build(self) -> Result<RuleSpec, ValueError> {
        let start = self
            .start
            .ok_or(ValueError::MissingField("start"))?
            .resolve()?;
        let end = self.end.ok_or(ValueError::MissingField("end"))?.resolve()?;
        let days = match self.days.ok_or(ValueError::MissingField("days_of_week"))? {
            Days::Set(set) => set,
            Days::Indices(indices) => DaySet::from_indices(indices)?,
        };

        let frequency = self.frequency.unwrap_or(RuleSpec::DEFAULT_FREQUENCY);
        if frequency == 0 {
            return Err(ValueError::OutOfRange {
                min: 1,
                max: u32::from(u16::MAX),
                actual: 0,
            });
        }

        Ok(RuleSpec {
            schedule: Schedule::new(start, end, days),
            frequency,
            name: self.name.unwrap_or_default(),
            enable: self.enable.unwrap_or(true),
            anchor_date: self.anchor_date,
        })
    }
}
