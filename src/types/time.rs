// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Time-of-day types for rule boundaries.
//!
//! The device stores rule boundaries as minutes since midnight. Callers may
//! supply either that integer directly or any point in time, of which only
//! the hour and minute are kept.
//!
//! # Types
//!
//! - [`MinuteOfDay`] - Minutes since midnight (0-1440)
//! - [`RuleTime`] - Caller-facing start/end input, normalized to [`MinuteOfDay`]

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};

use crate::error::ValueError;

/// Upper bound of a minute-of-day value (midnight at the end of the day).
const MINUTES_PER_DAY: u16 = 1440;

/// Minutes elapsed since midnight.
///
/// Valid range: 0 to 1440. The value 1440 is accepted so that a rule may end
/// at the midnight closing the day.
///
/// # Examples
///
/// ```
/// use away_rules::types::MinuteOfDay;
///
/// let ten_pm = MinuteOfDay::from_hm(22, 0).unwrap();
/// assert_eq!(ten_pm.value(), 1320);
///
/// assert_eq!(MinuteOfDay::END_OF_DAY.value(), 1440);
/// assert!(MinuteOfDay::new(1441).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    /// Midnight at the start of the day.
    pub const MIDNIGHT: Self = Self(0);

    /// Midnight at the end of the day.
    pub const END_OF_DAY: Self = Self(MINUTES_PER_DAY);

    /// Creates a minute-of-day value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `minutes` exceeds 1440.
    pub fn new(minutes: u16) -> Result<Self, ValueError> {
        if minutes > MINUTES_PER_DAY {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: u32::from(MINUTES_PER_DAY),
                actual: u32::from(minutes),
            });
        }
        Ok(Self(minutes))
    }

    /// Creates a value from an hour (0-23) and minute (0-59).
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if either component is out of range.
    pub fn from_hm(hour: u8, minute: u8) -> Result<Self, ValueError> {
        if hour > 23 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 23,
                actual: u32::from(hour),
            });
        }
        if minute > 59 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 59,
                actual: u32::from(minute),
            });
        }
        Ok(Self(u16::from(hour) * 60 + u16::from(minute)))
    }

    /// Keeps the hour and minute of a time, dropping seconds.
    #[must_use]
    pub fn from_time(time: NaiveTime) -> Self {
        // hour <= 23 and minute <= 59, so the result is at most 1439
        #[allow(clippy::cast_possible_truncation)]
        let minutes = (time.hour() * 60 + time.minute()) as u16;
        Self(minutes)
    }

    /// Returns the raw number of minutes since midnight.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Returns the hour component (24 for [`END_OF_DAY`](Self::END_OF_DAY)).
    #[must_use]
    pub const fn hour(&self) -> u16 {
        self.0 / 60
    }

    /// Returns the minute component.
    #[must_use]
    pub const fn minute(&self) -> u16 {
        self.0 % 60
    }
}

impl TryFrom<u16> for MinuteOfDay {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MinuteOfDay> for u16 {
    fn from(value: MinuteOfDay) -> Self {
        value.0
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// A rule boundary as supplied by the caller.
///
/// Both forms normalize to the same [`MinuteOfDay`] before transmission.
/// The date part of [`RuleTime::At`] is only consulted for one-shot rules
/// (rules with no weekday selected).
///
/// # Examples
///
/// ```
/// use away_rules::types::{MinuteOfDay, RuleTime};
/// use chrono::NaiveDate;
///
/// let from_minutes = RuleTime::minutes(1320).unwrap();
/// let at = NaiveDate::from_ymd_opt(2024, 3, 9)
///     .unwrap()
///     .and_hms_opt(22, 0, 45)
///     .unwrap();
/// let from_datetime = RuleTime::from(at);
///
/// assert_eq!(from_minutes.minute_of_day(), from_datetime.minute_of_day());
/// assert_eq!(from_datetime.minute_of_day(), MinuteOfDay::new(1320).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTime {
    /// Minutes since midnight.
    Minutes(MinuteOfDay),
    /// An absolute point in local time.
    At(NaiveDateTime),
}

impl RuleTime {
    /// Creates a rule time from a raw minute count.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `minutes` exceeds 1440.
    pub fn minutes(minutes: u16) -> Result<Self, ValueError> {
        MinuteOfDay::new(minutes).map(Self::Minutes)
    }

    /// Returns the normalized minutes since midnight.
    #[must_use]
    pub fn minute_of_day(&self) -> MinuteOfDay {
        match self {
            Self::Minutes(m) => *m,
            Self::At(dt) => MinuteOfDay::from_time(dt.time()),
        }
    }

    /// Returns the calendar date, if this boundary carries one.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Minutes(_) => None,
            Self::At(dt) => Some(dt.date()),
        }
    }
}

impl From<MinuteOfDay> for RuleTime {
    fn from(value: MinuteOfDay) -> Self {
        Self::Minutes(value)
    }
}

impl From<NaiveTime> for RuleTime {
    fn from(value: NaiveTime) -> Self {
        Self::Minutes(MinuteOfDay::from_time(value))
    }
}

impl From<NaiveDateTime> for RuleTime {
    fn from(value: NaiveDateTime) -> Self {
        Self::At(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for RuleTime {
    fn from(value: DateTime<Tz>) -> Self {
        Self::At(value.naive_local())
    }
}

impl TryFrom<u16> for RuleTime {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::minutes(value)
    }
}
