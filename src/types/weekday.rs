// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Weekday selection for rules.
//!
//! Weekdays are indexed the way the device indexes them: 0 is Sunday and 6
//! is Saturday. A [`DaySet`] is an unordered selection of those days.

use std::fmt;

use crate::error::ValueError;

/// A day of the week, indexed from Sunday.
///
/// # Examples
///
/// ```
/// use away_rules::types::Weekday;
///
/// assert_eq!(Weekday::Sunday.index(), 0);
/// assert_eq!(Weekday::try_from(6).unwrap(), Weekday::Saturday);
/// assert!(Weekday::try_from(7).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    /// Index 0.
    Sunday,
    /// Index 1.
    Monday,
    /// Index 2.
    Tuesday,
    /// Index 3.
    Wednesday,
    /// Index 4.
    Thursday,
    /// Index 5.
    Friday,
    /// Index 6.
    Saturday,
}

impl Weekday {
    /// All weekdays in index order.
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Returns the device index (0 = Sunday).
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    const fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl TryFrom<u8> for Weekday {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(ValueError::InvalidWeekday(value))
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(value: chrono::Weekday) -> Self {
        // num_days_from_sunday is always 0..=6
        let idx = value.num_days_from_sunday() as usize;
        Self::ALL[idx]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sunday => "Sun",
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
        };
        f.write_str(name)
    }
}

/// A set of weekdays on which a rule is active.
///
/// Duplicates collapse and insertion order is not kept; iteration always
/// runs Sunday to Saturday.
///
/// # Examples
///
/// ```
/// use away_rules::types::{DaySet, Weekday};
///
/// let weekend = DaySet::from_indices([6, 0]).unwrap();
/// assert_eq!(weekend, DaySet::WEEKEND);
/// assert_eq!(weekend.indices(), vec![0, 6]);
/// assert_eq!(weekend.to_mask(), [1, 0, 0, 0, 0, 0, 1]);
/// assert!(weekend.contains(Weekday::Saturday));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DaySet(u8);

impl DaySet {
    /// No day selected.
    pub const EMPTY: Self = Self(0);

    /// Monday to Friday.
    pub const WEEKDAYS: Self = Self(0b0011_1110);

    /// Saturday and Sunday.
    pub const WEEKEND: Self = Self(0b0100_0001);

    /// Every day of the week.
    pub const EVERY_DAY: Self = Self(0b0111_1111);

    /// Builds a set from weekday indices (0 = Sunday).
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidWeekday` for any index above 6.
    pub fn from_indices<I>(indices: I) -> Result<Self, ValueError>
    where
        I: IntoIterator<Item = u8>,
    {
        indices
            .into_iter()
            .try_fold(Self::EMPTY, |set, idx| -> Result<Self, ValueError> {
                Ok(set.with(Weekday::try_from(idx)?))
            })
    }

    /// Rebuilds a set from the device's seven-slot mask.
    ///
    /// Slot `i` is selected when non-zero. Missing trailing slots count as
    /// unselected; slots past the seventh are ignored.
    #[must_use]
    pub fn from_mask(mask: &[u8]) -> Self {
        Weekday::ALL
            .iter()
            .zip(mask)
            .filter(|(_, slot)| **slot != 0)
            .fold(Self::EMPTY, |set, (day, _)| set.with(*day))
    }

    /// Returns a copy with `day` added.
    #[must_use]
    pub const fn with(self, day: Weekday) -> Self {
        Self(self.0 | day.bit())
    }

    /// Adds a day to the set.
    pub fn insert(&mut self, day: Weekday) {
        self.0 |= day.bit();
    }

    /// Returns true if `day` is selected.
    #[must_use]
    pub const fn contains(&self, day: Weekday) -> bool {
        self.0 & day.bit() != 0
    }

    /// Returns true if no day is selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns the number of selected days.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    /// Iterates over the selected days, Sunday first.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::ALL.into_iter().filter(|day| self.contains(*day))
    }

    /// Returns the selected indices in ascending order.
    #[must_use]
    pub fn indices(&self) -> Vec<u8> {
        self.iter().map(Weekday::index).collect()
    }

    /// Returns the seven-slot 0/1 mask the device expects.
    #[must_use]
    pub fn to_mask(&self) -> [u8; 7] {
        Weekday::ALL.map(|day| u8::from(self.contains(day)))
    }
}

impl FromIterator<Weekday> for DaySet {
    fn from_iter<T: IntoIterator<Item = Weekday>>(iter: T) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl From<Weekday> for DaySet {
    fn from(value: Weekday) -> Self {
        Self::EMPTY.with(value)
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|d| d.to_string()).collect();
        write!(f, "[{}]", names.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_indices() {
        for (i, day) in Weekday::ALL.iter().enumerate() {
            assert_eq!(usize::from(day.index()), i);
        }
    }

    #[test]
    fn chrono_weekday_conversion() {
        assert_eq!(Weekday::from(chrono::Weekday::Sun), Weekday::Sunday);
        assert_eq!(Weekday::from(chrono::Weekday::Mon), Weekday::Monday);
        assert_eq!(Weekday::from(chrono::Weekday::Sat), Weekday::Saturday);
    }

    #[test]
    fn from_indices_rejects_invalid() {
        assert_eq!(
            DaySet::from_indices([1, 9]),
            Err(ValueError::InvalidWeekday(9))
        );
    }

    #[test]
    fn weekdays_preset_matches_indices() {
        assert_eq!(DaySet::from_indices(1..=5).unwrap(), DaySet::WEEKDAYS);
        assert_eq!(DaySet::WEEKDAYS.to_mask(), [0, 1, 1, 1, 1, 1, 0]);
        assert_eq!(DaySet::EVERY_DAY.len(), 7);
    }

    #[test]
    fn duplicates_collapse() {
        let set = DaySet::from_indices([3, 3, 3]).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.indices(), vec![3]);
    }

    #[test]
    fn mask_decoding_is_lenient_on_length() {
        assert_eq!(DaySet::from_mask(&[1, 0, 0]), DaySet::from(Weekday::Sunday));
        assert_eq!(DaySet::from_mask(&[1, 1, 1, 1, 1, 1, 1, 1]), DaySet::EVERY_DAY);
        assert!(DaySet::from_mask(&[]).is_empty());
    }

    #[test]
    fn display_lists_days() {
        assert_eq!(DaySet::WEEKEND.to_string(), "[Sun,Sat]");
        assert_eq!(DaySet::EMPTY.to_string(), "[]");
    }
}
