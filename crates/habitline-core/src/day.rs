//! Calendar-day value type.
//!
//! All engine computations are day-granular. [`Day`] is a count of whole
//! days since the Unix epoch, so arithmetic and comparisons are plain
//! integer operations and there is no time-of-day or timezone ambiguity
//! inside the engine. Conversions from instants reject anything that is
//! not exactly midnight-aligned; the engine never silently rounds.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// A calendar day, stored as the number of whole days since 1970-01-01.
///
/// Invariant: never negative, always day-aligned.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Day(i64);

impl Day {
    /// The Unix epoch, 1970-01-01.
    pub const ZERO: Day = Day(0);

    /// Create a day from a count of days since the Unix epoch.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidTimestamp`] if `days` is negative.
    pub fn from_days(days: i64) -> Result<Self, CoreError> {
        if days < 0 {
            return Err(CoreError::InvalidTimestamp {
                millis: days.saturating_mul(MILLIS_PER_DAY),
            });
        }
        Ok(Day(days))
    }

    /// Create a day from a Unix timestamp in milliseconds.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidTimestamp`] if the instant is negative
    /// or does not fall exactly on a midnight boundary.
    pub fn from_unix_millis(millis: i64) -> Result<Self, CoreError> {
        if millis < 0 || millis % MILLIS_PER_DAY != 0 {
            return Err(CoreError::InvalidTimestamp { millis });
        }
        Ok(Day(millis / MILLIS_PER_DAY))
    }

    /// Create a day from a calendar date.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidTimestamp`] for dates before 1970-01-01.
    pub fn from_date(date: NaiveDate) -> Result<Self, CoreError> {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        Self::from_days((date - epoch).num_days())
    }

    /// The count of days since the Unix epoch.
    pub fn days(self) -> i64 {
        self.0
    }

    /// The Unix timestamp of this day's midnight, in milliseconds.
    pub fn to_unix_millis(self) -> i64 {
        self.0 * MILLIS_PER_DAY
    }

    /// The calendar date of this day.
    pub fn date(self) -> NaiveDate {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        epoch + chrono::Days::new(self.0 as u64)
    }

    /// The day `n` days after this one, saturating at the epoch.
    pub fn plus(self, n: i64) -> Day {
        Day((self.0 + n).max(0))
    }

    /// The day `n` days before this one, saturating at the epoch.
    pub fn minus(self, n: i64) -> Day {
        self.plus(-n)
    }

    /// Signed number of days from this day until `other`.
    ///
    /// Positive when `other` is in the future relative to `self`.
    pub fn days_until(self, other: Day) -> i64 {
        other.0 - self.0
    }

    /// The older of two days.
    pub fn oldest(a: Day, b: Day) -> Day {
        a.min(b)
    }
}

impl fmt::Debug for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day({}, {})", self.0, self.date())
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_days_rejects_negative() {
        assert!(Day::from_days(-1).is_err());
        assert!(Day::from_days(0).is_ok());
    }

    #[test]
    fn from_unix_millis_requires_midnight_alignment() {
        assert!(Day::from_unix_millis(0).is_ok());
        assert!(Day::from_unix_millis(MILLIS_PER_DAY * 3).is_ok());
        assert!(Day::from_unix_millis(MILLIS_PER_DAY * 3 + 1).is_err());
        assert!(Day::from_unix_millis(-MILLIS_PER_DAY).is_err());
    }

    #[test]
    fn arithmetic_and_ordering() {
        let d = Day::from_days(100).unwrap();
        assert_eq!(d.plus(5).days(), 105);
        assert_eq!(d.minus(5).days(), 95);
        assert_eq!(d.days_until(d.plus(7)), 7);
        assert_eq!(d.days_until(d.minus(7)), -7);
        assert!(d < d.plus(1));
        assert_eq!(Day::oldest(d, d.plus(1)), d);
    }

    #[test]
    fn arithmetic_saturates_at_the_epoch() {
        let d = Day::from_days(5).unwrap();
        assert_eq!(d.minus(10), Day::ZERO);
        assert_eq!(d.plus(-10), Day::ZERO);
        // Saturated days still render instead of panicking.
        assert_eq!(Day::ZERO.minus(3).to_string(), "1970-01-01");
    }

    #[test]
    fn date_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let day = Day::from_date(date).unwrap();
        assert_eq!(day.date(), date);
        assert_eq!(Day::from_unix_millis(day.to_unix_millis()).unwrap(), day);
    }

    #[test]
    fn dates_before_epoch_are_rejected() {
        let date = NaiveDate::from_ymd_opt(1969, 12, 31).unwrap();
        assert!(Day::from_date(date).is_err());
    }
}
