//! Habit frequency: "N times per D days".

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How often a habit is supposed to be performed: `numerator` occurrences
/// required within any `denominator`-day window.
///
/// Invariant: `0 < numerator <= denominator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frequency {
    numerator: u32,
    denominator: u32,
}

impl Frequency {
    /// Every day.
    pub const DAILY: Frequency = Frequency { numerator: 1, denominator: 1 };

    /// Once per week.
    pub const WEEKLY: Frequency = Frequency { numerator: 1, denominator: 7 };

    /// Twice per week.
    pub const TWO_TIMES_PER_WEEK: Frequency = Frequency { numerator: 2, denominator: 7 };

    /// Create a frequency.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidFrequency`] unless
    /// `0 < numerator <= denominator`.
    pub fn new(numerator: u32, denominator: u32) -> Result<Self, CoreError> {
        if numerator == 0 || denominator == 0 || numerator > denominator {
            return Err(CoreError::InvalidFrequency { numerator, denominator });
        }
        Ok(Frequency { numerator, denominator })
    }

    pub fn numerator(self) -> u32 {
        self.numerator
    }

    pub fn denominator(self) -> u32 {
        self.denominator
    }

    /// Expected occurrences per day, as a fraction in `(0, 1]`.
    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    pub fn is_daily(self) -> bool {
        self == Self::DAILY
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_fractions() {
        assert!(Frequency::new(0, 7).is_err());
        assert!(Frequency::new(1, 0).is_err());
        assert!(Frequency::new(8, 7).is_err());
        assert!(Frequency::new(7, 7).is_ok());
    }

    #[test]
    fn daily_and_weekly_constants() {
        assert!(Frequency::DAILY.is_daily());
        assert_eq!(Frequency::DAILY.to_f64(), 1.0);
        assert_eq!(Frequency::WEEKLY, Frequency::new(1, 7).unwrap());
        assert!((Frequency::TWO_TIMES_PER_WEEK.to_f64() - 2.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn display_renders_as_fraction() {
        assert_eq!(Frequency::new(2, 7).unwrap().to_string(), "2/7");
    }
}
