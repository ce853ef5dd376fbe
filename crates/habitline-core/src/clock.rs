//! Wall-clock injection.
//!
//! "Today" is the only ambient input the engine has. It comes in through a
//! trait so that tests can pin the calendar while production code follows
//! the system clock.

use chrono::Utc;

use crate::day::Day;

/// Source of the current calendar day.
pub trait Clock: Send + Sync {
    fn today(&self) -> Day;
}

/// System clock, in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Day {
        Day::from_date(Utc::now().date_naive()).expect("system date before the Unix epoch")
    }
}

/// Clock pinned to a fixed day, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Day);

impl Clock for FixedClock {
    fn today(&self) -> Day {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_returns_its_day() {
        let day = Day::from_days(500).unwrap();
        assert_eq!(FixedClock(day).today(), day);
    }

    #[test]
    fn system_clock_is_past_epoch() {
        assert!(SystemClock.today() > Day::ZERO);
    }
}
