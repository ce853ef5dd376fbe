//! Per-day checkmark derivation.
//!
//! Turns a habit's repetitions (plus coverage intervals, for boolean
//! habits) into exactly one [`CheckState`] per calendar day, from the
//! oldest repetition through today. The resulting series is cached by the
//! engine and invalidated whenever repetitions change.

use serde::{Deserialize, Serialize};

use crate::day::Day;
use crate::habit::Repetition;

use super::intervals::Interval;

/// Derived state of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckState {
    /// The day does not count toward the habit.
    Unchecked,
    /// No check-in that day, but a coverage interval satisfies the
    /// frequency anyway.
    ImpliedChecked,
    /// An actual check-in. Boolean habits carry no amount; numeric habits
    /// carry the measured amount.
    ExplicitlyChecked(Option<f64>),
}

impl CheckState {
    /// Whether the day counts toward streaks.
    pub fn is_checked(&self) -> bool {
        !matches!(self, CheckState::Unchecked)
    }

    /// Numeric amount of the day; zero for anything but an explicit
    /// check-in with an amount.
    pub fn amount(&self) -> f64 {
        match self {
            CheckState::ExplicitlyChecked(Some(v)) => *v,
            _ => 0.0,
        }
    }
}

/// A computed run of checkmarks, newest-first.
///
/// `states[0]` is the state of `newest`; `states[i]` the state of
/// `newest - i`. Days outside the run are Unchecked by definition.
#[derive(Debug, Clone)]
pub(crate) struct CheckmarkSeries {
    pub newest: Day,
    pub states: Vec<CheckState>,
}

impl CheckmarkSeries {
    pub fn oldest(&self) -> Day {
        self.newest.minus(self.states.len() as i64 - 1)
    }

    /// State of one day, or `None` if the day lies outside the computed run.
    pub fn get(&self, day: Day) -> Option<CheckState> {
        if day > self.newest {
            return None;
        }
        let offset = day.days_until(self.newest) as usize;
        self.states.get(offset).copied()
    }

    /// Drop every entry at or after `day`. Returns false when nothing is
    /// left, in which case the caller should discard the series.
    pub fn truncate_from(&mut self, day: Day) -> bool {
        if day > self.newest {
            return true;
        }
        let stale = (day.days_until(self.newest) + 1) as usize;
        if stale >= self.states.len() {
            return false;
        }
        self.states.drain(..stale);
        self.newest = day.minus(1);
        true
    }
}

/// Build the checkmark series for a boolean habit.
///
/// Starts with every day Unchecked, paints coverage intervals as
/// ImpliedChecked (future days excluded), then overwrites repetition days
/// with ExplicitlyChecked. Explicit always wins over implied; the
/// repetition pass runs last specifically so it is never overwritten.
///
/// # Panics
/// Panics on an empty repetition run; callers must guard the
/// zero-repetition case.
pub(crate) fn build_boolean(
    reps: &[Repetition],
    intervals: &[Interval],
    today: Day,
) -> CheckmarkSeries {
    assert!(!reps.is_empty(), "cannot build checkmarks without repetitions");

    let mut begin = reps[0].day;
    if let Some(first) = intervals.first() {
        begin = Day::oldest(begin, first.begin);
    }

    let n_days = (begin.days_until(today) + 1) as usize;
    let mut states = vec![CheckState::Unchecked; n_days];

    for interval in intervals {
        for i in 0..interval.length() {
            let date = interval.begin.plus(i);
            let offset = date.days_until(today);
            if offset < 0 {
                // Interval reaches into the future.
                continue;
            }
            states[offset as usize] = CheckState::ImpliedChecked;
        }
    }

    for rep in reps {
        let offset = rep.day.days_until(today);
        states[offset as usize] = CheckState::ExplicitlyChecked(None);
    }

    CheckmarkSeries { newest: today, states }
}

/// Build the checkmark series for a numeric habit.
///
/// No implicit coverage exists for numeric habits: every day defaults to
/// amount zero, and each repetition day carries its measured amount.
///
/// # Panics
/// Panics on an empty repetition run; callers must guard the
/// zero-repetition case.
pub(crate) fn build_numeric(reps: &[Repetition], today: Day) -> CheckmarkSeries {
    assert!(!reps.is_empty(), "cannot build checkmarks without repetitions");

    let begin = reps[0].day;
    let n_days = (begin.days_until(today) + 1) as usize;
    let mut states = vec![CheckState::Unchecked; n_days];

    for rep in reps {
        let offset = rep.day.days_until(today);
        states[offset as usize] = CheckState::ExplicitlyChecked(Some(rep.value));
    }

    CheckmarkSeries { newest: today, states }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::intervals;
    use crate::frequency::Frequency;

    const TODAY: i64 = 1000;

    fn day(n: i64) -> Day {
        Day::from_days(n).unwrap()
    }

    /// Spec-style day addressing: 0 = today, growing into the past.
    fn days_ago(n: i64) -> Day {
        day(TODAY - n)
    }

    fn checked(days_back: &[i64]) -> Vec<Repetition> {
        let mut reps: Vec<_> = days_back
            .iter()
            .map(|&d| Repetition::checked(days_ago(d)))
            .collect();
        reps.sort_by_key(|r| r.day);
        reps
    }

    #[test]
    fn daily_habit_marks_only_repetition_days() {
        // Repetitions 0, 1 and 3 days ago, daily frequency.
        let reps = checked(&[0, 1, 3]);
        let mut ivals = intervals::build(Frequency::DAILY, &reps);
        intervals::snap(&mut ivals);
        let series = build_boolean(&reps, &ivals, days_ago(0));

        assert_eq!(series.states.len(), 4);
        assert_eq!(series.get(days_ago(0)), Some(CheckState::ExplicitlyChecked(None)));
        assert_eq!(series.get(days_ago(1)), Some(CheckState::ExplicitlyChecked(None)));
        assert_eq!(series.get(days_ago(2)), Some(CheckState::Unchecked));
        assert_eq!(series.get(days_ago(3)), Some(CheckState::ExplicitlyChecked(None)));
    }

    #[test]
    fn weekly_habit_implies_coverage_forward() {
        // One repetition 23 days ago covers days 23..=17.
        let reps = checked(&[23]);
        let mut ivals = intervals::build(Frequency::WEEKLY, &reps);
        intervals::snap(&mut ivals);
        let series = build_boolean(&reps, &ivals, days_ago(0));

        assert_eq!(series.get(days_ago(23)), Some(CheckState::ExplicitlyChecked(None)));
        for d in 17..=22 {
            assert_eq!(series.get(days_ago(d)), Some(CheckState::ImpliedChecked), "day {d}");
        }
        assert_eq!(series.get(days_ago(16)), Some(CheckState::Unchecked));
        assert_eq!(series.get(days_ago(0)), Some(CheckState::Unchecked));
    }

    #[test]
    fn explicit_always_wins_over_implied() {
        // Second rep falls inside the first rep's coverage window.
        let reps = checked(&[10, 7]);
        let mut ivals = intervals::build(Frequency::WEEKLY, &reps);
        intervals::snap(&mut ivals);
        let series = build_boolean(&reps, &ivals, days_ago(0));

        assert_eq!(series.get(days_ago(7)), Some(CheckState::ExplicitlyChecked(None)));
        assert_eq!(series.get(days_ago(10)), Some(CheckState::ExplicitlyChecked(None)));
        assert_eq!(series.get(days_ago(9)), Some(CheckState::ImpliedChecked));
    }

    #[test]
    fn interval_reaching_past_today_is_clipped() {
        let reps = checked(&[2]);
        let mut ivals = intervals::build(Frequency::WEEKLY, &reps);
        intervals::snap(&mut ivals);
        let series = build_boolean(&reps, &ivals, days_ago(0));

        assert_eq!(series.newest, days_ago(0));
        assert_eq!(series.get(days_ago(0)), Some(CheckState::ImpliedChecked));
        assert_eq!(series.get(days_ago(1)), Some(CheckState::ImpliedChecked));
    }

    #[test]
    fn numeric_series_carries_amounts() {
        let mut reps = vec![
            Repetition::amount(days_ago(5), 400.0),
            Repetition::amount(days_ago(3), 300.0),
            Repetition::amount(days_ago(1), 200.0),
        ];
        reps.sort_by_key(|r| r.day);
        let series = build_numeric(&reps, days_ago(0));

        let amounts: Vec<f64> = (1..=5).map(|d| series.get(days_ago(d)).unwrap().amount()).collect();
        assert_eq!(amounts, vec![200.0, 0.0, 300.0, 0.0, 400.0]);
        assert!(series.get(days_ago(3)).unwrap().is_checked());
        assert!(!series.get(days_ago(2)).unwrap().is_checked());
    }

    #[test]
    fn get_outside_the_run_is_none() {
        let reps = checked(&[3]);
        let series = build_numeric(&reps, days_ago(0));
        assert!(series.get(days_ago(4)).is_none());
        assert!(series.get(days_ago(0).plus(1)).is_none());
    }

    #[test]
    fn truncate_from_keeps_the_older_prefix() {
        let reps = checked(&[0, 1, 3]);
        let mut ivals = intervals::build(Frequency::DAILY, &reps);
        intervals::snap(&mut ivals);
        let mut series = build_boolean(&reps, &ivals, days_ago(0));

        assert!(series.truncate_from(days_ago(1)));
        assert_eq!(series.newest, days_ago(2));
        assert_eq!(series.get(days_ago(3)), Some(CheckState::ExplicitlyChecked(None)));
        assert!(series.get(days_ago(1)).is_none());

        // Truncating at or before the oldest entry empties the series.
        assert!(!series.truncate_from(days_ago(3)));
    }
}
