//! Habit strength scores.
//!
//! The score is a first-order exponential smoothing of the daily checkmark
//! signal: `score(t) = score(t-1) * m + x(t) * (1 - m)` with
//! `m = 0.5^(frequency / 13)`. The constant 13 sets the half-life in units
//! of expected repetitions, so low-frequency habits decay more slowly in
//! elapsed days. Scores are computed incrementally: the cache always holds
//! one contiguous span of days, tracked by an explicit [`ComputedRange`].

use serde::{Deserialize, Serialize};

use crate::day::Day;
use crate::frequency::Frequency;
use crate::habit::{Habit, HabitKind};

use super::checkmarks::CheckmarkSeries;

/// Half-life of the decay, in expected repetitions.
const HALF_LIFE_REPETITIONS: f64 = 13.0;

/// The contiguous span of days whose scores are cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedRange {
    pub oldest: Day,
    pub newest: Day,
}

/// Per-day decay multiplier for a habit frequency.
pub fn multiplier(frequency: Frequency) -> f64 {
    0.5f64.powf(frequency.to_f64() / HALF_LIFE_REPETITIONS)
}

/// One step of the recurrence.
pub fn step(multiplier: f64, previous: f64, checkmark: f64) -> f64 {
    previous * multiplier + checkmark * (1.0 - multiplier)
}

/// Normalized checkmark signal of one day, in `[0, 1]`.
///
/// Days outside the computed checkmark run contribute zero.
fn signal(habit: &Habit, series: Option<&CheckmarkSeries>, day: Day) -> f64 {
    let Some(series) = series else { return 0.0 };
    let Some(state) = series.get(day) else { return 0.0 };
    match habit.kind {
        HabitKind::Boolean => {
            if state.is_checked() {
                1.0
            } else {
                0.0
            }
        }
        HabitKind::Numeric => {
            if habit.target_value <= 0.0 {
                return 0.0;
            }
            (state.amount() / habit.target_value).min(1.0)
        }
    }
}

/// Compute the scores of every day in `[from, to]`, oldest-first, seeded
/// with `previous`, the score of the day just before `from`.
pub(crate) fn compute_span(
    habit: &Habit,
    series: Option<&CheckmarkSeries>,
    from: Day,
    to: Day,
    mut previous: f64,
) -> Vec<f64> {
    let m = multiplier(habit.frequency);
    let n_days = from.days_until(to) + 1;
    let mut values = Vec::with_capacity(n_days.max(0) as usize);
    for i in 0..n_days {
        let day = from.plus(i);
        previous = step(m, previous, signal(habit, series, day));
        values.push(previous);
    }
    values
}

/// Incrementally maintained score cache.
///
/// Holds the scores of one contiguous span of days, newest-first, together
/// with the [`ComputedRange`] describing that span; the two are always
/// updated together. The recurrence makes every score depend on all older
/// scores, so invalidation always discards a full suffix, never a hole,
/// and extension blocks must join the span exactly.
#[derive(Debug, Default)]
pub(crate) struct ScoreCache {
    range: Option<ComputedRange>,
    /// `values[0]` is the score of `range.newest`.
    values: Vec<f64>,
}

impl ScoreCache {
    pub fn range(&self) -> Option<ComputedRange> {
        self.range
    }

    /// Cached score of one day, if that day is inside the computed range.
    pub fn value(&self, day: Day) -> Option<f64> {
        let range = self.range?;
        if day < range.oldest || day > range.newest {
            return None;
        }
        let offset = day.days_until(range.newest) as usize;
        Some(self.values[offset])
    }

    /// Score of the newest computed day.
    pub fn newest_value(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Install a freshly computed span into an empty cache.
    ///
    /// # Panics
    /// Panics if the cache is not empty or the block length does not match
    /// the span.
    pub fn install(&mut self, oldest: Day, newest: Day, oldest_first: Vec<f64>) {
        assert!(self.range.is_none(), "score cache already installed");
        assert_eq!(
            oldest.days_until(newest) + 1,
            oldest_first.len() as i64,
            "score block does not match its span"
        );
        let mut values = oldest_first;
        values.reverse();
        self.values = values;
        self.range = Some(ComputedRange { oldest, newest });
    }

    /// Extend the computed range forward through `newest`.
    ///
    /// # Panics
    /// Panics if the block does not start exactly at the day after the
    /// currently cached newest day.
    pub fn extend_newer(&mut self, newest: Day, oldest_first: Vec<f64>) {
        let range = self.range.expect("extend_newer on an empty score cache");
        assert_eq!(
            range.newest.days_until(newest),
            oldest_first.len() as i64,
            "gap in score history"
        );
        let mut values = oldest_first;
        values.reverse();
        values.append(&mut self.values);
        self.values = values;
        self.range = Some(ComputedRange { oldest: range.oldest, newest });
    }

    /// Extend the computed range backward through `oldest`.
    ///
    /// # Panics
    /// Panics if the block does not end exactly at the day before the
    /// currently cached oldest day.
    pub fn extend_older(&mut self, oldest: Day, oldest_first: Vec<f64>) {
        let range = self.range.expect("extend_older on an empty score cache");
        assert_eq!(
            oldest.days_until(range.oldest),
            oldest_first.len() as i64,
            "gap in score history"
        );
        let mut block = oldest_first;
        block.reverse();
        self.values.append(&mut block);
        self.range = Some(ComputedRange { oldest, newest: range.newest });
    }

    /// Discard every cached score at or after `day`.
    pub fn truncate_from(&mut self, day: Day) {
        let Some(range) = self.range else { return };
        if day > range.newest {
            return;
        }
        if day <= range.oldest {
            self.clear();
            return;
        }
        let stale = (day.days_until(range.newest) + 1) as usize;
        self.values.drain(..stale);
        self.range = Some(ComputedRange { oldest: range.oldest, newest: day.minus(1) });
    }

    pub fn clear(&mut self) {
        self.range = None;
        self.values.clear();
    }
}
