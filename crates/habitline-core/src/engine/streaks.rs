//! Streak scanning and ranking.
//!
//! A streak is a maximal run of consecutive days whose checkmark is not
//! Unchecked. A single unchecked day always terminates a streak; there is
//! no grace period.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::day::Day;

use super::checkmarks::CheckmarkSeries;

/// A maximal run of consecutive checked days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub start: Day,
    pub end: Day,
}

impl Streak {
    pub fn length(&self) -> i64 {
        self.start.days_until(self.end) + 1
    }

    /// Longer first; ties favor the more recent streak.
    fn cmp_longer(&self, other: &Streak) -> Ordering {
        other
            .length()
            .cmp(&self.length())
            .then(other.end.cmp(&self.end))
    }
}

/// Scan a checkmark series for streaks, ascending by start day.
pub(crate) fn scan(series: &CheckmarkSeries) -> Vec<Streak> {
    let mut streaks = Vec::new();
    let mut run_start: Option<Day> = None;

    let oldest = series.oldest();
    for i in 0..series.states.len() {
        let day = oldest.plus(i as i64);
        // states are newest-first
        let checked = series.states[series.states.len() - 1 - i].is_checked();

        match (checked, run_start) {
            (true, None) => run_start = Some(day),
            (false, Some(start)) => {
                streaks.push(Streak { start, end: day.minus(1) });
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        streaks.push(Streak { start, end: series.newest });
    }
    streaks
}

/// The `n` longest streaks of a scan, returned oldest-first.
///
/// Selection ranks by length, ties going to the more recent streak; the
/// selected group is then reordered by end day ascending, which is what
/// chronological chart rendering wants.
pub(crate) fn rank_best(streaks: &[Streak], n: usize) -> Vec<Streak> {
    let mut selected = streaks.to_vec();
    selected.sort_by(Streak::cmp_longer);
    selected.truncate(n);
    selected.sort_by_key(|s| s.end);
    selected
}
