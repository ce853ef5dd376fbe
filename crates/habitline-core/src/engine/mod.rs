//! The per-habit derivation engine.
//!
//! [`HabitEngine`] owns one habit's three derived views (checkmarks,
//! scores, streaks) and the cache/invalidation protocol shared between
//! them. It reads repetitions through the [`RepetitionStore`] trait and
//! performs no I/O of its own.
//!
//! All caches live behind a single mutex, which serializes computation per
//! habit and makes a toggle (store write plus cascading invalidation)
//! atomic with respect to concurrent readers. No cross-habit coordination
//! exists or is needed.

mod checkmarks;
mod intervals;
mod scores;
mod streaks;

use std::sync::{Arc, Mutex};

pub use checkmarks::CheckState;
pub use scores::{multiplier, step, ComputedRange};
pub use streaks::Streak;

use checkmarks::CheckmarkSeries;
use scores::ScoreCache;

use crate::clock::{Clock, SystemClock};
use crate::day::Day;
use crate::error::Result;
use crate::habit::{Habit, HabitId, HabitKind, Repetition};
use crate::store::RepetitionStore;

/// Emitted by a mutation: everything derived at or after `from` for this
/// habit has been discarded. Orchestration layers (UI refresh, sync) react
/// to this value instead of registering observer callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invalidation {
    pub habit_id: HabitId,
    pub from: Day,
}

/// Streak scan result, valid only for the day it was computed on.
struct StreakCache {
    through: Day,
    streaks: Vec<Streak>,
}

#[derive(Default)]
struct Caches {
    checkmarks: Option<CheckmarkSeries>,
    scores: ScoreCache,
    streaks: Option<StreakCache>,
}

/// Derivation engine for one habit.
pub struct HabitEngine {
    habit: Habit,
    store: Arc<dyn RepetitionStore>,
    clock: Arc<dyn Clock>,
    caches: Mutex<Caches>,
}

impl HabitEngine {
    pub fn new(habit: Habit, store: Arc<dyn RepetitionStore>) -> Self {
        Self::with_clock(habit, store, Arc::new(SystemClock))
    }

    pub fn with_clock(habit: Habit, store: Arc<dyn RepetitionStore>, clock: Arc<dyn Clock>) -> Self {
        HabitEngine {
            habit,
            store,
            clock,
            caches: Mutex::new(Caches::default()),
        }
    }

    pub fn habit(&self) -> &Habit {
        &self.habit
    }

    /// One checkmark per day in `[from, to]`, newest-first.
    ///
    /// `from > to` yields an empty result, as does a habit with no
    /// repetitions at all. Days outside the computed run are Unchecked.
    pub fn checkmarks_between(&self, from: Day, to: Day) -> Result<Vec<CheckState>> {
        if from > to {
            return Ok(Vec::new());
        }
        let mut caches = self.caches.lock().unwrap();
        self.refresh_checkmarks(&mut caches, to)?;
        let Some(series) = &caches.checkmarks else {
            return Ok(Vec::new());
        };

        let n_days = from.days_until(to) + 1;
        let mut states = Vec::with_capacity(n_days as usize);
        for i in 0..n_days {
            let day = to.minus(i);
            states.push(series.get(day).unwrap_or(CheckState::Unchecked));
        }
        Ok(states)
    }

    /// Today's checkmark; Unchecked for a habit with no repetitions.
    pub fn today_checkmark(&self) -> Result<CheckState> {
        let today = self.clock.today();
        let states = self.checkmarks_between(today, today)?;
        Ok(states.first().copied().unwrap_or(CheckState::Unchecked))
    }

    /// Strength score of one day; zero for a habit with no repetitions.
    pub fn score_at(&self, day: Day) -> Result<f64> {
        let mut caches = self.caches.lock().unwrap();
        self.refresh_scores(&mut caches, day, day)?;
        Ok(caches.scores.value(day).unwrap_or(0.0))
    }

    /// One score per day in `[from, to]`, newest-first; empty when
    /// `from > to`.
    pub fn scores_between(&self, from: Day, to: Day) -> Result<Vec<f64>> {
        if from > to {
            return Ok(Vec::new());
        }
        let mut caches = self.caches.lock().unwrap();
        self.refresh_scores(&mut caches, from, to)?;

        let n_days = from.days_until(to) + 1;
        let mut values = Vec::with_capacity(n_days as usize);
        for i in 0..n_days {
            let day = to.minus(i);
            values.push(caches.scores.value(day).unwrap_or(0.0));
        }
        Ok(values)
    }

    /// Every streak, most recent first.
    pub fn streaks_all(&self) -> Result<Vec<Streak>> {
        let mut caches = self.caches.lock().unwrap();
        self.refresh_streaks(&mut caches)?;
        let mut all = match &caches.streaks {
            Some(cache) => cache.streaks.clone(),
            None => Vec::new(),
        };
        all.reverse();
        Ok(all)
    }

    /// The `n` longest streaks, oldest-first (ties favor recency).
    pub fn streaks_best(&self, n: usize) -> Result<Vec<Streak>> {
        let mut caches = self.caches.lock().unwrap();
        self.refresh_streaks(&mut caches)?;
        let scanned = caches.streaks.as_ref().map_or(&[][..], |c| c.streaks.as_slice());
        Ok(streaks::rank_best(scanned, n))
    }

    /// Discard all cached checkmark/score/streak state at or after `day`.
    ///
    /// Collaborators that mutate the repetition store directly must call
    /// this for every repetition added or removed at or after `day`.
    pub fn invalidate_from(&self, day: Day) {
        let mut caches = self.caches.lock().unwrap();
        Self::invalidate_caches(&mut caches, day);
    }

    /// Toggle a boolean habit's check-in on `day`.
    ///
    /// The store write and the cascading invalidation happen under the
    /// cache lock, so readers see either the pre-toggle state or the fully
    /// invalidated one.
    pub fn toggle(&self, day: Day) -> Result<Invalidation> {
        debug_assert_eq!(self.habit.kind, HabitKind::Boolean);
        let mut caches = self.caches.lock().unwrap();
        if self.store.contains(self.habit.id, day)? {
            self.store.remove(self.habit.id, day)?;
        } else {
            self.store.add(self.habit.id, Repetition::checked(day))?;
        }
        Self::invalidate_caches(&mut caches, day);
        Ok(Invalidation { habit_id: self.habit.id, from: day })
    }

    /// Record a numeric habit's amount on `day`; zero removes the entry.
    pub fn set_value(&self, day: Day, amount: f64) -> Result<Invalidation> {
        debug_assert_eq!(self.habit.kind, HabitKind::Numeric);
        let mut caches = self.caches.lock().unwrap();
        if amount == 0.0 {
            self.store.remove(self.habit.id, day)?;
        } else {
            self.store.add(self.habit.id, Repetition::amount(day, amount))?;
        }
        Self::invalidate_caches(&mut caches, day);
        Ok(Invalidation { habit_id: self.habit.id, from: day })
    }

    fn invalidate_caches(caches: &mut Caches, from: Day) {
        let keep = match &mut caches.checkmarks {
            Some(series) => series.truncate_from(from),
            None => true,
        };
        if !keep {
            caches.checkmarks = None;
        }
        caches.scores.truncate_from(from);
        caches.streaks = None;
    }

    /// Make sure the checkmark cache can answer queries through `through`.
    ///
    /// Queries entirely inside the cached run are served as-is; anything
    /// beyond it triggers a full rebuild from the repetition store, since
    /// coverage intervals near the boundary may reach backward.
    fn refresh_checkmarks(&self, caches: &mut Caches, through: Day) -> Result<()> {
        let today = self.clock.today();
        if let Some(series) = &caches.checkmarks {
            if through <= series.newest || series.newest == today {
                return Ok(());
            }
        }

        let Some(oldest) = self.store.oldest(self.habit.id)? else {
            caches.checkmarks = None;
            return Ok(());
        };
        let reps = self.store.between(self.habit.id, oldest.day, today)?;
        if reps.is_empty() {
            caches.checkmarks = None;
            return Ok(());
        }

        let series = match self.habit.kind {
            HabitKind::Numeric => checkmarks::build_numeric(&reps, today),
            HabitKind::Boolean => {
                let mut ivals = intervals::build(self.habit.frequency, &reps);
                intervals::snap(&mut ivals);
                checkmarks::build_boolean(&reps, &ivals, today)
            }
        };
        caches.checkmarks = Some(series);
        Ok(())
    }

    /// Make sure every day in `[from, to]` has a cached score.
    ///
    /// First computation seeds zero at the day before the earliest
    /// repetition (or before `from`, whichever is older). Afterwards only
    /// the missing edges are computed: a backward fill seeded with zero and
    /// a forward extension seeded with the newest cached score. Days inside
    /// the cached range are never recomputed.
    fn refresh_scores(&self, caches: &mut Caches, from: Day, to: Day) -> Result<()> {
        self.refresh_checkmarks(caches, to)?;
        let Caches { checkmarks, scores, .. } = &mut *caches;
        let series = checkmarks.as_ref();

        match scores.range() {
            None => {
                let mut start = from;
                if let Some(oldest) = self.store.oldest(self.habit.id)? {
                    start = Day::oldest(start, oldest.day);
                }
                let block = scores::compute_span(&self.habit, series, start, to, 0.0);
                scores.install(start, to, block);
            }
            Some(range) => {
                if from < range.oldest {
                    let block = scores::compute_span(
                        &self.habit,
                        series,
                        from,
                        range.oldest.minus(1),
                        0.0,
                    );
                    scores.extend_older(from, block);
                }
                if to > range.newest {
                    let previous = scores
                        .newest_value()
                        .expect("non-empty score cache has a newest value");
                    let block = scores::compute_span(
                        &self.habit,
                        series,
                        range.newest.plus(1),
                        to,
                        previous,
                    );
                    scores.extend_newer(to, block);
                }
            }
        }
        Ok(())
    }

    /// Make sure the streak cache reflects a scan through today.
    ///
    /// A scan is only valid for the day it was computed on: once the day
    /// advances, a coverage interval may extend the newest streak, so a
    /// stale scan is recomputed rather than served.
    fn refresh_streaks(&self, caches: &mut Caches) -> Result<()> {
        let today = self.clock.today();
        if caches.streaks.as_ref().is_some_and(|c| c.through == today) {
            return Ok(());
        }
        self.refresh_checkmarks(caches, today)?;
        let scanned = match &caches.checkmarks {
            Some(series) => streaks::scan(series),
            None => Vec::new(),
        };
        caches.streaks = Some(StreakCache { through: today, streaks: scanned });
        Ok(())
    }
}
