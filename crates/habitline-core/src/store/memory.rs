//! In-memory repetition store.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use crate::day::Day;
use crate::error::StoreError;
use crate::habit::{HabitId, Repetition};

use super::RepetitionStore;

/// In-memory arena keyed by habit, one `BTreeMap<Day, f64>` per habit.
///
/// Used by tests and as a fixture for engine development; the SQLite
/// adapter replaces it in production wiring.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<HashMap<HabitId, BTreeMap<Day, f64>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of repetitions recorded for a habit.
    pub fn len(&self, habit: HabitId) -> usize {
        self.inner
            .lock()
            .unwrap()
            .get(&habit)
            .map_or(0, |reps| reps.len())
    }

    pub fn is_empty(&self, habit: HabitId) -> bool {
        self.len(habit) == 0
    }
}

impl RepetitionStore for MemoryStore {
    fn oldest(&self, habit: HabitId) -> Result<Option<Repetition>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.get(&habit).and_then(|reps| {
            reps.iter()
                .next()
                .map(|(&day, &value)| Repetition { day, value })
        }))
    }

    fn between(&self, habit: HabitId, from: Day, to: Day) -> Result<Vec<Repetition>, StoreError> {
        if from > to {
            return Ok(Vec::new());
        }
        let inner = self.inner.lock().unwrap();
        Ok(inner.get(&habit).map_or_else(Vec::new, |reps| {
            reps.range(from..=to)
                .map(|(&day, &value)| Repetition { day, value })
                .collect()
        }))
    }

    fn contains(&self, habit: HabitId, day: Day) -> Result<bool, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.get(&habit).is_some_and(|reps| reps.contains_key(&day)))
    }

    fn add(&self, habit: HabitId, rep: Repetition) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.entry(habit).or_default().insert(rep.day, rep.value);
        Ok(())
    }

    fn remove(&self, habit: HabitId, day: Day) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(reps) = inner.get_mut(&habit) {
            reps.remove(&day);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: i64) -> Day {
        Day::from_days(n).unwrap()
    }

    #[test]
    fn add_query_remove_round_trip() {
        let store = MemoryStore::new();
        let habit = HabitId::new();

        store.add(habit, Repetition::checked(day(10))).unwrap();
        store.add(habit, Repetition::checked(day(12))).unwrap();
        store.add(habit, Repetition::checked(day(11))).unwrap();

        assert_eq!(store.oldest(habit).unwrap().unwrap().day, day(10));
        assert!(store.contains(habit, day(11)).unwrap());

        let reps = store.between(habit, day(10), day(12)).unwrap();
        let days: Vec<_> = reps.iter().map(|r| r.day.days()).collect();
        assert_eq!(days, vec![10, 11, 12]);

        store.remove(habit, day(11)).unwrap();
        assert!(!store.contains(habit, day(11)).unwrap());
        assert_eq!(store.len(habit), 2);
    }

    #[test]
    fn between_with_inverted_range_is_empty() {
        let store = MemoryStore::new();
        let habit = HabitId::new();
        store.add(habit, Repetition::checked(day(5))).unwrap();
        assert!(store.between(habit, day(9), day(2)).unwrap().is_empty());
    }

    #[test]
    fn add_upserts_same_day() {
        let store = MemoryStore::new();
        let habit = HabitId::new();
        store.add(habit, Repetition::amount(day(5), 200.0)).unwrap();
        store.add(habit, Repetition::amount(day(5), 300.0)).unwrap();
        let reps = store.between(habit, day(5), day(5)).unwrap();
        assert_eq!(reps.len(), 1);
        assert_eq!(reps[0].value, 300.0);
    }

    #[test]
    fn habits_are_isolated() {
        let store = MemoryStore::new();
        let (a, b) = (HabitId::new(), HabitId::new());
        store.add(a, Repetition::checked(day(3))).unwrap();
        assert!(store.oldest(b).unwrap().is_none());
    }
}
