//! Habit records and check-in events.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::day::Day;
use crate::frequency::Frequency;

/// Unique habit identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(Uuid);

impl HabitId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        HabitId(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(HabitId)
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a habit records yes/no check-ins or measured amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitKind {
    Boolean,
    Numeric,
}

/// A tracked habit and the parameters the derivation engine needs.
///
/// Only engine-relevant fields live here; presentation concerns (color,
/// position, reminders) belong to outer layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub kind: HabitKind,
    pub frequency: Frequency,
    /// Daily target amount for numeric habits; ignored for boolean habits.
    pub target_value: f64,
    pub archived: bool,
}

impl Habit {
    /// Create a yes/no habit.
    pub fn boolean(name: impl Into<String>, frequency: Frequency) -> Self {
        Habit {
            id: HabitId::new(),
            name: name.into(),
            kind: HabitKind::Boolean,
            frequency,
            target_value: 0.0,
            archived: false,
        }
    }

    /// Create a measured habit with a daily target amount.
    pub fn numeric(name: impl Into<String>, frequency: Frequency, target_value: f64) -> Self {
        Habit {
            id: HabitId::new(),
            name: name.into(),
            kind: HabitKind::Numeric,
            frequency,
            target_value,
            archived: false,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == HabitKind::Numeric
    }
}

/// A single recorded check-in event.
///
/// For boolean habits the value is a constant marker; for numeric habits it
/// is the signed measured amount. Repetitions are owned by the
/// [`RepetitionStore`](crate::store::RepetitionStore); the engine only reads
/// ascending-by-day sequences of them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Repetition {
    pub day: Day,
    pub value: f64,
}

impl Repetition {
    /// Marker value recorded by boolean check-ins.
    pub const CHECKED: f64 = 1.0;

    pub fn checked(day: Day) -> Self {
        Repetition { day, value: Self::CHECKED }
    }

    pub fn amount(day: Day, value: f64) -> Self {
        Repetition { day, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn habit_constructors() {
        let h = Habit::boolean("exercise", Frequency::TWO_TIMES_PER_WEEK);
        assert_eq!(h.kind, HabitKind::Boolean);
        assert!(!h.is_numeric());
        assert!(!h.archived);

        let n = Habit::numeric("run meters", Frequency::DAILY, 1000.0);
        assert!(n.is_numeric());
        assert_eq!(n.target_value, 1000.0);
    }

    #[test]
    fn habit_serializes_to_json() {
        let h = Habit::boolean("meditate", Frequency::WEEKLY);
        let json = serde_json::to_string(&h).unwrap();
        assert!(json.contains("\"kind\":\"boolean\""));
        let back: Habit = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, h.id);
        assert_eq!(back.frequency, h.frequency);
    }
}
