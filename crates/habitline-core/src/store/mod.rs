//! Repetition storage.
//!
//! The derivation engine is written once against the [`RepetitionStore`]
//! trait. Two interchangeable implementations are provided: an in-memory
//! arena ([`MemoryStore`]) used by tests and fixtures, and a SQLite adapter
//! ([`SqliteStore`]) used by the CLI. Stores expose already-materialized,
//! ascending-by-day sequences; the engine itself performs no I/O.

mod memory;
mod sqlite;

use std::path::PathBuf;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::day::Day;
use crate::error::StoreError;
use crate::habit::{HabitId, Repetition};

/// Read/write access to one habit's check-in events.
///
/// `between` returns repetitions ascending by day, endpoints included.
/// At most one repetition exists per habit per day; `add` upserts.
pub trait RepetitionStore: Send + Sync {
    fn oldest(&self, habit: HabitId) -> Result<Option<Repetition>, StoreError>;

    fn between(&self, habit: HabitId, from: Day, to: Day) -> Result<Vec<Repetition>, StoreError>;

    fn contains(&self, habit: HabitId, day: Day) -> Result<bool, StoreError>;

    fn add(&self, habit: HabitId, rep: Repetition) -> Result<(), StoreError>;

    fn remove(&self, habit: HabitId, day: Day) -> Result<(), StoreError>;
}

/// Directory where habitline keeps its data (`~/.config/habitline`).
///
/// Creates the directory if it does not exist.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let dir = dirs::config_dir().ok_or(StoreError::DataDir)?.join("habitline");
    std::fs::create_dir_all(&dir).map_err(|_| StoreError::DataDir)?;
    Ok(dir)
}
