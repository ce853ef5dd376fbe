//! # Habitline Core Library
//!
//! This library provides the habit derivation engine for Habitline. From a
//! sparse list of per-day check-in events it derives three time-series
//! views per habit: a daily checkmark state, a continuously decaying
//! strength score, and a set of streaks, all maintained under an
//! invalidate-and-recompute caching discipline.
//!
//! ## Architecture
//!
//! - **Value types**: [`Day`], [`Frequency`], [`CheckState`] -- calendar
//!   arithmetic and habit parameters with validating constructors
//! - **Engine**: [`HabitEngine`] -- interval building/snapping, checkmark
//!   derivation, exponential-decay scoring, streak scanning
//! - **Storage**: the [`RepetitionStore`] trait with an in-memory arena
//!   for tests and a SQLite adapter for the CLI
//!
//! The engine performs no I/O, holds no global state, and serializes all
//! computation per habit; mutations return an explicit [`Invalidation`]
//! event instead of firing observer callbacks.

pub mod clock;
pub mod day;
pub mod engine;
pub mod error;
pub mod frequency;
pub mod habit;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use day::Day;
pub use engine::{CheckState, ComputedRange, HabitEngine, Invalidation, Streak};
pub use error::{CoreError, Result, StoreError};
pub use frequency::Frequency;
pub use habit::{Habit, HabitId, HabitKind, Repetition};
pub use store::{MemoryStore, RepetitionStore, SqliteStore};
