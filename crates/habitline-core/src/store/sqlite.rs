//! SQLite-backed habit and repetition storage.
//!
//! Thin adapter: the schema mirrors the engine's data model directly
//! (days are stored as integer day counts, amounts as REAL) and no
//! derivation logic lives here. The engine only ever sees this type
//! through the [`RepetitionStore`] trait.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};

use crate::day::Day;
use crate::error::StoreError;
use crate::frequency::Frequency;
use crate::habit::{Habit, HabitId, HabitKind, Repetition};

use super::{data_dir, RepetitionStore};

/// SQLite database holding habit records and their repetitions.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the database at `~/.config/habitline/habitline.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        Self::open_at(data_dir()?.join("habitline.db"))
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        let store = Self { conn: Mutex::new(conn) };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn: Mutex::new(conn) };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS habits (
                id           TEXT PRIMARY KEY,
                name         TEXT NOT NULL,
                kind         TEXT NOT NULL,
                freq_num     INTEGER NOT NULL,
                freq_den     INTEGER NOT NULL,
                target_value REAL NOT NULL DEFAULT 0,
                archived     INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS repetitions (
                habit_id TEXT NOT NULL,
                day      INTEGER NOT NULL,
                value    REAL NOT NULL,
                PRIMARY KEY (habit_id, day)
            );

            CREATE INDEX IF NOT EXISTS idx_repetitions_habit_day
                ON repetitions(habit_id, day);",
        )?;
        Ok(())
    }

    /// Insert or update a habit record.
    pub fn upsert_habit(&self, habit: &Habit) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        let kind = match habit.kind {
            HabitKind::Boolean => "boolean",
            HabitKind::Numeric => "numeric",
        };
        conn.execute(
            "INSERT INTO habits (id, name, kind, freq_num, freq_den, target_value, archived)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                kind = excluded.kind,
                freq_num = excluded.freq_num,
                freq_den = excluded.freq_den,
                target_value = excluded.target_value,
                archived = excluded.archived",
            params![
                habit.id.to_string(),
                habit.name,
                kind,
                habit.frequency.numerator(),
                habit.frequency.denominator(),
                habit.target_value,
                habit.archived as i64,
            ],
        )?;
        Ok(())
    }

    /// List all habit records, archived ones included.
    pub fn list_habits(&self) -> Result<Vec<Habit>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, name, kind, freq_num, freq_den, target_value, archived
             FROM habits ORDER BY name",
        )?;
        let habits = stmt
            .query_map([], row_to_habit)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(habits)
    }

    /// Look a habit up by id or, failing that, by exact name.
    pub fn find_habit(&self, id_or_name: &str) -> Result<Habit, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, name, kind, freq_num, freq_den, target_value, archived
             FROM habits WHERE id = ?1 OR name = ?1 LIMIT 1",
        )?;
        stmt.query_row([id_or_name], row_to_habit)
            .optional()?
            .ok_or_else(|| StoreError::HabitNotFound(id_or_name.to_string()))
    }

    /// Set a habit's archived flag.
    pub fn set_archived(&self, habit: HabitId, archived: bool) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        let n = conn.execute(
            "UPDATE habits SET archived = ?2 WHERE id = ?1",
            params![habit.to_string(), archived as i64],
        )?;
        if n == 0 {
            return Err(StoreError::HabitNotFound(habit.to_string()));
        }
        Ok(())
    }
}

fn row_to_habit(row: &rusqlite::Row<'_>) -> rusqlite::Result<Habit> {
    let id: String = row.get(0)?;
    let kind: String = row.get(2)?;
    let freq_num: u32 = row.get(3)?;
    let freq_den: u32 = row.get(4)?;
    Ok(Habit {
        id: HabitId::parse(&id).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                format!("bad habit id: {id}").into(),
            )
        })?,
        name: row.get(1)?,
        kind: match kind.as_str() {
            "numeric" => HabitKind::Numeric,
            _ => HabitKind::Boolean,
        },
        frequency: Frequency::new(freq_num, freq_den).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Integer,
                e.to_string().into(),
            )
        })?,
        target_value: row.get(5)?,
        archived: row.get::<_, i64>(6)? != 0,
    })
}

fn to_day(idx: usize, days: i64) -> rusqlite::Result<Day> {
    Day::from_days(days)
        .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(idx, days))
}

impl RepetitionStore for SqliteStore {
    fn oldest(&self, habit: HabitId) -> Result<Option<Repetition>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let rep = conn
            .query_row(
                "SELECT day, value FROM repetitions
                 WHERE habit_id = ?1 ORDER BY day ASC LIMIT 1",
                [habit.to_string()],
                |row| {
                    Ok(Repetition {
                        day: to_day(0, row.get(0)?)?,
                        value: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(rep)
    }

    fn between(&self, habit: HabitId, from: Day, to: Day) -> Result<Vec<Repetition>, StoreError> {
        if from > to {
            return Ok(Vec::new());
        }
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT day, value FROM repetitions
             WHERE habit_id = ?1 AND day >= ?2 AND day <= ?3
             ORDER BY day ASC",
        )?;
        let reps = stmt
            .query_map(
                params![habit.to_string(), from.days(), to.days()],
                |row| {
                    Ok(Repetition {
                        day: to_day(0, row.get(0)?)?,
                        value: row.get(1)?,
                    })
                },
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reps)
    }

    fn contains(&self, habit: HabitId, day: Day) -> Result<bool, StoreError> {
        let conn = self.conn.lock().unwrap();
        let n: i64 = conn.query_row(
            "SELECT COUNT(*) FROM repetitions WHERE habit_id = ?1 AND day = ?2",
            params![habit.to_string(), day.days()],
            |row| row.get(0),
        )?;
        Ok(n > 0)
    }

    fn add(&self, habit: HabitId, rep: Repetition) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO repetitions (habit_id, day, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(habit_id, day) DO UPDATE SET value = excluded.value",
            params![habit.to_string(), rep.day.days(), rep.value],
        )?;
        Ok(())
    }

    fn remove(&self, habit: HabitId, day: Day) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "DELETE FROM repetitions WHERE habit_id = ?1 AND day = ?2",
            params![habit.to_string(), day.days()],
        )?;
        Ok(())
    }
}
