//! Shared helpers for CLI commands.

use std::sync::Arc;

use chrono::NaiveDate;

use habitline_core::{
    Clock, Day, Frequency, Habit, HabitEngine, SqliteStore, SystemClock,
};

use crate::config::Config;

pub fn open_store(config: &Config) -> Result<Arc<SqliteStore>, Box<dyn std::error::Error>> {
    let store = match &config.database_path {
        Some(path) => SqliteStore::open_at(path)?,
        None => SqliteStore::open()?,
    };
    Ok(Arc::new(store))
}

pub fn engine_for(store: Arc<SqliteStore>, habit: Habit) -> HabitEngine {
    HabitEngine::new(habit, store)
}

/// Parse a `YYYY-MM-DD` argument; defaults to today.
pub fn parse_day(arg: Option<&str>) -> Result<Day, Box<dyn std::error::Error>> {
    match arg {
        None => Ok(SystemClock.today()),
        Some(s) => {
            let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
            Ok(Day::from_date(date)?)
        }
    }
}

/// Parse a frequency argument: `daily`, `weekly` or `N/D`.
pub fn parse_frequency(s: &str) -> Result<Frequency, Box<dyn std::error::Error>> {
    match s {
        "daily" => return Ok(Frequency::DAILY),
        "weekly" => return Ok(Frequency::WEEKLY),
        _ => {}
    }
    let parsed = s
        .split_once('/')
        .and_then(|(num, den)| Some((num.trim().parse().ok()?, den.trim().parse().ok()?)));
    let Some((num, den)) = parsed else {
        return Err(format!("invalid frequency '{s}' (expected daily, weekly or N/D)").into());
    };
    Ok(Frequency::new(num, den)?)
}
