use clap::Subcommand;
use serde::Serialize;

use habitline_core::{CheckState, Clock, SystemClock};

use crate::common::{engine_for, open_store};
use crate::config::Config;

#[derive(Subcommand)]
pub enum ShowAction {
    /// Daily checkmark states
    Checkmarks {
        /// Habit id or name
        habit: String,
        /// Number of days to show, ending today
        #[arg(long, default_value_t = 30)]
        days: i64,
    },
    /// Daily strength scores
    Scores {
        /// Habit id or name
        habit: String,
        /// Number of days to show, ending today
        #[arg(long, default_value_t = 30)]
        days: i64,
    },
    /// Streaks
    Streaks {
        /// Habit id or name
        habit: String,
        /// Show only the N longest streaks (N defaults to the
        /// `default_best` config value)
        #[arg(long, num_args = 0..=1)]
        best: Option<Option<usize>>,
    },
}

#[derive(Serialize)]
struct CheckmarkRow {
    date: String,
    state: CheckState,
}

#[derive(Serialize)]
struct ScoreRow {
    date: String,
    score: f64,
}

#[derive(Serialize)]
struct StreakRow {
    start: String,
    end: String,
    length: i64,
}

pub fn run(action: ShowAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    let store = open_store(&config)?;
    let today = SystemClock.today();

    match action {
        ShowAction::Checkmarks { habit, days } => {
            let engine = engine_for(store.clone(), store.find_habit(&habit)?);
            let from = today.minus((days - 1).max(0));
            let states = engine.checkmarks_between(from, today)?;
            let rows: Vec<CheckmarkRow> = states
                .into_iter()
                .enumerate()
                .map(|(i, state)| CheckmarkRow {
                    date: today.minus(i as i64).to_string(),
                    state,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        ShowAction::Scores { habit, days } => {
            let engine = engine_for(store.clone(), store.find_habit(&habit)?);
            let from = today.minus((days - 1).max(0));
            let values = engine.scores_between(from, today)?;
            let rows: Vec<ScoreRow> = values
                .into_iter()
                .enumerate()
                .map(|(i, score)| ScoreRow {
                    date: today.minus(i as i64).to_string(),
                    score,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        ShowAction::Streaks { habit, best } => {
            let engine = engine_for(store.clone(), store.find_habit(&habit)?);
            let streaks = match best {
                Some(n) => engine.streaks_best(n.unwrap_or(config.default_best))?,
                None => engine.streaks_all()?,
            };
            let rows: Vec<StreakRow> = streaks
                .iter()
                .map(|s| StreakRow {
                    start: s.start.to_string(),
                    end: s.end.to_string(),
                    length: s.length(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }
    Ok(())
}
