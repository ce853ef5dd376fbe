use clap::Subcommand;

use habitline_core::Habit;

use crate::common::{open_store, parse_frequency};
use crate::config::Config;

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a habit
    Add {
        name: String,
        /// Required rate: "daily", "weekly" or "N/D"
        #[arg(long, default_value = "daily")]
        frequency: String,
        /// Track a measured amount instead of yes/no
        #[arg(long)]
        numeric: bool,
        /// Daily target amount (numeric habits only)
        #[arg(long, default_value_t = 1.0)]
        target: f64,
    },
    /// List habits
    List {
        /// Include archived habits
        #[arg(long)]
        archived: bool,
    },
    /// Archive a habit
    Archive {
        /// Habit id or name
        habit: String,
    },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(&Config::load())?;

    match action {
        HabitAction::Add { name, frequency, numeric, target } => {
            let frequency = parse_frequency(&frequency)?;
            let habit = if numeric {
                Habit::numeric(name, frequency, target)
            } else {
                Habit::boolean(name, frequency)
            };
            store.upsert_habit(&habit)?;
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::List { archived } => {
            let habits: Vec<Habit> = store
                .list_habits()?
                .into_iter()
                .filter(|h| archived || !h.archived)
                .collect();
            println!("{}", serde_json::to_string_pretty(&habits)?);
        }
        HabitAction::Archive { habit } => {
            let habit = store.find_habit(&habit)?;
            store.set_archived(habit.id, true)?;
            println!("archived '{}'", habit.name);
        }
    }
    Ok(())
}
