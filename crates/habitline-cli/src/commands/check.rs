use clap::Args;

use crate::common::{engine_for, open_store, parse_day};
use crate::config::Config;

#[derive(Args)]
pub struct CheckArgs {
    /// Habit id or name
    pub habit: String,
    /// Day of the check-in (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<String>,
    /// Measured amount (numeric habits only); 0 removes the entry
    #[arg(long)]
    pub value: Option<f64>,
}

pub fn run(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(&Config::load())?;
    let habit = store.find_habit(&args.habit)?;
    let day = parse_day(args.date.as_deref())?;
    let engine = engine_for(store, habit);

    let event = if engine.habit().is_numeric() {
        let Some(value) = args.value else {
            return Err("numeric habits require --value".into());
        };
        engine.set_value(day, value)?
    } else {
        if args.value.is_some() {
            return Err("--value only applies to numeric habits".into());
        }
        engine.toggle(day)?
    };

    let state = engine
        .checkmarks_between(day, day)?
        .into_iter()
        .next()
        .unwrap_or(habitline_core::CheckState::Unchecked);
    println!(
        "{} {}: {}",
        engine.habit().name,
        event.from,
        serde_json::to_string(&state)?
    );
    Ok(())
}
