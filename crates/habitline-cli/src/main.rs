use clap::{Parser, Subcommand};

mod commands;
mod common;
mod config;

#[derive(Parser)]
#[command(name = "habitline", version, about = "Habitline CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Toggle or record a check-in
    Check(commands::check::CheckArgs),
    /// Derived series: checkmarks, scores, streaks
    Show {
        #[command(subcommand)]
        action: commands::show::ShowAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Check(args) => commands::check::run(args),
        Commands::Show { action } => commands::show::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
