use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "studykit", version, about = "Studykit CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// To-do list
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Flashcard deck
    Card {
        #[command(subcommand)]
        action: commands::card::CardAction,
    },
    /// Pomodoro session timer
    Pomodoro {
        #[command(subcommand)]
        action: commands::pomodoro::PomodoroAction,
    },
    /// Free-form countdown timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::Card { action } => commands::card::run(action),
        Commands::Pomodoro { action } => commands::pomodoro::run(action),
        Commands::Timer { action } => commands::timer::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
