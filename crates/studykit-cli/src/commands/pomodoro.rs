use std::io::Write;

use clap::Subcommand;
use studykit_core::store::{keys, Database, KeyValueStore};
use studykit_core::{Event, PomodoroSession, PomodoroSettings};

use super::print_event;

#[derive(Subcommand)]
pub enum PomodoroAction {
    /// Start or resume the current segment
    Start,
    /// Pause the running segment
    Pause,
    /// Complete the current segment immediately
    Skip,
    /// Return to the first work segment
    Reset,
    /// Print the session snapshot as JSON
    Status,
    /// Update durations (in minutes) and auto-start behavior
    Set {
        /// Work duration in minutes
        #[arg(long)]
        work: Option<u64>,
        /// Short break in minutes
        #[arg(long)]
        short_break: Option<u64>,
        /// Long break in minutes
        #[arg(long)]
        long_break: Option<u64>,
        /// Start breaks automatically after each work segment
        #[arg(long)]
        auto_start_breaks: Option<bool>,
    },
    /// Tick once per second until the segment completes
    Watch,
}

fn load_session(store: &Database) -> Result<PomodoroSession, Box<dyn std::error::Error>> {
    if let Ok(Some(json)) = store.get(keys::POMODORO_SESSION) {
        if let Ok(session) = serde_json::from_str::<PomodoroSession>(&json) {
            return Ok(session);
        }
    }
    Ok(PomodoroSession::new(load_settings(store))?)
}

fn load_settings(store: &Database) -> PomodoroSettings {
    store
        .get(keys::POMODORO_SETTINGS)
        .ok()
        .flatten()
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default()
}

fn save_session(
    store: &mut Database,
    session: &PomodoroSession,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(session)?;
    store.set(keys::POMODORO_SESSION, &json)?;
    Ok(())
}

pub fn run(action: PomodoroAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = Database::open()?;
    let mut session = load_session(&store)?;

    match action {
        PomodoroAction::Start => match session.start()? {
            Some(event) => print_event(&event)?,
            None => println!("already running"),
        },
        PomodoroAction::Pause => match session.pause() {
            Some(event) => print_event(&event)?,
            None => println!("not running"),
        },
        PomodoroAction::Skip => {
            let event = session.skip();
            print_event(&event)?;
        }
        PomodoroAction::Reset => {
            let event = session.reset();
            print_event(&event)?;
        }
        PomodoroAction::Status => {
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        }
        PomodoroAction::Set {
            work,
            short_break,
            long_break,
            auto_start_breaks,
        } => {
            let current = *session.settings();
            session.update_settings(
                work.unwrap_or(current.work_secs / 60),
                short_break.unwrap_or(current.short_break_secs / 60),
                long_break.unwrap_or(current.long_break_secs / 60),
                auto_start_breaks.unwrap_or(current.auto_start_breaks),
            )?;
            let json = serde_json::to_string(session.settings())?;
            store.set(keys::POMODORO_SETTINGS, &json)?;
            println!("settings updated");
        }
        PomodoroAction::Watch => watch(&mut session)?,
    }

    save_session(&mut store, &session)?;
    Ok(())
}

/// Drive ticks at 1 Hz until the current segment completes. With break
/// auto-start enabled, a finished work segment rolls into its break.
fn watch(session: &mut PomodoroSession) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(event) = session.start()? {
        print_event(&event)?;
    }
    loop {
        std::thread::sleep(std::time::Duration::from_secs(1));
        match session.tick() {
            Some(event @ Event::BreakCompleted { .. }) => {
                println!();
                print_event(&event)?;
                break;
            }
            Some(event @ Event::WorkCompleted { .. }) => {
                println!();
                print_event(&event)?;
                if !session.settings().auto_start_breaks {
                    break;
                }
            }
            Some(Event::TimerTick { .. }) => {
                let snapshot = session.snapshot();
                print!("\r{} {}  ", snapshot.display, segment_label(session));
                std::io::stdout().flush()?;
            }
            Some(event) => print_event(&event)?,
            None => {}
        }
    }
    Ok(())
}

fn segment_label(session: &PomodoroSession) -> &'static str {
    if !session.is_break() {
        "work"
    } else if session.long_break() {
        "long break"
    } else {
        "short break"
    }
}
