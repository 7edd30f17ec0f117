use std::io::Write;

use clap::Subcommand;
use studykit_core::store::{keys, Database, KeyValueStore};
use studykit_core::{CountdownTimer, Event};

use super::print_event;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Configure the countdown duration
    Set {
        #[arg(long, default_value = "0")]
        hours: u64,
        #[arg(long, default_value = "0")]
        minutes: u64,
        #[arg(long, default_value = "0")]
        seconds: u64,
    },
    /// Start or resume the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Rewind to the configured duration
    Reset,
    /// Print the timer snapshot as JSON
    Status,
    /// Tick once per second until the countdown completes
    Watch,
}

fn load_timer(store: &Database) -> CountdownTimer {
    if let Ok(Some(json)) = store.get(keys::CUSTOM_TIMER) {
        if let Ok(timer) = serde_json::from_str::<CountdownTimer>(&json) {
            return timer;
        }
    }
    CountdownTimer::new()
}

fn save_timer(
    store: &mut Database,
    timer: &CountdownTimer,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(timer)?;
    store.set(keys::CUSTOM_TIMER, &json)?;
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = Database::open()?;
    let mut timer = load_timer(&store);

    match action {
        TimerAction::Set {
            hours,
            minutes,
            seconds,
        } => {
            let total = hours * 3600 + minutes * 60 + seconds;
            timer.configure(total)?;
            println!("timer set to {}", timer.display());
        }
        TimerAction::Start => match timer.start()? {
            Some(event) => print_event(&event)?,
            None => println!("already running"),
        },
        TimerAction::Pause => match timer.pause() {
            Some(event) => print_event(&event)?,
            None => println!("not running"),
        },
        TimerAction::Reset => {
            if let Some(event) = timer.reset() {
                print_event(&event)?;
            }
        }
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&timer.snapshot())?);
        }
        TimerAction::Watch => watch(&mut timer)?,
    }

    save_timer(&mut store, &timer)?;
    Ok(())
}

fn watch(timer: &mut CountdownTimer) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(event) = timer.start()? {
        print_event(&event)?;
    }
    loop {
        std::thread::sleep(std::time::Duration::from_secs(1));
        match timer.tick() {
            Some(event @ Event::TimerCompleted { .. }) => {
                println!("\rtime's up!          ");
                print_event(&event)?;
                break;
            }
            Some(Event::TimerTick { .. }) => {
                print!("\r{}  ", timer.display());
                std::io::stdout().flush()?;
            }
            Some(_) | None => {}
        }
    }
    Ok(())
}
