pub mod card;
pub mod pomodoro;
pub mod task;
pub mod timer;

use studykit_core::Event;

/// Render an engine event the way status output is rendered: pretty JSON.
pub(crate) fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}
