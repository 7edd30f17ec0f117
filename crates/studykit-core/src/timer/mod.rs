mod countdown;
mod session;

pub use countdown::{format_secs, CountdownSnapshot, CountdownTimer, TimerState};
pub use session::{PomodoroSession, PomodoroSettings, SegmentKind, SessionSnapshot};
