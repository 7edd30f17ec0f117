use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::SegmentKind;

/// Every observable timer transition produces an Event.
/// Adapters render these; the engines themselves never touch a display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        duration_secs: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerTick {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// Fired exactly once per run, on the tick that reaches zero.
    TimerCompleted {
        at: DateTime<Utc>,
    },
    /// A Pomodoro segment began (manually or via break auto-start).
    SegmentStarted {
        segment: SegmentKind,
        duration_secs: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A work segment finished; the chosen break is already configured.
    WorkCompleted {
        cycle_count: u32,
        long_break: bool,
        break_secs: u64,
        at: DateTime<Utc>,
    },
    /// A break finished; the next work segment is configured but not started.
    BreakCompleted {
        session_count: u32,
        at: DateTime<Utc>,
    },
}
