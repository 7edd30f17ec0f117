//! Single countdown-to-zero timer.
//!
//! The timer is a caller-driven state machine. It does not use internal
//! threads or wall-clock reads - the caller invokes `tick()` once per
//! elapsed second while the timer runs.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused | Completed) -> Idle
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Point-in-time view of a countdown for display layers.
#[derive(Debug, Clone, Serialize)]
pub struct CountdownSnapshot {
    pub state: TimerState,
    pub remaining_secs: u64,
    pub total_secs: u64,
    pub progress: f64,
    pub display: String,
}

/// Core countdown timer.
///
/// Counts a configured number of seconds down to zero. Reaching zero stops
/// the timer and yields exactly one completion event per run; a finished run
/// never restarts on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownTimer {
    total_secs: u64,
    remaining_secs: u64,
    state: TimerState,
}

impl CountdownTimer {
    /// Create an unconfigured timer (total duration 0, `Idle`).
    pub fn new() -> Self {
        Self {
            total_secs: 0,
            remaining_secs: 0,
            state: TimerState::Idle,
        }
    }

    /// Create a timer already configured to `total_secs`.
    pub fn with_duration(total_secs: u64) -> Result<Self, ValidationError> {
        let mut timer = Self::new();
        timer.configure(total_secs)?;
        Ok(timer)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// Elapsed fraction of the configured duration, in `[0.0, 1.0]`.
    /// An unconfigured timer reports 0.
    pub fn progress_fraction(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        (self.total_secs - self.remaining_secs) as f64 / self.total_secs as f64
    }

    /// Remaining time formatted for display.
    pub fn display(&self) -> String {
        format_secs(self.remaining_secs)
    }

    pub fn snapshot(&self) -> CountdownSnapshot {
        CountdownSnapshot {
            state: self.state,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            progress: self.progress_fraction(),
            display: self.display(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Set the total duration and rewind the remaining time to it.
    /// Stops a running countdown.
    pub fn configure(&mut self, total_secs: u64) -> Result<(), ValidationError> {
        if total_secs == 0 {
            return Err(ValidationError::InvalidDuration { field: "duration" });
        }
        self.total_secs = total_secs;
        self.remaining_secs = total_secs;
        self.state = TimerState::Idle;
        Ok(())
    }

    /// Begin or resume the countdown. No-op (`None`) if already running.
    ///
    /// Starting a completed run rewinds to the full duration first, so each
    /// run fires its completion exactly once.
    pub fn start(&mut self) -> Result<Option<Event>, ValidationError> {
        if self.total_secs == 0 {
            return Err(ValidationError::InvalidDuration { field: "duration" });
        }
        match self.state {
            TimerState::Running => Ok(None),
            TimerState::Completed => {
                self.remaining_secs = self.total_secs;
                self.state = TimerState::Running;
                Ok(Some(self.started_event()))
            }
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                Ok(Some(self.started_event()))
            }
        }
    }

    /// Halt without losing the remaining time. No-op if not running.
    pub fn pause(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Paused;
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop and rewind to the configured duration.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.remaining_secs = self.total_secs;
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Advance the countdown by one second.
    ///
    /// Returns the completion event on the tick that reaches zero, a tick
    /// event otherwise. A stopped timer ignores ticks, which makes
    /// `pause`/`reset` cancellation synchronous: nothing is delivered after
    /// they return.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = TimerState::Completed;
            return Some(Event::TimerCompleted { at: Utc::now() });
        }
        Some(Event::TimerTick {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    fn started_event(&self) -> Event {
        Event::TimerStarted {
            duration_secs: self.total_secs,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// `MM:SS`, or `H:MM:SS` once a full hour remains.
pub fn format_secs(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}
