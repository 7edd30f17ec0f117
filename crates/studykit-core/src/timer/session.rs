//! Pomodoro session state machine.
//!
//! Wraps a [`CountdownTimer`] in a work/break alternation. Every completed
//! work segment increments the cycle count and earns a break; every fourth
//! cycle the break is the long one. A completed break begins the next
//! numbered session but never starts its work segment on its own.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::countdown::{format_secs, CountdownTimer, TimerState};
use crate::error::ValidationError;
use crate::events::Event;

/// Completed work segments between long breaks.
const CYCLES_PER_LONG_BREAK: u32 = 4;

/// Ticks between a work segment completing and its break auto-starting.
const AUTO_START_DELAY_TICKS: u8 = 2;

/// Which half of the work/break alternation a segment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Work,
    Break,
}

/// Configured durations, stored in seconds.
///
/// Serialized field names match the persisted settings layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroSettings {
    #[serde(rename = "workDuration", default = "default_work_secs")]
    pub work_secs: u64,
    #[serde(rename = "shortBreak", default = "default_short_break_secs")]
    pub short_break_secs: u64,
    #[serde(rename = "longBreak", default = "default_long_break_secs")]
    pub long_break_secs: u64,
    #[serde(rename = "autoStartBreaks", default)]
    pub auto_start_breaks: bool,
}

fn default_work_secs() -> u64 {
    25 * 60
}
fn default_short_break_secs() -> u64 {
    5 * 60
}
fn default_long_break_secs() -> u64 {
    15 * 60
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            work_secs: default_work_secs(),
            short_break_secs: default_short_break_secs(),
            long_break_secs: default_long_break_secs(),
            auto_start_breaks: false,
        }
    }
}

impl PomodoroSettings {
    fn validate(&self) -> Result<(), ValidationError> {
        for (field, secs) in [
            ("workDuration", self.work_secs),
            ("shortBreak", self.short_break_secs),
            ("longBreak", self.long_break_secs),
        ] {
            if secs == 0 {
                return Err(ValidationError::InvalidDuration { field });
            }
        }
        Ok(())
    }
}

/// Point-in-time view of the session for display layers.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub state: TimerState,
    pub segment: SegmentKind,
    pub long_break: bool,
    pub session_count: u32,
    pub cycle_count: u32,
    pub remaining_secs: u64,
    pub total_secs: u64,
    pub progress: f64,
    pub display: String,
}

/// Pomodoro session.
///
/// Serializable as a whole so an adapter can persist a snapshot between
/// invocations; only [`PomodoroSettings`] is part of the documented
/// persisted layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroSession {
    settings: PomodoroSettings,
    is_break: bool,
    session_count: u32,
    cycle_count: u32,
    timer: CountdownTimer,
    /// Ticks left until a pending break auto-starts.
    #[serde(default)]
    auto_start_in: Option<u8>,
}

impl PomodoroSession {
    /// Create a session in the first work segment, not started.
    pub fn new(settings: PomodoroSettings) -> Result<Self, ValidationError> {
        settings.validate()?;
        let timer = CountdownTimer::with_duration(settings.work_secs)?;
        Ok(Self {
            settings,
            is_break: false,
            session_count: 1,
            cycle_count: 0,
            timer,
            auto_start_in: None,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn settings(&self) -> &PomodoroSettings {
        &self.settings
    }

    pub fn segment(&self) -> SegmentKind {
        if self.is_break {
            SegmentKind::Break
        } else {
            SegmentKind::Work
        }
    }

    pub fn is_break(&self) -> bool {
        self.is_break
    }

    /// Whether the current break is the long one. False outside a break.
    pub fn long_break(&self) -> bool {
        self.is_break && self.cycle_count % CYCLES_PER_LONG_BREAK == 0
    }

    pub fn session_count(&self) -> u32 {
        self.session_count
    }

    pub fn cycle_count(&self) -> u32 {
        self.cycle_count
    }

    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.timer.state(),
            segment: self.segment(),
            long_break: self.long_break(),
            session_count: self.session_count,
            cycle_count: self.cycle_count,
            remaining_secs: self.timer.remaining_secs(),
            total_secs: self.timer.total_secs(),
            progress: self.timer.progress_fraction(),
            display: format_secs(self.timer.remaining_secs()),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start or resume the current segment. No-op (`None`) if running.
    /// Starting by hand cancels any pending break auto-start.
    pub fn start(&mut self) -> Result<Option<Event>, ValidationError> {
        self.auto_start_in = None;
        if self.timer.start()?.is_none() {
            return Ok(None);
        }
        Ok(Some(self.segment_started_event()))
    }

    /// Pause the running segment; the segment identity is unchanged.
    /// Cancels any pending break auto-start.
    pub fn pause(&mut self) -> Option<Event> {
        self.auto_start_in = None;
        self.timer.pause()
    }

    /// Force the current segment to complete as if the countdown reached
    /// zero.
    pub fn skip(&mut self) -> Event {
        self.auto_start_in = None;
        self.complete_segment()
    }

    /// Cancel everything and return to the first work segment.
    pub fn reset(&mut self) -> Event {
        self.auto_start_in = None;
        self.is_break = false;
        self.session_count = 1;
        self.cycle_count = 0;
        let _ = self.timer.configure(self.settings.work_secs);
        Event::TimerReset { at: Utc::now() }
    }

    /// Advance by one second. Drives any pending break auto-start.
    pub fn tick(&mut self) -> Option<Event> {
        if let Some(left) = self.auto_start_in.take() {
            if left > 1 {
                self.auto_start_in = Some(left - 1);
                return None;
            }
            return match self.timer.start() {
                Ok(Some(_)) => Some(self.segment_started_event()),
                _ => None,
            };
        }
        match self.timer.tick()? {
            Event::TimerCompleted { .. } => Some(self.complete_segment()),
            event => Some(event),
        }
    }

    /// Update configured durations (whole minutes at the boundary, seconds
    /// internally) and the auto-start flag.
    ///
    /// Rejects non-positive durations, keeping the previous configuration.
    /// A work segment that has not started picks up the new duration at
    /// once; a segment in progress keeps its remaining time.
    pub fn update_settings(
        &mut self,
        work_min: u64,
        short_break_min: u64,
        long_break_min: u64,
        auto_start_breaks: bool,
    ) -> Result<(), ValidationError> {
        let updated = PomodoroSettings {
            work_secs: work_min.saturating_mul(60),
            short_break_secs: short_break_min.saturating_mul(60),
            long_break_secs: long_break_min.saturating_mul(60),
            auto_start_breaks,
        };
        updated.validate()?;
        self.settings = updated;
        if !self.is_break && self.timer.state() == TimerState::Idle {
            let _ = self.timer.configure(self.settings.work_secs);
        }
        Ok(())
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Shared transition for natural and skipped completions.
    fn complete_segment(&mut self) -> Event {
        if self.is_break {
            self.is_break = false;
            self.session_count += 1;
            let _ = self.timer.configure(self.settings.work_secs);
            tracing::debug!(session = self.session_count, "break finished");
            Event::BreakCompleted {
                session_count: self.session_count,
                at: Utc::now(),
            }
        } else {
            self.cycle_count += 1;
            self.is_break = true;
            let long = self.cycle_count % CYCLES_PER_LONG_BREAK == 0;
            let break_secs = if long {
                self.settings.long_break_secs
            } else {
                self.settings.short_break_secs
            };
            let _ = self.timer.configure(break_secs);
            if self.settings.auto_start_breaks {
                self.auto_start_in = Some(AUTO_START_DELAY_TICKS);
            }
            tracing::debug!(cycle = self.cycle_count, long, "work segment finished");
            Event::WorkCompleted {
                cycle_count: self.cycle_count,
                long_break: long,
                break_secs,
                at: Utc::now(),
            }
        }
    }

    fn segment_started_event(&self) -> Event {
        Event::SegmentStarted {
            segment: self.segment(),
            duration_secs: self.timer.total_secs(),
            remaining_secs: self.timer.remaining_secs(),
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_settings() -> PomodoroSettings {
        PomodoroSettings {
            work_secs: 2,
            short_break_secs: 3,
            long_break_secs: 5,
            auto_start_breaks: false,
        }
    }

    fn run_out_segment(session: &mut PomodoroSession) -> Event {
        session.start().unwrap();
        loop {
            match session.tick() {
                Some(event @ Event::WorkCompleted { .. })
                | Some(event @ Event::BreakCompleted { .. }) => return event,
                Some(_) => {}
                None => panic!("segment never completed"),
            }
        }
    }

    #[test]
    fn rejects_zero_durations() {
        let settings = PomodoroSettings {
            work_secs: 0,
            ..PomodoroSettings::default()
        };
        assert!(PomodoroSession::new(settings).is_err());
    }

    #[test]
    fn long_break_every_fourth_cycle() {
        let mut session = PomodoroSession::new(quick_settings()).unwrap();
        let mut breaks = Vec::new();
        let mut cycles = Vec::new();

        for _ in 0..4 {
            // Work segment runs out...
            match run_out_segment(&mut session) {
                Event::WorkCompleted {
                    cycle_count,
                    break_secs,
                    ..
                } => {
                    cycles.push(cycle_count);
                    breaks.push(break_secs);
                }
                other => panic!("expected WorkCompleted, got {other:?}"),
            }
            // ...then the break does.
            assert!(matches!(
                run_out_segment(&mut session),
                Event::BreakCompleted { .. }
            ));
        }

        assert_eq!(breaks, vec![3, 3, 3, 5]);
        assert_eq!(cycles, vec![1, 2, 3, 4]);
    }

    #[test]
    fn break_completion_increments_session() {
        let mut session = PomodoroSession::new(quick_settings()).unwrap();
        assert_eq!(session.session_count(), 1);
        run_out_segment(&mut session);
        assert!(session.is_break());
        run_out_segment(&mut session);
        assert!(!session.is_break());
        assert_eq!(session.session_count(), 2);
        // Work never auto-starts.
        assert_eq!(session.timer().state(), TimerState::Idle);
    }

    #[test]
    fn skip_behaves_like_completion() {
        let mut session = PomodoroSession::new(quick_settings()).unwrap();
        session.start().unwrap();
        session.tick();
        let event = session.skip();
        assert!(matches!(event, Event::WorkCompleted { cycle_count: 1, .. }));
        assert!(session.is_break());
        assert_eq!(session.timer().remaining_secs(), 3);
    }

    #[test]
    fn auto_start_begins_break_after_delay() {
        let mut settings = quick_settings();
        settings.auto_start_breaks = true;
        let mut session = PomodoroSession::new(settings).unwrap();

        run_out_segment(&mut session);
        assert_eq!(session.timer().state(), TimerState::Idle);

        // First delay tick: still pending.
        assert!(session.tick().is_none());
        // Second: the break starts.
        assert!(matches!(
            session.tick(),
            Some(Event::SegmentStarted {
                segment: SegmentKind::Break,
                ..
            })
        ));
        assert!(session.timer().is_running());
    }

    #[test]
    fn pause_cancels_pending_auto_start() {
        let mut settings = quick_settings();
        settings.auto_start_breaks = true;
        let mut session = PomodoroSession::new(settings).unwrap();

        run_out_segment(&mut session);
        session.pause();
        for _ in 0..5 {
            assert!(session.tick().is_none());
        }
        assert_eq!(session.timer().state(), TimerState::Idle);
    }

    #[test]
    fn reset_returns_to_first_work_segment() {
        let mut session = PomodoroSession::new(quick_settings()).unwrap();
        run_out_segment(&mut session);
        run_out_segment(&mut session);
        run_out_segment(&mut session);

        session.reset();
        assert!(!session.is_break());
        assert_eq!(session.session_count(), 1);
        assert_eq!(session.cycle_count(), 0);
        assert_eq!(session.timer().remaining_secs(), 2);
        assert_eq!(session.timer().state(), TimerState::Idle);
    }

    #[test]
    fn update_settings_reconfigures_pending_work() {
        let mut session = PomodoroSession::new(PomodoroSettings::default()).unwrap();
        session.update_settings(30, 5, 15, false).unwrap();
        assert_eq!(session.timer().remaining_secs(), 30 * 60);
    }

    #[test]
    fn update_settings_keeps_segment_in_progress() {
        let mut session = PomodoroSession::new(PomodoroSettings::default()).unwrap();
        session.start().unwrap();
        session.tick();
        session.pause();
        let remaining = session.timer().remaining_secs();

        session.update_settings(30, 5, 15, false).unwrap();
        assert_eq!(session.timer().remaining_secs(), remaining);
        // The next work segment uses the new duration.
        assert_eq!(session.settings().work_secs, 30 * 60);
    }

    #[test]
    fn update_settings_rejects_zero_and_keeps_previous() {
        let mut session = PomodoroSession::new(PomodoroSettings::default()).unwrap();
        assert!(session.update_settings(0, 5, 15, false).is_err());
        assert_eq!(session.settings(), &PomodoroSettings::default());
    }

    #[test]
    fn settings_serialize_with_layout_names() {
        let json = serde_json::to_string(&PomodoroSettings::default()).unwrap();
        assert!(json.contains("\"workDuration\":1500"));
        assert!(json.contains("\"shortBreak\":300"));
        assert!(json.contains("\"longBreak\":900"));
        assert!(json.contains("\"autoStartBreaks\":false"));
    }
}
