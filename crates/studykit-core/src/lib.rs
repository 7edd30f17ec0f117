//! # Studykit Core Library
//!
//! Core business logic for Studykit, a personal-productivity toolkit
//! bundling a to-do list, a flashcard study deck, and a pair of countdown
//! timers (Pomodoro and free-form). The CLI binary is a thin adapter over
//! this library; nothing in here knows about presentation.
//!
//! ## Architecture
//!
//! - **Engines**: caller-driven state machines. The timers require the
//!   caller to invoke `tick()` once per elapsed second; nothing here
//!   self-schedules or reads the wall clock for progress.
//! - **Storage**: a key-value store holding JSON-encoded snapshots of each
//!   collection, written through on every mutation. SQLite-backed on disk,
//!   `HashMap`-backed for tests.
//! - **Events**: every observable timer transition is reported as an
//!   [`Event`] for adapters to render.
//!
//! ## Key Components
//!
//! - [`CountdownTimer`]: single countdown-to-zero primitive
//! - [`PomodoroSession`]: work/break alternation with the 4-cycle long-break rule
//! - [`TaskList`]: ordered to-do list with filter views
//! - [`Deck`]: flashcard deck with study cursor and shuffle
//! - [`Database`]: persistent key-value store

pub mod cards;
pub mod error;
pub mod events;
pub mod store;
pub mod tasks;
pub mod timer;

pub use cards::{Deck, DeckStats, Flashcard};
pub use error::{CoreError, StoreError, ValidationError};
pub use events::Event;
pub use store::{Database, KeyValueStore, MemoryStore};
pub use tasks::{Priority, Task, TaskFilter, TaskList, TaskStats};
pub use timer::{
    format_secs, CountdownSnapshot, CountdownTimer, PomodoroSession, PomodoroSettings,
    SegmentKind, SessionSnapshot, TimerState,
};
