//! Persistent key-value storage.
//!
//! Each engine serializes its whole collection to JSON and saves it under a
//! single key, write-through. The store never holds references back into
//! live engine state.

mod database;
mod memory;

pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::StoreError;

/// Durable key -> string store.
///
/// `get` returns the stored value or `None`; `set` overwrites.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Keys under which the engines persist their state.
pub mod keys {
    pub const TASKS: &str = "tasks";
    pub const FLASHCARDS: &str = "flashcards";
    pub const POMODORO_SETTINGS: &str = "pomodoro_settings";
    /// Adapter-private: serialized Pomodoro session snapshot.
    pub const POMODORO_SESSION: &str = "pomodoro_session";
    /// Adapter-private: serialized custom countdown snapshot.
    pub const CUSTOM_TIMER: &str = "custom_timer";
}

/// Returns `~/.config/studykit[-dev]/` based on STUDYKIT_ENV.
///
/// Set STUDYKIT_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDYKIT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studykit-dev")
    } else {
        base_dir.join("studykit")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
