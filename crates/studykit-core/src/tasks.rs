//! Task list engine.
//!
//! An ordered list of to-do items, newest first, persisted write-through:
//! every mutating operation saves the full list back to the store before
//! returning.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, ValidationError};
use crate::store::{keys, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        f.pad(s)
    }
}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

/// Predicate names accepted by [`TaskList::filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    All,
    Completed,
    Pending,
    HighPriority,
}

/// Aggregate counts for the stats display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
}

/// Ordered task list with write-through persistence.
pub struct TaskList<S: KeyValueStore> {
    tasks: Vec<Task>,
    store: S,
}

impl<S: KeyValueStore> TaskList<S> {
    /// Load the persisted list, treating absent or malformed data as empty.
    pub fn load(store: S) -> Result<Self, CoreError> {
        let tasks = match store.get(keys::TASKS)? {
            Some(json) => serde_json::from_str(&json).unwrap_or_default(),
            None => Vec::new(),
        };
        Ok(Self { tasks, store })
    }

    /// Give the backing store back (for handoff or inspection).
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Prepend a new task. The text is trimmed; empty text is rejected.
    pub fn add(&mut self, text: &str, priority: Priority) -> Result<&Task, CoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyField { field: "text" }.into());
        }
        let task = Task {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            completed: false,
            priority,
            created_at: Utc::now(),
        };
        self.tasks.insert(0, task);
        self.persist()?;
        Ok(&self.tasks[0])
    }

    /// Flip the completed flag on the matching task.
    pub fn toggle_complete(&mut self, id: &str) -> Result<&Task, CoreError> {
        let idx = self.position(id)?;
        self.tasks[idx].completed = !self.tasks[idx].completed;
        self.persist()?;
        Ok(&self.tasks[idx])
    }

    /// Remove the matching task and return it.
    pub fn remove(&mut self, id: &str) -> Result<Task, CoreError> {
        let idx = self.position(id)?;
        let removed = self.tasks.remove(idx);
        self.persist()?;
        Ok(removed)
    }

    /// Non-mutating view restricted by the given filter, in list order.
    pub fn filter(&self, filter: TaskFilter) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| match filter {
                TaskFilter::All => true,
                TaskFilter::Completed => t.completed,
                TaskFilter::Pending => !t.completed,
                TaskFilter::HighPriority => t.priority == Priority::High,
            })
            .collect()
    }

    /// Remove every completed task; returns how many went away.
    pub fn clear_completed(&mut self) -> Result<usize, CoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        self.persist()?;
        Ok(removed)
    }

    /// Remove every task; returns how many went away.
    pub fn clear_all(&mut self) -> Result<usize, CoreError> {
        let removed = self.tasks.len();
        self.tasks.clear();
        self.persist()?;
        Ok(removed)
    }

    pub fn stats(&self) -> TaskStats {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        TaskStats {
            total,
            completed,
            remaining: total - completed,
        }
    }

    fn position(&self, id: &str) -> Result<usize, CoreError> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::NotFound {
                kind: "task",
                id: id.to_string(),
            })
    }

    fn persist(&mut self) -> Result<(), CoreError> {
        let json = serde_json::to_string(&self.tasks)?;
        self.store.set(keys::TASKS, &json)?;
        Ok(())
    }
}
