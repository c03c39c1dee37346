use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of `low`, `medium`, `high`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPriority(pub String);

impl FromStr for Priority {
    type Err = UnknownPriority;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(UnknownPriority(other.to_string())),
        }
    }
}

/// Task record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Task ID (UUID v4)
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub priority: Priority,
    /// Creation time, never changes
    pub created_at: DateTime<Utc>,
    /// Set iff `completed` is true
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Set `completed`, stamping or clearing `completed_at` only on a transition.
    fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) {
        if self.completed == completed {
            return;
        }
        self.completed = completed;
        self.completed_at = completed.then_some(now);
    }
}

/// Partial update; `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
}

/// Per-priority task counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl PriorityCounts {
    pub fn sum(&self) -> usize {
        self.low + self.medium + self.high
    }
}

/// Aggregate statistics, computed on every call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub progress_percentage: f64,
    pub by_priority: PriorityCounts,
    pub completed_today: usize,
}

/// Stored record plus its insertion sequence (ordering tiebreak).
#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    task: Task,
}

#[derive(Debug, Default)]
struct Inner {
    tasks: HashMap<String, Entry>,
    next_seq: u64,
}

impl Inner {
    /// Newest first; equal `created_at` falls back to insertion order.
    fn ordered(&self) -> Vec<Task> {
        let mut entries: Vec<&Entry> = self.tasks.values().collect();
        entries.sort_by(|a, b| {
            b.task
                .created_at
                .cmp(&a.task.created_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });
        entries.into_iter().map(|e| e.task.clone()).collect()
    }

    fn stats(&self, today: NaiveDate) -> TaskStats {
        let mut completed = 0;
        let mut completed_today = 0;
        let mut by_priority = PriorityCounts::default();

        for Entry { task, .. } in self.tasks.values() {
            match task.priority {
                Priority::Low => by_priority.low += 1,
                Priority::Medium => by_priority.medium += 1,
                Priority::High => by_priority.high += 1,
            }
            if task.completed {
                completed += 1;
                let done_today = task
                    .completed_at
                    .map(|at| at.with_timezone(&Local).date_naive() == today)
                    .unwrap_or(false);
                if done_today {
                    completed_today += 1;
                }
            }
        }

        let total = self.tasks.len();
        let progress_percentage = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        TaskStats {
            total,
            completed,
            pending: total - completed,
            progress_percentage,
            by_priority,
            completed_today,
        }
    }
}

/// In-memory task store.
///
/// The single owner of every task. All operations go through one `RwLock`,
/// so each call is atomic with respect to every other call. Nothing here
/// touches disk; the store lives exactly as long as the process.
#[derive(Debug, Default)]
pub struct TaskStore {
    inner: RwLock<Inner>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a half-written task behind,
    // so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a new task. The title is stored as given.
    pub fn create(&self, title: impl Into<String>, priority: Priority) -> Task {
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            completed: false,
            priority,
            created_at: Utc::now(),
            completed_at: None,
        };

        let mut inner = self.write();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.tasks.insert(
            task.id.clone(),
            Entry {
                seq,
                task: task.clone(),
            },
        );
        task
    }

    /// All tasks, most recently created first.
    pub fn get_all(&self) -> Vec<Task> {
        self.read().ordered()
    }

    pub fn get(&self, id: &str) -> Option<Task> {
        self.read().tasks.get(id).map(|e| e.task.clone())
    }

    /// Apply the provided fields. Returns `None` if the id is unknown.
    pub fn update(&self, id: &str, update: TaskUpdate) -> Option<Task> {
        let mut inner = self.write();
        let task = &mut inner.tasks.get_mut(id)?.task;

        if let Some(title) = update.title {
            task.title = title;
        }
        if let Some(completed) = update.completed {
            task.set_completed(completed, Utc::now());
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        Some(task.clone())
    }

    /// Flip `completed` in one locked step.
    pub fn toggle(&self, id: &str) -> Option<Task> {
        let mut inner = self.write();
        let task = &mut inner.tasks.get_mut(id)?.task;
        let completed = !task.completed;
        task.set_completed(completed, Utc::now());
        Some(task.clone())
    }

    /// Remove a task. `false` if it did not exist.
    pub fn delete(&self, id: &str) -> bool {
        self.write().tasks.remove(id).is_some()
    }

    /// Statistics for the current population, using the local calendar day.
    pub fn stats(&self) -> TaskStats {
        self.stats_on(Local::now().date_naive())
    }

    /// Statistics with `today` as the reference day for `completed_today`.
    pub fn stats_on(&self, today: NaiveDate) -> TaskStats {
        self.read().stats(today)
    }

    /// Ordered task list and statistics taken under one lock.
    pub fn snapshot(&self) -> (Vec<Task>, TaskStats) {
        let today = Local::now().date_naive();
        let inner = self.read();
        (inner.ordered(), inner.stats(today))
    }

    /// Remove every task; returns how many were dropped.
    pub fn clear_all(&self) -> usize {
        let mut inner = self.write();
        let count = inner.tasks.len();
        inner.tasks.clear();
        count
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.read().tasks.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
