//! Task business logic
//!
//! Sits between the HTTP handlers and [`TaskStore`]: trims titles, turns
//! priority strings into [`Priority`], and shapes the combined list + summary
//! read. Lookups that miss come back as `None`/`false`; the API layer decides
//! what that means for the client.

use std::sync::Arc;

use serde::Serialize;

use crate::error::{Result, TaskboardError};
use crate::storage::tasks::{Priority, Task, TaskStats, TaskStore, TaskUpdate};

/// Task list with summary statistics (no per-priority or completed-today).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskBoard {
    pub tasks: Vec<Task>,
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub progress_percentage: f64,
}

/// How unknown priority strings are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityPolicy {
    /// Create falls back to `medium`; update keeps the old priority.
    #[default]
    Lenient,
    /// Both create and update reject the value.
    Strict,
}

impl PriorityPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Lenient
        }
    }
}

pub struct TaskService {
    store: Arc<TaskStore>,
    policy: PriorityPolicy,
}

impl TaskService {
    pub fn new(store: Arc<TaskStore>, policy: PriorityPolicy) -> Self {
        Self { store, policy }
    }

    #[cfg(test)]
    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Create a task. `title` is trimmed; the caller has already checked it
    /// is non-empty.
    pub fn create_task(&self, title: &str, priority: Option<&str>) -> Result<Task> {
        let priority = match priority {
            None => Priority::default(),
            Some(raw) => match raw.parse::<Priority>() {
                Ok(p) => p,
                Err(_) if self.policy == PriorityPolicy::Strict => {
                    return Err(TaskboardError::InvalidPriority(raw.to_string()));
                }
                Err(_) => {
                    tracing::debug!(priority = raw, "unknown priority on create, using medium");
                    Priority::default()
                }
            },
        };

        let task = self.store.create(title.trim(), priority);
        tracing::info!(id = %task.id, priority = %task.priority, "task created");
        Ok(task)
    }

    #[cfg(test)]
    pub fn get_all_tasks(&self) -> Vec<Task> {
        self.store.get_all()
    }

    pub fn get_task(&self, id: &str) -> Option<Task> {
        self.store.get(id)
    }

    /// Apply a partial update.
    ///
    /// A blank title is treated as absent. `Ok(None)` means the id is unknown.
    pub fn update_task(
        &self,
        id: &str,
        title: Option<&str>,
        completed: Option<bool>,
        priority: Option<&str>,
    ) -> Result<Option<Task>> {
        let priority = match priority.filter(|p| !p.is_empty()) {
            None => None,
            Some(raw) => match raw.parse::<Priority>() {
                Ok(p) => Some(p),
                Err(_) if self.policy == PriorityPolicy::Strict => {
                    return Err(TaskboardError::InvalidPriority(raw.to_string()));
                }
                Err(_) => {
                    tracing::debug!(id, priority = raw, "unknown priority on update, ignored");
                    None
                }
            },
        };

        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        let update = TaskUpdate {
            title,
            completed,
            priority,
        };
        Ok(self.store.update(id, update))
    }

    /// Flip completion. `None` if the id is unknown.
    pub fn toggle_task_completion(&self, id: &str) -> Option<Task> {
        let task = self.store.toggle(id)?;
        tracing::info!(id, completed = task.completed, "task toggled");
        Some(task)
    }

    pub fn delete_task(&self, id: &str) -> bool {
        let removed = self.store.delete(id);
        if removed {
            tracing::info!(id, "task deleted");
        }
        removed
    }

    pub fn get_task_stats(&self) -> TaskStats {
        self.store.stats()
    }

    pub fn get_tasks_with_stats(&self) -> TaskBoard {
        let (tasks, stats) = self.store.snapshot();
        TaskBoard {
            tasks,
            total: stats.total,
            completed: stats.completed,
            pending: stats.pending,
            progress_percentage: stats.progress_percentage,
        }
    }

    pub fn clear_all_tasks(&self) {
        let count = self.store.clear_all();
        tracing::info!(count, "all tasks cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn service() -> TaskService {
        TaskService::new(Arc::new(TaskStore::new()), PriorityPolicy::Lenient)
    }

    fn strict_service() -> TaskService {
        TaskService::new(Arc::new(TaskStore::new()), PriorityPolicy::Strict)
    }

    #[rstest]
    fn test_create_trims_and_defaults(service: TaskService) {
        let task = service.create_task("  New Task  ", None).unwrap();
        assert_eq!(task.title, "New Task");
        assert_eq!(task.priority, Priority::Medium);
        assert!(!task.completed);
    }

    #[rstest]
    #[case(Some("low"), Priority::Low)]
    #[case(Some("high"), Priority::High)]
    #[case(Some("HIGH"), Priority::Medium)]
    #[case(Some("urgent"), Priority::Medium)]
    #[case(None, Priority::Medium)]
    fn test_create_priority_fallback(
        service: TaskService,
        #[case] raw: Option<&str>,
        #[case] expected: Priority,
    ) {
        let task = service.create_task("t", raw).unwrap();
        assert_eq!(task.priority, expected);
    }

    #[rstest]
    fn test_update_ignores_unknown_priority(service: TaskService) {
        let task = service.create_task("t", Some("high")).unwrap();
        let updated = service
            .update_task(&task.id, None, None, Some("critical"))
            .unwrap()
            .unwrap();
        assert_eq!(updated.priority, Priority::High);
    }

    #[rstest]
    fn test_update_blank_title_keeps_existing(service: TaskService) {
        let task = service.create_task("Keep me", None).unwrap();

        let updated = service
            .update_task(&task.id, Some("   "), None, None)
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Keep me");

        let updated = service
            .update_task(&task.id, Some(""), None, None)
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Keep me");
    }

    #[rstest]
    fn test_update_applies_fields(service: TaskService) {
        let task = service.create_task("Original", None).unwrap();
        let updated = service
            .update_task(&task.id, Some(" Updated "), Some(true), Some("low"))
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Updated");
        assert_eq!(updated.priority, Priority::Low);
        assert!(updated.completed);
        assert!(updated.completed_at.is_some());
    }

    #[rstest]
    fn test_update_missing(service: TaskService) {
        let result = service.update_task("missing", Some("x"), None, None).unwrap();
        assert!(result.is_none());
    }

    #[rstest]
    fn test_toggle_round_trip(service: TaskService) {
        let task = service.create_task("t", None).unwrap();

        let on = service.toggle_task_completion(&task.id).unwrap();
        assert!(on.completed);
        assert!(on.completed_at.is_some());

        let off = service.toggle_task_completion(&task.id).unwrap();
        assert!(!off.completed);
        assert!(off.completed_at.is_none());

        assert!(service.toggle_task_completion("missing").is_none());
    }

    #[rstest]
    fn test_delete(service: TaskService) {
        let task = service.create_task("t", None).unwrap();
        assert!(service.delete_task(&task.id));
        assert!(!service.delete_task(&task.id));
    }

    #[rstest]
    fn test_tasks_with_stats(service: TaskService) {
        let first = service.create_task("Task 1", Some("high")).unwrap();
        service.create_task("Task 2", Some("low")).unwrap();
        service.create_task("Task 3", None).unwrap();
        service.toggle_task_completion(&first.id);

        let board = service.get_tasks_with_stats();
        assert_eq!(board.tasks.len(), 3);
        assert_eq!(board.tasks[0].title, "Task 3");
        assert_eq!(board.total, 3);
        assert_eq!(board.completed, 1);
        assert_eq!(board.pending, 2);
        assert!((board.progress_percentage - 33.33).abs() < 0.01);
    }

    #[rstest]
    fn test_stats_by_priority(service: TaskService) {
        service.create_task("a", Some("high")).unwrap();
        service.create_task("b", Some("high")).unwrap();
        service.create_task("c", Some("low")).unwrap();

        let stats = service.get_task_stats();
        assert_eq!(stats.by_priority.high, 2);
        assert_eq!(stats.by_priority.low, 1);
        assert_eq!(stats.by_priority.medium, 0);
    }

    #[rstest]
    fn test_clear_all(service: TaskService) {
        service.create_task("a", None).unwrap();
        service.clear_all_tasks();
        assert!(service.get_all_tasks().is_empty());
        assert_eq!(service.get_task_stats().total, 0);
    }

    #[test]
    fn test_strict_rejects_unknown_priority() {
        let service = strict_service();
        let err = service.create_task("t", Some("urgent")).unwrap_err();
        assert!(matches!(err, TaskboardError::InvalidPriority(ref p) if p == "urgent"));
        assert!(service.store().is_empty());

        let task = service.create_task("t", Some("low")).unwrap();
        let err = service
            .update_task(&task.id, None, None, Some("Low"))
            .unwrap_err();
        assert!(matches!(err, TaskboardError::InvalidPriority(_)));
        assert_eq!(service.get_task(&task.id).unwrap().priority, Priority::Low);
    }
}
