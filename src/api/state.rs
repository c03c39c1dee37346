//! Shared state for the Web API server.
//!
//! One `TaskService` (and through it one `TaskStore`) is built at startup and
//! handed to every handler via axum's `State` extractor.

use std::sync::Arc;

use crate::service::{PriorityPolicy, TaskService};
use crate::storage::config::Config;
use crate::storage::tasks::TaskStore;

#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<TaskService>,
}

impl AppState {
    pub fn new(service: TaskService) -> Self {
        Self {
            tasks: Arc::new(service),
        }
    }

    /// Empty store with the policy from `config`.
    pub fn from_config(config: &Config) -> Self {
        let policy = PriorityPolicy::from_strict(config.tasks.strict_priority);
        Self::new(TaskService::new(Arc::new(TaskStore::new()), policy))
    }
}
