//! Task API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::api::error::{ApiErrorResponse, FieldError};
use crate::api::extract::ValidJson;
use crate::api::state::AppState;
use crate::error::TaskboardError;
use crate::service::TaskBoard;
use crate::storage::tasks::{Task, TaskStats};

/// Maximum title length, counted in characters after trimming
pub const MAX_TITLE_LENGTH: usize = 200;

// ============================================================================
// Request DTOs
// ============================================================================

/// Create task request
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub priority: Option<String>,
}

/// Update task request
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<String>,
}

// ============================================================================
// Validation
// ============================================================================

fn title_too_long() -> FieldError {
    FieldError::new(
        "title",
        format!("Title must not exceed {} characters", MAX_TITLE_LENGTH),
    )
}

impl CreateTaskRequest {
    fn validate(&self) -> Result<(), ApiErrorResponse> {
        let title = self.title.trim();
        let error = if title.is_empty() {
            FieldError::new("title", "Title is required")
        } else if title.chars().count() > MAX_TITLE_LENGTH {
            title_too_long()
        } else {
            return Ok(());
        };
        Err(ApiErrorResponse::validation("Validation failed", vec![error]))
    }
}

impl UpdateTaskRequest {
    /// A blank title is allowed here; it means "leave unchanged".
    fn validate(&self) -> Result<(), ApiErrorResponse> {
        match self.title.as_deref().map(str::trim) {
            Some(title) if title.chars().count() > MAX_TITLE_LENGTH => Err(
                ApiErrorResponse::validation("Validation failed", vec![title_too_long()]),
            ),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/tasks
pub async fn list_tasks(State(state): State<AppState>) -> Json<TaskBoard> {
    Json(state.tasks.get_tasks_with_stats())
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiErrorResponse> {
    req.validate()?;
    let task = state.tasks.create_task(&req.title, req.priority.as_deref())?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/tasks/stats
pub async fn get_stats(State(state): State<AppState>) -> Json<TaskStats> {
    Json(state.tasks.get_task_stats())
}

/// GET /api/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiErrorResponse> {
    state
        .tasks
        .get_task(&id)
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// PATCH /api/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiErrorResponse> {
    req.validate()?;
    state
        .tasks
        .update_task(
            &id,
            req.title.as_deref(),
            req.completed,
            req.priority.as_deref(),
        )?
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// PATCH /api/tasks/{id}/toggle
pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiErrorResponse> {
    state
        .tasks
        .toggle_task_completion(&id)
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    if state.tasks.delete_task(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&id))
    }
}

/// DELETE /api/tasks
pub async fn clear_tasks(State(state): State<AppState>) -> StatusCode {
    state.tasks.clear_all_tasks();
    StatusCode::NO_CONTENT
}

fn not_found(id: &str) -> ApiErrorResponse {
    tracing::warn!(id, "task not found");
    TaskboardError::not_found(id).into()
}
