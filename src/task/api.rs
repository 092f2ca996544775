use crate::task::{
    OrmTaskRepository, Task, TaskDraft, TaskService, TaskServiceError, TaskState,
};
use crate::web::api::ServerErrorResponse;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// JSON representation of a Task for API responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaskJson {
    /// Unique identifier for the task
    id: i32,
    /// The text describing the task
    text: String,
    /// Whether the task is completed
    status: bool,
}

impl From<Task> for TaskJson {
    fn from(task: Task) -> Self {
        Self {
            id: task.id(),
            text: task.text().to_string(),
            status: task.status(),
        }
    }
}

/// Task fields accepted from clients on create and update. Any `id` in the
/// request body is ignored; identity comes from the store or the path.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TaskPayload {
    /// The text describing the task
    text: String,
    /// Whether the task is completed
    status: bool,
}

impl From<TaskPayload> for TaskDraft {
    fn from(payload: TaskPayload) -> Self {
        Self {
            text: payload.text,
            status: payload.status,
        }
    }
}

/// Handler for POST /api/ - liveness greeting.
#[tracing::instrument]
#[utoipa::path(
    post,
    path = "/api/",
    responses(
        (status = 200, description = "Service is reachable", body = String)
    ),
    tag = "Tasks"
)]
pub async fn greet_handler() -> &'static str {
    "Hello"
}

/// Handler for GET /api/tasks - Returns all tasks in JSON format.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/tasks",
    responses(
        (status = 200, description = "Successfully retrieved tasks", body = Vec<TaskJson>),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn get_tasks_handler(
    State(state): State<Arc<TaskState>>,
) -> Result<Json<Vec<TaskJson>>, (StatusCode, Json<ServerErrorResponse>)> {
    let service = TaskService::new(OrmTaskRepository::new(&state.db));

    match service.get_all_tasks().await {
        Ok(tasks) => {
            let json_tasks: Vec<TaskJson> = tasks.into_iter().map(TaskJson::from).collect();
            Ok(Json(json_tasks))
        }
        Err(err) => {
            tracing::error!("Failed to get tasks: {}", err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ServerErrorResponse::new(
                    "Failed to retrieve tasks".to_string(),
                )),
            ))
        }
    }
}

/// Handler for POST /api/add - Creates a task and returns it with its
/// assigned ID.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/api/add",
    request_body = TaskPayload,
    responses(
        (status = 200, description = "Successfully created task", body = TaskJson),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn add_task_handler(
    State(state): State<Arc<TaskState>>,
    Json(payload): Json<TaskPayload>,
) -> Result<Json<TaskJson>, (StatusCode, Json<ServerErrorResponse>)> {
    let service = TaskService::new(OrmTaskRepository::new(&state.db));

    match service.add_task(payload.into()).await {
        Ok(created) => Ok(Json(TaskJson::from(created))),
        Err(err) => {
            tracing::error!("Failed to add task: {}", err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ServerErrorResponse::new("Failed to add task".to_string())),
            ))
        }
    }
}

/// Handler for PUT /api/update/{id} - Overwrites the text and status of an
/// existing task.
///
/// A missing task answers 502 with the body `Error in Updating`. That pair is
/// the original contract of this API and is kept for compatibility.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    put,
    path = "/api/update/{id}",
    params(
        ("id" = i32, Path, description = "ID of the task to update")
    ),
    request_body = TaskPayload,
    responses(
        (status = 200, description = "Successfully updated task", body = String),
        (status = 502, description = "No task with the given ID", body = String),
        (status = 500, description = "Internal server error", body = String)
    ),
    tag = "Tasks"
)]
pub async fn update_task_handler(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<i32>,
    Json(payload): Json<TaskPayload>,
) -> (StatusCode, &'static str) {
    let service = TaskService::new(OrmTaskRepository::new(&state.db));

    match service.update_task(id, payload.into()).await {
        Ok(_) => (StatusCode::OK, "Updated Successfully"),
        Err(TaskServiceError::TaskNotFound(_)) => (StatusCode::BAD_GATEWAY, "Error in Updating"),
        Err(err) => {
            tracing::error!("Failed to update task {}: {}", id, err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update task")
        }
    }
}

/// Handler for DELETE /api/delete/{id} - Deletes a task.
///
/// Reports success whether or not a task with that ID existed.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/api/delete/{id}",
    params(
        ("id" = i32, Path, description = "ID of the task to delete")
    ),
    responses(
        (status = 200, description = "Successfully deleted task", body = String),
        (status = 500, description = "Internal server error", body = String)
    ),
    tag = "Tasks"
)]
pub async fn delete_task_handler(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<i32>,
) -> (StatusCode, &'static str) {
    let service = TaskService::new(OrmTaskRepository::new(&state.db));

    match service.delete_task(id).await {
        Ok(()) => (StatusCode::OK, "Deleted Successfully"),
        Err(err) => {
            tracing::error!("Failed to delete task {}: {}", id, err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete task")
        }
    }
}

/// Creates and returns the tasks API router.
pub fn create_api_router(state: Arc<TaskState>) -> Router {
    Router::new()
        .route("/", post(greet_handler))
        .route("/tasks", get(get_tasks_handler))
        .route("/add", post(add_task_handler))
        .route("/update/{id}", put(update_task_handler))
        .route("/delete/{id}", delete(delete_task_handler))
        .with_state(state)
}
