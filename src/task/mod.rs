use crate::entities::*;
use sea_orm::*;
use std::sync::Arc;

pub mod api;

#[derive(Debug, PartialEq, Clone, Eq)]
pub struct Task {
    id: i32,
    text: String,
    status: bool,
}

impl Task {
    pub fn new(id: i32, text: String, status: bool) -> Self {
        Self { id, text, status }
    }

    /// Returns the ID of the task.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Returns the text of the task.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the completion status of the task.
    pub fn status(&self) -> bool {
        self.status
    }
}

impl From<task::Model> for Task {
    fn from(model: task::Model) -> Self {
        Task::new(model.id, model.text, model.status)
    }
}

/// The mutable fields of a task, as supplied by a client on create or update.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct TaskDraft {
    pub text: String,
    pub status: bool,
}

/// A task as handed to the storage gateway. A record without an `id` has not
/// been persisted yet; saving it assigns one.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct TaskRecord {
    pub id: Option<i32>,
    pub text: String,
    pub status: bool,
}

/// Error type for TaskService operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskServiceError {
    /// Represents a task not found error.
    #[error("Task with ID {0} not found")]
    TaskNotFound(i32),
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Storage gateway over the persistent task collection.
///
/// The four operations are everything the service needs, so tests can stand
/// in an in-memory implementation for the database-backed one.
#[async_trait::async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns all tasks in primary-key order.
    async fn find_all(&self) -> Result<Vec<Task>, DbErr>;
    /// Returns the task with the given ID, or `None` when no row matches.
    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, DbErr>;
    /// Inserts the record when it carries no ID, otherwise updates the row
    /// with that ID in place. Returns the persisted task.
    async fn save(&self, record: TaskRecord) -> Result<Task, DbErr>;
    /// Removes the row with the given ID if present; absence is a no-op.
    async fn delete_by_id(&self, id: i32) -> Result<(), DbErr>;
}

/// `TaskRepository` backed by a sea-orm database connection.
pub struct OrmTaskRepository<'a> {
    db: &'a sea_orm::DatabaseConnection,
}

impl<'a> OrmTaskRepository<'a> {
    pub fn new(db: &'a sea_orm::DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl TaskRepository for OrmTaskRepository<'_> {
    async fn find_all(&self) -> Result<Vec<Task>, DbErr> {
        let tasks = task::Entity::find()
            .order_by_asc(task::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Task::from)
            .collect();
        Ok(tasks)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, DbErr> {
        let model = task::Entity::find_by_id(id).one(self.db).await?;
        Ok(model.map(Task::from))
    }

    async fn save(&self, record: TaskRecord) -> Result<Task, DbErr> {
        let model = match record.id {
            None => {
                let active_model = task::ActiveModel {
                    text: ActiveValue::Set(record.text),
                    status: ActiveValue::Set(record.status),
                    ..Default::default()
                };
                active_model.insert(self.db).await?
            }
            Some(id) => {
                let active_model = task::ActiveModel {
                    id: ActiveValue::Unchanged(id),
                    text: ActiveValue::Set(record.text),
                    status: ActiveValue::Set(record.status),
                };
                active_model.update(self.db).await?
            }
        };
        Ok(Task::from(model))
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), DbErr> {
        task::Entity::delete_by_id(id).exec(self.db).await?;
        Ok(())
    }
}

/// Shared state for task handlers.
#[derive(Clone)]
pub struct TaskState {
    pub db: Arc<sea_orm::DatabaseConnection>,
}

pub struct TaskService<R> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> TaskService<R> {
        TaskService { repo }
    }

    /// Retrieves all tasks from storage.
    ///
    /// # Returns
    ///
    /// A `Result` containing a vector of `Task` if successful, or an error
    /// otherwise. An empty store yields an empty vector, not an error.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_tasks(&self) -> Result<Vec<Task>, TaskServiceError> {
        let tasks = self.repo.find_all().await?;
        Ok(tasks)
    }

    /// Creates a new task in storage.
    ///
    /// # Arguments
    ///
    /// * `draft` - The text and status of the task to create.
    ///
    /// # Returns
    ///
    /// A `Result` containing the created `Task`, carrying its newly assigned
    /// ID, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn add_task(&self, draft: TaskDraft) -> Result<Task, TaskServiceError> {
        let created = self
            .repo
            .save(TaskRecord {
                id: None,
                text: draft.text,
                status: draft.status,
            })
            .await?;
        Ok(created)
    }

    /// Updates the task with the given ID.
    ///
    /// Only `text` and `status` are overwritten; the ID is immutable.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the task to update.
    /// * `draft` - The new text and status for the task.
    ///
    /// # Returns
    ///
    /// A `Result` containing the updated `Task` if successful, or
    /// `TaskServiceError::TaskNotFound` when no task with that ID exists.
    #[tracing::instrument(skip(self))]
    pub async fn update_task(&self, id: i32, draft: TaskDraft) -> Result<Task, TaskServiceError> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;

        let updated = self
            .repo
            .save(TaskRecord {
                id: Some(existing.id()),
                text: draft.text,
                status: draft.status,
            })
            .await?;
        Ok(updated)
    }

    /// Deletes the task with the given ID.
    ///
    /// Deletion is idempotent: a missing row is not an error, and the caller
    /// cannot tell whether anything was removed.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: i32) -> Result<(), TaskServiceError> {
        self.repo.delete_by_id(id).await?;
        Ok(())
    }
}
