use std::fmt;
use std::sync::Arc;

use crate::models::{Task, TaskInput};
use crate::repositories::{RepositoryError, TaskRepository};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    EmptyTitle,
    EmptyDescription,
    NotFound(i64),
    Store(RepositoryError),
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskError::EmptyTitle => write!(f, "task title cannot be empty"),
            TaskError::EmptyDescription => write!(f, "task description cannot be empty"),
            TaskError::NotFound(id) => write!(f, "task {} not found", id),
            TaskError::Store(e) => write!(f, "{}", e),
        }
    }
}

/// Task CRUD over an injected `TaskRepository`.
///
/// Validation runs here and a rejected input never reaches the store.
pub struct TaskService {
    repo: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Task>, TaskError> {
        self.repo.list().await.map_err(TaskError::Store)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Task, TaskError> {
        self.repo
            .find_by_task_id(id)
            .await
            .map_err(TaskError::Store)?
            .ok_or(TaskError::NotFound(id))
    }

    /// Stores a new task under the next sequential id (current max + 1, or 1).
    ///
    /// Reading the max and inserting are two store calls. Two concurrent creates can
    /// compute the same id; the store's unique constraint then rejects the later one
    /// with `TaskError::Store(RepositoryError::Duplicate)`.
    pub async fn create(&self, input: TaskInput) -> Result<Task, TaskError> {
        validate(&input)?;

        let next_id = self
            .repo
            .max_task_id()
            .await
            .map_err(TaskError::Store)?
            .map_or(1, |max| max + 1);

        let task = Task::new(next_id, input);
        self.repo.insert(&task).await.map_err(TaskError::Store)?;
        log::info!("Created task {}", task.id);
        Ok(task)
    }

    pub async fn update(&self, id: i64, input: TaskInput) -> Result<Task, TaskError> {
        validate(&input)?;

        let task = self.repo.update(id, &input).await.map_err(|e| match e {
            RepositoryError::NotFound => TaskError::NotFound(id),
            other => TaskError::Store(other),
        })?;
        log::info!("Updated task {}", id);
        Ok(task)
    }

    pub async fn delete(&self, id: i64) -> Result<(), TaskError> {
        self.repo.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => TaskError::NotFound(id),
            other => TaskError::Store(other),
        })?;
        log::info!("Deleted task {}", id);
        Ok(())
    }
}

fn validate(input: &TaskInput) -> Result<(), TaskError> {
    if input.title.trim().is_empty() {
        return Err(TaskError::EmptyTitle);
    }
    if input.description.trim().is_empty() {
        return Err(TaskError::EmptyDescription);
    }
    Ok(())
}
