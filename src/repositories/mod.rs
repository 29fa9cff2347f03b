//! Store capabilities used by the services.
//!
//! Each trait has one implementation per backend: `postgres` for deployments and
//! `memory` for single-process runs and tests. Services hold them as
//! `Arc<dyn ...>` and never know which backend they talk to.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::fmt;

use crate::models::{Role, Task, TaskInput, User};

pub use memory::{MemoryTaskRepository, MemoryUserRepository};
pub use postgres::{PgTaskRepository, PgUserRepository};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No record matched the key.
    NotFound,
    /// A uniqueness constraint (username, task id) rejected the write.
    Duplicate,
    /// Any other backend failure.
    Backend(String),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RepositoryError::NotFound => write!(f, "record not found"),
            RepositoryError::Duplicate => write!(f, "duplicate record"),
            RepositoryError::Backend(msg) => write!(f, "store error: {}", msg),
        }
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> RepositoryError {
        match error {
            sqlx::Error::RowNotFound => RepositoryError::NotFound,
            sqlx::Error::Database(ref db) if db.is_unique_violation() => RepositoryError::Duplicate,
            _ => RepositoryError::Backend(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for RepositoryError {
    fn from(error: sqlx::migrate::MigrateError) -> RepositoryError {
        RepositoryError::Backend(error.to_string())
    }
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All tasks in store order.
    async fn list(&self) -> Result<Vec<Task>, RepositoryError>;

    async fn find_by_task_id(&self, task_id: i64) -> Result<Option<Task>, RepositoryError>;

    /// Highest user-facing id currently stored, `None` when the store is empty.
    async fn max_task_id(&self) -> Result<Option<i64>, RepositoryError>;

    /// Fails with `Duplicate` if `task.id` is already taken.
    async fn insert(&self, task: &Task) -> Result<(), RepositoryError>;

    /// Replaces the mutable fields of the task and returns it. `NotFound` if absent.
    async fn update(&self, task_id: i64, input: &TaskInput) -> Result<Task, RepositoryError>;

    /// `NotFound` if absent.
    async fn delete(&self, task_id: i64) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// Fails with `Duplicate` if the username is already registered.
    async fn insert(&self, user: &User) -> Result<(), RepositoryError>;

    /// `NotFound` if no such username.
    async fn set_role(&self, username: &str, role: Role) -> Result<(), RepositoryError>;
}
