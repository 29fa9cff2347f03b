use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use uuid::Uuid;

use super::{RepositoryError, TaskRepository, UserRepository};
use crate::models::{Role, Task, TaskInput, User};

const TASK_COLUMNS: &str = "task_id, title, description, due_date, status";

/// Connects to PostgreSQL and applies pending migrations from `migrations/`.
pub async fn init_pool(database_url: &str) -> Result<PgPool, RepositoryError> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

#[derive(FromRow)]
struct TaskRow {
    task_id: i64,
    title: String,
    description: String,
    due_date: Option<DateTime<Utc>>,
    status: String,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Task {
        Task {
            id: row.task_id,
            title: row.title,
            description: row.description,
            due_date: row.due_date,
            status: row.status,
        }
    }
}

#[derive(FromRow)]
struct UserRow {
    username: String,
    password_hash: String,
    role: String,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<User, RepositoryError> {
        Ok(User {
            role: row.role.parse::<Role>().map_err(RepositoryError::Backend)?,
            username: row.username,
            password_hash: row.password_hash,
        })
    }
}

/// Tasks in the `tasks` table. `record_id` is the storage key; `task_id` is the
/// user-facing id and carries a unique index.
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn list(&self) -> Result<Vec<Task>, RepositoryError> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {} FROM tasks ORDER BY created_at, task_id",
            TASK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn find_by_task_id(&self, task_id: i64) -> Result<Option<Task>, RepositoryError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {} FROM tasks WHERE task_id = $1",
            TASK_COLUMNS
        ))
        .bind(task_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Task::from))
    }

    async fn max_task_id(&self) -> Result<Option<i64>, RepositoryError> {
        let (max,): (Option<i64>,) = sqlx::query_as("SELECT MAX(task_id) FROM tasks")
            .fetch_one(&self.pool)
            .await?;
        Ok(max)
    }

    async fn insert(&self, task: &Task) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO tasks (record_id, task_id, title, description, due_date, status)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(Uuid::new_v4())
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(&task.status)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, task_id: i64, input: &TaskInput) -> Result<Task, RepositoryError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "UPDATE tasks
             SET title = $1, description = $2, due_date = $3, status = $4
             WHERE task_id = $5
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.due_date)
        .bind(&input.status)
        .bind(task_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Task::from).ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, task_id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM tasks WHERE task_id = $1")
            .bind(task_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT username, password_hash, role FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO users (record_id, username, password_hash, role) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn set_role(&self, username: &str, role: Role) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET role = $1 WHERE username = $2")
            .bind(role.as_str())
            .bind(username)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
