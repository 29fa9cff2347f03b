use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{RepositoryError, TaskRepository, UserRepository};
use crate::models::{Role, Task, TaskInput, User};

/// Tasks kept in insertion order.
#[derive(Default)]
pub struct MemoryTaskRepository {
    tasks: RwLock<Vec<Task>>,
}

impl MemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for MemoryTaskRepository {
    async fn list(&self) -> Result<Vec<Task>, RepositoryError> {
        Ok(self.tasks.read().await.clone())
    }

    async fn find_by_task_id(&self, task_id: i64) -> Result<Option<Task>, RepositoryError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|task| task.id == task_id).cloned())
    }

    async fn max_task_id(&self) -> Result<Option<i64>, RepositoryError> {
        Ok(self.tasks.read().await.iter().map(|task| task.id).max())
    }

    async fn insert(&self, task: &Task) -> Result<(), RepositoryError> {
        let mut tasks = self.tasks.write().await;
        if tasks.iter().any(|existing| existing.id == task.id) {
            return Err(RepositoryError::Duplicate);
        }
        tasks.push(task.clone());
        Ok(())
    }

    async fn update(&self, task_id: i64, input: &TaskInput) -> Result<Task, RepositoryError> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .iter_mut()
            .find(|task| task.id == task_id)
            .ok_or(RepositoryError::NotFound)?;
        task.apply(input.clone());
        Ok(task.clone())
    }

    async fn delete(&self, task_id: i64) -> Result<(), RepositoryError> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|task| task.id != task_id);
        if tasks.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.username == username).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        if users.iter().any(|existing| existing.username == user.username) {
            return Err(RepositoryError::Duplicate);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn set_role(&self, username: &str, role: Role) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|user| user.username == username)
            .ok_or(RepositoryError::NotFound)?;
        user.role = role;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str) -> TaskInput {
        TaskInput {
            title: title.into(),
            description: "desc".into(),
            due_date: None,
            status: "pending".into(),
        }
    }

    #[actix_rt::test]
    async fn test_task_store_keeps_insertion_order() {
        let repo = MemoryTaskRepository::new();
        assert_eq!(repo.max_task_id().await.unwrap(), None);

        repo.insert(&Task::new(2, input("second"))).await.unwrap();
        repo.insert(&Task::new(1, input("first"))).await.unwrap();

        let titles: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|task| task.title)
            .collect();
        assert_eq!(titles, vec!["second", "first"]);
        assert_eq!(repo.max_task_id().await.unwrap(), Some(2));
    }

    #[actix_rt::test]
    async fn test_task_store_rejects_duplicate_id() {
        let repo = MemoryTaskRepository::new();
        repo.insert(&Task::new(1, input("a"))).await.unwrap();
        assert_eq!(
            repo.insert(&Task::new(1, input("b"))).await,
            Err(RepositoryError::Duplicate)
        );
    }

    #[actix_rt::test]
    async fn test_task_store_update_and_delete() {
        let repo = MemoryTaskRepository::new();
        repo.insert(&Task::new(1, input("a"))).await.unwrap();

        let updated = repo.update(1, &input("renamed")).await.unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.title, "renamed");
        assert_eq!(repo.update(9, &input("x")).await, Err(RepositoryError::NotFound));

        repo.delete(1).await.unwrap();
        assert_eq!(repo.delete(1).await, Err(RepositoryError::NotFound));
        assert!(repo.find_by_task_id(1).await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_user_store() {
        let repo = MemoryUserRepository::new();
        let user = User::new("frank".into(), "hash".into());
        repo.insert(&user).await.unwrap();
        assert_eq!(repo.insert(&user).await, Err(RepositoryError::Duplicate));

        repo.set_role("frank", Role::Admin).await.unwrap();
        let stored = repo.find_by_username("frank").await.unwrap().unwrap();
        assert!(stored.is_admin());

        assert_eq!(
            repo.set_role("nobody", Role::Admin).await,
            Err(RepositoryError::NotFound)
        );
    }
}
