use async_trait::async_trait;

use super::{NewTask, Task, TaskStatus};
use crate::shared::{DomainError, Priority, TaskId, UserId};

#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create(&self, task: &NewTask) -> Result<Task, DomainError>;
    async fn find_by_id(&self, user_id: UserId, id: TaskId) -> Result<Option<Task>, DomainError>;
    /// Filtered page, newest first.
    async fn list(
        &self,
        user_id: UserId,
        filter: TaskFilter,
        skip: u32,
        limit: u32,
    ) -> Result<Vec<Task>, DomainError>;
    async fn list_all(&self, user_id: UserId) -> Result<Vec<Task>, DomainError>;
    async fn update(&self, task: &Task) -> Result<(), DomainError>;
    async fn delete(&self, user_id: UserId, id: TaskId) -> Result<bool, DomainError>;
}
