use log::info;
use std::sync::Arc;

use crate::application::dtos::{
    CreateTaskRequest, TaskDto, TaskListQuery, TaskStatsDto, UpdateTaskRequest,
    DEFAULT_TASK_PAGE, MAX_TASK_PAGE,
};
use researchpilot_domain::shared::{Clock, DomainError, TaskId, UserId};
use researchpilot_domain::task::{
    sort_for_listing, NewTask, Task, TaskChanges, TaskFilter, TaskRepository, TaskStats,
};

pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
    clock: Arc<dyn Clock>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { tasks, clock }
    }

    /// One page of tasks, newest first in storage, then ordered for display
    /// within the page.
    pub async fn list(
        &self,
        user_id: UserId,
        query: TaskListQuery,
    ) -> Result<Vec<TaskDto>, DomainError> {
        let limit = query.limit.unwrap_or(DEFAULT_TASK_PAGE);
        if !(1..=MAX_TASK_PAGE).contains(&limit) {
            return Err(DomainError::Validation(format!(
                "limit must be between 1 and {}",
                MAX_TASK_PAGE
            )));
        }

        let filter = TaskFilter {
            status: query.status,
            priority: query.priority,
        };
        let mut tasks = self.tasks.list(user_id, filter, query.skip, limit).await?;
        sort_for_listing(&mut tasks);

        let now = self.clock.now();
        Ok(tasks.into_iter().map(|t| TaskDto::new(t, now)).collect())
    }

    pub async fn create(
        &self,
        user_id: UserId,
        request: CreateTaskRequest,
    ) -> Result<TaskDto, DomainError> {
        let now = self.clock.now();
        let task = NewTask::new(
            user_id,
            &request.title,
            request.description,
            request.priority,
            request.status,
            request.due_date,
            now,
        )?;
        let created = self.tasks.create(&task).await?;
        info!("User {} created task {}", user_id, created.id());
        Ok(TaskDto::new(created, now))
    }

    pub async fn get(&self, user_id: UserId, id: TaskId) -> Result<TaskDto, DomainError> {
        let task = self.find(user_id, id).await?;
        Ok(TaskDto::new(task, self.clock.now()))
    }

    pub async fn update(
        &self,
        user_id: UserId,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> Result<TaskDto, DomainError> {
        let now = self.clock.now();
        let mut task = self.find(user_id, id).await?;
        task.apply(
            TaskChanges {
                title: request.title,
                description: request.description,
                priority: request.priority,
                status: request.status,
                due_date: request.due_date,
            },
            now,
        )?;
        self.tasks.update(&task).await?;
        Ok(TaskDto::new(task, now))
    }

    pub async fn delete(&self, user_id: UserId, id: TaskId) -> Result<(), DomainError> {
        if self.tasks.delete(user_id, id).await? {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }

    pub async fn complete(&self, user_id: UserId, id: TaskId) -> Result<TaskDto, DomainError> {
        let now = self.clock.now();
        let mut task = self.find(user_id, id).await?;
        task.complete(now);
        self.tasks.update(&task).await?;
        Ok(TaskDto::new(task, now))
    }

    pub async fn uncomplete(&self, user_id: UserId, id: TaskId) -> Result<TaskDto, DomainError> {
        let now = self.clock.now();
        let mut task = self.find(user_id, id).await?;
        task.reopen(now);
        self.tasks.update(&task).await?;
        Ok(TaskDto::new(task, now))
    }

    pub async fn stats(&self, user_id: UserId) -> Result<TaskStatsDto, DomainError> {
        let tasks = self.tasks.list_all(user_id).await?;
        Ok(TaskStats::from_tasks(&tasks, self.clock.now()).into())
    }

    async fn find(&self, user_id: UserId, id: TaskId) -> Result<Task, DomainError> {
        self.tasks
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: TaskId) -> DomainError {
    DomainError::NotFound(format!("Task {} not found", id))
}
