use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use researchpilot_domain::shared::{DomainError, TaskId, UserId};
use researchpilot_domain::task::{NewTask, Task, TaskFilter, TaskRepository};

const TASK_COLUMNS: &str = r#"
    id, user_id, title, description, priority, status,
    due_date, completed_at, created_at, updated_at
"#;

#[derive(FromRow)]
struct TaskRow {
    id: i64,
    user_id: i64,
    title: String,
    description: Option<String>,
    priority: String,
    status: String,
    due_date: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TaskRow {
    fn try_into_task(self) -> Result<Task, DomainError> {
        Ok(Task::restore(
            TaskId::new(self.id),
            UserId::new(self.user_id),
            self.title,
            self.description,
            self.priority
                .parse()
                .map_err(|_| DomainError::DataIntegrity(format!("Invalid priority: {}", self.priority)))?,
            self.status
                .parse()
                .map_err(|_| DomainError::DataIntegrity(format!("Invalid status: {}", self.status)))?,
            self.due_date,
            self.completed_at,
            self.created_at,
            self.updated_at,
        ))
    }
}

pub struct SqliteTaskRepository {
    base: SqliteRepositoryBase,
}

impl SqliteTaskRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn create(&self, task: &NewTask) -> Result<Task, DomainError> {
        let query = format!(
            r#"
            INSERT INTO tasks (
                user_id, title, description, priority, status,
                due_date, completed_at, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
            RETURNING {}
            "#,
            TASK_COLUMNS
        );

        let row: TaskRow = self
            .base
            .fetch_one(
                sqlx::query_as(&query)
                    .bind(task.user_id().value())
                    .bind(task.title())
                    .bind(task.description())
                    .bind(task.priority().as_str())
                    .bind(task.status().as_str())
                    .bind(task.due_date())
                    .bind(task.completed_at())
                    .bind(task.created_at()),
                "Create task",
            )
            .await?;

        row.try_into_task()
    }

    async fn find_by_id(&self, user_id: UserId, id: TaskId) -> Result<Option<Task>, DomainError> {
        let query = format!(
            "SELECT {} FROM tasks WHERE id = ?1 AND user_id = ?2",
            TASK_COLUMNS
        );

        let row: Option<TaskRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query).bind(id.value()).bind(user_id.value()),
                "Find task by ID",
            )
            .await?;

        row.map(TaskRow::try_into_task).transpose()
    }

    async fn list(
        &self,
        user_id: UserId,
        filter: TaskFilter,
        skip: u32,
        limit: u32,
    ) -> Result<Vec<Task>, DomainError> {
        let query = format!(
            r#"
            SELECT {}
            FROM tasks
            WHERE user_id = ?1
              AND (?2 IS NULL OR status = ?2)
              AND (?3 IS NULL OR priority = ?3)
            ORDER BY created_at DESC, id DESC
            LIMIT ?4 OFFSET ?5
            "#,
            TASK_COLUMNS
        );

        let rows: Vec<TaskRow> = self
            .base
            .fetch_all(
                sqlx::query_as(&query)
                    .bind(user_id.value())
                    .bind(filter.status.map(|s| s.as_str()))
                    .bind(filter.priority.map(|p| p.as_str()))
                    .bind(i64::from(limit))
                    .bind(i64::from(skip)),
                "List tasks",
            )
            .await?;

        rows.into_iter().map(TaskRow::try_into_task).collect()
    }

    async fn list_all(&self, user_id: UserId) -> Result<Vec<Task>, DomainError> {
        let query = format!(
            "SELECT {} FROM tasks WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
            TASK_COLUMNS
        );

        let rows: Vec<TaskRow> = self
            .base
            .fetch_all(sqlx::query_as(&query).bind(user_id.value()), "List all tasks")
            .await?;

        rows.into_iter().map(TaskRow::try_into_task).collect()
    }

    async fn update(&self, task: &Task) -> Result<(), DomainError> {
        let query = r#"
            UPDATE tasks
            SET title = ?1,
                description = ?2,
                priority = ?3,
                status = ?4,
                due_date = ?5,
                completed_at = ?6,
                updated_at = ?7
            WHERE id = ?8 AND user_id = ?9
        "#;

        let result = self
            .base
            .execute(
                sqlx::query(query)
                    .bind(task.title())
                    .bind(task.description())
                    .bind(task.priority().as_str())
                    .bind(task.status().as_str())
                    .bind(task.due_date())
                    .bind(task.completed_at())
                    .bind(task.updated_at())
                    .bind(task.id().value())
                    .bind(task.user_id().value()),
                "Update task",
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("Task {}", task.id())));
        }
        Ok(())
    }

    async fn delete(&self, user_id: UserId, id: TaskId) -> Result<bool, DomainError> {
        let result = self
            .base
            .execute(
                sqlx::query("DELETE FROM tasks WHERE id = ?1 AND user_id = ?2")
                    .bind(id.value())
                    .bind(user_id.value()),
                "Delete task",
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
