use chrono::{DateTime, Utc};
use serde::Serialize;

use super::TaskStatus;
use crate::shared::{validate_required_text, DomainError, Priority, TaskId, UserId};

const MAX_TITLE_CHARS: usize = 256;

#[derive(Debug, Clone)]
pub struct NewTask {
    user_id: UserId,
    title: String,
    description: Option<String>,
    priority: Priority,
    status: TaskStatus,
    due_date: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl NewTask {
    pub fn new(
        user_id: UserId,
        title: &str,
        description: Option<String>,
        priority: Priority,
        status: TaskStatus,
        due_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let title = validate_required_text("Title", title, MAX_TITLE_CHARS)?;

        Ok(Self {
            user_id,
            title,
            description,
            priority,
            status,
            due_date,
            completed_at: status.is_completed().then_some(now),
            created_at: now,
        })
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Partial update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Task {
    id: TaskId,
    user_id: UserId,
    title: String,
    description: Option<String>,
    priority: Priority,
    status: TaskStatus,
    due_date: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: TaskId,
        user_id: UserId,
        title: String,
        description: Option<String>,
        priority: Priority,
        status: TaskStatus,
        due_date: Option<DateTime<Utc>>,
        completed_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            title,
            description,
            priority,
            status,
            due_date,
            completed_at,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_completed() && self.due_date.is_some_and(|due| due < now)
    }

    pub fn apply(&mut self, changes: TaskChanges, now: DateTime<Utc>) -> Result<(), DomainError> {
        if let Some(title) = changes.title {
            self.title = validate_required_text("Title", &title, MAX_TITLE_CHARS)?;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        if let Some(due_date) = changes.due_date {
            self.due_date = Some(due_date);
        }
        if let Some(status) = changes.status {
            self.set_status(status, now);
        }
        self.updated_at = now;
        Ok(())
    }

    /// `completed_at` is stamped the first time a task becomes completed and
    /// cleared whenever it leaves that state.
    pub fn set_status(&mut self, status: TaskStatus, now: DateTime<Utc>) {
        self.status = status;
        if status.is_completed() {
            self.completed_at.get_or_insert(now);
        } else {
            self.completed_at = None;
        }
        self.updated_at = now;
    }

    /// Explicit completion always re-stamps the completion time.
    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.status = TaskStatus::Completed;
        self.completed_at = Some(now);
        self.updated_at = now;
    }

    pub fn reopen(&mut self, now: DateTime<Utc>) {
        self.set_status(TaskStatus::Pending, now);
    }
}
