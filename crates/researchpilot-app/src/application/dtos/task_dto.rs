use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use researchpilot_domain::shared::Priority;
use researchpilot_domain::task::{Task, TaskStats, TaskStatus};

pub const DEFAULT_TASK_PAGE: u32 = 100;
pub const MAX_TASK_PAGE: u32 = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListQuery {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    #[serde(default)]
    pub skip: u32,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskDto {
    #[serde(flatten)]
    pub task: Task,
    pub is_overdue: bool,
}

impl TaskDto {
    pub fn new(task: Task, now: DateTime<Utc>) -> Self {
        let is_overdue = task.is_overdue(now);
        Self { task, is_overdue }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskStatsDto {
    #[serde(flatten)]
    pub stats: TaskStats,
    pub completion_rate: f64,
}

impl From<TaskStats> for TaskStatsDto {
    fn from(stats: TaskStats) -> Self {
        let completion_rate = stats.completion_rate();
        Self {
            stats,
            completion_rate,
        }
    }
}
