use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Task, TaskStatus};
use crate::shared::Priority;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: u32,
    pub pending: u32,
    pub in_progress: u32,
    pub completed: u32,
    pub high_priority: u32,
    pub medium_priority: u32,
    pub low_priority: u32,
    pub overdue: u32,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task], now: DateTime<Utc>) -> Self {
        tasks.iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            match task.status() {
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
            }
            match task.priority() {
                Priority::High => stats.high_priority += 1,
                Priority::Medium => stats.medium_priority += 1,
                Priority::Low => stats.low_priority += 1,
            }
            if task.is_overdue(now) {
                stats.overdue += 1;
            }
            stats
        })
    }

    /// Completed share in percent, rounded to 2 decimals.
    pub fn completion_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let rate = self.completed as f64 / self.total as f64 * 100.0;
        (rate * 100.0).round() / 100.0
    }
}

/// Listing order: priority (high first), pending before other statuses,
/// then newest first.
pub fn sort_for_listing(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        a.priority()
            .rank()
            .cmp(&b.priority().rank())
            .then_with(|| {
                let a_open = a.status() != TaskStatus::Pending;
                let b_open = b.status() != TaskStatus::Pending;
                a_open.cmp(&b_open)
            })
            .then_with(|| b.created_at().cmp(&a.created_at()))
    });
}
