use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Mood;
use crate::shared::{CheckInId, DomainError, UserId};

const MAX_NOTE_CHARS: usize = 10_000;

/// A daily check-in that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewCheckIn {
    user_id: UserId,
    date: NaiveDate,
    mood: Mood,
    content: Option<String>,
    difficulties: Option<String>,
    tasks_completed: u32,
    tasks_total: u32,
    created_at: DateTime<Utc>,
}

impl NewCheckIn {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: UserId,
        date: NaiveDate,
        mood: Mood,
        content: Option<String>,
        difficulties: Option<String>,
        tasks_completed: u32,
        tasks_total: u32,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let content = normalize_note("Content", content)?;
        let difficulties = normalize_note("Difficulties", difficulties)?;

        Ok(Self {
            user_id,
            date,
            mood,
            content,
            difficulties,
            tasks_completed,
            tasks_total,
            created_at: now,
        })
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn difficulties(&self) -> Option<&str> {
        self.difficulties.as_deref()
    }

    pub fn tasks_completed(&self) -> u32 {
        self.tasks_completed
    }

    pub fn tasks_total(&self) -> u32 {
        self.tasks_total
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

fn normalize_note(field: &str, value: Option<String>) -> Result<Option<String>, DomainError> {
    match value {
        Some(text) if text.trim().is_empty() => Ok(None),
        Some(text) if text.chars().count() > MAX_NOTE_CHARS => Err(DomainError::Validation(
            format!("{} must be at most {} characters", field, MAX_NOTE_CHARS),
        )),
        other => Ok(other),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckIn {
    id: CheckInId,
    user_id: UserId,
    date: NaiveDate,
    mood: Mood,
    content: Option<String>,
    difficulties: Option<String>,
    tasks_completed: u32,
    tasks_total: u32,
    created_at: DateTime<Utc>,
}

impl CheckIn {
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: CheckInId,
        user_id: UserId,
        date: NaiveDate,
        mood: Mood,
        content: Option<String>,
        difficulties: Option<String>,
        tasks_completed: u32,
        tasks_total: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            date,
            mood,
            content,
            difficulties,
            tasks_completed,
            tasks_total,
            created_at,
        }
    }

    pub fn id(&self) -> CheckInId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn difficulties(&self) -> Option<&str> {
        self.difficulties.as_deref()
    }

    pub fn tasks_completed(&self) -> u32 {
        self.tasks_completed
    }

    pub fn tasks_total(&self) -> u32 {
        self.tasks_total
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Share of the day's tasks that were completed, in percent.
    /// A day without planned tasks counts as 0.
    pub fn completion_rate(&self) -> f64 {
        if self.tasks_total == 0 {
            0.0
        } else {
            self.tasks_completed as f64 / self.tasks_total as f64 * 100.0
        }
    }
}
