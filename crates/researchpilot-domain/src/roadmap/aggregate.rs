use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::shared::{validate_required_text, DomainError, UserId};

const MAX_TOPIC_CHARS: usize = 255;
pub(super) const MAX_WEEKS: u32 = 52;
pub(super) const MAX_DAILY_HOURS: u32 = 24;

/// Validated planning parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapSettings {
    pub topic: String,
    pub total_weeks: u32,
    pub daily_hours: u32,
    pub theory_ratio: f64,
}

impl RoadmapSettings {
    pub fn new(
        topic: &str,
        total_weeks: u32,
        daily_hours: u32,
        theory_ratio: f64,
    ) -> Result<Self, DomainError> {
        let topic = validate_required_text("Topic", topic, MAX_TOPIC_CHARS)?;

        if !(1..=MAX_WEEKS).contains(&total_weeks) {
            return Err(DomainError::Validation(format!(
                "Weeks must be between 1 and {}",
                MAX_WEEKS
            )));
        }
        if !(1..=MAX_DAILY_HOURS).contains(&daily_hours) {
            return Err(DomainError::Validation(format!(
                "Daily hours must be between 1 and {}",
                MAX_DAILY_HOURS
            )));
        }
        if !(0.0..=1.0).contains(&theory_ratio) {
            return Err(DomainError::Validation(
                "Theory ratio must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self {
            topic,
            total_weeks,
            daily_hours,
            theory_ratio,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoadmapPhase {
    pub name: String,
    pub weeks: u32,
    pub start_week: u32,
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roadmap {
    #[serde(skip)]
    user_id: UserId,
    topic: String,
    total_weeks: u32,
    daily_hours: u32,
    theory_ratio: f64,
    created_at: DateTime<Utc>,
    phases: Vec<RoadmapPhase>,
}

impl Roadmap {
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        user_id: UserId,
        topic: String,
        total_weeks: u32,
        daily_hours: u32,
        theory_ratio: f64,
        created_at: DateTime<Utc>,
        phases: Vec<RoadmapPhase>,
    ) -> Self {
        Self {
            user_id,
            topic,
            total_weeks,
            daily_hours,
            theory_ratio,
            created_at,
            phases,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn total_weeks(&self) -> u32 {
        self.total_weeks
    }

    pub fn daily_hours(&self) -> u32 {
        self.daily_hours
    }

    pub fn theory_ratio(&self) -> f64 {
        self.theory_ratio
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn phases(&self) -> &[RoadmapPhase] {
        &self.phases
    }
}
