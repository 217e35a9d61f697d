use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::shared::{validate_required_text, DomainError, InterestId, Priority, UserId};

const MAX_TOPIC_CHARS: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InterestLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl InterestLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterestLevel::Beginner => "beginner",
            InterestLevel::Intermediate => "intermediate",
            InterestLevel::Advanced => "advanced",
        }
    }
}

impl FromStr for InterestLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(InterestLevel::Beginner),
            "intermediate" => Ok(InterestLevel::Intermediate),
            "advanced" => Ok(InterestLevel::Advanced),
            other => Err(DomainError::Validation(format!(
                "Invalid level '{}', expected beginner, intermediate or advanced",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewResearchInterest {
    pub user_id: UserId,
    pub topic: String,
    pub description: Option<String>,
    pub level: InterestLevel,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

impl NewResearchInterest {
    pub fn new(
        user_id: UserId,
        topic: &str,
        description: Option<String>,
        level: InterestLevel,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            user_id,
            topic: validate_required_text("Topic", topic, MAX_TOPIC_CHARS)?,
            description,
            level,
            priority,
            created_at: now,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct InterestChanges {
    pub topic: Option<String>,
    pub description: Option<String>,
    pub level: Option<InterestLevel>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResearchInterest {
    id: InterestId,
    user_id: UserId,
    topic: String,
    description: Option<String>,
    level: InterestLevel,
    priority: Priority,
    created_at: DateTime<Utc>,
}

impl ResearchInterest {
    pub fn restore(
        id: InterestId,
        user_id: UserId,
        topic: String,
        description: Option<String>,
        level: InterestLevel,
        priority: Priority,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            topic,
            description,
            level,
            priority,
            created_at,
        }
    }

    pub fn id(&self) -> InterestId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn level(&self) -> InterestLevel {
        self.level
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn apply(&mut self, changes: InterestChanges) -> Result<(), DomainError> {
        if let Some(topic) = changes.topic {
            self.topic = validate_required_text("Topic", &topic, MAX_TOPIC_CHARS)?;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        if let Some(level) = changes.level {
            self.level = level;
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_is_required() {
        let err = NewResearchInterest::new(
            UserId::new(1),
            " ",
            None,
            InterestLevel::default(),
            Priority::default(),
            Utc::now(),
        );
        assert!(err.is_err());
    }

    #[test]
    fn apply_updates_only_given_fields() {
        let mut interest = ResearchInterest::restore(
            InterestId::new(3),
            UserId::new(1),
            "Knot theory".to_string(),
            Some("Khovanov homology".to_string()),
            InterestLevel::Beginner,
            Priority::Medium,
            Utc::now(),
        );

        interest
            .apply(InterestChanges {
                level: Some(InterestLevel::Advanced),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(interest.topic(), "Knot theory");
        assert_eq!(interest.description(), Some("Khovanov homology"));
        assert_eq!(interest.level(), InterestLevel::Advanced);
        assert_eq!(interest.priority(), Priority::Medium);
    }

    #[test]
    fn level_round_trips_through_str() {
        for level in [
            InterestLevel::Beginner,
            InterestLevel::Intermediate,
            InterestLevel::Advanced,
        ] {
            assert_eq!(level.as_str().parse::<InterestLevel>().unwrap(), level);
        }
        assert!("expert".parse::<InterestLevel>().is_err());
    }
}
