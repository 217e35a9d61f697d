use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use researchpilot_domain::research_interest::{
    NewResearchInterest, ResearchInterest, ResearchInterestRepository,
};
use researchpilot_domain::shared::{DomainError, InterestId, UserId};

#[derive(FromRow)]
struct InterestRow {
    id: i64,
    user_id: i64,
    topic: String,
    description: Option<String>,
    level: String,
    priority: String,
    created_at: DateTime<Utc>,
}

impl InterestRow {
    fn try_into_interest(self) -> Result<ResearchInterest, DomainError> {
        let level = self
            .level
            .parse()
            .map_err(|_| DomainError::DataIntegrity(format!("Invalid level: {}", self.level)))?;
        let priority = self
            .priority
            .parse()
            .map_err(|_| DomainError::DataIntegrity(format!("Invalid priority: {}", self.priority)))?;

        Ok(ResearchInterest::restore(
            InterestId::new(self.id),
            UserId::new(self.user_id),
            self.topic,
            self.description,
            level,
            priority,
            self.created_at,
        ))
    }
}

pub struct SqliteResearchInterestRepository {
    base: SqliteRepositoryBase,
}

impl SqliteResearchInterestRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl ResearchInterestRepository for SqliteResearchInterestRepository {
    async fn create(
        &self,
        interest: &NewResearchInterest,
    ) -> Result<ResearchInterest, DomainError> {
        let query = r#"
            INSERT INTO research_interests (user_id, topic, description, level, priority, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id, user_id, topic, description, level, priority, created_at
        "#;

        let row: InterestRow = self
            .base
            .fetch_one(
                sqlx::query_as(query)
                    .bind(interest.user_id.value())
                    .bind(&interest.topic)
                    .bind(interest.description.as_deref())
                    .bind(interest.level.as_str())
                    .bind(interest.priority.as_str())
                    .bind(interest.created_at),
                "Create research interest",
            )
            .await?;

        row.try_into_interest()
    }

    async fn find_by_id(
        &self,
        user_id: UserId,
        id: InterestId,
    ) -> Result<Option<ResearchInterest>, DomainError> {
        let query = r#"
            SELECT id, user_id, topic, description, level, priority, created_at
            FROM research_interests
            WHERE id = ?1 AND user_id = ?2
        "#;

        let row: Option<InterestRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(query).bind(id.value()).bind(user_id.value()),
                "Find research interest by ID",
            )
            .await?;

        row.map(InterestRow::try_into_interest).transpose()
    }

    async fn list(&self, user_id: UserId) -> Result<Vec<ResearchInterest>, DomainError> {
        let query = r#"
            SELECT id, user_id, topic, description, level, priority, created_at
            FROM research_interests
            WHERE user_id = ?1
            ORDER BY created_at DESC, id DESC
        "#;

        let rows: Vec<InterestRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query).bind(user_id.value()),
                "List research interests",
            )
            .await?;

        rows.into_iter().map(InterestRow::try_into_interest).collect()
    }

    async fn update(&self, interest: &ResearchInterest) -> Result<(), DomainError> {
        let query = r#"
            UPDATE research_interests
            SET topic = ?1, description = ?2, level = ?3, priority = ?4
            WHERE id = ?5 AND user_id = ?6
        "#;

        let result = self
            .base
            .execute(
                sqlx::query(query)
                    .bind(interest.topic())
                    .bind(interest.description())
                    .bind(interest.level().as_str())
                    .bind(interest.priority().as_str())
                    .bind(interest.id().value())
                    .bind(interest.user_id().value()),
                "Update research interest",
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!(
                "Research interest {}",
                interest.id()
            )));
        }
        Ok(())
    }

    async fn delete(&self, user_id: UserId, id: InterestId) -> Result<bool, DomainError> {
        let result = self
            .base
            .execute(
                sqlx::query("DELETE FROM research_interests WHERE id = ?1 AND user_id = ?2")
                    .bind(id.value())
                    .bind(user_id.value()),
                "Delete research interest",
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
