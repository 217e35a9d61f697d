use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use super::to_u32;
use crate::persistence::SqliteRepositoryBase;
use researchpilot_domain::check_in::{CheckIn, CheckInRepository, NewCheckIn};
use researchpilot_domain::shared::{CheckInId, DomainError, UserId};

const CHECK_IN_COLUMNS: &str = r#"
    id, user_id, date, mood, content, difficulties,
    tasks_completed, tasks_total, created_at
"#;

#[derive(FromRow)]
struct CheckInRow {
    id: i64,
    user_id: i64,
    date: NaiveDate,
    mood: String,
    content: Option<String>,
    difficulties: Option<String>,
    tasks_completed: i64,
    tasks_total: i64,
    created_at: DateTime<Utc>,
}

impl CheckInRow {
    fn try_into_check_in(self) -> Result<CheckIn, DomainError> {
        let mood = self
            .mood
            .parse()
            .map_err(|_| DomainError::DataIntegrity(format!("Invalid mood: {}", self.mood)))?;

        Ok(CheckIn::restore(
            CheckInId::new(self.id),
            UserId::new(self.user_id),
            self.date,
            mood,
            self.content,
            self.difficulties,
            to_u32(self.tasks_completed, "tasks_completed")?,
            to_u32(self.tasks_total, "tasks_total")?,
            self.created_at,
        ))
    }
}

pub struct SqliteCheckInRepository {
    base: SqliteRepositoryBase,
}

impl SqliteCheckInRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl CheckInRepository for SqliteCheckInRepository {
    async fn create(&self, check_in: &NewCheckIn) -> Result<CheckIn, DomainError> {
        let query = format!(
            r#"
            INSERT INTO check_ins (
                user_id, date, mood, content, difficulties,
                tasks_completed, tasks_total, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            RETURNING {}
            "#,
            CHECK_IN_COLUMNS
        );

        let row: CheckInRow = self
            .base
            .fetch_one(
                sqlx::query_as(&query)
                    .bind(check_in.user_id().value())
                    .bind(check_in.date())
                    .bind(check_in.mood().as_str())
                    .bind(check_in.content())
                    .bind(check_in.difficulties())
                    .bind(i64::from(check_in.tasks_completed()))
                    .bind(i64::from(check_in.tasks_total()))
                    .bind(check_in.created_at()),
                "Create check-in",
            )
            .await?;

        row.try_into_check_in()
    }

    async fn find_by_id(
        &self,
        user_id: UserId,
        id: CheckInId,
    ) -> Result<Option<CheckIn>, DomainError> {
        let query = format!(
            "SELECT {} FROM check_ins WHERE id = ?1 AND user_id = ?2",
            CHECK_IN_COLUMNS
        );

        let row: Option<CheckInRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query).bind(id.value()).bind(user_id.value()),
                "Find check-in by ID",
            )
            .await?;

        row.map(CheckInRow::try_into_check_in).transpose()
    }

    async fn find_by_date(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> Result<Option<CheckIn>, DomainError> {
        let query = format!(
            "SELECT {} FROM check_ins WHERE user_id = ?1 AND date = ?2",
            CHECK_IN_COLUMNS
        );

        let row: Option<CheckInRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query).bind(user_id.value()).bind(date),
                "Find check-in by date",
            )
            .await?;

        row.map(CheckInRow::try_into_check_in).transpose()
    }

    async fn list(
        &self,
        user_id: UserId,
        skip: u32,
        limit: u32,
    ) -> Result<Vec<CheckIn>, DomainError> {
        let query = format!(
            r#"
            SELECT {}
            FROM check_ins
            WHERE user_id = ?1
            ORDER BY date DESC
            LIMIT ?2 OFFSET ?3
            "#,
            CHECK_IN_COLUMNS
        );

        let rows: Vec<CheckInRow> = self
            .base
            .fetch_all(
                sqlx::query_as(&query)
                    .bind(user_id.value())
                    .bind(i64::from(limit))
                    .bind(i64::from(skip)),
                "List check-ins",
            )
            .await?;

        rows.into_iter().map(CheckInRow::try_into_check_in).collect()
    }

    async fn list_all(&self, user_id: UserId) -> Result<Vec<CheckIn>, DomainError> {
        let query = format!(
            "SELECT {} FROM check_ins WHERE user_id = ?1 ORDER BY date ASC",
            CHECK_IN_COLUMNS
        );

        let rows: Vec<CheckInRow> = self
            .base
            .fetch_all(
                sqlx::query_as(&query).bind(user_id.value()),
                "List all check-ins",
            )
            .await?;

        rows.into_iter().map(CheckInRow::try_into_check_in).collect()
    }

    async fn list_in_range(
        &self,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CheckIn>, DomainError> {
        let query = format!(
            r#"
            SELECT {}
            FROM check_ins
            WHERE user_id = ?1
              AND date >= ?2
              AND date <= ?3
            ORDER BY date ASC
            "#,
            CHECK_IN_COLUMNS
        );

        let rows: Vec<CheckInRow> = self
            .base
            .fetch_all(
                sqlx::query_as(&query)
                    .bind(user_id.value())
                    .bind(start)
                    .bind(end),
                "List check-ins in range",
            )
            .await?;

        rows.into_iter().map(CheckInRow::try_into_check_in).collect()
    }

    async fn list_dates(&self, user_id: UserId) -> Result<Vec<NaiveDate>, DomainError> {
        let query = "SELECT DISTINCT date FROM check_ins WHERE user_id = ?1 ORDER BY date ASC";

        sqlx::query_scalar(query)
            .bind(user_id.value())
            .fetch_all(self.base.pool())
            .await
            .map_err(|e| DomainError::Repository(format!("List check-in dates: {e}")))
    }

    async fn delete(&self, user_id: UserId, id: CheckInId) -> Result<bool, DomainError> {
        let result = self
            .base
            .execute(
                sqlx::query("DELETE FROM check_ins WHERE id = ?1 AND user_id = ?2")
                    .bind(id.value())
                    .bind(user_id.value()),
                "Delete check-in",
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, user_id: UserId) -> Result<u32, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM check_ins WHERE user_id = ?1")
            .bind(user_id.value())
            .fetch_one(self.base.pool())
            .await
            .map_err(|e| DomainError::Repository(format!("Count check-ins: {e}")))?;

        to_u32(count, "count")
    }
}
