use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use researchpilot_domain::shared::{DomainError, UserId};
use researchpilot_domain::subscription::{Subscription, SubscriptionRepository};

#[derive(FromRow)]
struct SubscriptionRow {
    user_id: i64,
    plan: String,
    status: String,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
}

impl SubscriptionRow {
    fn try_into_subscription(self) -> Result<Subscription, DomainError> {
        Ok(Subscription::restore(
            UserId::new(self.user_id),
            self.plan.parse()?,
            self.status.parse()?,
            self.start_date,
            self.end_date,
        ))
    }
}

pub struct SqliteSubscriptionRepository {
    base: SqliteRepositoryBase,
}

impl SqliteSubscriptionRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl SubscriptionRepository for SqliteSubscriptionRepository {
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO subscriptions (user_id, plan, status, start_date, end_date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(user_id) DO UPDATE SET
                plan = excluded.plan,
                status = excluded.status,
                start_date = excluded.start_date,
                end_date = excluded.end_date
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(subscription.user_id().value())
                    .bind(subscription.plan().as_str())
                    .bind(subscription.status().as_str())
                    .bind(subscription.start_date())
                    .bind(subscription.end_date()),
                "Save subscription",
            )
            .await?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Option<Subscription>, DomainError> {
        let query = r#"
            SELECT user_id, plan, status, start_date, end_date
            FROM subscriptions
            WHERE user_id = ?1
        "#;

        let row: Option<SubscriptionRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(query).bind(user_id.value()),
                "Find subscription by user",
            )
            .await?;

        row.map(SubscriptionRow::try_into_subscription).transpose()
    }
}
