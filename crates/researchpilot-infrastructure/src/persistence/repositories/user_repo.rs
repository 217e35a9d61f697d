use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use researchpilot_domain::shared::{DomainError, UserId};
use researchpilot_domain::user::{Email, NewUser, User, UserRepository};

#[derive(FromRow)]
struct UserRow {
    id: i64,
    email: String,
    name: Option<String>,
    password_hash: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn try_into_user(self) -> Result<User, DomainError> {
        let email = Email::parse(&self.email)
            .map_err(|_| DomainError::DataIntegrity(format!("Invalid stored email: {}", self.email)))?;

        Ok(User::restore(
            UserId::new(self.id),
            email,
            self.name,
            self.password_hash,
            self.is_active,
            self.created_at,
            self.updated_at,
        ))
    }
}

pub struct SqliteUserRepository {
    base: SqliteRepositoryBase,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (email, name, password_hash, is_active, created_at, updated_at)
            VALUES (?1, ?2, ?3, 1, ?4, ?4)
            RETURNING id, email, name, password_hash, is_active, created_at, updated_at
        "#;

        let row: UserRow = self
            .base
            .fetch_one(
                sqlx::query_as(query)
                    .bind(user.email().as_str())
                    .bind(user.name())
                    .bind(user.password_hash())
                    .bind(user.created_at()),
                "Create user",
            )
            .await
            .map_err(|e| match e {
                DomainError::Conflict(_) => {
                    DomainError::Conflict("Email already registered".to_string())
                }
                other => other,
            })?;

        row.try_into_user()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, name, password_hash, is_active, created_at, updated_at
            FROM users
            WHERE id = ?1
        "#;

        let row: Option<UserRow> = self
            .base
            .fetch_optional(sqlx::query_as(query).bind(id.value()), "Find user by ID")
            .await?;

        row.map(UserRow::try_into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, name, password_hash, is_active, created_at, updated_at
            FROM users
            WHERE email = ?1
        "#;

        let row: Option<UserRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(query).bind(email.as_str()),
                "Find user by email",
            )
            .await?;

        row.map(UserRow::try_into_user).transpose()
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let query = r#"
            UPDATE users
            SET email = ?1,
                name = ?2,
                password_hash = ?3,
                is_active = ?4,
                updated_at = ?5
            WHERE id = ?6
        "#;

        let result = self
            .base
            .execute(
                sqlx::query(query)
                    .bind(user.email().as_str())
                    .bind(user.name())
                    .bind(user.password_hash())
                    .bind(user.is_active())
                    .bind(user.updated_at())
                    .bind(user.id().value()),
                "Update user",
            )
            .await
            .map_err(|e| match e {
                DomainError::Conflict(_) => DomainError::Conflict("Email already in use".to_string()),
                other => other,
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("User {}", user.id())));
        }
        Ok(())
    }
}
