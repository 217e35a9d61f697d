#![allow(dead_code)]

use std::sync::Arc;

use researchpilot_domain::shared::UserId;
use researchpilot_domain::user::{Email, NewUser, UserRepository};
use researchpilot_infrastructure::persistence::repositories::SqliteUserRepository;
use researchpilot_infrastructure::persistence::Database;
use sqlx::SqlitePool;

/// Fresh in-memory database with every migration applied.
pub async fn setup_in_memory_db() -> SqlitePool {
    let db = Database::in_memory().await.expect("Open in-memory database");
    db.run_migrations().await.expect("Run migrations");
    db.pool().clone()
}

/// Insert a user so rows with a `user_id` foreign key can be written.
pub async fn create_user(pool: &SqlitePool, email: &str) -> UserId {
    let repo = SqliteUserRepository::new(Arc::new(pool.clone()));
    let new_user = NewUser::new(
        Email::parse(email).expect("Valid email"),
        Some("Test User".to_string()),
        "$argon2id$placeholder".to_string(),
        chrono::Utc::now(),
    )
    .expect("Build user");

    repo.create(&new_user).await.expect("Create user").id()
}
