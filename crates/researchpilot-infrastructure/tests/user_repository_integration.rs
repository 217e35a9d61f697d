use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use researchpilot_domain::shared::{DomainError, UserId};
use researchpilot_domain::subscription::{
    Subscription, SubscriptionPlan, SubscriptionRepository, SubscriptionStatus,
};
use researchpilot_domain::user::{Email, NewUser, UserRepository};
use researchpilot_infrastructure::persistence::repositories::{
    SqliteSubscriptionRepository, SqliteUserRepository,
};
use researchpilot_infrastructure::security::PasswordService;

mod test_helpers;

fn new_user(email: &str, password_hash: String) -> NewUser {
    NewUser::new(
        Email::parse(email).unwrap(),
        Some("Ada".to_string()),
        password_hash,
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
    )
    .expect("Build user")
}

#[tokio::test]
async fn user_create_and_lookup_by_email() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteUserRepository::new(Arc::new(pool));
    let passwords = PasswordService::new();

    let hash = passwords.hash("s3cure-password").unwrap();
    let created = repo
        .create(&new_user("Ada@Example.com", hash))
        .await
        .expect("Create user");

    assert_eq!(created.email().as_str(), "ada@example.com");
    assert!(created.is_active());
    assert_eq!(
        created.created_at(),
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    );

    let found = repo
        .find_by_email(&Email::parse("ada@example.com").unwrap())
        .await
        .expect("Find by email")
        .expect("User should exist");

    assert_eq!(found.id(), created.id());
    assert!(passwords
        .verify("s3cure-password", found.password_hash())
        .unwrap());
}

#[tokio::test]
async fn user_duplicate_email_is_conflict() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteUserRepository::new(Arc::new(pool));

    repo.create(&new_user("ada@example.com", "hash".to_string()))
        .await
        .expect("First user");
    let duplicate = repo
        .create(&new_user("ADA@example.com", "hash".to_string()))
        .await;

    assert!(matches!(duplicate, Err(DomainError::Conflict(_))));
}

#[tokio::test]
async fn user_update_persists_changes() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteUserRepository::new(Arc::new(pool));

    let mut user = repo
        .create(&new_user("ada@example.com", "hash".to_string()))
        .await
        .unwrap();

    let now = Utc::now();
    user.rename(Some("Ada Lovelace".to_string()), now).unwrap();
    user.change_email(Email::parse("lovelace@example.com").unwrap(), now);
    user.deactivate(now);
    repo.update(&user).await.expect("Update user");

    let found = repo.find_by_id(user.id()).await.unwrap().unwrap();
    assert_eq!(found.name(), Some("Ada Lovelace"));
    assert_eq!(found.email().as_str(), "lovelace@example.com");
    assert!(!found.is_active());
}

#[tokio::test]
async fn user_update_into_taken_email_is_conflict() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteUserRepository::new(Arc::new(pool));

    repo.create(&new_user("ada@example.com", "hash".to_string()))
        .await
        .unwrap();
    let mut grace = repo
        .create(&new_user("grace@example.com", "hash".to_string()))
        .await
        .unwrap();

    grace.change_email(Email::parse("ada@example.com").unwrap(), Utc::now());
    let result = repo.update(&grace).await;

    assert!(matches!(result, Err(DomainError::Conflict(_))));
}

#[tokio::test]
async fn user_missing_id_returns_none() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteUserRepository::new(Arc::new(pool));

    assert!(repo.find_by_id(UserId::new(999)).await.unwrap().is_none());
}

#[tokio::test]
async fn subscription_save_is_upsert() {
    let pool = test_helpers::setup_in_memory_db().await;
    let user_id = test_helpers::create_user(&pool, "ada@example.com").await;
    let repo = SqliteSubscriptionRepository::new(Arc::new(pool));

    let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    let mut subscription = Subscription::trial(user_id, start);
    repo.save(&subscription).await.expect("Save trial");

    let stored = repo.find_by_user(user_id).await.unwrap().unwrap();
    assert_eq!(stored.plan(), SubscriptionPlan::Trial);
    assert_eq!(stored.status(), SubscriptionStatus::Active);
    assert_eq!(stored.end_date(), Some(start + Duration::days(14)));

    assert!(subscription.refresh_expiry(start + Duration::days(14)));
    repo.save(&subscription).await.expect("Save expired");

    let stored = repo.find_by_user(user_id).await.unwrap().unwrap();
    assert_eq!(stored.status(), SubscriptionStatus::Expired);
}
