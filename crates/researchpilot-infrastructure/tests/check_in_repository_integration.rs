use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use researchpilot_domain::check_in::{compute_streaks, CheckInRepository, Mood, NewCheckIn};
use researchpilot_domain::shared::{CheckInId, DomainError, UserId};
use researchpilot_infrastructure::persistence::repositories::SqliteCheckInRepository;

mod test_helpers;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn morning_of(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(8, 30, 0).unwrap())
}

fn check_in(user_id: UserId, date: NaiveDate, mood: Mood) -> NewCheckIn {
    NewCheckIn::new(
        user_id,
        date,
        mood,
        Some("read two papers".to_string()),
        None,
        2,
        3,
        morning_of(date),
    )
    .expect("Build check-in")
}

#[tokio::test]
async fn check_in_create_and_find() {
    let pool = test_helpers::setup_in_memory_db().await;
    let user_id = test_helpers::create_user(&pool, "alice@example.com").await;
    let repo = SqliteCheckInRepository::new(Arc::new(pool));

    let created = repo
        .create(&check_in(user_id, d(2024, 3, 1), Mood::Happy))
        .await
        .expect("Create check-in");

    assert_eq!(created.date(), d(2024, 3, 1));
    assert_eq!(created.created_at(), morning_of(d(2024, 3, 1)));
    assert_eq!(created.mood(), Mood::Happy);
    assert_eq!(created.tasks_completed(), 2);
    assert_eq!(created.tasks_total(), 3);

    let by_id = repo
        .find_by_id(user_id, created.id())
        .await
        .expect("Find by id")
        .expect("Check-in should exist");
    assert_eq!(by_id.content(), Some("read two papers"));

    let by_date = repo
        .find_by_date(user_id, d(2024, 3, 1))
        .await
        .expect("Find by date");
    assert!(by_date.is_some());
}

#[tokio::test]
async fn check_in_duplicate_date_is_conflict() {
    let pool = test_helpers::setup_in_memory_db().await;
    let user_id = test_helpers::create_user(&pool, "alice@example.com").await;
    let repo = SqliteCheckInRepository::new(Arc::new(pool));

    repo.create(&check_in(user_id, d(2024, 3, 1), Mood::Happy))
        .await
        .expect("First check-in");

    let second = repo
        .create(&check_in(user_id, d(2024, 3, 1), Mood::Tired))
        .await;

    assert!(matches!(second, Err(DomainError::Conflict(_))));
}

#[tokio::test]
async fn check_in_same_date_for_different_users() {
    let pool = test_helpers::setup_in_memory_db().await;
    let alice = test_helpers::create_user(&pool, "alice@example.com").await;
    let bob = test_helpers::create_user(&pool, "bob@example.com").await;
    let repo = SqliteCheckInRepository::new(Arc::new(pool));

    repo.create(&check_in(alice, d(2024, 3, 1), Mood::Happy))
        .await
        .expect("Alice");
    repo.create(&check_in(bob, d(2024, 3, 1), Mood::Neutral))
        .await
        .expect("Bob");

    assert_eq!(repo.count(alice).await.unwrap(), 1);
    assert_eq!(repo.count(bob).await.unwrap(), 1);
}

#[tokio::test]
async fn check_in_listing_orders_and_ranges() {
    let pool = test_helpers::setup_in_memory_db().await;
    let user_id = test_helpers::create_user(&pool, "alice@example.com").await;
    let repo = SqliteCheckInRepository::new(Arc::new(pool));

    for day in [3, 1, 2, 10] {
        repo.create(&check_in(user_id, d(2024, 3, day), Mood::Neutral))
            .await
            .expect("Create");
    }

    let page = repo.list(user_id, 0, 2).await.expect("List page");
    let dates: Vec<_> = page.iter().map(|c| c.date()).collect();
    assert_eq!(dates, vec![d(2024, 3, 10), d(2024, 3, 3)]);

    let all = repo.list_all(user_id).await.expect("List all");
    let dates: Vec<_> = all.iter().map(|c| c.date()).collect();
    assert_eq!(
        dates,
        vec![d(2024, 3, 1), d(2024, 3, 2), d(2024, 3, 3), d(2024, 3, 10)]
    );

    let range = repo
        .list_in_range(user_id, d(2024, 3, 2), d(2024, 3, 3))
        .await
        .expect("List range");
    assert_eq!(range.len(), 2);
}

#[tokio::test]
async fn check_in_dates_feed_streaks() {
    let pool = test_helpers::setup_in_memory_db().await;
    let user_id = test_helpers::create_user(&pool, "alice@example.com").await;
    let repo = SqliteCheckInRepository::new(Arc::new(pool));

    for day in [1, 2, 4, 5, 6] {
        repo.create(&check_in(user_id, d(2024, 1, day), Mood::Happy))
            .await
            .expect("Create");
    }

    let dates = repo.list_dates(user_id).await.expect("List dates");
    let streaks = compute_streaks(dates, d(2024, 1, 7));

    assert_eq!(streaks.current_streak, 3);
    assert_eq!(streaks.longest_streak, 3);
    assert_eq!(streaks.last_check_in_date, Some(d(2024, 1, 6)));
}

#[tokio::test]
async fn check_in_delete_is_scoped_to_owner() {
    let pool = test_helpers::setup_in_memory_db().await;
    let alice = test_helpers::create_user(&pool, "alice@example.com").await;
    let bob = test_helpers::create_user(&pool, "bob@example.com").await;
    let repo = SqliteCheckInRepository::new(Arc::new(pool));

    let created = repo
        .create(&check_in(alice, d(2024, 3, 1), Mood::Happy))
        .await
        .expect("Create");

    assert!(!repo.delete(bob, created.id()).await.unwrap());
    assert!(repo.delete(alice, created.id()).await.unwrap());
    assert!(!repo.delete(alice, created.id()).await.unwrap());
    assert!(repo
        .find_by_id(alice, CheckInId::new(created.id().value()))
        .await
        .unwrap()
        .is_none());
}
