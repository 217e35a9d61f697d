use std::sync::Arc;

use chrono::{TimeZone, Utc};
use researchpilot_domain::roadmap::{plan, RoadmapRepository, RoadmapSettings};
use researchpilot_infrastructure::persistence::repositories::SqliteRoadmapRepository;
use researchpilot_infrastructure::persistence::Database;

mod test_helpers;

#[tokio::test]
async fn roadmap_replace_and_load_preserves_order() {
    let pool = test_helpers::setup_in_memory_db().await;
    let user_id = test_helpers::create_user(&pool, "ada@example.com").await;
    let repo = SqliteRoadmapRepository::new(Arc::new(pool));

    let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let settings = RoadmapSettings::new("Spectral graph theory", 12, 3, 0.6).unwrap();
    let roadmap = plan(user_id, settings, created_at);

    repo.replace(&roadmap).await.expect("Store roadmap");

    let loaded = repo
        .find_current(user_id)
        .await
        .expect("Load roadmap")
        .expect("Roadmap should exist");

    assert_eq!(loaded, roadmap);
    let starts: Vec<_> = loaded.phases().iter().map(|p| p.start_week).collect();
    assert_eq!(starts, vec![1, 4, 8, 11]);
}

#[tokio::test]
async fn roadmap_replace_discards_previous_plan() {
    let pool = test_helpers::setup_in_memory_db().await;
    let user_id = test_helpers::create_user(&pool, "ada@example.com").await;
    let repo = SqliteRoadmapRepository::new(Arc::new(pool.clone()));
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();

    let first = plan(user_id, RoadmapSettings::new("Knots", 12, 2, 0.5).unwrap(), now);
    let second = plan(user_id, RoadmapSettings::new("Braids", 1, 2, 0.5).unwrap(), now);

    repo.replace(&first).await.unwrap();
    repo.replace(&second).await.unwrap();

    let loaded = repo.find_current(user_id).await.unwrap().unwrap();
    assert_eq!(loaded.topic(), "Braids");
    assert_eq!(loaded.phases().len(), 1);

    let orphan_phases: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roadmap_phases")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphan_phases, 1);
}

#[tokio::test]
async fn roadmap_delete() {
    let pool = test_helpers::setup_in_memory_db().await;
    let user_id = test_helpers::create_user(&pool, "ada@example.com").await;
    let repo = SqliteRoadmapRepository::new(Arc::new(pool));
    let now = Utc::now();

    assert!(!repo.delete(user_id).await.unwrap());

    repo.replace(&plan(user_id, RoadmapSettings::new("Knots", 4, 2, 0.5).unwrap(), now))
        .await
        .unwrap();
    assert!(repo.delete(user_id).await.unwrap());
    assert!(repo.find_current(user_id).await.unwrap().is_none());
}

#[tokio::test]
async fn on_disk_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("researchpilot.sqlite");
    let path = path.to_str().unwrap();

    let user_id = {
        let db = Database::new(path).await.expect("Open database");
        db.run_migrations().await.expect("Migrate");
        assert!(db.ping().await);
        let user_id = test_helpers::create_user(db.pool(), "ada@example.com").await;
        db.pool().close().await;
        user_id
    };

    let db = Database::new(path).await.expect("Reopen database");
    db.run_migrations().await.expect("Migrations are idempotent");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?1")
        .bind(user_id.value())
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}
