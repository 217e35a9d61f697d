use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use super::to_u32;
use crate::persistence::repository_base::map_sqlx_error;
use crate::persistence::SqliteRepositoryBase;
use researchpilot_domain::roadmap::{Roadmap, RoadmapPhase, RoadmapRepository};
use researchpilot_domain::shared::{DomainError, UserId};

#[derive(FromRow)]
struct RoadmapRow {
    user_id: i64,
    topic: String,
    total_weeks: i64,
    daily_hours: i64,
    theory_ratio: f64,
    created_at: DateTime<Utc>,
}

/// One row per (phase, task); phases without tasks carry a NULL description.
#[derive(FromRow)]
struct PhaseTaskRow {
    phase_id: i64,
    name: String,
    weeks: i64,
    start_week: i64,
    description: Option<String>,
}

fn group_phases(rows: Vec<PhaseTaskRow>) -> Result<Vec<RoadmapPhase>, DomainError> {
    let mut phases: Vec<RoadmapPhase> = Vec::new();
    let mut current_id: Option<i64> = None;

    for row in rows {
        if current_id != Some(row.phase_id) {
            current_id = Some(row.phase_id);
            phases.push(RoadmapPhase {
                name: row.name,
                weeks: to_u32(row.weeks, "weeks")?,
                start_week: to_u32(row.start_week, "start_week")?,
                tasks: Vec::new(),
            });
        }
        if let (Some(task), Some(phase)) = (row.description, phases.last_mut()) {
            phase.tasks.push(task);
        }
    }

    Ok(phases)
}

pub struct SqliteRoadmapRepository {
    base: SqliteRepositoryBase,
}

impl SqliteRoadmapRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl RoadmapRepository for SqliteRoadmapRepository {
    async fn replace(&self, roadmap: &Roadmap) -> Result<(), DomainError> {
        let context = "Replace roadmap";
        let user_id = roadmap.user_id().value();

        let mut tx = self
            .base
            .pool()
            .begin()
            .await
            .map_err(|e| map_sqlx_error(e, context))?;

        // Phases and their tasks go with the roadmap row through ON DELETE CASCADE.
        sqlx::query("DELETE FROM roadmaps WHERE user_id = ?1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(e, context))?;

        sqlx::query(
            r#"
            INSERT INTO roadmaps (user_id, topic, total_weeks, daily_hours, theory_ratio, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(user_id)
        .bind(roadmap.topic())
        .bind(i64::from(roadmap.total_weeks()))
        .bind(i64::from(roadmap.daily_hours()))
        .bind(roadmap.theory_ratio())
        .bind(roadmap.created_at())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error(e, context))?;

        for (position, phase) in roadmap.phases().iter().enumerate() {
            let phase_id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO roadmap_phases (user_id, position, name, weeks, start_week)
                VALUES (?1, ?2, ?3, ?4, ?5)
                RETURNING id
                "#,
            )
            .bind(user_id)
            .bind(position as i64)
            .bind(&phase.name)
            .bind(i64::from(phase.weeks))
            .bind(i64::from(phase.start_week))
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(e, context))?;

            for (task_position, task) in phase.tasks.iter().enumerate() {
                sqlx::query(
                    r#"
                    INSERT INTO roadmap_phase_tasks (phase_id, position, description)
                    VALUES (?1, ?2, ?3)
                    "#,
                )
                .bind(phase_id)
                .bind(task_position as i64)
                .bind(task)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error(e, context))?;
            }
        }

        tx.commit().await.map_err(|e| map_sqlx_error(e, context))?;
        Ok(())
    }

    async fn find_current(&self, user_id: UserId) -> Result<Option<Roadmap>, DomainError> {
        let roadmap: Option<RoadmapRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(
                    r#"
                    SELECT user_id, topic, total_weeks, daily_hours, theory_ratio, created_at
                    FROM roadmaps
                    WHERE user_id = ?1
                    "#,
                )
                .bind(user_id.value()),
                "Find roadmap",
            )
            .await?;

        let Some(roadmap) = roadmap else {
            return Ok(None);
        };

        let rows: Vec<PhaseTaskRow> = self
            .base
            .fetch_all(
                sqlx::query_as(
                    r#"
                    SELECT p.id AS phase_id, p.name, p.weeks, p.start_week, t.description
                    FROM roadmap_phases p
                    LEFT JOIN roadmap_phase_tasks t ON t.phase_id = p.id
                    WHERE p.user_id = ?1
                    ORDER BY p.position, t.position
                    "#,
                )
                .bind(user_id.value()),
                "Load roadmap phases",
            )
            .await?;

        Ok(Some(Roadmap::restore(
            UserId::new(roadmap.user_id),
            roadmap.topic,
            to_u32(roadmap.total_weeks, "total_weeks")?,
            to_u32(roadmap.daily_hours, "daily_hours")?,
            roadmap.theory_ratio,
            roadmap.created_at,
            group_phases(rows)?,
        )))
    }

    async fn delete(&self, user_id: UserId) -> Result<bool, DomainError> {
        let result = self
            .base
            .execute(
                sqlx::query("DELETE FROM roadmaps WHERE user_id = ?1").bind(user_id.value()),
                "Delete roadmap",
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
