use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use researchpilot_domain::paper::{FocusPages, NewSavedPaper, SavedPaper, SavedPaperRepository};
use researchpilot_domain::shared::{DomainError, SavedPaperId, UserId};

const PAPER_COLUMNS: &str = r#"
    id, user_id, paper_id, title, authors, abstract, source,
    url, year, notes, focus, focus_pages, saved_at
"#;

#[derive(FromRow)]
struct SavedPaperRow {
    id: i64,
    user_id: i64,
    paper_id: String,
    title: String,
    authors: Option<String>,
    #[sqlx(rename = "abstract")]
    abstract_text: Option<String>,
    source: String,
    url: Option<String>,
    year: Option<i32>,
    notes: Option<String>,
    focus: bool,
    focus_pages: String,
    saved_at: DateTime<Utc>,
}

impl SavedPaperRow {
    fn try_into_paper(self) -> Result<SavedPaper, DomainError> {
        let source = self
            .source
            .parse()
            .map_err(|_| DomainError::DataIntegrity(format!("Invalid source: {}", self.source)))?;
        let focus_pages = FocusPages::parse(&self.focus_pages).map_err(|_| {
            DomainError::DataIntegrity(format!("Invalid focus pages: {}", self.focus_pages))
        })?;

        Ok(SavedPaper::restore(
            SavedPaperId::new(self.id),
            UserId::new(self.user_id),
            self.paper_id,
            self.title,
            self.authors,
            self.abstract_text,
            source,
            self.url,
            self.year,
            self.notes,
            self.focus,
            focus_pages,
            self.saved_at,
        ))
    }
}

pub struct SqliteSavedPaperRepository {
    base: SqliteRepositoryBase,
}

impl SqliteSavedPaperRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl SavedPaperRepository for SqliteSavedPaperRepository {
    async fn create(&self, paper: &NewSavedPaper) -> Result<SavedPaper, DomainError> {
        let query = format!(
            r#"
            INSERT INTO saved_papers (
                user_id, paper_id, title, authors, abstract, source,
                url, year, notes, focus, focus_pages, saved_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0, '', ?10)
            RETURNING {}
            "#,
            PAPER_COLUMNS
        );

        let row: SavedPaperRow = self
            .base
            .fetch_one(
                sqlx::query_as(&query)
                    .bind(paper.user_id.value())
                    .bind(&paper.paper_id)
                    .bind(&paper.title)
                    .bind(paper.authors.as_deref())
                    .bind(paper.abstract_text.as_deref())
                    .bind(paper.source.as_str())
                    .bind(paper.url.as_deref())
                    .bind(paper.year)
                    .bind(paper.notes.as_deref())
                    .bind(paper.saved_at),
                "Save paper",
            )
            .await
            .map_err(|e| match e {
                DomainError::Conflict(_) => DomainError::Conflict(format!(
                    "Paper {} is already in the library",
                    paper.paper_id
                )),
                other => other,
            })?;

        row.try_into_paper()
    }

    async fn find_by_id(
        &self,
        user_id: UserId,
        id: SavedPaperId,
    ) -> Result<Option<SavedPaper>, DomainError> {
        let query = format!(
            "SELECT {} FROM saved_papers WHERE id = ?1 AND user_id = ?2",
            PAPER_COLUMNS
        );

        let row: Option<SavedPaperRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query).bind(id.value()).bind(user_id.value()),
                "Find saved paper by ID",
            )
            .await?;

        row.map(SavedPaperRow::try_into_paper).transpose()
    }

    async fn list(
        &self,
        user_id: UserId,
        focus_only: bool,
    ) -> Result<Vec<SavedPaper>, DomainError> {
        let query = format!(
            r#"
            SELECT {}
            FROM saved_papers
            WHERE user_id = ?1 AND (?2 = 0 OR focus = 1)
            ORDER BY year IS NULL, year DESC, saved_at DESC, id DESC
            "#,
            PAPER_COLUMNS
        );

        let rows: Vec<SavedPaperRow> = self
            .base
            .fetch_all(
                sqlx::query_as(&query)
                    .bind(user_id.value())
                    .bind(focus_only),
                "List saved papers",
            )
            .await?;

        rows.into_iter().map(SavedPaperRow::try_into_paper).collect()
    }

    async fn update(&self, paper: &SavedPaper) -> Result<(), DomainError> {
        let query = r#"
            UPDATE saved_papers
            SET notes = ?1, focus = ?2, focus_pages = ?3
            WHERE id = ?4 AND user_id = ?5
        "#;

        let result = self
            .base
            .execute(
                sqlx::query(query)
                    .bind(paper.notes())
                    .bind(paper.focus())
                    .bind(paper.focus_pages().to_string())
                    .bind(paper.id().value())
                    .bind(paper.user_id().value()),
                "Update saved paper",
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("Saved paper {}", paper.id())));
        }
        Ok(())
    }

    async fn delete(&self, user_id: UserId, id: SavedPaperId) -> Result<bool, DomainError> {
        let result = self
            .base
            .execute(
                sqlx::query("DELETE FROM saved_papers WHERE id = ?1 AND user_id = ?2")
                    .bind(id.value())
                    .bind(user_id.value()),
                "Delete saved paper",
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
