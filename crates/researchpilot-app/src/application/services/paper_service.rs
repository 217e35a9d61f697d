use log::info;
use std::sync::Arc;

use crate::application::dtos::{
    PaperListQuery, PaperSearchRequest, SavePaperRequest, UpdatePaperRequest,
};
use researchpilot_domain::paper::{
    FocusPages, NewSavedPaper, PaperChanges, PaperSearch, PaperSearchQuery, PaperSearchResult,
    SavedPaper, SavedPaperRepository,
};
use researchpilot_domain::shared::{Clock, DomainError, SavedPaperId, UserId};

/// The user's paper library and the catalogue search that feeds it.
pub struct PaperService {
    papers: Arc<dyn SavedPaperRepository>,
    search: Arc<dyn PaperSearch>,
    clock: Arc<dyn Clock>,
}

impl PaperService {
    pub fn new(
        papers: Arc<dyn SavedPaperRepository>,
        search: Arc<dyn PaperSearch>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            papers,
            search,
            clock,
        }
    }

    pub async fn search(
        &self,
        user_id: UserId,
        request: PaperSearchRequest,
    ) -> Result<Vec<PaperSearchResult>, DomainError> {
        let query = PaperSearchQuery::new(&request.query, request.max_results, request.category)?;
        let results = self.search.search(&query).await?;
        info!(
            "User {} searched papers for '{}' ({} results)",
            user_id,
            query.query(),
            results.len()
        );
        Ok(results)
    }

    pub async fn save(
        &self,
        user_id: UserId,
        request: SavePaperRequest,
    ) -> Result<SavedPaper, DomainError> {
        let paper = NewSavedPaper::new(
            user_id,
            &request.paper_id,
            &request.title,
            request.authors,
            request.abstract_text,
            request.source,
            request.url,
            request.year,
            request.notes,
            self.clock.now(),
        )?;
        let saved = self.papers.create(&paper).await?;
        info!("User {} saved paper {}", user_id, saved.paper_id());
        Ok(saved)
    }

    /// Newest publication year first.
    pub async fn list(
        &self,
        user_id: UserId,
        query: PaperListQuery,
    ) -> Result<Vec<SavedPaper>, DomainError> {
        self.papers.list(user_id, query.focus_only).await
    }

    pub async fn get(&self, user_id: UserId, id: SavedPaperId) -> Result<SavedPaper, DomainError> {
        self.papers
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn update(
        &self,
        user_id: UserId,
        id: SavedPaperId,
        request: UpdatePaperRequest,
    ) -> Result<SavedPaper, DomainError> {
        let focus_pages = request
            .focus_pages
            .as_deref()
            .map(FocusPages::parse)
            .transpose()?;

        let mut paper = self.get(user_id, id).await?;
        paper.apply(PaperChanges {
            focus: request.focus,
            focus_pages,
            notes: request.notes,
        });
        self.papers.update(&paper).await?;
        Ok(paper)
    }

    pub async fn delete(&self, user_id: UserId, id: SavedPaperId) -> Result<(), DomainError> {
        if self.papers.delete(user_id, id).await? {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }
}

fn not_found(id: SavedPaperId) -> DomainError {
    DomainError::NotFound(format!("Saved paper {} not found", id))
}
