use async_trait::async_trait;

use super::{NewSavedPaper, SavedPaper};
use crate::shared::{DomainError, SavedPaperId, UserId};

#[async_trait]
pub trait SavedPaperRepository: Send + Sync {
    /// Returns `Conflict` when the user already saved this `paper_id`.
    async fn create(&self, paper: &NewSavedPaper) -> Result<SavedPaper, DomainError>;
    async fn find_by_id(
        &self,
        user_id: UserId,
        id: SavedPaperId,
    ) -> Result<Option<SavedPaper>, DomainError>;
    /// Newest publication year first, undated papers last, then most recently saved.
    async fn list(&self, user_id: UserId, focus_only: bool)
        -> Result<Vec<SavedPaper>, DomainError>;
    async fn update(&self, paper: &SavedPaper) -> Result<(), DomainError>;
    async fn delete(&self, user_id: UserId, id: SavedPaperId) -> Result<bool, DomainError>;
}
