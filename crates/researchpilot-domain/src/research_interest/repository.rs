use async_trait::async_trait;

use super::{NewResearchInterest, ResearchInterest};
use crate::shared::{DomainError, InterestId, UserId};

#[async_trait]
pub trait ResearchInterestRepository: Send + Sync {
    async fn create(&self, interest: &NewResearchInterest)
        -> Result<ResearchInterest, DomainError>;
    async fn find_by_id(
        &self,
        user_id: UserId,
        id: InterestId,
    ) -> Result<Option<ResearchInterest>, DomainError>;
    /// Newest first.
    async fn list(&self, user_id: UserId) -> Result<Vec<ResearchInterest>, DomainError>;
    async fn update(&self, interest: &ResearchInterest) -> Result<(), DomainError>;
    async fn delete(&self, user_id: UserId, id: InterestId) -> Result<bool, DomainError>;
}
