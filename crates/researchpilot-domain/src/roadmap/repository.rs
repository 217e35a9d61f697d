use async_trait::async_trait;

use super::Roadmap;
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait RoadmapRepository: Send + Sync {
    /// Store `roadmap` as the user's current one, replacing any previous roadmap.
    async fn replace(&self, roadmap: &Roadmap) -> Result<(), DomainError>;
    async fn find_current(&self, user_id: UserId) -> Result<Option<Roadmap>, DomainError>;
    async fn delete(&self, user_id: UserId) -> Result<bool, DomainError>;
}
