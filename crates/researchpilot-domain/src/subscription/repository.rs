use async_trait::async_trait;

use super::Subscription;
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Insert or replace the user's subscription.
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError>;
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<Subscription>, DomainError>;
}
