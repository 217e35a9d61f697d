use async_trait::async_trait;

use super::{Email, NewUser, User};
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns `Conflict` when the e-mail is already registered.
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;
    /// Persist profile, password and activation changes.
    async fn update(&self, user: &User) -> Result<(), DomainError>;
}
