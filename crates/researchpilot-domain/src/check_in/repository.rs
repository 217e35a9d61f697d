use async_trait::async_trait;
use chrono::NaiveDate;

use super::{CheckIn, NewCheckIn};
use crate::shared::{CheckInId, DomainError, UserId};

#[async_trait]
pub trait CheckInRepository: Send + Sync {
    /// Insert a check-in. Returns `Conflict` when the user already checked in
    /// on that date.
    async fn create(&self, check_in: &NewCheckIn) -> Result<CheckIn, DomainError>;

    async fn find_by_id(
        &self,
        user_id: UserId,
        id: CheckInId,
    ) -> Result<Option<CheckIn>, DomainError>;

    async fn find_by_date(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> Result<Option<CheckIn>, DomainError>;

    /// Newest first.
    async fn list(&self, user_id: UserId, skip: u32, limit: u32)
        -> Result<Vec<CheckIn>, DomainError>;

    /// Every check-in of the user, oldest first.
    async fn list_all(&self, user_id: UserId) -> Result<Vec<CheckIn>, DomainError>;

    /// Check-ins with `start <= date <= end`, oldest first.
    async fn list_in_range(
        &self,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CheckIn>, DomainError>;

    /// Distinct check-in dates, the only input the streak calculator needs.
    async fn list_dates(&self, user_id: UserId) -> Result<Vec<NaiveDate>, DomainError>;

    /// Returns `true` when a row was removed.
    async fn delete(&self, user_id: UserId, id: CheckInId) -> Result<bool, DomainError>;

    async fn count(&self, user_id: UserId) -> Result<u32, DomainError>;
}
