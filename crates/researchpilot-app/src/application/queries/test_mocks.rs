use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;

use researchpilot_domain::check_in::{CheckIn, CheckInRepository, NewCheckIn};
use researchpilot_domain::shared::{CheckInId, DomainError, UserId};

mock! {
    pub CheckInRepo {}

    #[async_trait]
    impl CheckInRepository for CheckInRepo {
        async fn create(&self, check_in: &NewCheckIn) -> Result<CheckIn, DomainError>;
        async fn find_by_id(&self, user_id: UserId, id: CheckInId) -> Result<Option<CheckIn>, DomainError>;
        async fn find_by_date(&self, user_id: UserId, date: NaiveDate) -> Result<Option<CheckIn>, DomainError>;
        async fn list(&self, user_id: UserId, skip: u32, limit: u32) -> Result<Vec<CheckIn>, DomainError>;
        async fn list_all(&self, user_id: UserId) -> Result<Vec<CheckIn>, DomainError>;
        async fn list_in_range(&self, user_id: UserId, start: NaiveDate, end: NaiveDate) -> Result<Vec<CheckIn>, DomainError>;
        async fn list_dates(&self, user_id: UserId) -> Result<Vec<NaiveDate>, DomainError>;
        async fn delete(&self, user_id: UserId, id: CheckInId) -> Result<bool, DomainError>;
        async fn count(&self, user_id: UserId) -> Result<u32, DomainError>;
    }
}
