use log::info;
use std::sync::Arc;

use crate::application::dtos::{
    CheckInListQuery, CreateCheckInRequest, DEFAULT_CHECK_IN_PAGE, MAX_CHECK_IN_PAGE,
};
use researchpilot_domain::check_in::{CheckIn, CheckInRepository, CheckInSummary, NewCheckIn};
use researchpilot_domain::shared::{CheckInId, Clock, DomainError, UserId};

/// Daily check-in records. Streaks and calendars live in
/// `CheckInStreakQueries`.
pub struct CheckInService {
    check_ins: Arc<dyn CheckInRepository>,
    clock: Arc<dyn Clock>,
}

impl CheckInService {
    pub fn new(check_ins: Arc<dyn CheckInRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { check_ins, clock }
    }

    pub async fn create(
        &self,
        user_id: UserId,
        request: CreateCheckInRequest,
    ) -> Result<CheckIn, DomainError> {
        let date = request.date.unwrap_or_else(|| self.clock.today());
        let check_in = NewCheckIn::new(
            user_id,
            date,
            request.mood,
            request.content,
            request.difficulties,
            request.tasks_completed,
            request.tasks_total,
            self.clock.now(),
        )?;

        let created = self.check_ins.create(&check_in).await.map_err(|e| match e {
            DomainError::Conflict(_) => {
                DomainError::Conflict(format!("Already checked in on {}", date))
            }
            other => other,
        })?;

        info!("User {} checked in for {}", user_id, date);
        Ok(created)
    }

    /// History, newest first.
    pub async fn list(
        &self,
        user_id: UserId,
        query: CheckInListQuery,
    ) -> Result<Vec<CheckIn>, DomainError> {
        let limit = query.limit.unwrap_or(DEFAULT_CHECK_IN_PAGE);
        if !(1..=MAX_CHECK_IN_PAGE).contains(&limit) {
            return Err(DomainError::Validation(format!(
                "limit must be between 1 and {}",
                MAX_CHECK_IN_PAGE
            )));
        }
        self.check_ins.list(user_id, query.skip, limit).await
    }

    pub async fn today(&self, user_id: UserId) -> Result<Option<CheckIn>, DomainError> {
        self.check_ins
            .find_by_date(user_id, self.clock.today())
            .await
    }

    pub async fn summary(&self, user_id: UserId) -> Result<CheckInSummary, DomainError> {
        let records = self.check_ins.list_all(user_id).await?;
        Ok(CheckInSummary::from_records(&records, self.clock.today()))
    }

    pub async fn delete(&self, user_id: UserId, id: CheckInId) -> Result<(), DomainError> {
        if self.check_ins.delete(user_id, id).await? {
            info!("User {} deleted check-in {}", user_id, id);
            Ok(())
        } else {
            Err(DomainError::NotFound(format!("Check-in {} not found", id)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::queries::test_mocks::MockCheckInRepo;
    use crate::application::services::test_support::{fixed_clock, now, today};
    use mockall::predicate::eq;
    use researchpilot_domain::check_in::Mood;

    fn request(date: Option<chrono::NaiveDate>) -> CreateCheckInRequest {
        CreateCheckInRequest {
            date,
            mood: Mood::Happy,
            content: Some("finished chapter 3".to_string()),
            difficulties: None,
            tasks_completed: 2,
            tasks_total: 3,
        }
    }

    fn stored(new: &NewCheckIn) -> CheckIn {
        CheckIn::restore(
            CheckInId::new(7),
            new.user_id(),
            new.date(),
            new.mood(),
            new.content().map(String::from),
            new.difficulties().map(String::from),
            new.tasks_completed(),
            new.tasks_total(),
            now(),
        )
    }

    #[tokio::test]
    async fn test_create_defaults_to_today() {
        let mut repo = MockCheckInRepo::new();
        repo.expect_create()
            .withf(|new| new.date() == today())
            .times(1)
            .returning(|new| Ok(stored(new)));

        let service = CheckInService::new(Arc::new(repo), fixed_clock());
        let created = service.create(UserId::new(1), request(None)).await.unwrap();

        assert_eq!(created.date(), today());
        assert_eq!(created.tasks_total(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_check_in_reports_the_date() {
        let mut repo = MockCheckInRepo::new();
        repo.expect_create()
            .returning(|_| Err(DomainError::Conflict("UNIQUE constraint failed".to_string())));

        let service = CheckInService::new(Arc::new(repo), fixed_clock());
        let err = service
            .create(UserId::new(1), request(Some(today())))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(err.message(), "Already checked in on 2024-03-15");
    }

    #[tokio::test]
    async fn test_list_validates_limit_before_querying() {
        let mut repo = MockCheckInRepo::new();
        repo.expect_list().never();
        let service = CheckInService::new(Arc::new(repo), fixed_clock());

        for limit in [0, MAX_CHECK_IN_PAGE + 1] {
            let query = CheckInListQuery {
                skip: 0,
                limit: Some(limit),
            };
            let err = service.list(UserId::new(1), query).await.unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_list_uses_default_page() {
        let mut repo = MockCheckInRepo::new();
        repo.expect_list()
            .with(eq(UserId::new(1)), eq(0), eq(DEFAULT_CHECK_IN_PAGE))
            .times(1)
            .returning(|_, _, _| Ok(Vec::new()));

        let service = CheckInService::new(Arc::new(repo), fixed_clock());
        let records = service
            .list(UserId::new(1), CheckInListQuery::default())
            .await
            .unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut repo = MockCheckInRepo::new();
        repo.expect_delete().returning(|_, _| Ok(false));

        let service = CheckInService::new(Arc::new(repo), fixed_clock());
        let err = service
            .delete(UserId::new(1), CheckInId::new(99))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
