use log::{info, warn};

use researchpilot_domain::check_in::{CheckInRepository, MonthCalendar, YearMonth};
use researchpilot_domain::shared::{DomainError, UserId};

/// Get check-in calendar for a specific month
pub async fn get_calendar(
    check_in_repo: &dyn CheckInRepository,
    user_id: UserId,
    year: i32,
    month: u32,
) -> Result<MonthCalendar, DomainError> {
    let month = YearMonth::new(year, month)?;

    let records = check_in_repo
        .list_in_range(user_id, month.first_day(), month.last_day())
        .await?;

    let calendar = MonthCalendar::build(month, &records);

    if records.is_empty() {
        warn!(
            "[streak] calendar query empty result user_id={} month={:04}-{:02}",
            user_id,
            month.year(),
            month.month()
        );
    } else {
        info!(
            "[streak] calendar query user_id={} month={:04}-{:02} records={} checked_in_days={}",
            user_id,
            month.year(),
            month.month(),
            records.len(),
            calendar.checked_in_days()
        );
    }

    Ok(calendar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::queries::test_mocks::MockCheckInRepo;
    use chrono::{NaiveDate, Utc};
    use mockall::predicate::eq;
    use researchpilot_domain::check_in::{CheckIn, Mood};
    use researchpilot_domain::shared::CheckInId;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[tokio::test]
    async fn test_leap_february_queries_whole_month() {
        let mut repo = MockCheckInRepo::new();
        repo.expect_list_in_range()
            .with(eq(UserId::new(1)), eq(d(2024, 2, 1)), eq(d(2024, 2, 29)))
            .times(1)
            .returning(|user_id, _, _| {
                Ok(vec![CheckIn::restore(
                    CheckInId::new(1),
                    user_id,
                    d(2024, 2, 29),
                    Mood::Frustrated,
                    None,
                    None,
                    0,
                    0,
                    Utc::now(),
                )])
            });

        let calendar = get_calendar(&repo, UserId::new(1), 2024, 2).await.unwrap();

        assert_eq!(calendar.days.len(), 29);
        assert_eq!(calendar.checked_in_days(), 1);
        assert_eq!(calendar.days[28].mood, Some(Mood::Frustrated));
    }

    #[tokio::test]
    async fn test_invalid_month_never_reaches_repository() {
        let mut repo = MockCheckInRepo::new();
        repo.expect_list_in_range().never();

        let err = get_calendar(&repo, UserId::new(1), 2024, 13)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
