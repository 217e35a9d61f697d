use std::sync::Arc;

use crate::application::dtos::CheckInStreakDto;
use researchpilot_domain::check_in::{CheckInRepository, MonthCalendar};
use researchpilot_domain::shared::{Clock, DomainError, UserId};

mod calendar;
mod streak;

pub struct CheckInStreakQueries {
    check_in_repo: Arc<dyn CheckInRepository>,
    clock: Arc<dyn Clock>,
}

impl CheckInStreakQueries {
    pub fn new(check_in_repo: Arc<dyn CheckInRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            check_in_repo,
            clock,
        }
    }

    /// Get streak statistics for a single user
    pub async fn get_streak_stats(&self, user_id: UserId) -> Result<CheckInStreakDto, DomainError> {
        streak::get_streak_stats(self.check_in_repo.as_ref(), user_id, self.clock.today()).await
    }

    /// Get check-in calendar for a specific month
    pub async fn get_calendar(
        &self,
        user_id: UserId,
        year: i32,
        month: u32,
    ) -> Result<MonthCalendar, DomainError> {
        calendar::get_calendar(self.check_in_repo.as_ref(), user_id, year, month).await
    }
}
