use chrono::NaiveDate;
use log::info;

use crate::application::dtos::CheckInStreakDto;
use researchpilot_domain::check_in::{compute_streaks, CheckInRepository};
use researchpilot_domain::shared::{DomainError, UserId};

pub async fn get_streak_stats(
    check_in_repo: &dyn CheckInRepository,
    user_id: UserId,
    today: NaiveDate,
) -> Result<CheckInStreakDto, DomainError> {
    let dates = check_in_repo.list_dates(user_id).await?;
    let total_days = dates.len();
    let dto = CheckInStreakDto::from(compute_streaks(dates, today));

    info!(
        "[streak] get_streak_stats user_id={} current={} longest={} total={}",
        user_id, dto.current_streak, dto.longest_streak, total_days
    );

    Ok(dto)
}
