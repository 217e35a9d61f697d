use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use researchpilot_domain::check_in::StreakResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInStreakDto {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_checkin: Option<NaiveDate>, // YYYY-MM-DD
}

impl From<StreakResult> for CheckInStreakDto {
    fn from(result: StreakResult) -> Self {
        Self {
            current_streak: result.current_streak,
            longest_streak: result.longest_streak,
            last_checkin: result.last_check_in_date,
        }
    }
}
