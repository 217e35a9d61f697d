use chrono::NaiveDate;
use serde::Deserialize;

use researchpilot_domain::check_in::Mood;

pub const DEFAULT_CHECK_IN_PAGE: u32 = 30;
pub const MAX_CHECK_IN_PAGE: u32 = 365;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCheckInRequest {
    /// Defaults to today.
    pub date: Option<NaiveDate>,
    pub mood: Mood,
    pub content: Option<String>,
    pub difficulties: Option<String>,
    #[serde(default)]
    pub tasks_completed: u32,
    #[serde(default)]
    pub tasks_total: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckInListQuery {
    #[serde(default)]
    pub skip: u32,
    pub limit: Option<u32>,
}
