use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use researchpilot_domain::check_in::{CheckIn, Mood};
use researchpilot_domain::paper::SavedPaper;
use researchpilot_domain::research_interest::{InterestLevel, ResearchInterest};
use researchpilot_domain::shared::Priority;
use researchpilot_domain::task::Task;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OverviewStatsDto {
    pub user_since_days: i64,
    pub total_checkins: u32,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub saved_papers: u32,
    pub research_interests: u32,
    pub current_streak: u32,
    pub task_completion_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

pub const TIMESERIES_DAYS: std::ops::RangeInclusive<u32> = 7..=365;
pub const DEFAULT_TIMESERIES_DAYS: u32 = 30;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeSeriesQuery {
    #[serde(default)]
    pub period: Period,
    pub days: Option<u32>,
}

/// Activity inside one bucket; `date` is the first day of the bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityPointDto {
    pub date: NaiveDate,
    pub tasks_completed: u32,
    pub checkins: u32,
    pub papers_saved: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSeriesDto {
    pub period: Period,
    pub data: Vec<ActivityPointDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeatmapQuery {
    pub year: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KnowledgeAreaDto {
    pub topic: String,
    pub level: InterestLevel,
    pub priority: Priority,
    pub added_at: DateTime<Utc>,
}

impl From<&ResearchInterest> for KnowledgeAreaDto {
    fn from(interest: &ResearchInterest) -> Self {
        Self {
            topic: interest.topic().to_string(),
            level: interest.level(),
            priority: interest.priority(),
            added_at: interest.created_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecentActivityDto {
    Checkin {
        date: DateTime<Utc>,
        mood: Mood,
        tasks_completed: u32,
        tasks_total: u32,
    },
    TaskCompleted {
        date: DateTime<Utc>,
        title: String,
        priority: Priority,
    },
}

impl RecentActivityDto {
    pub fn date(&self) -> DateTime<Utc> {
        match self {
            RecentActivityDto::Checkin { date, .. } | RecentActivityDto::TaskCompleted { date, .. } => {
                *date
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LearningProgressDto {
    pub total_study_days: u32,
    pub total_study_hours: f64,
    pub papers_read: u32,
    pub tasks_completed: u32,
    pub knowledge_areas: Vec<KnowledgeAreaDto>,
    pub recent_activity: Vec<RecentActivityDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportUserDto {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExportStatisticsDto {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub total_checkins: usize,
    pub total_papers: usize,
    pub total_interests: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataExportDto {
    pub export_date: DateTime<Utc>,
    pub user: ExportUserDto,
    pub tasks: Vec<Task>,
    pub checkins: Vec<CheckIn>,
    pub saved_papers: Vec<SavedPaper>,
    pub research_interests: Vec<ResearchInterest>,
    pub subscription: Option<super::SubscriptionDto>,
    pub statistics: ExportStatisticsDto,
}
