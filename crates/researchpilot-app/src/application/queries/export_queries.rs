use chrono::{DateTime, Utc};
use log::info;
use serde::Deserialize;
use std::sync::Arc;

use crate::application::dtos::{
    DataExportDto, ExportStatisticsDto, ExportUserDto, SubscriptionDto,
};
use crate::application::ResultExt;
use researchpilot_domain::check_in::{CheckIn, CheckInRepository};
use researchpilot_domain::paper::{SavedPaper, SavedPaperRepository};
use researchpilot_domain::research_interest::{ResearchInterest, ResearchInterestRepository};
use researchpilot_domain::shared::{Clock, DomainError};
use researchpilot_domain::subscription::SubscriptionRepository;
use researchpilot_domain::task::{Task, TaskRepository};
use researchpilot_domain::user::User;

/// Which table a CSV export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvKind {
    Tasks,
    Checkins,
    Papers,
    Interests,
}

impl CsvKind {
    fn as_str(&self) -> &'static str {
        match self {
            CsvKind::Tasks => "tasks",
            CsvKind::Checkins => "checkins",
            CsvKind::Papers => "papers",
            CsvKind::Interests => "interests",
        }
    }
}

/// A rendered download with its suggested file name.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub body: String,
}

pub struct ExportQueries {
    tasks: Arc<dyn TaskRepository>,
    check_ins: Arc<dyn CheckInRepository>,
    papers: Arc<dyn SavedPaperRepository>,
    interests: Arc<dyn ResearchInterestRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    clock: Arc<dyn Clock>,
}

impl ExportQueries {
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        check_ins: Arc<dyn CheckInRepository>,
        papers: Arc<dyn SavedPaperRepository>,
        interests: Arc<dyn ResearchInterestRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tasks,
            check_ins,
            papers,
            interests,
            subscriptions,
            clock,
        }
    }

    pub async fn export_data(&self, user: &User) -> Result<DataExportDto, DomainError> {
        let now = self.clock.now();
        let tasks = self.tasks.list_all(user.id()).await?;
        let checkins = self.check_ins.list_all(user.id()).await?;
        let saved_papers = self.papers.list(user.id(), false).await?;
        let research_interests = self.interests.list(user.id()).await?;
        let subscription = self
            .subscriptions
            .find_by_user(user.id())
            .await?
            .map(|s| SubscriptionDto::from_subscription(&s, now));

        let statistics = ExportStatisticsDto {
            total_tasks: tasks.len(),
            completed_tasks: tasks.iter().filter(|t| t.status().is_completed()).count(),
            total_checkins: checkins.len(),
            total_papers: saved_papers.len(),
            total_interests: research_interests.len(),
        };

        info!(
            "Exporting data for user {}: {} tasks, {} check-ins, {} papers",
            user.id(),
            statistics.total_tasks,
            statistics.total_checkins,
            statistics.total_papers
        );

        Ok(DataExportDto {
            export_date: now,
            user: ExportUserDto {
                id: user.id().value(),
                email: user.email().as_str().to_string(),
                name: user.name().map(String::from),
                created_at: user.created_at(),
            },
            tasks,
            checkins,
            saved_papers,
            research_interests,
            subscription,
            statistics,
        })
    }

    /// Pretty-printed JSON of [`Self::export_data`].
    pub async fn export_json(&self, user: &User) -> Result<ExportFile, DomainError> {
        let data = self.export_data(user).await?;
        let body = serde_json::to_string_pretty(&data)
            .map_err(|e| DomainError::Serialization(e.to_string()))?;

        Ok(ExportFile {
            filename: format!("researchpilot_export_{}.json", stamp(data.export_date)),
            body,
        })
    }

    pub async fn export_csv(&self, user: &User, kind: CsvKind) -> Result<ExportFile, DomainError> {
        let body = match kind {
            CsvKind::Tasks => tasks_csv(&self.tasks.list_all(user.id()).await?)?,
            CsvKind::Checkins => {
                let mut records = self.check_ins.list_all(user.id()).await?;
                records.reverse();
                check_ins_csv(&records)?
            }
            CsvKind::Papers => {
                let mut papers = self.papers.list(user.id(), false).await?;
                papers.sort_by_key(|p| std::cmp::Reverse(p.saved_at()));
                papers_csv(&papers)?
            }
            CsvKind::Interests => interests_csv(&self.interests.list(user.id()).await?)?,
        };

        Ok(ExportFile {
            filename: format!("{}_{}.csv", kind.as_str(), stamp(self.clock.now())),
            body,
        })
    }
}

fn stamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d").to_string()
}

fn write_csv<T>(
    header: &[&str],
    items: &[T],
    row: impl Fn(&T) -> Vec<String>,
) -> Result<String, DomainError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header).to_infra_err()?;
    for item in items {
        writer.write_record(row(item)).to_infra_err()?;
    }
    let bytes = writer.into_inner().to_infra_err()?;
    String::from_utf8(bytes).to_infra_err()
}

fn opt(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn opt_time(value: Option<DateTime<Utc>>) -> String {
    value.map(|t| t.to_rfc3339()).unwrap_or_default()
}

fn tasks_csv(tasks: &[Task]) -> Result<String, DomainError> {
    write_csv(
        &[
            "ID",
            "Title",
            "Description",
            "Priority",
            "Status",
            "Due date",
            "Completed at",
            "Created at",
        ],
        tasks,
        |t| {
            vec![
                t.id().to_string(),
                t.title().to_string(),
                opt(t.description()),
                t.priority().as_str().to_string(),
                t.status().as_str().to_string(),
                opt_time(t.due_date()),
                opt_time(t.completed_at()),
                t.created_at().to_rfc3339(),
            ]
        },
    )
}

fn check_ins_csv(records: &[CheckIn]) -> Result<String, DomainError> {
    write_csv(
        &[
            "ID",
            "Date",
            "Mood",
            "Content",
            "Difficulties",
            "Tasks completed",
            "Tasks total",
            "Completion rate",
        ],
        records,
        |c| {
            vec![
                c.id().to_string(),
                c.date().to_string(),
                c.mood().as_str().to_string(),
                opt(c.content()),
                opt(c.difficulties()),
                c.tasks_completed().to_string(),
                c.tasks_total().to_string(),
                format!("{:.1}%", c.completion_rate()),
            ]
        },
    )
}

fn papers_csv(papers: &[SavedPaper]) -> Result<String, DomainError> {
    write_csv(
        &[
            "ID", "Paper ID", "Title", "Authors", "Source", "Year", "URL", "Notes", "Saved at",
        ],
        papers,
        |p| {
            vec![
                p.id().to_string(),
                p.paper_id().to_string(),
                p.title().to_string(),
                opt(p.authors()),
                p.source().as_str().to_string(),
                p.year().map(|y| y.to_string()).unwrap_or_default(),
                opt(p.url()),
                opt(p.notes()),
                p.saved_at().to_rfc3339(),
            ]
        },
    )
}

fn interests_csv(interests: &[ResearchInterest]) -> Result<String, DomainError> {
    write_csv(
        &["ID", "Topic", "Description", "Level", "Priority", "Created at"],
        interests,
        |i| {
            vec![
                i.id().to_string(),
                i.topic().to_string(),
                opt(i.description()),
                i.level().as_str().to_string(),
                i.priority().as_str().to_string(),
                i.created_at().to_rfc3339(),
            ]
        },
    )
}
