use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use log::info;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::dtos::{
    ActivityPointDto, KnowledgeAreaDto, LearningProgressDto, OverviewStatsDto, Period,
    RecentActivityDto, TimeSeriesDto, TimeSeriesQuery, DEFAULT_TIMESERIES_DAYS, TIMESERIES_DAYS,
};
use researchpilot_domain::achievement::{evaluate, Achievement, ProgressSnapshot};
use researchpilot_domain::check_in::{compute_streaks, ActivityHeatmap, CheckInRepository};
use researchpilot_domain::paper::SavedPaperRepository;
use researchpilot_domain::research_interest::ResearchInterestRepository;
use researchpilot_domain::shared::{Clock, DomainError};
use researchpilot_domain::task::{Task, TaskRepository, TaskStats};
use researchpilot_domain::user::User;

const RECENT_PER_KIND: u32 = 5;
const RECENT_TOTAL: usize = 10;
const HOURS_PER_FULL_DAY: f64 = 2.0;

/// Read-only dashboards over a user's activity.
pub struct StatsQueries {
    tasks: Arc<dyn TaskRepository>,
    check_ins: Arc<dyn CheckInRepository>,
    papers: Arc<dyn SavedPaperRepository>,
    interests: Arc<dyn ResearchInterestRepository>,
    clock: Arc<dyn Clock>,
}

impl StatsQueries {
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        check_ins: Arc<dyn CheckInRepository>,
        papers: Arc<dyn SavedPaperRepository>,
        interests: Arc<dyn ResearchInterestRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tasks,
            check_ins,
            papers,
            interests,
            clock,
        }
    }

    pub async fn overview(&self, user: &User) -> Result<OverviewStatsDto, DomainError> {
        let now = self.clock.now();
        let tasks = self.tasks.list_all(user.id()).await?;
        let stats = TaskStats::from_tasks(&tasks, now);
        let dates = self.check_ins.list_dates(user.id()).await?;
        let total_checkins = dates.len() as u32;
        let streak = compute_streaks(dates, self.clock.today());

        Ok(OverviewStatsDto {
            user_since_days: (now - user.created_at()).num_days(),
            total_checkins,
            total_tasks: stats.total,
            completed_tasks: stats.completed,
            saved_papers: self.papers.list(user.id(), false).await?.len() as u32,
            research_interests: self.interests.list(user.id()).await?.len() as u32,
            current_streak: streak.current_streak,
            task_completion_rate: stats.completion_rate(),
        })
    }

    /// Activity from `today - days` through today, bucketed by `period`.
    pub async fn timeseries(
        &self,
        user: &User,
        query: TimeSeriesQuery,
    ) -> Result<TimeSeriesDto, DomainError> {
        let days = query.days.unwrap_or(DEFAULT_TIMESERIES_DAYS);
        if !TIMESERIES_DAYS.contains(&days) {
            return Err(DomainError::Validation(format!(
                "days must be between {} and {}",
                TIMESERIES_DAYS.start(),
                TIMESERIES_DAYS.end()
            )));
        }

        let end = self.clock.today();
        let start = end
            .checked_sub_days(Days::new(u64::from(days)))
            .ok_or_else(|| DomainError::Validation("days reaches before year 0".to_string()))?;

        let check_in_dates: Vec<NaiveDate> = self
            .check_ins
            .list_in_range(user.id(), start, end)
            .await?
            .iter()
            .map(|c| c.date())
            .collect();
        let task_dates: Vec<NaiveDate> = self
            .tasks
            .list_all(user.id())
            .await?
            .iter()
            .filter_map(Task::completed_at)
            .map(|at| self.clock.calendar_date(at))
            .collect();
        let paper_dates: Vec<NaiveDate> = self
            .papers
            .list(user.id(), false)
            .await?
            .iter()
            .map(|p| self.clock.calendar_date(p.saved_at()))
            .collect();

        let data = build_series(
            start,
            end,
            query.period,
            &check_in_dates,
            &task_dates,
            &paper_dates,
        );

        info!(
            "[stats] timeseries user_id={} period={:?} days={} buckets={}",
            user.id(),
            query.period,
            days,
            data.len()
        );

        Ok(TimeSeriesDto {
            period: query.period,
            data,
        })
    }

    pub async fn achievements(&self, user: &User) -> Result<Vec<Achievement>, DomainError> {
        let check_ins = self.check_ins.list_all(user.id()).await?;
        let tasks = self.tasks.list_all(user.id()).await?;
        let papers = self.papers.list(user.id(), false).await?;
        let interests = self.interests.list(user.id()).await?;

        let streak = compute_streaks(check_ins.iter().map(|c| c.date()), self.clock.today());
        let completed: Vec<_> = tasks.iter().filter_map(Task::completed_at).collect();

        let snapshot = ProgressSnapshot {
            total_checkins: check_ins.len() as u32,
            current_streak: streak.current_streak,
            completed_tasks: completed.len() as u32,
            saved_papers: papers.len() as u32,
            research_interests: interests.len() as u32,
            first_checkin_at: check_ins.iter().map(|c| c.created_at()).min(),
            first_task_completed_at: completed.iter().min().copied(),
            first_paper_saved_at: papers.iter().map(|p| p.saved_at()).min(),
        };

        Ok(evaluate(&snapshot))
    }

    pub async fn learning_progress(&self, user: &User) -> Result<LearningProgressDto, DomainError> {
        let check_ins = self.check_ins.list_all(user.id()).await?;
        let tasks = self.tasks.list_all(user.id()).await?;
        let papers = self.papers.list(user.id(), false).await?;
        let interests = self.interests.list(user.id()).await?;

        let hours: f64 = check_ins
            .iter()
            .map(|c| {
                f64::from(c.tasks_completed()) / f64::from(c.tasks_total().max(1))
                    * HOURS_PER_FULL_DAY
            })
            .sum();

        let mut recent: Vec<RecentActivityDto> = self
            .check_ins
            .list(user.id(), 0, RECENT_PER_KIND)
            .await?
            .into_iter()
            .map(|c| RecentActivityDto::Checkin {
                date: c.date().and_time(NaiveTime::default()).and_utc(),
                mood: c.mood(),
                tasks_completed: c.tasks_completed(),
                tasks_total: c.tasks_total(),
            })
            .collect();

        let mut completed: Vec<&Task> = tasks.iter().filter(|t| t.completed_at().is_some()).collect();
        completed.sort_by_key(|t| std::cmp::Reverse(t.completed_at()));
        recent.extend(
            completed
                .iter()
                .take(RECENT_PER_KIND as usize)
                .filter_map(|t| {
                    t.completed_at().map(|date| RecentActivityDto::TaskCompleted {
                        date,
                        title: t.title().to_string(),
                        priority: t.priority(),
                    })
                }),
        );
        recent.sort_by_key(|a| std::cmp::Reverse(a.date()));
        recent.truncate(RECENT_TOTAL);

        Ok(LearningProgressDto {
            total_study_days: check_ins.len() as u32,
            total_study_hours: (hours * 10.0).round() / 10.0,
            papers_read: papers.len() as u32,
            tasks_completed: completed.len() as u32,
            knowledge_areas: interests.iter().map(KnowledgeAreaDto::from).collect(),
            recent_activity: recent,
        })
    }

    pub async fn heatmap(&self, user: &User, year: i32) -> Result<ActivityHeatmap, DomainError> {
        ActivityHeatmap::validate_year(year)?;

        let first = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| DomainError::Validation(format!("Invalid year: {}", year)))?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| DomainError::Validation(format!("Invalid year: {}", year)))?;

        let dates = self
            .check_ins
            .list_in_range(user.id(), first, last)
            .await?
            .into_iter()
            .map(|c| c.date());

        ActivityHeatmap::for_year(year, dates)
    }
}

/// First day of the bucket holding `date`. Weeks start on Monday.
fn bucket_start(date: NaiveDate, period: Period) -> NaiveDate {
    match period {
        Period::Daily => date,
        Period::Weekly => date
            .checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
            .unwrap_or(date),
        Period::Monthly => date.with_day(1).unwrap_or(date),
    }
}

/// Every bucket between `start` and `end` is present, empty ones included.
fn build_series(
    start: NaiveDate,
    end: NaiveDate,
    period: Period,
    check_ins: &[NaiveDate],
    tasks_completed: &[NaiveDate],
    papers_saved: &[NaiveDate],
) -> Vec<ActivityPointDto> {
    let mut buckets: BTreeMap<NaiveDate, ActivityPointDto> = start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|d| bucket_start(d, period))
        .map(|date| {
            (
                date,
                ActivityPointDto {
                    date,
                    tasks_completed: 0,
                    checkins: 0,
                    papers_saved: 0,
                },
            )
        })
        .collect();

    let in_range = |d: &&NaiveDate| (start..=end).contains(*d);

    for date in check_ins.iter().filter(in_range) {
        if let Some(point) = buckets.get_mut(&bucket_start(*date, period)) {
            point.checkins += 1;
        }
    }
    for date in tasks_completed.iter().filter(in_range) {
        if let Some(point) = buckets.get_mut(&bucket_start(*date, period)) {
            point.tasks_completed += 1;
        }
    }
    for date in papers_saved.iter().filter(in_range) {
        if let Some(point) = buckets.get_mut(&bucket_start(*date, period)) {
            point.papers_saved += 1;
        }
    }

    buckets.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    #[test]
    fn test_daily_series_has_one_point_per_day() {
        let series = build_series(d(3, 1), d(3, 8), Period::Daily, &[d(3, 2), d(3, 2)], &[], &[]);

        assert_eq!(series.len(), 8);
        assert_eq!(series[0].date, d(3, 1));
        assert_eq!(series[1].checkins, 2);
        assert_eq!(series[7].date, d(3, 8));
    }

    #[test]
    fn test_weekly_buckets_start_on_monday() {
        // 2024-03-06 is a Wednesday
        assert_eq!(bucket_start(d(3, 6), Period::Weekly), d(3, 4));
        assert_eq!(bucket_start(d(3, 4), Period::Weekly), d(3, 4));
        assert_eq!(bucket_start(d(3, 10), Period::Weekly), d(3, 4));

        let series = build_series(
            d(3, 6),
            d(3, 13),
            Period::Weekly,
            &[d(3, 6), d(3, 10), d(3, 11)],
            &[d(3, 12)],
            &[],
        );
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, d(3, 4));
        assert_eq!(series[0].checkins, 2);
        assert_eq!(series[1].checkins, 1);
        assert_eq!(series[1].tasks_completed, 1);
    }

    #[test]
    fn test_monthly_buckets_ignore_out_of_range_dates() {
        let series = build_series(
            d(1, 20),
            d(3, 5),
            Period::Monthly,
            &[d(1, 10), d(1, 25), d(2, 29)],
            &[],
            &[d(3, 5), d(3, 6)],
        );

        let dates: Vec<NaiveDate> = series.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d(1, 1), d(2, 1), d(3, 1)]);
        assert_eq!(series[0].checkins, 1);
        assert_eq!(series[1].checkins, 1);
        assert_eq!(series[2].papers_saved, 1);
    }
}
