use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{CheckIn, Mood};
use crate::shared::DomainError;

/// A validated calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearMonth {
    first_day: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::Validation(
                "Month must be between 1 and 12".to_string(),
            ));
        }

        let first_day = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| DomainError::Validation(format!("Invalid year: {}", year)))?;

        // The last day must be representable too.
        Self { first_day }
            .checked_last_day()
            .map(|_| Self { first_day })
            .ok_or_else(|| DomainError::Validation(format!("Invalid year: {}", year)))
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.checked_last_day().unwrap_or(self.first_day)
    }

    /// 28-31, from calendar arithmetic.
    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    fn checked_last_day(&self) -> Option<NaiveDate> {
        let (year, month) = if self.month() == 12 {
            (self.year().checked_add(1)?, 1)
        } else {
            (self.year(), self.month() + 1)
        };

        NaiveDate::from_ymd_opt(year, month, 1)?.pred_opt()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub day: u32,
    pub has_checkin: bool,
    pub mood: Option<Mood>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

impl MonthCalendar {
    /// One entry per day of `month`; check-ins outside the month are ignored.
    pub fn build(month: YearMonth, check_ins: &[CheckIn]) -> Self {
        let by_day: HashMap<u32, Mood> = check_ins
            .iter()
            .filter(|c| month.contains(c.date()))
            .map(|c| (c.date().day(), c.mood()))
            .collect();

        let days = (1..=month.days_in_month())
            .map(|day| {
                let mood = by_day.get(&day).copied();
                CalendarDay {
                    day,
                    has_checkin: mood.is_some(),
                    mood,
                }
            })
            .collect();

        Self {
            year: month.year(),
            month: month.month(),
            days,
        }
    }

    pub fn checked_in_days(&self) -> usize {
        self.days.iter().filter(|d| d.has_checkin).count()
    }
}
