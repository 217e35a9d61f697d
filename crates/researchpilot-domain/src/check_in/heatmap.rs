use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::RangeInclusive;

use crate::shared::DomainError;

pub const HEATMAP_YEARS: RangeInclusive<i32> = 2020..=2030;
const MAX_LEVEL: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub count: u32,
    pub level: u32,
}

/// Daily activity counts for one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityHeatmap {
    pub year: i32,
    pub data: Vec<HeatmapCell>,
}

impl ActivityHeatmap {
    pub fn validate_year(year: i32) -> Result<(), DomainError> {
        if HEATMAP_YEARS.contains(&year) {
            Ok(())
        } else {
            Err(DomainError::Validation(format!(
                "Year must be between {} and {}",
                HEATMAP_YEARS.start(),
                HEATMAP_YEARS.end()
            )))
        }
    }

    /// `dates` may contain days from other years; they are ignored.
    pub fn for_year<I>(year: i32, dates: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        Self::validate_year(year)?;

        let first = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| DomainError::Validation(format!("Invalid year: {}", year)))?;

        let mut counts: HashMap<NaiveDate, u32> = HashMap::new();
        for date in dates {
            *counts.entry(date).or_insert(0) += 1;
        }

        let data = first
            .iter_days()
            .take_while(|d| chrono::Datelike::year(d) == year)
            .map(|date| {
                let count = counts.get(&date).copied().unwrap_or(0);
                HeatmapCell {
                    date,
                    count,
                    level: count.min(MAX_LEVEL),
                }
            })
            .collect();

        Ok(Self { year, data })
    }
}
