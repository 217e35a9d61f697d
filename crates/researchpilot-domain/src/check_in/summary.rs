use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{compute_streaks, CheckIn, Mood};

/// Aggregate view over a user's check-in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInSummary {
    pub total_checkins: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub average_completion_rate: f64,
    pub mood_distribution: BTreeMap<Mood, u32>,
}

impl CheckInSummary {
    pub fn from_records(records: &[CheckIn], today: NaiveDate) -> Self {
        let streak = compute_streaks(records.iter().map(|c| c.date()), today);

        let average_completion_rate = if records.is_empty() {
            0.0
        } else {
            let sum: f64 = records.iter().map(CheckIn::completion_rate).sum();
            round2(sum / records.len() as f64)
        };

        let mut mood_distribution = BTreeMap::new();
        for record in records {
            *mood_distribution.entry(record.mood()).or_insert(0) += 1;
        }

        Self {
            total_checkins: records.len() as u32,
            current_streak: streak.current_streak,
            longest_streak: streak.longest_streak,
            average_completion_rate,
            mood_distribution,
        }
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
