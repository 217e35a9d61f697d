use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Streak statistics derived from a user's check-in dates. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StreakResult {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_check_in_date: Option<NaiveDate>,
}

/// Compute current and longest streaks over a collection of check-in dates.
///
/// Duplicates are ignored and input order does not matter. The current streak
/// is the run ending at `today`, or at `today - 1` when today has no check-in
/// yet (grace period). A day missing before the anchor ends the run.
pub fn compute_streaks<I>(dates: I, today: NaiveDate) -> StreakResult
where
    I: IntoIterator<Item = NaiveDate>,
{
    let days: BTreeSet<NaiveDate> = dates.into_iter().collect();

    let Some(last_check_in_date) = days.last().copied() else {
        return StreakResult::default();
    };

    StreakResult {
        current_streak: current_streak(&days, today),
        longest_streak: longest_streak(&days),
        last_check_in_date: Some(last_check_in_date),
    }
}

fn longest_streak(days: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut previous: Option<NaiveDate> = None;

    for &day in days {
        run = match previous {
            Some(prev) if prev.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(day);
    }

    longest
}

fn current_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let yesterday = today.checked_sub_days(Days::new(1));

    let anchor = if days.contains(&today) {
        today
    } else {
        match yesterday {
            Some(day) if days.contains(&day) => day,
            _ => return 0,
        }
    };

    let mut streak = 1u32;
    let mut cursor = anchor;
    while let Some(prev) = cursor.pred_opt() {
        if !days.contains(&prev) {
            break;
        }
        streak += 1;
        cursor = prev;
    }

    streak
}
