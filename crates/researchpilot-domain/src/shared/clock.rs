use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of "now". Injected so date-relative rules (streaks, overdue tasks,
/// subscription expiry) stay deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar day an instant falls on for this clock.
    fn calendar_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.date_naive()
    }

    fn today(&self) -> NaiveDate {
        self.calendar_date(self.now())
    }
}

/// Wall clock. Calendar days follow the server's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn calendar_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&Local).date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Noon UTC on the given day.
    pub fn on(date: NaiveDate) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
        Self(noon.and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
