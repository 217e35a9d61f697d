use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::shared::{DomainError, UserId};

pub const TRIAL_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Trial,
    Monthly,
    Yearly,
}

impl SubscriptionPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Trial => "trial",
            SubscriptionPlan::Monthly => "monthly",
            SubscriptionPlan::Yearly => "yearly",
        }
    }
}

impl FromStr for SubscriptionPlan {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trial" => Ok(SubscriptionPlan::Trial),
            "monthly" => Ok(SubscriptionPlan::Monthly),
            "yearly" => Ok(SubscriptionPlan::Yearly),
            other => Err(DomainError::DataIntegrity(format!(
                "Unknown subscription plan '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
    Expired,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Cancelled => "cancelled",
            SubscriptionStatus::Expired => "expired",
        }
    }
}

impl FromStr for SubscriptionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SubscriptionStatus::Active),
            "cancelled" => Ok(SubscriptionStatus::Cancelled),
            "expired" => Ok(SubscriptionStatus::Expired),
            other => Err(DomainError::DataIntegrity(format!(
                "Unknown subscription status '{}'",
                other
            ))),
        }
    }
}

/// A user's plan. Each user has at most one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscription {
    user_id: UserId,
    plan: SubscriptionPlan,
    status: SubscriptionStatus,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
}

impl Subscription {
    /// The trial every new account starts with.
    pub fn trial(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            plan: SubscriptionPlan::Trial,
            status: SubscriptionStatus::Active,
            start_date: now,
            end_date: Some(now + Duration::days(TRIAL_DAYS)),
        }
    }

    pub fn restore(
        user_id: UserId,
        plan: SubscriptionPlan,
        status: SubscriptionStatus,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            user_id,
            plan,
            status,
            start_date,
            end_date,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn plan(&self) -> SubscriptionPlan {
        self.plan
    }

    pub fn status(&self) -> SubscriptionStatus {
        self.status
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    /// Whole calendar days until the end date, floored at 0.
    /// `None` for open-ended plans.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        self.end_date
            .map(|end| (end.date_naive() - now.date_naive()).num_days().max(0))
    }

    /// Flip an active subscription to expired once its end date is reached.
    /// Returns `true` when the status changed and must be persisted.
    pub fn refresh_expiry(&mut self, now: DateTime<Utc>) -> bool {
        if self.status == SubscriptionStatus::Active && self.days_remaining(now) == Some(0) {
            self.status = SubscriptionStatus::Expired;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap()
    }

    #[test]
    fn trial_lasts_fourteen_days() {
        let sub = Subscription::trial(UserId::new(1), at(1));

        assert_eq!(sub.plan(), SubscriptionPlan::Trial);
        assert_eq!(sub.status(), SubscriptionStatus::Active);
        assert_eq!(sub.days_remaining(at(1)), Some(14));
        assert_eq!(sub.days_remaining(at(10)), Some(5));
    }

    #[test]
    fn expires_on_end_date() {
        let mut sub = Subscription::trial(UserId::new(1), at(1));

        assert!(!sub.refresh_expiry(at(14)));
        assert_eq!(sub.status(), SubscriptionStatus::Active);

        assert!(sub.refresh_expiry(at(15)));
        assert_eq!(sub.status(), SubscriptionStatus::Expired);
        assert_eq!(sub.days_remaining(at(20)), Some(0));

        // already expired, nothing to persist
        assert!(!sub.refresh_expiry(at(20)));
    }

    #[test]
    fn cancelled_is_left_alone() {
        let mut sub = Subscription::restore(
            UserId::new(1),
            SubscriptionPlan::Monthly,
            SubscriptionStatus::Cancelled,
            at(1),
            Some(at(2)),
        );
        assert!(!sub.refresh_expiry(at(20)));
        assert_eq!(sub.status(), SubscriptionStatus::Cancelled);
    }

    #[test]
    fn open_ended_plan_has_no_remaining_days() {
        let sub = Subscription::restore(
            UserId::new(1),
            SubscriptionPlan::Yearly,
            SubscriptionStatus::Active,
            at(1),
            None,
        );
        assert_eq!(sub.days_remaining(at(3)), None);
    }
}
