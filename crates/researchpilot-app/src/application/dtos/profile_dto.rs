use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use researchpilot_domain::research_interest::InterestLevel;
use researchpilot_domain::shared::Priority;
use researchpilot_domain::subscription::{Subscription, SubscriptionPlan, SubscriptionStatus};
use researchpilot_domain::user::User;

#[derive(Debug, Clone, Serialize)]
pub struct ProfileDto {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for ProfileDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().value(),
            email: user.email().as_str().to_string(),
            name: user.name().map(String::from),
            is_active: user.is_active(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInterestRequest {
    pub topic: String,
    pub description: Option<String>,
    #[serde(default)]
    pub level: InterestLevel,
    #[serde(default)]
    pub priority: Priority,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInterestRequest {
    pub topic: Option<String>,
    pub description: Option<String>,
    pub level: Option<InterestLevel>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionDto {
    pub plan: SubscriptionPlan,
    pub status: SubscriptionStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub days_remaining: Option<i64>,
}

impl SubscriptionDto {
    pub fn from_subscription(subscription: &Subscription, now: DateTime<Utc>) -> Self {
        Self {
            plan: subscription.plan(),
            status: subscription.status(),
            start_date: subscription.start_date(),
            end_date: subscription.end_date(),
            days_remaining: subscription.days_remaining(now),
        }
    }
}
