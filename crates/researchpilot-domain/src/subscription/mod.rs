mod aggregate;
mod repository;

pub use aggregate::{Subscription, SubscriptionPlan, SubscriptionStatus, TRIAL_DAYS};
pub use repository::SubscriptionRepository;
