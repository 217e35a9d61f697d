use log::info;
use std::sync::Arc;

use crate::application::dtos::{
    CreateInterestRequest, ProfileDto, SubscriptionDto, UpdateInterestRequest,
    UpdateProfileRequest,
};
use researchpilot_domain::research_interest::{
    InterestChanges, NewResearchInterest, ResearchInterest, ResearchInterestRepository,
};
use researchpilot_domain::shared::{Clock, DomainError, InterestId};
use researchpilot_domain::subscription::SubscriptionRepository;
use researchpilot_domain::user::{Email, User, UserRepository};

pub struct ProfileService {
    users: Arc<dyn UserRepository>,
    interests: Arc<dyn ResearchInterestRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    clock: Arc<dyn Clock>,
}

impl ProfileService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        interests: Arc<dyn ResearchInterestRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            interests,
            subscriptions,
            clock,
        }
    }

    pub async fn update_profile(
        &self,
        mut user: User,
        request: UpdateProfileRequest,
    ) -> Result<ProfileDto, DomainError> {
        let now = self.clock.now();

        if let Some(name) = request.name {
            user.rename(Some(name), now)?;
        }

        if let Some(raw) = request.email {
            let email = Email::parse(&raw)?;
            if &email != user.email() {
                if let Some(owner) = self.users.find_by_email(&email).await? {
                    if owner.id() != user.id() {
                        return Err(DomainError::Conflict("Email already in use".to_string()));
                    }
                }
                user.change_email(email, now);
            }
        }

        self.users.update(&user).await?;
        Ok(ProfileDto::from(&user))
    }

    pub async fn list_interests(&self, user: &User) -> Result<Vec<ResearchInterest>, DomainError> {
        self.interests.list(user.id()).await
    }

    pub async fn create_interest(
        &self,
        user: &User,
        request: CreateInterestRequest,
    ) -> Result<ResearchInterest, DomainError> {
        let interest = NewResearchInterest::new(
            user.id(),
            &request.topic,
            request.description,
            request.level,
            request.priority,
            self.clock.now(),
        )?;
        let created = self.interests.create(&interest).await?;
        info!("User {} added research interest {}", user.id(), created.id());
        Ok(created)
    }

    pub async fn get_interest(
        &self,
        user: &User,
        id: InterestId,
    ) -> Result<ResearchInterest, DomainError> {
        self.interests
            .find_by_id(user.id(), id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Research interest {} not found", id)))
    }

    pub async fn update_interest(
        &self,
        user: &User,
        id: InterestId,
        request: UpdateInterestRequest,
    ) -> Result<ResearchInterest, DomainError> {
        let mut interest = self.get_interest(user, id).await?;
        interest.apply(InterestChanges {
            topic: request.topic,
            description: request.description,
            level: request.level,
            priority: request.priority,
        })?;
        self.interests.update(&interest).await?;
        Ok(interest)
    }

    pub async fn delete_interest(&self, user: &User, id: InterestId) -> Result<(), DomainError> {
        if self.interests.delete(user.id(), id).await? {
            Ok(())
        } else {
            Err(DomainError::NotFound(format!(
                "Research interest {} not found",
                id
            )))
        }
    }

    /// The stored subscription, with its status moved to expired once the
    /// end date has passed.
    pub async fn subscription(&self, user: &User) -> Result<Option<SubscriptionDto>, DomainError> {
        let now = self.clock.now();
        let Some(mut subscription) = self.subscriptions.find_by_user(user.id()).await? else {
            return Ok(None);
        };

        if subscription.refresh_expiry(now) {
            info!("Subscription of user {} expired", user.id());
            self.subscriptions.save(&subscription).await?;
        }

        Ok(Some(SubscriptionDto::from_subscription(&subscription, now)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{
        fixed_clock, now, InMemoryInterestRepository, InMemorySubscriptionRepository,
        InMemoryUserRepository,
    };
    use researchpilot_domain::research_interest::InterestLevel;
    use researchpilot_domain::shared::Priority;
    use researchpilot_domain::subscription::{Subscription, SubscriptionPlan, SubscriptionStatus};
    use researchpilot_domain::user::NewUser;

    struct Fixture {
        service: ProfileService,
        users: Arc<InMemoryUserRepository>,
        subscriptions: Arc<InMemorySubscriptionRepository>,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUserRepository::default());
        let subscriptions = Arc::new(InMemorySubscriptionRepository::default());
        let service = ProfileService::new(
            users.clone(),
            Arc::new(InMemoryInterestRepository::default()),
            subscriptions.clone(),
            fixed_clock(),
        );
        Fixture {
            service,
            users,
            subscriptions,
        }
    }

    async fn user(users: &InMemoryUserRepository, email: &str) -> User {
        let new = NewUser::new(Email::parse(email).unwrap(), None, "hash".to_string(), now())
            .unwrap();
        users.create(&new).await.unwrap()
    }

    #[tokio::test]
    async fn test_update_profile_rejects_taken_email() {
        let fx = fixture();
        let ada = user(&fx.users, "ada@example.com").await;
        user(&fx.users, "bob@example.com").await;

        let err = fx
            .service
            .update_profile(
                ada.clone(),
                UpdateProfileRequest {
                    name: None,
                    email: Some("BOB@example.com".to_string()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let updated = fx
            .service
            .update_profile(
                ada,
                UpdateProfileRequest {
                    name: Some("Ada Lovelace".to_string()),
                    email: Some("ada@example.com".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name.as_deref(), Some("Ada Lovelace"));
    }

    #[tokio::test]
    async fn test_interest_lifecycle() {
        let fx = fixture();
        let ada = user(&fx.users, "ada@example.com").await;

        let created = fx
            .service
            .create_interest(
                &ada,
                CreateInterestRequest {
                    topic: "  Graph neural networks ".to_string(),
                    description: None,
                    level: InterestLevel::Beginner,
                    priority: Priority::High,
                },
            )
            .await
            .unwrap();
        assert_eq!(created.topic(), "Graph neural networks");

        let updated = fx
            .service
            .update_interest(
                &ada,
                created.id(),
                UpdateInterestRequest {
                    level: Some(InterestLevel::Advanced),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.level(), InterestLevel::Advanced);

        fx.service.delete_interest(&ada, created.id()).await.unwrap();
        let err = fx
            .service
            .delete_interest(&ada, created.id())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_subscription_expiry_is_persisted() {
        let fx = fixture();
        let ada = user(&fx.users, "ada@example.com").await;
        assert!(fx.service.subscription(&ada).await.unwrap().is_none());

        let lapsed = Subscription::restore(
            ada.id(),
            SubscriptionPlan::Monthly,
            SubscriptionStatus::Active,
            now() - chrono::Duration::days(40),
            Some(now() - chrono::Duration::days(10)),
        );
        fx.subscriptions.save(&lapsed).await.unwrap();

        let dto = fx.service.subscription(&ada).await.unwrap().unwrap();
        assert_eq!(dto.status, SubscriptionStatus::Expired);
        assert_eq!(dto.days_remaining, Some(0));

        let stored = fx.subscriptions.find_by_user(ada.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), SubscriptionStatus::Expired);
    }
}
