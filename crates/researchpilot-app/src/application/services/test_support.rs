//! In-memory repositories shared by the service unit tests.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use researchpilot_domain::research_interest::{
    NewResearchInterest, ResearchInterest, ResearchInterestRepository,
};
use researchpilot_domain::shared::{Clock, DomainError, FixedClock, InterestId, TaskId, UserId};
use researchpilot_domain::subscription::{Subscription, SubscriptionRepository};
use researchpilot_domain::task::{NewTask, Task, TaskFilter, TaskRepository};
use researchpilot_domain::user::{Email, NewUser, User, UserRepository};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

pub fn now() -> DateTime<Utc> {
    FixedClock::on(today()).now()
}

pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::on(today()))
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<i64, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email() == user.email()) {
            return Err(DomainError::Conflict("Email already registered".to_string()));
        }
        let id = users.len() as i64 + 1;
        let created = User::restore(
            UserId::new(id),
            user.email().clone(),
            user.name().map(String::from),
            user.password_hash().to_string(),
            true,
            user.created_at(),
            user.created_at(),
        );
        users.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(&id.value()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email() == email)
            .cloned())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.id() != user.id() && u.email() == user.email())
        {
            return Err(DomainError::Conflict("Email already registered".to_string()));
        }
        users.insert(user.id().value(), user.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySubscriptionRepository {
    subscriptions: RwLock<HashMap<i64, Subscription>>,
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError> {
        self.subscriptions
            .write()
            .await
            .insert(subscription.user_id().value(), subscription.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Option<Subscription>, DomainError> {
        Ok(self.subscriptions.read().await.get(&user_id.value()).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<Vec<Task>>,
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: &NewTask) -> Result<Task, DomainError> {
        let mut tasks = self.tasks.write().await;
        let created = Task::restore(
            TaskId::new(tasks.len() as i64 + 1),
            task.user_id(),
            task.title().to_string(),
            task.description().map(String::from),
            task.priority(),
            task.status(),
            task.due_date(),
            task.completed_at(),
            task.created_at(),
            task.created_at(),
        );
        tasks.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, user_id: UserId, id: TaskId) -> Result<Option<Task>, DomainError> {
        Ok(self
            .tasks
            .read()
            .await
            .iter()
            .find(|t| t.user_id() == user_id && t.id() == id)
            .cloned())
    }

    async fn list(
        &self,
        user_id: UserId,
        filter: TaskFilter,
        skip: u32,
        limit: u32,
    ) -> Result<Vec<Task>, DomainError> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .iter()
            .rev()
            .filter(|t| t.user_id() == user_id)
            .filter(|t| filter.status.map_or(true, |s| t.status() == s))
            .filter(|t| filter.priority.map_or(true, |p| t.priority() == p))
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn list_all(&self, user_id: UserId) -> Result<Vec<Task>, DomainError> {
        self.list(user_id, TaskFilter::default(), 0, u32::MAX).await
    }

    async fn update(&self, task: &Task) -> Result<(), DomainError> {
        let mut tasks = self.tasks.write().await;
        let slot = tasks
            .iter_mut()
            .find(|t| t.id() == task.id())
            .ok_or_else(|| DomainError::NotFound(format!("Task {} not found", task.id())))?;
        *slot = task.clone();
        Ok(())
    }

    async fn delete(&self, user_id: UserId, id: TaskId) -> Result<bool, DomainError> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| !(t.user_id() == user_id && t.id() == id));
        Ok(tasks.len() != before)
    }
}

#[derive(Default)]
pub struct InMemoryInterestRepository {
    interests: RwLock<Vec<ResearchInterest>>,
}

#[async_trait]
impl ResearchInterestRepository for InMemoryInterestRepository {
    async fn create(&self, interest: &NewResearchInterest) -> Result<ResearchInterest, DomainError> {
        let mut interests = self.interests.write().await;
        let created = ResearchInterest::restore(
            InterestId::new(interests.len() as i64 + 1),
            interest.user_id,
            interest.topic.clone(),
            interest.description.clone(),
            interest.level,
            interest.priority,
            interest.created_at,
        );
        interests.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(
        &self,
        user_id: UserId,
        id: InterestId,
    ) -> Result<Option<ResearchInterest>, DomainError> {
        Ok(self
            .interests
            .read()
            .await
            .iter()
            .find(|i| i.user_id() == user_id && i.id() == id)
            .cloned())
    }

    async fn list(&self, user_id: UserId) -> Result<Vec<ResearchInterest>, DomainError> {
        Ok(self
            .interests
            .read()
            .await
            .iter()
            .rev()
            .filter(|i| i.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, interest: &ResearchInterest) -> Result<(), DomainError> {
        let mut interests = self.interests.write().await;
        if let Some(slot) = interests.iter_mut().find(|i| i.id() == interest.id()) {
            *slot = interest.clone();
        }
        Ok(())
    }

    async fn delete(&self, user_id: UserId, id: InterestId) -> Result<bool, DomainError> {
        let mut interests = self.interests.write().await;
        let before = interests.len();
        interests.retain(|i| !(i.user_id() == user_id && i.id() == id));
        Ok(interests.len() != before)
    }
}
