use std::sync::Arc;

use crate::application::dtos::RecommendTopicsRequest;
use researchpilot_domain::research_interest::ResearchInterestRepository;
use researchpilot_domain::shared::{DomainError, UserId};
use researchpilot_domain::topic::{recommend, ScoredTopic};

pub struct TopicService {
    interests: Arc<dyn ResearchInterestRepository>,
}

impl TopicService {
    pub fn new(interests: Arc<dyn ResearchInterestRepository>) -> Self {
        Self { interests }
    }

    /// Rank the topic catalog. Without explicit interests the user's stored
    /// research interests are used.
    pub async fn recommend(
        &self,
        user_id: UserId,
        request: RecommendTopicsRequest,
    ) -> Result<Vec<ScoredTopic>, DomainError> {
        let interests = if request.interests.iter().any(|i| !i.trim().is_empty()) {
            request.interests
        } else {
            self.interests
                .list(user_id)
                .await?
                .iter()
                .map(|i| i.topic().to_string())
                .collect()
        };

        Ok(recommend(&interests, &request.research_area))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::InMemoryInterestRepository;
    use researchpilot_domain::research_interest::{InterestLevel, NewResearchInterest};
    use researchpilot_domain::shared::Priority;
    use researchpilot_domain::topic::MAX_RECOMMENDATIONS;

    #[tokio::test]
    async fn test_falls_back_to_stored_interests() {
        let repo = Arc::new(InMemoryInterestRepository::default());
        let interest = NewResearchInterest::new(
            UserId::new(1),
            "graph theory",
            None,
            InterestLevel::Beginner,
            Priority::High,
            chrono::Utc::now(),
        )
        .unwrap();
        repo.create(&interest).await.unwrap();

        let service = TopicService::new(repo);
        let stored = service
            .recommend(UserId::new(1), RecommendTopicsRequest::default())
            .await
            .unwrap();
        let explicit = service
            .recommend(
                UserId::new(1),
                RecommendTopicsRequest {
                    interests: vec!["graph theory".to_string()],
                    research_area: String::new(),
                },
            )
            .await
            .unwrap();

        assert_eq!(stored, explicit);
        assert!(stored.len() <= MAX_RECOMMENDATIONS);
        assert!(stored[0].score > 0);
    }
}
