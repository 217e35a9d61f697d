use log::info;
use std::sync::Arc;

use crate::application::dtos::GenerateRoadmapRequest;
use researchpilot_domain::roadmap::{plan, Roadmap, RoadmapRepository, RoadmapSettings};
use researchpilot_domain::shared::{Clock, DomainError, UserId};

pub struct RoadmapService {
    roadmaps: Arc<dyn RoadmapRepository>,
    clock: Arc<dyn Clock>,
}

impl RoadmapService {
    pub fn new(roadmaps: Arc<dyn RoadmapRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { roadmaps, clock }
    }

    /// Plan a new roadmap and store it in place of the current one.
    pub async fn generate(
        &self,
        user_id: UserId,
        request: GenerateRoadmapRequest,
    ) -> Result<Roadmap, DomainError> {
        let settings = RoadmapSettings::new(
            &request.topic,
            request.weeks,
            request.daily_hours,
            request.theory_ratio,
        )?;
        let roadmap = plan(user_id, settings, self.clock.now());
        self.roadmaps.replace(&roadmap).await?;

        info!(
            "User {} generated a {}-week roadmap with {} phases",
            user_id,
            roadmap.total_weeks(),
            roadmap.phases().len()
        );
        Ok(roadmap)
    }

    pub async fn current(&self, user_id: UserId) -> Result<Option<Roadmap>, DomainError> {
        self.roadmaps.find_current(user_id).await
    }

    /// `true` when a roadmap existed.
    pub async fn delete(&self, user_id: UserId) -> Result<bool, DomainError> {
        self.roadmaps.delete(user_id).await
    }
}
