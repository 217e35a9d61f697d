use std::sync::Arc;

use crate::application::queries::{CheckInStreakQueries, ExportQueries, StatsQueries};
use crate::application::services::{
    AuthService, CheckInService, PaperService, ProfileService, RoadmapService, TaskService,
    TopicService,
};
use researchpilot_infrastructure::persistence::Database;

pub struct Runtime {
    pub db: Arc<Database>,
}

pub struct Services {
    pub auth: AuthService,
    pub profile: ProfileService,
    pub tasks: TaskService,
    pub check_ins: CheckInService,
    pub papers: PaperService,
    pub topics: TopicService,
    pub roadmaps: RoadmapService,
}

pub struct Queries {
    pub check_in_streak: CheckInStreakQueries,
    pub stats: StatsQueries,
    pub export: ExportQueries,
}

/// Shared by every request; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<Runtime>,
    pub services: Arc<Services>,
    pub queries: Arc<Queries>,
}
