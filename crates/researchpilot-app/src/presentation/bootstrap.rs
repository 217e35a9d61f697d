use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::config::ServerConfig;
use crate::application::queries::{CheckInStreakQueries, ExportQueries, StatsQueries};
use crate::application::services::{
    AuthService, CheckInService, PaperService, ProfileService, RoadmapService, TaskService,
    TopicService,
};
use crate::presentation::state::{AppState, Queries, Runtime, Services};
use researchpilot_domain::check_in::CheckInRepository;
use researchpilot_domain::paper::{PaperSearch, SavedPaperRepository};
use researchpilot_domain::research_interest::ResearchInterestRepository;
use researchpilot_domain::roadmap::RoadmapRepository;
use researchpilot_domain::shared::{Clock, DomainError};
use researchpilot_domain::subscription::SubscriptionRepository;
use researchpilot_domain::task::TaskRepository;
use researchpilot_domain::user::UserRepository;
use researchpilot_infrastructure::persistence::{
    repositories::{
        SqliteCheckInRepository, SqliteResearchInterestRepository, SqliteRoadmapRepository,
        SqliteSavedPaperRepository, SqliteSubscriptionRepository, SqliteTaskRepository,
        SqliteUserRepository,
    },
    Database,
};
use researchpilot_infrastructure::search::PaperSearchClient;
use researchpilot_infrastructure::security::{PasswordService, TokenService};

/// Open the configured database file, migrate it and wire every service.
pub async fn build_app_state(
    config: &ServerConfig,
    clock: Arc<dyn Clock>,
) -> Result<AppState, DomainError> {
    let started_at = Instant::now();
    let database = Database::new(&config.db_path).await?;
    info!(
        "✓ Database opened at {} ({}ms)",
        config.db_path,
        started_at.elapsed().as_millis()
    );

    build_app_state_with_database(database, config, clock).await
}

/// Wire the application around an already opened database.
pub async fn build_app_state_with_database(
    database: Database,
    config: &ServerConfig,
    clock: Arc<dyn Clock>,
) -> Result<AppState, DomainError> {
    let started_at = Instant::now();
    database.run_migrations().await?;
    info!(
        "✓ Migrations applied ({}ms)",
        started_at.elapsed().as_millis()
    );

    let pool = Arc::new(database.pool().clone());

    let users: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(pool.clone()));
    let subscriptions: Arc<dyn SubscriptionRepository> =
        Arc::new(SqliteSubscriptionRepository::new(pool.clone()));
    let tasks: Arc<dyn TaskRepository> = Arc::new(SqliteTaskRepository::new(pool.clone()));
    let check_ins: Arc<dyn CheckInRepository> =
        Arc::new(SqliteCheckInRepository::new(pool.clone()));
    let papers: Arc<dyn SavedPaperRepository> =
        Arc::new(SqliteSavedPaperRepository::new(pool.clone()));
    let interests: Arc<dyn ResearchInterestRepository> =
        Arc::new(SqliteResearchInterestRepository::new(pool.clone()));
    let roadmaps: Arc<dyn RoadmapRepository> = Arc::new(SqliteRoadmapRepository::new(pool));
    let paper_search: Arc<dyn PaperSearch> =
        Arc::new(PaperSearchClient::new(config.arxiv_url.clone())?);

    let tokens = TokenService::new(
        config.token_secret.clone(),
        config.access_token_ttl,
        config.refresh_token_ttl,
    );

    let services = Services {
        auth: AuthService::new(
            users.clone(),
            subscriptions.clone(),
            PasswordService::new(),
            tokens,
            clock.clone(),
        ),
        profile: ProfileService::new(
            users,
            interests.clone(),
            subscriptions.clone(),
            clock.clone(),
        ),
        tasks: TaskService::new(tasks.clone(), clock.clone()),
        check_ins: CheckInService::new(check_ins.clone(), clock.clone()),
        papers: PaperService::new(papers.clone(), paper_search, clock.clone()),
        topics: TopicService::new(interests.clone()),
        roadmaps: RoadmapService::new(roadmaps, clock.clone()),
    };

    let queries = Queries {
        check_in_streak: CheckInStreakQueries::new(check_ins.clone(), clock.clone()),
        stats: StatsQueries::new(
            tasks.clone(),
            check_ins.clone(),
            papers.clone(),
            interests.clone(),
            clock.clone(),
        ),
        export: ExportQueries::new(tasks, check_ins, papers, interests, subscriptions, clock),
    };

    info!("✓ Application services ready");

    Ok(AppState {
        runtime: Arc::new(Runtime {
            db: Arc::new(database),
        }),
        services: Arc::new(services),
        queries: Arc::new(queries),
    })
}
