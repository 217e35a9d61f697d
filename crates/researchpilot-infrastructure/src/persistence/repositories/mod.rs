pub mod check_in_repo;
pub mod research_interest_repo;
pub mod roadmap_repo;
pub mod saved_paper_repo;
pub mod subscription_repo;
pub mod task_repo;
pub mod user_repo;

pub use check_in_repo::SqliteCheckInRepository;
pub use research_interest_repo::SqliteResearchInterestRepository;
pub use roadmap_repo::SqliteRoadmapRepository;
pub use saved_paper_repo::SqliteSavedPaperRepository;
pub use subscription_repo::SqliteSubscriptionRepository;
pub use task_repo::SqliteTaskRepository;
pub use user_repo::SqliteUserRepository;

use researchpilot_domain::shared::DomainError;

/// SQLite stores counters as i64; the domain uses u32.
pub(crate) fn to_u32(value: i64, column: &str) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| {
        DomainError::DataIntegrity(format!("Column {} out of range: {}", column, value))
    })
}
