// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod achievement;
pub mod check_in;
pub mod paper;
pub mod research_interest;
pub mod roadmap;
pub mod shared;
pub mod subscription;
pub mod task;
pub mod topic;
pub mod user;

// Re-exports for convenience
pub use shared::{Clock, DomainError, SystemClock, UserId};
