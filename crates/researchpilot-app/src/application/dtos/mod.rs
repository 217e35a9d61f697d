mod auth_dto;
mod check_in_dto;
mod paper_dto;
mod profile_dto;
mod roadmap_dto;
mod stats_dto;
mod streak_dto;
mod task_dto;

pub use auth_dto::*;
pub use check_in_dto::*;
pub use paper_dto::*;
pub use profile_dto::*;
pub use roadmap_dto::*;
pub use stats_dto::*;
pub use streak_dto::*;
pub use task_dto::*;
