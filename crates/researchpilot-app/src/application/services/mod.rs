mod auth_service;
mod check_in_service;
mod paper_service;
mod profile_service;
mod roadmap_service;
mod task_service;
mod topic_service;

#[cfg(test)]
mod test_support;

pub use auth_service::AuthService;
pub use check_in_service::CheckInService;
pub use paper_service::PaperService;
pub use profile_service::ProfileService;
pub use roadmap_service::RoadmapService;
pub use task_service::TaskService;
pub use topic_service::TopicService;
