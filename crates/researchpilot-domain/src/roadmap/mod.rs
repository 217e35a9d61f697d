mod aggregate;
mod planner;
mod repository;

#[cfg(test)]
mod planner_test;

pub use aggregate::{Roadmap, RoadmapPhase, RoadmapSettings};
pub use planner::plan;
pub use repository::RoadmapRepository;
