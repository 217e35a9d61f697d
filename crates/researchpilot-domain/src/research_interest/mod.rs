mod aggregate;
mod repository;

pub use aggregate::{InterestChanges, InterestLevel, NewResearchInterest, ResearchInterest};
pub use repository::ResearchInterestRepository;
