mod catalog;
mod recommender;

pub use catalog::{TopicTemplate, TOPIC_CATALOG};
pub use recommender::{recommend, ScoredTopic, MAX_RECOMMENDATIONS};
