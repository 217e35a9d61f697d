use serde::Serialize;

use super::{TopicTemplate, TOPIC_CATALOG};

pub const MAX_RECOMMENDATIONS: usize = 5;

const AREA_IN_TITLE: u32 = 3;
const INTEREST_IN_KEYWORD: u32 = 2;
const INTEREST_IN_DESCRIPTION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredTopic {
    #[serde(flatten)]
    pub topic: TopicTemplate,
    pub score: u32,
}

/// Rank the catalog against a user's interests and research area.
///
/// Matching is case-insensitive substring matching. Ties keep catalog order.
/// When nothing matches, the head of the catalog is returned unscored.
pub fn recommend(interests: &[String], research_area: &str) -> Vec<ScoredTopic> {
    let interests: Vec<String> = interests
        .iter()
        .map(|i| i.trim().to_lowercase())
        .filter(|i| !i.is_empty())
        .collect();
    let area = research_area.trim().to_lowercase();

    let mut scored: Vec<ScoredTopic> = TOPIC_CATALOG
        .iter()
        .map(|topic| ScoredTopic {
            topic: *topic,
            score: score(topic, &interests, &area),
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.score.cmp(&a.score));

    if scored.first().map_or(0, |t| t.score) == 0 {
        return TOPIC_CATALOG
            .iter()
            .take(MAX_RECOMMENDATIONS)
            .map(|topic| ScoredTopic {
                topic: *topic,
                score: 0,
            })
            .collect();
    }

    scored.truncate(MAX_RECOMMENDATIONS);
    scored
}

fn score(topic: &TopicTemplate, interests: &[String], area: &str) -> u32 {
    let mut score = 0;

    if !area.is_empty() && topic.title.to_lowercase().contains(area) {
        score += AREA_IN_TITLE;
    }

    let description = topic.description.to_lowercase();
    for interest in interests {
        if topic
            .keywords
            .iter()
            .any(|kw| kw.to_lowercase().contains(interest.as_str()))
        {
            score += INTEREST_IN_KEYWORD;
        }
        if description.contains(interest.as_str()) {
            score += INTEREST_IN_DESCRIPTION;
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(topics: &[ScoredTopic]) -> Vec<&'static str> {
        topics.iter().map(|t| t.topic.title).collect()
    }

    #[test]
    fn no_match_returns_catalog_head() {
        let result = recommend(&[], "");
        assert_eq!(result.len(), MAX_RECOMMENDATIONS);
        assert!(result.iter().all(|t| t.score == 0));
        assert_eq!(result[0].topic, TOPIC_CATALOG[0]);
        assert_eq!(result[4].topic, TOPIC_CATALOG[4]);
    }

    #[test]
    fn keyword_and_description_matches_score() {
        // "homotopy" is a keyword (+2) and appears in the description (+1)
        let result = recommend(&["Homotopy".to_string()], "");
        assert_eq!(result[0].topic.title, "Homotopy theory of topological spaces");
        assert_eq!(result[0].score, 3);
        assert!(result[1..].iter().all(|t| t.score == 0));
    }

    #[test]
    fn research_area_in_title_scores_three() {
        let result = recommend(&[], "graph theory");
        assert_eq!(result[0].topic.title, "Coloring problems in graph theory");
        assert_eq!(result[0].score, 3);
    }

    #[test]
    fn ties_keep_catalog_order() {
        // "theory" hits several keyword lists
        let result = recommend(&["theory".to_string()], "");
        let ranked = titles(&result);

        let first = ranked
            .iter()
            .position(|t| *t == "Coloring problems in graph theory")
            .unwrap();
        let later = ranked
            .iter()
            .position(|t| *t == "Distribution of primes in number theory")
            .unwrap();
        assert!(first < later);
        assert!(result.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn serializes_flat() {
        let json = serde_json::to_value(&recommend(&[], "")[0]).unwrap();
        assert_eq!(json["score"], 0);
        assert_eq!(json["title"], TOPIC_CATALOG[0].title);
        assert!(json["keywords"].is_array());
    }
}
