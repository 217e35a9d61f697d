use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::{validate_required_text, DomainError};

pub const DEFAULT_SEARCH_RESULTS: u32 = 10;
pub const MAX_SEARCH_RESULTS: u32 = 100;

/// A validated catalogue search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperSearchQuery {
    query: String,
    max_results: u32,
    category: Option<String>,
}

impl PaperSearchQuery {
    pub fn new(
        query: &str,
        max_results: Option<u32>,
        category: Option<String>,
    ) -> Result<Self, DomainError> {
        let query = validate_required_text("Query", query, 500)?;
        let max_results = max_results.unwrap_or(DEFAULT_SEARCH_RESULTS);
        if !(1..=MAX_SEARCH_RESULTS).contains(&max_results) {
            return Err(DomainError::Validation(format!(
                "max_results must be between 1 and {}",
                MAX_SEARCH_RESULTS
            )));
        }
        let category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(Self {
            query,
            max_results,
            category,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn max_results(&self) -> u32 {
        self.max_results
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Catalogue expression, e.g. `cat:math.GT AND (knot concordance)`.
    pub fn search_expression(&self) -> String {
        match &self.category {
            Some(category) => format!("cat:{} AND ({})", category, self.query),
            None => self.query.clone(),
        }
    }
}

/// One hit from the external catalogue, not yet in anybody's library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperSearchResult {
    pub ext_id: String,
    pub title: String,
    pub authors: String,
    pub year: Option<i32>,
    pub arxiv_url: String,
    pub pdf_url: String,
    pub summary: String,
}

#[async_trait]
pub trait PaperSearch: Send + Sync {
    /// Newest submissions first.
    async fn search(&self, query: &PaperSearchQuery)
        -> Result<Vec<PaperSearchResult>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_defaults_and_trims() {
        let query = PaperSearchQuery::new("  knot floer  ", None, Some("  ".to_string())).unwrap();

        assert_eq!(query.query(), "knot floer");
        assert_eq!(query.max_results(), DEFAULT_SEARCH_RESULTS);
        assert_eq!(query.category(), None);
        assert_eq!(query.search_expression(), "knot floer");
    }

    #[test]
    fn category_narrows_the_expression() {
        let query = PaperSearchQuery::new("concordance", Some(5), Some("math.GT".into())).unwrap();

        assert_eq!(query.search_expression(), "cat:math.GT AND (concordance)");
    }

    #[test]
    fn empty_query_and_bad_limits_are_rejected() {
        assert!(PaperSearchQuery::new("   ", None, None).is_err());
        assert!(PaperSearchQuery::new("knots", Some(0), None).is_err());
        assert!(PaperSearchQuery::new("knots", Some(MAX_SEARCH_RESULTS + 1), None).is_err());
        assert!(PaperSearchQuery::new("knots", Some(MAX_SEARCH_RESULTS), None).is_ok());
    }
}
