use serde::Deserialize;

use researchpilot_domain::paper::PaperSource;

#[derive(Debug, Clone, Deserialize)]
pub struct SavePaperRequest {
    pub paper_id: String,
    pub title: String,
    pub authors: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub source: PaperSource,
    pub url: Option<String>,
    pub year: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePaperRequest {
    pub focus: Option<bool>,
    /// `"1-20,30-40"`; an empty string clears the ranges.
    pub focus_pages: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaperSearchRequest {
    pub query: String,
    pub max_results: Option<u32>,
    /// e.g. `math.GT`
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaperListQuery {
    #[serde(default)]
    pub focus_only: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendTopicsRequest {
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub research_area: String,
}
