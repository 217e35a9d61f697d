use serde::Deserialize;

fn default_weeks() -> u32 {
    12
}

fn default_daily_hours() -> u32 {
    4
}

fn default_theory_ratio() -> f64 {
    0.7
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRoadmapRequest {
    pub topic: String,
    #[serde(default = "default_weeks")]
    pub weeks: u32,
    #[serde(default = "default_daily_hours")]
    pub daily_hours: u32,
    #[serde(default = "default_theory_ratio")]
    pub theory_ratio: f64,
}

#[derive(Debug, Clone, serde::Serialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: &'static str,
}
