use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::shared::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Neutral,
    Frustrated,
    Tired,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Frustrated => "frustrated",
            Mood::Tired => "tired",
        }
    }
}

impl FromStr for Mood {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "happy" => Ok(Mood::Happy),
            "neutral" => Ok(Mood::Neutral),
            "frustrated" => Ok(Mood::Frustrated),
            "tired" => Ok(Mood::Tired),
            other => Err(DomainError::Validation(format!(
                "Invalid mood '{}', expected happy, neutral, frustrated or tired",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
