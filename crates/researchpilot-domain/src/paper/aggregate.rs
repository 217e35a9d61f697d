use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::FocusPages;
use crate::shared::{validate_required_text, DomainError, SavedPaperId, UserId};

const MAX_PAPER_ID_CHARS: usize = 255;
const MAX_TITLE_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaperSource {
    Arxiv,
    Crossref,
    SemanticScholar,
    #[default]
    Manual,
}

impl PaperSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaperSource::Arxiv => "arxiv",
            PaperSource::Crossref => "crossref",
            PaperSource::SemanticScholar => "semantic_scholar",
            PaperSource::Manual => "manual",
        }
    }
}

impl FromStr for PaperSource {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arxiv" => Ok(PaperSource::Arxiv),
            "crossref" => Ok(PaperSource::Crossref),
            "semantic_scholar" => Ok(PaperSource::SemanticScholar),
            "manual" => Ok(PaperSource::Manual),
            other => Err(DomainError::Validation(format!(
                "Invalid source '{}', expected arxiv, crossref, semantic_scholar or manual",
                other
            ))),
        }
    }
}

/// Paper metadata supplied by the client when saving to the library.
#[derive(Debug, Clone)]
pub struct NewSavedPaper {
    pub user_id: UserId,
    pub paper_id: String,
    pub title: String,
    pub authors: Option<String>,
    pub abstract_text: Option<String>,
    pub source: PaperSource,
    pub url: Option<String>,
    pub year: Option<i32>,
    pub notes: Option<String>,
    pub saved_at: DateTime<Utc>,
}

impl NewSavedPaper {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: UserId,
        paper_id: &str,
        title: &str,
        authors: Option<String>,
        abstract_text: Option<String>,
        source: PaperSource,
        url: Option<String>,
        year: Option<i32>,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            user_id,
            paper_id: validate_required_text("Paper id", paper_id, MAX_PAPER_ID_CHARS)?,
            title: validate_required_text("Title", title, MAX_TITLE_CHARS)?,
            authors,
            abstract_text,
            source,
            url,
            year,
            notes,
            saved_at: now,
        })
    }
}

/// Library update: focus flag, reading range, notes.
#[derive(Debug, Clone, Default)]
pub struct PaperChanges {
    pub focus: Option<bool>,
    pub focus_pages: Option<FocusPages>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SavedPaper {
    id: SavedPaperId,
    user_id: UserId,
    paper_id: String,
    title: String,
    authors: Option<String>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    source: PaperSource,
    url: Option<String>,
    year: Option<i32>,
    notes: Option<String>,
    focus: bool,
    focus_pages: FocusPages,
    saved_at: DateTime<Utc>,
}

impl SavedPaper {
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: SavedPaperId,
        user_id: UserId,
        paper_id: String,
        title: String,
        authors: Option<String>,
        abstract_text: Option<String>,
        source: PaperSource,
        url: Option<String>,
        year: Option<i32>,
        notes: Option<String>,
        focus: bool,
        focus_pages: FocusPages,
        saved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            paper_id,
            title,
            authors,
            abstract_text,
            source,
            url,
            year,
            notes,
            focus,
            focus_pages,
            saved_at,
        }
    }

    pub fn id(&self) -> SavedPaperId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn paper_id(&self) -> &str {
        &self.paper_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn authors(&self) -> Option<&str> {
        self.authors.as_deref()
    }

    pub fn abstract_text(&self) -> Option<&str> {
        self.abstract_text.as_deref()
    }

    pub fn source(&self) -> PaperSource {
        self.source
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn focus(&self) -> bool {
        self.focus
    }

    pub fn focus_pages(&self) -> &FocusPages {
        &self.focus_pages
    }

    pub fn saved_at(&self) -> DateTime<Utc> {
        self.saved_at
    }

    pub fn apply(&mut self, changes: PaperChanges) {
        if let Some(focus) = changes.focus {
            self.focus = focus;
        }
        if let Some(pages) = changes.focus_pages {
            self.focus_pages = pages;
        }
        if let Some(notes) = changes.notes {
            self.notes = Some(notes);
        }
    }
}
