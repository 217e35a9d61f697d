mod aggregate;
mod focus_pages;
mod repository;
mod search;

pub use aggregate::{NewSavedPaper, PaperChanges, PaperSource, SavedPaper};
pub use focus_pages::{FocusPages, PageRange};
pub use repository::SavedPaperRepository;
pub use search::{
    PaperSearch, PaperSearchQuery, PaperSearchResult, DEFAULT_SEARCH_RESULTS, MAX_SEARCH_RESULTS,
};
