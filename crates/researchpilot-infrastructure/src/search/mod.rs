mod arxiv;

pub use arxiv::{parse_feed, PaperSearchClient, DEFAULT_ARXIV_URL};
