use async_trait::async_trait;
use log::{debug, warn};
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use std::time::Duration;

use researchpilot_domain::paper::{PaperSearch, PaperSearchQuery, PaperSearchResult};
use researchpilot_domain::shared::DomainError;

use crate::persistence::ResultExt;

pub const DEFAULT_ARXIV_URL: &str = "http://export.arxiv.org/api/query";

const USER_AGENT: &str = concat!("ResearchPilot/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Searches the arXiv Atom API.
pub struct PaperSearchClient {
    client: Client,
    base_url: String,
}

impl PaperSearchClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, DomainError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                DomainError::Infrastructure(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PaperSearch for PaperSearchClient {
    async fn search(
        &self,
        query: &PaperSearchQuery,
    ) -> Result<Vec<PaperSearchResult>, DomainError> {
        let expression = query.search_expression();
        let max_results = query.max_results().to_string();

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("search_query", expression.as_str()),
                ("start", "0"),
                ("max_results", max_results.as_str()),
                ("sortBy", "submittedDate"),
                ("sortOrder", "descending"),
            ])
            .send()
            .await
            .map_err(|e| DomainError::Infrastructure(format!("arXiv search failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!("arXiv search for '{}' returned HTTP {}", expression, status);
            return Err(DomainError::Infrastructure(format!(
                "arXiv search failed: HTTP {}",
                status
            )));
        }

        let body = response.text().await.to_infra_err()?;
        let results = parse_feed(&body)?;
        debug!(
            "arXiv search for '{}' returned {} entries",
            expression,
            results.len()
        );
        Ok(results)
    }
}

#[derive(Default)]
struct EntryFields {
    id: String,
    title: String,
    summary: String,
    published: String,
    authors: Vec<String>,
}

impl EntryFields {
    fn into_result(self) -> Result<Option<PaperSearchResult>, DomainError> {
        let id = self.id.trim();
        if id.is_empty() {
            return Ok(None);
        }
        // The API answers malformed queries with a single error entry.
        if id.contains("/api/errors") {
            return Err(DomainError::Infrastructure(format!(
                "arXiv rejected the query: {}",
                collapse_whitespace(&self.summary)
            )));
        }

        let ext_id = id.rsplit("/abs/").next().unwrap_or(id).to_string();
        let authors = if self.authors.is_empty() {
            "Unknown".to_string()
        } else {
            self.authors.join(", ")
        };

        Ok(Some(PaperSearchResult {
            ext_id,
            title: collapse_whitespace(&self.title),
            authors,
            year: self.published.trim().get(..4).and_then(|y| y.parse().ok()),
            arxiv_url: id.to_string(),
            pdf_url: format!("{}.pdf", id.replacen("/abs/", "/pdf/", 1)),
            summary: collapse_whitespace(&self.summary),
        }))
    }
}

/// Titles and abstracts arrive hard-wrapped.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse an Atom feed into search results, in feed order.
pub fn parse_feed(xml: &str) -> Result<Vec<PaperSearchResult>, DomainError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut results = Vec::new();
    let mut entry: Option<EntryFields> = None;
    let mut element = String::new();
    let mut author_name: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                match name.as_str() {
                    "entry" => entry = Some(EntryFields::default()),
                    "author" if entry.is_some() => author_name = Some(String::new()),
                    _ => {}
                }
                element = name;
            }
            Ok(Event::End(e)) => {
                match e.local_name().as_ref() {
                    b"entry" => {
                        if let Some(fields) = entry.take() {
                            if let Some(result) = fields.into_result()? {
                                results.push(result);
                            }
                        }
                    }
                    b"author" => {
                        if let (Some(fields), Some(name)) = (entry.as_mut(), author_name.take()) {
                            let name = collapse_whitespace(&name);
                            if !name.is_empty() {
                                fields.authors.push(name);
                            }
                        }
                    }
                    _ => {}
                }
                element.clear();
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| DomainError::Infrastructure(format!("Invalid arXiv feed: {}", e)))?;
                append_text(&mut entry, &mut author_name, &element, &text);
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e).to_string();
                append_text(&mut entry, &mut author_name, &element, &text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DomainError::Infrastructure(format!(
                    "Invalid arXiv feed: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(results)
}

fn append_text(
    entry: &mut Option<EntryFields>,
    author_name: &mut Option<String>,
    element: &str,
    text: &str,
) {
    let Some(fields) = entry.as_mut() else {
        return;
    };
    let target = match element {
        "name" => match author_name.as_mut() {
            Some(name) => name,
            None => return,
        },
        "id" => &mut fields.id,
        "title" => &mut fields.title,
        "summary" => &mut fields.summary,
        "published" => &mut fields.published,
        _ => return,
    };
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(text);
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:arxiv="http://arxiv.org/schemas/atom">
  <id>http://arxiv.org/api/query-id</id>
  <title>ArXiv Query: knot</title>
  <entry>
    <id>http://arxiv.org/abs/2403.00042v1</id>
    <published>2024-03-01T17:59:59Z</published>
    <title>Knot Floer homology
      and concordance</title>
    <summary>  We study &amp; compute
      invariants.
    </summary>
    <author><name>Ada Lovelace</name></author>
    <author><name>Emmy Noether</name><arxiv:affiliation>Erlangen</arxiv:affiliation></author>
    <link href="http://arxiv.org/abs/2403.00042v1" rel="alternate" type="text/html"/>
    <arxiv:primary_category term="math.GT"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/math/0101001v2</id>
    <title>Untitled survey</title>
  </entry>
</feed>"#;

    #[test]
    fn parses_entries_in_feed_order() {
        let results = parse_feed(FEED).unwrap();

        assert_eq!(results.len(), 2);
        let first = &results[0];
        assert_eq!(first.ext_id, "2403.00042v1");
        assert_eq!(first.title, "Knot Floer homology and concordance");
        assert_eq!(first.authors, "Ada Lovelace, Emmy Noether");
        assert_eq!(first.year, Some(2024));
        assert_eq!(first.arxiv_url, "http://arxiv.org/abs/2403.00042v1");
        assert_eq!(first.pdf_url, "http://arxiv.org/pdf/2403.00042v1.pdf");
        assert_eq!(first.summary, "We study & compute invariants.");
    }

    #[test]
    fn missing_fields_get_fallbacks() {
        let results = parse_feed(FEED).unwrap();
        let second = &results[1];

        assert_eq!(second.ext_id, "math/0101001v2");
        assert_eq!(second.authors, "Unknown");
        assert_eq!(second.year, None);
        assert_eq!(second.summary, "");
    }

    #[test]
    fn feed_without_entries_is_empty() {
        let feed = r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>none</title></feed>"#;
        assert!(parse_feed(feed).unwrap().is_empty());
    }

    #[test]
    fn error_entry_is_reported() {
        let feed = r#"<feed xmlns="http://www.w3.org/2005/Atom">
            <entry>
              <id>http://arxiv.org/api/errors#incorrect_id_format_for_1234</id>
              <title>Error</title>
              <summary>incorrect id format for 1234</summary>
            </entry>
        </feed>"#;

        match parse_feed(feed) {
            Err(DomainError::Infrastructure(msg)) => {
                assert!(msg.contains("incorrect id format for 1234"))
            }
            other => panic!("expected infrastructure error, got {:?}", other),
        }
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(parse_feed("<feed><entry><id>x</entry></feed>").is_err());
    }
}
