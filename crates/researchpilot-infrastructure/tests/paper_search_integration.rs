use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::routing::get;
use axum::Router;
use researchpilot_domain::paper::{PaperSearch, PaperSearchQuery};
use researchpilot_domain::shared::DomainError;
use researchpilot_infrastructure::search::PaperSearchClient;

type SeenQueries = Arc<Mutex<Vec<HashMap<String, String>>>>;

const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>ArXiv Query</title>
  <entry>
    <id>http://arxiv.org/abs/2403.00042v1</id>
    <published>2024-03-01T17:59:59Z</published>
    <title>Knot Floer homology and concordance</title>
    <summary>We study invariants.</summary>
    <author><name>Ada Lovelace</name></author>
  </entry>
</feed>"#;

/// Serve `body` with `status` on a random local port, recording query strings.
async fn spawn_catalogue(status: StatusCode, body: &'static str) -> (String, SeenQueries) {
    let seen: SeenQueries = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();
    let app = Router::new().route(
        "/api/query",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(params);
                (status, [(header::CONTENT_TYPE, "application/atom+xml")], body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Bind stub catalogue");
    let addr = listener.local_addr().expect("Local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Serve stub catalogue");
    });

    (format!("http://{}/api/query", addr), seen)
}

#[tokio::test]
async fn search_sends_sorted_query_and_parses_feed() {
    let (url, seen) = spawn_catalogue(StatusCode::OK, FEED).await;
    let client = PaperSearchClient::new(url).unwrap();
    let query = PaperSearchQuery::new("concordance", Some(5), Some("math.GT".into())).unwrap();

    let results = client.search(&query).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].ext_id, "2403.00042v1");
    assert_eq!(results[0].authors, "Ada Lovelace");
    assert_eq!(results[0].year, Some(2024));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let params = &seen[0];
    assert_eq!(params["search_query"], "cat:math.GT AND (concordance)");
    assert_eq!(params["start"], "0");
    assert_eq!(params["max_results"], "5");
    assert_eq!(params["sortBy"], "submittedDate");
    assert_eq!(params["sortOrder"], "descending");
}

#[tokio::test]
async fn upstream_failure_is_infrastructure_error() {
    let (url, _) = spawn_catalogue(StatusCode::SERVICE_UNAVAILABLE, "busy").await;
    let client = PaperSearchClient::new(url).unwrap();
    let query = PaperSearchQuery::new("knots", None, None).unwrap();

    match client.search(&query).await {
        Err(DomainError::Infrastructure(msg)) => assert!(msg.contains("503")),
        other => panic!("expected infrastructure error, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_catalogue_is_infrastructure_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = PaperSearchClient::new(format!("http://{}/api/query", addr)).unwrap();
    let query = PaperSearchQuery::new("knots", None, None).unwrap();

    assert!(matches!(
        client.search(&query).await,
        Err(DomainError::Infrastructure(_))
    ));
}
