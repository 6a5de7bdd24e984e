//! Summary client against a mocked summarization service

mod common;

use common::*;
use mockito::Matcher;
use search_lens::extractor::{ResultRecord, ResultSet};
use search_lens::summary::{SummaryClient, SummaryError, SummaryResponse};
use search_lens::Query;
use serde_json::json;

fn inputs() -> (Query, ResultSet) {
    let query = Query::new("rust ownership").expect("non-empty query");
    let results = ResultSet::from_records(
        [
            ResultRecord::new("The Book", "https://doc.rust-lang.org/book/", "Ownership rules."),
            ResultRecord::new("Nomicon", "https://doc.rust-lang.org/nomicon/", "Unsafe details."),
        ]
        .into_iter()
        .flatten(),
    );
    (query, results)
}

#[tokio::test]
async fn posts_query_and_results() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/summarize")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "query": "rust ownership",
            "results": [
                {"title": "The Book", "url": "https://doc.rust-lang.org/book/", "snippet": "Ownership rules."},
                {"title": "Nomicon", "url": "https://doc.rust-lang.org/nomicon/", "snippet": "Unsafe details."}
            ]
        })))
        .with_status(200)
        .with_body(success_body("rust ownership", "Values have one owner.", 2, "llama3"))
        .create_async()
        .await;

    let (query, results) = inputs();
    let response = SummaryClient::new(server.url()).request(&query, &results).await.unwrap();

    mock.assert_async().await;
    let SummaryResponse::Success(payload) = response else {
        panic!("expected success, got {response:?}");
    };
    assert_eq!(payload.summary, "Values have one owner.");
    assert_eq!(payload.num_results, 2);
}

#[tokio::test]
async fn failure_body_is_returned_whatever_the_status() {
    let mut server = mockito::Server::new_async().await;
    mock_summarize(
        &mut server,
        503,
        r#"{"success": false, "error": "Ollama is not running. Please start Ollama with 'ollama serve'"}"#,
    )
    .await;

    let (query, results) = inputs();
    let response = SummaryClient::new(server.url()).request(&query, &results).await.unwrap();

    assert_eq!(
        response,
        SummaryResponse::failure("Ollama is not running. Please start Ollama with 'ollama serve'")
    );
}

#[tokio::test]
async fn undecodable_error_status_reports_http_status() {
    let mut server = mockito::Server::new_async().await;
    mock_summarize(&mut server, 502, "<html>Bad Gateway</html>").await;

    let (query, results) = inputs();
    let client = SummaryClient::new(server.url());

    let err = client.request(&query, &results).await.unwrap_err();
    assert!(matches!(err, SummaryError::HttpStatus { status: 502 }));

    let folded = client.get_summary(&query, &results).await;
    assert_eq!(folded, SummaryResponse::failure("summarization service returned HTTP 502"));
}

#[tokio::test]
async fn malformed_success_is_a_decode_error() {
    let mut server = mockito::Server::new_async().await;
    mock_summarize(&mut server, 200, r#"{"success": true, "summary": "no model"}"#).await;

    let (query, results) = inputs();
    let err = SummaryClient::new(server.url()).request(&query, &results).await.unwrap_err();
    assert!(matches!(err, SummaryError::Decode(_)));
}

#[tokio::test]
async fn unreachable_service_folds_into_failure() {
    let (query, results) = inputs();
    let client = SummaryClient::new(UNREACHABLE_ENDPOINT);

    assert!(matches!(client.request(&query, &results).await, Err(SummaryError::Send(_))));

    let SummaryResponse::Failure(failure) = client.get_summary(&query, &results).await else {
        panic!("expected failure");
    };
    assert!(!failure.error.is_empty());
}

#[test]
fn endpoint_trailing_slash_is_ignored() {
    let client = SummaryClient::new("http://localhost:5000/");
    assert_eq!(client.summarize_url(), "http://localhost:5000/summarize");
}
