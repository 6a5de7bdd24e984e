//! Test utilities and fixture builders for the search-lens test suite

use mockito::{Mock, Server};
use search_lens::overlay::{HostError, InstanceId, MemoryHost, OverlayElement, OverlayHost};
use search_lens::PageSnapshot;

/// Wraps a test HTML body in a minimal document
#[allow(dead_code)]
pub fn create_test_html(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{}</title>
</head>
<body>
    {}
</body>
</html>"#,
        html_escape::encode_text(title),
        body
    )
}

/// One Google organic result card
#[allow(dead_code)]
pub fn google_card(title: &str, url: &str, snippet: &str) -> String {
    format!(
        r#"<div class="g"><div data-hveid="CA{n}">
            <a href="{url}"><br><h3 class="LC20lb">{title}</h3><cite>{url}</cite></a>
            <div class="VwiC3b"><span>{snippet}</span></div>
        </div></div>"#,
        n = title.len(),
    )
}

/// Google results page with the given cards
#[allow(dead_code)]
pub fn google_page(cards: &[String]) -> String {
    create_test_html(
        "rust ownership - Google Search",
        &format!(r#"<div id="search"><div id="rso">{}</div></div>"#, cards.concat()),
    )
}

/// One Bing result card
#[allow(dead_code)]
pub fn bing_card(title: &str, url: &str, snippet: &str) -> String {
    format!(
        r#"<li class="b_algo"><h2><a href="{url}">{title}</a></h2>
            <div class="b_caption"><p>{snippet}</p></div></li>"#
    )
}

/// Bing results page with the given cards
#[allow(dead_code)]
pub fn bing_page(cards: &[String]) -> String {
    create_test_html("Bing", &format!(r#"<ol id="b_results">{}</ol>"#, cards.concat()))
}

/// One DuckDuckGo result card
#[allow(dead_code)]
pub fn ddg_card(title: &str, url: &str, snippet: &str) -> String {
    format!(
        r#"<article data-testid="result">
            <h2><a data-testid="result-title-a" href="{url}"><span>{title}</span></a></h2>
            <div data-result="snippet"><span>{snippet}</span></div>
        </article>"#
    )
}

/// DuckDuckGo results page with the given cards
#[allow(dead_code)]
pub fn ddg_page(cards: &[String]) -> String {
    create_test_html("DuckDuckGo", &format!(r#"<ol class="react-results--main">{}</ol>"#, cards.concat()))
}

/// Snapshot of `html` served from `url`
#[allow(dead_code)]
pub fn snapshot(url: &str, html: &str) -> PageSnapshot {
    PageSnapshot::parse(url, html).expect("test URL must be absolute")
}

/// JSON body of a successful summary response
#[allow(dead_code)]
pub fn success_body(query: &str, summary: &str, num_results: u64, model: &str) -> String {
    serde_json::json!({
        "success": true,
        "query": query,
        "summary": summary,
        "num_results": num_results,
        "model": model,
    })
    .to_string()
}

/// Mocks `POST /summarize` answering `status` with a JSON `body`
#[allow(dead_code)]
pub async fn mock_summarize(server: &mut Server, status: usize, body: &str) -> Mock {
    server
        .mock("POST", "/summarize")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

/// Address nothing listens on
#[allow(dead_code)]
pub const UNREACHABLE_ENDPOINT: &str = "http://127.0.0.1:9";

/// Memory host that also records the name of every view appended
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub inner: MemoryHost,
    pub shown: Vec<&'static str>,
}

impl OverlayHost for RecordingHost {
    async fn remove_element(&mut self, id: &str) -> Result<bool, HostError> {
        self.inner.remove_element(id).await
    }

    async fn append_to_body(&mut self, element: &OverlayElement) -> Result<(), HostError> {
        self.shown.push(element.state().name());
        self.inner.append_to_body(element).await
    }

    async fn add_keydown_listener(&mut self, instance: InstanceId) -> Result<(), HostError> {
        self.inner.add_keydown_listener(instance).await
    }

    async fn remove_keydown_listener(&mut self, instance: InstanceId) -> Result<(), HostError> {
        self.inner.remove_keydown_listener(instance).await
    }
}
