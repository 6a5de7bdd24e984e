//! Pipeline orchestration
//!
//! detect engine → extract query → scrape results → show loading →
//! request summary → show the terminal view. Every failure short-circuits to
//! the error view; nothing is retried.

use tracing::{info, warn};

use crate::config::LensConfig;
use crate::extractor::{ResultSet, scrape_document};
use crate::overlay::{InstanceId, OverlayHost, OverlayState, SharedPresenter};
use crate::page_context::{PageSnapshot, Query, SearchEngine};
use crate::summary::{SuccessPayload, SummaryClient, SummaryResponse};
use crate::utils::MAX_RESULTS;

/// Terminal failures of one invocation, all surfaced through the error view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("Unsupported search engine. This tool works with Google, Bing, and DuckDuckGo.")]
    UnsupportedEngine,

    #[error("Could not detect search query. Make sure you are on a search results page.")]
    MissingQuery,

    #[error("Could not extract search results. The page structure may have changed.")]
    EmptyResultSet,

    /// Network or decoding failure talking to the summarization service.
    #[error("{0}")]
    TransportFailure(String),

    /// The service answered and reported a failure.
    #[error("{0}")]
    ServiceReportedFailure(String),
}

impl PipelineError {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedEngine => "unsupported_engine",
            Self::MissingQuery => "missing_query",
            Self::EmptyResultSet => "empty_result_set",
            Self::TransportFailure(_) => "transport_failure",
            Self::ServiceReportedFailure(_) => "service_reported_failure",
        }
    }
}

/// Runs the pipeline against a page and drives the overlay.
pub struct Orchestrator<H> {
    client: SummaryClient,
    presenter: SharedPresenter<H>,
    max_results: usize,
}

impl<H: OverlayHost> Orchestrator<H> {
    pub fn new(client: SummaryClient, presenter: SharedPresenter<H>) -> Self {
        Self {
            client,
            presenter,
            max_results: MAX_RESULTS,
        }
    }

    /// Orchestrator for the configured endpoint and result limit.
    pub fn from_config(config: &LensConfig, presenter: SharedPresenter<H>) -> Self {
        Self::new(SummaryClient::from_config(config), presenter).with_max_results(config.max_results())
    }

    /// Forward at most `limit` results (never more than [`MAX_RESULTS`]).
    #[must_use]
    pub fn with_max_results(mut self, limit: usize) -> Self {
        self.max_results = limit;
        self
    }

    pub fn presenter(&self) -> &SharedPresenter<H> {
        &self.presenter
    }

    pub fn client(&self) -> &SummaryClient {
        &self.client
    }

    /// Run one invocation against `page`.
    ///
    /// The terminal view has been presented when this returns. The result
    /// mirrors what was shown.
    ///
    /// # Errors
    ///
    /// Returns the [`PipelineError`] that was displayed in the error view.
    pub async fn run(&self, page: &PageSnapshot) -> Result<SuccessPayload, PipelineError> {
        let (query, results) = match prepare(page, self.max_results) {
            Ok(prepared) => prepared,
            Err(e) => {
                warn!("Pipeline stopped before summarization: {} ({})", e, e.kind());
                self.present(OverlayState::error(e.to_string())).await;
                return Err(e);
            }
        };

        let loading = self.present(OverlayState::Loading).await;

        let outcome = match self.client.request(&query, &results).await {
            Ok(SummaryResponse::Success(payload)) => Ok(payload),
            Ok(SummaryResponse::Failure(failure)) => {
                Err(PipelineError::ServiceReportedFailure(failure.error))
            }
            Err(e) => Err(PipelineError::TransportFailure(e.to_string())),
        };

        let state = match &outcome {
            Ok(payload) => {
                info!("Summary ready: {} results via {}", payload.num_results, payload.model);
                OverlayState::Success(payload.clone())
            }
            Err(e) => {
                warn!("Summarization failed: {} ({})", e, e.kind());
                OverlayState::error(e.to_string())
            }
        };
        self.present_terminal(loading, state).await;

        outcome
    }

    async fn present(&self, state: OverlayState) -> Option<InstanceId> {
        let mut presenter = self.presenter.lock().await;
        match presenter.show(state).await {
            Ok(instance) => Some(instance),
            Err(e) => {
                warn!("Failed to render overlay: {}", e);
                None
            }
        }
    }

    /// Show the terminal view unless the user dismissed the loading overlay
    /// (or a later one) while the request was in flight.
    ///
    /// A loading view that never rendered does not suppress the terminal view.
    /// If another invocation replaced the loading view in the meantime, that
    /// overlay is replaced in turn (last writer wins).
    async fn present_terminal(&self, loading: Option<InstanceId>, state: OverlayState) {
        let mut presenter = self.presenter.lock().await;
        if loading.is_some_and(|instance| presenter.dismissed_since(instance)) {
            info!("Overlay was dismissed during the request; discarding {} view", state.name());
            return;
        }
        if let Err(e) = presenter.show(state).await {
            warn!("Failed to render overlay: {}", e);
        }
    }
}

/// Detect, extract, and scrape up to `limit` results. Pure with respect to
/// the page.
///
/// # Errors
///
/// Returns the first short-circuit condition hit.
pub fn prepare(page: &PageSnapshot, limit: usize) -> Result<(Query, ResultSet), PipelineError> {
    let engine = page.engine();
    if engine == SearchEngine::Unknown {
        return Err(PipelineError::UnsupportedEngine);
    }

    let query = page.query().ok_or(PipelineError::MissingQuery)?;

    let results = scrape_document(engine, page.html(), page.url(), limit);
    if results.is_empty() {
        return Err(PipelineError::EmptyResultSet);
    }

    info!(engine = %engine, results = results.len(), "Prepared '{}' for summarization", query);
    Ok((query, results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{EventOutcome, HostError, MemoryHost, OverlayElement, OverlayEvent, OverlayPresenter};
    use crate::utils::OVERLAY_ID;

    const GOOGLE_PAGE: &str = r#"<html><body><div id="search">
        <div class="g"><a href="https://doc.rust-lang.org/book/ch04-01-what-is-ownership.html"><h3>What is Ownership?</h3></a>
            <div class="VwiC3b">Ownership is a set of rules that govern memory.</div></div>
        <div class="g"><a href="https://example.com/borrowing"><h3>Borrowing explained</h3></a>
            <div class="VwiC3b">References let you use a value without taking ownership.</div></div>
    </div></body></html>"#;

    fn page(url: &str, html: &str) -> PageSnapshot {
        PageSnapshot::parse(url, html).unwrap()
    }

    fn orchestrator(endpoint: &str) -> Orchestrator<MemoryHost> {
        Orchestrator::new(
            SummaryClient::new(endpoint),
            OverlayPresenter::shared(MemoryHost::new()),
        )
    }

    async fn shown(orchestrator: &Orchestrator<MemoryHost>) -> Option<OverlayState> {
        orchestrator.presenter().lock().await.state().cloned()
    }

    #[test]
    fn prepare_short_circuits_in_order() {
        let unsupported = page("https://search.yahoo.com/search?q=rust", GOOGLE_PAGE);
        assert_eq!(prepare(&unsupported, MAX_RESULTS).unwrap_err(), PipelineError::UnsupportedEngine);

        let no_query = page("https://www.google.com/search?hl=en", GOOGLE_PAGE);
        assert_eq!(prepare(&no_query, MAX_RESULTS).unwrap_err(), PipelineError::MissingQuery);

        let empty = page("https://www.google.com/search?q=rust", "<html><body></body></html>");
        assert_eq!(prepare(&empty, MAX_RESULTS).unwrap_err(), PipelineError::EmptyResultSet);
    }

    #[test]
    fn prepare_scrapes_results() {
        let (query, results) =
            prepare(&page("https://www.google.com/search?q=rust+ownership", GOOGLE_PAGE), MAX_RESULTS)
                .unwrap();
        assert_eq!(query.as_str(), "rust ownership");
        assert_eq!(results.len(), 2);

        let page = page("https://www.google.com/search?q=rust", GOOGLE_PAGE);
        let (_, limited) = prepare(&page, 1).unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn service_failure_is_shown_verbatim() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/summarize")
            .with_status(503)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": false, "error": "Ollama is not running"}"#)
            .create_async()
            .await;

        let orchestrator = orchestrator(&server.url());
        let result = orchestrator
            .run(&page("https://www.google.com/search?q=rust", GOOGLE_PAGE))
            .await;

        mock.assert_async().await;
        assert_eq!(
            result.unwrap_err(),
            PipelineError::ServiceReportedFailure("Ollama is not running".to_string())
        );
        assert_eq!(shown(&orchestrator).await, Some(OverlayState::error("Ollama is not running")));
    }

    #[tokio::test]
    async fn missing_query_skips_network() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/summarize").expect(0).create_async().await;

        let orchestrator = orchestrator(&server.url());
        let result = orchestrator
            .run(&page("https://www.bing.com/search?form=QBLH", GOOGLE_PAGE))
            .await;

        mock.assert_async().await;
        assert_eq!(result.unwrap_err(), PipelineError::MissingQuery);
        assert_eq!(
            shown(&orchestrator).await,
            Some(OverlayState::error(PipelineError::MissingQuery.to_string()))
        );
    }

    #[tokio::test]
    async fn dismissed_overlay_is_not_reopened() {
        let orchestrator = orchestrator("http://127.0.0.1:9");
        let loading = orchestrator.present(OverlayState::Loading).await;
        {
            let mut presenter = orchestrator.presenter().lock().await;
            let outcome = presenter.handle_event(OverlayEvent::escape(loading.unwrap())).await;
            assert!(matches!(outcome, Ok(EventOutcome::Dismissed(_))));
        }

        orchestrator.present_terminal(loading, OverlayState::error("late")).await;

        let presenter = orchestrator.presenter().lock().await;
        assert!(!presenter.is_open());
        assert_eq!(presenter.host().count_with_id(OVERLAY_ID), 0);
    }

    #[tokio::test]
    async fn late_result_replaces_newer_overlay() {
        let orchestrator = orchestrator("http://127.0.0.1:9");
        let first = orchestrator.present(OverlayState::Loading).await;
        orchestrator.present(OverlayState::Loading).await;

        orchestrator.present_terminal(first, OverlayState::error("first finished")).await;

        let presenter = orchestrator.presenter().lock().await;
        assert_eq!(presenter.state(), Some(&OverlayState::error("first finished")));
        assert_eq!(presenter.host().count_with_id(OVERLAY_ID), 1);
    }

    /// Host whose first `append_to_body` fails.
    #[derive(Default)]
    struct FirstAppendFails {
        inner: MemoryHost,
        appends: usize,
    }

    impl OverlayHost for FirstAppendFails {
        async fn remove_element(&mut self, id: &str) -> Result<bool, HostError> {
            self.inner.remove_element(id).await
        }

        async fn append_to_body(&mut self, element: &OverlayElement) -> Result<(), HostError> {
            self.appends += 1;
            if self.appends == 1 {
                return Err(HostError::Browser("target closed".to_string()));
            }
            self.inner.append_to_body(element).await
        }

        async fn add_keydown_listener(&mut self, instance: InstanceId) -> Result<(), HostError> {
            self.inner.add_keydown_listener(instance).await
        }

        async fn remove_keydown_listener(&mut self, instance: InstanceId) -> Result<(), HostError> {
            self.inner.remove_keydown_listener(instance).await
        }
    }

    #[tokio::test]
    async fn failed_loading_render_still_shows_error() {
        let orchestrator = Orchestrator::new(
            SummaryClient::new("http://127.0.0.1:9"),
            OverlayPresenter::shared(FirstAppendFails::default()),
        );

        let result = orchestrator
            .run(&page("https://www.google.com/search?q=rust", GOOGLE_PAGE))
            .await;

        assert!(matches!(result, Err(PipelineError::TransportFailure(_))));
        let presenter = orchestrator.presenter().lock().await;
        assert!(matches!(presenter.state(), Some(OverlayState::Error(_))));
        assert_eq!(presenter.host().appends, 2);
        assert_eq!(presenter.host().inner.count_with_id(OVERLAY_ID), 1);
    }
}
