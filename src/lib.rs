pub mod browser;
pub mod config;
pub mod extractor;
pub mod orchestrator;
pub mod overlay;
pub mod page_context;
pub mod service;
pub mod summary;
pub mod utils;

pub use browser::{BrowserOverlay, BrowserSession, run_in_browser};
pub use config::{ConfigError, LensConfig};
pub use extractor::{ResultRecord, ResultSet, scrape_results};
pub use orchestrator::{Orchestrator, PipelineError};
pub use overlay::{
    MemoryHost, OverlayEvent, OverlayHost, OverlayPresenter, OverlayState, SharedPresenter,
};
pub use page_context::{PageSnapshot, Query, SearchEngine, detect_engine, extract_query};
pub use summary::{SuccessPayload, SummaryClient, SummaryError, SummaryResponse};

/// Run the full pipeline against `page` with a fresh in-process overlay.
///
/// Returns the presenter so callers can inspect or drive what was shown.
pub async fn summarize_page(
    config: &LensConfig,
    page: &PageSnapshot,
) -> (Result<SuccessPayload, PipelineError>, SharedPresenter<MemoryHost>) {
    let presenter = OverlayPresenter::shared(MemoryHost::new());
    let orchestrator = Orchestrator::from_config(config, presenter.clone());
    let outcome = orchestrator.run(page).await;
    (outcome, presenter)
}
